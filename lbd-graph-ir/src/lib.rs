//! In-memory RDF graph representation for building data
//!
//! This crate holds the graph model shared by the Turtle parser, the Turtle
//! writer and the ifcOWL to LBD converter.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form. Prefixes
//!    are bookkeeping for the writer.
//!
//! 2. **Explicit datatypes** - Literals always carry a datatype. Plain strings
//!    use `xsd:string`.
//!
//! 3. **Indexed lookups** - `Graph` keeps subject and object indices so the
//!    converter can walk ifcOWL relationship objects in both directions.
//!
//! 4. **Deterministic output** - Call `canonicalize()` before writing for
//!    SPO-sorted, duplicate-free output.
//!
//! # Example
//!
//! ```
//! use lbd_graph_ir::{Graph, Term, path::{path_query, Step}};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/wall"),
//!     Term::iri("http://example.org/name"),
//!     Term::iri("http://example.org/label_1"),
//! );
//! graph.add_triple(
//!     Term::iri("http://example.org/label_1"),
//!     Term::iri("http://example.org/hasString"),
//!     Term::string("Wall-01"),
//! );
//!
//! let names = path_query(
//!     &graph,
//!     &Term::iri("http://example.org/wall"),
//!     &[
//!         Step::forward("http://example.org/name"),
//!         Step::forward("http://example.org/hasString"),
//!     ],
//! );
//! assert_eq!(names, vec![Term::string("Wall-01")]);
//! ```

pub mod datatype;
mod graph;
pub mod path;
mod sink;
mod term;
mod triple;

pub use datatype::Datatype;
pub use graph::Graph;
pub use sink::{GraphCollectorSink, GraphSink, TermId};
pub use term::{BlankId, LiteralValue, Term};
pub use triple::Triple;
