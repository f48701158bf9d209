//! RDF graph formatters
//!
//! This crate converts an `lbd_graph_ir::Graph` to Turtle, the output format
//! of the LBD converter. Prefixes declared on the graph are used to compact
//! IRIs; subjects and predicates are written in a deterministic order.
//!
//! # Example
//!
//! ```
//! use lbd_graph_ir::{Graph, Term};
//! use lbd_graph_format::{format_turtle, TurtleFormatConfig};
//!
//! let mut graph = Graph::new();
//! graph.add_prefix("bot", "https://w3id.org/bot#");
//! graph.add_triple(
//!     Term::iri("http://example.org/site_1"),
//!     Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
//!     Term::iri("https://w3id.org/bot#Site"),
//! );
//!
//! let turtle = format_turtle(&graph, &TurtleFormatConfig::default());
//! assert!(turtle.contains("<http://example.org/site_1> a bot:Site ."));
//! ```

mod policy;
mod turtle;

pub use policy::{BlankNodePolicy, PrefixPolicy};
pub use turtle::{format_turtle, write_turtle, TurtleFormatConfig};
