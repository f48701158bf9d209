//! Turtle parser for lbd-graph-ir
//!
//! Parses the Turtle exports of IFC-to-RDF converters and the LBD ontology
//! files. Output goes to any [`GraphSink`]; [`parse_graph`] collects it into a
//! [`Graph`].
//!
//! # Example
//!
//! ```
//! let graph = lbd_graph_turtle::parse_graph(
//!     "@prefix bot: <https://w3id.org/bot#> .\n\
//!      <http://example.org/site> a bot:Site .",
//! )
//! .unwrap();
//! assert_eq!(graph.len(), 1);
//! assert_eq!(graph.namespace("bot"), Some("https://w3id.org/bot#"));
//! ```

pub mod error;
pub mod lex;
pub mod parser;

pub use error::{Result, TurtleError};
pub use parser::{parse, Parser};

use lbd_graph_ir::{Graph, GraphCollectorSink};

/// Parse a Turtle document into a new graph.
pub fn parse_graph(input: &str) -> Result<Graph> {
    let mut sink = GraphCollectorSink::new();
    parse(input, &mut sink)?;
    let graph = sink.finish();
    tracing::debug!(triples = graph.len(), prefixes = graph.prefixes.len(), "parsed turtle");
    Ok(graph)
}

/// Parse a Turtle document into an existing graph.
///
/// `blank_scope` is prepended to the document's blank node labels so that
/// several documents can share one graph without their blank nodes merging.
pub fn parse_into(graph: Graph, input: &str, blank_scope: &str) -> Result<Graph> {
    let mut sink = GraphCollectorSink::into_graph(graph).with_blank_scope(blank_scope);
    parse(input, &mut sink)?;
    Ok(sink.finish())
}
