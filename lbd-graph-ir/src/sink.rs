//! GraphSink trait for event-driven graph construction
//!
//! Parsers call methods like `term_iri()` and `emit_triple()` on a sink
//! without knowing how the triples are stored. `GraphCollectorSink` collects
//! them into a [`Graph`].

use crate::{Datatype, Graph, LiteralValue, Term, Triple};
use std::collections::HashMap;

/// Opaque term identifier, valid within a single sink session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermId(pub(crate) u32);

impl TermId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// Event-driven interface for RDF graph construction
///
/// # Example
///
/// ```
/// use lbd_graph_ir::{GraphSink, GraphCollectorSink, Datatype};
///
/// let mut sink = GraphCollectorSink::new();
/// sink.on_prefix("inst", "http://example.org/model#");
///
/// let wall = sink.term_iri("http://example.org/model#IfcWall_12");
/// let label = sink.term_iri("http://www.w3.org/2000/01/rdf-schema#label");
/// let name = sink.term_literal("Wall-01", Datatype::xsd_string(), None);
/// sink.emit_triple(wall, label, name);
///
/// let graph = sink.finish();
/// assert_eq!(graph.len(), 1);
/// ```
pub trait GraphSink {
    /// Called when a base IRI is declared (`@base <...> .`)
    fn on_base(&mut self, base_iri: &str);

    /// Called when a prefix is declared (`@prefix p: <...> .`)
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str);

    /// Create an IRI term from an expanded IRI
    fn term_iri(&mut self, iri: &str) -> TermId;

    /// Create a blank node term
    ///
    /// The same `Some(label)` always yields the same node; `None` yields a
    /// fresh node.
    fn term_blank(&mut self, label: Option<&str>) -> TermId;

    /// Create a literal from its lexical form
    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId;

    /// Create a literal from a native value
    fn term_literal_value(&mut self, value: LiteralValue, datatype: Datatype) -> TermId;

    fn emit_triple(&mut self, subject: TermId, predicate: TermId, object: TermId);
}

/// A sink that collects triples into a [`Graph`]
#[derive(Debug, Default)]
pub struct GraphCollectorSink {
    graph: Graph,
    terms: Vec<Term>,
    blank_counter: u32,
    blank_labels: HashMap<String, TermId>,
    /// Prepended to every blank node label
    blank_scope: String,
}

impl GraphCollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect into an existing graph, e.g. to load several documents into one
    pub fn into_graph(graph: Graph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// Scope blank node labels so documents loaded into the same graph keep
    /// their blank nodes apart (`_:b1` becomes `_:<scope>b1`)
    pub fn with_blank_scope(mut self, scope: impl Into<String>) -> Self {
        self.blank_scope = scope.into();
        self
    }

    pub fn finish(self) -> Graph {
        self.graph
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn get_term(&self, id: TermId) -> &Term {
        &self.terms[id.0 as usize]
    }

    fn add_term(&mut self, term: Term) -> TermId {
        let id = TermId(self.terms.len() as u32);
        self.terms.push(term);
        id
    }
}

impl GraphSink for GraphCollectorSink {
    fn on_base(&mut self, base_iri: &str) {
        self.graph.set_base(base_iri);
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.graph.add_prefix(prefix, namespace_iri);
    }

    fn term_iri(&mut self, iri: &str) -> TermId {
        self.add_term(Term::iri(iri))
    }

    fn term_blank(&mut self, label: Option<&str>) -> TermId {
        match label {
            Some(l) => {
                if let Some(&id) = self.blank_labels.get(l) {
                    return id;
                }
                let id = self.add_term(Term::blank(format!("{}{}", self.blank_scope, l)));
                self.blank_labels.insert(l.to_string(), id);
                id
            }
            None => {
                self.blank_counter += 1;
                let label = format!("{}anon{}", self.blank_scope, self.blank_counter);
                self.add_term(Term::blank(label))
            }
        }
    }

    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId {
        let term = match language {
            Some(lang) => Term::lang_string(value, lang),
            None if datatype.is_xsd_string() => Term::string(value),
            None => Term::typed(value, datatype),
        };
        self.add_term(term)
    }

    fn term_literal_value(&mut self, value: LiteralValue, datatype: Datatype) -> TermId {
        self.add_term(Term::Literal {
            value,
            datatype,
            language: None,
        })
    }

    fn emit_triple(&mut self, subject: TermId, predicate: TermId, object: TermId) {
        let s = self.get_term(subject).clone();
        let p = self.get_term(predicate).clone();
        let o = self.get_term(object).clone();
        self.graph.add(Triple::new(s, p, o));
    }
}
