//! Scalar attribute propagation
//!
//! The direct attributes of a source entity (name, description, tag, ...)
//! are unwrapped from their EXPRESS value boxes and written to the property
//! graph against the entity's output resource. Each source entity is handled
//! at most once per conversion, no matter how many parents reach it.

use std::collections::HashSet;

use lbd_graph_ir::{Graph, Term};
use lbd_vocab::{express, ifc, rdf};

use crate::pset::{insert, BagKind, PropertyBag, PropertyValue, PropertyWriter};
use crate::source::SourceModel;

/// Wrapper lookup order for value boxes other than labels and identifiers
const WRAPPERS: [&str; 4] = [
    express::HAS_STRING,
    express::HAS_INTEGER,
    express::HAS_DOUBLE,
    express::HAS_BOOLEAN,
];

#[derive(Debug, Default)]
pub struct AttributePropagator {
    visited: HashSet<Term>,
}

impl AttributePropagator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, entity: &Term) -> bool {
        self.visited.contains(entity)
    }

    /// Collect the attributes of `entity`, without writing anything
    pub fn collect(source: &SourceModel<'_>, entity: &Term) -> (PropertyBag, Vec<(Term, Term)>) {
        let graph = source.graph();
        let mut bag = PropertyBag::new(BagKind::Attribute);
        let mut literals = Vec::new();

        for triple in graph.triples_for_subject(entity) {
            if triple.p.as_iri() == Some(rdf::TYPE) {
                continue;
            }
            if triple.o.is_literal() {
                literals.push((triple.p.clone(), triple.o.clone()));
                continue;
            }

            let local = triple.p.local_name();
            let name = if local.starts_with(ifc::TAG_PREFIX) {
                ifc::BATID
            } else {
                local
            };
            if let Some(value) = unwrap_value(graph, source, &triple.o) {
                bag.put(name, PropertyValue::Scalar(value), Some(triple.o.clone()));
            }
        }
        (bag, literals)
    }

    /// Write the attributes of `entity` against `target` unless `entity` was
    /// already handled. `guid` is asked for only when something is written.
    ///
    /// Returns `false` when the entity had been visited before.
    pub fn copy_attributes(
        &mut self,
        source: &SourceModel<'_>,
        entity: &Term,
        target: &Term,
        guid: impl FnOnce() -> String,
        writer: &mut PropertyWriter,
        property_graph: &mut Graph,
    ) -> bool {
        if !self.visited.insert(entity.clone()) {
            return false;
        }

        let (bag, literals) = Self::collect(source, entity);
        for (predicate, literal) in literals {
            insert(property_graph, target.clone(), predicate, literal);
        }
        if !bag.is_empty() {
            let guid = guid();
            bag.connect(writer, property_graph, target, &guid);
        }
        tracing::trace!(entity = ?entity, attributes = bag.len(), "attributes copied");
        true
    }
}

/// Literal inside an EXPRESS value box
fn unwrap_value(graph: &Graph, source: &SourceModel<'_>, node: &Term) -> Option<Term> {
    let boxed = source.type_local_name(node);
    if boxed.is_empty() {
        return None;
    }
    match boxed {
        ifc::LABEL => graph
            .object(node, express::HAS_STRING)
            .filter(|v| v.lexical().is_some_and(|s| !s.is_empty()))
            .cloned(),
        ifc::IDENTIFIER => graph.object(node, express::HAS_STRING).cloned(),
        _ => WRAPPERS
            .iter()
            .find_map(|wrapper| graph.object(node, wrapper))
            .cloned(),
    }
}
