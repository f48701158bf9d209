//! ifcOWL class → LBD class table
//!
//! Built from the cross references of the product ontologies: a statement
//! `<target> rdfs:seeAlso <ifc class>` maps the ifc class (by local name, so
//! the table works for every schema edition) to the target class. Direct
//! subclasses of a mapped ifc class inherit the mapping unless they have one
//! of their own.

use std::collections::HashMap;
use std::sync::Arc;

use lbd_graph_ir::{Graph, Term};
use lbd_vocab::{local_name, rdfs};

#[derive(Clone, Debug, Default)]
pub struct TypeMapper {
    table: HashMap<String, Vec<Arc<str>>>,
}

/// Result of looking up one class
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    Mapped(&'a str),
    Unmapped,
    /// Several distinct targets; never resolved
    Ambiguous(Vec<&'a str>),
}

fn is_cross_reference(predicate: &Term) -> bool {
    predicate
        .as_iri()
        .is_some_and(|iri| iri.to_lowercase().contains("seealso"))
}

impl TypeMapper {
    pub fn build(ontology: &Graph, ifc_namespace: &str) -> TypeMapper {
        let mut table: HashMap<String, Vec<Arc<str>>> = HashMap::new();

        let cross_references: Vec<(&Term, &Term)> = ontology
            .iter()
            .filter(|t| is_cross_reference(&t.p) && t.o.is_resource() && t.s.is_iri())
            .map(|t| (&t.s, &t.o))
            .collect();

        for (target, ifc_class) in &cross_references {
            if let Some(target) = target.as_iri() {
                table
                    .entry(ifc_class.local_name().to_string())
                    .or_default()
                    .push(Arc::from(target));
            }
        }

        let mut inherited = 0usize;
        for (target, ifc_class) in &cross_references {
            let Some(target) = target.as_iri() else {
                continue;
            };
            let resolved = Term::iri(format!("{ifc_namespace}{}", ifc_class.local_name()));
            for sub in ontology.subjects_with(rdfs::SUB_CLASS_OF, &resolved) {
                let Some(sub_iri) = sub.as_iri() else {
                    continue;
                };
                let sub_local = local_name(sub_iri);
                if !table.contains_key(sub_local) {
                    tracing::trace!(class = sub_local, target, "mapping inherited from superclass");
                    table.insert(sub_local.to_string(), vec![Arc::from(target)]);
                    inherited += 1;
                }
            }
        }

        tracing::debug!(classes = table.len(), inherited, "type mapping built");
        TypeMapper { table }
    }

    pub fn lookup(&self, class_local_name: &str) -> Resolution<'_> {
        let Some(targets) = self.table.get(class_local_name) else {
            return Resolution::Unmapped;
        };
        let mut distinct: Vec<&str> = Vec::with_capacity(targets.len());
        for target in targets {
            if !distinct.contains(&&**target) {
                distinct.push(&**target);
            }
        }
        match distinct.len() {
            0 => Resolution::Unmapped,
            1 => Resolution::Mapped(distinct[0]),
            _ => Resolution::Ambiguous(distinct),
        }
    }

    /// Target class IRI, `None` when unmapped or ambiguous
    pub fn resolve(&self, class_local_name: &str) -> Option<&str> {
        match self.lookup(class_local_name) {
            Resolution::Mapped(target) => Some(target),
            Resolution::Unmapped | Resolution::Ambiguous(_) => None,
        }
    }

    /// Classes with more than one distinct target, sorted
    pub fn ambiguous_classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self
            .table
            .keys()
            .filter(|class| matches!(self.lookup(class), Resolution::Ambiguous(_)))
            .map(String::as_str)
            .collect();
        classes.sort_unstable();
        classes
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
