//! Fixed-length path queries over a [`Graph`]
//!
//! A path is an ordered list of predicate hops. Each hop either follows the
//! predicate from subject to object (`Step::Forward`) or from object back to
//! subject (`Step::Inverse`). ifcOWL models relationships as objects of their
//! own (`IfcRelAggregates`, `IfcRelContainedInSpatialStructure`, ...) that
//! point *at* the related entities, so walking from an entity to its related
//! entities needs an inverse hop followed by a forward hop.

use crate::{Graph, Term};
use std::collections::HashSet;

/// One predicate hop of a path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// `?current <p> ?next`
    Forward(String),
    /// `?next <p> ?current`
    Inverse(String),
}

impl Step {
    pub fn forward(predicate: impl Into<String>) -> Self {
        Step::Forward(predicate.into())
    }

    pub fn inverse(predicate: impl Into<String>) -> Self {
        Step::Inverse(predicate.into())
    }
}

/// Evaluate `path` starting at `start`
///
/// Returns the terminal nodes in discovery order, without duplicates. An
/// empty path returns `start` itself.
pub fn path_query(graph: &Graph, start: &Term, path: &[Step]) -> Vec<Term> {
    let mut frontier = vec![start.clone()];

    for step in path {
        let mut seen = HashSet::new();
        let mut next = Vec::new();
        for node in &frontier {
            let reached = match step {
                Step::Forward(p) => graph.objects(node, p),
                Step::Inverse(p) => graph.subjects_with(p, node),
            };
            for term in reached {
                if seen.insert(term.clone()) {
                    next.push(term.clone());
                }
            }
        }
        if next.is_empty() {
            return next;
        }
        frontier = next;
    }

    frontier
}
