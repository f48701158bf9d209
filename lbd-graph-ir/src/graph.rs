//! RDF graph - a collection of triples with lookup indices
//!
//! The `Graph` type uses `Vec<Triple>` to preserve duplicates (bag semantics).
//! Call `dedupe()` explicitly if you want set semantics.

use crate::{Term, Triple};
use lbd_vocab::rdf;
use std::collections::{BTreeMap, HashMap};

/// A collection of RDF triples
///
/// Triples are stored in insertion order. Two positional indices (subject and
/// object) map a term to the positions of the triples it appears in, so that
/// lookups by subject, subject+predicate, and predicate+object do not scan
/// the whole graph. The indices are rebuilt whenever the triple order
/// changes (`sort`, `dedupe`).
///
/// # Example
///
/// ```
/// use lbd_graph_ir::{Graph, Term};
///
/// let mut graph = Graph::new();
/// let wall = Term::iri("http://example.org/wall_1");
/// graph.add_triple(
///     wall.clone(),
///     Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
///     Term::iri("http://example.org/IfcWall"),
/// );
///
/// assert_eq!(graph.instances_of("http://example.org/IfcWall"), vec![&wall]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_object: HashMap<Term, Vec<usize>>,
    /// Base IRI from parsing
    pub base: Option<String>,
    /// Prefix mappings (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_base(&mut self, base: impl Into<String>) {
        self.base = Some(base.into());
    }

    /// Add a prefix mapping, replacing any previous namespace for `prefix`
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Namespace bound to `prefix`, if any
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn add(&mut self, triple: Triple) {
        let pos = self.triples.len();
        self.by_subject.entry(triple.s.clone()).or_default().push(pos);
        self.by_object.entry(triple.o.clone()).or_default().push(pos);
        self.triples.push(triple);
    }

    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Add every triple and prefix of `other` to this graph
    ///
    /// Prefixes already bound here are kept.
    pub fn merge(&mut self, other: &Graph) {
        for (prefix, ns) in &other.prefixes {
            self.prefixes
                .entry(prefix.clone())
                .or_insert_with(|| ns.clone());
        }
        for triple in &other.triples {
            self.add(triple.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Sort triples by SPO for deterministic output
    pub fn sort(&mut self) {
        self.triples.sort();
        self.reindex();
    }

    /// Remove duplicate triples (apply set semantics). Sorts as a side effect.
    pub fn dedupe(&mut self) {
        self.triples.sort();
        self.triples.dedup();
        self.reindex();
    }

    /// Sort and dedupe; the standard preparation before writing
    pub fn canonicalize(&mut self) {
        self.dedupe();
    }

    pub fn is_sorted(&self) -> bool {
        self.triples.windows(2).all(|w| w[0] <= w[1])
    }

    fn reindex(&mut self) {
        self.by_subject.clear();
        self.by_object.clear();
        for (pos, triple) in self.triples.iter().enumerate() {
            self.by_subject.entry(triple.s.clone()).or_default().push(pos);
            self.by_object.entry(triple.o.clone()).or_default().push(pos);
        }
    }

    /// All triples with subject `s`, in insertion order
    pub fn triples_for_subject<'a>(&'a self, s: &Term) -> impl Iterator<Item = &'a Triple> + 'a {
        self.by_subject
            .get(s)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.triples[pos])
    }

    /// All triples with object `o`, in insertion order
    pub fn triples_for_object<'a>(&'a self, o: &Term) -> impl Iterator<Item = &'a Triple> + 'a {
        self.by_object
            .get(o)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.triples[pos])
    }

    /// Objects of `(s, p, ?)`
    pub fn objects(&self, s: &Term, p: &str) -> Vec<&Term> {
        self.triples_for_subject(s)
            .filter(|t| t.p.as_iri() == Some(p))
            .map(|t| &t.o)
            .collect()
    }

    /// First object of `(s, p, ?)`
    pub fn object(&self, s: &Term, p: &str) -> Option<&Term> {
        self.triples_for_subject(s)
            .find(|t| t.p.as_iri() == Some(p))
            .map(|t| &t.o)
    }

    /// Subjects of `(?, p, o)`
    pub fn subjects_with(&self, p: &str, o: &Term) -> Vec<&Term> {
        self.triples_for_object(o)
            .filter(|t| t.p.as_iri() == Some(p))
            .map(|t| &t.s)
            .collect()
    }

    /// Subjects declared `rdf:type <class_iri>`
    pub fn instances_of(&self, class_iri: &str) -> Vec<&Term> {
        self.subjects_with(rdf::TYPE, &Term::iri(class_iri))
    }

    /// First declared `rdf:type` of `s`
    pub fn type_of(&self, s: &Term) -> Option<&Term> {
        self.object(s, rdf::TYPE)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples_for_subject(&triple.s).any(|t| t == triple)
    }

    /// Group triples by subject
    ///
    /// The graph should be sorted first for consistent grouping.
    pub fn group_by_subject(&self) -> SubjectGroups<'_> {
        SubjectGroups {
            triples: &self.triples,
            index: 0,
        }
    }

    /// All unique subjects in the graph, sorted
    pub fn subjects(&self) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = self.by_subject.keys().collect();
        subjects.sort();
        subjects
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        for triple in iter {
            self.add(triple);
        }
    }
}

/// Iterator over triples grouped by subject
///
/// Assumes the graph is sorted.
pub struct SubjectGroups<'a> {
    triples: &'a [Triple],
    index: usize,
}

impl<'a> Iterator for SubjectGroups<'a> {
    type Item = (&'a Term, &'a [Triple]);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.index;
        let subject = &self.triples.get(start)?.s;
        while self.index < self.triples.len() && self.triples[self.index].s == *subject {
            self.index += 1;
        }
        Some((subject, &self.triples[start..self.index]))
    }
}
