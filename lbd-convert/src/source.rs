//! Read access to the ifcOWL source graph

use lbd_graph_ir::path::{path_query, Step};
use lbd_graph_ir::{Graph, Term};
use lbd_vocab::{ifc, local_name};

use crate::guid;
use crate::schema::IfcVocabulary;

/// Outcome of reading an entity's GUID
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuidLookup {
    Decoded(String),
    /// A GUID literal is present but does not decode
    Invalid(String),
    Absent,
}

/// Precomputed relationship paths of one vocabulary
#[derive(Debug)]
struct Paths {
    aggregated: Vec<Step>,
    contained: Vec<Step>,
    adjacent: Vec<Step>,
    hosted: Vec<Step>,
    property_sets: Vec<Step>,
    guid: Vec<Step>,
    root_name: Vec<Step>,
}

/// The source graph together with its detected vocabulary
#[derive(Debug)]
pub struct SourceModel<'g> {
    graph: &'g Graph,
    vocab: IfcVocabulary,
    paths: Paths,
}

impl<'g> SourceModel<'g> {
    pub fn new(graph: &'g Graph, vocab: IfcVocabulary) -> Self {
        let paths = Paths {
            aggregated: vocab.aggregated_path(),
            contained: vocab.contained_path(),
            adjacent: vocab.adjacent_path(),
            hosted: vocab.hosted_path(),
            property_sets: vocab.property_sets_path(),
            guid: vocab.guid_path(),
            root_name: vocab.root_name_path(),
        };
        Self { graph, vocab, paths }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn vocab(&self) -> &IfcVocabulary {
        &self.vocab
    }

    /// Instances of an ifcOWL class, by local name
    pub fn instances(&self, class_local: &str) -> Vec<Term> {
        self.graph
            .instances_of(&self.vocab.iri(class_local))
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn declared_type(&self, entity: &Term) -> Option<&'g Term> {
        self.graph.type_of(entity)
    }

    /// Local name of the declared type, empty when untyped
    pub fn type_local_name(&self, entity: &Term) -> &'g str {
        self.declared_type(entity)
            .and_then(Term::as_iri)
            .map(local_name)
            .unwrap_or("")
    }

    pub fn is_a(&self, entity: &Term, class_local: &str) -> bool {
        self.type_local_name(entity) == class_local
    }

    pub fn compact_guid(&self, entity: &Term) -> Option<String> {
        path_query(self.graph, entity, &self.paths.guid)
            .first()
            .and_then(Term::lexical)
    }

    pub fn guid(&self, entity: &Term) -> GuidLookup {
        match self.compact_guid(entity) {
            None => GuidLookup::Absent,
            Some(compact) => match guid::decompress(&compact) {
                Ok(decoded) => GuidLookup::Decoded(decoded),
                Err(e) => {
                    tracing::debug!(guid = %compact, error = %e, "undecodable GUID");
                    GuidLookup::Invalid(compact)
                }
            },
        }
    }

    /// `name_IfcRoot` of an entity
    pub fn root_name(&self, entity: &Term) -> Option<String> {
        path_query(self.graph, entity, &self.paths.root_name)
            .first()
            .and_then(Term::lexical)
    }

    /// Predefined type tag, without the `NOTDEFINED`/`USERDEFINED` placeholders
    pub fn predefined_type(&self, entity: &Term) -> Option<String> {
        self.graph
            .triples_for_subject(entity)
            .filter(|t| t.p.local_name().starts_with(ifc::PREDEFINED_TYPE_PREFIX))
            .map(|t| t.o.local_name())
            .find(|tag| !tag.is_empty())
            .filter(|tag| *tag != "NOTDEFINED" && *tag != "USERDEFINED")
            .map(str::to_string)
    }

    pub fn aggregated(&self, entity: &Term) -> Vec<Term> {
        path_query(self.graph, entity, &self.paths.aggregated)
    }

    pub fn contained(&self, structure: &Term) -> Vec<Term> {
        path_query(self.graph, structure, &self.paths.contained)
    }

    pub fn adjacent(&self, space: &Term) -> Vec<Term> {
        path_query(self.graph, space, &self.paths.adjacent)
    }

    pub fn hosted(&self, element: &Term) -> Vec<Term> {
        path_query(self.graph, element, &self.paths.hosted)
    }

    pub fn property_sets(&self, entity: &Term) -> Vec<Term> {
        path_query(self.graph, entity, &self.paths.property_sets)
    }
}
