//! Property sets and the PROPS property graph
//!
//! Property set contents are collected once per source property set into a
//! [`PropertySetRegistry`]. When the walker reaches an entity that references
//! a property set, the set is connected to the entity's output resource.
//! Attribute values use the same [`PropertyBag`] with the `attribute` marker.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use lbd_graph_ir::path::path_query;
use lbd_graph_ir::{Datatype, Graph, Term};
use lbd_vocab::{ifc, opm, props, prov, psd, rdf, rdfs, schema};

use crate::identity::UriFormatter;
use crate::options::PropsLevel;
use crate::source::SourceModel;

/// Lexical form some exporters write for an undefined double
const LEGACY_NAN: &str = "-1.#IND";

/// Add a triple unless it is already present
pub(crate) fn insert(graph: &mut Graph, s: Term, p: Term, o: Term) {
    let triple = lbd_graph_ir::Triple::new(s, p, o);
    if !graph.contains(&triple) {
        graph.add(triple);
    }
}

/// `"Fire Rating"`, `"FireRating"` → `fireRating`
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if !c.is_alphanumeric() {
            upper_next = true;
            continue;
        }
        if out.is_empty() {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// A literal value
    Scalar(Term),
    /// A property without a nominal value; the property node itself, whose
    /// statements are copied to the property graph
    Structured(Term),
}

impl PropertyValue {
    pub fn term(&self) -> &Term {
        match self {
            PropertyValue::Scalar(t) | PropertyValue::Structured(t) => t,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEntry {
    /// Name as found in the source
    pub name: String,
    pub value: PropertyValue,
    /// Source property node
    pub source: Option<Term>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BagKind {
    Property,
    Attribute,
}

impl BagKind {
    fn marker(self) -> &'static str {
        match self {
            BagKind::Property => "property",
            BagKind::Attribute => "attribute",
        }
    }
}

/// Named values that can be connected to an output resource
#[derive(Clone, Debug)]
pub struct PropertyBag {
    kind: BagKind,
    entries: Vec<PropertyEntry>,
}

impl PropertyBag {
    pub fn new(kind: BagKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> BagKind {
        self.kind
    }

    /// Record a value; a later value under the same name replaces the earlier
    pub fn put(&mut self, name: impl Into<String>, value: PropertyValue, source: Option<Term>) {
        let name = name.into();
        let entry = PropertyEntry { name, value, source };
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry against `target`
    pub fn connect(&self, writer: &mut PropertyWriter, graph: &mut Graph, target: &Term, guid: &str) {
        for entry in &self.entries {
            writer.write_value(graph, target, guid, self.kind, &entry.name, entry.value.term());
        }
    }
}

/// Writes property values at the configured PROPS level
#[derive(Debug)]
pub struct PropertyWriter {
    level: PropsLevel,
    blank_nodes: bool,
    uris: UriFormatter,
    timestamp: DateTime<Utc>,
    next_blank: usize,
}

impl PropertyWriter {
    pub fn new(level: PropsLevel, blank_nodes: bool, uris: UriFormatter, timestamp: DateTime<Utc>) -> Self {
        Self {
            level,
            blank_nodes,
            uris,
            timestamp,
            next_blank: 0,
        }
    }

    /// `props:<camel>_<marker>` (`_simple` appended at level 1)
    pub fn predicate(&self, kind: BagKind, name: &str) -> Option<Term> {
        let camel = to_camel_case(name);
        if camel.is_empty() {
            return None;
        }
        let suffix = if self.level == PropsLevel::L1 { "_simple" } else { "" };
        Some(Term::iri(format!("{}{camel}_{}{suffix}", props::NS, kind.marker())))
    }

    fn node(&mut self, local: String) -> Term {
        if self.blank_nodes {
            self.next_blank += 1;
            Term::blank(format!("p{}", self.next_blank))
        } else {
            self.uris.mint(&local)
        }
    }

    pub fn write_value(
        &mut self,
        graph: &mut Graph,
        target: &Term,
        guid: &str,
        kind: BagKind,
        name: &str,
        value: &Term,
    ) {
        let Some(predicate) = self.predicate(kind, name) else {
            tracing::debug!(name, "property name has no usable characters");
            return;
        };
        if self.level == PropsLevel::L1 {
            insert(graph, target.clone(), predicate, value.clone());
            return;
        }

        let camel = to_camel_case(name);
        let marker = kind.marker();
        let property_node = self.node(format!("{camel}_{marker}_{guid}"));
        insert(graph, target.clone(), predicate, property_node.clone());

        if self.level == PropsLevel::L2 {
            insert(graph, property_node, Term::iri(schema::VALUE), value.clone());
            return;
        }

        let millis = self.timestamp.timestamp_millis();
        let state = self.node(format!("state_{camel}_{marker}_{guid}_{millis}"));
        insert(
            graph,
            property_node,
            Term::iri(opm::HAS_PROPERTY_STATE),
            state.clone(),
        );
        insert(
            graph,
            state.clone(),
            Term::iri(rdf::TYPE),
            Term::iri(opm::CURRENT_PROPERTY_STATE),
        );
        insert(graph, state.clone(), Term::iri(schema::VALUE), value.clone());
        insert(
            graph,
            state,
            Term::iri(prov::GENERATED_AT_TIME),
            Term::typed(
                self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                Datatype::xsd_date_time(),
            ),
        );
    }
}

/// Property definitions declared by the property set definition ontology,
/// keyed by (property set name, property name)
#[derive(Debug, Default)]
pub struct PropertyDefinitions {
    defs: HashMap<(String, String), Term>,
}

impl PropertyDefinitions {
    /// Index `?set a psd:PropertySetDef ; psd:name "…" ; psd:propertyDef ?def .
    /// ?def psd:name "…"`
    pub fn from_ontology(ontology: &Graph) -> Self {
        let mut defs = HashMap::new();
        for set in ontology.instances_of(psd::PROPERTY_SET_DEF) {
            let Some(set_name) = ontology.object(set, psd::NAME).and_then(Term::lexical) else {
                continue;
            };
            for def in ontology.objects(set, psd::PROPERTY_DEF) {
                if let Some(prop_name) = ontology.object(def, psd::NAME).and_then(Term::lexical) {
                    defs.insert((set_name.clone(), prop_name), def.clone());
                }
            }
        }
        Self { defs }
    }

    pub fn get(&self, set_name: &str, property_name: &str) -> Option<&Term> {
        self.defs
            .get(&(set_name.to_string(), property_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// The collected contents of one source property set
#[derive(Debug)]
pub struct PropertySet {
    pub name: Option<String>,
    pub bag: PropertyBag,
    /// Matching `psd:PropertyDef` per property name
    definitions: HashMap<String, Term>,
    definitions_written: bool,
    connections: usize,
}

impl PropertySet {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            bag: PropertyBag::new(BagKind::Property),
            definitions: HashMap::new(),
            definitions_written: false,
            connections: 0,
        }
    }

    pub fn connections(&self) -> usize {
        self.connections
    }

    /// Connect the set to `target`.
    ///
    /// Each call writes a connection for `target`; the definition subgraph
    /// (label and definition link per property predicate) is written on the
    /// first call only.
    pub fn connect(&mut self, writer: &mut PropertyWriter, graph: &mut Graph, target: &Term, guid: &str) {
        if !self.definitions_written {
            self.write_definitions(writer, graph);
            self.definitions_written = true;
        }
        self.bag.connect(writer, graph, target, guid);
        self.connections += 1;
    }

    fn write_definitions(&self, writer: &PropertyWriter, graph: &mut Graph) {
        for entry in self.bag.iter() {
            let Some(predicate) = writer.predicate(BagKind::Property, &entry.name) else {
                continue;
            };
            insert(
                graph,
                predicate.clone(),
                Term::iri(rdfs::LABEL),
                Term::string(&entry.name),
            );
            if let Some(def) = self.definitions.get(&entry.name) {
                insert(graph, predicate, Term::iri(rdfs::SEE_ALSO), def.clone());
            }
        }
    }
}

/// All property sets of a source graph, keyed by the property set node
#[derive(Debug, Default)]
pub struct PropertySetRegistry {
    sets: HashMap<Term, PropertySet>,
}

impl PropertySetRegistry {
    /// Collect every `IfcPropertySet` of the source.
    ///
    /// Properties without a nominal value are recorded as structured values
    /// and their statements are copied to `property_graph`.
    pub fn collect(
        source: &SourceModel<'_>,
        definitions: &PropertyDefinitions,
        property_graph: &mut Graph,
    ) -> Self {
        let graph = source.graph();
        let vocab = source.vocab();
        let members = vocab.property_members_path();
        let name_path = vocab.property_name_path();
        let value_paths = vocab.nominal_value_paths();

        let mut sets: HashMap<Term, PropertySet> = HashMap::new();
        for pset in source.instances(ifc::PROPERTY_SET) {
            let set_name = source.root_name(&pset);

            for property in path_query(graph, &pset, &members) {
                let Some(name) = path_query(graph, &property, &name_path)
                    .first()
                    .and_then(Term::lexical)
                else {
                    continue;
                };

                let value = value_paths
                    .iter()
                    .find_map(|path| path_query(graph, &property, path).into_iter().next());

                let set = sets.entry(pset.clone()).or_insert_with(|| {
                    let mut set = PropertySet::new(set_name.clone());
                    if let Some(set_name) = &set_name {
                        set.definitions = definitions_for(definitions, set_name);
                    }
                    set
                });

                match value {
                    Some(value) => {
                        let lexical = value.lexical().unwrap_or_default();
                        if lexical == name || lexical.trim().is_empty() {
                            continue;
                        }
                        let value = if lexical == LEGACY_NAN {
                            Term::double(f64::NAN)
                        } else {
                            value
                        };
                        set.bag.put(name, PropertyValue::Scalar(value), Some(property.clone()));
                    }
                    None => {
                        for triple in graph.triples_for_subject(&property) {
                            insert(property_graph, triple.s.clone(), triple.p.clone(), triple.o.clone());
                        }
                        set.bag.put(
                            name,
                            PropertyValue::Structured(property.clone()),
                            Some(property.clone()),
                        );
                    }
                }
            }
        }

        tracing::debug!(property_sets = sets.len(), "property sets collected");
        Self { sets }
    }

    pub fn get(&self, pset: &Term) -> Option<&PropertySet> {
        self.sets.get(pset)
    }

    pub fn get_mut(&mut self, pset: &Term) -> Option<&mut PropertySet> {
        self.sets.get_mut(pset)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Number of property sets connected at least once
    pub fn connected(&self) -> usize {
        self.sets.values().filter(|s| s.connections > 0).count()
    }
}

fn definitions_for(definitions: &PropertyDefinitions, set_name: &str) -> HashMap<String, Term> {
    definitions
        .defs
        .iter()
        .filter(|((set, _), _)| set == set_name)
        .map(|((_, prop), def)| (prop.clone(), def.clone()))
        .collect()
}
