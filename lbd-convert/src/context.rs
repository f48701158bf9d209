//! Per-conversion state
//!
//! Everything a conversion mutates lives in one [`ConversionContext`],
//! created at the start of a `convert*` call and consumed at its end.

use std::collections::HashSet;

use lbd_graph_ir::{Graph, Term};
use lbd_vocab::{beo, bot, geo, opm, product, props, prov, rdf, rdfs, schema, xsd};

use crate::attributes::AttributePropagator;
use crate::identity::{IdentifierSource, UriFormatter};
use crate::options::{ConverterOptions, PropsLevel};
use crate::pset::{PropertySetRegistry, PropertyWriter};
use crate::report::{ConversionStats, Diagnostic, DiagnosticKind};
use crate::source::{GuidLookup, SourceModel};
use crate::status::StatusChannel;
use crate::type_mapper::{Resolution, TypeMapper};

/// The three output graphs
#[derive(Clone, Debug, Default)]
pub struct OutputGraphs {
    /// BOT sites, buildings, storeys, spaces and element links
    pub topology: Graph,
    /// Element classes
    pub product: Graph,
    /// Property sets and attributes
    pub property: Graph,
}

impl OutputGraphs {
    /// Empty graphs with the prefixes each one uses
    pub fn with_prefixes(options: &ConverterOptions, uri_base: &str) -> Self {
        let mut graphs = Self::default();
        for graph in [&mut graphs.topology, &mut graphs.product, &mut graphs.property] {
            graph.add_prefix("rdf", rdf::NS);
            graph.add_prefix("rdfs", rdfs::NS);
            graph.add_prefix("xsd", xsd::NS);
            graph.add_prefix("inst", uri_base);
            graph.add_prefix("geo", geo::NS);
        }

        graphs.topology.add_prefix("bot", bot::NS);
        if options.building_elements {
            graphs.product.add_prefix("product", product::NS);
            graphs.product.add_prefix("beo", beo::NS);
        }
        if options.building_properties {
            graphs.topology.add_prefix("props", props::NS);
            graphs.property.add_prefix("props", props::NS);
            if options.props_level != PropsLevel::L1 {
                graphs.property.add_prefix("prov", prov::NS);
                graphs.property.add_prefix("opm", opm::NS);
                graphs.property.add_prefix("schema", schema::NS);
            }
        }
        graphs
    }

    /// Topology graph plus the product and property graphs the options ask for
    pub fn merged(&self, options: &ConverterOptions) -> Graph {
        let mut graph = self.topology.clone();
        if options.building_elements {
            graph.merge(&self.product);
        }
        if options.building_properties {
            graph.merge(&self.property);
        }
        graph.dedupe();
        graph
    }
}

pub struct ConversionContext<'c> {
    pub source: SourceModel<'c>,
    pub options: &'c ConverterOptions,
    pub types: &'c TypeMapper,
    pub uris: UriFormatter,
    pub psets: PropertySetRegistry,
    pub writer: PropertyWriter,
    pub attributes: AttributePropagator,
    pub identifiers: &'c dyn IdentifierSource,
    pub status: &'c StatusChannel,
    pub graphs: OutputGraphs,
    pub stats: ConversionStats,
    diagnostics: Vec<Diagnostic>,
    reported_classes: HashSet<String>,
    reported_guids: HashSet<Term>,
}

impl<'c> ConversionContext<'c> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: SourceModel<'c>,
        options: &'c ConverterOptions,
        types: &'c TypeMapper,
        uris: UriFormatter,
        writer: PropertyWriter,
        graphs: OutputGraphs,
        identifiers: &'c dyn IdentifierSource,
        status: &'c StatusChannel,
    ) -> Self {
        Self {
            source,
            options,
            types,
            uris,
            psets: PropertySetRegistry::default(),
            writer,
            attributes: AttributePropagator::new(),
            identifiers,
            status,
            graphs,
            stats: ConversionStats::default(),
            diagnostics: Vec::new(),
            reported_classes: HashSet::new(),
            reported_guids: HashSet::new(),
        }
    }

    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (OutputGraphs, ConversionStats, Vec<Diagnostic>) {
        (self.graphs, self.stats, self.diagnostics)
    }

    /// Decoded GUID of `entity`; an undecodable one is reported once
    pub fn decoded_guid(&mut self, entity: &Term) -> Option<String> {
        match self.source.guid(entity) {
            GuidLookup::Decoded(guid) => Some(guid),
            GuidLookup::Absent => None,
            GuidLookup::Invalid(compact) => {
                if self.reported_guids.insert(entity.clone()) {
                    self.diagnose(
                        Diagnostic::new(
                            DiagnosticKind::MissingIdentifier,
                            format!("GUID {compact:?} does not decode"),
                        )
                        .with_subject(describe(entity)),
                    );
                }
                None
            }
        }
    }

    /// Output resource for `entity` and the GUID used for its property nodes
    pub fn resource(&mut self, entity: &Term, type_name: &str) -> (Term, Option<String>) {
        let guid = self.decoded_guid(entity);
        let uri = self.uris.format(entity, type_name, guid.as_deref());
        (uri, guid)
    }

    /// Target class of `entity`'s declared type; unmapped and ambiguous
    /// classes are reported
    pub fn resolve_type(&mut self, entity: &Term) -> Option<String> {
        let class = self.source.type_local_name(entity);
        let types = self.types;
        match types.lookup(class) {
            Resolution::Mapped(target) => Some(target.to_string()),
            Resolution::Ambiguous(targets) => {
                if self.reported_classes.insert(class.to_string()) {
                    tracing::debug!(class, targets = ?targets, "ambiguous mapping");
                    self.diagnose(
                        Diagnostic::new(
                            DiagnosticKind::AmbiguousMapping,
                            format!("mapped to {} distinct classes: {}", targets.len(), targets.join(", ")),
                        )
                        .with_subject(class),
                    );
                }
                None
            }
            Resolution::Unmapped => {
                self.diagnose(
                    Diagnostic::new(
                        DiagnosticKind::UnmappedType,
                        format!("no target class for {}", if class.is_empty() { "untyped entity" } else { class }),
                    )
                    .with_subject(describe(entity)),
                );
                None
            }
        }
    }

    /// Copy the attributes of `entity` to `target` once per conversion
    pub fn copy_attributes(&mut self, entity: &Term, target: &Term, guid: Option<&str>) {
        if !self.options.building_properties {
            return;
        }
        let identifiers = self.identifiers;
        self.attributes.copy_attributes(
            &self.source,
            entity,
            target,
            || guid.map(str::to_string).unwrap_or_else(|| identifiers.fresh_id()),
            &mut self.writer,
            &mut self.graphs.property,
        );
    }

    /// Connect every property set of `entity` to `target`
    pub fn connect_property_sets(&mut self, entity: &Term, target: &Term, guid: Option<&str>) {
        if !self.options.building_properties {
            return;
        }
        for pset in self.source.property_sets(entity) {
            let Some(set) = self.psets.get_mut(&pset) else {
                continue;
            };
            let guid = guid
                .map(str::to_string)
                .unwrap_or_else(|| self.identifiers.fresh_id());
            set.connect(&mut self.writer, &mut self.graphs.property, target, &guid);
        }
    }
}

/// Text form of a source term for diagnostics
pub(crate) fn describe(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.to_string(),
        Term::BlankNode(id) => format!("_:{}", id.as_str()),
        other => other.lexical().unwrap_or_default(),
    }
}
