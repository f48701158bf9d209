//! Conversion orchestration

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lbd_graph_format::{format_turtle, TurtleFormatConfig};
use lbd_graph_ir::Graph;

use crate::context::{ConversionContext, OutputGraphs};
use crate::error::ConvertError;
use crate::geo;
use crate::identity::{IdentifierSource, RandomIdentifiers, UriFormatter};
use crate::ontology::OntologySources;
use crate::options::ConverterOptions;
use crate::pset::{PropertyDefinitions, PropertySetRegistry, PropertyWriter};
use crate::report::{ConversionReport, Diagnostic, DiagnosticKind};
use crate::schema::IfcVocabulary;
use crate::source::SourceModel;
use crate::status::{StatusChannel, StatusEvent};
use crate::type_mapper::TypeMapper;

/// Output of one conversion
#[derive(Debug)]
pub struct Conversion {
    /// The output graphs merged according to the options
    pub graph: Graph,
    pub graphs: OutputGraphs,
    pub report: ConversionReport,
}

impl Conversion {
    fn failed(error: ConvertError, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            graph: Graph::new(),
            graphs: OutputGraphs::default(),
            report: ConversionReport::failed(error, diagnostics),
        }
    }

    /// The merged graph as Turtle
    pub fn to_turtle(&self) -> String {
        format_turtle(&self.graph, &TurtleFormatConfig::default())
    }
}

/// ifcOWL → LBD converter.
///
/// A converter holds configuration only; every call works on its own state,
/// so one converter can serve any number of inputs, also from several
/// threads.
///
/// ```no_run
/// use lbd_convert::{Converter, ConverterOptions, OntologySources};
///
/// let converter = Converter::new(ConverterOptions::default())
///     .with_ontologies(OntologySources::in_dir("ontologies"));
/// let conversion = converter.convert_file("model.ttl");
/// println!("{:?}: {} triples", conversion.report.outcome, conversion.graph.len());
/// ```
pub struct Converter {
    options: ConverterOptions,
    ontologies: OntologySources,
    extra_ontology: Option<Arc<Graph>>,
    identifiers: Arc<dyn IdentifierSource>,
    timestamp: Option<DateTime<Utc>>,
    status: StatusChannel,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("options", &self.options)
            .field("ontologies", &self.ontologies)
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Self {
        Self {
            options,
            ontologies: OntologySources::none(),
            extra_ontology: None,
            identifiers: Arc::new(RandomIdentifiers),
            timestamp: None,
            status: StatusChannel::new(),
        }
    }

    pub fn with_ontologies(mut self, sources: OntologySources) -> Self {
        self.ontologies = sources;
        self
    }

    /// An ontology graph merged after the files of [`OntologySources`]
    pub fn with_ontology(mut self, ontology: Graph) -> Self {
        self.extra_ontology = Some(Arc::new(ontology));
        self
    }

    pub fn with_identifier_source(mut self, source: impl IdentifierSource + 'static) -> Self {
        self.identifiers = Arc::new(source);
        self
    }

    /// Fixed `prov:generatedAtTime` for level 3 properties; the time of each
    /// conversion otherwise
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Receiver for the status events of every later conversion
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StatusEvent> {
        self.status.subscribe()
    }

    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    pub fn convert_file(&self, path: impl AsRef<Path>) -> Conversion {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => self.convert_str(&text),
            Err(e) => {
                let error = ConvertError::io(path, e);
                self.status.error(format!("Error : {error}"));
                Conversion::failed(error, Vec::new())
            }
        }
    }

    pub fn convert_str(&self, turtle: &str) -> Conversion {
        match lbd_graph_turtle::parse_graph(turtle) {
            Ok(graph) => self.convert_graph(graph),
            Err(e) => {
                let error = ConvertError::from(e);
                self.status.error(format!("Error : {error}"));
                Conversion::failed(error, Vec::new())
            }
        }
    }

    pub fn convert_graph(&self, mut source: Graph) -> Conversion {
        self.status.info("Reading in ontologies");
        let vocab = match IfcVocabulary::detect(&source) {
            Ok(vocab) => vocab,
            Err(error) => {
                self.status.error(format!("Error : {error}"));
                return Conversion::failed(error, Vec::new());
            }
        };
        tracing::info!(schema = %vocab.schema, namespace = %vocab.namespace, "schema detected");

        let mut diagnostics = input_warnings(&source);

        let loaded = self.ontologies.load(vocab.schema);
        diagnostics.extend(loaded.diagnostics);
        let mut ontology = loaded.ontology;
        if let Some(extra) = &self.extra_ontology {
            ontology.merge(extra);
        }
        if let Some(schema) = &loaded.schema {
            source.merge(schema);
        }

        let types = TypeMapper::build(&ontology, &vocab.namespace);
        let uri_base = self.options.resolve_uri_base(source.namespace("inst"));
        let uris = UriFormatter::new(&uri_base);
        let writer = PropertyWriter::new(
            self.options.props_level,
            self.options.blank_nodes,
            uris.clone(),
            self.timestamp.unwrap_or_else(Utc::now),
        );
        let graphs = OutputGraphs::with_prefixes(&self.options, &uri_base);
        let schema_name = vocab.schema.name().to_string();

        let mut ctx = ConversionContext::new(
            SourceModel::new(&source, vocab),
            &self.options,
            &types,
            uris,
            writer,
            graphs,
            self.identifiers.as_ref(),
            &self.status,
        );
        for diagnostic in diagnostics {
            ctx.diagnose(diagnostic);
        }

        self.status.info("IFC->LBD");
        if self.options.building_properties {
            let definitions = PropertyDefinitions::from_ontology(&ontology);
            ctx.psets = PropertySetRegistry::collect(&ctx.source, &definitions, &mut ctx.graphs.property);
            self.status.info("LBD properties read");
        }

        crate::walker::HierarchyWalker::new(&mut ctx).walk();

        if self.options.geolocation {
            match geo::enrich(&mut ctx) {
                Ok(()) => self.status.info("LBD geom read"),
                Err(e) => {
                    tracing::info!(reason = %e, "no geolocation");
                    self.status.info("Info : No geolocation");
                    ctx.diagnose(Diagnostic::new(DiagnosticKind::GeolocationUnavailable, e.to_string()));
                }
            }
        }

        ctx.stats.property_sets = ctx.psets.connected();
        let (graphs, mut stats, diagnostics) = ctx.into_parts();
        let graph = graphs.merged(&self.options);
        stats.triples = graph.len();

        self.status.info(format!(
            "Done. {} triples, {} elements",
            stats.triples, stats.elements
        ));
        Conversion {
            graph,
            graphs,
            report: ConversionReport::completed(schema_name, stats, diagnostics),
        }
    }
}

/// Warnings about the input's declared namespaces
fn input_warnings(source: &Graph) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if source.namespace("inst").is_none() {
        diagnostics.push(Diagnostic::new(
            DiagnosticKind::MissingInstNamespace,
            "input declares no inst prefix",
        ));
    }
    if let Some(bot) = source.namespace("bot") {
        diagnostics.push(
            Diagnostic::new(DiagnosticKind::AlreadyLbd, "input already uses the BOT vocabulary")
                .with_subject(bot),
        );
    }
    diagnostics
}
