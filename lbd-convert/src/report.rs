//! Structured conversion results
//!
//! Every conversion returns a [`ConversionReport`] next to its graphs. Problems
//! limited to single entities are [`Diagnostic`]s; a conversion that could not
//! start carries its [`ConvertError`] and an empty graph.

use serde::Serialize;

use crate::error::ConvertError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A source class is cross-referenced by several distinct target classes
    AmbiguousMapping,
    /// An element's class has no target class
    UnmappedType,
    /// A building, storey or space slot holds an entity of another type
    MalformedHierarchy,
    /// An entity has no decodable GUID
    MissingIdentifier,
    GeolocationUnavailable,
    /// An element contains itself through hosting or aggregation
    CycleDetected,
    /// An auxiliary ontology file could not be read or parsed
    OntologyLoad,
    /// The input declares no `inst` prefix
    MissingInstNamespace,
    /// The input already uses the BOT vocabulary
    AlreadyLbd,
}

impl DiagnosticKind {
    /// Whether this kind means some entity or enrichment is missing from the
    /// output
    pub fn degrades_output(self) -> bool {
        matches!(
            self,
            DiagnosticKind::AmbiguousMapping
                | DiagnosticKind::UnmappedType
                | DiagnosticKind::MalformedHierarchy
                | DiagnosticKind::GeolocationUnavailable
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source entity, class or file the diagnostic is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: None,
            message: message.into(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{:?}: {} ({subject})", self.kind, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    /// Output produced, but some entity or enrichment was left out
    Partial,
    /// Nothing converted
    Failed,
}

/// Counts of what was emitted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub sites: usize,
    pub buildings: usize,
    pub storeys: usize,
    pub spaces: usize,
    pub elements: usize,
    pub property_sets: usize,
    pub triples: usize,
}

#[derive(Debug, Serialize)]
pub struct ConversionReport {
    pub outcome: Outcome,
    /// Detected schema edition, e.g. `IFC4_ADD1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub stats: ConversionStats,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    failure: Option<ConvertError>,
}

impl ConversionReport {
    /// Report for a conversion that produced output; the outcome follows from
    /// the diagnostics
    pub fn completed(schema: String, stats: ConversionStats, diagnostics: Vec<Diagnostic>) -> Self {
        let outcome = if diagnostics.iter().any(|d| d.kind.degrades_output()) {
            Outcome::Partial
        } else {
            Outcome::Success
        };
        Self {
            outcome,
            schema: Some(schema),
            stats,
            diagnostics,
            error: None,
            failure: None,
        }
    }

    pub fn failed(error: ConvertError, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            outcome: Outcome::Failed,
            schema: None,
            stats: ConversionStats::default(),
            diagnostics,
            error: Some(error.to_string()),
            failure: Some(error),
        }
    }

    pub fn failure(&self) -> Option<&ConvertError> {
        self.failure.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics_of(kind).next().is_some()
    }
}
