//! Auxiliary ontology loading
//!
//! The mapping from ifcOWL classes to LBD classes lives in the LBD product
//! ontologies (`rdfs:seeAlso` cross references); property definitions come
//! from the property set definition files. All of them are plain Turtle files
//! read from one directory.

use std::fs;
use std::path::{Path, PathBuf};

use lbd_graph_ir::Graph;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::report::{Diagnostic, DiagnosticKind};
use crate::schema::IfcSchema;

/// Files read from the ontology directory, in load order
pub const DEFAULT_ONTOLOGY_FILES: &[&str] = &[
    "prod.ttl",
    "beo_ontology.ttl",
    "prod_furnishing.ttl",
    "mep_ontology.ttl",
    "psetdef.ttl",
];

/// Where the auxiliary ontologies come from
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OntologySources {
    /// Ontology directory; `None` loads nothing from disk
    pub dir: Option<PathBuf>,
    pub files: Vec<String>,
    /// Subdirectory whose `*.ttl` files are all loaded
    pub pset_dir: Option<String>,
    /// Also load `<EDITION>.ttl` when it exists
    pub schema_ontology: bool,
}

impl Default for OntologySources {
    fn default() -> Self {
        Self {
            dir: None,
            files: DEFAULT_ONTOLOGY_FILES.iter().map(|f| f.to_string()).collect(),
            pset_dir: Some("pset".to_string()),
            schema_ontology: true,
        }
    }
}

/// Result of loading the auxiliary ontologies
#[derive(Debug, Default)]
pub struct LoadedOntologies {
    /// Cross references, product classes and property definitions
    pub ontology: Graph,
    /// The edition's ifcOWL ontology, when available
    pub schema: Option<Graph>,
    pub files_loaded: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl OntologySources {
    /// No files at all
    pub fn none() -> Self {
        Self {
            dir: None,
            files: Vec::new(),
            pset_dir: None,
            schema_ontology: false,
        }
    }

    /// The default file set below `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn load(&self, schema: IfcSchema) -> LoadedOntologies {
        let mut loaded = LoadedOntologies::default();
        let Some(dir) = &self.dir else {
            return loaded;
        };

        let mut paths: Vec<PathBuf> = self.files.iter().map(|f| dir.join(f)).collect();
        if let Some(pset_dir) = &self.pset_dir {
            match list_turtle_files(&dir.join(pset_dir)) {
                Ok(files) => paths.extend(files),
                Err(e) => loaded.diagnostics.push(
                    Diagnostic::new(DiagnosticKind::OntologyLoad, e.to_string())
                        .with_subject(dir.join(pset_dir).display().to_string()),
                ),
            }
        }

        for (index, path) in paths.iter().enumerate() {
            match load_turtle_file_scoped(path, &format!("o{index}_")) {
                Ok(graph) => {
                    tracing::debug!(path = %path.display(), triples = graph.len(), "loaded ontology");
                    loaded.ontology.merge(&graph);
                    loaded.files_loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping ontology");
                    loaded.diagnostics.push(
                        Diagnostic::new(DiagnosticKind::OntologyLoad, e.to_string())
                            .with_subject(path.display().to_string()),
                    );
                }
            }
        }

        if self.schema_ontology {
            let path = dir.join(format!("{}.ttl", schema.name()));
            if path.is_file() {
                match load_turtle_file_scoped(&path, "schema_") {
                    Ok(graph) => {
                        loaded.ontology.merge(&graph);
                        loaded.files_loaded += 1;
                        loaded.schema = Some(graph);
                    }
                    Err(e) => loaded.diagnostics.push(
                        Diagnostic::new(DiagnosticKind::OntologyLoad, e.to_string())
                            .with_subject(path.display().to_string()),
                    ),
                }
            }
        }

        tracing::info!(files = loaded.files_loaded, triples = loaded.ontology.len(), "ontologies loaded");
        loaded
    }
}

/// Read and parse a Turtle file
pub fn load_turtle_file(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    Ok(lbd_graph_turtle::parse_graph(&text)?)
}

fn load_turtle_file_scoped(path: &Path, blank_scope: &str) -> Result<Graph> {
    let text = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    Ok(lbd_graph_turtle::parse_into(Graph::new(), &text, blank_scope)?)
}

/// `*.ttl` files directly inside `dir`, sorted by name
fn list_turtle_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ConvertError::io(dir, e))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ttl"))
        .collect();
    files.sort();
    Ok(files)
}
