//! Error types for the conversion engine

use std::path::PathBuf;

use lbd_graph_turtle::TurtleError;

/// Conditions that stop a conversion before any output is produced.
///
/// Everything that only affects part of the output is a
/// [`Diagnostic`](crate::report::Diagnostic) instead.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input is not well-formed Turtle
    #[error("malformed input: {0}")]
    Parse(#[from] TurtleError),

    /// The input parsed, but declares no known ifcOWL namespace
    #[error("unsupported schema: no ifcOWL namespace among [{}]", .namespaces.join(", "))]
    UnsupportedSchema { namespaces: Vec<String> },

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
