//! Error types for the symbol-graph pipeline.
//!
//! Only failures that must abort a run are represented here. Dangling
//! relationship endpoints, missing documentation and an absent umbrella
//! header are not errors: the pipeline skips them and keeps going.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymdocError {
    #[error("Malformed symbol graph {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid discovery pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl SymdocError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Actionable hint for the CLI, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MalformedInput { .. } => {
                Some("Re-run the symbol-graph extraction; the file may be truncated")
            }
            Self::MissingInput(_) => {
                Some("Pass --primary/--graph-dir and --secondary, or set them in .symdoc/settings.toml")
            }
            Self::Config(_) => Some("Run 'symdoc init --force' to regenerate the settings file"),
            _ => None,
        }
    }
}

pub type SymdocResult<T> = Result<T, SymdocError>;
