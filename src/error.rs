// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The document is missing one of its required top-level collections.
    #[error("Invalid project graph data format: missing `{missing}`")]
    MalformedInput { missing: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// The advisor was asked about a cycle with no members.
    #[error("Cannot suggest a link to break for an empty cycle")]
    EmptyCycle,

    #[error("Unknown project: {0}")]
    UnknownProject(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

// Allow `?` on std::io::Error by converting to GraphError::Io with unknown path.
impl From<std::io::Error> for GraphError {
    fn from(source: std::io::Error) -> Self {
        GraphError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl GraphError {
    /// True for errors caused by the input document rather than the environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MalformedInput { .. } | Self::Json(_))
    }
}
