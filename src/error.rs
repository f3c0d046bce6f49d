//! Error types for content loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while looking up or loading a document
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("No document for key `{0}`")]
    NotFound(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Failed to render {path:?}: {message}")]
    Render { path: PathBuf, message: String },
}

impl ContentError {
    /// Whether the error only means the document does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}
