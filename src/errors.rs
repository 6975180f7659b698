use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the archive library.
///
/// `NotFound` and `Validation` are kept distinct from I/O failures so callers
/// can map them to "missing resource" and "bad request" style responses.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed export: {0}")]
    MalformedExport(#[source] serde_json::Error),

    #[error("Corrupt store file {}: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to persist conversation {id}")]
    Persist {
        id: String,
        #[source]
        source: Box<ArchiveError>,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ArchiveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
