//! Typed error hierarchy for sift.
//!
//! Three enums cover the collaborators and the review loop:
//! - `FetchError`: a document could not be obtained from the source
//! - `PersistError`: a record could not be read from or written to the log
//! - `ReviewError`: what the review session surfaces to the operator
//!
//! None of these are fatal to the process. The session stores the most recent
//! one and renders its message.

use std::path::PathBuf;
use thiserror::Error;

/// A document fetch failed. The cause is opaque to the review loop.
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch document {index}{}: {message}", name.as_ref().map(|n| format!(" ({n})")).unwrap_or_default())]
pub struct FetchError {
    pub index: usize,
    pub name: Option<String>,
    pub message: String,
}

impl FetchError {
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            name: None,
            message: message.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Errors from the record log.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Record log I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize record {index}: {source}")]
    Serialize {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record log {path} is corrupt at line {line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record {index} is out of order: log already holds index {last}")]
    OutOfOrder { index: usize, last: usize },

    #[error("Another review session holds the lock at {path}")]
    Locked { path: PathBuf },
}

/// Conditions surfaced by the review session.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No excerpt selected for this document yet")]
    EmptySelection,

    #[error("Could not save excerpt (press Enter to retry): {0}")]
    Persist(#[from] PersistError),

    #[error("No more documents to review")]
    EndOfSequence,
}
