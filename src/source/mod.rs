//! Document sources.
//!
//! A source is an ordered, finite sequence of documents that can each be
//! fetched independently. Fetching is the only operation in a review that may
//! take unbounded time, so it is async; each item may fail on its own.

pub mod manifest;
pub mod wikipedia;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::document::Document;
use crate::errors::FetchError;

pub use manifest::{Manifest, ManifestEntry};
pub use wikipedia::WikipediaSource;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Number of documents in the sequence.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn fetch(&self, index: usize) -> Result<Document, FetchError>;
}

/// Documents held in memory. Indices listed in `failing` return a fetch error.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<Document>,
    failing: HashSet<usize>,
}

impl StaticSource {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            failing: HashSet::new(),
        }
    }

    pub fn with_failure(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn len(&self) -> usize {
        self.documents.len()
    }

    async fn fetch(&self, index: usize) -> Result<Document, FetchError> {
        let document = self
            .documents
            .get(index)
            .ok_or_else(|| FetchError::new(index, "index past end of source"))?;
        if self.failing.contains(&index) {
            return Err(FetchError::new(index, "source unavailable").with_name(&document.name));
        }
        Ok(document.clone())
    }
}
