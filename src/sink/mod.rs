//! Durable storage for reviewed excerpts.

pub mod jsonl;
pub mod lock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PersistError;

pub use jsonl::JsonlSink;
pub use lock::SessionLock;

/// One persisted result per reviewed document. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub index: usize,
    pub name: String,
    pub excerpt: String,
    pub reviewed_at: DateTime<Utc>,
}

impl Record {
    pub fn new(index: usize, name: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            excerpt: excerpt.into(),
            reviewed_at: Utc::now(),
        }
    }

    /// Same document and excerpt, ignoring when it was reviewed.
    pub fn same_entry(&self, other: &Record) -> bool {
        self.index == other.index && self.name == other.name && self.excerpt == other.excerpt
    }
}

pub trait RecordSink {
    /// Durably write one record.
    fn append(&mut self, record: &Record) -> Result<(), PersistError>;

    /// Highest index written so far, or `None` for an empty log.
    fn last_index(&self) -> Result<Option<usize>, PersistError>;

    /// Index a new review should start at.
    fn resume_index(&self) -> Result<usize, PersistError> {
        Ok(self.last_index()?.map_or(0, |last| last + 1))
    }
}

/// Records held in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<Record>,
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &Record) -> Result<(), PersistError> {
        if self.records.iter().any(|r| r.same_entry(record)) {
            return Ok(());
        }
        if let Some(last) = self.records.last().map(|r| r.index)
            && record.index <= last
        {
            return Err(PersistError::OutOfOrder {
                index: record.index,
                last,
            });
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn last_index(&self) -> Result<Option<usize>, PersistError> {
        Ok(self.records.last().map(|r| r.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_index_starts_at_zero_for_empty_log() {
        let sink = MemorySink::default();
        assert_eq!(sink.resume_index().unwrap(), 0);
    }

    #[test]
    fn resume_index_follows_last_index() {
        let mut sink = MemorySink::default();
        sink.append(&Record::new(4, "Nero", "Nero was emperor.")).unwrap();
        assert_eq!(sink.last_index().unwrap(), Some(4));
        assert_eq!(sink.resume_index().unwrap(), 5);
    }

    #[test]
    fn memory_sink_refuses_repeated_index() {
        let mut sink = MemorySink::default();
        sink.append(&Record::new(0, "Otho", "a")).unwrap();
        let err = sink.append(&Record::new(0, "Otho", "b")).unwrap_err();
        assert!(matches!(err, PersistError::OutOfOrder { index: 0, last: 0 }));
        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn repeating_a_stored_record_is_a_no_op() {
        let mut sink = MemorySink::default();
        sink.append(&Record::new(0, "Otho", "a")).unwrap();
        sink.append(&Record::new(0, "Otho", "a")).unwrap();
        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn same_entry_ignores_review_time() {
        let first = Record::new(3, "Vitellius", "x");
        let mut later = first.clone();
        later.reviewed_at += chrono::Duration::seconds(30);
        assert!(first.same_entry(&later));
        assert!(!first.same_entry(&Record::new(3, "Vitellius", "y")));
    }
}
