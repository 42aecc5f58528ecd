use fs2::FileExt;
use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Record, RecordSink};
use crate::errors::PersistError;

/// Append-only JSON Lines record log.
///
/// One JSON object per line, so names and excerpts may contain commas, quotes
/// or newlines. Appends hold an exclusive file lock and are synced to disk
/// before returning. A final line without a trailing newline is a torn write
/// from an interrupted append, even when it parses: it is skipped on read and
/// truncated by the next append.
///
/// Appending a record whose index, name and excerpt are already stored is a
/// no-op, so a retry after a failed sync succeeds.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read every complete record in file order.
    pub fn records(&self) -> Result<Vec<Record>, PersistError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        let (complete, torn) = bytes.split_at(
            bytes
                .iter()
                .rposition(|b| *b == b'\n')
                .map_or(0, |pos| pos + 1),
        );
        if !torn.is_empty() {
            warn!(path = %self.path.display(), bytes = torn.len(), "Skipping torn final record");
        }

        let mut records = Vec::new();
        for (i, line) in complete.split(|b| *b == b'\n').enumerate() {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            // Parsing from bytes rejects invalid UTF-8 instead of replacing it.
            let record = serde_json::from_slice::<Record>(line).map_err(|source| {
                PersistError::Corrupt {
                    path: self.path.clone(),
                    line: i + 1,
                    source,
                }
            })?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn reset(&self) -> Result<(), PersistError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| self.io_error(e))?;
        }
        Ok(())
    }

    fn write_locked(&self, file: &mut fs::File, line: &str) -> Result<(), PersistError> {
        // Drop a torn tail so the new record starts on its own line.
        let mut content = Vec::new();
        file.seek(SeekFrom::Start(0)).map_err(|e| self.io_error(e))?;
        file.read_to_end(&mut content).map_err(|e| self.io_error(e))?;
        if content.last().is_some_and(|b| *b != b'\n') {
            let keep = content
                .iter()
                .rposition(|b| *b == b'\n')
                .map_or(0, |pos| pos + 1);
            warn!(
                path = %self.path.display(),
                dropped = content.len() - keep,
                "Truncating torn record"
            );
            file.set_len(keep as u64).map_err(|e| self.io_error(e))?;
        }
        file.write_all(line.as_bytes()).map_err(|e| self.io_error(e))?;
        file.sync_data().map_err(|e| self.io_error(e))
    }
}

impl RecordSink for JsonlSink {
    fn append(&mut self, record: &Record) -> Result<(), PersistError> {
        let mut line = serde_json::to_string(record).map_err(|source| PersistError::Serialize {
            index: record.index,
            source,
        })?;
        line.push('\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        FileExt::lock_exclusive(&file).map_err(|e| self.io_error(e))?;

        // Re-check ordering under the lock so an index is never written twice.
        let result = self.records().and_then(|stored| {
            match stored.iter().map(|r| r.index).max() {
                Some(_) if stored.iter().any(|r| r.same_entry(record)) => {
                    debug!(index = record.index, "Record already stored");
                    Ok(())
                }
                Some(last) if record.index <= last => Err(PersistError::OutOfOrder {
                    index: record.index,
                    last,
                }),
                _ => {
                    self.write_locked(&mut file, &line)?;
                    debug!(index = record.index, path = %self.path.display(), "Appended record");
                    Ok(())
                }
            }
        });

        if let Err(e) = FileExt::unlock(&file) {
            warn!(path = %self.path.display(), error = %e, "Failed to unlock record log");
        }

        result
    }

    fn last_index(&self) -> Result<Option<usize>, PersistError> {
        Ok(self.records()?.iter().map(|r| r.index).max())
    }
}
