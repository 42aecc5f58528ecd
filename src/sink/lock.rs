use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::PersistError;

/// Exclusive lock held for the lifetime of a review session.
///
/// Released when dropped (the OS drops the lock with the file handle).
#[derive(Debug)]
pub struct SessionLock {
    path: PathBuf,
    _file: fs::File,
}

impl SessionLock {
    pub fn acquire(path: &Path) -> Result<Self, PersistError> {
        let io_error = |source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(io_error)?;
        FileExt::try_lock_exclusive(&file).map_err(|_| PersistError::Locked {
            path: path.to_path_buf(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            _file: file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
