pub mod json_store;
pub mod sheet_store;

pub use json_store::JsonStore;
pub use sheet_store::SheetStore;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::config::{Backend, StoreConfig};
use crate::model::task::Task;

/// Error type for store operations. Store failures are fatal for the
/// current command; nothing retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: could not read {path}: {source}")]
    Unavailable {
        path: PathBuf,
        source: io::Error,
    },
    #[error("store write conflict: could not replace {path}: {source}")]
    WriteConflict {
        path: PathBuf,
        source: io::Error,
    },
}

/// Durable backend holding the task list between sessions.
///
/// Both implementations are single-writer, last-write-wins: every save
/// rewrites the whole list, with no version check against concurrent
/// writers. One attempt per user action.
pub trait TaskStore {
    fn load(&self) -> Result<Vec<Task>, StoreError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// Open the store a config names, rooted at the config's directory.
pub fn open_store(dir: &Path, config: &StoreConfig) -> Box<dyn TaskStore> {
    let path = dir.join(&config.file);
    match config.backend {
        Backend::Json => Box::new(JsonStore::new(path)),
        Backend::Sheet => Box::new(SheetStore::new(path)),
    }
}

/// Write a file atomically: temp file in the same directory, then rename.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let write = |tmp: &mut NamedTempFile| -> io::Result<()> {
        tmp.write_all(content)?;
        tmp.flush()
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::Unavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    write(&mut tmp).map_err(|e| StoreError::Unavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    tmp.persist(path).map_err(|e| StoreError::WriteConflict {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Read a store file, mapping "not found" to `None` and any other I/O
/// failure to [`StoreError::Unavailable`].
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Unavailable {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
