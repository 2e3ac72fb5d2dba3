use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::task::Task;

/// Error type for task list persistence
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize task list: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Handle to the durable task file.
///
/// The entire list is rewritten on every save; there is no incremental or
/// delta persistence.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Store { path }
    }

    /// Resolve the storage file: explicit override, then `TAREFA_FILE`,
    /// then `$XDG_DATA_HOME/tarefa/tarefas.json` (HOME fallback).
    pub fn resolve(override_path: Option<&str>) -> Store {
        if let Some(path) = override_path {
            return Store::new(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("TAREFA_FILE") {
            return Store::new(PathBuf::from(path));
        }
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs_home().join(".local/share"));
        Store::new(data_dir.join("tarefa").join("tarefas.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted task list. A missing or unparsable file is
    /// treated as an empty list; no error is surfaced.
    pub fn load(&self) -> Vec<Task> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Write the full task list, replacing prior contents.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(tasks)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Write via a temp file in the same directory, then rename into place.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
