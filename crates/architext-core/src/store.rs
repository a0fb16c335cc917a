use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::SavedArchitecture;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Saved designs, most recent first. Entries are never mutated or deleted.
pub trait ArchitectureStore: Send + Sync {
    /// Put `design` at the front of the list.
    fn save(&self, design: &SavedArchitecture) -> Result<(), PersistenceError>;

    /// All saved designs, most recent first. Unreadable storage lists as empty.
    fn list_all(&self) -> Vec<SavedArchitecture>;

    fn get_by_id(&self, id: &str) -> Option<SavedArchitecture> {
        self.list_all().into_iter().find(|d| d.id == id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    designs: Mutex<Vec<SavedArchitecture>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArchitectureStore for MemoryStore {
    fn save(&self, design: &SavedArchitecture) -> Result<(), PersistenceError> {
        let mut designs = self.designs.lock().unwrap_or_else(|e| e.into_inner());
        designs.insert(0, design.clone());
        Ok(())
    }

    fn list_all(&self) -> Vec<SavedArchitecture> {
        self.designs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Designs stored as one JSON array in a single file.
///
/// Writes go through a temp file + rename so a reader never sees a truncated
/// list. There is no locking between processes; the last writer wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (~/.architext/designs.json).
    pub fn open_default() -> Self {
        Self::new(crate::settings::designs_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored list. A missing file is empty and a corrupted one is
    /// empty with a warning; any other read failure is an error.
    fn read_all(&self) -> Result<Vec<SavedArchitecture>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(designs) => Ok(designs),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "saved designs are corrupted, treating as empty");
                Ok(vec![])
            }
        }
    }

    fn write_all(&self, designs: &[SavedArchitecture]) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(designs)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ArchitectureStore for FileStore {
    fn save(&self, design: &SavedArchitecture) -> Result<(), PersistenceError> {
        let mut designs = self.read_all()?;
        designs.insert(0, design.clone());
        self.write_all(&designs)?;
        tracing::debug!(id = %design.id, total = designs.len(), "saved design");
        Ok(())
    }

    fn list_all(&self) -> Vec<SavedArchitecture> {
        self.read_all().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "cannot read saved designs");
            vec![]
        })
    }
}
