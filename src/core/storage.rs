//! Named-slot storage backends for the history blob

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::core::errors::PersistenceError;

/// A single named slot holding an opaque blob
pub trait HistoryStorage: Send + Sync + Debug {
    /// Read the slot. `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Overwrite the slot
    fn save(&self, data: &[u8]) -> Result<(), PersistenceError>;
}

/// Slot backed by `<dir>/<slot>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file slot named `slot` inside `dir`
    pub fn new(dir: impl AsRef<Path>, slot: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", slot)),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        match std::fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, data: &[u8]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Replace via rename so readers never see a half-written file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}

/// In-process slot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `data`
    pub fn with_data(data: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(data.into()))),
        }
    }

    /// Current slot contents
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.contents())
    }

    fn save(&self, data: &[u8]) -> Result<(), PersistenceError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(data.to_vec());
        Ok(())
    }
}
