//! Most-recent-first translation history with best-effort persistence

use tracing::{debug, warn};

use crate::core::errors::PersistenceError;
use crate::core::models::TranslationRecord;
use crate::core::storage::HistoryStorage;

/// In-memory history log mirrored to a storage slot after every mutation.
///
/// The in-memory records are authoritative; a failed write only means this
/// round was not saved.
#[derive(Debug)]
pub struct HistoryStore {
    storage: Box<dyn HistoryStorage>,
    records: Vec<TranslationRecord>,
}

impl HistoryStore {
    /// Load history from `storage`, starting empty on absent or corrupt data
    pub fn load(storage: impl HistoryStorage + 'static) -> Self {
        let records = match storage.load() {
            Ok(Some(data)) => match serde_json::from_slice::<Vec<TranslationRecord>>(&data) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Discarding corrupt translation history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read translation history: {}", e);
                Vec::new()
            }
        };

        debug!("Loaded {} history records", records.len());

        Self {
            storage: Box::new(storage),
            records,
        }
    }

    /// Records, most recent first
    pub fn records(&self) -> &[TranslationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert `record` at the head and persist
    pub fn prepend(&mut self, record: TranslationRecord) {
        self.records.insert(0, record);
        self.persist();
    }

    /// Drop every record and persist the empty log
    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("History not saved: {}", e);
        }
    }

    fn try_persist(&self) -> Result<(), PersistenceError> {
        let data = serde_json::to_vec(&self.records)?;
        self.storage.save(&data)
    }
}
