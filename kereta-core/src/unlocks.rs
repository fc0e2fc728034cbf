//! Durable checkpoint unlock ledger.
use crate::KeyValueStore;
use crate::constants::KEY_UNLOCKS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Record of a checkpoint visit. Created exactly once per checkpoint;
/// never deleted; its existence means "visited".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub checkpoint_id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Monotonic map of checkpoint id to unlock record.
///
/// Backed by an ordered map so iteration (and therefore persistence and
/// reporting) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnlockLedger {
    records: BTreeMap<String, UnlockRecord>,
}

impl UnlockLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, checkpoint_id: &str) -> bool {
        self.records.contains_key(checkpoint_id)
    }

    #[must_use]
    pub fn get(&self, checkpoint_id: &str) -> Option<&UnlockRecord> {
        self.records.get(checkpoint_id)
    }

    /// Insert a record unless the checkpoint is already unlocked. Returns
    /// true when the record was newly inserted; an existing record is never
    /// replaced, keeping the original unlock timestamp.
    pub fn insert(&mut self, record: UnlockRecord) -> bool {
        match self.records.entry(record.checkpoint_id.clone()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unlocked checkpoint ids in deterministic order.
    pub fn checkpoint_ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &UnlockRecord> {
        self.records.values()
    }

    /// Restore the ledger from the key-value port. Missing or corrupted
    /// stored state degrades to an empty ledger with a warning rather than
    /// failing the session.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.get(KEY_UNLOCKS) else {
            return Self::new();
        };
        match serde_json::from_str(&raw) {
            Ok(ledger) => ledger,
            Err(err) => {
                log::warn!("stored unlock ledger is corrupt, starting empty: {err}");
                Self::new()
            }
        }
    }

    /// Persist the ledger through the key-value port. Returns false when
    /// the write fails; the engine never retries on its own.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) -> bool {
        match serde_json::to_string(self) {
            Ok(json) => store.set(KEY_UNLOCKS, &json),
            Err(err) => {
                log::warn!("failed to serialize unlock ledger: {err}");
                false
            }
        }
    }
}
