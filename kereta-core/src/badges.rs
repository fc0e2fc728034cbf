//! Earned badge bookkeeping.
use crate::constants::KEY_BADGES;
use crate::{BadgeAwarder, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Persisted set of earned badge ids.
///
/// The outbound badge port is documented as idempotent, but the book still
/// suppresses repeat awards so collaborators only hear about each badge
/// once per install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeBook {
    earned: BTreeSet<String>,
}

impl BadgeBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has(&self, badge_id: &str) -> bool {
        self.earned.contains(badge_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.earned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.earned.is_empty()
    }

    pub fn badge_ids(&self) -> impl Iterator<Item = &str> {
        self.earned.iter().map(String::as_str)
    }

    /// Award a badge through the port, once. Returns true when the badge
    /// was newly earned.
    pub fn award(&mut self, badge_id: &str, port: &mut dyn BadgeAwarder) -> bool {
        if !self.earned.insert(badge_id.to_string()) {
            return false;
        }
        log::info!("badge earned: {badge_id}");
        port.award(badge_id);
        true
    }

    /// Restore the book from the key-value port; corrupt state degrades to
    /// an empty book with a warning.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.get(KEY_BADGES) else {
            return Self::new();
        };
        match serde_json::from_str(&raw) {
            Ok(book) => book,
            Err(err) => {
                log::warn!("stored badge book is corrupt, starting empty: {err}");
                Self::new()
            }
        }
    }

    /// Persist through the key-value port; false on write failure.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) -> bool {
        match serde_json::to_string(self) {
            Ok(json) => store.set(KEY_BADGES, &json),
            Err(err) => {
                log::warn!("failed to serialize badge book: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[derive(Default)]
    struct RecordingPort {
        awards: Vec<String>,
    }

    impl BadgeAwarder for RecordingPort {
        fn award(&mut self, badge_id: &str) {
            self.awards.push(badge_id.to_string());
        }
    }

    #[test]
    fn awards_reach_the_port_exactly_once() {
        let mut book = BadgeBook::new();
        let mut port = RecordingPort::default();
        assert!(book.award("badge.first-unlock", &mut port));
        assert!(!book.award("badge.first-unlock", &mut port));
        assert_eq!(port.awards, vec!["badge.first-unlock"]);
        assert!(book.has("badge.first-unlock"));
    }

    #[test]
    fn roundtrips_through_the_store() {
        let store = MemoryStore::default();
        let mut book = BadgeBook::new();
        let mut port = RecordingPort::default();
        book.award("badge.route-complete", &mut port);
        assert!(book.persist(&store));

        let restored = BadgeBook::load(&store);
        assert_eq!(restored, book);

        // A restored book keeps suppressing re-awards.
        let mut restored = restored;
        assert!(!restored.award("badge.route-complete", &mut port));
    }

    #[test]
    fn corrupt_state_degrades_to_empty() {
        let store = MemoryStore::default();
        store.set(KEY_BADGES, "{broken");
        assert!(BadgeBook::load(&store).is_empty());
    }
}
