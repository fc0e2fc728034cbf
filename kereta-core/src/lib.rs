//! Kereta Tour Engine
//!
//! Platform-agnostic core for the Kereta tour companion: a simulated train
//! journey along a fixed route that unlocks checkpoints by proximity and
//! drives a cooldown-gated contextual message engine. This crate owns the
//! position simulation, geofencing, journey lifecycle, and trigger
//! scheduling; rendering, storage backends, and message generation are
//! external collaborators behind the ports below.

pub mod badges;
pub mod clock;
pub mod constants;
pub mod data;
pub mod geo;
pub mod geofence;
pub mod journey;
pub mod position;
pub mod route;
pub mod session;
pub mod ticker;
pub mod triggers;
pub mod unlocks;

// Re-export commonly used types
pub use badges::BadgeBook;
pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::{BADGE_FIRST_UNLOCK, BADGE_ROUTE_COMPLETE, DEFAULT_TRAIN_SPEED_MPS};
pub use data::{AreaOfInterest, CatalogError, Checkpoint, TourData};
pub use geo::{Area, Coordinate, bearing_degrees, distance_meters};
pub use geofence::{UnlockEvent, check_proximity, route_complete};
pub use journey::{
    Journey, JourneyLifecycle, JourneyPhase, ScheduleStatus, classify_booking, classify_schedule,
};
pub use position::{
    DeviceFeed, FeedConfig, PositionError, PositionFeed, PositionFix, RouteSimulator,
    WaypointStepper,
};
pub use route::{Route, RouteError};
pub use session::{TickOutcome, TourSession};
pub use ticker::Ticker;
pub use triggers::{CooldownTable, Topic, TriggerMessage, TriggerScheduler};
pub use unlocks::{UnlockLedger, UnlockRecord};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Trait for abstracting catalog loading operations.
/// Platform-specific implementations should provide this.
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the tour catalog from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_tour_data(&self) -> Result<TourData, Self::Error>;
}

/// Opaque persisted key-value port used for journeys, unlock records, and
/// badges. No multi-key transaction is assumed; concurrent writers are
/// last-writer-wins on the backing store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Persist a value. Returns false when the write could not be
    /// completed (quota, IO); the engine reports and never retries.
    fn set(&self, key: &str, value: &str) -> bool;
}

/// Outbound badge port, called on unlock events and milestone crossings.
/// Implementations must tolerate repeated awards for the same id.
pub trait BadgeAwarder {
    fn award(&mut self, badge_id: &str);
}

/// Outbound message port consumed by a chat/notification collaborator.
/// Delivery is best-effort; returning false only logs, it never replays.
pub trait MessageSink {
    fn emit(&mut self, message: &TriggerMessage) -> bool;
}

/// In-memory key-value store: the reference `KeyValueStore` used by the
/// headless runner and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }
}

/// Main engine binding a catalog loader to a persistence store and
/// constructing sessions over them.
pub struct TourEngine<L, S>
where
    L: DataLoader,
    S: KeyValueStore,
{
    loader: L,
    store: Rc<S>,
}

impl<L, S> TourEngine<L, S>
where
    L: DataLoader,
    S: KeyValueStore,
{
    /// Create a new engine with the provided loader and store.
    pub fn new(loader: L, store: S) -> Self {
        Self {
            loader,
            store: Rc::new(store),
        }
    }

    /// Shared handle to the persistence store.
    #[must_use]
    pub fn store(&self) -> Rc<S> {
        self.store.clone()
    }

    /// Load and validate the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be loaded or fails
    /// validation.
    pub fn load_catalog(&self) -> Result<TourData, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let mut data = self.loader.load_tour_data().map_err(Into::into)?;
        data.validate()?;
        data.sanitize();
        Ok(data)
    }

    /// Construct a session with the feed selected by configuration,
    /// restoring persisted state from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be loaded or the selected
    /// feed cannot be built over its route.
    pub fn create_session(
        &self,
        feed: FeedConfig,
        seed: u64,
        clock: Rc<dyn Clock>,
    ) -> Result<TourSession<S>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let data = self.load_catalog()?;
        let feed = PositionFeed::from_config(feed, data.route.clone())?;
        Ok(TourSession::new(data, feed, seed, self.store.clone(), clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = Infallible;

        fn load_tour_data(&self) -> Result<TourData, Self::Error> {
            let route = Route::new(vec![
                Coordinate::new(-8.70, 115.20),
                Coordinate::new(-8.60, 115.30),
            ])
            .unwrap();
            Ok(TourData {
                route,
                ..TourData::empty()
            })
        }
    }

    #[derive(Clone, Copy, Default)]
    struct EmptyLoader;

    impl DataLoader for EmptyLoader {
        type Error = Infallible;

        fn load_tour_data(&self) -> Result<TourData, Self::Error> {
            Ok(TourData::empty())
        }
    }

    #[test]
    fn memory_store_roundtrips_values() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get("missing").is_none());
        assert!(store.set("k", "v"));
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(store.len(), 1);

        // Clones share the same backing map, like platform storage handles.
        let alias = store.clone();
        alias.set("k2", "v2");
        assert_eq!(store.get("k2").as_deref(), Some("v2"));
    }

    #[test]
    fn engine_builds_sessions_over_a_valid_catalog() {
        let engine = TourEngine::new(FixtureLoader, MemoryStore::default());
        let clock = Rc::new(ManualClock::new(
            chrono::Utc.with_ymd_and_hms(2024, 5, 4, 8, 0, 0).unwrap(),
        ));
        let session = engine
            .create_session(FeedConfig::Simulator { speed_mps: 11.0 }, 42, clock)
            .unwrap();
        assert!(!session.is_running());
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn engine_rejects_invalid_catalogs() {
        let engine = TourEngine::new(EmptyLoader, MemoryStore::default());
        assert!(engine.load_catalog().is_err());
    }
}
