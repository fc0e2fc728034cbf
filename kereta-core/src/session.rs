//! Session orchestration.
//!
//! A `TourSession` binds one position feed, the unlock ledger, the journey
//! lifecycle, and the trigger scheduler for a single logical user session.
//! Everything advances from explicit `tick()` calls on one thread; the two
//! timers (position cadence and trigger poll) are independent and must both
//! be stopped on teardown; `shutdown()` does exactly that and nothing else
//! stops them implicitly.
use crate::clock::Clock;
use crate::constants::TRIGGER_POLL_SECONDS;
use crate::data::TourData;
use crate::geofence::{self, UnlockEvent};
use crate::journey::JourneyLifecycle;
use crate::position::{PositionError, PositionFeed, PositionFix};
use crate::ticker::Ticker;
use crate::triggers::{CooldownTable, TriggerScheduler};
use crate::unlocks::UnlockLedger;
use crate::{BadgeAwarder, KeyValueStore, MessageSink};
use crate::badges::BadgeBook;
use chrono::Duration;
use std::rc::Rc;

/// Result of a single cooperative tick.
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    /// Position fixes emitted by the feed this tick.
    pub fixes: Vec<PositionFix>,
    /// Checkpoints newly unlocked this tick.
    pub unlocks: Vec<UnlockEvent>,
    /// Number of trigger-poll intervals that fired.
    pub clock_fires: u32,
    /// Device failure surfaced this tick, if any.
    pub position_error: Option<PositionError>,
}

/// One running journey session.
pub struct TourSession<S: KeyValueStore> {
    data: TourData,
    feed: PositionFeed,
    ledger: UnlockLedger,
    badges: BadgeBook,
    lifecycle: JourneyLifecycle,
    scheduler: TriggerScheduler,
    trigger_ticker: Ticker,
    store: Rc<S>,
    clock: Rc<dyn Clock>,
}

impl<S: KeyValueStore> TourSession<S> {
    /// Bind a session over validated catalog data, restoring any persisted
    /// ledger, badge, and journey state from the store.
    #[must_use]
    pub fn new(
        data: TourData,
        feed: PositionFeed,
        seed: u64,
        store: Rc<S>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let ledger = UnlockLedger::load(store.as_ref());
        let badges = BadgeBook::load(store.as_ref());
        let lifecycle = JourneyLifecycle::load(store.as_ref());
        Self {
            data,
            feed,
            ledger,
            badges,
            lifecycle,
            scheduler: TriggerScheduler::new(CooldownTable::default(), seed),
            trigger_ticker: Ticker::new(Duration::seconds(TRIGGER_POLL_SECONDS)),
            store,
            clock,
        }
    }

    /// Replace the default cooldown table (test compression, tuning).
    #[must_use]
    pub fn with_cooldowns(mut self, cooldowns: CooldownTable, seed: u64) -> Self {
        self.scheduler = TriggerScheduler::new(cooldowns, seed);
        self
    }

    /// Start the journey window for a booking and arm both timers.
    pub fn begin(&mut self, booking_id: &str) {
        let now = self.clock.now();
        self.lifecycle.start(booking_id, now, self.store.as_ref());
        self.feed.start(now);
        self.trigger_ticker.start(now);
    }

    /// Advance the session: poll the position feed, run every due fix
    /// through the geofence and scheduler, then service the independent
    /// trigger-poll timer.
    pub fn tick(
        &mut self,
        sink: &mut dyn MessageSink,
        badge_port: &mut dyn BadgeAwarder,
    ) -> TickOutcome {
        let now = self.clock.now();
        let mut outcome = TickOutcome::default();

        match self.feed.poll(now) {
            Ok(fixes) => {
                for fix in fixes {
                    outcome.unlocks.extend(self.apply_fix(&fix, sink, badge_port));
                    outcome.fixes.push(fix);
                }
            }
            Err(error) => {
                log::warn!("position source failed: {error}");
                outcome.position_error = Some(error);
            }
        }

        outcome.clock_fires = self.trigger_ticker.poll(now);
        if outcome.clock_fires > 0 && self.lifecycle.is_active(now) {
            self.scheduler.on_clock(now, sink);
        }
        outcome
    }

    fn apply_fix(
        &mut self,
        fix: &PositionFix,
        sink: &mut dyn MessageSink,
        badge_port: &mut dyn BadgeAwarder,
    ) -> Vec<UnlockEvent> {
        let now = fix.timestamp;
        self.lifecycle.update_location(fix, self.store.as_ref());

        let events = geofence::check_proximity(fix, &self.data.checkpoints, &mut self.ledger);
        if !events.is_empty() {
            geofence::award_unlock_badges(
                &events,
                &self.data.checkpoints,
                &self.ledger,
                &mut self.badges,
                badge_port,
            );
            if self.lifecycle.is_active(now) {
                self.scheduler.on_progress(
                    self.ledger.len(),
                    self.data.checkpoints.len(),
                    now,
                    sink,
                    &mut self.badges,
                    badge_port,
                );
            }
            if !self.ledger.persist(self.store.as_ref()) {
                log::warn!("failed to persist unlock ledger");
            }
            if !self.badges.persist(self.store.as_ref()) {
                log::warn!("failed to persist badge book");
            }
        }

        if self.lifecycle.is_active(now) {
            self.scheduler
                .on_position(fix, &self.data, &self.ledger, now, sink);
        }
        events.into_vec()
    }

    /// Stop both timers. The position feed and the trigger poll are
    /// independent; neither stops the other, so teardown goes through here.
    pub fn shutdown(&mut self) {
        self.feed.stop();
        self.trigger_ticker.stop();
    }

    /// Explicitly end the journey and tear the timers down.
    pub fn end_journey(&mut self) {
        self.lifecycle.end(self.store.as_ref());
        self.shutdown();
    }

    #[must_use]
    pub fn data(&self) -> &TourData {
        &self.data
    }

    #[must_use]
    pub fn ledger(&self) -> &UnlockLedger {
        &self.ledger
    }

    #[must_use]
    pub fn badges(&self) -> &BadgeBook {
        &self.badges
    }

    #[must_use]
    pub fn lifecycle(&self) -> &JourneyLifecycle {
        &self.lifecycle
    }

    #[must_use]
    pub fn scheduler(&self) -> &TriggerScheduler {
        &self.scheduler
    }

    /// Mutable access to the feed, e.g. to push device fixes in.
    pub fn feed_mut(&mut self) -> &mut PositionFeed {
        &mut self.feed
    }

    /// True while either timer is armed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.feed.is_running() || self.trigger_ticker.is_running()
    }
}
