//! Journey lifecycle and booking-schedule classification.
//!
//! Two independent notions of "active" exist on purpose. The lifecycle
//! below bounds the running experience with a fixed five-hour window from
//! `start()` and is authoritative for engine behavior. The schedule
//! classifier at the bottom grades a booking's own date/time against wider
//! windows and is informational for UI collaborators only; the engine never
//! consults it.
use crate::KeyValueStore;
use crate::constants::{
    JOURNEY_DURATION_HOURS, KEY_JOURNEY, SCHEDULE_ACTIVE_TAIL_HOURS, SCHEDULE_READY_LEAD_HOURS,
};
use crate::geo::Coordinate;
use crate::position::PositionFix;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Linear lifecycle phase; no backward transition. Restarting a booking
/// re-enters `Active` with a fresh window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyPhase {
    NotStarted,
    Active,
    Ended,
}

/// A running (or expired) journey bound to a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub booking_id: String,
    pub started_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub last_known_location: Option<Coordinate>,
    #[serde(default)]
    pub progress_percent: f32,
}

/// State machine bounding the active journey window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JourneyLifecycle {
    journey: Option<Journey>,
    // Location tracking used when no journey exists; never persisted.
    transient_location: Option<Coordinate>,
}

impl JourneyLifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from the key-value port; corrupt state degrades to no
    /// journey with a warning.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let Some(raw) = store.get(KEY_JOURNEY) else {
            return Self::new();
        };
        match serde_json::from_str::<Option<Journey>>(&raw) {
            Ok(journey) => Self {
                journey,
                transient_location: None,
            },
            Err(err) => {
                log::warn!("stored journey is corrupt, starting fresh: {err}");
                Self::new()
            }
        }
    }

    fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) -> bool {
        match serde_json::to_string(&self.journey) {
            Ok(json) => store.set(KEY_JOURNEY, &json),
            Err(err) => {
                log::warn!("failed to serialize journey: {err}");
                false
            }
        }
    }

    /// Begin (or restart) the journey for a booking, opening a fresh
    /// fixed-duration window from `now`.
    pub fn start<S: KeyValueStore + ?Sized>(
        &mut self,
        booking_id: &str,
        now: DateTime<Utc>,
        store: &S,
    ) {
        let journey = Journey {
            booking_id: booking_id.to_string(),
            started_at: now,
            end_at: now + Duration::hours(JOURNEY_DURATION_HOURS),
            last_known_location: self.transient_location.take(),
            progress_percent: 0.0,
        };
        log::info!(
            "journey started for booking {booking_id}, window closes {}",
            journey.end_at
        );
        self.journey = Some(journey);
        if !self.persist(store) {
            log::warn!("failed to persist journey start");
        }
    }

    #[must_use]
    pub fn phase(&self, now: DateTime<Utc>) -> JourneyPhase {
        match &self.journey {
            None => JourneyPhase::NotStarted,
            Some(journey) if now >= journey.started_at && now <= journey.end_at => {
                JourneyPhase::Active
            }
            Some(_) => JourneyPhase::Ended,
        }
    }

    /// True while `now` lies inside the journey window.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.phase(now) == JourneyPhase::Active
    }

    #[must_use]
    pub fn journey(&self) -> Option<&Journey> {
        self.journey.as_ref()
    }

    /// Record the latest position. Persists when a journey exists; falls
    /// back to transient in-memory tracking otherwise.
    pub fn update_location<S: KeyValueStore + ?Sized>(&mut self, fix: &PositionFix, store: &S) {
        if let Some(journey) = &mut self.journey {
            journey.last_known_location = Some(fix.coordinates);
            journey.progress_percent = (fix.progress * 100.0).clamp(0.0, 100.0);
            if !self.persist(store) {
                log::warn!("failed to persist journey location update");
            }
        } else {
            self.transient_location = Some(fix.coordinates);
        }
    }

    /// Last position seen, journey-bound or transient.
    #[must_use]
    pub fn last_known_location(&self) -> Option<Coordinate> {
        self.journey
            .as_ref()
            .and_then(|journey| journey.last_known_location)
            .or(self.transient_location)
    }

    /// Explicitly end the journey, clearing the persisted record.
    pub fn end<S: KeyValueStore + ?Sized>(&mut self, store: &S) {
        if self.journey.take().is_some() {
            log::info!("journey ended");
        }
        if !self.persist(store) {
            log::warn!("failed to clear persisted journey");
        }
    }
}

/// Booking-schedule classification for UI gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Upcoming,
    Ready,
    Active,
    Ended,
}

/// Grade a booking's scheduled departure against `now`: `Ready` within two
/// hours before departure, `Active` from departure until 24 hours after,
/// otherwise `Upcoming`/`Ended`.
#[must_use]
pub fn classify_schedule(scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> ScheduleStatus {
    if now < scheduled_at {
        if scheduled_at - now <= Duration::hours(SCHEDULE_READY_LEAD_HOURS) {
            ScheduleStatus::Ready
        } else {
            ScheduleStatus::Upcoming
        }
    } else if now - scheduled_at <= Duration::hours(SCHEDULE_ACTIVE_TAIL_HOURS) {
        ScheduleStatus::Active
    } else {
        ScheduleStatus::Ended
    }
}

/// Convenience wrapper for booking records that carry a separate date and
/// time-of-day (interpreted as UTC).
#[must_use]
pub fn classify_booking(date: NaiveDate, time: NaiveTime, now: DateTime<Utc>) -> ScheduleStatus {
    classify_schedule(date.and_time(time).and_utc(), now)
}
