//! Centralized tuning constants for the Kereta engine.
//!
//! These values define the deterministic behavior of the core simulation
//! and the notification policy. Keeping them together ensures that tuning
//! can only be adjusted via code changes reviewed in version control,
//! rather than through external assets.

// Geodesy ------------------------------------------------------------------
pub(crate) const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Geofence tuning ----------------------------------------------------------
pub(crate) const NEAR_ALERT_RADIUS_M: f64 = 500.0;
pub(crate) const MIN_UNLOCK_RADIUS_M: f64 = 10.0;
pub(crate) const MIN_AREA_RADIUS_KM: f64 = 0.1;

// Journey window -----------------------------------------------------------
pub(crate) const JOURNEY_DURATION_HOURS: i64 = 5;
pub(crate) const SCHEDULE_READY_LEAD_HOURS: i64 = 2;
pub(crate) const SCHEDULE_ACTIVE_TAIL_HOURS: i64 = 24;

// Trigger cooldowns, in minutes --------------------------------------------
pub(crate) const COOLDOWN_NEAR_CHECKPOINT_MIN: i64 = 60;
pub(crate) const COOLDOWN_LOCATION_SUGGESTION_MIN: i64 = 30;
pub(crate) const COOLDOWN_FOOD_SUGGESTION_MIN: i64 = 120;
pub(crate) const COOLDOWN_TIME_GREETING_MIN: i64 = 12 * 60;
pub(crate) const COOLDOWN_TIME_SUGGESTION_MIN: i64 = 4 * 60;
// Long enough to never recur within a session window.
pub(crate) const COOLDOWN_MILESTONE_MIN: i64 = 10_000 * 60;

// Milestone thresholds as (label percent, progress ratio), ascending -------
pub(crate) const MILESTONE_THRESHOLDS: [(u8, f32); 4] =
    [(25, 0.25), (50, 0.50), (75, 0.75), (100, 1.0)];

// Ticker cadences ----------------------------------------------------------
pub const SIMULATOR_TICK_SECONDS: i64 = 2;
pub const STEPPER_BASE_INTERVAL_SECONDS: i64 = 12;
pub const TRIGGER_POLL_SECONDS: i64 = 60;

// Position source defaults -------------------------------------------------
/// Cruising speed of the sightseeing train, meters per second (~40 km/h).
pub const DEFAULT_TRAIN_SPEED_MPS: f64 = 11.0;
pub(crate) const SIMULATOR_ACCURACY_M: f64 = 5.0;
pub(crate) const STEPPER_ACCURACY_M: f64 = 15.0;

// Persisted storage keys ---------------------------------------------------
pub(crate) const KEY_JOURNEY: &str = "kereta.journey";
pub(crate) const KEY_UNLOCKS: &str = "kereta.unlocks";
pub(crate) const KEY_BADGES: &str = "kereta.badges";

// Badge ids ----------------------------------------------------------------
pub const BADGE_FIRST_UNLOCK: &str = "badge.first-unlock";
pub const BADGE_ROUTE_COMPLETE: &str = "badge.route-complete";
pub(crate) const BADGE_MILESTONE_PREFIX: &str = "badge.milestone.";
