//! Position sources.
//!
//! Three producers share one tick shape: a continuous route simulator, a
//! discrete demo stepper, and an adapter for a real device GPS
//! collaborator. They are unified behind tagged variants selected by
//! configuration, not structural typing, and all honor the same teardown
//! contract: after `stop()` no further fix is ever produced.
mod device;
mod simulator;
mod stepper;

pub use device::DeviceFeed;
pub use simulator::RouteSimulator;
pub use stepper::WaypointStepper;

use crate::geo::Coordinate;
use crate::route::{Route, RouteError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot emitted on every position tick. Passed by value into tick
/// handlers so callbacks never capture mutable source state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub coordinates: Coordinate,
    /// Estimated accuracy in meters; device fixes may omit it.
    pub accuracy_m: Option<f64>,
    /// Compass heading in degrees; device fixes may omit it.
    pub heading_deg: Option<f64>,
    pub speed_mps: Option<f64>,
    pub timestamp: DateTime<Utc>,
    /// Fraction of the route covered, in `[0, 1]`.
    pub progress: f32,
}

/// Failure classification surfaced by the real-device adapter. The
/// simulation-based sources cannot fail this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location provider unavailable")]
    Unavailable,
    #[error("timed out waiting for a position fix")]
    Timeout,
    #[error("unknown location failure")]
    Unknown,
}

/// Feed selection, chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum FeedConfig {
    /// Continuous interpolation along the route at a fixed speed.
    Simulator { speed_mps: f64 },
    /// Discrete demo mode stepping one waypoint per tick.
    Stepper { speed_multiplier: f64 },
    /// Real device GPS pushed in by the platform collaborator.
    Device,
}

/// A position producer behind one explicit interface.
#[derive(Debug, Clone)]
pub enum PositionFeed {
    Simulator(RouteSimulator),
    Stepper(WaypointStepper),
    Device(DeviceFeed),
}

impl PositionFeed {
    /// Build a feed from configuration and the catalog route.
    ///
    /// # Errors
    ///
    /// Returns `RouteError` when a simulated mode is requested over a route
    /// with fewer than two waypoints.
    pub fn from_config(config: FeedConfig, route: Route) -> Result<Self, RouteError> {
        match config {
            FeedConfig::Simulator { speed_mps } => {
                Ok(Self::Simulator(RouteSimulator::new(route, speed_mps)?))
            }
            FeedConfig::Stepper { speed_multiplier } => {
                Ok(Self::Stepper(WaypointStepper::new(route, speed_multiplier)?))
            }
            FeedConfig::Device => Ok(Self::Device(DeviceFeed::new())),
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        match self {
            Self::Simulator(feed) => feed.start(now),
            Self::Stepper(feed) => feed.start(now),
            Self::Device(feed) => feed.start(),
        }
    }

    /// Stop the feed. Idempotent; no fix is produced afterwards.
    pub fn stop(&mut self) {
        match self {
            Self::Simulator(feed) => feed.stop(),
            Self::Stepper(feed) => feed.stop(),
            Self::Device(feed) => feed.stop(),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        match self {
            Self::Simulator(feed) => feed.is_running(),
            Self::Stepper(feed) => feed.is_running(),
            Self::Device(feed) => feed.is_running(),
        }
    }

    /// Collect the fixes due since the last poll.
    ///
    /// # Errors
    ///
    /// Returns `PositionError` only for the device variant, which surfaces
    /// platform failures pushed in by the collaborator.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Result<Vec<PositionFix>, PositionError> {
        match self {
            Self::Simulator(feed) => Ok(feed.poll(now)),
            Self::Stepper(feed) => Ok(feed.poll(now)),
            Self::Device(feed) => feed.poll(),
        }
    }

    /// Access the device adapter when this feed wraps one.
    pub fn as_device_mut(&mut self) -> Option<&mut DeviceFeed> {
        match self {
            Self::Device(feed) => Some(feed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        Route::new(vec![
            Coordinate::new(-8.70, 115.20),
            Coordinate::new(-8.60, 115.30),
        ])
        .unwrap()
    }

    #[test]
    fn config_selects_the_matching_variant() {
        let sim = PositionFeed::from_config(FeedConfig::Simulator { speed_mps: 11.0 }, route())
            .unwrap();
        assert!(matches!(sim, PositionFeed::Simulator(_)));

        let stepper =
            PositionFeed::from_config(FeedConfig::Stepper { speed_multiplier: 2.0 }, route())
                .unwrap();
        assert!(matches!(stepper, PositionFeed::Stepper(_)));

        let device = PositionFeed::from_config(FeedConfig::Device, route()).unwrap();
        assert!(matches!(device, PositionFeed::Device(_)));
    }

    #[test]
    fn simulated_modes_reject_short_routes() {
        let short = Route::default();
        assert!(
            PositionFeed::from_config(FeedConfig::Simulator { speed_mps: 11.0 }, short.clone())
                .is_err()
        );
        assert!(
            PositionFeed::from_config(FeedConfig::Stepper { speed_multiplier: 1.0 }, short)
                .is_err()
        );
    }

    #[test]
    fn feed_config_roundtrips_through_json() {
        let cfg = FeedConfig::Stepper { speed_multiplier: 4.0 };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("stepper"));
        let back: FeedConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
