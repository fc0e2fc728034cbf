//! Discrete demo-mode stepping.
use crate::constants::{STEPPER_ACCURACY_M, STEPPER_BASE_INTERVAL_SECONDS};
use crate::geo;
use crate::position::PositionFix;
use crate::route::{Route, RouteError};
use crate::ticker::Ticker;
use chrono::{DateTime, Duration, Utc};

/// Bounds for the demo speed multiplier.
const MIN_MULTIPLIER: f64 = 0.1;
const MAX_MULTIPLIER: f64 = 64.0;

/// Demo-mode source advancing one whole waypoint per tick.
///
/// The cadence is the base interval divided by the speed multiplier. The
/// run finishes after the last waypoint is emitted; there is no looping.
#[derive(Debug, Clone)]
pub struct WaypointStepper {
    route: Route,
    next_index: usize,
    ticker: Ticker,
}

impl WaypointStepper {
    /// Create a stepper over the route. Non-finite or non-positive
    /// multipliers fall back to `1.0`; extremes are clamped.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::TooShort` for routes with fewer than two
    /// waypoints.
    pub fn new(route: Route, speed_multiplier: f64) -> Result<Self, RouteError> {
        if route.len() < 2 {
            return Err(RouteError::TooShort(route.len()));
        }
        let multiplier = if speed_multiplier.is_finite() && speed_multiplier > 0.0 {
            speed_multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
        } else {
            1.0
        };
        let interval_ms = (STEPPER_BASE_INTERVAL_SECONDS * 1000) as f64 / multiplier;
        Ok(Self {
            route,
            next_index: 0,
            ticker: Ticker::new(Duration::milliseconds(interval_ms as i64)),
        })
    }

    /// Arm the stepper unless the demo already ran to completion.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if !self.is_finished() {
            self.ticker.start(now);
        }
    }

    /// Idempotent stop.
    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// True once every waypoint has been emitted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next_index >= self.route.len()
    }

    /// Emit one waypoint per elapsed interval, stopping automatically after
    /// the final one.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<PositionFix> {
        let fires = self.ticker.poll(now);
        let mut fixes = Vec::new();
        for _ in 0..fires {
            let Some(point) = self.route.waypoint(self.next_index) else {
                break;
            };
            let heading = self
                .route
                .waypoint(self.next_index + 1)
                .map(|next| geo::bearing_degrees(point, next));
            fixes.push(PositionFix {
                coordinates: point,
                accuracy_m: Some(STEPPER_ACCURACY_M),
                heading_deg: heading,
                speed_mps: None,
                timestamp: now,
                progress: self.next_index as f32 / self.route.len() as f32,
            });
            self.next_index += 1;
            if self.is_finished() {
                self.ticker.stop();
                break;
            }
        }
        fixes
    }
}
