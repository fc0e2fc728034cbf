//! Continuous route simulation.
use crate::constants::{DEFAULT_TRAIN_SPEED_MPS, SIMULATOR_ACCURACY_M, SIMULATOR_TICK_SECONDS};
use crate::geo;
use crate::position::PositionFix;
use crate::route::{Route, RouteError, interpolate};
use crate::ticker::Ticker;
use chrono::{DateTime, Duration, Utc};

/// Simulated train moving along the route polyline at a configured speed.
///
/// Holds a current segment index and a fractional position along it; each
/// tick advances by `speed * Δt` meters, carrying any remainder across
/// segment boundaries. Reaching the final waypoint wraps back to the first
/// segment and resets the traveled-distance accumulator, so the train
/// re-runs the circuit indefinitely.
#[derive(Debug, Clone)]
pub struct RouteSimulator {
    route: Route,
    speed_mps: f64,
    ticker: Ticker,
    segment: usize,
    frac: f64,
    traveled_m: f64,
    total_m: f64,
}

impl RouteSimulator {
    /// Create a simulator over the route at `speed_mps`. Non-finite or
    /// non-positive speeds fall back to the default train speed.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::TooShort` for routes with fewer than two
    /// waypoints.
    pub fn new(route: Route, speed_mps: f64) -> Result<Self, RouteError> {
        if route.len() < 2 {
            return Err(RouteError::TooShort(route.len()));
        }
        let speed_mps = if speed_mps.is_finite() && speed_mps > 0.0 {
            speed_mps
        } else {
            DEFAULT_TRAIN_SPEED_MPS
        };
        let total_m = route.total_length_m();
        Ok(Self {
            route,
            speed_mps,
            ticker: Ticker::new(Duration::seconds(SIMULATOR_TICK_SECONDS)),
            segment: 0,
            frac: 0.0,
            traveled_m: 0.0,
            total_m,
        })
    }

    /// Override the tick cadence. Intended for construction time; resets
    /// the timer schedule.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.ticker = Ticker::new(interval);
        self
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.ticker.start(now);
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    #[must_use]
    pub const fn speed_mps(&self) -> f64 {
        self.speed_mps
    }

    /// Advance for every interval elapsed since the last poll, emitting one
    /// fix per interval. Returns nothing once stopped.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<PositionFix> {
        let fires = self.ticker.poll(now);
        (0..fires).map(|_| self.advance(now)).collect()
    }

    fn advance(&mut self, now: DateTime<Utc>) -> PositionFix {
        let dt_s = self.ticker.interval().num_milliseconds() as f64 / 1000.0;
        let mut remaining = self.speed_mps * dt_s;
        // Bounded hop count keeps an all-degenerate route from spinning.
        let mut hops = self.route.segment_count() * 2 + 2;
        while remaining > 0.0 && hops > 0 {
            hops -= 1;
            let len = self.route.segment_length_m(self.segment).unwrap_or(0.0);
            if !len.is_finite() || len <= f64::EPSILON {
                // Duplicate or invalid waypoints: skip the segment outright.
                self.enter_next_segment();
                continue;
            }
            let left_m = (1.0 - self.frac) * len;
            if remaining < left_m {
                self.frac += remaining / len;
                self.traveled_m += remaining;
                remaining = 0.0;
            } else {
                remaining -= left_m;
                self.traveled_m += left_m;
                self.enter_next_segment();
            }
        }
        self.emit(now)
    }

    fn enter_next_segment(&mut self) {
        self.frac = 0.0;
        self.segment += 1;
        if self.segment >= self.route.segment_count() {
            self.segment = 0;
            self.traveled_m = 0.0;
        }
    }

    fn emit(&self, now: DateTime<Utc>) -> PositionFix {
        let points = self.route.points();
        let a = points[self.segment];
        let b = points[self.segment + 1];
        let progress = if self.total_m > 0.0 {
            ((self.traveled_m / self.total_m) as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };
        PositionFix {
            coordinates: interpolate(a, b, self.frac),
            accuracy_m: Some(SIMULATOR_ACCURACY_M),
            heading_deg: Some(geo::bearing_degrees(a, b)),
            speed_mps: Some(self.speed_mps),
            timestamp: now,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 8, 0, 0).unwrap()
    }

    fn triangle() -> Route {
        Route::new(vec![
            Coordinate::new(-8.70, 115.20),
            Coordinate::new(-8.60, 115.30),
            Coordinate::new(-8.50, 115.40),
        ])
        .unwrap()
    }

    #[test]
    fn emits_nothing_before_start_or_after_stop() {
        let mut sim = RouteSimulator::new(triangle(), 11.0).unwrap();
        assert!(sim.poll(t0() + Duration::hours(1)).is_empty());

        sim.start(t0());
        sim.stop();
        assert!(sim.poll(t0() + Duration::hours(1)).is_empty());
    }

    #[test]
    fn advances_steadily_along_the_first_segment() {
        let mut sim = RouteSimulator::new(triangle(), 11.0).unwrap();
        sim.start(t0());
        let fixes = sim.poll(t0() + Duration::seconds(4));
        assert_eq!(fixes.len(), 2);
        // 11 m/s over 2 s ticks: each fix moves ~22 m further from the start.
        let start = triangle().waypoint(0).unwrap();
        let d0 = geo::distance_meters(start, fixes[0].coordinates);
        let d1 = geo::distance_meters(start, fixes[1].coordinates);
        assert!((d0 - 22.0).abs() < 1.0, "got {d0}");
        assert!((d1 - 44.0).abs() < 1.0, "got {d1}");
        assert!(fixes[0].progress < fixes[1].progress);
        assert_eq!(fixes[0].speed_mps, Some(11.0));
    }

    #[test]
    fn heading_points_toward_the_segment_end() {
        let mut sim = RouteSimulator::new(triangle(), 11.0).unwrap();
        sim.start(t0());
        let fixes = sim.poll(t0() + Duration::seconds(2));
        let heading = fixes[0].heading_deg.unwrap();
        // North-east leg of the triangle.
        assert!((0.0..90.0).contains(&heading), "got {heading}");
    }

    #[test]
    fn zero_length_segments_are_skipped() {
        let duplicate = Coordinate::new(-8.70, 115.20);
        let route = Route::new(vec![
            duplicate,
            duplicate,
            Coordinate::new(-8.60, 115.30),
        ])
        .unwrap();
        let mut sim = RouteSimulator::new(route, 11.0).unwrap();
        sim.start(t0());
        let fixes = sim.poll(t0() + Duration::seconds(2));
        assert_eq!(fixes.len(), 1);
        // Movement must have happened on the real segment.
        let moved = geo::distance_meters(duplicate, fixes[0].coordinates);
        assert!(moved > 0.0 && moved.is_finite());
    }

    #[test]
    fn wraps_back_to_the_start_and_loops() {
        // Slow the tick rate down and crank the speed so each tick covers
        // more than the whole circuit is not needed; cover it over a few
        // ticks instead.
        let route = triangle();
        let total = route.total_length_m();
        let speed = total / 10.0; // one lap every ~10 ticks of 1 s
        let mut sim = RouteSimulator::new(route.clone(), speed)
            .unwrap()
            .with_tick_interval(Duration::seconds(1));
        sim.start(t0());

        let mut visited_b = false;
        let mut wrapped = false;
        let start = route.waypoint(0).unwrap();
        let middle = route.waypoint(1).unwrap();
        for step in 1..=25 {
            let fixes = sim.poll(t0() + Duration::seconds(step));
            for fix in fixes {
                if geo::distance_meters(fix.coordinates, middle) < total / 8.0 {
                    visited_b = true;
                }
                if visited_b && geo::distance_meters(fix.coordinates, start) < total / 8.0 {
                    wrapped = true;
                }
            }
        }
        assert!(visited_b, "simulator never passed the middle waypoint");
        assert!(wrapped, "simulator never wrapped back to the start");
    }

    #[test]
    fn invalid_speed_falls_back_to_default() {
        let sim = RouteSimulator::new(triangle(), f64::NAN).unwrap();
        assert_eq!(sim.speed_mps(), DEFAULT_TRAIN_SPEED_MPS);
        let sim = RouteSimulator::new(triangle(), -3.0).unwrap();
        assert_eq!(sim.speed_mps(), DEFAULT_TRAIN_SPEED_MPS);
    }
}
