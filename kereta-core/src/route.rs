//! Route polyline primitives.
use crate::geo::{self, Coordinate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a route violates its shape invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route requires at least two waypoints (got {0})")]
    TooShort(usize),
}

/// Ordered sequence of waypoints; insertion order is travel order.
///
/// Consecutive points are expected to be a finite great-circle distance
/// apart; segments that are not (duplicates, invalid coordinates) are
/// skipped by consumers rather than validated away here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Route(Vec<Coordinate>);

impl Route {
    /// Build a route from waypoints in travel order.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::TooShort` when fewer than two waypoints are
    /// supplied.
    pub fn new(points: Vec<Coordinate>) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::TooShort(points.len()));
        }
        Ok(Self(points))
    }

    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Coordinate> {
        self.0.get(index).copied()
    }

    /// Number of travel segments (one fewer than the waypoint count).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Length in meters of the segment starting at `index`.
    #[must_use]
    pub fn segment_length_m(&self, index: usize) -> Option<f64> {
        let a = self.waypoint(index)?;
        let b = self.waypoint(index + 1)?;
        Some(geo::distance_meters(a, b))
    }

    /// Total route length in meters, skipping segments whose length is not
    /// finite (invalid waypoints).
    #[must_use]
    pub fn total_length_m(&self) -> f64 {
        (0..self.segment_count())
            .filter_map(|i| self.segment_length_m(i))
            .filter(|len| len.is_finite())
            .sum()
    }
}

/// Linear interpolation between two waypoints; `f` is clamped to `[0, 1]`.
///
/// Adequate for the short segments of a sightseeing route, where the
/// great-circle path and the chord are indistinguishable.
#[must_use]
pub fn interpolate(a: Coordinate, b: Coordinate, f: f64) -> Coordinate {
    let f = if f.is_finite() { f.clamp(0.0, 1.0) } else { 0.0 };
    Coordinate::new(a.lat + (b.lat - a.lat) * f, a.lng + (b.lng - a.lng) * f)
}
