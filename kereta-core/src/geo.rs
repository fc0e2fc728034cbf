//! Great-circle geometry over latitude/longitude pairs.
use crate::constants::EARTH_RADIUS_M;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in degrees (-180 to 180).
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true when both components are finite and inside the valid
    /// latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Haversine distance in meters.
///
/// Returns `f64::INFINITY` when either coordinate is invalid, so proximity
/// callers degrade to "not nearby" instead of erroring.
#[must_use]
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    if !a.is_valid() || !b.is_valid() {
        return f64::INFINITY;
    }
    let (lat1, lng1) = a.to_radians();
    let (lat2, lng2) = b.to_radians();
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial compass bearing from `a` toward `b`, degrees in `[0, 360)`.
///
/// Falls back to `0.0` (due north) for invalid input.
#[must_use]
pub fn bearing_degrees(a: Coordinate, b: Coordinate) -> f64 {
    if !a.is_valid() || !b.is_valid() {
        return 0.0;
    }
    let (lat1, lng1) = a.to_radians();
    let (lat2, lng2) = b.to_radians();
    let dlng = lng2 - lng1;
    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// A circular region around a center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub center: Coordinate,
    pub radius_km: f64,
}

impl Area {
    #[must_use]
    pub const fn new(center: Coordinate, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// True when the point lies within the radius. Invalid points are
    /// infinitely far away and therefore never contained.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        distance_meters(self.center, point) <= self.radius_km * 1000.0
    }
}
