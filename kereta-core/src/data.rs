//! Tour catalog reference data.
//!
//! The catalog (route, checkpoints, areas of interest) is read-only input
//! supplied by a data collaborator. It is parsed from JSON, validated once
//! at load time, and never mutated by the engine.
use crate::geo::{Area, Coordinate};
use crate::route::{Route, RouteError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named point of interest with an unlock radius and badge reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinate,
    #[serde(default = "Checkpoint::default_unlock_radius")]
    pub unlock_radius_m: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub region: String,
    pub badge_id: String,
}

impl Checkpoint {
    const fn default_unlock_radius() -> f64 {
        300.0
    }
}

/// Static reference data for location-based proactive suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaOfInterest {
    pub name: String,
    pub center: Coordinate,
    pub radius_km: f64,
    /// Candidate message texts; one is chosen pseudo-randomly on entry.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl AreaOfInterest {
    /// Containment region for this area.
    #[must_use]
    pub const fn area(&self) -> Area {
        Area::new(self.center, self.radius_km)
    }
}

/// Errors raised while loading or validating the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("checkpoint {id} has invalid coordinates")]
    BadCheckpoint { id: String },
    #[error("duplicate checkpoint id {id}")]
    DuplicateCheckpoint { id: String },
    #[error("checkpoint {id} has non-positive unlock radius {radius_m}")]
    BadUnlockRadius { id: String, radius_m: f64 },
    #[error("area {name} has non-positive radius {radius_km} km")]
    BadArea { name: String, radius_km: f64 },
}

/// Container for the full tour catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TourData {
    #[serde(default)]
    pub route: Route,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    pub areas: Vec<AreaOfInterest>,
}

impl TourData {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON cannot be parsed or the parsed
    /// catalog violates its invariants.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Validate catalog invariants before use.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the route is too short, a checkpoint or
    /// area carries invalid geometry, or checkpoint ids collide.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.route.len() < 2 {
            return Err(RouteError::TooShort(self.route.len()).into());
        }
        let mut seen = std::collections::HashSet::new();
        for checkpoint in &self.checkpoints {
            if !checkpoint.coordinates.is_valid() {
                return Err(CatalogError::BadCheckpoint {
                    id: checkpoint.id.clone(),
                });
            }
            if checkpoint.unlock_radius_m <= 0.0 || !checkpoint.unlock_radius_m.is_finite() {
                return Err(CatalogError::BadUnlockRadius {
                    id: checkpoint.id.clone(),
                    radius_m: checkpoint.unlock_radius_m,
                });
            }
            if !seen.insert(checkpoint.id.as_str()) {
                return Err(CatalogError::DuplicateCheckpoint {
                    id: checkpoint.id.clone(),
                });
            }
        }
        for area in &self.areas {
            if area.radius_km <= 0.0 || !area.radius_km.is_finite() {
                return Err(CatalogError::BadArea {
                    name: area.name.clone(),
                    radius_km: area.radius_km,
                });
            }
        }
        Ok(())
    }

    /// Clamp out-of-range tuning values to safe floors.
    pub fn sanitize(&mut self) {
        for checkpoint in &mut self.checkpoints {
            if !checkpoint.unlock_radius_m.is_finite() {
                checkpoint.unlock_radius_m = Checkpoint::default_unlock_radius();
            }
            checkpoint.unlock_radius_m = checkpoint
                .unlock_radius_m
                .max(crate::constants::MIN_UNLOCK_RADIUS_M);
        }
        for area in &mut self.areas {
            if !area.radius_km.is_finite() {
                area.radius_km = crate::constants::MIN_AREA_RADIUS_KM;
            }
            area.radius_km = area.radius_km.max(crate::constants::MIN_AREA_RADIUS_KM);
        }
    }

    /// Find a checkpoint by id.
    #[must_use]
    pub fn checkpoint(&self, id: &str) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|cp| cp.id == id)
    }
}
