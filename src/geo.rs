//! Geographic primitives shared by the verification components

use serde::{Deserialize, Serialize};

/// Rectangular coverage box as `[min_lon, min_lat, max_lon, max_lat]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingRegion {
    #[must_use]
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Approximate serviceable box for the city of Córdoba
    #[must_use]
    pub const fn cordoba() -> Self {
        Self::new(-64.35, -31.52, -64.05, -31.30)
    }

    /// Check whether a coordinate pair falls inside the box (inclusive)
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}
