// crates/filmloc-core/src/geo.rs

//! # Coordinates and Distance
//!
//! [`GeoPoint`] is a validated WGS84 coordinate; [`haversine`] is the
//! great-circle distance used for ranking.

use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Builds a point, rejecting latitudes outside `[-90, 90]`, longitudes
    /// outside `[-180, 180]` and non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidData(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidData(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to `other` in kilometers.
    #[inline]
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Bit-exact key, used to detect records sharing a coordinate.
    pub(crate) fn key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Great-circle distance in kilometers between two points given in decimal
/// degrees.
///
/// # Examples
///
/// ```rust
/// use filmloc_core::geo::haversine;
///
/// // Lviv -> Kyiv is roughly 470 km.
/// let d = haversine(49.8397, 24.0297, 50.4501, 30.5234);
/// assert!((d - 467.0).abs() < 10.0);
/// ```
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    c * EARTH_RADIUS_KM
}
