// crates/filmloc-core/src/geocode/mod.rs

//! # Geocoders
//!
//! Implementations of [`Geocoder`](crate::traits::Geocoder):
//!
//! - [`RateLimited`] wraps any geocoder and spaces calls out in time.
//! - [`Nominatim`] asks the OpenStreetMap search API (feature `nominatim`).
//! - [`Gazetteer`] answers from a local JSON table (feature `json`).

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

mod rate_limit;
pub use rate_limit::RateLimited;

#[cfg(feature = "json")]
mod gazetteer;
#[cfg(feature = "json")]
pub use gazetteer::Gazetteer;

#[cfg(feature = "nominatim")]
mod nominatim;
#[cfg(feature = "nominatim")]
pub use nominatim::{Nominatim, NominatimConfig, DEFAULT_ENDPOINT};

/// One geocoding match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub point: GeoPoint,
    /// The provider's display name, when it has one.
    pub address: Option<String>,
}

impl Place {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            point,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
