// crates/filmloc-core/src/traits.rs
use crate::error::Result;
use crate::geo::GeoPoint;
use crate::geocode::Place;
use crate::rank::ResolvedLocation;
use std::path::PathBuf;

/// A forward geocoding capability: place string in, best match out.
///
/// `Ok(None)` means the service answered but found nothing; `Err` means the
/// service could not be asked (network, malformed response, ...). Callers in
/// this crate treat both as "no match" for the query at hand.
///
/// Methods take `&self` so one geocoder can be shared by the whole pipeline;
/// implementations that need state (rate limits, call logs) keep it in
/// `Cell`/`RefCell`. Lookups are strictly sequential, so no `Sync` bound.
///
/// # Examples
/// ```rust
/// use filmloc_core::traits::Geocoder;
/// use filmloc_core::{GeoPoint, Place, Result};
///
/// struct Everywhere;
/// impl Geocoder for Everywhere {
///     fn geocode(&self, _query: &str) -> Result<Option<Place>> {
///         Ok(Some(Place::new(GeoPoint::new(0.0, 0.0)?)))
///     }
/// }
///
/// assert!(Everywhere.geocode("Null Island").unwrap().is_some());
/// ```
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<Place>>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> Result<Option<Place>> {
        (**self).geocode(query)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str) -> Result<Option<Place>> {
        (**self).geocode(query)
    }
}

/// Consumer of a finished ranking, e.g. a map file writer.
///
/// Produces one artifact per `(year, user)` pair and returns where it went.
pub trait MapSink {
    fn render(&self, user: GeoPoint, year: u16, results: &[ResolvedLocation]) -> Result<PathBuf>;
}
