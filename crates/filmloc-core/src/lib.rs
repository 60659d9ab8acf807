// crates/filmloc-core/src/lib.rs

//! filmloc-core
//! ============
//!
//! Find the film shooting locations of a given year that are closest to a
//! point on Earth.
//!
//! The pipeline, leaves first:
//!
//! 1. [`loader`] / [`record`] turn `locations.list` lines into [`Record`]s.
//! 2. [`resolve`] geocodes a record's place tokens, generalizing the query
//!    (`City, Region, Country` -> `Region, Country`) until something matches.
//! 3. [`rank`] measures [`haversine`] distances, folds duplicates and keeps
//!    the closest entries.
//! 4. [`render`] writes the result as a Leaflet map (feature `json`).
//!
//! Geocoding goes through the [`Geocoder`] trait; [`geocode`] ships an
//! HTTP client for Nominatim, an offline [`Gazetteer`] and a
//! [`RateLimited`] wrapper.
//!
//! ```rust
//! use filmloc_core::{rank, Gazetteer, GeoPoint, Place, RankOptions, Record};
//!
//! let mut gazetteer = Gazetteer::new();
//! gazetteer.insert("Lviv, Ukraine", Place::new(GeoPoint::new(49.8397, 24.0297)?));
//!
//! let records = vec![Record::new("Some Film", 2010, vec!["Lviv".into(), "Ukraine".into()])];
//! let user = GeoPoint::new(49.817545, 24.023932)?;
//! let ranking = rank(records, user, &gazetteer, &RankOptions::default());
//!
//! assert_eq!(ranking.results.len(), 1);
//! assert!(ranking.results[0].distance_km < 5.0);
//! # Ok::<(), filmloc_core::GeoError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod loader;
pub mod rank;
pub mod record;
#[cfg(feature = "json")]
pub mod render;
pub mod resolve;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::{ParseStats, RankStats};
pub use crate::error::{GeoError, Result};
pub use crate::geo::{haversine, GeoPoint};
#[cfg(feature = "json")]
pub use crate::geocode::Gazetteer;
#[cfg(feature = "nominatim")]
pub use crate::geocode::{Nominatim, NominatimConfig};
pub use crate::geocode::{Place, RateLimited};
pub use crate::loader::{load_records, read_records};
pub use crate::rank::{rank, CollisionPolicy, RankOptions, Ranking, ResolvedLocation};
pub use crate::record::{parse_line, Record};
#[cfg(feature = "json")]
pub use crate::render::HtmlMapSink;
pub use crate::resolve::{resolve, ResolveOutcome, Resolved};
pub use crate::traits::{Geocoder, MapSink};
