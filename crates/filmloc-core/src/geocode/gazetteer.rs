// crates/filmloc-core/src/geocode/gazetteer.rs
use super::Place;
use crate::error::{GeoError, Result};
use crate::geo::GeoPoint;
use crate::text::fold_key;
use crate::traits::Geocoder;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// An offline geocoder backed by a lookup table.
///
/// Keys are folded with [`fold_key`], so `"Zürich, Switzerland"` and
/// `"zurich,  switzerland"` hit the same entry. The JSON form is an object
/// whose values are either `[lat, lon]` pairs or
/// `{"lat": .., "lon": .., "address": ..}` objects:
///
/// ```json
/// {
///   "Paris, France": [48.8566, 2.3522],
///   "Lviv, Ukraine": { "lat": 49.8397, "lon": 24.0297, "address": "Lviv" }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: HashMap<String, Place>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRaw {
    Pair(f64, f64),
    Full {
        lat: f64,
        lon: f64,
        #[serde(default)]
        address: Option<String>,
    },
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, query: &str, place: Place) {
        self.places.insert(fold_key(query), place);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            GeoError::NotFound(format!("Gazetteer not found at {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: HashMap<String, EntryRaw> = serde_json::from_reader(reader)?;
        let mut gazetteer = Self::new();
        for (query, entry) in raw {
            let place = match entry {
                EntryRaw::Pair(lat, lon) => Place::new(GeoPoint::new(lat, lon)?),
                EntryRaw::Full { lat, lon, address } => Place {
                    point: GeoPoint::new(lat, lon)?,
                    address,
                },
            };
            gazetteer.insert(&query, place);
        }
        Ok(gazetteer)
    }
}

impl FromIterator<(String, Place)> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = (String, Place)>>(iter: I) -> Self {
        let mut gazetteer = Self::new();
        for (query, place) in iter {
            gazetteer.insert(&query, place);
        }
        gazetteer
    }
}

impl Geocoder for Gazetteer {
    fn geocode(&self, query: &str) -> Result<Option<Place>> {
        Ok(self.places.get(&fold_key(query)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "Paris, France": [48.8566, 2.3522],
        "Lviv, Ukraine": { "lat": 49.8397, "lon": 24.0297, "address": "Lviv, Lviv Oblast, Ukraine" }
    }"#;

    #[test]
    fn loads_both_entry_forms() {
        let g = Gazetteer::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(g.len(), 2);

        let paris = g.geocode("Paris, France").unwrap().unwrap();
        assert_eq!(paris.point, GeoPoint::new(48.8566, 2.3522).unwrap());
        assert_eq!(paris.address, None);

        let lviv = g.geocode("Lviv, Ukraine").unwrap().unwrap();
        assert_eq!(lviv.address.as_deref(), Some("Lviv, Lviv Oblast, Ukraine"));
    }

    #[test]
    fn lookups_are_folded() {
        let g = Gazetteer::from_reader(TABLE.as_bytes()).unwrap();
        assert!(g.geocode("PARIS,  france").unwrap().is_some());
        assert!(g.geocode("Atlantis").unwrap().is_none());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let bad = r#"{ "Nowhere": [123.0, 0.0] }"#;
        assert!(matches!(
            Gazetteer::from_reader(bad.as_bytes()),
            Err(GeoError::InvalidData(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Gazetteer::from_reader("[1, 2".as_bytes()),
            Err(GeoError::Json(_))
        ));
    }
}
