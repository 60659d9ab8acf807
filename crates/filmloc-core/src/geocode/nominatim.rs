// crates/filmloc-core/src/geocode/nominatim.rs
use super::Place;
use crate::error::{GeoError, Result};
use crate::geo::GeoPoint;
use crate::traits::Geocoder;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Settings for the [`Nominatim`] client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Search endpoint; point this at a self-hosted instance if you have one.
    pub endpoint: String,
    /// Sent as `User-Agent`. The public instance rejects anonymous clients.
    pub user_agent: String,
    /// Preferred language of returned addresses (`accept-language`).
    pub language: String,
    pub timeout: Duration,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: "filmloc".to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// OpenStreetMap Nominatim search client.
///
/// Always asks for exactly one (the best) match. It does no rate limiting on
/// its own; wrap it in [`RateLimited`](super::RateLimited) before pointing it
/// at the public service.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    config: NominatimConfig,
}

/// The part of a `/search?format=jsonv2` hit we use.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl Nominatim {
    pub fn new(config: NominatimConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &NominatimConfig {
        &self.config
    }
}

impl Geocoder for Nominatim {
    fn geocode(&self, query: &str) -> Result<Option<Place>> {
        log::debug!("nominatim: {query:?}");
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", "1"),
                ("accept-language", self.config.language.as_str()),
            ])
            .send()?
            .error_for_status()?;

        let hits: Vec<SearchHit> = serde_json::from_reader(response)?;
        hits.into_iter().next().map(hit_to_place).transpose()
    }
}

fn hit_to_place(hit: SearchHit) -> Result<Place> {
    let parse = |s: &str, what: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| GeoError::InvalidData(format!("nominatim returned {what} {s:?}")))
    };
    let point = GeoPoint::new(parse(&hit.lat, "latitude")?, parse(&hit.lon, "longitude")?)?;
    Ok(Place {
        point,
        address: hit.display_name,
    })
}
