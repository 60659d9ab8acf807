// crates/filmloc-core/src/render.rs

//! # Map Output
//!
//! [`HtmlMapSink`] writes a self-contained Leaflet page: one green marker
//! for the user, one blue marker per ranked location, and a layer switch
//! for the two groups.

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::rank::ResolvedLocation;
use crate::traits::MapSink;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name for the map of `year` around `user`.
///
/// ```rust
/// use filmloc_core::render::map_file_name;
/// use filmloc_core::GeoPoint;
///
/// let user = GeoPoint::new(49.817545, 24.023932).unwrap();
/// assert_eq!(map_file_name(2010, user), "film_map_(2010)-(49.817545,24.023932).html");
/// ```
pub fn map_file_name(year: u16, user: GeoPoint) -> String {
    format!(
        "film_map_({year})-({},{}).html",
        user.latitude, user.longitude
    )
}

/// Writes Leaflet HTML maps into a directory.
#[derive(Debug, Clone)]
pub struct HtmlMapSink {
    out_dir: PathBuf,
    zoom: u8,
}

#[derive(Serialize)]
struct Marker<'a> {
    lat: f64,
    lon: f64,
    popup: &'a str,
}

impl HtmlMapSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            zoom: 2,
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Builds the page without touching the filesystem.
    pub fn to_html(&self, user: GeoPoint, year: u16, results: &[ResolvedLocation]) -> Result<String> {
        let popups: Vec<String> = results.iter().map(ResolvedLocation::popup).collect();
        let markers: Vec<Marker<'_>> = results
            .iter()
            .zip(&popups)
            .map(|(r, popup)| Marker {
                lat: r.point.latitude,
                lon: r.point.longitude,
                popup,
            })
            .collect();

        let user_json = script_safe(serde_json::to_string(&Marker {
            lat: user.latitude,
            lon: user.longitude,
            popup: "Your location",
        })?);
        let markers_json = script_safe(serde_json::to_string(&markers)?);

        Ok(PAGE_TEMPLATE
            .replace("{{TITLE}}", &format!("Film locations of {year}"))
            .replace("{{ZOOM}}", &self.zoom.to_string())
            .replace("{{USER}}", &user_json)
            .replace("{{MARKERS}}", &markers_json))
    }
}

impl MapSink for HtmlMapSink {
    fn render(&self, user: GeoPoint, year: u16, results: &[ResolvedLocation]) -> Result<PathBuf> {
        let html = self.to_html(user, year, results)?;
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(map_file_name(year, user));
        fs::write(&path, html)?;
        log::info!("map with {} markers written to {}", results.len(), path.display());
        Ok(path)
    }
}

/// Keeps a JSON literal from closing the surrounding `<script>` element.
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const user = {{USER}};
const films = {{MARKERS}};

function popup(text) {
  const div = document.createElement("div");
  div.textContent = text;
  return div;
}

const map = L.map("map").setView([user.lat, user.lon], {{ZOOM}});
L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);

const green = L.divIcon({
  className: "",
  html: '<svg width="18" height="18"><circle cx="9" cy="9" r="7" fill="#2e7d32" stroke="#ffff00" stroke-width="3"/></svg>',
  iconSize: [18, 18]
});
const you = L.layerGroup([
  L.marker([user.lat, user.lon], { icon: green }).bindPopup(popup(user.popup))
]).addTo(map);
const locations = L.layerGroup(
  films.map(f => L.marker([f.lat, f.lon]).bindPopup(popup(f.popup)))
).addTo(map);

L.control.layers(null, {
  "Your location": you,
  "The film locations": locations
}).addTo(map);
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn result(title: &str, lat: f64, lon: f64) -> ResolvedLocation {
        ResolvedLocation {
            record: Record::new(title, 2010, vec!["Somewhere".into(), "Land".into()]),
            point: GeoPoint::new(lat, lon).unwrap(),
            address: None,
            query: "Somewhere, Land".into(),
            distance_km: 1.0,
        }
    }

    #[test]
    fn file_name_follows_year_and_point() {
        let user = GeoPoint::new(-33.5, 151.25).unwrap();
        assert_eq!(map_file_name(1999, user), "film_map_(1999)-(-33.5,151.25).html");
    }

    #[test]
    fn page_embeds_every_marker() {
        let sink = HtmlMapSink::new(".");
        let user = GeoPoint::new(49.8, 24.0).unwrap();
        let html = sink
            .to_html(user, 2010, &[result("Salt", 38.9, -77.0), result("Red", 51.5, -0.1)])
            .unwrap();
        assert!(html.contains("Film locations of 2010"));
        assert!(html.contains(r#""popup":"Salt (2010) - Somewhere, Land""#));
        assert!(html.contains(r#""lat":51.5"#));
        assert!(html.contains(r#"{"lat":49.8,"lon":24.0,"popup":"Your location"}"#));
        assert!(!html.contains("{{"));
        assert!(html.contains(r##"fill="#2e7d32" stroke="#ffff00""##));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn titles_cannot_close_the_script() {
        let sink = HtmlMapSink::new(".");
        let user = GeoPoint::new(0.0, 0.0).unwrap();
        let html = sink
            .to_html(user, 2010, &[result("</script><b>x", 1.0, 1.0)])
            .unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn render_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = HtmlMapSink::new(dir.path().join("maps"));
        let user = GeoPoint::new(10.0, 20.0).unwrap();
        let path = sink.render(user, 2010, &[result("Salt", 1.0, 2.0)]).unwrap();
        assert_eq!(path, dir.path().join("maps").join("film_map_(2010)-(10,20).html"));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("Salt (2010)"));
    }
}
