use filmloc_core::geo::EARTH_RADIUS_KM;
use filmloc_core::{
    load_records, rank, Gazetteer, GeoPoint, Geocoder, HtmlMapSink, MapSink, Place, RankOptions,
    Result,
};
use std::cell::RefCell;
use std::io::Write;

const DATASET: &str = "\
CRC: 0x5F1D4C2B  File: locations.list  Date: Fri Dec 16 00:00:00 2016

LOCATIONS LIST
==============

Far Away (2010)\t\tOuter Town, Region, Testland
Near By (2010)\t\tInner Town, Region, Testland\t(main street)
Lost (2010)\t\tAtlantis, Nowhereland
Old One (2005)\t\tInner Town, Region, Testland
";

fn user() -> GeoPoint {
    GeoPoint::new(49.0, 24.0).unwrap()
}

/// A point `km` kilometers due north of the user.
fn north_of_user(km: f64) -> GeoPoint {
    GeoPoint::new(49.0 + km / EARTH_RADIUS_KM.to_radians(), 24.0).unwrap()
}

/// Wraps a geocoder and remembers every query.
struct Recording<G> {
    inner: G,
    queries: RefCell<Vec<String>>,
}

impl<G: Geocoder> Geocoder for Recording<G> {
    fn geocode(&self, query: &str) -> Result<Option<Place>> {
        self.queries.borrow_mut().push(query.to_string());
        self.inner.geocode(query)
    }
}

fn write_dataset() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();
    file
}

#[test]
fn end_to_end_ranks_resolvable_records_by_distance() {
    let file = write_dataset();
    let (records, parse_stats) = load_records(file.path(), 2010).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(parse_stats.other_year, 1);

    let mut gazetteer = Gazetteer::new();
    gazetteer.insert("Outer Town, Region, Testland", Place::new(north_of_user(50.0)));
    gazetteer.insert("Region, Testland", Place::new(north_of_user(5.0)));
    let geocoder = Recording {
        inner: gazetteer,
        queries: RefCell::new(Vec::new()),
    };

    let ranking = rank(records, user(), &geocoder, &RankOptions::default());

    let titles: Vec<&str> = ranking.results.iter().map(|r| r.record.title()).collect();
    assert_eq!(titles, ["Near By", "Far Away"]);
    assert!((ranking.results[0].distance_km - 5.0).abs() < 1e-6);
    assert!((ranking.results[1].distance_km - 50.0).abs() < 1e-6);
    assert_eq!(ranking.results[0].query, "Region, Testland");

    assert_eq!(ranking.stats.not_found, 1);
    assert_eq!(
        *geocoder.queries.borrow(),
        [
            "Outer Town, Region, Testland",
            "Inner Town, Region, Testland",
            "Region, Testland",
            "Atlantis, Nowhereland",
        ]
    );
}

#[test]
fn gazetteer_file_drives_the_whole_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("places.json");
    std::fs::write(
        &table,
        r#"{
            "Inner Town, Region, Testland": { "lat": 49.1, "lon": 24.0, "address": "Inner Town" },
            "Outer Town, Region, Testland": [50.0, 24.0]
        }"#,
    )
    .unwrap();

    let file = write_dataset();
    let (records, _) = load_records(file.path(), 2010).unwrap();
    let gazetteer = Gazetteer::load_from_path(&table).unwrap();
    let ranking = rank(records, user(), &gazetteer, &RankOptions::default());
    assert_eq!(ranking.results.len(), 2);
    assert_eq!(ranking.results[0].popup(), "Near By (2010) - Inner Town");

    let sink = HtmlMapSink::new(dir.path());
    let path = sink.render(user(), 2010, &ranking.results).unwrap();
    assert_eq!(path.file_name().unwrap(), "film_map_(2010)-(49,24).html");
    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("Far Away (2010) - Outer Town, Region, Testland"));
}

#[test]
fn limit_caps_the_ranking() {
    let file = write_dataset();
    let (records, _) = load_records(file.path(), 2010).unwrap();
    let gazetteer: Gazetteer = [
        ("Outer Town, Region, Testland".to_string(), Place::new(north_of_user(50.0))),
        ("Inner Town, Region, Testland".to_string(), Place::new(north_of_user(5.0))),
    ]
    .into_iter()
    .collect();

    let options = RankOptions {
        limit: 1,
        ..RankOptions::default()
    };
    let ranking = rank(records, user(), &gazetteer, &options);
    assert_eq!(ranking.results.len(), 1);
    assert_eq!(ranking.results[0].record.title(), "Near By");
    assert_eq!(ranking.stats.resolved, 2);
}
