//! Offline ranking example for filmloc-rs
//!
//! Runs the whole pipeline without network access: a small inline dataset,
//! a hand-filled gazetteer and a map written to the system temp directory.
//!
//! ```text
//! RUST_LOG=debug cargo run --example offline_ranking
//! ```

use filmloc_rs::{
    load_records, rank, CollisionPolicy, Gazetteer, GeoPoint, HtmlMapSink, MapSink, Place,
    RankOptions, Result,
};
use std::io::Write;

const DATASET: &str = "\
Inception (2010)\t\tParis, Ile-de-France, France
Inception (2010)\t\tTangier, Morocco
Salt (2010)\t\tWashington, District of Columbia, USA\t(exterior)
Black Swan (2010)\t\tNew York City, New York, USA
The Tourist (2010)\t\tVenice, Veneto, Italy
The Tourist (2010)\t\tParis, Ile-de-France, France
Unknown (2010)\t\tAtlantis, Nowhereland
Old Movie (1999)\t\tLviv, Ukraine
";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== filmloc offline ranking ===\n");

    let dir = std::env::temp_dir().join("filmloc-demo");
    std::fs::create_dir_all(&dir)?;
    let dataset = dir.join("locations.list");
    std::fs::File::create(&dataset)?.write_all(DATASET.as_bytes())?;

    let (records, stats) = load_records(&dataset, 2010)?;
    println!("Parsed {} records ({} lines skipped)\n", records.len(), stats.skipped());

    let mut gazetteer = Gazetteer::new();
    for (query, lat, lon) in [
        ("Ile-de-France, France", 48.8499, 2.6370),
        ("Tangier, Morocco", 35.7595, -5.8340),
        ("District of Columbia, USA", 38.9072, -77.0369),
        ("New York City, New York, USA", 40.7128, -74.0060),
        ("Venice, Veneto, Italy", 45.4408, 12.3155),
    ] {
        gazetteer.insert(query, Place::new(GeoPoint::new(lat, lon)?));
    }

    let lviv = GeoPoint::new(49.817545, 24.023932)?;
    let options = RankOptions {
        collision: CollisionPolicy::Offset { step_deg: 1e-3 },
        ..RankOptions::default()
    };
    let ranking = rank(records, lviv, &gazetteer, &options);

    for (i, r) in ranking.results.iter().enumerate() {
        println!("{:>2}. {:>8.1} km  {}", i + 1, r.distance_km, r.popup());
    }
    println!("\n{:?}", ranking.stats);

    let path = HtmlMapSink::new(&dir).render(lviv, 2010, &ranking.results)?;
    println!("\nMap: {}", path.display());

    Ok(())
}
