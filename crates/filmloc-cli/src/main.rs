//! filmloc — map the film locations of a year closest to you
//!
//! Usage examples
//! --------------
//!
//! - Ten closest 2010 locations to Lviv, via Nominatim
//!   $ filmloc 2010 49.817545 24.023932 locations.list
//!
//! - Offline, from a local coordinate table, five results
//!   $ filmloc 2010 49.817545 24.023932 locations.list -g places.json -n 5
//!
//! - Watch every geocoding query
//!   $ filmloc -vv 2010 49.817545 24.023932 locations.list
use anyhow::Context;
use clap::Parser;
use filmloc_cli::args::CliArgs;
use filmloc_core::{load_records, rank, GeoPoint, Geocoder, Ranking};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    if let Err(e) = args.check_dataset() {
        e.exit();
    }

    let user = GeoPoint::new(args.latitude, args.longitude)?;

    let (records, parse_stats) = load_records(&args.path_to_dataset, args.year)?;
    log::info!(
        "{} lines: {} malformed, {} without year, {} from other years",
        parse_stats.lines,
        parse_stats.malformed,
        parse_stats.no_year,
        parse_stats.other_year
    );
    if records.is_empty() {
        eprintln!("No films from {} in {}", args.year, args.path_to_dataset.display());
    }

    let geocoder = build_geocoder(&args)?;
    let ranking = rank(records, user, &geocoder, &args.rank_options());
    print_ranking(&ranking);

    if !args.no_map {
        write_map(&args, user, &ranking)?;
    }

    Ok(())
}

fn build_geocoder(args: &CliArgs) -> anyhow::Result<Box<dyn Geocoder>> {
    match &args.gazetteer {
        Some(path) => gazetteer_geocoder(path),
        None => network_geocoder(args),
    }
}

#[cfg(feature = "json")]
fn gazetteer_geocoder(path: &Path) -> anyhow::Result<Box<dyn Geocoder>> {
    let gazetteer = filmloc_core::Gazetteer::load_from_path(path)
        .with_context(|| format!("loading gazetteer {}", path.display()))?;
    log::info!("{} places in gazetteer {}", gazetteer.len(), path.display());
    Ok(Box::new(gazetteer))
}

#[cfg(not(feature = "json"))]
fn gazetteer_geocoder(path: &Path) -> anyhow::Result<Box<dyn Geocoder>> {
    anyhow::bail!("--gazetteer {} needs the `json` feature", path.display())
}

#[cfg(feature = "nominatim")]
fn network_geocoder(args: &CliArgs) -> anyhow::Result<Box<dyn Geocoder>> {
    use filmloc_core::{Nominatim, NominatimConfig, RateLimited};

    let mut config = NominatimConfig {
        user_agent: args.user_agent.clone(),
        language: args.language.clone(),
        ..NominatimConfig::default()
    };
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    let client = Nominatim::new(config).context("creating the Nominatim client")?;
    log::info!("geocoding via {} every {:?}", client.config().endpoint, args.min_delay);
    Ok(Box::new(RateLimited::new(client, args.min_delay)))
}

#[cfg(not(feature = "nominatim"))]
fn network_geocoder(_args: &CliArgs) -> anyhow::Result<Box<dyn Geocoder>> {
    anyhow::bail!("no geocoder available: pass --gazetteer or build with `nominatim`")
}

fn print_ranking(ranking: &Ranking) {
    if ranking.results.is_empty() {
        println!("No locations could be resolved.");
        return;
    }
    for (i, r) in ranking.results.iter().enumerate() {
        let place = r.address.as_deref().unwrap_or(&r.query);
        println!(
            "{:>3}. {:>9.1} km  {}  [{}]",
            i + 1,
            r.distance_km,
            r.record.label(),
            place
        );
    }
    let s = &ranking.stats;
    log::info!(
        "{} records: {} resolved, {} unresolved, {} duplicates, {} collisions, {} lookups",
        s.records,
        s.resolved,
        s.not_found,
        s.duplicates,
        s.collisions,
        s.lookups
    );
}

#[cfg(feature = "json")]
fn write_map(args: &CliArgs, user: GeoPoint, ranking: &Ranking) -> anyhow::Result<()> {
    use filmloc_core::{HtmlMapSink, MapSink};

    let sink = HtmlMapSink::new(&args.out_dir);
    let path = sink
        .render(user, args.year, &ranking.results)
        .with_context(|| format!("writing map to {}", args.out_dir.display()))?;
    println!("Map written to {}", path.display());
    Ok(())
}

#[cfg(not(feature = "json"))]
fn write_map(_args: &CliArgs, _user: GeoPoint, _ranking: &Ranking) -> anyhow::Result<()> {
    log::warn!("map output needs the `json` feature; use --no-map to silence this");
    Ok(())
}
