// crates/filmloc-core/src/rank.rs

//! # Ranking Engine
//!
//! Resolves every record, measures its distance from the user, folds
//! records that landed on the same coordinate and keeps the closest ones.

use crate::common::RankStats;
use crate::geo::GeoPoint;
use crate::record::Record;
use crate::resolve::resolve;
use crate::traits::Geocoder;
use serde::Serialize;
use std::collections::HashMap;

/// How many results a ranking keeps unless told otherwise.
pub const DEFAULT_LIMIT: usize = 10;

/// What to do when two *different* titles resolve to the exact same
/// coordinate. The same title twice at one coordinate is always folded into
/// the first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CollisionPolicy {
    /// Keep both entries on top of each other.
    #[default]
    KeepBoth,
    /// Move the newcomer north by `step_deg` times the number of entries
    /// already at that coordinate, so map markers do not overlap. Its
    /// distance is measured from the moved point.
    Offset { step_deg: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    pub limit: usize,
    pub collision: CollisionPolicy,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            collision: CollisionPolicy::default(),
        }
    }
}

/// A record pinned to a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub record: Record,
    pub point: GeoPoint,
    /// Display name reported by the geocoder.
    pub address: Option<String>,
    /// The place string that matched.
    pub query: String,
    /// Great-circle distance from the user to `point`, in kilometers.
    pub distance_km: f64,
}

impl ResolvedLocation {
    /// `"Title (Year) - address"`, falling back to the matched query.
    pub fn popup(&self) -> String {
        let place = self.address.as_deref().unwrap_or(&self.query);
        format!("{} - {}", self.record.label(), place)
    }
}

/// Closest locations first, plus what happened along the way.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub results: Vec<ResolvedLocation>,
    pub stats: RankStats,
}

/// Ranks `records` by distance from `user`.
///
/// Records are resolved one by one in the given order; ones the geocoder
/// cannot place are skipped. The result holds at most `options.limit`
/// entries in ascending distance, ties keep dataset order.
pub fn rank<G, I>(records: I, user: GeoPoint, geocoder: &G, options: &RankOptions) -> Ranking
where
    G: Geocoder + ?Sized,
    I: IntoIterator<Item = Record>,
{
    let mut stats = RankStats::default();
    let mut entries: Vec<ResolvedLocation> = Vec::new();
    // Exact coordinate -> indices into `entries`.
    let mut by_point: HashMap<(u64, u64), Vec<usize>> = HashMap::new();

    for record in records {
        stats.records += 1;
        let outcome = resolve(record.countries(), geocoder);
        stats.lookups += outcome.attempts();

        let Some(found) = outcome.into_found() else {
            stats.not_found += 1;
            log::debug!("no match for {}: {:?}", record.label(), record.countries());
            continue;
        };
        stats.resolved += 1;

        let origin = found.place.point;
        let here = by_point.get(&origin.key()).map_or(&[][..], Vec::as_slice);
        if here.iter().any(|&i| entries[i].record.same_work(&record)) {
            stats.duplicates += 1;
            continue;
        }

        let mut point = origin;
        if !here.is_empty() {
            stats.collisions += 1;
            if let CollisionPolicy::Offset { step_deg } = options.collision {
                point = free_spot(&by_point, origin, step_deg, here.len());
            }
        }

        let index = entries.len();
        by_point.entry(origin.key()).or_default().push(index);
        if point != origin {
            by_point.entry(point.key()).or_default().push(index);
        }
        entries.push(ResolvedLocation {
            distance_km: user.distance_to(&point),
            record,
            point,
            address: found.place.address,
            query: found.query,
        });
    }

    entries.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    entries.truncate(options.limit);

    log::info!(
        "ranked {} of {} records ({} unresolved, {} duplicates, {} lookups)",
        entries.len(),
        stats.records,
        stats.not_found,
        stats.duplicates,
        stats.lookups
    );

    Ranking {
        results: entries,
        stats,
    }
}

/// First of `origin` moved north by `step_deg * k` (`k = n, n + 1, ...`)
/// that no entry occupies yet.
fn free_spot(
    taken: &HashMap<(u64, u64), Vec<usize>>,
    origin: GeoPoint,
    step_deg: f64,
    n: usize,
) -> GeoPoint {
    let mut candidate = origin;
    for k in n..=n + taken.len() {
        candidate = shift_north(origin, step_deg * k as f64);
        if !taken.contains_key(&candidate.key()) {
            break;
        }
    }
    candidate
}

/// Moves `p` by `delta` degrees of latitude, southwards if north would
/// leave the valid range. The result is clamped to [-90, 90]; a delta that
/// is not a number leaves `p` where it is.
fn shift_north(p: GeoPoint, delta: f64) -> GeoPoint {
    let north = p.latitude + delta;
    let latitude = if north <= 90.0 { north } else { p.latitude - delta };
    GeoPoint::new(latitude.clamp(-90.0, 90.0), p.longitude).unwrap_or(p)
}
