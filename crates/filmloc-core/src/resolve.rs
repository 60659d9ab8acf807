// crates/filmloc-core/src/resolve.rs

//! # Location Resolver
//!
//! Place strings from the dataset are often too specific for a geocoder
//! (`"Stage 5, Warner Brothers Burbank Studios, Burbank, California, USA"`).
//! The resolver drops the most specific token until the service finds a
//! match, but never goes down to a single bare token: `"USA"` alone matches
//! too broadly and `"Georgia"` is ambiguous.

use crate::geocode::Place;
use crate::record::TOKEN_SEPARATOR;
use crate::traits::Geocoder;

/// Fewest tokens a query may consist of.
pub const MIN_QUERY_TOKENS: usize = 2;

/// A successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub place: Place,
    /// The query that matched.
    pub query: String,
    /// Geocoder calls spent, the successful one included.
    pub attempts: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Found(Resolved),
    NotFound { attempts: usize },
}

impl ResolveOutcome {
    pub fn attempts(&self) -> usize {
        match self {
            ResolveOutcome::Found(r) => r.attempts,
            ResolveOutcome::NotFound { attempts } => *attempts,
        }
    }

    pub fn into_found(self) -> Option<Resolved> {
        match self {
            ResolveOutcome::Found(r) => Some(r),
            ResolveOutcome::NotFound { .. } => None,
        }
    }
}

/// Queries to try for `tokens`, most specific first.
///
/// ```rust
/// use filmloc_core::resolve::fallback_queries;
///
/// let tokens: Vec<String> = ["Burbank", "California", "USA"].map(String::from).to_vec();
/// let queries: Vec<String> = fallback_queries(&tokens).collect();
/// assert_eq!(queries, ["Burbank, California, USA", "California, USA"]);
/// ```
pub fn fallback_queries(tokens: &[String]) -> impl Iterator<Item = String> + '_ {
    (0..tokens.len())
        .take_while(move |&skip| tokens.len() - skip >= MIN_QUERY_TOKENS)
        .map(move |skip| tokens[skip..].join(TOKEN_SEPARATOR))
}

/// Resolves `tokens` to a coordinate, generalizing the query on each miss.
///
/// Stops at the first match. A geocoder error counts as a miss for that
/// query; timing between calls is the geocoder's business.
pub fn resolve<G: Geocoder + ?Sized>(tokens: &[String], geocoder: &G) -> ResolveOutcome {
    let mut attempts = 0;
    for query in fallback_queries(tokens) {
        attempts += 1;
        match geocoder.geocode(&query) {
            Ok(Some(place)) => {
                log::debug!("{query:?} -> {}", place.point);
                return ResolveOutcome::Found(Resolved {
                    place,
                    query,
                    attempts,
                });
            }
            Ok(None) => log::debug!("{query:?} -> no match"),
            Err(e) => log::warn!("{query:?} -> lookup failed: {e}"),
        }
    }
    ResolveOutcome::NotFound { attempts }
}
