//! Counters reported alongside pipeline results.
//!
//! Skipped lines and unresolved records are never errors; these counts are
//! the only place where they become observable.
use serde::{Deserialize, Serialize};

/// What happened to each line while loading a dataset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines read from the file, blank ones included.
    pub lines: usize,
    /// Records kept for the requested year.
    pub parsed: usize,
    /// Lines without a tab-separated location field.
    pub malformed: usize,
    /// Lines without a `(19xx)`/`(20xx)` year token.
    pub no_year: usize,
    /// Well-formed lines for another year.
    pub other_year: usize,
}

impl ParseStats {
    pub fn skipped(&self) -> usize {
        self.malformed + self.no_year + self.other_year
    }
}

/// What happened to each record during one ranking run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankStats {
    pub records: usize,
    pub resolved: usize,
    pub not_found: usize,
    /// Same title at an already seen coordinate.
    pub duplicates: usize,
    /// Different titles sharing one coordinate.
    pub collisions: usize,
    /// Geocoder calls issued, failed ones included.
    pub lookups: usize,
}
