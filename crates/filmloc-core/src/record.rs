// crates/filmloc-core/src/record.rs

//! # Record Parser
//!
//! Turns one line of a `locations.list` style dataset into a [`Record`]:
//!
//! ```text
//! Title (2010) {episode}\t\t\tLos Angeles, California, USA\t(studio)
//! ```
//!
//! The trailing parenthetical group is dropped, the first tab field holds
//! title and year, the last tab field holds the place tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Both patterns are literals, compiling them cannot fail.
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((?P<year>(?:19|20)\d{2})\)").expect("valid year pattern"));
static EPISODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(?P<episode>.*)\}").expect("valid episode pattern"));

/// Separator between place tokens in the location field.
pub const TOKEN_SEPARATOR: &str = ", ";

/// One film and the place it was shot at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    title: String,
    year: u16,
    /// `{...}` part of a series entry, without the braces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    episode: Option<String>,
    countries: Vec<String>,
}

impl Record {
    pub fn new(title: impl Into<String>, year: u16, countries: Vec<String>) -> Self {
        Self {
            title: title.into(),
            year,
            episode: None,
            countries,
        }
    }

    pub fn with_episode(mut self, episode: impl Into<String>) -> Self {
        self.episode = Some(episode.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn episode(&self) -> Option<&str> {
        self.episode.as_deref()
    }

    /// Whether `other` names the same film or the same episode of a series.
    pub fn same_work(&self, other: &Record) -> bool {
        self.title == other.title && self.year == other.year && self.episode == other.episode
    }

    /// Place tokens in the order they were written, most specific first.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// `"Title (Year)"` or `"Title (Year) {Episode}"`, used on map markers.
    pub fn label(&self) -> String {
        match &self.episode {
            Some(episode) => format!("{} ({}) {{{}}}", self.title, self.year, episode),
            None => format!("{} ({})", self.title, self.year),
        }
    }
}

/// Why a line did not produce a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Blank, or no tab separated location field.
    Malformed,
    /// No `(19xx)`/`(20xx)` token in the title field.
    NoYear,
    /// A film from another year.
    YearMismatch(u16),
}

/// Parses `line`, keeping it only if it belongs to `filter_year`.
///
/// # Examples
///
/// ```rust
/// use filmloc_core::record::parse_line;
///
/// let rec = parse_line("Inception (2010)\tX\tUSA, California, Los Angeles", 2010).unwrap();
/// assert_eq!(rec.title(), "Inception");
/// assert_eq!(rec.countries(), ["USA", "California", "Los Angeles"]);
///
/// assert!(parse_line("Inception (2010)\tX\tUSA", 2005).is_none());
/// assert!(parse_line("", 2010).is_none());
/// ```
pub fn parse_line(line: &str, filter_year: u16) -> Option<Record> {
    parse_line_detailed(line, filter_year).ok()
}

/// Like [`parse_line`], but reports why a line was skipped.
pub fn parse_line_detailed(line: &str, filter_year: u16) -> Result<Record, SkipReason> {
    let line = strip_trailing_group(line.trim());

    let (title_and_year, rest) = line.split_once('\t').ok_or(SkipReason::Malformed)?;
    let location = rest.rsplit('\t').next().ok_or(SkipReason::Malformed)?;

    let caps = YEAR_RE
        .captures(title_and_year)
        .ok_or(SkipReason::NoYear)?;
    let year: u16 = caps["year"].parse().map_err(|_| SkipReason::NoYear)?;
    if year != filter_year {
        return Err(SkipReason::YearMismatch(year));
    }

    let countries: Vec<String> = location
        .split(TOKEN_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if countries.is_empty() {
        return Err(SkipReason::Malformed);
    }

    // Title before the year token, episode (if any) after it.
    let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
    let title = title_and_year[..start].trim();
    let record = Record::new(title, year, countries);

    match EPISODE_RE.captures(&title_and_year[end..]) {
        Some(ep) => Ok(record.with_episode(ep["episode"].trim())),
        None => Ok(record),
    }
}

/// Drops a trailing `(...)` group such as `(on location)`.
fn strip_trailing_group(line: &str) -> &str {
    if !line.ends_with(')') {
        return line;
    }
    match line.rfind('(') {
        Some(open) => line[..open].trim_end(),
        None => line,
    }
}
