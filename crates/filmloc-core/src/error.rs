// crates/filmloc-core/src/error.rs

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Per-record problems (unparsable lines, places the geocoder cannot match)
/// are not errors; they are counted in [`crate::ParseStats`] and
/// [`crate::RankStats`] instead.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A dataset or gazetteer file could not be opened.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "nominatim")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;
