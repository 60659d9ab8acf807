// crates/filmloc-core/src/loader/mod.rs

//! # Dataset Loader
//!
//! Handles the Physical Layer (I/O, Decompression, Encoding) and delegates
//! each line to the [`record`](crate::record) parser.

use crate::common::ParseStats;
use crate::error::Result;
use crate::record::{parse_line_detailed, Record, SkipReason};
use std::io::BufRead;
use std::path::Path;

mod common_io;

pub use common_io::open_stream;

/// Loads every record of `filter_year` from the dataset at `path`.
pub fn load_records(path: impl AsRef<Path>, filter_year: u16) -> Result<(Vec<Record>, ParseStats)> {
    let path = path.as_ref();
    let reader = open_stream(path)?;
    let (records, stats) = read_records(reader, filter_year)?;
    log::info!(
        "{}: {} records for {} ({} of {} lines skipped)",
        path.display(),
        stats.parsed,
        filter_year,
        stats.skipped(),
        stats.lines
    );
    Ok((records, stats))
}

/// Parses records from any buffered reader.
///
/// Lines are split on `\n` and decoded lossily, so Latin-1 bytes in the
/// upstream list end up as replacement characters instead of aborting the
/// whole read.
pub fn read_records<R: BufRead>(mut reader: R, filter_year: u16) -> Result<(Vec<Record>, ParseStats)> {
    let mut records = Vec::new();
    let mut stats = ParseStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        match parse_line_detailed(&line, filter_year) {
            Ok(record) => {
                stats.parsed += 1;
                records.push(record);
            }
            Err(SkipReason::Malformed) => stats.malformed += 1,
            Err(SkipReason::NoYear) => stats.no_year += 1,
            Err(SkipReason::YearMismatch(_)) => stats.other_year += 1,
        }
    }

    Ok((records, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const SAMPLE: &str = "\
LOCATIONS LIST
==============

Inception (2010)\t\tLos Angeles, California, USA
Inception (2010)\t\tParis, France\t(bridge scene)
Batman Begins (2005)\t\tChicago, Illinois, USA
Untitled (????)\t\tNowhere
";

    #[test]
    fn counts_every_kind_of_line() {
        let (records, stats) = read_records(Cursor::new(SAMPLE), 2010).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].countries(), ["Paris", "France"]);
        assert_eq!(
            stats,
            ParseStats {
                lines: 7,
                parsed: 2,
                malformed: 3,
                no_year: 1,
                other_year: 1,
            }
        );
        assert_eq!(stats.skipped(), 5);
    }

    #[test]
    fn latin1_bytes_do_not_abort_the_read() {
        let bytes: &[u8] = b"Am\xe9lie (2001)\t\tParis, France\nOther (2001)\t\tNice, France\n";
        let (records, stats) = read_records(Cursor::new(bytes), 2001).unwrap();
        assert_eq!(stats.parsed, 2);
        assert!(records[0].title().starts_with("Am"));
        assert_eq!(records[1].title(), "Other");
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let (records, _) = read_records(Cursor::new("A (2010)\tRome, Italy"), 2010).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let (records, stats) = load_records(file.path(), 2005).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Batman Begins");
        assert_eq!(stats.other_year, 2);
    }
}
