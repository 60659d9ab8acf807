//! filmloc-cli
//! ===========
//!
//! Command-line interface for the `filmloc-core` location pipeline.
//!
//! This crate primarily provides a binary (`filmloc`). The library target
//! holds its argument definitions so they can be tested and so docs.rs
//! renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install filmloc-cli
//! filmloc 2010 49.817545 24.023932 locations.list
//! ```
//!
//! This resolves every 2010 film location through OpenStreetMap Nominatim
//! (one request every three seconds), prints the ten closest to the given
//! point and writes `film_map_(2010)-(49.817545,24.023932).html`.
//!
//! Offline runs read coordinates from a JSON table instead:
//!
//! ```text
//! filmloc 2010 49.817545 24.023932 locations.list --gazetteer places.json
//! ```
//!
//! For programmatic access use the [`filmloc-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod args;
