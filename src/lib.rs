//! Workspace root for `filmloc-rs`.
//!
//! Re-exports [`filmloc_core`] so the demos under `demos/` can be run with
//! `cargo run --example <name>` from the repository root.
pub use filmloc_core::*;
