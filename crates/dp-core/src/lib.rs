//! `dp-core` — foundational types for the `rust_dp` delivery planner.
//!
//! This crate is a dependency of every other `dp-*` crate.  It has no `dp-*`
//! dependencies and minimal external ones (`rustc-hash` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`geo`]     | `GeoCoord`, `StreetSegment`, haversine distance, bearings |
//! | [`index`]   | `ExpandingIndex` — hash index with explicit doubling      |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to coordinates and segments.|

pub mod error;
pub mod geo;
pub mod index;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{GeoCoord, StreetSegment, turn_angle};
pub use index::ExpandingIndex;
