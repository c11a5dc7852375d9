//! `dp-spatial` — street graph, record loading, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`records`] | `parse_records` — street-name / segment line format         |
//! | [`network`] | `StreetMap` (coordinate index + R-tree), `StreetMapBuilder` |
//! | [`router`]  | `Router` trait, `Route`, `BfsRouter`, `route_many`          |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | `route_many` fans searches out over Rayon.                |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `dp-core` types.     |

pub mod error;
pub mod network;
pub mod records;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use network::{StreetMap, StreetMapBuilder};
pub use records::parse_records;
pub use router::{BfsRouter, Route, Router, route_many};
