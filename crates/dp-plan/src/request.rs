//! Delivery requests and their CSV loader.
//!
//! # CSV format
//!
//! One row per stop, in the order the stops should be offered to the
//! optimiser.
//!
//! ```csv
//! latitude,longitude,item
//! 34.0625329,-118.4470263,Chicken tenders
//! 34.0712323,-118.4505969,B-Plate salmon
//! ```
//!
//! Coordinates keep their text exactly as written (after trimming), so they
//! must match the street map's tokens to be routable.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use dp_core::GeoCoord;

use crate::{PlanError, PlanResult};

/// An item to drop off at a coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub item:     String,
    pub location: GeoCoord,
}

impl DeliveryRequest {
    pub fn new(item: impl Into<String>, location: GeoCoord) -> Self {
        Self { item: item.into(), location }
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestRecord {
    latitude:  String,
    longitude: String,
    item:      String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load delivery requests from a CSV file.
pub fn load_requests_csv(path: &Path) -> PlanResult<Vec<DeliveryRequest>> {
    let file = std::fs::File::open(path)?;
    load_requests_reader(file)
}

/// Like [`load_requests_csv`] but accepts any `Read` source.
pub fn load_requests_reader<R: Read>(reader: R) -> PlanResult<Vec<DeliveryRequest>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    csv_reader
        .deserialize::<RequestRecord>()
        .enumerate()
        .map(|(row, result)| {
            let rec = result.map_err(|e| PlanError::Parse(e.to_string()))?;
            let location = GeoCoord::parse(&rec.latitude, &rec.longitude)
                .map_err(|e| PlanError::Parse(format!("row {}: {e}", row + 1)))?;
            Ok(DeliveryRequest { item: rec.item.trim().to_owned(), location })
        })
        .collect()
}
