//! Delivery-order optimisation seam.
//!
//! The planner hands its stops to a [`DeliveryOptimizer`] before routing
//! any legs.  Optimisers receive a mutable *slice*, so they can permute the
//! stops but never add or drop one.

use serde::{Deserialize, Serialize};

use dp_core::GeoCoord;

use crate::DeliveryRequest;

/// Crow-flight length of the depot → stops → depot tour, before and after
/// the optimiser ran.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrowDistances {
    pub before: f64,
    pub after:  f64,
}

/// Pluggable stop-ordering strategy.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a planner can be shared across
/// threads.
pub trait DeliveryOptimizer: Send + Sync {
    /// Reorder `deliveries` in place and report tour lengths in miles.
    fn optimize(&self, depot: &GeoCoord, deliveries: &mut [DeliveryRequest]) -> CrowDistances;
}

/// A [`DeliveryOptimizer`] that keeps the given order.
///
/// `before` and `after` are both the crow-flight length of that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOptimizer;

impl DeliveryOptimizer for NoopOptimizer {
    fn optimize(&self, depot: &GeoCoord, deliveries: &mut [DeliveryRequest]) -> CrowDistances {
        let miles = crow_tour_miles(depot, deliveries);
        CrowDistances { before: miles, after: miles }
    }
}

/// Sum of straight-line distances depot → stop 1 → … → stop N → depot.
pub fn crow_tour_miles(depot: &GeoCoord, deliveries: &[DeliveryRequest]) -> f64 {
    let mut total = 0.0;
    let mut at = depot;
    for d in deliveries {
        total += at.distance_miles(&d.location);
        at = &d.location;
    }
    total + at.distance_miles(depot)
}
