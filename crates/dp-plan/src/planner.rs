//! Delivery planner: routes every leg and compiles driving directions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use dp_core::{GeoCoord, StreetSegment, turn_angle};
use dp_spatial::{BfsRouter, Router, StreetMap};

use crate::{
    Compass, CrowDistances, DeliveryCommand, DeliveryOptimizer, DeliveryRequest, NoopOptimizer,
    PlanResult, TurnDirection,
};

// ── DeliveryPlan ──────────────────────────────────────────────────────────────

/// Output of [`DeliveryPlanner::plan`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPlan {
    /// Directions for the whole tour, deliver commands included.
    pub commands: Vec<DeliveryCommand>,
    /// Sum of the routed distance of every leg, in miles.
    pub total_miles: f64,
    /// Crow-flight tour length reported by the optimiser.
    pub crow: CrowDistances,
}

impl DeliveryPlan {
    /// Number of deliver commands in the plan.
    pub fn deliveries(&self) -> usize {
        self.commands.iter().filter(|c| c.is_deliver()).count()
    }
}

// ── DeliveryPlanner ───────────────────────────────────────────────────────────

/// Compiles turn-by-turn directions for a depot and a list of stops.
///
/// # Type parameters
///
/// `R` is the point-to-point [`Router`] (default [`BfsRouter`]) and `O` the
/// [`DeliveryOptimizer`] (default [`NoopOptimizer`]).  Both are chosen at
/// compile time.
pub struct DeliveryPlanner<'m, R: Router = BfsRouter, O: DeliveryOptimizer = NoopOptimizer> {
    map:       &'m StreetMap,
    router:    R,
    optimizer: O,
}

impl<'m> DeliveryPlanner<'m> {
    pub fn new(map: &'m StreetMap) -> Self {
        Self::with_parts(map, BfsRouter, NoopOptimizer)
    }
}

impl<'m, R: Router, O: DeliveryOptimizer> DeliveryPlanner<'m, R, O> {
    pub fn with_parts(map: &'m StreetMap, router: R, optimizer: O) -> Self {
        Self { map, router, optimizer }
    }

    pub fn map(&self) -> &'m StreetMap {
        self.map
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// Plan the tour depot → each stop → depot.
    ///
    /// The stops are first reordered by the optimiser.  Every leg that ends
    /// at a stop is followed by a [`DeliveryCommand::Deliver`] for that
    /// stop's item, even if the leg itself is empty because the stop is
    /// where the driver already is.  The closing leg back to the depot gets
    /// no deliver command.
    ///
    /// # Errors
    ///
    /// [`PlanError::Route`](crate::PlanError::Route) with the first leg's
    /// `BadCoord`/`NoRoute`; later legs are not attempted.
    pub fn plan(&self, depot: &GeoCoord, deliveries: &[DeliveryRequest]) -> PlanResult<DeliveryPlan> {
        let mut ordered = deliveries.to_vec();
        let crow = self.optimizer.optimize(depot, &mut ordered);

        let mut commands = Vec::new();
        let mut total_miles = 0.0;
        let mut at = depot;

        for (leg, request) in ordered.iter().enumerate() {
            let route = self.router.route(self.map, at, &request.location)?;
            debug!(leg, item = %request.item, hops = route.hop_count(), miles = route.total_miles, "planned leg");

            total_miles += route.total_miles;
            compile_leg(&route.segments, &mut commands);
            commands.push(DeliveryCommand::deliver(request.item.as_str()));
            at = &request.location;
        }

        let back = self.router.route(self.map, at, depot)?;
        debug!(hops = back.hop_count(), miles = back.total_miles, "planned return leg");
        total_miles += back.total_miles;
        compile_leg(&back.segments, &mut commands);

        Ok(DeliveryPlan { commands, total_miles, crow })
    }
}

// ── Direction compilation ─────────────────────────────────────────────────────

/// Collapse one leg's chained segments into proceed/turn commands, appended
/// to `out`.
///
/// A stretch runs while the street name stays the same, or while the name
/// changes without a classified turn (see [`TurnDirection::classify`]).
/// Each stretch yields one `Proceed` heading along its first segment's
/// bearing, named after its first segment, covering the straight-line
/// distance from the stretch's start to its end.  A classified turn between
/// stretches yields a `Turn` onto the new street.  An empty leg yields
/// nothing.
pub fn compile_leg(segments: &[StreetSegment], out: &mut Vec<DeliveryCommand>) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let mut stretch_start = first;
    let mut last = first;

    for segment in rest {
        if segment.name != last.name {
            if let Some(direction) = TurnDirection::classify(turn_angle(last, segment)) {
                out.push(proceed(stretch_start, last));
                out.push(DeliveryCommand::Turn { direction, street: segment.name.clone() });
                stretch_start = segment;
            }
        }
        last = segment;
    }

    out.push(proceed(stretch_start, last));
}

fn proceed(first: &StreetSegment, last: &StreetSegment) -> DeliveryCommand {
    DeliveryCommand::Proceed {
        direction: Compass::from_bearing(first.bearing()),
        street:    first.name.clone(),
        miles:     first.start.distance_miles(&last.end),
    }
}
