//! `dp-plan` — delivery plans and turn-by-turn directions.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`request`]   | `DeliveryRequest`, CSV loader                                 |
//! | [`command`]   | `DeliveryCommand`, `Compass`, `TurnDirection`                 |
//! | [`optimizer`] | `DeliveryOptimizer` trait, `NoopOptimizer`, `CrowDistances`   |
//! | [`planner`]   | `DeliveryPlanner`, `DeliveryPlan`, `compile_leg`              |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                                  |
//!
//! # Design notes
//!
//! A plan is built in two steps:
//!
//! 1. **Ordering**: the configured [`DeliveryOptimizer`] may permute the
//!    stops.  Its output order is used as-is.
//!
//! 2. **Legs**: depot → stop 1 → … → stop N → depot.  Each leg is routed
//!    with a [`dp_spatial::Router`] and its segments are collapsed into
//!    proceed/turn commands, followed by a deliver command for every leg
//!    that ends at a stop.  The first failing leg aborts the plan.

pub mod command;
pub mod error;
pub mod optimizer;
pub mod planner;
pub mod request;


pub use command::{Compass, DeliveryCommand, TurnDirection};
pub use error::{PlanError, PlanResult};
pub use optimizer::{CrowDistances, DeliveryOptimizer, NoopOptimizer, crow_tour_miles};
pub use planner::{DeliveryPlan, DeliveryPlanner, compile_leg};
pub use request::{DeliveryRequest, load_requests_csv, load_requests_reader};
