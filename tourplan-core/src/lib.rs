//! Core domain types for the Tourplan engine.
//!
//! The crate models a budget-constrained tour: an origin, a set of stops to
//! visit exactly once, and a per-leg choice between a fast, costly transport
//! mode and a cheaper alternative. It defines the read-only cost oracle the
//! solvers query, the [`Leg`] and [`Route`] entities they produce, and the
//! [`Solver`] trait that ties a [`SolveRequest`] to a [`SolveResponse`].
//!
//! The optional `store-sqlite` feature provides a persisted cost matrix in
//! [`store`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
mod leg;
mod location;
pub mod memory;
mod mode;
mod route;
pub mod solver;
pub mod store;

pub use cost::{CostLookupError, CostOracle, CostSource, TravelCost, TravelCostRecord};
pub use leg::{Leg, LegSwitch};
pub use location::LocationId;
pub use memory::MemoryCostMatrix;
pub use mode::{ActiveMode, AltMode, ParseTransportModeError, TransportMode};
pub use route::{Route, RouteShapeError};
pub use solver::{
    Diagnostics, SolveError, SolveRequest, SolveRequestValidationError, SolveResponse, Solver,
};
#[cfg(feature = "store-sqlite")]
pub use store::{
    PersistTravelCostsError, SqliteCostSession, SqliteCostSource, SqliteCostStoreError,
    persist_travel_costs,
};
