//! Facade crate for the Tourplan budget-aware tour planner.
//!
//! This crate re-exports the core domain types and exposes the greedy solver
//! and the SQLite cost store behind feature flags.

#![forbid(unsafe_code)]

pub use tourplan_core::{
    CostLookupError, CostOracle, CostSource, Diagnostics, Leg, LocationId, MemoryCostMatrix,
    Route, SolveError, SolveRequest, SolveRequestValidationError, SolveResponse, Solver,
    TransportMode, TravelCost, TravelCostRecord,
};

#[cfg(feature = "store-sqlite")]
pub use tourplan_core::{
    PersistTravelCostsError, SqliteCostSource, SqliteCostStoreError, persist_travel_costs,
};

#[cfg(feature = "solver-greedy")]
pub use tourplan_solver_greedy::{BudgetOutcome, GreedySolver, enforce_budget};
