//! Greedy budget-aware tour solver for Tourplan.
//!
//! This crate provides [`GreedySolver`], the default implementation of the
//! [`Solver`](tourplan_core::Solver) trait. It builds a single tour with the
//! nearest-neighbour heuristic on fast-mode travel times, prices every leg in
//! each mode, then downgrades the legs that trade time for money most cheaply
//! until the route fits the budget or no leg is left to switch.
//!
//! The pieces are exposed separately ([`nearest_neighbour_tour`],
//! [`materialise_leg`], [`construct_route`], [`enforce_budget`]) so callers can
//! reuse them with their own oracle or route.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod budget;
mod construct;
mod counting;
mod solver;

pub use budget::{BudgetOutcome, enforce_budget};
pub use construct::{construct_route, materialise_leg, nearest_neighbour_tour};
pub use solver::GreedySolver;
