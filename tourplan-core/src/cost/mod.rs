//! Read access to the travel cost matrix.
//!
//! The [`CostOracle`] trait answers "how long and how much" for a pair of
//! locations in a given [`TransportMode`](crate::TransportMode). Pairs are
//! unordered: an oracle must answer `(a, b)` and `(b, a)` from the same
//! entry.
//!
//! A [`CostSource`] hands out scoped oracle sessions so a solver can hold the
//! underlying connection only for the duration of one solve.

mod error;
mod oracle;
mod record;

pub use error::CostLookupError;
pub use oracle::{CostOracle, CostSource, TravelCost};
pub use record::TravelCostRecord;
