//! Closed tours through a set of stops.
//!
//! A [`Route`] owns its legs and keeps running totals of time and cost. The
//! only way to change a leg after construction is [`Route::switch_leg`], which
//! applies the leg's deltas to both totals in the same step.

use std::{cmp::Ordering, collections::HashSet};

use thiserror::Error;

use crate::{Leg, LegSwitch, LocationId};

/// An ordered tour that starts and ends at its origin.
///
/// Deserialising reads only the legs and rebuilds the route through
/// [`Route::new`], so stored stops and totals are never trusted.
///
/// # Examples
/// ```
/// use tourplan_core::{Leg, Route, TravelCost};
///
/// let out = Leg::new("home".into(), "park".into(), TravelCost::new(10.0, 6.0), TravelCost::new(20.0, 2.0), 40.0);
/// let back = Leg::new("park".into(), "home".into(), TravelCost::new(10.0, 6.0), TravelCost::new(20.0, 2.0), 40.0);
/// let route = Route::new(vec![out, back]).expect("closed tour");
///
/// assert_eq!(route.stops().len(), 3);
/// assert_eq!(route.total_time(), 20.0);
/// assert_eq!(route.total_cost(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RouteLegs"))]
pub struct Route {
    stops: Vec<LocationId>,
    legs: Vec<Leg>,
    total_time: f64,
    total_cost: f64,
}

/// Errors returned by [`Route::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteShapeError {
    /// No legs were supplied.
    #[error("route must contain at least one leg")]
    Empty,
    /// A leg does not start where the previous one ended.
    #[error("leg {index} starts at {found} but the previous leg ends at {expected}")]
    Disconnected {
        /// Position of the offending leg.
        index: usize,
        /// Where the previous leg ended.
        expected: LocationId,
        /// Where the offending leg starts.
        found: LocationId,
    },
    /// A location is visited twice, or the origin appears mid-tour.
    #[error("stop {index} revisits {location}")]
    Revisit {
        /// Position of the repeated location in the stop list.
        index: usize,
        /// The repeated location.
        location: LocationId,
    },
    /// The last leg does not return to the origin.
    #[error("route ends at {end} instead of returning to {origin}")]
    NotClosed {
        /// First location of the tour.
        origin: LocationId,
        /// Last location of the tour.
        end: LocationId,
    },
}

impl Route {
    /// Assemble a route from contiguous legs forming a closed tour.
    ///
    /// Totals are summed over each leg's active option.
    pub fn new(legs: Vec<Leg>) -> Result<Self, RouteShapeError> {
        let Some(first) = legs.first() else {
            return Err(RouteShapeError::Empty);
        };

        let mut stops = Vec::with_capacity(legs.len() + 1);
        stops.push(first.from().clone());
        for (index, leg) in legs.iter().enumerate() {
            if let Some(previous) = stops.last()
                && previous != leg.from()
            {
                return Err(RouteShapeError::Disconnected {
                    index,
                    expected: previous.clone(),
                    found: leg.from().clone(),
                });
            }
            stops.push(leg.to().clone());
        }

        if let (Some(origin), Some(end)) = (stops.first(), stops.last())
            && origin != end
        {
            return Err(RouteShapeError::NotClosed {
                origin: origin.clone(),
                end: end.clone(),
            });
        }

        // The final stop is the origin again; every earlier one must be new.
        let mut seen = HashSet::with_capacity(stops.len());
        for (index, stop) in stops.iter().enumerate().take(legs.len()) {
            if !seen.insert(stop) {
                return Err(RouteShapeError::Revisit {
                    index,
                    location: stop.clone(),
                });
            }
        }

        let (total_time, total_cost) = sum_active(&legs);
        Ok(Self {
            stops,
            legs,
            total_time,
            total_cost,
        })
    }

    /// Stops in visiting order, origin first and last.
    #[must_use]
    pub fn stops(&self) -> &[LocationId] {
        &self.stops
    }

    /// Legs in travel order.
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// The location the tour starts and ends at.
    #[must_use]
    pub fn origin(&self) -> Option<&LocationId> {
        self.stops.first()
    }

    /// Aggregate travel time over active options.
    #[must_use]
    pub const fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Aggregate cost over active options.
    #[must_use]
    pub const fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Whether the aggregate cost is at or below `budget`.
    #[must_use]
    pub fn is_within_budget(&self, budget: f64) -> bool {
        self.total_cost <= budget
    }

    /// Switch the leg at `index` to its alternative and update both totals.
    ///
    /// Returns `None` when the index is out of range or the leg had already
    /// switched; the route is left untouched in both cases.
    #[expect(
        clippy::float_arithmetic,
        reason = "running totals absorb each switch's deltas"
    )]
    pub fn switch_leg(&mut self, index: usize) -> Option<LegSwitch> {
        let switch = self.legs.get_mut(index)?.switch_to_alternative()?;
        self.total_time += switch.time_added;
        self.total_cost -= switch.cost_saved;
        Some(switch)
    }

    /// Order routes by aggregate time, fastest first.
    #[must_use]
    pub fn cmp_by_time(&self, other: &Self) -> Ordering {
        self.total_time.total_cmp(&other.total_time)
    }
}

/// Serialised form of a [`Route`] as read back: only the legs count.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RouteLegs {
    legs: Vec<Leg>,
}

#[cfg(feature = "serde")]
impl TryFrom<RouteLegs> for Route {
    type Error = RouteShapeError;

    fn try_from(value: RouteLegs) -> Result<Self, Self::Error> {
        Self::new(value.legs)
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "route totals are sums of leg times and costs"
)]
fn sum_active(legs: &[Leg]) -> (f64, f64) {
    legs.iter().fold((0.0, 0.0), |(time, cost), leg| {
        let active = leg.active_cost();
        (time + active.time, cost + active.cost)
    })
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "test legs derive their alternatives from the fast time"
)]
mod tests {
    use super::*;
    use crate::{TransportMode, TravelCost};
    use rstest::{fixture, rstest};

    fn leg(from: &str, to: &str, fast: (f64, f64)) -> Leg {
        Leg::new(
            from.into(),
            to.into(),
            TravelCost::new(fast.0, fast.1),
            TravelCost::new(fast.0 + 10.0, 1.0),
            fast.0 * 6.0,
        )
    }

    #[fixture]
    fn triangle() -> Route {
        Route::new(vec![
            leg("o", "x", (10.0, 8.0)),
            leg("x", "y", (5.0, 4.0)),
            leg("y", "o", (20.0, 12.0)),
        ])
        .expect("closed tour")
    }

    #[rstest]
    fn derives_stops_and_totals(triangle: Route) {
        let stops: Vec<&str> = triangle.stops().iter().map(LocationId::as_str).collect();
        assert_eq!(stops, ["o", "x", "y", "o"]);
        assert_eq!(triangle.total_time(), 35.0);
        assert_eq!(triangle.total_cost(), 24.0);
        assert_eq!(triangle.origin(), Some(&LocationId::from("o")));
    }

    #[rstest]
    fn rejects_empty_routes() {
        assert_eq!(Route::new(Vec::new()), Err(RouteShapeError::Empty));
    }

    #[rstest]
    fn rejects_disconnected_legs() {
        let err = Route::new(vec![leg("o", "x", (1.0, 1.0)), leg("y", "o", (1.0, 1.0))])
            .expect_err("gap between x and y");
        assert!(matches!(err, RouteShapeError::Disconnected { index: 1, .. }));
    }

    #[rstest]
    fn rejects_open_tours() {
        let err = Route::new(vec![leg("o", "x", (1.0, 1.0))]).expect_err("never returns");
        assert!(matches!(err, RouteShapeError::NotClosed { .. }));
    }

    #[rstest]
    #[case::loop_back_through_origin(&[("o", "x"), ("x", "o"), ("o", "x"), ("x", "o")], 2, "o")]
    #[case::repeated_stop(&[("o", "x"), ("x", "y"), ("y", "x"), ("x", "o")], 3, "x")]
    fn rejects_revisited_locations(
        #[case] hops: &[(&str, &str)],
        #[case] index: usize,
        #[case] location: &str,
    ) {
        let legs = hops
            .iter()
            .map(|&(from, to)| leg(from, to, (1.0, 1.0)))
            .collect();
        assert_eq!(
            Route::new(legs),
            Err(RouteShapeError::Revisit {
                index,
                location: location.into(),
            })
        );
    }

    #[rstest]
    fn switching_updates_both_totals(mut triangle: Route) {
        let switch = triangle.switch_leg(0).expect("leg 0 switches");
        assert_eq!(triangle.total_time(), 35.0 + switch.time_added);
        assert_eq!(triangle.total_cost(), 24.0 - switch.cost_saved);
        assert_ne!(
            triangle.legs().first().map(Leg::active_transport),
            Some(TransportMode::Fast)
        );
    }

    #[rstest]
    fn switching_twice_or_out_of_range_is_a_no_op(mut triangle: Route) {
        triangle.switch_leg(1).expect("first switch");
        let snapshot = triangle.clone();
        assert!(triangle.switch_leg(1).is_none());
        assert!(triangle.switch_leg(9).is_none());
        assert_eq!(triangle, snapshot);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[expect(clippy::float_cmp, reason = "totals are sums of whole numbers")]
    fn deserialising_rebuilds_stops_and_totals(mut triangle: Route) {
        use serde_json::json;

        triangle.switch_leg(1).expect("leg 1 switches");
        let mut value = serde_json::to_value(&triangle).expect("serialise route");
        let fields = value.as_object_mut().expect("routes serialise as objects");
        fields.insert("stops".to_owned(), json!(["o"]));
        fields.insert("total_time".to_owned(), json!(-5.0));
        fields.insert("total_cost".to_owned(), json!(-1.0));

        let restored: Route = serde_json::from_value(value).expect("legs still form a tour");
        assert_eq!(restored.stops(), triangle.stops());
        assert_eq!(restored.total_time(), triangle.total_time());
        assert_eq!(restored.total_cost(), triangle.total_cost());
        let modes = |route: &Route| -> Vec<TransportMode> {
            route.legs().iter().map(Leg::active_transport).collect()
        };
        assert_eq!(modes(&restored), modes(&triangle));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_rejects_routes_without_legs() {
        let err = serde_json::from_str::<Route>(
            r#"{"stops":["o"],"legs":[],"total_time":-5.0,"total_cost":-1.0}"#,
        )
        .expect_err("no legs");
        assert!(err.to_string().contains("at least one leg"));
    }

    #[rstest]
    fn orders_by_total_time(triangle: Route) {
        let shorter = Route::new(vec![leg("o", "x", (1.0, 1.0)), leg("x", "o", (1.0, 1.0))])
            .expect("closed tour");
        assert_eq!(shorter.cmp_by_time(&triangle), Ordering::Less);
        assert!(triangle.is_within_budget(24.0));
        assert!(!triangle.is_within_budget(23.9));
    }
}
