//! Greedy downgrade of legs until a route fits its budget.

use tourplan_core::{Leg, Route};

/// Result of [`enforce_budget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetOutcome {
    /// Legs moved to their alternative during this call.
    pub legs_switched: usize,
    /// Whether the route's cost is now within the budget.
    pub budget_met: bool,
}

/// Switch legs to their alternative mode until `route` costs at most `budget`.
///
/// Legs are visited once each, cheapest time penalty per unit of money saved
/// first, with ties kept in travel order. Legs whose efficiency is zero,
/// negative or not a number are passed over, as are legs already switched.
/// The loop stops as soon as the route fits or every leg has been visited, so
/// an unreachable budget leaves the route at its lowest reachable cost with
/// `budget_met` set to `false`.
///
/// A second call on the same route and budget switches nothing.
///
/// # Examples
///
/// ```
/// use tourplan_core::{Leg, Route, TravelCost};
/// use tourplan_solver_greedy::enforce_budget;
///
/// let out = Leg::new("o".into(), "x".into(), TravelCost::new(10.0, 8.0), TravelCost::new(20.0, 2.0), 60.0);
/// let back = Leg::new("x".into(), "o".into(), TravelCost::new(10.0, 8.0), TravelCost::new(20.0, 2.0), 60.0);
/// let mut route = Route::new(vec![out, back])?;
///
/// let outcome = enforce_budget(&mut route, 12.0);
/// assert!(outcome.budget_met);
/// assert_eq!(outcome.legs_switched, 1);
/// assert_eq!(route.total_cost(), 10.0);
/// # Ok::<(), tourplan_core::RouteShapeError>(())
/// ```
pub fn enforce_budget(route: &mut Route, budget: f64) -> BudgetOutcome {
    let mut outcome = BudgetOutcome {
        legs_switched: 0,
        budget_met: route.is_within_budget(budget),
    };
    if outcome.budget_met {
        return outcome;
    }

    for index in efficiency_order(route.legs()) {
        if route.is_within_budget(budget) {
            break;
        }
        let Some(leg) = route.legs().get(index) else {
            continue;
        };
        if leg.is_switched() || !worth_switching(leg) {
            continue;
        }
        if let Some(switch) = route.switch_leg(index) {
            outcome.legs_switched += 1;
            log::debug!(
                "switched leg {index} to {}: +{} time, -{} cost",
                leg_mode(route, index),
                switch.time_added,
                switch.cost_saved
            );
        }
    }

    outcome.budget_met = route.is_within_budget(budget);
    if !outcome.budget_met {
        log::warn!(
            "budget {budget} not reachable; best cost is {} after {} switches",
            route.total_cost(),
            outcome.legs_switched
        );
    }
    outcome
}

/// Leg indices sorted by ascending efficiency, stable for equal values.
fn efficiency_order(legs: &[Leg]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..legs.len()).collect();
    order.sort_by(|&a, &b| {
        let efficiency = |index: usize| legs.get(index).map_or(f64::NAN, Leg::efficiency);
        efficiency(a).total_cmp(&efficiency(b))
    });
    order
}

fn worth_switching(leg: &Leg) -> bool {
    leg.efficiency() > 0.0
}

fn leg_mode(route: &Route, index: usize) -> String {
    route
        .legs()
        .get(index)
        .map(|leg| leg.active_transport().to_string())
        .unwrap_or_default()
}
