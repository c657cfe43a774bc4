//! Nearest-neighbour tour construction and leg pricing.

use tourplan_core::{
    CostLookupError, CostOracle, Leg, LocationId, Route, SolveError, SolveRequestValidationError,
    TransportMode,
};

/// Order `stops` by repeatedly moving to the closest unvisited one.
///
/// Distance is fast-mode travel time; cost plays no part here. Ties go to
/// the stop listed first in `stops`. The returned tour starts and ends at
/// `origin` and lists every stop once. `stops` itself is never reordered.
///
/// Each step queries the oracle once per unvisited stop, so a tour over `n`
/// stops costs `n * (n + 1) / 2` lookups.
///
/// # Errors
///
/// Returns [`CostLookupError::NoData`] as soon as a required fast-mode entry
/// is missing.
///
/// # Examples
///
/// ```
/// use tourplan_core::{LocationId, MemoryCostMatrix, TransportMode};
/// use tourplan_solver_greedy::nearest_neighbour_tour;
///
/// let matrix = MemoryCostMatrix::new()
///     .with_entry("o", "x", TransportMode::Fast, 10.0, 5.0)
///     .with_entry("o", "y", TransportMode::Fast, 20.0, 5.0)
///     .with_entry("x", "y", TransportMode::Fast, 5.0, 5.0);
/// let stops = [LocationId::from("y"), LocationId::from("x")];
///
/// let tour = nearest_neighbour_tour(&matrix, &"o".into(), &stops)?;
/// let names: Vec<_> = tour.iter().map(LocationId::as_str).collect();
/// assert_eq!(names, ["o", "x", "y", "o"]);
/// # Ok::<(), tourplan_core::CostLookupError>(())
/// ```
pub fn nearest_neighbour_tour<'a, O>(
    oracle: &O,
    origin: &'a LocationId,
    stops: &'a [LocationId],
) -> Result<Vec<LocationId>, CostLookupError>
where
    O: CostOracle + ?Sized,
{
    let mut visited = vec![false; stops.len()];
    let mut tour = Vec::with_capacity(stops.len() + 2);
    tour.push(origin.clone());

    let mut current = origin;
    while let Some(index) = nearest_unvisited(oracle, current, stops, &visited)? {
        if let (Some(flag), Some(stop)) = (visited.get_mut(index), stops.get(index)) {
            *flag = true;
            log::debug!("nearest stop from {current} is {stop}");
            tour.push(stop.clone());
            current = stop;
        }
    }

    tour.push(origin.clone());
    Ok(tour)
}

fn nearest_unvisited<O>(
    oracle: &O,
    current: &LocationId,
    stops: &[LocationId],
    visited: &[bool],
) -> Result<Option<usize>, CostLookupError>
where
    O: CostOracle + ?Sized,
{
    let mut nearest: Option<(usize, f64)> = None;
    for (index, (stop, done)) in stops.iter().zip(visited).enumerate() {
        if *done {
            continue;
        }
        let time = oracle.cost_of(current, stop, TransportMode::Fast)?.time;
        // Strict comparison keeps the first stop on ties.
        if nearest.is_none_or(|(_, best)| time < best) {
            nearest = Some((index, time));
        }
    }
    Ok(nearest.map(|(index, _)| index))
}

/// Price one hop in every mode and pick its alternative.
///
/// # Errors
///
/// Returns [`CostLookupError::NoData`] if the fast, bus or walk entry for the
/// pair is missing.
pub fn materialise_leg<O>(
    oracle: &O,
    from: &LocationId,
    to: &LocationId,
) -> Result<Leg, CostLookupError>
where
    O: CostOracle + ?Sized,
{
    let fast = oracle.cost_of(from, to, TransportMode::Fast)?;
    let bus = oracle.cost_of(from, to, TransportMode::Bus)?;
    let walk = oracle.cost_of(from, to, TransportMode::Walk)?;
    Ok(Leg::new(from.clone(), to.clone(), fast, bus, walk.time))
}

/// Build the all-fast-mode route for `origin` and `stops`.
///
/// Combines [`nearest_neighbour_tour`] with [`materialise_leg`] for each
/// consecutive pair. Every leg starts in fast mode, so the route's totals are
/// the fast-mode sums.
///
/// # Errors
///
/// Returns [`SolveError::InvalidRequest`] when `stops` is empty and
/// [`SolveError::CostLookup`] when the oracle lacks a required entry.
pub fn construct_route<O>(
    oracle: &O,
    origin: &LocationId,
    stops: &[LocationId],
) -> Result<Route, SolveError>
where
    O: CostOracle + ?Sized,
{
    if stops.is_empty() {
        return Err(SolveRequestValidationError::EmptyStops.into());
    }

    let tour = nearest_neighbour_tour(oracle, origin, stops)?;
    let legs = tour
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(materialise_leg(oracle, from, to)),
            _ => None,
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route::new(legs)?)
}
