//! A single hop between consecutive stops.

use crate::{ActiveMode, AltMode, LocationId, TransportMode, TravelCost};

/// One directed hop of a route with its fast mode and chosen alternative.
///
/// The alternative (bus or walk) and its `efficiency` are fixed when the leg
/// is built. Efficiency is the extra travel time paid per unit of money
/// saved by switching from the fast mode; lower values are better trades.
/// It is never recomputed, even after the leg switches.
///
/// # Examples
///
/// ```
/// use tourplan_core::{AltMode, Leg, TravelCost};
///
/// let leg = Leg::new(
///     "hotel".into(),
///     "museum".into(),
///     TravelCost::new(20.0, 10.0),
///     TravelCost::new(30.0, 4.0),
///     60.0,
/// );
/// assert_eq!(leg.alt_mode(), AltMode::Bus);
/// assert!((leg.efficiency() - 10.0 / 6.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    from: LocationId,
    to: LocationId,
    fast: TravelCost,
    alt_mode: AltMode,
    alt: TravelCost,
    efficiency: f64,
    active_mode: ActiveMode,
}

/// Time and cost deltas applied by [`Leg::switch_to_alternative`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegSwitch {
    /// Travel time added to the route.
    pub time_added: f64,
    /// Money removed from the route total.
    pub cost_saved: f64,
}

impl Leg {
    /// Build a leg in fast mode and pick its alternative.
    ///
    /// Bus is considered only when it is strictly cheaper than the fast mode
    /// and not faster than it; it wins when its efficiency is strictly lower
    /// than walking's. Walking is free, so its efficiency divides by the full
    /// fast-mode cost. A leg whose fast mode costs nothing gets an efficiency
    /// of zero because no switch can save money on it.
    #[must_use]
    pub fn new(
        from: LocationId,
        to: LocationId,
        fast: TravelCost,
        bus: TravelCost,
        walk_time: f64,
    ) -> Self {
        let (alt_mode, alt, efficiency) = choose_alternative(fast, bus, walk_time);
        log::debug!("leg {from} -> {to}: alternative {alt_mode:?} at efficiency {efficiency}");
        Self {
            from,
            to,
            fast,
            alt_mode,
            alt,
            efficiency,
            active_mode: ActiveMode::Fast,
        }
    }

    /// Departure location.
    #[must_use]
    pub const fn from(&self) -> &LocationId {
        &self.from
    }

    /// Arrival location.
    #[must_use]
    pub const fn to(&self) -> &LocationId {
        &self.to
    }

    /// Time and cost in the fast mode.
    #[must_use]
    pub const fn fast(&self) -> TravelCost {
        self.fast
    }

    /// Which cheaper mode this leg falls back to.
    #[must_use]
    pub const fn alt_mode(&self) -> AltMode {
        self.alt_mode
    }

    /// Time and cost in the alternative mode.
    #[must_use]
    pub const fn alt(&self) -> TravelCost {
        self.alt
    }

    /// Time penalty per unit of cost saved by switching.
    #[must_use]
    pub const fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Which option is in use.
    #[must_use]
    pub const fn active_mode(&self) -> ActiveMode {
        self.active_mode
    }

    /// Concrete transport mode in use, for fetching directions.
    #[must_use]
    pub fn active_transport(&self) -> TransportMode {
        match self.active_mode {
            ActiveMode::Fast => TransportMode::Fast,
            ActiveMode::Alt => self.alt_mode.into(),
        }
    }

    /// Time and cost of the option in use.
    #[must_use]
    pub const fn active_cost(&self) -> TravelCost {
        match self.active_mode {
            ActiveMode::Fast => self.fast,
            ActiveMode::Alt => self.alt,
        }
    }

    /// Whether the leg has moved to its alternative.
    #[must_use]
    pub const fn is_switched(&self) -> bool {
        matches!(self.active_mode, ActiveMode::Alt)
    }

    /// Move the leg to its alternative mode.
    ///
    /// The transition is one-way. Returns `None` if the leg was already
    /// switched; otherwise the deltas the owning route must apply to its
    /// totals.
    #[expect(
        clippy::float_arithmetic,
        reason = "switch deltas are differences of stored times and costs"
    )]
    pub fn switch_to_alternative(&mut self) -> Option<LegSwitch> {
        if self.is_switched() {
            return None;
        }
        self.active_mode = ActiveMode::Alt;
        Some(LegSwitch {
            time_added: self.alt.time - self.fast.time,
            cost_saved: self.fast.cost - self.alt.cost,
        })
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "efficiency is a ratio of time penalty to cost saving"
)]
fn choose_alternative(
    fast: TravelCost,
    bus: TravelCost,
    walk_time: f64,
) -> (AltMode, TravelCost, f64) {
    let walk = TravelCost::new(walk_time, 0.0);
    let walk_efficiency = if fast.cost > 0.0 {
        (walk_time - fast.time) / fast.cost
    } else {
        0.0
    };

    let bus_saving = fast.cost - bus.cost;
    if bus_saving > 0.0 {
        let bus_efficiency = (bus.time - fast.time) / bus_saving;
        if bus_efficiency >= 0.0 && bus_efficiency < walk_efficiency {
            return (AltMode::Bus, bus, bus_efficiency);
        }
    }

    (AltMode::Walk, walk, walk_efficiency)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare against hand-computed efficiencies"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn leg(fast: (f64, f64), bus: (f64, f64), walk_time: f64) -> Leg {
        Leg::new(
            "a".into(),
            "b".into(),
            TravelCost::new(fast.0, fast.1),
            TravelCost::new(bus.0, bus.1),
            walk_time,
        )
    }

    #[rstest]
    fn bus_wins_when_it_trades_time_for_money_more_cheaply() {
        let leg = leg((20.0, 10.0), (30.0, 4.0), 60.0);
        assert_eq!(leg.alt_mode(), AltMode::Bus);
        assert_eq!(leg.alt(), TravelCost::new(30.0, 4.0));
        assert!((leg.efficiency() - 10.0 / 6.0).abs() < 1e-9);
    }

    #[rstest]
    fn walk_wins_when_its_efficiency_is_lower() {
        // bus: 30 / 6 = 5, walk: 20 / 10 = 2
        let leg = leg((20.0, 10.0), (50.0, 4.0), 40.0);
        assert_eq!(leg.alt_mode(), AltMode::Walk);
        assert_eq!(leg.alt(), TravelCost::new(40.0, 0.0));
        assert!((leg.efficiency() - 2.0).abs() < 1e-9);
    }

    #[rstest]
    fn equal_efficiencies_fall_back_to_walking() {
        // bus: 10 / 5 = 2, walk: 20 / 10 = 2
        let leg = leg((20.0, 10.0), (30.0, 5.0), 40.0);
        assert_eq!(leg.alt_mode(), AltMode::Walk);
    }

    #[rstest]
    #[case::same_price(10.0)]
    #[case::pricier(12.0)]
    fn bus_without_saving_is_never_chosen(#[case] bus_cost: f64) {
        // Walking is terrible here, yet bus still cannot be picked.
        let leg = leg((20.0, 10.0), (21.0, bus_cost), 500.0);
        assert_eq!(leg.alt_mode(), AltMode::Walk);
        assert!(leg.efficiency().is_finite());
    }

    #[rstest]
    fn bus_faster_than_fast_mode_is_not_chosen() {
        let leg = leg((20.0, 10.0), (15.0, 4.0), 60.0);
        assert_eq!(leg.alt_mode(), AltMode::Walk);
    }

    #[rstest]
    fn free_fast_mode_has_zero_efficiency() {
        let leg = leg((20.0, 0.0), (30.0, 0.0), 60.0);
        assert_eq!(leg.alt_mode(), AltMode::Walk);
        assert_eq!(leg.efficiency(), 0.0);
    }

    #[rstest]
    fn switching_is_one_way_and_reports_deltas() {
        let mut leg = leg((20.0, 10.0), (30.0, 4.0), 60.0);
        assert_eq!(leg.active_transport(), TransportMode::Fast);

        let switch = leg.switch_to_alternative().expect("first switch applies");
        assert_eq!(
            switch,
            LegSwitch {
                time_added: 10.0,
                cost_saved: 6.0
            }
        );
        assert_eq!(leg.active_transport(), TransportMode::Bus);
        assert_eq!(leg.active_cost(), TravelCost::new(30.0, 4.0));
        assert!(leg.switch_to_alternative().is_none());
    }

    #[rstest]
    fn efficiency_is_frozen_after_switching() {
        let mut leg = leg((20.0, 10.0), (30.0, 4.0), 60.0);
        let before = leg.efficiency();
        leg.switch_to_alternative();
        assert_eq!(leg.efficiency(), before);
    }
}
