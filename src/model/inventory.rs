// src/model/inventory.rs

use crate::model::decision::{Decision, DECISION_LEN};
use serde::{Deserialize, Serialize};

/// What happens to units a period fails to sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarryoverPolicy {
    /// Unsold units stay on hand and join the next period's available pool.
    #[default]
    CarryForward,
    /// Each period may only sell its own slice of the purchase.
    Discard,
}

/// Stock position over one trial of the selling horizon.
#[derive(Debug, Clone)]
pub struct InventoryPosition {
    pub on_hand: u32,
}

impl InventoryPosition {
    pub fn new(initial: u32) -> Self {
        Self { on_hand: initial }
    }

    /// Sells into one period's demand while protecting `reserve` units
    /// for later periods.
    ///
    /// Returns the number of units sold.
    pub fn sell(&mut self, demand: u32, reserve: u32) -> u32 {
        let available = self.on_hand.saturating_sub(reserve);
        let sold = available.min(demand);

        self.on_hand -= sold;
        sold
    }
}

/// Per-period units sold for a feasible decision facing one demand sample.
///
/// The decision must already have passed `Decision::is_feasible`.
pub fn units_sold(
    decision: &Decision,
    demand: &[u32; DECISION_LEN],
    policy: CarryoverPolicy,
) -> [u32; DECISION_LEN] {
    let reserves = decision.reserves().map(clamp_units);
    let mut sold = [0u32; DECISION_LEN];

    match policy {
        CarryoverPolicy::CarryForward => {
            let mut position = InventoryPosition::new(clamp_units(decision.purchase));
            for period in 0..DECISION_LEN {
                sold[period] = position.sell(demand[period], reserves[period]);
            }
        }
        CarryoverPolicy::Discard => {
            // Slice for period t is what was released between reserve t-1 and t.
            let mut released_from = clamp_units(decision.purchase);
            for period in 0..DECISION_LEN {
                let slice = released_from.saturating_sub(reserves[period]);
                sold[period] = slice.min(demand[period]);
                released_from = reserves[period];
            }
        }
    }

    sold
}

/// Sales revenue of one trial: `sum_t price[t] * sold[t]`.
pub fn trial_revenue(prices: &[f64; DECISION_LEN], sold: &[u32; DECISION_LEN]) -> f64 {
    prices
        .iter()
        .zip(sold.iter())
        .map(|(price, &units)| price * units as f64)
        .sum()
}

fn clamp_units(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sell_respects_reserve() {
        let mut position = InventoryPosition::new(100);
        let sold = position.sell(80, 50);
        assert_eq!(sold, 50);
        assert_eq!(position.on_hand, 50);
    }

    #[test]
    fn test_sell_limited_by_demand() {
        let mut position = InventoryPosition::new(100);
        assert_eq!(position.sell(20, 50), 20);
        assert_eq!(position.on_hand, 80);
    }

    #[test]
    fn test_sell_with_reserve_above_stock() {
        let mut position = InventoryPosition::new(10);
        assert_eq!(position.sell(5, 30), 0);
        assert_eq!(position.on_hand, 10);
    }

    #[test]
    fn test_carry_forward_moves_unsold_units() {
        // Period 1 sells 10 of 50 released; the other 40 roll into period 2.
        let decision = Decision::new(100, 50, 30);
        let sold = units_sold(&decision, &[10, 100, 100], CarryoverPolicy::CarryForward);
        assert_eq!(sold, [10, 60, 30]);
    }

    #[test]
    fn test_discard_sells_only_own_slice() {
        let decision = Decision::new(100, 50, 30);
        let sold = units_sold(&decision, &[10, 100, 100], CarryoverPolicy::Discard);
        assert_eq!(sold, [10, 20, 30]);
    }

    #[test]
    fn test_policies_agree_when_demand_clears_every_slice() {
        let decision = Decision::new(80, 40, 15);
        let demand = [1_000, 1_000, 1_000];
        assert_eq!(
            units_sold(&decision, &demand, CarryoverPolicy::CarryForward),
            units_sold(&decision, &demand, CarryoverPolicy::Discard)
        );
    }

    #[test]
    fn test_zero_purchase_sells_nothing() {
        let decision = Decision::new(0, 0, 0);
        let sold = units_sold(&decision, &[500, 500, 500], CarryoverPolicy::CarryForward);
        assert_eq!(sold, [0, 0, 0]);
    }

    #[test]
    fn test_trial_revenue() {
        let revenue = trial_revenue(&[100.0, 300.0, 400.0], &[10, 20, 30]);
        assert_eq!(revenue, 1_000.0 + 6_000.0 + 12_000.0);
    }
}
