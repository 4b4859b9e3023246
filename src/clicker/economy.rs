//! Economy engine: producer cost curve, affordability and atomic purchases.

use log::debug;

use super::achievements::requirement_met;
use super::catalog::{catalog, PrestigeEffect, ProducerKind};
use super::state::{BulkBuy, GameState};
use crate::error::PurchaseError;

/// Each owned unit raises the next unit's price by this factor.
pub const COST_GROWTH: f64 = 1.15;
/// Discounts never take more than half off.
pub const MIN_DISCOUNT_FACTOR: f64 = 0.5;
/// Upper bound on the max-affordable scan.
pub const MAX_AFFORDABLE_SCAN: u32 = 10_000;
/// Most units of one producer a save may hold or a purchase may reach.
pub const MAX_OWNED: u32 = 1_000_000;

/// Price factor from owned cost-discount nodes: `1 − Σ pct`, floored at 0.5.
pub fn discount_factor(state: &GameState) -> f64 {
    let total: f64 = state
        .node_effects()
        .filter_map(|e| match e {
            PrestigeEffect::CostDiscount(pct) => Some(*pct),
            _ => None,
        })
        .sum();
    (1.0 - total).max(MIN_DISCOUNT_FACTOR)
}

/// Price of the unit bought when `owned` are already owned.
pub fn unit_cost(kind: ProducerKind, owned: u32, discount: f64) -> f64 {
    (kind.base_cost() * COST_GROWTH.powf(f64::from(owned)) * discount).ceil()
}

/// Total price of `quantity` units starting from `owned`.
pub fn cost_of(kind: ProducerKind, owned: u32, quantity: u32, discount: f64) -> f64 {
    (0..quantity)
        .map(|n| unit_cost(kind, owned.saturating_add(n), discount))
        .sum()
}

/// Cost of buying `quantity` more of `kind` for this state.
pub fn producer_cost(state: &GameState, kind: ProducerKind, quantity: u32) -> f64 {
    cost_of(kind, state.owned(kind), quantity, discount_factor(state))
}

/// How many units fit in `budget`, scanning greedily up to
/// [`MAX_AFFORDABLE_SCAN`]. Returns at least 1 even when nothing is
/// affordable; the purchase itself still checks funds.
pub fn max_affordable(kind: ProducerKind, owned: u32, budget: f64, discount: f64) -> u32 {
    let mut spent = 0.0;
    let mut count = 0u32;
    while count < MAX_AFFORDABLE_SCAN {
        let next = unit_cost(kind, owned.saturating_add(count), discount);
        if spent + next > budget {
            break;
        }
        spent += next;
        count += 1;
    }
    count.max(1)
}

/// Turn the bulk-buy selector into a concrete quantity for `kind`.
pub fn resolve_quantity(state: &GameState, kind: ProducerKind, bulk: BulkBuy) -> u32 {
    match bulk {
        BulkBuy::Count(n) => n.max(1),
        BulkBuy::Max => max_affordable(kind, state.owned(kind), state.currency, discount_factor(state)),
    }
}

/// A completed producer purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct ProducerPurchase {
    pub kind: ProducerKind,
    pub quantity: u32,
    pub cost: f64,
    /// True when these were the first units of this producer owned.
    pub first: bool,
}

/// Buy `quantity` units of `kind`. On any error the state is untouched.
pub fn purchase_producer(
    state: &mut GameState,
    kind: ProducerKind,
    quantity: u32,
) -> Result<ProducerPurchase, PurchaseError> {
    if quantity == 0 {
        return Err(PurchaseError::InvalidQuantity);
    }
    let total = state
        .owned(kind)
        .checked_add(quantity)
        .filter(|&n| n <= MAX_OWNED)
        .ok_or(PurchaseError::LimitReached { limit: MAX_OWNED })?;
    let cost = producer_cost(state, kind, quantity);
    if cost > state.currency {
        return Err(PurchaseError::InsufficientFunds {
            cost,
            available: state.currency,
        });
    }
    let first = state.owned(kind) == 0;
    state.currency -= cost;
    state.producers[kind.index()] = total;
    debug!("bought {} x{} for {}", kind.id(), quantity, cost);
    Ok(ProducerPurchase {
        kind,
        quantity,
        cost,
        first,
    })
}

/// Buy upgrade `id` once its unlock requirement is met. Returns the price paid.
pub fn purchase_upgrade(state: &mut GameState, id: u32) -> Result<f64, PurchaseError> {
    let up = catalog()
        .upgrade(id)
        .ok_or(PurchaseError::UnknownUpgrade(id))?;
    if state.has_upgrade(id) {
        return Err(PurchaseError::AlreadyOwned);
    }
    if !requirement_met(state, &up.requirement) {
        return Err(PurchaseError::Locked);
    }
    if up.cost > state.currency {
        return Err(PurchaseError::InsufficientFunds {
            cost: up.cost,
            available: state.currency,
        });
    }
    state.currency -= up.cost;
    state.upgrades.push(id);
    debug!("bought upgrade {} ({}) for {}", id, up.name, up.cost);
    Ok(up.cost)
}

/// Whether the upgrade is unlocked, unowned and affordable right now.
pub fn can_buy_upgrade(state: &GameState, id: u32) -> bool {
    match catalog().upgrade(id) {
        Some(up) => {
            !state.has_upgrade(id)
                && requirement_met(state, &up.requirement)
                && up.cost <= state.currency
        }
        None => false,
    }
}
