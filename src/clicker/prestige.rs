//! Prestige engine: aura gain, the reboot transition and the aura tree.

use log::{debug, info};

use super::catalog::{prestige_node, PrestigeEffect, ProducerKind};
use super::state::GameState;
use crate::error::{PrestigeError, PurchaseError};

/// Lifetime earnings needed before a reboot grants anything.
pub const PRESTIGE_THRESHOLD: f64 = 1e9;

/// Aura a reboot would grant right now: `floor(sqrt(lifetime / 1e9))`,
/// at least 1 once the threshold is met.
pub fn prestige_gain(state: &GameState) -> u64 {
    if !(state.lifetime_currency >= PRESTIGE_THRESHOLD) {
        return 0;
    }
    let gain = (state.lifetime_currency / PRESTIGE_THRESHOLD).sqrt().floor();
    (gain as u64).max(1)
}

/// Sum of owned starting-bonus nodes.
pub fn starting_bonus(state: &GameState) -> f64 {
    state
        .node_effects()
        .filter_map(|e| match e {
            PrestigeEffect::StartingBonus(amount) => Some(*amount),
            _ => None,
        })
        .sum()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RebootOutcome {
    pub gain: u64,
    /// Reboot count after this one.
    pub reboots: u32,
    pub starting_bonus: f64,
}

/// Reset the run in exchange for aura. Refused with no change when the gain
/// would be zero.
///
/// Achievements, aura, purchased nodes, cosmetics and statistics survive.
pub fn reboot(state: &mut GameState) -> Result<RebootOutcome, PrestigeError> {
    let gain = prestige_gain(state);
    if gain == 0 {
        return Err(PrestigeError::NothingToGain {
            lifetime: state.lifetime_currency,
        });
    }

    state.prestige_balance = state.prestige_balance.saturating_add(gain);
    state.prestige_lifetime = state.prestige_lifetime.saturating_add(gain);
    state.reboots = state.reboots.saturating_add(1);

    state.currency = 0.0;
    state.lifetime_currency = 0.0;
    state.lifetime_clicks = 0;
    state.rate = 0.0;
    state.click_power = 1.0;
    state.producers = vec![0; ProducerKind::COUNT];
    state.upgrades.clear();
    state.buffs.clear();

    let bonus = starting_bonus(state);
    state.currency = bonus;
    state.lifetime_currency = bonus;

    info!("reboot #{} granted {} aura", state.reboots, gain);
    Ok(RebootOutcome {
        gain,
        reboots: state.reboots,
        starting_bonus: bonus,
    })
}

/// Buy an aura node with unspent aura, applying its unlock side effects once.
pub fn buy_node(state: &mut GameState, id: &str) -> Result<u64, PurchaseError> {
    let node = prestige_node(id).ok_or_else(|| PurchaseError::UnknownNode(id.to_string()))?;
    if state.has_node(id) {
        return Err(PurchaseError::AlreadyOwned);
    }
    let available = state.prestige_available();
    if node.cost > available {
        return Err(PurchaseError::InsufficientFunds {
            cost: node.cost as f64,
            available: available as f64,
        });
    }

    state.prestige_spent = state.prestige_spent.saturating_add(node.cost);
    state.prestige_nodes.push(node.id.to_string());
    match node.effect {
        PrestigeEffect::UnlockSkins(skins) => {
            for skin in skins {
                if !state.unlocked_skins.iter().any(|s| s == skin) {
                    state.unlocked_skins.push(skin.to_string());
                }
            }
        }
        PrestigeEffect::UnlockPet => state.pet_hatched = true,
        _ => {}
    }
    debug!("bought aura node {} for {}", node.id, node.cost);
    Ok(node.cost)
}

/// Whether `id` is unowned and affordable with unspent aura.
pub fn can_buy_node(state: &GameState, id: &str) -> bool {
    match prestige_node(id) {
        Some(node) => !state.has_node(id) && node.cost <= state.prestige_available(),
        None => false,
    }
}
