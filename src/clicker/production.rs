//! Production calculator: emojis per second and per click.
//!
//! Pure functions of [`GameState`]. The only side effects are the cached
//! `rate`/`best_rate` written by [`refresh_rate`] and the balance credited by
//! [`accrue`].

use super::buffs;
use super::catalog::{catalog, PrestigeEffect, ProducerKind, UpgradeEffect};
use super::state::{BuffKind, GameState};
use crate::random::RandomSource;

/// Built-in production bonus per earned achievement.
pub const ACHIEVEMENT_BASE_PCT: f64 = 0.001;
/// Production and click bonus per point of aura.
pub const AURA_PCT: f64 = 0.01;

/// Every factor that went into the current rate, for stats display and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct RateBreakdown {
    /// Sum of producer output after per-producer multipliers and synergy.
    pub producers: f64,
    pub upgrade_global: f64,
    /// Upgrade-defined achievement scaling times the built-in bonus.
    pub achievements: f64,
    pub aura: f64,
    pub buffs: f64,
    pub total: f64,
}

fn achievement_doubler(state: &GameState) -> f64 {
    if state
        .node_effects()
        .any(|e| matches!(e, PrestigeEffect::AchievementDoubler))
    {
        2.0
    } else {
        1.0
    }
}

/// Multiplier from the aura balance alone.
pub fn aura_factor(state: &GameState) -> f64 {
    1.0 + state.prestige_balance as f64 * AURA_PCT
}

/// Output of one producer line: base × count × tier multipliers × (1 + synergy).
pub fn producer_output(state: &GameState, kind: ProducerKind) -> f64 {
    let count = state.owned(kind);
    if count == 0 {
        return 0.0;
    }
    let cat = catalog();
    let mut mult = 1.0;
    let mut synergy = 0.0;
    for up in state.upgrades.iter().filter_map(|&id| cat.upgrade(id)) {
        match up.effect {
            UpgradeEffect::ProducerMultiplier { target, mult: m } if target == kind => mult *= m,
            UpgradeEffect::Synergy { source, target, pct } if target == kind => {
                synergy += state.owned(source) as f64 * pct;
            }
            _ => {}
        }
    }
    kind.base_rate() * count as f64 * mult * (1.0 + synergy)
}

pub fn rate_breakdown(state: &GameState) -> RateBreakdown {
    let cat = catalog();
    let producers: f64 = ProducerKind::all()
        .iter()
        .map(|&k| producer_output(state, k))
        .sum();

    let mut upgrade_global = 1.0;
    let mut ach_pct = 0.0;
    for up in state.upgrades.iter().filter_map(|&id| cat.upgrade(id)) {
        match up.effect {
            UpgradeEffect::GlobalMultiplier { mult } => upgrade_global *= mult,
            UpgradeEffect::AchievementScaling { pct } => ach_pct += pct,
            _ => {}
        }
    }

    let earned = state.achievements.len() as f64;
    let doubler = achievement_doubler(state);
    let achievements =
        (1.0 + earned * ach_pct * doubler) * (1.0 + earned * ACHIEVEMENT_BASE_PCT * doubler);

    let mut aura = aura_factor(state);
    for effect in state.node_effects() {
        if let PrestigeEffect::GlobalMultiplier(m) = effect {
            aura *= m;
        }
    }

    let buffs = buffs::multiplier(state, BuffKind::RateMultiplier);
    let total = (producers * upgrade_global * achievements * aura * buffs).max(0.0);

    RateBreakdown {
        producers,
        upgrade_global,
        achievements,
        aura,
        buffs,
        total,
    }
}

/// Current production rate in emojis per second.
pub fn compute_rate(state: &GameState) -> f64 {
    rate_breakdown(state).total
}

/// Recompute and cache the rate, raising the best-rate high-water mark.
pub fn refresh_rate(state: &mut GameState) -> f64 {
    let rate = compute_rate(state);
    state.rate = rate;
    if rate > state.best_rate {
        state.best_rate = rate;
    }
    rate
}

/// Click value without the critical-hit roll.
pub fn click_base(state: &GameState) -> f64 {
    let cat = catalog();
    let mut base = state.click_power;
    let mut mult = 1.0;
    for up in state.upgrades.iter().filter_map(|&id| cat.upgrade(id)) {
        match up.effect {
            UpgradeEffect::ClickFlat { add } => base += add,
            UpgradeEffect::ClickMultiplier { mult: m } => mult *= m,
            _ => {}
        }
    }
    for effect in state.node_effects() {
        if let PrestigeEffect::ClickMultiplier(m) = effect {
            mult *= m;
        }
    }
    mult *= buffs::multiplier(state, BuffKind::ClickMultiplier);
    (base * mult * aura_factor(state)).max(0.0)
}

/// Roll every owned critical node; the best successful multiplier wins.
pub fn roll_critical(state: &GameState, rng: &mut dyn RandomSource) -> f64 {
    let mut crit = 1.0_f64;
    for effect in state.node_effects() {
        if let PrestigeEffect::CriticalChance { chance, mult } = *effect {
            if rng.chance(chance) {
                crit = crit.max(mult);
            }
        }
    }
    crit
}

/// Value of one click, including the critical roll. Does not credit anything.
pub fn click_yield(state: &GameState, rng: &mut dyn RandomSource) -> f64 {
    click_base(state) * roll_critical(state, rng)
}

/// Credit `rate × dt` for one frame. Deltas outside `(0, max_dt)` accrue
/// nothing. Returns the amount credited.
pub fn accrue(state: &mut GameState, dt_secs: f64, max_dt_secs: f64) -> f64 {
    if !(dt_secs > 0.0 && dt_secs < max_dt_secs) {
        return 0.0;
    }
    let amount = state.rate * dt_secs;
    state.earn(amount);
    amount
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_accrue_is_rate_times_dt(rate in 0.0f64..1e12, dt in 0.0001f64..9.999) {
            let mut state = GameState::new(0);
            state.rate = rate;
            state.currency = 5.0;
            accrue(&mut state, dt, 10.0);
            let expected = 5.0 + rate * dt;
            prop_assert!((state.currency - expected).abs() <= expected * 1e-12 + 1e-9);
            prop_assert!((state.lifetime_currency - rate * dt).abs() <= rate * dt * 1e-12 + 1e-9);
        }

        #[test]
        fn prop_rate_never_negative(counts in proptest::collection::vec(0u32..500, ProducerKind::COUNT)) {
            let mut state = GameState::new(0);
            state.producers = counts;
            prop_assert!(compute_rate(&state) >= 0.0);
        }

        #[test]
        fn prop_rate_monotonic_in_count(idx in 0usize..ProducerKind::COUNT, count in 0u32..1000) {
            let mut state = GameState::new(0);
            state.producers[idx] = count;
            let before = compute_rate(&state);
            state.producers[idx] = count + 1;
            prop_assert!(compute_rate(&state) > before);
        }
    }
}
