//! Random bonus events: spawn timing, the weighted effect table and the void gamble.
//!
//! Timing lives in the engine's scheduler; this module only decides delays,
//! lifetimes and outcomes, drawing every random number from a
//! [`RandomSource`] so tests can pin exact results.

use super::buffs::add_buff;
use super::catalog::{PrestigeEffect, Secret};
use super::production::click_yield;
use super::secrets::unlock;
use super::state::{BuffKind, GameState};
use crate::config::EngineConfig;
use crate::random::RandomSource;

/// Seconds of production paid out by an instant bonus.
pub const INSTANT_BONUS_SECS: f64 = 600.0;
/// A caught rain drop is worth this many clicks.
pub const RAIN_DROP_CLICKS: f64 = 2.0;
/// How long rain drops keep falling after an emoji rain.
pub const RAIN_MS: i64 = 10_000;
pub const VOID_SURGE_MULT: f64 = 51.0;
pub const VOID_SURGE_MS: i64 = 30_000;
/// Fraction of current emojis the void takes on a bad flip.
pub const VOID_LOSS_FRACTION: f64 = 0.1;

/// Outcomes of a standard (golden) event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoldenEffect {
    HypeRush,
    TapFrenzy,
    EmojiRain,
    InstantBonus,
    Glitch,
}

impl GoldenEffect {
    /// Table order; the weighted pick walks it front to back.
    pub fn all() -> &'static [GoldenEffect] {
        &[
            GoldenEffect::HypeRush,
            GoldenEffect::TapFrenzy,
            GoldenEffect::EmojiRain,
            GoldenEffect::InstantBonus,
            GoldenEffect::Glitch,
        ]
    }

    pub fn weight(self) -> f64 {
        match self {
            GoldenEffect::HypeRush => 30.0,
            GoldenEffect::TapFrenzy => 30.0,
            GoldenEffect::EmojiRain => 25.0,
            GoldenEffect::InstantBonus => 10.0,
            GoldenEffect::Glitch => 5.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GoldenEffect::HypeRush => "Hype Rush",
            GoldenEffect::TapFrenzy => "Tap Frenzy",
            GoldenEffect::EmojiRain => "Emoji Rain",
            GoldenEffect::InstantBonus => "Instant Bonus",
            GoldenEffect::Glitch => "Glitch!",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            GoldenEffect::HypeRush => "+700% EPS for 20s",
            GoldenEffect::TapFrenzy => "Clicks 20x for 10s",
            GoldenEffect::EmojiRain => "Clickable emojis fall for 10s!",
            GoldenEffect::InstantBonus => "Get 10 minutes of EPS!",
            GoldenEffect::Glitch => "Something weird happens...",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventVariant {
    Golden,
    /// High-risk variant: claiming it offers the void gamble.
    Void,
}

/// An event currently on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveEvent {
    pub variant: EventVariant,
    pub spawned_at_ms: i64,
    pub expires_at_ms: i64,
}

/// What resolving an event did, for notifications.
#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    Golden(GoldenEffect),
    /// Instant bonus amount credited.
    Bonus(f64),
    /// Claimed a void event; awaiting accept or decline.
    VoidOffered,
    VoidSurge,
    /// Emojis taken by the void.
    VoidLoss(f64),
    VoidDeclined,
}

/// Product of owned event-frequency nodes.
pub fn frequency_multiplier(state: &GameState) -> f64 {
    state
        .node_effects()
        .filter_map(|e| match e {
            PrestigeEffect::EventFrequency(m) => Some(*m),
            _ => None,
        })
        .product()
}

/// Product of owned event-duration nodes.
pub fn duration_multiplier(state: &GameState) -> f64 {
    state
        .node_effects()
        .filter_map(|e| match e {
            PrestigeEffect::EventDuration(m) => Some(*m),
            _ => None,
        })
        .product()
}

/// Delay until the next spawn: uniform in the configured range, divided by
/// the frequency multiplier.
pub fn next_delay_ms(state: &GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> i64 {
    let base = rng.range(config.event_min_delay_ms as f64, config.event_max_delay_ms as f64);
    let freq = frequency_multiplier(state).max(f64::MIN_POSITIVE);
    (base / freq).round() as i64
}

/// On-screen lifetime: uniform in the configured range, scaled by the
/// duration multiplier.
pub fn lifetime_ms(state: &GameState, config: &EngineConfig, rng: &mut dyn RandomSource) -> i64 {
    let base = rng.range(
        config.event_min_lifetime_ms as f64,
        config.event_max_lifetime_ms as f64,
    );
    (base * duration_multiplier(state)).round() as i64
}

/// Fire a scheduled event: roll the variant, then its lifetime.
pub fn spawn(
    state: &GameState,
    now_ms: i64,
    config: &EngineConfig,
    rng: &mut dyn RandomSource,
) -> ActiveEvent {
    let variant = if rng.chance(config.void_chance) {
        EventVariant::Void
    } else {
        EventVariant::Golden
    };
    let life = lifetime_ms(state, config, rng);
    ActiveEvent {
        variant,
        spawned_at_ms: now_ms,
        expires_at_ms: now_ms + life,
    }
}

/// Weighted pick: subtract weights from a uniform draw until it reaches zero.
pub fn pick_golden_effect(rng: &mut dyn RandomSource) -> GoldenEffect {
    let total: f64 = GoldenEffect::all().iter().map(|e| e.weight()).sum();
    let mut r = rng.next_unit() * total;
    for &effect in GoldenEffect::all() {
        r -= effect.weight();
        if r <= 0.0 {
            return effect;
        }
    }
    GoldenEffect::all()[0]
}

/// Apply a golden effect. Rain and glitch are visual; rain pays out per drop
/// through [`catch_rain_drop`].
pub fn apply_golden_effect(state: &mut GameState, effect: GoldenEffect, now_ms: i64) -> EventOutcome {
    match effect {
        GoldenEffect::HypeRush => {
            add_buff(state, BuffKind::RateMultiplier, 8.0, 20_000, "Hype Rush 🔥", now_ms);
        }
        GoldenEffect::TapFrenzy => {
            add_buff(state, BuffKind::ClickMultiplier, 20.0, 10_000, "Tap Frenzy 👆", now_ms);
        }
        GoldenEffect::InstantBonus => {
            let amount = state.rate * INSTANT_BONUS_SECS;
            state.earn(amount);
            return EventOutcome::Bonus(amount);
        }
        GoldenEffect::EmojiRain | GoldenEffect::Glitch => {}
    }
    EventOutcome::Golden(effect)
}

/// Pick and apply a golden effect in one step.
pub fn trigger_golden(state: &mut GameState, rng: &mut dyn RandomSource, now_ms: i64) -> (GoldenEffect, EventOutcome) {
    let effect = pick_golden_effect(rng);
    let outcome = apply_golden_effect(state, effect, now_ms);
    (effect, outcome)
}

/// Credit one caught rain drop: two clicks' worth, critical roll included.
pub fn catch_rain_drop(state: &mut GameState, rng: &mut dyn RandomSource) -> f64 {
    let value = click_yield(state, rng) * RAIN_DROP_CLICKS;
    state.earn(value);
    value
}

/// Settle the void gamble. Accepting always records the void secret; a coin
/// flip then grants a large rate surge or takes a tenth of current emojis.
pub fn resolve_void(
    state: &mut GameState,
    accept: bool,
    rng: &mut dyn RandomSource,
    now_ms: i64,
) -> EventOutcome {
    if !accept {
        return EventOutcome::VoidDeclined;
    }
    unlock(state, Secret::Void);
    if rng.chance(0.5) {
        add_buff(
            state,
            BuffKind::RateMultiplier,
            VOID_SURGE_MULT,
            VOID_SURGE_MS,
            "VOID POWER 🕳️",
            now_ms,
        );
        EventOutcome::VoidSurge
    } else {
        let loss = state.currency * VOID_LOSS_FRACTION;
        state.currency -= loss;
        EventOutcome::VoidLoss(loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::buffs::multiplier;
    use crate::random::ScriptedRandom;

    #[test]
    fn weights_sum_to_hundred() {
        let total: f64 = GoldenEffect::all().iter().map(|e| e.weight()).sum();
        assert!((total - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_pick_boundaries() {
        let cases = [
            (0.0, GoldenEffect::HypeRush),
            (0.29, GoldenEffect::HypeRush),
            (0.31, GoldenEffect::TapFrenzy),
            (0.59, GoldenEffect::TapFrenzy),
            (0.61, GoldenEffect::EmojiRain),
            (0.86, GoldenEffect::InstantBonus),
            (0.96, GoldenEffect::Glitch),
            (0.999, GoldenEffect::Glitch),
        ];
        for (draw, expected) in cases {
            let mut rng = ScriptedRandom::constant(draw);
            assert_eq!(pick_golden_effect(&mut rng), expected, "draw {draw}");
        }
    }

    #[test]
    fn delay_in_range_and_scaled_by_frequency() {
        let config = EngineConfig::default();
        let mut state = GameState::new(0);
        let mut lo = ScriptedRandom::constant(0.0);
        assert_eq!(next_delay_ms(&state, &config, &mut lo), 60_000);
        let mut mid = ScriptedRandom::constant(0.5);
        assert_eq!(next_delay_ms(&state, &config, &mut mid), 120_000);

        state.prestige_nodes.push("aura_gold2".into());
        let mut mid = ScriptedRandom::constant(0.5);
        assert_eq!(next_delay_ms(&state, &config, &mut mid), 60_000);
    }

    #[test]
    fn lifetime_scaled_by_duration_node() {
        let config = EngineConfig::default();
        let mut state = GameState::new(0);
        let mut mid = ScriptedRandom::constant(0.5);
        assert_eq!(lifetime_ms(&state, &config, &mut mid), 10_000);
        state.prestige_nodes.push("aura_gold1".into());
        assert_eq!(lifetime_ms(&state, &config, &mut mid), 15_000);
    }

    #[test]
    fn spawn_rolls_void_first() {
        let config = EngineConfig::default();
        let state = GameState::new(0);
        let mut rng = ScriptedRandom::new(vec![0.01, 0.5]);
        let ev = spawn(&state, 1_000, &config, &mut rng);
        assert_eq!(ev.variant, EventVariant::Void);
        assert_eq!(ev.expires_at_ms, 11_000);

        let mut rng = ScriptedRandom::new(vec![0.05, 0.0]);
        let ev = spawn(&state, 0, &config, &mut rng);
        assert_eq!(ev.variant, EventVariant::Golden);
        assert_eq!(ev.expires_at_ms, 8_000);
    }

    #[test]
    fn hype_rush_adds_rate_buff() {
        let mut state = GameState::new(0);
        apply_golden_effect(&mut state, GoldenEffect::HypeRush, 0);
        assert!((multiplier(&state, BuffKind::RateMultiplier) - 8.0).abs() < f64::EPSILON);
        assert_eq!(state.buffs[0].expires_at_ms, 20_000);
    }

    #[test]
    fn tap_frenzy_adds_click_buff() {
        let mut state = GameState::new(0);
        apply_golden_effect(&mut state, GoldenEffect::TapFrenzy, 0);
        assert!((multiplier(&state, BuffKind::ClickMultiplier) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn instant_bonus_pays_ten_minutes() {
        let mut state = GameState::new(0);
        state.rate = 3.0;
        let out = apply_golden_effect(&mut state, GoldenEffect::InstantBonus, 0);
        assert_eq!(out, EventOutcome::Bonus(1_800.0));
        assert!((state.lifetime_currency - 1_800.0).abs() < 0.001);
    }

    #[test]
    fn visual_effects_change_nothing() {
        let mut state = GameState::new(0);
        let before = state.clone();
        apply_golden_effect(&mut state, GoldenEffect::Glitch, 0);
        apply_golden_effect(&mut state, GoldenEffect::EmojiRain, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn rain_drop_is_two_clicks() {
        let mut state = GameState::new(0);
        state.click_power = 4.0;
        let mut rng = ScriptedRandom::constant(0.5);
        assert!((catch_rain_drop(&mut state, &mut rng) - 8.0).abs() < 0.001);
        assert!((state.currency - 8.0).abs() < 0.001);
    }

    #[test]
    fn rain_drop_can_crit() {
        let mut state = GameState::new(0);
        state.prestige_nodes = vec!["aura_crit".into()];
        let mut hit = ScriptedRandom::constant(0.01);
        assert!((catch_rain_drop(&mut state, &mut hit) - 20.0).abs() < 0.001);
        let mut miss = ScriptedRandom::constant(0.9);
        assert!((catch_rain_drop(&mut state, &mut miss) - 2.0).abs() < 0.001);
        assert!((state.lifetime_currency - 22.0).abs() < 0.001);
    }

    #[test]
    fn void_decline_does_nothing() {
        let mut state = GameState::new(0);
        state.currency = 1_000.0;
        let before = state.clone();
        let mut rng = ScriptedRandom::constant(0.0);
        assert_eq!(resolve_void(&mut state, false, &mut rng, 0), EventOutcome::VoidDeclined);
        assert_eq!(state, before);
    }

    #[test]
    fn void_accept_good_flip() {
        let mut state = GameState::new(0);
        let mut rng = ScriptedRandom::constant(0.2);
        assert_eq!(resolve_void(&mut state, true, &mut rng, 0), EventOutcome::VoidSurge);
        assert!(state.has_secret(Secret::Void));
        assert!((multiplier(&state, BuffKind::RateMultiplier) - 51.0).abs() < f64::EPSILON);
    }

    #[test]
    fn void_accept_bad_flip() {
        let mut state = GameState::new(0);
        state.currency = 1_000.0;
        let mut rng = ScriptedRandom::constant(0.7);
        assert_eq!(resolve_void(&mut state, true, &mut rng, 0), EventOutcome::VoidLoss(100.0));
        assert!((state.currency - 900.0).abs() < 0.001);
        assert!(state.has_secret(Secret::Void));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::ScriptedRandom;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_delay_within_range(draw in 0.0f64..1.0) {
            let config = EngineConfig::default();
            let state = GameState::new(0);
            let mut rng = ScriptedRandom::constant(draw);
            let d = next_delay_ms(&state, &config, &mut rng);
            prop_assert!((60_000..=180_000).contains(&d));
        }

        #[test]
        fn prop_void_loss_keeps_currency_non_negative(currency in 0.0f64..1e15) {
            let mut state = GameState::new(0);
            state.currency = currency;
            let mut rng = ScriptedRandom::constant(0.9);
            resolve_void(&mut state, true, &mut rng, 0);
            prop_assert!(state.currency >= 0.0);
            prop_assert!((state.currency - currency * 0.9).abs() <= currency * 1e-12 + 1e-9);
        }
    }
}
