//! Offline progress: a bounded grant for time spent away.

use log::info;

use super::catalog::PrestigeEffect;
use super::production::refresh_rate;
use super::state::GameState;
use crate::config::EngineConfig;

/// Result of one offline catch-up.
#[derive(Clone, Debug, PartialEq)]
pub struct OfflineGrant {
    /// Measured absence in seconds.
    pub away_secs: f64,
    /// Absence after applying the cap.
    pub capped_secs: f64,
    pub amount: f64,
}

/// Longest absence that still earns, in hours. The largest cap node wins.
pub fn offline_cap_hours(state: &GameState, config: &EngineConfig) -> f64 {
    state
        .node_effects()
        .filter_map(|e| match e {
            PrestigeEffect::OfflineCap { hours } => Some(*hours),
            _ => None,
        })
        .fold(config.offline_default_cap_hours, f64::max)
}

/// Fraction of the live rate earned while away.
pub fn offline_efficiency(state: &GameState, config: &EngineConfig) -> f64 {
    state
        .node_effects()
        .filter_map(|e| match e {
            PrestigeEffect::OfflineMultiplier(m) => Some(*m),
            _ => None,
        })
        .fold(config.offline_default_efficiency, |acc, m| acc * m)
}

/// Compute the grant for an absence ending at `now_ms`, using the cached
/// rate. Returns `None` for absences shorter than the minimum.
pub fn offline_grant(state: &GameState, now_ms: i64, config: &EngineConfig) -> Option<OfflineGrant> {
    let away_secs = now_ms.saturating_sub(state.last_tick_ms) as f64 / 1000.0;
    if away_secs < config.offline_min_secs {
        return None;
    }
    let capped_secs = away_secs.min(offline_cap_hours(state, config) * 3600.0);
    let amount = (state.rate * capped_secs * offline_efficiency(state, config)).max(0.0);
    Some(OfflineGrant {
        away_secs,
        capped_secs,
        amount,
    })
}

/// Recompute the rate, then credit the offline grant to both totals and
/// move the tick marker to `now_ms` so the same absence is never paid twice.
pub fn apply_offline(state: &mut GameState, now_ms: i64, config: &EngineConfig) -> Option<OfflineGrant> {
    refresh_rate(state);
    let grant = offline_grant(state, now_ms, config);
    if let Some(g) = &grant {
        state.earn(g.amount);
        state.last_tick_ms = now_ms;
        info!(
            "offline grant {:.1} for {:.0}s away ({:.0}s counted)",
            g.amount, g.away_secs, g.capped_secs
        );
    }
    grant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::catalog::ProducerKind;

    fn state_with_rate(rate: f64) -> GameState {
        let mut state = GameState::new(0);
        state.rate = rate;
        state
    }

    #[test]
    fn short_absence_grants_nothing() {
        let state = state_with_rate(100.0);
        assert!(offline_grant(&state, 29_000, &EngineConfig::default()).is_none());
    }

    #[test]
    fn ancient_tick_marker_hits_the_cap() {
        let mut state = state_with_rate(1.0);
        state.last_tick_ms = i64::MIN;
        let g = offline_grant(&state, 1_000, &EngineConfig::default()).unwrap();
        assert!((g.capped_secs - 4.0 * 3600.0).abs() < 1e-9);
    }

    #[test]
    fn two_hours_at_half_efficiency() {
        let state = state_with_rate(100.0);
        let g = offline_grant(&state, 7_200_000, &EngineConfig::default()).unwrap();
        assert!((g.capped_secs - 7_200.0).abs() < 1e-9);
        assert!((g.amount - 360_000.0).abs() < 0.001);
    }

    #[test]
    fn absence_is_capped_at_four_hours() {
        let state = state_with_rate(10.0);
        let g = offline_grant(&state, 24 * 3_600_000, &EngineConfig::default()).unwrap();
        assert!((g.away_secs - 86_400.0).abs() < 1e-9);
        assert!((g.capped_secs - 14_400.0).abs() < 1e-9);
        assert!((g.amount - 72_000.0).abs() < 0.001);
    }

    #[test]
    fn cap_node_raises_not_stacks() {
        let mut state = state_with_rate(1.0);
        state.prestige_nodes.push("aura_offline".into());
        assert!((offline_cap_hours(&state, &EngineConfig::default()) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn multiplier_node_scales_efficiency() {
        let mut state = state_with_rate(1.0);
        state.prestige_nodes.push("aura_offline2".into());
        assert!((offline_efficiency(&state, &EngineConfig::default()) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn apply_recomputes_rate_and_credits_both_totals() {
        let mut state = GameState::new(0);
        state.producers[ProducerKind::AutoTapper.index()] = 100;
        // Stale cached rate must not be used
        state.rate = 0.0;
        let g = apply_offline(&mut state, 60_000, &EngineConfig::default()).unwrap();
        assert!((g.amount - 100.0 * 60.0 * 0.5).abs() < 0.001);
        assert!((state.currency - 3_000.0).abs() < 0.001);
        assert!((state.lifetime_currency - 3_000.0).abs() < 0.001);
        assert_eq!(state.last_tick_ms, 60_000);
        // Same absence is not paid twice
        assert!(apply_offline(&mut state, 60_000, &EngineConfig::default()).is_none());
    }

    #[test]
    fn clock_going_backwards_grants_nothing() {
        let mut state = state_with_rate(100.0);
        state.last_tick_ms = 100_000;
        assert!(offline_grant(&state, 0, &EngineConfig::default()).is_none());
    }
}
