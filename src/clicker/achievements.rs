//! Achievement engine, plus the requirement predicates shared with upgrades.

use super::catalog::{catalog, AchievementDef, Requirement};
use super::state::GameState;

/// Does the current state satisfy `req`?
pub fn requirement_met(state: &GameState, req: &Requirement) -> bool {
    match *req {
        Requirement::Clicks(n) => state.lifetime_clicks >= n,
        Requirement::LifetimeCurrency(n) => state.lifetime_currency >= n,
        Requirement::Rate(n) => state.rate >= n,
        Requirement::ProducerCount { producer, count } => state.owned(producer) >= count,
        Requirement::EventCatches(n) => state.event_catches >= n,
        Requirement::Reboots(n) => state.reboots >= n,
        Requirement::Achievements(n) => state.achievements.len() >= n,
        Requirement::Secret(secret) => state.has_secret(secret),
    }
}

/// Shown in the store once progress reaches half the requirement.
///
/// Only cumulative counters (clicks, lifetime, producer count, achievements)
/// use the half rule; other kinds are always visible, secrets only once found.
pub fn requirement_visible(state: &GameState, req: &Requirement) -> bool {
    match *req {
        Requirement::Clicks(n) => state.lifetime_clicks as f64 >= n as f64 * 0.5,
        Requirement::LifetimeCurrency(n) => state.lifetime_currency >= n * 0.5,
        Requirement::ProducerCount { producer, count } => {
            state.owned(producer) as f64 >= count.max(1) as f64 * 0.5
        }
        Requirement::Achievements(n) => state.achievements.len() as f64 >= n as f64 * 0.5,
        Requirement::Secret(secret) => state.has_secret(secret),
        Requirement::Rate(_) | Requirement::EventCatches(_) | Requirement::Reboots(_) => true,
    }
}

/// Grant every newly satisfied achievement, in catalog order.
///
/// Achievements earned earlier in the pass count toward achievement-count
/// requirements later in the same pass. Calling again with no state change
/// returns an empty list.
pub fn evaluate(state: &mut GameState) -> Vec<&'static AchievementDef> {
    let mut earned = Vec::new();
    for ach in &catalog().achievements {
        if state.has_achievement(ach.id) {
            continue;
        }
        if requirement_met(state, &ach.requirement) {
            state.achievements.push(ach.id);
            earned.push(ach);
        }
    }
    earned
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_evaluate_twice_yields_nothing_new(
            clicks in 0u64..2_000_000,
            lifetime in 0.0f64..1e16,
            rate in 0.0f64..1e11,
            catches in 0u32..200,
            reboots in 0u32..30,
        ) {
            let mut state = GameState::new(0);
            state.lifetime_clicks = clicks;
            state.lifetime_currency = lifetime;
            state.rate = rate;
            state.event_catches = catches;
            state.reboots = reboots;
            evaluate(&mut state);
            let snapshot = state.achievements.clone();
            prop_assert!(evaluate(&mut state).is_empty());
            prop_assert_eq!(state.achievements, snapshot);
        }

        #[test]
        fn prop_met_implies_visible(clicks in 0u64..100_000, need in 1u64..100_000) {
            let mut state = GameState::new(0);
            state.lifetime_clicks = clicks;
            let req = Requirement::Clicks(need);
            if requirement_met(&state, &req) {
                prop_assert!(requirement_visible(&state, &req));
            }
        }
    }
}
