//! Buff manager: time-boxed multipliers with absolute expiry.

use super::state::{Buff, BuffKind, GameState};

/// Add a buff lasting `duration_ms` from `now_ms`. Buffs of the same kind stack.
pub fn add_buff(
    state: &mut GameState,
    kind: BuffKind,
    magnitude: f64,
    duration_ms: i64,
    label: impl Into<String>,
    now_ms: i64,
) {
    state.buffs.push(Buff {
        kind,
        magnitude,
        expires_at_ms: now_ms + duration_ms.max(0),
        label: label.into(),
    });
}

/// Drop every buff whose expiry is at or before `now_ms`. Returns how many
/// were removed.
pub fn prune_expired(state: &mut GameState, now_ms: i64) -> usize {
    let before = state.buffs.len();
    state.buffs.retain(|b| b.expires_at_ms > now_ms);
    before - state.buffs.len()
}

/// Product of active buffs of `kind`.
pub fn multiplier(state: &GameState, kind: BuffKind) -> f64 {
    state
        .buffs
        .iter()
        .filter(|b| b.kind == kind)
        .map(|b| b.magnitude)
        .product()
}

/// Milliseconds until `buff` expires, never negative.
pub fn remaining_ms(buff: &Buff, now_ms: i64) -> i64 {
    (buff.expires_at_ms - now_ms).max(0)
}
