//! Hidden-achievement detectors.
//!
//! [`SecretTracker`] keeps the short-lived input history the detectors need
//! (recent click times, idle marker, last keys). It is runtime-only and never
//! saved.

use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeZone, Timelike};

use super::catalog::Secret;
use super::state::GameState;

/// Clicks needed inside [`RAPID_WINDOW_MS`] for the speed secret.
pub const RAPID_CLICKS: usize = 50;
pub const RAPID_WINDOW_MS: i64 = 5_000;
/// No clicks for longer than this unlocks the idle secret.
pub const IDLE_MS: i64 = 60_000;
/// Holding the main target this long overcharges it.
pub const HOLD_MS: i64 = 3_000;
pub const OVERCHARGE_MULT: f64 = 5.0;
pub const OVERCHARGE_MS: i64 = 5_000;
pub const SAVE_NAME_MAX: usize = 30;

/// Keys the konami detector cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    B,
    A,
    Other,
}

impl Key {
    /// Map a DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Key {
        match code {
            38 => Key::Up,
            40 => Key::Down,
            37 => Key::Left,
            39 => Key::Right,
            66 => Key::B,
            65 => Key::A,
            _ => Key::Other,
        }
    }
}

pub const KONAMI: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::B,
    Key::A,
];

/// Record a secret. Returns true the first time.
pub fn unlock(state: &mut GameState, secret: Secret) -> bool {
    if state.has_secret(secret) {
        return false;
    }
    state.secrets.push(secret);
    true
}

/// True during the first minute after local midnight.
pub fn is_midnight<Tz: TimeZone>(at: &DateTime<Tz>) -> bool {
    at.hour() == 0 && at.minute() == 0
}

/// [`is_midnight`] for a Unix timestamp in the local time zone.
pub fn is_local_midnight(now_ms: i64) -> bool {
    Local
        .timestamp_millis_opt(now_ms)
        .single()
        .map(|t| is_midnight(&t))
        .unwrap_or(false)
}

/// Save names that unlock the name-game secret (case-insensitive).
pub fn is_special_name(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    lower == "emoji" || lower == "clicker"
}

#[derive(Clone, Debug)]
pub struct SecretTracker {
    recent_clicks: VecDeque<i64>,
    last_activity_ms: i64,
    idle_fired: bool,
    keys: VecDeque<Key>,
}

impl SecretTracker {
    pub fn new(now_ms: i64) -> Self {
        Self {
            recent_clicks: VecDeque::with_capacity(RAPID_CLICKS),
            last_activity_ms: now_ms,
            idle_fired: false,
            keys: VecDeque::with_capacity(KONAMI.len()),
        }
    }

    /// Note a click. Returns true when it completes a rapid-click burst; the
    /// burst window then starts over.
    pub fn record_click(&mut self, now_ms: i64) -> bool {
        self.last_activity_ms = now_ms;
        self.idle_fired = false;
        self.recent_clicks.push_back(now_ms);
        while let Some(&t) = self.recent_clicks.front() {
            if now_ms - t >= RAPID_WINDOW_MS {
                self.recent_clicks.pop_front();
            } else {
                break;
            }
        }
        if self.recent_clicks.len() >= RAPID_CLICKS {
            self.recent_clicks.clear();
            return true;
        }
        false
    }

    /// True once per idle stretch longer than [`IDLE_MS`]; a click re-arms it.
    pub fn check_idle(&mut self, now_ms: i64) -> bool {
        if !self.idle_fired && now_ms - self.last_activity_ms > IDLE_MS {
            self.idle_fired = true;
            return true;
        }
        false
    }

    /// Note a key press. Returns true when the last ten keys spell the code.
    pub fn record_key(&mut self, key: Key) -> bool {
        self.keys.push_back(key);
        if self.keys.len() > KONAMI.len() {
            self.keys.pop_front();
        }
        self.keys.len() == KONAMI.len() && self.keys.iter().eq(KONAMI.iter())
    }
}
