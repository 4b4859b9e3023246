//! Clocks driving the simulation.
//!
//! The engine never reads the wall clock directly. It asks a [`Clock`] for
//! the current timestamp, and [`FrameClock`] turns successive frame
//! timestamps into a delta in seconds. Tests drive everything through
//! [`ManualClock`], so timers, buffs and offline grants are deterministic.

use std::cell::Cell;
use std::rc::Rc;

/// Source of "now" in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Real wall clock: `Date.now()` in the browser, the system clock natively.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Settable clock. Clones share the same time, so a test can keep a handle
/// while the engine owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// Converts per-frame timestamps into elapsed seconds.
///
/// The first frame after creation (or [`FrameClock::reset`]) yields zero so a
/// resume never accrues the whole absence on the hot path. Deltas are not
/// clamped here; the caller decides what a pathological delta means.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<i64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current timestamp; returns seconds since the previous frame.
    /// A clock that stepped backwards yields zero.
    pub fn update(&mut self, now_ms: i64) -> f64 {
        let delta_ms = match self.last_timestamp {
            Some(prev) => (now_ms - prev).max(0),
            None => 0,
        };
        self.last_timestamp = Some(now_ms);
        delta_ms as f64 / 1000.0
    }

    /// Forget the previous frame (after a resume or a state replacement).
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}
