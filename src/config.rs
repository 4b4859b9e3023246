//! Engine tuning knobs.
//!
//! Defaults reproduce the shipped game. A host can override any subset from a
//! TOML snippet; missing keys keep their default.

use serde::Deserialize;

use crate::error::ConfigError;

/// Timer periods, offline policy and event timing used by the engine.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Period of the autosave task.
    pub autosave_interval_ms: i64,
    /// Period of the achievement scan (also runs the idle check).
    pub achievement_interval_ms: i64,
    /// Period of the news ticker rotation.
    pub ticker_interval_ms: i64,
    /// Frames with a delta at or above this are not accrued at full rate.
    pub max_frame_dt_secs: f64,
    /// Absences shorter than this grant nothing on resume.
    pub offline_min_secs: f64,
    pub offline_default_cap_hours: f64,
    pub offline_default_efficiency: f64,
    /// Most recent milestone entries kept in the log.
    pub milestone_log_cap: usize,
    pub event_min_delay_ms: i64,
    pub event_max_delay_ms: i64,
    pub event_min_lifetime_ms: i64,
    pub event_max_lifetime_ms: i64,
    /// Chance that a spawned event is the high-risk void variant.
    pub void_chance: f64,
    /// Chance per click of finding a diamond.
    pub diamond_chance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autosave_interval_ms: 10_000,
            achievement_interval_ms: 1_000,
            ticker_interval_ms: 8_000,
            max_frame_dt_secs: 10.0,
            offline_min_secs: 30.0,
            offline_default_cap_hours: 4.0,
            offline_default_efficiency: 0.5,
            milestone_log_cap: 100,
            event_min_delay_ms: 60_000,
            event_max_delay_ms: 180_000,
            event_min_lifetime_ms: 8_000,
            event_max_lifetime_ms: 12_000,
            void_chance: 0.05,
            diamond_chance: 0.001,
        }
    }
}

impl EngineConfig {
    /// Parse overrides from TOML and validate the result.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("autosave_interval_ms", self.autosave_interval_ms),
            ("achievement_interval_ms", self.achievement_interval_ms),
            ("ticker_interval_ms", self.ticker_interval_ms),
            ("event_min_delay_ms", self.event_min_delay_ms),
            ("event_min_lifetime_ms", self.event_min_lifetime_ms),
        ];
        for (name, value) in intervals {
            if value <= 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        if self.event_min_delay_ms > self.event_max_delay_ms {
            return Err(ConfigError::Invalid(
                "event_min_delay_ms exceeds event_max_delay_ms".into(),
            ));
        }
        if self.event_min_lifetime_ms > self.event_max_lifetime_ms {
            return Err(ConfigError::Invalid(
                "event_min_lifetime_ms exceeds event_max_lifetime_ms".into(),
            ));
        }
        if self.max_frame_dt_secs <= 0.0 {
            return Err(ConfigError::Invalid("max_frame_dt_secs must be positive".into()));
        }
        if self.offline_default_cap_hours < 0.0 || self.offline_default_efficiency < 0.0 {
            return Err(ConfigError::Invalid("offline policy must be non-negative".into()));
        }
        for (name, p) in [("void_chance", self.void_chance), ("diamond_chance", self.diamond_chance)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("{name} must be within [0, 1]")));
            }
        }
        if self.milestone_log_cap == 0 {
            return Err(ConfigError::Invalid("milestone_log_cap must be at least 1".into()));
        }
        Ok(())
    }
}
