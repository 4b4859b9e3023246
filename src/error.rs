//! Error types for rejected player actions, saves and configuration.
//!
//! None of these are fatal: a rejected action leaves the game state untouched
//! and the caller decides whether the player needs to hear about it.

use thiserror::Error;

/// Why a purchase request (producer, upgrade or prestige node) was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurchaseError {
    #[error("unknown producer: {0}")]
    UnknownProducer(String),

    #[error("unknown upgrade id: {0}")]
    UnknownUpgrade(u32),

    #[error("unknown prestige node: {0}")]
    UnknownNode(String),

    /// One-time purchases cannot be bought twice.
    #[error("already owned")]
    AlreadyOwned,

    /// The unlock requirement has not been met yet.
    #[error("not unlocked yet")]
    Locked,

    #[error("insufficient funds: cost {cost}, available {available}")]
    InsufficientFunds { cost: f64, available: f64 },

    #[error("purchase quantity must be at least 1")]
    InvalidQuantity,

    #[error("cannot own more than {limit} of one producer")]
    LimitReached { limit: u32 },
}

/// Why a reboot request was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrestigeError {
    #[error("reboot would grant no aura (lifetime earnings {lifetime})")]
    NothingToGain { lifetime: f64 },
}

/// Why a skin or season could not be selected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CosmeticError {
    #[error("skin {0} is not unlocked")]
    SkinLocked(String),

    #[error("seasons are not unlocked")]
    SeasonsLocked,
}

/// Errors from reading or writing a save record.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The export text is not valid base64 / UTF-8.
    #[error("save text could not be decoded")]
    Decode,

    #[error("save record is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The record parsed but carries no usable version tag.
    #[error("save record has no version tag")]
    MissingVersion,

    #[error("save version {found} is older than the minimum supported {min}")]
    IncompatibleVersion { found: u32, min: u32 },

    /// The backing storage slot failed (quota, unavailable, ...).
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
