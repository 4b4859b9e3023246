//! Emoji Clicker game state definitions.

use serde::{Deserialize, Serialize};

use super::catalog::{prestige_node, PrestigeEffect, ProducerKind, Season, Secret, DEFAULT_SKINS};

// ── Buffs ───────────────────────────────────────────────────────

/// Which yield a buff multiplies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffKind {
    RateMultiplier,
    ClickMultiplier,
}

/// A time-boxed multiplier. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Buff {
    pub kind: BuffKind,
    pub magnitude: f64,
    /// Absolute expiry timestamp (ms).
    pub expires_at_ms: i64,
    pub label: String,
}

// ── Settings ────────────────────────────────────────────────────

/// Bulk purchase quantity selector.
///
/// Stored in the save record as an integer: `-1` means "buy the maximum
/// affordable", any positive value is a fixed count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum BulkBuy {
    Count(u32),
    Max,
}

impl Default for BulkBuy {
    fn default() -> Self {
        BulkBuy::Count(1)
    }
}

impl From<i64> for BulkBuy {
    fn from(raw: i64) -> Self {
        match raw {
            -1 => BulkBuy::Max,
            n if n >= 1 => BulkBuy::Count(n.min(u32::MAX as i64) as u32),
            _ => BulkBuy::Count(1),
        }
    }
}

impl From<BulkBuy> for i64 {
    fn from(b: BulkBuy) -> Self {
        match b {
            BulkBuy::Max => -1,
            BulkBuy::Count(n) => n as i64,
        }
    }
}

/// Player-facing toggles. Missing keys in an older record keep these defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub reduced_motion: bool,
    pub sound: bool,
    /// Sound volume in `[0, 1]`.
    #[serde(rename = "soundVol")]
    pub volume: f64,
    pub haptics: bool,
    pub high_contrast: bool,
    pub large_text: bool,
    pub sci_notation: bool,
    pub bulk_buy: BulkBuy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            sound: true,
            volume: 0.5,
            haptics: true,
            high_contrast: false,
            large_text: false,
            sci_notation: false,
            bulk_buy: BulkBuy::default(),
        }
    }
}

// ── Milestones ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub text: String,
    #[serde(rename = "time")]
    pub at_ms: i64,
}

// ── Game state ──────────────────────────────────────────────────

/// The single mutable game state. Owned by the engine and passed by
/// reference into every calculator.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub currency: f64,
    /// Earned this run; reset by a reboot.
    pub lifetime_currency: f64,
    pub lifetime_clicks: u64,
    /// Base click value before upgrades.
    pub click_power: f64,
    /// Last computed production rate (emojis/s).
    pub rate: f64,
    /// High-water mark of `rate`.
    pub best_rate: f64,
    /// Owned count per producer, indexed by `ProducerKind::index`.
    pub producers: Vec<u32>,
    /// Purchased upgrade ids, in purchase order.
    pub upgrades: Vec<u32>,
    /// Earned achievement ids, in earn order.
    pub achievements: Vec<u32>,

    /// Aura: prestige currency ever credited (spending does not lower it).
    pub prestige_balance: u64,
    pub prestige_spent: u64,
    pub prestige_lifetime: u64,
    pub prestige_nodes: Vec<String>,
    pub reboots: u32,

    pub event_catches: u32,
    pub diamonds: u32,
    pub secrets: Vec<Secret>,

    pub unlocked_skins: Vec<String>,
    pub active_skin: String,
    pub season: Option<Season>,
    pub pet_hatched: bool,
    pub save_name: String,
    pub settings: Settings,

    pub started_at_ms: i64,
    pub last_tick_ms: i64,
    pub last_save_ms: i64,
    pub played_ms: i64,
    pub milestones: Vec<Milestone>,

    /// Active buffs (transient).
    pub buffs: Vec<Buff>,
}

impl GameState {
    pub fn new(now_ms: i64) -> Self {
        Self {
            currency: 0.0,
            lifetime_currency: 0.0,
            lifetime_clicks: 0,
            click_power: 1.0,
            rate: 0.0,
            best_rate: 0.0,
            producers: vec![0; ProducerKind::COUNT],
            upgrades: Vec::new(),
            achievements: Vec::new(),
            prestige_balance: 0,
            prestige_spent: 0,
            prestige_lifetime: 0,
            prestige_nodes: Vec::new(),
            reboots: 0,
            event_catches: 0,
            diamonds: 0,
            secrets: Vec::new(),
            unlocked_skins: DEFAULT_SKINS.iter().map(|s| s.to_string()).collect(),
            active_skin: DEFAULT_SKINS[0].to_string(),
            season: None,
            pet_hatched: false,
            save_name: String::new(),
            settings: Settings::default(),
            started_at_ms: now_ms,
            last_tick_ms: now_ms,
            last_save_ms: now_ms,
            played_ms: 0,
            milestones: Vec::new(),
            buffs: Vec::new(),
        }
    }

    pub fn owned(&self, kind: ProducerKind) -> u32 {
        self.producers.get(kind.index()).copied().unwrap_or(0)
    }

    pub fn has_upgrade(&self, id: u32) -> bool {
        self.upgrades.contains(&id)
    }

    pub fn has_achievement(&self, id: u32) -> bool {
        self.achievements.contains(&id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.prestige_nodes.iter().any(|n| n == id)
    }

    pub fn has_secret(&self, secret: Secret) -> bool {
        self.secrets.contains(&secret)
    }

    /// Aura that can still be spent on nodes.
    pub fn prestige_available(&self) -> u64 {
        self.prestige_balance.saturating_sub(self.prestige_spent)
    }

    /// Effects of every purchased aura node, in purchase order.
    pub fn node_effects(&self) -> impl Iterator<Item = &'static PrestigeEffect> + '_ {
        self.prestige_nodes
            .iter()
            .filter_map(|id| prestige_node(id))
            .map(|n| &n.effect)
    }

    pub fn seasons_unlocked(&self) -> bool {
        self.node_effects().any(|e| matches!(e, PrestigeEffect::UnlockSeasons))
    }

    /// Credit freshly produced or clicked emojis to both totals.
    pub fn earn(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.currency += amount;
            self.lifetime_currency += amount;
        }
    }

    /// Append to the milestone log, dropping the oldest beyond `cap`.
    pub fn add_milestone(&mut self, text: impl Into<String>, at_ms: i64, cap: usize) {
        self.milestones.push(Milestone {
            text: text.into(),
            at_ms,
        });
        if self.milestones.len() > cap {
            let excess = self.milestones.len() - cap;
            self.milestones.drain(..excess);
        }
    }
}
