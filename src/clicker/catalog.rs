//! Static game data: producers, upgrades, achievements and the aura tree.
//!
//! Everything here is immutable. Upgrades and achievements are generated
//! from small tables on first use and then shared for the life of the process.

use std::sync::OnceLock;

// ── Producers ───────────────────────────────────────────────────

/// Kinds of producers (passive emoji generators).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProducerKind {
    TapBuddy,
    AutoTapper,
    KeyboardGremlin,
    StickerPrinter,
    EmojiFarm,
    MoodLab,
    MemeFactory,
    ReactionBank,
    TempleOfFeels,
    GroupChatPortal,
    TimeMachine,
    Multiverse,
}

impl ProducerKind {
    pub const COUNT: usize = 12;

    /// All producer kinds in display order.
    pub fn all() -> &'static [ProducerKind] {
        &[
            ProducerKind::TapBuddy,
            ProducerKind::AutoTapper,
            ProducerKind::KeyboardGremlin,
            ProducerKind::StickerPrinter,
            ProducerKind::EmojiFarm,
            ProducerKind::MoodLab,
            ProducerKind::MemeFactory,
            ProducerKind::ReactionBank,
            ProducerKind::TempleOfFeels,
            ProducerKind::GroupChatPortal,
            ProducerKind::TimeMachine,
            ProducerKind::Multiverse,
        ]
    }

    /// Position in [`ProducerKind::all`]; also the slot in `GameState::producers`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable key used in save records.
    pub fn id(self) -> &'static str {
        match self {
            ProducerKind::TapBuddy => "tap_buddy",
            ProducerKind::AutoTapper => "auto_tapper",
            ProducerKind::KeyboardGremlin => "kb_gremlin",
            ProducerKind::StickerPrinter => "sticker_print",
            ProducerKind::EmojiFarm => "emoji_farm",
            ProducerKind::MoodLab => "mood_lab",
            ProducerKind::MemeFactory => "meme_factory",
            ProducerKind::ReactionBank => "react_bank",
            ProducerKind::TempleOfFeels => "temple_feels",
            ProducerKind::GroupChatPortal => "gc_portal",
            ProducerKind::TimeMachine => "time_machine",
            ProducerKind::Multiverse => "multiverse",
        }
    }

    pub fn from_id(id: &str) -> Option<ProducerKind> {
        Self::all().iter().copied().find(|k| k.id() == id)
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ProducerKind::TapBuddy => "Tap Buddy",
            ProducerKind::AutoTapper => "Auto Tapper",
            ProducerKind::KeyboardGremlin => "Keyboard Gremlin",
            ProducerKind::StickerPrinter => "Sticker Printer",
            ProducerKind::EmojiFarm => "Emoji Farm",
            ProducerKind::MoodLab => "Mood Lab",
            ProducerKind::MemeFactory => "Meme Factory",
            ProducerKind::ReactionBank => "Reaction Bank",
            ProducerKind::TempleOfFeels => "Temple of Feels",
            ProducerKind::GroupChatPortal => "Group Chat Portal",
            ProducerKind::TimeMachine => "Unicode Time Machine",
            ProducerKind::Multiverse => "Multiverse Emulator",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ProducerKind::TapBuddy => "👆",
            ProducerKind::AutoTapper => "🖱️",
            ProducerKind::KeyboardGremlin => "⌨️",
            ProducerKind::StickerPrinter => "🖨️",
            ProducerKind::EmojiFarm => "🌾",
            ProducerKind::MoodLab => "🧪",
            ProducerKind::MemeFactory => "🏭",
            ProducerKind::ReactionBank => "🏦",
            ProducerKind::TempleOfFeels => "🛕",
            ProducerKind::GroupChatPortal => "🌀",
            ProducerKind::TimeMachine => "🕰️",
            ProducerKind::Multiverse => "🌌",
        }
    }

    /// Cost of the first unit.
    pub fn base_cost(self) -> f64 {
        match self {
            ProducerKind::TapBuddy => 15.0,
            ProducerKind::AutoTapper => 100.0,
            ProducerKind::KeyboardGremlin => 1_100.0,
            ProducerKind::StickerPrinter => 12_000.0,
            ProducerKind::EmojiFarm => 130_000.0,
            ProducerKind::MoodLab => 1_400_000.0,
            ProducerKind::MemeFactory => 20_000_000.0,
            ProducerKind::ReactionBank => 330_000_000.0,
            ProducerKind::TempleOfFeels => 5_100_000_000.0,
            ProducerKind::GroupChatPortal => 75_000_000_000.0,
            ProducerKind::TimeMachine => 1e12,
            ProducerKind::Multiverse => 1.7e13,
        }
    }

    /// Emojis per second per unit, before any modifier.
    pub fn base_rate(self) -> f64 {
        match self {
            ProducerKind::TapBuddy => 0.1,
            ProducerKind::AutoTapper => 1.0,
            ProducerKind::KeyboardGremlin => 8.0,
            ProducerKind::StickerPrinter => 47.0,
            ProducerKind::EmojiFarm => 260.0,
            ProducerKind::MoodLab => 1_400.0,
            ProducerKind::MemeFactory => 7_800.0,
            ProducerKind::ReactionBank => 44_000.0,
            ProducerKind::TempleOfFeels => 260_000.0,
            ProducerKind::GroupChatPortal => 1_600_000.0,
            ProducerKind::TimeMachine => 10_000_000.0,
            ProducerKind::Multiverse => 65_000_000.0,
        }
    }
}

// ── Requirements ────────────────────────────────────────────────

/// Named one-off secrets that unlock hidden achievements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Secret {
    Midnight,
    Idle60,
    Speed50,
    Diamond,
    Konami,
    Overcharge,
    DevNotes,
    Retro,
    NameGame,
    Void,
}

impl Secret {
    pub fn all() -> &'static [Secret] {
        &[
            Secret::Midnight,
            Secret::Idle60,
            Secret::Speed50,
            Secret::Diamond,
            Secret::Konami,
            Secret::Overcharge,
            Secret::DevNotes,
            Secret::Retro,
            Secret::NameGame,
            Secret::Void,
        ]
    }

    /// Stable key used in save records.
    pub fn key(self) -> &'static str {
        match self {
            Secret::Midnight => "midnight",
            Secret::Idle60 => "idle60",
            Secret::Speed50 => "speed50",
            Secret::Diamond => "diamond",
            Secret::Konami => "konami",
            Secret::Overcharge => "overcharge",
            Secret::DevNotes => "devnotes",
            Secret::Retro => "retro",
            Secret::NameGame => "namegame",
            Secret::Void => "void",
        }
    }

    pub fn from_key(key: &str) -> Option<Secret> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }
}

/// A single predicate over cumulative player stats.
#[derive(Clone, Debug, PartialEq)]
pub enum Requirement {
    Clicks(u64),
    LifetimeCurrency(f64),
    Rate(f64),
    ProducerCount { producer: ProducerKind, count: u32 },
    EventCatches(u32),
    Reboots(u32),
    Achievements(usize),
    Secret(Secret),
}

// ── Upgrades ────────────────────────────────────────────────────

/// What a purchased upgrade does. Each kind carries only its own payload.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradeEffect {
    /// Adds to the base click value.
    ClickFlat { add: f64 },
    ClickMultiplier { mult: f64 },
    /// Multiplies a single producer's output.
    ProducerMultiplier { target: ProducerKind, mult: f64 },
    /// Each `source` unit adds `pct` to `target`'s output.
    Synergy {
        source: ProducerKind,
        target: ProducerKind,
        pct: f64,
    },
    GlobalMultiplier { mult: f64 },
    /// Each earned achievement adds `pct` to total production.
    AchievementScaling { pct: f64 },
}

#[derive(Clone, Debug)]
pub struct UpgradeDef {
    pub id: u32,
    pub name: String,
    pub icon: &'static str,
    pub description: String,
    pub cost: f64,
    pub effect: UpgradeEffect,
    pub requirement: Requirement,
}

// ── Achievements ────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct AchievementDef {
    pub id: u32,
    pub name: String,
    pub icon: &'static str,
    pub requirement: Requirement,
}

impl AchievementDef {
    pub fn is_secret(&self) -> bool {
        matches!(self.requirement, Requirement::Secret(_))
    }
}

// ── Aura tree (prestige nodes) ──────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum PrestigeEffect {
    GlobalMultiplier(f64),
    ClickMultiplier(f64),
    /// Event on-screen lifetime multiplier.
    EventDuration(f64),
    /// Event spawn frequency multiplier (delay is divided by it).
    EventFrequency(f64),
    OfflineCap { hours: f64 },
    OfflineMultiplier(f64),
    UnlockSeasons,
    UnlockSkins(&'static [&'static str]),
    UnlockPet,
    /// Currency granted at the start of every run.
    StartingBonus(f64),
    CriticalChance { chance: f64, mult: f64 },
    /// Fraction shaved off producer costs.
    CostDiscount(f64),
    /// Doubles every achievement-based production bonus.
    AchievementDoubler,
}

#[derive(Clone, Debug)]
pub struct PrestigeNodeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub effect: PrestigeEffect,
}

static PRESTIGE_NODES: &[PrestigeNodeDef] = &[
    PrestigeNodeDef { id: "aura_prod1", name: "Aura Boost I", icon: "✨", description: "+5% global production.", cost: 1, effect: PrestigeEffect::GlobalMultiplier(1.05) },
    PrestigeNodeDef { id: "aura_prod2", name: "Aura Boost II", icon: "✨", description: "+10% global production.", cost: 3, effect: PrestigeEffect::GlobalMultiplier(1.10) },
    PrestigeNodeDef { id: "aura_prod3", name: "Aura Boost III", icon: "✨", description: "+25% global production.", cost: 10, effect: PrestigeEffect::GlobalMultiplier(1.25) },
    PrestigeNodeDef { id: "aura_click1", name: "Aura Tap I", icon: "👆", description: "+50% click power.", cost: 2, effect: PrestigeEffect::ClickMultiplier(1.5) },
    PrestigeNodeDef { id: "aura_click2", name: "Aura Tap II", icon: "👆", description: "+100% click power.", cost: 5, effect: PrestigeEffect::ClickMultiplier(2.0) },
    PrestigeNodeDef { id: "aura_gold1", name: "Lucky Aura I", icon: "🍀", description: "Golden emojis last 50% longer.", cost: 3, effect: PrestigeEffect::EventDuration(1.5) },
    PrestigeNodeDef { id: "aura_gold2", name: "Lucky Aura II", icon: "🍀", description: "Golden emojis 2x more common.", cost: 5, effect: PrestigeEffect::EventFrequency(2.0) },
    PrestigeNodeDef { id: "aura_offline", name: "Offline Boost", icon: "😴", description: "Offline progress capped at 8 hours.", cost: 4, effect: PrestigeEffect::OfflineCap { hours: 8.0 } },
    PrestigeNodeDef { id: "aura_offline2", name: "Deep Sleep", icon: "💤", description: "Offline progress 50% more.", cost: 8, effect: PrestigeEffect::OfflineMultiplier(1.5) },
    PrestigeNodeDef { id: "aura_season", name: "Seasons Unlock", icon: "🗓️", description: "Unlock the Seasons system.", cost: 10, effect: PrestigeEffect::UnlockSeasons },
    PrestigeNodeDef { id: "aura_skin", name: "Skin Collector I", icon: "🎭", description: "Unlock 3 extra emoji skins.", cost: 2, effect: PrestigeEffect::UnlockSkins(&["🤯", "👻", "🤖"]) },
    PrestigeNodeDef { id: "aura_skin2", name: "Skin Collector II", icon: "🎭", description: "Unlock 3 more emoji skins.", cost: 5, effect: PrestigeEffect::UnlockSkins(&["🦄", "😈", "🥳"]) },
    PrestigeNodeDef { id: "aura_pet", name: "Companion Egg", icon: "🥚", description: "Hatch a companion pet!", cost: 3, effect: PrestigeEffect::UnlockPet },
    PrestigeNodeDef { id: "aura_start", name: "Head Start", icon: "🚀", description: "Start reboots with 100 emojis.", cost: 2, effect: PrestigeEffect::StartingBonus(100.0) },
    PrestigeNodeDef { id: "aura_start2", name: "Mega Start", icon: "🚀", description: "Start reboots with 10000.", cost: 8, effect: PrestigeEffect::StartingBonus(10_000.0) },
    PrestigeNodeDef { id: "aura_crit", name: "Critical Tap I", icon: "💥", description: "5% chance of 10x click.", cost: 4, effect: PrestigeEffect::CriticalChance { chance: 0.05, mult: 10.0 } },
    PrestigeNodeDef { id: "aura_crit2", name: "Critical Tap II", icon: "💥", description: "10% chance of 10x click.", cost: 12, effect: PrestigeEffect::CriticalChance { chance: 0.10, mult: 10.0 } },
    PrestigeNodeDef { id: "aura_bulk", name: "Bulk Discount", icon: "🏷️", description: "Buildings cost 5% less.", cost: 6, effect: PrestigeEffect::CostDiscount(0.05) },
    PrestigeNodeDef { id: "aura_bulk2", name: "Mega Discount", icon: "🏷️", description: "Buildings cost 10% less.", cost: 15, effect: PrestigeEffect::CostDiscount(0.10) },
    PrestigeNodeDef { id: "aura_achbonus", name: "Trophy Polish", icon: "🏆", description: "Achievements give 2x bonus.", cost: 7, effect: PrestigeEffect::AchievementDoubler },
];

/// The aura tree in display order.
pub fn prestige_nodes() -> &'static [PrestigeNodeDef] {
    PRESTIGE_NODES
}

pub fn prestige_node(id: &str) -> Option<&'static PrestigeNodeDef> {
    PRESTIGE_NODES.iter().find(|n| n.id == id)
}

// ── Cosmetics ───────────────────────────────────────────────────

pub const ALL_SKINS: &[&str] = &["😀", "😂", "😎", "🤯", "👻", "🤖", "🦄", "😈", "🥳"];
pub const DEFAULT_SKINS: &[&str] = &["😀", "😂", "😎"];

/// Background themes available once the seasons node is owned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Spooky,
    Festive,
    Love,
    Party,
}

impl Season {
    pub fn all() -> &'static [Season] {
        &[Season::Spooky, Season::Festive, Season::Love, Season::Party]
    }

    pub fn id(self) -> &'static str {
        match self {
            Season::Spooky => "spooky",
            Season::Festive => "festive",
            Season::Love => "love",
            Season::Party => "party",
        }
    }

    pub fn from_id(id: &str) -> Option<Season> {
        Self::all().iter().copied().find(|s| s.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spooky => "Spooky Week",
            Season::Festive => "Festive Time",
            Season::Love => "Love Season",
            Season::Party => "Party Mode",
        }
    }
}

pub const NEWS_LINES: &[&str] = &[
    "Breaking: Local emoji achieves sentience, demands PTO.",
    "Scientists discover emojis are 97% pure vibes.",
    "Tap Buddies unionize; demand dental plan.",
    "Emoji Farm reports record turnip yields! 🌾",
    "Meme Factory investigated for producing too many memes.",
    "Group Chat Portal opens; 47 unread messages immediately.",
    "Unicode Time Machine accidentally invents 🦤 in 1987.",
    "Reaction Bank stock up 420%, analysts confused.",
    "Temple of Feels monk achieves inner 😊.",
    "Multiverse Emulator discovers universe made entirely of 🍕.",
    "Your tap is in the top 0.001% of tappers!",
    "This just in: you're doing great! Keep tapping!",
    "Keyboard Gremlin caught sleeping on the job.",
    "Mood Lab creates new emotion: 'Tapisfied'.",
    "Sticker Printer jammed. Sticky situation.",
    "News: clicking things is surprisingly rewarding.",
    "Today's forecast: 100% chance of emojis.",
    "Experts agree: one more tap can't hurt.",
    "Your emojis are the envy of the multiverse.",
    "Fun fact: this ticker is 100% artisanal.",
];

// ── Generated tables ────────────────────────────────────────────

/// Upgrades and achievements, indexed by id.
pub struct Catalog {
    pub upgrades: Vec<UpgradeDef>,
    pub achievements: Vec<AchievementDef>,
}

impl Catalog {
    pub fn upgrade(&self, id: u32) -> Option<&UpgradeDef> {
        self.upgrades.get(id as usize)
    }

    pub fn achievement(&self, id: u32) -> Option<&AchievementDef> {
        self.achievements.get(id as usize)
    }
}

/// The shared catalog, built on first use.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| Catalog {
        upgrades: create_upgrades(),
        achievements: create_achievements(),
    })
}

fn create_upgrades() -> Vec<UpgradeDef> {
    let mut ups: Vec<UpgradeDef> = Vec::new();
    let mut push = |name: String, icon: &'static str, description: String, cost: f64, effect: UpgradeEffect, requirement: Requirement| {
        let id = ups.len() as u32;
        ups.push(UpgradeDef { id, name, icon, description, cost, effect, requirement });
    };

    // Click power
    for (name, icon, add, cost, clicks) in [
        ("Stronger Fingers", "💪", 1.0, 100.0, 10),
        ("Iron Thumbs", "🦾", 5.0, 500.0, 100),
        ("Diamond Hands", "💎", 50.0, 10_000.0, 500),
        ("Quantum Tap", "⚛️", 500.0, 1e6, 2_000),
        ("Cosmic Press", "🌠", 5_000.0, 1e9, 10_000),
    ] {
        push(name.into(), icon, format!("Clicks give +{add} emojis."), cost, UpgradeEffect::ClickFlat { add }, Requirement::Clicks(clicks));
    }

    for (name, icon, mult, cost, clicks) in [
        ("Double Tap", "✌️", 2.0, 1_000.0, 200),
        ("Triple Tap", "🤟", 3.0, 50_000.0, 1_000),
        ("Mega Tap", "🖐️", 5.0, 5e6, 5_000),
    ] {
        push(name.into(), icon, format!("Clicks are worth {mult}x."), cost, UpgradeEffect::ClickMultiplier { mult }, Requirement::Clicks(clicks));
    }

    // Three tiers per producer
    for &kind in ProducerKind::all() {
        for (prefix, mult, cost_factor, count) in [
            ("Better", 2.0, 10.0, 1),
            ("Super", 3.0, 500.0, 25),
            ("Ultra", 5.0, 50_000.0, 50),
        ] {
            push(
                format!("{prefix} {}", kind.name()),
                kind.icon(),
                format!("{} produces {mult}x more.", kind.name()),
                kind.base_cost() * cost_factor,
                UpgradeEffect::ProducerMultiplier { target: kind, mult },
                Requirement::ProducerCount { producer: kind, count },
            );
        }
    }

    // Synergies
    use ProducerKind::*;
    for (name, icon, source, target, pct, cost, count) in [
        ("Farm-to-Factory Pipeline", "🚜", EmojiFarm, MemeFactory, 0.05, 5e7, 10),
        ("Lab Reactions", "⚗️", MoodLab, ReactionBank, 0.05, 5e8, 10),
        ("Temporal Portals", "⏳", TimeMachine, GroupChatPortal, 0.03, 5e12, 5),
        ("Multiverse Farming", "🪐", Multiverse, EmojiFarm, 0.10, 1e14, 1),
    ] {
        push(
            name.into(),
            icon,
            format!("Each {} boosts {} by +{:.0}%.", source.name(), target.name(), pct * 100.0),
            cost,
            UpgradeEffect::Synergy { source, target, pct },
            Requirement::ProducerCount { producer: source, count },
        );
    }

    // Global production
    for (name, icon, mult, cost, lifetime) in [
        ("Optimism", "☀️", 1.10, 5_000.0, 1_000.0),
        ("Viral Growth", "📈", 1.25, 500_000.0, 100_000.0),
        ("Exponential Joy", "🎉", 1.50, 5e7, 1e7),
        ("Singularity", "🔮", 2.0, 5e10, 1e10),
    ] {
        push(
            name.into(),
            icon,
            format!("All production x{mult}."),
            cost,
            UpgradeEffect::GlobalMultiplier { mult },
            Requirement::LifetimeCurrency(lifetime),
        );
    }

    // Hype pets: achievement scaling
    for (name, icon, pct, cost, achievements) in [
        ("Hype Puppy", "🐕", 0.005, 10_000.0, 5),
        ("Hype Kitten", "🐈", 0.005, 1e6, 20),
        ("Hype Parrot", "🦜", 0.005, 1e9, 40),
        ("Hype Dragon", "🐉", 0.01, 1e12, 60),
    ] {
        push(
            name.into(),
            icon,
            format!("Each achievement gives +{}% production.", pct * 100.0),
            cost,
            UpgradeEffect::AchievementScaling { pct },
            Requirement::Achievements(achievements),
        );
    }

    ups
}

fn create_achievements() -> Vec<AchievementDef> {
    let mut achs: Vec<AchievementDef> = Vec::new();
    let mut push = |name: String, icon: &'static str, requirement: Requirement| {
        let id = achs.len() as u32;
        achs.push(AchievementDef { id, name, icon, requirement });
    };

    for n in [1, 10, 50, 100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000u64] {
        push(format!("{n} Taps"), "👆", Requirement::Clicks(n));
    }

    for exp in 2..=15 {
        let n = 10f64.powi(exp);
        push(format!("{} Emojis Earned", super::format::format_number(n, false)), "🪙", Requirement::LifetimeCurrency(n));
    }

    for exp in 0..=10 {
        let n = 10f64.powi(exp);
        push(format!("{} EPS", super::format::format_number(n, false)), "⚡", Requirement::Rate(n));
    }

    for &kind in ProducerKind::all() {
        for count in [1, 25, 50, 100] {
            push(format!("{count} {}", kind.name()), kind.icon(), Requirement::ProducerCount { producer: kind, count });
        }
    }

    for n in [1, 5, 10, 25, 50, 100] {
        push(format!("{n} Golden Catches"), "✨", Requirement::EventCatches(n));
    }

    for n in [1, 2, 5, 10, 25] {
        push(format!("Reboot {n}x"), "🔄", Requirement::Reboots(n));
    }

    for (name, icon, secret) in [
        ("Night Owl", "🦉", Secret::Midnight),
        ("Patience", "🧘", Secret::Idle60),
        ("Speed Demon", "👹", Secret::Speed50),
        ("Diamond Finder", "💎", Secret::Diamond),
        ("Konami Master", "🎮", Secret::Konami),
        ("Overcharger", "⚡", Secret::Overcharge),
        ("Dev Spy", "🔍", Secret::DevNotes),
        ("Retro Gamer", "👾", Secret::Retro),
        ("Name Game", "🏷️", Secret::NameGame),
        ("Void Walker", "🕳️", Secret::Void),
    ] {
        push(name.into(), icon, Requirement::Secret(secret));
    }

    achs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn producer_index_matches_display_order() {
        for (i, kind) in ProducerKind::all().iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(ProducerKind::all().len(), ProducerKind::COUNT);
    }

    #[test]
    fn producer_ids_round_trip() {
        for &kind in ProducerKind::all() {
            assert_eq!(ProducerKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ProducerKind::from_id("cookie_jar"), None);
    }

    #[test]
    fn producers_get_pricier_and_stronger() {
        for pair in ProducerKind::all().windows(2) {
            assert!(pair[1].base_cost() > pair[0].base_cost());
            assert!(pair[1].base_rate() > pair[0].base_rate());
        }
    }

    #[test]
    fn upgrade_ids_are_positions() {
        let cat = catalog();
        for (i, up) in cat.upgrades.iter().enumerate() {
            assert_eq!(up.id as usize, i);
        }
        // 5 flat + 3 click mult + 36 producer tiers + 4 synergy + 4 global + 4 pets
        assert_eq!(cat.upgrades.len(), 56);
    }

    #[test]
    fn producer_tiers_are_priced_from_base_cost() {
        let cat = catalog();
        let better_farm = cat.upgrades.iter().find(|u| u.name == "Better Emoji Farm").unwrap();
        assert!((better_farm.cost - 1_300_000.0).abs() < 1e-6);
        assert_eq!(
            better_farm.requirement,
            Requirement::ProducerCount { producer: ProducerKind::EmojiFarm, count: 1 }
        );
    }

    #[test]
    fn achievement_table_shape() {
        let cat = catalog();
        // 12 + 14 + 11 + 48 + 6 + 5 + 10
        assert_eq!(cat.achievements.len(), 106);
        assert_eq!(cat.achievements.iter().filter(|a| a.is_secret()).count(), Secret::all().len());
        assert_eq!(cat.achievement(0).unwrap().requirement, Requirement::Clicks(1));
    }

    #[test]
    fn prestige_nodes_have_unique_ids() {
        let nodes = prestige_nodes();
        assert_eq!(nodes.len(), 20);
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        assert_eq!(prestige_node("aura_crit2").unwrap().cost, 12);
        assert!(prestige_node("aura_missing").is_none());
    }

    #[test]
    fn secret_keys_round_trip() {
        for &s in Secret::all() {
            assert_eq!(Secret::from_key(s.key()), Some(s));
        }
    }

    #[test]
    fn seasons_round_trip() {
        for &s in Season::all() {
            assert_eq!(Season::from_id(s.id()), Some(s));
        }
        assert_eq!(Season::from_id("winter"), None);
    }
}
