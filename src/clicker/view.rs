//! Read-only snapshots for the rendering collaborator.

use super::achievements::{requirement_met, requirement_visible};
use super::buffs::remaining_ms;
use super::catalog::{catalog, prestige_nodes, ProducerKind};
use super::economy::{can_buy_upgrade, producer_cost, resolve_quantity};
use super::prestige::{can_buy_node, prestige_gain};
use super::production::producer_output;
use super::state::{BuffKind, GameState};

#[derive(Clone, Debug, PartialEq)]
pub struct ProducerView {
    pub kind: ProducerKind,
    pub owned: u32,
    /// Units the current bulk-buy setting would purchase.
    pub quantity: u32,
    pub cost: f64,
    pub affordable: bool,
    /// This line's output before global multipliers.
    pub output: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeView {
    pub id: u32,
    pub name: String,
    pub icon: &'static str,
    pub description: String,
    pub cost: f64,
    pub purchased: bool,
    pub unlocked: bool,
    /// Shown in the store (half the unlock requirement reached).
    pub visible: bool,
    pub affordable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AchievementView {
    pub id: u32,
    /// `"???"` for unearned secrets.
    pub name: String,
    pub icon: &'static str,
    pub earned: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub owned: bool,
    pub affordable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrestigeView {
    /// Aura a reboot would grant now.
    pub gain: u64,
    pub balance: u64,
    pub unspent: u64,
    pub lifetime: u64,
    pub reboots: u32,
    pub nodes: Vec<NodeView>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BuffView {
    pub label: String,
    pub kind: BuffKind,
    pub magnitude: f64,
    pub remaining_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsView {
    pub currency: f64,
    pub lifetime_currency: f64,
    pub lifetime_clicks: u64,
    pub rate: f64,
    pub best_rate: f64,
    pub event_catches: u32,
    pub diamonds: u32,
    pub reboots: u32,
    pub played_ms: i64,
    pub achievements_earned: usize,
    pub achievements_total: usize,
}

pub fn producer_views(state: &GameState) -> Vec<ProducerView> {
    ProducerKind::all()
        .iter()
        .map(|&kind| {
            let quantity = resolve_quantity(state, kind, state.settings.bulk_buy);
            let cost = producer_cost(state, kind, quantity);
            ProducerView {
                kind,
                owned: state.owned(kind),
                quantity,
                cost,
                affordable: cost <= state.currency,
                output: producer_output(state, kind),
            }
        })
        .collect()
}

pub fn upgrade_views(state: &GameState) -> Vec<UpgradeView> {
    catalog()
        .upgrades
        .iter()
        .map(|up| UpgradeView {
            id: up.id,
            name: up.name.clone(),
            icon: up.icon,
            description: up.description.clone(),
            cost: up.cost,
            purchased: state.has_upgrade(up.id),
            unlocked: requirement_met(state, &up.requirement),
            visible: requirement_visible(state, &up.requirement),
            affordable: can_buy_upgrade(state, up.id),
        })
        .collect()
}

pub fn achievement_views(state: &GameState) -> Vec<AchievementView> {
    catalog()
        .achievements
        .iter()
        .map(|a| {
            let earned = state.has_achievement(a.id);
            AchievementView {
                id: a.id,
                name: if a.is_secret() && !earned {
                    "???".into()
                } else {
                    a.name.clone()
                },
                icon: if a.is_secret() && !earned { "❓" } else { a.icon },
                earned,
            }
        })
        .collect()
}

pub fn prestige_view(state: &GameState) -> PrestigeView {
    PrestigeView {
        gain: prestige_gain(state),
        balance: state.prestige_balance,
        unspent: state.prestige_available(),
        lifetime: state.prestige_lifetime,
        reboots: state.reboots,
        nodes: prestige_nodes()
            .iter()
            .map(|n| NodeView {
                id: n.id,
                name: n.name,
                icon: n.icon,
                description: n.description,
                cost: n.cost,
                owned: state.has_node(n.id),
                affordable: can_buy_node(state, n.id),
            })
            .collect(),
    }
}

pub fn buff_views(state: &GameState, now_ms: i64) -> Vec<BuffView> {
    state
        .buffs
        .iter()
        .map(|b| BuffView {
            label: b.label.clone(),
            kind: b.kind,
            magnitude: b.magnitude,
            remaining_ms: remaining_ms(b, now_ms),
        })
        .collect()
}

pub fn stats_view(state: &GameState) -> StatsView {
    StatsView {
        currency: state.currency,
        lifetime_currency: state.lifetime_currency,
        lifetime_clicks: state.lifetime_clicks,
        rate: state.rate,
        best_rate: state.best_rate,
        event_catches: state.event_catches,
        diamonds: state.diamonds,
        reboots: state.reboots,
        played_ms: state.played_ms,
        achievements_earned: state.achievements.len(),
        achievements_total: catalog().achievements.len(),
    }
}
