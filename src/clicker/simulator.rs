//! Balance simulator for Emoji Clicker.
//! Run with: cargo test simulate_greedy -- --nocapture

use super::catalog::{catalog, ProducerKind, UpgradeEffect};
use super::format::{format_duration, format_number};
use super::production::{click_base, compute_rate};
use super::state::GameState;
use super::Engine;
use crate::config::EngineConfig;
use crate::random::SeededRandom;
use crate::storage::MemoryStore;
use crate::time::ManualClock;

/// What to purchase next.
enum Purchase {
    Producer(ProducerKind),
    Upgrade(u32),
}

const CLICKS_PER_SECOND: u32 = 5;
const FRAMES_PER_SECOND: i64 = 4;

/// Rate gain of a hypothetical change, measured on a scratch copy.
fn gain_after(state: &GameState, change: impl FnOnce(&mut GameState)) -> f64 {
    let mut scratch = state.clone();
    change(&mut scratch);
    let rate_gain = compute_rate(&scratch) - compute_rate(state);
    let click_gain = (click_base(&scratch) - click_base(state)) * CLICKS_PER_SECOND as f64;
    rate_gain + click_gain
}

/// Find the affordable purchase with the shortest payback time.
fn find_best_purchase(state: &GameState) -> Option<Purchase> {
    let mut best: Option<(f64, Purchase)> = None; // (payback_seconds, purchase)

    for &kind in ProducerKind::all() {
        let cost = super::economy::producer_cost(state, kind, 1);
        if cost > state.currency {
            continue;
        }
        let gain = gain_after(state, |s| s.producers[kind.index()] += 1);
        if gain > 0.0 {
            let payback = cost / gain;
            let dominated = best.as_ref().is_some_and(|(bp, _)| *bp <= payback);
            if !dominated {
                best = Some((payback, Purchase::Producer(kind)));
            }
        }
    }

    for up in &catalog().upgrades {
        if !super::economy::can_buy_upgrade(state, up.id) {
            continue;
        }
        let gain = gain_after(state, |s| s.upgrades.push(up.id));
        // Achievement scaling pays off later; keep it at low priority
        let payback = if gain > 0.0 {
            up.cost / gain
        } else if matches!(up.effect, UpgradeEffect::AchievementScaling { .. }) && state.rate > 0.0 {
            up.cost / state.rate * 100.0
        } else {
            continue;
        };
        let dominated = best.as_ref().is_some_and(|(bp, _)| *bp <= payback);
        if !dominated {
            best = Some((payback, Purchase::Upgrade(up.id)));
        }
    }

    best.map(|(_, p)| p)
}

fn report_stats(engine: &Engine, seconds: u32, purchases_made: u32) {
    let state = engine.state();
    eprintln!("┌─── {} ─────────────────────────", format_duration(seconds as f64));
    eprintln!(
        "│ Emojis: {}  EPS: {}  Clicks: {}",
        format_number(state.currency, false),
        format_number(state.rate, false),
        state.lifetime_clicks
    );
    eprintln!(
        "│ Lifetime: {}  Purchases: {}  Achievements: {}",
        format_number(state.lifetime_currency, false),
        purchases_made,
        state.achievements.len()
    );
    let counts: Vec<String> = ProducerKind::all()
        .iter()
        .filter(|k| state.owned(**k) > 0)
        .map(|k| format!("{}:{}", k.name(), state.owned(*k)))
        .collect();
    eprintln!("│ Producers: {}", counts.join("  "));
    eprintln!("│ 購入済UP: {}", state.upgrades.len());
    eprintln!("└────────────────────────────────────");
}

/// Play greedily for `total_seconds`, claiming every event and declining
/// every void. Returns the final engine.
fn simulate(total_seconds: u32) -> Engine {
    let clock = ManualClock::new(0);
    let mut engine = Engine::new(
        EngineConfig::default(),
        Box::new(MemoryStore::new()),
        Box::new(SeededRandom::seeded(42)),
        Box::new(clock.clone()),
    )
    .unwrap();
    engine.frame();

    let mut total_purchases: u32 = 0;
    let mut last_purchase_time: u32 = 0;
    let mut max_idle_gap: u32 = 0;

    let report_times: Vec<u32> = vec![30, 60, 120, 300, 600, 900, 1200, 1800];
    let mut next_report_idx = 0;

    eprintln!("\n========================================");
    eprintln!("  Emoji Clicker バランスシミュレーター");
    eprintln!("  プレイ時間: {}分", total_seconds / 60);
    eprintln!("  クリック速度: {}/秒", CLICKS_PER_SECOND);
    eprintln!("========================================\n");

    for second in 1..=total_seconds {
        for _ in 0..CLICKS_PER_SECOND {
            engine.click();
        }
        for _ in 0..FRAMES_PER_SECOND {
            clock.advance(1_000 / FRAMES_PER_SECOND);
            engine.frame();
        }
        if engine.active_event().is_some() {
            engine.claim_event();
        }
        if engine.void_pending() {
            engine.resolve_void(false);
        }

        let mut bought_this_second = false;
        for _ in 0..20 {
            let bought = match find_best_purchase(engine.state()) {
                Some(Purchase::Producer(kind)) => engine.buy_producer(kind, 1).is_ok(),
                Some(Purchase::Upgrade(id)) => engine.buy_upgrade(id).is_ok(),
                None => false,
            };
            if !bought {
                break;
            }
            bought_this_second = true;
            total_purchases += 1;
        }

        if bought_this_second {
            max_idle_gap = max_idle_gap.max(second - last_purchase_time);
            last_purchase_time = second;
        }

        if next_report_idx < report_times.len() && second >= report_times[next_report_idx] {
            report_stats(&engine, second, total_purchases);
            next_report_idx += 1;
        }
    }

    eprintln!("\n======== 最終サマリー ========");
    report_stats(&engine, total_seconds, total_purchases);
    eprintln!("最大待ち時間: {}秒", max_idle_gap);
    eprintln!("==============================\n");
    engine.drain_notifications();
    engine
}

#[test]
fn simulate_greedy_30min() {
    let engine = simulate(1800);
    let state = engine.state();
    assert!(state.rate > 0.0);
    assert!(state.currency >= 0.0);
    assert!(state.lifetime_currency >= state.currency);
    assert_eq!(state.lifetime_clicks, 1800 * CLICKS_PER_SECOND as u64);
}
