//! Emoji Clicker: the economy and progression engine.
//!
//! [`Engine`] owns the single [`GameState`] and every runtime collaborator
//! (save slot, random source, clock, task scheduler). The host calls
//! [`Engine::frame`] once per rendering frame and forwards player actions to
//! the write surface; everything it needs to draw comes back through the read
//! surface and [`Engine::drain_notifications`].

pub mod achievements;
pub mod buffs;
pub mod catalog;
pub mod economy;
pub mod events;
pub mod format;
pub mod offline;
pub mod prestige;
pub mod production;
pub mod save;
pub mod schedule;
pub mod secrets;
pub mod state;
pub mod view;

#[cfg(test)]
mod simulator;

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{ConfigError, CosmeticError, PrestigeError, PurchaseError, SaveError};
use crate::random::RandomSource;
use crate::storage::SaveStore;
use crate::time::{Clock, FrameClock};

use catalog::{ProducerKind, Season, Secret, NEWS_LINES};
use economy::ProducerPurchase;
use events::{ActiveEvent, EventOutcome, EventVariant};
use offline::OfflineGrant;
use prestige::RebootOutcome;
use schedule::{Scheduler, Task};
use secrets::{Key, SecretTracker};
use state::{BuffKind, BulkBuy, GameState, Milestone, Settings};

/// How often the midnight secret is checked. Shorter than a minute so the
/// 00:00 window is never skipped.
const MIDNIGHT_CHECK_MS: i64 = 30_000;

/// Something the player should be told about.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    AchievementEarned {
        id: u32,
        name: String,
        icon: &'static str,
    },
    Event(EventOutcome),
    OfflineGrant(OfflineGrant),
    Reboot(RebootOutcome),
    DiamondFound,
    SecretFound(Secret),
    ImportSucceeded,
    ImportFailed(String),
    SaveFailed(String),
}

pub struct Engine {
    state: GameState,
    config: EngineConfig,
    store: Box<dyn SaveStore>,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    frame_clock: FrameClock,
    scheduler: Scheduler,
    event: Option<ActiveEvent>,
    /// A void event was claimed and awaits accept or decline.
    void_pending: bool,
    /// Rain drops can be caught until this time.
    rain_until_ms: Option<i64>,
    secrets: SecretTracker,
    notifications: VecDeque<Notification>,
    ticker_index: usize,
    /// Cosmetic only and never saved.
    retro: bool,
}

impl Engine {
    /// Boot the engine: load the save slot (or start fresh), apply any
    /// offline grant and arm the timers.
    pub fn new(
        config: EngineConfig,
        mut store: Box<dyn SaveStore>,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let now = clock.now_ms();
        let (state, loaded) = save::load_or_fresh(store.as_mut(), now);
        let mut engine = Self {
            state,
            config,
            store,
            rng,
            clock,
            frame_clock: FrameClock::new(),
            scheduler: Scheduler::new(),
            event: None,
            void_pending: false,
            rain_until_ms: None,
            secrets: SecretTracker::new(now),
            notifications: VecDeque::new(),
            ticker_index: 0,
            retro: false,
        };
        engine.start(now, loaded);
        Ok(engine)
    }

    /// Browser engine: console logging, `localStorage` slot, entropy-seeded
    /// randomness and the wall clock.
    #[cfg(target_arch = "wasm32")]
    pub fn browser(config: EngineConfig) -> Result<Self, ConfigError> {
        crate::logging::init(log::Level::Info);
        Self::new(
            config,
            Box::new(crate::storage::LocalStorageStore::new(save::STORAGE_KEY)),
            Box::new(crate::random::SeededRandom::from_entropy()),
            Box::new(crate::time::SystemClock),
        )
    }

    /// (Re)start the session on the current state.
    fn start(&mut self, now: i64, loaded: bool) {
        self.frame_clock.reset();
        self.scheduler.clear();
        self.event = None;
        self.void_pending = false;
        self.rain_until_ms = None;
        self.secrets = SecretTracker::new(now);

        if loaded {
            if let Some(grant) = offline::apply_offline(&mut self.state, now, &self.config) {
                self.notify(Notification::OfflineGrant(grant));
            }
        } else {
            self.state
                .add_milestone("Game started!", now, self.config.milestone_log_cap);
        }
        production::refresh_rate(&mut self.state);
        self.state.last_tick_ms = now;
        self.check_achievements();

        self.scheduler
            .every(Task::Autosave, self.config.autosave_interval_ms, now);
        self.scheduler
            .every(Task::AchievementScan, self.config.achievement_interval_ms, now);
        self.scheduler
            .every(Task::Ticker, self.config.ticker_interval_ms, now);
        self.scheduler.every(Task::MidnightCheck, MIDNIGHT_CHECK_MS, now);
        self.arm_next_event(now);
        info!("engine started (loaded save: {})", loaded);
    }

    // ── Frame tick ──────────────────────────────────────────────

    /// Advance one rendering frame: expire buffs, accrue production and
    /// run every timer that came due.
    pub fn frame(&mut self) {
        let now = self.clock.now_ms();
        let dt = self.frame_clock.update(now);

        buffs::prune_expired(&mut self.state, now);
        production::refresh_rate(&mut self.state);
        if dt > 0.0 && dt < self.config.max_frame_dt_secs {
            production::accrue(&mut self.state, dt, self.config.max_frame_dt_secs);
            self.state.played_ms = self.state.played_ms.saturating_add((dt * 1000.0).round() as i64);
        } else if dt >= self.config.max_frame_dt_secs {
            debug!("skipping accrual for a {:.1}s frame", dt);
        }
        self.state.last_tick_ms = now;
        if self.rain_until_ms.is_some_and(|t| now >= t) {
            self.rain_until_ms = None;
        }

        for task in self.scheduler.due(now) {
            self.run_task(task, now);
        }
    }

    fn run_task(&mut self, task: Task, now: i64) {
        match task {
            Task::Autosave => self.save_now(now),
            Task::AchievementScan => {
                if self.secrets.check_idle(now) {
                    self.unlock_secret(Secret::Idle60);
                }
                self.check_achievements();
            }
            Task::Ticker => {
                self.ticker_index = (self.ticker_index + 1) % NEWS_LINES.len();
            }
            Task::MidnightCheck => {
                if secrets::is_local_midnight(now) {
                    self.unlock_secret(Secret::Midnight);
                }
            }
            Task::EventSpawn => {
                let event = events::spawn(&self.state, now, &self.config, self.rng.as_mut());
                debug!("spawned {:?} event until {}", event.variant, event.expires_at_ms);
                self.scheduler.once(Task::EventExpire, event.expires_at_ms);
                self.event = Some(event);
            }
            Task::EventExpire => {
                if self.event.take().is_some() {
                    debug!("event expired unclaimed");
                }
                self.arm_next_event(now);
            }
            Task::Overcharge => {
                self.unlock_secret(Secret::Overcharge);
                buffs::add_buff(
                    &mut self.state,
                    BuffKind::ClickMultiplier,
                    secrets::OVERCHARGE_MULT,
                    secrets::OVERCHARGE_MS,
                    "Overcharged ⚡",
                    now,
                );
            }
        }
    }

    fn arm_next_event(&mut self, now: i64) {
        let delay = events::next_delay_ms(&self.state, &self.config, self.rng.as_mut());
        self.scheduler.once(Task::EventSpawn, now + delay);
    }

    /// Persist now; any save restarts the autosave period.
    fn save_now(&mut self, now: i64) {
        self.scheduler.reset(Task::Autosave, now);
        self.state.last_save_ms = now;
        let result = save::serialize(&self.state).and_then(|text| self.store.save(&text));
        if let Err(e) = result {
            warn!("save failed: {e}");
            self.notify(Notification::SaveFailed(e.to_string()));
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    fn check_achievements(&mut self) {
        let earned = achievements::evaluate(&mut self.state);
        if earned.is_empty() {
            return;
        }
        for ach in earned {
            info!("achievement earned: {}", ach.name);
            self.notify(Notification::AchievementEarned {
                id: ach.id,
                name: ach.name.clone(),
                icon: ach.icon,
            });
        }
        production::refresh_rate(&mut self.state);
    }

    fn unlock_secret(&mut self, secret: Secret) {
        if secrets::unlock(&mut self.state, secret) {
            info!("secret found: {}", secret.key());
            self.notify(Notification::SecretFound(secret));
            self.check_achievements();
        }
    }

    // ── Write surface ───────────────────────────────────────────

    /// Tap the main target. Returns the emojis credited.
    pub fn click(&mut self) -> f64 {
        let now = self.clock.now_ms();
        let value = production::click_yield(&self.state, self.rng.as_mut());
        self.state.earn(value);
        self.state.lifetime_clicks = self.state.lifetime_clicks.saturating_add(1);

        if self.rng.chance(self.config.diamond_chance) {
            self.state.diamonds = self.state.diamonds.saturating_add(1);
            self.notify(Notification::DiamondFound);
            self.unlock_secret(Secret::Diamond);
        }
        if self.secrets.record_click(now) {
            self.unlock_secret(Secret::Speed50);
            let (effect, outcome) = events::trigger_golden(&mut self.state, self.rng.as_mut(), now);
            if effect == events::GoldenEffect::EmojiRain {
                self.rain_until_ms = Some(now + events::RAIN_MS);
            }
            production::refresh_rate(&mut self.state);
            self.notify(Notification::Event(outcome));
        }
        value
    }

    /// Buy exactly `quantity` units of `kind`.
    pub fn buy_producer(
        &mut self,
        kind: ProducerKind,
        quantity: u32,
    ) -> Result<ProducerPurchase, PurchaseError> {
        let purchase = economy::purchase_producer(&mut self.state, kind, quantity)?;
        if purchase.first {
            let now = self.clock.now_ms();
            self.state.add_milestone(
                format!("First {}!", kind.name()),
                now,
                self.config.milestone_log_cap,
            );
        }
        production::refresh_rate(&mut self.state);
        Ok(purchase)
    }

    /// Buy using the bulk-buy setting.
    pub fn buy_producer_bulk(&mut self, kind: ProducerKind) -> Result<ProducerPurchase, PurchaseError> {
        let quantity = economy::resolve_quantity(&self.state, kind, self.state.settings.bulk_buy);
        self.buy_producer(kind, quantity)
    }

    /// [`Engine::buy_producer`] by catalog id, as the renderer reports it.
    pub fn buy_producer_by_id(
        &mut self,
        id: &str,
        quantity: u32,
    ) -> Result<ProducerPurchase, PurchaseError> {
        let kind = ProducerKind::from_id(id).ok_or_else(|| PurchaseError::UnknownProducer(id.to_string()))?;
        self.buy_producer(kind, quantity)
    }

    pub fn buy_upgrade(&mut self, id: u32) -> Result<f64, PurchaseError> {
        let cost = economy::purchase_upgrade(&mut self.state, id)?;
        production::refresh_rate(&mut self.state);
        Ok(cost)
    }

    /// Trade the run for aura. Saves immediately on success.
    pub fn reboot(&mut self) -> Result<RebootOutcome, PrestigeError> {
        let now = self.clock.now_ms();
        let outcome = prestige::reboot(&mut self.state)?;
        self.state.add_milestone(
            format!("Reboot #{} (+{} ✨ Aura)", outcome.reboots, outcome.gain),
            now,
            self.config.milestone_log_cap,
        );
        self.rain_until_ms = None;
        production::refresh_rate(&mut self.state);
        self.check_achievements();
        self.notify(Notification::Reboot(outcome.clone()));
        self.save_now(now);
        Ok(outcome)
    }

    pub fn buy_prestige_node(&mut self, id: &str) -> Result<u64, PurchaseError> {
        let cost = prestige::buy_node(&mut self.state, id)?;
        production::refresh_rate(&mut self.state);
        Ok(cost)
    }

    pub fn update_settings(&mut self, mut settings: Settings) {
        settings.volume = if settings.volume.is_finite() {
            settings.volume.clamp(0.0, 1.0)
        } else {
            Settings::default().volume
        };
        self.state.settings = settings;
    }

    pub fn set_bulk_buy(&mut self, bulk: BulkBuy) {
        self.state.settings.bulk_buy = bulk;
    }

    /// Portable backup string of the current state.
    pub fn export_save(&self) -> Result<String, SaveError> {
        save::export_text(&self.state)
    }

    /// Replace the game with an exported save and restart the session. On
    /// failure nothing changes and the player is notified.
    pub fn import_save(&mut self, text: &str) -> Result<(), SaveError> {
        let now = self.clock.now_ms();
        let imported = match save::import_text(text, now) {
            Ok(state) => state,
            Err(e) => {
                warn!("import rejected: {e}");
                self.notify(Notification::ImportFailed(e.to_string()));
                return Err(e);
            }
        };
        self.state = imported;
        self.start(now, true);
        self.save_now(now);
        self.notify(Notification::ImportSucceeded);
        Ok(())
    }

    /// Wipe the save slot and start over from nothing.
    pub fn hard_reset(&mut self) {
        let now = self.clock.now_ms();
        if let Err(e) = self.store.clear() {
            warn!("could not clear save slot: {e}");
        }
        self.state = GameState::new(now);
        self.notifications.clear();
        self.start(now, false);
        info!("hard reset");
    }

    /// Claim the on-screen event. `None` when nothing is claimable.
    pub fn claim_event(&mut self) -> Option<EventOutcome> {
        let now = self.clock.now_ms();
        match &self.event {
            Some(event) if now < event.expires_at_ms => {}
            _ => return None,
        }
        let event = self.event.take()?;
        self.scheduler.cancel(Task::EventExpire);
        self.state.event_catches = self.state.event_catches.saturating_add(1);
        self.arm_next_event(now);

        let outcome = match event.variant {
            EventVariant::Golden => {
                let (effect, outcome) = events::trigger_golden(&mut self.state, self.rng.as_mut(), now);
                if effect == events::GoldenEffect::EmojiRain {
                    self.rain_until_ms = Some(now + events::RAIN_MS);
                }
                outcome
            }
            EventVariant::Void => {
                self.void_pending = true;
                EventOutcome::VoidOffered
            }
        };
        production::refresh_rate(&mut self.state);
        self.notify(Notification::Event(outcome.clone()));
        Some(outcome)
    }

    /// Answer a pending void offer.
    pub fn resolve_void(&mut self, accept: bool) -> Option<EventOutcome> {
        if !self.void_pending {
            return None;
        }
        self.void_pending = false;
        let now = self.clock.now_ms();
        let outcome = events::resolve_void(&mut self.state, accept, self.rng.as_mut(), now);
        if accept {
            self.check_achievements();
        }
        production::refresh_rate(&mut self.state);
        self.notify(Notification::Event(outcome.clone()));
        Some(outcome)
    }

    /// The renderer caught a falling rain emoji.
    pub fn catch_rain_drop(&mut self) -> Option<f64> {
        let now = self.clock.now_ms();
        match self.rain_until_ms {
            Some(until) if now < until => Some(events::catch_rain_drop(&mut self.state, self.rng.as_mut())),
            _ => None,
        }
    }

    pub fn key_pressed(&mut self, key: Key) {
        if self.secrets.record_key(key) {
            if !self.state.unlocked_skins.iter().any(|s| s == "🤯") {
                self.state.unlocked_skins.push("🤯".to_string());
            }
            self.unlock_secret(Secret::Konami);
        }
    }

    /// The player started holding the main target.
    pub fn hold_start(&mut self) {
        let now = self.clock.now_ms();
        self.scheduler.once(Task::Overcharge, now + secrets::HOLD_MS);
    }

    pub fn hold_end(&mut self) {
        self.scheduler.cancel(Task::Overcharge);
    }

    pub fn open_dev_notes(&mut self) {
        self.unlock_secret(Secret::DevNotes);
    }

    /// Flip retro mode. Returns the new value.
    pub fn toggle_retro(&mut self) -> bool {
        self.retro = !self.retro;
        if self.retro {
            self.unlock_secret(Secret::Retro);
        }
        self.retro
    }

    pub fn set_save_name(&mut self, name: &str) {
        let name: String = name.chars().take(secrets::SAVE_NAME_MAX).collect();
        let special = secrets::is_special_name(&name);
        self.state.save_name = name;
        if special {
            self.unlock_secret(Secret::NameGame);
        }
    }

    pub fn select_skin(&mut self, skin: &str) -> Result<(), CosmeticError> {
        if !self.state.unlocked_skins.iter().any(|s| s == skin) {
            return Err(CosmeticError::SkinLocked(skin.to_string()));
        }
        self.state.active_skin = skin.to_string();
        Ok(())
    }

    /// Choose a season theme, or `None` for no theme.
    pub fn select_season(&mut self, season: Option<Season>) -> Result<(), CosmeticError> {
        if season.is_some() && !self.state.seasons_unlocked() {
            return Err(CosmeticError::SeasonsLocked);
        }
        self.state.season = season;
        Ok(())
    }

    /// The page is being hidden: persist now.
    pub fn suspend(&mut self) {
        let now = self.clock.now_ms();
        self.save_now(now);
    }

    /// The page is visible again: pay out the absence and restart frame timing.
    pub fn resume(&mut self) -> Option<OfflineGrant> {
        let now = self.clock.now_ms();
        let grant = offline::apply_offline(&mut self.state, now, &self.config);
        if let Some(g) = &grant {
            self.notify(Notification::OfflineGrant(g.clone()));
        }
        self.state.last_tick_ms = now;
        self.frame_clock.reset();
        grant
    }

    // ── Read surface ────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn currency(&self) -> f64 {
        self.state.currency
    }

    pub fn rate(&self) -> f64 {
        self.state.rate
    }

    /// Click value before any critical roll.
    pub fn click_value(&self) -> f64 {
        production::click_base(&self.state)
    }

    pub fn rate_breakdown(&self) -> production::RateBreakdown {
        production::rate_breakdown(&self.state)
    }

    pub fn producers(&self) -> Vec<view::ProducerView> {
        view::producer_views(&self.state)
    }

    pub fn upgrades(&self) -> Vec<view::UpgradeView> {
        view::upgrade_views(&self.state)
    }

    pub fn achievements(&self) -> Vec<view::AchievementView> {
        view::achievement_views(&self.state)
    }

    pub fn prestige(&self) -> view::PrestigeView {
        view::prestige_view(&self.state)
    }

    pub fn buffs(&self) -> Vec<view::BuffView> {
        view::buff_views(&self.state, self.clock.now_ms())
    }

    pub fn stats(&self) -> view::StatsView {
        view::stats_view(&self.state)
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.state.milestones
    }

    pub fn active_event(&self) -> Option<&ActiveEvent> {
        self.event.as_ref()
    }

    pub fn void_pending(&self) -> bool {
        self.void_pending
    }

    pub fn rain_active(&self) -> bool {
        self.rain_until_ms.is_some_and(|t| self.clock.now_ms() < t)
    }

    pub fn retro_mode(&self) -> bool {
        self.retro
    }

    pub fn ticker_line(&self) -> &'static str {
        NEWS_LINES[self.ticker_index % NEWS_LINES.len()]
    }

    /// Format an amount the way the player's settings ask for.
    pub fn format_amount(&self, n: f64) -> String {
        format::format_number(n, self.state.settings.sci_notation)
    }

    /// Take every queued notification, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }
}
