//! Emoji Clicker セーブ/ロード機能。
//!
//! ## バージョニング方針
//!
//! - `SAVE_VERSION`: 現在のセーブ形式バージョン。フィールド追加時にインクリメントする。
//! - `MIN_COMPATIBLE_VERSION`: 互換性を維持できる最小バージョン。
//!   既存フィールドの意味変更や削除など破壊的変更を行った場合のみインクリメントする。
//!
//! 読み込みは「新規状態へのマージ」で行う。新規状態をいったん JSON に
//! 書き出し、保存データに存在するキーだけを上書きしてから復元するので、
//! 旧バージョンに無かったフィールドは新規状態の値になる。
//! 一時的なバフは保存しない。

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::{catalog, prestige_node, ProducerKind, Season, Secret, ALL_SKINS, DEFAULT_SKINS};
use super::economy::MAX_OWNED;
use super::state::{GameState, Milestone, Settings};
use crate::error::SaveError;
use crate::storage::SaveStore;

/// セーブデータのフォーマットバージョン。
pub const SAVE_VERSION: u32 = 4;

/// 互換性を維持できる最小バージョン。
/// この値以上のセーブデータは、不足フィールドを新規状態の値で補完して読み込む。
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// ストレージのキー。
pub const STORAGE_KEY: &str = "emoji_clicker_save_v4";

/// 読み込み時に残すマイルストーンの最大数。
const MILESTONE_CAP: usize = 100;

/// シリアライズ用のセーブデータ構造体。
#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize)]
struct GameSave {
    currency: f64,
    lifetime_currency: f64,
    lifetime_clicks: u64,
    click_power: f64,
    rate: f64,
    best_rate: f64,

    /// プロデューサー id → 所持数。
    producers: BTreeMap<String, u32>,
    upgrades: Vec<u32>,
    achievements: Vec<u32>,

    // 転生データ
    prestige_balance: u64,
    prestige_spent: u64,
    prestige_lifetime: u64,
    prestige_nodes: Vec<String>,
    reboots: u32,

    // 統計・シークレット
    event_catches: u32,
    diamonds: u32,
    secrets: Vec<String>,

    // 見た目
    unlocked_skins: Vec<String>,
    active_skin: String,
    season: Option<String>,
    pet_hatched: bool,
    save_name: String,
    settings: Settings,

    // 時刻 (ms)
    started_at_ms: i64,
    last_tick_ms: i64,
    last_save_ms: i64,
    played_ms: i64,
    milestones: Vec<Milestone>,
}

/// GameState からセーブ用データを抽出する。
fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            currency: state.currency,
            lifetime_currency: state.lifetime_currency,
            lifetime_clicks: state.lifetime_clicks,
            click_power: state.click_power,
            rate: state.rate,
            best_rate: state.best_rate,
            producers: ProducerKind::all()
                .iter()
                .map(|&k| (k.id().to_string(), state.owned(k)))
                .collect(),
            upgrades: state.upgrades.clone(),
            achievements: state.achievements.clone(),
            prestige_balance: state.prestige_balance,
            prestige_spent: state.prestige_spent,
            prestige_lifetime: state.prestige_lifetime,
            prestige_nodes: state.prestige_nodes.clone(),
            reboots: state.reboots,
            event_catches: state.event_catches,
            diamonds: state.diamonds,
            secrets: state.secrets.iter().map(|s| s.key().to_string()).collect(),
            unlocked_skins: state.unlocked_skins.clone(),
            active_skin: state.active_skin.clone(),
            season: state.season.map(|s| s.id().to_string()),
            pet_hatched: state.pet_hatched,
            save_name: state.save_name.clone(),
            settings: state.settings.clone(),
            started_at_ms: state.started_at_ms,
            last_tick_ms: state.last_tick_ms,
            last_save_ms: state.last_save_ms,
            played_ms: state.played_ms,
            milestones: state.milestones.clone(),
        },
    }
}

/// 非有限値・負値を 0 にする。
fn finite_non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// 順序を保ったまま重複と不正値を取り除く。
fn dedup_filter<T: PartialEq + Clone>(items: &[T], keep: impl Fn(&T) -> bool) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if keep(item) && !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

/// セーブデータを GameState に復元する。
/// カタログに存在しない id は無視する。
fn apply_save(save: GameSave) -> GameState {
    let cat = catalog();
    let mut state = GameState::new(save.started_at_ms);

    state.currency = finite_non_negative(save.currency);
    state.lifetime_currency = finite_non_negative(save.lifetime_currency);
    state.lifetime_clicks = save.lifetime_clicks;
    state.click_power = finite_non_negative(save.click_power);
    state.rate = finite_non_negative(save.rate);
    state.best_rate = finite_non_negative(save.best_rate);

    // プロデューサー復元
    for (id, count) in &save.producers {
        if let Some(kind) = ProducerKind::from_id(id) {
            state.producers[kind.index()] = (*count).min(MAX_OWNED);
        }
    }

    state.upgrades = dedup_filter(&save.upgrades, |id| cat.upgrade(*id).is_some());
    state.achievements = dedup_filter(&save.achievements, |id| cat.achievement(*id).is_some());

    // 転生データ復元
    state.prestige_balance = save.prestige_balance;
    state.prestige_spent = save.prestige_spent;
    state.prestige_lifetime = save.prestige_lifetime;
    state.prestige_nodes = dedup_filter(&save.prestige_nodes, |id| prestige_node(id).is_some());
    state.reboots = save.reboots;

    state.event_catches = save.event_catches;
    state.diamonds = save.diamonds;
    let secrets: Vec<Secret> = save.secrets.iter().filter_map(|k| Secret::from_key(k)).collect();
    state.secrets = dedup_filter(&secrets, |_| true);

    // 見た目 (デフォルトのスキンは常に先頭に残す)
    let mut skins: Vec<String> = DEFAULT_SKINS.iter().map(|s| s.to_string()).collect();
    for skin in &save.unlocked_skins {
        if ALL_SKINS.contains(&skin.as_str()) && !skins.contains(skin) {
            skins.push(skin.clone());
        }
    }
    state.active_skin = if skins.contains(&save.active_skin) {
        save.active_skin
    } else {
        DEFAULT_SKINS[0].to_string()
    };
    state.unlocked_skins = skins;
    state.season = save.season.as_deref().and_then(Season::from_id);
    state.pet_hatched = save.pet_hatched;
    state.save_name = save.save_name;

    state.settings = save.settings;
    state.settings.volume = state.settings.volume.clamp(0.0, 1.0);
    if !state.settings.volume.is_finite() {
        state.settings.volume = Settings::default().volume;
    }

    // 負のタイムスタンプは 0 扱い (オフライン計算で桁あふれさせない)
    state.started_at_ms = save.started_at_ms.max(0);
    state.last_tick_ms = save.last_tick_ms.max(0);
    state.last_save_ms = save.last_save_ms.max(0);
    state.played_ms = save.played_ms.max(0);
    state.milestones = save.milestones;
    if state.milestones.len() > MILESTONE_CAP {
        let excess = state.milestones.len() - MILESTONE_CAP;
        state.milestones.drain(..excess);
    }
    state
}

/// ゲーム状態を JSON 文字列にする。
pub fn serialize(state: &GameState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&extract_save(state))?)
}

/// JSON 文字列から GameState を復元する。
///
/// バージョンタグが無いもの、`MIN_COMPATIBLE_VERSION` 未満のもの、
/// JSON として壊れているものはエラー。不足フィールドは `now_ms` 時点の
/// 新規状態の値で補完する。
pub fn deserialize(text: &str, now_ms: i64) -> Result<GameState, SaveError> {
    let raw: Value = serde_json::from_str(text)?;
    let version = raw
        .get("version")
        .and_then(Value::as_u64)
        .filter(|&v| v > 0)
        .ok_or(SaveError::MissingVersion)? as u32;
    if version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::IncompatibleVersion {
            found: version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    if version < SAVE_VERSION {
        info!("migrating save from version {} to {}", version, SAVE_VERSION);
    }

    // 新規状態に保存済みのキーを重ねる
    let mut merged = serde_json::to_value(extract_save(&GameState::new(now_ms)).game)?;
    if let (Some(base), Some(saved)) = (merged.as_object_mut(), raw.get("game").and_then(Value::as_object)) {
        for (key, value) in saved {
            if base.contains_key(key) && (!value.is_null() || key == "season") {
                base.insert(key.clone(), value.clone());
            }
        }
    }
    let game: GameSave = serde_json::from_value(merged)?;
    Ok(apply_save(game))
}

/// エクスポート用の文字列 (JSON を base64 で包んだもの)。
pub fn export_text(state: &GameState) -> Result<String, SaveError> {
    Ok(STANDARD.encode(serialize(state)?))
}

/// エクスポート文字列を復元する。失敗しても呼び出し側の状態には触れない。
pub fn import_text(text: &str, now_ms: i64) -> Result<GameState, SaveError> {
    let bytes = STANDARD.decode(text.trim()).map_err(|_| SaveError::Decode)?;
    let json = String::from_utf8(bytes).map_err(|_| SaveError::Decode)?;
    deserialize(&json, now_ms)
}

/// ストレージから読み込む。無い・壊れている場合は新規状態。
/// 壊れたデータはスロットに残したまま (次のオートセーブで上書きされる)。
/// 二つ目の値は読み込めたかどうか。
pub fn load_or_fresh(store: &mut dyn SaveStore, now_ms: i64) -> (GameState, bool) {
    let text = match store.load() {
        Ok(Some(t)) => t,
        Ok(None) => return (GameState::new(now_ms), false),
        Err(e) => {
            warn!("save slot unreadable, starting fresh: {e}");
            return (GameState::new(now_ms), false);
        }
    };
    match deserialize(&text, now_ms) {
        Ok(state) => (state, true),
        Err(e) => {
            warn!("ignoring corrupt save: {e}");
            (GameState::new(now_ms), false)
        }
    }
}
