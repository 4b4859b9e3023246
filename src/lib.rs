//! Emoji Clicker economy and progression engine.
//!
//! The crate is renderer-agnostic: a host (the browser page, a terminal
//! front end, a test) owns an [`Engine`], drives [`Engine::frame`] from its
//! render loop and draws from the engine's read surface.

pub mod clicker;
pub mod config;
pub mod error;
pub mod logging;
pub mod random;
pub mod storage;
pub mod time;

pub use clicker::catalog::{ProducerKind, Season, Secret};
pub use clicker::secrets::Key;
pub use clicker::state::{BulkBuy, GameState, Settings};
pub use clicker::{Engine, Notification};
pub use config::EngineConfig;
pub use error::{ConfigError, CosmeticError, PrestigeError, PurchaseError, SaveError};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use storage::{MemoryStore, SaveStore};
pub use time::{Clock, ManualClock, SystemClock};
