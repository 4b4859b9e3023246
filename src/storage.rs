//! Save slots.
//!
//! The engine persists one text record through a [`SaveStore`]. The browser
//! build writes to `localStorage`; tests and native hosts use [`MemoryStore`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::SaveError;

/// A single save slot holding one serialized record.
pub trait SaveStore {
    fn load(&mut self) -> Result<Option<String>, SaveError>;
    fn save(&mut self, record: &str) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// In-memory slot. Clones share the slot, so a test can inspect what the
/// engine wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `record`.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(record.into()))),
        }
    }

    /// Current contents, without going through the trait.
    pub fn peek(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SaveStore for MemoryStore {
    fn load(&mut self) -> Result<Option<String>, SaveError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&mut self, record: &str) -> Result<(), SaveError> {
        *self.slot.borrow_mut() = Some(record.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// `window.localStorage` slot under a fixed key.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| SaveError::Storage("localStorage unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorageStore {
    fn load(&mut self) -> Result<Option<String>, SaveError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn save(&mut self, record: &str) -> Result<(), SaveError> {
        Self::storage()?
            .set_item(&self.key, record)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}
