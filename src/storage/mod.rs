// SPDX-License-Identifier: MPL-2.0
//! Durable string key/value slots backing the persisted stores.
//!
//! A [`Storage`] backend plays the part of browser local storage: each slot is
//! a string key holding a string value, created on first write and never
//! removed by this crate. [`Persistence`] is the capability handed to stores;
//! it may carry no backend at all, in which case reads yield nothing and
//! writes are skipped.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use std::rc::Rc;

/// A string-keyed, string-valued persistence backend.
pub trait Storage {
    /// Returns the slot's contents, or `None` if it was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the slot.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Lists the keys currently holding a value, sorted.
    fn keys(&self) -> Vec<String>;
}

/// Storage access as seen by the stores.
///
/// Clones share the same backend.
#[derive(Clone, Default)]
pub struct Persistence {
    backend: Option<Rc<dyn Storage>>,
}

impl Persistence {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            backend: Some(Rc::new(storage)),
        }
    }

    pub fn from_rc(storage: Rc<dyn Storage>) -> Self {
        Self {
            backend: Some(storage),
        }
    }

    /// A runtime with no storage access.
    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Reads a slot. Always `Ok(None)` when storage is unavailable.
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        match &self.backend {
            Some(storage) => storage.get_item(key),
            None => Ok(None),
        }
    }

    /// Writes a slot. A no-op when storage is unavailable.
    pub fn write(&self, key: &str, value: &str) -> Result<()> {
        match &self.backend {
            Some(storage) => storage.set_item(key, value),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("available", &self.is_available())
            .finish()
    }
}
