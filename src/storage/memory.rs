// SPDX-License-Identifier: MPL-2.0
//! In-memory storage backend.

use super::Storage;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Volatile slots, optionally capped by a byte quota.
///
/// The quota counts the UTF-8 length of every key and value, the same way a
/// browser accounts local storage. A write that would exceed it fails with
/// [`Error::QuotaExceeded`] and leaves the previous contents untouched.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: RefCell::default(),
            quota: Some(quota),
        }
    }

    /// Pre-populated storage, as left behind by a previous session.
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let slots = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            slots: RefCell::new(slots),
            quota: None,
        }
    }

    /// Total bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let replaced = self
                .slots
                .borrow()
                .get(key)
                .map_or(0, |old| key.len() + old.len());
            let projected = self.used_bytes() - replaced + key.len() + value.len();
            if projected > quota {
                return Err(Error::QuotaExceeded {
                    key: key.to_string(),
                    quota,
                });
            }
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.slots.borrow().keys().cloned().collect()
    }
}
