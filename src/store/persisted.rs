// SPDX-License-Identifier: MPL-2.0
//! Observable values mirrored into a storage slot.
//!
//! A [`PersistedValue`] is seeded from its slot when created and writes the
//! slot back after every change. The in-memory value is authoritative: slot
//! read failures fall back to the default, and slot write failures are logged
//! and dropped. The next change simply tries again.

use super::codec::{Json, PlainText, SlotCodec};
use super::observable::{Observable, Subscription};
use crate::storage::Persistence;
use std::marker::PhantomData;
use std::rc::Rc;

/// A persisted value whose slot holds the value's `Display` form.
pub type PersistedText<T> = PersistedValue<T, PlainText<T>>;

/// A persisted value whose slot holds JSON.
pub type PersistedJson<T> = PersistedValue<T, Json<T>>;

pub struct PersistedValue<T, C> {
    key: Rc<str>,
    value: Observable<T>,
    persistence: Persistence,
    _codec: PhantomData<C>,
}

impl<T, C> Clone for PersistedValue<T, C> {
    fn clone(&self) -> Self {
        Self {
            key: Rc::clone(&self.key),
            value: self.value.clone(),
            persistence: self.persistence.clone(),
            _codec: PhantomData,
        }
    }
}

impl<T: std::fmt::Debug, C> std::fmt::Debug for PersistedValue<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("persistence", &self.persistence)
            .finish()
    }
}

impl<T, C> PersistedValue<T, C>
where
    T: Clone + 'static,
    C: SlotCodec<T>,
{
    /// Creates the value from its slot, or from `default` when the slot is
    /// absent, empty, malformed, or storage is unavailable.
    ///
    /// The resolved value is written back so the slot always mirrors it.
    pub fn new(key: impl Into<String>, default: T, persistence: Persistence) -> Self {
        let key: Rc<str> = Rc::from(key.into());
        let initial = read_initial::<T, C>(&key, default, &persistence);

        let value = Self {
            key,
            value: Observable::new(initial),
            persistence,
            _codec: PhantomData,
        };
        value.persist();
        value
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.value.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.value.with(f)
    }

    /// Replaces the value, notifies subscribers, then writes the slot.
    pub fn set(&self, value: T) {
        self.value.set(value);
        self.persist();
    }

    /// Mutates the value in place, notifies subscribers, then writes the slot.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.value.update(f);
        self.persist();
    }

    /// Calls `callback` now with the current value and after every change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.value.subscribe(callback)
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.value.version()
    }

    fn persist(&self) {
        if !self.persistence.is_available() {
            return;
        }

        let encoded = match self.value.with(C::encode) {
            Ok(encoded) => encoded,
            Err(err) => {
                log::error!("Unable to encode '{}' for storage: {}", self.key, err);
                return;
            }
        };

        if let Err(err) = self.persistence.write(&self.key, &encoded) {
            log::error!("Unable to save '{}' to storage: {}", self.key, err);
        }
    }
}

fn read_initial<T, C: SlotCodec<T>>(key: &str, default: T, persistence: &Persistence) -> T {
    match persistence.read(key) {
        Ok(Some(raw)) if !raw.is_empty() => match C::decode(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!(
                    "Ignoring malformed stored value for '{}', using default: {}",
                    key,
                    err
                );
                default
            }
        },
        Ok(_) => default,
        Err(err) => {
            log::warn!("Unable to read '{}' from storage: {}", key, err);
            default
        }
    }
}
