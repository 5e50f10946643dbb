// SPDX-License-Identifier: MPL-2.0
//! Observable value wrapper with synchronous change notification.
//!
//! [`Observable<T>`] keeps its value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Every `set` replaces the value and notifies all live
//! subscribers in registration order before returning. A new subscriber is
//! called once with the current value as soon as it registers.
//!
//! # Failure Modes
//!
//! - **Re-entrant set**: a subscriber that calls `set()` updates the value
//!   at once, but its notifications are queued behind the round in progress.
//!   Every subscriber therefore ends on the final value. Calling `set()` from
//!   inside a `with()` closure panics (RefCell borrow rules).
//! - **Subscriber leak**: callbacks live as long as their [`Subscription`]
//!   guard. Dead entries are pruned lazily during notification.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct ObservableInner<T> {
    value: T,
    version: u64,
    subscribers: Vec<CallbackWeak<T>>,
    /// Pending deliveries; drained by the outermost `notify`.
    queue: VecDeque<(CallbackRc<T>, T)>,
    draining: bool,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning an `Observable` creates a new handle to the **same** value and
/// subscriber list.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each `set` or `update`.
/// 2. Subscribers are notified in registration order, synchronously.
/// 3. After a `set` returns, each live subscriber's last call carried the
///    current value, including when subscribers `set` while being notified.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Create a new observable with the given initial value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
                queue: VecDeque::new(),
                draining: false,
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify every live subscriber.
    ///
    /// # Panics
    ///
    /// Panics if called from within a [`with`](Self::with) closure.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Modify the value in place via a closure, then notify subscribers.
    ///
    /// # Panics
    ///
    /// Panics if `f` touches this observable.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        {
            let mut inner = self.inner.borrow_mut();
            f(&mut inner.value);
            inner.version += 1;
        }
        self.notify();
    }

    /// Subscribe to value changes.
    ///
    /// The callback runs once immediately with the current value and then on
    /// every later `set`/`update`. Dropping the returned [`Subscription`] (or
    /// calling [`Subscription::unsubscribe`]) stops further calls.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));

        let value = self.get();
        strong(&value);

        // `Rc<dyn Fn(&T)>` cannot coerce to `Rc<dyn Any>`, so box the Rc itself.
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of `set`/`update` calls since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    fn notify(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let value = inner.value.clone();
            let pending: Vec<_> = inner
                .subscribers
                .iter()
                .filter_map(|w| w.upgrade())
                .map(|cb| (cb, value.clone()))
                .collect();
            inner.queue.extend(pending);
            if inner.draining {
                return;
            }
            inner.draining = true;
        }

        let _drain = DrainGuard(&self.inner);
        loop {
            // Callbacks run outside the borrow so they may call `get()` or `set()`.
            let next = self.inner.borrow_mut().queue.pop_front();
            let Some((cb, value)) = next else { break };
            cb(&value);
        }
    }
}

/// Ends a drain, also when a callback panics.
struct DrainGuard<'a, T>(&'a RefCell<ObservableInner<T>>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.queue.clear();
            inner.draining = false;
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Holds the only strong reference to the callback; once it is gone the
/// observable's weak entry can no longer be upgraded.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
