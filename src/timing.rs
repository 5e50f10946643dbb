// SPDX-License-Identifier: MPL-2.0
//! Development-only timing helper.
//!
//! Pairs of `time_start(label)` / `time_end(label)` log the elapsed time
//! between them. In production builds both calls do nothing.

use crate::environment::BuildMode;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Label used when none is given.
pub const DEFAULT_LABEL: &str = "default";

#[derive(Debug)]
pub struct DebugTimer {
    enabled: bool,
    started: RefCell<HashMap<String, Instant>>,
}

impl DebugTimer {
    pub fn new(mode: BuildMode) -> Self {
        Self::with_enabled(mode.is_development())
    }

    /// Forces timing on or off regardless of build mode.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            started: RefCell::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts (or restarts) the timer for `label`.
    pub fn time_start(&self, label: Option<&str>) {
        if !self.enabled {
            return;
        }
        let label = label.unwrap_or(DEFAULT_LABEL);
        self.started
            .borrow_mut()
            .insert(label.to_string(), Instant::now());
    }

    /// Stops the timer for `label`, logs and returns the elapsed time.
    ///
    /// Returns `None` when disabled or when `label` was never started.
    pub fn time_end(&self, label: Option<&str>) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        let label = label.unwrap_or(DEFAULT_LABEL);
        let Some(start) = self.started.borrow_mut().remove(label) else {
            log::warn!("Timer '{}' does not exist", label);
            return None;
        };

        let elapsed = start.elapsed();
        log::debug!("{}: {:.3}ms", label, elapsed.as_secs_f64() * 1000.0);
        Some(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_timer_measures_elapsed() {
        let timer = DebugTimer::new(BuildMode::Development);
        timer.time_start(Some("load"));
        std::thread::sleep(Duration::from_millis(2));
        let elapsed = timer.time_end(Some("load")).expect("timer was started");
        assert!(elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn production_timer_is_noop() {
        let timer = DebugTimer::new(BuildMode::Production);
        timer.time_start(Some("load"));
        assert_eq!(timer.time_end(Some("load")), None);
    }

    #[test]
    fn missing_label_uses_default() {
        let timer = DebugTimer::with_enabled(true);
        timer.time_start(None);
        assert!(timer.time_end(Some(DEFAULT_LABEL)).is_some());
    }

    #[test]
    fn ending_unknown_label_returns_none() {
        let timer = DebugTimer::with_enabled(true);
        assert_eq!(timer.time_end(Some("never-started")), None);
    }

    #[test]
    fn each_label_ends_once() {
        let timer = DebugTimer::with_enabled(true);
        timer.time_start(Some("parse"));
        assert!(timer.time_end(Some("parse")).is_some());
        assert!(timer.time_end(Some("parse")).is_none());
    }
}
