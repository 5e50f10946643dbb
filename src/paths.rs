// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions
//!    (`--data-dir` / `--config-dir` on the command line, or tests)
//! 2. **Environment variables** (`METRICS_VIEW_DATA_DIR`, `METRICS_VIEW_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "MetricsView";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "METRICS_VIEW_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "METRICS_VIEW_CONFIG_DIR";

fn resolve(
    override_path: Option<PathBuf>,
    env_var: &str,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform.map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application data directory (where storage slots live).
///
/// Platform defaults:
/// - Linux: `~/.local/share/MetricsView/`
/// - macOS: `~/Library/Application Support/MetricsView/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\MetricsView\`
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_DATA_DIR, dirs::data_dir())
}

/// Returns the application config directory (where `settings.toml` lives).
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_CONFIG_DIR, dirs::config_dir())
}
