// SPDX-License-Identifier: MPL-2.0
//! Read-only signals from the host environment.
//!
//! Everything the stores and the i18n setup would otherwise query from the
//! operating system is gathered here once, so tests can hand-build an
//! [`Environment`] instead of depending on the machine they run on.

/// The OS color-scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Development builds enable debug-only helpers such as [`crate::timing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// The mode this binary was compiled in.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    #[must_use]
    pub fn is_development(self) -> bool {
        self == BuildMode::Development
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// `None` when the platform reports no preference or detection fails.
    pub color_scheme: Option<ColorScheme>,
    /// Preferred UI locale as reported by the OS, e.g. `"fr-FR"`.
    pub locale: Option<String>,
    pub build_mode: BuildMode,
}

impl Default for Environment {
    /// An environment with no signals at all.
    fn default() -> Self {
        Self {
            color_scheme: None,
            locale: None,
            build_mode: BuildMode::current(),
        }
    }
}

impl Environment {
    /// Queries the running system.
    pub fn detect() -> Self {
        Self {
            color_scheme: detect_color_scheme(),
            locale: sys_locale::get_locale(),
            build_mode: BuildMode::current(),
        }
    }
}

fn detect_color_scheme() -> Option<ColorScheme> {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => Some(ColorScheme::Dark),
        Ok(dark_light::Mode::Light) => Some(ColorScheme::Light),
        Ok(_) => None,
        Err(err) => {
            log::debug!("Color scheme detection failed: {}", err);
            None
        }
    }
}
