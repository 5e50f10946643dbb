// SPDX-License-Identifier: MPL-2.0
//! Light/dark theme preference.

use crate::environment::ColorScheme;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Theme to use when nothing is stored yet.
    ///
    /// Follows the OS color scheme when it is known, otherwise light.
    #[must_use]
    pub fn from_color_scheme(scheme: Option<ColorScheme>) -> Self {
        match scheme {
            Some(ColorScheme::Dark) => ThemeMode::Dark,
            Some(ColorScheme::Light) | None => ThemeMode::Light,
        }
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// The stored string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError(String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}', expected 'light' or 'dark'", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for ThemeMode {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_color_scheme() {
        assert_eq!(
            ThemeMode::from_color_scheme(Some(ColorScheme::Dark)),
            ThemeMode::Dark
        );
        assert_eq!(
            ThemeMode::from_color_scheme(Some(ColorScheme::Light)),
            ThemeMode::Light
        );
        assert_eq!(ThemeMode::from_color_scheme(None), ThemeMode::Light);
    }

    #[test]
    fn parses_stored_strings() {
        assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!("light".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert!("Dark".parse::<ThemeMode>().is_err());
        assert!("system".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn toggle_flips_mode() {
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle(), ThemeMode::Light);
    }
}
