// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Storage(String),
    /// The storage backend refused a write because it would exceed its quota.
    QuotaExceeded {
        key: String,
        quota: usize,
    },
    Serialization(String),
    Config(String),
    Locale(LocaleError),
    /// Invalid command-line input.
    Usage(String),
}

/// Failures of the locale registry and i18n runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum LocaleError {
    /// No loader is registered for this code.
    NotRegistered(String),

    /// The loader ran but could not produce the bundle source.
    LoadFailed { code: String, reason: String },

    /// The bundle source is not valid Fluent syntax.
    InvalidBundle { code: String, reason: String },
}

impl LocaleError {
    /// Returns the locale code the error refers to.
    pub fn code(&self) -> &str {
        match self {
            LocaleError::NotRegistered(code)
            | LocaleError::LoadFailed { code, .. }
            | LocaleError::InvalidBundle { code, .. } => code,
        }
    }
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleError::NotRegistered(code) => write!(f, "locale '{}' is not registered", code),
            LocaleError::LoadFailed { code, reason } => {
                write!(f, "failed to load locale '{}': {}", code, reason)
            }
            LocaleError::InvalidBundle { code, reason } => {
                write!(f, "invalid bundle for locale '{}': {}", code, reason)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Storage(e) => write!(f, "Storage Error: {}", e),
            Error::QuotaExceeded { key, quota } => write!(
                f,
                "Storage Error: writing '{}' exceeds the quota of {} bytes",
                key, quota
            ),
            Error::Serialization(e) => write!(f, "Serialization Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Locale(e) => write!(f, "Locale Error: {}", e),
            Error::Usage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<LocaleError> for Error {
    fn from(err: LocaleError) -> Self {
        Error::Locale(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl<T: fmt::Debug> From<ciborium::de::Error<T>> for Error {
    fn from(err: ciborium::de::Error<T>) -> Self {
        Error::Storage(format!("{:?}", err))
    }
}

impl<T: fmt::Debug> From<ciborium::ser::Error<T>> for Error {
    fn from(err: ciborium::ser::Error<T>) -> Self {
        Error::Storage(format!("{:?}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
