#![forbid(unsafe_code)]

//! Light/dark theme preference persisted under a single storage key.
//!
//! On startup the stored value wins; without one (or with a value that is
//! neither `light` nor `dark`) the OS color-scheme preference decides. Every
//! toggle writes the new value back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Two-valued theme, stored as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn from_os(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a string that names no theme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemePreference {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Key/value store for the persisted preference (`localStorage` on the web).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Theme toggle bound to a store.
#[derive(Debug)]
pub struct ThemeSwitch<P> {
    store: P,
    key: String,
    current: ThemePreference,
}

impl<P: PreferenceStore> ThemeSwitch<P> {
    /// Resolve the startup theme from `store`, falling back to the OS
    /// preference. Nothing is written until the first toggle.
    pub fn resolve(store: P, key: impl Into<String>, os_prefers_dark: bool) -> Self {
        let key = key.into();
        let current = match store.get(&key) {
            Some(raw) => raw.parse::<ThemePreference>().unwrap_or_else(|err| {
                warn!(%err, "ignoring stored theme");
                ThemePreference::from_os(os_prefers_dark)
            }),
            None => ThemePreference::from_os(os_prefers_dark),
        };
        debug!(theme = %current, "theme resolved");
        Self {
            store,
            key,
            current,
        }
    }

    #[must_use]
    pub const fn current(&self) -> ThemePreference {
        self.current
    }

    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Flip the theme and persist it. Returns the theme to apply.
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        self.store.set(&self.key, self.current.as_str());
        debug!(theme = %self.current, "theme toggled");
        self.current
    }
}
