//! Light/dark color-mode preference with an explicit hydration lifecycle.
//!
//! A [`ColorModeStore`] starts `Unhydrated` and reports the default mode
//! until the persisted preference is applied once via
//! [`ColorModeStore::hydrate`]. After that it is `Hydrated` for good: later
//! hydration attempts are ignored, so a late or repeated load can never
//! reset a preference the user has already seen or changed.
//!
//! The store is a plain value owned by the caller; nothing here is global.

use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ParseEnumError;

/// A user's color-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
    /// Follow the operating system setting.
    System,
}

impl ColorMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Concrete mode to render with, resolving `System` against the OS.
    #[must_use]
    pub fn resolve(self, system_prefers_dark: bool) -> Self {
        match self {
            Self::System if system_prefers_dark => Self::Dark,
            Self::System => Self::Light,
            other => other,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(ParseEnumError {
                kind: "color mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Where the preference is persisted between sessions.
pub trait PreferenceBackend: Send + Sync {
    /// Reads the stored preference, `None` if nothing was saved yet.
    fn load(&self) -> anyhow::Result<Option<ColorMode>>;

    /// Persists `mode`.
    fn save(&self, mode: ColorMode) -> anyhow::Result<()>;
}

/// Backend that keeps the preference in memory. Useful in tests and for
/// deployments that do not persist preferences.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: Mutex<Option<ColorMode>>,
}

impl MemoryBackend {
    /// Creates a backend pre-populated with `mode`.
    #[must_use]
    pub fn with_mode(mode: ColorMode) -> Self {
        Self {
            stored: Mutex::new(Some(mode)),
        }
    }
}

impl PreferenceBackend for MemoryBackend {
    fn load(&self) -> anyhow::Result<Option<ColorMode>> {
        Ok(*self.stored.lock())
    }

    fn save(&self, mode: ColorMode) -> anyhow::Result<()> {
        *self.stored.lock() = Some(mode);
        Ok(())
    }
}

/// Errors from [`ColorModeStore`] operations that touch the backend.
#[derive(Debug, thiserror::Error)]
pub enum ColorModeError {
    #[error("failed to load color-mode preference: {0}")]
    Load(#[source] anyhow::Error),
    #[error("failed to save color-mode preference: {0}")]
    Save(#[source] anyhow::Error),
}

/// Lifecycle of a [`ColorModeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hydration {
    /// Persisted preference not applied yet; the store reports the default.
    Unhydrated,
    /// Persisted preference (or an explicit user choice) applied.
    Hydrated,
}

/// Explicitly constructed color-mode state.
///
/// State machine: `Unhydrated -> Hydrated`, one transition, never reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorModeStore {
    mode: ColorMode,
    hydration: Hydration,
}

impl ColorModeStore {
    /// Creates an unhydrated store reporting [`ColorMode::default`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ColorMode::default(),
            hydration: Hydration::Unhydrated,
        }
    }

    /// Current mode (the default until hydrated or set).
    #[must_use]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    #[must_use]
    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydration == Hydration::Hydrated
    }

    /// Applies the persisted preference. `None` keeps the default but still
    /// completes hydration.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// store was already hydrated (in which case nothing changes).
    pub fn hydrate(&mut self, persisted: Option<ColorMode>) -> bool {
        if self.is_hydrated() {
            debug!("ignoring repeated color-mode hydration");
            return false;
        }
        if let Some(mode) = persisted {
            self.mode = mode;
        }
        self.hydration = Hydration::Hydrated;
        debug!(mode = %self.mode, "color mode hydrated");
        true
    }

    /// Loads the preference from `backend` and hydrates with it.
    ///
    /// # Errors
    ///
    /// Returns [`ColorModeError::Load`] if the backend fails; the store is
    /// left unhydrated so a retry is possible.
    pub fn hydrate_from(&mut self, backend: &dyn PreferenceBackend) -> Result<bool, ColorModeError> {
        if self.is_hydrated() {
            return Ok(false);
        }
        let persisted = backend.load().map_err(ColorModeError::Load)?;
        Ok(self.hydrate(persisted))
    }

    /// Sets the mode and writes it through to `backend`.
    ///
    /// An explicit choice before hydration counts as hydration: the user's
    /// intent wins over whatever a later load would return.
    ///
    /// # Errors
    ///
    /// Returns [`ColorModeError::Save`] if the backend fails. The in-memory
    /// mode is updated regardless.
    pub fn set(&mut self, mode: ColorMode, backend: &dyn PreferenceBackend) -> Result<(), ColorModeError> {
        self.mode = mode;
        self.hydration = Hydration::Hydrated;
        backend.save(mode).map_err(ColorModeError::Save)
    }

    /// Flips between light and dark (`System` resolves against
    /// `system_prefers_dark` first) and persists the result.
    ///
    /// # Errors
    ///
    /// Returns [`ColorModeError::Save`] if the backend fails.
    pub fn toggle(
        &mut self,
        system_prefers_dark: bool,
        backend: &dyn PreferenceBackend,
    ) -> Result<ColorMode, ColorModeError> {
        let next = match self.mode.resolve(system_prefers_dark) {
            ColorMode::Dark => ColorMode::Light,
            _ => ColorMode::Dark,
        };
        self.set(next, backend)?;
        Ok(next)
    }
}

impl Default for ColorModeStore {
    fn default() -> Self {
        Self::new()
    }
}
