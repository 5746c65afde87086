//! User preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    data::{category::FALLBACK_COLOR, EventStore, WeekStart},
    error::SettingsError,
};

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

fn default_fallback_color() -> String {
    FALLBACK_COLOR.to_owned()
}

fn default_true() -> bool {
    true
}

/// Preferences that shape how the calendar is shown. Any key missing from a
/// settings file takes its default.
///
/// `week_start` and `fallback_color` are pushed into the store by
/// [`Settings::apply_to`]. `theme`, `notifications` and `sounds` are flags for
/// the presentation layer, which reads them from here.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub theme: Theme,
    /// Whether event reminders are enabled.
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub sounds: bool,
    /// Color for events whose category was deleted.
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            week_start: WeekStart::default(),
            theme: Theme::default(),
            notifications: true,
            sounds: true,
            fallback_color: default_fallback_color(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading settings");
        let text = std::fs::read_to_string(path)?;
        Settings::from_toml_str(&text)
    }

    /// Pushes the preferences that affect store queries into the store.
    pub fn apply_to(&self, store: &mut EventStore) {
        store.set_fallback_color(self.fallback_color.clone());
        store.set_week_start(self.week_start);
    }
}
