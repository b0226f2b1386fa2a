//! The two persisted cosmetic preferences: dark theme and dyslexia-friendly
//! font. Each is an independent two-state machine seeded from storage on
//! load; toggling flips the state and persists the new sentinel at once.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "theme";
pub const FONT_KEY: &str = "font";

pub const DARK_THEME_CLASS: &str = "dark-theme";
pub const DYSLEXIC_FONT_CLASS: &str = "dyslexic-font";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn sentinel(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_stored(value: Option<&str>) -> Self {
        if value == Some("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Default,
    Dyslexic,
}

impl Font {
    pub fn sentinel(self) -> &'static str {
        match self {
            Font::Default => "default",
            Font::Dyslexic => "dyslexic",
        }
    }

    fn from_stored(value: Option<&str>) -> Self {
        if value == Some("dyslexic") {
            Font::Dyslexic
        } else {
            Font::Default
        }
    }

    fn toggled(self) -> Self {
        match self {
            Font::Default => Font::Dyslexic,
            Font::Dyslexic => Font::Default,
        }
    }
}

/// Persistent key/value storage for the two preference sentinels.
/// Implementations swallow storage failures: a preference that cannot be
/// read falls back to its default, a write that fails only logs.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Test double and default store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(flatten)]
    values: HashMap<String, String>,
}

/// JSON-file-backed store. Reads once on open, writes through on every set.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    stored: StoredPreferences,
}

impl FileStore {
    pub fn open(path: PathBuf) -> Self {
        let stored = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring malformed preference file {path:?}: {err}");
                StoredPreferences::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoredPreferences::default(),
            Err(err) => {
                warn!("Could not read preference file {path:?}: {err}");
                StoredPreferences::default()
            }
        };
        FileStore { path, stored }
    }

    fn flush(&self) {
        let write = || -> std::io::Result<()> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            let raw = serde_json::to_string_pretty(&self.stored)?;
            fs::write(&self.path, raw)
        };
        if let Err(err) = write() {
            warn!("Could not persist preferences to {:?}: {err}", self.path);
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.stored.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.stored
            .values
            .insert(key.to_owned(), value.to_owned());
        self.flush();
    }
}

/// The live toggler: current visual state plus its backing store.
#[derive(Debug)]
pub struct Preferences<S: PreferenceStore> {
    store: S,
    theme: Theme,
    font: Font,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Seed both machines from storage; applied states take effect before
    /// any interaction.
    pub fn load(store: S) -> Self {
        let theme = Theme::from_stored(store.get(THEME_KEY).as_deref());
        let font = Font::from_stored(store.get(FONT_KEY).as_deref());
        Preferences { store, theme, font }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.sentinel());
        self.theme
    }

    pub fn toggle_font(&mut self) -> Font {
        self.font = self.font.toggled();
        self.store.set(FONT_KEY, self.font.sentinel());
        self.font
    }

    /// Classes the page body should carry for the current state.
    pub fn class_list(&self) -> Vec<&'static str> {
        let mut classes = Vec::new();
        if self.theme == Theme::Dark {
            classes.push(DARK_THEME_CLASS);
        }
        if self.font == Font::Dyslexic {
            classes.push(DYSLEXIC_FONT_CLASS);
        }
        classes
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
