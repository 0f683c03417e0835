//! Editor preferences, persisted through the preference store as they
//! change.

use padcore::storage::PrefStore;
use padcore::ThemeKind;

/// Store keys.
pub mod keys {
    pub const THEME: &str = "theme";
    pub const FONT_FAMILY: &str = "fontFamily";
    pub const FONT_SIZE: &str = "fontSize";
    /// Draft snapshot of the buffer, mirrored on every edit.
    pub const DRAFT: &str = "unsavedContent";
}

pub const FONT_SIZE_MIN: i32 = 12;
pub const FONT_SIZE_MAX: i32 = 48;
pub const FONT_SIZE_DEFAULT: i32 = 18;
pub const ZOOM_STEP: i32 = 2;

/// Selectable editor font families. "default" is the platform
/// proportional face.
pub const FONT_FAMILIES: [&str; 2] = ["default", "monospace"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub theme: ThemeKind,
    pub font_family: String,
    pub font_size: i32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            font_family: "default".to_string(),
            font_size: FONT_SIZE_DEFAULT,
        }
    }
}

impl Preferences {
    /// Read preferences out of the store, falling back to defaults for
    /// anything missing or garbled.
    pub fn load(store: &impl PrefStore) -> Self {
        let mut prefs = Self::default();
        if let Some(theme) = store.get(keys::THEME).as_deref().and_then(ThemeKind::parse) {
            prefs.theme = theme;
        }
        if let Some(family) = store.get(keys::FONT_FAMILY) {
            prefs.font_family = family;
        }
        if let Some(size) = store.get(keys::FONT_SIZE).and_then(|s| s.parse().ok()) {
            prefs.font_size = clamp_size(size);
        }
        prefs
    }

    pub fn set_theme(&mut self, store: &mut impl PrefStore, theme: ThemeKind) {
        self.theme = theme;
        store.set(keys::THEME, theme.as_str());
    }

    pub fn toggle_theme(&mut self, store: &mut impl PrefStore) {
        self.set_theme(store, self.theme.toggled());
    }

    pub fn set_font_family(&mut self, store: &mut impl PrefStore, family: String) {
        store.set(keys::FONT_FAMILY, &family);
        self.font_family = family;
    }

    pub fn set_font_size(&mut self, store: &mut impl PrefStore, size: i32) {
        self.font_size = clamp_size(size);
        store.set(keys::FONT_SIZE, &self.font_size.to_string());
    }

    pub fn zoom_in(&mut self, store: &mut impl PrefStore) {
        self.set_font_size(store, self.font_size + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self, store: &mut impl PrefStore) {
        self.set_font_size(store, self.font_size - ZOOM_STEP);
    }
}

fn clamp_size(size: i32) -> i32 {
    size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
}
