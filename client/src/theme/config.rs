//! Theme controller configuration.

use design::cookie::{DEFAULT_RETENTION_DAYS, PREFERENCE_COOKIE};

/// Selectors for the theme controls a page may contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSelectors {
    /// Generic light/dark togglers.
    pub toggles: String,
    /// Older toggle markup; skipped when it also carries `data-theme-toggle`.
    pub legacy_toggles: String,
    /// Controls tagged with a specific theme value.
    pub theme_buttons: String,
    pub light_only: String,
    pub dark_only: String,
}

impl Default for ThemeSelectors {
    fn default() -> Self {
        Self {
            toggles: "[data-theme-toggle]".to_owned(),
            legacy_toggles: ".theme-toggle".to_owned(),
            theme_buttons: "button[data-theme], .theme-button[data-theme], [data-theme-button]".to_owned(),
            light_only: ".light-only".to_owned(),
            dark_only: ".dark-only".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    pub cookie_name: String,
    pub retention_days: i64,
    pub selectors: ThemeSelectors,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cookie_name: PREFERENCE_COOKIE.to_owned(),
            retention_days: DEFAULT_RETENTION_DAYS,
            selectors: ThemeSelectors::default(),
        }
    }
}
