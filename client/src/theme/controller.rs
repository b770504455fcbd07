use design::cookie::{self, PreferenceCookie};
use design::{Preference, THEME_ATTRIBUTE, Theme, classes};

use super::config::ThemeConfig;
use crate::dom::Dom;

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

/// How long `preload` stays on the root before transitions are enabled.
pub const TRANSITION_SUPPRESS_MS: u32 = 100;

/// What activating a theme control does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    Toggle,
    Set(Theme),
}

/// Owns the effective theme for one page.
///
/// The `blue-theme` cookie is the only persisted state. Its presence is also
/// what "the user made an explicit choice" means, so OS color-scheme changes
/// are followed exactly while the cookie is absent.
#[derive(Debug, Clone)]
pub struct ThemeController {
    config: ThemeConfig,
    current: Preference,
}

impl ThemeController {
    /// Resolve and apply the initial theme.
    ///
    /// Priority: a `data-theme` already on the root (server injection), then
    /// the cookie, then the OS preference. Marks the root `preload` until
    /// [`Self::settle`] runs.
    pub fn init<D: Dom>(dom: &mut D, config: ThemeConfig) -> Self {
        dom.set_root_class(classes::PRELOAD, true);
        let mut this = Self { config, current: Preference::default() };

        if let Some(pref) = applied_theme(dom) {
            log::debug!("theme: keeping server-injected {pref}");
            this.current = pref;
            this.sync_controls(dom);
        } else if let Some(pref) = this.persisted(dom) {
            log::debug!("theme: restoring persisted {pref}");
            this.set_theme(dom, pref.into());
        } else {
            this.follow_system(dom);
        }
        this
    }

    /// End the transition-suppression window.
    pub fn settle<D: Dom>(&self, dom: &mut D) {
        dom.set_root_class(classes::PRELOAD, false);
        dom.set_root_class(classes::THEME_TRANSITION, true);
    }

    #[must_use]
    pub fn current_theme(&self) -> Preference {
        self.current
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Apply `theme`, persist or clear the choice, and broadcast the result.
    pub fn set_theme<D: Dom>(&mut self, dom: &mut D, theme: Theme) {
        match theme.preference() {
            Some(pref) => {
                self.current = pref;
                dom.set_root_attribute(THEME_ATTRIBUTE, pref.as_str());
                let assignment = self.cookie(dom).set(pref, dom.now());
                dom.write_cookie(&assignment);
            }
            None => {
                self.follow_system(dom);
                let assignment = self.cookie(dom).clear();
                dom.write_cookie(&assignment);
            }
        }
        self.sync_controls(dom);
        dom.emit_theme_changed(self.current);
        log::debug!("theme: set {theme}, effective {}", self.current);
    }

    pub fn toggle_theme<D: Dom>(&mut self, dom: &mut D) {
        self.set_theme(dom, self.current.opposite().into());
    }

    /// Drop any explicit choice and follow the OS preference again.
    pub fn reset_to_system<D: Dom>(&mut self, dom: &mut D) {
        self.set_theme(dom, Theme::Auto);
        if self.persisted(dom).is_some() {
            let assignment = self.cookie(dom).clear();
            dom.write_cookie(&assignment);
        }
    }

    /// The persisted choice, if the cookie holds a valid one.
    #[must_use]
    pub fn persisted<D: Dom>(&self, dom: &D) -> Option<Preference> {
        cookie::read_preference(&dom.cookie(), &self.config.cookie_name)
    }

    #[must_use]
    pub fn has_explicit_choice<D: Dom>(&self, dom: &D) -> bool {
        self.persisted(dom).is_some()
    }

    /// Handle a `prefers-color-scheme` change.
    ///
    /// Ignored while an explicit choice is persisted. Otherwise the new OS
    /// value becomes effective without writing a cookie, so later OS changes
    /// keep flowing through.
    pub fn on_system_change<D: Dom>(&mut self, dom: &mut D, prefers_dark: bool) {
        if self.has_explicit_choice(dom) {
            log::debug!("theme: OS change ignored, explicit choice pinned");
            return;
        }
        self.apply(dom, Preference::from_dark(prefers_dark));
        dom.emit_theme_changed(self.current);
    }

    /// Every theme control on the page and the action it triggers.
    pub fn bindings<D: Dom>(&self, dom: &D) -> Vec<(D::Node, ControlAction)> {
        let selectors = &self.config.selectors;
        let mut out: Vec<(D::Node, ControlAction)> =
            dom.query_all(&selectors.toggles).into_iter().map(|node| (node, ControlAction::Toggle)).collect();

        for node in dom.query_all(&selectors.theme_buttons) {
            match control_theme(dom, &node) {
                Some(theme) => out.push((node, ControlAction::Set(theme))),
                None => log::debug!("theme: skipping control with unknown theme value"),
            }
        }

        for node in dom.query_all(&selectors.legacy_toggles) {
            if dom.attribute(&node, "data-theme-toggle").is_none() {
                out.push((node, ControlAction::Toggle));
            }
        }
        out
    }

    pub fn activate<D: Dom>(&mut self, dom: &mut D, action: ControlAction) {
        match action {
            ControlAction::Toggle => self.toggle_theme(dom),
            ControlAction::Set(theme) => self.set_theme(dom, theme),
        }
    }

    /// Mark the matching theme buttons active and flip light/dark-only content.
    pub fn sync_controls<D: Dom>(&self, dom: &mut D) {
        let selectors = &self.config.selectors;
        let current = Theme::from(self.current);
        for node in dom.query_all(&selectors.theme_buttons) {
            let active = control_theme(dom, &node) == Some(current);
            dom.set_class(&node, classes::ACTIVE, active);
        }

        let (light, dark) = if self.current.is_dark() { ("none", "block") } else { ("block", "none") };
        for node in dom.query_all(&selectors.light_only) {
            dom.set_display(&node, light);
        }
        for node in dom.query_all(&selectors.dark_only) {
            dom.set_display(&node, dark);
        }
    }

    fn follow_system<D: Dom>(&mut self, dom: &mut D) {
        let pref = Preference::from_dark(dom.prefers_dark());
        self.apply(dom, pref);
    }

    fn apply<D: Dom>(&mut self, dom: &mut D, pref: Preference) {
        self.current = pref;
        dom.set_root_attribute(THEME_ATTRIBUTE, pref.as_str());
        self.sync_controls(dom);
    }

    fn cookie<D: Dom>(&self, dom: &D) -> PreferenceCookie {
        PreferenceCookie {
            name: self.config.cookie_name.clone(),
            retention_days: self.config.retention_days,
            secure: dom.is_secure(),
        }
    }
}

/// Effective theme as stamped on the document root.
///
/// Set before every `themeChanged` broadcast, so listeners that cannot reach
/// the controller (it may still be mid-`init`) read the same value here.
#[must_use]
pub fn applied_theme<D: Dom>(dom: &D) -> Option<Preference> {
    dom.root_attribute(THEME_ATTRIBUTE)?.parse().ok()
}

/// Theme value a control is tagged with: `data-theme`, else `data-theme-button`.
fn control_theme<D: Dom>(dom: &D, node: &D::Node) -> Option<Theme> {
    dom.attribute(node, "data-theme")
        .filter(|v| !v.is_empty())
        .or_else(|| dom.attribute(node, "data-theme-button"))
        .and_then(|v| v.parse().ok())
}
