use design::classes;

use crate::dom::Dom;

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

/// Where the header's mobile menu lives in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Element id of the mobile menu container.
    pub mobile_menu_id: String,
    /// Selector for the control that opens/closes the menu.
    pub menu_toggle: String,
    /// Class present on the container while the menu is open.
    pub open_class: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            mobile_menu_id: "mobileMenu".to_owned(),
            menu_toggle: format!(".{}", classes::HEADER_MENU_TOGGLE),
            open_class: classes::HEADER_MOBILE_MENU_OPEN.to_owned(),
        }
    }
}

/// Opens, closes and dismisses the mobile menu. Holds no state of its own;
/// open/closed is the class on the container.
#[derive(Debug, Clone, Default)]
pub struct HeaderController {
    config: HeaderConfig,
}

impl HeaderController {
    #[must_use]
    pub fn new(config: HeaderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// The toggle control, for hosts wiring its click to [`Self::toggle_mobile_menu`].
    pub fn menu_toggle<D: Dom>(&self, dom: &D) -> Option<D::Node> {
        dom.query(&self.config.menu_toggle)
    }

    pub fn is_open<D: Dom>(&self, dom: &D) -> bool {
        dom.by_id(&self.config.mobile_menu_id).is_some_and(|menu| dom.has_class(&menu, &self.config.open_class))
    }

    pub fn toggle_mobile_menu<D: Dom>(&self, dom: &mut D) {
        let Some(menu) = dom.by_id(&self.config.mobile_menu_id) else {
            return;
        };
        let open = dom.has_class(&menu, &self.config.open_class);
        dom.set_class(&menu, &self.config.open_class, !open);
    }

    /// Close the menu when a click lands outside both the menu and its toggle.
    pub fn on_document_click<D: Dom>(&self, dom: &mut D, target: &D::Node) {
        let Some(menu) = dom.by_id(&self.config.mobile_menu_id) else {
            return;
        };
        if !dom.has_class(&menu, &self.config.open_class) || dom.contains(&menu, target) {
            return;
        }
        let on_toggle = self.menu_toggle(dom).is_some_and(|toggle| dom.contains(&toggle, target));
        if !on_toggle {
            dom.set_class(&menu, &self.config.open_class, false);
        }
    }

    /// Close the menu on `Escape`, wherever focus is.
    pub fn on_key<D: Dom>(&self, dom: &mut D, key: &str) {
        if key != "Escape" {
            return;
        }
        if let Some(menu) = dom.by_id(&self.config.mobile_menu_id) {
            if dom.has_class(&menu, &self.config.open_class) {
                dom.set_class(&menu, &self.config.open_class, false);
            }
        }
    }
}
