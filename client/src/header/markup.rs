//! Header markup builders.
//!
//! Pure string builders shared by the server-rendered pages and any script
//! that assembles a header at runtime. Output is deterministic and keeps
//! item order. Labels and hrefs are escaped.

use design::classes;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

/// One navigation entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub text: String,
    /// Destination. Empty renders as `#`.
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub active: bool,
}

impl NavItem {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self { text: text.into(), href: href.into(), active: false }
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn href(&self) -> &str {
        if self.href.is_empty() { "#" } else { &self.href }
    }
}

/// Logo link shown at the start of the header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub title: String,
    pub href: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self { title: "Blue Design System".to_owned(), href: "../../".to_owned() }
    }
}

#[must_use]
pub fn header_brand(brand: &Brand) -> String {
    format!(
        r#"<a href="{}" class="{}"><div class="{}">B</div>{}</a>"#,
        escape_html(&brand.href),
        classes::HEADER_BRAND,
        classes::HEADER_LOGO,
        escape_html(&brand.title),
    )
}

/// Desktop navigation: one `<li>` per item.
#[must_use]
pub fn nav_items(items: &[NavItem]) -> String {
    items
        .iter()
        .map(|item| {
            let class = link_class(classes::HEADER_NAV_LINK, classes::HEADER_NAV_LINK_ACTIVE, item.active);
            format!(
                r#"<li class="{}"><a href="{}" class="{class}">{}</a></li>"#,
                classes::HEADER_NAV_ITEM,
                escape_html(item.href()),
                escape_html(&item.text),
            )
        })
        .collect()
}

/// Mobile navigation: bare `<li>` wrappers around the links.
#[must_use]
pub fn mobile_nav_items(items: &[NavItem]) -> String {
    items
        .iter()
        .map(|item| {
            let class =
                link_class(classes::HEADER_MOBILE_NAV_LINK, classes::HEADER_MOBILE_NAV_LINK_ACTIVE, item.active);
            format!(r#"<li><a href="{}" class="{class}">{}</a></li>"#, escape_html(item.href()), escape_html(&item.text))
        })
        .collect()
}

fn link_class(base: &str, active_class: &str, active: bool) -> String {
    classes::join(&[base, if active { active_class } else { "" }])
}

/// Escape text for use in element content and double-quoted attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
