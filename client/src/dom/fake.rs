//! In-memory [`Dom`] for controller tests.
//!
//! Supports the selector subset the controllers use: comma-separated
//! compounds of a tag name, `#id`, `.class` and `[attr]` / `[attr="value"]`.
//! Cookies behave like `document.cookie`: an assignment with the epoch expiry
//! deletes, anything else upserts.

use std::collections::{BTreeMap, BTreeSet};

use design::{Preference, THEME_ATTRIBUTE};
use design::cookie::EPOCH_EXPIRY;
use time::OffsetDateTime;
use time::macros::datetime;

use super::Dom;

#[derive(Debug, Default, Clone)]
struct FakeElement {
    tag: String,
    parent: Option<usize>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    display: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeDom {
    elements: Vec<FakeElement>,
    root_attrs: BTreeMap<String, String>,
    root_classes: BTreeSet<String>,
    jar: Vec<(String, String)>,
    /// Every raw `document.cookie` assignment, in order.
    pub cookie_writes: Vec<String>,
    /// Every theme-changed notification, in order.
    pub events: Vec<Preference>,
    /// Root `data-theme` at the moment of each notification.
    pub root_at_events: Vec<Option<String>>,
    pub prefers_dark: bool,
    pub secure: bool,
    pub now: OffsetDateTime,
}

impl Default for FakeDom {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            root_attrs: BTreeMap::new(),
            root_classes: BTreeSet::new(),
            jar: Vec::new(),
            cookie_writes: Vec::new(),
            events: Vec::new(),
            root_at_events: Vec::new(),
            prefers_dark: false,
            secure: false,
            now: datetime!(2026-10-16 12:00:00 UTC),
        }
    }
}

impl FakeDom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. `class` and `id` attributes behave as in HTML.
    pub fn add(&mut self, tag: &str, parent: Option<usize>, attrs: &[(&str, &str)]) -> usize {
        let mut el = FakeElement { tag: tag.to_owned(), parent, ..FakeElement::default() };
        for (name, value) in attrs {
            if *name == "class" {
                el.classes.extend(value.split_whitespace().map(str::to_owned));
            } else {
                el.attrs.insert((*name).to_owned(), (*value).to_owned());
            }
        }
        self.elements.push(el);
        self.elements.len() - 1
    }

    /// Seed a cookie as if the browser already had it.
    pub fn seed_cookie(&mut self, name: &str, value: &str) {
        self.upsert_cookie(name, value);
    }

    pub fn set_root_attr(&mut self, name: &str, value: &str) {
        self.root_attrs.insert(name.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn root_attr(&self, name: &str) -> Option<&str> {
        self.root_attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn root_has_class(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }

    #[must_use]
    pub fn display(&self, node: usize) -> Option<&str> {
        self.elements.get(node).and_then(|el| el.display.as_deref())
    }

    #[must_use]
    pub fn node_has_class(&self, node: usize, class: &str) -> bool {
        self.elements.get(node).is_some_and(|el| el.classes.contains(class))
    }

    fn upsert_cookie(&mut self, name: &str, value: &str) {
        match self.jar.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_owned(),
            None => self.jar.push((name.to_owned(), value.to_owned())),
        }
    }

    fn matches(&self, node: usize, selector: &str) -> bool {
        let Some(el) = self.elements.get(node) else {
            return false;
        };
        selector.split(',').map(str::trim).filter(|s| !s.is_empty()).any(|compound| {
            let parsed = Compound::parse(compound);
            parsed.tag.as_deref().is_none_or(|t| t.eq_ignore_ascii_case(&el.tag))
                && parsed.id.as_deref().is_none_or(|id| el.attrs.get("id").is_some_and(|v| v == id))
                && parsed.classes.iter().all(|c| el.classes.contains(c))
                && parsed.attrs.iter().all(|(name, value)| match (el.attrs.get(name), value) {
                    (Some(actual), Some(expected)) => actual == expected,
                    (Some(_), None) => true,
                    (None, _) => false,
                })
        })
    }
}

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn parse(src: &str) -> Self {
        let mut out = Self::default();
        let mut rest = src;
        let tag_len = rest.find(['.', '#', '[']).unwrap_or(rest.len());
        if tag_len > 0 {
            out.tag = Some(rest[..tag_len].to_owned());
        }
        rest = &rest[tag_len..];
        while let Some(first) = rest.chars().next() {
            let body = &rest[1..];
            match first {
                '[' => {
                    let end = body.find(']').unwrap_or(body.len());
                    let inner = &body[..end];
                    let attr = match inner.split_once('=') {
                        Some((name, value)) => (name.trim().to_owned(), Some(value.trim().trim_matches('"').to_owned())),
                        None => (inner.trim().to_owned(), None),
                    };
                    out.attrs.push(attr);
                    rest = body.get(end + 1..).unwrap_or("");
                }
                '.' | '#' => {
                    let end = body.find(['.', '#', '[']).unwrap_or(body.len());
                    let ident = body[..end].to_owned();
                    if first == '.' {
                        out.classes.push(ident);
                    } else {
                        out.id = Some(ident);
                    }
                    rest = &body[end..];
                }
                _ => break,
            }
        }
        out
    }
}

impl Dom for FakeDom {
    type Node = usize;

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attrs.get(name).cloned()
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.set_root_attr(name, value);
    }

    fn set_root_class(&mut self, class: &str, on: bool) {
        if on {
            self.root_classes.insert(class.to_owned());
        } else {
            self.root_classes.remove(class);
        }
    }

    fn by_id(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.attrs.get("id").is_some_and(|v| v == id))
    }

    fn query(&self, selector: &str) -> Option<usize> {
        (0..self.elements.len()).find(|&i| self.matches(i, selector))
    }

    fn query_all(&self, selector: &str) -> Vec<usize> {
        (0..self.elements.len()).filter(|&i| self.matches(i, selector)).collect()
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.elements.get(*node).and_then(|el| el.attrs.get(name).cloned())
    }

    fn has_class(&self, node: &usize, class: &str) -> bool {
        self.node_has_class(*node, class)
    }

    fn set_class(&mut self, node: &usize, class: &str, on: bool) {
        if let Some(el) = self.elements.get_mut(*node) {
            if on {
                el.classes.insert(class.to_owned());
            } else {
                el.classes.remove(class);
            }
        }
    }

    fn set_display(&mut self, node: &usize, value: &str) {
        if let Some(el) = self.elements.get_mut(*node) {
            el.display = Some(value.to_owned());
        }
    }

    fn contains(&self, ancestor: &usize, node: &usize) -> bool {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = self.elements.get(current).and_then(|el| el.parent);
        }
        false
    }

    fn cookie(&self) -> String {
        self.jar.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("; ")
    }

    fn write_cookie(&mut self, assignment: &str) {
        self.cookie_writes.push(assignment.to_owned());
        let mut parts = assignment.split(';').map(str::trim);
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let expired = parts.any(|attr| attr.strip_prefix("expires=") == Some(EPOCH_EXPIRY));
        if expired {
            self.jar.retain(|(k, _)| k != name);
        } else {
            self.upsert_cookie(name, value);
        }
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn is_secure(&self) -> bool {
        self.secure
    }

    fn now(&self) -> OffsetDateTime {
        self.now
    }

    fn emit_theme_changed(&mut self, theme: Preference) {
        self.events.push(theme);
        self.root_at_events.push(self.root_attrs.get(THEME_ATTRIBUTE).cloned());
    }
}
