//! DOM capability seam.
//!
//! DESIGN
//! ======
//! Controllers never touch `web-sys`. Everything they need from the page
//! (root attributes, selector queries, class and display toggles, the cookie
//! string, the color-scheme media query, the clock, and event dispatch) goes
//! through [`Dom`]. A missing element is an empty query result, which the
//! controllers treat as "feature absent".

use design::Preference;
use time::OffsetDateTime;

#[cfg(test)]
pub mod fake;

/// Page capabilities the controllers depend on.
pub trait Dom {
    /// Handle to an element inside the document.
    type Node: Clone;

    // --- Document root ---

    fn root_attribute(&self, name: &str) -> Option<String>;
    fn set_root_attribute(&mut self, name: &str, value: &str);
    fn set_root_class(&mut self, class: &str, on: bool);

    // --- Queries ---

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    /// First element matching a CSS selector list.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All elements matching a CSS selector list, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    // --- Elements ---

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);
    /// Set the inline `display` style.
    fn set_display(&mut self, node: &Self::Node, value: &str);
    /// Inclusive containment: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    // --- Environment ---

    /// Current `document.cookie` string.
    fn cookie(&self) -> String;
    /// Assign to `document.cookie`.
    fn write_cookie(&mut self, assignment: &str);
    /// Whether `(prefers-color-scheme: dark)` currently matches.
    fn prefers_dark(&self) -> bool;
    /// Whether the page was served over an encrypted transport.
    fn is_secure(&self) -> bool;
    fn now(&self) -> OffsetDateTime;
    /// Broadcast the theme-changed notification to the rest of the page.
    fn emit_theme_changed(&mut self, theme: Preference);
}
