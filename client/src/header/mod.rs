//! Responsive header: mobile menu behavior and navigation markup.

mod markup;
mod menu;

pub use markup::{Brand, NavItem, escape_html, header_brand, mobile_nav_items, nav_items};
pub use menu::{HeaderConfig, HeaderController};
