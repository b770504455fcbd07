//! Light/dark theme switching.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server injects `data-theme` from the `blue-theme` cookie before first
//! paint when it can. This module picks up from there in the browser: it
//! settles the effective theme, keeps the cookie in step with explicit
//! choices, follows the OS color scheme while no choice is pinned, and
//! reconciles every theme control on the page after each change.

mod config;
mod controller;

pub use config::{ThemeConfig, ThemeSelectors};
pub use controller::{ControlAction, TRANSITION_SUPPRESS_MS, ThemeController, applied_theme};
