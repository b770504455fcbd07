//! # client
//!
//! Browser-side controllers for the Blue Design System: the light/dark theme
//! switcher and the responsive header's mobile menu.
//!
//! Both controllers are written against the [`dom::Dom`] capability trait
//! rather than `web-sys` directly, so their behavior is exercised natively in
//! tests through `dom::fake::FakeDom`. The `hydrate` feature adds the
//! `web-sys` backend in [`browser`] and the WASM entry points that wire DOM
//! events to the controllers.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | The DOM capability seam |
//! | [`theme`] | Theme resolution, persistence and control reconciliation |
//! | [`header`] | Mobile menu dismissal and navigation markup builders |
//! | `browser` | `web-sys` backend and mount/unmount (`hydrate` only) |

pub mod dom;
pub mod header;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod browser;
