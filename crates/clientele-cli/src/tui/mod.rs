//! Terminal user interface (TUI) for clientele.
//!
//! Provides the interactive full-screen roster browser.
//!
//! ## Entry points
//!
//! - [`browse::run`] — paginated customer table with live search and a zone
//!   picker.

pub mod browse;
