//! clientele-core: the derived-view pipeline behind the customer roster.
//!
//! The crate turns a raw record collection plus user-chosen view parameters
//! (zone filter, free-text search, page number) into the exact slice of
//! customers to display, recomputed wholesale on every change.
//!
//! Everything except [`view::controller::Roster`] is a pure function of its
//! inputs:
//!
//! - [`normalize`] — raw JSON records into canonical [`Customer`] values
//! - [`view::zones`] — distinct sorted zone index
//! - [`view::filter`] — zone + search predicates
//! - [`view::sort`] — stable zone/signup ordering
//! - [`view::page`] — fixed-size page slicing
//! - [`view::controller`] — the one stateful piece: view parameters, load
//!   lifecycle, and the recomputed [`ViewSnapshot`] handed to presentation
//!
//! # Conventions
//!
//! - **Errors**: typed [`LoadError`] at the data boundary; `anyhow::Result`
//!   where config loading meets the filesystem.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod collate;
pub mod config;
pub mod model;
pub mod normalize;
pub mod source;
pub mod view;

pub use model::customer::{Customer, SignupDate};
pub use source::{LoadError, LoadOutcome, load_customers};
pub use view::controller::{LoadTicket, Roster, ViewSnapshot, ViewStatus};
pub use view::filter::{FilterState, ZoneFilter};
