//! The derived-view pipeline.
//!
//! Pure stages ([`filter`], [`sort`], [`page`], [`zones`]) composed by the one
//! stateful piece, [`controller::Roster`].

pub mod controller;
pub mod filter;
pub mod page;
pub mod sort;
pub mod zones;
