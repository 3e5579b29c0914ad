//! Shared domain types for the diagram element grouping engine.
//!
//! Holds the shape wire model exchanged with the crowdsourcing platform,
//! the planar geometry adapter built on [`geo`], and the crate-wide
//! [`CoreError`](error::CoreError).

pub mod error;
pub mod geometry;
pub mod shape;
pub mod types;
