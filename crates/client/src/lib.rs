//! HTTP client for the crowdsourcing platform REST API.
//!
//! Implements [`diagroup_pipeline::Platform`] on top of [`reqwest`], so the
//! join processor can list submitted assignments, issue verdicts and create
//! task batches against a live pool.

pub mod api;
pub mod config;

pub use api::{ClientError, PlatformClient};
pub use config::ClientConfig;
