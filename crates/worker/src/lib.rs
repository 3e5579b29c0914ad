//! Polling worker for the join step of the grouping pipeline.
//!
//! Loads configuration from the environment and invokes
//! [`JoinElements::run`](diagroup_pipeline::JoinElements::run) once per
//! interval until cancelled.

pub mod config;
pub mod poller;

pub use config::WorkerConfig;
