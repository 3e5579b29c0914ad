//! Interface to the crowdsourcing platform.
//!
//! The grouping engine only needs four calls: list submitted assignments,
//! accept or reject one, and create a batch of tasks. [`Platform`] is the
//! seam; `diagroup-client` provides the HTTP implementation and tests use
//! an in-memory recorder.

use async_trait::async_trait;
use diagroup_core::types::AssignmentId;
use serde::{Deserialize, Serialize};

/// A JSON object as used for task inputs and solution outputs.
pub type Payload = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Platform-side lifecycle state of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Active,
    Submitted,
    Accepted,
    Rejected,
    Skipped,
    Expired,
    #[serde(other)]
    Unknown,
}

/// The task a worker was shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub input_values: Payload,
}

/// What the worker sent back for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub output_values: Payload,
}

/// One worker's submission; `tasks` and `solutions` are parallel lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub solutions: Vec<SolutionRecord>,
}

impl Assignment {
    /// Iterate the (task, solution) pairs in submission order.
    pub fn pairs(&self) -> impl Iterator<Item = (&TaskRecord, &SolutionRecord)> {
        self.tasks.iter().zip(&self.solutions)
    }
}

/// A task to be created in a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSubmission {
    pub pool_id: String,
    pub input_values: Payload,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavailable_for: Vec<String>,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Failure of a platform round-trip. Never retried by the engine.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The request could not be sent or its response not read.
    #[error("Platform request failed: {0}")]
    Request(String),

    /// The platform answered with a non-2xx status.
    #[error("Platform API error ({status}): {body}")]
    Api { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Platform trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Platform: Send + Sync {
    /// All assignments of `pool_id` currently in the submitted state.
    async fn fetch_submitted_assignments(
        &self,
        pool_id: &str,
    ) -> Result<Vec<Assignment>, PlatformError>;

    async fn accept_assignment(&self, id: &str, comment: &str) -> Result<(), PlatformError>;

    async fn reject_assignment(&self, id: &str, comment: &str) -> Result<(), PlatformError>;

    /// Create `tasks` in one batch call.
    async fn create_tasks(
        &self,
        tasks: &[TaskSubmission],
        allow_defaults: bool,
        open_pool: bool,
    ) -> Result<(), PlatformError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
