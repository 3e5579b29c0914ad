//! The join step of the grouping pipeline.
//!
//! [`JoinElements::run`] is invoked once per polling cycle. It fetches the
//! submitted assignments of the point-annotation pool, gives each unseen
//! assignment exactly one verdict, merges the accepted points into groups
//! and submits the next round of grouping tasks as one batch.

use diagroup_core::error::CoreError;
use diagroup_core::shape::shapes_from_payload;

use crate::config::JoinConfig;
use crate::expansion::{self, NewTaskSpec};
use crate::gate::{self, Rejection, ACCEPT_COMMENT};
use crate::ledger::GroupLedger;
use crate::merger::{self, Group};
use crate::platform::{
    Assignment, Payload, Platform, PlatformError, SolutionRecord, TaskRecord, TaskSubmission,
};
use crate::processed::{MemoryProcessedStore, ProcessedStore};
use crate::resolver;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Counters describing one invocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Submitted assignments returned by the poll.
    pub fetched: usize,
    /// Assignments skipped because they already had a verdict.
    pub skipped_seen: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// (task, solution) pairs skipped on malformed shapes or payloads.
    pub skipped_pairs: usize,
    /// Distinct groups accumulated.
    pub groups: usize,
    pub tasks_created: usize,
}

enum PairOutcome {
    Grouped(Group),
    Rejected(Rejection),
}

enum Verdict {
    Accept(Vec<Group>),
    Reject(Rejection),
}

// ---------------------------------------------------------------------------
// JoinElements
// ---------------------------------------------------------------------------

/// Joins the shapes workers pointed at into groups and feeds them back.
///
/// Groups of accepted assignments stay in `pending` until the task batch
/// carrying them has been created, so an invocation cut short by a platform
/// failure hands them to the next one.
pub struct JoinElements<P, S = MemoryProcessedStore> {
    config: JoinConfig,
    platform: P,
    processed: S,
    pending: GroupLedger,
}

impl<P: Platform> JoinElements<P, MemoryProcessedStore> {
    /// Create a processor with an in-memory processed-assignment store.
    pub fn new(config: JoinConfig, platform: P) -> Self {
        Self::with_store(config, platform, MemoryProcessedStore::new())
    }
}

impl<P: Platform, S: ProcessedStore> JoinElements<P, S> {
    pub fn with_store(config: JoinConfig, platform: P, processed: S) -> Self {
        Self {
            config,
            platform,
            processed,
            pending: GroupLedger::new(),
        }
    }

    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn processed(&self) -> &S {
        &self.processed
    }

    /// Groups accepted but not yet submitted as tasks.
    pub fn pending(&self) -> &GroupLedger {
        &self.pending
    }

    /// Process every submitted assignment of `pool_id` once.
    ///
    /// Platform failures abort the invocation and are returned unchanged.
    /// An assignment whose verdict call failed stays unrecorded and is picked
    /// up again by the next poll; groups of assignments accepted before the
    /// failure stay pending and go out with the next successful batch.
    pub async fn run(&mut self, pool_id: &str) -> Result<RunSummary, PlatformError> {
        let assignments = self.platform.fetch_submitted_assignments(pool_id).await?;
        let mut summary = RunSummary {
            fetched: assignments.len(),
            ..RunSummary::default()
        };

        if assignments.is_empty() && self.pending.is_empty() {
            tracing::debug!(processor = %self.config.name, pool_id, "No submitted assignments");
            return Ok(summary);
        }

        for assignment in &assignments {
            if self.processed.contains(&assignment.id) {
                summary.skipped_seen += 1;
                continue;
            }

            match self.judge(assignment, &mut summary) {
                Verdict::Reject(rejection) => {
                    self.platform
                        .reject_assignment(&assignment.id, rejection.public_comment())
                        .await?;
                    tracing::warn!(
                        assignment_id = %assignment.id,
                        reason = rejection.reason(),
                        "Rejected assignment",
                    );
                    summary.rejected += 1;
                }
                Verdict::Accept(groups) => {
                    self.platform
                        .accept_assignment(&assignment.id, ACCEPT_COMMENT)
                        .await?;
                    tracing::info!(
                        assignment_id = %assignment.id,
                        groups = groups.len(),
                        "Accepted assignment",
                    );
                    summary.accepted += 1;

                    for group in groups {
                        let canonical_id = group.canonical_id.clone();
                        if self.pending.insert(group) {
                            summary.groups += 1;
                        } else {
                            tracing::debug!(group = %canonical_id, "Duplicate group dropped");
                        }
                    }
                }
            }

            self.processed.record(assignment.id.clone());
        }

        let tasks: Vec<TaskSubmission> = expansion::expand(&self.pending, &self.config.blocklist)
            .iter()
            .map(|spec| self.submission(spec))
            .collect();

        if !tasks.is_empty() {
            self.platform.create_tasks(&tasks, true, true).await?;
            summary.tasks_created = tasks.len();
            tracing::info!(
                processor = %self.config.name,
                target_pool_id = %self.config.target_pool_id,
                images = self.pending.images().count(),
                tasks = tasks.len(),
                "Created grouping tasks",
            );
        }
        self.pending = GroupLedger::new();

        tracing::info!(processor = %self.config.name, ?summary, "Join cycle finished");
        Ok(summary)
    }

    /// Decide the verdict of one assignment.
    ///
    /// The first failing pair rejects the whole assignment and discards the
    /// groups staged from earlier pairs.
    fn judge(&self, assignment: &Assignment, summary: &mut RunSummary) -> Verdict {
        if assignment.tasks.len() != assignment.solutions.len() {
            tracing::warn!(
                assignment_id = %assignment.id,
                tasks = assignment.tasks.len(),
                solutions = assignment.solutions.len(),
                "Task and solution counts differ, extra entries ignored",
            );
        }

        let mut staged = Vec::new();

        for (index, (task, solution)) in assignment.pairs().enumerate() {
            match self.evaluate_pair(task, solution) {
                Ok(PairOutcome::Grouped(group)) => staged.push(group),
                Ok(PairOutcome::Rejected(rejection)) => return Verdict::Reject(rejection),
                Err(e) => {
                    tracing::error!(
                        assignment_id = %assignment.id,
                        pair = index,
                        error = %e,
                        "Skipping task/solution pair",
                    );
                    summary.skipped_pairs += 1;
                }
            }
        }

        Verdict::Accept(staged)
    }

    fn evaluate_pair(
        &self,
        task: &TaskRecord,
        solution: &SolutionRecord,
    ) -> Result<PairOutcome, CoreError> {
        let originals = shapes_from_payload(&task.input_values, &self.config.data_field)?;
        let output = shapes_from_payload(&solution.output_values, &self.config.data_field)?;

        if let Err(rejection) = gate::validate_pair(&originals, &output) {
            return Ok(PairOutcome::Rejected(rejection));
        }

        let image = image_from_payload(&task.input_values, &self.config.image_field)?;
        let candidate = match resolver::resolve(&originals, &output) {
            Ok(candidate) => candidate,
            Err(CoreError::EmptyGroup) => return Ok(PairOutcome::Rejected(Rejection::NoMatch)),
            Err(e) => return Err(e),
        };
        let group = merger::merge(image, &candidate)?;

        Ok(PairOutcome::Grouped(group))
    }

    fn submission(&self, spec: &NewTaskSpec) -> TaskSubmission {
        let mut input_values = Payload::new();
        input_values.insert(
            self.config.image_field.clone(),
            serde_json::Value::String(spec.image.clone()),
        );
        input_values.insert(self.config.data_field.clone(), serde_json::json!(spec.shapes));

        TaskSubmission {
            pool_id: self.config.target_pool_id.clone(),
            input_values,
            unavailable_for: spec.unavailable_for.clone(),
        }
    }
}

fn image_from_payload<'a>(payload: &'a Payload, field: &str) -> Result<&'a str, CoreError> {
    payload
        .get(field)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| CoreError::Payload(format!("missing string field '{field}'")))
}
