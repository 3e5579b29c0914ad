use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use diagroup_pipeline::platform::{Assignment, Platform, PlatformError, TaskSubmission};
use serde_json::{json, Value};

/// A platform call observed by [`RecordingPlatform`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Accept { id: String, comment: String },
    Reject { id: String, comment: String },
    CreateTasks {
        count: usize,
        allow_defaults: bool,
        open_pool: bool,
    },
}

/// In-memory platform that serves queued polls and records every mutation.
#[derive(Default)]
pub struct RecordingPlatform {
    polls: Mutex<VecDeque<Vec<Assignment>>>,
    calls: Mutex<Vec<Call>>,
    created: Mutex<Vec<TaskSubmission>>,
    fail_verdicts: Mutex<bool>,
    failing_ids: Mutex<HashSet<String>>,
    fail_create: Mutex<bool>,
}

impl RecordingPlatform {
    /// Queue the assignments returned by the next fetch.
    pub fn queue_poll(&self, assignments: Vec<Assignment>) {
        self.polls.lock().unwrap().push_back(assignments);
    }

    /// Make accept/reject calls fail with a 500 until reset.
    pub fn fail_verdicts(&self, fail: bool) {
        *self.fail_verdicts.lock().unwrap() = fail;
    }

    /// Make accept/reject calls for `id` fail with a network error.
    pub fn fail_verdict_for(&self, id: &str, fail: bool) {
        let mut ids = self.failing_ids.lock().unwrap();
        if fail {
            ids.insert(id.to_string());
        } else {
            ids.remove(id);
        }
    }

    /// Make task creation fail with a 503 until reset.
    pub fn fail_create_tasks(&self, fail: bool) {
        *self.fail_create.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<TaskSubmission> {
        self.created.lock().unwrap().clone()
    }

    fn verdict(&self, call: Call) -> Result<(), PlatformError> {
        let id = match &call {
            Call::Accept { id, .. } | Call::Reject { id, .. } => id.as_str(),
            Call::CreateTasks { .. } => "",
        };
        if self.failing_ids.lock().unwrap().contains(id) {
            return Err(PlatformError::Request("connection reset".to_string()));
        }
        if *self.fail_verdicts.lock().unwrap() {
            return Err(PlatformError::Api {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl Platform for RecordingPlatform {
    async fn fetch_submitted_assignments(
        &self,
        _pool_id: &str,
    ) -> Result<Vec<Assignment>, PlatformError> {
        Ok(self.polls.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn accept_assignment(&self, id: &str, comment: &str) -> Result<(), PlatformError> {
        self.verdict(Call::Accept {
            id: id.to_string(),
            comment: comment.to_string(),
        })
    }

    async fn reject_assignment(&self, id: &str, comment: &str) -> Result<(), PlatformError> {
        self.verdict(Call::Reject {
            id: id.to_string(),
            comment: comment.to_string(),
        })
    }

    async fn create_tasks(
        &self,
        tasks: &[TaskSubmission],
        allow_defaults: bool,
        open_pool: bool,
    ) -> Result<(), PlatformError> {
        if *self.fail_create.lock().unwrap() {
            return Err(PlatformError::Api {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.calls.lock().unwrap().push(Call::CreateTasks {
            count: tasks.len(),
            allow_defaults,
            open_pool,
        });
        self.created.lock().unwrap().extend_from_slice(tasks);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn rect(id: &str, label: &str, left: f64, top: f64, width: f64, height: f64) -> Value {
    json!({
        "shape": "rectangle",
        "left": left, "top": top, "width": width, "height": height,
        "ai2d_id": id,
        "label": label
    })
}

pub fn point(left: f64, top: f64) -> Value {
    json!({"shape": "point", "left": left, "top": top})
}

/// Source `S` at (0,0) 10x10, target `T` at (20,0) 10x10, target `U` at
/// (40,0) 10x10.
pub fn diagram() -> Vec<Value> {
    vec![
        rect("S", "source", 0.0, 0.0, 10.0, 10.0),
        rect("T", "target", 20.0, 0.0, 10.0, 10.0),
        rect("U", "target", 40.0, 0.0, 10.0, 10.0),
    ]
}

/// A single-pair submitted assignment.
pub fn assignment(id: &str, image: &str, originals: Vec<Value>, output: Vec<Value>) -> Assignment {
    multi_assignment(id, &[(image, originals, output)])
}

/// A submitted assignment with several (task, solution) pairs.
pub fn multi_assignment(id: &str, pairs: &[(&str, Vec<Value>, Vec<Value>)]) -> Assignment {
    let tasks: Vec<Value> = pairs
        .iter()
        .map(|(image, originals, _)| {
            json!({"input_values": {"image": image, "outlines": originals}})
        })
        .collect();
    let solutions: Vec<Value> = pairs
        .iter()
        .map(|(_, _, output)| json!({"output_values": {"outlines": output}}))
        .collect();

    serde_json::from_value(json!({
        "id": id,
        "status": "SUBMITTED",
        "tasks": tasks,
        "solutions": solutions
    }))
    .unwrap()
}

/// The originals followed by the given points.
pub fn with_points(originals: &[Value], points: &[(f64, f64)]) -> Vec<Value> {
    let mut output = originals.to_vec();
    output.extend(points.iter().map(|&(x, y)| point(x, y)));
    output
}
