//! Record of assignments that already received a verdict.
//!
//! A poll may return an assignment again before its accepted/rejected state
//! has propagated on the platform side. The store lets the processor skip
//! those. [`MemoryProcessedStore`] lives as long as the process; a durable
//! implementation can be injected without touching the processor.

use std::collections::HashSet;

use diagroup_core::types::AssignmentId;

pub trait ProcessedStore: Send {
    fn contains(&self, id: &str) -> bool;

    fn record(&mut self, id: AssignmentId);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime set of assignment ids.
#[derive(Debug, Default, Clone)]
pub struct MemoryProcessedStore {
    ids: HashSet<AssignmentId>,
}

impl MemoryProcessedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProcessedStore for MemoryProcessedStore {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn record(&mut self, id: AssignmentId) {
        self.ids.insert(id);
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
