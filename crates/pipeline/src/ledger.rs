//! Accumulator of new groups not yet submitted as tasks, keyed by image.
//!
//! Images iterate in first-insertion order. A group is kept only if no group
//! with the same canonical id is already held for its image. The ledger is
//! emptied once its tasks are created, so groups emitted by earlier polls
//! are not consulted.

use diagroup_core::types::ImageKey;
use indexmap::IndexMap;

use crate::merger::Group;

#[derive(Debug, Default, Clone)]
pub struct GroupLedger {
    groups: IndexMap<ImageKey, Vec<Group>>,
}

impl GroupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `group` to its image unless it is a duplicate.
    ///
    /// Returns `true` when the group was added.
    pub fn insert(&mut self, group: Group) -> bool {
        if self.contains(&group.image, &group.canonical_id) {
            return false;
        }
        self.groups.entry(group.image.clone()).or_default().push(group);
        true
    }

    pub fn contains(&self, image: &str, canonical_id: &str) -> bool {
        self.groups
            .get(image)
            .is_some_and(|groups| groups.iter().any(|g| g.canonical_id == canonical_id))
    }

    /// Groups of each image, in first-insertion order.
    pub fn images(&self) -> impl Iterator<Item = (&ImageKey, &[Group])> {
        self.groups.iter().map(|(image, groups)| (image, groups.as_slice()))
    }

    /// Total number of groups over all images.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
