//! Turn accumulated groups into the next round of tasks.
//!
//! For an image with groups `[g0, .., gk]` every group takes one turn as the
//! source: `k + 1` task specs are produced, each a separate copy of the full
//! group list in which only `gi` is labelled `source`.

use diagroup_core::shape::{Role, Shape};
use diagroup_core::types::ImageKey;

use crate::ledger::GroupLedger;
use crate::merger::Group;

/// One outgoing annotation task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskSpec {
    pub image: ImageKey,
    pub shapes: Vec<Shape>,
    /// Workers that must not be offered this task.
    pub unavailable_for: Vec<String>,
}

impl NewTaskSpec {
    /// The shape acting as anchor in this rotation.
    pub fn source(&self) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.is_source())
    }
}

/// All rotations of one image's groups.
pub fn rotations(image: &str, groups: &[Group], unavailable_for: &[String]) -> Vec<NewTaskSpec> {
    let targets: Vec<Shape> = groups.iter().map(|g| g.to_shape(Role::Target)).collect();

    (0..targets.len())
        .map(|i| {
            let mut shapes = targets.clone();
            shapes[i].role = Some(Role::Source);
            NewTaskSpec {
                image: image.to_string(),
                shapes,
                unavailable_for: unavailable_for.to_vec(),
            }
        })
        .collect()
}

/// Rotations for every image in the ledger, images in first-insertion order.
pub fn expand(ledger: &GroupLedger, unavailable_for: &[String]) -> Vec<NewTaskSpec> {
    ledger
        .images()
        .flat_map(|(image, groups)| rotations(image, groups, unavailable_for))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
