//! Structural checks that decide whether a worker's edit is acceptable.
//!
//! The worker is shown the original shapes and may only add points. Every
//! original shape must come back untouched in count, and at least one point
//! must have been drawn.

use diagroup_core::shape::{count_points, Shape};

/// Comment sent with every accepted assignment.
pub const ACCEPT_COMMENT: &str = "Thank you for your work!";

/// Why an assignment is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The worker removed some of the original shapes.
    DeletedShapes,
    /// The worker did not draw any point.
    NoPoints,
    /// Every point missed every shape and there is no source to group with.
    NoMatch,
}

impl Rejection {
    /// Short machine-friendly reason, used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::DeletedShapes => "deleted original shapes",
            Self::NoPoints => "no points drawn",
            Self::NoMatch => "no point inside any shape",
        }
    }

    /// Comment shown to the worker.
    pub fn public_comment(&self) -> &'static str {
        match self {
            Self::DeletedShapes => {
                "Your work was rejected, because you deleted some of the original bounding boxes."
            }
            Self::NoPoints => "Your work was rejected, because you did not draw any points",
            Self::NoMatch => {
                "Your work was rejected, because none of your points is inside a bounding box."
            }
        }
    }
}

/// Validate one (task, solution) pair.
///
/// Returns the number of drawn points when the pair is acceptable. Whether
/// the points hit anything is decided later, by the resolver; a miss there
/// becomes [`Rejection::NoMatch`].
pub fn validate_pair(original: &[Shape], output: &[Shape]) -> Result<usize, Rejection> {
    let points = count_points(output);

    if output.len() - points != original.len() {
        return Err(Rejection::DeletedShapes);
    }
    if points == 0 {
        return Err(Rejection::NoPoints);
    }
    Ok(points)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
