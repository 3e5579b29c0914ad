//! Merge a resolved candidate into a single group region.

use std::collections::BTreeSet;

use diagroup_core::error::CoreError;
use diagroup_core::geometry;
use diagroup_core::shape::{Role, Shape};
use diagroup_core::types::{ElementId, ImageKey};
use geo::Polygon;

use crate::resolver::Candidate;

/// Separator between member ids in a canonical group id.
pub const ID_DELIMITER: &str = "+";

/// A set of diagram elements judged to belong together.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub image: ImageKey,
    pub member_ids: BTreeSet<ElementId>,
    /// Convex hull of the union of all member shapes.
    pub boundary: Polygon<f64>,
    pub canonical_id: String,
}

impl Group {
    /// The group as a `polygon` shape record carrying its canonical id.
    pub fn to_shape(&self, role: Role) -> Shape {
        geometry::to_shape(&self.boundary)
            .with_id(self.canonical_id.clone())
            .with_role(role)
    }
}

/// Sorted, de-duplicated, `+`-joined member ids.
///
/// The same member set always yields the same string, whatever order the
/// ids were discovered in.
pub fn canonical_id<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(ID_DELIMITER)
}

/// Union the candidate's polygons and wrap the hull into a [`Group`].
pub fn merge(image: &str, candidate: &Candidate) -> Result<Group, CoreError> {
    if candidate.ids.is_empty() {
        return Err(CoreError::EmptyGroup);
    }

    let boundary = geometry::union_hull(&candidate.polygons)?;
    let member_ids: BTreeSet<ElementId> = candidate.ids.iter().cloned().collect();

    Ok(Group {
        image: image.to_string(),
        canonical_id: canonical_id(&member_ids),
        member_ids,
        boundary,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
