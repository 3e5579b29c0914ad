//! Point-to-shape correspondence.
//!
//! Each point a worker draws names the original shape it falls in. When the
//! point lies in several overlapping shapes (a thin line crossing a larger
//! object, a label inside a box), the smallest one wins; equal areas resolve
//! to the shape listed first. Source shapes join the candidate
//! unconditionally.

use diagroup_core::error::CoreError;
use diagroup_core::geometry;
use diagroup_core::shape::Shape;
use diagroup_core::types::ElementId;
use geo::{Point, Polygon};

/// An original shape converted for matching.
#[derive(Debug, Clone)]
struct Region {
    polygon: Polygon<f64>,
    area: f64,
    element_id: ElementId,
    is_source: bool,
}

impl Region {
    fn from_shape(index: usize, shape: &Shape) -> Result<Self, CoreError> {
        let element_id = shape.element_id.clone().ok_or_else(|| {
            CoreError::Shape(format!("original shape #{index} has no ai2d_id"))
        })?;
        let polygon = geometry::to_polygon(shape)?;

        Ok(Self {
            area: geometry::area(&polygon),
            polygon,
            element_id,
            is_source: shape.is_source(),
        })
    }
}

/// Shapes selected for one group, largest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub polygons: Vec<Polygon<f64>>,
    pub ids: Vec<ElementId>,
}

/// Match the drawn points of `output` against `originals`.
///
/// Non-point shapes in `output` are the untouched originals and are ignored.
/// Points outside every original are dropped. Fails with
/// [`CoreError::EmptyGroup`] when neither a source shape nor any matched
/// shape is found.
pub fn resolve(originals: &[Shape], output: &[Shape]) -> Result<Candidate, CoreError> {
    let regions = originals
        .iter()
        .enumerate()
        .map(|(index, shape)| Region::from_shape(index, shape))
        .collect::<Result<Vec<_>, _>>()?;

    let mut members: Vec<&Region> = regions.iter().filter(|r| r.is_source).collect();

    for drawn in output.iter().filter(|s| s.is_point()) {
        let point = geometry::to_point(drawn)?;
        match smallest_containing(&regions, &point) {
            Some(region) => {
                tracing::debug!(
                    x = point.x(),
                    y = point.y(),
                    element_id = %region.element_id,
                    "Point matched",
                );
                members.push(region);
            }
            None => {
                tracing::debug!(x = point.x(), y = point.y(), "Point outside every shape");
            }
        }
    }

    if members.is_empty() {
        return Err(CoreError::EmptyGroup);
    }

    // Stable sort: equal areas keep discovery order.
    members.sort_by(|a, b| b.area.total_cmp(&a.area));

    Ok(Candidate {
        polygons: members.iter().map(|r| r.polygon.clone()).collect(),
        ids: members.iter().map(|r| r.element_id.clone()).collect(),
    })
}

/// The smallest region containing `point`; the first listed on equal area.
fn smallest_containing<'a>(regions: &'a [Region], point: &Point<f64>) -> Option<&'a Region> {
    regions
        .iter()
        .filter(|r| geometry::contains(&r.polygon, point))
        .min_by(|a, b| a.area.total_cmp(&b.area))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
