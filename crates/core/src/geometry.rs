//! Planar geometry adapter over the [`geo`] crate.
//!
//! Converts shape records into `geo` polygons and back, and provides the
//! containment, area and merge primitives used by the grouping engine.
//! Containment is boundary-inclusive: a point lying exactly on an edge is
//! treated as inside the polygon.
//!
//! Regions are repaired on the way in with a zero-distance offset through
//! [`geo_clipper`], which resolves self-intersections and slivers.

use geo::orient::Direction;
use geo::{
    Area, BooleanOps, ConvexHull, Coord, Intersects, LineString, MultiPolygon, Orient, Point,
    Polygon,
};
use geo_clipper::{EndType, JoinType};

use crate::error::CoreError;
use crate::shape::{Shape, ShapeKind, Vertex};

/// Minimum number of distinct vertices a region needs.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Scale applied before clipping on the integer grid; keeps 1/1000 of a pixel.
const REPAIR_SCALE: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Shape <-> polygon
// ---------------------------------------------------------------------------

/// Convert a rectangle or polygon record into a `geo` polygon.
///
/// Rectangles become the axis-aligned quadrilateral spanning
/// `(left, top)`..`(left + width, top + height)`. Fails with
/// [`CoreError::Shape`] for points, non-finite coordinates, fewer than
/// [`MIN_POLYGON_VERTICES`] distinct vertices, or when nothing with area
/// is left after [`repair`].
pub fn to_polygon(shape: &Shape) -> Result<Polygon<f64>, CoreError> {
    let coords: Vec<Coord<f64>> = match &shape.kind {
        ShapeKind::Rectangle {
            left,
            top,
            width,
            height,
        } => vec![
            Coord { x: *left, y: *top },
            Coord {
                x: left + width,
                y: *top,
            },
            Coord {
                x: left + width,
                y: top + height,
            },
            Coord {
                x: *left,
                y: top + height,
            },
        ],
        ShapeKind::Polygon { points } => points
            .iter()
            .map(|v| Coord {
                x: v.left,
                y: v.top,
            })
            .collect(),
        ShapeKind::Point { .. } => {
            return Err(CoreError::Shape(
                "a point cannot be converted into a region".to_string(),
            ))
        }
    };

    if coords.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(CoreError::Shape(
            "shape has non-finite coordinates".to_string(),
        ));
    }

    let coords = dedup_ring(coords);
    if coords.len() < MIN_POLYGON_VERTICES {
        return Err(CoreError::Shape(format!(
            "shape has {} distinct vertices, at least {MIN_POLYGON_VERTICES} are required",
            coords.len()
        )));
    }

    repair(&Polygon::new(LineString::from(coords), vec![]))
}

/// Convert a polygon back into a `polygon` shape record.
///
/// The point list is the closed exterior ring, so the first vertex is
/// repeated at the end.
pub fn to_shape(polygon: &Polygon<f64>) -> Shape {
    Shape::polygon(
        polygon
            .exterior()
            .coords()
            .map(|c| Vertex::new(c.x, c.y))
            .collect(),
    )
}

/// Convert a point record into a `geo` point.
pub fn to_point(shape: &Shape) -> Result<Point<f64>, CoreError> {
    match shape.kind {
        ShapeKind::Point { left, top } => Ok(Point::new(left, top)),
        _ => Err(CoreError::Shape("shape is not a point".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Predicates and measures
// ---------------------------------------------------------------------------

/// Boundary-inclusive point-in-polygon test.
pub fn contains(polygon: &Polygon<f64>, point: &Point<f64>) -> bool {
    polygon.intersects(point)
}

pub fn area(polygon: &Polygon<f64>) -> f64 {
    polygon.unsigned_area()
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Repair a polygon with a zero-width offset.
///
/// Self-intersecting rings are resolved at their crossings; zero-width
/// spikes and repeated vertices disappear.
/// When the repair yields several parts the largest one is returned. The
/// result is oriented counter-clockwise with holes clockwise.
pub fn repair(polygon: &Polygon<f64>) -> Result<Polygon<f64>, CoreError> {
    let repaired = geo_clipper::Clipper::offset(
        polygon,
        0.0,
        JoinType::Miter(2.0),
        EndType::ClosedPolygon,
        REPAIR_SCALE,
    );

    repaired
        .0
        .into_iter()
        .filter(|part| part.unsigned_area() > 0.0)
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        .map(|part| part.orient(Direction::Default))
        .ok_or_else(|| CoreError::Shape("shape is degenerate (zero area)".to_string()))
}

/// Union the given polygons into one (possibly multi-part) region.
pub fn union(polygons: &[Polygon<f64>]) -> Result<MultiPolygon<f64>, CoreError> {
    let mut parts = polygons
        .iter()
        .map(repair)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let first = parts
        .next()
        .ok_or_else(|| CoreError::Shape("cannot merge an empty set of polygons".to_string()))?;

    Ok(parts.fold(MultiPolygon::new(vec![first]), |acc, part| {
        acc.union(&MultiPolygon::new(vec![part]))
    }))
}

/// Union the polygons and return the convex hull of the merged region.
///
/// Disjoint members still produce a single simple polygon, which is what the
/// next annotation round needs as its input shape.
pub fn union_hull(polygons: &[Polygon<f64>]) -> Result<Polygon<f64>, CoreError> {
    let hull = union(polygons)?.convex_hull();
    if hull.unsigned_area() == 0.0 {
        return Err(CoreError::Shape("merged region has zero area".to_string()));
    }
    Ok(hull)
}

/// Remove consecutive duplicate coordinates and an explicit closing vertex.
fn dedup_ring(mut coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    coords.dedup();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    coords
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
