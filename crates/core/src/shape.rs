//! Shape records exchanged with the annotation platform.
//!
//! A shape on the wire is a flat JSON object discriminated by its `"shape"`
//! key, e.g. `{"shape": "rectangle", "left": 10, "top": 4, "width": 30,
//! "height": 12, "ai2d_id": "T3", "label": "source"}`. Original shapes carry
//! an `ai2d_id` and a `label`; points drawn by workers carry neither.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::ElementId;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Whether a shape is the anchor of a task or one of its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Source,
    Target,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

/// One polygon vertex in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub left: f64,
    pub top: f64,
}

impl Vertex {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// The geometric part of a shape record, tagged by the `"shape"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    Polygon {
        points: Vec<Vertex>,
    },
    Point {
        left: f64,
        top: f64,
    },
}

/// A shape record as it appears in task inputs and solution outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(flatten)]
    pub kind: ShapeKind,

    #[serde(rename = "ai2d_id", default, skip_serializing_if = "Option::is_none")]
    pub element_id: Option<ElementId>,

    #[serde(rename = "label", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Shape {
    /// An unlabelled worker-drawn point.
    pub fn point(left: f64, top: f64) -> Self {
        Self {
            kind: ShapeKind::Point { left, top },
            element_id: None,
            role: None,
        }
    }

    pub fn rectangle(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            kind: ShapeKind::Rectangle {
                left,
                top,
                width,
                height,
            },
            element_id: None,
            role: None,
        }
    }

    pub fn polygon(points: Vec<Vertex>) -> Self {
        Self {
            kind: ShapeKind::Polygon { points },
            element_id: None,
            role: None,
        }
    }

    /// Attach an element id.
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    /// Attach a role label.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn is_point(&self) -> bool {
        matches!(self.kind, ShapeKind::Point { .. })
    }

    pub fn is_source(&self) -> bool {
        self.role == Some(Role::Source)
    }
}

// ---------------------------------------------------------------------------
// Payload decoding
// ---------------------------------------------------------------------------

/// Decode the shape array stored under `field` in a task or solution payload.
pub fn shapes_from_payload(
    payload: &serde_json::Map<String, serde_json::Value>,
    field: &str,
) -> Result<Vec<Shape>, CoreError> {
    let value = payload
        .get(field)
        .ok_or_else(|| CoreError::Payload(format!("missing field '{field}'")))?;

    Vec::<Shape>::deserialize(value)
        .map_err(|e| CoreError::Payload(format!("field '{field}' is not a shape array: {e}")))
}

/// Count the worker-drawn points in a shape list.
pub fn count_points(shapes: &[Shape]) -> usize {
    shapes.iter().filter(|s| s.is_point()).count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
