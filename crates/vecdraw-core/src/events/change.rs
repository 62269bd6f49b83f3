use crate::id::{DrawingId, ShapeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of change a drawing went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    /// A shape entered the drawing.
    Add,
    /// A shape left the drawing.
    Remove,
    /// A shape's style or content changed, or the Z-order changed.
    Modify,
    /// A shape's geometry or rotation changed.
    Transform,
    /// Grid settings changed.
    Grid,
    /// The whole shape list was replaced.
    Load,
}

impl ChangeKind {
    /// Returns true for changes that only touch one shape
    pub fn is_incremental(&self) -> bool {
        !matches!(self, ChangeKind::Grid | ChangeKind::Load)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::Add => "ADD",
            ChangeKind::Remove => "REMOVE",
            ChangeKind::Modify => "MODIFY",
            ChangeKind::Transform => "TRANSFORM",
            ChangeKind::Grid => "GRID",
            ChangeKind::Load => "LOAD",
        };
        f.write_str(name)
    }
}

/// Notification delivered to drawing observers after a mutation is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawingEvent {
    /// The drawing that changed.
    pub source: DrawingId,
    /// The change kind.
    pub kind: ChangeKind,
    /// The affected shape, when the change is about one shape.
    pub shape_id: Option<ShapeId>,
}

impl DrawingEvent {
    /// Event about a single shape
    pub fn for_shape(source: DrawingId, kind: ChangeKind, shape_id: ShapeId) -> Self {
        Self {
            source,
            kind,
            shape_id: Some(shape_id),
        }
    }

    /// Event about the drawing as a whole
    pub fn for_drawing(source: DrawingId, kind: ChangeKind) -> Self {
        Self {
            source,
            kind,
            shape_id: None,
        }
    }
}

impl fmt::Display for DrawingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape_id {
            Some(id) => write!(f, "{} {} {}", self.source, self.kind, id),
            None => write!(f, "{} {}", self.source, self.kind),
        }
    }
}
