//! # VecDraw Designer
//!
//! The document and editing core of the VecDraw vector editor.
//!
//! ## Core Components
//!
//! - **Shapes**: rectangles, ellipses, line segments, polygons, text and
//!   groups, as one closed [`ShapeKind`] enum behind a common [`Shape`]
//!   carrying identity, rotation and style
//! - **Drawing**: the Z-ordered shape list with identity lookup, index
//!   precise insertion and change notifications
//! - **Commands**: reversible edits with an explicit prepare phase
//! - **History**: undo/redo stacks over commands
//! - **Clipboard**: clone-in/clone-out storage for one shape
//! - **Editor**: a per-document session tying the above together
//!
//! ## Architecture
//!
//! ```text
//! DrawingEditor
//!   ├── CommandManager (undo/redo stacks)
//!   │     └── DrawingCommand (add, delete, move, group, ...)
//!   ├── Drawing (Z-ordered shapes, observers)
//!   │     └── Shape (ShapeKind + rotation + style)
//!   └── SharedClipboard
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use vecdraw_designer::DrawingEditor;
//! use vecdraw_core::Vector2D;
//!
//! let mut editor = DrawingEditor::standalone();
//! let id = editor.add_rectangle(10.0, 20.0, 100.0, 50.0).unwrap();
//! editor.move_shapes(&[id], Vector2D::new(5.0, 5.0)).unwrap();
//! editor.undo().unwrap();
//! assert_eq!(editor.drawing().get(id).unwrap().bounds().left(), 10.0);
//! ```

pub mod clipboard;
pub mod commands;
pub mod drawing;
pub mod editor;
pub mod history;
pub mod model;
pub mod serialization;
pub mod visitor;

pub use clipboard::{Clipboard, SharedClipboard};
pub use commands::{
    AddShapeCommand, BringToFrontCommand, ChangeFillColorCommand, ChangeFontSizeCommand,
    ChangeStrokeColorCommand, ChangeTextCommand, Command, CompositeCommand, CopyCommand,
    CutCommand, DeleteShapeCommand, DrawingCommand, DuplicateCommand, EditContext, GroupCommand,
    MoveShapeCommand, PasteCommand, ReflectHorizontalCommand, ReflectVerticalCommand,
    ResizeShapeCommand, RotateShapeCommand, SendToBackCommand, UngroupCommand,
};
pub use drawing::{Drawing, GridState, Placement};
pub use editor::{DrawingEditor, EditorOptions, SharedEditor};
pub use history::CommandManager;
pub use model::{
    EllipseShape, GroupShape, LineSegment, PolygonShape, RectangleShape, RotationState, Shape,
    ShapeGeometry, ShapeKind, StyleState, TextShape,
};
pub use serialization::{DesignFile, DesignMetadata};
pub use visitor::{ShapeCensus, ShapeVisitor};
