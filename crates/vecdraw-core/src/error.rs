//! Error handling for VecDraw
//!
//! Error types for each layer of the editing core:
//! - Shape errors (invalid arguments, degenerate geometry)
//! - Drawing errors (index range, identity lookups)
//! - Command errors (preconditions, lifecycle misuse, clipboard state)
//!
//! Every failure is raised before any state is touched, so callers can
//! treat an `Err` as "nothing happened".

use crate::id::ShapeId;
use thiserror::Error;

/// Shape error type
///
/// Raised by constructors and setters that receive unusable input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// An argument was outside its accepted domain
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The argument name.
        argument: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The resulting geometry would be below the minimum size
    #[error("Degenerate {kind} geometry: {reason}")]
    DegenerateGeometry {
        /// The shape kind being built or resized.
        kind: String,
        /// What made the geometry degenerate.
        reason: String,
    },

    /// The operation does not apply to this kind of shape
    #[error("{operation} is not supported by {kind} shapes")]
    Unsupported {
        /// The requested operation.
        operation: String,
        /// The shape kind it was requested on.
        kind: String,
    },
}

impl ShapeError {
    /// Create an invalid-argument error
    pub fn invalid(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Create a degenerate-geometry error
    pub fn degenerate(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

/// Drawing error type
///
/// Represents failures of the document aggregate's structural operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawingError {
    /// Insertion index outside `[0, len]`
    #[error("Index {index} out of range for drawing with {len} shapes")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The number of shapes in the drawing.
        len: usize,
    },

    /// No shape with this identity is in the drawing
    #[error("Shape {id} not found in drawing")]
    ShapeNotFound {
        /// The missing identity.
        id: ShapeId,
    },

    /// A shape with this identity is already in the drawing
    #[error("Shape {id} is already in the drawing")]
    DuplicateShape {
        /// The duplicated identity.
        id: ShapeId,
    },

    /// Grid spacing must be a positive finite number
    #[error("Invalid grid spacing: {spacing}")]
    InvalidGrid {
        /// The rejected spacing.
        spacing: f64,
    },

    /// Shape-level failure while mutating a shape in place
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Command error type
///
/// Represents failures while preparing, executing or undoing a command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The command cannot be built or run against the current state
    #[error("{command}: precondition failed: {reason}")]
    Precondition {
        /// The command name.
        command: String,
        /// The violated requirement.
        reason: String,
    },

    /// `execute` or `undo` was called before `prepare`
    #[error("{command} was run before it was prepared")]
    NotPrepared {
        /// The command name.
        command: String,
    },

    /// Paste requested with nothing on the clipboard
    #[error("Clipboard is empty")]
    ClipboardEmpty,

    /// Drawing-level failure
    #[error(transparent)]
    Drawing(#[from] DrawingError),

    /// Shape-level failure
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl CommandError {
    /// Create a precondition error
    pub fn precondition(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Precondition {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-prepared error
    pub fn not_prepared(command: impl Into<String>) -> Self {
        Self::NotPrepared {
            command: command.into(),
        }
    }
}

/// Unified error type
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Drawing error
    #[error(transparent)]
    Drawing(#[from] DrawingError),

    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error was caused by a missing shape
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Drawing(DrawingError::ShapeNotFound { .. })
                | Error::Command(CommandError::Drawing(DrawingError::ShapeNotFound { .. }))
        )
    }
}

/// Result type alias using the unified error type
pub type Result<T> = std::result::Result<T, Error>;
