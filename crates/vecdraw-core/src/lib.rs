//! # VecDraw Core
//!
//! Core types shared by every VecDraw crate.
//! Provides the geometry value types, shape and document identifiers,
//! the error taxonomy, and the change-notification plumbing used by
//! the drawing aggregate.

pub mod constants;
pub mod error;
pub mod events;
pub mod geometry;
pub mod id;
pub mod types;

pub use error::{CommandError, DrawingError, Error, Result, ShapeError};

pub use events::{
    ChangeKind, DrawingEvent, DrawingObserver, EventFilter, ObserverRegistry, SubscriptionId,
};

pub use geometry::{ColorData, Point2D, Rect, Vector2D};

pub use id::{DrawingId, ShapeId};

// Re-export type aliases for convenience
pub use types::{thread_safe, ThreadSafe};
