//! Shape clipboard.
//!
//! Holds at most one shape. Every `set` stores a clone and every `get`
//! hands out a fresh clone, so no caller ever aliases the stored shape.
//! There is no global instance: editors share one through
//! [`SharedClipboard`].

use vecdraw_core::{thread_safe, ThreadSafe};

use crate::model::Shape;

/// Clipboard shared by every editor session in a process
pub type SharedClipboard = ThreadSafe<Clipboard>;

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    content: Option<Shape>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a shareable clipboard
    pub fn shared() -> SharedClipboard {
        thread_safe(Self::new())
    }

    /// Store a clone of `shape`, replacing any previous content
    pub fn set(&mut self, shape: &Shape) {
        tracing::debug!("Clipboard now holds {} {}", shape.kind_name(), shape.id());
        self.content = Some(shape.clone());
    }

    /// A clone of the stored shape
    pub fn get(&self) -> Option<Shape> {
        self.content.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }
}
