//! Drawing change events and observer registry.
//!
//! The drawing emits exactly one [`DrawingEvent`] per committed mutation.
//! Views subscribe through an [`ObserverRegistry`] and may narrow what
//! they receive with an [`EventFilter`].

mod change;
mod observer;

pub use change::{ChangeKind, DrawingEvent};
pub use observer::{DrawingObserver, EventFilter, ObserverRegistry, SubscriptionId};
