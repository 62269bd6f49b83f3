//! Type aliases for shared state.
//!
//! ## Usage
//!
//! ```rust
//! use vecdraw_core::types::*;
//!
//! let counter: ThreadSafe<u32> = thread_safe(0);
//! *counter.lock() += 1;
//! assert_eq!(*counter.lock(), 1);
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Used for the clipboard and for per-document editor sessions.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Create a new `ThreadSafe<T>` from a value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
