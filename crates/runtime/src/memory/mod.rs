//! In-memory host collaborators.
//!
//! Used by the demo binary and by tests; they record everything the engine
//! asks of them so callers can inspect it afterwards.

mod board;
mod recorders;

pub use board::MemoryBoard;
pub use recorders::{MemoryTools, RecordingNotifier, RecordingOverlay, RecordingPeer};

use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
