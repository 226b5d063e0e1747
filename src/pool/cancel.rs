//! Cooperative cancellation signal shared by every worker.
//!
//! The signal is a level-triggered flag: once set it stays set for the rest
//! of the run, and workers observe it at loop-iteration granularity. Setting
//! it never interrupts an in-flight fetch; it only prevents workers from
//! starting new items.

use std::sync::atomic::{AtomicBool, Ordering};

/// A shared stop flag: written at most once per run, read by every worker
/// before each dequeue.
///
/// Single writer, many readers; an atomic flag is all the synchronization
/// this needs.
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: AtomicBool,
}

impl StopSignal {
    /// Create a fresh, unset signal for a new run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that all workers stop before their next item.
    pub fn request_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
