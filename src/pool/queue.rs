//! Shared FIFO queue of pending crawl work.
//!
//! All workers pull from one queue. `try_take` is an atomic take-or-empty
//! operation: exactly one caller receives any given item, and an empty queue
//! means "no more work", never "wait for more". Items are never re-enqueued,
//! so there is no reader/writer distinction to care about, just one short
//! critical section per dequeue.

use crate::models::ArticleHeader;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Thread-safe FIFO of pending [`ArticleHeader`]s.
///
/// Populated once before the workers start, then drained to empty or to
/// early stop.
#[derive(Debug)]
pub struct TaskQueue {
    items: Mutex<VecDeque<ArticleHeader>>,
}

impl TaskQueue {
    /// Build a queue pre-loaded with the discovered work items, in order.
    pub fn from_items(items: impl IntoIterator<Item = ArticleHeader>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().collect()),
        }
    }

    /// Take the next item, or `None` when the queue is empty.
    ///
    /// Safe for concurrent callers: the lock spans the emptiness check and
    /// the removal, so no two callers can receive the same item.
    pub fn try_take(&self) -> Option<ArticleHeader> {
        self.items
            .lock()
            .expect("task queue mutex poisoned")
            .pop_front()
    }

    /// Number of items still waiting.
    pub fn len(&self) -> usize {
        self.items.lock().expect("task queue mutex poisoned").len()
    }

    /// Whether the queue is currently drained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
