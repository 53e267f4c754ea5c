use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::hash::Hash;

/// FIFO queue of pending change events with duplicate suppression.
///
/// An event pushed twice before the queue is drained keeps its first
/// position; once drained, the same event may be queued again.
pub struct EventQueue<E> {
    queue: VecDeque<E>,
    seen: FxHashSet<E>,
}

impl<E: Copy + Eq + Hash> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            seen: FxHashSet::default(),
        }
    }

    /// Returns true if the event was queued, false if it was coalesced
    /// into an already pending occurrence.
    pub fn push(&mut self, event: E) -> bool {
        if self.seen.insert(event) {
            self.queue.push_back(event);
            true
        } else {
            false
        }
    }

    pub fn take_all(&mut self) -> Vec<E> {
        self.seen.clear();
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<E: Copy + Eq + Hash> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
