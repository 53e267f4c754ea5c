use crate::queue::EventQueue;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

new_key_type! {
    pub struct SubscriberId;
}

type Callback<E> = Rc<dyn Fn(E)>;

/// Single-threaded subscriber registry with synchronous delivery.
///
/// Events are delivered in subscription order, after the mutation that
/// produced them. A publish issued from inside a callback is queued and
/// delivered once the current pass has finished, never interleaved.
/// Inside a `batch` scope delivery is deferred until the scope ends and
/// duplicate events are coalesced.
pub struct ChangeHub<E> {
    subscribers: RefCell<SlotMap<SubscriberId, Callback<E>>>,
    order: RefCell<SmallVec<[SubscriberId; 4]>>,
    pending: RefCell<EventQueue<E>>,
    batch_depth: Cell<u32>,
    delivering: Cell<bool>,
}

impl<E: Copy + Eq + Hash + Debug> ChangeHub<E> {
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(SlotMap::with_key()),
            order: RefCell::new(SmallVec::new()),
            pending: RefCell::new(EventQueue::new()),
            batch_depth: Cell::new(0),
            delivering: Cell::new(false),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(E) + 'static,
    {
        let id = self.subscribers.borrow_mut().insert(Rc::new(callback));
        self.order.borrow_mut().push(id);
        tracing::debug!(?id, "subscriber registered");
        id
    }

    /// Returns false if the id was already removed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.borrow_mut().remove(id).is_some();
        if removed {
            self.order.borrow_mut().retain(|&mut sub| sub != id);
            tracing::debug!(?id, "subscriber removed");
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Queue an event and deliver it synchronously unless a batch scope or
    /// a running delivery pass is already on the stack.
    pub fn publish(&self, event: E) {
        if self.pending.borrow_mut().push(event) {
            tracing::trace!(?event, "event queued");
        }
        if self.batch_depth.get() == 0 && !self.delivering.get() {
            self.deliver();
        }
    }

    /// Defer delivery until `f` returns; duplicate events inside the scope
    /// are coalesced, keeping their first position.
    pub fn batch<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.enter_batch();
        let result = f();
        self.exit_batch();
        result
    }

    pub fn enter_batch(&self) {
        self.batch_depth.set(self.batch_depth.get() + 1);
    }

    pub fn exit_batch(&self) {
        let depth = self.batch_depth.get();
        debug_assert!(depth > 0, "exit_batch without matching enter_batch");
        self.batch_depth.set(depth - 1);
        if depth == 1 && !self.delivering.get() && !self.pending.borrow().is_empty() {
            self.deliver();
        }
    }

    fn deliver(&self) {
        self.delivering.set(true);
        loop {
            let events = self.pending.borrow_mut().take_all();
            if events.is_empty() {
                break;
            }
            // Snapshot the callbacks so a subscriber may subscribe or
            // unsubscribe from inside its own callback. A subscriber added
            // during a pass only sees later events.
            let callbacks: Vec<Callback<E>> = {
                let subscribers = self.subscribers.borrow();
                self.order
                    .borrow()
                    .iter()
                    .filter_map(|&id| subscribers.get(id).cloned())
                    .collect()
            };
            for event in events {
                tracing::trace!(?event, fanout = callbacks.len(), "delivering");
                for callback in &callbacks {
                    callback(event);
                }
            }
        }
        self.delivering.set(false);
    }
}

impl<E: Copy + Eq + Hash + Debug> Default for ChangeHub<E> {
    fn default() -> Self {
        Self::new()
    }
}
