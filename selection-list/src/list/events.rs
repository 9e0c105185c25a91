//! Change notifications for the selection list.
//!
//! Every successful selection change raises a [`SelectedChanged`] event.
//! Events go into a queue that is drained synchronously before the
//! mutating call returns. Handlers get `&mut SelectionList` and may change
//! the list again; the events that raises are queued behind the current one
//! instead of being dispatched recursively.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use super::state::{ListId, SelectionList};

/// The selection of a list changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChanged<V> {
    /// List that raised the event.
    pub list_id: ListId,
    /// Values of all selected entries, in list order, as of the change.
    pub selected: Vec<V>,
}

/// Handle returned by [`SelectionList::on_selected_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<V> = Rc<RefCell<dyn FnMut(&mut SelectionList<V>, &SelectedChanged<V>)>>;

pub(super) struct Subscribers<V> {
    handlers: Vec<(SubscriptionId, Handler<V>)>,
    pending: VecDeque<SelectedChanged<V>>,
    dispatching: bool,
    next_id: u64,
}

impl<V> Default for Subscribers<V> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            pending: VecDeque::new(),
            dispatching: false,
            next_id: 0,
        }
    }
}

impl<V> std::fmt::Debug for Subscribers<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("handlers", &self.handlers.len())
            .field("pending", &self.pending.len())
            .field("dispatching", &self.dispatching)
            .finish()
    }
}

impl<V> Subscribers<V> {
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut SelectionList<V>, &SelectedChanged<V>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Rc::new(RefCell::new(handler))));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.handlers.iter().any(|(handler_id, _)| *handler_id == id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl<V> SelectionList<V> {
    /// Queue an event and, unless a dispatch is already running further up
    /// the stack, drain the queue.
    pub(super) fn emit(&mut self, event: SelectedChanged<V>) {
        self.subscribers.pending.push_back(event);
        if self.subscribers.dispatching {
            log::trace!("{}: queued nested selection change", self.id());
            return;
        }

        self.subscribers.dispatching = true;
        let drained = panic::catch_unwind(AssertUnwindSafe(|| self.drain()));
        self.subscribers.dispatching = false;
        if let Err(payload) = drained {
            // A panicking handler must not leave the queue wedged.
            let dropped = self.subscribers.pending.len();
            self.subscribers.pending.clear();
            log::warn!(
                "{}: selection change handler panicked, dropped {} queued event(s)",
                self.id(),
                dropped
            );
            panic::resume_unwind(payload);
        }
    }

    fn drain(&mut self) {
        while let Some(event) = self.subscribers.pending.pop_front() {
            // Snapshot so handlers can subscribe/unsubscribe while we iterate.
            let round: Vec<_> = self
                .subscribers
                .handlers
                .iter()
                .map(|(id, handler)| (*id, Rc::clone(handler)))
                .collect();
            log::trace!(
                "{}: dispatching selection change to {} handler(s)",
                self.id(),
                round.len()
            );
            for (id, handler) in round {
                if !self.subscribers.is_subscribed(id) {
                    continue;
                }
                let mut handler = handler.borrow_mut();
                (&mut *handler)(self, &event);
            }
        }
    }
}
