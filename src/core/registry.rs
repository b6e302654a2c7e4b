//! # Listener registry - name-keyed ordered queues.
//!
//! Plain queue storage: a mapping from event name to an ordered sequence of
//! [`ListenerEntry`]. Insertion order is the sole determinant of invocation
//! order during broadcast; no reordering happens here or anywhere else.
//!
//! ## Rules
//! - An absent key is equivalent to an empty queue for every read operation.
//! - A queue whose last entry is removed is dropped from the map, so a fully
//!   drained queue is indistinguishable from a never-registered one.
//! - `shift`/`pop` on an absent name do not create the key.

use std::collections::HashMap;
use std::sync::Arc;

use crate::listeners::ListenerEntry;

/// Name-keyed ordered listener queues.
pub(crate) struct Registry {
    queues: HashMap<Arc<str>, Vec<ListenerEntry>>,
}

impl Registry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    /// Appends an entry to the back of `event`'s queue, creating it if absent.
    ///
    /// Returns the new queue length.
    pub(crate) fn append(&mut self, event: &Arc<str>, entry: ListenerEntry) -> usize {
        let queue = self.queues.entry(event.clone()).or_default();
        queue.push(entry);
        queue.len()
    }

    /// Prepends an entry to the front of `event`'s queue, creating it if absent.
    ///
    /// Returns the new queue length.
    pub(crate) fn prepend(&mut self, event: &Arc<str>, entry: ListenerEntry) -> usize {
        let queue = self.queues.entry(event.clone()).or_default();
        queue.insert(0, entry);
        queue.len()
    }

    /// Removes and returns the front entry, or `None` if the queue is absent/empty.
    pub(crate) fn take_front(&mut self, event: &str) -> Option<ListenerEntry> {
        let queue = self.queues.get_mut(event)?;
        let entry = queue.remove(0);
        if queue.is_empty() {
            self.queues.remove(event);
        }
        Some(entry)
    }

    /// Removes and returns the back entry, or `None` if the queue is absent/empty.
    pub(crate) fn take_back(&mut self, event: &str) -> Option<ListenerEntry> {
        let queue = self.queues.get_mut(event)?;
        let entry = queue.pop()?;
        if queue.is_empty() {
            self.queues.remove(event);
        }
        Some(entry)
    }

    /// Drops the entire queue for `event` (no-op if absent).
    pub(crate) fn remove(&mut self, event: &str) {
        self.queues.remove(event);
    }

    /// Returns a cloned snapshot of `event`'s queue (empty if absent).
    ///
    /// Cloning is cheap: entries are `Arc`-backed.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<ListenerEntry> {
        self.queues.get(event).cloned().unwrap_or_default()
    }

    /// Returns a clone of the front entry, or `None` if absent/empty.
    pub(crate) fn front(&self, event: &str) -> Option<ListenerEntry> {
        self.queues.get(event).and_then(|q| q.first()).cloned()
    }

    /// Returns a clone of the back entry, or `None` if absent/empty.
    pub(crate) fn back(&self, event: &str) -> Option<ListenerEntry> {
        self.queues.get(event).and_then(|q| q.last()).cloned()
    }

    /// Returns the queue length for `event`, 0 if absent.
    pub(crate) fn len(&self, event: &str) -> usize {
        self.queues.get(event).map_or(0, Vec::len)
    }

    /// Returns sorted list of event names with a present queue.
    pub(crate) fn names(&self) -> Vec<Arc<str>> {
        let mut names: Vec<Arc<str>> = self.queues.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
