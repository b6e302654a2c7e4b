//! # Per-event broadcast and invocation counters.
//!
//! Two name-keyed monotonic counters, created lazily at first increment and
//! never reset for the lifetime of the mediator:
//!
//! - **notifications**: how many times `notify` was called for the name
//!   (incremented even when the queue is empty or absent);
//! - **invocations**: cumulative listener invocations across all broadcasts
//!   of the name.
//!
//! Reads for never-recorded names return 0.

use std::collections::HashMap;
use std::sync::Arc;

/// Per-event monotonic counters.
pub(crate) struct Counters {
    notifications: HashMap<Arc<str>, u64>,
    invocations: HashMap<Arc<str>, u64>,
}

impl Counters {
    /// Creates empty counter maps.
    pub(crate) fn new() -> Self {
        Self {
            notifications: HashMap::new(),
            invocations: HashMap::new(),
        }
    }

    /// Increments the broadcast counter for `event`.
    pub(crate) fn record_notification(&mut self, event: &str) {
        bump(&mut self.notifications, event);
    }

    /// Increments the cumulative invocation counter for `event`.
    pub(crate) fn record_invocation(&mut self, event: &str) {
        bump(&mut self.invocations, event);
    }

    /// Returns the broadcast count for `event`, 0 if never recorded.
    pub(crate) fn notifications(&self, event: &str) -> u64 {
        self.notifications.get(event).copied().unwrap_or(0)
    }

    /// Returns the cumulative invocation count for `event`, 0 if never recorded.
    pub(crate) fn invocations(&self, event: &str) -> u64 {
        self.invocations.get(event).copied().unwrap_or(0)
    }
}

fn bump(map: &mut HashMap<Arc<str>, u64>, event: &str) {
    if let Some(count) = map.get_mut(event) {
        *count += 1;
    } else {
        map.insert(Arc::from(event), 1);
    }
}
