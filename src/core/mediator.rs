//! # Event mediator - registration, broadcast and statistics.
//!
//! [`Mediator`] owns the listener [`Registry`], the per-event [`Counters`]
//! and the delta slot, and orchestrates every operation against them.
//!
//! ## Architecture
//! ```text
//! push / unshift / shift / pop / clear
//!         │
//!         ├─► Registry (ordered queues, name-keyed)
//!         ├─► delta slot ◄── last_queue_delta()
//!         └─► notify(DELTA_EVENT, [event, op])   (depth-capped)
//!
//! notify(event, args)
//!         ├─► Counters.record_notification(event)
//!         ├─► snapshot = Registry.snapshot(event)      (lock released here)
//!         └─► for position in 0..snapshot.len():
//!               ├─ Deferred(id) → Instantiate.resolve(id)  (BadListener on failure)
//!               ├─ Counters.record_invocation(event)
//!               ├─ Invoke.invoke(args)                     (Handler error propagates)
//!               └─ stop without error on Value::Bool(false)
//! ```
//!
//! ## Rules
//! - All state lives behind one `parking_lot::Mutex`; the lock is **never**
//!   held while a listener or provider runs, so listeners may re-enter the
//!   mediator (including `notify`) without deadlocking.
//! - `notify` iterates a snapshot taken at broadcast start: listeners pushed
//!   during the broadcast are not visited this round, and removals cannot
//!   skew positions mid-iteration.
//! - Mutations performed by `__mediator.delta` listeners fire further delta
//!   broadcasts up to `Config::delta_depth_limit` nesting levels; beyond
//!   that the re-broadcast is skipped (the delta slot is still updated).

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::core::counters::Counters;
use crate::core::registry::Registry;
use crate::core::{Config, MediatorBuilder};
use crate::error::MediatorError;
use crate::events::{QueueDelta, QueueOp, DELTA_EVENT};
use crate::listeners::{Instantiate, Listener, ListenerEntry};

/// Mutable mediator state, guarded by a single mutex.
struct Inner {
    registry: Registry,
    counters: Counters,
    last_delta: Option<QueueDelta>,
    /// In-flight `__mediator.delta` broadcasts (see `Config::delta_depth_limit`).
    delta_depth: usize,
}

/// In-process publish/subscribe event mediator.
///
/// Attaches ordered listener chains to named events, broadcasts events with
/// arguments to those chains, and tracks invocation statistics. All methods
/// take `&self`; wrap the mediator in an `Arc` to share it.
///
/// Broadcast and registration are synchronous in-process calls: a hung
/// listener blocks the broadcasting caller. Timeout/cancellation wrappers,
/// if needed, belong to the caller.
///
/// ## Example
/// ```rust
/// use eventvisor::{Listener, Mediator};
/// use serde_json::{json, Value};
///
/// let mediator = Mediator::new();
///
/// mediator
///     .push("orders.created", Listener::handler(|args| {
///         println!("order: {:?}", args);
///         Ok(Value::Null)
///     }))
///     .unwrap();
///
/// let invoked = mediator.notify("orders.created", &[json!({"id": 42})]).unwrap();
/// assert_eq!(invoked, 1);
/// assert_eq!(mediator.count_notifications("orders.created"), 1);
/// ```
pub struct Mediator {
    inner: Mutex<Inner>,
    instantiator: Arc<dyn Instantiate>,
    cfg: Config,
}

impl Mediator {
    /// Creates a mediator with default configuration and no provider.
    ///
    /// Deferred identifiers will fail to materialize until a provider is
    /// supplied via [`Mediator::builder`].
    pub fn new() -> Self {
        MediatorBuilder::new(Config::default()).build()
    }

    /// Returns a builder with the given configuration.
    pub fn builder(cfg: Config) -> MediatorBuilder {
        MediatorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: Config, instantiator: Arc<dyn Instantiate>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                registry: Registry::new(),
                counters: Counters::new(),
                last_delta: None,
                delta_depth: 0,
            }),
            instantiator,
            cfg,
        }
    }

    // ---------------------------
    // Registration
    // ---------------------------

    /// Appends a listener to the back of `event`'s queue.
    ///
    /// Accepts a direct handler, a deferred identifier, or a
    /// [`Listener::Group`] whose members are pushed individually in order
    /// (recursively, no nesting limit). Returns the new queue length.
    ///
    /// Records a `(event, push)` delta and fires [`DELTA_EVENT`]; a failure
    /// inside that delta broadcast propagates to this caller.
    pub fn push(
        &self,
        event: impl Into<Arc<str>>,
        listener: impl Into<Listener>,
    ) -> Result<usize, MediatorError> {
        let event: Arc<str> = event.into();
        let len = self.push_expanded(&event, listener.into());
        self.record_delta(&event, QueueOp::Push)?;
        Ok(len)
    }

    /// Invokes [`Mediator::push`] for each `(event, listener)` pair.
    ///
    /// Stops at the first failing push.
    pub fn push_all<E, L>(&self, pairs: impl IntoIterator<Item = (E, L)>) -> Result<(), MediatorError>
    where
        E: Into<Arc<str>>,
        L: Into<Listener>,
    {
        for (event, listener) in pairs {
            self.push(event, listener)?;
        }
        Ok(())
    }

    /// Registers listeners from a JSON object mapping.
    ///
    /// Each member value must be an identifier string or an (arbitrarily
    /// nested) array of identifier strings; members are pushed in the
    /// mapping's iteration order with array elements fanned out individually.
    ///
    /// # Errors
    /// - [`MediatorError::InvalidInput`] if `mapping` is not a JSON object;
    /// - [`MediatorError::InvalidListener`] if a member value is neither a
    ///   string nor an array of such values.
    ///
    /// ## Example
    /// ```rust
    /// use eventvisor::Mediator;
    /// use serde_json::json;
    ///
    /// let mediator = Mediator::new();
    /// mediator
    ///     .push_all_json(&json!({
    ///         "orders.created": "audit.writer",
    ///         "orders.deleted": ["audit.writer", "cache.evict"],
    ///     }))
    ///     .unwrap();
    ///
    /// assert_eq!(mediator.count("orders.deleted"), 2);
    /// ```
    pub fn push_all_json(&self, mapping: &Value) -> Result<(), MediatorError> {
        let object = mapping.as_object().ok_or_else(|| MediatorError::InvalidInput {
            found: json_kind(mapping).to_string(),
        })?;
        for (event, value) in object {
            let listener = json_listener(event, value)?;
            self.push(event.as_str(), listener)?;
        }
        Ok(())
    }

    /// Prepends one listener to the front of `event`'s queue, creating the
    /// queue if absent. Returns the new queue length.
    ///
    /// Unlike [`Mediator::push`], groups are not expanded here: a group at
    /// the front has no single well-defined position, so
    /// [`MediatorError::InvalidListener`] is returned instead.
    ///
    /// Records a `(event, unshift)` delta and fires [`DELTA_EVENT`].
    pub fn unshift(
        &self,
        event: impl Into<Arc<str>>,
        listener: impl Into<Listener>,
    ) -> Result<usize, MediatorError> {
        let event: Arc<str> = event.into();
        let entry = match listener.into() {
            Listener::Handler(handler) => ListenerEntry::Handler(handler),
            Listener::Deferred(id) => ListenerEntry::Deferred(id),
            Listener::Group(_) => {
                return Err(MediatorError::InvalidListener {
                    event: event.to_string(),
                    detail: "unshift takes a single listener, not a group".to_string(),
                })
            }
        };
        let len = self.inner.lock().registry.prepend(&event, entry);
        self.record_delta(&event, QueueOp::Unshift)?;
        Ok(len)
    }

    /// Removes and returns the front entry of `event`'s queue, or `None` if
    /// the queue is absent or empty (state is left unchanged).
    ///
    /// Records a `(event, shift)` delta regardless of outcome.
    pub fn shift(&self, event: &str) -> Option<ListenerEntry> {
        let taken = self.inner.lock().registry.take_front(event);
        self.record_delta_logged(event, QueueOp::Shift);
        taken
    }

    /// Removes and returns the back entry of `event`'s queue, or `None` if
    /// the queue is absent or empty (state is left unchanged).
    ///
    /// Records a `(event, pop)` delta regardless of outcome.
    pub fn pop(&self, event: &str) -> Option<ListenerEntry> {
        let taken = self.inner.lock().registry.take_back(event);
        self.record_delta_logged(event, QueueOp::Pop);
        taken
    }

    /// Removes the entire queue for `event`.
    ///
    /// Afterwards `count(event)` is 0 and the name is indistinguishable from
    /// one that was never registered. Records a `(event, clear)` delta.
    pub fn clear(&self, event: &str) {
        self.inner.lock().registry.remove(event);
        self.record_delta_logged(event, QueueOp::Clear);
    }

    // ---------------------------
    // Broadcast
    // ---------------------------

    /// Broadcasts `event` with `args` to its queued listeners, in order.
    ///
    /// The broadcast counter for `event` is incremented first (even when the
    /// queue is empty), then a snapshot of the queue is taken and iterated by
    /// position: each entry is resolved to an invocable (deferred identifiers
    /// through the provider), the per-event invocation counter is
    /// incremented, and the listener is invoked with `args`.
    ///
    /// The chain stops early — without error — when an invocation returns
    /// exactly `Value::Bool(false)`; falsy-but-not-false values (`0`, `""`,
    /// `null`) do not stop it. Returns the number of listeners actually
    /// invoked this broadcast.
    ///
    /// Because a snapshot is iterated, listeners registered during the
    /// broadcast are not visited this round, and listeners removed during it
    /// are still visited.
    ///
    /// # Errors
    /// - [`MediatorError::BadListener`] if a deferred entry fails to
    ///   materialize (the invocation counter is not incremented for that
    ///   position);
    /// - [`MediatorError::Handler`] if a listener invocation fails.
    ///
    /// Either error aborts the remainder of the broadcast; counters already
    /// incremented stay incremented.
    pub fn notify(&self, event: &str, args: &[Value]) -> Result<usize, MediatorError> {
        let snapshot = {
            let mut inner = self.inner.lock();
            inner.counters.record_notification(event);
            inner.registry.snapshot(event)
        };

        let mut invoked = 0usize;
        for (position, entry) in snapshot.into_iter().enumerate() {
            let handler = match entry {
                ListenerEntry::Handler(handler) => handler,
                ListenerEntry::Deferred(id) => self.instantiator.resolve(&id).map_err(|source| {
                    MediatorError::BadListener {
                        event: event.to_string(),
                        position,
                        source,
                    }
                })?,
            };

            self.inner.lock().counters.record_invocation(event);

            let value = handler
                .invoke(args)
                .map_err(|source| MediatorError::Handler {
                    event: event.to_string(),
                    position,
                    source,
                })?;
            invoked += 1;

            if value == Value::Bool(false) {
                break;
            }
        }
        Ok(invoked)
    }

    // ---------------------------
    // Read accessors (no mutation, no delta)
    // ---------------------------

    /// Returns a full ordered snapshot of `event`'s queue (empty if absent).
    pub fn all(&self, event: &str) -> Vec<ListenerEntry> {
        self.inner.lock().registry.snapshot(event)
    }

    /// Returns the front entry of `event`'s queue, or `None` if absent/empty.
    pub fn first(&self, event: &str) -> Option<ListenerEntry> {
        self.inner.lock().registry.front(event)
    }

    /// Returns the final entry of `event`'s queue, or `None` if absent/empty.
    pub fn last(&self, event: &str) -> Option<ListenerEntry> {
        self.inner.lock().registry.back(event)
    }

    /// Returns sorted list of event names with a present queue.
    pub fn keys(&self) -> Vec<Arc<str>> {
        self.inner.lock().registry.names()
    }

    /// Returns the queue length for `event`, 0 if absent.
    pub fn count(&self, event: &str) -> usize {
        self.inner.lock().registry.len(event)
    }

    /// Returns the cumulative listener-invocation count for `event`.
    pub fn count_invocations(&self, event: &str) -> u64 {
        self.inner.lock().counters.invocations(event)
    }

    /// Returns the broadcast count for `event`.
    pub fn count_notifications(&self, event: &str) -> u64 {
        self.inner.lock().counters.notifications(event)
    }

    /// Returns the `(event, operation)` pair of the most recent queue
    /// mutation, or `None` if no mutation has occurred yet.
    pub fn last_queue_delta(&self) -> Option<QueueDelta> {
        self.inner.lock().last_delta.clone()
    }

    // ---------------------------
    // Internals
    // ---------------------------

    /// Recursively appends `listener`, flattening groups in order.
    ///
    /// Returns the queue length after the last append (the current length
    /// for an empty group).
    fn push_expanded(&self, event: &Arc<str>, listener: Listener) -> usize {
        match listener {
            Listener::Handler(handler) => self
                .inner
                .lock()
                .registry
                .append(event, ListenerEntry::Handler(handler)),
            Listener::Deferred(id) => self
                .inner
                .lock()
                .registry
                .append(event, ListenerEntry::Deferred(id)),
            Listener::Group(items) => {
                let mut len = self.inner.lock().registry.len(event);
                for item in items {
                    len = self.push_expanded(event, item);
                }
                len
            }
        }
    }

    /// Updates the delta slot and fires the [`DELTA_EVENT`] broadcast.
    ///
    /// The slot is always updated. The broadcast is skipped once the
    /// in-flight delta count reaches the configured depth limit; otherwise a
    /// failure in the broadcast is returned to the mutating caller.
    fn record_delta(&self, event: &Arc<str>, op: QueueOp) -> Result<(), MediatorError> {
        let delta = QueueDelta::new(event.clone(), op);
        let fire = {
            let mut inner = self.inner.lock();
            inner.last_delta = Some(delta.clone());
            if inner.delta_depth >= self.cfg.delta_depth_clamped() {
                log::trace!(
                    "delta depth limit reached; skipping {DELTA_EVENT} broadcast for event={event} op={op}"
                );
                false
            } else {
                inner.delta_depth += 1;
                true
            }
        };
        if !fire {
            return Ok(());
        }

        let result = self.notify(DELTA_EVENT, &delta.to_args());
        self.inner.lock().delta_depth -= 1;
        result.map(|_| ())
    }

    /// Delta recording for operations with sentinel-based signatures
    /// (`shift`/`pop`/`clear`): a failing delta broadcast is logged, not
    /// propagated.
    fn record_delta_logged(&self, event: &str, op: QueueOp) {
        if let Err(err) = self.record_delta(&Arc::from(event), op) {
            log::warn!("{DELTA_EVENT} broadcast failed after {op} on {event:?}: {err}");
        }
    }
}

impl Default for Mediator {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a JSON member value into a registration-form listener.
///
/// Strings become deferred identifiers; arrays become groups (recursively).
fn json_listener(event: &str, value: &Value) -> Result<Listener, MediatorError> {
    match value {
        Value::String(id) => Ok(Listener::Deferred(Arc::from(id.as_str()))),
        Value::Array(items) => items
            .iter()
            .map(|item| json_listener(event, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Listener::Group),
        other => Err(MediatorError::InvalidListener {
            event: event.to_string(),
            detail: format!(
                "expected identifier string or array of identifiers, got {}",
                json_kind(other)
            ),
        }),
    }
}

/// Short type name of a JSON value, for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
