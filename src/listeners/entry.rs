//! # Listener shapes: registration form and stored form.
//!
//! [`Listener`] is what callers hand to `push`/`unshift`: a direct handler, a
//! deferred identifier, or a group of either (arbitrarily nested).
//! [`ListenerEntry`] is what queues store: groups never reach a queue — `push`
//! flattens them in order, `unshift` rejects them.
//!
//! Conversions keep registration terse:
//! - `&str` / `String` / `Arc<str>` → [`Listener::Deferred`]
//! - [`ListenerRef`] → [`Listener::Handler`]
//! - `Vec<Listener>` → [`Listener::Group`]
//!
//! ## Example
//! ```rust
//! use eventvisor::Listener;
//! use serde_json::Value;
//!
//! // A deferred identifier, resolved by the Instantiate provider on broadcast:
//! let deferred: Listener = "audit.writer".into();
//!
//! // A direct closure handler:
//! let direct = Listener::handler(|_args| Ok(Value::Null));
//!
//! // A group, fanned out in order by push:
//! let group = Listener::from(vec![deferred, direct]);
//! assert!(matches!(group, Listener::Group(_)));
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::HandlerError;
use crate::listeners::handler::{InvokeFn, ListenerRef};

/// A listener as stored in an event queue.
///
/// Immutable once queued; replaced only by queue-mutation operations.
#[derive(Clone)]
pub enum ListenerEntry {
    /// A directly invocable listener.
    Handler(ListenerRef),
    /// An identifier to be materialized on broadcast via the `Instantiate` provider.
    Deferred(Arc<str>),
}

impl ListenerEntry {
    /// Returns the deferred identifier, or `None` for a direct handler.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            ListenerEntry::Handler(_) => None,
            ListenerEntry::Deferred(id) => Some(id),
        }
    }

    /// Returns `true` if this entry is a deferred identifier.
    #[inline]
    pub fn is_deferred(&self) -> bool {
        matches!(self, ListenerEntry::Deferred(_))
    }
}

impl fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerEntry::Handler(_) => f.write_str("Handler(..)"),
            ListenerEntry::Deferred(id) => f.debug_tuple("Deferred").field(id).finish(),
        }
    }
}

/// Entries compare by identity: deferred entries by identifier, handlers by
/// `Arc` pointer equality.
impl PartialEq for ListenerEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ListenerEntry::Deferred(a), ListenerEntry::Deferred(b)) => a == b,
            (ListenerEntry::Handler(a), ListenerEntry::Handler(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A listener as supplied to registration calls.
#[derive(Clone)]
pub enum Listener {
    /// A directly invocable listener.
    Handler(ListenerRef),
    /// An identifier string, resolved lazily on broadcast.
    Deferred(Arc<str>),
    /// A sequence of listeners; `push` fans these out recursively in order.
    Group(Vec<Listener>),
}

impl Listener {
    /// Wraps a closure as a direct handler listener.
    ///
    /// ## Example
    /// ```rust
    /// use eventvisor::Listener;
    /// use serde_json::Value;
    ///
    /// let l = Listener::handler(|args| Ok(Value::from(args.len())));
    /// ```
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        Listener::Handler(InvokeFn::arc(f))
    }

    /// Creates a deferred listener from an identifier.
    pub fn deferred(identifier: impl Into<Arc<str>>) -> Self {
        Listener::Deferred(identifier.into())
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Handler(_) => f.write_str("Handler(..)"),
            Listener::Deferred(id) => f.debug_tuple("Deferred").field(id).finish(),
            Listener::Group(items) => f.debug_tuple("Group").field(items).finish(),
        }
    }
}

impl From<&str> for Listener {
    fn from(identifier: &str) -> Self {
        Listener::Deferred(Arc::from(identifier))
    }
}

impl From<String> for Listener {
    fn from(identifier: String) -> Self {
        Listener::Deferred(Arc::from(identifier.as_str()))
    }
}

impl From<Arc<str>> for Listener {
    fn from(identifier: Arc<str>) -> Self {
        Listener::Deferred(identifier)
    }
}

impl From<ListenerRef> for Listener {
    fn from(handler: ListenerRef) -> Self {
        Listener::Handler(handler)
    }
}

impl From<Vec<Listener>> for Listener {
    fn from(items: Vec<Listener>) -> Self {
        Listener::Group(items)
    }
}
