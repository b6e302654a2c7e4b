//! # Invocable capability and function-backed listener (`InvokeFn`)
//!
//! This module defines the [`Invoke`] trait (synchronous, fallible) and a
//! convenient function-backed implementation [`InvokeFn`]. The common handle
//! type is [`ListenerRef`], an `Arc<dyn Invoke>` suitable for sharing across
//! queues and broadcasts.
//!
//! Listeners receive the broadcast arguments as a `&[Value]` slice (empty when
//! the broadcast carries no arguments) and return a [`Value`]. Returning
//! exactly `Value::Bool(false)` stops the remainder of the broadcast without
//! error; any other value — including `0`, `""` and `null` — lets the chain
//! continue.

use std::sync::Arc;

use serde_json::Value;

use crate::error::HandlerError;

/// Shared handle to an invocable listener.
pub type ListenerRef = Arc<dyn Invoke>;

/// # Synchronous invocable unit.
///
/// The single-method capability every directly-registered listener must
/// satisfy, and the shape deferred identifiers must resolve to. Invocations
/// run on the broadcasting caller's thread; a slow listener blocks that
/// caller.
///
/// # Example
/// ```
/// use eventvisor::{HandlerError, Invoke};
/// use serde_json::Value;
///
/// struct Echo;
///
/// impl Invoke for Echo {
///     fn invoke(&self, args: &[Value]) -> Result<Value, HandlerError> {
///         Ok(args.first().cloned().unwrap_or(Value::Null))
///     }
/// }
/// ```
pub trait Invoke: Send + Sync + 'static {
    /// Handles one broadcast for this listener.
    ///
    /// # Parameters
    /// - `args`: positional broadcast arguments (empty slice for a zero-argument
    ///   broadcast)
    ///
    /// Returning `Err` aborts the remainder of the broadcast; returning
    /// `Ok(Value::Bool(false))` stops it without error.
    fn invoke(&self, args: &[Value]) -> Result<Value, HandlerError>;
}

impl std::fmt::Debug for dyn Invoke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Invoke")
    }
}

/// Function-backed listener implementation.
///
/// Wraps a closure `F: Fn(&[Value]) -> Result<Value, HandlerError>`. The
/// closure is shared between invocations; if it needs mutable state, hold it
/// behind an explicit `Arc<Mutex<...>>` inside the closure.
pub struct InvokeFn<F> {
    f: F,
}

impl<F> InvokeFn<F>
where
    F: Fn(&[Value]) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`InvokeFn::arc`] when you immediately need a [`ListenerRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the listener and returns it as a shared handle (`Arc<dyn Invoke>`).
    ///
    /// ## Example
    /// ```rust
    /// use eventvisor::{InvokeFn, ListenerRef};
    /// use serde_json::Value;
    ///
    /// let l: ListenerRef = InvokeFn::arc(|_args| Ok(Value::Null));
    /// assert_eq!(l.invoke(&[]).unwrap(), Value::Null);
    /// ```
    pub fn arc(f: F) -> ListenerRef {
        Arc::new(Self::new(f))
    }
}

impl<F> Invoke for InvokeFn<F>
where
    F: Fn(&[Value]) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    fn invoke(&self, args: &[Value]) -> Result<Value, HandlerError> {
        (self.f)(args)
    }
}
