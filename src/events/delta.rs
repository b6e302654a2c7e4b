//! # Queue delta record emitted on every queue mutation.
//!
//! [`QueueOp`] classifies the five queue-mutating operations; [`QueueDelta`]
//! pairs an operation with the event name whose queue it touched.
//!
//! The mediator keeps a single delta slot (the most recent mutation, readable
//! via `Mediator::last_queue_delta`) and re-broadcasts each delta on the
//! reserved [`DELTA_EVENT`] name through the ordinary `notify` path. A listener
//! attached to [`DELTA_EVENT`] therefore observes every queue mutation across
//! the mediator — including mutations of the delta queue itself, which is why
//! the mediator caps delta nesting depth (see `Config::delta_depth_limit`).
//!
//! ## Example
//! ```rust
//! use eventvisor::{QueueDelta, QueueOp};
//!
//! let delta = QueueDelta::new("orders.created", QueueOp::Push);
//! assert_eq!(delta.event(), "orders.created");
//! assert_eq!(delta.op, QueueOp::Push);
//! assert_eq!(delta.op.as_str(), "push");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Reserved event name on which the mediator broadcasts queue deltas.
///
/// The name is deliberately outside the plausible application namespace.
/// Listeners may be attached to it like to any other event.
pub const DELTA_EVENT: &str = "__mediator.delta";

/// Classification of queue-mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOp {
    /// Listener(s) appended to the back of a queue.
    Push,
    /// One listener prepended to the front of a queue.
    Unshift,
    /// Front entry removed (or removal attempted on an empty/absent queue).
    Shift,
    /// Back entry removed (or removal attempted on an empty/absent queue).
    Pop,
    /// Entire queue dropped.
    Clear,
}

impl QueueOp {
    /// Returns a short stable label (lowercase) for use in logs and delta payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueOp::Push => "push",
            QueueOp::Unshift => "unshift",
            QueueOp::Shift => "shift",
            QueueOp::Pop => "pop",
            QueueOp::Clear => "clear",
        }
    }
}

impl fmt::Display for QueueOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of the most recent queue mutation: `(event name, operation kind)`.
///
/// Overwritten on every mutation; read-only otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueDelta {
    /// Name of the event whose queue was mutated.
    pub event: Arc<str>,
    /// The kind of mutation that occurred.
    pub op: QueueOp,
}

impl QueueDelta {
    /// Creates a delta record for the given event name and operation.
    pub fn new(event: impl Into<Arc<str>>, op: QueueOp) -> Self {
        Self {
            event: event.into(),
            op,
        }
    }

    /// Returns the mutated event name as a string slice.
    #[inline]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the broadcast arguments for this delta: `[event, op]` as JSON strings.
    ///
    /// This is the exact payload listeners on [`DELTA_EVENT`] receive.
    pub fn to_args(&self) -> [Value; 2] {
        [
            Value::String(self.event.to_string()),
            Value::String(self.op.as_str().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_labels_are_stable() {
        assert_eq!(QueueOp::Push.as_str(), "push");
        assert_eq!(QueueOp::Unshift.as_str(), "unshift");
        assert_eq!(QueueOp::Shift.as_str(), "shift");
        assert_eq!(QueueOp::Pop.as_str(), "pop");
        assert_eq!(QueueOp::Clear.as_str(), "clear");
    }

    #[test]
    fn test_delta_args_payload() {
        let delta = QueueDelta::new("jobs", QueueOp::Pop);
        let [event, op] = delta.to_args();
        assert_eq!(event, Value::String("jobs".into()));
        assert_eq!(op, Value::String("pop".into()));
    }
}
