//! # Simple delta-logging listener for debugging and demos.
//!
//! [`DeltaLog`] is meant to be attached to [`DELTA_EVENT`](crate::DELTA_EVENT);
//! it writes every queue mutation it observes through the `log` facade.
//!
//! ## Output format
//! ```text
//! [delta] event=orders.created op=push
//! [delta] event=orders.created op=clear
//! ```
//!
//! ## Example
//! ```no_run
//! use eventvisor::{DeltaLog, Listener, Mediator, DELTA_EVENT};
//! use std::sync::Arc;
//!
//! let mediator = Mediator::new();
//! mediator
//!     .push(DELTA_EVENT, Listener::Handler(Arc::new(DeltaLog)))
//!     .unwrap();
//! // every subsequent mutation is logged at info level
//! ```

use serde_json::Value;

use crate::error::HandlerError;
use crate::listeners::handler::Invoke;

/// Delta-logging listener.
///
/// Enabled via the `logging` feature. Logs human-readable delta descriptions
/// at info level for debugging and demonstration purposes.
///
/// Not intended for production use — implement a custom [`Invoke`] listener
/// for structured logging or metrics collection.
pub struct DeltaLog;

impl Invoke for DeltaLog {
    fn invoke(&self, args: &[Value]) -> Result<Value, HandlerError> {
        match args {
            [Value::String(event), Value::String(op)] => {
                log::info!("[delta] event={event} op={op}");
            }
            other => {
                log::info!("[delta] args={other:?}");
            }
        }
        Ok(Value::Null)
    }
}
