//! # Listeners for the eventvisor mediator.
//!
//! This module provides the invocable capability trait, the stored and
//! registration-time listener shapes, and the deferred-listener provider
//! boundary.
//!
//! ## Architecture
//! ```text
//! Registration:                         Broadcast:
//!   closure ──► InvokeFn ──┐              queue snapshot
//!   Arc<dyn Invoke> ───────┼─► Listener     │
//!   "identifier" ──────────┤      │         ├─► ListenerEntry::Handler ──► Invoke::invoke
//!   vec![...] (group) ─────┘      ▼         └─► ListenerEntry::Deferred
//!                            ListenerEntry              │
//!                            (stored in queue)          ▼
//!                                              Instantiate::resolve(id)
//!                                                 (Catalog, custom, ...)
//! ```
//!
//! ## Listener shapes
//! - **Handler** — a directly invocable value (`Arc<dyn Invoke>`).
//! - **Deferred** — an identifier string, materialized on every broadcast via
//!   the injected [`Instantiate`] provider.
//! - **Group** — a sequence of the above; accepted by `push` (recursive
//!   fan-out), rejected by `unshift`.
//!
//! ## Implementing custom listeners
//! ```rust
//! use eventvisor::{HandlerError, Invoke};
//! use serde_json::Value;
//!
//! struct Metrics;
//!
//! impl Invoke for Metrics {
//!     fn invoke(&self, args: &[Value]) -> Result<Value, HandlerError> {
//!         // increment a counter keyed off args...
//!         let _ = args;
//!         Ok(Value::Null)
//!     }
//! }
//! ```

mod entry;
mod handler;
mod instantiate;

pub use entry::{Listener, ListenerEntry};
pub use handler::{Invoke, InvokeFn, ListenerRef};
pub use instantiate::{Catalog, Instantiate, NullInstantiator};

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::DeltaLog;
