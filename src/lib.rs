//! # eventvisor
//!
//! **Eventvisor** is a lightweight in-process event mediation library for Rust.
//!
//! It provides a single component — the [`Mediator`] — that attaches ordered
//! listener chains to named events, broadcasts events with arguments to those
//! chains, and tracks invocation statistics. The crate is designed as a
//! building block: application code registers listeners and triggers events;
//! the mediator owns nothing but the queues, counters and the delta record.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Listener   │   │  "ident.a"   │   │   Listener   │
//!     │  (closure)   │   │  (deferred)  │   │ (Invoke impl)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ push/unshift     ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Mediator                                                         │
//! │  - Registry (event name → ordered listener queue)                 │
//! │  - Counters (per-event notification / invocation counts)          │
//! │  - Delta slot (most recent queue mutation)                        │
//! └──────┬───────────────────────────────┬────────────────────────────┘
//!        │ notify(event, args)           │ every mutation
//!        ▼                               ▼
//!   queue snapshot,               notify("__mediator.delta",
//!   invoked in order               [event, op])  — depth-capped
//!        │
//!        ├─ ListenerEntry::Handler ──────────────► Invoke::invoke(args)
//!        └─ ListenerEntry::Deferred("ident.a") ─► Instantiate::resolve
//!                                                        │
//!                                                        ▼ (injected)
//!                                                 Catalog / custom provider
//! ```
//!
//! ### Broadcast semantics
//! ```text
//! notify(event, args):
//!   ├─► notification counter += 1
//!   ├─► snapshot queue (length N fixed for this broadcast)
//!   └─► for position 0..N:
//!         ├─► materialize entry (deferred → Instantiate::resolve)
//!         │     └─ failure → MediatorError::BadListener { event, position }
//!         ├─► invocation counter += 1
//!         ├─► result = listener.invoke(args)
//!         │     └─ Err → MediatorError::Handler { event, position }
//!         └─► result == Bool(false) → stop, no error
//!   returns number of listeners invoked (≤ N)
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                  |
//! |-------------------|-------------------------------------------------------------------|-------------------------------------|
//! | **Registration**  | Ordered queues per event name; append, prepend, drain, clear.     | [`Listener`], [`ListenerEntry`]     |
//! | **Broadcast**     | In-order invocation, strict-`false` short-circuit, snapshot view. | [`Mediator::notify`]                |
//! | **Deferred**      | Identifier strings materialized per broadcast via a provider.     | [`Instantiate`], [`Catalog`]        |
//! | **Deltas**        | Record of the latest mutation, re-broadcast on a reserved name.   | [`QueueDelta`], [`DELTA_EVENT`]     |
//! | **Statistics**    | Monotonic per-event notification and invocation counters.         | [`Mediator::count_notifications`]   |
//! | **Errors**        | Typed errors for registration, materialization and invocation.    | [`MediatorError`], [`HandlerError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`DeltaLog`] listener _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventvisor::{Catalog, Config, InvokeFn, Listener, Mediator};
//! use serde_json::{json, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A provider for deferred listeners (identifier → instance)
//!     let catalog = Catalog::new().with("audit.writer", || {
//!         Ok(InvokeFn::arc(|args| {
//!             println!("audit: {args:?}");
//!             Ok(Value::Null)
//!         }))
//!     });
//!
//!     let mediator = Mediator::builder(Config::default())
//!         .with_instantiator(Arc::new(catalog))
//!         .build();
//!
//!     // Direct closure listener plus a deferred one, invoked in order
//!     mediator.push("orders.created", Listener::handler(|_args| Ok(Value::Null)))?;
//!     mediator.push("orders.created", "audit.writer")?;
//!
//!     let invoked = mediator.notify("orders.created", &[json!({"id": 1})])?;
//!     assert_eq!(invoked, 2);
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod listeners;

// ---- Public re-exports ----

pub use crate::core::{Config, Mediator, MediatorBuilder};
pub use error::{HandlerError, InstantiateError, MediatorError};
pub use events::{QueueDelta, QueueOp, DELTA_EVENT};
pub use listeners::{
    Catalog, Instantiate, Invoke, InvokeFn, Listener, ListenerEntry, ListenerRef, NullInstantiator,
};

// Optional: expose a simple built-in delta logger listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::DeltaLog;
