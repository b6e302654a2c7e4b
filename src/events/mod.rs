//! Queue mutation events: the delta record and the internal delta broadcast.
//!
//! This module groups the data model for **queue deltas** — the record of the
//! most recent queue-mutating operation kept by the mediator, and the payload
//! of the internal [`DELTA_EVENT`] broadcast fired after every mutation.
//!
//! ## Contents
//! - [`QueueOp`] classification of queue mutations (push/unshift/shift/pop/clear)
//! - [`QueueDelta`] the `(event, operation)` pair of the most recent mutation
//! - [`DELTA_EVENT`] the reserved event name the mediator broadcasts deltas on
//!
//! See `core/mediator.rs` for how deltas are recorded and re-broadcast.

mod delta;

pub use delta::{QueueDelta, QueueOp, DELTA_EVENT};
