//! Mediator core: queue storage, counters and broadcast orchestration.
//!
//! This module contains the embedded implementation of the eventvisor
//! mediator. The public API from this module is [`Mediator`] (registration,
//! broadcast and read accessors), [`MediatorBuilder`] and [`Config`].
//!
//! Internal modules:
//! - [`registry`]: name-keyed ordered listener queues;
//! - [`counters`]: per-event notification/invocation counters;
//! - [`mediator`]: orchestrates mutations, delta broadcasts and `notify`;
//! - [`config`]: mediator settings;
//! - [`builder`]: wires the provider and configuration together.

mod builder;
mod config;
mod counters;
mod mediator;
mod registry;

pub use builder::MediatorBuilder;
pub use config::Config;
pub use mediator::Mediator;
