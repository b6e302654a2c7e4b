//! # Deferred-listener provider boundary.
//!
//! [`Instantiate`] is the single injected capability the mediator depends on:
//! it turns an identifier string into an invocable instance. Deferred entries
//! are materialized through it on **every** broadcast — once per queue
//! position per broadcast, never cached — so a provider is free to return a
//! fresh instance or a shared one.
//!
//! Two stock implementations ship with the crate:
//! - [`Catalog`] — an explicit name → factory map, for applications and tests;
//! - [`NullInstantiator`] — fails every resolution; the default when a
//!   mediator is built without a provider.
//!
//! ## Example
//! ```rust
//! use eventvisor::{Catalog, Instantiate, InvokeFn};
//! use serde_json::Value;
//!
//! let catalog = Catalog::new()
//!     .with("audit.writer", || Ok(InvokeFn::arc(|_args| Ok(Value::Null))));
//!
//! assert!(catalog.resolve("audit.writer").is_ok());
//! assert!(catalog.resolve("nope").is_err());
//! ```

use std::collections::HashMap;

use crate::error::InstantiateError;
use crate::listeners::handler::ListenerRef;

/// # Provider that constructs invocable listeners from identifiers.
///
/// Implementations decide what an identifier means — a registry key, a type
/// name, a plugin id. Resolution failures (unknown identifier, missing
/// dependencies, construction-time error) are reported as
/// [`InstantiateError`]; the mediator surfaces them to the broadcasting
/// caller as `MediatorError::BadListener` with the event name and queue
/// position attached.
pub trait Instantiate: Send + Sync + 'static {
    /// Resolves `identifier` into an invocable listener instance.
    fn resolve(&self, identifier: &str) -> Result<ListenerRef, InstantiateError>;
}

/// Factory closure stored by [`Catalog`].
type Factory = Box<dyn Fn() -> Result<ListenerRef, InstantiateError> + Send + Sync>;

/// Explicit name → factory provider.
///
/// Each registered factory is called once per resolution, so deferred
/// listeners get a fresh instance per queue position per broadcast. A factory
/// may of course capture and return a shared `Arc` instead.
#[derive(Default)]
pub struct Catalog {
    factories: HashMap<String, Factory>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under `identifier`, replacing any previous one.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<ListenerRef, InstantiateError> + Send + Sync + 'static,
    {
        self.factories.insert(identifier.into(), Box::new(factory));
    }

    /// Chaining form of [`Catalog::register`].
    pub fn with<F>(mut self, identifier: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<ListenerRef, InstantiateError> + Send + Sync + 'static,
    {
        self.register(identifier, factory);
        self
    }

    /// Returns the number of registered identifiers.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no identifiers are registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Instantiate for Catalog {
    fn resolve(&self, identifier: &str) -> Result<ListenerRef, InstantiateError> {
        match self.factories.get(identifier) {
            Some(factory) => factory(),
            None => Err(InstantiateError::Unknown {
                identifier: identifier.to_string(),
            }),
        }
    }
}

/// Provider that resolves nothing.
///
/// Used as the default when a mediator is built without
/// `MediatorBuilder::with_instantiator`; any deferred listener then fails
/// its broadcast with `MediatorError::BadListener`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInstantiator;

impl Instantiate for NullInstantiator {
    fn resolve(&self, identifier: &str) -> Result<ListenerRef, InstantiateError> {
        Err(InstantiateError::Unknown {
            identifier: identifier.to_string(),
        })
    }
}
