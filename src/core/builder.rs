use std::sync::Arc;

use crate::core::Config;
use crate::listeners::{Instantiate, NullInstantiator};

use super::mediator::Mediator;

/// Builder for constructing a [`Mediator`] with an optional provider.
pub struct MediatorBuilder {
    cfg: Config,
    instantiator: Option<Arc<dyn Instantiate>>,
}

impl MediatorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            instantiator: None,
        }
    }

    /// Sets the provider used to materialize deferred listeners.
    ///
    /// Without a provider, deferred identifiers fail every broadcast with
    /// `MediatorError::BadListener` (the default is [`NullInstantiator`]).
    pub fn with_instantiator(mut self, instantiator: Arc<dyn Instantiate>) -> Self {
        self.instantiator = Some(instantiator);
        self
    }

    /// Builds and returns the mediator instance.
    pub fn build(self) -> Mediator {
        let instantiator = self
            .instantiator
            .unwrap_or_else(|| Arc::new(NullInstantiator));
        Mediator::new_internal(self.cfg, instantiator)
    }
}
