//! Error types used by the eventvisor mediator and its listeners.
//!
//! This module defines three error enums:
//!
//! - [`MediatorError`] — errors raised by registration and broadcast operations.
//! - [`InstantiateError`] — errors raised by an [`Instantiate`](crate::Instantiate)
//!   provider while materializing a deferred listener.
//! - [`HandlerError`] — errors raised by listener invocations themselves.
//!
//! All types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! Errors are never swallowed by the mediator: `push`/`unshift`/`notify` propagate
//! them synchronously to the caller.

use thiserror::Error;

/// # Errors produced by mediator operations.
///
/// These represent failures of registration (`push`, `unshift`, `push_all_json`)
/// and broadcast (`notify`). Read accessors never produce them; absent event
/// names degrade to zero/empty/`None` values instead.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum MediatorError {
    /// A bulk registration payload was not an object mapping event names to listeners.
    #[error("bulk registration expects an object mapping, got {found}")]
    InvalidInput {
        /// Short description of the value that was actually supplied.
        found: String,
    },

    /// A listener had a shape the operation does not accept.
    #[error("invalid listener for event {event:?}: {detail}")]
    InvalidListener {
        /// Event name the listener was being attached to.
        event: String,
        /// What was wrong with the listener shape.
        detail: String,
    },

    /// A queued identifier could not be materialized into an invocable listener.
    ///
    /// Carries the event name and queue position so a failing broadcast can be
    /// traced back to the exact registration.
    #[error("listener at position {position} for event {event:?} could not be materialized")]
    BadListener {
        /// Event name being broadcast.
        event: String,
        /// Zero-based position of the failing entry in the queue snapshot.
        position: usize,
        /// The provider failure that caused materialization to fail.
        #[source]
        source: InstantiateError,
    },

    /// A listener invocation failed during broadcast.
    ///
    /// The broadcast is aborted at this position; invocation counters already
    /// incremented for earlier listeners remain incremented.
    #[error("listener at position {position} for event {event:?} failed")]
    Handler {
        /// Event name being broadcast.
        event: String,
        /// Zero-based position of the failing entry in the queue snapshot.
        position: usize,
        /// The listener-side failure.
        #[source]
        source: HandlerError,
    },
}

impl MediatorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::MediatorError;
    ///
    /// let err = MediatorError::InvalidInput { found: "array".into() };
    /// assert_eq!(err.as_label(), "invalid_input");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            MediatorError::InvalidInput { .. } => "invalid_input",
            MediatorError::InvalidListener { .. } => "invalid_listener",
            MediatorError::BadListener { .. } => "bad_listener",
            MediatorError::Handler { .. } => "handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            MediatorError::InvalidInput { found } => {
                format!("expected object mapping, got {found}")
            }
            MediatorError::InvalidListener { event, detail } => {
                format!("event={event} detail={detail}")
            }
            MediatorError::BadListener {
                event,
                position,
                source,
            } => {
                format!("event={event} position={position} cause={source}")
            }
            MediatorError::Handler {
                event,
                position,
                source,
            } => {
                format!("event={event} position={position} cause={source}")
            }
        }
    }
}

/// # Errors produced by deferred-listener providers.
///
/// Returned by [`Instantiate::resolve`](crate::Instantiate::resolve) when an
/// identifier cannot be turned into an invocable instance. The mediator wraps
/// these into [`MediatorError::BadListener`] together with the event name and
/// queue position.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InstantiateError {
    /// The identifier is not known to the provider.
    #[error("unknown listener identifier {identifier:?}")]
    Unknown {
        /// The unresolved identifier.
        identifier: String,
    },

    /// The identifier is known but constructing the instance failed.
    #[error("constructing {identifier:?} failed: {error}")]
    Construction {
        /// The identifier whose construction failed.
        identifier: String,
        /// The underlying construction error message.
        error: String,
    },
}

impl InstantiateError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            InstantiateError::Unknown { .. } => "instantiate_unknown",
            InstantiateError::Construction { .. } => "instantiate_construction",
        }
    }
}

/// # Errors produced by listener execution.
///
/// A listener returning `Err(HandlerError)` aborts the remainder of the
/// broadcast; the mediator propagates it as [`MediatorError::Handler`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Listener execution failed.
    #[error("listener execution failed: {error}")]
    Failure {
        /// The underlying error message.
        error: String,
    },
}

impl HandlerError {
    /// Creates a [`HandlerError::Failure`] from any displayable error.
    ///
    /// # Example
    /// ```
    /// use eventvisor::HandlerError;
    ///
    /// let err = HandlerError::failure("boom");
    /// assert_eq!(err.as_label(), "handler_failure");
    /// ```
    pub fn failure(error: impl std::fmt::Display) -> Self {
        HandlerError::Failure {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Failure { .. } => "handler_failure",
        }
    }
}
