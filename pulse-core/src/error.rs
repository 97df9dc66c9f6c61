// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the pulse reactive core.
//!
//! A single root enum, constructor functions for each variant, and a
//! `Result<T>` alias, narrowed to the error kinds this core's signal
//! protocol and operators actually raise.

use std::fmt;

/// Root error type for all pulse signal-protocol operations.
#[derive(Debug, thiserror::Error)]
pub enum PulseError {
    /// Invalid operator construction parameters (e.g. `buffer(0, 1, ..)`).
    #[error("illegal argument: {context}")]
    IllegalArgument {
        /// What was invalid.
        context: String,
    },

    /// A required value was null where the contract forbids it (e.g. a
    /// `buffer` factory producing no container).
    #[error("null argument: {context}")]
    NullArgument {
        /// What was missing.
        context: String,
    },

    /// `request(n)` was called with `n == 0`.
    #[error("illegal demand requested: {requested} (request(n) requires n >= 1)")]
    IllegalDemand {
        /// The illegal value that was requested.
        requested: u64,
    },

    /// An error forwarded verbatim from a source publisher.
    #[error("upstream error: {0}")]
    UpstreamError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An error raised by a user-supplied callback (`fN`/`fE`/`fC`/`factory`).
    ///
    /// User callbacks in this core are plain closures with no `Result`
    /// return channel, so the only way one can fail is by panicking; the
    /// panic payload is captured and rendered here as a message.
    #[error("operator error: {0}")]
    OperatorError(String),

    /// An error surfaced from a `flat_map_signal` inner publisher.
    #[error("inner publisher error: {0}")]
    InnerError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Multiple errors aggregated together (used by the base consumer
    /// adapter when more than one terminal pathway reports a failure).
    #[error("{count} errors occurred")]
    MultipleErrors {
        /// Number of errors aggregated.
        count: usize,
        /// The individual errors.
        errors: Vec<PulseError>,
    },
}

impl PulseError {
    /// Construct an [`PulseError::IllegalArgument`].
    pub fn illegal_argument(context: impl Into<String>) -> Self {
        Self::IllegalArgument {
            context: context.into(),
        }
    }

    /// Construct a [`PulseError::NullArgument`].
    pub fn null_argument(context: impl Into<String>) -> Self {
        Self::NullArgument {
            context: context.into(),
        }
    }

    /// Construct an [`PulseError::IllegalDemand`].
    pub const fn illegal_demand(requested: u64) -> Self {
        Self::IllegalDemand { requested }
    }

    /// Wrap a source's underlying error as [`PulseError::UpstreamError`].
    pub fn upstream(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UpstreamError(Box::new(error))
    }

    /// Wrap a panic payload captured from a user callback.
    pub fn operator_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "operator callback panicked with a non-string payload".to_string()
        };
        Self::OperatorError(message)
    }

    /// Wrap an inner publisher's error as [`PulseError::InnerError`].
    pub fn inner(error: PulseError) -> Self {
        Self::InnerError(Box::new(error))
    }

    /// Aggregate multiple errors into [`PulseError::MultipleErrors`].
    pub fn aggregate(errors: Vec<PulseError>) -> Self {
        Self::MultipleErrors {
            count: errors.len(),
            errors,
        }
    }
}

/// A minimal `std::error::Error` wrapper for a plain message, used at
/// source boundaries that need to hand `PulseError::upstream` a concrete
/// error type without pulling in `anyhow`.
#[derive(Debug)]
pub struct Message(pub String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Message {}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

/// Specialized `Result` alias for pulse operations.
pub type Result<T> = std::result::Result<T, PulseError>;
