// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rxflow reactive runtime.
//!
//! This module provides the error handling system for all rxflow operations.
//! It defines a root [`FlowError`] type with specific variants for different
//! failure modes, allowing library users to handle errors appropriately.
//!
//! # Examples
//!
//! ```
//! use rxflow_core::{FlowError, Result};
//!
//! fn process_data() -> Result<()> {
//!     // Operation that might fail
//!     Err(FlowError::stream_error("Stream not ready"))
//! }
//! ```

/// Root error type for all rxflow operations
///
/// This enum encompasses all possible error conditions that can travel
/// through a stream as an `Error` notification.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Stream processing encountered an error
    ///
    /// This is a general error for stream operations that don't fit
    /// other specific categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// This wraps errors produced by user-provided functions and callbacks,
    /// allowing them to be propagated through the rxflow error system.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A producer panicked while emitting
    ///
    /// Panics inside an on-subscribe thunk or a producer thread are
    /// intercepted and surfaced through this variant instead of unwinding
    /// into the subscriber.
    #[error("Producer panicked: {context}")]
    ProducerPanic {
        /// The payload of the intercepted panic, rendered as text
        context: String,
    },
}

impl FlowError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Create an error describing an intercepted producer panic
    pub fn producer_panic(context: impl Into<String>) -> Self {
        Self::ProducerPanic {
            context: context.into(),
        }
    }

    /// Check if this error indicates a permanent failure
    ///
    /// User errors and stream processing errors are considered permanent.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::StreamProcessingError { .. } | Self::UserError(_)
        )
    }
}

/// Specialized Result type for rxflow operations
///
/// This is a type alias for `std::result::Result<T, FlowError>`, providing
/// a convenient shorthand for functions that return rxflow errors.
///
/// # Examples
///
/// ```
/// use rxflow_core::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FlowError>;

/// Helper trait for adding context to `Result`s
///
/// This allows chaining context information onto errors in a fluent style.
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(FlowError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(FlowError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FlowError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let context = context.into();
            match e.into() {
                FlowError::UserError(inner) => FlowError::StreamProcessingError {
                    context: format!("{context}: {inner}"),
                },
                other => other,
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let context = f();
            match e.into() {
                FlowError::UserError(inner) => FlowError::StreamProcessingError {
                    context: format!("{context}: {inner}"),
                },
                other => other,
            }
        })
    }
}

/// Errors compare by their rendered message. Payload types are erased in
/// transit (boxed sources, stringified panics), so the message is the only
/// stable identity an error carries through a stream.
impl PartialEq for FlowError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for FlowError {}

impl Clone for FlowError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // For UserError, we can't clone the boxed error, so convert to string
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {}", e),
            },
            Self::ProducerPanic { context } => Self::ProducerPanic {
                context: context.clone(),
            },
        }
    }
}
