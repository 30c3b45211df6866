// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::FlowError;

/// A single stream event: a value, a terminating error, or completion.
///
/// A subscription observes zero or more `Next` notifications followed by at
/// most one of `Error` or `Complete`; nothing is delivered after the
/// terminal. This enum is what buffering and inspecting operators work with.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    /// A successful value
    Next(T),
    /// An error that terminates the stream
    Error(FlowError),
    /// Normal end of the stream
    Complete,
}

impl<T: PartialEq> PartialEq for Notification<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Notification::Next(a), Notification::Next(b)) => a == b,
            (Notification::Complete, Notification::Complete) => true,
            // Errors compare by their rendered message, see `FlowError`
            (Notification::Error(a), Notification::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Notification<T> {}

impl<T> Notification<T> {
    /// Returns `true` if this is a `Next`.
    pub const fn is_next(&self) -> bool {
        matches!(self, Notification::Next(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }

    /// Returns `true` if this is a `Complete`.
    pub const fn is_complete(&self) -> bool {
        matches!(self, Notification::Complete)
    }

    /// Returns `true` if this notification terminates the subscription.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Notification::Error(_) | Notification::Complete)
    }

    /// Converts from `Notification<T>` to `Option<T>`, discarding terminals.
    pub fn ok(self) -> Option<T> {
        match self {
            Notification::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Converts from `Notification<T>` to `Option<FlowError>`, discarding values.
    pub fn err(self) -> Option<FlowError> {
        match self {
            Notification::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Maps a `Notification<T>` to `Notification<U>` by applying a function to
    /// the contained value.
    ///
    /// Terminals are propagated unchanged.
    pub fn map<U, F>(self, f: F) -> Notification<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Notification::Next(v) => Notification::Next(f(v)),
            Notification::Error(e) => Notification::Error(e),
            Notification::Complete => Notification::Complete,
        }
    }

    /// Returns the contained value, panicking on a terminal.
    ///
    /// # Panics
    ///
    /// Panics if the notification is `Error` or `Complete`.
    pub fn unwrap(self) -> T {
        match self {
            Notification::Next(v) => v,
            Notification::Error(e) => {
                panic!("called `Notification::unwrap()` on an `Error`: {:?}", e)
            }
            Notification::Complete => {
                panic!("called `Notification::unwrap()` on `Complete`")
            }
        }
    }
}

impl<T> From<Result<T, FlowError>> for Notification<T> {
    fn from(result: Result<T, FlowError>) -> Self {
        match result {
            Ok(v) => Notification::Next(v),
            Err(e) => Notification::Error(e),
        }
    }
}
