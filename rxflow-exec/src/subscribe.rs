// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Callback subscription helpers.
//!
//! These helpers exist so application code never accidentally discards a
//! stream failure: a subscription made without an error callback routes
//! errors to the process logger instead of dropping them.

use crate::logging::error;
use rxflow_core::{observer, FlowError, Observable, Subscription};

/// Subscribes `next` to every value of `source`.
///
/// Errors reaching this subscription are logged — never silently lost.
/// Use [`subscribe_all`] when the caller can handle failures itself.
pub fn subscribe_next<T: Send + 'static>(
    source: &Observable<T>,
    next: impl FnMut(T) + Send + 'static,
) -> Subscription {
    source.subscribe(observer::from_fns(
        next,
        |e| error!("unhandled stream error: {}", e),
        || {},
    ))
}

/// Subscribes the full callback trio to `source`.
pub fn subscribe_all<T: Send + 'static>(
    source: &Observable<T>,
    next: impl FnMut(T) + Send + 'static,
    on_error: impl FnMut(FlowError) + Send + 'static,
    complete: impl FnMut() + Send + 'static,
) -> Subscription {
    source.subscribe(observer::from_fns(next, on_error, complete))
}
