// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Blocking materialisation of a stream.

use parking_lot::Mutex;
use rxflow_core::{observer, Context, FlowError, Notification, Observable};
use std::sync::Arc;
use std::time::Duration;

// Poll interval used only when an externally cancellable context has to be
// watched alongside the subscription.
const CANCEL_POLL: Duration = Duration::from_millis(10);

/// Subscribes to `source`, drains every value into an ordered vector and
/// blocks the calling thread until the stream terminates.
///
/// Returns `(values, None)` on completion and `(values, Some(error))` on
/// failure — the error is never lost. Works for synchronous and
/// asynchronous producers alike: the wait parks on the subscription's
/// cancellation token, which fires when the terminal closes the
/// subscription.
///
/// # Example
///
/// ```
/// use rxflow_core::Observable;
/// use rxflow_exec::collect;
///
/// let (values, error) = collect(&Observable::just(vec![1, 2, 3]));
/// assert_eq!(values, vec![1, 2, 3]);
/// assert!(error.is_none());
/// ```
#[must_use]
pub fn collect<T: Send + 'static>(source: &Observable<T>) -> (Vec<T>, Option<FlowError>) {
    collect_with_context(source, Context::new())
}

/// [`collect`] with an explicit subscriber context.
///
/// If the context carries a cancellation token, cancelling it unblocks the
/// call and returns whatever was gathered so far, with no synthetic error.
#[must_use]
pub fn collect_with_context<T: Send + 'static>(
    source: &Observable<T>,
    ctx: Context,
) -> (Vec<T>, Option<FlowError>) {
    let values: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
    let failure: Arc<Mutex<Option<FlowError>>> = Arc::new(Mutex::new(None));

    let sink_values = values.clone();
    let sink_failure = failure.clone();
    let subscription = source.subscribe_with_context(
        ctx.clone(),
        observer::from_notifications(move |_ctx, item: Notification<T>| match item {
            Notification::Next(value) => sink_values.lock().push(value),
            Notification::Error(e) => *sink_failure.lock() = Some(e),
            Notification::Complete => {}
        }),
    );

    // The terminal closes the subscription, which fires its token. With an
    // externally cancellable context we additionally poll the caller's
    // token so an idle producer cannot keep us parked forever.
    let closed = subscription.token().clone();
    match ctx.cancellation() {
        None => closed.wait(),
        Some(cancel) => {
            while !closed.wait_timeout(CANCEL_POLL) {
                if cancel.is_cancelled() {
                    subscription.unsubscribe();
                    break;
                }
            }
        }
    }

    let collected = std::mem::take(&mut *values.lock());
    let error = failure.lock().take();
    (collected, error)
}
