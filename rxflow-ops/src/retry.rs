// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error recovery via re-subscription.

use parking_lot::Mutex;
use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

// Re-subscribes `source` on behalf of `down`, consuming one retry credit
// per upstream error. Free function so the error handler can recurse.
fn subscribe_attempt<T: Send + 'static>(
    source: Observable<T>,
    down: Subscriber<T>,
    remaining: Arc<Mutex<usize>>,
) {
    let forward = down.clone();
    let source_again = source.clone();
    let remaining_next = remaining.clone();
    let attempt = source.subscribe_with_context(
        down.context().clone(),
        observer::from_notifications(move |ctx, item: Notification<T>| match item {
            Notification::Next(value) => forward.next_with_context(ctx, value),
            Notification::Complete => forward.complete_with_context(ctx),
            Notification::Error(e) => {
                let retry_again = {
                    let mut credits = remaining_next.lock();
                    if *credits > 0 {
                        *credits -= 1;
                        true
                    } else {
                        false
                    }
                };
                if retry_again {
                    subscribe_attempt(
                        source_again.clone(),
                        forward.clone(),
                        remaining_next.clone(),
                    );
                } else {
                    forward.error_with_context(ctx, e);
                }
            }
        }),
    );
    down.add_child(attempt);
}

/// Extension trait providing the `retry` operator.
pub trait RetryExt<T>: Sized {
    /// On upstream error, re-subscribes the source up to `count` times.
    ///
    /// Re-subscription starts the upstream chain from scratch — operator
    /// state resets, and the original subscribe-time context is threaded
    /// into every attempt. Once the credits are exhausted, the last error
    /// is forwarded.
    fn retry(self, count: usize) -> Observable<T>;
}

impl<T: Send + 'static> RetryExt<T> for Observable<T> {
    fn retry(self, count: usize) -> Observable<T> {
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            subscribe_attempt(
                source.clone(),
                down.clone(),
                Arc::new(Mutex::new(count)),
            );
            Teardown::none()
        })
    }
}
