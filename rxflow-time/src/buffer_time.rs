// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-windowed batching operator.

use parking_lot::Mutex;
use rxflow_core::{observer, FlowError, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Extension trait providing the `buffer_time` operator.
pub trait BufferTimeExt<T>: Sized {
    /// Collects values and emits the batch every `period`.
    ///
    /// Batches may be empty if the source was quiet for a whole window. On
    /// completion a non-empty trailing batch is emitted before `Complete`;
    /// errors pass through immediately and discard the batch. The ticker
    /// thread parks on the subscription's cancellation token, so it dies
    /// with the subscription.
    fn buffer_time(self, period: Duration) -> Observable<Vec<T>>;
}

impl<T: Send + 'static> BufferTimeExt<T> for Observable<T> {
    fn buffer_time(self, period: Duration) -> Observable<Vec<T>> {
        let source = self.clone();
        Observable::new(move |down: &Subscriber<Vec<T>>| {
            let buffer: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));

            // Ticker: flush the window every period until the subscription
            // closes (terminal or unsubscribe cancels the token).
            let emit = down.clone();
            let token = down.subscription().token().clone();
            let buffer_tick = buffer.clone();
            let spawned = thread::Builder::new()
                .name("rxflow-buffer-time".into())
                .spawn(move || loop {
                    if token.wait_timeout(period) {
                        return;
                    }
                    if emit.is_closed() {
                        return;
                    }
                    let batch = std::mem::take(&mut *buffer_tick.lock());
                    emit.next(batch);
                });
            if let Err(e) = spawned {
                down.error(FlowError::user_error(e));
                return Teardown::none();
            }

            let forward = down.clone();
            let buffer_in = buffer.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => buffer_in.lock().push(value),
                    Notification::Error(e) => {
                        buffer_in.lock().clear();
                        forward.error_with_context(ctx, e);
                    }
                    Notification::Complete => {
                        let batch = std::mem::take(&mut *buffer_in.lock());
                        if !batch.is_empty() {
                            forward.next_with_context(ctx, batch);
                        }
                        forward.complete_with_context(ctx);
                    }
                }),
            );
            Teardown::from(upstream)
        })
    }
}
