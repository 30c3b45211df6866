// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Batching operators: `buffer_count` and `buffer_when`.
//!
//! The time-driven variant lives in `rxflow-time`.

use parking_lot::Mutex;
use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the batching operators.
pub trait BufferExt<T>: Sized {
    /// Collects values into batches of exactly `count`.
    ///
    /// A trailing partial batch is emitted before completion.
    ///
    /// # Panics
    ///
    /// Panics at composition time if `count` is zero.
    fn buffer_count(self, count: usize) -> Observable<Vec<T>>;

    /// Emits the collected batch every time `notifier` produces a value.
    ///
    /// Batches may be empty. A trailing non-empty batch is emitted before
    /// completion; an error from the notifier fails the stream.
    fn buffer_when<U>(self, notifier: Observable<U>) -> Observable<Vec<T>>
    where
        U: Send + 'static;
}

impl<T: Send + 'static> BufferExt<T> for Observable<T> {
    fn buffer_count(self, count: usize) -> Observable<Vec<T>> {
        assert!(count > 0, "buffer_count requires a positive batch size");
        let source = self.clone();
        self.derived(move |down: &Subscriber<Vec<T>>| {
            let down = down.clone();
            let mut buffer: Vec<T> = Vec::with_capacity(count);
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        buffer.push(value);
                        if buffer.len() == count {
                            let batch = std::mem::replace(&mut buffer, Vec::with_capacity(count));
                            down.next_with_context(ctx, batch);
                        }
                    }
                    Notification::Error(e) => {
                        buffer.clear();
                        down.error_with_context(ctx, e);
                    }
                    Notification::Complete => {
                        if !buffer.is_empty() {
                            let batch = std::mem::take(&mut buffer);
                            down.next_with_context(ctx, batch);
                        }
                        down.complete_with_context(ctx);
                    }
                }),
            );
            Teardown::from(upstream)
        })
    }

    fn buffer_when<U>(self, notifier: Observable<U>) -> Observable<Vec<T>>
    where
        U: Send + 'static,
    {
        let source = self.clone();
        self.derived(move |down: &Subscriber<Vec<T>>| {
            let buffer: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));

            let flush = {
                let down = down.clone();
                let buffer = buffer.clone();
                notifier.subscribe_with_context(
                    down.context().clone(),
                    observer::from_notifications(move |ctx, item: Notification<U>| match item {
                        Notification::Next(_) => {
                            let batch = std::mem::take(&mut *buffer.lock());
                            down.next_with_context(ctx, batch);
                        }
                        Notification::Error(e) => down.error_with_context(ctx, e),
                        // A finished notifier simply stops flushing
                        Notification::Complete => {}
                    }),
                )
            };
            down.add_child(flush);

            let down = down.clone();
            let buffer_in = buffer.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => buffer_in.lock().push(value),
                    Notification::Error(e) => {
                        buffer_in.lock().clear();
                        down.error_with_context(ctx, e);
                    }
                    Notification::Complete => {
                        let batch = std::mem::take(&mut *buffer_in.lock());
                        if !batch.is_empty() {
                            down.next_with_context(ctx, batch);
                        }
                        down.complete_with_context(ctx);
                    }
                }),
            );
            Teardown::from(upstream)
        })
    }
}
