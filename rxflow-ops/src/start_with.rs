// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prepend initial values to a stream.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};

/// Extension trait providing the `start_with` operator.
pub trait StartWithExt<T>: Sized {
    /// Emits `values` in order before anything from the source.
    ///
    /// The source is only subscribed after the prefix has been delivered,
    /// so an unsubscribe during the prefix never touches upstream.
    fn start_with(self, values: Vec<T>) -> Observable<T>
    where
        T: Clone + Sync;
}

impl<T: Send + 'static> StartWithExt<T> for Observable<T> {
    fn start_with(self, values: Vec<T>) -> Observable<T>
    where
        T: Clone + Sync,
    {
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            for value in &values {
                if down.is_closed() {
                    return Teardown::none();
                }
                down.next(value.clone());
            }
            let down = down.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => down.next_with_context(ctx, value),
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
