// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Side-effect observation operator.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the `tap` operator.
pub trait TapExt<T>: Sized {
    /// Runs `f` for every value without altering the stream.
    ///
    /// Useful for logging and debugging mid-pipeline.
    fn tap<F>(self, f: F) -> Observable<T>
    where
        F: Fn(&T) + Send + Sync + 'static;
}

impl<T: Send + 'static> TapExt<T> for Observable<T> {
    fn tap<F>(self, f: F) -> Observable<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let down = down.clone();
            let f = f.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        (*f)(&value);
                        down.next_with_context(ctx, value);
                    }
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
