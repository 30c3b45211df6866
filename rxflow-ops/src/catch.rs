// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error recovery via a fallback stream.

use rxflow_core::{observer, FlowError, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the `catch` operator.
pub trait CatchExt<T>: Sized {
    /// On upstream error, switches to the stream returned by `handler`.
    ///
    /// The recovery stream is subscribed with the outer subscriber context,
    /// so context values survive the handover. Errors from the recovery
    /// stream itself propagate normally — chain another `catch` to handle
    /// those too.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::{FlowError, Observable};
    /// use rxflow_ops::CatchExt;
    /// use rxflow_exec::collect;
    ///
    /// let source = Observable::<i32>::throw(FlowError::stream_error("boom"))
    ///     .catch(|_e| Observable::just(vec![7, 8]));
    /// assert_eq!(collect(&source), (vec![7, 8], None));
    /// ```
    fn catch<F>(self, handler: F) -> Observable<T>
    where
        F: Fn(FlowError) -> Observable<T> + Send + Sync + 'static;
}

impl<T: Send + 'static> CatchExt<T> for Observable<T> {
    fn catch<F>(self, handler: F) -> Observable<T>
    where
        F: Fn(FlowError) -> Observable<T> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let handler = handler.clone();
            let down = down.clone();
            let recover = down.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => down.next_with_context(ctx, value),
                    Notification::Error(e) => {
                        let fallback = (*handler)(e);
                        let fallback_sub = fallback
                            .subscribe_with_context(down.context().clone(), recover.clone());
                        down.add_child(fallback_sub);
                    }
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
