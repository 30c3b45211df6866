// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value transformation operators.

use rxflow_core::{observer, FlowError, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the `map` and `try_map` operators.
pub trait MapExt<T>: Sized {
    /// Transforms each value with `f`.
    ///
    /// Terminals pass through unchanged; the delivery context is forwarded
    /// as-is.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::Observable;
    /// use rxflow_ops::MapExt;
    /// use rxflow_exec::collect;
    ///
    /// let doubled = Observable::just(vec![1, 2, 3]).map(|v| v * 2);
    /// let (values, error) = collect(&doubled);
    /// assert_eq!(values, vec![2, 4, 6]);
    /// assert!(error.is_none());
    /// ```
    fn map<U, F>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static;

    /// Transforms each value with a fallible `f`.
    ///
    /// An `Err` from `f` is surfaced as an `Error` notification and
    /// terminates the subscription.
    fn try_map<U, E, F>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static;
}

impl<T: Send + 'static> MapExt<T> for Observable<T> {
    fn map<U, F>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let source = self.clone();
        self.derived(move |down: &Subscriber<U>| {
            let down = down.clone();
            let f = f.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => down.next_with_context(ctx, (*f)(value)),
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }

    fn try_map<U, E, F>(self, f: F) -> Observable<U>
    where
        U: Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let source = self.clone();
        self.derived(move |down: &Subscriber<U>| {
            let down = down.clone();
            let f = f.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => match (*f)(value) {
                        Ok(mapped) => down.next_with_context(ctx, mapped),
                        Err(e) => down.error_with_context(ctx, FlowError::user_error(e)),
                    },
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
