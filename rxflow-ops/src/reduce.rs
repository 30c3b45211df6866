// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal accumulation operator.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the `reduce` operator.
pub trait ReduceExt<T>: Sized {
    /// Folds the stream with `f` and emits only the final accumulator at
    /// completion.
    ///
    /// An empty source reduces to `seed`. Errors discard the accumulator
    /// and propagate unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::Observable;
    /// use rxflow_ops::ReduceExt;
    /// use rxflow_exec::collect;
    ///
    /// let total = Observable::just(vec![1, 2, 3, 4]).reduce(0, |acc, v| acc + v);
    /// assert_eq!(collect(&total).0, vec![10]);
    /// ```
    fn reduce<U, F>(self, seed: U, f: F) -> Observable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Send + Sync + 'static;
}

impl<T: Send + 'static> ReduceExt<T> for Observable<T> {
    fn reduce<U, F>(self, seed: U, f: F) -> Observable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let source = self.clone();
        self.derived(move |down: &Subscriber<U>| {
            let down = down.clone();
            let f = f.clone();
            let mut acc = Some(seed.clone());
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        if let Some(current) = acc.take() {
                            acc = Some((*f)(current, value));
                        }
                    }
                    Notification::Error(e) => {
                        acc = None;
                        down.error_with_context(ctx, e);
                    }
                    Notification::Complete => {
                        if let Some(result) = acc.take() {
                            down.next_with_context(ctx, result);
                        }
                        down.complete_with_context(ctx);
                    }
                }),
            );
            Teardown::from(upstream)
        })
    }
}
