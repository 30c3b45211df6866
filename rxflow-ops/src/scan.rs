// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Running accumulation operator.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the `scan` operator.
pub trait ScanExt<T>: Sized {
    /// Emits the running accumulator after every input value.
    ///
    /// The accumulator starts at `seed` and is folded with `f`; state is
    /// allocated per subscription, so every subscriber observes its own
    /// accumulation.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::Observable;
    /// use rxflow_ops::ScanExt;
    /// use rxflow_exec::collect;
    ///
    /// let sums = Observable::just(vec![1, 2, 3]).scan(0, |acc, v| acc + v);
    /// assert_eq!(collect(&sums).0, vec![1, 3, 6]);
    /// ```
    fn scan<U, F>(self, seed: U, f: F) -> Observable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Send + Sync + 'static;
}

impl<T: Send + 'static> ScanExt<T> for Observable<T> {
    fn scan<U, F>(self, seed: U, f: F) -> Observable<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(U, T) -> U + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let source = self.clone();
        self.derived(move |down: &Subscriber<U>| {
            let down = down.clone();
            let f = f.clone();
            let mut acc = seed.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        acc = (*f)(acc.clone(), value);
                        down.next_with_context(ctx, acc.clone());
                    }
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
