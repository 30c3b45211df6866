// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate filtering operator.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the `filter` operator.
pub trait FilterExt<T>: Sized {
    /// Forwards only the values for which `predicate` returns `true`.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::Observable;
    /// use rxflow_ops::FilterExt;
    /// use rxflow_exec::collect;
    ///
    /// let evens = Observable::just(vec![1, 2, 3, 4, 5]).filter(|v| v % 2 == 0);
    /// assert_eq!(collect(&evens).0, vec![2, 4]);
    /// ```
    fn filter<P>(self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;
}

impl<T: Send + 'static> FilterExt<T> for Observable<T> {
    fn filter<P>(self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let down = down.clone();
            let predicate = predicate.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        if (*predicate)(&value) {
                            down.next_with_context(ctx, value);
                        }
                    }
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
