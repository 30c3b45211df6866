// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prefix-limiting operators: `take`, `take_while`, `take_until`.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the prefix-limiting operators.
pub trait TakeExt<T>: Sized {
    /// Emits the first `count` values, then completes and releases upstream.
    ///
    /// `take(0)` completes without ever subscribing upstream.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::Observable;
    /// use rxflow_ops::TakeExt;
    /// use rxflow_exec::collect;
    ///
    /// let first_two = Observable::just(vec![1, 2, 3, 4]).take(2);
    /// assert_eq!(collect(&first_two).0, vec![1, 2]);
    /// ```
    fn take(self, count: usize) -> Observable<T>;

    /// Emits values while `predicate` holds; completes on the first failure
    /// (the failing value is not emitted).
    fn take_while<P>(self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;

    /// Emits values until `notifier` produces any notification — value,
    /// error or completion — then completes and releases both upstreams.
    fn take_until<U>(self, notifier: Observable<U>) -> Observable<T>
    where
        U: Send + 'static;
}

impl<T: Send + 'static> TakeExt<T> for Observable<T> {
    fn take(self, count: usize) -> Observable<T> {
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            if count == 0 {
                down.complete();
                return Teardown::none();
            }
            let down = down.clone();
            let mut remaining = count;
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        if remaining == 0 {
                            return;
                        }
                        remaining -= 1;
                        down.next_with_context(ctx, value);
                        if remaining == 0 {
                            down.complete_with_context(ctx);
                        }
                    }
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }

    fn take_while<P>(self, predicate: P) -> Observable<T>
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
                        } else {
                            down.complete_with_context(ctx);
                        }
                    }
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }

    fn take_until<U>(self, notifier: Observable<U>) -> Observable<T>
    where
        U: Send + 'static,
    {
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let stop = {
                let down = down.clone();
                notifier.subscribe_with_context(
                    down.context().clone(),
                    observer::from_notifications(move |ctx, _item: Notification<U>| {
                        down.complete_with_context(ctx);
                    }),
                )
            };
            down.add_child(stop);

            // The notifier may have fired synchronously
            if down.is_closed() {
                return Teardown::none();
            }

            let forward = down.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => forward.next_with_context(ctx, value),
                    Notification::Error(e) => forward.error_with_context(ctx, e),
                    Notification::Complete => forward.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
