// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flattening of iterable values.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};

/// Extension trait providing the `flatten_iter` operator.
pub trait FlattenExt<I>: Sized {
    /// Expands every iterable value into its elements, in order.
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::Observable;
    /// use rxflow_ops::FlattenExt;
    /// use rxflow_exec::collect;
    ///
    /// let flat = Observable::just(vec![vec![1, 2, 3], vec![4, 5, 6]]).flatten_iter();
    /// assert_eq!(collect(&flat).0, vec![1, 2, 3, 4, 5, 6]);
    /// ```
    fn flatten_iter<U>(self) -> Observable<U>
    where
        I: IntoIterator<Item = U>,
        U: Send + 'static;
}

impl<I: Send + 'static> FlattenExt<I> for Observable<I> {
    fn flatten_iter<U>(self) -> Observable<U>
    where
        I: IntoIterator<Item = U>,
        U: Send + 'static,
    {
        let source = self.clone();
        self.derived(move |down: &Subscriber<U>| {
            let down = down.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<I>| match item {
                    Notification::Next(iterable) => {
                        for element in iterable {
                            if down.is_closed() {
                                break;
                            }
                            down.next_with_context(ctx, element);
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
