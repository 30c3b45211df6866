// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prefix-dropping operators: `skip`, `skip_while`.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the prefix-dropping operators.
pub trait SkipExt<T>: Sized {
    /// Drops the first `count` values, then forwards everything.
    fn skip(self, count: usize) -> Observable<T>;

    /// Drops values while `predicate` holds, then forwards everything
    /// starting with the first non-matching value.
    fn skip_while<P>(self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;
}

impl<T: Send + 'static> SkipExt<T> for Observable<T> {
    fn skip(self, count: usize) -> Observable<T> {
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let down = down.clone();
            let mut remaining = count;
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        if remaining > 0 {
                            remaining -= 1;
                        } else {
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

    fn skip_while<P>(self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let down = down.clone();
            let predicate = predicate.clone();
            let mut skipping = true;
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        if skipping && (*predicate)(&value) {
                            return;
                        }
                        skipping = false;
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
