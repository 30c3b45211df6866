// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Duplicate-suppression operators.
//!
//! `distinct` remembers every key it has seen; `distinct_until_changed`
//! remembers only the previous value and therefore runs in constant space.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

/// Extension trait providing the duplicate-suppression operators.
pub trait DistinctExt<T>: Sized {
    /// Forwards a value only the first time it is seen.
    fn distinct(self) -> Observable<T>
    where
        T: Clone + Eq + Hash;

    /// Forwards a value only the first time its key is seen.
    fn distinct_by<K, F>(self, key: F) -> Observable<T>
    where
        K: Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static;

    /// Suppresses consecutive duplicates.
    fn distinct_until_changed(self) -> Observable<T>
    where
        T: Clone + PartialEq;

    /// Suppresses consecutive duplicates according to `eq`.
    ///
    /// `eq(previous, current)` returning `true` drops `current`.
    fn distinct_until_changed_by<F>(self, eq: F) -> Observable<T>
    where
        T: Clone,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static;
}

impl<T: Send + 'static> DistinctExt<T> for Observable<T> {
    fn distinct(self) -> Observable<T>
    where
        T: Clone + Eq + Hash,
    {
        self.distinct_by(|value: &T| value.clone())
    }

    fn distinct_by<K, F>(self, key: F) -> Observable<T>
    where
        K: Eq + Hash + Send + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let key = Arc::new(key);
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let down = down.clone();
            let key = key.clone();
            let mut seen: HashSet<K> = HashSet::new();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        if seen.insert((*key)(&value)) {
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

    fn distinct_until_changed(self) -> Observable<T>
    where
        T: Clone + PartialEq,
    {
        self.distinct_until_changed_by(|previous: &T, current: &T| previous == current)
    }

    fn distinct_until_changed_by<F>(self, eq: F) -> Observable<T>
    where
        T: Clone,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let eq = Arc::new(eq);
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let down = down.clone();
            let eq = eq.clone();
            let mut previous: Option<T> = None;
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        if previous
                            .as_ref()
                            .is_some_and(|prev| (*eq)(prev, &value))
                        {
                            return;
                        }
                        previous = Some(value.clone());
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
