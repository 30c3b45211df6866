// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent higher-order flattening: `merge_map` and `merge_all`.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Shared engine: the outer stream counts as one active source; every inner
// subscription adds another. The last one to finish completes downstream.
fn merge_project<T, U, F>(source: Observable<T>, project: Arc<F>) -> Observable<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> Observable<U> + Send + Sync + 'static,
{
    Observable::new(move |down: &Subscriber<U>| {
        let active = Arc::new(AtomicUsize::new(1));
        let down_outer = down.clone();
        let project = project.clone();
        let active_outer = active.clone();

        let upstream = source.subscribe_with_context(
            down.context().clone(),
            observer::from_notifications(move |ctx, item: Notification<T>| match item {
                Notification::Next(value) => {
                    active_outer.fetch_add(1, Ordering::AcqRel);
                    let inner = (*project)(value);
                    let down_inner = down_outer.clone();
                    let active_inner = active_outer.clone();
                    let inner_sub = inner.subscribe_with_context(
                        ctx.clone(),
                        observer::from_notifications(move |ctx, item: Notification<U>| {
                            match item {
                                Notification::Next(value) => {
                                    down_inner.next_with_context(ctx, value);
                                }
                                Notification::Error(e) => {
                                    down_inner.error_with_context(ctx, e);
                                }
                                Notification::Complete => {
                                    if active_inner.fetch_sub(1, Ordering::AcqRel) == 1 {
                                        down_inner.complete_with_context(ctx);
                                    }
                                }
                            }
                        }),
                    );
                    down_outer.add_child(inner_sub);
                }
                Notification::Error(e) => down_outer.error_with_context(ctx, e),
                Notification::Complete => {
                    if active_outer.fetch_sub(1, Ordering::AcqRel) == 1 {
                        down_outer.complete_with_context(ctx);
                    }
                }
            }),
        );
        Teardown::from(upstream)
    })
}

/// Extension trait providing the `merge_map` operator.
pub trait MergeMapExt<T>: Sized {
    /// Projects every value to an inner stream and merges all inner streams
    /// concurrently.
    ///
    /// Errors — from the outer stream or any inner stream — propagate
    /// eagerly. Completion requires the outer stream and every inner stream
    /// to have completed.
    fn merge_map<U, F>(self, project: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static;
}

impl<T: Send + 'static> MergeMapExt<T> for Observable<T> {
    fn merge_map<U, F>(self, project: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        merge_project(self, Arc::new(project))
    }
}

/// Extension trait providing the `merge_all` operator.
pub trait MergeAllExt<U>: Sized {
    /// Flattens a stream of streams by merging every inner stream
    /// concurrently; the identity form of
    /// [`merge_map`](MergeMapExt::merge_map).
    fn merge_all(self) -> Observable<U>;
}

impl<U: Send + 'static> MergeAllExt<U> for Observable<Observable<U>> {
    fn merge_all(self) -> Observable<U> {
        merge_project(self, Arc::new(|inner: Observable<U>| inner))
    }
}
