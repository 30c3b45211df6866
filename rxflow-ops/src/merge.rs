// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent combination of multiple sources.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Merges several sources into one stream.
///
/// All sources are subscribed concurrently. Values are forwarded as they
/// arrive — ordering across sources is unspecified, ordering within each
/// source is preserved. The merged stream fails eagerly on the first
/// source error and completes only once every source has completed.
///
/// The result is a safe observable: concurrent sources contend on the
/// subscriber's serialisation guard, never on each other.
#[must_use]
pub fn merge<T: Send + 'static>(sources: Vec<Observable<T>>) -> Observable<T> {
    let sources = Arc::new(sources);
    Observable::new(move |down: &Subscriber<T>| {
        if sources.is_empty() {
            down.complete();
            return Teardown::none();
        }

        let remaining = Arc::new(AtomicUsize::new(sources.len()));
        for source in sources.iter() {
            if down.is_closed() {
                break;
            }
            let down_child = down.clone();
            let down_closure = down.clone();
            let remaining = remaining.clone();
            let upstream = source.subscribe_with_context(
                down_closure.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => down_closure.next_with_context(ctx, value),
                    Notification::Error(e) => down_closure.error_with_context(ctx, e),
                    Notification::Complete => {
                        if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                            down_closure.complete_with_context(ctx);
                        }
                    }
                }),
            );
            down_child.add_child(upstream);
        }
        Teardown::none()
    })
}

/// Extension trait providing the binary `merge_with` operator.
pub trait MergeWithExt<T>: Sized {
    /// Merges this stream with `other`; see [`merge`].
    fn merge_with(self, other: Observable<T>) -> Observable<T>;
}

impl<T: Send + 'static> MergeWithExt<T> for Observable<T> {
    fn merge_with(self, other: Observable<T>) -> Observable<T> {
        merge(vec![self, other])
    }
}
