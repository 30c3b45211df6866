// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential higher-order flattening.

use crate::concat::{drain_queue, ConcatQueue};
use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

/// Extension trait providing the `concat_map` operator.
pub trait ConcatMapExt<T>: Sized {
    /// Projects every value to an inner stream and concatenates the inner
    /// streams in arrival order.
    ///
    /// Unlike [`merge_map`](crate::MergeMapExt::merge_map), at most one
    /// inner stream is subscribed at a time; later projections wait in a
    /// queue until the current inner stream completes.
    fn concat_map<U, F>(self, project: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static;
}

impl<T: Send + 'static> ConcatMapExt<T> for Observable<T> {
    fn concat_map<U, F>(self, project: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        let source = self.clone();
        self.derived(move |down: &Subscriber<U>| {
            let queue = ConcatQueue::new();
            let project = project.clone();
            let down_outer = down.clone();
            let queue_outer = queue.clone();

            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        queue_outer.lock().pending.push_back((*project)(value));
                        drain_queue(down_outer.clone(), queue_outer.clone());
                    }
                    Notification::Error(e) => down_outer.error_with_context(ctx, e),
                    Notification::Complete => {
                        let idle = {
                            let mut state = queue_outer.lock();
                            state.outer_done = true;
                            !state.inner_active && state.pending.is_empty()
                        };
                        if idle {
                            down_outer.complete_with_context(ctx);
                        }
                    }
                }),
            );
            Teardown::from(upstream)
        })
    }
}
