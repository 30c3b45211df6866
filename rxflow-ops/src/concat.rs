// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential combination of multiple sources.
//!
//! Source `k + 1` is only subscribed after source `k` has completed, so the
//! concatenated stream preserves per-source order end to end. The queue
//! engine here is shared with `concat_map`.

use parking_lot::Mutex;
use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::collections::VecDeque;
use std::sync::Arc;

pub(crate) struct ConcatQueue<T> {
    pub(crate) pending: VecDeque<Observable<T>>,
    pub(crate) outer_done: bool,
    pub(crate) inner_active: bool,
}

impl<T> ConcatQueue<T> {
    pub(crate) fn new() -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            pending: VecDeque::new(),
            outer_done: false,
            inner_active: false,
        }))
    }
}

/// Subscribes the next queued source, if any; completes downstream once the
/// queue is empty and no further sources can arrive. Re-entered from the
/// completion handler of each inner subscription.
pub(crate) fn drain_queue<T: Send + 'static>(
    down: Subscriber<T>,
    queue: Arc<Mutex<ConcatQueue<T>>>,
) {
    let next_source = {
        let mut state = queue.lock();
        if state.inner_active {
            return;
        }
        match state.pending.pop_front() {
            Some(source) => {
                state.inner_active = true;
                Some(source)
            }
            None => {
                if state.outer_done {
                    None
                } else {
                    return;
                }
            }
        }
    };

    let Some(source) = next_source else {
        down.complete();
        return;
    };

    let forward = down.clone();
    let queue_next = queue.clone();
    let upstream = source.subscribe_with_context(
        down.context().clone(),
        observer::from_notifications(move |ctx, item: Notification<T>| match item {
            Notification::Next(value) => forward.next_with_context(ctx, value),
            Notification::Error(e) => forward.error_with_context(ctx, e),
            Notification::Complete => {
                queue_next.lock().inner_active = false;
                drain_queue(forward.clone(), queue_next.clone());
            }
        }),
    );
    down.add_child(upstream);
}

/// Concatenates several sources into one sequential stream.
///
/// Errors propagate immediately and abandon the remaining sources; the
/// stream completes after the last source completes. An empty list
/// completes immediately.
#[must_use]
pub fn concat<T: Send + 'static>(sources: Vec<Observable<T>>) -> Observable<T> {
    let sources = Arc::new(sources);
    Observable::new(move |down: &Subscriber<T>| {
        let queue = ConcatQueue::new();
        {
            let mut state = queue.lock();
            state.pending.extend(sources.iter().cloned());
            state.outer_done = true;
        }
        drain_queue(down.clone(), queue);
        Teardown::none()
    })
}

/// Extension trait providing the binary `concat_with` operator.
pub trait ConcatExt<T>: Sized {
    /// Runs this stream to completion, then `other`; see [`concat`].
    fn concat_with(self, other: Observable<T>) -> Observable<T>;
}

impl<T: Send + 'static> ConcatExt<T> for Observable<T> {
    fn concat_with(self, other: Observable<T>) -> Observable<T> {
        concat(vec![self, other])
    }
}
