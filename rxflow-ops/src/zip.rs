// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lockstep combination of multiple sources.

use parking_lot::Mutex;
use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::collections::VecDeque;
use std::sync::Arc;

struct ZipState<T> {
    queues: Vec<VecDeque<T>>,
    done: Vec<bool>,
}

impl<T> ZipState<T> {
    // A finished source with an empty queue can never contribute again.
    fn exhausted(&self) -> bool {
        self.done
            .iter()
            .zip(&self.queues)
            .any(|(done, queue)| *done && queue.is_empty())
    }

    fn pop_row(&mut self) -> Option<Vec<T>> {
        if self.queues.iter().any(VecDeque::is_empty) {
            return None;
        }
        let mut row = Vec::with_capacity(self.queues.len());
        for queue in &mut self.queues {
            row.push(queue.pop_front()?);
        }
        Some(row)
    }
}

/// Zips several sources: waits for one value from each, emits them as one
/// row, and repeats.
///
/// The stream completes as soon as any source has completed and its queued
/// values are drained — the remaining sources can never form another row.
/// Errors propagate eagerly.
///
/// # Panics
///
/// Panics at composition time if `sources` is empty.
#[must_use]
pub fn zip<T: Send + 'static>(sources: Vec<Observable<T>>) -> Observable<Vec<T>> {
    assert!(!sources.is_empty(), "zip requires at least one source");
    let sources = Arc::new(sources);
    Observable::new(move |down: &Subscriber<Vec<T>>| {
        let state = Arc::new(Mutex::new(ZipState {
            queues: sources.iter().map(|_| VecDeque::new()).collect(),
            done: vec![false; sources.len()],
        }));

        for (index, source) in sources.iter().enumerate() {
            if down.is_closed() {
                break;
            }
            let down_child = down.clone();
            let down_closure = down.clone();
            let state = state.clone();
            let upstream = source.subscribe_with_context(
                down_closure.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        // Emit outside the lock so a reentrant producer
                        // cannot deadlock against another source.
                        let (row, finished) = {
                            let mut state = state.lock();
                            state.queues[index].push_back(value);
                            let row = state.pop_row();
                            (row, state.exhausted())
                        };
                        if let Some(row) = row {
                            down_closure.next_with_context(ctx, row);
                        }
                        if finished {
                            down_closure.complete_with_context(ctx);
                        }
                    }
                    Notification::Error(e) => down_closure.error_with_context(ctx, e),
                    Notification::Complete => {
                        let finished = {
                            let mut state = state.lock();
                            state.done[index] = true;
                            state.exhausted()
                        };
                        if finished {
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
