// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Latest-value combination of multiple sources.

use parking_lot::Mutex;
use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;

struct CombineState<T> {
    latest: Vec<Option<T>>,
    completed: usize,
}

/// Combines several sources into a stream of "latest value" rows.
///
/// Nothing is emitted until every source has produced at least one value;
/// from then on, every emission from any source produces a fresh row of the
/// current latest values. The combined stream completes once all sources
/// have completed, and fails eagerly on the first source error.
///
/// # Panics
///
/// Panics at composition time if `sources` is empty.
#[must_use]
pub fn combine_latest<T: Clone + Send + 'static>(
    sources: Vec<Observable<T>>,
) -> Observable<Vec<T>> {
    assert!(
        !sources.is_empty(),
        "combine_latest requires at least one source"
    );
    let sources = Arc::new(sources);
    Observable::new(move |down: &Subscriber<Vec<T>>| {
        let state = Arc::new(Mutex::new(CombineState {
            latest: vec![None; sources.len()],
            completed: 0,
        }));
        let total = sources.len();

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
                        let row: Option<Vec<T>> = {
                            let mut state = state.lock();
                            state.latest[index] = Some(value);
                            state
                                .latest
                                .iter()
                                .map(|slot| slot.clone())
                                .collect::<Option<Vec<T>>>()
                        };
                        if let Some(row) = row {
                            down_closure.next_with_context(ctx, row);
                        }
                    }
                    Notification::Error(e) => down_closure.error_with_context(ctx, e),
                    Notification::Complete => {
                        let all_done = {
                            let mut state = state.lock();
                            state.completed += 1;
                            state.completed == total
                        };
                        if all_done {
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
