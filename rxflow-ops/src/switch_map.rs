// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Switching higher-order flattening.

use parking_lot::Mutex;
use rxflow_core::{observer, Notification, Observable, Subscriber, Subscription, Teardown};
use std::sync::Arc;

struct SwitchState {
    generation: u64,
    inner: Option<Subscription>,
    inner_active: bool,
    outer_done: bool,
}

/// Extension trait providing the `switch_map` operator.
pub trait SwitchMapExt<T>: Sized {
    /// Projects every value to an inner stream, mirroring only the most
    /// recent one.
    ///
    /// Each outer value unsubscribes the previous inner stream immediately —
    /// a stale inner emission that races the switch is dropped. Outer
    /// completion defers to the last inner stream: the result completes once
    /// both have completed.
    fn switch_map<U, F>(self, project: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static;
}

impl<T: Send + 'static> SwitchMapExt<T> for Observable<T> {
    fn switch_map<U, F>(self, project: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        let source = self.clone();
        Observable::new(move |down: &Subscriber<U>| {
            let state = Arc::new(Mutex::new(SwitchState {
                generation: 0,
                inner: None,
                inner_active: false,
                outer_done: false,
            }));
            let project = project.clone();
            let down_outer = down.clone();
            let state_outer = state.clone();

            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        let (generation, previous) = {
                            let mut state = state_outer.lock();
                            state.generation += 1;
                            state.inner_active = true;
                            (state.generation, state.inner.take())
                        };
                        if let Some(previous) = previous {
                            previous.unsubscribe();
                        }

                        let inner = (*project)(value);
                        let down_inner = down_outer.clone();
                        let state_inner = state_outer.clone();
                        let inner_sub = inner.subscribe_with_context(
                            ctx.clone(),
                            observer::from_notifications(move |ctx, item: Notification<U>| {
                                match item {
                                    Notification::Next(value) => {
                                        if state_inner.lock().generation == generation {
                                            down_inner.next_with_context(ctx, value);
                                        }
                                    }
                                    Notification::Error(e) => {
                                        if state_inner.lock().generation == generation {
                                            down_inner.error_with_context(ctx, e);
                                        }
                                    }
                                    Notification::Complete => {
                                        let finish = {
                                            let mut state = state_inner.lock();
                                            if state.generation != generation {
                                                false
                                            } else {
                                                state.inner_active = false;
                                                state.inner = None;
                                                state.outer_done
                                            }
                                        };
                                        if finish {
                                            down_inner.complete_with_context(ctx);
                                        }
                                    }
                                }
                            }),
                        );

                        // Only remember the subscription if no newer inner
                        // stream has replaced this one in the meantime.
                        let stale = {
                            let mut state = state_outer.lock();
                            if state.generation == generation {
                                state.inner = Some(inner_sub.clone());
                                false
                            } else {
                                true
                            }
                        };
                        if stale {
                            inner_sub.unsubscribe();
                        }
                    }
                    Notification::Error(e) => down_outer.error_with_context(ctx, e),
                    Notification::Complete => {
                        let finish = {
                            let mut state = state_outer.lock();
                            state.outer_done = true;
                            !state.inner_active
                        };
                        if finish {
                            down_outer.complete_with_context(ctx);
                        }
                    }
                }),
            );

            let state_teardown = state.clone();
            Teardown::from_fn(move || {
                upstream.unsubscribe();
                let inner = state_teardown.lock().inner.take();
                if let Some(inner) = inner {
                    inner.unsubscribe();
                }
            })
        })
    }
}
