// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing-edge quiet-period operator.

use parking_lot::{Condvar, Mutex};
use rxflow_core::{observer, Context, FlowError, Notification, Observable, Subscriber, Teardown};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

struct DebounceShared<T> {
    state: Mutex<DebounceState<T>>,
    signal: Condvar,
}

struct DebounceState<T> {
    pending: Option<(Instant, Context, T)>,
    completed: Option<Context>,
    shutdown: bool,
}

enum Action<T> {
    Emit(Context, T),
    Finish(Context, Option<(Context, T)>),
}

/// Extension trait providing the `debounce` operator.
pub trait DebounceExt<T>: Sized {
    /// Emits the most recent value once the stream has been quiet for
    /// `duration`.
    ///
    /// This is trailing debounce: every arrival restarts the timer and
    /// replaces the pending value, so only the newest value of a burst is
    /// eventually emitted. On completion any pending value is flushed
    /// immediately before `Complete`; errors pass through at once,
    /// discarding the pending value.
    fn debounce(self, duration: Duration) -> Observable<T>;
}

impl<T: Send + 'static> DebounceExt<T> for Observable<T> {
    fn debounce(self, duration: Duration) -> Observable<T> {
        let source = self.clone();
        Observable::new(move |down: &Subscriber<T>| {
            let shared = Arc::new(DebounceShared {
                state: Mutex::new(DebounceState {
                    pending: None,
                    completed: None,
                    shutdown: false,
                }),
                signal: Condvar::new(),
            });

            let emit = down.clone();
            let shared_worker = shared.clone();
            let spawned = thread::Builder::new()
                .name("rxflow-debounce".into())
                .spawn(move || loop {
                    let action = {
                        let mut state = shared_worker.state.lock();
                        loop {
                            if state.shutdown {
                                return;
                            }
                            if let Some(done_ctx) = state.completed.take() {
                                let flush = state.pending.take().map(|(_, ctx, v)| (ctx, v));
                                break Action::Finish(done_ctx, flush);
                            }
                            let now = Instant::now();
                            let deadline = state.pending.as_ref().map(|(due, _, _)| *due);
                            match deadline {
                                Some(due) if due <= now => {
                                    let Some((_, ctx, value)) = state.pending.take() else {
                                        continue;
                                    };
                                    break Action::Emit(ctx, value);
                                }
                                Some(due) => {
                                    let _ = shared_worker.signal.wait_until(&mut state, due);
                                }
                                None => shared_worker.signal.wait(&mut state),
                            }
                        }
                    };
                    match action {
                        Action::Emit(ctx, value) => {
                            emit.next_with_context(&ctx, value);
                            if emit.is_closed() {
                                return;
                            }
                        }
                        Action::Finish(done_ctx, flush) => {
                            if let Some((ctx, value)) = flush {
                                emit.next_with_context(&ctx, value);
                            }
                            emit.complete_with_context(&done_ctx);
                            return;
                        }
                    }
                });
            if let Err(e) = spawned {
                down.error(FlowError::user_error(e));
                return Teardown::none();
            }

            let forward = down.clone();
            let shared_in = shared.clone();
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        {
                            let mut state = shared_in.state.lock();
                            if state.shutdown || state.completed.is_some() {
                                return;
                            }
                            state.pending =
                                Some((Instant::now() + duration, ctx.clone(), value));
                        }
                        shared_in.signal.notify_one();
                    }
                    Notification::Error(e) => {
                        {
                            let mut state = shared_in.state.lock();
                            state.pending = None;
                            state.shutdown = true;
                        }
                        shared_in.signal.notify_one();
                        forward.error_with_context(ctx, e);
                    }
                    Notification::Complete => {
                        {
                            let mut state = shared_in.state.lock();
                            if state.shutdown {
                                return;
                            }
                            state.completed = Some(ctx.clone());
                        }
                        shared_in.signal.notify_one();
                    }
                }),
            );

            let shared_teardown = shared;
            Teardown::from_fn(move || {
                upstream.unsubscribe();
                {
                    let mut state = shared_teardown.state.lock();
                    state.pending = None;
                    state.shutdown = true;
                }
                shared_teardown.signal.notify_one();
            })
        })
    }
}
