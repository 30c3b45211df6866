// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-shifting operator.

use parking_lot::{Condvar, Mutex};
use rxflow_core::{
    observer, Context, FlowError, Notification, Observable, Subscriber, Teardown,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

enum Event<T> {
    Value(T),
    Complete,
}

struct Entry<T> {
    due: Instant,
    ctx: Context,
    event: Event<T>,
}

struct DelayShared<T> {
    state: Mutex<DelayState<T>>,
    signal: Condvar,
}

struct DelayState<T> {
    queue: VecDeque<Entry<T>>,
    shutdown: bool,
}

/// Extension trait providing the `delay` operator.
pub trait DelayExt<T>: Sized {
    /// Shifts every value (and the completion) by `duration`, preserving
    /// order and the gaps between values.
    ///
    /// Errors pass through immediately, discarding anything still queued,
    /// so failures are never held back by the shift. Unsubscribing cancels
    /// all pending deliveries.
    fn delay(self, duration: Duration) -> Observable<T>;
}

impl<T: Send + 'static> DelayExt<T> for Observable<T> {
    fn delay(self, duration: Duration) -> Observable<T> {
        let source = self.clone();
        Observable::new(move |down: &Subscriber<T>| {
            let shared = Arc::new(DelayShared {
                state: Mutex::new(DelayState {
                    queue: VecDeque::new(),
                    shutdown: false,
                }),
                signal: Condvar::new(),
            });

            // Worker: sleeps until the front entry falls due, emits it,
            // repeats. Exits on shutdown or after delivering completion.
            let emit = down.clone();
            let shared_worker = shared.clone();
            let spawned = thread::Builder::new()
                .name("rxflow-delay".into())
                .spawn(move || loop {
                    let entry = {
                        let mut state = shared_worker.state.lock();
                        loop {
                            if state.shutdown {
                                return;
                            }
                            let now = Instant::now();
                            let front_due = state.queue.front().map(|entry| entry.due);
                            match front_due {
                                Some(due) if due <= now => break state.queue.pop_front(),
                                Some(due) => {
                                    let _ = shared_worker.signal.wait_until(&mut state, due);
                                }
                                None => shared_worker.signal.wait(&mut state),
                            }
                        }
                    };
                    let Some(entry) = entry else {
                        continue;
                    };
                    match entry.event {
                        Event::Value(value) => emit.next_with_context(&entry.ctx, value),
                        Event::Complete => {
                            emit.complete_with_context(&entry.ctx);
                            return;
                        }
                    }
                    if emit.is_closed() {
                        return;
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
                            if state.shutdown {
                                return;
                            }
                            state.queue.push_back(Entry {
                                due: Instant::now() + duration,
                                ctx: ctx.clone(),
                                event: Event::Value(value),
                            });
                        }
                        shared_in.signal.notify_one();
                    }
                    Notification::Error(e) => {
                        {
                            let mut state = shared_in.state.lock();
                            state.queue.clear();
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
                            state.queue.push_back(Entry {
                                due: Instant::now() + duration,
                                ctx: ctx.clone(),
                                event: Event::Complete,
                            });
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
                    state.queue.clear();
                    state.shutdown = true;
                }
                shared_teardown.signal.notify_one();
            })
        })
    }
}
