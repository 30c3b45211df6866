// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Periodic and one-shot timer sources.

use rxflow_core::{FlowError, Observable, Subscriber, Teardown};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

/// An infinite source emitting `0, 1, 2, …`, one tick per `period`.
///
/// Each subscription gets its own timer thread. The thread parks on the
/// subscription's cancellation token, so unsubscribing stops it without
/// waiting out the current period. The produced observable is safe:
/// emissions are serialised for the subscriber.
///
/// # Example
///
/// ```
/// use rxflow_core::Observable;
/// use rxflow_ops::TakeExt;
/// use rxflow_exec::collect;
/// use rxflow_time::interval;
/// use std::time::Duration;
///
/// let ticks = interval(Duration::from_millis(5)).take(3);
/// assert_eq!(collect(&ticks).0, vec![0, 1, 2]);
/// ```
#[must_use]
pub fn interval(period: Duration) -> Observable<u64> {
    Observable::new(move |subscriber: &Subscriber<u64>| {
        let emit = subscriber.clone();
        let token = subscriber.subscription().token().clone();

        let spawned = thread::Builder::new()
            .name("rxflow-interval".into())
            .spawn(move || {
                let mut tick: u64 = 0;
                loop {
                    if token.wait_timeout(period) {
                        return;
                    }
                    if emit.is_closed() {
                        return;
                    }
                    if catch_unwind(AssertUnwindSafe(|| emit.next(tick))).is_err() {
                        emit.error(FlowError::producer_panic(
                            "observer panicked during interval tick",
                        ));
                        return;
                    }
                    tick += 1;
                }
            });

        if let Err(e) = spawned {
            subscriber.error(FlowError::user_error(e));
        }
        Teardown::none()
    })
}

/// A one-shot source emitting a single `0` after `delay`, then completing.
#[must_use]
pub fn timer(delay: Duration) -> Observable<u64> {
    Observable::new(move |subscriber: &Subscriber<u64>| {
        let emit = subscriber.clone();
        let token = subscriber.subscription().token().clone();

        let spawned = thread::Builder::new()
            .name("rxflow-timer".into())
            .spawn(move || {
                if token.wait_timeout(delay) {
                    return;
                }
                if catch_unwind(AssertUnwindSafe(|| {
                    emit.next(0);
                    emit.complete();
                }))
                .is_err()
                {
                    emit.error(FlowError::producer_panic(
                        "observer panicked during timer firing",
                    ));
                }
            });

        if let Err(e) = spawned {
            subscriber.error(FlowError::user_error(e));
        }
        Teardown::none()
    })
}
