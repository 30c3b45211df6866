// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{CancellationToken, Context, Observable, Subscriber, Teardown};
use rxflow_exec::{collect, collect_with_context};
use rxflow_test_utils::test_error;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn round_trips_a_finite_sequence() {
    let source = Observable::just(vec![1, 2, 3, 4, 5]);
    assert_eq!(collect(&source), (vec![1, 2, 3, 4, 5], None));
}

#[test]
fn captures_the_terminal_error() {
    let source = Observable::<i32>::throw(test_error());
    let (values, error) = collect(&source);
    assert!(values.is_empty());
    assert_eq!(error, Some(test_error()));
}

#[test]
fn does_not_deadlock_on_an_asynchronous_producer() {
    let source = Observable::new(|subscriber: &Subscriber<i32>| {
        let emit = subscriber.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            emit.next(1);
            emit.next(2);
            emit.complete();
        });
        Teardown::none()
    });

    let start = Instant::now();
    let (values, error) = collect(&source);

    assert_eq!(values, vec![1, 2]);
    assert!(error.is_none());
    assert!(start.elapsed() >= Duration::from_millis(25));
}

#[test]
fn cancelling_the_context_returns_what_was_gathered() {
    let source = Observable::new(|subscriber: &Subscriber<u64>| {
        let emit = subscriber.clone();
        let stop = subscriber.subscription().token().clone();
        thread::spawn(move || {
            let mut tick = 0;
            while !stop.wait_timeout(Duration::from_millis(10)) {
                emit.next(tick);
                tick += 1;
            }
        });
        Teardown::none()
    });

    let cancel = CancellationToken::new();
    let remote = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(80));
        remote.cancel();
    });

    let ctx = Context::new().with_cancellation(cancel);
    let start = Instant::now();
    let (values, error) = collect_with_context(&source, ctx);
    canceller.join().unwrap();

    // Unblocked by the cancellation, not by a terminal; no synthetic error
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(!values.is_empty());
    assert!(error.is_none());
}

#[test]
fn values_preserve_emission_order() {
    let source = Observable::just((0..100).collect::<Vec<_>>());
    let (values, _) = collect(&source);
    assert_eq!(values, (0..100).collect::<Vec<_>>());
}

#[test]
fn collect_can_be_repeated_on_the_same_observable() {
    let source = Observable::just(vec![1, 2]);
    assert_eq!(collect(&source), (vec![1, 2], None));
    assert_eq!(collect(&source), (vec![1, 2], None));
}
