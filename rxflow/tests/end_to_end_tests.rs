// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Whole-surface scenarios through the facade: pipelines of creation,
//! transformation, timing and collection, exactly as an application would
//! compose them.

use rxflow::prelude::*;
use rxflow_test_utils::{test_error, RecordingObserver};
use std::time::{Duration, Instant};

#[test]
fn filter_pipeline_keeps_the_even_half() {
    let evens = pipe1(
        Observable::just(vec![1, 2, 3, 4, 5]),
        &op(|s: Observable<i32>| s.filter(|v| v % 2 == 0)),
    );
    assert_eq!(collect(&evens), (vec![2, 4], None));
}

#[test]
fn flatten_pipeline_concatenates_the_chunks() {
    let flat = pipe1(
        Observable::just(vec![vec![1, 2, 3], vec![4, 5, 6]]),
        &op(|s: Observable<Vec<i32>>| s.flatten_iter()),
    );
    assert_eq!(collect(&flat), (vec![1, 2, 3, 4, 5, 6], None));
}

#[test]
fn flatten_pipeline_preserves_the_empty_law() {
    let flat = pipe1(
        Observable::<Vec<i32>>::empty(),
        &op(|s: Observable<Vec<i32>>| s.flatten_iter()),
    );
    assert_eq!(collect(&flat), (vec![], None));
}

#[test]
fn flatten_pipeline_preserves_the_error_law() {
    let flat = pipe1(
        Observable::<Vec<i32>>::throw(test_error()),
        &op(|s: Observable<Vec<i32>>| s.flatten_iter()),
    );
    assert_eq!(collect(&flat), (vec![], Some(test_error())));
}

#[test]
fn timed_pipeline_doubles_three_ticks_within_bounds() {
    let pipeline = pipe2(
        interval(Duration::from_millis(10)),
        &op(|s: Observable<u64>| s.take(3)),
        &op(|s: Observable<u64>| s.map(|i| i * 2)),
    );

    let start = Instant::now();
    let (values, error) = collect(&pipeline);
    let elapsed = start.elapsed();

    assert_eq!(values, vec![0, 2, 4]);
    assert!(error.is_none());
    assert!(elapsed >= Duration::from_millis(25));
    assert!(elapsed < Duration::from_secs(2));
}

#[test]
fn publish_subject_fan_out_with_a_late_subscriber() {
    let subject = PublishSubject::<i32>::new();

    let a = RecordingObserver::new();
    let b = RecordingObserver::new();
    subject.subscribe(a.clone());
    subject.subscribe(b.clone());

    subject.next(1);

    let c = RecordingObserver::new();
    subject.subscribe(c.clone());

    subject.next(2);
    subject.complete();

    let expected_full = vec![
        Notification::Next(1),
        Notification::Next(2),
        Notification::Complete,
    ];
    assert_eq!(a.notifications(), expected_full);
    assert_eq!(b.notifications(), expected_full);
    assert_eq!(
        c.notifications(),
        vec![Notification::Next(2), Notification::Complete]
    );
}

#[test]
fn a_realistic_pipeline_composes_across_crates() {
    // Scan keeps a running total, distinct_until_changed drops plateaus,
    // buffer_count batches, and collect materialises
    let totals = Observable::just(vec![1, 0, 2, 0, 3])
        .scan(0, |acc, v| acc + v)
        .distinct_until_changed()
        .buffer_count(2);

    let (batches, error) = collect(&totals);
    assert_eq!(batches, vec![vec![1, 3], vec![6]]);
    assert!(error.is_none());
}

#[test]
fn recovery_and_retry_compose() {
    let flaky = concat(vec![
        Observable::just(vec![1]),
        Observable::throw(test_error()),
    ]);
    let resilient = flaky.retry(1).catch(|_e| Observable::just(vec![99]));

    // Two attempts (1, then 1 again), then the fallback value
    assert_eq!(collect(&resilient), (vec![1, 1, 99], None));
}

#[test]
fn share_multicasts_a_timed_source() {
    let ticks = interval(Duration::from_millis(15)).take(3).share();

    let first = RecordingObserver::new();
    let second = RecordingObserver::new();
    ticks.subscribe(first.clone());
    ticks.subscribe(second.clone());

    assert!(first.wait_for_terminal(Duration::from_secs(2)));
    assert!(second.wait_for_terminal(Duration::from_secs(2)));
    assert_eq!(first.values(), vec![0, 1, 2]);
    assert_eq!(second.values(), vec![0, 1, 2]);
}
