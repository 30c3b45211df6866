// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::Observable;
use rxflow_exec::collect;
use rxflow_ops::zip;
use rxflow_test_utils::{manual_source, test_error, RecordingObserver};

#[test]
fn pairs_values_in_lockstep() {
    let (push_a, a) = manual_source::<i32>();
    let (push_b, b) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    zip(vec![a, b]).subscribe(recorder.clone());

    push_a.next(1);
    push_a.next(2);
    assert!(recorder.is_empty());

    push_b.next(10);
    assert_eq!(recorder.values(), vec![vec![1, 10]]);

    push_b.next(20);
    assert_eq!(recorder.values(), vec![vec![1, 10], vec![2, 20]]);
}

#[test]
fn completes_when_a_finished_sources_queue_is_drained() {
    let (push_a, a) = manual_source::<i32>();
    let (push_b, b) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    zip(vec![a, b]).subscribe(recorder.clone());

    push_a.next(1);
    push_a.complete();
    // a is done but its value is still queued
    assert!(!recorder.is_terminated());

    push_b.next(10);
    assert_eq!(recorder.values(), vec![vec![1, 10]]);
    assert!(recorder.is_completed());
}

#[test]
fn completes_immediately_when_a_source_finishes_empty() {
    let (_push_a, a) = manual_source::<i32>();
    let (push_b, b) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    zip(vec![a, b]).subscribe(recorder.clone());

    push_b.complete();
    assert!(recorder.is_completed());
    assert!(recorder.values().is_empty());
}

#[test]
fn zip_with_synchronous_sources() {
    let zipped = zip(vec![
        Observable::just(vec![1, 2, 3]),
        Observable::just(vec![10, 20]),
    ]);
    let (values, error) = collect(&zipped);
    assert_eq!(values, vec![vec![1, 10], vec![2, 20]]);
    assert!(error.is_none());
}

#[test]
fn forwards_errors_eagerly() {
    let (push_a, a) = manual_source::<i32>();
    let (_push_b, b) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    zip(vec![a, b]).subscribe(recorder.clone());

    push_a.error(test_error());
    assert!(recorder.error().is_some());
}

#[test]
#[should_panic(expected = "zip requires at least one source")]
fn zip_of_nothing_is_rejected_at_composition_time() {
    let _ = zip(Vec::<Observable<i32>>::new());
}
