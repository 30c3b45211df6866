// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::Observable;
use rxflow_exec::collect;
use rxflow_ops::{merge, MergeWithExt};
use rxflow_test_utils::{manual_source, test_error, RecordingObserver};

#[test]
fn merges_synchronous_sources_completely() {
    let merged = merge(vec![
        Observable::just(vec![1, 2]),
        Observable::just(vec![3, 4]),
    ]);
    let (mut values, error) = collect(&merged);
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3, 4]);
    assert!(error.is_none());
}

#[test]
fn completes_only_when_every_source_completed() {
    let (push_a, a) = manual_source::<i32>();
    let (push_b, b) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    merge(vec![a, b]).subscribe(recorder.clone());

    push_a.next(1);
    push_a.complete();
    push_b.next(2);
    assert!(!recorder.is_terminated());

    push_b.complete();
    assert!(recorder.is_completed());
    assert_eq!(recorder.values(), vec![1, 2]);
}

#[test]
fn fails_eagerly_on_the_first_source_error() {
    let (push_a, a) = manual_source::<i32>();
    let (push_b, b) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    merge(vec![a, b]).subscribe(recorder.clone());

    push_a.next(1);
    push_b.error(test_error());
    push_a.next(2);

    assert_eq!(recorder.values(), vec![1]);
    assert!(recorder.error().is_some());
    // The surviving source lost its subscriber when the merge failed
    assert_eq!(push_a.subscriber_count(), 0);
}

#[test]
fn merge_of_no_sources_completes_immediately() {
    let merged = merge(Vec::<Observable<i32>>::new());
    assert_eq!(collect(&merged), (vec![], None));
}

#[test]
fn merge_with_is_the_binary_form() {
    let merged = Observable::just(vec![1]).merge_with(Observable::just(vec![2]));
    let (mut values, _) = collect(&merged);
    values.sort_unstable();
    assert_eq!(values, vec![1, 2]);
}

#[test]
fn intra_source_order_is_preserved() {
    let (push_a, a) = manual_source::<i32>();
    let (push_b, b) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    merge(vec![a, b]).subscribe(recorder.clone());

    push_a.next(1);
    push_b.next(10);
    push_a.next(2);
    push_b.next(20);
    push_a.complete();
    push_b.complete();

    let values = recorder.values();
    let from_a: Vec<i32> = values.iter().copied().filter(|v| *v < 10).collect();
    let from_b: Vec<i32> = values.iter().copied().filter(|v| *v >= 10).collect();
    assert_eq!(from_a, vec![1, 2]);
    assert_eq!(from_b, vec![10, 20]);
}
