// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{
    observer, op, pipe1, pipe2, pipe3, pipe_dyn, Notification, Observable, Operator, Subscriber,
    Teardown,
};
use rxflow_test_utils::RecordingObserver;

// A hand-rolled transformation operator, built straight on the contract:
// subscribe upstream with a forwarding observer, return the upstream link
// as teardown.
fn mapping<I, O, F>(f: F) -> Operator<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> O + Clone + Send + Sync + 'static,
{
    Operator::new(move |source: Observable<I>| {
        let f = f.clone();
        let upstream = source.clone();
        source.derived(move |down: &Subscriber<O>| {
            let down = down.clone();
            let f = f.clone();
            let subscription = upstream.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<I>| match item {
                    Notification::Next(value) => down.next_with_context(ctx, f(value)),
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(subscription)
        })
    })
}

#[test]
fn pipe1_applies_one_stage() {
    let double = mapping(|v: i32| v * 2);
    let recorder = RecordingObserver::new();
    pipe1(Observable::just(vec![1, 2, 3]), &double).subscribe(recorder.clone());

    assert_eq!(recorder.values(), vec![2, 4, 6]);
    assert!(recorder.is_completed());
}

#[test]
fn pipe2_composes_left_to_right() {
    let add_one = mapping(|v: i32| v + 1);
    let stringify = mapping(|v: i32| format!("#{v}"));
    let recorder = RecordingObserver::new();
    pipe2(Observable::just(vec![1, 2]), &add_one, &stringify).subscribe(recorder.clone());

    assert_eq!(recorder.values(), vec!["#2".to_string(), "#3".to_string()]);
}

#[test]
fn pipe3_equals_nested_application() {
    let add_one = mapping(|v: i32| v + 1);
    let double = mapping(|v: i32| v * 2);
    let negate = mapping(|v: i32| -v);

    let piped = RecordingObserver::new();
    pipe3(Observable::just(vec![1, 2, 3]), &add_one, &double, &negate)
        .subscribe(piped.clone());

    let nested = RecordingObserver::new();
    negate
        .apply(double.apply(add_one.apply(Observable::just(vec![1, 2, 3]))))
        .subscribe(nested.clone());

    assert_eq!(piped.values(), nested.values());
    assert_eq!(piped.values(), vec![-4, -6, -8]);
}

#[test]
fn observable_pipe_chains_fluently() {
    let double = mapping(|v: i32| v * 2);
    let recorder = RecordingObserver::new();
    Observable::just(vec![5])
        .pipe(&double)
        .pipe(&double)
        .subscribe(recorder.clone());

    assert_eq!(recorder.values(), vec![20]);
}

#[test]
fn pipe_dyn_folds_a_homogeneous_chain() {
    let stages: Vec<Operator<i32, i32>> = vec![
        mapping(|v: i32| v + 1),
        mapping(|v: i32| v * 3),
        mapping(|v: i32| v - 2),
    ];
    let recorder = RecordingObserver::new();
    pipe_dyn(Observable::just(vec![1, 2]), stages).subscribe(recorder.clone());

    assert_eq!(recorder.values(), vec![4, 7]);
}

#[test]
fn operators_are_reusable_across_sources() {
    let double = mapping(|v: i32| v * 2);

    let first = RecordingObserver::new();
    pipe1(Observable::just(vec![1]), &double).subscribe(first.clone());
    let second = RecordingObserver::new();
    pipe1(Observable::just(vec![10]), &double).subscribe(second.clone());

    assert_eq!(first.values(), vec![2]);
    assert_eq!(second.values(), vec![20]);
}
