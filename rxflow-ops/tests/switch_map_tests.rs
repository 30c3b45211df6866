// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{Observable, PublishSubject, Subject};
use rxflow_exec::collect;
use rxflow_ops::SwitchMapExt;
use rxflow_test_utils::{manual_source, RecordingObserver};

#[test]
fn mirrors_the_most_recent_inner_stream() {
    let (push_outer, outer) = manual_source::<usize>();
    let inner_a = PublishSubject::<&'static str>::new();
    let inner_b = PublishSubject::<&'static str>::new();

    let sources = vec![inner_a.observable(), inner_b.observable()];
    let recorder = RecordingObserver::new();
    outer
        .switch_map(move |index| sources[index].clone())
        .subscribe(recorder.clone());

    push_outer.next(0);
    inner_a.next("a1");

    push_outer.next(1);
    // The first inner was unsubscribed by the switch
    assert_eq!(inner_a.subscriber_count(), 0);
    inner_a.next("a2");
    inner_b.next("b1");

    assert_eq!(recorder.values(), vec!["a1", "b1"]);
}

#[test]
fn outer_completion_waits_for_the_last_inner() {
    let (push_outer, outer) = manual_source::<i32>();
    let (push_inner, inner) = manual_source::<i32>();

    let recorder = RecordingObserver::new();
    outer
        .switch_map(move |_v| inner.clone())
        .subscribe(recorder.clone());

    push_outer.next(1);
    push_outer.complete();
    assert!(!recorder.is_terminated());

    push_inner.next(5);
    push_inner.complete();
    assert_eq!(recorder.values(), vec![5]);
    assert!(recorder.is_completed());
}

#[test]
fn completes_directly_when_no_inner_is_active() {
    let flat = Observable::<i32>::empty().switch_map(|v| Observable::just(vec![v]));
    assert_eq!(collect(&flat), (vec![], None));
}

#[test]
fn synchronous_inners_flatten_in_order() {
    let flat = Observable::just(vec![1, 2]).switch_map(|v| Observable::just(vec![v * 10]));
    assert_eq!(collect(&flat), (vec![10, 20], None));
}
