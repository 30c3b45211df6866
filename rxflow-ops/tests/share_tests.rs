// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{Observable, Subscriber, Teardown};
use rxflow_ops::ShareExt;
use rxflow_test_utils::{manual_source, RecordingObserver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Wraps a manual source and counts how often the upstream is subscribed
fn counted_source() -> (
    rxflow_core::PublishSubject<i32>,
    Observable<i32>,
    Arc<AtomicUsize>,
) {
    let (push, source) = manual_source::<i32>();
    let connects = Arc::new(AtomicUsize::new(0));
    let counter = connects.clone();
    let counting = Observable::new_unsafe(move |subscriber: &Subscriber<i32>| {
        counter.fetch_add(1, Ordering::SeqCst);
        let upstream =
            source.subscribe_with_context(subscriber.context().clone(), subscriber.clone());
        Teardown::from(upstream)
    });
    (push, counting, connects)
}

#[test]
fn all_subscribers_share_one_upstream_connection() {
    let (push, source, connects) = counted_source();
    let shared = source.share();

    let first = RecordingObserver::new();
    let second = RecordingObserver::new();
    let sub_a = shared.subscribe(first.clone());
    let sub_b = shared.subscribe(second.clone());

    push.next(5);

    assert_eq!(connects.load(Ordering::SeqCst), 1);
    assert_eq!(first.values(), vec![5]);
    assert_eq!(second.values(), vec![5]);

    sub_a.unsubscribe();
    sub_b.unsubscribe();
}

#[test]
fn the_connection_is_dropped_with_the_last_subscriber() {
    let (push, source, connects) = counted_source();
    let shared = source.share();

    let sub_a = shared.subscribe(RecordingObserver::<i32>::new());
    let sub_b = shared.subscribe(RecordingObserver::<i32>::new());
    assert_eq!(push.subscriber_count(), 1);

    sub_a.unsubscribe();
    assert_eq!(push.subscriber_count(), 1);

    sub_b.unsubscribe();
    // Refcount hit zero: upstream released
    assert_eq!(push.subscriber_count(), 0);
    assert_eq!(connects.load(Ordering::SeqCst), 1);
}

#[test]
fn a_new_subscriber_after_shutdown_reconnects() {
    let (_push, source, connects) = counted_source();
    let shared = source.share();

    let sub_a = shared.subscribe(RecordingObserver::<i32>::new());
    sub_a.unsubscribe();

    let sub_b = shared.subscribe(RecordingObserver::<i32>::new());
    assert_eq!(connects.load(Ordering::SeqCst), 2);
    sub_b.unsubscribe();
}

#[test]
fn late_subscribers_to_share_miss_earlier_values() {
    let (push, source, _) = counted_source();
    let shared = source.share();

    let early = RecordingObserver::new();
    let _sub_a = shared.subscribe(early.clone());
    push.next(1);

    let late = RecordingObserver::new();
    let _sub_b = shared.subscribe(late.clone());
    push.next(2);

    assert_eq!(early.values(), vec![1, 2]);
    assert_eq!(late.values(), vec![2]);
}

#[test]
fn share_replay_hands_the_window_to_late_subscribers() {
    let (push, source, _) = counted_source();
    let shared = source.share_replay(2);

    let early = RecordingObserver::new();
    let _sub_a = shared.subscribe(early.clone());
    push.next(1);
    push.next(2);
    push.next(3);

    let late = RecordingObserver::new();
    let _sub_b = shared.subscribe(late.clone());

    assert_eq!(late.values(), vec![2, 3]);
}

#[test]
fn terminal_from_upstream_reaches_every_subscriber() {
    let (push, source, _) = counted_source();
    let shared = source.share();

    let first = RecordingObserver::new();
    let second = RecordingObserver::new();
    let _sub_a = shared.subscribe(first.clone());
    let _sub_b = shared.subscribe(second.clone());

    push.next(1);
    push.complete();

    assert!(first.is_completed());
    assert!(second.is_completed());
}
