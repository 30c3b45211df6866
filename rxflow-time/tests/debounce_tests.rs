// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_time::DebounceExt;
use rxflow_test_utils::{manual_source, test_error, RecordingObserver};
use std::thread;
use std::time::Duration;

#[test]
fn only_the_last_value_of_a_burst_survives() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.debounce(Duration::from_millis(50)).subscribe(recorder.clone());

    push.next(1);
    push.next(2);
    push.next(3);

    thread::sleep(Duration::from_millis(150));
    assert_eq!(recorder.values(), vec![3]);
}

#[test]
fn spaced_values_all_pass() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.debounce(Duration::from_millis(30)).subscribe(recorder.clone());

    push.next(1);
    thread::sleep(Duration::from_millis(90));
    push.next(2);
    thread::sleep(Duration::from_millis(90));

    assert_eq!(recorder.values(), vec![1, 2]);
}

#[test]
fn a_new_value_restarts_the_quiet_period() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.debounce(Duration::from_millis(80)).subscribe(recorder.clone());

    push.next(1);
    thread::sleep(Duration::from_millis(40));
    // Still inside the quiet period: 1 is replaced, timer restarts
    push.next(2);
    thread::sleep(Duration::from_millis(40));
    assert!(recorder.is_empty());

    thread::sleep(Duration::from_millis(120));
    assert_eq!(recorder.values(), vec![2]);
}

#[test]
fn completion_flushes_the_pending_value() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.debounce(Duration::from_millis(500)).subscribe(recorder.clone());

    push.next(7);
    push.complete();

    // The pending value is flushed right away, not after 500ms
    assert!(recorder.wait_for_terminal(Duration::from_millis(250)));
    assert_eq!(recorder.values(), vec![7]);
    assert!(recorder.is_completed());
}

#[test]
fn errors_discard_the_pending_value() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.debounce(Duration::from_millis(500)).subscribe(recorder.clone());

    push.next(7);
    push.error(test_error());

    assert!(recorder.wait_for_terminal(Duration::from_millis(250)));
    assert!(recorder.values().is_empty());
    assert!(recorder.error().is_some());
}

#[test]
fn unsubscribing_cancels_the_pending_timer() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    let subscription = source
        .debounce(Duration::from_millis(40))
        .subscribe(recorder.clone());

    push.next(1);
    subscription.unsubscribe();

    thread::sleep(Duration::from_millis(120));
    assert!(recorder.is_empty());
}
