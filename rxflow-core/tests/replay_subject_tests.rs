// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{Notification, ReplaySubject, Subject};
use rxflow_test_utils::{test_error, RecordingObserver};
use std::thread;
use std::time::Duration;

#[test]
fn replays_the_window_to_late_subscribers() {
    let subject = ReplaySubject::with_capacity(2);
    subject.next(1);
    subject.next(2);
    subject.next(3);

    let late = RecordingObserver::new();
    subject.subscribe(late.clone());
    subject.next(4);

    assert_eq!(late.values(), vec![2, 3, 4]);
}

#[test]
fn replays_less_than_capacity_when_fewer_values_were_pushed() {
    let subject = ReplaySubject::with_capacity(10);
    subject.next(1);

    let late = RecordingObserver::new();
    subject.subscribe(late.clone());

    assert_eq!(late.values(), vec![1]);
}

#[test]
fn age_bound_evicts_expired_values() {
    let subject = ReplaySubject::with_capacity_and_age(10, Duration::from_millis(40));
    subject.next(1);
    thread::sleep(Duration::from_millis(80));
    subject.next(2);

    let late = RecordingObserver::new();
    subject.subscribe(late.clone());

    assert_eq!(late.values(), vec![2]);
}

#[test]
fn latched_subject_replays_window_then_terminal() {
    let subject = ReplaySubject::with_capacity(2);
    subject.next(1);
    subject.next(2);
    subject.complete();

    let late = RecordingObserver::new();
    subject.subscribe(late.clone());

    assert_eq!(
        late.notifications(),
        vec![
            Notification::Next(1),
            Notification::Next(2),
            Notification::Complete
        ]
    );
}

#[test]
fn errored_subject_replays_window_then_error() {
    let subject = ReplaySubject::with_capacity(4);
    subject.next(1);
    subject.error(test_error());

    let late = RecordingObserver::new();
    subject.subscribe(late.clone());

    assert_eq!(late.values(), vec![1]);
    assert!(late.error().is_some());
}

#[test]
#[should_panic(expected = "replay capacity must be positive")]
fn zero_capacity_is_rejected_at_construction() {
    let _ = ReplaySubject::<i32>::with_capacity(0);
}

#[test]
fn live_subscribers_receive_subsequent_events_once() {
    let subject = ReplaySubject::with_capacity(3);
    let recorder = RecordingObserver::new();
    subject.subscribe(recorder.clone());

    subject.next(1);
    subject.next(2);

    assert_eq!(recorder.values(), vec![1, 2]);
}
