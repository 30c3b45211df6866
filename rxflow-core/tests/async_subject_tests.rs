// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::{AsyncSubject, Notification, Subject};
use rxflow_test_utils::{test_error, RecordingObserver};

#[test]
fn nothing_is_delivered_before_completion() {
    let subject = AsyncSubject::<i32>::new();
    let recorder = RecordingObserver::new();
    subject.subscribe(recorder.clone());

    subject.next(1);
    subject.next(2);

    assert!(recorder.is_empty());
}

#[test]
fn completion_delivers_only_the_last_value() {
    let subject = AsyncSubject::<i32>::new();
    let recorder = RecordingObserver::new();
    subject.subscribe(recorder.clone());

    subject.next(1);
    subject.next(2);
    subject.next(3);
    subject.complete();

    assert_eq!(
        recorder.notifications(),
        vec![Notification::Next(3), Notification::Complete]
    );
}

#[test]
fn completion_without_values_just_completes() {
    let subject = AsyncSubject::<i32>::new();
    let recorder = RecordingObserver::new();
    subject.subscribe(recorder.clone());

    subject.complete();

    assert_eq!(recorder.notifications(), vec![Notification::Complete]);
}

#[test]
fn late_subscribers_receive_the_final_value_too() {
    let subject = AsyncSubject::<i32>::new();
    subject.next(41);
    subject.next(42);
    subject.complete();

    let late = RecordingObserver::new();
    subject.subscribe(late.clone());

    assert_eq!(
        late.notifications(),
        vec![Notification::Next(42), Notification::Complete]
    );
}

#[test]
fn error_discards_the_retained_value() {
    let subject = AsyncSubject::<i32>::new();
    let recorder = RecordingObserver::new();
    subject.subscribe(recorder.clone());

    subject.next(1);
    subject.error(test_error());

    assert!(recorder.values().is_empty());
    assert!(recorder.error().is_some());

    let late = RecordingObserver::new();
    subject.subscribe(late.clone());
    assert!(late.values().is_empty());
    assert!(late.error().is_some());
}
