// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::Observable;
use rxflow_exec::collect;
use rxflow_time::ThrottleExt;
use rxflow_test_utils::{manual_source, RecordingObserver};
use std::thread;
use std::time::Duration;

#[test]
fn the_first_value_of_each_window_passes() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.throttle(Duration::from_millis(60)).subscribe(recorder.clone());

    push.next(1);
    push.next(2);
    push.next(3);

    thread::sleep(Duration::from_millis(100));
    push.next(4);
    push.next(5);

    assert_eq!(recorder.values(), vec![1, 4]);
}

#[test]
fn a_burst_yields_exactly_one_value() {
    let throttled = Observable::just(vec![1, 2, 3, 4]).throttle(Duration::from_secs(1));
    assert_eq!(collect(&throttled), (vec![1], None));
}

#[test]
fn terminals_are_not_throttled() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.throttle(Duration::from_secs(5)).subscribe(recorder.clone());

    push.next(1);
    push.complete();

    assert_eq!(recorder.values(), vec![1]);
    assert!(recorder.is_completed());
}
