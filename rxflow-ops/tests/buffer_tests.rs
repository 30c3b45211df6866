// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rxflow_core::Observable;
use rxflow_exec::collect;
use rxflow_ops::BufferExt;
use rxflow_test_utils::{manual_source, test_error, RecordingObserver};

#[test]
fn buffer_count_batches_exactly() {
    let batches = Observable::just(vec![1, 2, 3, 4, 5, 6]).buffer_count(2);
    assert_eq!(
        collect(&batches).0,
        vec![vec![1, 2], vec![3, 4], vec![5, 6]]
    );
}

#[test]
fn buffer_count_flushes_the_partial_batch_on_completion() {
    let batches = Observable::just(vec![1, 2, 3, 4, 5]).buffer_count(2);
    assert_eq!(
        collect(&batches).0,
        vec![vec![1, 2], vec![3, 4], vec![5]]
    );
}

#[test]
fn buffer_count_on_empty_source_emits_no_batches() {
    let batches = Observable::<i32>::empty().buffer_count(3);
    assert_eq!(collect(&batches), (vec![], None));
}

#[test]
#[should_panic(expected = "buffer_count requires a positive batch size")]
fn buffer_count_rejects_zero_at_composition_time() {
    let _ = Observable::<i32>::never().buffer_count(0);
}

#[test]
fn buffer_when_flushes_on_notifier_values() {
    let (push, source) = manual_source::<i32>();
    let (flush_push, flush) = manual_source::<()>();

    let recorder = RecordingObserver::new();
    source.buffer_when(flush).subscribe(recorder.clone());

    push.next(1);
    push.next(2);
    flush_push.next(());
    push.next(3);
    flush_push.next(());
    flush_push.next(());
    push.complete();

    assert_eq!(
        recorder.values(),
        vec![vec![1, 2], vec![3], vec![]]
    );
    assert!(recorder.is_completed());
}

#[test]
fn buffer_when_flushes_trailing_values_on_completion() {
    let (push, source) = manual_source::<i32>();
    let (_flush_push, flush) = manual_source::<()>();

    let recorder = RecordingObserver::new();
    source.buffer_when(flush).subscribe(recorder.clone());

    push.next(7);
    push.complete();

    assert_eq!(recorder.values(), vec![vec![7]]);
    assert!(recorder.is_completed());
}

#[test]
fn buffer_count_drops_the_batch_on_error() {
    let (push, source) = manual_source::<i32>();
    let recorder = RecordingObserver::new();
    source.buffer_count(10).subscribe(recorder.clone());

    push.next(1);
    push.error(test_error());

    assert!(recorder.values().is_empty());
    assert!(recorder.error().is_some());
}
