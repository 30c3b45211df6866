// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the rxflow workspace.
//!
//! - [`RecordingObserver`] — records notifications and blocks on terminals
//! - [`manual_source`] — a push-style producer for driving operators by hand
//! - [`test_error`] — a synthetic, comparable stream failure
//! - [`test_data`] — shared fixture values

pub mod test_data;

mod recording;

pub use recording::RecordingObserver;

use rxflow_core::{FlowError, Observable, PublishSubject, Subject};

/// A synthetic failure with a stable message, comparable across
/// notifications via `Notification`'s message-based equality.
#[must_use]
pub fn test_error() -> FlowError {
    FlowError::stream_error("synthetic failure")
}

/// A push-style test producer: push through the subject, observe through
/// the observable.
///
/// # Example
///
/// ```
/// use rxflow_test_utils::{manual_source, RecordingObserver};
///
/// let (push, source) = manual_source::<i32>();
/// let recorder = RecordingObserver::new();
/// source.subscribe(recorder.clone());
///
/// push.next(7);
/// push.complete();
///
/// assert_eq!(recorder.values(), vec![7]);
/// assert!(recorder.is_completed());
/// ```
#[must_use]
pub fn manual_source<T: Clone + Send + 'static>() -> (PublishSubject<T>, Observable<T>) {
    let subject = PublishSubject::new();
    let observable = subject.observable();
    (subject, observable)
}
