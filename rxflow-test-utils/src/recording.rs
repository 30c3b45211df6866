// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! An observer that records everything it sees.

use parking_lot::Mutex;
use rxflow_core::{CancellationToken, Context, FlowError, Notification, Observer};
use std::sync::Arc;
use std::time::Duration;

/// Records every notification for later assertions and lets the test block
/// until the stream terminates.
///
/// Clones share the same log, so one clone can be subscribed while the
/// original keeps asserting.
///
/// # Example
///
/// ```
/// use rxflow_core::Observable;
/// use rxflow_test_utils::RecordingObserver;
///
/// let recorder = RecordingObserver::new();
/// Observable::just(vec![1, 2]).subscribe(recorder.clone());
///
/// assert_eq!(recorder.values(), vec![1, 2]);
/// assert!(recorder.is_completed());
/// ```
pub struct RecordingObserver<T> {
    inner: Arc<RecordingInner<T>>,
}

struct RecordingInner<T> {
    events: Mutex<Vec<Notification<T>>>,
    terminal: CancellationToken,
}

impl<T: Send> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RecordingInner {
                events: Mutex::new(Vec::new()),
                terminal: CancellationToken::new(),
            }),
        }
    }

    /// Every notification received so far, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification<T>>
    where
        T: Clone,
    {
        self.inner.events.lock().clone()
    }

    /// The values received so far, in order.
    #[must_use]
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner
            .events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Notification::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// The terminal error, if the stream failed.
    #[must_use]
    pub fn error(&self) -> Option<FlowError> {
        self.inner
            .events
            .lock()
            .iter()
            .find_map(|event| match event {
                Notification::Error(e) => Some(e.clone()),
                _ => None,
            })
    }

    /// `true` once `Complete` was received.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.inner
            .events
            .lock()
            .iter()
            .any(Notification::is_complete)
    }

    /// `true` once either terminal was received.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.inner.terminal.is_cancelled()
    }

    /// Number of notifications received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.events.lock().is_empty()
    }

    /// Blocks until a terminal arrives. Returns `false` on timeout.
    #[must_use]
    pub fn wait_for_terminal(&self, timeout: Duration) -> bool {
        self.inner.terminal.wait_timeout(timeout)
    }
}

impl<T: Send> Observer<T> for RecordingObserver<T> {
    fn on_next(&self, _ctx: &Context, value: T) {
        self.inner.events.lock().push(Notification::Next(value));
    }

    fn on_error(&self, _ctx: &Context, error: FlowError) {
        self.inner.events.lock().push(Notification::Error(error));
        self.inner.terminal.cancel();
    }

    fn on_complete(&self, _ctx: &Context) {
        self.inner.events.lock().push(Notification::Complete);
        self.inner.terminal.cancel();
    }
}

impl<T: Send> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
