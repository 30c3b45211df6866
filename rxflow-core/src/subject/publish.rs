// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, unbuffered multicast subject.

use super::{Latch, Subject, SubjectCore, SubjectEvent};
use crate::context::Context;
use crate::error::FlowError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscription::Teardown;
use std::sync::Arc;

/// A hot subject that fans each value out to all current subscribers.
///
/// Holds no values: late subscribers only see events pushed after they
/// attached. Once latched with an error or completion, new subscribers
/// immediately receive that terminal.
///
/// # Example
///
/// ```
/// use rxflow_core::{observer, PublishSubject, Subject};
///
/// let subject = PublishSubject::<i32>::new();
///
/// let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// subject.subscribe(observer::from_fns(
///     move |v| sink.lock().push(v),
///     |_e| {},
///     || {},
/// ));
///
/// subject.next(1);
/// subject.next(2);
/// subject.complete();
///
/// assert_eq!(*seen.lock(), vec![1, 2]);
/// ```
pub struct PublishSubject<T: Clone + Send + 'static> {
    core: Arc<SubjectCore<T>>,
}

impl<T: Clone + Send + 'static> PublishSubject<T> {
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SubjectCore::new(),
        }
    }

    /// Pushes a value to every current subscriber. Dropped once latched.
    pub fn next(&self, value: T) {
        self.core.emit(SubjectEvent::Next(value));
    }

    /// Latches the subject with an error and notifies all subscribers.
    pub fn error(&self, error: FlowError) {
        self.core.emit(SubjectEvent::Error(error));
    }

    /// Latches the subject completed and notifies all subscribers.
    pub fn complete(&self) {
        self.core.emit(SubjectEvent::Complete);
    }

    /// Returns `true` once the subject has latched a terminal.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.core.subscriber_count()
    }
}

impl<T: Clone + Send + 'static> Subject<T> for PublishSubject<T> {
    fn observable(&self) -> Observable<T> {
        let core = self.core.clone();
        // Delivery ordering comes from the subject's own fan-out queue, so
        // the observable itself can skip the serialisation layer.
        Observable::new_unsafe(move |subscriber| {
            let _ordered = core.lock_emissions();
            match core.latch() {
                Latch::Errored(e) => subscriber.error(e),
                Latch::Completed => subscriber.complete(),
                Latch::Open => SubjectCore::register(&core, subscriber),
            }
            Teardown::none()
        })
    }
}

impl<T: Clone + Send + 'static> Observer<T> for PublishSubject<T> {
    fn on_next(&self, _ctx: &Context, value: T) {
        self.next(value);
    }

    fn on_error(&self, _ctx: &Context, error: FlowError) {
        self.error(error);
    }

    fn on_complete(&self, _ctx: &Context) {
        self.complete();
    }
}

impl<T: Clone + Send + 'static> Default for PublishSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for PublishSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}
