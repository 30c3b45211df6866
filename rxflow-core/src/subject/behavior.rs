// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast subject that retains the latest value.

use super::{Latch, Subject, SubjectCore, SubjectEvent};
use crate::context::Context;
use crate::error::FlowError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscription::Teardown;
use parking_lot::Mutex;
use std::sync::Arc;

/// A subject seeded with an initial value that always holds the latest one.
///
/// Every new subscriber immediately receives the current value, then the
/// live sequence. After a terminal has latched, a new subscriber receives
/// the retained value (the seed, if nothing was ever pushed) followed by the
/// terminal.
///
/// # Example
///
/// ```
/// use rxflow_core::BehaviorSubject;
///
/// let subject = BehaviorSubject::new(0);
/// subject.next(1);
/// subject.next(2);
///
/// assert_eq!(subject.value(), 2);
/// ```
pub struct BehaviorSubject<T: Clone + Send + 'static> {
    core: Arc<SubjectCore<T>>,
    latest: Arc<Mutex<T>>,
}

impl<T: Clone + Send + 'static> BehaviorSubject<T> {
    /// Creates a subject holding `initial` as its current value.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let latest = Arc::new(Mutex::new(initial));
        let retained = latest.clone();
        // The retained value is replaced at delivery time, so it stays
        // totally ordered with the fan-out even for deferred emissions.
        let core = SubjectCore::with_next_hook(Some(Box::new(move |value: &T| {
            *retained.lock() = value.clone();
        })));
        Self { core, latest }
    }

    /// The value a new subscriber would receive right now.
    #[must_use]
    pub fn value(&self) -> T {
        self.latest.lock().clone()
    }

    /// Replaces the retained value and fans it out. Dropped once latched.
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

impl<T: Clone + Send + 'static> Subject<T> for BehaviorSubject<T> {
    fn observable(&self) -> Observable<T> {
        let core = self.core.clone();
        let latest = self.latest.clone();
        Observable::new_unsafe(move |subscriber| {
            let _ordered = core.lock_emissions();
            let current = latest.lock().clone();
            match core.latch() {
                Latch::Errored(e) => {
                    subscriber.next(current);
                    subscriber.error(e);
                }
                Latch::Completed => {
                    subscriber.next(current);
                    subscriber.complete();
                }
                Latch::Open => {
                    SubjectCore::register(&core, subscriber);
                    subscriber.next(current);
                }
            }
            Teardown::none()
        })
    }
}

impl<T: Clone + Send + 'static> Observer<T> for BehaviorSubject<T> {
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

impl<T: Clone + Send + 'static> Clone for BehaviorSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            latest: self.latest.clone(),
        }
    }
}
