// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast subject emitting only its final value.

use super::{Latch, Subject, SubjectCore, SubjectEvent};
use crate::context::Context;
use crate::error::FlowError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscription::Teardown;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A subject that withholds everything until completion.
///
/// Values overwrite each other; nothing is delivered while the subject is
/// open. On `complete`, the last value seen (if any) followed by `Complete`
/// is delivered to every subscriber — past and future alike. On `error`,
/// only the error is delivered.
pub struct AsyncSubject<T: Clone + Send + 'static> {
    core: Arc<SubjectCore<T>>,
    last: Arc<Mutex<Option<T>>>,
    // First terminal call wins; the flag keeps a racing complete/complete
    // pair from queueing the final value twice.
    settled: Arc<AtomicBool>,
}

impl<T: Clone + Send + 'static> AsyncSubject<T> {
    /// Creates an open subject with no retained value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SubjectCore::new(),
            last: Arc::new(Mutex::new(None)),
            settled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replaces the retained value. Nothing is delivered yet.
    pub fn next(&self, value: T) {
        let _ordered = self.core.lock_emissions();
        if self.settled.load(Ordering::Acquire) || self.core.is_closed() {
            return;
        }
        *self.last.lock() = Some(value);
    }

    /// Latches with an error; the retained value is discarded from the
    /// subscribers' point of view.
    pub fn error(&self, error: FlowError) {
        if self.settled.swap(true, Ordering::AcqRel) {
            return;
        }
        self.core.emit(SubjectEvent::Error(error));
    }

    /// Latches completed and delivers the retained value (if any) followed
    /// by completion to every current subscriber.
    pub fn complete(&self) {
        if self.settled.swap(true, Ordering::AcqRel) {
            return;
        }
        let last = self.last.lock().clone();
        if let Some(value) = last {
            self.core.emit(SubjectEvent::Next(value));
        }
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

impl<T: Clone + Send + 'static> Subject<T> for AsyncSubject<T> {
    fn observable(&self) -> Observable<T> {
        let core = self.core.clone();
        let last = self.last.clone();
        Observable::new_unsafe(move |subscriber| {
            let _ordered = core.lock_emissions();
            match core.latch() {
                Latch::Errored(e) => subscriber.error(e),
                Latch::Completed => {
                    if let Some(value) = last.lock().clone() {
                        subscriber.next(value);
                    }
                    subscriber.complete();
                }
                Latch::Open => SubjectCore::register(&core, subscriber),
            }
            Teardown::none()
        })
    }
}

impl<T: Clone + Send + 'static> Observer<T> for AsyncSubject<T> {
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

impl<T: Clone + Send + 'static> Default for AsyncSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for AsyncSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            last: self.last.clone(),
            settled: self.settled.clone(),
        }
    }
}
