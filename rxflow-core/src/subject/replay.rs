// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast subject replaying a bounded window of past values.

use super::{Latch, Subject, SubjectCore, SubjectEvent};
use crate::context::Context;
use crate::error::FlowError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscription::Teardown;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Window<T> {
    entries: VecDeque<(Instant, T)>,
    capacity: usize,
    max_age: Option<Duration>,
}

impl<T> Window<T> {
    fn prune(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        if let Some(max_age) = self.max_age {
            let now = Instant::now();
            while self
                .entries
                .front()
                .is_some_and(|(at, _)| now.duration_since(*at) > max_age)
            {
                self.entries.pop_front();
            }
        }
    }
}

/// A subject that replays its retained window to every new subscriber.
///
/// The window is bounded by a value count and optionally by age; expired
/// entries are evicted on delivery and before each replay. After a terminal
/// has latched, a new subscriber receives the remaining window followed by
/// the terminal.
///
/// # Example
///
/// ```
/// use rxflow_core::{observer, ReplaySubject, Subject};
///
/// let subject = ReplaySubject::with_capacity(2);
/// subject.next(1);
/// subject.next(2);
/// subject.next(3);
///
/// let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// subject.subscribe(observer::from_fns(
///     move |v| sink.lock().push(v),
///     |_e| {},
///     || {},
/// ));
///
/// // Only the last two fit the window
/// assert_eq!(*seen.lock(), vec![2, 3]);
/// ```
pub struct ReplaySubject<T: Clone + Send + 'static> {
    core: Arc<SubjectCore<T>>,
    window: Arc<Mutex<Window<T>>>,
}

impl<T: Clone + Send + 'static> ReplaySubject<T> {
    /// Creates a subject retaining at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a replay window must hold at least one
    /// value.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::bounded(capacity, None)
    }

    /// Creates a subject retaining at most `capacity` values no older than
    /// `max_age`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity_and_age(capacity: usize, max_age: Duration) -> Self {
        Self::bounded(capacity, Some(max_age))
    }

    fn bounded(capacity: usize, max_age: Option<Duration>) -> Self {
        assert!(capacity > 0, "replay capacity must be positive");
        let window = Arc::new(Mutex::new(Window {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            max_age,
        }));
        let retained = window.clone();
        // The window fills at delivery time so replay order matches the
        // fan-out order exactly, including deferred emissions.
        let core = SubjectCore::with_next_hook(Some(Box::new(move |value: &T| {
            let mut window = retained.lock();
            window.entries.push_back((Instant::now(), value.clone()));
            window.prune();
        })));
        Self { core, window }
    }

    /// Appends to the window and fans the value out. Dropped once latched.
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

    fn window_snapshot(&self) -> Vec<T> {
        let mut window = self.window.lock();
        window.prune();
        window.entries.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<T: Clone + Send + 'static> Subject<T> for ReplaySubject<T> {
    fn observable(&self) -> Observable<T> {
        let this = self.clone();
        Observable::new_unsafe(move |subscriber| {
            let _ordered = this.core.lock_emissions();
            let latch = this.core.latch();
            if matches!(latch, Latch::Open) {
                SubjectCore::register(&this.core, subscriber);
            }
            for value in this.window_snapshot() {
                subscriber.next(value);
            }
            match latch {
                Latch::Errored(e) => subscriber.error(e),
                Latch::Completed => subscriber.complete(),
                Latch::Open => {}
            }
            Teardown::none()
        })
    }
}

impl<T: Clone + Send + 'static> Observer<T> for ReplaySubject<T> {
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

impl<T: Clone + Send + 'static> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            window: self.window.clone(),
        }
    }
}
