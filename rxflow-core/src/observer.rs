// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The consumer side of a stream.
//!
//! An [`Observer`] receives notifications from the producer it subscribed to.
//! User code usually builds one from closures with [`from_fns`] or
//! [`from_notifications`]; operators build forwarding observers the same way.
//!
//! Every observer handed to `subscribe` is wrapped in an internal sink that
//! enforces the observer state machine: Active, then at most one of Errored /
//! Completed, or Unsubscribed. After a terminal or an unsubscribe, every
//! callback is a silent no-op. For safe observables the sink additionally
//! serialises callbacks behind a reentrant guard, so callback moments are
//! totally ordered even when the producer emits from several threads.

use crate::context::Context;
use crate::error::FlowError;
use crate::notification::Notification;
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::atomic::{AtomicU8, Ordering};

/// A consumer of notifications.
///
/// Callbacks take `&self`: observers are shared between the subscription and
/// the producer (possibly across threads), so implementations use interior
/// mutability for any per-subscription state.
pub trait Observer<T>: Send + Sync {
    /// Called for every value the producer emits.
    fn on_next(&self, ctx: &Context, value: T);

    /// Called at most once when the stream fails.
    fn on_error(&self, ctx: &Context, error: FlowError);

    /// Called at most once when the stream ends normally.
    fn on_complete(&self, ctx: &Context);
}

struct FnCallbacks<N, E, C> {
    next: N,
    error: E,
    complete: C,
}

struct FnObserver<N, E, C> {
    callbacks: Mutex<FnCallbacks<N, E, C>>,
}

impl<T, N, E, C> Observer<T> for FnObserver<N, E, C>
where
    T: Send,
    N: FnMut(T) + Send,
    E: FnMut(FlowError) + Send,
    C: FnMut() + Send,
{
    fn on_next(&self, _ctx: &Context, value: T) {
        (self.callbacks.lock().next)(value);
    }

    fn on_error(&self, _ctx: &Context, error: FlowError) {
        (self.callbacks.lock().error)(error);
    }

    fn on_complete(&self, _ctx: &Context) {
        (self.callbacks.lock().complete)();
    }
}

/// Builds an observer from three plain callbacks.
///
/// # Example
///
/// ```
/// use rxflow_core::{observer, Observable};
///
/// let obs = Observable::just(vec![1, 2, 3]);
/// obs.subscribe(observer::from_fns(
///     |v| println!("next: {v}"),
///     |e| eprintln!("error: {e}"),
///     || println!("done"),
/// ));
/// ```
pub fn from_fns<T, N, E, C>(next: N, error: E, complete: C) -> impl Observer<T>
where
    T: Send,
    N: FnMut(T) + Send,
    E: FnMut(FlowError) + Send,
    C: FnMut() + Send,
{
    FnObserver {
        callbacks: Mutex::new(FnCallbacks {
            next,
            error,
            complete,
        }),
    }
}

struct NotificationObserver<F> {
    callback: Mutex<F>,
}

impl<T, F> Observer<T> for NotificationObserver<F>
where
    T: Send,
    F: FnMut(&Context, Notification<T>) + Send,
{
    fn on_next(&self, ctx: &Context, value: T) {
        (*self.callback.lock())(ctx, Notification::Next(value));
    }

    fn on_error(&self, ctx: &Context, error: FlowError) {
        (*self.callback.lock())(ctx, Notification::Error(error));
    }

    fn on_complete(&self, ctx: &Context) {
        (*self.callback.lock())(ctx, Notification::Complete);
    }
}

/// Builds an observer from a single notification callback.
///
/// The closure receives the delivery context and a [`Notification`]. This is
/// the form operators use internally: per-subscription state lives inside the
/// `FnMut` and needs no further synchronisation, because the sink never runs
/// two callbacks of the same observer concurrently through the same lock.
pub fn from_notifications<T, F>(f: F) -> impl Observer<T>
where
    T: Send,
    F: FnMut(&Context, Notification<T>) + Send,
{
    NotificationObserver {
        callback: Mutex::new(f),
    }
}

/// Observer lifecycle states, as exposed through the subscriber queries.
pub(crate) mod state {
    pub const ACTIVE: u8 = 0;
    pub const ERRORED: u8 = 1;
    pub const COMPLETED: u8 = 2;
    pub const UNSUBSCRIBED: u8 = 3;
}

/// Internal wrapper installing the state machine (and, for safe observables,
/// the serialisation guard) in front of a user observer.
pub(crate) struct Sink<T> {
    observer: Box<dyn Observer<T>>,
    state: AtomicU8,
    // Present for safe observables; reentrant so a callback may feed the
    // same sink again (terminal-after-next within one upstream event).
    guard: Option<ReentrantMutex<()>>,
}

impl<T: Send> Sink<T> {
    pub(crate) fn new(observer: Box<dyn Observer<T>>, serialized: bool) -> Self {
        Self {
            observer,
            state: AtomicU8::new(state::ACTIVE),
            guard: serialized.then(|| ReentrantMutex::new(())),
        }
    }

    pub(crate) fn state(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }

    /// Moves Active to Unsubscribed. Terminal states keep their label so the
    /// `has_errored` / `is_completed` queries survive the teardown.
    pub(crate) fn mark_unsubscribed(&self) {
        let _ = self.state.compare_exchange(
            state::ACTIVE,
            state::UNSUBSCRIBED,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub(crate) fn next(&self, ctx: &Context, value: T) {
        let _serial = self.guard.as_ref().map(ReentrantMutex::lock);
        if self.state.load(Ordering::Acquire) != state::ACTIVE {
            return;
        }
        self.observer.on_next(ctx, value);
    }

    /// Delivers the error if the sink is still active. Returns `true` when
    /// the callback ran, so the caller can close the subscription.
    pub(crate) fn error(&self, ctx: &Context, error: FlowError) -> bool {
        let _serial = self.guard.as_ref().map(ReentrantMutex::lock);
        if self
            .state
            .compare_exchange(
                state::ACTIVE,
                state::ERRORED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return false;
        }
        self.observer.on_error(ctx, error);
        true
    }

    /// Delivers completion if the sink is still active. Returns `true` when
    /// the callback ran, so the caller can close the subscription.
    pub(crate) fn complete(&self, ctx: &Context) -> bool {
        let _serial = self.guard.as_ref().map(ReentrantMutex::lock);
        if self
            .state
            .compare_exchange(
                state::ACTIVE,
                state::COMPLETED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return false;
        }
        self.observer.on_complete(ctx);
        true
    }
}
