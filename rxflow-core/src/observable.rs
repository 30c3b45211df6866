// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The producer side of a stream.
//!
//! An [`Observable`] is a cold, lazy producer: it holds exactly one
//! on-subscribe thunk and runs it afresh for every `subscribe` call. The
//! thunk receives a [`Subscriber`] — the downstream observer fused with its
//! [`Subscription`] and subscribe-time [`Context`] — and returns a
//! [`Teardown`] that is run once when the subscription closes.
//!
//! ## Safe and unsafe observables
//!
//! [`Observable::new`] builds a *safe* observable: emissions into the
//! subscriber are serialised behind a reentrant guard, so producers may emit
//! from several threads without further coordination. [`Observable::new_unsafe`]
//! skips the guard and is intended for producers that are already
//! single-threaded; the built-in synchronous constructors (`just`, `empty`,
//! `throw`, …) use it. Operators derive their output observable with the same
//! safety flavour as their source.
//!
//! ## Panics in producers
//!
//! A panic that unwinds out of the on-subscribe thunk is intercepted and
//! delivered to the subscriber as an `Error` notification before the
//! subscription closes.

use crate::context::Context;
use crate::error::FlowError;
use crate::observer::{self, state, Observer, Sink};
use crate::subscription::{Subscription, Teardown};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A lazy producer of a finite or infinite notification sequence.
///
/// Cloning an observable clones the handle, not the stream: each clone still
/// materialises independently per `subscribe`.
pub struct Observable<T> {
    producer: Arc<dyn Fn(&Subscriber<T>) -> Teardown + Send + Sync>,
    serialized: bool,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
            serialized: self.serialized,
        }
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Creates a safe observable from an on-subscribe thunk.
    ///
    /// Use this whenever the producer escapes to another thread (timers,
    /// I/O callbacks): concurrent emissions are queued behind an internal
    /// guard and delivered one at a time.
    pub fn new(on_subscribe: impl Fn(&Subscriber<T>) -> Teardown + Send + Sync + 'static) -> Self {
        Self {
            producer: Arc::new(on_subscribe),
            serialized: true,
        }
    }

    /// Creates an unsafe observable from an on-subscribe thunk.
    ///
    /// No serialisation is applied; mutual exclusion of emissions is the
    /// producer's responsibility. This is a performance contract for
    /// producers that are already sequential.
    pub fn new_unsafe(
        on_subscribe: impl Fn(&Subscriber<T>) -> Teardown + Send + Sync + 'static,
    ) -> Self {
        Self {
            producer: Arc::new(on_subscribe),
            serialized: false,
        }
    }

    /// Returns `true` if emissions are serialised by the runtime.
    #[must_use]
    pub fn is_serialized(&self) -> bool {
        self.serialized
    }

    /// Creates an observable for an operator output, inheriting this
    /// observable's safety flavour.
    ///
    /// Operators use this so a safe source keeps serialised delivery through
    /// the whole pipeline while synchronous pipelines stay lock-free.
    pub fn derived<U: Send + 'static>(
        &self,
        on_subscribe: impl Fn(&Subscriber<U>) -> Teardown + Send + Sync + 'static,
    ) -> Observable<U> {
        Observable {
            producer: Arc::new(on_subscribe),
            serialized: self.serialized,
        }
    }

    /// Subscribes with an empty context.
    ///
    /// See [`subscribe_with_context`](Self::subscribe_with_context).
    pub fn subscribe(&self, observer: impl Observer<T> + 'static) -> Subscription {
        self.subscribe_with_context(Context::new(), observer)
    }

    /// Runs the on-subscribe thunk against `observer` and returns the
    /// subscription owning the producer's teardown.
    ///
    /// The producer may emit synchronously before this returns, or later
    /// from another thread. Unsubscribing before the first emission cancels
    /// pending work; any racing emission is dropped by the observer state
    /// machine. If `ctx` carries a cancelled token the producer is never
    /// invoked.
    pub fn subscribe_with_context(
        &self,
        ctx: Context,
        observer: impl Observer<T> + 'static,
    ) -> Subscription {
        let subscription = Subscription::new();
        let sink = Arc::new(Sink::new(Box::new(observer), self.serialized));
        let subscriber = Subscriber {
            ctx,
            sink,
            subscription: subscription.clone(),
        };

        if subscriber.ctx.is_cancelled() {
            subscription.unsubscribe();
            return subscription;
        }

        let producer = self.producer.as_ref();
        match catch_unwind(AssertUnwindSafe(|| producer(&subscriber))) {
            Ok(teardown) => subscription.add(teardown),
            Err(payload) => {
                subscriber.error(FlowError::producer_panic(panic_message(payload.as_ref())));
            }
        }
        subscription
    }

    /// An observable that emits the given values in order, then completes.
    ///
    /// Cold: every subscriber receives the full sequence.
    pub fn just(values: impl IntoIterator<Item = T>) -> Self
    where
        T: Clone + Sync,
    {
        let values: Vec<T> = values.into_iter().collect();
        Observable::new_unsafe(move |subscriber| {
            for value in &values {
                if subscriber.is_closed() {
                    return Teardown::none();
                }
                subscriber.next(value.clone());
            }
            subscriber.complete();
            Teardown::none()
        })
    }

    /// An observable that completes immediately without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Observable::new_unsafe(|subscriber| {
            subscriber.complete();
            Teardown::none()
        })
    }

    /// An observable that never emits and never terminates.
    #[must_use]
    pub fn never() -> Self {
        Observable::new_unsafe(|_subscriber| Teardown::none())
    }

    /// An observable that fails immediately with the given error.
    #[must_use]
    pub fn throw(error: FlowError) -> Self {
        Observable::new_unsafe(move |subscriber| {
            subscriber.error(error.clone());
            Teardown::none()
        })
    }

    /// An observable built per subscription by `factory`.
    ///
    /// The factory runs at subscribe time, so each subscriber observes a
    /// freshly constructed source.
    pub fn defer(factory: impl Fn() -> Observable<T> + Send + Sync + 'static) -> Self {
        Observable::new_unsafe(move |subscriber| {
            let inner = factory();
            let upstream =
                inner.subscribe_with_context(subscriber.context().clone(), subscriber.clone());
            Teardown::from(upstream)
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

/// The downstream end handed to an on-subscribe thunk: the observer sink,
/// its subscription and the subscribe-time context, fused.
///
/// `Subscriber` is cheap to clone and `Send`, so producers may move clones
/// into worker threads. All emission methods are safe to call at any time;
/// after a terminal, an unsubscribe or a context cancellation they become
/// silent no-ops.
pub struct Subscriber<T> {
    ctx: Context,
    sink: Arc<Sink<T>>,
    subscription: Subscription,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            sink: self.sink.clone(),
            subscription: self.subscription.clone(),
        }
    }
}

impl<T: Send + 'static> Subscriber<T> {
    /// The context supplied at subscribe time.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// The subscription owning this link's teardowns.
    #[must_use]
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// Registers a teardown on the underlying subscription.
    pub fn add_teardown(&self, f: impl FnOnce() + Send + 'static) {
        self.subscription.add_teardown(f);
    }

    /// Registers a child subscription on the underlying subscription.
    pub fn add_child(&self, child: Subscription) {
        self.subscription.add_child(child);
    }

    /// Emits a value with the subscribe-time context.
    pub fn next(&self, value: T) {
        let ctx = self.ctx.clone();
        self.next_with_context(&ctx, value);
    }

    /// Emits a value with an explicit delivery context.
    pub fn next_with_context(&self, ctx: &Context, value: T) {
        if ctx.is_cancelled() || self.ctx.is_cancelled() {
            self.cancel();
            return;
        }
        if self.subscription.is_closed() {
            self.sink.mark_unsubscribed();
            return;
        }
        self.sink.next(ctx, value);
    }

    /// Terminates the stream with an error, using the subscribe-time context.
    pub fn error(&self, error: FlowError) {
        self.error_with_context(&self.ctx.clone(), error);
    }

    /// Terminates the stream with an error and an explicit delivery context.
    pub fn error_with_context(&self, ctx: &Context, error: FlowError) {
        if ctx.is_cancelled() || self.ctx.is_cancelled() {
            self.cancel();
            return;
        }
        if self.subscription.is_closed() {
            self.sink.mark_unsubscribed();
            return;
        }
        if self.sink.error(ctx, error) {
            // Terminal delivered: release upstream resources
            self.subscription.unsubscribe();
        }
    }

    /// Completes the stream, using the subscribe-time context.
    pub fn complete(&self) {
        self.complete_with_context(&self.ctx.clone());
    }

    /// Completes the stream with an explicit delivery context.
    pub fn complete_with_context(&self, ctx: &Context) {
        if ctx.is_cancelled() || self.ctx.is_cancelled() {
            self.cancel();
            return;
        }
        if self.subscription.is_closed() {
            self.sink.mark_unsubscribed();
            return;
        }
        if self.sink.complete(ctx) {
            self.subscription.unsubscribe();
        }
    }

    /// Returns `true` once no further notification can be delivered:
    /// terminal reached, unsubscribed, or context cancelled.
    ///
    /// Long-running producers should poll this between emissions.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sink.state() != state::ACTIVE
            || self.subscription.is_closed()
            || self.ctx.is_cancelled()
    }

    /// Returns `true` if the stream terminated with an error.
    #[must_use]
    pub fn has_errored(&self) -> bool {
        self.sink.state() == state::ERRORED
    }

    /// Returns `true` if the stream completed normally.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.sink.state() == state::COMPLETED
    }

    // Context cancellation behaves exactly like unsubscribe: tear down,
    // emit nothing.
    fn cancel(&self) {
        self.sink.mark_unsubscribed();
        self.subscription.unsubscribe();
    }
}

/// Forwarding: a `Subscriber` is itself an observer, so producers can be
/// chained by subscribing one stream's subscriber to another stream.
impl<T: Send + 'static> Observer<T> for Subscriber<T> {
    fn on_next(&self, ctx: &Context, value: T) {
        self.next_with_context(ctx, value);
    }

    fn on_error(&self, ctx: &Context, error: FlowError) {
        self.error_with_context(ctx, error);
    }

    fn on_complete(&self, ctx: &Context) {
        self.complete_with_context(ctx);
    }
}

/// Convenience subscription surface mirroring the callback trio.
impl<T: Send + 'static> Observable<T> {
    /// Subscribes a callback for values only.
    ///
    /// **This subscription panics if the stream fails with an error** —
    /// errors are never silently dropped. Prefer
    /// [`subscribe_all`](Self::subscribe_all) when the caller can handle
    /// failures, or the exec-layer helpers which log instead of panicking.
    pub fn subscribe_next(&self, next: impl FnMut(T) + Send + 'static) -> Subscription {
        self.subscribe(observer::from_fns(
            next,
            |e| panic!("unhandled stream error: {e}"),
            || {},
        ))
    }

    /// Subscribes callbacks for all three notification kinds.
    pub fn subscribe_all(
        &self,
        next: impl FnMut(T) + Send + 'static,
        error: impl FnMut(FlowError) + Send + 'static,
        complete: impl FnMut() + Send + 'static,
    ) -> Subscription {
        self.subscribe(observer::from_fns(next, error, complete))
    }
}
