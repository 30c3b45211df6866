// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The link between a producer and a consumer.
//!
//! A [`Subscription`] owns the teardown actions of its producer plus any
//! child subscriptions registered by operators. [`unsubscribe`]
//! (Subscription::unsubscribe) is idempotent: teardowns run exactly once and
//! children are torn down recursively. Teardowns and children installed
//! after the subscription closed are executed immediately, so an early
//! unsubscribe can never leak resources acquired later by a slow producer.

use crate::cancellation_token::CancellationToken;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

type TeardownFn = Box<dyn FnOnce() + Send>;

/// The disposal action returned by an on-subscribe thunk.
///
/// Producers that acquire nothing return [`Teardown::none`]; producers that
/// subscribe upstream usually convert the upstream [`Subscription`] with
/// `Teardown::from`.
pub struct Teardown(Option<TeardownFn>);

impl Teardown {
    /// A teardown that does nothing.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    /// A teardown running the given action exactly once.
    pub fn from_fn(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(f)))
    }

    fn into_inner(self) -> Option<TeardownFn> {
        self.0
    }
}

impl From<Subscription> for Teardown {
    fn from(subscription: Subscription) -> Self {
        Teardown::from_fn(move || subscription.unsubscribe())
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Teardown")
            .field(&self.0.is_some())
            .finish()
    }
}

#[derive(Default)]
struct State {
    teardowns: Vec<TeardownFn>,
    children: Vec<Subscription>,
}

struct Inner {
    token: CancellationToken,
    // Taken exactly once by the unsubscribing caller; None afterwards.
    state: Mutex<Option<State>>,
}

/// An active producer/consumer link, cancellable and composable.
///
/// Cloning yields another handle to the same link. The embedded
/// [`CancellationToken`] fires on unsubscribe; producer threads park on it
/// instead of sleeping blindly.
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<Inner>,
}

impl Subscription {
    /// Creates an open subscription with no teardowns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                token: CancellationToken::new(),
                state: Mutex::new(Some(State::default())),
            }),
        }
    }

    /// Returns `true` once the subscription has been unsubscribed (directly,
    /// or because the producer terminated).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// The token that fires when this subscription closes.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.inner.token
    }

    /// Cancels the link: runs every teardown once and recursively
    /// unsubscribes all children. Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        let taken = {
            let mut guard = self.inner.state.lock();
            let taken = guard.take();
            if taken.is_some() {
                self.inner.token.cancel();
            }
            taken
        };

        // Teardowns and children run outside the lock so a teardown may
        // touch this subscription again without deadlocking.
        if let Some(state) = taken {
            for teardown in state.teardowns {
                teardown();
            }
            for child in state.children {
                child.unsubscribe();
            }
        }
    }

    /// Registers a teardown action. Runs immediately if already closed.
    pub fn add_teardown(&self, f: impl FnOnce() + Send + 'static) {
        let run_now: Option<TeardownFn> = {
            let mut guard = self.inner.state.lock();
            match guard.as_mut() {
                Some(state) => {
                    state.teardowns.push(Box::new(f));
                    None
                }
                None => Some(Box::new(f)),
            }
        };
        if let Some(f) = run_now {
            f();
        }
    }

    /// Installs the teardown returned by a producer thunk.
    pub fn add(&self, teardown: Teardown) {
        if let Some(f) = teardown.into_inner() {
            self.add_teardown(f);
        }
    }

    /// Registers a child subscription, torn down together with this one.
    /// Unsubscribed immediately if this subscription is already closed.
    pub fn add_child(&self, child: Subscription) {
        let unsubscribe_now = {
            let mut guard = self.inner.state.lock();
            match guard.as_mut() {
                Some(state) => {
                    state.children.push(child);
                    None
                }
                None => Some(child),
            }
        };
        if let Some(child) = unsubscribe_now {
            child.unsubscribe();
        }
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
