// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Thread-oriented cancellation token.
//!
//! Subscriptions, blocking sinks and timer workers all park on this token;
//! cancelling it wakes every waiter exactly once and stays latched.

use event_listener::{Event, Listener};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A clonable, latching cancellation flag.
///
/// A `CancellationToken` can be cloned to create multiple handles to the same
/// cancellation state. When `cancel()` is called on any clone, all threads
/// blocked in [`wait`](Self::wait) or [`wait_timeout`](Self::wait_timeout)
/// are woken.
///
/// # Example
///
/// ```
/// use rxflow_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let token_clone = token.clone();
///
/// std::thread::spawn(move || {
///     token_clone.wait();
///     // Continue after cancellation
/// });
///
/// token.cancel();
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a new cancellation token.
    ///
    /// The token is initially not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Cancel the token, waking all waiters.
    ///
    /// This method is idempotent. Calling it multiple times has the same effect
    /// as calling it once.
    pub fn cancel(&self) {
        // Set flag first with release ordering to ensure all writes are visible
        // before notifying waiters
        self.inner.cancelled.store(true, Ordering::Release);

        // Wake ALL waiters (unbounded notification)
        self.inner.event.notify(usize::MAX);
    }

    /// Check if the token has been cancelled (non-blocking).
    ///
    /// # Example
    ///
    /// ```
    /// use rxflow_core::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// assert!(!token.is_cancelled());
    ///
    /// token.cancel();
    /// assert!(token.is_cancelled());
    /// ```
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        // Acquire ordering to see all writes that happened before cancel()
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Block the calling thread until the token is cancelled.
    ///
    /// Returns immediately if the token is already cancelled.
    pub fn wait(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }

            let listener = self.inner.event.listen();

            // Check again after registering to avoid a missed notification:
            // cancel() may have run between the first check and listen()
            if self.is_cancelled() {
                return;
            }

            listener.wait();
        }
    }

    /// Block until the token is cancelled or `timeout` elapses.
    ///
    /// Returns `true` if the token was cancelled, `false` on timeout. Timer
    /// workers use this as their sleep primitive so that unsubscribing wakes
    /// them without waiting out the period.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_cancelled() {
                return true;
            }

            let listener = self.inner.event.listen();

            if self.is_cancelled() {
                return true;
            }

            if listener.wait_deadline(deadline).is_none() {
                // Deadline passed without a notification
                return self.is_cancelled();
            }

            if self.is_cancelled() {
                return true;
            }

            // Spurious wakeup before the deadline; go around again
            if Instant::now() >= deadline {
                return self.is_cancelled();
            }
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
