// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading-edge rate limiting operator.

use rxflow_core::{observer, Notification, Observable, Subscriber, Teardown};
use std::time::{Duration, Instant};

/// Extension trait providing the `throttle` operator.
pub trait ThrottleExt<T>: Sized {
    /// Emits the first value of each `duration`-long window and drops the
    /// rest.
    ///
    /// Purely reactive: no timer thread is involved, the window is checked
    /// against a monotonic clock as values arrive. Terminals pass through
    /// untouched.
    fn throttle(self, duration: Duration) -> Observable<T>;
}

impl<T: Send + 'static> ThrottleExt<T> for Observable<T> {
    fn throttle(self, duration: Duration) -> Observable<T> {
        let source = self.clone();
        self.derived(move |down: &Subscriber<T>| {
            let down = down.clone();
            let mut window_start: Option<Instant> = None;
            let upstream = source.subscribe_with_context(
                down.context().clone(),
                observer::from_notifications(move |ctx, item: Notification<T>| match item {
                    Notification::Next(value) => {
                        let now = Instant::now();
                        let open = match window_start {
                            None => true,
                            Some(start) => now.duration_since(start) >= duration,
                        };
                        if open {
                            window_start = Some(now);
                            down.next_with_context(ctx, value);
                        }
                    }
                    Notification::Error(e) => down.error_with_context(ctx, e),
                    Notification::Complete => down.complete_with_context(ctx),
                }),
            );
            Teardown::from(upstream)
        })
    }
}
