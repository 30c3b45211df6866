// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reference-counted multicast operators.
//!
//! `multicast` routes one upstream subscription through a subject; the
//! upstream connection is made when the first downstream subscriber arrives
//! and dropped when the last one leaves. `share` and `share_replay` are the
//! publish- and replay-subject instantiations.

use parking_lot::Mutex;
use rxflow_core::{
    Observable, PublishSubject, ReplaySubject, Subject, Subscriber, Subscription, Teardown,
};
use std::sync::Arc;

struct ShareState<S> {
    subject: Option<S>,
    connection: Option<Subscription>,
    subscribers: usize,
}

/// Extension trait providing the multicast operators.
pub trait ShareExt<T: Send + 'static>: Sized {
    /// Multicasts the source through subjects built by `factory`.
    ///
    /// A fresh subject is created whenever the subscriber count rises from
    /// zero, and the upstream connection is dropped when it falls back to
    /// zero; a later subscriber reconnects from scratch.
    fn multicast<S, F>(self, factory: F) -> Observable<T>
    where
        S: Subject<T> + Clone + Send + Sync + 'static,
        F: Fn() -> S + Send + Sync + 'static;

    /// Shares one upstream subscription among all subscribers.
    ///
    /// Late subscribers only see events emitted after they attached.
    fn share(self) -> Observable<T>
    where
        T: Clone;

    /// Shares one upstream subscription, replaying the last `capacity`
    /// values to late subscribers.
    fn share_replay(self, capacity: usize) -> Observable<T>
    where
        T: Clone;
}

impl<T: Send + 'static> ShareExt<T> for Observable<T> {
    fn multicast<S, F>(self, factory: F) -> Observable<T>
    where
        S: Subject<T> + Clone + Send + Sync + 'static,
        F: Fn() -> S + Send + Sync + 'static,
    {
        let source = self;
        let state: Arc<Mutex<ShareState<S>>> = Arc::new(Mutex::new(ShareState {
            subject: None,
            connection: None,
            subscribers: 0,
        }));

        Observable::new(move |down: &Subscriber<T>| {
            let (subject, connect) = {
                let mut state = state.lock();
                if state.subject.is_none() {
                    state.subject = Some(factory());
                }
                state.subscribers += 1;
                let connect = if state.connection.is_none() {
                    // Reserve the connection slot before subscribing so a
                    // concurrent subscriber cannot double-connect.
                    let placeholder = Subscription::new();
                    state.connection = Some(placeholder.clone());
                    Some(placeholder)
                } else {
                    None
                };
                (state.subject.clone(), connect)
            };

            let Some(subject) = subject else {
                return Teardown::none();
            };

            let downstream = subject
                .observable()
                .subscribe_with_context(down.context().clone(), down.clone());

            if let Some(placeholder) = connect {
                let connection =
                    source.subscribe_with_context(down.context().clone(), subject.clone());
                placeholder.add_child(connection);
            }

            let state = state.clone();
            Teardown::from_fn(move || {
                downstream.unsubscribe();
                let disconnect = {
                    let mut state = state.lock();
                    state.subscribers -= 1;
                    if state.subscribers == 0 {
                        state.subject = None;
                        state.connection.take()
                    } else {
                        None
                    }
                };
                if let Some(connection) = disconnect {
                    connection.unsubscribe();
                }
            })
        })
    }

    fn share(self) -> Observable<T>
    where
        T: Clone,
    {
        self.multicast(PublishSubject::new)
    }

    fn share_replay(self, capacity: usize) -> Observable<T>
    where
        T: Clone,
    {
        self.multicast(move || ReplaySubject::with_capacity(capacity))
    }
}
