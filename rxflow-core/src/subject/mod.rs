// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast hubs that are both producer and consumer.
//!
//! A subject fans one upstream of events out to any number of downstream
//! subscribers. All variants share the same machinery: a guarded subscriber
//! list, a terminal latch, and a trampolined fan-out queue that delivers one
//! event to the entire snapshot of subscribers before the next event
//! begins. Callbacks never run under the state guard, so a subscriber may
//! unsubscribe itself from inside its own callback, attach new subscribers,
//! or push the subject again — a nested push is deferred and delivered
//! right after the current fan-out. Observers attached during a fan-out see
//! the following event, not the one in flight.
//!
//! A latched subject stays subscribable: new subscribers immediately receive
//! the terminal (plus whatever the variant buffers).
//!
//! | Variant                            | Buffer                     |
//! |------------------------------------|----------------------------|
//! | [`PublishSubject`]                 | none                       |
//! | [`BehaviorSubject`]                | latest value               |
//! | [`ReplaySubject`]                  | bounded window (count/age) |
//! | [`AsyncSubject`]                   | last value, held to the end|

mod async_subject;
mod behavior;
mod publish;
mod replay;

pub use async_subject::AsyncSubject;
pub use behavior::BehaviorSubject;
pub use publish::PublishSubject;
pub use replay::ReplaySubject;

use crate::context::Context;
use crate::error::FlowError;
use crate::observable::{Observable, Subscriber};
use crate::observer::Observer;
use crate::subscription::Subscription;
use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard};
use std::collections::VecDeque;
use std::sync::Arc;

/// Common surface of all subject variants: an [`Observer`] that can also be
/// subscribed to.
pub trait Subject<T: Send + 'static>: Observer<T> {
    /// The observable face of this subject.
    ///
    /// Subscribing registers a downstream observer; the subscription's
    /// teardown detaches it again.
    fn observable(&self) -> Observable<T>;

    /// Subscribes an observer with an empty context.
    fn subscribe(&self, observer: impl Observer<T> + 'static) -> Subscription
    where
        Self: Sized,
    {
        self.observable().subscribe(observer)
    }

    /// Subscribes an observer with the given context.
    fn subscribe_with_context(
        &self,
        ctx: Context,
        observer: impl Observer<T> + 'static,
    ) -> Subscription
    where
        Self: Sized,
    {
        self.observable().subscribe_with_context(ctx, observer)
    }
}

/// The persistent terminal state of a subject.
#[derive(Clone)]
pub(crate) enum Latch {
    Open,
    Errored(FlowError),
    Completed,
}

/// One queued emission, delivered by the trampoline.
pub(crate) enum SubjectEvent<T> {
    Next(T),
    Error(FlowError),
    Complete,
}

struct Slot<T> {
    id: u64,
    subscriber: Subscriber<T>,
}

struct SubjectState<T> {
    slots: Vec<Slot<T>>,
    latch: Latch,
    next_id: u64,
}

struct Pending<T> {
    events: VecDeque<SubjectEvent<T>>,
    draining: bool,
}

// Resets the draining flag even if a subscriber callback panics through
// the drain loop, so the subject stays usable.
struct DrainGuard<'a, T> {
    pending: &'a Mutex<Pending<T>>,
    disarmed: bool,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if !self.disarmed {
            self.pending.lock().draining = false;
        }
    }
}

type NextHook<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Fan-out machinery shared by every variant.
///
/// Three pieces with distinct jobs: `state` protects the subscriber list
/// and the latch and is only ever held briefly; `pending` is the deferred
/// emission queue, drained by exactly one frame at a time; `emit_guard` is
/// held around each delivery and by the subscribe path, so registration and
/// buffer snapshots cannot interleave with a fan-out. The guard is
/// reentrant: subscribing or pushing from inside a callback works, a nested
/// push simply lands in the queue and is delivered right after the current
/// event.
pub(crate) struct SubjectCore<T> {
    state: Mutex<SubjectState<T>>,
    pending: Mutex<Pending<T>>,
    emit_guard: ReentrantMutex<()>,
    // Variant hook run at delivery time, before the snapshot: keeps the
    // behavior/replay buffers totally ordered with the fan-out.
    on_next_delivered: Option<NextHook<T>>,
}

impl<T: Clone + Send + 'static> SubjectCore<T> {
    pub(crate) fn new() -> Arc<Self> {
        Self::with_next_hook(None)
    }

    pub(crate) fn with_next_hook(on_next_delivered: Option<NextHook<T>>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(SubjectState {
                slots: Vec::new(),
                latch: Latch::Open,
                next_id: 0,
            }),
            pending: Mutex::new(Pending {
                events: VecDeque::new(),
                draining: false,
            }),
            emit_guard: ReentrantMutex::new(()),
            on_next_delivered,
        })
    }

    pub(crate) fn lock_emissions(&self) -> ReentrantMutexGuard<'_, ()> {
        self.emit_guard.lock()
    }

    pub(crate) fn latch(&self) -> Latch {
        self.state.lock().latch.clone()
    }

    pub(crate) fn is_closed(&self) -> bool {
        !matches!(self.state.lock().latch, Latch::Open)
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.state.lock().slots.len()
    }

    /// Attaches a subscriber and wires its removal into the subscription
    /// teardown. Callers must hold the emit guard so registration cannot
    /// interleave with a delivery snapshot.
    pub(crate) fn register(core: &Arc<Self>, subscriber: &Subscriber<T>) {
        let id = {
            let mut state = core.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.slots.push(Slot {
                id,
                subscriber: subscriber.clone(),
            });
            id
        };

        let weak = Arc::downgrade(core);
        subscriber.add_teardown(move || {
            if let Some(core) = weak.upgrade() {
                core.state.lock().slots.retain(|slot| slot.id != id);
            }
        });
    }

    /// Queues an event and drains the queue unless a drain is already in
    /// progress (on this or any other thread). Events pushed from inside a
    /// subscriber callback are delivered right after the current fan-out.
    pub(crate) fn emit(&self, event: SubjectEvent<T>) {
        if self.is_closed() {
            return;
        }
        {
            let mut pending = self.pending.lock();
            pending.events.push_back(event);
            if pending.draining {
                return;
            }
            pending.draining = true;
        }
        self.drain();
    }

    fn drain(&self) {
        let mut guard = DrainGuard {
            pending: &self.pending,
            disarmed: false,
        };
        loop {
            let event = {
                let mut pending = self.pending.lock();
                match pending.events.pop_front() {
                    Some(event) => event,
                    None => {
                        pending.draining = false;
                        guard.disarmed = true;
                        return;
                    }
                }
            };
            self.deliver(event);
        }
    }

    // One event: run the variant hook, snapshot, fan out. The emit guard
    // spans all three so subscribe cannot observe a half-delivered event.
    fn deliver(&self, event: SubjectEvent<T>) {
        let _ordered = self.emit_guard.lock();
        match event {
            SubjectEvent::Next(value) => {
                let snapshot: Vec<Subscriber<T>> = {
                    let state = self.state.lock();
                    if !matches!(state.latch, Latch::Open) {
                        return;
                    }
                    if let Some(hook) = &self.on_next_delivered {
                        hook(&value);
                    }
                    state
                        .slots
                        .iter()
                        .map(|slot| slot.subscriber.clone())
                        .collect()
                };
                for subscriber in snapshot {
                    subscriber.next(value.clone());
                }
            }
            SubjectEvent::Error(error) => {
                if let Some(subscribers) = self.latch_and_drain(Latch::Errored(error.clone())) {
                    for subscriber in subscribers {
                        subscriber.error(error.clone());
                    }
                }
            }
            SubjectEvent::Complete => {
                if let Some(subscribers) = self.latch_and_drain(Latch::Completed) {
                    for subscriber in subscribers {
                        subscriber.complete();
                    }
                }
            }
        }
    }

    /// Latches the subject and detaches every subscriber, returning them so
    /// the caller can deliver the terminal sequence. Returns `None` if the
    /// subject was already latched.
    pub(crate) fn latch_and_drain(&self, latch: Latch) -> Option<Vec<Subscriber<T>>> {
        let mut state = self.state.lock();
        if !matches!(state.latch, Latch::Open) {
            return None;
        }
        state.latch = latch;
        let drained = std::mem::take(&mut state.slots);
        drop(state);
        Some(drained.into_iter().map(|slot| slot.subscriber).collect())
    }
}
