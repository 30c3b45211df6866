// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Core contracts of the rxflow reactive runtime.
//!
//! This crate defines the vocabulary every other rxflow crate builds on:
//!
//! - [`Notification`] — the event sum type (`Next` / `Error` / `Complete`)
//! - [`Observer`] — the consumer capability
//! - [`Subscription`] — the cancellable producer/consumer link
//! - [`Observable`] and [`Subscriber`] — the cold producer and its
//!   downstream handle
//! - [`Context`] — the immutable key/value map carried with every
//!   notification
//! - [`Operator`] and the `pipe*` family — composition plumbing
//! - the [`Subject`](subject::Subject) family — multicast hubs
//!
//! Operators live in `rxflow-ops` and `rxflow-time`; blocking sinks live in
//! `rxflow-exec`; the `rxflow` facade re-exports everything.

mod cancellation_token;
mod context;
mod error;
mod notification;
pub mod observer;
mod observable;
mod pipe;
pub mod subject;
mod subscription;

pub use cancellation_token::CancellationToken;
pub use context::Context;
pub use error::{FlowError, Result, ResultExt};
pub use notification::Notification;
pub use observable::{Observable, Subscriber};
pub use observer::Observer;
pub use pipe::{
    op, pipe1, pipe10, pipe11, pipe2, pipe3, pipe4, pipe5, pipe6, pipe7, pipe8, pipe9, pipe_dyn,
    Operator,
};
pub use subject::{AsyncSubject, BehaviorSubject, PublishSubject, ReplaySubject, Subject};
pub use subscription::{Subscription, Teardown};
