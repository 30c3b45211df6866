// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! A push-based reactive streams runtime.
//!
//! `rxflow` re-exports the whole workspace surface: the core contracts
//! (`Observable` / `Observer` / `Subscription` / `Context`), the subject
//! family, the operator catalogue, the time-driven operators, and the
//! blocking sinks.
//!
//! # Quick start
//!
//! ```
//! use rxflow::prelude::*;
//!
//! let evens = Observable::just(vec![1, 2, 3, 4, 5]).filter(|v| v % 2 == 0);
//! let (values, error) = collect(&evens);
//!
//! assert_eq!(values, vec![2, 4]);
//! assert!(error.is_none());
//! ```

pub use rxflow_core::{
    observer, op, pipe1, pipe10, pipe11, pipe2, pipe3, pipe4, pipe5, pipe6, pipe7, pipe8, pipe9,
    pipe_dyn, subject, AsyncSubject, BehaviorSubject, CancellationToken, Context, FlowError,
    Notification, Observable, Observer, Operator, PublishSubject, ReplaySubject, Result,
    ResultExt, Subject, Subscriber, Subscription, Teardown,
};

pub use rxflow_exec::{collect, collect_with_context, subscribe_all, subscribe_next};

pub use rxflow_ops::{
    combine_latest, concat, merge, zip, BufferExt, CatchExt, ConcatExt, ConcatMapExt,
    DistinctExt, FilterExt, FlattenExt, MapExt, MergeAllExt, MergeMapExt, MergeWithExt,
    ReduceExt, RetryExt, ScanExt, ShareExt, SkipExt, StartWithExt, SwitchMapExt, TakeExt, TapExt,
};

pub use rxflow_time::{
    interval, timer, BufferTimeExt, DebounceExt, DelayExt, ThrottleExt,
};

/// Prelude module re-exporting the types and extension traits most
/// pipelines need.
pub mod prelude {
    pub use rxflow_core::{
        observer, Context, FlowError, Notification, Observable, Observer, Operator, Subject,
        Subscriber, Subscription, Teardown,
    };
    pub use rxflow_core::{AsyncSubject, BehaviorSubject, PublishSubject, ReplaySubject};
    pub use rxflow_core::{op, pipe1, pipe2, pipe3, pipe_dyn};
    pub use rxflow_exec::{collect, collect_with_context, subscribe_all, subscribe_next};
    pub use rxflow_ops::prelude::*;
    pub use rxflow_time::{interval, timer, BufferTimeExt, DebounceExt, DelayExt, ThrottleExt};
}
