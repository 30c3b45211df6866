// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Stream operators for the rxflow reactive runtime.
//!
//! Every operator lives in its own module and is exposed through an
//! extension trait on [`Observable`](rxflow_core::Observable); import
//! [`prelude`] to bring the whole surface into scope. Operators compose at
//! value level and allocate their state per subscription, so a composed
//! pipeline can be subscribed any number of times.
//!
//! Time-driven operators (`interval`, `delay`, `debounce`, …) live in the
//! `rxflow-time` crate; blocking sinks live in `rxflow-exec`.

pub mod buffer;
pub mod catch;
pub mod combine_latest;
pub mod concat;
pub mod concat_map;
pub mod distinct;
pub mod filter;
pub mod flatten;
pub mod map;
pub mod merge;
pub mod merge_map;
pub mod prelude;
pub mod reduce;
pub mod retry;
pub mod scan;
pub mod share;
pub mod skip;
pub mod start_with;
pub mod switch_map;
pub mod take;
pub mod tap;
pub mod zip;

pub use buffer::BufferExt;
pub use catch::CatchExt;
pub use combine_latest::combine_latest;
pub use concat::{concat, ConcatExt};
pub use concat_map::ConcatMapExt;
pub use distinct::DistinctExt;
pub use filter::FilterExt;
pub use flatten::FlattenExt;
pub use map::MapExt;
pub use merge::{merge, MergeWithExt};
pub use merge_map::{MergeAllExt, MergeMapExt};
pub use reduce::ReduceExt;
pub use retry::RetryExt;
pub use scan::ScanExt;
pub use share::ShareExt;
pub use skip::SkipExt;
pub use start_with::StartWithExt;
pub use switch_map::SwitchMapExt;
pub use take::TakeExt;
pub use tap::TapExt;
pub use zip::zip;
