// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Time-driven sources and operators for the rxflow reactive runtime.
//!
//! Every operator here owns its timing resources per subscription — a timer
//! thread, a pending-value slot, a batch window — and releases them on
//! terminal and on unsubscribe. Sleeps go through the subscription's
//! cancellation token or a condition variable, never a blind
//! `thread::sleep`, so cancellation takes effect promptly.
//!
//! Sources: [`interval`], [`timer`]. Operators: [`DelayExt::delay`],
//! [`DebounceExt::debounce`], [`ThrottleExt::throttle`],
//! [`BufferTimeExt::buffer_time`].

pub mod buffer_time;
pub mod debounce;
pub mod delay;
pub mod interval;
pub mod throttle;

pub use buffer_time::BufferTimeExt;
pub use debounce::DebounceExt;
pub use delay::DelayExt;
pub use interval::{interval, timer};
pub use throttle::ThrottleExt;
