// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Terminal sinks for the rxflow reactive runtime.
//!
//! [`collect`] turns a stream back into an ordered vector plus an optional
//! terminal error, blocking the calling thread until the producer
//! terminates. The `subscribe_*` helpers attach plain callbacks while
//! guaranteeing that failures stay observable.

mod collect;
mod logging;
mod subscribe;

pub use collect::{collect, collect_with_context};
pub use subscribe::{subscribe_all, subscribe_next};
