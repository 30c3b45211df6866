// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting all operator extension traits.
//!
//! Import this module for convenient access to the whole operator surface:
//!
//! ```ignore
//! use rxflow_ops::prelude::*;
//!
//! let processed = source
//!     .map(parse)
//!     .filter(is_relevant)
//!     .distinct_until_changed()
//!     .share();
//! ```

pub use crate::buffer::BufferExt;
pub use crate::catch::CatchExt;
pub use crate::combine_latest::combine_latest;
pub use crate::concat::{concat, ConcatExt};
pub use crate::concat_map::ConcatMapExt;
pub use crate::distinct::DistinctExt;
pub use crate::filter::FilterExt;
pub use crate::flatten::FlattenExt;
pub use crate::map::MapExt;
pub use crate::merge::{merge, MergeWithExt};
pub use crate::merge_map::{MergeAllExt, MergeMapExt};
pub use crate::reduce::ReduceExt;
pub use crate::retry::RetryExt;
pub use crate::scan::ScanExt;
pub use crate::share::ShareExt;
pub use crate::skip::SkipExt;
pub use crate::start_with::StartWithExt;
pub use crate::switch_map::SwitchMapExt;
pub use crate::take::TakeExt;
pub use crate::tap::TapExt;
pub use crate::zip::zip;
