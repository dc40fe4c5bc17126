// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-side transforms for the Vela chart pipeline.
//!
//! This crate provides:
//! - a normalizer that turns numbers, `[x, y]` pairs, or records read through accessors into
//!   ordered [`vela_core::DataPoint`]s,
//! - stacking of sibling series into cumulative `y0`/`y` offsets, and
//! - five-number summaries for box plots.
//!
//! Everything here is a pure function of its inputs and is recomputed on every render pass.

#![no_std]

extern crate alloc;

mod accessor;
mod category;
mod normalize;
mod stack;
mod summary;

pub use accessor::Accessor;
pub use category::CategoryIndex;
pub use normalize::{
    Accessors, DataFormatError, DataInput, Normalizer, SortKey, SortOrder, normalize, sort_points,
};
pub use stack::{InvalidStackError, StackContext, StackOffset, StackedSeries};
pub use summary::{BoxAccessors, BoxSummary, quantile_sorted, summarize};
