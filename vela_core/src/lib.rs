// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data model for the Vela chart pipeline.
//!
//! This crate holds the two ends of the pipeline:
//! - [`DataPoint`]: the canonical, normalized datum every chart archetype consumes.
//! - [`Mark`] / [`Group`]: immutable primitive descriptors handed to an external renderer.
//!
//! Nothing here draws. A renderer walks a [`Group`] tree and paints each [`MarkPayload`],
//! forwarding the pass-through [`Attrs`] (accessibility label, tab order, event handlers) to
//! whatever surface it targets.

#![no_std]

extern crate alloc;

mod attrs;
mod datum;
mod mark;
mod tree;

pub use attrs::{Attrs, EventHandler};
pub use datum::DataPoint;
pub use mark::{
    Mark, MarkId, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline,
    TextPayload,
};
pub use tree::{Group, Marks, Node};
