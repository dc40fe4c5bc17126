// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-index conventions for the marks the default primitives emit.
//!
//! Renderers sort by `(z_index, tree order)`; ties keep the order of the composed tree.

/// Filled series shapes: bars, areas and pie slices.
pub const SERIES_FILL: i32 = 0;
/// Box plot quartile borders.
pub const BOX_BORDERS: i32 = 5;
/// Stroked series shapes: lines and box plot whiskers.
pub const SERIES_STROKE: i32 = 10;
/// Box plot median segments, drawn over the borders.
pub const MEDIANS: i32 = 15;
/// Per-datum labels.
pub const LABELS: i32 = 40;
