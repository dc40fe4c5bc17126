// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domains, scales and per-datum geometry for Vela charts.
//!
//! This crate sits between the data-side transforms of `vela_transforms` and an external
//! rendering runtime:
//! - **Domains** are scanned from normalized points, or set per axis.
//! - **Scales** map data values into screen coordinates.
//! - **Geometry resolvers** place every datum (bars, box plots, lines and areas, pie slices).
//! - **Primitive templates** turn each resolved geometry into a `vela_core::Mark`, and the
//!   composition layer gathers them into a stable-id `vela_core::Group` tree.
//!
//! Chart builders such as [`BarChartSpec`] run the whole pipeline in one call.
//!
//! Every stage is a pure function of its inputs and is recomputed on each call. Text shaping is
//! out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bar;
mod bar_chart;
mod box_plot;
mod box_plot_chart;
mod chart;
mod compose;
mod context;
mod domain;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod label;
mod line_chart;
mod pie;
mod pie_chart;
mod primitive;
mod prop;
mod scale;
#[cfg(test)]
mod scenario_tests;
mod series;
mod z_order;

pub use bar::{
    Alignment, BarGeometry, BarLayout, BarPosition, BarRadii, CornerRadius, Corners,
    DEFAULT_BAR_RATIO, DEFAULT_BAR_WIDTH, bar_rect, bar_width, default_baseline, resolve_bar,
};
pub use bar_chart::{BarChartSpec, DEFAULT_BAR_LABEL_OFFSET};
pub use box_plot::{
    BoxGeometry, BoxLabels, BoxStat, DEFAULT_BOX_WIDTH, DEFAULT_LABEL_OFFSET, WhiskerGeometry,
    extent_points, resolve_box, summary_datum,
};
pub use box_plot_chart::BoxPlotChartSpec;
pub use chart::Sort;
pub use compose::{compose, compose_series};
pub use context::ResolveContext;
pub use domain::{
    Axis, Domain, DomainSpec, EmptyDomainError, Padding, SINGLE_VALUE_PADDING, axis_extent,
};
pub use error::ChartError;
pub use label::{LabelGeometry, format_number};
pub use line_chart::{
    AreaChartSpec, LineChartSpec, StackSpec, default_series_fills, series_fill,
};
pub use pie::{LABEL_INSET, PieLayout, SliceGeometry, polar};
pub use pie_chart::PieChartSpec;
pub use primitive::{
    AreaPrimitive, BarPrimitive, BorderPrimitive, CurvePrimitive, DatumAttrs, LabelPrimitive,
    Primitive, SegmentPrimitive, SeriesAttrs, SeriesPrimitive, SlicePrimitive, Style,
    WhiskerPrimitive,
};
pub use prop::{DatumContext, DatumProp, SeriesContext, SeriesProp};
pub use scale::{
    Direction, ScaleContinuous, ScaleError, ScaleKind, ScaleLinear, ScaleLog, ScaleTime,
    nice_domain,
};
pub use series::{Interpolation, Segment, SeriesPath, resolve_series};
pub use z_order::*;
