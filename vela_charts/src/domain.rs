// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain calculation.
//!
//! A [`Domain`] is the data-space extent of both axes. It is derived from normalized points by
//! [`DomainSpec::resolve`], where explicit per-axis overrides win outright and everything else is
//! scanned from the data.

use core::fmt;

use kurbo::Size;
use vela_core::DataPoint;

use crate::scale::{ScaleKind, nice_domain};

/// Half-width used to widen a domain that collapsed to a single value.
pub const SINGLE_VALUE_PADDING: f64 = 1e-10;

/// A chart axis in data terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The independent (`x`) data axis.
    X,
    /// The value (`y`) data axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// No finite value was found along an axis and no override was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no finite values along the {axis} axis")]
pub struct EmptyDomainError {
    /// The empty axis.
    pub axis: Axis,
}

/// Data-space extents of both axes. Each pair is `(min, max)` with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Extent along the `x` data axis.
    pub x: (f64, f64),
    /// Extent along the `y` data axis.
    pub y: (f64, f64),
}

impl Domain {
    /// Creates a domain, ordering each pair.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            x: ordered(x),
            y: ordered(y),
        }
    }

    /// Returns the extent along `axis`.
    pub fn get(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Resolves a domain, substituting `(0, 1)` for any empty axis.
    ///
    /// The substitution is logged as a warning.
    pub fn resolve_or_default(spec: &DomainSpec, series: &[&[DataPoint]]) -> Self {
        let axis = |axis| {
            spec.resolve_axis(series, axis).unwrap_or_else(|err| {
                log::warn!("{err}; falling back to (0, 1)");
                (0.0, 1.0)
            })
        };
        Self {
            x: axis(Axis::X),
            y: axis(Axis::Y),
        }
    }
}

/// Pixel padding applied inside the plot on each side of an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    /// Padding along the `x` data axis, in pixels per side.
    pub x: f64,
    /// Padding along the `y` data axis, in pixels per side.
    pub y: f64,
}

impl Padding {
    /// The same padding on both axes.
    pub fn uniform(px: f64) -> Self {
        Self { x: px, y: px }
    }
}

/// Inputs to domain calculation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DomainSpec {
    /// Explicit `x` extent.
    pub x: Option<(f64, f64)>,
    /// Explicit `y` extent.
    pub y: Option<(f64, f64)>,
    /// Extend the value (`y`) axis to contain 0.
    pub include_zero: bool,
    /// The `x` data axis runs vertically and `y` horizontally.
    pub horizontal: bool,
    /// Pixel padding, see [`DomainSpec::resolve_for_plot`].
    pub padding: Padding,
    /// Scale kind of the `x` data axis.
    pub x_kind: ScaleKind,
    /// Scale kind of the `y` data axis.
    pub y_kind: ScaleKind,
    /// Round computed linear extents outward to ticks, targeting this many ticks.
    pub nice: Option<usize>,
}

impl DomainSpec {
    /// Creates a spec that scans everything from the data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit `x` extent.
    pub fn with_x(mut self, x: (f64, f64)) -> Self {
        self.x = Some(x);
        self
    }

    /// Sets an explicit `y` extent.
    pub fn with_y(mut self, y: (f64, f64)) -> Self {
        self.y = Some(y);
        self
    }

    /// Sets whether the value axis must contain 0.
    pub fn with_include_zero(mut self, include_zero: bool) -> Self {
        self.include_zero = include_zero;
        self
    }

    /// Sets horizontal orientation.
    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// Sets pixel padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the scale kinds of the `x` and `y` data axes.
    pub fn with_kinds(mut self, x_kind: ScaleKind, y_kind: ScaleKind) -> Self {
        self.x_kind = x_kind;
        self.y_kind = y_kind;
        self
    }

    /// Rounds computed linear extents outward to "nice" values.
    pub fn with_nice(mut self, tick_count: usize) -> Self {
        self.nice = Some(tick_count);
        self
    }

    /// Returns the scale kind of `axis`.
    pub fn kind(&self, axis: Axis) -> ScaleKind {
        match axis {
            Axis::X => self.x_kind,
            Axis::Y => self.y_kind,
        }
    }

    /// Resolves both axes over every point of every series.
    pub fn resolve(&self, series: &[&[DataPoint]]) -> Result<Domain, EmptyDomainError> {
        let domain = Domain {
            x: self.resolve_axis(series, Axis::X)?,
            y: self.resolve_axis(series, Axis::Y)?,
        };
        log::debug!("resolved domain x={:?} y={:?}", domain.x, domain.y);
        Ok(domain)
    }

    /// Resolves both axes and then applies [`Self::padding`] for a plot of `plot` pixels.
    pub fn resolve_for_plot(
        &self,
        series: &[&[DataPoint]],
        plot: Size,
    ) -> Result<Domain, EmptyDomainError> {
        let domain = self.resolve(series)?;
        Ok(self.padded(domain, plot))
    }

    /// Expands `domain` so data lands `padding` pixels inside a plot of `plot` pixels.
    ///
    /// Log axes are left untouched. An axis that did not cross zero does not cross it after
    /// padding either.
    pub fn padded(&self, domain: Domain, plot: Size) -> Domain {
        let (x_px, y_px) = if self.horizontal {
            (plot.height, plot.width)
        } else {
            (plot.width, plot.height)
        };
        let pad = |extent, kind, px_pad, px_range| {
            if kind == ScaleKind::Log {
                extent
            } else {
                pad_extent(extent, px_pad, px_range)
            }
        };
        Domain {
            x: pad(domain.x, self.x_kind, self.padding.x, x_px),
            y: pad(domain.y, self.y_kind, self.padding.y, y_px),
        }
    }

    fn resolve_axis(
        &self,
        series: &[&[DataPoint]],
        axis: Axis,
    ) -> Result<(f64, f64), EmptyDomainError> {
        let explicit = match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        };
        if let Some(extent) = explicit {
            return Ok(ordered(extent));
        }

        let (mut min, mut max) = axis_extent(series, axis)?;
        let kind = self.kind(axis);
        if self.include_zero && axis == Axis::Y && kind != ScaleKind::Log {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if min == max {
            return Ok(widen_single(min));
        }
        if let (Some(count), ScaleKind::Linear) = (self.nice, kind) {
            (min, max) = nice_domain(min, max, count);
        }
        Ok((min, max))
    }
}

/// Scans the finite extent of `axis` over all series.
///
/// `x0`/`y0` contribute when present. Placeholder points without a value are skipped entirely.
pub fn axis_extent(series: &[&[DataPoint]], axis: Axis) -> Result<(f64, f64), EmptyDomainError> {
    series
        .iter()
        .flat_map(|points| points.iter())
        .filter(|p| p.has_value())
        .filter_map(|p| match axis {
            Axis::X => p.x_extent(),
            Axis::Y => p.y_extent(),
        })
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
        .ok_or(EmptyDomainError { axis })
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn widen_single(v: f64) -> (f64, f64) {
    if v == 0.0 {
        (0.0, 2.0 * SINGLE_VALUE_PADDING)
    } else {
        (v - SINGLE_VALUE_PADDING, v + SINGLE_VALUE_PADDING)
    }
}

/// Grows `(min, max)` so the original extent spans `range - 2 * pad` pixels of `range`.
fn pad_extent((min, max): (f64, f64), pad: f64, range: f64) -> (f64, f64) {
    let inner = range - 2.0 * pad;
    if pad <= 0.0 || inner <= 0.0 || !range.is_finite() {
        return (min, max);
    }
    let extent = max - min;
    let grow = extent * range / inner - extent;
    let (lo, hi) = (min - grow / 2.0, max + grow / 2.0);
    if min >= 0.0 && lo < 0.0 {
        // Anchor at zero and put all of the padding on the far side.
        (0.0, max * range / (range - pad))
    } else if max <= 0.0 && hi > 0.0 {
        (min * range / (range - pad), 0.0)
    } else {
        (lo, hi)
    }
}
