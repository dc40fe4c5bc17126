// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar geometry.
//!
//! [`resolve_bar`] places a datum in pixel space (position along the independent axis, value end
//! and baseline). [`bar_rect`] then turns that position into a rectangle given a width, an
//! alignment and per-corner radii.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Rect, RoundedRectRadii};
use vela_core::DataPoint;

use crate::context::ResolveContext;
use crate::prop::{DatumContext, DatumProp};
use crate::scale::{ScaleError, ScaleKind};

/// Bar width used when there are fewer than two bars to divide the axis between.
pub const DEFAULT_BAR_WIDTH: f64 = 8.0;
/// Default fraction of each bar slot filled by the bar.
pub const DEFAULT_BAR_RATIO: f64 = 0.5;

// Largest integer exactly representable in an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Where a bar sits relative to its position on the independent axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// The bar starts at the position and extends toward larger `x`.
    Start,
    /// The bar is centered on the position.
    #[default]
    Middle,
    /// The bar ends at the position.
    End,
}

/// A datum placed in screen space.
///
/// Vertical bars run from `(x0, y0)` (baseline) to `(x, y)` (value end) with `x == x0`.
/// Horizontal bars have `y == y0` and run from `x0` to `x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarPosition {
    /// Screen `x` of the value end.
    pub x: f64,
    /// Screen `y` of the value end.
    pub y: f64,
    /// Screen `x` of the baseline.
    pub x0: f64,
    /// Screen `y` of the baseline.
    pub y0: f64,
    /// Whether the bar runs horizontally.
    pub horizontal: bool,
}

impl BarPosition {
    /// Pixel length of the bar along its value axis.
    pub fn length(&self) -> f64 {
        if self.horizontal {
            (self.x - self.x0).abs()
        } else {
            (self.y - self.y0).abs()
        }
    }
}

/// The baseline a bar grows from when the datum has no `y0`.
///
/// `0` if the value domain straddles zero, otherwise the domain end nearest zero. Log scales use
/// a tiny positive stand-in.
pub fn default_baseline(domain: (f64, f64), kind: ScaleKind) -> f64 {
    if kind == ScaleKind::Log {
        return 1.0 / MAX_SAFE_INTEGER;
    }
    let (min, max) = domain;
    if min < 0.0 && max <= 0.0 {
        max
    } else if min >= 0.0 {
        min
    } else {
        0.0
    }
}

/// Places a datum in screen space.
///
/// Returns `Ok(None)` for placeholder points. A log-scale stand-in baseline is clamped to the
/// plot so bars stay finite.
pub fn resolve_bar(
    datum: &DataPoint,
    ctx: &ResolveContext,
) -> Result<Option<BarPosition>, ScaleError> {
    let Some(y) = datum.y.filter(|v| v.is_finite()) else {
        return Ok(None);
    };
    let independent = ctx.x.try_map(datum.x)?;
    let value = ctx.y.try_map(y)?;
    let baseline = match datum.y0.filter(|v| v.is_finite()) {
        Some(y0) => ctx.y.try_map(y0)?,
        None => {
            let b = ctx.y.map(default_baseline(ctx.domain.y, ctx.y.kind()));
            let (r0, r1) = ctx.y.range();
            b.clamp(r0.min(r1), r0.max(r1))
        }
    };
    let position = if ctx.horizontal {
        BarPosition {
            x: value,
            y: independent,
            x0: baseline,
            y0: independent,
            horizontal: true,
        }
    } else {
        BarPosition {
            x: independent,
            y: value,
            x0: independent,
            y0: baseline,
            horizontal: false,
        }
    };
    log::trace!("bar at x={} resolved to {position:?}", datum.x);
    Ok(Some(position))
}

/// Bar width in pixels.
///
/// An explicit width wins; otherwise `ratio` of an equal share of `extent` pixels split between
/// `count + 2` slots. Never narrower than one pixel.
pub fn bar_width(explicit: Option<f64>, ratio: f64, extent: f64, count: usize) -> f64 {
    let width = match explicit {
        Some(w) => w,
        None if count < 2 => ratio * DEFAULT_BAR_WIDTH,
        None => ratio * extent / (count + 2) as f64,
    };
    width.max(1.0)
}

/// Corner radii relative to the bar: "top" is the value end, "bottom" the baseline end.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarRadii {
    /// Value end, left side when looking from the baseline.
    pub top_left: f64,
    /// Value end, right side when looking from the baseline.
    pub top_right: f64,
    /// Baseline end, right side.
    pub bottom_right: f64,
    /// Baseline end, left side.
    pub bottom_left: f64,
}

impl BarRadii {
    /// Rounds both value-end corners by `r`.
    pub fn from_top(r: f64) -> Self {
        Self {
            top_left: r,
            top_right: r,
            ..Self::default()
        }
    }

    /// Limits every radius to half the bar width, and the baseline radii to what the value
    /// radii leave of the bar length.
    pub fn clamped(self, width: f64, length: f64) -> Self {
        let half = (width / 2.0).max(0.0);
        let top = |r: f64| r.max(0.0).min(half).min(length);
        let (top_left, top_right) = (top(self.top_left), top(self.top_right));
        let room = (length - top_left.max(top_right)).max(0.0);
        let bottom = |r: f64| r.max(0.0).min(half).min(room);
        Self {
            top_left,
            top_right,
            bottom_right: bottom(self.bottom_right),
            bottom_left: bottom(self.bottom_left),
        }
    }
}

/// Per-side and per-corner radius properties. A specific corner wins over its side.
#[derive(Clone, Debug, Default)]
pub struct Corners {
    /// Both value-end corners.
    pub top: Option<DatumProp<f64>>,
    /// Value end, left.
    pub top_left: Option<DatumProp<f64>>,
    /// Value end, right.
    pub top_right: Option<DatumProp<f64>>,
    /// Both baseline corners.
    pub bottom: Option<DatumProp<f64>>,
    /// Baseline end, left.
    pub bottom_left: Option<DatumProp<f64>>,
    /// Baseline end, right.
    pub bottom_right: Option<DatumProp<f64>>,
}

/// Bar corner rounding.
#[derive(Clone, Debug)]
pub enum CornerRadius {
    /// One radius for both value-end corners.
    Uniform(DatumProp<f64>),
    /// Independently resolved corners.
    Corners(Corners),
}

impl Default for CornerRadius {
    fn default() -> Self {
        Self::Uniform(DatumProp::Value(0.0))
    }
}

impl From<f64> for CornerRadius {
    fn from(r: f64) -> Self {
        Self::Uniform(DatumProp::Value(r))
    }
}

impl CornerRadius {
    /// Resolves the four corners for one datum.
    pub fn resolve(&self, ctx: &DatumContext<'_>) -> BarRadii {
        match self {
            Self::Uniform(r) => BarRadii::from_top(r.resolve(ctx)),
            Self::Corners(c) => {
                let pick = |specific: &Option<DatumProp<f64>>, side: &Option<DatumProp<f64>>| {
                    specific
                        .as_ref()
                        .or(side.as_ref())
                        .map_or(0.0, |p| p.resolve(ctx))
                };
                BarRadii {
                    top_left: pick(&c.top_left, &c.top),
                    top_right: pick(&c.top_right, &c.top),
                    bottom_right: pick(&c.bottom_right, &c.bottom),
                    bottom_left: pick(&c.bottom_left, &c.bottom),
                }
            }
        }
    }

    /// Resolves the corners of every datum, placeholders included.
    pub fn resolve_all(&self, data: &[DataPoint]) -> Vec<BarRadii> {
        DatumContext::all(data)
            .map(|ctx| self.resolve(&ctx))
            .collect()
    }
}

/// A bar ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    /// Where the bar was placed.
    pub position: BarPosition,
    /// Screen rectangle.
    pub rect: Rect,
    /// Screen-oriented corner radii.
    pub radii: RoundedRectRadii,
}

/// Builds the screen rectangle of a placed bar.
///
/// Radii are clamped to the bar and rotated so "top" follows the value end, whichever way the
/// bar points on screen.
pub fn bar_rect(
    position: &BarPosition,
    width: f64,
    alignment: Alignment,
    radii: BarRadii,
) -> BarGeometry {
    let width = width.max(0.0);
    let radii = radii.clamped(width, position.length());
    let (rect, screen) = if position.horizontal {
        // Start grows toward larger `x`, which is up on screen.
        let (y0, y1) = match alignment {
            Alignment::Start => (position.y - width, position.y),
            Alignment::Middle => (position.y - width / 2.0, position.y + width / 2.0),
            Alignment::End => (position.y, position.y + width),
        };
        let rect = Rect::new(position.x0, y0, position.x, y1).abs();
        let screen = if position.x >= position.x0 {
            RoundedRectRadii::new(
                radii.bottom_left,
                radii.top_left,
                radii.top_right,
                radii.bottom_right,
            )
        } else {
            RoundedRectRadii::new(
                radii.top_left,
                radii.bottom_left,
                radii.bottom_right,
                radii.top_right,
            )
        };
        (rect, screen)
    } else {
        let (x0, x1) = match alignment {
            Alignment::Start => (position.x, position.x + width),
            Alignment::Middle => (position.x - width / 2.0, position.x + width / 2.0),
            Alignment::End => (position.x - width, position.x),
        };
        let rect = Rect::new(x0, position.y, x1, position.y0).abs();
        let screen = if position.y <= position.y0 {
            RoundedRectRadii::new(
                radii.top_left,
                radii.top_right,
                radii.bottom_right,
                radii.bottom_left,
            )
        } else {
            RoundedRectRadii::new(
                radii.bottom_left,
                radii.bottom_right,
                radii.top_right,
                radii.top_left,
            )
        };
        (rect, screen)
    };
    BarGeometry {
        position: *position,
        rect,
        radii: screen,
    }
}

/// Bar layout options shared by every datum of a series.
#[derive(Clone, Debug)]
pub struct BarLayout {
    /// Explicit bar width in pixels.
    pub bar_width: Option<DatumProp<f64>>,
    /// Fraction of each slot filled when the width is derived.
    pub bar_ratio: f64,
    /// Alignment relative to the datum position.
    pub alignment: Alignment,
    /// Corner rounding.
    pub corner_radius: CornerRadius,
}

impl Default for BarLayout {
    fn default() -> Self {
        Self {
            bar_width: None,
            bar_ratio: DEFAULT_BAR_RATIO,
            alignment: Alignment::Middle,
            corner_radius: CornerRadius::default(),
        }
    }
}

impl BarLayout {
    /// Resolves every bar of a series. Placeholders yield `None` at their index.
    pub fn resolve(
        &self,
        data: &[DataPoint],
        ctx: &ResolveContext,
    ) -> Result<Vec<Option<BarGeometry>>, ScaleError> {
        let widths = self
            .bar_width
            .as_ref()
            .map(|w| w.resolve_all(data))
            .unwrap_or_default();
        let radii = self.corner_radius.resolve_all(data);
        let extent = ctx.x.range_extent();
        data.iter()
            .zip(radii)
            .enumerate()
            .map(|(i, (datum, radii))| -> Result<Option<BarGeometry>, ScaleError> {
                let Some(position) = resolve_bar(datum, ctx)? else {
                    return Ok(None);
                };
                let width = bar_width(widths.get(i).copied(), self.bar_ratio, extent, data.len());
                Ok(Some(bar_rect(&position, width, self.alignment, radii)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::sync::Arc;
    use alloc::vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::{Domain, DomainSpec};

    fn ctx(domain: Domain, horizontal: bool) -> ResolveContext {
        let spec = DomainSpec::new().with_horizontal(horizontal);
        ResolveContext::for_plot(domain, &spec, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap()
    }

    #[test]
    fn baseline_follows_the_sign_of_the_domain() {
        assert_eq!(default_baseline((-2.0, 5.0), ScaleKind::Linear), 0.0);
        assert_eq!(default_baseline((-9.0, -3.0), ScaleKind::Linear), -3.0);
        assert_eq!(default_baseline((2.0, 5.0), ScaleKind::Linear), 2.0);
        assert_eq!(
            default_baseline((1.0, 10.0), ScaleKind::Log),
            1.0 / MAX_SAFE_INTEGER
        );
    }

    #[test]
    fn vertical_bars_grow_from_the_baseline() {
        let c = ctx(Domain::new((0.0, 10.0), (0.0, 10.0)), false);
        let p = resolve_bar(&DataPoint::new(5.0, 4.0), &c).unwrap().unwrap();
        assert_eq!((p.x, p.y, p.x0, p.y0), (50.0, 60.0, 50.0, 100.0));
        let g = bar_rect(&p, 10.0, Alignment::Middle, BarRadii::default());
        assert_eq!(g.rect, Rect::new(45.0, 60.0, 55.0, 100.0));
        let g = bar_rect(&p, 10.0, Alignment::Start, BarRadii::default());
        assert_eq!(g.rect.x0, 50.0);
        let g = bar_rect(&p, 10.0, Alignment::End, BarRadii::default());
        assert_eq!(g.rect.x1, 50.0);
    }

    #[test]
    fn explicit_y0_and_placeholders() {
        let c = ctx(Domain::new((0.0, 10.0), (0.0, 10.0)), false);
        let p = resolve_bar(&DataPoint::new(1.0, 8.0).with_y0(2.0), &c)
            .unwrap()
            .unwrap();
        assert_eq!(p.y0, 80.0);
        assert!(resolve_bar(&DataPoint::missing(1.0), &c).unwrap().is_none());
    }

    #[test]
    fn zero_extent_bars_have_zero_height() {
        let c = ctx(Domain::new((0.0, 10.0), (0.0, 10.0)), false);
        let p = resolve_bar(&DataPoint::new(3.0, 0.0), &c).unwrap().unwrap();
        let g = bar_rect(&p, 10.0, Alignment::Middle, BarRadii::from_top(4.0));
        assert_eq!(g.rect.height(), 0.0);
        assert_eq!(g.radii.top_left, 0.0);
    }

    #[test]
    fn width_from_ratio_and_count() {
        assert_eq!(bar_width(None, 0.5, 300.0, 4), 25.0);
        assert_eq!(bar_width(None, 0.5, 300.0, 1), 4.0);
        assert_eq!(bar_width(Some(0.2), 0.5, 300.0, 4), 1.0);
        assert_eq!(bar_width(Some(12.0), 0.5, 300.0, 4), 12.0);
    }

    #[test]
    fn uniform_radius_rounds_the_value_end_only() {
        let data = vec![DataPoint::new(1.0, 1.0)];
        let dctx = DatumContext::new(&data, 0).unwrap();
        let r = CornerRadius::from(3.0).resolve(&dctx);
        assert_eq!(
            r,
            BarRadii {
                top_left: 3.0,
                top_right: 3.0,
                bottom_right: 0.0,
                bottom_left: 0.0
            }
        );
    }

    #[test]
    fn specific_corners_override_sides() {
        let data = vec![DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 2.0)];
        let corners = CornerRadius::Corners(Corners {
            top: Some(2.0.into()),
            top_left: Some(DatumProp::func(|ctx| ctx.index as f64 + 5.0)),
            bottom: Some(1.0.into()),
            ..Corners::default()
        });
        let r = corners.resolve(&DatumContext::new(&data, 1).unwrap());
        assert_eq!(r.top_left, 6.0);
        assert_eq!(r.top_right, 2.0);
        assert_eq!(r.bottom_left, 1.0);
        assert_eq!(r.bottom_right, 1.0);
    }

    #[test]
    fn corner_callbacks_fill_a_table_for_every_datum() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let layout = BarLayout {
            bar_width: Some(10.0.into()),
            corner_radius: CornerRadius::Uniform(DatumProp::func(move |ctx| {
                counter.fetch_add(1, Ordering::Relaxed);
                ctx.index as f64
            })),
            ..BarLayout::default()
        };
        let data = vec![
            DataPoint::new(1.0, 8.0),
            DataPoint::missing(2.0),
            DataPoint::new(3.0, 8.0),
        ];
        let radii = layout.corner_radius.resolve_all(&data);
        assert_eq!(radii.len(), 3);
        assert_eq!(radii[2], BarRadii::from_top(2.0));

        let c = ctx(Domain::new((0.0, 10.0), (0.0, 10.0)), false);
        let bars = layout.resolve(&data, &c).unwrap();
        // Three from `resolve_all` above, three more from the layout, placeholder included.
        assert_eq!(calls.load(Ordering::Relaxed), 6);
        assert!(bars[1].is_none());
        assert_eq!(bars[2].unwrap().radii.top_left, 2.0);
    }

    #[test]
    fn radii_clamp_to_width_and_length() {
        let r = BarRadii {
            top_left: 20.0,
            top_right: 1.0,
            bottom_right: 20.0,
            bottom_left: 2.0,
        }
        .clamped(10.0, 7.0);
        assert_eq!(r.top_left, 5.0);
        assert_eq!(r.top_right, 1.0);
        assert_eq!(r.bottom_right, 2.0);
        assert_eq!(r.bottom_left, 2.0);
    }

    #[test]
    fn negative_bars_flip_their_rounded_end() {
        let c = ctx(Domain::new((0.0, 10.0), (-10.0, 10.0)), false);
        let datum = DataPoint::new(5.0, -5.0);
        let p = resolve_bar(&datum, &c).unwrap().unwrap();
        let g = bar_rect(&p, 10.0, Alignment::Middle, BarRadii::from_top(3.0));
        assert_eq!(g.rect, Rect::new(45.0, 50.0, 55.0, 75.0));
        assert_eq!(g.radii.top_left, 0.0);
        assert_eq!(g.radii.bottom_left, 3.0);
        assert_eq!(g.radii.bottom_right, 3.0);
    }

    #[test]
    fn horizontal_bars_swap_axes() {
        let c = ctx(Domain::new((0.0, 10.0), (0.0, 10.0)), true);
        let p = resolve_bar(&DataPoint::new(5.0, 4.0), &c).unwrap().unwrap();
        assert_eq!((p.x, p.y, p.x0, p.y0), (40.0, 50.0, 0.0, 50.0));
        let g = bar_rect(&p, 10.0, Alignment::Middle, BarRadii::from_top(3.0));
        assert_eq!(g.rect, Rect::new(0.0, 45.0, 40.0, 55.0));
        assert_eq!(g.radii.top_right, 3.0);
        assert_eq!(g.radii.bottom_right, 3.0);
        assert_eq!(g.radii.top_left, 0.0);
    }

    #[test]
    fn layouts_are_deterministic() {
        let c = ctx(Domain::new((0.0, 5.0), (0.0, 10.0)), false);
        let data = vec![
            DataPoint::new(1.0, 3.0),
            DataPoint::missing(2.0),
            DataPoint::new(3.0, 9.0),
        ];
        let layout = BarLayout::default();
        let a = layout.resolve(&data, &c).unwrap();
        assert_eq!(a, layout.resolve(&data, &c).unwrap());
        assert!(a[1].is_none());
        // 0.5 * 100 / (3 + 2)
        assert_eq!(a[0].unwrap().rect.width(), 10.0);
    }
}
