// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line and area geometry.
//!
//! A series resolves to a [`SeriesPath`]: its valued points in screen space, split into
//! gap-free segments wherever a placeholder sits. Every vertex also carries its baseline so the
//! same path can be drawn as a line or as an area.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, PathEl, Point};
use vela_core::DataPoint;

use crate::bar::default_baseline;
use crate::context::ResolveContext;
use crate::scale::ScaleError;

/// How consecutive vertices are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Straight segments.
    #[default]
    Linear,
    /// Steps changing value halfway between vertices along the independent axis.
    Step,
    /// Cubic segments that preserve monotonicity along the independent axis.
    MonotoneX,
}

/// A run of consecutive valued points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segment {
    /// Value ends, in data order.
    pub top: Vec<Point>,
    /// Baselines, paired with `top`.
    pub base: Vec<Point>,
}

/// A resolved series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesPath {
    /// Gap-free runs in data order.
    pub segments: Vec<Segment>,
    /// How vertices are joined.
    pub interpolation: Interpolation,
    /// Whether the independent axis runs vertically.
    pub horizontal: bool,
}

impl SeriesPath {
    /// The open curve through every segment's value ends.
    pub fn curve_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for segment in &self.segments {
            let Some(&first) = segment.top.first() else {
                continue;
            };
            path.move_to(first);
            self.trace(&mut path, &segment.top);
        }
        path
    }

    /// The closed regions between every segment's value ends and its baseline.
    ///
    /// The baseline is traced backwards with the same interpolation.
    pub fn area_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for segment in &self.segments {
            let (Some(&first), Some(&last_base)) = (segment.top.first(), segment.base.last())
            else {
                continue;
            };
            path.move_to(first);
            self.trace(&mut path, &segment.top);
            path.line_to(last_base);
            let base: Vec<Point> = segment.base.iter().rev().copied().collect();
            self.trace(&mut path, &base);
            path.close_path();
        }
        path
    }

    /// Number of valued vertices over all segments.
    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(|s| s.top.len()).sum()
    }

    // Continues `path`, which already sits at `pts[0]`, through the remaining points.
    // Interpolation runs with the independent axis along `x`, so horizontal series are
    // transposed in and out.
    fn trace(&self, path: &mut BezPath, pts: &[Point]) {
        if !self.horizontal {
            trace(path, pts, self.interpolation);
            return;
        }
        let swapped: Vec<Point> = pts.iter().copied().map(transpose).collect();
        let Some(&start) = swapped.first() else {
            return;
        };
        let mut along_x = BezPath::new();
        along_x.move_to(start);
        trace(&mut along_x, &swapped, self.interpolation);
        for el in along_x.elements().iter().skip(1) {
            path.push(match *el {
                PathEl::MoveTo(p) => PathEl::MoveTo(transpose(p)),
                PathEl::LineTo(p) => PathEl::LineTo(transpose(p)),
                PathEl::QuadTo(a, b) => PathEl::QuadTo(transpose(a), transpose(b)),
                PathEl::CurveTo(a, b, c) => {
                    PathEl::CurveTo(transpose(a), transpose(b), transpose(c))
                }
                PathEl::ClosePath => PathEl::ClosePath,
            });
        }
    }
}

fn transpose(p: Point) -> Point {
    Point::new(p.y, p.x)
}

/// Resolves a series in data order.
///
/// Placeholders end the current segment. The baseline of a vertex is its `y0`, or the default
/// baseline of the value domain.
pub fn resolve_series(
    points: &[DataPoint],
    ctx: &ResolveContext,
    interpolation: Interpolation,
) -> Result<SeriesPath, ScaleError> {
    let default_base = default_baseline(ctx.domain.y, ctx.y.kind());
    let (r0, r1) = ctx.y.range();
    let mut segments = Vec::new();
    let mut current = Segment::default();
    for p in points {
        let Some(y) = p.y.filter(|v| v.is_finite()) else {
            if !current.top.is_empty() {
                segments.push(core::mem::take(&mut current));
            }
            continue;
        };
        current.top.push(ctx.point(p.x, y)?);
        let base = match p.y0.filter(|v| v.is_finite()) {
            Some(y0) => ctx.point(p.x, y0)?,
            None => {
                let v = ctx.y.map(default_base).clamp(r0.min(r1), r0.max(r1));
                let i = ctx.x.try_map(p.x)?;
                if ctx.horizontal {
                    Point::new(v, i)
                } else {
                    Point::new(i, v)
                }
            }
        };
        current.base.push(base);
    }
    if !current.top.is_empty() {
        segments.push(current);
    }
    let path = SeriesPath {
        segments,
        interpolation,
        horizontal: ctx.horizontal,
    };
    log::trace!(
        "series of {} points resolved to {} segments",
        points.len(),
        path.segments.len()
    );
    Ok(path)
}

// `trace` for series whose independent axis is screen `x`.
fn trace(path: &mut BezPath, pts: &[Point], interpolation: Interpolation) {
    match interpolation {
        Interpolation::Linear => {
            for &p in pts.iter().skip(1) {
                path.line_to(p);
            }
        }
        Interpolation::Step => {
            for w in pts.windows(2) {
                let mid = (w[0].x + w[1].x) / 2.0;
                path.line_to((mid, w[0].y));
                path.line_to((mid, w[1].y));
            }
            if let [_, .., last] = pts {
                path.line_to(*last);
            }
        }
        Interpolation::MonotoneX => monotone_x(path, pts),
    }
}

fn monotone_x(path: &mut BezPath, pts: &[Point]) {
    if pts.len() < 3 {
        if let [_, last] = pts {
            path.line_to(*last);
        }
        return;
    }
    let n = pts.len();
    let mut tangents = alloc::vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_slope(pts[i - 1], pts[i], pts[i + 1]);
    }
    tangents[0] = end_slope(pts[0], pts[1], tangents[1]);
    tangents[n - 1] = end_slope(pts[n - 2], pts[n - 1], tangents[n - 2]);
    for i in 0..n - 1 {
        let (p0, p1) = (pts[i], pts[i + 1]);
        let dx = (p1.x - p0.x) / 3.0;
        path.curve_to(
            Point::new(p0.x + dx, p0.y + dx * tangents[i]),
            Point::new(p1.x - dx, p1.y - dx * tangents[i + 1]),
            p1,
        );
    }
}

// Steffen's tangent at p1, limited so the curve cannot overshoot its neighbors.
fn interior_slope(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / signed_or_zero(h0, h1);
    let s1 = (p2.y - p1.y) / signed_or_zero(h1, h0);
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() && !s0.is_nan() && !s1.is_nan() && !p.is_nan() {
        t
    } else {
        0.0
    }
}

fn end_slope(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        t
    } else {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    }
}

fn signed_or_zero(h: f64, other: f64) -> f64 {
    if h != 0.0 {
        h
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::{PathEl, Rect, Shape};

    use super::*;
    use crate::domain::{Domain, DomainSpec};

    fn ctx() -> ResolveContext {
        ResolveContext::for_plot(
            Domain::new((0.0, 4.0), (0.0, 4.0)),
            &DomainSpec::new(),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
        .unwrap()
    }

    fn pts(values: &[Option<f64>]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Some(v) => DataPoint::new(i as f64, *v),
                None => DataPoint::missing(i as f64),
            })
            .collect()
    }

    #[test]
    fn placeholders_split_segments() {
        let data = pts(&[Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)]);
        let path = resolve_series(&data, &ctx(), Interpolation::Linear).unwrap();
        assert_eq!(path.segments.len(), 2);
        assert_eq!(path.vertex_count(), 4);
        assert_eq!(
            path.segments[0].top,
            [Point::new(0.0, 75.0), Point::new(25.0, 50.0)]
        );
        let moves = path
            .curve_path()
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn area_baselines_use_y0_or_the_default() {
        let mut data = pts(&[Some(2.0), Some(3.0)]);
        data[1].y0 = Some(1.0);
        let path = resolve_series(&data, &ctx(), Interpolation::Linear).unwrap();
        assert_eq!(
            path.segments[0].base,
            [Point::new(0.0, 100.0), Point::new(25.0, 75.0)]
        );
        let area = path.area_path();
        assert!(matches!(area.elements().last(), Some(PathEl::ClosePath)));
        assert_eq!(area.bounding_box(), Rect::new(0.0, 25.0, 25.0, 100.0));
    }

    #[test]
    fn steps_change_value_halfway() {
        let data = pts(&[Some(0.0), Some(4.0)]);
        let path = resolve_series(&data, &ctx(), Interpolation::Step).unwrap();
        let els = path.curve_path().elements().to_vec();
        assert_eq!(
            els,
            vec![
                PathEl::MoveTo(Point::new(0.0, 100.0)),
                PathEl::LineTo(Point::new(12.5, 100.0)),
                PathEl::LineTo(Point::new(12.5, 0.0)),
                PathEl::LineTo(Point::new(25.0, 0.0)),
            ]
        );
    }

    fn horizontal_ctx(domain: Domain) -> ResolveContext {
        ResolveContext::for_plot(
            domain,
            &DomainSpec::new().with_horizontal(true),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
        .unwrap()
    }

    #[test]
    fn horizontal_steps_change_value_halfway_up() {
        let data = [DataPoint::new(0.0, 0.0), DataPoint::new(4.0, 4.0)];
        let ctx = horizontal_ctx(Domain::new((0.0, 4.0), (0.0, 4.0)));
        let path = resolve_series(&data, &ctx, Interpolation::Step).unwrap();
        assert!(path.horizontal);
        assert_eq!(
            path.curve_path().elements().to_vec(),
            vec![
                PathEl::MoveTo(Point::new(0.0, 100.0)),
                PathEl::LineTo(Point::new(0.0, 50.0)),
                PathEl::LineTo(Point::new(100.0, 50.0)),
                PathEl::LineTo(Point::new(100.0, 0.0)),
            ]
        );
    }

    #[test]
    fn horizontal_monotone_curves_do_not_overshoot_plateaus() {
        let data = [
            DataPoint::new(0.0, 0.0),
            DataPoint::new(1.0, 2.0),
            DataPoint::new(2.0, 2.0),
            DataPoint::new(3.0, 0.0),
        ];
        let ctx = horizontal_ctx(Domain::new((0.0, 3.0), (0.0, 2.0)));
        let path = resolve_series(&data, &ctx, Interpolation::MonotoneX).unwrap();
        let curve = path.curve_path();
        // Values run along screen x over [0, 100]; the plateau must not bulge past it.
        let bounds = curve.bounding_box();
        assert!(bounds.x0 >= -1e-9 && bounds.x1 <= 100.0 + 1e-9);
        assert!(
            curve
                .elements()
                .iter()
                .skip(1)
                .all(|el| matches!(el, PathEl::CurveTo(..)))
        );
        let end = curve.elements().last().unwrap().end_point();
        assert_eq!(end, Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn monotone_curves_stay_on_straight_data() {
        let line = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(6.0, 6.0),
        ];
        let mut path = BezPath::new();
        path.move_to(line[0]);
        monotone_x(&mut path, &line);
        for el in path.elements() {
            if let PathEl::CurveTo(a, b, c) = el {
                for p in [a, b, c] {
                    assert!((p.x - p.y).abs() < 1e-12, "{p:?} is off the line");
                }
            }
        }
    }

    #[test]
    fn monotone_curves_do_not_overshoot_plateaus() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 0.0),
        ];
        let mut path = BezPath::new();
        path.move_to(pts[0]);
        monotone_x(&mut path, &pts);
        let bounds = path.bounding_box();
        assert!(bounds.y0 >= 0.0 && bounds.y1 <= 2.0, "{bounds:?}");
    }

    #[test]
    fn single_points_and_empty_series() {
        let path = resolve_series(&pts(&[Some(1.0)]), &ctx(), Interpolation::MonotoneX).unwrap();
        assert_eq!(path.curve_path().elements().len(), 1);
        let empty = resolve_series(&pts(&[None, None]), &ctx(), Interpolation::Linear).unwrap();
        assert!(empty.segments.is_empty());
        assert!(empty.area_path().elements().is_empty());
    }
}
