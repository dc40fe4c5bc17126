// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie geometry.
//!
//! Angles are in radians, measured clockwise from 12 o'clock. Slices follow data order and sweep
//! in proportion to `max(y, 0)`.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, TAU};

use kurbo::{BezPath, Circle, Point, Shape};
use vela_core::DataPoint;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::prop::DatumProp;

/// Distance from the outer edge to the default label radius, in pixels.
pub const LABEL_INSET: f64 = 12.0;

/// One slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceGeometry {
    /// Pie center.
    pub center: Point,
    /// Start angle.
    pub start_angle: f64,
    /// End angle, never before `start_angle`.
    pub end_angle: f64,
    /// Inner radius (0 for a pie, positive for a donut).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Gap subtracted from the sweep, split evenly between both edges.
    pub pad_angle: f64,
    /// Label anchor at the middle angle on the label radius.
    pub label_position: Point,
}

impl SliceGeometry {
    /// The swept angle before padding.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// The annular sector after padding. Slices narrower than their padding are empty.
    pub fn path(&self, tolerance: f64) -> BezPath {
        let sweep = (self.sweep() - self.pad_angle).max(0.0);
        if sweep == 0.0 || self.outer_radius <= 0.0 {
            return BezPath::new();
        }
        let start = self.start_angle + self.pad_angle.min(self.sweep()) / 2.0 - FRAC_PI_2;
        Circle::new(self.center, self.outer_radius)
            .segment(self.inner_radius.max(0.0), start, sweep)
            .path_elements(tolerance)
            .collect()
    }
}

/// Returns the point at `angle` on a circle of `radius` around `center`.
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.sin(),
        center.y - radius * angle.cos(),
    )
}

/// Pie layout options.
#[derive(Clone, Debug)]
pub struct PieLayout {
    /// Pie center.
    pub center: Point,
    /// Angle of the first slice's leading edge.
    pub start_angle: f64,
    /// Angle the last slice ends at.
    pub end_angle: f64,
    /// Gap between adjacent slices.
    pub pad_angle: f64,
    /// Inner radius, per datum.
    pub inner_radius: DatumProp<f64>,
    /// Outer radius, per datum.
    pub radius: DatumProp<f64>,
    /// Label radius, per datum. Defaults to the outer radius less [`LABEL_INSET`].
    pub label_radius: Option<DatumProp<f64>>,
}

impl PieLayout {
    /// A full pie of `radius` around `center`.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            start_angle: 0.0,
            end_angle: TAU,
            pad_angle: 0.0,
            inner_radius: DatumProp::Value(0.0),
            radius: DatumProp::Value(radius),
            label_radius: None,
        }
    }

    /// Sets the angular range.
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.end_angle = end_angle;
        self
    }

    /// Sets the gap between slices.
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    /// Sets the inner radius.
    pub fn with_inner_radius(mut self, inner_radius: impl Into<DatumProp<f64>>) -> Self {
        self.inner_radius = inner_radius.into();
        self
    }

    /// Sets the outer radius.
    pub fn with_radius(mut self, radius: impl Into<DatumProp<f64>>) -> Self {
        self.radius = radius.into();
        self
    }

    /// Sets the label radius.
    pub fn with_label_radius(mut self, label_radius: impl Into<DatumProp<f64>>) -> Self {
        self.label_radius = Some(label_radius.into());
        self
    }

    /// Resolves one slice per datum. Placeholders yield `None` at their index.
    ///
    /// Negative values and an all-zero total produce zero-sweep slices.
    pub fn resolve_slices(&self, data: &[DataPoint]) -> Vec<Option<SliceGeometry>> {
        let weight = |p: &DataPoint| p.y.filter(|v| v.is_finite()).map(|v| v.max(0.0));
        let total: f64 = data.iter().filter_map(weight).sum();
        let span = self.end_angle - self.start_angle;
        let outer_radii: Vec<f64> = self
            .radius
            .resolve_all(data)
            .into_iter()
            .map(|r| r.max(0.0))
            .collect();
        let inner_radii = self.inner_radius.resolve_all(data);
        let label_radii: Vec<f64> = match &self.label_radius {
            Some(r) => r.resolve_all(data),
            None => outer_radii
                .iter()
                .map(|r| (r - LABEL_INSET).max(0.0))
                .collect(),
        };
        let mut angle = self.start_angle;
        let slices: Vec<Option<SliceGeometry>> = data
            .iter()
            .zip(outer_radii.iter().zip(&inner_radii).zip(&label_radii))
            .map(|(datum, ((&outer_radius, &inner_radius), &label_radius))| {
                let w = weight(datum)?;
                let sweep = if total > 0.0 { span * w / total } else { 0.0 };
                let start_angle = angle;
                angle += sweep;
                Some(SliceGeometry {
                    center: self.center,
                    start_angle,
                    end_angle: angle,
                    inner_radius,
                    outer_radius,
                    pad_angle: self.pad_angle,
                    label_position: polar(self.center, label_radius, start_angle + sweep / 2.0),
                })
            })
            .collect();
        log::trace!("resolved {} slices over a total of {total}", slices.len());
        slices
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::sync::Arc;
    use alloc::vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sweeps_are_proportional_and_fill_the_circle() {
        let data = vec![
            DataPoint::new(1.0, 1.0).with_x_name("a"),
            DataPoint::new(2.0, 3.0).with_x_name("b"),
        ];
        let slices = PieLayout::new(Point::new(0.0, 0.0), 100.0).resolve_slices(&data);
        let a = slices[0].unwrap();
        let b = slices[1].unwrap();
        assert!(close(b.sweep(), 3.0 * a.sweep()));
        assert!(close(a.sweep() + b.sweep(), TAU));
        assert_eq!(a.start_angle, 0.0);
        assert_eq!(b.start_angle, a.end_angle);
    }

    #[test]
    fn labels_sit_on_the_inset_radius_at_the_middle_angle() {
        let data = vec![DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 1.0)];
        let slices = PieLayout::new(Point::new(100.0, 100.0), 50.0).resolve_slices(&data);
        // First half-circle: the middle angle is 3 o'clock.
        let p = slices[0].unwrap().label_position;
        assert!(close(p.x, 138.0) && close(p.y, 100.0), "{p:?}");
        let p = slices[1].unwrap().label_position;
        assert!(close(p.x, 62.0) && close(p.y, 100.0), "{p:?}");
    }

    #[test]
    fn per_datum_radii() {
        let mut big = DataPoint::new(1.0, 1.0);
        big.metadata.insert("radius".into(), 80.into());
        let data = vec![big, DataPoint::new(2.0, 1.0)];
        let layout = PieLayout::new(Point::ORIGIN, 40.0)
            .with_radius(DatumProp::field("radius", 40.0))
            .with_label_radius(DatumProp::func(|ctx| {
                let radius = ctx.datum.field("radius").and_then(Value::as_f64);
                radius.unwrap_or(40.0) - 20.0
            }));
        let slices = layout.resolve_slices(&data);
        assert_eq!(slices[0].unwrap().outer_radius, 80.0);
        assert_eq!(slices[1].unwrap().outer_radius, 40.0);
        assert!(close(slices[1].unwrap().label_position.x, -20.0));
    }

    #[test]
    fn zero_negative_and_missing_values() {
        let data = vec![
            DataPoint::new(1.0, 2.0),
            DataPoint::new(2.0, -5.0),
            DataPoint::missing(3.0),
            DataPoint::new(4.0, 0.0),
        ];
        let slices = PieLayout::new(Point::ORIGIN, 10.0).resolve_slices(&data);
        assert!(close(slices[0].unwrap().sweep(), TAU));
        assert_eq!(slices[1].unwrap().sweep(), 0.0);
        assert!(slices[2].is_none());
        assert_eq!(slices[3].unwrap().sweep(), 0.0);
        assert!(slices[1].unwrap().path(0.1).elements().is_empty());

        let zeros = vec![DataPoint::new(1.0, 0.0), DataPoint::new(2.0, 0.0)];
        let slices = PieLayout::new(Point::ORIGIN, 10.0).resolve_slices(&zeros);
        assert!(slices.iter().all(|s| s.unwrap().sweep() == 0.0));
    }

    #[test]
    fn radius_callbacks_fill_a_table_for_every_datum() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let data = vec![
            DataPoint::new(1.0, 1.0),
            DataPoint::missing(2.0),
            DataPoint::new(3.0, 1.0),
        ];
        let slices = PieLayout::new(Point::ORIGIN, 10.0)
            .with_radius(DatumProp::func(move |ctx| {
                counter.fetch_add(1, Ordering::Relaxed);
                10.0 * (ctx.index + 1) as f64
            }))
            .resolve_slices(&data);
        // Placeholders are resolved too: the table is complete before any slice is placed.
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        assert!(slices[1].is_none());
        assert_eq!(slices[2].unwrap().outer_radius, 30.0);
        assert_eq!(slices[2].unwrap().inner_radius, 0.0);
    }

    #[test]
    fn padding_narrows_the_drawn_sector() {
        let slice = SliceGeometry {
            center: Point::ORIGIN,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
            inner_radius: 0.0,
            outer_radius: 10.0,
            pad_angle: 0.2,
            label_position: Point::ORIGIN,
        };
        let bounds = slice.path(0.01).bounding_box();
        // The quarter from 12 to 3 o'clock, pulled off both axes by the padding.
        assert!(bounds.x0 >= -1e-9 && bounds.x1 <= 10.0 + 1e-9);
        assert!(bounds.y1 <= 1e-9 && bounds.y0 >= -10.0 - 1e-9);
        assert!(bounds.x1 < 10.0 && bounds.y0 > -10.0);
    }
}
