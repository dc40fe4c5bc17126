// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convenience builder for pie and donut charts.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use vela_core::{DataPoint, Group, MarkId};
use vela_transforms::DataInput;

use crate::ChartError;
use crate::chart::{Sort, normalize_series};
use crate::compose::compose;
use crate::label::{LabelGeometry, format_number};
use crate::pie::{PieLayout, SliceGeometry};
use crate::primitive::{LabelPrimitive, Primitive, SlicePrimitive};
use crate::prop::DatumProp;

/// A pie centered in its plot rectangle.
///
/// Slices follow data order unless a sort is set. Without an explicit radius the pie fills the
/// shorter side of the plot.
#[derive(Clone, Debug)]
pub struct PieChartSpec {
    /// Id of the chart group; child groups and marks derive their ids from it.
    pub id: MarkId,
    /// Angles, padding and radii. The center is replaced by the plot center at build time.
    pub layout: PieLayout,
    /// Outer radius, per datum; `None` fills the plot.
    pub radius: Option<DatumProp<f64>>,
    /// Predefined order of `x` categories.
    pub categories: Vec<String>,
    /// Reordering applied after normalization.
    pub sort: Sort,
    /// Template for every slice.
    pub slice: Arc<dyn Primitive<SliceGeometry> + Send + Sync>,
    /// Template for slice labels; `None` draws no labels.
    pub labels: Option<Arc<dyn Primitive<LabelGeometry> + Send + Sync>>,
}

impl PieChartSpec {
    /// Creates a full pie with default primitives and no labels.
    pub fn new(id: MarkId) -> Self {
        Self {
            id,
            layout: PieLayout::new(Point::ORIGIN, 0.0),
            radius: None,
            categories: Vec::new(),
            sort: None,
            slice: Arc::new(SlicePrimitive::new()),
            labels: None,
        }
    }

    /// Sets the angular range.
    pub fn with_angles(mut self, start_angle: f64, end_angle: f64) -> Self {
        self.layout = self.layout.with_angles(start_angle, end_angle);
        self
    }

    /// Sets the gap between slices.
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.layout = self.layout.with_pad_angle(pad_angle);
        self
    }

    /// Sets the inner radius, turning the pie into a donut.
    pub fn with_inner_radius(mut self, inner_radius: impl Into<DatumProp<f64>>) -> Self {
        self.layout = self.layout.with_inner_radius(inner_radius);
        self
    }

    /// Sets the outer radius.
    pub fn with_radius(mut self, radius: impl Into<DatumProp<f64>>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    /// Sets the label radius.
    pub fn with_label_radius(mut self, label_radius: impl Into<DatumProp<f64>>) -> Self {
        self.layout = self.layout.with_label_radius(label_radius);
        self
    }

    /// Predefines the order of `x` categories.
    pub fn with_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the reordering applied after normalization.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the slice template.
    pub fn with_slice(
        mut self,
        slice: impl Primitive<SliceGeometry> + Send + Sync + 'static,
    ) -> Self {
        self.slice = Arc::new(slice);
        self
    }

    /// Draws slice labels with `labels`.
    pub fn with_labels(
        mut self,
        labels: impl Primitive<LabelGeometry> + Send + Sync + 'static,
    ) -> Self {
        self.labels = Some(Arc::new(labels));
        self
    }

    /// Draws slice labels with the default label template.
    pub fn with_default_labels(self) -> Self {
        self.with_labels(LabelPrimitive::new())
    }

    /// Builds the chart into `plot`.
    pub fn build(&self, data: &DataInput, plot: Rect) -> Result<Group, ChartError> {
        let data = core::slice::from_ref(data);
        let mut series = normalize_series(data, &self.categories, self.sort)?;
        let points = series.pop().unwrap_or_default();
        log::debug!("building pie chart of {} slices", points.len());
        let mut layout = self.layout.clone();
        layout.center = plot.center();
        layout.radius = match &self.radius {
            Some(r) => r.clone(),
            None => DatumProp::Value(plot.width().min(plot.height()).abs() / 2.0),
        };
        let slices = layout.resolve_slices(&points);

        let mut chart = Group::new(self.id).with_role("presentation");
        chart.push(compose(
            self.id.child(0),
            "presentation",
            &points,
            &slices,
            self.slice.as_ref(),
        ));
        if let Some(labels) = &self.labels {
            let geometries: Vec<Option<LabelGeometry>> = slices
                .iter()
                .zip(&points)
                .map(|(slice, datum)| {
                    slice.map(|s| LabelGeometry::centered(s.label_position, slice_text(datum)))
                })
                .collect();
            chart.push(compose(
                self.id.child(1),
                "presentation",
                &points,
                &geometries,
                labels.as_ref(),
            ));
        }
        Ok(chart)
    }
}

// The datum's label, its category, or its position.
fn slice_text(datum: &DataPoint) -> String {
    datum
        .label
        .clone()
        .or_else(|| datum.x_name.clone())
        .unwrap_or_else(|| format_number(datum.x))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use core::f64::consts::PI;

    use serde_json::json;
    use vela_core::MarkPayload;

    use super::*;

    #[test]
    fn slices_fill_the_plot_and_follow_data_order() {
        let data = DataInput::records(vec![json!({"x": "a", "y": 1}), json!({"x": "b", "y": 3})]);
        let chart = PieChartSpec::new(MarkId::from_raw(4))
            .with_default_labels()
            .build(&data, Rect::new(0.0, 0.0, 200.0, 100.0))
            .unwrap();
        assert_eq!(chart.mark_count(), 4);
        let texts: Vec<String> = chart
            .marks()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["a", "b"]);
        let slice = chart.marks().next().unwrap().bounds().unwrap();
        // The first quarter runs from 12 to 3 o'clock on a radius of 50 around (100, 50).
        assert!((slice.x0 - 100.0).abs() < 0.1 && (slice.x1 - 150.0).abs() < 0.1);
        assert!(slice.y0.abs() < 0.1 && (slice.y1 - 50.0).abs() < 0.1);
    }

    #[test]
    fn radius_and_angles_are_configurable() {
        let data = DataInput::Numbers(vec![1.0, 1.0]);
        let chart = PieChartSpec::new(MarkId::from_raw(4))
            .with_radius(40.0)
            .with_angles(0.0, PI)
            .with_default_labels()
            .build(&data, Rect::new(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        let positions: Vec<_> = chart
            .marks()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.pos),
                _ => None,
            })
            .collect();
        // Half circle: labels sit at 45 and 135 degrees on a radius of 28 (40 less the inset).
        assert_eq!(positions.len(), 2);
        let dx = 28.0 * core::f64::consts::FRAC_1_SQRT_2;
        assert!((positions[0].x - (50.0 + dx)).abs() < 1e-9);
        assert!((positions[0].y - (50.0 - dx)).abs() < 1e-9);
        assert!((positions[1].x - (50.0 + dx)).abs() < 1e-9);
        assert!((positions[1].y - (50.0 + dx)).abs() < 1e-9);
        // Unnamed data falls back to the formatted position.
        let MarkPayload::Text(t) = &chart.marks().last().unwrap().payload else {
            panic!("expected text");
        };
        assert_eq!(t.text, "2");
    }
}
