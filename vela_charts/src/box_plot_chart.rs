// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convenience builder for box plots.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Line, Rect};
use serde_json::Value;
use vela_core::{DataPoint, Group, MarkId};
use vela_transforms::{BoxAccessors, summarize};

use crate::ChartError;
use crate::box_plot::{
    BoxGeometry, BoxLabels, BoxStat, DEFAULT_BOX_WIDTH, WhiskerGeometry, extent_points,
    resolve_box, summary_datum,
};
use crate::chart::plot_context;
use crate::compose::compose;
use crate::domain::DomainSpec;
use crate::label::LabelGeometry;
use crate::primitive::{
    BorderPrimitive, LabelPrimitive, Primitive, SegmentPrimitive, WhiskerPrimitive,
};

/// A box plot with one box per distinct `x`.
///
/// The chart group holds one child group per sub-primitive (min whisker, q1 border, median,
/// q3 border, max whisker), followed by one label group per labeled statistic. Primitives see a
/// datum placed at the median whose metadata carries the five statistics.
#[derive(Clone, Debug)]
pub struct BoxPlotChartSpec {
    /// Id of the chart group; child groups and marks derive their ids from it.
    pub id: MarkId,
    /// Domain options.
    pub domain: DomainSpec,
    /// How records are read.
    pub accessors: BoxAccessors,
    /// Box width in pixels, across the independent axis.
    pub box_width: f64,
    /// Which statistics are labeled.
    pub labels: BoxLabels,
    /// Whisker down to the minimum.
    pub min: Arc<dyn Primitive<WhiskerGeometry> + Send + Sync>,
    /// Border between the first quartile and the median.
    pub q1: Arc<dyn Primitive<Rect> + Send + Sync>,
    /// Median segment.
    pub median: Arc<dyn Primitive<Line> + Send + Sync>,
    /// Border between the median and the third quartile.
    pub q3: Arc<dyn Primitive<Rect> + Send + Sync>,
    /// Whisker up to the maximum.
    pub max: Arc<dyn Primitive<WhiskerGeometry> + Send + Sync>,
    /// Template for statistic labels.
    pub label: Arc<dyn Primitive<LabelGeometry> + Send + Sync>,
}

impl BoxPlotChartSpec {
    /// Creates a box plot reading samples from `x`/`y`.
    pub fn new(id: MarkId) -> Self {
        Self {
            id,
            domain: DomainSpec::new(),
            accessors: BoxAccessors::default(),
            box_width: DEFAULT_BOX_WIDTH,
            labels: BoxLabels::default(),
            min: Arc::new(WhiskerPrimitive::new()),
            q1: Arc::new(BorderPrimitive::new()),
            median: Arc::new(SegmentPrimitive::new()),
            q3: Arc::new(BorderPrimitive::new()),
            max: Arc::new(WhiskerPrimitive::new()),
            label: Arc::new(LabelPrimitive::new()),
        }
    }

    /// Sets the domain options.
    pub fn with_domain(mut self, domain: DomainSpec) -> Self {
        self.domain = domain;
        self
    }

    /// Sets how records are read.
    pub fn with_accessors(mut self, accessors: BoxAccessors) -> Self {
        self.accessors = accessors;
        self
    }

    /// Sets the box width.
    pub fn with_box_width(mut self, box_width: f64) -> Self {
        self.box_width = box_width;
        self
    }

    /// Sets which statistics are labeled.
    pub fn with_labels(mut self, labels: BoxLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Sets both whisker templates.
    pub fn with_whiskers(
        mut self,
        min: impl Primitive<WhiskerGeometry> + Send + Sync + 'static,
        max: impl Primitive<WhiskerGeometry> + Send + Sync + 'static,
    ) -> Self {
        self.min = Arc::new(min);
        self.max = Arc::new(max);
        self
    }

    /// Sets both quartile border templates.
    pub fn with_borders(
        mut self,
        q1: impl Primitive<Rect> + Send + Sync + 'static,
        q3: impl Primitive<Rect> + Send + Sync + 'static,
    ) -> Self {
        self.q1 = Arc::new(q1);
        self.q3 = Arc::new(q3);
        self
    }

    /// Sets the median template.
    pub fn with_median(mut self, median: impl Primitive<Line> + Send + Sync + 'static) -> Self {
        self.median = Arc::new(median);
        self
    }

    /// Sets the label template.
    pub fn with_label(
        mut self,
        label: impl Primitive<LabelGeometry> + Send + Sync + 'static,
    ) -> Self {
        self.label = Arc::new(label);
        self
    }

    /// Builds the chart from raw records into `plot`.
    pub fn build(&self, rows: &[Value], plot: Rect) -> Result<Group, ChartError> {
        let summaries = summarize(rows, &self.accessors)?;
        log::debug!(
            "building box plot of {} boxes from {} records",
            summaries.len(),
            rows.len()
        );
        let extent = extent_points(&summaries);
        let ctx = plot_context(&self.domain, &[&extent], plot)?;
        let data: Vec<DataPoint> = summaries.iter().map(summary_datum).collect();
        let boxes = summaries
            .iter()
            .map(|s| resolve_box(s, &ctx, self.box_width).map(Some))
            .collect::<Result<Vec<Option<BoxGeometry>>, _>>()?;

        let role = "presentation";
        let mut chart = Group::new(self.id).with_role(role);
        let mins = part(&boxes, |b| b.min);
        let q1s = part(&boxes, |b| b.q1);
        let medians = part(&boxes, |b| b.median);
        let q3s = part(&boxes, |b| b.q3);
        let maxes = part(&boxes, |b| b.max);
        chart.push(compose(self.id.child(0), role, &data, &mins, self.min.as_ref()));
        chart.push(compose(self.id.child(1), role, &data, &q1s, self.q1.as_ref()));
        chart.push(compose(
            self.id.child(2),
            role,
            &data,
            &medians,
            self.median.as_ref(),
        ));
        chart.push(compose(self.id.child(3), role, &data, &q3s, self.q3.as_ref()));
        chart.push(compose(self.id.child(4), role, &data, &maxes, self.max.as_ref()));

        for (n, stat) in (5..).zip(BoxStat::ALL) {
            if !self.labels.enabled(stat) {
                continue;
            }
            let labels = summaries
                .iter()
                .map(|s| self.labels.resolve(stat, s, &ctx, self.box_width))
                .collect::<Result<Vec<_>, _>>()?;
            chart.push(compose(self.id.child(n), role, &data, &labels, self.label.as_ref()));
        }
        Ok(chart)
    }
}

// Projects one sub-geometry out of every box.
fn part<T>(boxes: &[Option<BoxGeometry>], f: impl Fn(&BoxGeometry) -> T) -> Vec<Option<T>> {
    boxes.iter().map(|b| b.as_ref().map(&f)).collect()
}
