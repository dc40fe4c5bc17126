// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convenience builder for bar charts.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use vela_core::{DataPoint, Group, MarkId, TextAnchor, TextBaseline};
use vela_transforms::{DataInput, SortKey, SortOrder};

use crate::ChartError;
use crate::bar::{BarGeometry, BarLayout};
use crate::chart::{Sort, normalize_series, plot_context};
use crate::compose::compose;
use crate::domain::DomainSpec;
use crate::label::{LabelGeometry, format_number};
use crate::primitive::{BarPrimitive, LabelPrimitive, Primitive};

/// Default distance in pixels between a bar end and its label.
pub const DEFAULT_BAR_LABEL_OFFSET: f64 = 4.0;

/// A single-series bar chart.
///
/// The value domain includes zero and bars are sorted by ascending `x` unless configured
/// otherwise.
#[derive(Clone, Debug)]
pub struct BarChartSpec {
    /// Id of the chart group; child groups and marks derive their ids from it.
    pub id: MarkId,
    /// Domain options.
    pub domain: DomainSpec,
    /// Width, alignment and corner rounding.
    pub layout: BarLayout,
    /// Predefined order of `x` categories.
    pub categories: Vec<String>,
    /// Reordering applied after normalization.
    pub sort: Sort,
    /// Template for every bar.
    pub bar: Arc<dyn Primitive<BarGeometry> + Send + Sync>,
    /// Template for value labels; `None` draws no labels.
    pub labels: Option<Arc<dyn Primitive<LabelGeometry> + Send + Sync>>,
    /// Distance in pixels between a bar end and its label.
    pub label_offset: f64,
}

impl BarChartSpec {
    /// Creates a bar chart with default primitives.
    pub fn new(id: MarkId) -> Self {
        Self {
            id,
            domain: DomainSpec::new().with_include_zero(true),
            layout: BarLayout::default(),
            categories: Vec::new(),
            sort: Some((SortKey::X, SortOrder::Asc)),
            bar: Arc::new(BarPrimitive::new()),
            labels: None,
            label_offset: DEFAULT_BAR_LABEL_OFFSET,
        }
    }

    /// Sets the domain options.
    pub fn with_domain(mut self, domain: DomainSpec) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the bar layout.
    pub fn with_layout(mut self, layout: BarLayout) -> Self {
        self.layout = layout;
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

    /// Sets the bar template.
    pub fn with_bar(mut self, bar: impl Primitive<BarGeometry> + Send + Sync + 'static) -> Self {
        self.bar = Arc::new(bar);
        self
    }

    /// Draws value labels with `labels`.
    pub fn with_labels(
        mut self,
        labels: impl Primitive<LabelGeometry> + Send + Sync + 'static,
    ) -> Self {
        self.labels = Some(Arc::new(labels));
        self
    }

    /// Draws value labels with the default label template.
    pub fn with_default_labels(self) -> Self {
        self.with_labels(LabelPrimitive::new())
    }

    /// Builds the chart into `plot`.
    ///
    /// The returned group holds the bar group and, when labels are enabled, the label group.
    pub fn build(&self, data: &DataInput, plot: Rect) -> Result<Group, ChartError> {
        let data = core::slice::from_ref(data);
        let mut series = normalize_series(data, &self.categories, self.sort)?;
        let points = series.pop().unwrap_or_default();
        log::debug!("building bar chart of {} points", points.len());
        let ctx = plot_context(&self.domain, &[&points], plot)?;
        let bars = self.layout.resolve(&points, &ctx)?;

        let mut chart = Group::new(self.id).with_role("presentation");
        chart.push(compose(
            self.id.child(0),
            "presentation",
            &points,
            &bars,
            self.bar.as_ref(),
        ));
        if let Some(labels) = &self.labels {
            let geometries: Vec<Option<LabelGeometry>> = bars
                .iter()
                .zip(&points)
                .map(|(bar, datum)| bar.as_ref().map(|b| end_label(b, datum, self.label_offset)))
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

// Places a label just past the value end of a bar, on the side the bar grows toward.
fn end_label(bar: &BarGeometry, datum: &DataPoint, offset: f64) -> LabelGeometry {
    let p = bar.position;
    let center = bar.rect.center();
    let text = match &datum.label {
        Some(label) => label.clone(),
        None => format_number(datum.y.unwrap_or(0.0)),
    };
    if p.horizontal {
        let forward = p.x >= p.x0;
        LabelGeometry {
            pos: Point::new(if forward { p.x + offset } else { p.x - offset }, center.y),
            text,
            anchor: if forward {
                TextAnchor::Start
            } else {
                TextAnchor::End
            },
            baseline: TextBaseline::Middle,
        }
    } else {
        let up = p.y <= p.y0;
        LabelGeometry {
            pos: Point::new(center.x, if up { p.y - offset } else { p.y + offset }),
            text,
            anchor: TextAnchor::Middle,
            baseline: if up {
                TextBaseline::Alphabetic
            } else {
                TextBaseline::Hanging
            },
        }
    }
}
