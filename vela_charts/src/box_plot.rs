// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box plot geometry.
//!
//! Every [`BoxSummary`] resolves to five sub-geometries along the value axis: a whisker from the
//! first quartile down to the minimum, a whisker from the third quartile up to the maximum, the
//! two quartile borders on either side of the median, and the median segment itself.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Line, Point, Rect, Vec2};
use serde_json::Value;
use vela_core::{DataPoint, TextAnchor, TextBaseline};
use vela_transforms::BoxSummary;

use crate::context::ResolveContext;
use crate::label::{LabelGeometry, format_number};
use crate::scale::ScaleError;

/// Default box width in pixels.
pub const DEFAULT_BOX_WIDTH: f64 = 10.0;
/// Default distance in pixels between a box and its labels.
pub const DEFAULT_LABEL_OFFSET: f64 = 5.0;

/// A whisker: the line from a quartile to an extreme value, and the cap across its end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WhiskerGeometry {
    /// From the quartile to the extreme value.
    pub line: Line,
    /// Across the extreme value, as wide as the box.
    pub cap: Line,
}

/// The five sub-geometries of one box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    /// Whisker from `q1` to `min`.
    pub min: WhiskerGeometry,
    /// Border spanning `q1` to the median.
    pub q1: Rect,
    /// Median segment across the box.
    pub median: Line,
    /// Border spanning the median to `q3`.
    pub q3: Rect,
    /// Whisker from `q3` to `max`.
    pub max: WhiskerGeometry,
}

/// One statistic of a five-number summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxStat {
    /// Minimum.
    Min,
    /// First quartile.
    Q1,
    /// Median.
    Median,
    /// Third quartile.
    Q3,
    /// Maximum.
    Max,
}

impl BoxStat {
    /// All statistics in ascending order.
    pub const ALL: [Self; 5] = [Self::Min, Self::Q1, Self::Median, Self::Q3, Self::Max];

    /// Returns the statistic's value in `summary`.
    pub fn value(self, summary: &BoxSummary) -> f64 {
        match self {
            Self::Min => summary.min,
            Self::Q1 => summary.q1,
            Self::Median => summary.median,
            Self::Q3 => summary.q3,
            Self::Max => summary.max,
        }
    }

    /// Metadata key the statistic is stored under by [`summary_datum`].
    pub fn key(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Q1 => "q1",
            Self::Median => "median",
            Self::Q3 => "q3",
            Self::Max => "max",
        }
    }
}

/// Turns a summary into the datum its primitives are evaluated against.
///
/// The datum sits at the median, and its metadata gains the five statistics under
/// [`BoxStat::key`] (shadowing source fields of the same name).
pub fn summary_datum(summary: &BoxSummary) -> DataPoint {
    let mut datum = DataPoint::new(summary.x, summary.median);
    datum.x_name = summary.x_name.clone();
    datum.metadata = summary.metadata.clone();
    for stat in BoxStat::ALL {
        let value =
            serde_json::Number::from_f64(stat.value(summary)).map_or(Value::Null, Value::Number);
        datum.metadata.insert(stat.key().into(), value);
    }
    datum
}

/// Points spanning the full extent of each summary, for domain calculation.
pub fn extent_points(summaries: &[BoxSummary]) -> Vec<DataPoint> {
    summaries
        .iter()
        .map(|s| DataPoint::new(s.x, s.max).with_y0(s.min))
        .collect()
}

/// Resolves the five sub-geometries of one box.
///
/// `box_width` is measured across the independent axis.
pub fn resolve_box(
    summary: &BoxSummary,
    ctx: &ResolveContext,
    box_width: f64,
) -> Result<BoxGeometry, ScaleError> {
    let at = |v: f64| ctx.point(summary.x, v);
    let (min, q1, median, q3, max) = (
        at(summary.min)?,
        at(summary.q1)?,
        at(summary.median)?,
        at(summary.q3)?,
        at(summary.max)?,
    );
    let half = across(ctx.horizontal) * (box_width.max(0.0) / 2.0);
    let whisker = |from: Point, to: Point| WhiskerGeometry {
        line: Line::new(from, to),
        cap: Line::new(to - half, to + half),
    };
    let geometry = BoxGeometry {
        min: whisker(q1, min),
        q1: Rect::from_points(q1 - half, median + half),
        median: Line::new(median - half, median + half),
        q3: Rect::from_points(median - half, q3 + half),
        max: whisker(q3, max),
    };
    log::trace!("box at x={} resolved to {geometry:?}", summary.x);
    Ok(geometry)
}

// Unit vector across the independent axis in screen space.
fn across(horizontal: bool) -> Vec2 {
    if horizontal {
        Vec2::new(0.0, 1.0)
    } else {
        Vec2::new(1.0, 0.0)
    }
}

/// Which statistics get a value label, and where.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxLabels {
    /// Label the minimum.
    pub min: bool,
    /// Label the first quartile.
    pub q1: bool,
    /// Label the median.
    pub median: bool,
    /// Label the third quartile.
    pub q3: bool,
    /// Label the maximum.
    pub max: bool,
    /// Distance in pixels from the box side.
    pub offset: f64,
}

impl Default for BoxLabels {
    fn default() -> Self {
        Self {
            min: false,
            q1: false,
            median: false,
            q3: false,
            max: false,
            offset: DEFAULT_LABEL_OFFSET,
        }
    }
}

impl BoxLabels {
    /// Labels the minimum.
    pub fn with_min_labels(mut self, on: bool) -> Self {
        self.min = on;
        self
    }

    /// Labels the maximum.
    pub fn with_max_labels(mut self, on: bool) -> Self {
        self.max = on;
        self
    }

    /// Labels the quartiles and the median.
    pub fn with_quartile_labels(mut self, on: bool) -> Self {
        self.q1 = on;
        self.median = on;
        self.q3 = on;
        self
    }

    /// Returns whether `stat` is labeled.
    pub fn enabled(&self, stat: BoxStat) -> bool {
        match stat {
            BoxStat::Min => self.min,
            BoxStat::Q1 => self.q1,
            BoxStat::Median => self.median,
            BoxStat::Q3 => self.q3,
            BoxStat::Max => self.max,
        }
    }

    /// Resolves the label for `stat`, or `None` when it is disabled or would duplicate another.
    ///
    /// Labels sit beside the box at the statistic's value: to the right of vertical boxes and
    /// above horizontal ones. When the minimum and maximum coincide only the maximum is labeled.
    pub fn resolve(
        &self,
        stat: BoxStat,
        summary: &BoxSummary,
        ctx: &ResolveContext,
        box_width: f64,
    ) -> Result<Option<LabelGeometry>, ScaleError> {
        if !self.enabled(stat) {
            return Ok(None);
        }
        if stat == BoxStat::Min && self.max && summary.min == summary.max {
            return Ok(None);
        }
        let value = stat.value(summary);
        let at = ctx.point(summary.x, value)?;
        let shift = box_width.max(0.0) / 2.0 + self.offset;
        let label = if ctx.horizontal {
            LabelGeometry {
                pos: Point::new(at.x, at.y - shift),
                text: format_number(value),
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Alphabetic,
            }
        } else {
            LabelGeometry {
                pos: Point::new(at.x + shift, at.y),
                text: format_number(value),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
            }
        };
        Ok(Some(label))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::domain::{Domain, DomainSpec};

    fn summary() -> BoxSummary {
        BoxSummary::from_samples(3.0, &[3.0, 5.0, 6.0, 9.0]).unwrap()
    }

    fn ctx(horizontal: bool) -> ResolveContext {
        ResolveContext::for_plot(
            Domain::new((0.0, 4.0), (0.0, 8.0)),
            &DomainSpec::new().with_horizontal(horizontal),
            Rect::new(0.0, 0.0, 100.0, 80.0),
        )
        .unwrap()
    }

    #[test]
    fn sub_geometries_follow_the_value_axis() {
        let g = resolve_box(&summary(), &ctx(false), 10.0).unwrap();
        // x = 3 of [0, 4] over 100 px; y grows up 10 px per unit from 80.
        assert_eq!(g.min.line, Line::new((75.0, 35.0), (75.0, 50.0)));
        assert_eq!(g.min.cap, Line::new((70.0, 50.0), (80.0, 50.0)));
        assert_eq!(g.max.line, Line::new((75.0, 12.5), (75.0, -10.0)));
        assert_eq!(g.q1, Rect::new(70.0, 25.0, 80.0, 35.0));
        assert_eq!(g.q3, Rect::new(70.0, 12.5, 80.0, 25.0));
        assert_eq!(g.median, Line::new((70.0, 25.0), (80.0, 25.0)));
    }

    #[test]
    fn horizontal_boxes_run_along_x() {
        let g = resolve_box(&summary(), &ctx(true), 10.0).unwrap();
        assert_eq!(g.median, Line::new((68.75, 15.0), (68.75, 25.0)));
        assert_eq!(g.q1, Rect::new(56.25, 15.0, 68.75, 25.0));
    }

    #[test]
    fn labels_sit_beside_the_box() {
        let labels = BoxLabels::default()
            .with_min_labels(true)
            .with_max_labels(true);
        let c = ctx(false);
        let max = labels
            .resolve(BoxStat::Max, &summary(), &c, 10.0)
            .unwrap()
            .unwrap();
        assert_eq!(max.pos, Point::new(85.0, -10.0));
        assert_eq!(max.text, "9");
        assert_eq!(max.anchor, TextAnchor::Start);
        assert!(
            labels
                .resolve(BoxStat::Median, &summary(), &c, 10.0)
                .unwrap()
                .is_none()
        );
        let q = BoxLabels::default().with_quartile_labels(true);
        let q3 = q.resolve(BoxStat::Q3, &summary(), &c, 10.0).unwrap();
        assert_eq!(q3.unwrap().text, "6.75");
    }

    #[test]
    fn coinciding_extremes_label_only_the_max() {
        let s = BoxSummary::from_samples(1.0, &[4.0]).unwrap();
        let labels = BoxLabels::default()
            .with_min_labels(true)
            .with_max_labels(true);
        let c = ctx(false);
        let min = labels.resolve(BoxStat::Min, &s, &c, 10.0).unwrap();
        let max = labels.resolve(BoxStat::Max, &s, &c, 10.0).unwrap();
        assert!(min.is_none());
        assert!(max.is_some());
    }

    #[test]
    fn summary_datums_carry_the_statistics() {
        let d = summary_datum(&summary());
        assert_eq!(d.y, Some(5.5));
        assert_eq!(d.field("q1").and_then(Value::as_f64), Some(4.5));
        assert_eq!(d.field("max").and_then(Value::as_f64), Some(9.0));
        let ext = extent_points(&[summary()]);
        assert_eq!(ext[0].y_extent(), Some((3.0, 9.0)));
    }
}
