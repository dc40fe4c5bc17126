// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convenience builders for line and area charts.
//!
//! Both take sibling series that share one domain. Areas can additionally be stacked, in which
//! case each series sits on the cumulative top of the series declared before it.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;
use vela_core::{DataPoint, Group, MarkId};
use vela_transforms::{DataInput, SortKey, SortOrder, StackContext, StackOffset};

use crate::ChartError;
use crate::chart::{Sort, normalize_series, plot_context};
use crate::compose::compose_series;
use crate::domain::DomainSpec;
use crate::primitive::{AreaPrimitive, CurvePrimitive, SeriesPrimitive, Style};
use crate::prop::SeriesProp;
use crate::series::{Interpolation, SeriesPath, resolve_series};

const PALETTE: [peniko::Color; 8] = [
    css::CORNFLOWER_BLUE,
    css::ORANGE,
    css::MEDIUM_SEA_GREEN,
    css::CRIMSON,
    css::GOLDENROD,
    css::SLATE_BLUE,
    css::DARK_CYAN,
    css::HOT_PINK,
];

/// Fill of the series at `index` in the categorical palette; colors repeat after eight series.
pub fn series_fill(index: usize) -> Brush {
    Brush::Solid(PALETTE[index % PALETTE.len()])
}

/// Returns a categorical fill palette for sibling series.
///
/// Colors are named CSS colors and repeat if `count` exceeds the palette length.
pub fn default_series_fills(count: usize) -> Vec<Brush> {
    (0..count).map(series_fill).collect()
}

// Resolves sibling series against their shared domain.
fn resolve_all(
    series: &[Vec<DataPoint>],
    domain: &DomainSpec,
    interpolation: Interpolation,
    plot: Rect,
) -> Result<Vec<SeriesPath>, ChartError> {
    let refs: Vec<&[DataPoint]> = series.iter().map(Vec::as_slice).collect();
    let ctx = plot_context(domain, &refs, plot)?;
    let paths = series
        .iter()
        .map(|points| resolve_series(points, &ctx, interpolation))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(paths)
}

/// Sibling line series.
#[derive(Clone, Debug)]
pub struct LineChartSpec {
    /// Id of the chart group; child groups and marks derive their ids from it.
    pub id: MarkId,
    /// Domain options.
    pub domain: DomainSpec,
    /// How vertices are joined.
    pub interpolation: Interpolation,
    /// Predefined order of `x` categories.
    pub categories: Vec<String>,
    /// Reordering applied to every series after normalization.
    pub sort: Sort,
    /// Template for every line.
    pub curve: Arc<dyn SeriesPrimitive + Send + Sync>,
}

impl LineChartSpec {
    /// Creates a line chart sorted by ascending `x`.
    pub fn new(id: MarkId) -> Self {
        Self {
            id,
            domain: DomainSpec::new(),
            interpolation: Interpolation::Linear,
            categories: Vec::new(),
            sort: Some((SortKey::X, SortOrder::Asc)),
            curve: Arc::new(CurvePrimitive::new()),
        }
    }

    /// Sets the domain options.
    pub fn with_domain(mut self, domain: DomainSpec) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the interpolation.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
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

    /// Sets the line template.
    pub fn with_curve(mut self, curve: impl SeriesPrimitive + Send + Sync + 'static) -> Self {
        self.curve = Arc::new(curve);
        self
    }

    /// Builds one line per input into `plot`.
    pub fn build(&self, series: &[DataInput], plot: Rect) -> Result<Group, ChartError> {
        let series = normalize_series(series, &self.categories, self.sort)?;
        log::debug!("building line chart of {} series", series.len());
        let paths = resolve_all(&series, &self.domain, self.interpolation, plot)?;
        let refs: Vec<&[DataPoint]> = series.iter().map(Vec::as_slice).collect();
        let mut chart = Group::new(self.id).with_role("presentation");
        chart.push(compose_series(
            self.id.child(0),
            "presentation",
            &refs,
            &paths,
            self.curve.as_ref(),
        ));
        Ok(chart)
    }
}

/// Stacking options for area charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StackSpec {
    /// Baseline offset mode.
    pub offset: StackOffset,
}

impl StackSpec {
    /// Stacks from a zero baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the baseline offset mode.
    pub fn with_offset(mut self, offset: StackOffset) -> Self {
        self.offset = offset;
        self
    }
}

/// Sibling area series, optionally stacked.
///
/// The value domain includes zero. Unstacked areas fill down to each point's `y0` or to the
/// default baseline.
#[derive(Clone, Debug)]
pub struct AreaChartSpec {
    /// Id of the chart group; child groups and marks derive their ids from it.
    pub id: MarkId,
    /// Domain options.
    pub domain: DomainSpec,
    /// How vertices are joined.
    pub interpolation: Interpolation,
    /// Predefined order of `x` categories.
    pub categories: Vec<String>,
    /// Reordering applied to every series after normalization.
    pub sort: Sort,
    /// Stacking; `None` overlays the series.
    pub stack: Option<StackSpec>,
    /// Template for every area.
    pub area: Arc<dyn SeriesPrimitive + Send + Sync>,
    /// Template for the outline along each area's top; `None` draws no outline.
    pub outline: Option<Arc<dyn SeriesPrimitive + Send + Sync>>,
}

impl AreaChartSpec {
    /// Creates an area chart sorted by ascending `x`, filled from [`series_fill`].
    pub fn new(id: MarkId) -> Self {
        let area = AreaPrimitive::new()
            .with_style(SeriesProp::func(|ctx| Style::filled(series_fill(ctx.index))));
        Self {
            id,
            domain: DomainSpec::new().with_include_zero(true),
            interpolation: Interpolation::Linear,
            categories: Vec::new(),
            sort: Some((SortKey::X, SortOrder::Asc)),
            stack: None,
            area: Arc::new(area),
            outline: None,
        }
    }

    /// Sets the domain options.
    pub fn with_domain(mut self, domain: DomainSpec) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the interpolation.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
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

    /// Stacks the series.
    pub fn with_stack(mut self, stack: StackSpec) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Sets the area template.
    pub fn with_area(mut self, area: impl SeriesPrimitive + Send + Sync + 'static) -> Self {
        self.area = Arc::new(area);
        self
    }

    /// Draws an outline along each area's top with `outline`.
    pub fn with_outline(mut self, outline: impl SeriesPrimitive + Send + Sync + 'static) -> Self {
        self.outline = Some(Arc::new(outline));
        self
    }

    /// Builds one area per input into `plot`, in declaration order.
    pub fn build(&self, series: &[DataInput], plot: Rect) -> Result<Group, ChartError> {
        let mut series = normalize_series(series, &self.categories, self.sort)?;
        if let Some(stack) = self.stack {
            series = StackContext::new(series)
                .with_offset(stack.offset)
                .stack()?
                .into_iter()
                .map(|s| s.points)
                .collect();
        }
        log::debug!(
            "building area chart of {} series (stacked: {})",
            series.len(),
            self.stack.is_some()
        );
        let paths = resolve_all(&series, &self.domain, self.interpolation, plot)?;
        let refs: Vec<&[DataPoint]> = series.iter().map(Vec::as_slice).collect();
        let mut chart = Group::new(self.id).with_role("presentation");
        chart.push(compose_series(
            self.id.child(0),
            "presentation",
            &refs,
            &paths,
            self.area.as_ref(),
        ));
        if let Some(outline) = &self.outline {
            chart.push(compose_series(
                self.id.child(1),
                "presentation",
                &refs,
                &paths,
                outline.as_ref(),
            ));
        }
        Ok(chart)
    }
}
