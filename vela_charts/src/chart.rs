// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plumbing shared by the chart builders.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use vela_core::DataPoint;
use vela_transforms::{DataFormatError, DataInput, Normalizer, SortKey, SortOrder, sort_points};

use crate::ChartError;
use crate::context::ResolveContext;
use crate::domain::DomainSpec;

/// Optional reordering applied after normalization.
pub type Sort = Option<(SortKey, SortOrder)>;

/// Normalizes sibling inputs with one normalizer, so a category lands on the same ordinal in
/// every series.
pub(crate) fn normalize_series(
    inputs: &[DataInput],
    categories: &[String],
    sort: Sort,
) -> Result<Vec<Vec<DataPoint>>, DataFormatError> {
    let mut normalizer = Normalizer::new().with_x_categories(categories.iter().cloned());
    inputs
        .iter()
        .map(|input| {
            let mut points = normalizer.normalize(input)?;
            if let Some((key, order)) = sort {
                sort_points(&mut points, key, order);
            }
            Ok(points)
        })
        .collect()
}

/// Resolves the domain of `series` for `plot` and builds the scales.
pub(crate) fn plot_context(
    spec: &DomainSpec,
    series: &[&[DataPoint]],
    plot: Rect,
) -> Result<ResolveContext, ChartError> {
    let domain = spec.resolve_for_plot(series, plot.size())?;
    Ok(ResolveContext::for_plot(domain, spec, plot)?)
}
