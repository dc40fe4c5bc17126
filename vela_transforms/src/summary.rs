// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Five-number summaries for box plots.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Map, Value};

use crate::accessor::Accessor;
use crate::category::CategoryIndex;
use crate::normalize::DataFormatError;

/// A five-number summary positioned at `x`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxSummary {
    /// Independent-axis position (category ordinal for categorical input).
    pub x: f64,
    /// Category name when `x` was categorical.
    pub x_name: Option<String>,
    /// Minimum.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Maximum.
    pub max: f64,
    /// The first source record contributing to this summary.
    pub metadata: Map<String, Value>,
}

impl BoxSummary {
    /// Builds a summary from raw samples.
    ///
    /// Non-finite samples are ignored. Returns `None` if no finite sample remains.
    pub fn from_samples(x: f64, samples: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            x,
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            ..Self::default()
        })
    }

    /// Returns the five values in ascending role order: min, q1, median, q3, max.
    pub fn values(&self) -> [f64; 5] {
        [self.min, self.q1, self.median, self.q3, self.max]
    }
}

/// Linear-interpolated quantile of sorted data (the "R-7" definition).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            #[allow(clippy::cast_possible_truncation, reason = "h is within [0, n - 1]")]
            let lo = h as usize;
            let hi = (lo + 1).min(n - 1);
            sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}

/// Accessors for box plot records.
#[derive(Clone, Debug)]
pub enum BoxAccessors {
    /// `y` yields an array of samples, or a single sample; single samples sharing an `x` are
    /// pooled.
    Samples {
        /// Independent-axis accessor.
        x: Accessor,
        /// Sample accessor.
        y: Accessor,
    },
    /// Each record carries precomputed statistics.
    Quartiles {
        /// Independent-axis accessor.
        x: Accessor,
        /// Minimum accessor.
        min: Accessor,
        /// First quartile accessor.
        q1: Accessor,
        /// Median accessor.
        median: Accessor,
        /// Third quartile accessor.
        q3: Accessor,
        /// Maximum accessor.
        max: Accessor,
    },
}

impl Default for BoxAccessors {
    fn default() -> Self {
        Self::Samples {
            x: Accessor::key("x"),
            y: Accessor::key("y"),
        }
    }
}

impl BoxAccessors {
    /// Precomputed statistics under the keys `min`, `q1`, `median`, `q3`, `max`.
    pub fn quartile_keys(x: impl Into<Accessor>) -> Self {
        Self::Quartiles {
            x: x.into(),
            min: Accessor::key("min"),
            q1: Accessor::key("q1"),
            median: Accessor::key("median"),
            q3: Accessor::key("q3"),
            max: Accessor::key("max"),
        }
    }
}

/// Summarizes box plot records, preserving first-seen `x` order.
pub fn summarize(
    rows: &[Value],
    accessors: &BoxAccessors,
) -> Result<Vec<BoxSummary>, DataFormatError> {
    let mut categories = CategoryIndex::new();
    let out = match accessors {
        BoxAccessors::Samples { x, y } => {
            let mut groups: Vec<(f64, Option<String>, Vec<f64>, Map<String, Value>)> = Vec::new();
            for (index, row) in rows.iter().enumerate() {
                let (xv, name) = position(index, x.get(row).as_deref(), &mut categories)?;
                let samples = samples(index, y.get(row).as_deref())?;
                match groups.iter_mut().find(|g| g.0 == xv) {
                    Some(group) => group.2.extend(samples),
                    None => {
                        let meta = row.as_object().cloned().unwrap_or_default();
                        groups.push((xv, name, samples, meta));
                    }
                }
            }
            groups
                .into_iter()
                .filter_map(|(xv, name, samples, metadata)| {
                    BoxSummary::from_samples(xv, &samples).map(|s| BoxSummary {
                        x_name: name,
                        metadata,
                        ..s
                    })
                })
                .collect()
        }
        BoxAccessors::Quartiles {
            x,
            min,
            q1,
            median,
            q3,
            max,
        } => rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let (xv, name) = position(index, x.get(row).as_deref(), &mut categories)?;
                let stat = |acc: &Accessor, field| number(index, field, acc.get(row).as_deref());
                let mut values = [
                    stat(min, "min")?,
                    stat(q1, "q1")?,
                    stat(median, "median")?,
                    stat(q3, "q3")?,
                    stat(max, "max")?,
                ];
                values.sort_by(f64::total_cmp);
                Ok(BoxSummary {
                    x: xv,
                    x_name: name,
                    min: values[0],
                    q1: values[1],
                    median: values[2],
                    q3: values[3],
                    max: values[4],
                    metadata: row.as_object().cloned().unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, DataFormatError>>()?,
    };
    log::debug!("summarized {} rows into {} boxes", rows.len(), out.len());
    Ok(out)
}

fn position(
    index: usize,
    v: Option<&Value>,
    categories: &mut CategoryIndex,
) -> Result<(f64, Option<String>), DataFormatError> {
    match v {
        None | Some(Value::Null) => Ok(((index + 1) as f64, None)),
        Some(Value::String(s)) => Ok((categories.ordinal(s), Some(s.clone()))),
        Some(v) => number(index, "x", Some(v)).map(|x| (x, None)),
    }
}

fn number(index: usize, field: &'static str, v: Option<&Value>) -> Result<f64, DataFormatError> {
    let found = match v {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(x) if x.is_finite() => return Ok(x),
            _ => "non-finite number",
        },
        None | Some(Value::Null) => "missing value",
        Some(Value::String(_)) => "string",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    };
    Err(DataFormatError {
        index,
        field,
        found,
    })
}

fn samples(index: usize, v: Option<&Value>) -> Result<Vec<f64>, DataFormatError> {
    match v {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| number(index, "y", Some(item)))
            .collect(),
        None | Some(Value::Null) => Ok(Vec::new()),
        other => number(index, "y", other).map(|v| alloc::vec![v]),
    }
}
