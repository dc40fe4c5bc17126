// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data normalization: heterogeneous input shapes to [`DataPoint`]s.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde_json::Value;
use vela_core::DataPoint;

use crate::accessor::Accessor;
use crate::category::CategoryIndex;

/// A value could not be coerced into a data point field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("row {index}: field `{field}` holds an unsupported value ({found})")]
pub struct DataFormatError {
    /// Input row index.
    pub index: usize,
    /// Field name (for example `"y"` or `"q1"`).
    pub field: &'static str,
    /// What was found instead.
    pub found: &'static str,
}

/// Field accessors for record input.
#[derive(Clone, Debug)]
pub struct Accessors {
    /// Independent-axis accessor.
    pub x: Accessor,
    /// Dependent-axis accessor.
    pub y: Accessor,
    /// Optional independent-axis range start.
    pub x0: Option<Accessor>,
    /// Optional dependent-axis baseline.
    pub y0: Option<Accessor>,
    /// Optional label accessor.
    pub label: Option<Accessor>,
}

impl Default for Accessors {
    /// Reads `x`, `y`, `y0` and `label` keys.
    fn default() -> Self {
        Self {
            x: Accessor::key("x"),
            y: Accessor::key("y"),
            x0: None,
            y0: Some(Accessor::key("y0")),
            label: Some(Accessor::key("label")),
        }
    }
}

impl Accessors {
    /// Creates accessors for `x` and `y` with no baseline or label.
    pub fn new(x: impl Into<Accessor>, y: impl Into<Accessor>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            x0: None,
            y0: None,
            label: None,
        }
    }

    /// Sets the `y0` accessor.
    pub fn with_y0(mut self, y0: impl Into<Accessor>) -> Self {
        self.y0 = Some(y0.into());
        self
    }

    /// Sets the `x0` accessor.
    pub fn with_x0(mut self, x0: impl Into<Accessor>) -> Self {
        self.x0 = Some(x0.into());
        self
    }

    /// Sets the label accessor.
    pub fn with_label(mut self, label: impl Into<Accessor>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The accepted input shapes.
#[derive(Clone, Debug)]
pub enum DataInput {
    /// Bare values; `x` is the 1-based position.
    Numbers(Vec<f64>),
    /// `[x, y]` pairs.
    Pairs(Vec<[Value; 2]>),
    /// Records read through accessors.
    Records {
        /// Raw records.
        rows: Vec<Value>,
        /// Field accessors.
        accessors: Accessors,
    },
}

impl DataInput {
    /// Records read with the default `x`/`y` accessors.
    pub fn records(rows: Vec<Value>) -> Self {
        Self::Records {
            rows,
            accessors: Accessors::default(),
        }
    }

    /// Returns the number of input rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(v) => v.len(),
            Self::Pairs(v) => v.len(),
            Self::Records { rows, .. } => rows.len(),
        }
    }

    /// Returns `true` if there are no input rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which field to sort normalized points by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Sort by `x`.
    X,
    /// Sort by `y`; missing values sort last.
    Y,
}

/// Sorting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Converts [`DataInput`] into [`DataPoint`]s.
///
/// Category ordinals are shared across calls, so sibling series normalized by the same
/// `Normalizer` agree on where each category lands.
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    x_categories: CategoryIndex,
    y_categories: CategoryIndex,
}

enum Coerced {
    Number(f64),
    Category(String),
    Missing,
}

impl Normalizer {
    /// Creates a normalizer with empty category indices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Predefines the order of `x` categories.
    pub fn with_x_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.x_categories = CategoryIndex::with_order(names);
        self
    }

    /// Returns the `x` categories seen so far.
    pub fn x_categories(&self) -> &CategoryIndex {
        &self.x_categories
    }

    /// Returns the `y` categories seen so far.
    pub fn y_categories(&self) -> &CategoryIndex {
        &self.y_categories
    }

    /// Normalizes `input`, preserving its order.
    pub fn normalize(&mut self, input: &DataInput) -> Result<Vec<DataPoint>, DataFormatError> {
        let out = match input {
            DataInput::Numbers(values) => values
                .iter()
                .enumerate()
                .map(|(index, &v)| {
                    if !v.is_finite() {
                        return Err(DataFormatError {
                            index,
                            field: "y",
                            found: "non-finite number",
                        });
                    }
                    Ok(DataPoint::new((index + 1) as f64, v))
                })
                .collect::<Result<Vec<_>, _>>()?,
            DataInput::Pairs(pairs) => pairs
                .iter()
                .enumerate()
                .map(|(index, [x, y])| {
                    let mut p = DataPoint::default();
                    self.assign_x(&mut p, index, Some(x))?;
                    self.assign_y(&mut p, index, Some(y))?;
                    Ok(p)
                })
                .collect::<Result<Vec<_>, _>>()?,
            DataInput::Records { rows, accessors } => rows
                .iter()
                .enumerate()
                .map(|(index, row)| self.record(index, row, accessors))
                .collect::<Result<Vec<_>, _>>()?,
        };
        log::debug!(
            "normalized {} points ({} x categories)",
            out.len(),
            self.x_categories.len()
        );
        Ok(out)
    }

    fn record(
        &mut self,
        index: usize,
        row: &Value,
        accessors: &Accessors,
    ) -> Result<DataPoint, DataFormatError> {
        let mut p = DataPoint::default();
        self.assign_x(&mut p, index, accessors.x.get(row).as_deref())?;
        self.assign_y(&mut p, index, accessors.y.get(row).as_deref())?;
        if let Some(acc) = &accessors.x0 {
            p.x0 = baseline(index, "x0", acc.get(row).as_deref())?;
        }
        if let Some(acc) = &accessors.y0 {
            p.y0 = baseline(index, "y0", acc.get(row).as_deref())?;
        }
        if let Some(acc) = &accessors.label {
            p.label = match acc.get(row).as_deref() {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(v) => Some(v.to_string()),
            };
        }
        if let Value::Object(fields) = row {
            p.metadata = fields.clone();
        }
        Ok(p)
    }

    fn assign_x(
        &mut self,
        p: &mut DataPoint,
        index: usize,
        v: Option<&Value>,
    ) -> Result<(), DataFormatError> {
        match coerce(index, "x", v)? {
            Coerced::Number(x) => p.x = x,
            Coerced::Category(name) => {
                p.x = self.x_categories.ordinal(&name);
                p.x_name = Some(name);
            }
            Coerced::Missing => p.x = (index + 1) as f64,
        }
        Ok(())
    }

    fn assign_y(
        &mut self,
        p: &mut DataPoint,
        index: usize,
        v: Option<&Value>,
    ) -> Result<(), DataFormatError> {
        match coerce(index, "y", v)? {
            Coerced::Number(y) => p.y = Some(y),
            Coerced::Category(name) => {
                p.y = Some(self.y_categories.ordinal(&name));
                p.y_name = Some(name);
            }
            Coerced::Missing => p.y = None,
        }
        Ok(())
    }
}

/// Normalizes `input` with a fresh [`Normalizer`].
pub fn normalize(input: &DataInput) -> Result<Vec<DataPoint>, DataFormatError> {
    Normalizer::new().normalize(input)
}

/// Sorts points in place (stable).
pub fn sort_points(points: &mut [DataPoint], key: SortKey, order: SortOrder) {
    points.sort_by(|a, b| {
        let ord = match key {
            SortKey::X => a.x.total_cmp(&b.x),
            SortKey::Y => match (a.y, b.y) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (Some(_), None) => return core::cmp::Ordering::Less,
                (None, Some(_)) => return core::cmp::Ordering::Greater,
                (None, None) => core::cmp::Ordering::Equal,
            },
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

fn coerce(
    index: usize,
    field: &'static str,
    v: Option<&Value>,
) -> Result<Coerced, DataFormatError> {
    let err = |found| DataFormatError {
        index,
        field,
        found,
    };
    match v {
        None | Some(Value::Null) => Ok(Coerced::Missing),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(x) if x.is_finite() => Ok(Coerced::Number(x)),
            _ => Err(err("non-finite number")),
        },
        Some(Value::String(s)) => Ok(Coerced::Category(s.clone())),
        Some(Value::Bool(_)) => Err(err("boolean")),
        Some(Value::Array(_)) => Err(err("array")),
        Some(Value::Object(_)) => Err(err("object")),
    }
}

fn baseline(
    index: usize,
    field: &'static str,
    v: Option<&Value>,
) -> Result<Option<f64>, DataFormatError> {
    match coerce(index, field, v)? {
        Coerced::Number(x) => Ok(Some(x)),
        Coerced::Missing => Ok(None),
        Coerced::Category(_) => Err(DataFormatError {
            index,
            field,
            found: "string",
        }),
    }
}
