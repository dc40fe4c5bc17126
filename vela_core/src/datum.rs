// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized data points.

extern crate alloc;

use alloc::string::String;

use serde_json::{Map, Value};

/// A single normalized datum.
///
/// Positions are always numeric: categorical values are replaced by their 1-based ordinal (in
/// first-seen order) and the original category is kept in [`DataPoint::x_name`] /
/// [`DataPoint::y_name`].
///
/// A `None` [`DataPoint::y`] is a placeholder. It keeps its slot (and therefore its index and
/// mark identity) but is skipped by domain scans and drawn as a gap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataPoint {
    /// Independent-axis position in data units.
    pub x: f64,
    /// Dependent-axis value in data units, or `None` for a missing value.
    pub y: Option<f64>,
    /// Optional start of a range on the independent axis.
    pub x0: Option<f64>,
    /// Optional baseline on the dependent axis (stack bottom for stacked series).
    pub y0: Option<f64>,
    /// Category name when `x` was categorical.
    pub x_name: Option<String>,
    /// Category name when `y` was categorical.
    pub y_name: Option<String>,
    /// Optional label text.
    pub label: Option<String>,
    /// The source record's fields, carried through untouched.
    pub metadata: Map<String, Value>,
}

impl DataPoint {
    /// Creates a numeric point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y: Some(y),
            ..Self::default()
        }
    }

    /// Creates a placeholder point with no `y` value.
    pub fn missing(x: f64) -> Self {
        Self {
            x,
            ..Self::default()
        }
    }

    /// Sets the dependent-axis baseline.
    pub fn with_y0(mut self, y0: f64) -> Self {
        self.y0 = Some(y0);
        self
    }

    /// Sets the independent-axis range start.
    pub fn with_x0(mut self, x0: f64) -> Self {
        self.x0 = Some(x0);
        self
    }

    /// Sets the category name for `x`.
    pub fn with_x_name(mut self, name: impl Into<String>) -> Self {
        self.x_name = Some(name.into());
        self
    }

    /// Sets the label text.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns `true` if this point has a finite `y` value.
    pub fn has_value(&self) -> bool {
        self.y.is_some_and(f64::is_finite)
    }

    /// Returns the extent this point contributes along `y`: `(min(y0, y), max(y0, y))`.
    ///
    /// Returns `None` for placeholder points.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        let y = self.y.filter(|v| v.is_finite())?;
        match self.y0.filter(|v| v.is_finite()) {
            Some(y0) => Some((y0.min(y), y0.max(y))),
            None => Some((y, y)),
        }
    }

    /// Returns the extent this point contributes along `x`.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        if !self.x.is_finite() {
            return None;
        }
        match self.x0.filter(|v| v.is_finite()) {
            Some(x0) => Some((x0.min(self.x), x0.max(self.x))),
            None => Some((self.x, self.x)),
        }
    }

    /// Looks up a metadata field by name.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn extents_include_baselines() {
        let p = DataPoint::new(2.0, 5.0).with_y0(1.0).with_x0(3.0);
        assert_eq!(p.y_extent(), Some((1.0, 5.0)));
        assert_eq!(p.x_extent(), Some((2.0, 3.0)));
    }

    #[test]
    fn placeholder_points_have_no_y_extent() {
        let p = DataPoint::missing(4.0).with_y0(2.0);
        assert!(!p.has_value());
        assert_eq!(p.y_extent(), None);
        assert_eq!(p.x_extent(), Some((4.0, 4.0)));
    }
}
