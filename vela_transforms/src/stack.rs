// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking of sibling series.

extern crate alloc;

use alloc::vec::Vec;

use vela_core::DataPoint;

/// Sibling series cannot be stacked together.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStackError {
    /// A series has a different number of points than the first series.
    #[error("series {series} has {found} points, expected {expected}")]
    LengthMismatch {
        /// Series index in declaration order.
        series: usize,
        /// Point count of the first series.
        expected: usize,
        /// Point count of the offending series.
        found: usize,
    },
    /// A series places a different `x` key at the same position as the first series.
    #[error("series {series} has a different x key at index {index}")]
    KeyMismatch {
        /// Series index in declaration order.
        series: usize,
        /// Point index.
        index: usize,
    },
}

/// Stack baseline offset mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackOffset {
    /// Positive values stack upward from 0, negative values downward from 0.
    #[default]
    Zero,
    /// Each stack is scaled so the sum of absolute values is `1.0`.
    Normalize,
}

/// A stacked series: its points carry `y0` (bottom) and `y` (cumulative top).
#[derive(Clone, Debug, PartialEq)]
pub struct StackedSeries {
    /// Position of the series in the stack (declaration order).
    pub stack_index: usize,
    /// Stacked points.
    pub points: Vec<DataPoint>,
}

/// An ordered set of sibling series sharing `x` keys.
///
/// Series are stacked in declaration order, so the first series sits on the baseline.
#[derive(Clone, Debug, Default)]
pub struct StackContext {
    series: Vec<Vec<DataPoint>>,
    offset: StackOffset,
}

impl StackContext {
    /// Creates a stack from sibling series in draw order.
    pub fn new(series: Vec<Vec<DataPoint>>) -> Self {
        Self {
            series,
            offset: StackOffset::Zero,
        }
    }

    /// Sets the baseline offset mode.
    pub fn with_offset(mut self, offset: StackOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Appends a series on top of the stack.
    pub fn push(&mut self, series: Vec<DataPoint>) {
        self.series.push(series);
    }

    /// Returns the number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if the stack holds no series.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Checks that all series agree on length and `x` keys.
    pub fn validate(&self) -> Result<(), InvalidStackError> {
        let Some(first) = self.series.first() else {
            return Ok(());
        };
        for (series, points) in self.series.iter().enumerate().skip(1) {
            if points.len() != first.len() {
                return Err(InvalidStackError::LengthMismatch {
                    series,
                    expected: first.len(),
                    found: points.len(),
                });
            }
            for (index, (a, b)) in first.iter().zip(points).enumerate() {
                if a.x != b.x || a.x_name != b.x_name {
                    return Err(InvalidStackError::KeyMismatch { series, index });
                }
            }
        }
        Ok(())
    }

    /// Computes cumulative offsets.
    ///
    /// Missing values contribute 0 to the running sums and stay missing in the output, so the
    /// series keeps a gap there while later series still stack correctly.
    pub fn stack(&self) -> Result<Vec<StackedSeries>, InvalidStackError> {
        self.validate()?;
        let n = self.series.first().map_or(0, Vec::len);

        let scale: Vec<f64> = (0..n)
            .map(|i| match self.offset {
                StackOffset::Zero => 1.0,
                StackOffset::Normalize => {
                    let total: f64 = self
                        .series
                        .iter()
                        .filter_map(|s| s[i].y)
                        .filter(|v| v.is_finite())
                        .map(f64::abs)
                        .sum();
                    if total > 0.0 { 1.0 / total } else { 0.0 }
                }
            })
            .collect();

        let mut positive = alloc::vec![0.0_f64; n];
        let mut negative = alloc::vec![0.0_f64; n];
        let out: Vec<StackedSeries> = self
            .series
            .iter()
            .enumerate()
            .map(|(stack_index, series)| {
                let points = series
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let mut out = p.clone();
                        let value = p.y.filter(|v| v.is_finite()).map(|v| v * scale[i]);
                        let acc = if value.unwrap_or(0.0) < 0.0 {
                            &mut negative[i]
                        } else {
                            &mut positive[i]
                        };
                        let bottom = *acc;
                        *acc += value.unwrap_or(0.0);
                        out.y0 = Some(bottom);
                        out.y = value.map(|_| *acc);
                        out
                    })
                    .collect();
                StackedSeries {
                    stack_index,
                    points,
                }
            })
            .collect();
        log::debug!("stacked {} series over {} keys", out.len(), n);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn series(values: &[Option<f64>]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Some(v) => DataPoint::new((i + 1) as f64, *v),
                None => DataPoint::missing((i + 1) as f64),
            })
            .collect()
    }

    #[test]
    fn cumulative_top_of_last_series_is_the_sum() {
        let a = series(&[Some(1.0), Some(2.0), Some(3.0)]);
        let b = series(&[Some(2.0), Some(0.0), Some(1.0)]);
        let c = series(&[Some(4.0), Some(1.0), Some(2.0)]);
        let out = StackContext::new(vec![a, b, c]).stack().unwrap();
        assert_eq!(out[2].stack_index, 2);
        let tops: Vec<Option<f64>> = out[2].points.iter().map(|p| p.y).collect();
        assert_eq!(tops, [Some(7.0), Some(3.0), Some(6.0)]);
        // Each series sits on the previous series' top.
        assert_eq!(out[1].points[0].y0, out[0].points[0].y);
        assert_eq!(out[2].points[0].y0, out[1].points[0].y);
    }

    #[test]
    fn negative_values_stack_downward() {
        let a = series(&[Some(2.0), Some(-1.0)]);
        let b = series(&[Some(-3.0), Some(-2.0)]);
        let c = series(&[Some(1.0), Some(4.0)]);
        let out = StackContext::new(vec![a, b, c]).stack().unwrap();
        assert_eq!(out[1].points[0].y0, Some(0.0));
        assert_eq!(out[1].points[0].y, Some(-3.0));
        assert_eq!(out[2].points[0].y0, Some(2.0));
        assert_eq!(out[2].points[0].y, Some(3.0));
        assert_eq!(out[1].points[1].y0, Some(-1.0));
        assert_eq!(out[1].points[1].y, Some(-3.0));
    }

    #[test]
    fn missing_values_keep_their_gap_and_add_nothing() {
        let a = series(&[Some(1.0), None]);
        let b = series(&[Some(1.0), Some(2.0)]);
        let out = StackContext::new(vec![a, b]).stack().unwrap();
        assert_eq!(out[0].points[1].y, None);
        assert_eq!(out[1].points[1].y0, Some(0.0));
        assert_eq!(out[1].points[1].y, Some(2.0));
    }

    #[test]
    fn normalize_offset_scales_each_stack_to_one() {
        let a = series(&[Some(1.0), Some(0.0)]);
        let b = series(&[Some(3.0), Some(0.0)]);
        let out = StackContext::new(vec![a, b])
            .with_offset(StackOffset::Normalize)
            .stack()
            .unwrap();
        assert_eq!(out[0].points[0].y, Some(0.25));
        assert_eq!(out[1].points[0].y, Some(1.0));
        // An all-zero stack stays at the baseline.
        assert_eq!(out[1].points[1].y, Some(0.0));
    }

    #[test]
    fn mismatched_series_are_rejected() {
        let err = StackContext::new(vec![series(&[Some(1.0)]), series(&[Some(1.0), Some(2.0)])])
            .stack()
            .unwrap_err();
        assert_eq!(
            err,
            InvalidStackError::LengthMismatch {
                series: 1,
                expected: 1,
                found: 2
            }
        );

        let mut b = series(&[Some(1.0), Some(2.0)]);
        b[1].x = 9.0;
        let err = StackContext::new(vec![series(&[Some(1.0), Some(2.0)]), b])
            .stack()
            .unwrap_err();
        assert_eq!(err, InvalidStackError::KeyMismatch { series: 1, index: 1 });
    }
}
