// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales prepared for geometry resolution.

use kurbo::{Point, Rect};

use crate::domain::{Domain, DomainSpec};
use crate::scale::{Direction, ScaleContinuous, ScaleError};

/// Everything a geometry resolver needs to place a datum.
///
/// `x` always maps data `x` and `y` always maps data `y`. In horizontal charts `x` maps to
/// vertical pixels and `y` to horizontal pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveContext {
    /// Scale of the `x` data axis.
    pub x: ScaleContinuous,
    /// Scale of the `y` data axis.
    pub y: ScaleContinuous,
    /// The domain both scales were built from.
    pub domain: Domain,
    /// Whether data `x` runs vertically.
    pub horizontal: bool,
}

impl ResolveContext {
    /// Builds scales covering `plot` for `domain`.
    ///
    /// Vertical charts grow `y` upward; horizontal charts place the first `x` at the bottom and
    /// grow `y` to the right.
    pub fn for_plot(domain: Domain, spec: &DomainSpec, plot: Rect) -> Result<Self, ScaleError> {
        let (x, y) = if spec.horizontal {
            (
                ScaleContinuous::build(
                    domain.x,
                    (plot.y0, plot.y1),
                    spec.x_kind,
                    Direction::Inverted,
                )?,
                ScaleContinuous::build(
                    domain.y,
                    (plot.x0, plot.x1),
                    spec.y_kind,
                    Direction::Normal,
                )?,
            )
        } else {
            (
                ScaleContinuous::build(
                    domain.x,
                    (plot.x0, plot.x1),
                    spec.x_kind,
                    Direction::Normal,
                )?,
                ScaleContinuous::build(
                    domain.y,
                    (plot.y0, plot.y1),
                    spec.y_kind,
                    Direction::Inverted,
                )?,
            )
        };
        Ok(Self {
            x,
            y,
            domain,
            horizontal: spec.horizontal,
        })
    }

    /// Maps a data-space `(x, y)` pair to a screen point.
    pub fn point(&self, x: f64, y: f64) -> Result<Point, ScaleError> {
        let px = self.x.try_map(x)?;
        let py = self.y.try_map(y)?;
        Ok(if self.horizontal {
            Point::new(py, px)
        } else {
            Point::new(px, py)
        })
    }
}
