// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales.
//!
//! A scale maps data values into pixel space and back. All scales here are monotonic over their
//! domain, and [`ScaleContinuous::invert`] undoes [`ScaleContinuous::map`] up to floating point
//! error.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A scale cannot be built or cannot map a value.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ScaleError {
    /// A log scale was given a non-positive domain bound or input value.
    #[error("log scale is undefined for non-positive value {value}")]
    InvalidLogDomain {
        /// The offending value.
        value: f64,
    },
    /// The domain has a non-finite bound.
    #[error("scale domain ({min}, {max}) is not finite")]
    NonFiniteDomain {
        /// Domain minimum.
        min: f64,
        /// Domain maximum.
        max: f64,
    },
}

/// The interpolation family of a continuous scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Logarithmic interpolation (base 10 unless overridden).
    Log,
    /// Linear interpolation over timestamps (seconds), with time-aware ticks.
    Time,
}

/// Orientation of the output range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The domain minimum maps to the first range endpoint.
    #[default]
    Normal,
    /// The range endpoints are swapped (for example a y axis growing upward on screen).
    Inverted,
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Builds a scale from a domain, a pixel range, a kind and a direction.
    ///
    /// Fails if the domain is not finite, or if a log domain has a non-positive bound.
    pub fn build(
        domain: (f64, f64),
        range: (f64, f64),
        kind: ScaleKind,
        direction: Direction,
    ) -> Result<Self, ScaleError> {
        let (d0, d1) = domain;
        if !d0.is_finite() || !d1.is_finite() {
            return Err(ScaleError::NonFiniteDomain { min: d0, max: d1 });
        }
        let range = match direction {
            Direction::Normal => range,
            Direction::Inverted => (range.1, range.0),
        };
        let scale = match kind {
            ScaleKind::Linear => Self::Linear(ScaleLinear::new(domain, range)),
            ScaleKind::Log => Self::Log(ScaleLog::try_new(domain, range)?),
            ScaleKind::Time => Self::Time(ScaleTime::new(domain, range)),
        };
        log::trace!("built {kind:?} scale {domain:?} -> {range:?}");
        Ok(scale)
    }

    /// Returns the scale kind.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Log scales map values outside their definition to the first range endpoint; use
    /// [`Self::try_map`] to detect that case.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a value, failing for values a log scale cannot represent.
    pub fn try_map(&self, x: f64) -> Result<f64, ScaleError> {
        match self {
            Self::Log(s) => s.try_map(x),
            _ => Ok(self.map(x)),
        }
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, px: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(px),
            Self::Log(s) => s.invert(px),
            Self::Time(s) => s.invert(px),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_min(),
            Self::Log(s) => s.domain_min(),
            Self::Time(s) => s.domain_min(),
        }
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_max(),
            Self::Log(s) => s.domain_max(),
            Self::Time(s) => s.domain_max(),
        }
    }

    /// Returns the output range (after direction was applied).
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range,
            Self::Log(s) => s.range,
            Self::Time(s) => s.inner.range,
        }
    }

    /// Returns the absolute pixel length of the range.
    pub fn range_extent(&self) -> f64 {
        let (r0, r1) = self.range();
        (r1 - r0).abs()
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (px - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns "nice-ish" tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Extends `(min, max)` outward to the nearest "nice" tick boundaries.
pub fn nice_domain(min: f64, max: f64, count: usize) -> (f64, f64) {
    let ticks = nice_ticks(min, max, count);
    match (ticks.first(), ticks.last()) {
        (Some(&a), Some(&b)) if ticks.len() >= 2 => (a, b),
        _ => (min, max),
    }
}

fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    stepped_ticks(min, max, count, nice_step)
}

/// Evenly spaced ticks covering `[min, max]`, with the step chosen by `step_for` from the raw
/// span-per-tick.
fn stepped_ticks(
    mut min: f64,
    mut max: f64,
    count: usize,
    step_for: impl Fn(f64) -> f64,
) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = step_for((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f.min(10_000.0) as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

// Candidate time steps in seconds, from one second to half a day.
const TIME_STEPS: [f64; 17] = [
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 900.0, 1800.0, 3600.0, 7200.0,
    10_800.0, 21_600.0, 43_200.0,
];

fn time_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    TIME_STEPS
        .iter()
        .copied()
        .find(|&s| s >= step)
        .unwrap_or_else(|| (step / 3600.0).ceil().max(1.0) * 3600.0)
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a new log scale without validating the domain.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    /// Creates a new log scale, rejecting non-positive domain bounds.
    pub fn try_new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        for value in [domain.0, domain.1] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ScaleError::InvalidLogDomain { value });
            }
        }
        Ok(Self::new(domain, range))
    }

    /// Sets the log base.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    fn log_base(&self, x: f64) -> f64 {
        let denom = self.base.ln();
        if denom == 0.0 { x.ln() } else { x.ln() / denom }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let denom = ld1 - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value, failing for non-positive input.
    pub fn try_map(&self, x: f64) -> Result<f64, ScaleError> {
        if x <= 0.0 || !x.is_finite() {
            return Err(ScaleError::InvalidLogDomain { value: x });
        }
        Ok(self.map(x))
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return d0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let t = (px - r0) / denom;
        self.base.powf(ld0 + t * (ld1 - ld0))
    }

    /// Returns "nice-ish" tick values for a log domain.
    ///
    /// This currently returns powers of `base` that fall within the domain, capped by `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let min_e = {
            let e = self
                .log_base(min)
                .floor()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let max_e = {
            let e = self
                .log_base(max)
                .ceil()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

/// A time scale (a linear scale over timestamps in seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a range value back to a timestamp.
    pub fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }

    /// Returns "nice-ish" tick values over seconds, minutes and hours.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        stepped_ticks(
            self.inner.domain_min(),
            self.inner.domain_max(),
            count,
            time_step,
        )
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.inner.domain_min()
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.inner.domain_max()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn invert_round_trips_for_every_kind() {
        let cases = [
            (ScaleKind::Linear, (-3.0, 12.5)),
            (ScaleKind::Log, (1.0, 1000.0)),
            (ScaleKind::Time, (0.0, 3600.0)),
        ];
        for (kind, (d0, d1)) in cases {
            for direction in [Direction::Normal, Direction::Inverted] {
                let s = ScaleContinuous::build((d0, d1), (20.0, 380.0), kind, direction).unwrap();
                for i in 0..=20 {
                    let v = d0 + (d1 - d0) * f64::from(i) / 20.0;
                    let back = s.invert(s.map(v));
                    assert!(close(back, v), "{kind:?} {direction:?}: {v} -> {back}");
                }
            }
        }
    }

    #[test]
    fn scales_are_monotonic_and_hit_range_endpoints() {
        let (kind, dir) = (ScaleKind::Linear, Direction::Inverted);
        let s = ScaleContinuous::build((0.0, 10.0), (0.0, 100.0), kind, dir).unwrap();
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert!(s.map(3.0) > s.map(4.0));
        assert_eq!(s.range(), (100.0, 0.0));
        assert_eq!(s.range_extent(), 100.0);

        let l = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!((l.map(1.0) - 0.0).abs() < 1e-9);
        assert!((l.map(100.0) - 10.0).abs() < 1e-9);
        assert!(l.map(5.0) < l.map(6.0));
    }

    #[test]
    fn log_scale_rejects_non_positive_values() {
        let s = ScaleContinuous::build((1.0, 10.0), (0.0, 1.0), ScaleKind::Log, Direction::Normal)
            .unwrap();
        assert_eq!(
            s.try_map(0.0),
            Err(ScaleError::InvalidLogDomain { value: 0.0 })
        );
        assert!(s.try_map(-2.0).is_err());
        assert!(s.try_map(10.0).is_ok());

        let err = ScaleContinuous::build((0.0, 10.0), (0.0, 1.0), ScaleKind::Log, Direction::Normal)
            .unwrap_err();
        assert_eq!(err, ScaleError::InvalidLogDomain { value: 0.0 });
    }

    #[test]
    fn non_finite_domains_are_rejected() {
        let err = ScaleContinuous::build(
            (0.0, f64::INFINITY),
            (0.0, 1.0),
            ScaleKind::Linear,
            Direction::Normal,
        )
        .unwrap_err();
        assert!(matches!(err, ScaleError::NonFiniteDomain { .. }));
    }

    #[test]
    fn degenerate_ranges_do_not_divide_by_zero() {
        let s = ScaleLinear::new((2.0, 2.0), (5.0, 5.0));
        assert_eq!(s.map(7.0), 5.0);
        assert_eq!(s.invert(5.0), 2.0);
    }

    #[test]
    fn time_ticks_snap_to_clock_steps() {
        let ticks = ScaleTime::new((0.0, 300.0), (0.0, 1.0)).ticks(5);
        assert_eq!(ticks[1] - ticks[0], 60.0);
        let ticks = ScaleTime::new((0.0, 100_000.0), (0.0, 1.0)).ticks(2);
        assert_eq!(ticks[1] - ticks[0], 50_400.0);
    }

    #[test]
    fn nice_domain_extends_to_tick_boundaries() {
        assert_eq!(nice_domain(0.3, 9.2, 10), (0.0, 10.0));
        assert_eq!(nice_domain(4.0, 4.0, 5), (4.0, 4.0));
        let ticks = ScaleLinear::new((0.0, 1.0), (0.0, 1.0)).ticks(5);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&1.0));
    }
}
