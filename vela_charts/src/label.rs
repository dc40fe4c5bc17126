// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label anchors and number formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use kurbo::Point;
use vela_core::{TextAnchor, TextBaseline};

/// A positioned text label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelGeometry {
    /// Anchor position in screen space.
    pub pos: Point,
    /// Label text.
    pub text: String,
    /// Horizontal anchoring at `pos`.
    pub anchor: TextAnchor,
    /// Vertical anchoring at `pos`.
    pub baseline: TextBaseline,
}

impl LabelGeometry {
    /// A label centered on `pos`.
    pub fn centered(pos: Point, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
        }
    }
}

/// Formats a value for display with at most six decimals and no trailing zeros.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        String::from("0")
    } else {
        String::from(s)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn trailing_zeros_are_trimmed() {
        assert_eq!(format_number(5.5), "5.5");
        assert_eq!(format_number(6.75), "6.75");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0000001), "0");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(120.0), "120");
    }
}
