// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive descriptors.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, RoundedRectRadii, Shape};
use peniko::{Brush, Color};

use crate::Attrs;

/// A stable identifier for a mark.
///
/// Ids derived with [`MarkId::for_datum`] depend only on the series id and the datum index, so
/// the same datum keeps the same id across render passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives the id for the datum at `index` within `series`.
    pub fn for_datum(series: u64, index: usize) -> Self {
        Self(mix(mix(series) ^ (index as u64).wrapping_add(1)))
    }

    /// Derives a child id for a sub-primitive (for example one of a box plot's whiskers).
    pub fn child(self, role: u64) -> Self {
        Self(mix(self.0 ^ mix(role.wrapping_add(0x5bd1_e995))))
    }
}

// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// The primitive kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned (optionally rounded) rectangle.
    Rect,
    /// An arbitrary path.
    Path,
    /// An unshaped text run.
    Text,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    Alphabetic,
    /// Vertically centered.
    #[default]
    Middle,
    /// Hanging baseline (text hangs below the anchor).
    Hanging,
    /// Ideographic baseline.
    Ideographic,
}

/// Rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Per-corner radii in screen orientation.
    pub radii: RoundedRectRadii,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width (0 disables the stroke).
    pub stroke_width: f64,
}

/// Path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width (0 disables the stroke).
    pub stroke_width: f64,
}

/// Text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Resolved drawable content of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle.
    Rect(RectPayload),
    /// Path.
    Path(PathPayload),
    /// Text.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds, if they can be computed without text shaping.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect.abs()),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }
}

/// An immutable primitive descriptor.
#[derive(Clone, Debug)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Rendering order hint. Renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Drawable content.
    pub payload: MarkPayload,
    /// Pass-through attributes the pipeline never interprets.
    pub attrs: Attrs,
}

impl Mark {
    /// Creates a rectangle mark with square corners and a default fill.
    pub fn rect(id: MarkId, rect: Rect) -> Self {
        Self::from_payload(
            id,
            MarkPayload::Rect(RectPayload {
                rect,
                radii: RoundedRectRadii::from_single_radius(0.0),
                fill: Brush::default(),
                stroke: Brush::default(),
                stroke_width: 0.0,
            }),
        )
    }

    /// Creates a path mark with a default fill.
    pub fn path(id: MarkId, path: BezPath) -> Self {
        Self::from_payload(
            id,
            MarkPayload::Path(PathPayload {
                path,
                fill: Brush::default(),
                stroke: Brush::default(),
                stroke_width: 0.0,
            }),
        )
    }

    /// Creates a text mark with default styling.
    pub fn text(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self::from_payload(
            id,
            MarkPayload::Text(TextPayload {
                pos,
                text: text.into(),
                font_size: 12.0,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                fill: Brush::default(),
            }),
        )
    }

    fn from_payload(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            payload,
            attrs: Attrs::default(),
        }
    }

    /// Returns the mark kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns geometric bounds, if known.
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }

    /// Sets the id.
    pub fn with_id(mut self, id: MarkId) -> Self {
        self.id = id;
        self
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
        }
        self
    }

    /// Sets the stroke paint and width. Text marks ignore strokes.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        let stroke = stroke.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => {
                r.stroke = stroke;
                r.stroke_width = stroke_width;
            }
            MarkPayload::Path(p) => {
                p.stroke = stroke;
                p.stroke_width = stroke_width;
            }
            MarkPayload::Text(_) => {}
        }
        self
    }

    /// Makes a path or rect mark stroke-only.
    pub fn without_fill(self) -> Self {
        self.with_fill(Color::TRANSPARENT)
    }

    /// Sets rectangle corner radii. Non-rect marks are unchanged.
    pub fn with_radii(mut self, radii: RoundedRectRadii) -> Self {
        if let MarkPayload::Rect(r) = &mut self.payload {
            r.radii = radii;
        }
        self
    }

    /// Sets text styling. Non-text marks are unchanged.
    pub fn with_text_style(
        mut self,
        font_size: f64,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.font_size = font_size;
            t.anchor = anchor;
            t.baseline = baseline;
        }
        self
    }

    /// Sets the pass-through attributes.
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}
