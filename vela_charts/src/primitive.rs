// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive templates.
//!
//! A primitive turns one resolved geometry into a [`Mark`]. The defaults here cover every visual
//! role the chart builders emit; callers can substitute their own type implementing
//! [`Primitive`] or [`SeriesPrimitive`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{BezPath, Line, Rect, Shape};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use vela_core::{Attrs, EventHandler, Mark, MarkId};

use crate::bar::BarGeometry;
use crate::box_plot::WhiskerGeometry;
use crate::label::LabelGeometry;
use crate::pie::SliceGeometry;
use crate::prop::{DatumContext, DatumProp, SeriesContext, SeriesProp};
use crate::series::SeriesPath;
use crate::z_order;

/// Draws one datum's geometry.
pub trait Primitive<G>: fmt::Debug {
    /// Returns the mark for `geometry`. The composition layer overrides its id with `id`.
    fn mark(&self, id: MarkId, ctx: &DatumContext<'_>, geometry: &G) -> Mark;
}

/// Draws a whole series (a line or an area).
pub trait SeriesPrimitive: fmt::Debug {
    /// Returns the mark for `path`.
    fn mark(&self, id: MarkId, ctx: &SeriesContext<'_>, path: &SeriesPath) -> Mark;
}

/// Paint for a primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; 0 disables the stroke.
    pub stroke_width: f64,
}

impl Style {
    /// A filled style without stroke.
    pub fn filled(fill: impl Into<Brush>) -> Self {
        Self {
            fill: fill.into(),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
        }
    }

    /// A stroked style without fill.
    pub fn stroked(stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            fill: Brush::Solid(Color::TRANSPARENT),
            stroke: stroke.into(),
            stroke_width,
        }
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    fn apply(&self, mark: Mark) -> Mark {
        mark.with_fill(self.fill.clone())
            .with_stroke(self.stroke.clone(), self.stroke_width)
    }
}

/// Per-datum attributes forwarded to the renderer.
#[derive(Clone, Debug, Default)]
pub struct DatumAttrs {
    /// Accessible label.
    pub aria_label: Option<DatumProp<String>>,
    /// Focus order.
    pub tab_index: Option<DatumProp<f64>>,
    /// Accessibility role.
    pub role: Option<String>,
    /// Interaction handlers.
    pub handlers: Vec<EventHandler>,
}

impl DatumAttrs {
    /// Sets the accessible label.
    pub fn with_aria_label(mut self, label: DatumProp<String>) -> Self {
        self.aria_label = Some(label);
        self
    }

    /// Sets the focus order.
    pub fn with_tab_index(mut self, tab_index: DatumProp<f64>) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Sets the accessibility role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Adds an interaction handler.
    pub fn with_handler(mut self, handler: EventHandler) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Evaluates the attributes for one datum.
    pub fn resolve(&self, ctx: &DatumContext<'_>) -> Attrs {
        Attrs {
            aria_label: self.aria_label.as_ref().map(|p| p.resolve(ctx)),
            tab_index: self.tab_index.as_ref().map(|p| p.resolve(ctx)),
            role: self.role.clone(),
            handlers: self.handlers.iter().cloned().collect(),
        }
    }
}

/// Per-series attributes forwarded to the renderer.
#[derive(Clone, Debug, Default)]
pub struct SeriesAttrs {
    /// Accessible label.
    pub aria_label: Option<SeriesProp<String>>,
    /// Focus order.
    pub tab_index: Option<SeriesProp<f64>>,
    /// Accessibility role.
    pub role: Option<String>,
    /// Interaction handlers.
    pub handlers: Vec<EventHandler>,
}

impl SeriesAttrs {
    /// Sets the accessible label.
    pub fn with_aria_label(mut self, label: SeriesProp<String>) -> Self {
        self.aria_label = Some(label);
        self
    }

    /// Sets the focus order.
    pub fn with_tab_index(mut self, tab_index: SeriesProp<f64>) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Sets the accessibility role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Adds an interaction handler.
    pub fn with_handler(mut self, handler: EventHandler) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Evaluates the attributes for one series.
    pub fn resolve(&self, ctx: &SeriesContext<'_>) -> Attrs {
        Attrs {
            aria_label: self.aria_label.as_ref().map(|p| p.resolve(ctx)),
            tab_index: self.tab_index.as_ref().map(|p| p.resolve(ctx)),
            role: self.role.clone(),
            handlers: self.handlers.iter().cloned().collect(),
        }
    }
}

// Shared builder surface of the per-datum primitives.
macro_rules! datum_primitive {
    ($(#[$doc:meta])* $name:ident, $default_style:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name {
            /// Paint, per datum.
            pub style: DatumProp<Style>,
            /// Forwarded attributes.
            pub attrs: DatumAttrs,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    style: DatumProp::Value($default_style),
                    attrs: DatumAttrs::default(),
                }
            }
        }

        impl $name {
            /// Creates the primitive with its default style.
            pub fn new() -> Self {
                Self::default()
            }

            /// Sets the style.
            pub fn with_style(mut self, style: impl Into<DatumProp<Style>>) -> Self {
                self.style = style.into();
                self
            }

            /// Sets the forwarded attributes.
            pub fn with_attrs(mut self, attrs: DatumAttrs) -> Self {
                self.attrs = attrs;
                self
            }

            fn finish(&self, mark: Mark, ctx: &DatumContext<'_>, z_index: i32) -> Mark {
                self.style
                    .resolve(ctx)
                    .apply(mark)
                    .with_z_index(z_index)
                    .with_attrs(self.attrs.resolve(ctx))
            }
        }
    };
}

datum_primitive!(
    /// Draws a bar as a rounded rectangle.
    BarPrimitive,
    Style::filled(css::DIM_GRAY)
);

datum_primitive!(
    /// Draws a box plot whisker: the line to the extreme value plus its cap.
    WhiskerPrimitive,
    Style::stroked(css::BLACK, 1.0)
);

datum_primitive!(
    /// Draws a box plot quartile border.
    BorderPrimitive,
    Style::filled(css::LIGHT_GRAY).with_stroke(css::BLACK, 1.0)
);

datum_primitive!(
    /// Draws a straight segment, such as a box plot median.
    SegmentPrimitive,
    Style::stroked(css::BLACK, 2.0)
);

datum_primitive!(
    /// Draws a pie slice.
    SlicePrimitive,
    Style::filled(css::SLATE_GRAY).with_stroke(css::WHITE, 1.0)
);

impl Primitive<BarGeometry> for BarPrimitive {
    fn mark(&self, id: MarkId, ctx: &DatumContext<'_>, geometry: &BarGeometry) -> Mark {
        let mark = Mark::rect(id, geometry.rect).with_radii(geometry.radii);
        self.finish(mark, ctx, z_order::SERIES_FILL)
    }
}

impl Primitive<WhiskerGeometry> for WhiskerPrimitive {
    fn mark(&self, id: MarkId, ctx: &DatumContext<'_>, geometry: &WhiskerGeometry) -> Mark {
        let mut path = BezPath::new();
        for line in [geometry.line, geometry.cap] {
            path.move_to(line.p0);
            path.line_to(line.p1);
        }
        self.finish(Mark::path(id, path), ctx, z_order::SERIES_STROKE)
    }
}

impl Primitive<Rect> for BorderPrimitive {
    fn mark(&self, id: MarkId, ctx: &DatumContext<'_>, geometry: &Rect) -> Mark {
        self.finish(Mark::rect(id, *geometry), ctx, z_order::BOX_BORDERS)
    }
}

impl Primitive<Line> for SegmentPrimitive {
    fn mark(&self, id: MarkId, ctx: &DatumContext<'_>, geometry: &Line) -> Mark {
        let path = geometry.path_elements(0.1).collect();
        self.finish(Mark::path(id, path), ctx, z_order::MEDIANS)
    }
}

impl Primitive<SliceGeometry> for SlicePrimitive {
    fn mark(&self, id: MarkId, ctx: &DatumContext<'_>, geometry: &SliceGeometry) -> Mark {
        self.finish(
            Mark::path(id, geometry.path(0.1)),
            ctx,
            z_order::SERIES_FILL,
        )
    }
}

/// Draws a text label.
#[derive(Clone, Debug)]
pub struct LabelPrimitive {
    /// Text paint.
    pub fill: Brush,
    /// Font size in pixels.
    pub font_size: f64,
    /// Replaces the geometry's text when set.
    pub text: Option<DatumProp<String>>,
    /// Forwarded attributes.
    pub attrs: DatumAttrs,
}

impl Default for LabelPrimitive {
    fn default() -> Self {
        Self {
            fill: Brush::Solid(css::BLACK),
            font_size: 12.0,
            text: None,
            attrs: DatumAttrs::default(),
        }
    }
}

impl LabelPrimitive {
    /// Creates a black 12 px label.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text paint and size.
    pub fn with_font(mut self, fill: impl Into<Brush>, font_size: f64) -> Self {
        self.fill = fill.into();
        self.font_size = font_size;
        self
    }

    /// Overrides the label text.
    pub fn with_text(mut self, text: DatumProp<String>) -> Self {
        self.text = Some(text);
        self
    }

    /// Sets the forwarded attributes.
    pub fn with_attrs(mut self, attrs: DatumAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Primitive<LabelGeometry> for LabelPrimitive {
    fn mark(&self, id: MarkId, ctx: &DatumContext<'_>, geometry: &LabelGeometry) -> Mark {
        let text = match &self.text {
            Some(p) => p.resolve(ctx),
            None => geometry.text.clone(),
        };
        Mark::text(id, geometry.pos, text)
            .with_text_style(self.font_size, geometry.anchor, geometry.baseline)
            .with_fill(self.fill.clone())
            .with_z_index(z_order::LABELS)
            .with_attrs(self.attrs.resolve(ctx))
    }
}

macro_rules! series_primitive {
    ($(#[$doc:meta])* $name:ident, $default_style:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name {
            /// Paint, per series.
            pub style: SeriesProp<Style>,
            /// Forwarded attributes.
            pub attrs: SeriesAttrs,
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    style: SeriesProp::Value($default_style),
                    attrs: SeriesAttrs::default(),
                }
            }
        }

        impl $name {
            /// Creates the primitive with its default style.
            pub fn new() -> Self {
                Self::default()
            }

            /// Sets the style.
            pub fn with_style(mut self, style: impl Into<SeriesProp<Style>>) -> Self {
                self.style = style.into();
                self
            }

            /// Sets the forwarded attributes.
            pub fn with_attrs(mut self, attrs: SeriesAttrs) -> Self {
                self.attrs = attrs;
                self
            }
        }
    };
}

series_primitive!(
    /// Draws a series as an open curve through its points.
    CurvePrimitive,
    Style::stroked(css::BLACK, 2.0)
);

series_primitive!(
    /// Draws a series as the filled region between its top and baseline.
    AreaPrimitive,
    Style::filled(css::SLATE_GRAY)
);

impl SeriesPrimitive for CurvePrimitive {
    fn mark(&self, id: MarkId, ctx: &SeriesContext<'_>, path: &SeriesPath) -> Mark {
        self.style
            .resolve(ctx)
            .apply(Mark::path(id, path.curve_path()))
            .with_z_index(z_order::SERIES_STROKE)
            .with_attrs(self.attrs.resolve(ctx))
    }
}

impl SeriesPrimitive for AreaPrimitive {
    fn mark(&self, id: MarkId, ctx: &SeriesContext<'_>, path: &SeriesPath) -> Mark {
        self.style
            .resolve(ctx)
            .apply(Mark::path(id, path.area_path()))
            .with_z_index(z_order::SERIES_FILL)
            .with_attrs(self.attrs.resolve(ctx))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use alloc::vec;

    use kurbo::{Point, RoundedRectRadii};
    use vela_core::{DataPoint, MarkPayload};

    use super::*;
    use crate::bar::BarPosition;

    fn bar() -> BarGeometry {
        BarGeometry {
            position: BarPosition {
                x: 5.0,
                y: 0.0,
                x0: 5.0,
                y0: 10.0,
                horizontal: false,
            },
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            radii: RoundedRectRadii::new(2.0, 2.0, 0.0, 0.0),
        }
    }

    #[test]
    fn attrs_resolve_per_datum() {
        let data = vec![DataPoint::new(1.0, 3.0), DataPoint::new(2.0, 4.0)];
        let prim = BarPrimitive::new().with_attrs(
            DatumAttrs::default()
                .with_aria_label(DatumProp::func(|ctx| format!("x: {}", ctx.datum.x)))
                .with_tab_index(DatumProp::func(|ctx| ctx.index as f64 + 1.0))
                .with_role("img"),
        );
        let ctx = DatumContext::new(&data, 1).unwrap();
        let mark = prim.mark(MarkId::from_raw(7), &ctx, &bar());
        assert_eq!(mark.attrs.aria_label.as_deref(), Some("x: 2"));
        assert_eq!(mark.attrs.tab_index, Some(2.0));
        assert_eq!(mark.attrs.role.as_deref(), Some("img"));
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("expected a rect");
        };
        assert_eq!(r.radii, RoundedRectRadii::new(2.0, 2.0, 0.0, 0.0));
        assert_eq!(r.fill, Brush::Solid(css::DIM_GRAY));
    }

    #[test]
    fn style_callbacks_see_the_datum() {
        let data = vec![DataPoint::new(1.0, -3.0)];
        let prim = BarPrimitive::new().with_style(DatumProp::func(|ctx| {
            if ctx.datum.y.unwrap_or(0.0) < 0.0 {
                Style::filled(css::CRIMSON)
            } else {
                Style::filled(css::SEA_GREEN)
            }
        }));
        let ctx = DatumContext::new(&data, 0).unwrap();
        let mark = prim.mark(MarkId::from_raw(1), &ctx, &bar());
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("expected a rect");
        };
        assert_eq!(r.fill, Brush::Solid(css::CRIMSON));
    }

    #[test]
    fn labels_can_override_text() {
        let data = vec![DataPoint::new(1.0, 3.0).with_label("three")];
        let ctx = DatumContext::new(&data, 0).unwrap();
        let geometry = LabelGeometry::centered(Point::new(1.0, 2.0), "3");
        let mark = LabelPrimitive::new().mark(MarkId::from_raw(1), &ctx, &geometry);
        let MarkPayload::Text(t) = &mark.payload else {
            panic!("expected text");
        };
        assert_eq!(t.text, "3");

        let prim = LabelPrimitive::new().with_text(DatumProp::func(|ctx| {
            ctx.datum.label.clone().unwrap_or_default()
        }));
        let MarkPayload::Text(t) = prim.mark(MarkId::from_raw(1), &ctx, &geometry).payload else {
            panic!("expected text");
        };
        assert_eq!(t.text, "three");
        assert_eq!(t.anchor, vela_core::TextAnchor::Middle);
    }
}
