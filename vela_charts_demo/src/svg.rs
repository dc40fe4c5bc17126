// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for primitive trees.

use kurbo::{Rect, RoundedRect, Shape};
use peniko::Brush;
use vela_core::{Attrs, Group, Mark, MarkPayload, TextAnchor, TextBaseline};

/// Writes every mark of `group` as one SVG document.
///
/// Marks are drawn in `(z_index, tree order)` order. The view box covers `view` and every mark,
/// with a small margin.
pub(crate) fn render(group: &Group, view: Rect) -> String {
    let mut marks: Vec<&Mark> = group.marks().collect();
    marks.sort_by_key(|m| m.z_index);

    let view = marks
        .iter()
        .filter_map(|m| mark_bounds(m))
        .fold(view, |acc, b| acc.union(b))
        .inflate(10.0, 10.0);

    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}"{}>"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height(),
        attrs_string(&group.attrs),
    ));
    out.push('\n');
    for mark in marks {
        write_mark(&mut out, mark);
    }
    out.push_str("</svg>\n");
    out
}

fn write_mark(out: &mut String, mark: &Mark) {
    let attrs = attrs_string(&mark.attrs);
    match &mark.payload {
        MarkPayload::Rect(r) => {
            let shape = RoundedRect::from_rect(r.rect, r.radii);
            let d = shape.to_path(0.1).to_svg();
            out.push_str(&format!(r#"<path d="{d}"{attrs}"#));
            write_paint(out, &r.fill, &r.stroke, r.stroke_width);
            out.push_str("/>\n");
        }
        MarkPayload::Path(p) => {
            out.push_str(&format!(r#"<path d="{}"{attrs}"#, p.path.to_svg()));
            write_paint(out, &p.fill, &p.stroke, p.stroke_width);
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            let anchor = match t.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}" text-anchor="{anchor}"{attrs}"#,
                t.pos.x, t.pos.y, t.font_size
            ));
            if t.angle != 0.0 {
                out.push_str(&format!(
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                ));
            }
            write_paint_attr(out, "fill", &t.fill);
            out.push_str(&format!(">{}</text>\n", escape_xml(&t.text)));
        }
    }
}

fn attrs_string(attrs: &Attrs) -> String {
    let mut out = String::new();
    if let Some(label) = &attrs.aria_label {
        out.push_str(&format!(r#" aria-label="{}""#, escape_xml(label)));
    }
    if let Some(tab_index) = attrs.tab_index {
        out.push_str(&format!(r#" tabindex="{tab_index}""#));
    }
    if let Some(role) = &attrs.role {
        out.push_str(&format!(r#" role="{}""#, escape_xml(role)));
    }
    out
}

// Text has no measured bounds; approximate ~0.6em per glyph around the anchor.
fn mark_bounds(mark: &Mark) -> Option<Rect> {
    let MarkPayload::Text(t) = &mark.payload else {
        return mark.bounds();
    };
    let width = 0.6 * t.font_size * t.text.chars().count() as f64;
    let half_height = 0.5 * t.font_size;
    let mid_y = match t.baseline {
        TextBaseline::Middle => t.pos.y,
        TextBaseline::Alphabetic => t.pos.y - 0.3 * t.font_size,
        TextBaseline::Hanging => t.pos.y + 0.3 * t.font_size,
        TextBaseline::Ideographic => t.pos.y - 0.2 * t.font_size,
    };
    let (x0, x1) = match t.anchor {
        TextAnchor::Start => (t.pos.x, t.pos.x + width),
        TextAnchor::Middle => (t.pos.x - width / 2.0, t.pos.x + width / 2.0),
        TextAnchor::End => (t.pos.x - width, t.pos.x),
    };
    Some(Rect::new(x0, mid_y - half_height, x1, mid_y + half_height))
}

fn write_paint(out: &mut String, fill: &Brush, stroke: &Brush, stroke_width: f64) {
    write_paint_attr(out, "fill", fill);
    if stroke_width > 0.0 {
        write_paint_attr(out, "stroke", stroke);
        out.push_str(&format!(r#" stroke-width="{stroke_width}""#));
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (value, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::RoundedRectRadii;
    use vela_core::MarkId;

    use super::*;

    #[test]
    fn attributes_and_rounded_corners_are_written() {
        let mut group = Group::new(MarkId::from_raw(1)).with_role("presentation");
        let mut mark = Mark::rect(MarkId::from_raw(2), Rect::new(0.0, 0.0, 10.0, 20.0))
            .with_radii(RoundedRectRadii::new(3.0, 3.0, 0.0, 0.0));
        mark.attrs.aria_label = Some("x: \"a\"".into());
        mark.attrs.tab_index = Some(20.1);
        group.push(mark);
        let svg = render(&group, Rect::new(0.0, 0.0, 10.0, 20.0));
        assert!(svg.contains(r#"role="presentation""#));
        assert!(svg.contains(r#"aria-label="x: &quot;a&quot;""#));
        assert!(svg.contains(r#"tabindex="20.1""#));
        // Rounded corners turn the rectangle into curves.
        assert!(svg.contains('C'));
    }

    #[test]
    fn marks_are_ordered_by_z_index() {
        let mut group = Group::new(MarkId::from_raw(1));
        group.push(Mark::text(MarkId::from_raw(2), (0.0, 0.0).into(), "top").with_z_index(40));
        group.push(Mark::rect(MarkId::from_raw(3), Rect::new(0.0, 0.0, 1.0, 1.0)));
        let svg = render(&group, Rect::ZERO);
        let rect = svg.find("<path").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(rect < text);
    }
}
