// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabbable charts with aria labels, written as one HTML page of inline SVGs.
//!
//! Run with `RUST_LOG=debug` to see the pipeline stages.

mod svg;

use std::error::Error;

use kurbo::Rect;
use peniko::Color;
use peniko::color::palette::css;
use serde_json::{Value, json};
use vela_charts::{
    AreaChartSpec, AreaPrimitive, BarChartSpec, BarPrimitive, BorderPrimitive, BoxLabels,
    BoxPlotChartSpec, CurvePrimitive, DatumAttrs, DatumContext, DatumProp, DomainSpec,
    LabelPrimitive, LineChartSpec, Padding, PieChartSpec, SegmentPrimitive, SeriesAttrs,
    SeriesProp, SlicePrimitive, StackSpec, Style, WhiskerPrimitive, default_series_fills,
    format_number,
};
use vela_core::{Group, MarkId};
use vela_transforms::DataInput;

const PLOT: Rect = Rect::new(50.0, 50.0, 400.0, 250.0);
const OUTPUT: &str = "vela_charts_demo.html";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let sections = [
        ("Bar chart", bar_chart()?, PLOT),
        ("Box plot", box_plot()?, PLOT),
        ("Stacked areas", stacked_areas()?, PLOT),
        ("Line chart", line_chart()?, PLOT),
        ("Pie chart", pie_chart()?, Rect::new(0.0, 0.0, 400.0, 250.0)),
    ];

    let mut html = String::from(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>Vela accessibility demo</title></head>\n<body>\n",
    );
    for (title, group, view) in &sections {
        log::info!("{title}: {} marks", group.mark_count());
        let title = svg::escape_xml(title);
        html.push_str(&format!("<section>\n<h2>{title}</h2>\n"));
        html.push_str(&svg::render(group, *view));
        html.push_str("</section>\n");
    }
    html.push_str("</body>\n</html>\n");

    std::fs::write(OUTPUT, html)?;
    println!("wrote {OUTPUT}");
    Ok(())
}

// Category name when present, formatted position otherwise.
fn x_text(ctx: &DatumContext<'_>) -> String {
    ctx.datum
        .x_name
        .clone()
        .unwrap_or_else(|| format_number(ctx.datum.x))
}

fn stat_text(ctx: &DatumContext<'_>, key: &str) -> String {
    ctx.datum
        .field(key)
        .and_then(Value::as_f64)
        .map(format_number)
        .unwrap_or_default()
}

fn bar_chart() -> Result<Group, Box<dyn Error>> {
    let data = DataInput::records(vec![
        json!({"x": "cat", "y": 62}),
        json!({"x": "dog", "y": 91}),
        json!({"x": "fish", "y": 55}),
        json!({"x": "bird", "y": 55}),
    ]);
    let bar = BarPrimitive::new()
        .with_style(Style::filled(Color::from_rgb8(0xc4, 0x3a, 0x31)))
        .with_attrs(
            DatumAttrs::default()
                .with_aria_label(DatumProp::func(|ctx| format!("x: {}", x_text(ctx))))
                .with_tab_index(DatumProp::func(|ctx| ctx.index as f64 + 1.0)),
        );
    let chart = BarChartSpec::new(MarkId::from_raw(0x100))
        .with_domain(
            DomainSpec::new()
                .with_include_zero(true)
                .with_padding(Padding::uniform(40.0)),
        )
        .with_bar(bar)
        .build(&data, PLOT)?;
    Ok(chart)
}

fn box_plot() -> Result<Group, Box<dyn Error>> {
    let rows = vec![
        json!({"x": "red", "y": [5, 10, 9, 2]}),
        json!({"x": "blue", "y": [1, 15, 6, 8]}),
        json!({"x": "green", "y": [3, 5, 6, 9]}),
        json!({"x": "yellow", "y": [5, 20, 8, 12]}),
        json!({"x": "white", "y": [2, 11, 12, 13]}),
    ];

    // Each part gets its own label and tab stop so a reader can walk a box top to bottom.
    let attrs = |stat: &'static str, name: &'static str, tab: f64| {
        DatumAttrs::default()
            .with_aria_label(DatumProp::func(move |ctx| {
                format!("{} {name} {}", x_text(ctx), stat_text(ctx, stat))
            }))
            .with_tab_index(DatumProp::func(move |ctx| ctx.index as f64 + tab))
    };

    let chart = BoxPlotChartSpec::new(MarkId::from_raw(0x200))
        .with_domain(DomainSpec::new().with_padding(Padding::uniform(40.0)))
        .with_box_width(20.0)
        .with_labels(
            BoxLabels::default()
                .with_min_labels(true)
                .with_max_labels(true),
        )
        .with_whiskers(
            WhiskerPrimitive::new().with_attrs(attrs("min", "min is", 5.2)),
            WhiskerPrimitive::new().with_attrs(attrs("max", "max is", 5.0)),
        )
        .with_borders(
            BorderPrimitive::new()
                .with_style(Style::filled(css::TOMATO).with_stroke(css::BLACK, 1.0))
                .with_attrs(attrs("q1", "q1 value is", 6.2)),
            BorderPrimitive::new()
                .with_style(Style::filled(css::ORANGE).with_stroke(css::BLACK, 1.0))
                .with_attrs(attrs("q3", "q3 value is", 6.1)),
        )
        .with_median(SegmentPrimitive::new().with_attrs(attrs("median", "median value is", 5.1)))
        .build(&rows, PLOT)?;
    Ok(chart)
}

fn stacked_areas() -> Result<Group, Box<dyn Error>> {
    let series = ["a", "b", "c", "d"].map(|name| {
        let offset = match name {
            "a" => 1,
            "b" => 2,
            "c" => 0,
            _ => 3,
        };
        DataInput::records(
            (1..=5)
                .map(|x| json!({"x": x, "y": (x * 7 + offset * 3) % 5 + 1, "series": name}))
                .collect(),
        )
    });
    let fills = default_series_fills(series.len());
    let area = AreaPrimitive::new()
        .with_style(SeriesProp::func(move |ctx| {
            Style::filled(fills[ctx.index % fills.len()].clone())
        }))
        .with_attrs(
            SeriesAttrs::default()
                .with_aria_label(SeriesProp::func(|ctx| {
                    format!("area chart stack {}", ctx.index)
                }))
                .with_tab_index(SeriesProp::func(|ctx| 20.0 + ctx.index as f64 / 10.0)),
        );
    let chart = AreaChartSpec::new(MarkId::from_raw(0x300))
        .with_domain(
            DomainSpec::new()
                .with_include_zero(true)
                .with_padding(Padding { x: 0.0, y: 10.0 }),
        )
        .with_stack(StackSpec::new())
        .with_area(area)
        .build(&series, PLOT)?;
    Ok(chart)
}

fn line_chart() -> Result<Group, Box<dyn Error>> {
    let series = [DataInput::Pairs(vec![
        [json!(1), json!(2)],
        [json!(2), json!(3)],
        [json!(3), json!(5)],
        [json!(4), json!(4)],
        [json!(5), json!(6)],
    ])];
    let curve = CurvePrimitive::new()
        .with_style(Style::stroked(css::STEEL_BLUE, 2.0))
        .with_attrs(
            SeriesAttrs::default()
                .with_aria_label(SeriesProp::func(|ctx| {
                    ctx.data
                        .iter()
                        .enumerate()
                        .filter_map(|(i, d)| {
                            let y = d.y?;
                            Some(format!(
                                "data point {} x value is {} and y value is {}",
                                i + 1,
                                format_number(d.x),
                                format_number(y)
                            ))
                        })
                        .collect::<Vec<_>>()
                        .join(", ")
                }))
                .with_tab_index(SeriesProp::Value(21.0)),
        );
    let chart = LineChartSpec::new(MarkId::from_raw(0x400))
        .with_domain(DomainSpec::new().with_x((0.0, 6.0)).with_y((0.0, 7.0)))
        .with_curve(curve)
        .build(&series, PLOT)?;
    Ok(chart)
}

fn pie_chart() -> Result<Group, Box<dyn Error>> {
    let data = DataInput::records(vec![
        json!({"x": "cat", "y": 62, "radius": 110}),
        json!({"x": "dog", "y": 91, "radius": 120}),
        json!({"x": "fish", "y": 55, "radius": 100}),
        json!({"x": "bird", "y": 55, "radius": 90}),
    ]);
    let fills = default_series_fills(4);
    let slice = SlicePrimitive::new()
        .with_style(DatumProp::func(move |ctx| {
            Style::filled(fills[ctx.index % fills.len()].clone()).with_stroke(css::WHITE, 1.0)
        }))
        .with_attrs(
            DatumAttrs::default()
                .with_aria_label(DatumProp::func(|ctx| format!("pie slice {}", x_text(ctx))))
                .with_tab_index(DatumProp::func(|ctx| ctx.index as f64 + 22.0)),
        );
    let chart = PieChartSpec::new(MarkId::from_raw(0x500))
        .with_radius(DatumProp::field("radius", 100.0))
        .with_label_radius(DatumProp::func(|ctx| {
            let radius = ctx.datum.field("radius").and_then(Value::as_f64);
            radius.unwrap_or(100.0) - 12.0
        }))
        .with_slice(slice)
        .with_labels(LabelPrimitive::new().with_font(css::WHITE, 10.0))
        .build(&data, Rect::new(0.0, 0.0, 400.0, 250.0))?;
    Ok(chart)
}
