// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end checks of the data to geometry pipeline.

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use core::f64::consts::TAU;

use kurbo::{Point, Rect};
use serde_json::json;
use vela_core::{DataPoint, Group, MarkId, MarkPayload};
use vela_transforms::{DataInput, StackContext, normalize};

use crate::{
    AreaChartSpec, BarChartSpec, BarLayout, BoxPlotChartSpec, ChartError, Direction, Domain,
    DomainSpec, LineChartSpec, PieChartSpec, PieLayout, ResolveContext, ScaleContinuous,
    ScaleError, ScaleKind, StackSpec,
};

const PLOT: Rect = Rect::new(0.0, 0.0, 200.0, 100.0);

fn payloads(group: &Group) -> Vec<(MarkId, MarkPayload)> {
    group.marks().map(|m| (m.id, m.payload.clone())).collect()
}

#[test]
fn domains_are_ordered_for_well_formed_data() {
    let inputs = [
        DataInput::Numbers(vec![3.0, -1.0, 7.5]),
        DataInput::Numbers(vec![0.0]),
        DataInput::Pairs(vec![[json!(-5), json!(-2)], [json!(-9), json!(-8)]]),
        DataInput::records(vec![json!({"x": "a", "y": 2}), json!({"x": "b", "y": null})]),
    ];
    for input in &inputs {
        let points = normalize(input).unwrap();
        for spec in [
            DomainSpec::new(),
            DomainSpec::new().with_include_zero(true),
            DomainSpec::new().with_nice(5),
        ] {
            let d = spec.resolve(&[&points]).unwrap();
            assert!(d.x.0 <= d.x.1, "{input:?} gave x {:?}", d.x);
            assert!(d.y.0 <= d.y.1, "{input:?} gave y {:?}", d.y);
        }
    }
}

#[test]
fn include_zero_example() {
    let points = normalize(&DataInput::records(vec![
        json!({"x": 1, "y": 1}),
        json!({"x": 2, "y": 2}),
        json!({"x": 3, "y": 3}),
        json!({"x": 4, "y": 4}),
    ]))
    .unwrap();
    let domain = DomainSpec::new()
        .with_include_zero(true)
        .resolve(&[&points])
        .unwrap();
    assert_eq!(domain, Domain::new((1.0, 4.0), (0.0, 4.0)));
}

#[test]
fn scales_round_trip_through_the_pipeline_context() {
    let domain = Domain::new((1.0, 1000.0), (0.5, 20.0));
    for kind in [ScaleKind::Linear, ScaleKind::Log, ScaleKind::Time] {
        for horizontal in [false, true] {
            let spec = DomainSpec::new()
                .with_kinds(kind, kind)
                .with_horizontal(horizontal);
            let ctx = ResolveContext::for_plot(domain, &spec, PLOT).unwrap();
            for v in [1.0, 2.5, 10.0, 999.0] {
                let back = ctx.x.invert(ctx.x.map(v));
                assert!(
                    (back - v).abs() < 1e-9 * v.max(1.0),
                    "{kind:?}: {v} -> {back}"
                );
            }
        }
    }
}

#[test]
fn log_scales_reject_zero() {
    let scale =
        ScaleContinuous::build((1.0, 10.0), (0.0, 100.0), ScaleKind::Log, Direction::Normal)
            .unwrap();
    assert_eq!(
        scale.try_map(0.0),
        Err(ScaleError::InvalidLogDomain { value: 0.0 })
    );

    // A zero in the data reaches the log scale through the scanned domain.
    let err = BarChartSpec::new(MarkId::from_raw(1))
        .with_domain(DomainSpec::new().with_kinds(ScaleKind::Linear, ScaleKind::Log))
        .build(&DataInput::Numbers(vec![0.0, 10.0]), PLOT)
        .unwrap_err();
    assert!(matches!(
        err,
        ChartError::Scale(ScaleError::InvalidLogDomain { .. })
    ));
}

#[test]
fn last_stacked_series_tops_out_at_the_per_key_sum() {
    let series = vec![
        normalize(&DataInput::Numbers(vec![1.0, 2.0, 3.0])).unwrap(),
        normalize(&DataInput::Numbers(vec![4.0, 0.5, 0.0])).unwrap(),
        {
            let mut s = normalize(&DataInput::Numbers(vec![2.0, 2.0, 2.0])).unwrap();
            s[1] = DataPoint::missing(2.0);
            s
        },
    ];
    let sums = [7.0, 2.5, 5.0];
    let stacked = StackContext::new(series).stack().unwrap();
    let last = &stacked[2].points;
    assert_eq!(last[0].y, Some(sums[0]));
    assert_eq!(last[2].y, Some(sums[2]));
    // The gap keeps its place but the stack below it still sums correctly.
    assert_eq!(last[1].y, None);
    assert_eq!(last[1].y0, Some(sums[1]));
}

#[test]
fn stacked_area_domain_covers_the_cumulative_extent() {
    let chart = AreaChartSpec::new(MarkId::from_raw(2))
        .with_stack(StackSpec::new())
        .build(
            &[
                DataInput::Numbers(vec![5.0, 5.0]),
                DataInput::Numbers(vec![5.0, 5.0]),
            ],
            Rect::new(0.0, 0.0, 100.0, 100.0),
        )
        .unwrap();
    let tops: Vec<Rect> = chart.marks().filter_map(|m| m.bounds()).collect();
    // Domain [0, 10]: the upper area reaches the top edge, the lower stops halfway.
    assert!(tops[1].y0.abs() < 1e-9);
    assert!((tops[0].y0 - 50.0).abs() < 1e-9);
}

#[test]
fn building_twice_gives_identical_trees() {
    let data = DataInput::records(vec![
        json!({"x": "north", "y": 4}),
        json!({"x": "south", "y": -2}),
        json!({"x": "east", "y": null}),
    ]);
    let bar = BarChartSpec::new(MarkId::from_raw(7)).with_default_labels();
    assert_eq!(
        payloads(&bar.build(&data, PLOT).unwrap()),
        payloads(&bar.build(&data, PLOT).unwrap())
    );

    let rows = vec![
        json!({"x": 1, "y": [1, 4, 2, 8]}),
        json!({"x": 2, "y": [3, 3, 5]}),
    ];
    let boxes = BoxPlotChartSpec::new(MarkId::from_raw(8));
    assert_eq!(
        payloads(&boxes.build(&rows, PLOT).unwrap()),
        payloads(&boxes.build(&rows, PLOT).unwrap())
    );

    let line = LineChartSpec::new(MarkId::from_raw(9));
    let series = [DataInput::Numbers(vec![1.0, 3.0, 2.0])];
    assert_eq!(
        payloads(&line.build(&series, PLOT).unwrap()),
        payloads(&line.build(&series, PLOT).unwrap())
    );
}

#[test]
fn zero_and_negative_extents_give_empty_geometry() {
    let chart = BarChartSpec::new(MarkId::from_raw(1))
        .with_layout(BarLayout::default())
        .build(&DataInput::Numbers(vec![0.0, 3.0]), PLOT)
        .unwrap();
    let MarkPayload::Rect(zero) = &chart.marks().next().unwrap().payload else {
        panic!("expected a rect");
    };
    assert_eq!(zero.rect.height(), 0.0);

    let data = [
        DataPoint::new(1.0, 2.0),
        DataPoint::new(2.0, -3.0),
        DataPoint::new(3.0, 0.0),
    ];
    let slices = PieLayout::new(Point::ORIGIN, 10.0).resolve_slices(&data);
    assert_eq!(slices[1].unwrap().sweep(), 0.0);
    assert_eq!(slices[2].unwrap().sweep(), 0.0);
    assert!((slices[0].unwrap().sweep() - TAU).abs() < 1e-12);
}

#[test]
fn pie_sweeps_follow_the_values() {
    let data = DataInput::records(vec![json!({"x": "a", "y": 1}), json!({"x": "b", "y": 3})]);
    let points = normalize(&data).unwrap();
    let slices = PieLayout::new(Point::ORIGIN, 50.0).resolve_slices(&points);
    let a = slices[0].unwrap().sweep();
    let b = slices[1].unwrap().sweep();
    assert!((b / a - 3.0).abs() < 1e-12);
    assert!((a + b - TAU).abs() < 1e-12);

    let chart = PieChartSpec::new(MarkId::from_raw(3))
        .build(&data, PLOT)
        .unwrap();
    assert_eq!(chart.mark_count(), 2);
}
