// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition of resolved geometry into primitive trees.

use vela_core::{DataPoint, Group, MarkId};

use crate::primitive::{Primitive, SeriesPrimitive};
use crate::prop::{DatumContext, SeriesContext};
use crate::series::SeriesPath;

/// Builds a group holding one mark per present geometry.
///
/// `geometries[i]` belongs to `data[i]`; `None` entries (placeholders) are skipped. Each mark
/// gets the id [`MarkId::for_datum`]`(group_id, i)`, so ids do not depend on what the primitive
/// returns.
pub fn compose<G>(
    group_id: MarkId,
    role: &str,
    data: &[DataPoint],
    geometries: &[Option<G>],
    primitive: &dyn Primitive<G>,
) -> Group {
    let mut group = Group::new(group_id).with_role(role);
    for ctx in DatumContext::all(data) {
        let Some(Some(geometry)) = geometries.get(ctx.index) else {
            continue;
        };
        let id = MarkId::for_datum(group_id.0, ctx.index);
        group.push(primitive.mark(id, &ctx, geometry).with_id(id));
    }
    log::trace!(
        "composed {} marks for {} data in group {:?}",
        group.children.len(),
        data.len(),
        group_id
    );
    group
}

/// Builds a group holding one mark per series.
///
/// `paths[i]` belongs to `series[i]`, and the mark for series `i` gets the id
/// [`MarkId::for_datum`]`(group_id, i)`.
pub fn compose_series(
    group_id: MarkId,
    role: &str,
    series: &[&[DataPoint]],
    paths: &[SeriesPath],
    primitive: &dyn SeriesPrimitive,
) -> Group {
    let mut group = Group::new(group_id).with_role(role);
    for (index, (&data, path)) in series.iter().zip(paths).enumerate() {
        let ctx = SeriesContext { data, index };
        let id = MarkId::for_datum(group_id.0, index);
        group.push(primitive.mark(id, &ctx, path).with_id(id));
    }
    group
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};
    use vela_core::{Mark, MarkPayload};

    use super::*;
    use crate::primitive::{BorderPrimitive, DatumAttrs};
    use crate::prop::DatumProp;

    // Returns marks with a fixed id to check that composition assigns its own.
    #[derive(Debug)]
    struct Dot;

    impl Primitive<Point> for Dot {
        fn mark(&self, _id: MarkId, ctx: &DatumContext<'_>, p: &Point) -> Mark {
            Mark::text(MarkId::from_raw(0), *p, format!("{}", ctx.index))
        }
    }

    #[test]
    fn placeholders_are_skipped_and_ids_are_stable() {
        let data = vec![
            DataPoint::new(1.0, 1.0),
            DataPoint::missing(2.0),
            DataPoint::new(3.0, 3.0),
        ];
        let geometries = vec![Some(Point::new(1.0, 1.0)), None, Some(Point::new(3.0, 3.0))];
        let id = MarkId::from_raw(42);
        let group = compose(id, "presentation", &data, &geometries, &Dot);
        assert_eq!(group.mark_count(), 2);
        assert_eq!(group.attrs.role.as_deref(), Some("presentation"));
        let ids: Vec<MarkId> = group.marks().map(|m| m.id).collect();
        assert_eq!(ids, [MarkId::for_datum(42, 0), MarkId::for_datum(42, 2)]);
        let again = compose(id, "presentation", &data, &geometries, &Dot);
        let again: Vec<MarkId> = again.marks().map(|m| m.id).collect();
        assert_eq!(ids, again);
        let MarkPayload::Text(t) = &group.marks().nth(1).unwrap().payload else {
            panic!("expected text");
        };
        assert_eq!(t.text, "2");
    }

    #[test]
    fn attrs_pass_through_unchanged() {
        let data = vec![DataPoint::new(1.0, 1.0)];
        let prim = BorderPrimitive::new().with_attrs(
            DatumAttrs::default().with_aria_label(DatumProp::Value("q1".into())),
        );
        let group = compose(
            MarkId::from_raw(1),
            "presentation",
            &data,
            &[Some(Rect::new(0.0, 0.0, 1.0, 1.0))],
            &prim,
        );
        let mark = group.marks().next().unwrap();
        assert_eq!(mark.attrs.aria_label.as_deref(), Some("q1"));
    }
}
