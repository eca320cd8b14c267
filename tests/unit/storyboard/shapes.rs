use std::collections::BTreeMap;

use super::*;
use crate::foundation::core::palette;

fn dot(x: f64, y: f64) -> Shape {
    Shape::Dot(DotShape {
        at: Point::new(x, y),
        style: Style::stroke(palette::WHITE),
    })
}

fn table(entries: &[(&str, Shape)]) -> BTreeMap<String, Shape> {
    entries
        .iter()
        .map(|(k, s)| (k.to_string(), s.clone()))
        .collect()
}

#[test]
fn segment_tracks_current_dot_positions() {
    let rule = DeriveRule::SegmentBetween {
        from: "c".into(),
        to: "p".into(),
        style: Style::stroke(palette::YELLOW),
    };
    let shapes = table(&[("c", dot(2.0, 1.0)), ("p", dot(5.0, 1.0))]);
    let Shape::Line(line) = rule.resolve(|k| shapes.get(k)).unwrap() else {
        panic!("expected a line");
    };
    assert_eq!(line.from, Point::new(2.0, 1.0));
    assert_eq!(line.to, Point::new(5.0, 1.0));
    assert_eq!(line.kind, LineKind::Solid);

    // Move the point and resolve again: the segment follows.
    let moved = table(&[("c", dot(2.0, 1.0)), ("p", dot(2.0, 4.0))]);
    let Shape::Line(line) = rule.resolve(|k| moved.get(k)).unwrap() else {
        panic!("expected a line");
    };
    assert_eq!(line.to, Point::new(2.0, 4.0));
}

#[test]
fn legs_meet_at_the_right_angle_corner() {
    let shapes = table(&[("c", dot(2.0, 1.0)), ("p", dot(5.0, 4.0))]);
    let h = DeriveRule::HorizontalLeg {
        center: "c".into(),
        point: "p".into(),
        style: Style::stroke(palette::GREEN),
    };
    let v = DeriveRule::VerticalLeg {
        center: "c".into(),
        point: "p".into(),
        style: Style::stroke(palette::ORANGE),
    };

    let Shape::Line(h_line) = h.resolve(|k| shapes.get(k)).unwrap() else {
        panic!("expected a line");
    };
    let Shape::Line(v_line) = v.resolve(|k| shapes.get(k)).unwrap() else {
        panic!("expected a line");
    };

    assert_eq!(h_line.from, Point::new(2.0, 1.0));
    assert_eq!(h_line.to, Point::new(5.0, 1.0));
    assert_eq!(v_line.from, Point::new(5.0, 1.0));
    assert_eq!(v_line.to, Point::new(5.0, 4.0));
    assert_eq!(h_line.kind, LineKind::Dashed);
    assert_eq!(v_line.kind, LineKind::Dashed);
}

#[test]
fn legs_point_toward_the_moving_point() {
    // Point to the lower left of the center: legs flip direction.
    let shapes = table(&[("c", dot(2.0, 1.0)), ("p", dot(-1.0, -2.0))]);
    let h = DeriveRule::HorizontalLeg {
        center: "c".into(),
        point: "p".into(),
        style: Style::stroke(palette::GREEN),
    };
    let Shape::Line(h_line) = h.resolve(|k| shapes.get(k)).unwrap() else {
        panic!("expected a line");
    };
    assert_eq!(h_line.to, Point::new(-1.0, 1.0));
}

#[test]
fn right_angle_marker_sits_at_the_corner() {
    let legs = table(&[
        (
            "h",
            Shape::Line(LineShape {
                from: Point::new(2.0, 1.0),
                to: Point::new(5.0, 1.0),
                kind: LineKind::Dashed,
                style: Style::stroke(palette::GREEN),
            }),
        ),
        (
            "v",
            Shape::Line(LineShape {
                from: Point::new(5.0, 1.0),
                to: Point::new(5.0, 4.0),
                kind: LineKind::Dashed,
                style: Style::stroke(palette::ORANGE),
            }),
        ),
    ]);
    let rule = DeriveRule::RightAngleMarker {
        horizontal: "h".into(),
        vertical: "v".into(),
        arm: 0.3,
        style: Style::stroke(palette::WHITE),
    };
    let Shape::AngleMarker(marker) = rule.resolve(|k| legs.get(k)).unwrap() else {
        panic!("expected an angle marker");
    };
    assert_eq!(marker.corner, Point::new(5.0, 1.0));
    // Arms point back toward the center and up toward the point.
    assert_eq!(marker.arm_x, -0.3);
    assert_eq!(marker.arm_y, 0.3);
}

#[test]
fn tracking_label_offsets_from_the_reference_point() {
    let shapes = table(&[(
        "seg",
        Shape::Line(LineShape {
            from: Point::new(0.0, 0.0),
            to: Point::new(4.0, 2.0),
            kind: LineKind::Solid,
            style: Style::stroke(palette::YELLOW),
        }),
    )]);
    let rule = DeriveRule::TrackingLabel {
        target: "seg".into(),
        text: "r".into(),
        kind: TextKind::Math,
        size_pt: 36.0,
        direction: Direction::Right,
        gap: 0.1,
        style: Style::stroke(palette::WHITE),
    };
    let Shape::Text(label) = rule.resolve(|k| shapes.get(k)).unwrap() else {
        panic!("expected text");
    };
    assert_eq!(label.placement, Placement::At(Point::new(2.1, 1.0)));
}

#[test]
fn resolve_rejects_wrong_dependency_kind() {
    let shapes = table(&[("c", dot(0.0, 0.0)), ("p", dot(1.0, 1.0))]);
    let rule = DeriveRule::RightAngleMarker {
        horizontal: "c".into(),
        vertical: "p".into(),
        arm: 0.3,
        style: Style::stroke(palette::WHITE),
    };
    let err = rule.resolve(|k| shapes.get(k)).unwrap_err();
    assert!(err.to_string().contains("must be a line"));
}

#[test]
fn resolve_reports_missing_dependency() {
    let shapes = table(&[]);
    let rule = DeriveRule::SegmentBetween {
        from: "a".into(),
        to: "b".into(),
        style: Style::stroke(palette::WHITE),
    };
    assert!(rule.resolve(|k| shapes.get(k)).is_err());
}

#[test]
fn deps_are_listed_in_rule_order() {
    let rule = DeriveRule::SegmentBetween {
        from: "a".into(),
        to: "b".into(),
        style: Style::stroke(palette::WHITE),
    };
    assert_eq!(rule.deps(), vec!["a", "b"]);
}

#[test]
fn shape_validation_catches_defects() {
    assert!(dot(0.0, 0.0).validate().is_ok());
    assert!(dot(f64::NAN, 0.0).validate().is_err());

    let empty_text = Shape::Text(TextShape {
        text: "   ".into(),
        kind: TextKind::Plain,
        size_pt: 30.0,
        placement: Placement::At(Point::ORIGIN),
        style: Style::stroke(palette::WHITE),
    });
    assert!(empty_text.validate().is_err());

    let bad_rect = Shape::Rect(RectShape {
        center: Point::ORIGIN,
        width: 0.0,
        height: 1.0,
        flipped_v: false,
        style: Style::stroke(palette::WHITE),
    });
    assert!(bad_rect.validate().is_err());

    let bad_grid = Shape::Grid(GridShape {
        x_min: 1.0,
        x_max: -1.0,
        y_min: 0.0,
        y_max: 1.0,
        style: Style::stroke(palette::WHITE),
    });
    assert!(bad_grid.validate().is_err());
}
