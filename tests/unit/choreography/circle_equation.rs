use super::*;
use crate::{
    geometry::engine,
    storyboard::model::{AnimationStep, ShapeDecl},
};

#[test]
fn default_board_validates() {
    let board = circle_equation_storyboard(&CircleEquationParams::default()).unwrap();
    board.validate().unwrap();
    assert_eq!(board.name, "circle_equation");
}

#[test]
fn all_phases_appear_in_order() {
    let board = circle_equation_storyboard(&CircleEquationParams::default()).unwrap();
    let phases: Vec<Phase> = board.cues.iter().map(|c| c.phase).collect();
    for expected in [
        Phase::Setup,
        Phase::IntroduceElements,
        Phase::BuildRelation,
        Phase::GeneralizeTransform,
        Phase::Conclude,
        Phase::Cleanup,
    ] {
        assert!(phases.contains(&expected), "{expected:?} missing");
    }
    for pair in phases.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn moving_point_starts_on_the_circle() {
    let params = CircleEquationParams::default();
    let board = circle_equation_storyboard(&params).unwrap();
    let Some(ShapeDecl::Static(Shape::Dot(dot))) = board.shapes.get("point") else {
        panic!("expected the moving point dot");
    };
    let d = engine::distance(params.center, dot.at);
    assert!((d - params.radius).abs() < 1e-12);
}

#[test]
fn point_sweeps_the_circle_at_constant_speed() {
    let board = circle_equation_storyboard(&CircleEquationParams::default()).unwrap();
    let sweep = board
        .cues
        .iter()
        .find_map(|c| match &c.step {
            AnimationStep::MoveAlongPath {
                target, path, ease, ..
            } => Some((target.clone(), path.clone(), *ease)),
            _ => None,
        })
        .expect("sweep step present");
    assert_eq!(sweep, ("point".to_string(), "circle".to_string(), Ease::Linear));
}

#[test]
fn triangle_parts_are_derived_shapes() {
    let board = circle_equation_storyboard(&CircleEquationParams::default()).unwrap();
    for key in [
        "radius_segment",
        "radius_label",
        "leg_h",
        "leg_v",
        "right_angle",
        "leg_h_label",
        "leg_v_label",
    ] {
        assert!(
            matches!(board.shapes.get(key), Some(ShapeDecl::Derived(_))),
            "'{key}' should be derived"
        );
    }
}

#[test]
fn custom_parameters_propagate() {
    let params = CircleEquationParams {
        center: Point::new(-1.0, 2.0),
        radius: 1.5,
    };
    let board = circle_equation_storyboard(&params).unwrap();
    let Some(ShapeDecl::Static(Shape::Dot(dot))) = board.shapes.get("point") else {
        panic!("expected the moving point dot");
    };
    assert_eq!(dot.at, Point::new(0.5, 2.0));

    let Some(ShapeDecl::Static(Shape::Circle(c))) = board.shapes.get("circle") else {
        panic!("expected the circle");
    };
    assert_eq!(c.circle.center, params.center);
    assert_eq!(c.circle.radius, params.radius);
}

#[test]
fn invalid_radius_is_rejected_before_any_cue() {
    let params = CircleEquationParams {
        center: Point::ORIGIN,
        radius: -3.0,
    };
    let err = circle_equation_storyboard(&params).unwrap_err();
    assert!(err.to_string().contains("invalid geometry"));
}
