use super::*;
use crate::{
    foundation::core::{Point, Style, palette},
    render::script::{ScriptEvent, ScriptRenderer},
    storyboard::dsl::StoryboardBuilder,
    storyboard::model::Phase,
    storyboard::shapes::{DotShape, Shape, TextKind},
};

fn dot(x: f64, y: f64) -> Shape {
    Shape::Dot(DotShape {
        at: Point::new(x, y),
        style: Style::stroke(palette::WHITE),
    })
}

fn two_dot_board() -> Storyboard {
    StoryboardBuilder::new("two_dots")
        .shape("c", dot(2.0, 1.0))
        .unwrap()
        .shape("p", dot(5.0, 1.0))
        .unwrap()
        .derived(
            "z_segment",
            DeriveRule::SegmentBetween {
                from: "c".into(),
                to: "p".into(),
                style: Style::stroke(palette::YELLOW),
            },
        )
        .unwrap()
        .derived(
            "a_label",
            DeriveRule::TrackingLabel {
                target: "z_segment".into(),
                text: "r".into(),
                kind: TextKind::Math,
                size_pt: 36.0,
                direction: crate::storyboard::shapes::Direction::Right,
                gap: 0.1,
                style: Style::stroke(palette::WHITE),
            },
        )
        .unwrap()
        .create(["c", "p"], 1.0)
        .phase(Phase::IntroduceElements)
        .unwrap()
        .create(["z_segment", "a_label"], 0.8)
        .wait(0.5)
        .build()
        .unwrap()
}

#[test]
fn registers_statics_then_derived_then_plays() {
    let board = two_dot_board();
    let mut renderer = ScriptRenderer::default();
    let report = perform(&board, &mut renderer).unwrap();

    assert_eq!(report.cues_played, 3);
    let kinds: Vec<&'static str> = renderer
        .events
        .iter()
        .map(|e| match e {
            ScriptEvent::Created { .. } => "created",
            ScriptEvent::Derived { .. } => "derived",
            ScriptEvent::Played { .. } => "played",
            ScriptEvent::Waited { .. } => "waited",
            ScriptEvent::Removed { .. } => "removed",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["created", "created", "derived", "derived", "played", "played", "waited"]
    );
}

#[test]
fn chained_derives_register_dependencies_first() {
    // "a_label" sorts before "z_segment" but depends on it; the driver must
    // still register the segment first.
    let board = two_dot_board();
    let mut renderer = ScriptRenderer::default();
    perform(&board, &mut renderer).unwrap();

    let derived: Vec<&ScriptEvent> = renderer
        .events
        .iter()
        .filter(|e| matches!(e, ScriptEvent::Derived { .. }))
        .collect();
    assert_eq!(derived.len(), 2);
    let ScriptEvent::Derived {
        handle: first_handle,
        ..
    } = derived[0]
    else {
        unreachable!();
    };
    let ScriptEvent::Derived { deps, .. } = derived[1] else {
        unreachable!();
    };
    // The label's sole dependency is the segment registered just before it.
    assert_eq!(deps, &vec![*first_handle]);
}

#[test]
fn derived_snapshot_matches_current_geometry() {
    let board = two_dot_board();
    let mut renderer = ScriptRenderer::default();
    perform(&board, &mut renderer).unwrap();

    let segment = renderer
        .events
        .iter()
        .find_map(|e| match e {
            ScriptEvent::Derived { handle, deps } if deps.len() == 2 => Some(*handle),
            _ => None,
        })
        .expect("segment registered");
    let Some(Shape::Line(line)) = renderer.shape(segment) else {
        panic!("expected the segment snapshot");
    };
    assert_eq!(line.from, Point::new(2.0, 1.0));
    assert_eq!(line.to, Point::new(5.0, 1.0));
}

#[test]
fn zero_duration_fade_out_maps_to_remove() {
    let board = StoryboardBuilder::new("instant")
        .shape("a", dot(0.0, 0.0))
        .unwrap()
        .create(["a"], 0.5)
        .fade_out(["a"], 0.0)
        .build()
        .unwrap();

    let mut renderer = ScriptRenderer::default();
    perform(&board, &mut renderer).unwrap();
    assert!(
        renderer
            .events
            .iter()
            .any(|e| matches!(e, ScriptEvent::Removed { .. }))
    );
    assert_eq!(
        renderer
            .events
            .iter()
            .filter(|e| matches!(e, ScriptEvent::Played { .. }))
            .count(),
        1
    );
}

#[test]
fn renderer_failure_aborts_the_run() {
    let board = two_dot_board();
    // Fail on the fifth call: statics (2) + derives (2) succeed, the first
    // animate does not.
    let mut renderer = ScriptRenderer::failing_at(4);
    let err = perform(&board, &mut renderer).unwrap_err();
    assert!(matches!(err, ChalkError::Renderer(_)));
    assert_eq!(renderer.events.len(), 4);
}

#[test]
fn report_matches_declared_and_observed_time() {
    let board = two_dot_board();
    let mut renderer = ScriptRenderer::default();
    let report = perform(&board, &mut renderer).unwrap();
    assert_eq!(report.declared_secs, board.total_declared_secs());
    assert_eq!(renderer.elapsed_s, 1.0 + 0.8 + 0.5);
}

#[test]
fn transform_batches_every_source_shape() {
    let board = StoryboardBuilder::new("morph")
        .shape("a", dot(0.0, 0.0))
        .unwrap()
        .shape("b", dot(1.0, 0.0))
        .unwrap()
        .shape("target", dot(2.0, 0.0))
        .unwrap()
        .create(["a", "b", "target"], 0.5)
        .transform(["a", "b"], "target", 1.0)
        .build()
        .unwrap();

    let mut renderer = ScriptRenderer::default();
    perform(&board, &mut renderer).unwrap();
    let morph = renderer
        .events
        .iter()
        .find_map(|e| match e {
            ScriptEvent::Played { batch } if batch.len() == 2 => Some(batch.clone()),
            _ => None,
        })
        .expect("morph batch present");
    let target = morph[0].kind;
    assert!(matches!(target, PlaybackKind::TransformInto(_)));
    assert_eq!(morph[0].kind, morph[1].kind);
}
