use kurbo::Point;

use crate::{
    foundation::core::{Style, palette},
    foundation::error::ChalkResult,
    geometry::engine::Circle,
    storyboard::dsl::StoryboardBuilder,
    storyboard::ease::Ease,
    storyboard::model::{Phase, Storyboard},
    storyboard::shapes::{
        CircleShape, DeriveRule, Direction, DotShape, EdgeSide, GridShape, Placement, Shape,
        TextKind, TextShape,
    },
};

/// Parameters of the circle-equation derivation.
///
/// The defaults reproduce the illustrative constants of the classic
/// presentation: center `(2, 1)` and radius `3`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleEquationParams {
    /// Circle center `(h, k)`.
    pub center: Point,
    /// Circle radius `r`.
    pub radius: f64,
}

impl Default for CircleEquationParams {
    fn default() -> Self {
        Self {
            center: Point::new(2.0, 1.0),
            radius: 3.0,
        }
    }
}

/// Derive `(x-h)^2 + (y-k)^2 = r^2` step by step.
///
/// The construction places a movable point `P` on the plane, spans the
/// right triangle between `P` and the center with reactive legs, applies
/// the Pythagorean theorem, then generalizes by sweeping `P` along the
/// circle. All triangle parts are derived shapes, so they follow `P`
/// throughout the sweep.
#[tracing::instrument]
pub fn circle_equation_storyboard(params: &CircleEquationParams) -> ChalkResult<Storyboard> {
    let CircleEquationParams { center, radius } = *params;
    let circle = Circle::new(center, radius)?;
    let start = circle.point_at(0.0);

    let board = StoryboardBuilder::new("circle_equation")
        .shape(
            "plane",
            Shape::Grid(GridShape {
                x_min: -6.0,
                x_max: 6.0,
                y_min: -4.0,
                y_max: 4.0,
                style: Style::stroke(palette::LIGHT_GRAY).with_width(1.0),
            }),
        )?
        .shape(
            "center",
            Shape::Dot(DotShape {
                at: center,
                style: Style::stroke(palette::BLUE),
            }),
        )?
        .shape(
            "center_label",
            math_next_to("(h, k)", 36.0, "center", Direction::UpRight, 0.1),
        )?
        .shape(
            "point",
            Shape::Dot(DotShape {
                at: start,
                style: Style::stroke(palette::RED),
            }),
        )?
        .shape(
            "point_label",
            math_next_to("P(x, y)", 36.0, "point", Direction::UpRight, 0.1),
        )?
        .derived(
            "radius_segment",
            DeriveRule::SegmentBetween {
                from: "center".into(),
                to: "point".into(),
                style: Style::stroke(palette::YELLOW),
            },
        )?
        .derived(
            "radius_label",
            DeriveRule::TrackingLabel {
                target: "radius_segment".into(),
                text: "r".into(),
                kind: TextKind::Math,
                size_pt: 36.0,
                direction: Direction::Right,
                gap: 0.1,
                style: Style::stroke(palette::WHITE),
            },
        )?
        .derived(
            "leg_h",
            DeriveRule::HorizontalLeg {
                center: "center".into(),
                point: "point".into(),
                style: Style::stroke(palette::GREEN),
            },
        )?
        .derived(
            "leg_v",
            DeriveRule::VerticalLeg {
                center: "center".into(),
                point: "point".into(),
                style: Style::stroke(palette::ORANGE),
            },
        )?
        .derived(
            "right_angle",
            DeriveRule::RightAngleMarker {
                horizontal: "leg_h".into(),
                vertical: "leg_v".into(),
                arm: 0.3,
                style: Style::stroke(palette::WHITE),
            },
        )?
        .derived(
            "leg_h_label",
            DeriveRule::TrackingLabel {
                target: "leg_h".into(),
                text: "|x-h|".into(),
                kind: TextKind::Math,
                size_pt: 30.0,
                direction: Direction::Down,
                gap: 0.1,
                style: Style::stroke(palette::GREEN),
            },
        )?
        .derived(
            "leg_v_label",
            DeriveRule::TrackingLabel {
                target: "leg_v".into(),
                text: "|y-k|".into(),
                kind: TextKind::Math,
                size_pt: 30.0,
                direction: Direction::Right,
                gap: 0.1,
                style: Style::stroke(palette::ORANGE),
            },
        )?
        .shape(
            "pythagoras_intro",
            plain_at_edge("By the Pythagorean theorem:", 36.0, EdgeSide::Top, 0.5),
        )?
        .shape(
            "pythagoras",
            math_next_to("a^2 + b^2 = c^2", 48.0, "pythagoras_intro", Direction::Down, 0.5),
        )?
        .shape(
            "substituted",
            math_next_to(
                "(x-h)^2 + (y-k)^2 = r^2",
                48.0,
                "pythagoras_intro",
                Direction::Down,
                0.5,
            ),
        )?
        .shape(
            "locus_note_1",
            plain_at_edge(
                "This equation holds for every point P(x, y)",
                30.0,
                EdgeSide::Top,
                0.5,
            ),
        )?
        .shape(
            "locus_note_2",
            Shape::Text(TextShape {
                text: "at the fixed distance r from the center (h, k).".into(),
                kind: TextKind::Plain,
                size_pt: 30.0,
                placement: Placement::NextTo {
                    anchor: "locus_note_1".into(),
                    direction: Direction::Down,
                    gap: 0.2,
                },
                style: Style::stroke(palette::WHITE),
            }),
        )?
        .shape(
            "circle",
            Shape::Circle(CircleShape {
                circle,
                style: Style::stroke(palette::YELLOW).with_width(4.0),
            }),
        )?
        .shape(
            "final_equation",
            Shape::Text(TextShape {
                text: "(x-h)^2 + (y-k)^2 = r^2".into(),
                kind: TextKind::Math,
                size_pt: 60.0,
                placement: Placement::Edge {
                    side: EdgeSide::Top,
                    margin: 0.5,
                },
                style: Style::stroke(palette::YELLOW),
            }),
        )?
        .shape(
            "conclusion",
            plain_next_to(
                "This is the standard equation of a circle.",
                36.0,
                "final_equation",
                Direction::Down,
                1.0,
            ),
        )?
        // Setup: the coordinate plane.
        .create(["plane"], 1.0)
        .wait(0.5)
        // Introduce the fixed center and the movable point.
        .phase(Phase::IntroduceElements)?
        .create(["center"], 0.6)
        .write(["center_label"], 0.6)
        .wait(1.0)
        .create(["point"], 0.6)
        .write(["point_label"], 0.6)
        .wait(1.0)
        .create(["radius_segment"], 0.8)
        .write(["radius_label"], 0.6)
        .wait(1.0)
        // Span the right triangle and state the theorem.
        .phase(Phase::BuildRelation)?
        .create(["leg_h", "leg_v"], 1.0)
        .create(["right_angle"], 0.6)
        .write(["leg_h_label", "leg_v_label"], 1.0)
        .wait(1.5)
        .write(["pythagoras_intro"], 0.8)
        .write(["pythagoras"], 0.8)
        .wait(1.0)
        .transform(["pythagoras"], "substituted", 1.0)
        .fade_out(["pythagoras_intro"], 0.5)
        .wait(2.0)
        // Generalize: the equation holds for every point of the circle.
        .phase(Phase::GeneralizeTransform)?
        .fade_out(
            ["leg_h_label", "leg_v_label", "right_angle", "leg_h", "leg_v"],
            0.8,
        )
        .write(["locus_note_1"], 0.8)
        .write(["locus_note_2"], 0.8)
        .wait(2.0)
        .fade_out(["locus_note_1", "locus_note_2"], 0.6)
        // The static label would lag the sweep; drop it instantly.
        .fade_out(["point_label"], 0.0)
        .create(["circle"], 1.5)
        .move_along("point", "circle", 4.0, Ease::Linear)
        .wait(1.0)
        // Conclude with the boxed equation.
        .phase(Phase::Conclude)?
        .transform(["substituted"], "final_equation", 1.0)
        .fade_out(["radius_segment", "radius_label"], 0.8)
        .fade_out(["point"], 0.6)
        .write(["conclusion"], 0.8)
        .wait(3.0)
        .phase(Phase::Cleanup)?
        .fade_out(
            [
                "plane",
                "center",
                "center_label",
                "circle",
                "final_equation",
                "conclusion",
            ],
            1.0,
        )
        .wait(1.0)
        .build()?;

    Ok(board)
}

fn math_next_to(text: &str, size_pt: f64, anchor: &str, direction: Direction, gap: f64) -> Shape {
    Shape::Text(TextShape {
        text: text.into(),
        kind: TextKind::Math,
        size_pt,
        placement: Placement::NextTo {
            anchor: anchor.into(),
            direction,
            gap,
        },
        style: Style::stroke(palette::WHITE),
    })
}

fn plain_next_to(
    text: &str,
    size_pt: f64,
    anchor: &str,
    direction: Direction,
    gap: f64,
) -> Shape {
    Shape::Text(TextShape {
        text: text.into(),
        kind: TextKind::Plain,
        size_pt,
        placement: Placement::NextTo {
            anchor: anchor.into(),
            direction,
            gap,
        },
        style: Style::stroke(palette::WHITE),
    })
}

fn plain_at_edge(text: &str, size_pt: f64, side: EdgeSide, margin: f64) -> Shape {
    Shape::Text(TextShape {
        text: text.into(),
        kind: TextKind::Plain,
        size_pt,
        placement: Placement::Edge { side, margin },
        style: Style::stroke(palette::WHITE),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/circle_equation.rs"]
mod tests;
