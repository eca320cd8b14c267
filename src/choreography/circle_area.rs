use kurbo::Point;

use crate::{
    foundation::core::{Style, palette},
    foundation::error::ChalkResult,
    geometry::engine::Circle,
    geometry::sectors::{SectorLayout, SliceOrientation},
    storyboard::dsl::StoryboardBuilder,
    storyboard::model::{Phase, Storyboard},
    storyboard::shapes::{
        ArrowShape, CircleShape, Direction, EdgeSide, LineKind, LineShape, Placement, RectShape,
        Shape, TextKind, TextShape,
    },
};

/// Parameters of the circle-area demonstration.
///
/// The defaults reproduce the classic presentation: radius `2`, cut into
/// `16` sectors. The sector count must be even; a larger count only smooths
/// the jagged edge of the rearranged row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleAreaParams {
    /// Circle radius `r`.
    pub radius: f64,
    /// Even number of sectors the circle is cut into.
    pub sector_count: usize,
}

impl Default for CircleAreaParams {
    fn default() -> Self {
        Self {
            radius: 2.0,
            sector_count: 16,
        }
    }
}

/// Demonstrate `Area = pi * r^2` by sector rearrangement.
///
/// The circle is cut into an even number of sectors which are laid out in
/// an alternating up/down row of width `pi * r` and height `r`; morphing
/// the row into a proper rectangle gives the area formula as
/// width x height.
#[tracing::instrument]
pub fn circle_area_storyboard(params: &CircleAreaParams) -> ChalkResult<Storyboard> {
    let CircleAreaParams {
        radius,
        sector_count,
    } = *params;
    let layout = SectorLayout::new(radius, sector_count)?;
    let circle = Circle::new(Point::ORIGIN, radius)?;
    let half_circumference = layout.row_width();

    let mut builder = StoryboardBuilder::new("circle_area")
        .shape(
            "circle",
            Shape::Circle(CircleShape {
                circle,
                style: Style::stroke(palette::BLUE).with_width(4.0).with_fill(0.2),
            }),
        )?
        .shape(
            "title",
            plain_at_edge("Area of a circle", 50.0, EdgeSide::Top, 0.5),
        )?
        .shape(
            "divide_note",
            plain_at_edge(
                "Divide the circle into equal sectors.",
                40.0,
                EdgeSide::Top,
                0.5,
            ),
        )?
        .shape(
            "rearrange_note",
            plain_at_edge(
                "Rearrange the sectors into a row.",
                40.0,
                EdgeSide::Top,
                0.5,
            ),
        )?;

    // One radial cut per sector boundary.
    let mut spoke_ids = Vec::with_capacity(sector_count);
    for sector in layout.sectors() {
        let id = format!("spoke_{:02}", sector.index);
        builder = builder.shape(
            id.as_str(),
            Shape::Line(LineShape {
                from: circle.center,
                to: circle.point_at(sector.start_angle),
                kind: LineKind::Solid,
                style: Style::stroke(palette::WHITE).with_width(2.0),
            }),
        )?;
        spoke_ids.push(id);
    }

    // The rearranged slices, alternating up/down along the row.
    let mut slice_ids = Vec::with_capacity(sector_count);
    for slice in layout.slices() {
        let id = format!("slice_{:02}", slice.index);
        builder = builder.shape(
            id.as_str(),
            Shape::Rect(RectShape {
                center: slice.center,
                width: slice.width,
                height: slice.height,
                flipped_v: slice.orientation == SliceOrientation::Down,
                style: Style::stroke(palette::ORANGE).with_width(1.0).with_fill(0.5),
            }),
        )?;
        slice_ids.push(id);
    }

    let builder = builder
        .shape(
            "row_rect",
            Shape::Rect(RectShape {
                center: Point::ORIGIN,
                width: half_circumference,
                height: radius,
                flipped_v: false,
                style: Style::stroke(palette::GREEN).with_width(4.0).with_fill(0.3),
            }),
        )?
        .shape(
            "row_rect_small",
            Shape::Rect(RectShape {
                center: Point::new(0.0, -1.5),
                width: half_circumference * 0.8,
                height: radius * 0.8,
                flipped_v: false,
                style: Style::stroke(palette::GREEN).with_width(4.0).with_fill(0.3),
            }),
        )?
        .shape(
            "width_arrow",
            Shape::Arrow(ArrowShape {
                from: Point::new(-half_circumference / 2.0, -radius / 2.0 - 0.5),
                to: Point::new(half_circumference / 2.0, -radius / 2.0 - 0.5),
                style: Style::stroke(palette::WHITE),
            }),
        )?
        .shape(
            "height_arrow",
            Shape::Arrow(ArrowShape {
                from: Point::new(-half_circumference / 2.0 - 0.5, -radius / 2.0),
                to: Point::new(-half_circumference / 2.0 - 0.5, radius / 2.0),
                style: Style::stroke(palette::WHITE),
            }),
        )?
        .shape(
            "width_label",
            math_next_to(
                r"\pi r \text{ (half the circumference)}",
                35.0,
                "width_arrow",
                Direction::Down,
                0.1,
            ),
        )?
        .shape(
            "height_label",
            math_next_to(r"r \text{ (radius)}", 35.0, "height_arrow", Direction::Left, 0.1),
        )?
        .shape(
            "area_rect_formula",
            math_at_edge(
                r"\text{Area} = \text{width} \times \text{height}",
                45.0,
                EdgeSide::Top,
                0.5,
            ),
        )?
        .shape(
            "area_subst_formula",
            math_at_edge(r"\text{Area} = (\pi r) \times r", 45.0, EdgeSide::Top, 0.5),
        )?
        .shape(
            "area_formula",
            math_at_edge(r"\text{Area} = \pi r^2", 60.0, EdgeSide::Top, 0.5),
        )?;

    let board = builder
        // Setup: the circle and the title.
        .create(["circle"], 1.0)
        .write(["title"], 0.8)
        .wait(1.0)
        // Cut the circle into sectors.
        .phase(Phase::IntroduceElements)?
        .transform(["title"], "divide_note", 0.8)
        .create(spoke_ids.clone(), 2.0)
        .wait(1.0)
        // Swap the circle for the rearranged slice row.
        .phase(Phase::BuildRelation)?
        .fade_out(["divide_note"], 0.5)
        .write(["rearrange_note"], 0.8)
        .fade_out(
            spoke_ids.iter().map(String::as_str).chain(["circle"]),
            1.5,
        )
        .wait(0.5)
        .create(slice_ids.clone(), 2.0)
        .wait(1.0)
        // Smooth the jagged row into a proper rectangle and measure it.
        .phase(Phase::GeneralizeTransform)?
        .fade_out(["rearrange_note"], 0.5)
        .transform(slice_ids, "row_rect", 2.0)
        .wait(1.0)
        .create(["width_arrow", "height_arrow"], 0.8)
        .write(["width_label", "height_label"], 0.8)
        .wait(2.0)
        // Read the area formula off the rectangle.
        .phase(Phase::Conclude)?
        .fade_out(
            ["width_arrow", "height_arrow", "width_label", "height_label"],
            0.6,
        )
        .transform(["row_rect"], "row_rect_small", 0.8)
        .write(["area_rect_formula"], 0.8)
        .wait(1.0)
        .transform(["area_rect_formula"], "area_subst_formula", 0.8)
        .wait(1.0)
        .transform(["area_subst_formula"], "area_formula", 0.8)
        .wait(3.0)
        .phase(Phase::Cleanup)?
        .fade_out(["area_formula", "row_rect_small"], 0.8)
        .wait(1.0)
        .build()?;

    Ok(board)
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

fn math_at_edge(text: &str, size_pt: f64, side: EdgeSide, margin: f64) -> Shape {
    Shape::Text(TextShape {
        text: text.into(),
        kind: TextKind::Math,
        size_pt,
        placement: Placement::Edge { side, margin },
        style: Style::stroke(palette::WHITE),
    })
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

#[cfg(test)]
#[path = "../../tests/unit/choreography/circle_area.rs"]
mod tests;
