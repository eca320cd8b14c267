use kurbo::{Point, Vec2};

use crate::{
    foundation::core::Style,
    foundation::error::{ChalkError, ChalkResult},
    geometry::engine::{self, Circle},
    storyboard::model::ShapeId,
};

/// A declarative drawable handed to the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// Background coordinate grid with unit spacing.
    Grid(GridShape),
    /// A marked point.
    Dot(DotShape),
    /// A straight segment, solid or dashed.
    Line(LineShape),
    /// An arrow between two points.
    Arrow(ArrowShape),
    /// A circle outline, optionally filled.
    Circle(CircleShape),
    /// An axis-aligned rectangle, optionally vertically mirrored.
    Rect(RectShape),
    /// Small square marking the right angle between two legs.
    AngleMarker(AngleMarkerShape),
    /// Plain or math text with declarative placement.
    Text(TextShape),
}

/// Coordinate grid configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridShape {
    /// Left edge in scene units.
    pub x_min: f64,
    /// Right edge in scene units.
    pub x_max: f64,
    /// Bottom edge in scene units.
    pub y_min: f64,
    /// Top edge in scene units.
    pub y_max: f64,
    /// Grid line styling.
    pub style: Style,
}

/// A marked point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DotShape {
    /// Current position.
    pub at: Point,
    /// Dot styling.
    pub style: Style,
}

/// Stroke pattern of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineKind {
    /// Continuous stroke.
    #[default]
    Solid,
    /// Dashed stroke, used for construction lines.
    Dashed,
}

/// A straight segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineShape {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Stroke pattern.
    #[serde(default)]
    pub kind: LineKind,
    /// Line styling.
    pub style: Style,
}

impl LineShape {
    /// Midpoint of the segment; labels anchor here.
    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }
}

/// An arrow between two points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrowShape {
    /// Tail point.
    pub from: Point,
    /// Head point.
    pub to: Point,
    /// Arrow styling.
    pub style: Style,
}

/// A circle outline, optionally filled.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleShape {
    /// Circle geometry.
    pub circle: Circle,
    /// Outline and fill styling.
    pub style: Style,
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectShape {
    /// Center of the rectangle.
    pub center: Point,
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
    /// Draw vertically mirrored; used by the down-pointing sector slices.
    #[serde(default)]
    pub flipped_v: bool,
    /// Outline and fill styling.
    pub style: Style,
}

/// Small square marking a right angle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AngleMarkerShape {
    /// The corner where the two legs meet.
    pub corner: Point,
    /// Signed horizontal extent pointing into the triangle.
    pub arm_x: f64,
    /// Signed vertical extent pointing into the triangle.
    pub arm_y: f64,
    /// Marker styling.
    pub style: Style,
}

/// Text rendering mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TextKind {
    /// Ordinary prose.
    #[default]
    Plain,
    /// Typeset as a math expression.
    Math,
}

/// Screen side used by edge placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EdgeSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Compass direction used by relative placement, y pointing up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Unit offset of the direction (diagonals unnormalized).
    pub fn offset(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, 1.0),
            Self::Down => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::UpLeft => Vec2::new(-1.0, 1.0),
            Self::UpRight => Vec2::new(1.0, 1.0),
            Self::DownLeft => Vec2::new(-1.0, -1.0),
            Self::DownRight => Vec2::new(1.0, -1.0),
        }
    }
}

/// Where a text shape sits; the renderer's text layout resolves the box.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Placement {
    /// Absolute anchor point in scene units.
    At(Point),
    /// Offset from another shape's reference point.
    NextTo {
        /// Anchor shape key.
        anchor: ShapeId,
        /// Offset direction from the anchor.
        direction: Direction,
        /// Gap between anchor and text in scene units.
        gap: f64,
    },
    /// Pinned to a screen edge.
    Edge {
        /// Which edge.
        side: EdgeSide,
        /// Margin from the edge in scene units.
        margin: f64,
    },
}

/// Plain or math text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextShape {
    /// UTF-8 content; math text uses TeX-style markup.
    pub text: String,
    /// Rendering mode.
    #[serde(default)]
    pub kind: TextKind,
    /// Font size in points.
    pub size_pt: f64,
    /// Declarative placement.
    pub placement: Placement,
    /// Text styling.
    pub style: Style,
}

impl Shape {
    /// Validate shape invariants; placement anchors are checked at the
    /// storyboard level where the shape table is known.
    pub fn validate(&self) -> ChalkResult<()> {
        match self {
            Shape::Grid(g) => {
                for (name, v) in [
                    ("x_min", g.x_min),
                    ("x_max", g.x_max),
                    ("y_min", g.y_min),
                    ("y_max", g.y_max),
                ] {
                    if !v.is_finite() {
                        return Err(ChalkError::storyboard(format!(
                            "grid {name} must be finite"
                        )));
                    }
                }
                if g.x_min >= g.x_max || g.y_min >= g.y_max {
                    return Err(ChalkError::storyboard("grid ranges must be non-empty"));
                }
                g.style.validate()
            }
            Shape::Dot(d) => {
                finite_point(d.at, "dot position")?;
                d.style.validate()
            }
            Shape::Line(l) => {
                finite_point(l.from, "line start")?;
                finite_point(l.to, "line end")?;
                l.style.validate()
            }
            Shape::Arrow(a) => {
                finite_point(a.from, "arrow tail")?;
                finite_point(a.to, "arrow head")?;
                a.style.validate()
            }
            Shape::Circle(c) => {
                // Re-checked here because the model can be deserialized
                // without going through Circle::new.
                Circle::new(c.circle.center, c.circle.radius)?;
                c.style.validate()
            }
            Shape::Rect(r) => {
                finite_point(r.center, "rect center")?;
                if !r.width.is_finite() || r.width <= 0.0 {
                    return Err(ChalkError::storyboard("rect width must be finite and > 0"));
                }
                if !r.height.is_finite() || r.height <= 0.0 {
                    return Err(ChalkError::storyboard(
                        "rect height must be finite and > 0",
                    ));
                }
                r.style.validate()
            }
            Shape::AngleMarker(m) => {
                finite_point(m.corner, "angle marker corner")?;
                if !m.arm_x.is_finite() || !m.arm_y.is_finite() {
                    return Err(ChalkError::storyboard("angle marker arms must be finite"));
                }
                m.style.validate()
            }
            Shape::Text(t) => {
                if t.text.trim().is_empty() {
                    return Err(ChalkError::storyboard("text must be non-empty"));
                }
                if !t.size_pt.is_finite() || t.size_pt <= 0.0 {
                    return Err(ChalkError::storyboard(
                        "text size_pt must be finite and > 0",
                    ));
                }
                match &t.placement {
                    Placement::At(p) => finite_point(*p, "text anchor")?,
                    Placement::NextTo { gap, .. } => {
                        if !gap.is_finite() || *gap < 0.0 {
                            return Err(ChalkError::storyboard(
                                "text placement gap must be finite and >= 0",
                            ));
                        }
                    }
                    Placement::Edge { margin, .. } => {
                        if !margin.is_finite() || *margin < 0.0 {
                            return Err(ChalkError::storyboard(
                                "text placement margin must be finite and >= 0",
                            ));
                        }
                    }
                }
                t.style.validate()
            }
        }
    }

    /// The point labels and markers anchor to.
    pub fn reference_point(&self) -> ChalkResult<Point> {
        match self {
            Shape::Grid(g) => Ok(Point::new(
                (g.x_min + g.x_max) / 2.0,
                (g.y_min + g.y_max) / 2.0,
            )),
            Shape::Dot(d) => Ok(d.at),
            Shape::Line(l) => Ok(l.midpoint()),
            Shape::Arrow(a) => Ok(a.from.midpoint(a.to)),
            Shape::Circle(c) => Ok(c.circle.center),
            Shape::Rect(r) => Ok(r.center),
            Shape::AngleMarker(m) => Ok(m.corner),
            Shape::Text(t) => match &t.placement {
                Placement::At(p) => Ok(*p),
                _ => Err(ChalkError::storyboard(
                    "text with relative placement has no reference point",
                )),
            },
        }
    }

    /// Placement anchor key, if the shape uses relative placement.
    pub fn placement_anchor(&self) -> Option<&ShapeId> {
        match self {
            Shape::Text(t) => match &t.placement {
                Placement::NextTo { anchor, .. } => Some(anchor),
                _ => None,
            },
            _ => None,
        }
    }
}

fn finite_point(p: Point, what: &str) -> ChalkResult<()> {
    if !p.x.is_finite() || !p.y.is_finite() {
        return Err(ChalkError::storyboard(format!(
            "{what} must have finite coordinates"
        )));
    }
    Ok(())
}

/// A reactive shape: declared dependencies plus a pure recomputation rule
/// the renderer evaluates every frame from the dependencies' current state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DeriveRule {
    /// Solid segment between the current positions of two dots.
    SegmentBetween {
        /// Start dot key.
        from: ShapeId,
        /// End dot key.
        to: ShapeId,
        /// Segment styling.
        style: Style,
    },
    /// Dashed horizontal leg from `center`'s dot to below/above `point`'s dot.
    HorizontalLeg {
        /// Center dot key.
        center: ShapeId,
        /// Moving dot key.
        point: ShapeId,
        /// Leg styling.
        style: Style,
    },
    /// Dashed vertical leg closing the right triangle at `point`.
    VerticalLeg {
        /// Center dot key.
        center: ShapeId,
        /// Moving dot key.
        point: ShapeId,
        /// Leg styling.
        style: Style,
    },
    /// Right-angle marker where the two legs meet.
    RightAngleMarker {
        /// Horizontal leg key (usually itself derived).
        horizontal: ShapeId,
        /// Vertical leg key (usually itself derived).
        vertical: ShapeId,
        /// Side length of the marker square.
        arm: f64,
        /// Marker styling.
        style: Style,
    },
    /// Text that re-anchors to its target's current reference point.
    TrackingLabel {
        /// Tracked shape key.
        target: ShapeId,
        /// Label content.
        text: String,
        /// Rendering mode.
        kind: TextKind,
        /// Font size in points.
        size_pt: f64,
        /// Offset direction from the target.
        direction: Direction,
        /// Gap from the target in scene units.
        gap: f64,
        /// Label styling.
        style: Style,
    },
}

impl DeriveRule {
    /// Keys of the shapes this rule recomputes from, in a stable order.
    pub fn deps(&self) -> Vec<&ShapeId> {
        match self {
            Self::SegmentBetween { from, to, .. } => vec![from, to],
            Self::HorizontalLeg { center, point, .. }
            | Self::VerticalLeg { center, point, .. } => vec![center, point],
            Self::RightAngleMarker {
                horizontal,
                vertical,
                ..
            } => vec![horizontal, vertical],
            Self::TrackingLabel { target, .. } => vec![target],
        }
    }

    /// Validate rule payload invariants.
    pub fn validate(&self) -> ChalkResult<()> {
        match self {
            Self::SegmentBetween { style, .. }
            | Self::HorizontalLeg { style, .. }
            | Self::VerticalLeg { style, .. } => style.validate(),
            Self::RightAngleMarker { arm, style, .. } => {
                if !arm.is_finite() || *arm <= 0.0 {
                    return Err(ChalkError::storyboard(
                        "right angle marker arm must be finite and > 0",
                    ));
                }
                style.validate()
            }
            Self::TrackingLabel {
                text,
                size_pt,
                gap,
                style,
                ..
            } => {
                if text.trim().is_empty() {
                    return Err(ChalkError::storyboard(
                        "tracking label text must be non-empty",
                    ));
                }
                if !size_pt.is_finite() || *size_pt <= 0.0 {
                    return Err(ChalkError::storyboard(
                        "tracking label size_pt must be finite and > 0",
                    ));
                }
                if !gap.is_finite() || *gap < 0.0 {
                    return Err(ChalkError::storyboard(
                        "tracking label gap must be finite and >= 0",
                    ));
                }
                style.validate()
            }
        }
    }

    /// Recompute the shape from the dependencies' current state.
    ///
    /// `lookup` must resolve every key in [`DeriveRule::deps`] to that
    /// shape's current (already resolved) form. The computation is pure; the
    /// renderer's frame loop calls it as often as it likes.
    pub fn resolve<'a, F>(&self, lookup: F) -> ChalkResult<Shape>
    where
        F: Fn(&str) -> Option<&'a Shape>,
    {
        match self {
            Self::SegmentBetween { from, to, style } => {
                let a = dot_position(&lookup, from)?;
                let b = dot_position(&lookup, to)?;
                Ok(Shape::Line(LineShape {
                    from: a,
                    to: b,
                    kind: LineKind::Solid,
                    style: *style,
                }))
            }
            Self::HorizontalLeg {
                center,
                point,
                style,
            } => {
                let c = dot_position(&lookup, center)?;
                let p = dot_position(&lookup, point)?;
                let (dx, _) = engine::legs(c, p);
                let toward = (p.x - c.x).signum();
                Ok(Shape::Line(LineShape {
                    from: c,
                    to: Point::new(c.x + toward * dx, c.y),
                    kind: LineKind::Dashed,
                    style: *style,
                }))
            }
            Self::VerticalLeg {
                center,
                point,
                style,
            } => {
                let c = dot_position(&lookup, center)?;
                let p = dot_position(&lookup, point)?;
                let (_, dy) = engine::legs(c, p);
                let toward = (p.y - c.y).signum();
                let corner = Point::new(p.x, c.y);
                Ok(Shape::Line(LineShape {
                    from: corner,
                    to: Point::new(corner.x, corner.y + toward * dy),
                    kind: LineKind::Dashed,
                    style: *style,
                }))
            }
            Self::RightAngleMarker {
                horizontal,
                vertical,
                arm,
                style,
            } => {
                let h = line_shape(&lookup, horizontal)?;
                let v = line_shape(&lookup, vertical)?;
                let corner = h.to;
                Ok(Shape::AngleMarker(AngleMarkerShape {
                    corner,
                    arm_x: (h.from.x - corner.x).signum() * arm,
                    arm_y: (v.to.y - corner.y).signum() * arm,
                    style: *style,
                }))
            }
            Self::TrackingLabel {
                target,
                text,
                kind,
                size_pt,
                direction,
                gap,
                style,
            } => {
                let anchor = lookup(target)
                    .ok_or_else(|| missing_dep(target))?
                    .reference_point()?;
                Ok(Shape::Text(TextShape {
                    text: text.clone(),
                    kind: *kind,
                    size_pt: *size_pt,
                    placement: Placement::At(anchor + direction.offset() * *gap),
                    style: *style,
                }))
            }
        }
    }
}

fn missing_dep(key: &str) -> ChalkError {
    ChalkError::storyboard(format!("derive dependency '{key}' is not registered"))
}

fn dot_position<'a, F>(lookup: &F, key: &str) -> ChalkResult<Point>
where
    F: Fn(&str) -> Option<&'a Shape>,
{
    match lookup(key).ok_or_else(|| missing_dep(key))? {
        Shape::Dot(d) => Ok(d.at),
        _ => Err(ChalkError::storyboard(format!(
            "derive dependency '{key}' must be a dot"
        ))),
    }
}

fn line_shape<'a, F>(lookup: &F, key: &str) -> ChalkResult<LineShape>
where
    F: Fn(&str) -> Option<&'a Shape>,
{
    match lookup(key).ok_or_else(|| missing_dep(key))? {
        Shape::Line(l) => Ok(*l),
        _ => Err(ChalkError::storyboard(format!(
            "derive dependency '{key}' must be a line"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/shapes.rs"]
mod tests;
