//! Chalkline builds step-by-step geometric derivations as declarative
//! animation storyboards.
//!
//! A storyboard is pure data: a table of shapes (some static, some derived
//! from other shapes every frame) plus an ordered sequence of timed steps.
//! Rendering, text layout and easing playback belong to an external
//! renderer consumed through the [`Renderer`] trait.
//!
//! # Pipeline overview
//!
//! 1. **Choreograph**: parameters -> [`Storyboard`] (pure, validated eagerly)
//! 2. **Perform**: [`Storyboard`] + [`Renderer`] -> strictly sequential,
//!    blocking playback ([`perform`])
//!
//! Two choreographies ship with the crate:
//!
//! - [`circle_equation_storyboard`]: derives `(x-h)^2 + (y-k)^2 = r^2` from
//!   the Pythagorean theorem on a moving point.
//! - [`circle_area_storyboard`]: demonstrates `Area = pi * r^2` by cutting a
//!   circle into sectors and rearranging them into a half-circumference
//!   rectangle.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Eager validation**: invalid geometry and structural storyboard
//!   defects are rejected before any rendering begins.
//! - **No partial runs**: a renderer failure aborts the whole performance.
#![forbid(unsafe_code)]

mod choreography;
mod foundation;
mod geometry;
mod render;
mod storyboard;

pub use choreography::circle_area::{CircleAreaParams, circle_area_storyboard};
pub use choreography::circle_equation::{CircleEquationParams, circle_equation_storyboard};
pub use foundation::core::{Point, Rgba8, Style, Vec2, palette};
pub use foundation::error::{ChalkError, ChalkResult};
pub use geometry::engine::{Circle, distance, legs, point_on_circle};
pub use geometry::sectors::{RectangleSlice, Sector, SectorLayout, SliceOrientation};
pub use render::backend::{Playback, PlaybackKind, Renderer, ShapeHandle};
pub use render::driver::{RunReport, perform};
pub use render::script::{ScriptEvent, ScriptRenderer};
pub use storyboard::dsl::StoryboardBuilder;
pub use storyboard::ease::Ease;
pub use storyboard::model::{AnimationStep, Cue, Phase, ShapeDecl, ShapeId, Storyboard};
pub use storyboard::shapes::{
    AngleMarkerShape, ArrowShape, CircleShape, DeriveRule, Direction, DotShape, EdgeSide,
    GridShape, LineKind, LineShape, Placement, RectShape, Shape, TextKind, TextShape,
};
