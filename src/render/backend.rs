use crate::{
    foundation::error::ChalkResult,
    storyboard::ease::Ease,
    storyboard::shapes::{DeriveRule, Shape},
};

/// Opaque handle to a shape registered with a renderer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ShapeHandle(pub u64);

/// What a playback does to its shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlaybackKind {
    /// Draw the shape in.
    Create,
    /// Reveal text stroke by stroke.
    Write,
    /// Morph into another registered shape.
    TransformInto(ShapeHandle),
    /// Move along another registered shape's outline.
    MoveAlong(ShapeHandle),
    /// Fade the shape out of the scene.
    FadeOut,
}

/// One animation inside a step; every playback in a batch starts together.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Playback {
    /// Shape the animation acts on.
    pub handle: ShapeHandle,
    /// Animation kind.
    pub kind: PlaybackKind,
    /// Declared duration in seconds.
    pub duration_s: f64,
    /// Declared easing curve.
    pub ease: Ease,
}

/// The external animation renderer the choreography is performed against.
///
/// Implementations own the scene graph, interpolation, text layout and
/// output. Every method is blocking: `animate` and `wait` return only once
/// the renderer has signalled completion, which is what serializes the
/// choreography. Any error aborts the whole run; there is no partial-failure
/// recovery.
pub trait Renderer {
    /// Register a shape with the scene, returning its handle.
    fn create(&mut self, shape: &Shape) -> ChalkResult<ShapeHandle>;

    /// Register a reactive shape recomputed from `deps` every frame.
    ///
    /// `deps` carries the handles of [`DeriveRule::deps`] in the same order.
    fn derive(&mut self, rule: &DeriveRule, deps: &[ShapeHandle]) -> ChalkResult<ShapeHandle>;

    /// Play all animations in the batch concurrently; suspend the caller
    /// until the longest one finishes.
    fn animate(&mut self, batch: &[Playback]) -> ChalkResult<()>;

    /// Hold the scene still for `duration_s` seconds.
    fn wait(&mut self, duration_s: f64) -> ChalkResult<()>;

    /// Remove a shape from the scene instantly, without animation.
    fn remove(&mut self, handle: ShapeHandle) -> ChalkResult<()>;
}
