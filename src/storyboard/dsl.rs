use std::collections::BTreeMap;

use crate::{
    foundation::error::{ChalkError, ChalkResult},
    storyboard::ease::Ease,
    storyboard::model::{AnimationStep, Cue, Phase, ShapeDecl, ShapeId, Storyboard},
    storyboard::shapes::{DeriveRule, Shape},
};

/// Builder for [`Storyboard`]; validates on [`StoryboardBuilder::build`].
///
/// Steps are recorded under the current phase, which starts at
/// [`Phase::Setup`] and may only move forward.
pub struct StoryboardBuilder {
    name: String,
    shapes: BTreeMap<ShapeId, ShapeDecl>,
    cues: Vec<Cue>,
    phase: Phase,
}

impl StoryboardBuilder {
    /// Start an empty storyboard in [`Phase::Setup`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: BTreeMap::new(),
            cues: Vec::new(),
            phase: Phase::Setup,
        }
    }

    /// Declare a static shape under a fresh key.
    pub fn shape(mut self, key: impl Into<String>, shape: Shape) -> ChalkResult<Self> {
        let key = key.into();
        if self.shapes.contains_key(&key) {
            return Err(ChalkError::storyboard(format!(
                "duplicate shape key '{key}'"
            )));
        }
        self.shapes.insert(key, ShapeDecl::Static(shape));
        Ok(self)
    }

    /// Declare a derived (reactive) shape under a fresh key.
    pub fn derived(mut self, key: impl Into<String>, rule: DeriveRule) -> ChalkResult<Self> {
        let key = key.into();
        if self.shapes.contains_key(&key) {
            return Err(ChalkError::storyboard(format!(
                "duplicate shape key '{key}'"
            )));
        }
        self.shapes.insert(key, ShapeDecl::Derived(rule));
        Ok(self)
    }

    /// Advance to `phase`; moving backward is an error.
    pub fn phase(mut self, phase: Phase) -> ChalkResult<Self> {
        if phase < self.phase {
            return Err(ChalkError::storyboard(format!(
                "cannot move from phase {:?} back to {phase:?}",
                self.phase
            )));
        }
        self.phase = phase;
        Ok(self)
    }

    /// Record a step under the current phase.
    pub fn step(mut self, step: AnimationStep) -> Self {
        self.cues.push(Cue {
            phase: self.phase,
            step,
        });
        self
    }

    /// Draw shapes in with the default easing.
    pub fn create<I, S>(self, targets: I, duration_s: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(AnimationStep::Create {
            targets: collect_ids(targets),
            duration_s,
            ease: Ease::default(),
        })
    }

    /// Reveal text shapes with the default easing.
    pub fn write<I, S>(self, targets: I, duration_s: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(AnimationStep::Write {
            targets: collect_ids(targets),
            duration_s,
            ease: Ease::default(),
        })
    }

    /// Morph a group of shapes into one target shape.
    pub fn transform<I, S>(self, from: I, into: impl Into<String>, duration_s: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(AnimationStep::Transform {
            from: collect_ids(from),
            into: into.into(),
            duration_s,
            ease: Ease::default(),
        })
    }

    /// Move a shape along another shape's path.
    pub fn move_along(
        self,
        target: impl Into<String>,
        path: impl Into<String>,
        duration_s: f64,
        ease: Ease,
    ) -> Self {
        self.step(AnimationStep::MoveAlongPath {
            target: target.into(),
            path: path.into(),
            duration_s,
            ease,
        })
    }

    /// Fade shapes out; a zero duration removes them instantly.
    pub fn fade_out<I, S>(self, targets: I, duration_s: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(AnimationStep::FadeOut {
            targets: collect_ids(targets),
            duration_s,
        })
    }

    /// Hold the scene still.
    pub fn wait(self, duration_s: f64) -> Self {
        self.step(AnimationStep::Wait { duration_s })
    }

    /// Assemble and validate the storyboard.
    pub fn build(self) -> ChalkResult<Storyboard> {
        let board = Storyboard {
            name: self.name,
            shapes: self.shapes,
            cues: self.cues,
        };
        board.validate()?;
        Ok(board)
    }
}

fn collect_ids<I, S>(ids: I) -> Vec<ShapeId>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(Into::into).collect()
}
