use std::collections::{BTreeMap, BTreeSet};

use crate::{
    foundation::error::{ChalkError, ChalkResult},
    storyboard::ease::Ease,
    storyboard::shapes::{DeriveRule, Shape},
};

/// Stable key of a declared shape within a storyboard.
pub type ShapeId = String;

/// A declared storyboard entry: a static shape or a derived (reactive) one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ShapeDecl {
    /// Fixed at declaration time.
    Static(Shape),
    /// Recomputed from other shapes' current state every frame.
    Derived(DeriveRule),
}

/// Presentation phases of a choreography, in strict order.
///
/// Every cue is tagged with its phase; phases never regress and there is no
/// branching or retry between them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Phase {
    /// Background and framing.
    Setup,
    /// Bring in the named geometric actors.
    IntroduceElements,
    /// Construct the relation between them.
    BuildRelation,
    /// Generalize the relation or transform the construction.
    GeneralizeTransform,
    /// State the result.
    Conclude,
    /// Fade everything out.
    Cleanup,
}

/// One renderer-facing instruction with a declared duration in seconds.
///
/// Shapes listed together in one step are played concurrently; the step
/// completes when the longest animation finishes. The sequencer never starts
/// a step before the renderer has signalled the previous one complete.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AnimationStep {
    /// Draw shapes in.
    Create {
        /// Shapes drawn together.
        targets: Vec<ShapeId>,
        /// Declared duration in seconds.
        duration_s: f64,
        /// Declared easing curve.
        ease: Ease,
    },
    /// Reveal text shapes stroke by stroke.
    Write {
        /// Text shapes revealed together.
        targets: Vec<ShapeId>,
        /// Declared duration in seconds.
        duration_s: f64,
        /// Declared easing curve.
        ease: Ease,
    },
    /// Morph a group of shapes into one target shape.
    Transform {
        /// Source shapes, consumed by the morph.
        from: Vec<ShapeId>,
        /// Shape the group morphs into.
        into: ShapeId,
        /// Declared duration in seconds.
        duration_s: f64,
        /// Declared easing curve.
        ease: Ease,
    },
    /// Move a shape along another shape's path.
    MoveAlongPath {
        /// Moving shape.
        target: ShapeId,
        /// Shape whose outline is the path.
        path: ShapeId,
        /// Declared duration in seconds.
        duration_s: f64,
        /// Declared easing curve.
        ease: Ease,
    },
    /// Fade shapes out; a zero duration removes them instantly.
    FadeOut {
        /// Shapes faded together.
        targets: Vec<ShapeId>,
        /// Declared duration in seconds; `0` maps to instant removal.
        duration_s: f64,
    },
    /// Hold the scene still.
    Wait {
        /// Declared duration in seconds.
        duration_s: f64,
    },
}

impl AnimationStep {
    /// Declared duration of the step in seconds.
    pub fn duration_s(&self) -> f64 {
        match self {
            Self::Create { duration_s, .. }
            | Self::Write { duration_s, .. }
            | Self::Transform { duration_s, .. }
            | Self::MoveAlongPath { duration_s, .. }
            | Self::FadeOut { duration_s, .. }
            | Self::Wait { duration_s } => *duration_s,
        }
    }

    /// Every shape key the step references.
    pub fn shape_ids(&self) -> Vec<&ShapeId> {
        match self {
            Self::Create { targets, .. }
            | Self::Write { targets, .. }
            | Self::FadeOut { targets, .. } => targets.iter().collect(),
            Self::Transform { from, into, .. } => {
                let mut ids: Vec<&ShapeId> = from.iter().collect();
                ids.push(into);
                ids
            }
            Self::MoveAlongPath { target, path, .. } => vec![target, path],
            Self::Wait { .. } => Vec::new(),
        }
    }
}

/// One step tagged with its presentation phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cue {
    /// Phase this step belongs to.
    pub phase: Phase,
    /// The instruction itself.
    pub step: AnimationStep,
}

/// A complete choreography: shape table plus ordered cues.
///
/// A storyboard is a pure data model that can be built programmatically
/// (see [`crate::StoryboardBuilder`]) or serialized via Serde (JSON).
/// Executing one is performed by [`crate::perform`] against a
/// [`crate::Renderer`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Storyboard {
    /// Name for logging and debugging.
    pub name: String,
    /// Shape table keyed by stable user-facing keys.
    pub shapes: BTreeMap<ShapeId, ShapeDecl>,
    /// Ordered cues; phases never regress.
    pub cues: Vec<Cue>,
}

impl Storyboard {
    /// Validate storyboard invariants eagerly, before any rendering.
    pub fn validate(&self) -> ChalkResult<()> {
        if self.name.trim().is_empty() {
            return Err(ChalkError::storyboard("storyboard name must be non-empty"));
        }

        for (key, decl) in &self.shapes {
            if key.trim().is_empty() {
                return Err(ChalkError::storyboard("shape key must be non-empty"));
            }
            match decl {
                ShapeDecl::Static(shape) => {
                    shape
                        .validate()
                        .map_err(|e| ChalkError::storyboard(format!("shape '{key}': {e}")))?;
                    if let Some(anchor) = shape.placement_anchor()
                        && !self.shapes.contains_key(anchor)
                    {
                        return Err(ChalkError::storyboard(format!(
                            "shape '{key}' is placed next to missing shape '{anchor}'"
                        )));
                    }
                }
                ShapeDecl::Derived(rule) => {
                    rule.validate()
                        .map_err(|e| ChalkError::storyboard(format!("shape '{key}': {e}")))?;
                    for dep in rule.deps() {
                        if !self.shapes.contains_key(dep) {
                            return Err(ChalkError::storyboard(format!(
                                "derived shape '{key}' references missing shape '{dep}'"
                            )));
                        }
                    }
                }
            }
        }

        self.check_derive_cycles()?;

        if self.cues.is_empty() {
            return Err(ChalkError::storyboard(
                "storyboard must contain at least one cue",
            ));
        }

        let mut last_phase: Option<Phase> = None;
        for (idx, cue) in self.cues.iter().enumerate() {
            if let Some(prev) = last_phase
                && cue.phase < prev
            {
                return Err(ChalkError::storyboard(format!(
                    "cue {idx} moves from phase {prev:?} back to {:?}",
                    cue.phase
                )));
            }
            last_phase = Some(cue.phase);
            self.validate_step(idx, &cue.step)?;
        }

        let mut used: BTreeSet<&str> = BTreeSet::new();
        for cue in &self.cues {
            used.extend(cue.step.shape_ids().iter().map(|id| id.as_str()));
        }
        for decl in self.shapes.values() {
            match decl {
                ShapeDecl::Derived(rule) => {
                    used.extend(rule.deps().iter().map(|id| id.as_str()));
                }
                ShapeDecl::Static(shape) => {
                    if let Some(anchor) = shape.placement_anchor() {
                        used.insert(anchor.as_str());
                    }
                }
            }
        }
        for key in self.shapes.keys() {
            if !used.contains(key.as_str()) {
                return Err(ChalkError::storyboard(format!(
                    "shape '{key}' is declared but never used"
                )));
            }
        }

        Ok(())
    }

    fn validate_step(&self, idx: usize, step: &AnimationStep) -> ChalkResult<()> {
        let duration = step.duration_s();
        if !duration.is_finite() || duration < 0.0 {
            return Err(ChalkError::storyboard(format!(
                "cue {idx} duration must be finite and >= 0"
            )));
        }

        let targets_required = match step {
            AnimationStep::Create { targets, .. }
            | AnimationStep::Write { targets, .. }
            | AnimationStep::FadeOut { targets, .. } => Some(targets.len()),
            AnimationStep::Transform { from, .. } => Some(from.len()),
            AnimationStep::MoveAlongPath { .. } | AnimationStep::Wait { .. } => None,
        };
        if targets_required == Some(0) {
            return Err(ChalkError::storyboard(format!(
                "cue {idx} must name at least one target"
            )));
        }

        for id in step.shape_ids() {
            if !self.shapes.contains_key(id) {
                return Err(ChalkError::storyboard(format!(
                    "cue {idx} references missing shape '{id}'"
                )));
            }
        }
        Ok(())
    }

    fn check_derive_cycles(&self) -> ChalkResult<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit<'a>(
            key: &'a str,
            shapes: &'a BTreeMap<ShapeId, ShapeDecl>,
            marks: &mut BTreeMap<&'a str, Mark>,
        ) -> ChalkResult<()> {
            let Some(ShapeDecl::Derived(rule)) = shapes.get(key) else {
                return Ok(());
            };
            match marks.get(key) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => {
                    return Err(ChalkError::storyboard(format!(
                        "derived shape '{key}' is part of a dependency cycle"
                    )));
                }
                None => {}
            }
            marks.insert(key, Mark::Visiting);
            for dep in rule.deps() {
                visit(dep, shapes, marks)?;
            }
            marks.insert(key, Mark::Done);
            Ok(())
        }

        let mut marks = BTreeMap::new();
        for key in self.shapes.keys() {
            visit(key, &self.shapes, &mut marks)?;
        }
        Ok(())
    }

    /// Sum of all declared step durations in seconds.
    pub fn total_declared_secs(&self) -> f64 {
        self.cues.iter().map(|c| c.step.duration_s()).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/model.rs"]
mod tests;
