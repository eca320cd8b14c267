use std::collections::BTreeMap;

use crate::{
    foundation::error::{ChalkError, ChalkResult},
    render::backend::{Playback, PlaybackKind, Renderer, ShapeHandle},
    storyboard::ease::Ease,
    storyboard::model::{AnimationStep, ShapeDecl, ShapeId, Storyboard},
    storyboard::shapes::DeriveRule,
};

/// Summary of a completed performance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    /// Number of cues played.
    pub cues_played: usize,
    /// Sum of declared step durations in seconds.
    pub declared_secs: f64,
}

/// Perform a storyboard against a renderer, strictly sequentially.
///
/// Validates first, registers static shapes, then derived shapes in
/// dependency order, then issues one renderer call per cue. Each call blocks
/// until the renderer signals completion; the first error aborts the whole
/// run.
#[tracing::instrument(skip(board, renderer), fields(board = %board.name))]
pub fn perform<R: Renderer + ?Sized>(
    board: &Storyboard,
    renderer: &mut R,
) -> ChalkResult<RunReport> {
    board.validate()?;

    let mut handles: BTreeMap<&str, ShapeHandle> = BTreeMap::new();
    let mut pending: Vec<(&str, &DeriveRule)> = Vec::new();
    for (key, decl) in &board.shapes {
        match decl {
            ShapeDecl::Static(shape) => {
                handles.insert(key, renderer.create(shape)?);
            }
            ShapeDecl::Derived(rule) => pending.push((key, rule)),
        }
    }

    // Derived shapes may depend on other derived shapes; register each as
    // soon as all of its dependencies have handles.
    while !pending.is_empty() {
        let mut next = Vec::new();
        let mut progressed = false;
        for (key, rule) in pending {
            let deps = rule.deps();
            if deps.iter().all(|d| handles.contains_key(d.as_str())) {
                let dep_handles: Vec<ShapeHandle> =
                    deps.iter().map(|d| handles[d.as_str()]).collect();
                handles.insert(key, renderer.derive(rule, &dep_handles)?);
                progressed = true;
            } else {
                next.push((key, rule));
            }
        }
        if !progressed {
            return Err(ChalkError::storyboard(
                "derived shapes form a dependency cycle",
            ));
        }
        pending = next;
    }

    for (idx, cue) in board.cues.iter().enumerate() {
        tracing::debug!(cue = idx, phase = ?cue.phase, "playing step");
        match &cue.step {
            AnimationStep::Create {
                targets,
                duration_s,
                ease,
            } => {
                let batch =
                    playback_batch(targets, &handles, PlaybackKind::Create, *duration_s, *ease);
                renderer.animate(&batch)?;
            }
            AnimationStep::Write {
                targets,
                duration_s,
                ease,
            } => {
                let batch =
                    playback_batch(targets, &handles, PlaybackKind::Write, *duration_s, *ease);
                renderer.animate(&batch)?;
            }
            AnimationStep::Transform {
                from,
                into,
                duration_s,
                ease,
            } => {
                let into = handles[into.as_str()];
                let batch: Vec<Playback> = from
                    .iter()
                    .map(|id| Playback {
                        handle: handles[id.as_str()],
                        kind: PlaybackKind::TransformInto(into),
                        duration_s: *duration_s,
                        ease: *ease,
                    })
                    .collect();
                renderer.animate(&batch)?;
            }
            AnimationStep::MoveAlongPath {
                target,
                path,
                duration_s,
                ease,
            } => {
                let batch = [Playback {
                    handle: handles[target.as_str()],
                    kind: PlaybackKind::MoveAlong(handles[path.as_str()]),
                    duration_s: *duration_s,
                    ease: *ease,
                }];
                renderer.animate(&batch)?;
            }
            AnimationStep::FadeOut {
                targets,
                duration_s,
            } => {
                if *duration_s == 0.0 {
                    for id in targets {
                        renderer.remove(handles[id.as_str()])?;
                    }
                } else {
                    let batch = playback_batch(
                        targets,
                        &handles,
                        PlaybackKind::FadeOut,
                        *duration_s,
                        Ease::default(),
                    );
                    renderer.animate(&batch)?;
                }
            }
            AnimationStep::Wait { duration_s } => renderer.wait(*duration_s)?,
        }
    }

    Ok(RunReport {
        cues_played: board.cues.len(),
        declared_secs: board.total_declared_secs(),
    })
}

fn playback_batch(
    targets: &[ShapeId],
    handles: &BTreeMap<&str, ShapeHandle>,
    kind: PlaybackKind,
    duration_s: f64,
    ease: Ease,
) -> Vec<Playback> {
    targets
        .iter()
        .map(|id| Playback {
            handle: handles[id.as_str()],
            kind,
            duration_s,
            ease,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
