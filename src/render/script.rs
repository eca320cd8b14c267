use std::collections::BTreeMap;

use crate::{
    foundation::error::{ChalkError, ChalkResult},
    render::backend::{Playback, Renderer, ShapeHandle},
    storyboard::shapes::{DeriveRule, Shape},
};

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ScriptEvent {
    /// A static shape was registered.
    Created {
        /// Handle assigned to the shape.
        handle: ShapeHandle,
    },
    /// A reactive shape was registered.
    Derived {
        /// Handle assigned to the shape.
        handle: ShapeHandle,
        /// Dependency handles, in rule order.
        deps: Vec<ShapeHandle>,
    },
    /// A batch of animations was played to completion.
    Played {
        /// The batch, as issued.
        batch: Vec<Playback>,
    },
    /// The scene was held still.
    Waited {
        /// Declared duration in seconds.
        duration_s: f64,
    },
    /// A shape was removed instantly.
    Removed {
        /// Handle of the removed shape.
        handle: ShapeHandle,
    },
}

/// Recording renderer used by tests and dry runs.
///
/// Registers shapes, snapshots derived rules once at registration time, and
/// records every call as a [`ScriptEvent`]. [`ScriptRenderer::failing_at`]
/// injects a renderer failure at a chosen call index to exercise
/// abort-on-first-error behavior.
#[derive(Debug, Default)]
pub struct ScriptRenderer {
    next_handle: u64,
    calls: u64,
    fail_at: Option<u64>,
    shapes: BTreeMap<ShapeHandle, Shape>,
    /// Transcript of every call, in order.
    pub events: Vec<ScriptEvent>,
    /// Sum of played step durations plus waits, in seconds.
    pub elapsed_s: f64,
}

impl ScriptRenderer {
    /// A renderer that fails on the zero-based `call` (counting every trait
    /// method invocation).
    pub fn failing_at(call: u64) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    /// Snapshot of a registered shape, if the handle is known.
    pub fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(&handle)
    }

    fn tick(&mut self) -> ChalkResult<()> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_at == Some(call) {
            return Err(ChalkError::renderer(format!(
                "injected failure at call {call}"
            )));
        }
        Ok(())
    }

    fn fresh_handle(&mut self) -> ShapeHandle {
        let handle = ShapeHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl Renderer for ScriptRenderer {
    fn create(&mut self, shape: &Shape) -> ChalkResult<ShapeHandle> {
        self.tick()?;
        let handle = self.fresh_handle();
        self.shapes.insert(handle, shape.clone());
        self.events.push(ScriptEvent::Created { handle });
        Ok(handle)
    }

    fn derive(&mut self, rule: &DeriveRule, deps: &[ShapeHandle]) -> ChalkResult<ShapeHandle> {
        self.tick()?;
        let dep_keys = rule.deps();
        if dep_keys.len() != deps.len() {
            return Err(ChalkError::renderer(format!(
                "derive got {} handles for {} dependencies",
                deps.len(),
                dep_keys.len()
            )));
        }
        // Resolve once against the registration-time snapshots; a real
        // renderer re-resolves every frame.
        let by_key: BTreeMap<&str, &Shape> = dep_keys
            .iter()
            .zip(deps)
            .map(|(key, handle)| {
                self.shapes
                    .get(handle)
                    .map(|shape| (key.as_str(), shape))
                    .ok_or_else(|| {
                        ChalkError::renderer(format!("derive references unknown handle {handle:?}"))
                    })
            })
            .collect::<ChalkResult<_>>()?;
        let resolved = rule.resolve(|key| by_key.get(key).copied())?;

        let handle = self.fresh_handle();
        self.shapes.insert(handle, resolved);
        self.events.push(ScriptEvent::Derived {
            handle,
            deps: deps.to_vec(),
        });
        Ok(handle)
    }

    fn animate(&mut self, batch: &[Playback]) -> ChalkResult<()> {
        self.tick()?;
        for playback in batch {
            if !self.shapes.contains_key(&playback.handle) {
                return Err(ChalkError::renderer(format!(
                    "animate references unknown handle {:?}",
                    playback.handle
                )));
            }
        }
        // The step completes when its longest animation finishes.
        self.elapsed_s += batch
            .iter()
            .map(|p| p.duration_s)
            .fold(0.0_f64, f64::max);
        self.events.push(ScriptEvent::Played {
            batch: batch.to_vec(),
        });
        Ok(())
    }

    fn wait(&mut self, duration_s: f64) -> ChalkResult<()> {
        self.tick()?;
        self.elapsed_s += duration_s;
        self.events.push(ScriptEvent::Waited { duration_s });
        Ok(())
    }

    fn remove(&mut self, handle: ShapeHandle) -> ChalkResult<()> {
        self.tick()?;
        if self.shapes.remove(&handle).is_none() {
            return Err(ChalkError::renderer(format!(
                "remove references unknown handle {handle:?}"
            )));
        }
        self.events.push(ScriptEvent::Removed { handle });
        Ok(())
    }
}
