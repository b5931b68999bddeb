//! Optional inspection port
//!
//! Subsystems receive an `Option<Rc<dyn Diagnostics>>` at construction and
//! report notable events through it. Every hook has a no-op default, so an
//! inspector only overrides what it cares about.

use std::cell::{Cell, RefCell};

use crate::ecs::EntityId;
use crate::graphics_device::{LayoutId, PipelineId};
use crate::resource::MeshKey;

/// Per-frame counters produced by `RenderSystem::render`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Pipelines bound during the frame
    pub pipelines_bound: u32,
    /// Draw calls issued (instanced and simple)
    pub draw_calls: u32,
    /// Instances covered by all draw calls
    pub instances_drawn: u32,
    /// Entities rejected by frustum culling
    pub culled: u32,
    /// Mesh draws skipped because a resource was missing
    pub skipped_draws: u32,
}

/// Event sink for engine diagnostics
pub trait Diagnostics {
    /// An entity failed the frustum test this frame
    fn entity_culled(&self, _entity: EntityId) {}

    /// A new bind-group layout was created by the backend
    fn layout_created(&self, _key: &str, _layout: LayoutId) {}

    /// A new pipeline was created by the backend
    fn pipeline_created(&self, _key: &str, _pipeline: PipelineId) {}

    /// A mesh draw was skipped for this frame
    fn draw_skipped(&self, _mesh: MeshKey, _reason: &str) {}

    /// A frame finished rendering
    fn frame_completed(&self, _stats: &FrameStats) {}
}

/// Diagnostics sink that counts every event
#[derive(Debug, Default)]
pub struct DiagnosticsRecorder {
    culled: Cell<u32>,
    layouts_created: Cell<u32>,
    pipelines_created: Cell<u32>,
    skipped: RefCell<Vec<(MeshKey, String)>>,
    last_frame: Cell<Option<FrameStats>>,
    frames: Cell<u32>,
}

impl DiagnosticsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn culled_count(&self) -> u32 {
        self.culled.get()
    }

    pub fn layouts_created(&self) -> u32 {
        self.layouts_created.get()
    }

    pub fn pipelines_created(&self) -> u32 {
        self.pipelines_created.get()
    }

    /// Skipped draws with their reasons, in report order
    pub fn skipped_draws(&self) -> Vec<(MeshKey, String)> {
        self.skipped.borrow().clone()
    }

    pub fn last_frame(&self) -> Option<FrameStats> {
        self.last_frame.get()
    }

    pub fn frames_completed(&self) -> u32 {
        self.frames.get()
    }
}

impl Diagnostics for DiagnosticsRecorder {
    fn entity_culled(&self, _entity: EntityId) {
        self.culled.set(self.culled.get() + 1);
    }

    fn layout_created(&self, _key: &str, _layout: LayoutId) {
        self.layouts_created.set(self.layouts_created.get() + 1);
    }

    fn pipeline_created(&self, _key: &str, _pipeline: PipelineId) {
        self.pipelines_created.set(self.pipelines_created.get() + 1);
    }

    fn draw_skipped(&self, mesh: MeshKey, reason: &str) {
        self.skipped.borrow_mut().push((mesh, reason.to_string()));
    }

    fn frame_completed(&self, stats: &FrameStats) {
        self.last_frame.set(Some(*stats));
        self.frames.set(self.frames.get() + 1);
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
