/// RenderPass trait - per-frame command recording

use crate::error::Result;
use super::binding_group::BindGroupId;
use super::buffer::BufferId;
use super::pipeline::PipelineId;

/// Index element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    Uint16,
    Uint32,
}

impl IndexFormat {
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexFormat::Uint16 => 2,
            IndexFormat::Uint32 => 4,
        }
    }
}

/// A render pass opened by `GraphicsDevice::begin_render_pass`
///
/// Commands are recorded in call order and executed on `submit`.
/// The pass does not borrow the device, so buffer writes may still be
/// issued through the device while the pass is open.
pub trait RenderPass {
    /// Bind a pipeline for the following draws
    fn use_pipeline(&mut self, pipeline: PipelineId) -> Result<()>;

    /// Bind a vertex buffer to a slot
    fn set_vertex_buffer(&mut self, slot: u32, buffer: BufferId) -> Result<()>;

    /// Bind an index buffer
    fn set_index_buffer(&mut self, buffer: BufferId, format: IndexFormat) -> Result<()>;

    /// Bind a bind group at a group index
    fn set_bind_group(&mut self, index: u32, bind_group: BindGroupId) -> Result<()>;

    /// Instanced draw. `index_count` is used when an index buffer is bound,
    /// `vertex_count` otherwise.
    fn draw_instanced(&mut self, vertex_count: u32, index_count: u32, instance_count: u32) -> Result<()>;

    /// Single, non-instanced draw
    fn draw_simple(&mut self, vertex_count: u32) -> Result<()>;

    /// Close the pass and submit the recorded commands
    fn submit(self: Box<Self>) -> Result<()>;
}
