/// GraphicsDevice trait - the backend contract consumed by the engine core
///
/// Implemented once per low-level API. The core never branches on which
/// backend is active except through `BackendKind` (shader source text and
/// a few format strings).

use crate::error::Result;
use super::binding_group::{BindGroupEntry, BindGroupId, BindGroupLayoutDesc, LayoutId};
use super::buffer::{BufferDesc, BufferId};
use super::pipeline::{PipelineDesc, PipelineId};
use super::render_pass::RenderPass;
use super::texture::{SamplerDesc, SamplerId, TextureDesc, TextureId, TextureRegion};

// ============================================================================
// Backend kind
// ============================================================================

/// Which low-level API a device drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Immediate-mode rasterization API (GLSL shaders, -1..1 clip depth)
    OpenGl,
    /// Explicit modern API (WGSL shaders, 0..1 clip depth)
    WebGpu,
}

impl BackendKind {
    /// Preferred swapchain color format string
    pub fn color_format(&self) -> &'static str {
        match self {
            BackendKind::OpenGl => "RGBA8",
            BackendKind::WebGpu => "bgra8unorm",
        }
    }

    /// Depth attachment format string
    pub fn depth_format(&self) -> &'static str {
        match self {
            BackendKind::OpenGl => "DEPTH_COMPONENT24",
            BackendKind::WebGpu => "depth24plus",
        }
    }

    /// Whether clip-space depth spans -1..1 (otherwise 0..1)
    pub fn uses_negative_one_to_one_depth(&self) -> bool {
        matches!(self, BackendKind::OpenGl)
    }
}

/// Capabilities the engine checks before accepting a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// Storage buffers readable from the vertex stage (needed for instance data)
    pub storage_buffers: bool,
    /// Maximum number of bind groups per pipeline
    pub max_bind_groups: u32,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            storage_buffers: true,
            max_bind_groups: 4,
        }
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Backend factory for GPU resources and render passes
///
/// Single-threaded: the engine calls it only from the frame thread.
pub trait GraphicsDevice {
    /// Which API this device drives
    fn backend_kind(&self) -> BackendKind;

    /// Capabilities of the underlying context
    fn capabilities(&self) -> DeviceCapabilities;

    /// Create an uninitialized buffer
    fn create_buffer(&mut self, desc: &BufferDesc) -> Result<BufferId>;

    /// Create a buffer and upload its initial contents
    fn create_buffer_with_data(&mut self, desc: &BufferDesc, data: &[u8]) -> Result<BufferId>;

    /// Write bytes into a buffer at a byte offset
    fn write_buffer(&mut self, buffer: BufferId, offset: u64, data: &[u8]) -> Result<()>;

    /// Release a buffer; the id is invalid afterwards
    fn destroy_buffer(&mut self, buffer: BufferId) -> Result<()>;

    /// Create a texture
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureId>;

    /// Overwrite a region of a texture
    fn update_texture(&mut self, texture: TextureId, region: &TextureRegion) -> Result<()>;

    /// Create a sampler
    fn create_sampler(&mut self, desc: &SamplerDesc) -> Result<SamplerId>;

    /// Create a bind-group layout
    fn create_shader_layout(&mut self, desc: &BindGroupLayoutDesc) -> Result<LayoutId>;

    /// Create a bind group against a layout
    fn create_bind_group(&mut self, layout: LayoutId, entries: &[BindGroupEntry]) -> Result<BindGroupId>;

    /// Release a bind group
    fn destroy_bind_group(&mut self, bind_group: BindGroupId) -> Result<()>;

    /// Build a pipeline object
    fn init_pipeline(&mut self, desc: &PipelineDesc) -> Result<PipelineId>;

    /// Open the frame's render pass
    fn begin_render_pass(&mut self) -> Result<Box<dyn RenderPass>>;
}
