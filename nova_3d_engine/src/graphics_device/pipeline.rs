/// Pipeline descriptor, vertex layouts, and fixed-function state enums

use bitflags::bitflags;
use super::binding_group::LayoutId;

/// Backend handle of a compiled pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipelineId(pub u32);

// ===== VERTEX INPUT =====

/// Vertex attribute format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
    Uint32,
}

impl VertexFormat {
    /// Size in bytes of one attribute value
    pub fn size_bytes(&self) -> u32 {
        match self {
            VertexFormat::Float32 | VertexFormat::Uint32 => 4,
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// One attribute inside a vertex buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Attribute name as declared by the shader (position, normal, uv, ...)
    pub name: String,
    /// Shader location
    pub location: u32,
    pub format: VertexFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// One vertex buffer slot and its attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    /// Stride in bytes between consecutive vertices
    pub stride: u32,
    pub attributes: Vec<VertexAttribute>,
}

/// Named vertex input layout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    pub name: String,
    pub buffers: Vec<VertexBufferLayout>,
}

impl VertexLayout {
    /// Attribute count of each buffer, in slot order
    pub fn entry_counts(&self) -> Vec<usize> {
        self.buffers.iter().map(|b| b.attributes.len()).collect()
    }

    /// Stride of the first buffer (0 for an empty layout)
    pub fn primary_stride(&self) -> u32 {
        self.buffers.first().map(|b| b.stride).unwrap_or(0)
    }
}

// ===== FIXED-FUNCTION STATE =====

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
    LineList,
    PointList,
}

/// Comparison operator for depth testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Compositing function applied to a fragment's color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlendMode {
    /// Overwrites the framebuffer
    Opaque,
    /// src * alpha + dst * (1 - alpha)
    Alpha,
    /// src + dst
    Additive,
}

bitflags! {
    /// Color channels written by the pipeline
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWriteMask: u8 {
        const RED   = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE  = 1 << 2;
        const ALPHA = 1 << 3;
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
    }
}

/// Fully resolved color attachment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorAttachmentState {
    pub blend: BlendMode,
    pub write_mask: ColorWriteMask,
}

/// Fully resolved depth attachment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthAttachmentState {
    pub depth_compare: CompareOp,
    pub depth_write_enabled: bool,
}

/// Fully resolved fixed-function state handed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineState {
    pub cull_mode: CullMode,
    pub topology: PrimitiveTopology,
    pub wireframe: bool,
    pub color_attachment: ColorAttachmentState,
    pub depth_attachment: DepthAttachmentState,
}

// ===== PIPELINE DESCRIPTOR =====

/// Everything a backend needs to build one pipeline object
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDesc {
    pub label: String,
    /// Backend-specific vertex shader source text
    pub vertex_source: String,
    /// Backend-specific fragment shader source text
    pub fragment_source: String,
    pub vertex_layout: VertexLayout,
    /// Bind-group layouts in group-index order
    pub bind_group_layouts: Vec<LayoutId>,
    pub state: PipelineState,
    /// Backend format strings for the color and depth targets
    pub color_format: &'static str,
    pub depth_format: &'static str,
}
