/// Geometry - vertex/index buffers plus bounding volume

use crate::camera::BoundingSphere;
use crate::graphics_device::{BufferId, IndexFormat, VertexLayout};

/// Geometry creation descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryDesc {
    pub name: String,
    /// Name of a vertex layout registered in the shader library
    pub vertex_layout: String,
    /// Interleaved vertex bytes
    pub vertices: Vec<u8>,
    pub vertex_count: u32,
    pub indices: Option<Vec<u32>>,
    /// Object-space bounds; `None` disables culling for this geometry
    pub bounding_sphere: Option<BoundingSphere>,
}

impl GeometryDesc {
    pub fn new(
        name: impl Into<String>,
        vertex_layout: impl Into<String>,
        vertices: Vec<u8>,
        vertex_count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_layout: vertex_layout.into(),
            vertices,
            vertex_count,
            indices: None,
            bounding_sphere: None,
        }
    }

    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn with_bounds(mut self, sphere: BoundingSphere) -> Self {
        self.bounding_sphere = Some(sphere);
        self
    }
}

/// GPU-resident geometry
#[derive(Debug, Clone)]
pub struct Geometry {
    pub(crate) name: String,
    pub(crate) vertex_buffer: BufferId,
    pub(crate) index_buffer: Option<BufferId>,
    pub(crate) vertex_layout: VertexLayout,
    pub(crate) vertex_count: u32,
    pub(crate) index_count: u32,
    pub(crate) bounding_sphere: Option<BoundingSphere>,
}

impl Geometry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffer(&self) -> BufferId {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> Option<BufferId> {
        self.index_buffer
    }

    /// Indices are always stored as u32
    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::Uint32
    }

    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }

    /// Resolved vertex layout (after fallback)
    pub fn vertex_layout(&self) -> &VertexLayout {
        &self.vertex_layout
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn bounding_sphere(&self) -> Option<&BoundingSphere> {
        self.bounding_sphere.as_ref()
    }
}
