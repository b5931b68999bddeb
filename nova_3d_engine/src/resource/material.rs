/// Material - shader pair, pipeline options, and texture bindings

use crate::graphics_device::{BindGroupId, BlendMode, LayoutId, SamplerId, TextureId};
use super::pipeline_options::PipelineOptions;

/// Material creation descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDesc {
    pub name: String,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub options: PipelineOptions,
    /// Texture/sampler pairs bound at (2i, 2i + 1) of the material group
    pub textures: Vec<(TextureId, SamplerId)>,
    /// Skybox materials draw once, without an instance buffer
    pub skybox: bool,
}

impl MaterialDesc {
    pub fn new(
        name: impl Into<String>,
        vertex_shader: impl Into<String>,
        fragment_shader: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex_shader: vertex_shader.into(),
            fragment_shader: fragment_shader.into(),
            options: PipelineOptions::default(),
            textures: Vec::new(),
            skybox: false,
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_texture(mut self, texture: TextureId, sampler: SamplerId) -> Self {
        self.textures.push((texture, sampler));
        self
    }

    pub fn as_skybox(mut self) -> Self {
        self.skybox = true;
        self
    }
}

/// Material with its bind group resolved
#[derive(Debug, Clone)]
pub struct Material {
    pub(crate) name: String,
    pub(crate) vertex_shader: String,
    pub(crate) fragment_shader: String,
    pub(crate) options: PipelineOptions,
    pub(crate) textures: Vec<(TextureId, SamplerId)>,
    pub(crate) skybox: bool,
    pub(crate) layout: LayoutId,
    pub(crate) bind_group: Option<BindGroupId>,
    /// Size tag of each texture, in binding order
    pub(crate) texture_sizes: Vec<String>,
}

impl Material {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_shader(&self) -> &str {
        &self.vertex_shader
    }

    pub fn fragment_shader(&self) -> &str {
        &self.fragment_shader
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.options.blend_mode()
    }

    pub fn textures(&self) -> &[(TextureId, SamplerId)] {
        &self.textures
    }

    pub fn is_skybox(&self) -> bool {
        self.skybox
    }

    /// Layout of the material bind group (group 1)
    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    pub fn bind_group(&self) -> Option<BindGroupId> {
        self.bind_group
    }

    pub fn texture_sizes(&self) -> &[String] {
        &self.texture_sizes
    }
}
