/// Pipeline manager - builds and caches backend pipelines
///
/// A pipeline is keyed by the semantic content of its inputs: shader names,
/// vertex layout entry counts, resolved pipeline options, and the sizes of
/// the material's textures. A key seen before returns the cached id without
/// touching the backend.
///
/// Bind-group layout order is fixed for every pipeline:
/// - group 0: global frame uniforms, texture array, sampler
/// - group 1: the material's textures (possibly empty)
/// - group 2: instance storage buffer (not for skybox pipelines)

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::graphics_device::{
    BindGroupLayoutDesc, BindGroupLayoutEntry, BindingType, LayoutId, PipelineDesc,
    PipelineId, PipelineState, ShaderStageFlags,
};
use crate::resource::{state_key, Geometry, Material, ResourceCache};
use crate::{engine_debug, engine_trace};
use super::shader_library::{ShaderLibrary, ShaderStage};

pub struct PipelineManager {
    /// key -> pipeline
    pipelines: FxHashMap<String, PipelineId>,
    shaders: ShaderLibrary,
    global_layout: LayoutId,
    instance_layout: LayoutId,
    /// Forces wireframe on every resolved option set
    wireframe: bool,
    label_prefix: String,
    diagnostics: Option<Rc<dyn Diagnostics>>,
}

impl PipelineManager {
    /// Create the manager and the two layouts shared by every pipeline
    pub fn new(
        cache: &mut ResourceCache,
        config: &Config,
        diagnostics: Option<Rc<dyn Diagnostics>>,
    ) -> Result<Self> {
        let global_layout = cache.get_or_create_layout(&Self::global_layout_desc())?;
        let instance_layout = cache.get_or_create_layout(&Self::instance_layout_desc())?;

        Ok(Self {
            pipelines: FxHashMap::default(),
            shaders: ShaderLibrary::new(cache.backend_kind(), config),
            global_layout,
            instance_layout,
            wireframe: false,
            label_prefix: config.app_name.clone(),
            diagnostics,
        })
    }

    /// Group 0: frame uniforms (0), texture array (1), sampler (2)
    pub fn global_layout_desc() -> BindGroupLayoutDesc {
        BindGroupLayoutDesc {
            label: "global".to_string(),
            entries: vec![
                BindGroupLayoutEntry {
                    binding: 0,
                    binding_type: BindingType::UniformBuffer,
                    visibility: ShaderStageFlags::VERTEX_FRAGMENT,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    binding_type: BindingType::TextureArray,
                    visibility: ShaderStageFlags::FRAGMENT,
                },
                BindGroupLayoutEntry {
                    binding: 2,
                    binding_type: BindingType::Sampler,
                    visibility: ShaderStageFlags::FRAGMENT,
                },
            ],
        }
    }

    /// Group 2: per-mesh instance matrices
    pub fn instance_layout_desc() -> BindGroupLayoutDesc {
        BindGroupLayoutDesc {
            label: "instances".to_string(),
            entries: vec![BindGroupLayoutEntry {
                binding: 0,
                binding_type: BindingType::StorageBuffer,
                visibility: ShaderStageFlags::VERTEX,
            }],
        }
    }

    // ===== ACCESSORS =====

    pub fn global_layout(&self) -> LayoutId {
        self.global_layout
    }

    pub fn instance_layout(&self) -> LayoutId {
        self.instance_layout
    }

    pub fn shader_library(&self) -> &ShaderLibrary {
        &self.shaders
    }

    pub fn shader_library_mut(&mut self) -> &mut ShaderLibrary {
        &mut self.shaders
    }

    /// Number of distinct pipelines built so far
    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Force (or stop forcing) wireframe rasterization.
    ///
    /// Existing meshes keep their pipeline until
    /// `ResourceManager::refresh_pipelines` re-resolves them.
    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    // ===== PIPELINES =====

    /// Material options resolved against the defaults and the wireframe override
    pub fn resolve_state(&self, material: &Material) -> PipelineState {
        let mut state = material.options().resolve();
        if self.wireframe {
            state.wireframe = true;
        }
        state
    }

    /// Cache key for a (geometry, material) pair
    pub fn pipeline_key(&self, geometry: &Geometry, material: &Material) -> String {
        format!(
            "{}|{}|{:?}|{}|{}|{}",
            material.vertex_shader(),
            material.fragment_shader(),
            geometry.vertex_layout().entry_counts(),
            state_key(&self.resolve_state(material)),
            material.texture_sizes().join(","),
            if material.is_skybox() { "skybox" } else { "instanced" },
        )
    }

    /// Return the pipeline for a (geometry, material) pair, building it on
    /// first sight of its key
    pub fn create_pipeline(
        &mut self,
        geometry: &Geometry,
        material: &Material,
        cache: &mut ResourceCache,
    ) -> Result<PipelineId> {
        let key = self.pipeline_key(geometry, material);
        if let Some(id) = self.pipelines.get(&key) {
            engine_trace!("nova3d::PipelineManager", "Pipeline cache hit '{}'", key);
            return Ok(*id);
        }

        let vertex_source = self.shaders.source(material.vertex_shader(), ShaderStage::Vertex)?.to_string();
        let fragment_source = self.shaders.source(material.fragment_shader(), ShaderStage::Fragment)?.to_string();

        let mut bind_group_layouts = vec![self.global_layout, material.layout()];
        if !material.is_skybox() {
            bind_group_layouts.push(self.instance_layout);
        }

        let backend = cache.backend_kind();
        let desc = PipelineDesc {
            label: format!("{}:{}", self.label_prefix, material.name()),
            vertex_source,
            fragment_source,
            vertex_layout: geometry.vertex_layout().clone(),
            bind_group_layouts,
            state: self.resolve_state(material),
            color_format: backend.color_format(),
            depth_format: backend.depth_format(),
        };

        let id = cache.init_pipeline(&desc)?;
        engine_debug!("nova3d::PipelineManager", "Created pipeline '{}' -> {:?}", key, id);
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.pipeline_created(&key, id);
        }
        self.pipelines.insert(key, id);
        Ok(id)
    }
}

#[cfg(test)]
#[path = "pipeline_manager_tests.rs"]
mod tests;
