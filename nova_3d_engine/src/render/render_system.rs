/// Render system - the only code that records draw commands.
///
/// Each frame it walks the Scene's pipeline -> mesh grouping, uploads the
/// frame uniforms and every mesh's instance matrices, and issues one
/// instanced draw per mesh. Every pipeline's draws are recorded
/// contiguously.
///
/// A mesh whose resources cannot be found (or whose instance buffer fails
/// to grow) is skipped for the frame; the rest of the frame still renders.

use std::rc::Rc;

use glam::Mat4;

use crate::config::Config;
use crate::diagnostics::{Diagnostics, FrameStats};
use crate::ecs::{EntityId, EntityStore};
use crate::error::{Error, Result};
use crate::graphics_device::{
    BindGroupEntry, BindGroupId, BindingResource, BufferDesc, BufferId, BufferUsage,
    RenderPass, SamplerDesc, SamplerId, TextureDesc, TextureFormat, TextureId,
    TextureRegion, TextureUsage,
};
use crate::pipeline::PipelineManager;
use crate::properties::{PropertyKey, Properties};
use crate::resource::{ResourceCache, ResourceManager};
use crate::scene::{MeshBatch, Scene};
use crate::{engine_bail, engine_debug, engine_error, engine_info};
use super::frame_uniforms::FrameUniforms;

/// Bytes of one world matrix in the instance buffer
const MATRIX_BYTES: usize = std::mem::size_of::<[f32; 16]>();

pub struct RenderSystem {
    uniform_buffer: BufferId,
    texture_array: TextureId,
    sampler: SamplerId,
    global_bind_group: BindGroupId,
    max_lights: usize,
    instance_stride: u64,
    clear_color: [f32; 4],
    /// Reused instance staging bytes
    staging: Vec<u8>,
    diagnostics: Option<Rc<dyn Diagnostics>>,
}

impl RenderSystem {
    /// Create the frame uniform buffer, the global texture array and
    /// sampler, and the global bind group (group 0).
    pub fn new(
        cache: &mut ResourceCache,
        pipelines: &PipelineManager,
        config: &Config,
        diagnostics: Option<Rc<dyn Diagnostics>>,
    ) -> Result<Self> {
        if config.backend != cache.backend_kind() {
            engine_bail!(
                "nova3d::RenderSystem",
                "Config selects {:?} but the device runs {:?}", config.backend, cache.backend_kind()
            );
        }
        if config.instance_stride_bytes < MATRIX_BYTES as u64 {
            return Err(Error::InitializationFailed(format!(
                "instance stride {} is smaller than a 4x4 matrix ({} bytes)",
                config.instance_stride_bytes, MATRIX_BYTES
            )));
        }

        let uniform_buffer = cache.create_buffer(
            &BufferDesc::new("frame_uniforms", FrameUniforms::SIZE, BufferUsage::UNIFORM | BufferUsage::COPY_DST),
            None,
        )?;

        // 1x1 white placeholder until materials upload real layers
        let texture_array = cache.create_texture(&TextureDesc {
            label: "global_textures".to_string(),
            width: 1,
            height: 1,
            array_layers: 1,
            format: TextureFormat::Rgba8Unorm,
            usage: TextureUsage::Sampled,
        })?;
        cache.update_texture(texture_array, &TextureRegion {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
            layer: 0,
            data: vec![255; 4],
        })?;

        let sampler = cache.create_sampler(&SamplerDesc {
            label: "global_sampler".to_string(),
            ..SamplerDesc::default()
        })?;

        let global_bind_group = cache.create_bind_group(
            pipelines.global_layout(),
            &[
                BindGroupEntry { binding: 0, resource: BindingResource::Buffer(uniform_buffer) },
                BindGroupEntry { binding: 1, resource: BindingResource::Texture(texture_array) },
                BindGroupEntry { binding: 2, resource: BindingResource::Sampler(sampler) },
            ],
        )?;

        engine_info!("nova3d::RenderSystem", "Render system initialized ({:?})", cache.backend_kind());

        Ok(Self {
            uniform_buffer,
            texture_array,
            sampler,
            global_bind_group,
            max_lights: config.effective_max_lights(),
            instance_stride: config.instance_stride_bytes,
            clear_color: config.clear_color,
            staging: Vec::new(),
            diagnostics,
        })
    }

    // ===== ACCESSORS =====

    pub fn uniform_buffer(&self) -> BufferId {
        self.uniform_buffer
    }

    pub fn texture_array(&self) -> TextureId {
        self.texture_array
    }

    pub fn sampler(&self) -> SamplerId {
        self.sampler
    }

    pub fn global_bind_group(&self) -> BindGroupId {
        self.global_bind_group
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    // ===== FRAME =====

    /// Record and submit one frame from the Scene's last update.
    ///
    /// `time` is the elapsed time in seconds exposed to shaders.
    pub fn render(
        &mut self,
        scene: &Scene,
        store: &EntityStore,
        resources: &mut ResourceManager,
        pipelines: &PipelineManager,
        cache: &mut ResourceCache,
        time: f32,
    ) -> Result<FrameStats> {
        let camera = scene.camera();
        if camera.backend() != cache.backend_kind() {
            engine_bail!(
                "nova3d::RenderSystem",
                "Camera projects for {:?} but the device runs {:?}", camera.backend(), cache.backend_kind()
            );
        }
        let mut uniforms = FrameUniforms::new(
            camera.view_matrix(),
            camera.projection_matrix(),
            camera.position(),
            time,
        );
        uniforms.set_lights(store, scene.visible_lights(), self.max_lights);
        cache.write_buffer(self.uniform_buffer, 0, uniforms.as_bytes())?;

        let mut stats = FrameStats {
            culled: scene.culled_entities().len() as u32,
            ..FrameStats::default()
        };

        let mut pass = cache.begin_render_pass()?;

        for batch in scene.visible_entities().batches() {
            pass.use_pipeline(batch.pipeline)?;
            pass.set_bind_group(0, self.global_bind_group)?;
            stats.pipelines_bound += 1;

            for mesh_batch in &batch.meshes {
                if let Err(reason) = self.draw_mesh(pass.as_mut(), mesh_batch, resources, pipelines, cache, &mut stats) {
                    engine_error!(
                        "nova3d::RenderSystem",
                        "Skipping draw of mesh {:?}: {}", mesh_batch.mesh, reason
                    );
                    if let Some(diagnostics) = &self.diagnostics {
                        diagnostics.draw_skipped(mesh_batch.mesh, &reason.to_string());
                    }
                    stats.skipped_draws += 1;
                }
            }
        }

        pass.submit()?;

        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.frame_completed(&stats);
        }
        Ok(stats)
    }

    /// Bind, upload, and draw every instance of one mesh.
    ///
    /// An `Err` means only this mesh is skipped.
    fn draw_mesh(
        &mut self,
        pass: &mut dyn RenderPass,
        batch: &MeshBatch,
        resources: &mut ResourceManager,
        pipelines: &PipelineManager,
        cache: &mut ResourceCache,
        stats: &mut FrameStats,
    ) -> Result<()> {
        let mesh = resources.mesh(batch.mesh)
            .ok_or_else(|| Error::InvalidResource(format!("unknown mesh {:?}", batch.mesh)))?;
        let geometry_key = mesh.geometry();
        let material = resources.material(mesh.material())
            .ok_or_else(|| Error::InvalidResource(format!("unknown material {:?}", mesh.material())))?;
        let material_bind_group = material.bind_group()
            .ok_or_else(|| Error::InvalidResource(format!("material '{}' has no bind group", material.name())))?;
        let skybox = material.is_skybox();
        if resources.geometry(geometry_key).is_none() {
            return Err(Error::InvalidResource(format!("unknown geometry {:?}", geometry_key)));
        }

        let instance_count = batch.instances.len() as u32;
        let instance_bind_group = if skybox {
            None
        } else {
            let stride = resources.instance_stride();
            if stride != self.instance_stride {
                return Err(Error::InvalidResource(format!(
                    "instance stride {} differs from the render system's {}", stride, self.instance_stride
                )));
            }
            let mesh = resources.mesh_mut(batch.mesh)
                .ok_or_else(|| Error::InvalidResource(format!("unknown mesh {:?}", batch.mesh)))?;
            if mesh.ensure_capacity(instance_count, stride, pipelines.instance_layout(), cache)? {
                engine_debug!(
                    "nova3d::RenderSystem",
                    "Instance buffer of mesh {:?} grew to {} instances", batch.mesh, mesh.instance_capacity()
                );
            }
            let buffer = mesh.instance_buffer()
                .ok_or_else(|| Error::InvalidResource(format!("mesh {:?} has no instance buffer", batch.mesh)))?;
            let bind_group = mesh.instance_bind_group()
                .ok_or_else(|| Error::InvalidResource(format!("mesh {:?} has no instance bind group", batch.mesh)))?;

            self.stage_instances(&batch.instances);
            cache.write_buffer(buffer, 0, &self.staging)?;
            Some(bind_group)
        };

        let geometry = resources.geometry(geometry_key)
            .ok_or_else(|| Error::InvalidResource(format!("unknown geometry {:?}", geometry_key)))?;

        pass.set_bind_group(1, material_bind_group)?;
        if let Some(bind_group) = instance_bind_group {
            pass.set_bind_group(2, bind_group)?;
        }
        pass.set_vertex_buffer(0, geometry.vertex_buffer())?;
        if let Some(index_buffer) = geometry.index_buffer() {
            pass.set_index_buffer(index_buffer, geometry.index_format())?;
        }

        if skybox {
            pass.draw_simple(geometry.vertex_count())?;
            stats.instances_drawn += 1;
        } else {
            pass.draw_instanced(geometry.vertex_count(), geometry.index_count(), instance_count)?;
            stats.instances_drawn += instance_count;
        }
        stats.draw_calls += 1;
        Ok(())
    }

    /// Pack world matrices at `index * stride` into the staging bytes
    fn stage_instances(&mut self, instances: &[(EntityId, Mat4)]) {
        let stride = self.instance_stride as usize;
        self.staging.clear();
        self.staging.resize(instances.len() * stride, 0);
        for (index, (_, world)) in instances.iter().enumerate() {
            let offset = index * stride;
            let columns = world.to_cols_array();
            self.staging[offset..offset + MATRIX_BYTES].copy_from_slice(bytemuck::cast_slice(&columns));
        }
    }

    // ===== PROPERTIES =====

    /// React to keys returned by `Properties::flush`.
    ///
    /// A wireframe toggle re-resolves every mesh pipeline; a window resize
    /// updates the camera aspect ratio.
    pub fn apply_property_changes(
        &mut self,
        changed: &[PropertyKey],
        properties: &Properties,
        scene: &mut Scene,
        resources: &mut ResourceManager,
        pipelines: &mut PipelineManager,
        cache: &mut ResourceCache,
    ) -> Result<()> {
        for key in changed {
            match key {
                PropertyKey::Wireframe => {
                    pipelines.set_wireframe(properties.wireframe());
                    let refreshed = resources.refresh_pipelines(pipelines, cache)?;
                    engine_debug!(
                        "nova3d::RenderSystem",
                        "Wireframe {} ({} mesh pipelines changed)",
                        if properties.wireframe() { "on" } else { "off" }, refreshed
                    );
                }
                PropertyKey::WindowSize => {
                    scene.camera_mut().set_viewport_size(properties.window_size());
                }
                PropertyKey::ShowCulled => {
                    scene.set_show_culled(properties.show_culled());
                }
                PropertyKey::ClearColor => {
                    self.clear_color = properties.clear_color();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_system_tests.rs"]
mod tests;
