/// Resource cache - backend-agnostic broker for buffers, textures,
/// samplers, bind-group layouts, and bind groups.
///
/// Buffers, textures, and samplers pass straight through to the device.
/// Bind-group layouts are memoized by `BindGroupLayoutDesc::cache_key`:
/// structurally equal descriptors create exactly one backend layout.
/// Bind groups are never cached.
///
/// Entries are never evicted; the set of distinct layout shapes is bounded
/// by authored content, not by entity count.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BackendKind, BindGroupEntry, BindGroupId, BindGroupLayoutDesc, BindingResource,
    BindingType, BufferDesc, BufferId, GraphicsDevice, LayoutId, PipelineDesc, PipelineId,
    RenderPass, SamplerDesc, SamplerId, TextureDesc, TextureId, TextureInfo, TextureRegion,
};
use crate::{engine_debug, engine_info};

/// Bind groups the engine needs per pipeline (global, material, instance)
/// plus one spare
const REQUIRED_BIND_GROUPS: u32 = 4;

pub struct ResourceCache {
    device: Box<dyn GraphicsDevice>,
    /// cache key -> layout
    layouts: FxHashMap<String, LayoutId>,
    /// layout -> its descriptor, for bind-group validation
    layout_descs: FxHashMap<LayoutId, BindGroupLayoutDesc>,
    buffer_sizes: FxHashMap<BufferId, u64>,
    textures: FxHashMap<TextureId, TextureInfo>,
    diagnostics: Option<Rc<dyn Diagnostics>>,
}

impl ResourceCache {
    /// Wrap a device, checking that it can run the engine
    pub fn new(
        device: Box<dyn GraphicsDevice>,
        diagnostics: Option<Rc<dyn Diagnostics>>,
    ) -> Result<Self> {
        let caps = device.capabilities();
        if !caps.storage_buffers {
            return Err(Error::UnsupportedCapability(
                "vertex-stage storage buffers are required for instance data".to_string(),
            ));
        }
        if caps.max_bind_groups < REQUIRED_BIND_GROUPS {
            return Err(Error::UnsupportedCapability(format!(
                "{} bind groups required, device offers {}",
                REQUIRED_BIND_GROUPS, caps.max_bind_groups
            )));
        }

        engine_info!("nova3d::ResourceCache", "Resource cache ready on {:?}", device.backend_kind());

        Ok(Self {
            device,
            layouts: FxHashMap::default(),
            layout_descs: FxHashMap::default(),
            buffer_sizes: FxHashMap::default(),
            textures: FxHashMap::default(),
            diagnostics,
        })
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.device.backend_kind()
    }

    // ===== BUFFERS =====

    /// Create a buffer, uploading `data` when given
    pub fn create_buffer(&mut self, desc: &BufferDesc, data: Option<&[u8]>) -> Result<BufferId> {
        let id = match data {
            Some(bytes) => {
                if bytes.len() as u64 > desc.size {
                    return Err(Error::InvalidResource(format!(
                        "buffer '{}': {} bytes of data for {} bytes of storage",
                        desc.label, bytes.len(), desc.size
                    )));
                }
                self.device.create_buffer_with_data(desc, bytes)?
            }
            None => self.device.create_buffer(desc)?,
        };
        self.buffer_sizes.insert(id, desc.size);
        Ok(id)
    }

    pub fn write_buffer(&mut self, buffer: BufferId, offset: u64, data: &[u8]) -> Result<()> {
        self.device.write_buffer(buffer, offset, data)
    }

    /// Release a buffer created through this cache
    pub fn destroy_buffer(&mut self, buffer: BufferId) -> Result<()> {
        self.device.destroy_buffer(buffer)?;
        self.buffer_sizes.remove(&buffer);
        Ok(())
    }

    /// Size of a buffer created through this cache
    pub fn buffer_size(&self, buffer: BufferId) -> Option<u64> {
        self.buffer_sizes.get(&buffer).copied()
    }

    // ===== TEXTURES & SAMPLERS =====

    pub fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureId> {
        if desc.width == 0 || desc.height == 0 || desc.array_layers == 0 {
            return Err(Error::InvalidResource(format!(
                "texture '{}' has a zero dimension ({}x{}x{})",
                desc.label, desc.width, desc.height, desc.array_layers
            )));
        }
        let id = self.device.create_texture(desc)?;
        self.textures.insert(id, TextureInfo::from(desc));
        Ok(id)
    }

    pub fn texture_info(&self, texture: TextureId) -> Option<TextureInfo> {
        self.textures.get(&texture).copied()
    }

    /// Overwrite a region of a texture after checking it fits
    pub fn update_texture(&mut self, texture: TextureId, region: &TextureRegion) -> Result<()> {
        let info = self.texture_info(texture).ok_or_else(|| {
            Error::InvalidResource(format!("unknown texture {:?}", texture))
        })?;

        let fits = region.x.checked_add(region.width).is_some_and(|r| r <= info.width)
            && region.y.checked_add(region.height).is_some_and(|b| b <= info.height)
            && region.layer < info.array_layers;
        if !fits {
            return Err(Error::InvalidResource(format!(
                "region {}x{} at ({}, {}) layer {} exceeds texture {:?} ({})",
                region.width, region.height, region.x, region.y, region.layer,
                texture, info.size_tag()
            )));
        }

        let expected = region.width as usize * region.height as usize
            * info.format.bytes_per_pixel() as usize;
        if region.data.len() != expected {
            return Err(Error::InvalidResource(format!(
                "region data is {} bytes, expected {}", region.data.len(), expected
            )));
        }

        self.device.update_texture(texture, region)
    }

    pub fn create_sampler(&mut self, desc: &SamplerDesc) -> Result<SamplerId> {
        self.device.create_sampler(desc)
    }

    // ===== LAYOUTS & BIND GROUPS =====

    /// Return the layout for `desc`, creating it on first sight of its key
    pub fn get_or_create_layout(&mut self, desc: &BindGroupLayoutDesc) -> Result<LayoutId> {
        let key = desc.cache_key();
        if let Some(id) = self.layouts.get(&key) {
            return Ok(*id);
        }

        let id = self.device.create_shader_layout(desc)?;
        engine_debug!("nova3d::ResourceCache", "Created layout '{}' -> {:?}", key, id);
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.layout_created(&key, id);
        }
        self.layouts.insert(key, id);
        self.layout_descs.insert(id, desc.clone());
        Ok(id)
    }

    /// Number of distinct layouts created so far
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn layout_desc(&self, layout: LayoutId) -> Option<&BindGroupLayoutDesc> {
        self.layout_descs.get(&layout)
    }

    /// Bind concrete resources to a layout.
    ///
    /// Every binding the layout declares must be supplied with a resource of
    /// a matching kind.
    pub fn destroy_bind_group(&mut self, bind_group: BindGroupId) -> Result<()> {
        self.device.destroy_bind_group(bind_group)
    }

    pub fn create_bind_group(&mut self, layout: LayoutId, entries: &[BindGroupEntry]) -> Result<BindGroupId> {
        let desc = self.layout_descs.get(&layout).ok_or_else(|| {
            Error::InvalidResource(format!("unknown layout {:?}", layout))
        })?;

        for declared in &desc.entries {
            let entry = entries
                .iter()
                .find(|e| e.binding == declared.binding)
                .ok_or_else(|| Error::InvalidResource(format!(
                    "layout '{}' expects binding {} ({:?}) but no entry was given",
                    desc.label, declared.binding, declared.binding_type
                )))?;

            let matches = matches!(
                (declared.binding_type, entry.resource),
                (BindingType::UniformBuffer | BindingType::StorageBuffer, BindingResource::Buffer(_))
                    | (BindingType::Texture | BindingType::TextureArray, BindingResource::Texture(_))
                    | (BindingType::Sampler, BindingResource::Sampler(_))
            );
            if !matches {
                return Err(Error::InvalidResource(format!(
                    "binding {} of layout '{}' expects {:?}, got {:?}",
                    declared.binding, desc.label, declared.binding_type, entry.resource
                )));
            }
        }

        self.device.create_bind_group(layout, entries)
    }

    // ===== PIPELINES & PASSES =====

    /// Build a backend pipeline (callers cache the result)
    pub fn init_pipeline(&mut self, desc: &PipelineDesc) -> Result<PipelineId> {
        self.device.init_pipeline(desc)
    }

    pub fn begin_render_pass(&mut self) -> Result<Box<dyn RenderPass>> {
        self.device.begin_render_pass()
    }
}

#[cfg(test)]
#[path = "resource_cache_tests.rs"]
mod tests;
