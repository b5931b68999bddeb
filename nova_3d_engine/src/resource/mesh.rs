/// Mesh - draw-batch key for one (geometry, material) pair
///
/// Every entity rendering the same geometry with the same material shares
/// one Mesh. A non-skybox mesh owns an instance storage buffer holding one
/// world matrix per visible instance, plus the bind group exposing it.

use crate::engine_warn;
use crate::error::Result;
use crate::graphics_device::{
    BindGroupEntry, BindGroupId, BindingResource, BufferDesc, BufferId, BufferUsage,
    LayoutId, PipelineId,
};
use super::resource_cache::ResourceCache;
use super::resource_manager::{GeometryKey, MaterialKey};

#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) geometry: GeometryKey,
    pub(crate) material: MaterialKey,
    pub(crate) pipeline: PipelineId,
    pub(crate) instance_buffer: Option<BufferId>,
    pub(crate) instance_bind_group: Option<BindGroupId>,
    pub(crate) instance_capacity: u32,
}

impl Mesh {
    pub fn geometry(&self) -> GeometryKey {
        self.geometry
    }

    pub fn material(&self) -> MaterialKey {
        self.material
    }

    pub fn pipeline(&self) -> PipelineId {
        self.pipeline
    }

    pub fn instance_buffer(&self) -> Option<BufferId> {
        self.instance_buffer
    }

    pub fn instance_bind_group(&self) -> Option<BindGroupId> {
        self.instance_bind_group
    }

    /// Instances the current buffer can hold
    pub fn instance_capacity(&self) -> u32 {
        self.instance_capacity
    }

    /// Make room for `count` instances, doubling the capacity as needed.
    ///
    /// On success the buffer and bind group are replaced together and the
    /// previous pair is released; on failure the previous pair is kept.
    /// Returns true if the buffer grew.
    pub fn ensure_capacity(
        &mut self,
        count: u32,
        stride: u64,
        instance_layout: LayoutId,
        cache: &mut ResourceCache,
    ) -> Result<bool> {
        if count <= self.instance_capacity && self.instance_buffer.is_some() {
            return Ok(false);
        }

        let mut capacity = self.instance_capacity.max(1);
        while capacity < count {
            capacity = capacity.saturating_mul(2);
        }

        let (buffer, bind_group) = create_instance_storage(capacity, stride, instance_layout, cache)?;
        let old_bind_group = self.instance_bind_group.replace(bind_group);
        let old_buffer = self.instance_buffer.replace(buffer);
        self.instance_capacity = capacity;

        // A failed release leaves the old pair allocated
        if let Some(old) = old_bind_group {
            if let Err(reason) = cache.destroy_bind_group(old) {
                engine_warn!("nova3d::Mesh", "Failed to release instance bind group {:?}: {}", old, reason);
            }
        }
        if let Some(old) = old_buffer {
            if let Err(reason) = cache.destroy_buffer(old) {
                engine_warn!("nova3d::Mesh", "Failed to release instance buffer {:?}: {}", old, reason);
            }
        }
        Ok(true)
    }
}

/// Instance storage buffer for `capacity` instances and its bind group
pub(crate) fn create_instance_storage(
    capacity: u32,
    stride: u64,
    instance_layout: LayoutId,
    cache: &mut ResourceCache,
) -> Result<(BufferId, BindGroupId)> {
    let buffer = cache.create_buffer(
        &BufferDesc::new(
            "instance_buffer",
            capacity as u64 * stride,
            BufferUsage::STORAGE | BufferUsage::COPY_DST,
        ),
        None,
    )?;
    let bind_group = cache.create_bind_group(
        instance_layout,
        &[BindGroupEntry { binding: 0, resource: BindingResource::Buffer(buffer) }],
    )?;
    Ok((buffer, bind_group))
}
