/// Central storage for geometries, materials, and meshes.
///
/// A mesh is created once per distinct (geometry, material) pair and shared
/// by every entity that renders that pair.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::config::Config;
use crate::engine_debug;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BindGroupEntry, BindGroupLayoutDesc, BindGroupLayoutEntry, BindingResource, BindingType,
    BufferDesc, BufferUsage, ShaderStageFlags,
};
use crate::pipeline::{PipelineManager, ShaderLibrary};
use super::geometry::{Geometry, GeometryDesc};
use super::material::{Material, MaterialDesc};
use super::mesh::{create_instance_storage, Mesh};
use super::resource_cache::ResourceCache;

new_key_type! {
    pub struct GeometryKey;
    pub struct MaterialKey;
    pub struct MeshKey;
}

pub struct ResourceManager {
    geometries: SlotMap<GeometryKey, Geometry>,
    materials: SlotMap<MaterialKey, Material>,
    meshes: SlotMap<MeshKey, Mesh>,
    mesh_lookup: FxHashMap<(GeometryKey, MaterialKey), MeshKey>,
    instance_stride: u64,
    initial_capacity: u32,
}

impl ResourceManager {
    pub fn new(config: &Config) -> Self {
        Self {
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
            mesh_lookup: FxHashMap::default(),
            instance_stride: config.instance_stride_bytes,
            initial_capacity: config.initial_instance_capacity,
        }
    }

    /// Bytes between consecutive instances in an instance buffer
    pub fn instance_stride(&self) -> u64 {
        self.instance_stride
    }

    // ===== GEOMETRY =====

    /// Upload a geometry. An unknown vertex layout name falls back to the
    /// default layout.
    pub fn add_geometry(
        &mut self,
        desc: GeometryDesc,
        cache: &mut ResourceCache,
        shaders: &ShaderLibrary,
    ) -> Result<GeometryKey> {
        let vertex_layout = shaders.vertex_layout(&desc.vertex_layout)?;

        let stride = vertex_layout.primary_stride() as usize;
        if stride > 0 && desc.vertices.len() != stride * desc.vertex_count as usize {
            return Err(Error::InvalidResource(format!(
                "geometry '{}': {} vertex bytes for {} vertices of stride {}",
                desc.name, desc.vertices.len(), desc.vertex_count, stride
            )));
        }

        let vertex_buffer = cache.create_buffer(
            &BufferDesc::new(
                format!("{}:vertices", desc.name),
                desc.vertices.len() as u64,
                BufferUsage::VERTEX | BufferUsage::COPY_DST,
            ),
            Some(&desc.vertices),
        )?;

        let (index_buffer, index_count) = match &desc.indices {
            Some(indices) => {
                if let Some(bad) = indices.iter().find(|i| **i >= desc.vertex_count) {
                    return Err(Error::InvalidResource(format!(
                        "geometry '{}': index {} out of range ({} vertices)",
                        desc.name, bad, desc.vertex_count
                    )));
                }
                let bytes: &[u8] = bytemuck::cast_slice(indices.as_slice());
                let buffer = cache.create_buffer(
                    &BufferDesc::new(
                        format!("{}:indices", desc.name),
                        bytes.len() as u64,
                        BufferUsage::INDEX | BufferUsage::COPY_DST,
                    ),
                    Some(bytes),
                )?;
                (Some(buffer), indices.len() as u32)
            }
            None => (None, 0),
        };

        Ok(self.geometries.insert(Geometry {
            name: desc.name,
            vertex_buffer,
            index_buffer,
            vertex_layout,
            vertex_count: desc.vertex_count,
            index_count,
            bounding_sphere: desc.bounding_sphere,
        }))
    }

    pub fn geometry(&self, key: GeometryKey) -> Option<&Geometry> {
        self.geometries.get(key)
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    // ===== MATERIAL =====

    /// Register a material and build its bind group.
    ///
    /// Texture i is bound at 2i and its sampler at 2i + 1; the layout is
    /// shared by every material with the same texture shapes.
    pub fn add_material(&mut self, desc: MaterialDesc, cache: &mut ResourceCache) -> Result<MaterialKey> {
        let mut layout_entries = Vec::with_capacity(desc.textures.len() * 2);
        let mut group_entries = Vec::with_capacity(desc.textures.len() * 2);
        let mut texture_sizes = Vec::with_capacity(desc.textures.len());

        for (i, (texture, sampler)) in desc.textures.iter().enumerate() {
            let info = cache.texture_info(*texture).ok_or_else(|| Error::InvalidResource(format!(
                "material '{}': unknown texture {:?}", desc.name, texture
            )))?;
            let binding = i as u32 * 2;

            layout_entries.push(BindGroupLayoutEntry {
                binding,
                binding_type: if info.is_array() { BindingType::TextureArray } else { BindingType::Texture },
                visibility: ShaderStageFlags::FRAGMENT,
            });
            layout_entries.push(BindGroupLayoutEntry {
                binding: binding + 1,
                binding_type: BindingType::Sampler,
                visibility: ShaderStageFlags::FRAGMENT,
            });
            group_entries.push(BindGroupEntry { binding, resource: BindingResource::Texture(*texture) });
            group_entries.push(BindGroupEntry { binding: binding + 1, resource: BindingResource::Sampler(*sampler) });
            texture_sizes.push(info.size_tag());
        }

        let layout = cache.get_or_create_layout(&BindGroupLayoutDesc {
            label: "material".to_string(),
            entries: layout_entries,
        })?;
        let bind_group = cache.create_bind_group(layout, &group_entries)?;

        Ok(self.materials.insert(Material {
            name: desc.name,
            vertex_shader: desc.vertex_shader,
            fragment_shader: desc.fragment_shader,
            options: desc.options,
            textures: desc.textures,
            skybox: desc.skybox,
            layout,
            bind_group: Some(bind_group),
            texture_sizes,
        }))
    }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    // ===== MESH =====

    /// Mesh for a (geometry, material) pair, created on first request
    pub fn get_or_create_mesh(
        &mut self,
        geometry: GeometryKey,
        material: MaterialKey,
        pipelines: &mut PipelineManager,
        cache: &mut ResourceCache,
    ) -> Result<MeshKey> {
        if let Some(mesh) = self.mesh_lookup.get(&(geometry, material)) {
            return Ok(*mesh);
        }

        let geometry_ref = self.geometries.get(geometry)
            .ok_or_else(|| Error::InvalidResource(format!("unknown geometry {:?}", geometry)))?;
        let material_ref = self.materials.get(material)
            .ok_or_else(|| Error::InvalidResource(format!("unknown material {:?}", material)))?;

        let pipeline = pipelines.create_pipeline(geometry_ref, material_ref, cache)?;

        let (instance_buffer, instance_bind_group, instance_capacity) = if material_ref.is_skybox() {
            (None, None, 0)
        } else {
            let (buffer, bind_group) = create_instance_storage(
                self.initial_capacity.max(1),
                self.instance_stride,
                pipelines.instance_layout(),
                cache,
            )?;
            (Some(buffer), Some(bind_group), self.initial_capacity.max(1))
        };

        let key = self.meshes.insert(Mesh {
            geometry,
            material,
            pipeline,
            instance_buffer,
            instance_bind_group,
            instance_capacity,
        });
        self.mesh_lookup.insert((geometry, material), key);
        engine_debug!(
            "nova3d::ResourceManager",
            "Mesh '{}' + '{}' -> {:?}", geometry_ref.name(), material_ref.name(), key
        );
        Ok(key)
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn mesh_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Forget a mesh. Entities still pointing at it are skipped at draw time.
    pub fn remove_mesh(&mut self, key: MeshKey) -> bool {
        match self.meshes.remove(key) {
            Some(mesh) => {
                self.mesh_lookup.remove(&(mesh.geometry, mesh.material));
                true
            }
            None => false,
        }
    }

    /// Re-resolve every mesh's pipeline (after a wireframe toggle).
    ///
    /// Returns the number of meshes whose pipeline changed.
    pub fn refresh_pipelines(&mut self, pipelines: &mut PipelineManager, cache: &mut ResourceCache) -> Result<usize> {
        let mut changed = 0;
        for mesh in self.meshes.values_mut() {
            let (Some(geometry), Some(material)) =
                (self.geometries.get(mesh.geometry), self.materials.get(mesh.material))
            else {
                continue;
            };
            let pipeline = pipelines.create_pipeline(geometry, material, cache)?;
            if pipeline != mesh.pipeline {
                mesh.pipeline = pipeline;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
