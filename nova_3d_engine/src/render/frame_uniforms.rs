/// Frame uniform block (group 0, binding 0)
///
/// Layout matches the `Frame` block declared by the built-in shaders
/// (std140 / WGSL uniform rules): two matrices, two vec4 rows, then a
/// fixed array of `MAX_LIGHTS` lights.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::MAX_LIGHTS;
use crate::ecs::{EntityId, EntityStore, Light, LightKind, Transform};

/// One light as seen by the shaders
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    /// xyz = direction (w = 0) or world position (w = 1)
    pub position_or_direction: [f32; 4],
    /// rgb = color, a = intensity
    pub color_intensity: [f32; 4],
}

impl GpuLight {
    /// Pack a light component; point lights take their transform's world position
    pub fn from_light(light: &Light, world_position: Vec3) -> Self {
        let position_or_direction = match light.kind {
            LightKind::Directional { direction } => {
                let d = direction.normalize_or_zero();
                [d.x, d.y, d.z, 0.0]
            }
            LightKind::Point => [world_position.x, world_position.y, world_position.z, 1.0],
        };
        Self {
            position_or_direction,
            color_intensity: [light.color.x, light.color.y, light.color.z, light.intensity],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// xyz = camera position, w = elapsed seconds
    pub camera_position_time: [f32; 4],
    /// x = number of valid entries in `lights`
    pub light_count: [u32; 4],
    pub lights: [GpuLight; MAX_LIGHTS],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl FrameUniforms {
    /// Size of the uniform buffer in bytes
    pub const SIZE: u64 = std::mem::size_of::<FrameUniforms>() as u64;

    pub fn new(view: Mat4, projection: Mat4, camera_position: Vec3, time: f32) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            camera_position_time: [camera_position.x, camera_position.y, camera_position.z, time],
            ..Self::default()
        }
    }

    /// Fill the light array from `lights` in order, keeping at most `max_lights`.
    ///
    /// Entities without a Light component are skipped. Returns the number
    /// of lights written.
    pub fn set_lights(&mut self, store: &EntityStore, lights: &[EntityId], max_lights: usize) -> usize {
        let max_lights = max_lights.min(MAX_LIGHTS);
        let mut count = 0;
        for &entity in lights {
            if count == max_lights {
                break;
            }
            let Some(light) = store.get::<Light>(entity) else {
                continue;
            };
            let position = store
                .get::<Transform>(entity)
                .map(|t| t.world_position())
                .unwrap_or(Vec3::ZERO);
            self.lights[count] = GpuLight::from_light(light, position);
            count += 1;
        }
        self.light_count = [count as u32, 0, 0, 0];
        count
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
#[path = "frame_uniforms_tests.rs"]
mod tests;
