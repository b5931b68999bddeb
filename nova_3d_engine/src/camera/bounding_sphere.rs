/// Bounding sphere used for frustum culling

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere around the box of `points`, or `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));

        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0f32, f32::max);

        Some(Self { center, radius })
    }

    /// This sphere moved by a world matrix.
    ///
    /// The radius grows with the largest axis scale, so non-uniform scale
    /// stays conservative.
    pub fn transformed(&self, world: &Mat4) -> Self {
        let max_scale = world.x_axis.truncate().length()
            .max(world.y_axis.truncate().length())
            .max(world.z_axis.truncate().length());

        Self {
            center: world.transform_point3(self.center),
            radius: self.radius * max_scale,
        }
    }
}

#[cfg(test)]
#[path = "bounding_sphere_tests.rs"]
mod tests;
