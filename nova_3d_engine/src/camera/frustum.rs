/// Frustum - six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// The planes live in whatever space the matrix given to `update` maps
/// from. The Scene feeds the projection matrix and tests spheres with the
/// camera view matrix, so world-space centers are moved to view space first.

use glam::{Mat3, Mat4, Vec3, Vec4};
use crate::engine_debug;
use super::bounding_sphere::BoundingSphere;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Normal lengths below this are treated as degenerate
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Six frustum planes for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
    /// Clip-space depth spans 0..1 instead of -1..1
    zero_to_one_depth: bool,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Frustum {
    /// Empty frustum (all planes zero, every sphere passes).
    ///
    /// `zero_to_one_depth` must match the clip depth range of the
    /// projection matrices later passed to `update`.
    pub fn new(zero_to_one_depth: bool) -> Self {
        Self {
            planes: [Vec4::ZERO; 6],
            zero_to_one_depth,
        }
    }

    /// Build a frustum directly from a matrix
    pub fn from_matrix(matrix: &Mat4, zero_to_one_depth: bool) -> Self {
        let mut frustum = Self::new(zero_to_one_depth);
        frustum.update(matrix);
        frustum
    }

    /// Re-extract the six planes from a projection (or view-projection) matrix.
    ///
    /// Uses the Gribb & Hartmann row combinations. A plane whose normal has
    /// near-zero length is logged and left unnormalized.
    pub fn update(&mut self, matrix: &Mat4) {
        let m = matrix.to_cols_array_2d();

        let near = if self.zero_to_one_depth {
            // Near: row2
            Vec4::new(m[0][2], m[1][2], m[2][2], m[3][2])
        } else {
            // Near: row3 + row2
            Vec4::new(m[0][3] + m[0][2], m[1][3] + m[1][2], m[2][3] + m[2][2], m[3][3] + m[3][2])
        };

        self.planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            near,
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for (index, plane) in self.planes.iter_mut().enumerate() {
            let normal_len = plane.truncate().length();
            if normal_len > DEGENERATE_EPSILON {
                *plane /= normal_len;
            } else {
                engine_debug!(
                    "nova3d::Frustum",
                    "Degenerate frustum plane {} (normal length {}), left unnormalized",
                    index, normal_len
                );
            }
        }
    }

    /// Test a sphere against the six planes.
    ///
    /// `view` moves the sphere center into plane space. A missing sphere
    /// always passes: unbounded geometry is never culled.
    pub fn is_sphere_within_frustum(&self, sphere: Option<&BoundingSphere>, view: &Mat4) -> bool {
        let Some(sphere) = sphere else {
            return true;
        };

        let center = view.transform_point3(sphere.center);
        for plane in &self.planes {
            if plane.truncate().dot(center) + plane.w < -sphere.radius {
                return false;
            }
        }
        true
    }

    /// Test a point (already in plane space)
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// The eight corners, near face first: (l,b) (r,b) (l,t) (r,t).
    ///
    /// Corners whose three planes do not meet in a single point are
    /// reported as `Vec3::ZERO`.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        let mut i = 0;
        for depth in [PLANE_NEAR, PLANE_FAR] {
            for vertical in [PLANE_BOTTOM, PLANE_TOP] {
                for horizontal in [PLANE_LEFT, PLANE_RIGHT] {
                    corners[i] = intersect_planes(
                        self.planes[horizontal],
                        self.planes[vertical],
                        self.planes[depth],
                    );
                    i += 1;
                }
            }
        }
        corners
    }
}

/// Point shared by three planes, or `Vec3::ZERO` when they are (nearly) parallel
fn intersect_planes(a: Vec4, b: Vec4, c: Vec4) -> Vec3 {
    let (na, nb, nc) = (a.truncate(), b.truncate(), c.truncate());
    let det = Mat3::from_cols(na, nb, nc).determinant();
    if det.abs() < DEGENERATE_EPSILON {
        engine_debug!("nova3d::Frustum", "Degenerate plane intersection (det {})", det);
        return Vec3::ZERO;
    }

    (nb.cross(nc) * -a.w + nc.cross(na) * -b.w + na.cross(nb) * -c.w) / det
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
