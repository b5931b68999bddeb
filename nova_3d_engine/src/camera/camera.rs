/// Camera - perspective camera driven by position / target / up.
///
/// The projection depth range follows the active backend: -1..1 clip depth
/// for OpenGL, 0..1 for WebGPU.

use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;
use crate::graphics_device::BackendKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    /// Vertical field of view in radians
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    backend: BackendKind,
}

impl Camera {
    /// Perspective camera at `position` looking at `target` (Y up)
    pub fn new(
        backend: BackendKind,
        position: Vec3,
        target: Vec3,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y,
            aspect,
            near,
            far,
            backend,
        }
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Whether projections produced by this camera use 0..1 clip depth
    pub fn zero_to_one_depth(&self) -> bool {
        !self.backend.uses_negative_one_to_one_depth()
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// View-to-clip matrix for the active backend's depth range
    pub fn projection_matrix(&self) -> Mat4 {
        match self.backend {
            BackendKind::OpenGl => Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far),
            BackendKind::WebGpu => Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far),
        }
    }

    /// projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Euclidean distance from the camera position
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Update the aspect ratio from a surface size. A zero-height surface
    /// (minimized window) keeps the previous aspect.
    pub fn set_viewport_size(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.aspect = size.width as f32 / size.height as f32;
        }
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
