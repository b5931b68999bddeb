use glam::{Mat4, Vec3, Vec4};
use winit::dpi::PhysicalSize;
use super::*;

fn camera(backend: BackendKind) -> Camera {
    Camera::new(backend, Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 1.0, 1.5, 0.1, 50.0)
}

#[test]
fn test_camera_getters() {
    let cam = camera(BackendKind::WebGpu);
    assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(cam.target(), Vec3::ZERO);
    assert_eq!(cam.up(), Vec3::Y);
    assert_eq!(cam.near(), 0.1);
    assert_eq!(cam.far(), 50.0);
    assert!(cam.zero_to_one_depth());
    assert!(!camera(BackendKind::OpenGl).zero_to_one_depth());
}

#[test]
fn test_view_matrix_moves_target_onto_negative_z() {
    let cam = camera(BackendKind::WebGpu);
    let target_in_view = cam.view_matrix().transform_point3(Vec3::ZERO);
    assert!(target_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));
}

#[test]
fn test_projection_depth_range_follows_backend() {
    // A point on the near plane maps to clip depth 0 (WebGPU) or -1 (OpenGL)
    let near_point = Vec4::new(0.0, 0.0, -0.1, 1.0);

    let wgpu = camera(BackendKind::WebGpu).projection_matrix() * near_point;
    let gl = camera(BackendKind::OpenGl).projection_matrix() * near_point;

    assert!((wgpu.z / wgpu.w).abs() < 1e-4);
    assert!((gl.z / gl.w + 1.0).abs() < 1e-4);
}

#[test]
fn test_view_projection_is_projection_times_view() {
    let cam = camera(BackendKind::OpenGl);
    let expected: Mat4 = cam.projection_matrix() * cam.view_matrix();
    assert!(cam.view_projection_matrix().abs_diff_eq(expected, 1e-6));
}

#[test]
fn test_set_viewport_size() {
    let mut cam = camera(BackendKind::WebGpu);

    cam.set_viewport_size(PhysicalSize::new(1920, 1080));
    assert!((cam.aspect() - 1920.0 / 1080.0).abs() < 1e-6);

    cam.set_viewport_size(PhysicalSize::new(800, 0));
    assert!((cam.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
}

#[test]
fn test_distance_to() {
    let cam = camera(BackendKind::WebGpu);
    assert!((cam.distance_to(Vec3::new(0.0, 0.0, -5.0)) - 10.0).abs() < 1e-6);
}
