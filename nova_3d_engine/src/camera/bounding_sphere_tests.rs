use glam::{Mat4, Quat, Vec3};
use super::*;

#[test]
fn test_from_points_empty() {
    assert!(BoundingSphere::from_points(&[]).is_none());
}

#[test]
fn test_from_points_unit_cube() {
    let points = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
    ];
    let sphere = BoundingSphere::from_points(&points).unwrap();

    assert_eq!(sphere.center, Vec3::ZERO);
    assert!((sphere.radius - 3.0f32.sqrt()).abs() < 1e-5);
}

#[test]
fn test_transformed_uses_largest_scale() {
    let sphere = BoundingSphere::new(Vec3::X, 1.0);
    let world = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 3.0, 2.0),
        Quat::IDENTITY,
        Vec3::new(0.0, 0.0, -10.0),
    );

    let moved = sphere.transformed(&world);

    assert!(moved.center.abs_diff_eq(Vec3::new(1.0, 0.0, -10.0), 1e-5));
    assert!((moved.radius - 3.0).abs() < 1e-5);
}
