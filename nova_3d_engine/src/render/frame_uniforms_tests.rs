/// Tests for FrameUniforms

use super::*;
use crate::ecs::Component;

#[test]
fn test_size_matches_shader_block() {
    // 2 mat4 + 2 vec4 + MAX_LIGHTS * 2 vec4
    assert_eq!(FrameUniforms::SIZE, (2 * 64 + 2 * 16 + MAX_LIGHTS * 32) as u64);
    assert_eq!(FrameUniforms::default().as_bytes().len() as u64, FrameUniforms::SIZE);
}

#[test]
fn test_new_packs_matrices_and_camera() {
    let view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let uniforms = FrameUniforms::new(view, Mat4::IDENTITY, Vec3::new(4.0, 5.0, 6.0), 1.5);

    assert_eq!(uniforms.view, view.to_cols_array_2d());
    assert_eq!(uniforms.projection, Mat4::IDENTITY.to_cols_array_2d());
    assert_eq!(uniforms.camera_position_time, [4.0, 5.0, 6.0, 1.5]);
    assert_eq!(uniforms.light_count, [0, 0, 0, 0]);
}

#[test]
fn test_point_and_directional_lights() {
    let mut store = EntityStore::new();
    let point = store.create_entity("point");
    store.add_components(point, vec![
        Component::Transform(Transform::from_position(Vec3::new(0.0, 10.0, 0.0))),
        Component::Light(Light::point(Vec3::new(1.0, 0.5, 0.25), 3.0, 50.0)),
    ]).unwrap();
    let sun = store.create_entity("sun");
    store.add_component(sun, Light::directional(Vec3::new(0.0, -2.0, 0.0), Vec3::ONE, 0.5)).unwrap();
    crate::ecs::update_world_matrices(&mut store);

    let mut uniforms = FrameUniforms::default();
    let written = uniforms.set_lights(&store, &[point, sun], MAX_LIGHTS);

    assert_eq!(written, 2);
    assert_eq!(uniforms.light_count[0], 2);
    assert_eq!(uniforms.lights[0].position_or_direction, [0.0, 10.0, 0.0, 1.0]);
    assert_eq!(uniforms.lights[0].color_intensity, [1.0, 0.5, 0.25, 3.0]);
    assert_eq!(uniforms.lights[1].position_or_direction, [0.0, -1.0, 0.0, 0.0]);
}

#[test]
fn test_lights_are_capped() {
    let mut store = EntityStore::new();
    let lights: Vec<EntityId> = (0..MAX_LIGHTS + 3)
        .map(|i| {
            let e = store.create_entity(format!("light{}", i));
            store.add_component(e, Light::point(Vec3::ONE, i as f32, 1.0)).unwrap();
            e
        })
        .collect();

    let mut uniforms = FrameUniforms::default();
    assert_eq!(uniforms.set_lights(&store, &lights, 100), MAX_LIGHTS);
    assert_eq!(uniforms.set_lights(&store, &lights, 2), 2);
    assert_eq!(uniforms.light_count[0], 2);
}

#[test]
fn test_entities_without_light_are_skipped() {
    let mut store = EntityStore::new();
    let plain = store.create_entity("plain");
    let lamp = store.create_entity("lamp");
    store.add_component(lamp, Light::point(Vec3::ONE, 1.0, 1.0)).unwrap();

    let mut uniforms = FrameUniforms::default();
    assert_eq!(uniforms.set_lights(&store, &[plain, lamp], MAX_LIGHTS), 1);
    // No transform: positioned at the origin
    assert_eq!(uniforms.lights[0].position_or_direction, [0.0, 0.0, 0.0, 1.0]);
}
