/// Unit tests for EntityStore

use super::*;
use crate::ecs::{Light, RenderOrder, Transform};
use glam::Vec3;

fn transform_at(x: f32) -> Component {
    Component::Transform(Transform::from_position(Vec3::new(x, 0.0, 0.0)))
}

// ============================================================================
// Entities
// ============================================================================

#[test]
fn test_create_entity() {
    let mut store = EntityStore::new();
    let a = store.create_entity("a");
    let b = store.create_entity("b");

    assert_ne!(a, b);
    assert_eq!(store.entity_count(), 2);
    assert_eq!(store.entity_name(a), Some("a"));
    assert_eq!(store.entities(), &[a, b]);
}

#[test]
fn test_remove_entity_drops_components() {
    let mut store = EntityStore::new();
    let e = store.create_entity("e");
    store.add_components(e, vec![transform_at(1.0)]).unwrap();

    assert!(store.remove_entity(e));
    assert!(!store.remove_entity(e));
    assert!(!store.is_alive(e));
    assert!(store.get_component(e, ComponentKind::Transform).is_none());
    assert!(store.get_components_with_kind(ComponentKind::Transform).is_empty());
}

#[test]
fn test_stale_id_does_not_alias_new_entity() {
    let mut store = EntityStore::new();
    let old = store.create_entity("old");
    store.remove_entity(old);

    let new = store.create_entity("new");
    store.add_components(new, vec![transform_at(2.0)]).unwrap();

    assert_ne!(old, new);
    assert!(store.get_component(old, ComponentKind::Transform).is_none());
    assert_eq!(store.entity_name(old), None);
}

#[test]
fn test_add_to_removed_entity_fails() {
    let mut store = EntityStore::new();
    let e = store.create_entity("e");
    store.remove_entity(e);

    let result = store.add_components(e, vec![transform_at(0.0)]);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_add_component_overwrites_same_kind() {
    let mut store = EntityStore::new();
    let e = store.create_entity("e");

    store.add_components(e, vec![transform_at(1.0)]).unwrap();
    store.add_components(e, vec![transform_at(5.0)]).unwrap();

    let transform = store.get::<Transform>(e).unwrap();
    assert_eq!(transform.position(), Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(store.get_components_with_kind(ComponentKind::Transform).len(), 1);
}

#[test]
fn test_get_components_tuple() {
    let mut store = EntityStore::new();
    let e = store.create_entity("e");
    store.add_components(e, vec![
        transform_at(0.0),
        Component::RenderOrder(RenderOrder { priority: 3 }),
    ]).unwrap();

    let found = store.get_components(e, &[ComponentKind::RenderOrder, ComponentKind::Light, ComponentKind::Transform]);

    assert_eq!(found.len(), 3);
    assert_eq!(found[0], Some(&Component::RenderOrder(RenderOrder { priority: 3 })));
    assert!(found[1].is_none());
    assert_eq!(found[2].map(Component::kind), Some(ComponentKind::Transform));
}

#[test]
fn test_queries_follow_creation_order() {
    let mut store = EntityStore::new();
    let a = store.create_entity("a");
    let b = store.create_entity("b");
    let c = store.create_entity("c");

    store.add_component(c, Light::point(Vec3::ONE, 1.0, 10.0)).unwrap();
    store.add_components(c, vec![transform_at(3.0)]).unwrap();
    store.add_components(a, vec![transform_at(1.0)]).unwrap();
    store.add_components(b, vec![Component::RenderOrder(RenderOrder { priority: 0 })]).unwrap();

    let with_transform: Vec<EntityId> = store
        .get_components_with_kind(ComponentKind::Transform)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(with_transform, vec![a, c]);

    assert_eq!(store.get_entities_having_all(&[ComponentKind::Transform, ComponentKind::Light]), vec![c]);
    assert!(store.has_any_component(b, &[ComponentKind::Light, ComponentKind::RenderOrder]));
    assert!(!store.has_any_component(b, &[ComponentKind::Light, ComponentKind::Mesh]));
}

#[test]
fn test_remove_component() {
    let mut store = EntityStore::new();
    let e = store.create_entity("e");
    store.add_component(e, RenderOrder { priority: 7 }).unwrap();

    let removed = store.remove_component(e, ComponentKind::RenderOrder);
    assert_eq!(removed, Some(Component::RenderOrder(RenderOrder { priority: 7 })));
    assert!(store.get::<RenderOrder>(e).is_none());
    assert!(store.is_alive(e));
}

#[test]
fn test_typed_mutation() {
    let mut store = EntityStore::new();
    let e = store.create_entity("e");
    store.add_component(e, RenderOrder { priority: 1 }).unwrap();

    store.get_mut::<RenderOrder>(e).unwrap().priority = 9;

    assert_eq!(store.get::<RenderOrder>(e), Some(&RenderOrder { priority: 9 }));
    assert!(store.get::<Light>(e).is_none());
}
