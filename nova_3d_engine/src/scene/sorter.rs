/// Draw-order sorting
///
/// 1. Entities with a `RenderOrder` come first, by descending priority.
/// 2. The rest are ordered opaque, then alpha, then additive.
/// 3. Alpha and additive entities are drawn back to front (farthest from
///    the camera first); opaque entities keep their insertion order.
///
/// Every step is a stable sort, so equal entities keep their relative order.

use std::cmp::Ordering;

use glam::Vec3;

use crate::ecs::{EntityId, EntityStore, MeshComponent, RenderOrder, Transform};
use crate::graphics_device::BlendMode;
use crate::resource::ResourceManager;

/// Sort bucket of an entity without an explicit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortClass {
    Opaque,
    Alpha,
    Additive,
}

impl From<BlendMode> for SortClass {
    fn from(blend: BlendMode) -> Self {
        match blend {
            BlendMode::Opaque => SortClass::Opaque,
            BlendMode::Alpha => SortClass::Alpha,
            BlendMode::Additive => SortClass::Additive,
        }
    }
}

/// Blend class of an entity's material; non-drawables count as opaque
fn sort_class(store: &EntityStore, resources: &ResourceManager, entity: EntityId) -> SortClass {
    store
        .get::<MeshComponent>(entity)
        .and_then(|c| resources.mesh(c.mesh))
        .and_then(|mesh| resources.material(mesh.material()))
        .map(|material| SortClass::from(material.blend_mode()))
        .unwrap_or(SortClass::Opaque)
}

/// Return `entities` in draw order
pub fn sort_entities(
    entities: &[EntityId],
    store: &EntityStore,
    resources: &ResourceManager,
    camera_position: Vec3,
) -> Vec<EntityId> {
    let mut ordered: Vec<(EntityId, i32)> = Vec::new();
    let mut rest: Vec<(EntityId, SortClass, f32)> = Vec::new();

    for &entity in entities {
        if let Some(order) = store.get::<RenderOrder>(entity) {
            ordered.push((entity, order.priority));
            continue;
        }
        let class = sort_class(store, resources, entity);
        let distance = store
            .get::<Transform>(entity)
            .map(|t| t.world_position().distance(camera_position))
            .unwrap_or(0.0);
        rest.push((entity, class, distance));
    }

    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    rest.sort_by(|a, b| {
        a.1.cmp(&b.1).then_with(|| match a.1 {
            SortClass::Opaque => Ordering::Equal,
            _ => b.2.total_cmp(&a.2),
        })
    });

    ordered
        .into_iter()
        .map(|(entity, _)| entity)
        .chain(rest.into_iter().map(|(entity, _, _)| entity))
        .collect()
}
