/// Scene - owns the camera and the tracked entity list, and rebuilds the
/// frame's draw list on every `update`.
///
/// `update` always runs in the same order: world matrices, sort, then
/// cull and group. Given the same store, resources, and camera, two calls
/// produce identical results.

use std::rc::Rc;

use crate::camera::{Camera, Frustum};
use crate::diagnostics::Diagnostics;
use crate::ecs::{update_world_matrices, EntityId, EntityStore, Light, MeshComponent, Transform};
use crate::resource::ResourceManager;
use crate::{engine_info, engine_trace, engine_warn};
use super::sorter::sort_entities;
use super::visible_entities::VisibleEntities;

pub struct Scene {
    camera: Camera,
    frustum: Frustum,
    /// Tracked entities in insertion order
    entities: Vec<EntityId>,
    /// Tracked set changed since the last update
    changed: bool,
    /// Log culled entities at Info instead of Trace
    show_culled: bool,

    // Per-frame results
    sorted: Vec<EntityId>,
    visible: VisibleEntities,
    visible_lights: Vec<EntityId>,
    culled: Vec<EntityId>,

    diagnostics: Option<Rc<dyn Diagnostics>>,
}

impl Scene {
    pub fn new(camera: Camera, diagnostics: Option<Rc<dyn Diagnostics>>) -> Self {
        let frustum = Frustum::new(camera.zero_to_one_depth());
        Self {
            camera,
            frustum,
            entities: Vec::new(),
            changed: false,
            show_culled: false,
            sorted: Vec::new(),
            visible: VisibleEntities::new(),
            visible_lights: Vec::new(),
            culled: Vec::new(),
            diagnostics,
        }
    }

    // ===== CAMERA =====

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Frustum extracted during the last update
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    // ===== TRACKED ENTITIES =====

    /// Track entities; ids already tracked are ignored
    pub fn add_entities(&mut self, ids: &[EntityId]) {
        for id in ids {
            if !self.entities.contains(id) {
                self.entities.push(*id);
            }
        }
        self.changed = true;
    }

    /// Stop tracking entities
    pub fn remove_entities(&mut self, ids: &[EntityId]) {
        let before = self.entities.len();
        self.entities.retain(|e| !ids.contains(e));
        if self.entities.len() != before {
            self.changed = true;
        }
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Whether the tracked set changed since the last update
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn set_show_culled(&mut self, show: bool) {
        self.show_culled = show;
    }

    // ===== FRAME =====

    /// Rebuild sort order, visible lights, culled list, and grouping.
    ///
    /// Entities removed from the store are dropped from the tracked set.
    pub fn update(&mut self, store: &mut EntityStore, resources: &ResourceManager) {
        let before = self.entities.len();
        self.entities.retain(|e| store.is_alive(*e));
        if self.entities.len() != before {
            self.changed = true;
        }

        update_world_matrices(store);

        self.frustum = Frustum::new(self.camera.zero_to_one_depth());
        self.frustum.update(&self.camera.projection_matrix());
        let view = self.camera.view_matrix();

        // 1. Sort
        self.sorted = sort_entities(&self.entities, store, resources, self.camera.position());

        // 2. Cull + group
        self.visible.clear();
        self.visible_lights.clear();
        self.culled.clear();

        for &entity in &self.sorted {
            if store.get::<Light>(entity).is_some() {
                self.visible_lights.push(entity);
                continue;
            }

            let (Some(transform), Some(mesh_component)) =
                (store.get::<Transform>(entity), store.get::<MeshComponent>(entity))
            else {
                continue;
            };

            let Some(mesh) = resources.mesh(mesh_component.mesh) else {
                engine_warn!(
                    "nova3d::Scene",
                    "Entity {:?} references unknown mesh {:?}", entity, mesh_component.mesh
                );
                continue;
            };

            let world = transform.world_matrix();
            let sphere = resources
                .geometry(mesh.geometry())
                .and_then(|g| g.bounding_sphere())
                .map(|s| s.transformed(&world));

            if !self.frustum.is_sphere_within_frustum(sphere.as_ref(), &view) {
                if self.show_culled {
                    engine_info!("nova3d::Scene", "Culled entity {:?}", entity);
                } else {
                    engine_trace!("nova3d::Scene", "Culled entity {:?}", entity);
                }
                if let Some(diagnostics) = &self.diagnostics {
                    diagnostics.entity_culled(entity);
                }
                self.culled.push(entity);
                continue;
            }

            self.visible.insert(mesh.pipeline(), mesh_component.mesh, entity, world);
        }

        self.changed = false;
    }

    /// Draw order computed by the last update
    pub fn sorted_entities(&self) -> &[EntityId] {
        &self.sorted
    }

    /// pipeline -> mesh -> instances grouping of the last update
    pub fn visible_entities(&self) -> &VisibleEntities {
        &self.visible
    }

    /// Light entities in draw order
    pub fn visible_lights(&self) -> &[EntityId] {
        &self.visible_lights
    }

    /// Entities rejected by the frustum in the last update
    pub fn culled_entities(&self) -> &[EntityId] {
        &self.culled
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
