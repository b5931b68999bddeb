/// Transform component and hierarchy traversal
///
/// A transform stores its parent as a plain `EntityId` (a back-reference that
/// never keeps the parent alive) and the ids of its children. World matrices
/// are only valid after `update_world_matrices`; setters mark the transform
/// dirty.

use glam::{Mat4, Quat, Vec3};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};
use super::entity_store::{EntityId, EntityStore};

/// Position / rotation / scale with an optional parent
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    world_matrix: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
            children: Vec::new(),
            world_matrix: Mat4::IDENTITY,
            dirty: true,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// World matrix as of the last `update_world_matrices`
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    /// World-space translation as of the last recompute
    pub fn world_position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    /// Matrix built from this transform alone
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Take over the parent and children of the transform being replaced
    pub(crate) fn inherit_links(&mut self, previous: &Transform) {
        self.parent = previous.parent;
        self.children = previous.children.clone();
        self.dirty = true;
    }

    pub(crate) fn forget_child(&mut self, child: EntityId) {
        self.children.retain(|c| *c != child);
    }
}

// ===== HIERARCHY =====

/// Attach `child` under `parent`, or detach it with `None`.
///
/// Both entities must carry a Transform. Attaching an entity under one of
/// its own descendants is rejected.
pub fn set_parent(store: &mut EntityStore, child: EntityId, parent: Option<EntityId>) -> Result<()> {
    if store.get::<Transform>(child).is_none() {
        return Err(Error::InvalidResource(format!("entity {:?} has no Transform", child)));
    }

    if let Some(parent) = parent {
        if store.get::<Transform>(parent).is_none() {
            return Err(Error::InvalidResource(format!("parent {:?} has no Transform", parent)));
        }
        // Walk up from the new parent; meeting the child means a cycle
        let mut cursor = Some(parent);
        let mut visited = FxHashSet::default();
        while let Some(current) = cursor {
            if current == child {
                return Err(Error::InvalidResource(format!(
                    "parenting {:?} under {:?} would create a cycle", child, parent
                )));
            }
            if !visited.insert(current) {
                break;
            }
            cursor = store.get::<Transform>(current).and_then(Transform::parent);
        }
    }

    let old_parent = store.get::<Transform>(child).and_then(Transform::parent);
    if let Some(old) = old_parent {
        if let Some(old_transform) = store.get_mut::<Transform>(old) {
            old_transform.children.retain(|c| *c != child);
        }
    }

    if let Some(parent) = parent {
        if let Some(parent_transform) = store.get_mut::<Transform>(parent) {
            if !parent_transform.children.contains(&child) {
                parent_transform.children.push(child);
            }
        }
    }

    if let Some(transform) = store.get_mut::<Transform>(child) {
        transform.parent = parent;
        transform.dirty = true;
    }
    Ok(())
}

/// Recompute world matrices of dirty transforms and their subtrees.
///
/// Pre-order traversal from the roots with an explicit stack. Children are
/// found through their `parent` field, in creation order. A transform whose
/// parent is missing (removed entity or no Transform) is detached and
/// recomputed as a root. Returns the number of matrices recomputed.
pub fn update_world_matrices(store: &mut EntityStore) -> usize {
    let mut roots = Vec::new();
    let mut dangling = Vec::new();
    let mut children: FxHashMap<EntityId, Vec<EntityId>> = FxHashMap::default();

    for &id in store.entities() {
        let Some(transform) = store.get::<Transform>(id) else {
            continue;
        };
        match transform.parent {
            Some(parent) if store.get::<Transform>(parent).is_some() => {
                children.entry(parent).or_default().push(id);
            }
            Some(_) => {
                dangling.push(id);
                roots.push(id);
            }
            None => roots.push(id),
        }
    }

    for id in dangling {
        if let Some(transform) = store.get_mut::<Transform>(id) {
            transform.parent = None;
            transform.dirty = true;
        }
    }

    let mut recomputed = 0;
    let mut visited = FxHashSet::default();
    // (entity, parent world matrix, parent was recomputed)
    let mut stack: Vec<(EntityId, Mat4, bool)> = Vec::new();

    for root in roots {
        stack.push((root, Mat4::IDENTITY, false));

        while let Some((entity, parent_world, parent_changed)) = stack.pop() {
            if !visited.insert(entity) {
                continue;
            }
            let Some(transform) = store.get_mut::<Transform>(entity) else {
                continue;
            };

            let changed = transform.dirty || parent_changed;
            if changed {
                transform.world_matrix = parent_world * transform.local_matrix();
                transform.dirty = false;
                recomputed += 1;
            }

            let world = transform.world_matrix;
            if let Some(kids) = children.get(&entity) {
                // Reverse so the first child is processed first
                for child in kids.iter().rev() {
                    stack.push((*child, world, changed));
                }
            }
        }
    }

    recomputed
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
