/// Entity store - generic entity/component database
///
/// Entities are generational `slotmap` keys: once an entity is removed its
/// id never aliases a later entity, and every query made with the stale id
/// answers "absent". Query results follow entity creation order so that
/// two identical stores always answer identically.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use super::component::{Component, ComponentData, ComponentKind};
use super::transform::Transform;

new_key_type! {
    /// Opaque entity identifier
    pub struct EntityId;
}

/// Entity/component database
#[derive(Debug, Default)]
pub struct EntityStore {
    /// Live entities and their names
    entities: SlotMap<EntityId, String>,
    /// Live entities in creation order
    creation_order: Vec<EntityId>,
    /// At most one component per (entity, kind)
    components: FxHashMap<(EntityId, ComponentKind), Component>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== ENTITIES =====

    /// Allocate a fresh entity
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.entities.insert(name.into());
        self.creation_order.push(id);
        id
    }

    /// Remove an entity and all of its components.
    ///
    /// Returns false if the entity was already gone.
    pub fn remove_entity(&mut self, entity: EntityId) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        if let Some(parent) = self.get::<Transform>(entity).and_then(Transform::parent) {
            if let Some(parent_transform) = self.get_mut::<Transform>(parent) {
                parent_transform.forget_child(entity);
            }
        }
        self.creation_order.retain(|id| *id != entity);
        self.components.retain(|(owner, _), _| *owner != entity);
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn entity_name(&self, entity: EntityId) -> Option<&str> {
        self.entities.get(entity).map(String::as_str)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live entities in creation order
    pub fn entities(&self) -> &[EntityId] {
        &self.creation_order
    }

    // ===== COMPONENTS =====

    /// Attach components; an existing component of the same kind is replaced.
    ///
    /// A replacing Transform keeps the hierarchy links of the one it replaces.
    pub fn add_components<I>(&mut self, entity: EntityId, components: I) -> Result<()>
    where
        I: IntoIterator<Item = Component>,
    {
        if !self.is_alive(entity) {
            return Err(Error::InvalidResource(format!(
                "cannot add components to removed entity {:?}", entity
            )));
        }
        for mut component in components {
            if let Component::Transform(transform) = &mut component {
                if let Some(Component::Transform(previous)) = self.components.get(&(entity, ComponentKind::Transform)) {
                    transform.inherit_links(previous);
                }
            }
            self.components.insert((entity, component.kind()), component);
        }
        Ok(())
    }

    /// Attach a single typed component
    pub fn add_component<T: ComponentData>(&mut self, entity: EntityId, component: T) -> Result<()> {
        self.add_components(entity, std::iter::once(component.into()))
    }

    /// Detach a component, returning it
    pub fn remove_component(&mut self, entity: EntityId, kind: ComponentKind) -> Option<Component> {
        self.components.remove(&(entity, kind))
    }

    pub fn get_component(&self, entity: EntityId, kind: ComponentKind) -> Option<&Component> {
        self.components.get(&(entity, kind))
    }

    pub fn get_component_mut(&mut self, entity: EntityId, kind: ComponentKind) -> Option<&mut Component> {
        self.components.get_mut(&(entity, kind))
    }

    /// Several kinds at once, in the order requested
    pub fn get_components(&self, entity: EntityId, kinds: &[ComponentKind]) -> Vec<Option<&Component>> {
        kinds.iter().map(|kind| self.get_component(entity, *kind)).collect()
    }

    /// Every entity carrying `kind`, with that component
    pub fn get_components_with_kind(&self, kind: ComponentKind) -> Vec<(EntityId, &Component)> {
        self.creation_order
            .iter()
            .filter_map(|id| self.get_component(*id, kind).map(|c| (*id, c)))
            .collect()
    }

    /// Whether the entity carries at least one of `kinds`
    pub fn has_any_component(&self, entity: EntityId, kinds: &[ComponentKind]) -> bool {
        kinds.iter().any(|kind| self.components.contains_key(&(entity, *kind)))
    }

    /// Entities carrying every one of `kinds`
    pub fn get_entities_having_all(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        self.creation_order
            .iter()
            .copied()
            .filter(|id| kinds.iter().all(|kind| self.components.contains_key(&(*id, *kind))))
            .collect()
    }

    // ===== TYPED ACCESS =====

    pub fn get<T: ComponentData>(&self, entity: EntityId) -> Option<&T> {
        self.get_component(entity, T::KIND).and_then(T::from_component)
    }

    pub fn get_mut<T: ComponentData>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.get_component_mut(entity, T::KIND).and_then(T::from_component_mut)
    }
}

#[cfg(test)]
#[path = "entity_store_tests.rs"]
mod tests;
