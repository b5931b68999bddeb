/// Component kinds and values
///
/// Component storage is keyed by `(EntityId, ComponentKind)`: the kind is a
/// closed enumeration and the value a tagged union, so an entity holds at
/// most one component of each kind.

use glam::Vec3;
use crate::resource::MeshKey;
use super::transform::Transform;

/// Closed set of component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Transform,
    Mesh,
    Light,
    RenderOrder,
}

/// Drawable reference to a shared mesh (geometry + material pair)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshComponent {
    pub mesh: MeshKey,
}

/// Light type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Infinitely far light shining along `direction`
    Directional { direction: Vec3 },
    /// Omnidirectional light positioned by the entity's Transform
    Point,
}

/// Light source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
    /// Attenuation range (point lights only)
    pub range: f32,
}

impl Light {
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional { direction: direction.normalize_or_zero() },
            color,
            intensity,
            range: 0.0,
        }
    }

    pub fn point(color: Vec3, intensity: f32, range: f32) -> Self {
        Self { kind: LightKind::Point, color, intensity, range }
    }
}

/// Explicit draw-order override; higher priorities draw first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOrder {
    pub priority: i32,
}

/// A component value
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Transform(Transform),
    Mesh(MeshComponent),
    Light(Light),
    RenderOrder(RenderOrder),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Transform(_) => ComponentKind::Transform,
            Component::Mesh(_) => ComponentKind::Mesh,
            Component::Light(_) => ComponentKind::Light,
            Component::RenderOrder(_) => ComponentKind::RenderOrder,
        }
    }
}

// ===== TYPED ACCESS =====

/// Concrete component types that can be read out of a `Component`
pub trait ComponentData: Into<Component> {
    const KIND: ComponentKind;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_data {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Component {
            fn from(value: $ty) -> Self {
                Component::$variant(value)
            }
        }

        impl ComponentData for $ty {
            const KIND: ComponentKind = ComponentKind::$variant;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

component_data!(Transform, Transform);
component_data!(MeshComponent, Mesh);
component_data!(Light, Light);
component_data!(RenderOrder, RenderOrder);
