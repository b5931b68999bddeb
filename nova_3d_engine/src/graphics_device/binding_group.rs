/// Bind-group layouts and bind groups
///
/// A layout declares which uniform/texture/sampler/storage slots a pipeline
/// expects; a bind group binds concrete resources to those slots.
///
/// Layouts are memoized by the `ResourceCache` through `cache_key()`:
/// two structurally equal descriptors always map to the same backend layout.
/// Bind groups are never cached.

use std::fmt::Write;
use bitflags::bitflags;
use super::buffer::BufferId;
use super::texture::{SamplerId, TextureId};

/// Backend handle of a bind-group layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub u32);

/// Backend handle of a bind group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindGroupId(pub u32);

/// Type of resource bound at a given slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// Uniform buffer (read-only structured data)
    UniformBuffer,
    /// Read-only storage buffer (per-instance data)
    StorageBuffer,
    /// Sampled 2D texture
    Texture,
    /// Sampled 2D texture array
    TextureArray,
    /// Sampler
    Sampler,
}

bitflags! {
    /// Shader stage visibility flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX   = 1 << 0;
        const FRAGMENT = 1 << 1;
        const VERTEX_FRAGMENT = Self::VERTEX.bits() | Self::FRAGMENT.bits();
    }
}

/// Description of a single binding slot within a layout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindGroupLayoutEntry {
    /// Binding number inside the group
    pub binding: u32,
    /// Type of resource at this binding
    pub binding_type: BindingType,
    /// Shader stages that access this binding
    pub visibility: ShaderStageFlags,
}

/// Description of a bind-group layout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindGroupLayoutDesc {
    /// Declared label (part of the cache key)
    pub label: String,
    /// Binding slot descriptions
    pub entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutDesc {
    /// Deterministic key derived from the label and the entry set.
    ///
    /// Entries are keyed in binding order, so the declaration order of
    /// the entries does not matter.
    pub fn cache_key(&self) -> String {
        let mut entries: Vec<&BindGroupLayoutEntry> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.binding);

        let mut key = self.label.clone();
        for entry in entries {
            let _ = write!(
                key,
                "|{}:{:?}:{}",
                entry.binding,
                entry.binding_type,
                entry.visibility.bits()
            );
        }
        key
    }

    /// Look up the declared entry for a binding number
    pub fn entry(&self, binding: u32) -> Option<&BindGroupLayoutEntry> {
        self.entries.iter().find(|e| e.binding == binding)
    }
}

/// A concrete resource bound to one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingResource {
    Buffer(BufferId),
    Texture(TextureId),
    Sampler(SamplerId),
}

/// One entry of a bind group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindGroupEntry {
    pub binding: u32,
    pub resource: BindingResource,
}
