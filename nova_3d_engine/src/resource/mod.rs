//! Resource management module
//!
//! `ResourceCache` brokers GPU objects on top of the graphics device;
//! `ResourceManager` stores geometries, materials, and the meshes pairing them.

mod resource_cache;
mod resource_manager;
pub mod geometry;
pub mod material;
pub mod mesh;
pub mod pipeline_options;

pub use resource_cache::ResourceCache;
pub use resource_manager::{ResourceManager, GeometryKey, MaterialKey, MeshKey};
pub use geometry::{Geometry, GeometryDesc};
pub use material::{Material, MaterialDesc};
pub use mesh::Mesh;
pub use pipeline_options::{
    PipelineOptions, ColorAttachmentOptions, DepthAttachmentOptions,
    DEFAULT_PIPELINE_STATE, state_key,
};
