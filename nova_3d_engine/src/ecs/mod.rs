/// Entity store module - entities, components, transform hierarchy

pub mod entity_store;
pub mod component;
pub mod transform;

pub use entity_store::*;
pub use component::*;
pub use transform::*;
