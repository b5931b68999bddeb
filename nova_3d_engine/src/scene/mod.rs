//! Scene module - per-frame sort, cull, and grouping of drawable entities.

mod scene;
mod sorter;
mod visible_entities;

pub use scene::Scene;
pub use sorter::{sort_entities, SortClass};
pub use visible_entities::{MeshBatch, PipelineBatch, VisibleEntities};
