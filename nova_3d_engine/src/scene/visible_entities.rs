/// Per-frame draw grouping: pipeline -> mesh -> (entity, world matrix)
///
/// Rebuilt from scratch every frame. Pipelines and meshes appear in the
/// order their first entity was inserted, so the same input order always
/// yields the same grouping.

use glam::Mat4;
use rustc_hash::FxHashMap;

use crate::ecs::EntityId;
use crate::graphics_device::PipelineId;
use crate::resource::MeshKey;

/// All visible instances of one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBatch {
    pub mesh: MeshKey,
    pub instances: Vec<(EntityId, Mat4)>,
}

/// Every mesh drawn with one pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineBatch {
    pub pipeline: PipelineId,
    pub meshes: Vec<MeshBatch>,
}

#[derive(Debug, Clone, Default)]
pub struct VisibleEntities {
    batches: Vec<PipelineBatch>,
    /// pipeline -> index in `batches`
    pipeline_index: FxHashMap<PipelineId, usize>,
    /// mesh -> (pipeline index, mesh index)
    mesh_index: FxHashMap<MeshKey, (usize, usize)>,
}

impl VisibleEntities {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.batches.clear();
        self.pipeline_index.clear();
        self.mesh_index.clear();
    }

    /// Append an instance under its pipeline and mesh
    pub(crate) fn insert(&mut self, pipeline: PipelineId, mesh: MeshKey, entity: EntityId, world: Mat4) {
        if let Some((p, m)) = self.mesh_index.get(&mesh) {
            self.batches[*p].meshes[*m].instances.push((entity, world));
            return;
        }

        let p = match self.pipeline_index.get(&pipeline) {
            Some(p) => *p,
            None => {
                self.batches.push(PipelineBatch { pipeline, meshes: Vec::new() });
                let p = self.batches.len() - 1;
                self.pipeline_index.insert(pipeline, p);
                p
            }
        };

        let meshes = &mut self.batches[p].meshes;
        meshes.push(MeshBatch { mesh, instances: vec![(entity, world)] });
        self.mesh_index.insert(mesh, (p, meshes.len() - 1));
    }

    /// Pipelines in first-appearance order
    pub fn batches(&self) -> &[PipelineBatch] {
        &self.batches
    }

    pub fn pipeline_count(&self) -> usize {
        self.batches.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.mesh_index.len()
    }

    /// Total (entity, matrix) pairs across all meshes
    pub fn instance_count(&self) -> usize {
        self.batches
            .iter()
            .flat_map(|b| b.meshes.iter())
            .map(|m| m.instances.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Whether an entity was grouped this frame
    pub fn contains(&self, entity: EntityId) -> bool {
        self.batches
            .iter()
            .flat_map(|b| b.meshes.iter())
            .any(|m| m.instances.iter().any(|(e, _)| *e == entity))
    }

    /// Instances of one mesh, if it has any this frame
    pub fn instances_of(&self, mesh: MeshKey) -> Option<&[(EntityId, Mat4)]> {
        self.mesh_index
            .get(&mesh)
            .map(|(p, m)| self.batches[*p].meshes[*m].instances.as_slice())
    }
}

impl PartialEq for VisibleEntities {
    fn eq(&self, other: &Self) -> bool {
        self.batches == other.batches
    }
}
