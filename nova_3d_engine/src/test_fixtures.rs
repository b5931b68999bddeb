/// Shared setup for tests that need a device, caches, and a few resources

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use crate::camera::BoundingSphere;
use crate::config::Config;
use crate::graphics_device::mock_graphics_device::{MockDeviceState, MockGraphicsDevice};
use crate::graphics_device::BackendKind;
use crate::pipeline::PipelineManager;
use crate::resource::{
    GeometryDesc, GeometryKey, MaterialDesc, MaterialKey, MeshKey, PipelineOptions,
    ResourceCache, ResourceManager,
};

pub(crate) struct Fixture {
    pub config: Config,
    pub state: Rc<RefCell<MockDeviceState>>,
    pub cache: ResourceCache,
    pub pipelines: PipelineManager,
    pub resources: ResourceManager,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let (device, state) = MockGraphicsDevice::new(config.backend);
        let mut cache = ResourceCache::new(Box::new(device), None).unwrap();
        let pipelines = PipelineManager::new(&mut cache, &config, None).unwrap();
        let resources = ResourceManager::new(&config);
        Self { config, state, cache, pipelines, resources }
    }

    pub fn for_backend(backend: BackendKind) -> Self {
        Self::with_config(Config::for_backend(backend))
    }

    pub fn add_triangle(&mut self, name: &str, bounds: Option<BoundingSphere>) -> GeometryKey {
        let mut desc = triangle_desc(name);
        desc.bounding_sphere = bounds;
        self.resources
            .add_geometry(desc, &mut self.cache, self.pipelines.shader_library())
            .unwrap()
    }

    pub fn add_material(&mut self, name: &str, options: PipelineOptions) -> MaterialKey {
        let desc = MaterialDesc::new(name, "default", "default").with_options(options);
        self.resources.add_material(desc, &mut self.cache).unwrap()
    }

    pub fn mesh(&mut self, geometry: GeometryKey, material: MaterialKey) -> MeshKey {
        self.resources
            .get_or_create_mesh(geometry, material, &mut self.pipelines, &mut self.cache)
            .unwrap()
    }

    /// Triangle geometry + material with `options`, paired into a mesh
    pub fn simple_mesh(&mut self, name: &str, options: PipelineOptions) -> MeshKey {
        let geometry = self.add_triangle(name, Some(BoundingSphere::new(Vec3::ZERO, 1.0)));
        let material = self.add_material(name, options);
        self.mesh(geometry, material)
    }
}

/// One triangle in the position/normal/uv layout (stride 32)
pub(crate) fn triangle_desc(name: &str) -> GeometryDesc {
    let vertices: [[f32; 8]; 3] = [
        [-1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        [1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.5, 1.0],
    ];
    GeometryDesc::new(name, "position_normal_uv", bytemuck::cast_slice(&vertices).to_vec(), 3)
        .with_indices(vec![0, 1, 2])
}
