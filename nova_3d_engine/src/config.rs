//! Engine configuration
//!
//! `Config` is a plain record read once at startup by the subsystems that
//! need it. Runtime toggles (window size, wireframe) live in `Properties`.

use crate::engine::Engine;
use crate::graphics_device::BackendKind;
use crate::log::LogSeverity;

/// Upper bound on the number of lights packed into the frame uniforms
pub const MAX_LIGHTS: usize = 8;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Application name, used as a label prefix for backend objects
    pub app_name: String,
    /// Active graphics backend
    pub backend: BackendKind,
    /// Bytes reserved per instance in a mesh's instance buffer
    pub instance_stride_bytes: u64,
    /// Number of instances a fresh instance buffer can hold
    pub initial_instance_capacity: u32,
    /// Lights uploaded per frame (never more than `MAX_LIGHTS`)
    pub max_lights: usize,
    /// Shader used when a material names an unknown shader
    pub default_shader: String,
    /// Vertex layout used when a geometry names an unknown layout
    pub default_vertex_layout: String,
    /// Initial clear color (RGBA)
    pub clear_color: [f32; 4],
    /// Minimum severity forwarded to the logger
    pub log_level: LogSeverity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "nova3d".to_string(),
            backend: BackendKind::WebGpu,
            instance_stride_bytes: 64,
            initial_instance_capacity: 16,
            max_lights: MAX_LIGHTS,
            default_shader: "default".to_string(),
            default_vertex_layout: "position_normal_uv".to_string(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            log_level: LogSeverity::Info,
        }
    }
}

impl Config {
    /// Default configuration for a given backend
    pub fn for_backend(backend: BackendKind) -> Self {
        Self { backend, ..Self::default() }
    }

    /// Number of lights actually uploaded, clamped to `MAX_LIGHTS`
    pub fn effective_max_lights(&self) -> usize {
        self.max_lights.min(MAX_LIGHTS)
    }

    /// Push `log_level` into the global severity filter
    pub fn apply_logging(&self) {
        Engine::set_min_severity(self.log_level);
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
