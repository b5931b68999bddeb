/*!
# Nova 3D Engine

Core of a real-time 3D engine that drives two interchangeable graphics
backends (an OpenGL-style immediate API and a WebGPU-style explicit API)
through one descriptor language.

## Architecture

- **EntityStore**: entities, components, and the transform hierarchy
- **Scene**: per-frame sort, frustum culling, and pipeline -> mesh grouping
- **ResourceCache**: deduplicated GPU resources behind the `GraphicsDevice` trait
- **PipelineManager**: pipelines keyed by their semantic inputs
- **RenderSystem**: frame uniforms, instance uploads, and draw submission

Backends implement `GraphicsDevice` and `RenderPass`; the core only looks
at `BackendKind` to pick shader source text and format strings.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod diagnostics;
pub mod properties;
pub mod graphics_device;
pub mod ecs;
pub mod camera;
pub mod resource;
pub mod pipeline;
pub mod scene;
pub mod render;

#[cfg(test)]
pub(crate) mod test_fixtures;

// Main nova3d namespace module
pub mod nova3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Configuration and runtime properties
    pub use crate::config::{Config, MAX_LIGHTS};
    pub use crate::properties::{ListenerId, Properties, PropertyKey, PropertyValue};
    pub use crate::diagnostics::{Diagnostics, DiagnosticsRecorder, FrameStats};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Backend contract
    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod ecs {
        pub use crate::ecs::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod pipeline {
        pub use crate::pipeline::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod render {
        pub use crate::render::*;
    }
}

// Re-export math library at crate root
pub use glam;
