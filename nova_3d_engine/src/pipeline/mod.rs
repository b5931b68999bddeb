//! Pipeline module - shader source table and pipeline cache.

mod shader_library;
mod pipeline_manager;

pub use shader_library::{ShaderLibrary, ShaderSource, ShaderStage};
pub use pipeline_manager::PipelineManager;
