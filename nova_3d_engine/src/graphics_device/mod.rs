/// Graphics device module - the backend contract and its descriptor types

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod texture;
pub mod binding_group;
pub mod pipeline;
pub mod render_pass;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use texture::*;
pub use binding_group::*;
pub use pipeline::*;
pub use render_pass::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
