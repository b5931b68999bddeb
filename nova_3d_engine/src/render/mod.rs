/// Render module - frame uniforms and the per-frame draw submission

pub mod frame_uniforms;
pub mod render_system;

pub use frame_uniforms::*;
pub use render_system::*;
