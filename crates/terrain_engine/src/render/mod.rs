//! Rendering layer
//!
//! `vulkan` holds the RAII wrappers over the raw API; `renderer` owns the
//! terrain resources and drives the per-frame sequence. `frame` describes
//! what a recorded command buffer contains, independent of any device, so
//! command recording stays deterministic and testable.

pub mod frame;
pub mod renderer;
pub mod uniforms;
pub mod vulkan;

pub use frame::FramePlan;
pub use renderer::TerrainRenderer;
pub use uniforms::TerrainUbo;
