//! # Terrain Engine
//!
//! A Vulkan terrain renderer with a free-fly camera.
//!
//! The crate is organized in two layers. The `render::vulkan` module wraps the
//! raw `ash` API in RAII types (context, swapchain, buffers, textures,
//! descriptors, pipeline, sync objects). On top of that, [`render::TerrainRenderer`]
//! owns the single terrain mesh, the pipeline state, and the per-frame
//! orchestration: update uniforms, acquire a swapchain image, submit the
//! pre-recorded command buffer for it, and present.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use terrain_engine::config::AppConfig;
//! use terrain_engine::render::vulkan::Window;
//! use terrain_engine::render::TerrainRenderer;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let mut window = Window::new(&config.window.title, config.window.width, config.window.height)?;
//!     let mut renderer = TerrainRenderer::new(&mut window, &config)?;
//!     renderer.prepare()?;
//!     Ok(())
//! }
//! ```

pub mod foundation;

pub mod assets;
pub mod camera;
pub mod config;
pub mod input;
pub mod render;
pub mod terrain;

pub use camera::{Axis, Camera, CameraController, Direction};
pub use config::AppConfig;
pub use input::{InputState, Key, MessageOutcome, WindowMessage};
pub use render::TerrainRenderer;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::{Axis, Camera, CameraController, Direction},
        config::{AppConfig, CameraConfig, ShaderConfig, TextureConfig},
        foundation::{
            math::{Mat4, Vec2, Vec3},
            time::Timer,
        },
        input::{InputState, Key, MessageOutcome, WindowMessage},
        render::{vulkan::Window, TerrainRenderer},
        terrain::{TerrainMesh, TerrainVertex},
    };
}
