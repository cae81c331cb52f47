//! Vulkan backend
//!
//! RAII wrappers over `ash`. Every type owns its handle and releases it on
//! drop; the renderer composes them in creation order and drops them in
//! reverse.

pub mod buffer;
pub mod commands;
pub mod context;
pub mod descriptor;
pub mod framebuffer;
pub mod pipeline;
pub mod render_pass;
pub mod swapchain;
pub mod sync;
pub mod texture;
pub mod window;

pub use buffer::{IndexBuffer, UniformBuffer, VertexBuffer};
pub use commands::CommandPool;
pub use context::{LogicalDevice, PhysicalDeviceInfo, VulkanContext, VulkanError, VulkanInstance, VulkanResult};
pub use descriptor::{DescriptorPool, DescriptorSetLayout, DescriptorSetLayoutBuilder, DescriptorSetWriter};
pub use framebuffer::{DepthBuffer, Framebuffer};
pub use pipeline::{GraphicsPipeline, ShaderModule};
pub use render_pass::RenderPass;
pub use swapchain::Swapchain;
pub use sync::{Fence, FrameSync, Semaphore, SyncPolicy};
pub use texture::{Texture, TextureSet};
pub use window::{Window, WindowError};
