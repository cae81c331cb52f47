//! Vulkan synchronization primitives
//!
//! RAII wrappers for semaphores and fences, plus the frame pacing policy.
//! The renderer runs one frame at a time and waits the device idle after
//! presenting, so a single semaphore pair is all the GPU-GPU coordination
//! the frame loop needs.

use ash::{vk, Device};

use crate::render::vulkan::{VulkanError, VulkanResult};

/// GPU-GPU synchronization primitive with automatic resource management
pub struct Semaphore {
    device: Device,
    semaphore: vk::Semaphore,
}

impl Semaphore {
    /// Create a new semaphore
    pub fn new(device: Device) -> VulkanResult<Self> {
        let create_info = vk::SemaphoreCreateInfo::builder();

        let semaphore = unsafe {
            device.create_semaphore(&create_info, None)
                .map_err(VulkanError::Api)?
        };

        Ok(Self { device, semaphore })
    }

    /// Get the semaphore handle
    pub fn handle(&self) -> vk::Semaphore {
        self.semaphore
    }
}

impl Drop for Semaphore {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_semaphore(self.semaphore, None);
        }
    }
}

/// Fence wrapper with RAII cleanup
pub struct Fence {
    device: Device,
    fence: vk::Fence,
}

impl Fence {
    /// Create a new fence
    pub fn new(device: Device, signaled: bool) -> VulkanResult<Self> {
        let flags = if signaled {
            vk::FenceCreateFlags::SIGNALED
        } else {
            vk::FenceCreateFlags::empty()
        };

        let create_info = vk::FenceCreateInfo::builder().flags(flags);

        let fence = unsafe {
            device.create_fence(&create_info, None)
                .map_err(VulkanError::Api)?
        };

        Ok(Self { device, fence })
    }

    /// Wait for the fence to be signaled
    pub fn wait(&self, timeout: u64) -> VulkanResult<()> {
        unsafe {
            self.device.wait_for_fences(&[self.fence], true, timeout)
                .map_err(VulkanError::Api)
        }
    }

    /// Reset the fence to unsignaled
    pub fn reset(&self) -> VulkanResult<()> {
        unsafe {
            self.device.reset_fences(&[self.fence])
                .map_err(VulkanError::Api)
        }
    }

    /// Get the fence handle
    pub fn handle(&self) -> vk::Fence {
        self.fence
    }
}

impl Drop for Fence {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_fence(self.fence, None);
        }
    }
}

/// Frame pacing policy
///
/// The renderer deliberately serializes frames: one frame in flight, with
/// full device waits bracketing acquisition and following presentation.
/// Throughput is traded for the simplest possible resource lifetime rules:
/// no per-frame resource duplication anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    /// Number of frames the CPU may record ahead of the GPU
    pub frames_in_flight: u32,
}

impl SyncPolicy {
    /// Fully serialized frame pacing
    pub fn serialized() -> Self {
        Self { frames_in_flight: 1 }
    }
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::serialized()
    }
}

/// Per-frame semaphores for acquire/submit/present hand-off
pub struct FrameSync {
    /// Signaled when the acquired swapchain image is ready for rendering
    pub image_available: Semaphore,
    /// Signaled when the draw submission has finished
    pub render_finished: Semaphore,
}

impl FrameSync {
    /// Create frame synchronization objects
    pub fn new(device: Device) -> VulkanResult<Self> {
        let image_available = Semaphore::new(device.clone())?;
        let render_finished = Semaphore::new(device)?;

        Ok(Self {
            image_available,
            render_finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_fully_serialized() {
        assert_eq!(SyncPolicy::default().frames_in_flight, 1);
        assert_eq!(SyncPolicy::default(), SyncPolicy::serialized());
    }
}
