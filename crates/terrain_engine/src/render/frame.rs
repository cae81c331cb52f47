//! Frame description
//!
//! A `FramePlan` captures everything a recorded terrain command buffer
//! depends on: clear values, the full-window viewport and scissor, and the
//! draw's index count. Recording is a pure function of the plan plus the
//! bound resources, so rebuilding command buffers from an unchanged plan
//! yields identical command streams.

/// State a terrain command buffer is recorded from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    /// Color attachment clear value (RGBA)
    pub clear_color: [f32; 4],
    /// Depth attachment clear value
    pub clear_depth: f32,
    /// Stencil clear value
    pub clear_stencil: u32,
    /// Render area and dynamic viewport/scissor extent
    pub width: u32,
    /// Render area and dynamic viewport/scissor extent
    pub height: u32,
    /// Index count for the single indexed draw
    pub index_count: u32,
}

impl FramePlan {
    /// Build the plan for the current window extent and mesh
    pub fn new(clear_color: [f32; 4], width: u32, height: u32, index_count: u32) -> Self {
        Self {
            clear_color,
            clear_depth: 1.0,
            clear_stencil: 0,
            width,
            height,
            index_count,
        }
    }
}

/// Whether an existing command buffer set can be reused for a swapchain
///
/// A set is only valid when it has exactly one buffer per swapchain image.
/// An invalid set is destroyed and recreated wholesale, never patched.
pub fn command_buffers_valid(buffer_count: usize, image_count: usize) -> bool {
    buffer_count == image_count && buffer_count > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_clears_to_far_plane() {
        let plan = FramePlan::new([0.0, 0.0, 0.0, 1.0], 1280, 720, 600);
        assert_eq!(plan.clear_depth, 1.0);
        assert_eq!(plan.clear_stencil, 0);
    }

    #[test]
    fn test_identical_inputs_build_identical_plans() {
        let a = FramePlan::new([0.1, 0.2, 0.3, 1.0], 1280, 720, 54);
        let b = FramePlan::new([0.1, 0.2, 0.3, 1.0], 1280, 720, 54);
        assert_eq!(a, b);
    }

    #[test]
    fn test_count_mismatch_invalidates_command_buffers() {
        assert!(command_buffers_valid(3, 3));
        assert!(!command_buffers_valid(2, 3));
        assert!(!command_buffers_valid(3, 2));
        assert!(!command_buffers_valid(0, 0));
    }
}
