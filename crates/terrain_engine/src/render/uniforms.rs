//! Uniform buffer data layouts
//!
//! CPU-side mirror of the shader's uniform block. Layout must match the
//! GLSL declaration exactly, hence `#[repr(C)]` and column-major matrices.

use crate::camera::Camera;
use crate::foundation::math::Mat4;

/// Projection, view, and model matrices consumed by the vertex shader
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TerrainUbo {
    /// Projection matrix (Vulkan clip space, Y flipped, depth [0, 1])
    pub projection: [[f32; 4]; 4],
    /// View matrix
    pub view: [[f32; 4]; 4],
    /// Model matrix, identity for the single static mesh
    pub model: [[f32; 4]; 4],
}

// Three tightly packed column-major matrices, no padding
unsafe impl bytemuck::Pod for TerrainUbo {}
unsafe impl bytemuck::Zeroable for TerrainUbo {}

impl TerrainUbo {
    /// Build uniform data from the current camera state
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            projection: camera.projection_matrix().into(),
            view: camera.view_matrix().into(),
            model: Mat4::identity().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ubo_size_is_three_mat4() {
        assert_eq!(std::mem::size_of::<TerrainUbo>(), 3 * 64);
    }

    #[test]
    fn test_ubo_views_as_plain_bytes() {
        let camera = Camera::new(800.0, 600.0);
        let ubo = TerrainUbo::from_camera(&camera);
        let bytes = bytemuck::bytes_of(&ubo);
        assert_eq!(bytes.len(), 3 * 64);
        assert_eq!(&bytes[0..4], ubo.projection[0][0].to_ne_bytes());
    }

    #[test]
    fn test_model_is_identity() {
        let camera = Camera::new(800.0, 600.0);
        let ubo = TerrainUbo::from_camera(&camera);
        let identity: [[f32; 4]; 4] = Mat4::identity().into();
        assert_eq!(ubo.model, identity);
    }

    #[test]
    fn test_matrices_follow_camera() {
        let camera = Camera::new(800.0, 600.0);
        let ubo = TerrainUbo::from_camera(&camera);
        let projection: [[f32; 4]; 4] = camera.projection_matrix().into();
        let view: [[f32; 4]; 4] = camera.view_matrix().into();
        assert_eq!(ubo.projection, projection);
        assert_eq!(ubo.view, view);
    }
}
