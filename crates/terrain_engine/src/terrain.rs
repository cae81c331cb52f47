//! Terrain mesh generation
//!
//! Builds a deterministic heightfield grid on the CPU. The vertex layout is
//! fixed: position plus normal, 24 bytes per vertex, consumed directly by the
//! terrain pipeline's vertex input description.

use crate::foundation::math::Vec3;

/// Vertex format for the terrain mesh: position + normal, 24-byte stride
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainVertex {
    /// World-space position
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
}

// Two packed float triples, no padding
unsafe impl bytemuck::Pod for TerrainVertex {}
unsafe impl bytemuck::Zeroable for TerrainVertex {}

impl TerrainVertex {
    /// Size of one vertex in bytes
    pub const STRIDE: u32 = std::mem::size_of::<TerrainVertex>() as u32;
    /// Byte offset of the position attribute
    pub const POSITION_OFFSET: u32 = 0;
    /// Byte offset of the normal attribute
    pub const NORMAL_OFFSET: u32 = 12;
}

/// CPU-side terrain geometry: a square heightfield grid with triangle-list
/// indices wound counter-clockwise.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    /// Grid vertices, row-major
    pub vertices: Vec<TerrainVertex>,
    /// Triangle-list indices into `vertices`
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Generate a `size` x `size` vertex grid centered on the origin of the
    /// XZ plane, with `spacing` world units between adjacent vertices.
    ///
    /// The heightfield is a fixed sum of sine waves so repeated calls with the
    /// same arguments produce identical geometry.
    pub fn generate(size: u32, spacing: f32) -> Self {
        assert!(size >= 2, "terrain grid needs at least 2x2 vertices");

        let half_extent = (size - 1) as f32 * spacing * 0.5;
        let mut vertices = Vec::with_capacity((size * size) as usize);

        for row in 0..size {
            for col in 0..size {
                let x = col as f32 * spacing - half_extent;
                let z = row as f32 * spacing - half_extent;
                let position = [x, height_at(x, z), z];
                let normal = normal_at(x, z);
                vertices.push(TerrainVertex {
                    position,
                    normal: [normal.x, normal.y, normal.z],
                });
            }
        }

        // Two CCW triangles per grid cell.
        let quads = (size - 1) * (size - 1);
        let mut indices = Vec::with_capacity((quads * 6) as usize);
        for row in 0..size - 1 {
            for col in 0..size - 1 {
                let top_left = row * size + col;
                let top_right = top_left + 1;
                let bottom_left = top_left + size;
                let bottom_right = bottom_left + 1;

                indices.push(top_left);
                indices.push(bottom_left);
                indices.push(top_right);

                indices.push(top_right);
                indices.push(bottom_left);
                indices.push(bottom_right);
            }
        }

        Self { vertices, indices }
    }

    /// Number of indices, as passed to the indexed draw call
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Vertex data as raw bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

fn height_at(x: f32, z: f32) -> f32 {
    (x * 0.08).sin() * 4.0 + (z * 0.11).sin() * 3.0 + ((x + z) * 0.05).sin() * 2.0
}

/// Analytic normal from the heightfield's partial derivatives
fn normal_at(x: f32, z: f32) -> Vec3 {
    let dh_dx = (x * 0.08).cos() * 0.08 * 4.0 + ((x + z) * 0.05).cos() * 0.05 * 2.0;
    let dh_dz = (z * 0.11).cos() * 0.11 * 3.0 + ((x + z) * 0.05).cos() * 0.05 * 2.0;
    Vec3::new(-dh_dx, 1.0, -dh_dz).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride_and_offsets() {
        assert_eq!(TerrainVertex::STRIDE, 24);
        assert_eq!(TerrainVertex::POSITION_OFFSET, 0);
        assert_eq!(TerrainVertex::NORMAL_OFFSET, 12);
    }

    #[test]
    fn test_grid_counts() {
        let mesh = TerrainMesh::generate(4, 1.0);
        assert_eq!(mesh.vertices.len(), 16);
        // 3x3 quads, two triangles each
        assert_eq!(mesh.indices.len(), 9 * 6);
        assert_eq!(mesh.index_count(), 54);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = TerrainMesh::generate(8, 2.0);
        let b = TerrainMesh::generate(8, 2.0);
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_grid_is_centered() {
        let mesh = TerrainMesh::generate(3, 2.0);
        let first = mesh.vertices.first().unwrap().position;
        let last = mesh.vertices.last().unwrap().position;
        assert_eq!(first[0], -2.0);
        assert_eq!(first[2], -2.0);
        assert_eq!(last[0], 2.0);
        assert_eq!(last[2], 2.0);
    }

    #[test]
    fn test_winding_is_counter_clockwise() {
        // Flat variant of the first triangle projected on XZ: with +Y up and
        // the camera above, CCW means a positive cross product Y component
        // when walking the triangle in index order.
        let mesh = TerrainMesh::generate(2, 1.0);
        let tri: Vec<[f32; 3]> = mesh.indices[..3]
            .iter()
            .map(|&i| mesh.vertices[i as usize].position)
            .collect();
        let e0 = Vec3::new(tri[1][0] - tri[0][0], 0.0, tri[1][2] - tri[0][2]);
        let e1 = Vec3::new(tri[2][0] - tri[0][0], 0.0, tri[2][2] - tri[0][2]);
        assert!(e0.cross(&e1).y > 0.0);
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = TerrainMesh::generate(16, 1.0);
        for vertex in &mesh.vertices {
            let n = Vec3::new(vertex.normal[0], vertex.normal[1], vertex.normal[2]);
            assert!((n.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_byte_views_cover_all_data() {
        let mesh = TerrainMesh::generate(4, 1.0);
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertices.len() * 24);
        assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
    }
}
