//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the primitive shapes the viewer
//! works with procedurally, eliminating the need for external model files.
//!
//! ## Supported Primitives
//!
//! - **Cylinder**: given height and diameter, with end caps
//! - **Sphere**: UV sphere of a given diameter with configurable resolution
//!
//! ## Usage
//!
//! ```rust
//! use lustre::gfx::geometry::{generate_cylinder, generate_sphere};
//!
//! // A cylinder 3 units tall with a 1.5 unit diameter
//! let cylinder_data = generate_cylinder(3.0, 1.5, 32);
//!
//! // A sphere 2.5 units across
//! let sphere_data = generate_sphere(2.5, 32, 16);
//! ```

pub mod primitives;

pub use primitives::*;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Unit normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Convert to the vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices: Vec<Vertex3D> = (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
