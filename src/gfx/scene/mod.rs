//! # Scene Management Module
//!
//! This module provides 3D scene management functionality: the object
//! container, the vertex format, and the scene itself.
//!
//! ## Key Components
//!
//! - [`Scene`] - The main scene container that manages objects, camera, and materials
//! - [`Object`] - Individual 3D objects with meshes, materials, and transforms
//! - [`Vertex3D`] - Vertex data structure with position and normal
//!
//! Objects in the scene support:
//! - Procedural primitive meshes (cylinder, sphere)
//! - Phong material assignment by id
//! - Transform operations (position, rotation, scale)
//! - GPU resource management

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Object};
pub use scene::Scene;
pub use vertex::Vertex3D;
