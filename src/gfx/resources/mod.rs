// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles materials, uniform buffers, and bind groups for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use material::{MaterialManager, PhongMaterial};
pub use texture_resource::TextureResource;
