//! # Graphics Module
//!
//! This module contains all graphics-related functionality for the lustre
//! viewer: camera systems, procedural geometry, the Phong lighting model,
//! the rendering pipeline, scene management, and GPU resource handling.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with drag, zoom, and pan controls
//! - **Geometry** ([`geometry`]) - Procedural cylinder and sphere primitives
//! - **Lighting** ([`lighting`]) - Phong reflectance math and the point-light rig
//! - **Rendering Pipeline** ([`rendering`]) - Forward Phong pass and pipeline management
//! - **Scene Management** ([`scene`]) - Objects, transforms, and material references
//! - **Resource Management** ([`resources`]) - Materials and uniform buffers
//!
//! The shading model lives twice by design: `lighting` holds the pure Rust
//! reference used by CPU-side callers and tests, `rendering/phong.wgsl`
//! holds the per-fragment production path.

pub mod camera;
pub mod geometry;
pub mod lighting;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use lighting::{LightRig, PointLight, Reflectance, MAX_POINT_LIGHTS};
pub use rendering::render_engine::RenderEngine;
pub use resources::material::PhongMaterial;
