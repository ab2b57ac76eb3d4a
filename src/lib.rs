// src/lib.rs
//! Lustre 3D Viewer
//!
//! A compact 3D viewer built on wgpu and winit, centered on a custom
//! multi-point-light Phong shading material.

pub mod app;
pub mod gfx;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::LustreApp;

/// Creates a default viewer application instance
pub fn default() -> anyhow::Result<LustreApp> {
    LustreApp::new()
}
