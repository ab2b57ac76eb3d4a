//! # Primitive Shape Generation
//!
//! This module contains functions to generate the primitive shapes used by
//! the viewer. All shapes are generated with unit-length outward normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere of the given diameter
///
/// # Arguments
/// * `diameter` - Sphere diameter
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere centered at the origin. Normals equal the unit-sphere
/// positions, so they are unit length by construction.
pub fn generate_sphere(
    diameter: f32,
    longitude_segments: u32,
    latitude_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let radius = diameter * 0.5;
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    // Generate vertices
    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            // Spherical to Cartesian coordinates on the unit sphere
            let x = sin_theta * cos_phi;
            let y = sin_theta * sin_phi;
            let z = cos_theta;

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    // Generate indices
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            // First triangle
            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            // Second triangle
            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a capped cylinder with the given height and diameter
///
/// # Arguments
/// * `height` - Height of the cylinder (along the Z axis)
/// * `diameter` - Diameter of the circular cross-section
/// * `segments` - Number of circular segments
///
/// Returns a cylinder centered at the origin extending from -height/2 to
/// height/2 in Z. Side normals point radially outward, cap normals along Z.
pub fn generate_cylinder(height: f32, diameter: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let radius = diameter * 0.5;
    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Generate side vertices
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let x = radius * cos_a;
        let y = radius * sin_a;

        // Bottom vertex
        data.vertices.push([x, y, -half_height]);
        data.normals.push([cos_a, sin_a, 0.0]);

        // Top vertex
        data.vertices.push([x, y, half_height]);
        data.normals.push([cos_a, sin_a, 0.0]);
    }

    // Side faces
    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = ((i + 1) % (segs + 1)) * 2;
        let top_next = bottom_next + 1;

        // First triangle
        data.indices.push(bottom_current);
        data.indices.push(top_current);
        data.indices.push(bottom_next);

        // Second triangle
        data.indices.push(top_current);
        data.indices.push(top_next);
        data.indices.push(bottom_next);
    }

    // Add center vertices for caps
    let center_bottom_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, 0.0, -half_height]);
    data.normals.push([0.0, 0.0, -1.0]);

    let center_top_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, 0.0, half_height]);
    data.normals.push([0.0, 0.0, 1.0]);

    // Bottom cap
    for i in 0..segs {
        let current = i * 2;
        let next = ((i + 1) % (segs + 1)) * 2;

        data.indices.push(center_bottom_idx);
        data.indices.push(next);
        data.indices.push(current);
    }

    // Top cap
    for i in 0..segs {
        let current = i * 2 + 1;
        let next = ((i + 1) % (segs + 1)) * 2 + 1;

        data.indices.push(center_top_idx);
        data.indices.push(current);
        data.indices.push(next);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(data: &GeometryData) {
        for n in &data.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "normal {:?} not unit length", n);
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(2.5, 8, 6);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_unit_normals(&sphere);

        // Every vertex sits on the sphere of the requested diameter
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 1.25).abs() < 1e-5);
        }
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(3.0, 1.5, 16);
        assert_eq!(cylinder.vertices.len(), cylinder.normals.len());
        assert_unit_normals(&cylinder);

        // Side + caps: 2*(segs+1) side vertices plus 2 cap centers
        assert_eq!(cylinder.vertices.len(), 2 * 17 + 2);
        // segs side quads (2 tris) + segs tris per cap
        assert_eq!(cylinder.triangle_count(), 16 * 2 + 16 * 2);

        // Height bounds respected
        for v in &cylinder.vertices {
            assert!(v[2] >= -1.5 - 1e-6 && v[2] <= 1.5 + 1e-6);
        }
    }

    #[test]
    fn test_index_bounds() {
        for data in [generate_sphere(2.0, 12, 8), generate_cylinder(1.0, 1.0, 12)] {
            let count = data.vertex_count() as u32;
            assert!(data.indices.iter().all(|&i| i < count));
            assert_eq!(data.indices.len() % 3, 0);
        }
    }
}
