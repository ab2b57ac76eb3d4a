//! Phong point-light shading math
//!
//! The reflectance function here is the CPU reference for the WGSL fragment
//! stage in `rendering/phong.wgsl`. Both must stay in sync: the shader runs
//! the same steps per fragment for each enabled light slot.

use cgmath::{ElementWise, InnerSpace, Vector3, Zero};
use thiserror::Error;

/// Number of point-light slots carried by a Phong material
pub const MAX_POINT_LIGHTS: usize = 2;

/// A point light source in world space
///
/// Color is an unclamped intensity per channel, so values above 1.0 are
/// allowed for overdriven lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl PointLight {
    pub fn new(position: Vector3<f32>, color: Vector3<f32>) -> Self {
        Self { position, color }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            color: Vector3::zero(),
        }
    }
}

/// One light slot: a light plus an explicit activation flag
///
/// Disabling a slot keeps its stored light untouched, so it can be turned
/// back on without re-supplying position and color.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightSlot {
    pub light: PointLight,
    pub enabled: bool,
}

/// Error for light slot indices outside the fixed capacity
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LightSlotError {
    #[error("light slot {0} out of range (capacity {MAX_POINT_LIGHTS})")]
    OutOfRange(usize),
}

/// Fixed-capacity set of point-light slots
///
/// All slots start disabled. Slot activation is explicit state rather than
/// a zero-color convention, though a black light still contributes nothing.
#[derive(Debug, Clone, Default)]
pub struct LightRig {
    slots: [LightSlot; MAX_POINT_LIGHTS],
}

impl LightRig {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(slot: usize) -> Result<usize, LightSlotError> {
        if slot < MAX_POINT_LIGHTS {
            Ok(slot)
        } else {
            Err(LightSlotError::OutOfRange(slot))
        }
    }

    /// Overwrites a slot's light and enables it
    pub fn set_light(
        &mut self,
        slot: usize,
        position: Vector3<f32>,
        color: Vector3<f32>,
    ) -> Result<(), LightSlotError> {
        let slot = Self::check(slot)?;
        self.slots[slot] = LightSlot {
            light: PointLight::new(position, color),
            enabled: true,
        };
        Ok(())
    }

    pub fn enable_light(&mut self, slot: usize) -> Result<(), LightSlotError> {
        let slot = Self::check(slot)?;
        self.slots[slot].enabled = true;
        Ok(())
    }

    pub fn disable_light(&mut self, slot: usize) -> Result<(), LightSlotError> {
        let slot = Self::check(slot)?;
        self.slots[slot].enabled = false;
        Ok(())
    }

    pub fn is_enabled(&self, slot: usize) -> bool {
        self.slots.get(slot).map(|s| s.enabled).unwrap_or(false)
    }

    pub fn slots(&self) -> &[LightSlot; MAX_POINT_LIGHTS] {
        &self.slots
    }
}

/// Surface reflectance parameters for the Phong model
///
/// Coefficients are per-channel and unvalidated. Keeping them in [0, 1]
/// gives physical results; anything else passes through to the shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflectance {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Default for Reflectance {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(0.1, 0.1, 0.1),
            diffuse: Vector3::new(0.8, 0.8, 0.8),
            specular: Vector3::new(1.0, 1.0, 1.0),
            shininess: 32.0,
        }
    }
}

fn reflect(incident: Vector3<f32>, normal: Vector3<f32>) -> Vector3<f32> {
    incident - normal * (2.0 * incident.dot(normal))
}

/// Outgoing radiance contribution of one point light at one surface point
///
/// Inputs are world space. The fragment normal is renormalized here; the
/// light and view directions are derived from the positions. When the light
/// is at or behind the surface tangent plane the diffuse and specular terms
/// are exactly zero, never negative.
pub fn shade_point_light(
    frag_position: Vector3<f32>,
    frag_normal: Vector3<f32>,
    viewer_position: Vector3<f32>,
    light: &PointLight,
    surface: &Reflectance,
) -> Vector3<f32> {
    let normal = frag_normal.normalize();
    let light_dir = (light.position - frag_position).normalize();
    let view_dir = (viewer_position - frag_position).normalize();

    let ambient = surface.ambient.mul_element_wise(light.color);

    let diff_factor = normal.dot(light_dir).max(0.0);
    if diff_factor <= 0.0 {
        return ambient;
    }

    let diffuse = surface.diffuse.mul_element_wise(light.color) * diff_factor;

    let reflect_dir = reflect(-light_dir, normal);
    let spec_factor = view_dir.dot(reflect_dir).max(0.0).powf(surface.shininess);
    let specular = surface.specular.mul_element_wise(light.color) * spec_factor;

    ambient + diffuse + specular
}

/// Sums the contributions of every enabled slot in the rig
///
/// Mirrors the fragment stage's accumulation loop. Disabled slots are
/// skipped entirely.
pub fn shade(
    frag_position: Vector3<f32>,
    frag_normal: Vector3<f32>,
    viewer_position: Vector3<f32>,
    rig: &LightRig,
    surface: &Reflectance,
) -> Vector3<f32> {
    let mut color = Vector3::zero();
    for slot in rig.slots() {
        if slot.enabled {
            color += shade_point_light(
                frag_position,
                frag_normal,
                viewer_position,
                &slot.light,
                surface,
            );
        }
    }
    color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec3(x: f32, y: f32, z: f32) -> Vector3<f32> {
        Vector3::new(x, y, z)
    }

    fn white() -> Vector3<f32> {
        vec3(1.0, 1.0, 1.0)
    }

    #[test]
    fn backface_has_no_diffuse_or_specular() {
        let surface = Reflectance {
            ambient: vec3(0.2, 0.2, 0.2),
            diffuse: vec3(0.5, 0.5, 0.5),
            specular: white(),
            shininess: 16.0,
        };
        // Light directly behind the surface, viewer in front
        let light = PointLight::new(vec3(0.0, 0.0, -5.0), white());
        let out = shade_point_light(
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 0.0, 1.0),
            vec3(0.0, 0.0, 5.0),
            &light,
            &surface,
        );
        // Only the ambient term survives, exactly
        assert_eq!(out, surface.ambient.mul_element_wise(light.color));
    }

    #[test]
    fn grazing_light_has_no_diffuse_or_specular() {
        let surface = Reflectance::default();
        // dot(normal, light_dir) == 0 at a perfect graze
        let light = PointLight::new(vec3(5.0, 0.0, 0.0), white());
        let out = shade_point_light(
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 0.0, 1.0),
            vec3(0.0, 0.0, 5.0),
            &light,
            &surface,
        );
        assert_eq!(out, surface.ambient.mul_element_wise(light.color));
    }

    #[test]
    fn headlight_gives_unit_diffuse_and_specular_factors() {
        // Light at the viewer position, surface facing both head-on:
        // diff factor is 1 and reflect_dir == view_dir, so the specular
        // factor is 1 regardless of shininess.
        for shininess in [0.0, 1.0, 50.0, 400.0] {
            let surface = Reflectance {
                ambient: vec3(0.0, 0.0, 0.0),
                diffuse: vec3(0.25, 0.25, 0.25),
                specular: vec3(0.5, 0.5, 0.5),
                shininess,
            };
            let light = PointLight::new(vec3(0.0, 0.0, 4.0), white());
            let out = shade_point_light(
                vec3(0.0, 0.0, 0.0),
                vec3(0.0, 0.0, 1.0),
                vec3(0.0, 0.0, 4.0),
                &light,
                &surface,
            );
            let expected = surface.diffuse + surface.specular;
            assert!((out - expected).magnitude() < 1e-5, "shininess {shininess}");
        }
    }

    #[test]
    fn ambient_is_orientation_independent() {
        let surface = Reflectance {
            ambient: vec3(0.3, 0.2, 0.1),
            diffuse: vec3(0.0, 0.0, 0.0),
            specular: vec3(0.0, 0.0, 0.0),
            shininess: 8.0,
        };
        let light = PointLight::new(vec3(1.0, 2.0, 3.0), vec3(2.0, 1.0, 0.5));
        let expected = surface.ambient.mul_element_wise(light.color);
        for normal in [
            vec3(0.0, 0.0, 1.0),
            vec3(0.0, 0.0, -1.0),
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, -1.0, 0.0),
        ] {
            let out = shade_point_light(
                vec3(0.0, 0.0, 0.0),
                normal,
                vec3(0.0, 5.0, 5.0),
                &light,
                &surface,
            );
            assert_eq!(out, expected);
            assert!(expected.x > 0.0 && expected.y > 0.0 && expected.z > 0.0);
        }
    }

    #[test]
    fn black_light_contributes_nothing_and_slots_are_isolated() {
        let surface = Reflectance::default();
        let frag = vec3(0.0, 0.0, 0.0);
        let normal = vec3(0.0, 1.0, 0.0);
        let viewer = vec3(0.0, 3.0, 3.0);

        let mut rig = LightRig::new();
        rig.set_light(0, vec3(2.0, 4.0, 1.0), white()).unwrap();
        let one_light = shade(frag, normal, viewer, &rig, &surface);

        // A second, black light must change nothing
        rig.set_light(1, vec3(-3.0, 5.0, 2.0), vec3(0.0, 0.0, 0.0))
            .unwrap();
        let with_black = shade(frag, normal, viewer, &rig, &surface);
        assert_eq!(one_light, with_black);

        // And the black light alone is exactly zero
        rig.disable_light(0).unwrap();
        let black_only = shade(frag, normal, viewer, &rig, &surface);
        assert_eq!(black_only, Vector3::zero());
    }

    #[test]
    fn disabled_slot_is_skipped() {
        let surface = Reflectance::default();
        let frag = vec3(0.0, 0.0, 0.0);
        let normal = vec3(0.0, 1.0, 0.0);
        let viewer = vec3(0.0, 3.0, 3.0);

        let mut rig = LightRig::new();
        rig.set_light(0, vec3(2.0, 4.0, 1.0), white()).unwrap();
        rig.set_light(1, vec3(-3.0, 5.0, 2.0), vec3(0.0, 1.0, 0.0))
            .unwrap();
        rig.disable_light(1).unwrap();

        let mut solo = LightRig::new();
        solo.set_light(0, vec3(2.0, 4.0, 1.0), white()).unwrap();

        assert_eq!(
            shade(frag, normal, viewer, &rig, &surface),
            shade(frag, normal, viewer, &solo, &surface)
        );
        // Re-enabling uses the stored light unchanged
        rig.enable_light(1).unwrap();
        assert!(rig.is_enabled(1));
        let both = shade(frag, normal, viewer, &rig, &surface);
        assert!(both != shade(frag, normal, viewer, &solo, &surface));
    }

    #[test]
    fn slot_index_out_of_range_is_rejected() {
        let mut rig = LightRig::new();
        assert_eq!(
            rig.set_light(2, Vector3::zero(), white()),
            Err(LightSlotError::OutOfRange(2))
        );
        assert_eq!(rig.enable_light(9), Err(LightSlotError::OutOfRange(9)));
        assert!(!rig.is_enabled(2));
    }

    #[test]
    fn demo_sphere_pole_is_blue_dominant() {
        // The showcase scene: white light up-left-front, blue-heavy diffuse,
        // sampled at the top pole of the sphere sitting at x = 2.
        let surface = Reflectance {
            ambient: vec3(0.1, 0.1, 0.1),
            diffuse: vec3(0.1, 0.2, 0.8),
            specular: white(),
            shininess: 50.0,
        };
        let light = PointLight::new(vec3(5.0, -5.0, 5.0), white());
        let viewer = vec3(0.0, -9.51, 3.09);
        let out = shade_point_light(
            vec3(2.0, 0.0, 1.25),
            vec3(0.0, 0.0, 1.0),
            viewer,
            &light,
            &surface,
        );
        assert!(out.x > 0.0 && out.y > 0.0 && out.z > 0.0);
        assert!(out.z > out.y && out.y > out.x);
    }

    #[test]
    fn negative_shininess_is_defined() {
        let surface = Reflectance {
            shininess: -2.0,
            ..Reflectance::default()
        };
        let light = PointLight::new(vec3(0.0, 5.0, 0.0), white());
        let out = shade_point_light(
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
            vec3(0.0, 3.0, 3.0),
            &light,
            &surface,
        );
        assert!(out.x.is_finite() && out.y.is_finite() && out.z.is_finite());
    }
}
