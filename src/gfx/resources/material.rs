//! Phong material system
//!
//! Provides the multi-point-light Phong material and centralized management
//! with GPU resource handling. Materials are stored in MaterialManager and
//! objects reference them by id, so one material instance can shade several
//! meshes; mutating it affects every user.

use std::collections::HashMap;

use cgmath::Vector3;
use log::warn;
use wgpu::Device;

use crate::gfx::lighting::{LightRig, LightSlotError, Reflectance, MAX_POINT_LIGHTS};
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

/// Material ID for referencing materials
pub type MaterialId = String;

/// One light slot as the shader sees it
///
/// `enabled` is 0.0 or 1.0; the fragment stage skips slots where it is zero.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub enabled: f32,
    pub color: [f32; 3],
    _padding: f32,
}

/// GPU uniform snapshot of a Phong material
///
/// Layout must match the `PhongMaterial` struct in `phong.wgsl` exactly.
/// One snapshot is taken per GPU sync; the shader never observes a half
/// updated parameter set.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PhongUniform {
    pub ambient: [f32; 3],
    _pad0: f32,
    pub diffuse: [f32; 3],
    _pad1: f32,
    pub specular: [f32; 3],
    pub shininess: f32,
    pub viewer_position: [f32; 3],
    _pad2: f32,
    pub lights: [PointLightUniform; MAX_POINT_LIGHTS],
}

type PhongUBO = UniformBuffer<PhongUniform>;

/// Material bind group management
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl MaterialBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(device, "Material Bind Group");

        MaterialBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &Device, ubo: &PhongUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Material Bind Group"),
        );
    }

    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}

/// The multi-point-light Phong material
///
/// Owns the surface reflectance, the light rig, and the viewer position, and
/// pushes them to the GPU as one snapshot before the draws that use it.
/// None of the values are range validated: coefficients outside [0, 1] and
/// overdriven light colors pass through to the shader unmodified.
pub struct PhongMaterial {
    pub name: String,
    reflectance: Reflectance,
    lights: LightRig,
    viewer_position: Vector3<f32>,

    // GPU resources - shared by all objects using this material
    material_ubo: Option<PhongUBO>,
    material_bindings: Option<MaterialBindings>,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        // The fallback material carries one enabled overhead light so
        // unconfigured scenes still show their geometry.
        let mut lights = LightRig::new();
        lights
            .set_light(0, Vector3::new(5.0, -10.0, 5.0), Vector3::new(1.0, 1.0, 1.0))
            .expect("slot 0 is always in range");

        Self {
            name: "Default".to_string(),
            reflectance: Reflectance::default(),
            lights,
            viewer_position: Vector3::new(0.0, 0.0, 0.0),
            material_ubo: None,
            material_bindings: None,
        }
    }
}

impl PhongMaterial {
    /// Creates a new material with the given reflectance parameters
    ///
    /// # Arguments
    /// * `name` - Unique name for this material
    /// * `ambient` - Per-channel ambient reflectance
    /// * `diffuse` - Per-channel diffuse reflectance
    /// * `specular` - Per-channel specular reflectance
    /// * `shininess` - Specular lobe exponent
    pub fn new(
        name: &str,
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            reflectance: Reflectance {
                ambient: ambient.into(),
                diffuse: diffuse.into(),
                specular: specular.into(),
                shininess,
            },
            lights: LightRig::new(),
            viewer_position: Vector3::new(0.0, 0.0, 0.0),
            material_ubo: None,
            material_bindings: None,
        }
    }

    /// Builder pattern: Set the ambient reflectance
    pub fn with_ambient(mut self, r: f32, g: f32, b: f32) -> Self {
        self.reflectance.ambient = Vector3::new(r, g, b);
        self
    }

    /// Builder pattern: Set the diffuse reflectance
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.reflectance.diffuse = Vector3::new(r, g, b);
        self
    }

    /// Builder pattern: Set the specular reflectance
    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.reflectance.specular = Vector3::new(r, g, b);
        self
    }

    /// Builder pattern: Set the shininess exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.reflectance.shininess = shininess;
        self
    }

    /// Builder pattern: Set and enable a light slot
    pub fn with_light(
        mut self,
        slot: usize,
        position: [f32; 3],
        color: [f32; 3],
    ) -> Result<Self, LightSlotError> {
        self.lights.set_light(slot, position.into(), color.into())?;
        Ok(self)
    }

    pub fn set_ambient(&mut self, rgb: [f32; 3]) {
        self.reflectance.ambient = rgb.into();
    }

    pub fn set_diffuse(&mut self, rgb: [f32; 3]) {
        self.reflectance.diffuse = rgb.into();
    }

    pub fn set_specular(&mut self, rgb: [f32; 3]) {
        self.reflectance.specular = rgb.into();
    }

    /// Sets the specular lobe exponent
    ///
    /// Zero and negative values are accepted and produce a non-physical but
    /// defined specular term.
    pub fn set_shininess(&mut self, shininess: f32) {
        self.reflectance.shininess = shininess;
    }

    pub fn reflectance(&self) -> &Reflectance {
        &self.reflectance
    }

    /// Overwrites a light slot's position and color and enables it
    pub fn set_light(
        &mut self,
        slot: usize,
        position: [f32; 3],
        color: [f32; 3],
    ) -> Result<(), LightSlotError> {
        self.lights.set_light(slot, position.into(), color.into())
    }

    pub fn enable_light(&mut self, slot: usize) -> Result<(), LightSlotError> {
        self.lights.enable_light(slot)
    }

    pub fn disable_light(&mut self, slot: usize) -> Result<(), LightSlotError> {
        self.lights.disable_light(slot)
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    /// Refreshes the viewer position used for the specular term
    ///
    /// Must be called whenever the camera moves, or highlights are computed
    /// from a stale viewpoint. The scene does this every frame.
    pub fn set_viewer_position(&mut self, position: [f32; 3]) {
        self.viewer_position = position.into();
    }

    /// Captures the current parameter values as a GPU snapshot
    ///
    /// The snapshot depends only on the current values, never on the call
    /// history, so re-binding identical parameters produces identical bytes.
    pub fn snapshot(&self) -> PhongUniform {
        let mut lights = [PointLightUniform {
            position: [0.0; 3],
            enabled: 0.0,
            color: [0.0; 3],
            _padding: 0.0,
        }; MAX_POINT_LIGHTS];

        for (uniform, slot) in lights.iter_mut().zip(self.lights.slots()) {
            uniform.position = slot.light.position.into();
            uniform.color = slot.light.color.into();
            uniform.enabled = if slot.enabled { 1.0 } else { 0.0 };
        }

        PhongUniform {
            ambient: self.reflectance.ambient.into(),
            _pad0: 0.0,
            diffuse: self.reflectance.diffuse.into(),
            _pad1: 0.0,
            specular: self.reflectance.specular.into(),
            shininess: self.reflectance.shininess,
            viewer_position: self.viewer_position.into(),
            _pad2: 0.0,
            lights,
        }
    }

    /// Updates GPU resources for this material
    ///
    /// Must be called after material properties change to sync with GPU.
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.material_ubo.is_none() {
            self.material_ubo = Some(PhongUBO::new(device));

            if !self.lights.slots().iter().any(|slot| slot.enabled) {
                warn!(
                    "material '{}' has no enabled lights; surfaces will render black",
                    self.name
                );
            }
        }

        if self.material_bindings.is_none() {
            let mut bindings = MaterialBindings::new(device);
            bindings.create_bind_group(
                device,
                self.material_ubo
                    .as_ref()
                    .expect("uniform buffer created above"),
            );
            self.material_bindings = Some(bindings);
        }

        let snapshot = self.snapshot();
        if let Some(ubo) = &mut self.material_ubo {
            ubo.update_content(queue, snapshot);
        }
    }

    /// Gets the bind group for rendering
    pub fn get_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.material_bindings.as_ref().map(|b| b.bind_groups())
    }

    /// Gets the bind group layout for pipeline creation
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.material_bindings
            .as_ref()
            .map(|b| b.bind_group_layouts())
    }
}

/// Manages all materials in the viewer
///
/// Centralized storage for all materials. Objects reference materials by id
/// rather than storing material data directly, enabling efficient sharing
/// of GPU resources between objects.
pub struct MaterialManager {
    materials: HashMap<MaterialId, PhongMaterial>,
    default_material_id: MaterialId,
}

impl MaterialManager {
    /// Creates a new material manager with a default material
    pub fn new() -> Self {
        let mut manager = Self {
            materials: HashMap::new(),
            default_material_id: "default".to_string(),
        };

        manager
            .materials
            .insert("default".to_string(), PhongMaterial::default());

        manager
    }

    /// Adds a material to the library
    pub fn add_material(&mut self, material: PhongMaterial) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Gets a material by ID
    pub fn get_material(&self, id: &str) -> Option<&PhongMaterial> {
        self.materials.get(id)
    }

    /// Gets a mutable material by ID
    pub fn get_material_mut(&mut self, id: &str) -> Option<&mut PhongMaterial> {
        self.materials.get_mut(id)
    }

    /// Gets the default material
    pub fn get_default_material(&self) -> &PhongMaterial {
        self.materials
            .get(&self.default_material_id)
            .expect("default material always exists")
    }

    /// Gets material for an object with fallback to default
    ///
    /// This is the main method used during rendering to get the appropriate
    /// material for an object, handling cases where the object has no
    /// material assigned or the material doesn't exist.
    pub fn get_material_for_object(&self, material_id: Option<&MaterialId>) -> &PhongMaterial {
        match material_id {
            Some(id) => self
                .get_material(id)
                .unwrap_or_else(|| self.get_default_material()),
            None => self.get_default_material(),
        }
    }

    /// Creates a new material with default parameters and adds it
    ///
    /// # Returns
    /// Mutable reference to the created material
    pub fn create_material(&mut self, name: &str) -> &mut PhongMaterial {
        let mut material = PhongMaterial::default();
        material.name = name.to_string();
        self.materials.insert(name.to_string(), material);
        self.materials
            .get_mut(name)
            .expect("material inserted above")
    }

    /// Lists all material IDs
    pub fn list_materials(&self) -> Vec<&MaterialId> {
        self.materials.keys().collect()
    }

    /// Propagates the camera eye position into every material
    ///
    /// Called once per frame before snapshots are synced, keeping specular
    /// highlights consistent while the camera orbits.
    pub fn set_viewer_position(&mut self, position: [f32; 3]) {
        for material in self.materials.values_mut() {
            material.set_viewer_position(position);
        }
    }

    /// Updates GPU resources for all materials
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for material in self.materials.values_mut() {
            material.update_gpu_resources(device, queue);
        }
    }

    /// Gets material bind group layout for pipeline creation
    ///
    /// Uses the default material's layout as all materials share the same layout.
    pub fn get_bind_group_layout(&self) -> Option<&wgpu::BindGroupLayout> {
        self.get_default_material().get_bind_group_layout()
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn uniform_layout_matches_shader() {
        // PhongMaterial in phong.wgsl: four 16-byte rows plus two 32-byte lights
        assert_eq!(mem::size_of::<PointLightUniform>(), 32);
        assert_eq!(mem::size_of::<PhongUniform>(), 128);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let mut material = PhongMaterial::new(
            "phong",
            [0.1, 0.1, 0.1],
            [0.1, 0.2, 0.8],
            [1.0, 1.0, 1.0],
            50.0,
        );
        material.set_light(0, [5.0, -5.0, 5.0], [1.0, 1.0, 1.0]).unwrap();
        material.set_viewer_position([0.0, -9.5, 3.1]);
        let first = material.snapshot();

        // Thrash the parameters, then restore them
        material.set_diffuse([0.9, 0.9, 0.9]);
        material.set_shininess(2.0);
        material.set_light(1, [1.0, 1.0, 1.0], [0.5, 0.5, 0.5]).unwrap();
        material.disable_light(1).unwrap();

        material.set_diffuse([0.1, 0.2, 0.8]);
        material.set_shininess(50.0);
        material.set_light(1, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]).unwrap();
        material.disable_light(1).unwrap();

        let second = material.snapshot();
        // Identical parameter values give identical bytes, call history aside
        assert_eq!(bytemuck::bytes_of(&first), bytemuck::bytes_of(&second));
    }

    #[test]
    fn snapshot_reflects_slot_state() {
        let mut material = PhongMaterial::new(
            "phong",
            [0.1, 0.1, 0.1],
            [0.5, 0.5, 0.5],
            [1.0, 1.0, 1.0],
            32.0,
        );
        material.set_light(0, [5.0, -5.0, 5.0], [1.0, 1.0, 1.0]).unwrap();
        material.set_light(1, [-5.0, -3.0, 3.0], [0.0, 1.0, 0.0]).unwrap();
        material.disable_light(1).unwrap();

        let snapshot = material.snapshot();
        assert_eq!(snapshot.lights[0].enabled, 1.0);
        assert_eq!(snapshot.lights[1].enabled, 0.0);
        // Disabling keeps the stored light for later re-activation
        assert_eq!(snapshot.lights[1].position, [-5.0, -3.0, 3.0]);
        assert_eq!(snapshot.lights[1].color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn manager_falls_back_to_default() {
        let manager = MaterialManager::new();
        let missing = "nope".to_string();
        let material = manager.get_material_for_object(Some(&missing));
        assert_eq!(material.name, "Default");
        assert_eq!(manager.get_material_for_object(None).name, "Default");
    }

    #[test]
    fn viewer_position_propagates_to_all_materials() {
        let mut manager = MaterialManager::new();
        manager.create_material("a");
        manager.create_material("b");
        manager.set_viewer_position([1.0, 2.0, 3.0]);
        for id in ["a", "b", "default"] {
            let snapshot = manager.get_material(id).unwrap().snapshot();
            assert_eq!(snapshot.viewer_position, [1.0, 2.0, 3.0]);
        }
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut material = PhongMaterial::default();
        assert!(material.set_light(MAX_POINT_LIGHTS, [0.0; 3], [1.0; 3]).is_err());
        assert!(material.enable_light(7).is_err());
    }
}
