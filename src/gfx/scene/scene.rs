use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::{generate_cylinder, generate_sphere},
    resources::material::{MaterialManager, PhongMaterial},
    scene::object::Mesh,
};

use super::object::Object;

/// Main scene containing objects, materials, and camera
///
/// All mutation is frame-synchronous on the render thread: uniforms are
/// synced before the frame's draws are issued, and draws are serialized by
/// the rendering pipeline.
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Updates the scene (camera matrices, viewer position)
    ///
    /// The camera eye is pushed into every material here, so specular
    /// highlights track the orbiting camera instead of going stale.
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();

        let eye = self.camera_manager.camera.eye;
        self.material_manager
            .set_viewer_position([eye.x, eye.y, eye.z]);
    }

    /// Adds a capped cylinder primitive to the scene
    ///
    /// # Arguments
    /// * `name` - Desired object name (made unique if taken)
    /// * `height` - Cylinder height
    /// * `diameter` - Cylinder diameter
    ///
    /// # Returns
    /// Mutable reference to the created object, for placement and material
    /// assignment
    pub fn add_cylinder(&mut self, name: &str, height: f32, diameter: f32) -> &mut Object {
        let data = generate_cylinder(height, diameter, 32);
        self.add_primitive(name, data)
    }

    /// Adds a UV sphere primitive to the scene
    ///
    /// # Arguments
    /// * `name` - Desired object name (made unique if taken)
    /// * `diameter` - Sphere diameter
    pub fn add_sphere(&mut self, name: &str, diameter: f32) -> &mut Object {
        let data = generate_sphere(diameter, 32, 16);
        self.add_primitive(name, data)
    }

    fn add_primitive(&mut self, name: &str, data: crate::gfx::geometry::GeometryData) -> &mut Object {
        let (vertices, indices) = data.to_scene_format();
        let mut object = Object::new(vec![Mesh::new(vertices, indices)]);
        object.set_name(self.ensure_unique_name(name));
        self.objects.push(object);
        self.objects.last_mut().expect("object pushed above")
    }

    /// Creates a new Phong material and adds it to the material manager
    ///
    /// # Arguments
    /// * `name` - Unique name for the material
    /// * `ambient` - Per-channel ambient reflectance
    /// * `diffuse` - Per-channel diffuse reflectance
    /// * `specular` - Per-channel specular reflectance
    /// * `shininess` - Specular lobe exponent
    ///
    /// # Returns
    /// Mutable reference to the created material, for light setup
    pub fn add_material(
        &mut self,
        name: &str,
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
        shininess: f32,
    ) -> &mut PhongMaterial {
        let material = PhongMaterial::new(name, ambient, diffuse, specular, shininess);
        self.material_manager.add_material(material);
        self.material_manager
            .get_material_mut(name)
            .expect("material added above")
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }

        self.material_manager
            .update_all_gpu_resources(device, queue);
    }

    /// Updates all object transforms and syncs to GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Syncs material snapshots to the GPU
    ///
    /// Call this each frame; unchanged snapshots are skipped by the uniform
    /// buffer's change detection.
    pub fn update_materials(&mut self, device: &Device, queue: &wgpu::Queue) {
        self.material_manager
            .update_all_gpu_resources(device, queue);
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if no material is assigned or the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &PhongMaterial {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Assigns a material to an object by index
    pub fn assign_material_to_object(&mut self, object_index: usize, material_id: &str) {
        if let Some(object) = self.objects.get_mut(object_index) {
            object.set_material(material_id);
        }
    }

    /// Gets mutable reference to an object by index
    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Gets immutable reference to an object by index
    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Lists all available materials
    pub fn list_materials(&self) -> Vec<&String> {
        self.material_manager.list_materials()
    }

    pub fn ensure_unique_name(&mut self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{camera_controller::CameraController, orbit_camera::OrbitCamera};
    use cgmath::Vector3;

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(10.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.5);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn primitives_are_added_with_unique_names() {
        let mut scene = test_scene();
        scene.add_cylinder("shape", 3.0, 1.5);
        scene.add_sphere("shape", 2.5);
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0].name, "shape");
        assert_eq!(scene.objects[1].name, "shape (1)");
    }

    #[test]
    fn shared_material_resolves_for_both_objects() {
        let mut scene = test_scene();
        scene.add_material(
            "phong",
            [0.1, 0.1, 0.1],
            [0.1, 0.2, 0.8],
            [1.0, 1.0, 1.0],
            50.0,
        );

        scene.add_cylinder("cylinder", 3.0, 1.5).set_material("phong");
        scene.add_sphere("sphere", 2.5).set_material("phong");

        let a = scene.get_material_for_object(&scene.objects[0]);
        let b = scene.get_material_for_object(&scene.objects[1]);
        assert_eq!(a.name, "phong");
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn update_pushes_camera_eye_into_materials() {
        let mut scene = test_scene();
        scene.add_material(
            "phong",
            [0.1, 0.1, 0.1],
            [0.5, 0.5, 0.5],
            [1.0, 1.0, 1.0],
            32.0,
        );
        scene.update();

        let eye = scene.camera_manager.camera.eye;
        let snapshot = scene
            .material_manager
            .get_material("phong")
            .unwrap()
            .snapshot();
        assert_eq!(snapshot.viewer_position, [eye.x, eye.y, eye.z]);

        // Orbit the camera and refresh: the viewer position must follow
        scene.camera_manager.camera.add_yaw(1.0);
        scene.update();
        let moved = scene
            .material_manager
            .get_material("phong")
            .unwrap()
            .snapshot();
        assert!(moved.viewer_position != snapshot.viewer_position);
    }

    #[test]
    fn unassigned_object_uses_default_material() {
        let mut scene = test_scene();
        scene.add_sphere("sphere", 1.0);
        assert_eq!(scene.get_material_for_object(&scene.objects[0]).name, "Default");
    }
}
