//! Two primitives under one Phong material.
//!
//! A cylinder and a sphere share a single material instance: blue-heavy
//! diffuse, hard white highlight, one white point light. A second, green
//! light is parked in slot 1, disabled, ready to be switched on.

use cgmath::Vector3;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = lustre::default()?;
    let scene = app.scene_mut();

    scene.camera_manager.camera.set_distance(10.0);
    scene.camera_manager.camera.set_pitch(0.314);
    scene.camera_manager.camera.set_yaw(0.0);

    scene
        .add_cylinder("cylinder", 3.0, 1.5)
        .set_translation(Vector3::new(-2.0, 0.0, 0.0));
    scene
        .add_sphere("sphere", 2.5)
        .set_translation(Vector3::new(2.0, 0.0, 0.0));

    let material = scene.add_material(
        "phong",
        [0.1, 0.1, 0.1], // ambient
        [0.1, 0.2, 0.8], // diffuse
        [1.0, 1.0, 1.0], // specular
        50.0,
    );
    material.set_light(0, [5.0, -5.0, 5.0], [1.0, 1.0, 1.0])?;
    material.set_light(1, [-5.0, -3.0, 3.0], [0.0, 1.0, 0.0])?;
    material.disable_light(1)?;

    scene.assign_material_to_object(0, "phong");
    scene.assign_material_to_object(1, "phong");

    app.run()
}
