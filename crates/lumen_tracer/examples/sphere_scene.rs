//! Ray traced demo scene.
//!
//! Three spheres and a triangle on a floor plane, lit by a sun and a bulb,
//! saved as sphere_scene.png.

use lumen_core::Framebuffer;
use lumen_tracer::{
    render, Camera, Color, DVec3, Light, Material, Plane, Projection, RenderConfig, Scene,
    Sphere, Triangle,
};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Lumen Ray Tracer - Sphere Scene");
    println!("===============================");

    let scene = build_scene();
    let camera = Camera::new(
        DVec3::new(0.0, 1.0, 6.0),
        DVec3::new(0.0, -0.15, -1.0),
        DVec3::Y,
        Projection::Classic,
    );

    let config = RenderConfig {
        exposure: Some(1.5),
        ..RenderConfig::default()
    };

    let mut fb = match Framebuffer::new(640, 360) {
        Ok(fb) => fb,
        Err(e) => {
            eprintln!("Failed to allocate framebuffer: {e}");
            return;
        }
    };

    let start = std::time::Instant::now();
    render(&scene, &camera, &mut fb, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "sphere_scene.png";
    if let Err(e) = fb.save_png(filename) {
        eprintln!("Failed to save image: {e}");
        return;
    }
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    // Floor
    scene.add(Plane::new(
        0.0,
        1.0,
        0.0,
        1.0,
        Material::new(Color::new(0.6, 0.6, 0.6)),
    ));

    scene.add(Sphere::new(
        DVec3::new(0.0, 0.0, 0.0),
        1.0,
        Material::new(Color::new(0.9, 0.2, 0.2)),
    ));
    scene.add(Sphere::new(
        DVec3::new(-2.2, -0.4, -1.0),
        0.6,
        Material::new(Color::new(0.2, 0.8, 0.3)),
    ));
    scene.add(Sphere::new(
        DVec3::new(2.0, -0.5, 0.5),
        0.5,
        Material::new(Color::new(0.2, 0.3, 0.9)),
    ));

    scene.add(Triangle::new(
        DVec3::new(-1.0, -1.0, -3.0),
        DVec3::new(1.5, -1.0, -3.5),
        DVec3::new(0.2, 1.8, -3.2),
        Material::new(Color::new(0.9, 0.8, 0.3)),
    ));

    scene.add_light(Light::directional(
        DVec3::new(-1.0, 2.0, 1.5),
        Color::new(0.9, 0.9, 0.8),
    ));
    scene.add_light(Light::point(
        DVec3::new(2.0, 2.5, 2.0),
        Color::new(6.0, 5.0, 4.0),
    ));

    println!("Created {} primitives", scene.len());
    scene
}
