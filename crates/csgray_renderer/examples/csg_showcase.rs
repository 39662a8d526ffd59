//! CSG showcase example.
//!
//! Builds a scene in code: a lens carved from two spheres, a hollowed cube
//! and a glass triforce over a mirror floor. Saves it as PNG.

use csgray_core::composite;
use csgray_core::{HalfSpace, LightIntensity, LightSource, Material, Node, RenderSettings, RootObject, Sphere};
use csgray_math::{direction, Axis, DVec3};
use csgray_renderer::{render, Scene, Screen};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("csgray - CSG Showcase");
    println!("=====================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!(
        "Scene built in {:?} ({} primitives)",
        start.elapsed(),
        scene.root().child().primitive_count()
    );

    let screen = Screen::new(
        40.0,
        16.0,
        9.0,
        DVec3::new(-8.0, -3.5, 0.0),
        DVec3::new(0.0, 1.0, -15.0),
    );

    println!("Rendering {}x{}...", screen.image_width(), screen.image_height());
    let start = std::time::Instant::now();
    let image = render(&scene, &screen).expect("Failed to render");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "csg_showcase.png";
    image.save_png(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let glass = Material {
        ambient: LightIntensity::new(0.05, 0.05, 0.05),
        specular: LightIntensity::WHITE,
        reflected: LightIntensity::new(0.1, 0.1, 0.1),
        refracted: LightIntensity::new(0.9, 0.9, 0.9),
        shininess: 60.0,
        ..Default::default()
    };
    let mirror = Material {
        ambient: LightIntensity::new(0.1, 0.1, 0.1),
        diffuse: LightIntensity::new(0.2, 0.2, 0.2),
        reflected: LightIntensity::new(0.6, 0.6, 0.6),
        ..Default::default()
    };
    let gold = Material {
        specular: LightIntensity::new(0.8, 0.8, 0.8),
        shininess: 25.0,
        ..Material::matte(LightIntensity::GOLD)
    };
    let teal = Material::matte(LightIntensity::TEAL);

    // Lens: intersection of two offset spheres.
    let lens = Node::Intersection(vec![
        Node::from(Sphere::new(glass, 1.5))
            .scaled(DVec3::splat(2.0))
            .translated(DVec3::new(0.0, 0.0, 1.5)),
        Node::from(Sphere::new(glass, 1.5))
            .scaled(DVec3::splat(2.0))
            .translated(DVec3::new(0.0, 0.0, -1.5)),
    ])
    .translated(DVec3::new(-4.5, 1.5, 2.0));

    // Cube hollowed by a sphere that breaks through every face.
    let hollow_cube = Node::Subtraction(vec![
        composite::cube(gold, 1.0).scaled(DVec3::splat(2.5)),
        Node::from(Sphere::new(teal, 1.0)).scaled(DVec3::splat(1.6)),
    ])
    .rotated(Axis::Y, 35f64.to_radians())
    .translated(DVec3::new(0.0, 1.25, 4.0));

    let triforce = composite::triforce(glass, 1.5)
        .scaled(DVec3::new(1.5, 1.5, 0.5))
        .translated(DVec3::new(4.5, 1.5, 2.0));

    let floor = Node::from(HalfSpace::new(mirror, 1.0, direction(0.0, 1.0, 0.0)));

    let root = RootObject::new(Node::Union(vec![lens, hollow_cube, triforce, floor]));

    let sources = vec![
        LightSource::new(DVec3::new(-6.0, 10.0, -8.0), LightIntensity::WHITE),
        LightSource::new(DVec3::new(8.0, 6.0, -4.0), LightIntensity::new(0.4, 0.4, 0.5)),
    ];

    let settings = RenderSettings {
        ambient: LightIntensity::new(0.3, 0.3, 0.3),
        index: 1.0,
        max_depth: 5,
    };

    Scene::new(root, sources, settings)
}
