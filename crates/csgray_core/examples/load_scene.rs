//! Example: Load and inspect a scene description.
//!
//! Run with: cargo run --example load_scene -- scenes/csg.json

use std::env;

use csgray_core::{load_scene, Node};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene-json>");
        println!("\nExamples:");
        println!("  cargo run --example load_scene -- scenes/spheres.json");
        println!("  cargo run --example load_scene -- scenes/csg.json");
        println!("  cargo run --example load_scene -- scenes/triforce.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let screen = &scene.screen;
            println!("\n=== Screen ===");
            println!(
                "  {} x {} units at {} dpi, lower-left ({:.2}, {:.2}, {:.2})",
                screen.width, screen.height, screen.dpi, screen.position.x, screen.position.y, screen.position.z
            );
            println!(
                "  Observer at ({:.2}, {:.2}, {:.2})",
                screen.observer.x, screen.observer.y, screen.observer.z
            );

            let settings = &scene.settings;
            println!("\n=== Medium ===");
            println!("  Ambient: {:?}", settings.ambient.rgb());
            println!("  Index: {}", settings.index);
            println!("  Max depth: {}", settings.max_depth);

            println!("\n--- Light sources ---");
            for (i, source) in scene.sources.iter().enumerate() {
                let p = source.position();
                println!(
                    "  [{}] at ({:.2}, {:.2}, {:.2}), intensity {:?}",
                    i,
                    p.x,
                    p.y,
                    p.z,
                    source.intensity().rgb()
                );
            }

            let root = scene.root.child();
            println!("\n--- Objects ---");
            println!("Nodes: {}", root.node_count());
            println!("Primitives: {}", root.primitive_count());
            print_tree(root, 1);
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_tree(node: &Node, level: usize) {
    println!("{}{}", "  ".repeat(level), node.kind());
    match node {
        Node::Transformation(transformation) => print_tree(transformation.child(), level + 1),
        Node::Union(children)
        | Node::Intersection(children)
        | Node::Exclusion(children)
        | Node::Subtraction(children) => {
            for child in children {
                print_tree(child, level + 1);
            }
        }
        Node::Sphere(_) | Node::HalfSpace(_) | Node::Cylinder(_) => {}
    }
}
