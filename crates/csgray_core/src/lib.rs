//! csgray core - Solid geometry, materials and scene loading.
//!
//! This crate provides:
//!
//! - **Geometry**: `Sphere`, `HalfSpace`, `Cylinder`, `Transformation` and the
//!   four boolean combinations, all behind the `Node` tree and `RootObject`
//! - **Light**: `LightIntensity`, `Material`, `LightSource`
//! - **Composites**: cube, prism and triforce built from half-spaces
//! - **Loading**: JSON scene descriptions
//!
//! # Example
//!
//! ```ignore
//! use csgray_core::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} nodes, {} light sources",
//!     scene.root.child().node_count(),
//!     scene.sources.len());
//! ```

pub mod composite;
pub mod geometry;
pub mod light;
pub mod loader;

// Re-export commonly used types
pub use geometry::{
    Cylinder, HalfSpace, IntersectionPoint, Node, Operation, RootObject, Sphere, Transformation,
};
pub use light::{LightIntensity, LightSource, Material};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult, LoadedScene, RenderSettings, ScreenSettings};
