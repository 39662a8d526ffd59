//! csgray renderer - Whitted-style ray tracing of CSG scenes.
//!
//! One primary ray per pixel is traced recursively: ambient, diffuse and
//! specular terms from point lights with hard shadows, plus mirror
//! reflection and refraction through nested transparent media.

mod camera;
mod renderer;
mod scene;

pub use camera::Screen;
pub use renderer::{render, render_pixel, ImageBuffer, RenderError, RenderResult};
pub use scene::{MediumStack, Scene};

/// Re-export the core types a renderer caller needs
pub use csgray_core::{LightIntensity, LightSource, LoadedScene, RenderSettings, RootObject};
