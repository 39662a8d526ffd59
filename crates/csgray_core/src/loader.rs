//! JSON scene loading.
//!
//! A scene file has four sections:
//!
//! ```json
//! {
//!   "screen":  {"dpi": 20, "dimensions": [16, 9], "position": [-8, -4.5, 0], "observer": [0, 0, -10]},
//!   "medium":  {"ambient": [0.1, 0.1, 0.1], "index": 1.0, "recursion": 4},
//!   "sources": [{"position": [0, 10, -5], "intensity": "white"}],
//!   "objects": [{"sphere": {"position": [0, 0, 5], "radius": 2, "index": 1.5, "color": {...}}}]
//! }
//! ```
//!
//! `objects` is an implicit union. Each object is a single-key map naming its
//! kind; transformations wrap a `subject` object and combinations hold a list.

use std::path::Path;

use csgray_math::{direction, Axis, DVec3};
use serde::Deserialize;
use thiserror::Error;

use crate::composite;
use crate::geometry::{Cylinder, HalfSpace, Node, RootObject, Sphere};
use crate::light::{LightIntensity, LightSource, Material};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown color name: {0}")]
    UnknownColor(String),

    #[error("{0} must not be the zero vector")]
    ZeroVector(&'static str),

    #[error("Scale factors must be non-zero, got {0:?}")]
    InvalidScale([f64; 3]),

    #[error("Rotation direction must be 0 (X), 1 (Y) or 2 (Z), got {0}")]
    InvalidRotationAxis(usize),

    #[error("Refractive index must be positive, got {0}")]
    InvalidIndex(f64),

    #[error("Screen dpi must be positive, got {0}")]
    InvalidDpi(f64),

    #[error("Screen dimensions must be positive, got {0:?}")]
    InvalidDimensions([f64; 2]),

    #[error("Observer must not lie in the screen plane z = {0}")]
    ObserverOnScreen(f64),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Global medium and recursion settings for light transport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Ambient light filling the whole scene
    pub ambient: LightIntensity,
    /// Refractive index of the medium outside every solid
    pub index: f64,
    /// Maximum number of secondary-ray bounces
    pub max_depth: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            ambient: LightIntensity::new(0.1, 0.1, 0.1),
            index: 1.0,
            max_depth: 5,
        }
    }
}

/// Image plane placement, in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSettings {
    /// Pixels per scene unit
    pub dpi: f64,
    pub width: f64,
    pub height: f64,
    /// Lower-left corner of the image plane
    pub position: DVec3,
    /// Eye point all primary rays start from
    pub observer: DVec3,
}

/// Everything a scene file describes.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub root: RootObject,
    pub sources: Vec<LightSource>,
    pub settings: RenderSettings,
    pub screen: ScreenSettings,
}

/// Load a scene description from a JSON file.
///
/// # Example
///
/// ```ignore
/// use csgray_core::load_scene;
///
/// let scene = load_scene("scenes/spheres.json")?;
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<LoadedScene> {
    let path = path.as_ref();
    log::info!("Loading scene {}", path.display());

    let content = std::fs::read_to_string(path)?;
    load_scene_from_str(&content)
}

/// Load a scene description from a JSON string (useful for testing).
pub fn load_scene_from_str(content: &str) -> LoadResult<LoadedScene> {
    let description: SceneDescription = serde_json::from_str(content)?;
    description.build()
}

// ============================================================================
// Description types
// ============================================================================

#[derive(Debug, Deserialize)]
struct SceneDescription {
    screen: ScreenDescription,
    medium: MediumDescription,
    #[serde(default)]
    sources: Vec<SourceDescription>,
    #[serde(default)]
    objects: Vec<ObjectDescription>,
}

#[derive(Debug, Deserialize)]
struct ScreenDescription {
    dpi: f64,
    dimensions: [f64; 2],
    position: [f64; 3],
    observer: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct MediumDescription {
    ambient: ColorDescription,
    index: f64,
    recursion: u32,
}

#[derive(Debug, Deserialize)]
struct SourceDescription {
    position: [f64; 3],
    intensity: ColorDescription,
}

/// Either `[r, g, b]` in [0, 1] or one of the named colors.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorDescription {
    Rgb([f32; 3]),
    Named(String),
}

#[derive(Debug, Deserialize)]
struct MaterialDescription {
    ambient: ColorDescription,
    diffuse: ColorDescription,
    specular: ColorDescription,
    reflected: ColorDescription,
    refracted: ColorDescription,
    shininess: f32,
}

#[derive(Debug, Deserialize)]
struct SphereDescription {
    #[serde(default)]
    position: [f64; 3],
    radius: f64,
    color: MaterialDescription,
    index: f64,
}

#[derive(Debug, Deserialize)]
struct HalfSpaceDescription {
    #[serde(default)]
    position: [f64; 3],
    normal: [f64; 3],
    color: MaterialDescription,
    index: f64,
}

#[derive(Debug, Deserialize)]
struct CylinderDescription {
    #[serde(default)]
    position: [f64; 3],
    radius: f64,
    axis: [f64; 3],
    color: MaterialDescription,
    index: f64,
}

#[derive(Debug, Deserialize)]
struct CubeDescription {
    #[serde(default)]
    position: [f64; 3],
    dimensions: [f64; 3],
    color: MaterialDescription,
    index: f64,
}

#[derive(Debug, Deserialize)]
struct CompositeDescription {
    #[serde(default)]
    position: [f64; 3],
    color: MaterialDescription,
    index: f64,
}

#[derive(Debug, Deserialize)]
struct AffineDescription {
    factors: [f64; 3],
    subject: Box<ObjectDescription>,
}

#[derive(Debug, Deserialize)]
struct RotationDescription {
    /// Degrees
    angle: f64,
    direction: usize,
    subject: Box<ObjectDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum ObjectDescription {
    Sphere(SphereDescription),
    HalfSpace(HalfSpaceDescription),
    Cylinder(CylinderDescription),
    Scaling(AffineDescription),
    Rotation(RotationDescription),
    Translation(AffineDescription),
    Union(Vec<ObjectDescription>),
    Intersection(Vec<ObjectDescription>),
    Exclusion(Vec<ObjectDescription>),
    Subtraction(Vec<ObjectDescription>),
    Cube(CubeDescription),
    Prism(CompositeDescription),
    Triforce(CompositeDescription),
}

// ============================================================================
// Conversion
// ============================================================================

impl SceneDescription {
    fn build(self) -> LoadResult<LoadedScene> {
        let screen = self.screen.build()?;
        let settings = self.medium.build()?;

        let sources = self
            .sources
            .iter()
            .map(SourceDescription::build)
            .collect::<LoadResult<Vec<_>>>()?;
        if sources.is_empty() {
            log::warn!("Scene has no light sources; only ambient light will be visible");
        }

        let objects = build_list(&self.objects)?;
        let root = RootObject::new(Node::Union(objects));

        log::info!(
            "Loaded {} light sources, {} nodes ({} primitives)",
            sources.len(),
            root.child().node_count(),
            root.child().primitive_count()
        );

        Ok(LoadedScene {
            root,
            sources,
            settings,
            screen,
        })
    }
}

impl ScreenDescription {
    fn build(&self) -> LoadResult<ScreenSettings> {
        if self.dpi <= 0.0 {
            return Err(LoadError::InvalidDpi(self.dpi));
        }
        if self.dimensions.iter().any(|&d| d <= 0.0) {
            return Err(LoadError::InvalidDimensions(self.dimensions));
        }
        if self.observer[2] == self.position[2] {
            return Err(LoadError::ObserverOnScreen(self.position[2]));
        }

        Ok(ScreenSettings {
            dpi: self.dpi,
            width: self.dimensions[0],
            height: self.dimensions[1],
            position: DVec3::from_array(self.position),
            observer: DVec3::from_array(self.observer),
        })
    }
}

impl MediumDescription {
    fn build(&self) -> LoadResult<RenderSettings> {
        Ok(RenderSettings {
            ambient: self.ambient.build()?,
            index: checked_index(self.index)?,
            max_depth: self.recursion,
        })
    }
}

impl SourceDescription {
    fn build(&self) -> LoadResult<LightSource> {
        Ok(LightSource::new(
            DVec3::from_array(self.position),
            self.intensity.build()?,
        ))
    }
}

impl ColorDescription {
    fn build(&self) -> LoadResult<LightIntensity> {
        match self {
            ColorDescription::Rgb(rgb) => Ok(LightIntensity::from(*rgb)),
            ColorDescription::Named(name) => {
                LightIntensity::named(name).ok_or_else(|| LoadError::UnknownColor(name.clone()))
            }
        }
    }
}

impl MaterialDescription {
    fn build(&self) -> LoadResult<Material> {
        Ok(Material {
            ambient: self.ambient.build()?,
            diffuse: self.diffuse.build()?,
            specular: self.specular.build()?,
            reflected: self.reflected.build()?,
            refracted: self.refracted.build()?,
            shininess: self.shininess,
        })
    }
}

impl ObjectDescription {
    fn build(&self) -> LoadResult<Node> {
        let node = match self {
            ObjectDescription::Sphere(sphere) => {
                let node = Node::from(Sphere::new(sphere.color.build()?, checked_index(sphere.index)?));
                let node = scaled(node, DVec3::splat(sphere.radius))?;
                translated(node, sphere.position)
            }
            ObjectDescription::HalfSpace(half_space) => {
                let normal = nonzero(half_space.normal, "half-space normal")?;
                let node = Node::from(HalfSpace::new(
                    half_space.color.build()?,
                    checked_index(half_space.index)?,
                    direction(normal.x, normal.y, normal.z),
                ));
                translated(node, half_space.position)
            }
            ObjectDescription::Cylinder(cylinder) => {
                let axis = nonzero(cylinder.axis, "cylinder axis")?.normalize();
                let node = Node::from(Cylinder::new(cylinder.color.build()?, checked_index(cylinder.index)?));
                let node = scaled(node, DVec3::new(cylinder.radius, cylinder.radius, 1.0))?;
                translated(aligned_with_z(node, axis), cylinder.position)
            }
            ObjectDescription::Scaling(scaling) => {
                let factors = DVec3::from_array(scaling.factors);
                if factors.cmpeq(DVec3::ZERO).any() {
                    return Err(LoadError::InvalidScale(scaling.factors));
                }
                scaling.subject.build()?.scaled(factors)
            }
            ObjectDescription::Rotation(rotation) => {
                let axis = Axis::from_index(rotation.direction)
                    .ok_or(LoadError::InvalidRotationAxis(rotation.direction))?;
                rotation.subject.build()?.rotated(axis, rotation.angle.to_radians())
            }
            ObjectDescription::Translation(translation) => translation
                .subject
                .build()?
                .translated(DVec3::from_array(translation.factors)),
            ObjectDescription::Union(children) => Node::Union(build_list(children)?),
            ObjectDescription::Intersection(children) => Node::Intersection(build_list(children)?),
            ObjectDescription::Exclusion(children) => Node::Exclusion(build_list(children)?),
            ObjectDescription::Subtraction(children) => Node::Subtraction(build_list(children)?),
            ObjectDescription::Cube(cube) => {
                let node = composite::cube(cube.color.build()?, checked_index(cube.index)?);
                let node = scaled(node, DVec3::from_array(cube.dimensions))?;
                translated(node, cube.position)
            }
            ObjectDescription::Prism(prism) => {
                let node = composite::prism(prism.color.build()?, checked_index(prism.index)?);
                translated(node, prism.position)
            }
            ObjectDescription::Triforce(triforce) => {
                let node = composite::triforce(triforce.color.build()?, checked_index(triforce.index)?);
                translated(node, triforce.position)
            }
        };

        log::debug!("Built {} ({} nodes)", node.kind(), node.node_count());
        Ok(node)
    }
}

fn build_list(descriptions: &[ObjectDescription]) -> LoadResult<Vec<Node>> {
    descriptions.iter().map(ObjectDescription::build).collect()
}

fn checked_index(index: f64) -> LoadResult<f64> {
    if index > 0.0 {
        Ok(index)
    } else {
        Err(LoadError::InvalidIndex(index))
    }
}

fn nonzero(v: [f64; 3], what: &'static str) -> LoadResult<DVec3> {
    let v = DVec3::from_array(v);
    if v == DVec3::ZERO {
        Err(LoadError::ZeroVector(what))
    } else {
        Ok(v)
    }
}

/// Scale unless `factors` is the identity.
fn scaled(node: Node, factors: DVec3) -> LoadResult<Node> {
    if factors == DVec3::ONE {
        return Ok(node);
    }
    if factors.cmpeq(DVec3::ZERO).any() {
        return Err(LoadError::InvalidScale(factors.to_array()));
    }
    Ok(node.scaled(factors))
}

/// Translate unless `offset` is zero.
fn translated(node: Node, offset: [f64; 3]) -> Node {
    let offset = DVec3::from_array(offset);
    if offset == DVec3::ZERO {
        node
    } else {
        node.translated(offset)
    }
}

/// Rotate `node` so that its local z axis points along the unit `axis`.
///
/// Rotating about X by `alpha` then about Y by `beta` takes z to
/// `(cos(alpha) sin(beta), -sin(alpha), cos(alpha) cos(beta))`.
fn aligned_with_z(node: Node, axis: DVec3) -> Node {
    if axis.z.abs() >= 1.0 - csgray_math::EPSILON {
        return node;
    }

    let alpha = (-axis.y).clamp(-1.0, 1.0).asin();
    let beta = axis.x.atan2(axis.z);
    node.rotated(Axis::X, alpha).rotated(Axis::Y, beta)
}
