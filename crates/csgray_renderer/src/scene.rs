//! Recursive Whitted-style light transport.
//!
//! For every ray the nearest hit is shaded with ambient, diffuse and specular
//! terms from each visible light, then reflected and refracted rays are traced
//! until the maximum recursion depth is reached.

use csgray_core::{IntersectionPoint, LightIntensity, LightSource, RenderSettings, RootObject};
use csgray_math::{Ray, EPSILON};

/// Refractive indices of the solids a ray is currently inside.
///
/// One stack belongs to one primary ray. It is passed down the recursion by
/// value so that sibling branches never see each other's media.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediumStack {
    entered: Vec<f64>,
}

impl MediumStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of solids currently entered.
    pub fn depth(&self) -> usize {
        self.entered.len()
    }

    /// Index of the most recently entered medium still open.
    pub fn current(&self) -> Option<f64> {
        self.entered.last().copied()
    }

    /// Cross into a solid of refractive index `index`.
    ///
    /// Returns the stack on the far side and the index to refract into.
    pub fn enter(&self, index: f64) -> (MediumStack, f64) {
        let mut next = self.clone();
        next.entered.push(index);
        (next, index)
    }

    /// Leave a solid of refractive index `index`.
    ///
    /// Removes the most recent occurrence of `index` and returns the stack on
    /// the far side together with the index to refract into: the innermost
    /// medium still open, or `outside` when none remain.
    pub fn exit(&self, index: f64, outside: f64) -> (MediumStack, f64) {
        let mut next = self.clone();
        match next.entered.iter().rposition(|&n| (n - index).abs() < EPSILON) {
            Some(position) => {
                next.entered.remove(position);
            }
            None => log::trace!("Left a medium of index {index} that was never entered"),
        }

        let refracted = next.current().unwrap_or(outside);
        (next, refracted)
    }
}

/// A renderable scene: geometry, lights and global medium.
#[derive(Debug, Clone)]
pub struct Scene {
    root: RootObject,
    sources: Vec<LightSource>,
    settings: RenderSettings,
}

impl Scene {
    pub fn new(root: RootObject, sources: Vec<LightSource>, settings: RenderSettings) -> Self {
        Self {
            root,
            sources,
            settings,
        }
    }

    pub fn root(&self) -> &RootObject {
        &self.root
    }

    pub fn sources(&self) -> &[LightSource] {
        &self.sources
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Light arriving along `ray`, seen at recursion depth `depth`.
    ///
    /// Primary rays start at depth 0 outside every solid. The result is in
    /// [0, 1] per channel.
    pub fn trace_ray(&self, ray: &Ray, depth: u32) -> LightIntensity {
        self.trace(ray, depth, &MediumStack::new())
    }

    fn trace(&self, ray: &Ray, depth: u32, media: &MediumStack) -> LightIntensity {
        let Some(hit) = self.root.intersect(ray) else {
            return LightIntensity::BLACK;
        };
        let material = hit.material;

        let mut value = material.ambient * self.settings.ambient;
        for source in &self.sources {
            value += self.direct_light(ray, &hit, source);
        }

        if depth >= self.settings.max_depth || !material.spawns_secondary_rays() {
            return value;
        }

        if !material.reflected.is_black() {
            let reflection = ray.reflect(hit.point, hit.normal);
            value += material.reflected * self.trace(&reflection, depth + 1, media);
        }

        if !material.refracted.is_black() {
            let (beyond, n2) = if hit.inside {
                media.exit(hit.index, self.settings.index)
            } else {
                media.enter(hit.index)
            };

            // Otherwise total internal reflection: the mirror term above covers it.
            if ray.can_refract(hit.normal, n2) {
                let refraction = ray.refract(hit.point, hit.normal, n2);
                value += material.refracted * self.trace(&refraction, depth + 1, &beyond);
            }
        }

        value
    }

    /// Diffuse and specular light from one source, or black when the source
    /// is behind the surface or shadowed.
    fn direct_light(&self, ray: &Ray, hit: &IntersectionPoint, source: &LightSource) -> LightIntensity {
        let to_light = source.position() - hit.point;
        let distance = to_light.length();

        if distance < EPSILON || to_light.dot(hit.normal) < 0.0 {
            return LightIntensity::BLACK;
        }

        let shadow_ray = Ray::new(hit.point, to_light, ray.index());
        if let Some(blocker) = self.root.intersect(&shadow_ray) {
            if blocker.distance < distance {
                return LightIntensity::BLACK;
            }
        }

        let material = &hit.material;
        let light = source.intensity();

        let cos_incidence = shadow_ray.direction().dot(hit.normal).max(0.0);
        let mut value = (cos_incidence as f32) * (material.diffuse * light);

        let reflected_light = (-shadow_ray).reflect(hit.point, hit.normal);
        let cos_view = reflected_light.direction().dot(-ray.direction());
        if cos_view > 0.0 {
            let highlight = cos_view.powf(f64::from(material.shininess));
            value += (highlight as f32) * (material.specular * light);
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csgray_core::{HalfSpace, Material, Node, Sphere};
    use csgray_math::{direction, point, DVec3};

    fn settings(max_depth: u32) -> RenderSettings {
        RenderSettings {
            ambient: LightIntensity::new(0.2, 0.2, 0.2),
            index: 1.0,
            max_depth,
        }
    }

    fn sphere_scene(material: Material, sources: Vec<LightSource>, max_depth: u32) -> Scene {
        let sphere = Node::from(Sphere::new(material, 1.5)).translated(DVec3::new(0.0, 0.0, 5.0));
        Scene::new(RootObject::new(sphere), sources, settings(max_depth))
    }

    fn forward_ray() -> Ray {
        Ray::new(point(0.0, 0.0, 0.0), direction(0.0, 0.0, 1.0), 1.0)
    }

    fn shiny(reflected: LightIntensity, refracted: LightIntensity) -> Material {
        Material {
            ambient: LightIntensity::GRAY,
            diffuse: LightIntensity::new(0.5, 0.4, 0.3),
            specular: LightIntensity::WHITE,
            reflected,
            refracted,
            shininess: 20.0,
        }
    }

    #[test]
    fn test_miss_is_black() {
        let scene = sphere_scene(Material::matte(LightIntensity::RED), Vec::new(), 3);
        let ray = Ray::new(point(0.0, 0.0, 0.0), direction(0.0, 1.0, 0.0), 1.0);
        assert!(scene.trace_ray(&ray, 0).is_black());
    }

    #[test]
    fn test_ambient_only() {
        let scene = sphere_scene(Material::matte(LightIntensity::WHITE), Vec::new(), 0);
        let value = scene.trace_ray(&forward_ray(), 0);
        assert!((value.at(0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_head_on_diffuse_and_specular() {
        // Light behind the eye: cos = 1 for both terms.
        let light = LightSource::new(DVec3::new(0.0, 0.0, -10.0), LightIntensity::WHITE);
        let material = Material {
            ambient: LightIntensity::BLACK,
            diffuse: LightIntensity::new(0.5, 0.0, 0.0),
            specular: LightIntensity::new(0.0, 0.0, 0.25),
            shininess: 3.0,
            ..Default::default()
        };
        let scene = sphere_scene(material, vec![light], 0);

        let value = scene.trace_ray(&forward_ray(), 0);
        assert!((value.at(0) - 0.5).abs() < 1e-6);
        assert!(value.at(1).abs() < 1e-6);
        assert!((value.at(2) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_light_behind_surface() {
        let light = LightSource::new(DVec3::new(0.0, 0.0, 20.0), LightIntensity::WHITE);
        let material = Material {
            diffuse: LightIntensity::WHITE,
            specular: LightIntensity::WHITE,
            ..Default::default()
        };
        let scene = sphere_scene(material, vec![light], 0);
        assert!(scene.trace_ray(&forward_ray(), 0).is_black());
    }

    #[test]
    fn test_shadow() {
        // A small sphere between the hit point and the light.
        let material = Material {
            diffuse: LightIntensity::WHITE,
            ..Default::default()
        };
        let floor = Node::from(HalfSpace::new(material, 1.0, direction(0.0, 1.0, 0.0)));
        let blocker = Node::from(Sphere::new(material, 1.0)).translated(DVec3::new(0.0, 5.0, 0.0));
        let light = LightSource::new(DVec3::new(0.0, 10.0, 0.0), LightIntensity::WHITE);

        let ray = Ray::new(point(0.0, 1.0, -1.0), direction(0.0, -1.0, 1.0), 1.0);

        let lit = Scene::new(RootObject::new(floor.clone()), vec![light], settings(0));
        assert!((lit.trace_ray(&ray, 0).at(0) - 1.0).abs() < 1e-6);

        let shadowed = Scene::new(RootObject::new(Node::Union(vec![floor, blocker])), vec![light], settings(0));
        assert!(shadowed.trace_ray(&ray, 0).is_black());
    }

    #[test]
    fn test_light_past_blocker_is_not_shadowed() {
        // The sphere lies beyond the light, so it must not cast a shadow.
        let material = Material {
            diffuse: LightIntensity::WHITE,
            ..Default::default()
        };
        let floor = Node::from(HalfSpace::new(material, 1.0, direction(0.0, 1.0, 0.0)));
        let beyond = Node::from(Sphere::new(material, 1.0)).translated(DVec3::new(0.0, 20.0, 0.0));
        let light = LightSource::new(DVec3::new(0.0, 10.0, 0.0), LightIntensity::WHITE);
        let scene = Scene::new(RootObject::new(Node::Union(vec![floor, beyond])), vec![light], settings(0));

        let ray = Ray::new(point(0.0, 1.0, -1.0), direction(0.0, -1.0, 1.0), 1.0);
        assert!((scene.trace_ray(&ray, 0).at(0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_distance_light() {
        // Light exactly on the front of the sphere, where the ray hits.
        let light = LightSource::new(DVec3::new(0.0, 0.0, 4.0), LightIntensity::WHITE);
        let scene = sphere_scene(shiny(LightIntensity::BLACK, LightIntensity::BLACK), vec![light], 0);

        let value = scene.trace_ray(&forward_ray(), 0);
        assert!(value.rgb().is_finite());
        let ambient_only = LightIntensity::GRAY * LightIntensity::new(0.2, 0.2, 0.2);
        assert_eq!(value, ambient_only);
    }

    #[test]
    fn test_max_depth_ignores_secondary_coefficients() {
        let light = LightSource::new(DVec3::new(3.0, 3.0, -3.0), LightIntensity::WHITE);
        let mirror = sphere_scene(shiny(LightIntensity::WHITE, LightIntensity::WHITE), vec![light], 2);
        let matte = sphere_scene(shiny(LightIntensity::BLACK, LightIntensity::BLACK), vec![light], 2);

        let ray = forward_ray();
        assert_eq!(mirror.trace_ray(&ray, 2), matte.trace_ray(&ray, 2));
        assert_ne!(mirror.trace_ray(&ray, 0), matte.trace_ray(&ray, 0));
    }

    #[test]
    fn test_matte_surface_independent_of_depth() {
        let light = LightSource::new(DVec3::new(3.0, 3.0, -3.0), LightIntensity::WHITE);
        let material = shiny(LightIntensity::BLACK, LightIntensity::BLACK);
        assert!(!material.spawns_secondary_rays());

        let shallow = sphere_scene(material, vec![light], 0);
        let deep = sphere_scene(material, vec![light], 8);
        assert_eq!(shallow.trace_ray(&forward_ray(), 0), deep.trace_ray(&forward_ray(), 0));
    }

    #[test]
    fn test_glass_sphere_shows_background() {
        // Looking through a clear sphere at a lit floor behind it.
        let glass = Material {
            refracted: LightIntensity::WHITE,
            ..Default::default()
        };
        let wall_material = Material {
            ambient: LightIntensity::WHITE,
            ..Default::default()
        };
        let sphere = Node::from(Sphere::new(glass, 1.5)).translated(DVec3::new(0.0, 0.0, 5.0));
        let wall = Node::from(HalfSpace::new(wall_material, 1.0, direction(0.0, 0.0, -1.0)))
            .translated(DVec3::new(0.0, 0.0, 10.0));
        let root = RootObject::new(Node::Union(vec![sphere, wall]));

        let ray = forward_ray();
        let shallow = Scene::new(root.clone(), Vec::new(), settings(1));
        let deep = Scene::new(root, Vec::new(), settings(2));

        // One bounce only reaches the sphere's back face; two reach the wall.
        assert!(shallow.trace_ray(&ray, 0).is_black());
        assert!((deep.trace_ray(&ray, 0).at(0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_medium_stack_enter_exit() {
        let outside = 1.0;
        let stack = MediumStack::new();

        let (in_glass, n) = stack.enter(1.5);
        assert_eq!(n, 1.5);
        let (in_both, n) = in_glass.enter(1.33);
        assert_eq!(n, 1.33);
        assert_eq!(in_both.depth(), 2);

        // Leaving the glass while still in water refracts into water.
        let (in_water, n) = in_both.exit(1.5, outside);
        assert_eq!(n, 1.33);
        assert_eq!(in_water.current(), Some(1.33));

        let (out, n) = in_water.exit(1.33, outside);
        assert_eq!(n, outside);
        assert_eq!(out.depth(), 0);

        // Threaded by value: the starting stack is untouched.
        assert_eq!(stack.depth(), 0);
        assert_eq!(in_both.depth(), 2);
    }

    #[test]
    fn test_medium_stack_removes_one_occurrence() {
        let (stack, _) = MediumStack::new().enter(1.5);
        let (stack, _) = stack.enter(1.5);

        let (stack, n) = stack.exit(1.5, 1.0);
        assert_eq!(n, 1.5);
        assert_eq!(stack.depth(), 1);

        // Exiting a medium never entered leaves the stack alone.
        let (stack, n) = stack.exit(2.4, 1.0);
        assert_eq!(n, 1.5);
        assert_eq!(stack.depth(), 1);
    }
}
