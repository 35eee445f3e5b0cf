//! Surface shading.
//!
//! [`PhongShader`] evaluates the Phong reflection model per light, with
//! partially transparent shadows, then recurses into mirror reflection and
//! straight-through refraction while the accumulated attenuation stays
//! significant.

use vista_core::color::BLACK;
use vista_core::{Color, Light, Material};
use vista_math::{align_zero, Point3, Vec3};

use crate::{Intersectable, Intersection, Ray, Scene};

/// Computes the color leaving an intersection toward the ray origin.
pub trait Shader: Send + Sync {
    fn shade(&self, scene: &Scene, hit: &Intersection<'_>, ray: &Ray) -> Color;
}

/// Recursion limit for secondary rays.
pub const MAX_LEVEL: u32 = 10;

/// Contributions attenuated below this are dropped.
pub const MIN_K: f64 = 0.001;

/// Phong shading with shadows, reflection and refraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongShader {
    max_level: u32,
    min_k: f64,
}

impl Default for PhongShader {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            min_k: MIN_K,
        }
    }
}

impl PhongShader {
    pub fn new(max_level: u32, min_k: f64) -> Self {
        Self { max_level, min_k }
    }

    fn significant(&self, k: Color) -> bool {
        k.max_element() > self.min_k
    }

    fn calc_color(
        &self,
        scene: &Scene,
        hit: &Intersection<'_>,
        ray: &Ray,
        level: u32,
        k: Color,
    ) -> Color {
        let color = hit.geometry.emission() + self.local_effects(scene, hit, ray, k);
        if level <= 1 {
            return color;
        }
        color + self.global_effects(scene, hit, ray, level, k)
    }

    fn local_effects(&self, scene: &Scene, hit: &Intersection<'_>, ray: &Ray, k: Color) -> Color {
        let point = hit.point;
        let n = hit.geometry.normal(point);
        let v = ray.direction();
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return BLACK;
        }

        let material = hit.geometry.material();
        let mut color = BLACK;
        for light in scene.lights() {
            let Some(l) = light.direction_to(point) else {
                continue;
            };
            let nl = align_zero(n.dot(l));
            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(scene, light, l, n, point);
            if self.significant(ktr * k) {
                let intensity = light.intensity_at(point) * ktr;
                color += intensity * (diffuse(material, nl) + specular(material, n, l, nl, v));
            }
        }
        color
    }

    /// Product of `kt` over every occluder between `point` and the light.
    fn transparency(&self, scene: &Scene, light: &Light, l: Vec3, n: Vec3, point: Point3) -> Color {
        let Ok(shadow_ray) = Ray::with_offset(point, -l, n) else {
            return Color::ONE;
        };
        let Some(occluders) = scene
            .geometries()
            .intersect(&shadow_ray, light.distance_to(point))
        else {
            return Color::ONE;
        };

        let mut ktr = Color::ONE;
        for occluder in occluders {
            ktr *= occluder.geometry.material().kt;
            if !self.significant(ktr) {
                return BLACK;
            }
        }
        ktr
    }

    fn global_effects(
        &self,
        scene: &Scene,
        hit: &Intersection<'_>,
        ray: &Ray,
        level: u32,
        k: Color,
    ) -> Color {
        let material = hit.geometry.material();
        let n = hit.geometry.normal(hit.point);
        let v = ray.direction();
        let mut color = BLACK;

        let kr = material.kr * k;
        if self.significant(kr) {
            let reflected = v - n * (2.0 * v.dot(n));
            if let Ok(reflected_ray) = Ray::with_offset(hit.point, reflected, n) {
                color += self.secondary(scene, &reflected_ray, level - 1, kr) * material.kr;
            }
        }

        let kt = material.kt * k;
        if self.significant(kt) {
            if let Ok(refracted_ray) = Ray::with_offset(hit.point, v, n) {
                color += self.secondary(scene, &refracted_ray, level - 1, kt) * material.kt;
            }
        }

        color
    }

    fn secondary(&self, scene: &Scene, ray: &Ray, level: u32, k: Color) -> Color {
        match scene.closest_intersection(ray) {
            Some(hit) => self.calc_color(scene, &hit, ray, level, k),
            None => scene.background(),
        }
    }
}

impl Shader for PhongShader {
    fn shade(&self, scene: &Scene, hit: &Intersection<'_>, ray: &Ray) -> Color {
        self.calc_color(scene, hit, ray, self.max_level, Color::ONE)
            + scene.ambient_light() * hit.geometry.material().ka
    }
}

fn diffuse(material: &Material, nl: f64) -> Color {
    material.kd * nl.abs()
}

fn specular(material: &Material, n: Vec3, l: Vec3, nl: f64, v: Vec3) -> Color {
    let r = l - n * (2.0 * nl);
    let minus_vr = -align_zero(r.dot(v));
    if minus_vr <= 0.0 {
        return BLACK;
    }
    material.ks * minus_vr.powi(material.shininess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometry, Plane, Sphere};

    fn floor(material: Material) -> Geometry {
        Geometry::new(Plane::new(Vec3::ZERO, Vec3::Y).unwrap()).with_material(material)
    }

    fn shade_from_above(scene: &Scene) -> Color {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y).unwrap();
        let hit = scene.closest_intersection(&ray).unwrap();
        PhongShader::default().shade(scene, &hit, &ray)
    }

    #[test]
    fn test_ambient_only() {
        let scene = Scene::new("ambient")
            .with_ambient_light(Color::splat(0.2))
            .with_geometry(floor(Material::default()));
        assert!((shade_from_above(&scene) - Color::splat(0.2)).length() < 1e-12);
    }

    #[test]
    fn test_diffuse_light_from_above() {
        let scene = Scene::new("lit")
            .with_light(Light::directional(Color::ONE, -Vec3::Y).unwrap())
            .with_geometry(floor(Material::diffuse(Color::splat(0.5))));

        // n·l = -1 with the light shining straight down
        let color = shade_from_above(&scene);
        assert!((color - Color::splat(0.5)).length() < 1e-9);
    }

    #[test]
    fn test_light_below_surface_contributes_nothing() {
        let scene = Scene::new("backlit")
            .with_light(Light::directional(Color::ONE, Vec3::Y).unwrap())
            .with_geometry(floor(Material::diffuse(Color::ONE)));
        assert_eq!(shade_from_above(&scene), BLACK);
    }

    #[test]
    fn test_zero_attenuation_contributes_nothing() {
        let scene = Scene::new("dark")
            .with_light(
                Light::point(Color::ONE, Vec3::new(0.0, 3.0, 0.0)).with_attenuation(0.0, 0.0, 0.0),
            )
            .with_geometry(floor(Material::diffuse(Color::ONE)));
        assert_eq!(shade_from_above(&scene), BLACK);
    }

    #[test]
    fn test_opaque_occluder_casts_shadow() {
        let blocker = Geometry::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5).unwrap());
        let scene = Scene::new("shadow")
            .with_light(Light::point(Color::ONE, Vec3::new(0.0, 4.0, 0.0)))
            .with_geometry(floor(Material::diffuse(Color::ONE)))
            .with_geometry(blocker);

        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::new(-3.0, -5.0, 0.0)).unwrap();
        let hit = scene.closest_intersection(&ray).unwrap();
        assert!(hit.point.length() < 1e-9);
        assert_eq!(PhongShader::default().shade(&scene, &hit, &ray), BLACK);
    }

    #[test]
    fn test_transparent_occluder_dims_light() {
        let blocker = Geometry::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5).unwrap())
            .with_material(Material::default().with_transparency(Color::splat(0.5)));
        let scene = Scene::new("tinted")
            .with_light(Light::directional(Color::ONE, -Vec3::Y).unwrap())
            .with_geometry(floor(Material::diffuse(Color::ONE)))
            .with_geometry(blocker);

        let ray = Ray::new(Vec3::new(3.0, 5.0, 0.0), Vec3::new(-3.0, -5.0, 0.0)).unwrap();
        let hit = scene.closest_intersection(&ray).unwrap();
        let color = PhongShader::default().shade(&scene, &hit, &ray);

        // The shadow ray crosses the sphere twice: 0.5 · 0.5
        assert!((color - Color::splat(0.25)).length() < 1e-9);
    }

    #[test]
    fn test_mirror_reflects_background() {
        let scene = Scene::new("mirror")
            .with_background(Color::new(0.0, 0.0, 1.0))
            .with_geometry(floor(Material {
                ka: Color::ZERO,
                kr: Color::ONE,
                ..Material::default()
            }));
        let color = shade_from_above(&scene);
        assert!((color - Color::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_recursion_stops_at_max_level() {
        // Two facing mirrors bounce forever without a level limit
        let scene = Scene::new("hall of mirrors")
            .with_background(Color::ONE)
            .with_geometry(floor(Material::default().with_reflection(Color::ONE)))
            .with_geometry(
                Geometry::new(Plane::new(Vec3::new(0.0, 10.0, 0.0), -Vec3::Y).unwrap())
                    .with_material(Material::default().with_reflection(Color::ONE)),
            );
        let color = shade_from_above(&scene);
        assert!(color.is_finite());
    }
}
