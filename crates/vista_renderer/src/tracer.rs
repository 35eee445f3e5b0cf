//! Ray tracer: resolves a ray to a color.

use vista_core::Color;

use crate::{PhongShader, Ray, Scene, Shader};

/// Anything that can turn a primary ray into a color.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Closest-hit tracer: background on a miss, otherwise the shader's color
/// for the nearest intersection.
pub struct SimpleRayTracer<S = PhongShader> {
    scene: Scene,
    shader: S,
}

impl SimpleRayTracer<PhongShader> {
    /// Tracer with the default Phong shader.
    pub fn phong(scene: Scene) -> Self {
        Self::new(scene, PhongShader::default())
    }
}

impl<S: Shader> SimpleRayTracer<S> {
    pub fn new(scene: Scene, shader: S) -> Self {
        Self { scene, shader }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl<S: Shader> RayTracer for SimpleRayTracer<S> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.scene.closest_intersection(ray) {
            Some(hit) => self.shader.shade(&self.scene, &hit, ray),
            None => self.scene.background(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Geometry, Intersection, Sphere};
    use vista_math::Vec3;

    /// Encodes the hit distance in the red channel.
    struct DistanceShader;

    impl Shader for DistanceShader {
        fn shade(&self, _scene: &Scene, hit: &Intersection<'_>, _ray: &Ray) -> Color {
            Color::new(hit.distance, 0.0, 0.0)
        }
    }

    fn scene() -> Scene {
        Scene::new("tracer")
            .with_background(Color::new(0.0, 0.0, 1.0))
            .with_geometry(Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0).unwrap()))
    }

    #[test]
    fn test_miss_returns_background() {
        let tracer = SimpleRayTracer::new(scene(), DistanceShader);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y).unwrap();
        assert_eq!(tracer.trace_ray(&ray), Color::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_hit_shades_closest_intersection() {
        let tracer = SimpleRayTracer::new(scene(), DistanceShader);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let color = tracer.trace_ray(&ray);
        assert!((color.x - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_phong_tracer_hits_emissive_sphere() {
        let scene = Scene::new("emissive").with_geometry(
            Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0).unwrap())
                .with_emission(Color::new(0.5, 0.25, 0.0)),
        );
        let tracer = SimpleRayTracer::phong(scene);
        let color = tracer.trace_ray(&Ray::new(Vec3::ZERO, -Vec3::Z).unwrap());
        assert!((color - Color::new(0.5, 0.25, 0.0)).length() < 1e-12);
    }
}
