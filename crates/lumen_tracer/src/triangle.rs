//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use lumen_math::{DVec3, Interval, Ray};

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: DVec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3, material: Material) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self {
            v0,
            v1,
            v2,
            normal,
            material,
        }
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        [self.v0, self.v1, self.v2]
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return false;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * edge2.dot(q);
        if !ray_t.admits(t) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.material = &self.material;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> Triangle {
        Triangle::new(
            DVec3::new(-1.0, -1.0, -2.0),
            DVec3::new(1.0, -1.0, -2.0),
            DVec3::new(0.0, 1.0, -2.0),
            Material::WHITE,
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let tri = tri();
        let mut rec = HitRecord::default();
        assert!(tri.hit(&ray, Interval::from_min(1e-4), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert_eq!(rec.normal, DVec3::Z);
    }

    #[test]
    fn test_triangle_back_face_normal_flips() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, -4.0), DVec3::Z);
        let tri = tri();
        let mut rec = HitRecord::default();
        assert!(tri.hit(&ray, Interval::from_min(1e-4), &mut rec));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -DVec3::Z);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let ray = Ray::new(DVec3::new(0.9, 0.9, 0.0), DVec3::new(0.0, 0.0, -1.0));
        let tri = tri();
        let mut rec = HitRecord::default();
        assert!(!tri.hit(&ray, Interval::from_min(1e-4), &mut rec));
    }

    #[test]
    fn test_triangle_parallel_miss() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, -2.0), DVec3::X);
        let tri = tri();
        let mut rec = HitRecord::default();
        assert!(!tri.hit(&ray, Interval::from_min(1e-4), &mut rec));
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let line = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, Material::WHITE);
        let ray = Ray::new(DVec3::new(0.5, 0.0, 1.0), -DVec3::Z);
        let mut rec = HitRecord::default();
        assert!(!line.hit(&ray, Interval::UNIVERSE, &mut rec));
    }
}
