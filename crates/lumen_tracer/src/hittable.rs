//! Hittable trait and HitRecord for ray-object intersection.

use lumen_math::{DVec3, Interval, Ray};

use crate::material::Material;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: DVec3,
    /// Unit surface normal, always facing against the ray
    pub normal: DVec3,
    pub material: &'a Material,
    /// Ray parameter of the intersection
    pub t: f64,
    /// Whether the ray hit the outward-facing side
    pub front_face: bool,
}

static DEFAULT_MATERIAL: Material = Material::WHITE;

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self {
            p: DVec3::ZERO,
            normal: DVec3::ZERO,
            material: &DEFAULT_MATERIAL,
            t: f64::INFINITY,
            front_face: false,
        }
    }
}

impl HitRecord<'_> {
    /// Store `outward_normal`, flipped if needed so it opposes the ray.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: DVec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object at a parameter in `[ray_t.min, ray_t.max)`.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_normal_opposes_ray() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        rec.set_face_normal(&ray, DVec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, DVec3::Z);

        rec.set_face_normal(&ray, -DVec3::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, DVec3::Z);
    }

    #[test]
    fn test_grazing_normal_is_not_positive() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let mut rec = HitRecord::default();
        rec.set_face_normal(&ray, DVec3::Y);
        assert!(rec.normal.dot(ray.direction()) <= 0.0);
    }
}
