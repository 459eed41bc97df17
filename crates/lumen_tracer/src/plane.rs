//! Infinite plane `Ax + By + Cz + D = 0`.

use lumen_math::{DVec3, Interval, Ray};

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;

const PARALLEL_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal, or zero for a degenerate plane.
    normal: DVec3,
    /// `D` rescaled by the length of (A, B, C).
    offset: f64,
    material: Material,
}

impl Plane {
    /// Plane from its implicit coefficients.
    ///
    /// When (A, B, C) has no length the plane is degenerate and never hit.
    pub fn new(a: f64, b: f64, c: f64, d: f64, material: Material) -> Self {
        let abc = DVec3::new(a, b, c);
        let len = abc.length();
        let (normal, offset) = if len > f64::EPSILON && len.is_finite() {
            (abc / len, d / len)
        } else {
            (DVec3::ZERO, 0.0)
        };
        Self {
            normal,
            offset,
            material,
        }
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn is_degenerate(&self) -> bool {
        self.normal == DVec3::ZERO
    }
}

impl Hittable for Plane {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = -(self.normal.dot(ray.origin()) + self.offset) / denom;
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
