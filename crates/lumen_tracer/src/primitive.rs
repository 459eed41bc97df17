//! Closed set of scene primitives.

use lumen_math::{Interval, Ray};

use crate::hittable::{HitRecord, Hittable};
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle::Triangle;

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Hittable for Primitive {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t, rec),
            Primitive::Plane(p) => p.hit(ray, ray_t, rec),
            Primitive::Triangle(t) => t.hit(ray, ray_t, rec),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<Plane> for Primitive {
    fn from(p: Plane) -> Self {
        Primitive::Plane(p)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}
