//! Flat, insertion-ordered scene container.

use lumen_math::{Interval, Ray};

use crate::hittable::{HitRecord, Hittable};
use crate::light::Light;
use crate::primitive::Primitive;

/// Primitives and lights for one render. Queries scan every primitive.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Nearest hit in `ray_t`. On equal distances the earlier primitive wins.
    pub fn intersect_nearest(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut rec = HitRecord::default();
        self.hit(ray, ray_t, &mut rec).then_some(rec)
    }

    /// Whether anything blocks `ray` within `ray_t`.
    pub fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        let mut rec = HitRecord::default();
        self.primitives.iter().any(|p| p.hit(ray, ray_t, &mut rec))
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for primitive in &self.primitives {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if primitive.hit(ray, interval, rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}
