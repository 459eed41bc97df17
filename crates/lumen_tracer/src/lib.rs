//! Lumen ray tracer.
//!
//! Casts one primary ray per pixel against a flat list of spheres, planes
//! and triangles, then shades the nearest hit with Lambertian lighting and
//! a single shadow ray per light.

mod camera;
mod hittable;
mod light;
mod material;
mod plane;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use camera::{Camera, Projection};
pub use hittable::{HitRecord, Hittable};
pub use light::{Illumination, Light};
pub use material::{Color, Material};
pub use plane::Plane;
pub use primitive::Primitive;
pub use renderer::{render, shade, trace, RenderConfig};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common math types from lumen_math
pub use lumen_math::{DVec3, Interval, Ray};
