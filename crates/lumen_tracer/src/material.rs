//! Diffuse surface material.

use lumen_math::DVec3;

/// Linear RGB color.
pub type Color = DVec3;

/// A Lambertian surface described by its diffuse color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
}

impl Material {
    pub const WHITE: Material = Material {
        diffuse: DVec3::ONE,
    };

    pub fn new(diffuse: Color) -> Self {
        Self { diffuse }
    }

    /// Light reflected toward the viewer from a single light.
    ///
    /// `normal` and `light_dir` are unit vectors; back-facing light
    /// contributes nothing.
    pub fn shade(&self, normal: DVec3, light_dir: DVec3, light_color: Color) -> Color {
        light_color * self.diffuse * normal.dot(light_dir).max(0.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}
