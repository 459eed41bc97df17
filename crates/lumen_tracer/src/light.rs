//! Directional and point lights.

use lumen_math::DVec3;

use crate::material::Color;

/// A light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Infinitely distant light arriving from `direction`.
    Directional { direction: DVec3, color: Color },
    /// Point light with inverse-square falloff.
    Point { position: DVec3, color: Color },
}

/// Light arriving at a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// Unit vector from the point toward the light.
    pub direction: DVec3,
    /// Color after attenuation.
    pub color: Color,
    /// Distance to the light, infinite for directional lights.
    pub distance: f64,
}

impl Light {
    /// A sun shining from `direction` (pointing toward the light).
    pub fn directional(direction: DVec3, color: Color) -> Self {
        Light::Directional {
            direction: direction.normalize_or_zero(),
            color,
        }
    }

    pub fn point(position: DVec3, color: Color) -> Self {
        Light::Point { position, color }
    }

    /// Light reaching `point`, or `None` when it cannot be evaluated
    /// (a point light sitting exactly on the surface).
    pub fn illuminate(&self, point: DVec3) -> Option<Illumination> {
        match *self {
            Light::Directional { direction, color } => Some(Illumination {
                direction,
                color,
                distance: f64::INFINITY,
            }),
            Light::Point { position, color } => {
                let to_light = position - point;
                let dist_sq = to_light.length_squared();
                if dist_sq == 0.0 {
                    return None;
                }
                let distance = dist_sq.sqrt();
                Some(Illumination {
                    direction: to_light / distance,
                    color: color / dist_sq,
                    distance,
                })
            }
        }
    }
}
