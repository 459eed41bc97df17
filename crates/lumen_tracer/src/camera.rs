//! Camera for primary ray generation.

use std::f64::consts::PI;

use lumen_math::{DVec3, Ray};

/// How screen coordinates map to ray directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Projection {
    /// Flat image plane at the tip of `forward`.
    #[default]
    Classic,
    /// Equidistant-style fisheye inside the unit circle.
    Fisheye,
    /// Full 360 by 180 degree equirectangular view.
    Panorama,
}

/// A pinhole camera with an orthonormalized right/up basis.
///
/// `forward` keeps its length, so a longer forward vector zooms in for the
/// classic projection.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    projection: Projection,
}

impl Camera {
    pub fn new(eye: DVec3, forward: DVec3, up: DVec3, projection: Projection) -> Self {
        let right = forward.cross(up).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        Self {
            eye,
            forward,
            right,
            up,
            projection,
        }
    }

    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Map pixel (x, y) to screen coordinates.
    ///
    /// The longer image side spans [-1, 1]; y grows upward.
    pub fn screen_coords(x: u32, y: u32, width: u32, height: u32) -> (f64, f64) {
        let (x, y, w, h) = (x as f64, y as f64, width as f64, height as f64);
        let span = w.max(h);
        ((2.0 * x - w) / span, (h - 2.0 * y) / span)
    }

    /// Primary ray through screen coordinates (sx, sy).
    ///
    /// Returns `None` outside the fisheye circle, or when the basis is
    /// degenerate (forward parallel to up).
    pub fn ray(&self, sx: f64, sy: f64) -> Option<Ray> {
        if self.right == DVec3::ZERO {
            return None;
        }

        let direction = match self.projection {
            Projection::Classic => self.forward + self.right * sx + self.up * sy,
            Projection::Fisheye => {
                let r2 = sx * sx + sy * sy;
                if r2 > 1.0 {
                    return None;
                }
                self.forward * (1.0 - r2).sqrt() + self.right * sx + self.up * sy
            }
            Projection::Panorama => {
                let theta = (sx + 1.0) * PI;
                let phi = (1.0 - sy) * PI;
                self.forward * (phi.cos() * theta.cos())
                    + self.right * (phi.cos() * theta.sin())
                    + self.up * phi.sin()
            }
        };

        let direction = direction.normalize_or_zero();
        if direction == DVec3::ZERO {
            return None;
        }
        Some(Ray::new(self.eye, direction))
    }

    /// Primary ray for pixel (x, y) of a `width` by `height` image.
    pub fn get_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Ray> {
        let (sx, sy) = Self::screen_coords(x, y, width, height);
        self.ray(sx, sy)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::Y,
            Projection::Classic,
        )
    }
}
