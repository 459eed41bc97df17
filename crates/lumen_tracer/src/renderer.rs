//! Primary-ray renderer with Lambertian shading and shadow rays.

use std::time::Instant;

use lumen_core::{Framebuffer, Rgba8};
use lumen_math::{apply_exposure, encode_channel, Interval, Ray};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::hittable::HitRecord;
use crate::material::Color;
use crate::scene::Scene;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Exposure for `1 - exp(-exposure * c)` tone mapping, off when `None`
    pub exposure: Option<f64>,
    /// Nearest accepted primary hit
    pub t_min: f64,
    /// Shadow ray start offset, avoids self-intersection
    pub shadow_bias: f64,
    /// Render rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            exposure: None,
            t_min: 1e-4,
            shadow_bias: 1e-4,
            parallel: true,
        }
    }
}

/// Sum the unshadowed diffuse contribution of every light at a hit.
pub fn shade(scene: &Scene, rec: &HitRecord<'_>, config: &RenderConfig) -> Color {
    let mut color = Color::ZERO;
    for light in scene.lights() {
        let Some(ill) = light.illuminate(rec.p) else {
            continue;
        };
        let shadow_ray = Ray::new(rec.p, ill.direction);
        if scene.occluded(&shadow_ray, Interval::new(config.shadow_bias, ill.distance)) {
            continue;
        }
        color += rec.material.shade(rec.normal, ill.direction, ill.color);
    }
    color
}

/// Linear color seen along `ray`, or `None` if nothing is hit.
pub fn trace(scene: &Scene, ray: &Ray, config: &RenderConfig) -> Option<Color> {
    let rec = scene.intersect_nearest(ray, Interval::from_min(config.t_min))?;
    Some(shade(scene, &rec, config))
}

fn pixel_for(scene: &Scene, ray: Option<Ray>, config: &RenderConfig) -> Rgba8 {
    let Some(color) = ray.and_then(|ray| trace(scene, &ray, config)) else {
        return Rgba8::TRANSPARENT;
    };
    let color = match config.exposure {
        Some(e) => Color::new(
            apply_exposure(color.x, e),
            apply_exposure(color.y, e),
            apply_exposure(color.z, e),
        ),
        None => color,
    };
    Rgba8::new(
        encode_channel(color.x, true),
        encode_channel(color.y, true),
        encode_channel(color.z, true),
        255,
    )
}

/// Render the scene into `fb`, one primary ray per pixel.
///
/// Hits are written sRGB-encoded and opaque; misses are transparent black.
pub fn render(scene: &Scene, camera: &Camera, fb: &mut Framebuffer, config: &RenderConfig) {
    let (width, height) = (fb.width(), fb.height());
    log::info!(
        "Tracing {}x{} ({} primitives, {} lights{})",
        width,
        height,
        scene.len(),
        scene.lights().len(),
        if config.parallel { ", parallel" } else { "" }
    );
    let start = Instant::now();

    let render_row = |(y, row): (usize, &mut [Rgba8])| {
        for (x, pixel) in row.iter_mut().enumerate() {
            let ray = camera.get_ray(x as u32, y as u32, width, height);
            *pixel = pixel_for(scene, ray, config);
        }
    };

    let row_len = width as usize;
    if config.parallel {
        fb.pixels_mut()
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(render_row);
    } else {
        fb.pixels_mut()
            .chunks_mut(row_len)
            .enumerate()
            .for_each(render_row);
    }

    log::info!("Trace finished in {:.2?}", start.elapsed());
}
