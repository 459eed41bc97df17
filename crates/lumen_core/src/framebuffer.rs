//! Pixel and depth storage for a single render target.
//!
//! The framebuffer is created once per render, mutated in place by every
//! draw call and read once at the end for encoding.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use lumen_math::{decode_channel, encode_channel};
use thiserror::Error;

use crate::texture::Texture;

/// Errors from framebuffer allocation and encoding.
#[derive(Error, Debug)]
pub enum FramebufferError {
    #[error("Invalid framebuffer size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type FramebufferResult<T> = Result<T, FramebufferError>;

/// An 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(p: [u8; 4]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }
}

/// A rasterized sample ready to be written.
///
/// `x`/`y` are screen coordinates (truncated to a pixel index on write),
/// `color` is linear RGBA in [0, 1] and `s`/`t` are texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: [f64; 4],
    pub s: f64,
    pub t: f64,
}

/// RGBA8 pixel grid plus a parallel depth grid.
#[derive(Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
    depth: Vec<f64>,
    depth_test: bool,
    srgb: bool,
}

impl Framebuffer {
    /// Allocate a transparent target with depth cleared to +infinity.
    pub fn new(width: u32, height: u32) -> FramebufferResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramebufferError::InvalidSize { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; len],
            depth: vec![f64::INFINITY; len],
            depth_test: false,
            srgb: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reject fragments that are not strictly closer than the stored depth.
    pub fn enable_depth_test(&mut self) {
        self.depth_test = true;
    }

    /// Store colors sRGB-encoded and decode them again when blending.
    pub fn enable_srgb(&mut self) {
        self.srgb = true;
    }

    pub fn depth_test(&self) -> bool {
        self.depth_test
    }

    pub fn srgb(&self) -> bool {
        self.srgb
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y), or `None` outside the target.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    /// Overwrite the pixel at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba8) {
        if let Some(i) = self.index(x as i64, y as i64) {
            self.pixels[i] = pixel;
        }
    }

    /// Stored depth at (x, y).
    pub fn depth_at(&self, x: u32, y: u32) -> Option<f64> {
        self.index(x as i64, y as i64).map(|i| self.depth[i])
    }

    /// Depth-test, shade, blend and store one fragment.
    ///
    /// Returns `true` if the pixel was written. Fragments outside the target,
    /// failing the depth test, or carrying non-finite position are dropped.
    pub fn write_fragment(&mut self, frag: &Fragment, texture: Option<&Texture>) -> bool {
        if !frag.x.is_finite() || !frag.y.is_finite() || frag.z.is_nan() {
            return false;
        }
        let Some(idx) = self.index(frag.x.floor() as i64, frag.y.floor() as i64) else {
            return false;
        };

        if self.depth_test && self.depth[idx] <= frag.z {
            return false;
        }

        let [mut r, mut g, mut b, mut a] = match texture {
            Some(tex) => {
                let texel = tex.sample(frag.s, frag.t);
                [
                    decode_channel(texel[0], self.srgb),
                    decode_channel(texel[1], self.srgb),
                    decode_channel(texel[2], self.srgb),
                    decode_channel(texel[3], false),
                ]
            }
            None => frag.color,
        };

        if a < 1.0 {
            let dst = self.pixels[idx];
            let dst_a = decode_channel(dst.a, false);
            let blended_a = a + dst_a * (1.0 - a);
            // Nothing visible over nothing: leave the pixel alone.
            if blended_a <= 0.0 {
                return false;
            }
            let over = |src: f64, dst: u8| {
                (src * a + decode_channel(dst, self.srgb) * dst_a * (1.0 - a)) / blended_a
            };
            r = over(r, dst.r);
            g = over(g, dst.g);
            b = over(b, dst.b);
            a = blended_a;
        }

        self.pixels[idx] = Rgba8::new(
            encode_channel(r, self.srgb),
            encode_channel(g, self.srgb),
            encode_channel(b, self.srgb),
            encode_channel(a, false),
        );
        self.depth[idx] = frag.z;
        true
    }

    /// All pixels in row-major order, top row first.
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Mutable pixel rows for whole-image writers such as the ray tracer.
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Raw RGBA bytes, row-major, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer for encoding.
    pub fn to_image(&self) -> FramebufferResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec()).ok_or(
            FramebufferError::InvalidSize {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Encode the target as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> FramebufferResult<()> {
        let path = path.as_ref();
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        log::info!(
            "Saved {}x{} image to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}
