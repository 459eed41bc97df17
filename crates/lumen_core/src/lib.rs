//! Lumen Core - render targets shared by the rasterizer and the ray tracer.
//!
//! This crate provides:
//!
//! - **Framebuffer**: RGBA8 pixels plus a depth buffer, with depth-tested,
//!   alpha-blended fragment writes
//! - **Textures**: RGBA8 images loaded from disk and cached by path
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::Framebuffer;
//!
//! let mut target = Framebuffer::new(64, 64)?;
//! target.enable_depth_test();
//! // ... draw ...
//! target.save_png("out.png")?;
//! ```

pub mod framebuffer;
pub mod texture;

// Re-export commonly used types
pub use framebuffer::{Fragment, Framebuffer, FramebufferError, FramebufferResult, Rgba8};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
