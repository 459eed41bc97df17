//! Lumen scanline rasterizer.
//!
//! Triangles are transformed into clip space, normalized to screen space,
//! walked edge by edge with a DDA stepper and written into a
//! [`Framebuffer`](lumen_core::Framebuffer) one pixel sample at a time.

mod dda;
mod rasterizer;
mod vertex;

pub use dda::{dda, scan_triangle, Axis};
pub use rasterizer::{draw_arrays, draw_elements, draw_triangle, DrawState};
pub use vertex::Vertex;
