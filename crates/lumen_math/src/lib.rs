// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod color;
mod interval;
mod ray;
mod transform;

pub use color::{
    apply_exposure, decode_channel, encode_channel, linear_to_srgb, quantize, srgb_to_linear,
};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;
