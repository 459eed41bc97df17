//! Linear/sRGB transfer functions and 8-bit quantization.

use crate::Interval;

/// Convert a linear channel value to the sRGB transfer curve.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert an sRGB-encoded channel value back to linear.
#[inline]
pub fn srgb_to_linear(encoded: f64) -> f64 {
    if encoded <= 0.040_45 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// Quantize a [0, 1] value to 8 bits, clamping out-of-range input.
#[inline]
pub fn quantize(value: f64) -> u8 {
    (Interval::UNIT.clamp(value) * 255.0).round() as u8
}

/// Quantize a linear value, optionally through the sRGB curve first.
#[inline]
pub fn encode_channel(linear: f64, srgb: bool) -> u8 {
    if srgb {
        quantize(linear_to_srgb(Interval::UNIT.clamp(linear)))
    } else {
        quantize(linear)
    }
}

/// Inverse of [`encode_channel`].
#[inline]
pub fn decode_channel(byte: u8, srgb: bool) -> f64 {
    let v = byte as f64 / 255.0;
    if srgb {
        srgb_to_linear(v)
    } else {
        v
    }
}

/// Exposure tone map: `1 - exp(-exposure * value)`.
#[inline]
pub fn apply_exposure(value: f64, exposure: f64) -> f64 {
    1.0 - (-exposure * value).exp()
}
