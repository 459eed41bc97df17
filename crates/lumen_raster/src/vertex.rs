//! Interpolatable vertex attributes.

use std::ops::{Add, AddAssign, Div, Mul, Sub};

use lumen_core::Fragment;
use lumen_math::{DVec4, Transform};

use crate::dda::Axis;

/// Position, color and texture coordinates carried through rasterization.
///
/// Every field takes part in the arithmetic, so a linear blend of two
/// vertices blends all attributes at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
    pub s: f64,
    pub t: f64,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
            s: 0.0,
            t: 0.0,
        }
    }
}

impl Vertex {
    /// All ten fields zero. Produced by degenerate divisions.
    pub const ZERO: Vertex = Vertex {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
        s: 0.0,
        t: 0.0,
    };

    /// Vertex at a position with default color and texcoord.
    pub fn at(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            x,
            y,
            z,
            w,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, r: f64, g: f64, b: f64, a: f64) -> Self {
        self.r = r;
        self.g = g;
        self.b = b;
        self.a = a;
        self
    }

    pub fn with_texcoord(mut self, s: f64, t: f64) -> Self {
        self.s = s;
        self.t = t;
        self
    }

    pub fn position(&self) -> DVec4 {
        DVec4::new(self.x, self.y, self.z, self.w)
    }

    /// Write up to four position components starting at `x`.
    pub fn set_position(&mut self, values: &[f64]) {
        for (field, v) in [&mut self.x, &mut self.y, &mut self.z, &mut self.w]
            .into_iter()
            .zip(values)
        {
            *field = *v;
        }
    }

    /// Write up to four color components starting at `r`.
    pub fn set_color(&mut self, values: &[f64]) {
        for (field, v) in [&mut self.r, &mut self.g, &mut self.b, &mut self.a]
            .into_iter()
            .zip(values)
        {
            *field = *v;
        }
    }

    /// Write up to two texture coordinates starting at `s`.
    pub fn set_texcoord(&mut self, values: &[f64]) {
        for (field, v) in [&mut self.s, &mut self.t].into_iter().zip(values) {
            *field = *v;
        }
    }

    /// Coordinate along a traversal axis.
    #[inline]
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn map_attributes(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            a: f(self.a),
            s: f(self.s),
            t: f(self.t),
            ..self
        }
    }

    /// Apply a transform to the homogeneous position only.
    pub fn transform(self, transform: &Transform) -> Self {
        let p = transform.apply(self.position());
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            w: p.w,
            ..self
        }
    }

    /// Perspective-divide and map clip space to screen space.
    ///
    /// Afterwards `w` holds `1/w`. With `hyperbolic` set, color and texture
    /// coordinates are divided by `w` as well so they interpolate linearly
    /// in screen space; [`Vertex::undo_perspective`] reverses this per sample.
    /// A vertex with `w == 0` collapses to [`Vertex::ZERO`].
    pub fn normalize_to_screen(self, width: f64, height: f64, hyperbolic: bool) -> Self {
        if self.w == 0.0 {
            return Self::ZERO;
        }
        let w = self.w;
        let mut v = if hyperbolic {
            self.map_attributes(|c| c / w)
        } else {
            self
        };
        v.x = (self.x / w + 1.0) * width / 2.0;
        v.y = (self.y / w + 1.0) * height / 2.0;
        v.z = self.z / w;
        v.w = 1.0 / w;
        v
    }

    /// Recover attributes and `w` at an interpolated sample.
    pub fn undo_perspective(self, hyperbolic: bool) -> Self {
        let inv_w = self.w;
        let mut v = if hyperbolic {
            self.map_attributes(|c| c / inv_w)
        } else {
            self
        };
        v.w = 1.0 / inv_w;
        v
    }

    pub fn to_fragment(&self) -> Fragment {
        Fragment {
            x: self.x,
            y: self.y,
            z: self.z,
            color: [self.r, self.g, self.b, self.a],
            s: self.s,
            t: self.t,
        }
    }

    fn zip_with(self, o: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            x: f(self.x, o.x),
            y: f(self.y, o.y),
            z: f(self.z, o.z),
            w: f(self.w, o.w),
            r: f(self.r, o.r),
            g: f(self.g, o.g),
            b: f(self.b, o.b),
            a: f(self.a, o.a),
            s: f(self.s, o.s),
            t: f(self.t, o.t),
        }
    }
}

impl Add for Vertex {
    type Output = Vertex;

    fn add(self, rhs: Vertex) -> Vertex {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl AddAssign for Vertex {
    fn add_assign(&mut self, rhs: Vertex) {
        *self = *self + rhs;
    }
}

impl Sub for Vertex {
    type Output = Vertex;

    fn sub(self, rhs: Vertex) -> Vertex {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for Vertex {
    type Output = Vertex;

    fn mul(self, k: f64) -> Vertex {
        self.zip_with(self, |a, _| a * k)
    }
}

/// Division by zero yields [`Vertex::ZERO`] rather than infinities.
impl Div<f64> for Vertex {
    type Output = Vertex;

    fn div(self, k: f64) -> Vertex {
        if k == 0.0 {
            return Vertex::ZERO;
        }
        self.zip_with(self, |a, _| a / k)
    }
}
