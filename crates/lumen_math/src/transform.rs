// Row-major 4x4 transforms
//
// Scene scripts supply matrices as 16 numbers in row-major order and the
// rasterizer applies them as `result[i] = sum_j m[i*4 + j] * v[j]`.
// Internally this wraps glam::DMat4 (column-major), so the row-major input
// is transposed once on construction.

use glam::{DMat4, DVec3, DVec4};

/// A 4x4 matrix applied to homogeneous positions.
///
/// Row 4 is not required to be (0, 0, 0, 1): projective matrices are
/// applied as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: DMat4::IDENTITY,
    };

    /// Build from 16 values in row-major order.
    ///
    /// Returns `None` unless exactly 16 values are given.
    pub fn from_row_major(values: &[f64]) -> Option<Self> {
        let rows: &[f64; 16] = values.try_into().ok()?;
        Some(Self {
            matrix: DMat4::from_cols_array(rows).transpose(),
        })
    }

    /// The matrix as 16 values in row-major order.
    pub fn to_row_major(&self) -> [f64; 16] {
        self.matrix.transpose().to_cols_array()
    }

    /// Element at (row, column).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix.col(col)[row]
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            matrix: DMat4::from_translation(DVec3::new(x, y, z)),
        }
    }

    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        Self {
            matrix: DMat4::from_scale(DVec3::new(x, y, z)),
        }
    }

    /// Rotation about the X axis, angle in degrees.
    pub fn rotation_x(degrees: f64) -> Self {
        Self {
            matrix: DMat4::from_rotation_x(degrees.to_radians()),
        }
    }

    /// Rotation about the Y axis, angle in degrees.
    pub fn rotation_y(degrees: f64) -> Self {
        Self {
            matrix: DMat4::from_rotation_y(degrees.to_radians()),
        }
    }

    /// Rotation about the Z axis, angle in degrees.
    pub fn rotation_z(degrees: f64) -> Self {
        Self {
            matrix: DMat4::from_rotation_z(degrees.to_radians()),
        }
    }

    /// Matrix product `self * other`: `other` is applied first.
    pub fn multiply(&self, other: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Apply to a homogeneous 4-vector.
    #[inline]
    pub fn apply(&self, v: DVec4) -> DVec4 {
        self.matrix * v
    }

    pub fn as_mat4(&self) -> &DMat4 {
        &self.matrix
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec4, b: DVec4) -> bool {
        (a - b).abs().max_element() < 1e-9
    }

    #[test]
    fn test_identity_apply() {
        let v = DVec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(Transform::IDENTITY.apply(v), v);
    }

    #[test]
    fn test_row_major_convention() {
        // Translation lives in the last column of a row-major matrix.
        #[rustfmt::skip]
        let m = Transform::from_row_major(&[
            1.0, 0.0, 0.0, 10.0,
            0.0, 1.0, 0.0, 20.0,
            0.0, 0.0, 1.0, 30.0,
            0.0, 0.0, 0.0, 1.0,
        ])
        .unwrap();

        let v = m.apply(DVec4::new(1.0, 2.0, 3.0, 1.0));
        assert!(approx(v, DVec4::new(11.0, 22.0, 33.0, 1.0)));
        assert_eq!(m, Transform::translation(10.0, 20.0, 30.0));
        assert_eq!(m.get(0, 3), 10.0);
    }

    #[test]
    fn test_row_major_general() {
        let values: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let m = Transform::from_row_major(&values).unwrap();
        let v = DVec4::new(1.0, -1.0, 2.0, 0.5);

        let r = m.apply(v);
        for i in 0..4 {
            let expected: f64 = (0..4).map(|j| values[i * 4 + j] * v[j]).sum();
            assert!((r[i] - expected).abs() < 1e-12);
        }
        assert_eq!(m.to_row_major().to_vec(), values);
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(Transform::from_row_major(&[1.0; 15]).is_none());
        assert!(Transform::from_row_major(&[1.0; 17]).is_none());
    }

    #[test]
    fn test_rotation_z_degrees() {
        let r = Transform::rotation_z(90.0).apply(DVec4::new(1.0, 0.0, 0.0, 1.0));
        assert!(approx(r, DVec4::new(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_multiply_order() {
        // Scale first, then translate.
        let m = Transform::translation(1.0, 0.0, 0.0).multiply(&Transform::scale(2.0, 2.0, 2.0));
        let r = m.apply(DVec4::new(1.0, 1.0, 1.0, 1.0));
        assert!(approx(r, DVec4::new(3.0, 2.0, 2.0, 1.0)));
    }
}
