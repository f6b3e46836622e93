//! Column-major 4x4 transformation matrix

use super::vec::{Vec3, Vec4};
use std::ops::Mul;

/// 4x4 transformation matrix (column-major)
///
/// `cols[c][r]` addresses column `c`, row `r`. Column 3 holds the translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Create a translation matrix
    pub fn from_translation(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Create a scale matrix
    pub fn from_scale(v: Vec3) -> Self {
        Self::scale(v.x, v.y, v.z)
    }

    /// Create from column-major array
    pub fn from_cols_array(arr: &[f32; 16]) -> Self {
        Self {
            cols: [
                [arr[0], arr[1], arr[2], arr[3]],
                [arr[4], arr[5], arr[6], arr[7]],
                [arr[8], arr[9], arr[10], arr[11]],
                [arr[12], arr[13], arr[14], arr[15]],
            ],
        }
    }

    /// Get column as a homogeneous vector
    pub fn col(&self, idx: usize) -> Vec4 {
        let c = self.cols[idx];
        Vec4::new(c[0], c[1], c[2], c[3])
    }

    /// Translation part (xyz of column 3)
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    /// Multiply two matrices (`self * other`)
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result[i][j] += self.cols[k][j] * other.cols[i][k];
                }
            }
        }
        Mat4 { cols: result }
    }

    /// Multiply a homogeneous vector (`self * v`)
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        let c = &self.cols;
        Vec4::new(
            c[0][0] * v.x + c[1][0] * v.y + c[2][0] * v.z + c[3][0] * v.w,
            c[0][1] * v.x + c[1][1] * v.y + c[2][1] * v.z + c[3][1] * v.w,
            c[0][2] * v.x + c[1][2] * v.y + c[2][2] * v.z + c[3][2] * v.w,
            c[0][3] * v.x + c[1][3] * v.y + c[2][3] * v.z + c[3][3] * v.w,
        )
    }

    /// Transform a point (w = 1, no perspective divide)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.mul_vec4(p.extend(1.0)).truncate()
    }

    /// Transform a direction (w = 0, ignores translation)
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.mul_vec4(v.extend(0.0)).truncate()
    }

    /// Transpose the matrix
    pub fn transpose(&self) -> Mat4 {
        let c = &self.cols;
        Mat4 {
            cols: [
                [c[0][0], c[1][0], c[2][0], c[3][0]],
                [c[0][1], c[1][1], c[2][1], c[3][1]],
                [c[0][2], c[1][2], c[2][2], c[3][2]],
                [c[0][3], c[1][3], c[2][3], c[3][3]],
            ],
        }
    }

    /// Determinant via cofactor expansion
    pub fn determinant(&self) -> f32 {
        let m = &self.cols;

        let a2323 = m[2][2] * m[3][3] - m[2][3] * m[3][2];
        let a1323 = m[2][1] * m[3][3] - m[2][3] * m[3][1];
        let a1223 = m[2][1] * m[3][2] - m[2][2] * m[3][1];
        let a0323 = m[2][0] * m[3][3] - m[2][3] * m[3][0];
        let a0223 = m[2][0] * m[3][2] - m[2][2] * m[3][0];
        let a0123 = m[2][0] * m[3][1] - m[2][1] * m[3][0];

        m[0][0] * (m[1][1] * a2323 - m[1][2] * a1323 + m[1][3] * a1223)
            - m[0][1] * (m[1][0] * a2323 - m[1][2] * a0323 + m[1][3] * a0223)
            + m[0][2] * (m[1][0] * a1323 - m[1][1] * a0323 + m[1][3] * a0123)
            - m[0][3] * (m[1][0] * a1223 - m[1][1] * a0223 + m[1][2] * a0123)
    }

    /// General inverse using cofactor expansion.
    ///
    /// A singular matrix has no inverse; the result is then the identity, which
    /// is as meaningless as any other value for such input.
    pub fn inverse(&self) -> Mat4 {
        let m = &self.cols;

        let a2323 = m[2][2] * m[3][3] - m[2][3] * m[3][2];
        let a1323 = m[2][1] * m[3][3] - m[2][3] * m[3][1];
        let a1223 = m[2][1] * m[3][2] - m[2][2] * m[3][1];
        let a0323 = m[2][0] * m[3][3] - m[2][3] * m[3][0];
        let a0223 = m[2][0] * m[3][2] - m[2][2] * m[3][0];
        let a0123 = m[2][0] * m[3][1] - m[2][1] * m[3][0];
        let a2313 = m[1][2] * m[3][3] - m[1][3] * m[3][2];
        let a1313 = m[1][1] * m[3][3] - m[1][3] * m[3][1];
        let a1213 = m[1][1] * m[3][2] - m[1][2] * m[3][1];
        let a2312 = m[1][2] * m[2][3] - m[1][3] * m[2][2];
        let a1312 = m[1][1] * m[2][3] - m[1][3] * m[2][1];
        let a1212 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let a0313 = m[1][0] * m[3][3] - m[1][3] * m[3][0];
        let a0213 = m[1][0] * m[3][2] - m[1][2] * m[3][0];
        let a0312 = m[1][0] * m[2][3] - m[1][3] * m[2][0];
        let a0212 = m[1][0] * m[2][2] - m[1][2] * m[2][0];
        let a0113 = m[1][0] * m[3][1] - m[1][1] * m[3][0];
        let a0112 = m[1][0] * m[2][1] - m[1][1] * m[2][0];

        let det = self.determinant();
        if det.abs() < 1e-10 {
            return Mat4::IDENTITY;
        }

        let inv_det = 1.0 / det;

        Mat4 {
            cols: [
                [
                    inv_det * (m[1][1] * a2323 - m[1][2] * a1323 + m[1][3] * a1223),
                    inv_det * -(m[0][1] * a2323 - m[0][2] * a1323 + m[0][3] * a1223),
                    inv_det * (m[0][1] * a2313 - m[0][2] * a1313 + m[0][3] * a1213),
                    inv_det * -(m[0][1] * a2312 - m[0][2] * a1312 + m[0][3] * a1212),
                ],
                [
                    inv_det * -(m[1][0] * a2323 - m[1][2] * a0323 + m[1][3] * a0223),
                    inv_det * (m[0][0] * a2323 - m[0][2] * a0323 + m[0][3] * a0223),
                    inv_det * -(m[0][0] * a2313 - m[0][2] * a0313 + m[0][3] * a0213),
                    inv_det * (m[0][0] * a2312 - m[0][2] * a0312 + m[0][3] * a0212),
                ],
                [
                    inv_det * (m[1][0] * a1323 - m[1][1] * a0323 + m[1][3] * a0123),
                    inv_det * -(m[0][0] * a1323 - m[0][1] * a0323 + m[0][3] * a0123),
                    inv_det * (m[0][0] * a1313 - m[0][1] * a0313 + m[0][3] * a0113),
                    inv_det * -(m[0][0] * a1312 - m[0][1] * a0312 + m[0][3] * a0112),
                ],
                [
                    inv_det * -(m[1][0] * a1223 - m[1][1] * a0223 + m[1][2] * a0123),
                    inv_det * (m[0][0] * a1223 - m[0][1] * a0223 + m[0][2] * a0123),
                    inv_det * -(m[0][0] * a1213 - m[0][1] * a0213 + m[0][2] * a0113),
                    inv_det * (m[0][0] * a1212 - m[0][1] * a0212 + m[0][2] * a0112),
                ],
            ],
        }
    }

    /// Perspective projection (right-handed, OpenGL clip depth -1 to 1)
    ///
    /// The camera looks down -Z; the near plane maps to NDC z = -1.
    pub fn perspective_rh_gl(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fov_y * 0.5).tan();
        let range = near - far;

        Mat4 {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) / range, -1.0],
                [0.0, 0.0, 2.0 * far * near / range, 0.0],
            ],
        }
    }

    /// Element-wise comparison within `eps`
    pub fn abs_diff_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.cols
            .iter()
            .flatten()
            .zip(other.cols.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4::mul(&self, &rhs)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.mul_vec4(rhs)
    }
}
