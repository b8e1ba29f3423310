use crate::error::{Error, Result};
use crate::math::matrix3::Mat3;
use crate::math::vector::{Vec3, Vec4};

use approx::AbsDiffEq;
use num::traits::Float;
use std::fmt;
use std::fmt::Display;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/** A 4x4 matrix in row-major order, acting on column vectors (`M * v`). */
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mat4<T> where T: Float {
    storage: [[T; 4]; 4],
}

/// The three indices in `0..4` other than `skip`, in ascending order.
fn complement(skip: usize) -> (usize, usize, usize) {
    match skip {
        0 => (1, 2, 3),
        1 => (0, 2, 3),
        2 => (0, 1, 3),
        _ => (0, 1, 2),
    }
}

impl<T> Mat4<T> where T: Float {
    pub fn new(data: [[T; 4]; 4]) -> Mat4<T> {
        Self {storage: data}
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        m11: T, m12: T, m13: T, m14: T,
        m21: T, m22: T, m23: T, m24: T,
        m31: T, m32: T, m33: T, m34: T,
        m41: T, m42: T, m43: T, m44: T) -> Mat4<T>
    {
        Self::new([
            [m11, m12, m13, m14],
            [m21, m22, m23, m24],
            [m31, m32, m33, m34],
            [m41, m42, m43, m44]])
    }

    pub fn zero() -> Mat4<T> {
        Self::new([[T::zero(); 4]; 4])
    }

    pub fn identity() -> Mat4<T> {
        let mut output = Self::zero();
        output.set_diagonal(T::one());
        output
    }

    pub fn reset_identity(&mut self) -> &mut Self {
        self.set_diagonal(T::one())
    }

    pub fn set_diagonal(&mut self, k: T) -> &mut Self {
        for row in 0..4 {
            for col in 0..4 {
                self[row][col] = if row == col { k } else { T::zero() };
            }
        }
        self
    }

    pub fn rows(&self) -> [[T; 4]; 4] {
        self.storage
    }

    pub fn row(&self, index: usize) -> Vec4<T> {
        Vec4::from(self.storage[index])
    }

    pub fn column(&self, index: usize) -> Vec4<T> {
        Vec4::new(self[0][index], self[1][index], self[2][index], self[3][index])
    }

    pub fn set_row(&mut self, v: &Vec4<T>, index: usize) -> &mut Self {
        self.storage[index] = v.to_array();
        self
    }

    pub fn set_column(&mut self, v: &Vec4<T>, index: usize) -> &mut Self {
        self[0][index] = v.x;
        self[1][index] = v.y;
        self[2][index] = v.z;
        self[3][index] = v.w;
        self
    }

    pub fn translation(t: &Vec3<T>) -> Mat4<T> {
        let mut output = Self::identity();
        output[0][3] = t.x;
        output[1][3] = t.y;
        output[2][3] = t.z;
        output
    }

    pub fn rotation_x(angle: T) -> Mat4<T> {
        Mat3::rotation_x(angle).to_mat4()
    }

    pub fn rotation_y(angle: T) -> Mat4<T> {
        Mat3::rotation_y(angle).to_mat4()
    }

    pub fn rotation_z(angle: T) -> Mat4<T> {
        Mat3::rotation_z(angle).to_mat4()
    }

    /// Euler rotation, composed as `Rx * Ry * Rz`.
    pub fn rotation_euler(euler: &Vec3<T>) -> Mat4<T> {
        Mat3::rotation_euler(euler).to_mat4()
    }

    pub fn rotation_axis(axis: &Vec3<T>, angle: T) -> Mat4<T> {
        Mat3::rotation_axis(axis, angle).to_mat4()
    }

    pub fn scaling(k: &Vec4<T>) -> Mat4<T> {
        let mut output = Self::zero();
        output[0][0] = k.x;
        output[1][1] = k.y;
        output[2][2] = k.z;
        output[3][3] = k.w;
        output
    }

    pub fn translate(&mut self, t: &Vec3<T>) -> &mut Self {
        *self *= Self::translation(t);
        self
    }

    pub fn set_translation(&mut self, t: &Vec3<T>) -> &mut Self {
        *self = Self::translation(t);
        self
    }

    pub fn rotate_x(&mut self, angle: T) -> &mut Self {
        *self *= Self::rotation_x(angle);
        self
    }

    pub fn rotate_y(&mut self, angle: T) -> &mut Self {
        *self *= Self::rotation_y(angle);
        self
    }

    pub fn rotate_z(&mut self, angle: T) -> &mut Self {
        *self *= Self::rotation_z(angle);
        self
    }

    pub fn rotate_euler(&mut self, euler: &Vec3<T>) -> &mut Self {
        *self *= Self::rotation_euler(euler);
        self
    }

    pub fn set_rotation_euler(&mut self, euler: &Vec3<T>) -> &mut Self {
        *self = Self::rotation_euler(euler);
        self
    }

    pub fn rotate_axis(&mut self, axis: &Vec3<T>, angle: T) -> &mut Self {
        *self *= Self::rotation_axis(axis, angle);
        self
    }

    pub fn set_rotation_axis(&mut self, axis: &Vec3<T>, angle: T) -> &mut Self {
        *self = Self::rotation_axis(axis, angle);
        self
    }

    pub fn scale(&mut self, k: &Vec4<T>) -> &mut Self {
        *self *= Self::scaling(k);
        self
    }

    pub fn set_scaling(&mut self, k: &Vec4<T>) -> &mut Self {
        *self = Self::scaling(k);
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        *self = self.transposed();
        self
    }

    pub fn transposed(&self) -> Mat4<T> {
        let mut output = Self::zero();
        for row in 0..4 {
            for col in 0..4 {
                output[row][col] = self[col][row];
            }
        }
        output
    }

    fn determinant3(&self, r1: usize, r2: usize, r3: usize, c1: usize, c2: usize, c3: usize)
        -> T
    {
          self[r1][c1] * self[r2][c2] * self[r3][c3]
        + self[r1][c2] * self[r2][c3] * self[r3][c1]
        + self[r1][c3] * self[r2][c1] * self[r3][c2]
        - self[r1][c1] * self[r2][c3] * self[r3][c2]
        - self[r1][c2] * self[r2][c1] * self[r3][c3]
        - self[r1][c3] * self[r2][c2] * self[r3][c1]
    }

    /// Determinant of the 3x3 block left after striking out `row` and `col`.
    fn minor(&self, row: usize, col: usize) -> T {
        let (r1, r2, r3) = complement(row);
        let (c1, c2, c3) = complement(col);
        self.determinant3(r1, r2, r3, c1, c2, c3)
    }

    fn cofactor(&self, row: usize, col: usize) -> T {
        if (row + col) % 2 == 0 {
            self.minor(row, col)
        }
        else {
            -self.minor(row, col)
        }
    }

    /// Laplace expansion along the last column.
    pub fn determinant(&self) -> T {
        (0..4).fold(T::zero(), |acc, row| acc + self[row][3] * self.cofactor(row, 3))
    }

    /// Transposed cofactor matrix.
    pub fn adjoint(&self) -> Mat4<T> {
        let mut output = Self::zero();
        for row in 0..4 {
            for col in 0..4 {
                output[col][row] = self.cofactor(row, col);
            }
        }
        output
    }

    /**
     * Adjoint divided by the determinant. A singular matrix is not detected; its inverse comes
     * back full of inf/NaN. Use `try_inverse` to get an error instead.
     */
    pub fn inverse(&self) -> Mat4<T> {
        self.adjoint() * (T::one() / self.determinant())
    }

    pub fn try_inverse(&self) -> Result<Mat4<T>> {
        let det = self.determinant();
        if det == T::zero() || !det.is_finite() {
            return Err(Error::SingularMatrix);
        }
        Ok(self.adjoint() * (T::one() / det))
    }

    /// Extracts the upper-left 3x3 block.
    pub fn to_mat3(&self) -> Mat3<T> {
        let mut output = Mat3::zero();
        for row in 0..3 {
            for col in 0..3 {
                output[row][col] = self[row][col];
            }
        }
        output
    }

    /// Transforms a point (w = 1), dividing through by the resulting w.
    pub fn transform_point(&self, v: &Vec3<T>) -> Vec3<T> {
        let h = *self * v.extend(T::one());
        h.truncate() / h.w
    }

    /// Transforms a direction (w = 0); translation does not apply.
    pub fn transform_dir(&self, v: &Vec3<T>) -> Vec3<T> {
        self.to_mat3() * *v
    }
}

impl<T> Default for Mat4<T> where T: Float {
    fn default() -> Mat4<T> {
        Self::identity()
    }
}

impl<T> From<Mat3<T>> for Mat4<T> where T: Float {
    fn from(m: Mat3<T>) -> Mat4<T> {
        m.to_mat4()
    }
}

impl<T> Display for Mat4<T> where T: Float + Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::new();
        output.push('(');
        for row in 0..4 {
            output.push('(');
            for col in 0..4 {
                output.push_str(&self[row][col].to_string());
                if col != 3 {
                    output.push_str(", ");
                }
            }
            output.push(')');
            if row != 3 {
                output.push_str(", ");
            }
        }
        output.push(')');
        write!(f, "{}", output)
    }
}

impl<T> Add for Mat4<T> where T: Float {
    type Output = Mat4<T>;
    fn add(self, _rhs: Mat4<T>) -> Mat4<T> {
        let mut output = self.storage;
        for row in 0..4 {
            for col in 0..4 {
                output[row][col] = output[row][col] + _rhs[row][col];
            }
        }
        Mat4 {storage: output}
    }
}

impl<T> Sub for Mat4<T> where T: Float {
    type Output = Mat4<T>;
    fn sub(self, _rhs: Mat4<T>) -> Mat4<T> {
        let mut output = self.storage;
        for row in 0..4 {
            for col in 0..4 {
                output[row][col] = output[row][col] - _rhs[row][col];
            }
        }
        Mat4 {storage: output}
    }
}

impl<T> Mul for Mat4<T> where T: Float {
    type Output = Mat4<T>;
    fn mul(mut self, _rhs: Mat4<T>) -> Mat4<T> {
        let tmp = self.storage;
        for row in 0..4 {
            for col in 0..4 {
                self[row][col] = tmp[row][0] * _rhs[0][col]
                               + tmp[row][1] * _rhs[1][col]
                               + tmp[row][2] * _rhs[2][col]
                               + tmp[row][3] * _rhs[3][col];
            }
        }
        self
    }
}

impl<T> Mul<T> for Mat4<T> where T: Float {
    type Output = Mat4<T>;
    fn mul(mut self, _rhs: T) -> Mat4<T> {
        for row in 0..4 {
            for col in 0..4 {
                self.storage[row][col] = self.storage[row][col] * _rhs;
            }
        }
        self
    }
}

impl Mul<Mat4<f64>> for f64 {
    type Output = Mat4<f64>;
    fn mul(self, _rhs: Mat4<f64>) -> Mat4<f64> { _rhs * self }
}

impl Mul<Mat4<f32>> for f32 {
    type Output = Mat4<f32>;
    fn mul(self, _rhs: Mat4<f32>) -> Mat4<f32> { _rhs * self }
}

impl<T> Mul<Vec4<T>> for Mat4<T> where T: Float {
    type Output = Vec4<T>;
    fn mul(self, v: Vec4<T>) -> Vec4<T> {
        Vec4::new(
            self.row(0).dot(&v),
            self.row(1).dot(&v),
            self.row(2).dot(&v),
            self.row(3).dot(&v))
    }
}

impl<T> Neg for Mat4<T> where T: Float {
    type Output = Mat4<T>;
    fn neg(mut self) -> Mat4<T> {
        for row in 0..4 {
            for col in 0..4 {
                self.storage[row][col] = -self.storage[row][col];
            }
        }
        self
    }
}

impl<T> AddAssign for Mat4<T> where T: Float {
    fn add_assign(&mut self, _rhs: Mat4<T>) {
        *self = *self + _rhs;
    }
}

impl<T> SubAssign for Mat4<T> where T: Float {
    fn sub_assign(&mut self, _rhs: Mat4<T>) {
        *self = *self - _rhs;
    }
}

impl<T> MulAssign for Mat4<T> where T: Float {
    fn mul_assign(&mut self, _rhs: Mat4<T>) {
        *self = *self * _rhs;
    }
}

impl<T> MulAssign<T> for Mat4<T> where T: Float {
    fn mul_assign(&mut self, _rhs: T) {
        *self = *self * _rhs;
    }
}

impl<T> Index<usize> for Mat4<T> where T: Float {
    type Output = [T; 4];

    fn index(&self, index: usize) -> &[T; 4] {
        &self.storage[index]
    }
}

impl<T> IndexMut<usize> for Mat4<T> where T: Float {
    fn index_mut(&mut self, index: usize) -> &mut [T; 4] {
        &mut self.storage[index]
    }
}

impl<T> AbsDiffEq for Mat4<T> where T: Float + AbsDiffEq<Epsilon = T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Mat4<T>, epsilon: T) -> bool {
        (0..4).all(|row| (0..4).all(|col| self[row][col].abs_diff_eq(&other[row][col], epsilon)))
    }
}
