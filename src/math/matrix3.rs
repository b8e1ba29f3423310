use crate::error::{Error, Result};
use crate::math::matrix4::Mat4;
use crate::math::vector::{Vec2, Vec3};

use approx::AbsDiffEq;
use num::traits::Float;
use std::fmt;
use std::fmt::Display;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/** A 3x3 matrix in row-major order, acting on column vectors (`M * v`). */
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mat3<T> where T: Float {
    storage: [[T; 3]; 3],
}

impl<T> Mat3<T> where T: Float {
    pub fn new(data: [[T; 3]; 3]) -> Mat3<T> {
        Self {storage: data}
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_components(
        m11: T, m12: T, m13: T,
        m21: T, m22: T, m23: T,
        m31: T, m32: T, m33: T) -> Mat3<T>
    {
        Self::new([
            [m11, m12, m13],
            [m21, m22, m23],
            [m31, m32, m33]])
    }

    pub fn zero() -> Mat3<T> {
        Self::new([[T::zero(); 3]; 3])
    }

    pub fn identity() -> Mat3<T> {
        let mut output = Self::zero();
        output.set_diagonal(T::one());
        output
    }

    pub fn reset_identity(&mut self) -> &mut Self {
        self.set_diagonal(T::one())
    }

    pub fn set_diagonal(&mut self, k: T) -> &mut Self {
        for row in 0..3 {
            for col in 0..3 {
                self[row][col] = if row == col { k } else { T::zero() };
            }
        }
        self
    }

    pub fn rows(&self) -> [[T; 3]; 3] {
        self.storage
    }

    pub fn row(&self, index: usize) -> Vec3<T> {
        Vec3::from(self.storage[index])
    }

    pub fn column(&self, index: usize) -> Vec3<T> {
        Vec3::new(self[0][index], self[1][index], self[2][index])
    }

    pub fn set_row(&mut self, v: &Vec3<T>, index: usize) -> &mut Self {
        self.storage[index] = v.to_array();
        self
    }

    pub fn set_column(&mut self, v: &Vec3<T>, index: usize) -> &mut Self {
        self[0][index] = v.x;
        self[1][index] = v.y;
        self[2][index] = v.z;
        self
    }

    /* Elementary transforms. */

    /// Homogeneous 2D translation: the last column carries `t`.
    pub fn translation(t: &Vec2<T>) -> Mat3<T> {
        let mut output = Self::identity();
        output[0][2] = t.x;
        output[1][2] = t.y;
        output
    }

    /// 2D rotation by `angle` radians, counter-clockwise.
    pub fn rotation(angle: T) -> Mat3<T> {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self::from_components(
            c, -s, o,
            s,  c, o,
            o,  o, l)
    }

    pub fn rotation_x(angle: T) -> Mat3<T> {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self::from_components(
            l, o,  o,
            o, c, -s,
            o, s,  c)
    }

    pub fn rotation_y(angle: T) -> Mat3<T> {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self::from_components(
             c, o, s,
             o, l, o,
            -s, o, c)
    }

    pub fn rotation_z(angle: T) -> Mat3<T> {
        Self::rotation(angle)
    }

    /// Euler rotation, composed as `Rx * Ry * Rz`.
    pub fn rotation_euler(euler: &Vec3<T>) -> Mat3<T> {
        Self::rotation_x(euler.x) * Self::rotation_y(euler.y) * Self::rotation_z(euler.z)
    }

    /**
     * Rotation about an arbitrary axis through the origin by `angle` radians (Rodrigues). The
     * axis does not need to be unit length.
     */
    pub fn rotation_axis(axis: &Vec3<T>, angle: T) -> Mat3<T> {
        let a = axis.normalized();
        let (s, c) = angle.sin_cos();
        let t = T::one() - c;
        let (x, y, z) = (a.x, a.y, a.z);
        Self::from_components(
            t * x * x + c,     t * x * y - s * z, t * x * z + s * y,
            t * x * y + s * z, t * y * y + c,     t * y * z - s * x,
            t * x * z - s * y, t * y * z + s * x, t * z * z + c)
    }

    pub fn scaling(k: &Vec3<T>) -> Mat3<T> {
        let mut output = Self::zero();
        output[0][0] = k.x;
        output[1][1] = k.y;
        output[2][2] = k.z;
        output
    }

    /// `x' = x + s * y`.
    pub fn shearing(s: T) -> Mat3<T> {
        let mut output = Self::identity();
        output[0][1] = s;
        output
    }

    /* Post-multiplying mutators: the new transform is applied first to incoming vectors. */

    pub fn translate(&mut self, t: &Vec2<T>) -> &mut Self {
        *self *= Self::translation(t);
        self
    }

    pub fn set_translation(&mut self, t: &Vec2<T>) -> &mut Self {
        *self = Self::translation(t);
        self
    }

    pub fn rotate(&mut self, angle: T) -> &mut Self {
        *self *= Self::rotation(angle);
        self
    }

    pub fn set_rotation(&mut self, angle: T) -> &mut Self {
        *self = Self::rotation(angle);
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

    pub fn scale(&mut self, k: &Vec3<T>) -> &mut Self {
        *self *= Self::scaling(k);
        self
    }

    pub fn set_scaling(&mut self, k: &Vec3<T>) -> &mut Self {
        *self = Self::scaling(k);
        self
    }

    pub fn shear(&mut self, s: T) -> &mut Self {
        *self *= Self::shearing(s);
        self
    }

    /// Reflects across the x axis (negates y).
    pub fn mirror_x(&mut self) -> &mut Self {
        *self *= Self::scaling(&Vec3::new(T::one(), -T::one(), T::one()));
        self
    }

    /// Reflects across the y axis (negates x).
    pub fn mirror_y(&mut self) -> &mut Self {
        *self *= Self::scaling(&Vec3::new(-T::one(), T::one(), T::one()));
        self
    }

    pub fn transpose(&mut self) -> &mut Self {
        *self = self.transposed();
        self
    }

    pub fn transposed(&self) -> Mat3<T> {
        let mut output = Self::zero();
        for row in 0..3 {
            for col in 0..3 {
                output[row][col] = self[col][row];
            }
        }
        output
    }

    pub fn determinant(&self) -> T {
        let m = &self.storage;
          m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Transposed cofactor matrix.
    pub fn adjoint(&self) -> Mat3<T> {
        let m = &self.storage;
        Self::from_components(
            m[1][1] * m[2][2] - m[1][2] * m[2][1],
            m[0][2] * m[2][1] - m[0][1] * m[2][2],
            m[0][1] * m[1][2] - m[0][2] * m[1][1],

            m[1][2] * m[2][0] - m[1][0] * m[2][2],
            m[0][0] * m[2][2] - m[0][2] * m[2][0],
            m[0][2] * m[1][0] - m[0][0] * m[1][2],

            m[1][0] * m[2][1] - m[1][1] * m[2][0],
            m[0][1] * m[2][0] - m[0][0] * m[2][1],
            m[0][0] * m[1][1] - m[0][1] * m[1][0])
    }

    /**
     * Adjoint divided by the determinant. Nothing checks for a singular matrix here: a zero
     * determinant yields inf/NaN entries. Use `try_inverse` when the input is not known to be
     * invertible.
     */
    pub fn inverse(&self) -> Mat3<T> {
        self.adjoint() * (T::one() / self.determinant())
    }

    pub fn try_inverse(&self) -> Result<Mat3<T>> {
        let det = self.determinant();
        if det == T::zero() || !det.is_finite() {
            return Err(Error::SingularMatrix);
        }
        Ok(self.adjoint() * (T::one() / det))
    }

    /// Embeds this matrix in the upper-left block of a 4x4 identity.
    pub fn to_mat4(&self) -> Mat4<T> {
        let mut output = Mat4::identity();
        for row in 0..3 {
            for col in 0..3 {
                output[row][col] = self[row][col];
            }
        }
        output
    }
}

impl<T> Default for Mat3<T> where T: Float {
    fn default() -> Mat3<T> {
        Self::identity()
    }
}

impl<T> From<Mat4<T>> for Mat3<T> where T: Float {
    fn from(m: Mat4<T>) -> Mat3<T> {
        m.to_mat3()
    }
}

impl<T> Display for Mat3<T> where T: Float + Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::new();
        output.push('(');
        for row in 0..3 {
            output.push('(');
            for col in 0..3 {
                output.push_str(&self[row][col].to_string());
                if col != 2 {
                    output.push_str(", ");
                }
            }
            output.push(')');
            if row != 2 {
                output.push_str(", ");
            }
        }
        output.push(')');
        write!(f, "{}", output)
    }
}

impl<T> Add for Mat3<T> where T: Float {
    type Output = Mat3<T>;
    fn add(mut self, _rhs: Mat3<T>) -> Mat3<T> {
        for row in 0..3 {
            for col in 0..3 {
                self[row][col] = self[row][col] + _rhs[row][col];
            }
        }
        self
    }
}

impl<T> Sub for Mat3<T> where T: Float {
    type Output = Mat3<T>;
    fn sub(mut self, _rhs: Mat3<T>) -> Mat3<T> {
        for row in 0..3 {
            for col in 0..3 {
                self[row][col] = self[row][col] - _rhs[row][col];
            }
        }
        self
    }
}

impl<T> Mul for Mat3<T> where T: Float {
    type Output = Mat3<T>;
    fn mul(self, _rhs: Mat3<T>) -> Mat3<T> {
        let mut output = Self::zero();
        for row in 0..3 {
            for col in 0..3 {
                output[row][col] = self[row][0] * _rhs[0][col]
                                 + self[row][1] * _rhs[1][col]
                                 + self[row][2] * _rhs[2][col];
            }
        }
        output
    }
}

impl<T> Mul<T> for Mat3<T> where T: Float {
    type Output = Mat3<T>;
    fn mul(mut self, _rhs: T) -> Mat3<T> {
        for row in 0..3 {
            for col in 0..3 {
                self[row][col] = self[row][col] * _rhs;
            }
        }
        self
    }
}

impl Mul<Mat3<f64>> for f64 {
    type Output = Mat3<f64>;
    fn mul(self, _rhs: Mat3<f64>) -> Mat3<f64> { _rhs * self }
}

impl Mul<Mat3<f32>> for f32 {
    type Output = Mat3<f32>;
    fn mul(self, _rhs: Mat3<f32>) -> Mat3<f32> { _rhs * self }
}

impl<T> Mul<Vec3<T>> for Mat3<T> where T: Float {
    type Output = Vec3<T>;
    fn mul(self, v: Vec3<T>) -> Vec3<T> {
        Vec3::new(
            self[0][0] * v.x + self[0][1] * v.y + self[0][2] * v.z,
            self[1][0] * v.x + self[1][1] * v.y + self[1][2] * v.z,
            self[2][0] * v.x + self[2][1] * v.y + self[2][2] * v.z)
    }
}

impl<T> Neg for Mat3<T> where T: Float {
    type Output = Mat3<T>;
    fn neg(self) -> Mat3<T> {
        self * -T::one()
    }
}

impl<T> AddAssign for Mat3<T> where T: Float {
    fn add_assign(&mut self, _rhs: Mat3<T>) {
        *self = *self + _rhs;
    }
}

impl<T> SubAssign for Mat3<T> where T: Float {
    fn sub_assign(&mut self, _rhs: Mat3<T>) {
        *self = *self - _rhs;
    }
}

impl<T> MulAssign for Mat3<T> where T: Float {
    fn mul_assign(&mut self, _rhs: Mat3<T>) {
        *self = *self * _rhs;
    }
}

impl<T> MulAssign<T> for Mat3<T> where T: Float {
    fn mul_assign(&mut self, _rhs: T) {
        *self = *self * _rhs;
    }
}

impl<T> Index<usize> for Mat3<T> where T: Float {
    type Output = [T; 3];

    fn index(&self, index: usize) -> &[T; 3] {
        &self.storage[index]
    }
}

impl<T> IndexMut<usize> for Mat3<T> where T: Float {
    fn index_mut(&mut self, index: usize) -> &mut [T; 3] {
        &mut self.storage[index]
    }
}

impl<T> AbsDiffEq for Mat3<T> where T: Float + AbsDiffEq<Epsilon = T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Mat3<T>, epsilon: T) -> bool {
        (0..3).all(|row| (0..3).all(|col| self[row][col].abs_diff_eq(&other[row][col], epsilon)))
    }
}
