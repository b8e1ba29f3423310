use approx::AbsDiffEq;
use num::traits::Float;
use std::fmt;
use std::fmt::Display;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub,
        SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2<T> where T: Float {
    pub x: T,
    pub y: T,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3<T> where T: Float {
    pub x: T,
    pub y: T,
    pub z: T,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec4<T> where T: Float {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

/// Componentwise arithmetic shared by every vector width. Each operator returns a new value;
/// only the `*Assign` forms touch the left operand.
macro_rules! impl_vector {
    ($name:ident, $n:literal, $($field:ident => $idx:literal),+) => {
        impl<T> $name<T> where T: Float {
            pub fn new($($field: T),+) -> $name<T> {
                $name {$($field: $field),+}
            }

            pub fn zero() -> $name<T> {
                $name {$($field: T::zero()),+}
            }

            pub fn one() -> $name<T> {
                $name {$($field: T::one()),+}
            }

            /// Returns a vector with `k` in every component.
            pub fn splat(k: T) -> $name<T> {
                $name {$($field: k),+}
            }

            pub fn comp_mult(&self, other: &$name<T>) -> $name<T> {
                $name {$($field: self.$field * other.$field),+}
            }

            pub fn comp_div(&self, other: &$name<T>) -> $name<T> {
                $name {$($field: self.$field / other.$field),+}
            }

            pub fn comp_min(&self, other: &$name<T>) -> $name<T> {
                $name {$($field: self.$field.min(other.$field)),+}
            }

            pub fn comp_max(&self, other: &$name<T>) -> $name<T> {
                $name {$($field: self.$field.max(other.$field)),+}
            }

            pub fn dot(&self, other: &$name<T>) -> T {
                let mut sum = T::zero();
                $(sum = sum + self.$field * other.$field;)+
                sum
            }

            pub fn length_squared(&self) -> T {
                self.dot(self)
            }

            pub fn length(&self) -> T {
                self.length_squared().sqrt()
            }

            /**
             * Returns a unit-length copy. A zero-length vector produces NaN components; callers
             * that can hit degenerate input are expected to check for that themselves.
             */
            pub fn normalized(&self) -> $name<T> {
                let length = self.length();
                $name {$($field: self.$field / length),+}
            }

            pub fn normalize(&mut self) -> &mut Self {
                *self = self.normalized();
                self
            }

            pub fn is_exactly_zero(&self) -> bool {
                true $(&& self.$field == T::zero())+
            }

            pub fn is_finite(&self) -> bool {
                true $(&& self.$field.is_finite())+
            }

            pub fn to_array(&self) -> [T; $n] {
                [$(self.$field),+]
            }
        }

        impl<T> From<[T; $n]> for $name<T> where T: Float {
            fn from(a: [T; $n]) -> $name<T> {
                $name {$($field: a[$idx]),+}
            }
        }

        impl<T> Add for $name<T> where T: Float {
            type Output = $name<T>;
            fn add(mut self, _rhs: $name<T>) -> $name<T> {
                $(self.$field = self.$field + _rhs.$field;)+
                self
            }
        }

        impl<T> Sub for $name<T> where T: Float {
            type Output = $name<T>;
            fn sub(mut self, _rhs: $name<T>) -> $name<T> {
                $(self.$field = self.$field - _rhs.$field;)+
                self
            }
        }

        impl<T> Mul<T> for $name<T> where T: Float {
            type Output = $name<T>;
            fn mul(mut self, _rhs: T) -> $name<T> {
                $(self.$field = self.$field * _rhs;)+
                self
            }
        }

        impl Mul<$name<f64>> for f64 {
            type Output = $name<f64>;
            fn mul(self, _rhs: $name<f64>) -> $name<f64> { _rhs * self }
        }

        impl Mul<$name<f32>> for f32 {
            type Output = $name<f32>;
            fn mul(self, _rhs: $name<f32>) -> $name<f32> { _rhs * self }
        }

        impl<T> Div<T> for $name<T> where T: Float {
            type Output = $name<T>;
            fn div(mut self, _rhs: T) -> $name<T> {
                $(self.$field = self.$field / _rhs;)+
                self
            }
        }

        impl<T> Neg for $name<T> where T: Float {
            type Output = $name<T>;
            fn neg(mut self) -> $name<T> {
                $(self.$field = -self.$field;)+
                self
            }
        }

        impl<T> AddAssign for $name<T> where T: Float {
            fn add_assign(&mut self, _rhs: $name<T>) {
                *self = *self + _rhs;
            }
        }

        impl<T> SubAssign for $name<T> where T: Float {
            fn sub_assign(&mut self, _rhs: $name<T>) {
                *self = *self - _rhs;
            }
        }

        impl<T> MulAssign<T> for $name<T> where T: Float {
            fn mul_assign(&mut self, _rhs: T) {
                *self = *self * _rhs;
            }
        }

        impl<T> DivAssign<T> for $name<T> where T: Float {
            fn div_assign(&mut self, _rhs: T) {
                *self = *self / _rhs;
            }
        }

        impl<T> Index<usize> for $name<T> where T: Float {
            type Output = T;

            fn index(&self, index: usize) -> &T {
                match index {
                    $($idx => &self.$field,)+
                    _ => panic!("{} index out of range: {}", stringify!($name), index),
                }
            }
        }

        impl<T> IndexMut<usize> for $name<T> where T: Float {
            fn index_mut(&mut self, index: usize) -> &mut T {
                match index {
                    $($idx => &mut self.$field,)+
                    _ => panic!("{} index out of range: {}", stringify!($name), index),
                }
            }
        }

        impl<T> AbsDiffEq for $name<T> where T: Float + AbsDiffEq<Epsilon = T> {
            type Epsilon = T;

            fn default_epsilon() -> T {
                T::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &$name<T>, epsilon: T) -> bool {
                true $(&& self.$field.abs_diff_eq(&other.$field, epsilon))+
            }
        }
    };
}

impl_vector!(Vec2, 2, x => 0, y => 1);
impl_vector!(Vec3, 3, x => 0, y => 1, z => 2);
impl_vector!(Vec4, 4, x => 0, y => 1, z => 2, w => 3);

impl<T> Vec3<T> where T: Float {
    pub fn cross(&self, other: &Vec3<T>) -> Vec3<T> {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x)
    }

    /// Promotes to a homogeneous vector with the given `w`.
    pub fn extend(&self, w: T) -> Vec4<T> {
        Vec4::new(self.x, self.y, self.z, w)
    }

    pub fn xy(&self) -> Vec2<T> {
        Vec2::new(self.x, self.y)
    }
}

impl<T> Vec4<T> where T: Float {
    /// Drops `w` without dividing by it.
    pub fn truncate(&self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl<T> Vec2<T> where T: Float {
    pub fn extend(&self, z: T) -> Vec3<T> {
        Vec3::new(self.x, self.y, z)
    }
}

impl<T> Display for Vec2<T> where T: Float + Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T> Display for Vec3<T> where T: Float + Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl<T> Display for Vec4<T> where T: Float + Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}
