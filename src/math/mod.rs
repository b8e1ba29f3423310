//! Vector and matrix algebra, rays, bounding boxes and scalar interpolation.

mod aabb;
pub use self::aabb::Aabb;

pub mod interp;

mod matrix3;
pub use self::matrix3::Mat3;

mod matrix4;
pub use self::matrix4::Mat4;

mod ray;
pub use self::ray::Ray;

mod vector;
pub use self::vector::{Vec2, Vec3, Vec4};

/// The library-wide floating point type. Selected once per build with the `single-precision`
/// feature; every geometric quantity in the crate uses it.
#[cfg(not(feature = "single-precision"))]
pub type Scalar = f64;
#[cfg(feature = "single-precision")]
pub type Scalar = f32;

#[cfg(not(feature = "single-precision"))]
pub use std::f64::consts::PI;
#[cfg(feature = "single-precision")]
pub use std::f32::consts::PI;

pub type Vector2f = Vec2<Scalar>;
pub type Vector3 = Vec3<Scalar>;
pub type Vector3f = Vec3<Scalar>;
pub type Vector4f = Vec4<Scalar>;
pub type Matrix3x3f = Mat3<Scalar>;
pub type Matrix4x4f = Mat4<Scalar>;

/// Machine epsilon of `Scalar`, used for the hit-distance and determinant cutoffs.
pub const EPSILON: Scalar = Scalar::EPSILON;

pub fn clamp(x: Scalar, a: Scalar, b: Scalar) -> Scalar {
    if x < a {
        a
    }
    else if x > b {
        b
    }
    else {
        x
    }
}

pub fn clamp_unit(x: Scalar) -> Scalar {
    clamp(x, 0.0, 1.0)
}

/**
 * Linearly interpolates between x and y. Where a = 0, x is returned, and
 * where a = 1, y is returned. If a < 0 or a > 1, this function will
 * extrapolate.
 */
pub fn lerp(x: Scalar, y: Scalar, a: Scalar) -> Scalar {
    x + a * (y - x)
}

/**
 * Determines whether a number is zero, within a small epsilon.
 */
pub fn is_nearly_zero(x: Scalar) -> bool {
    x.abs() < EPSILON
}

/**
 * Determines whether a number is positive, within a small epsilon.
 */
pub fn is_positive(x: Scalar) -> bool {
    x > EPSILON
}

/**
 * Conservative relative error bound for `n` chained floating point operations, as in PBRT's
 * `gamma(n)`. Widening a computed value by a factor of `1 + gamma(n)` covers its rounding.
 */
pub fn gamma(n: u32) -> Scalar {
    let n_eps = n as Scalar * EPSILON * 0.5;
    n_eps / (1.0 - n_eps)
}

pub fn deg_to_rad(degrees: Scalar) -> Scalar {
    degrees * (PI / 180.0)
}

pub fn rad_to_deg(radians: Scalar) -> Scalar {
    radians * (180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-1.0, 0.0, 2.0), 0.0);
        assert_eq!(clamp(3.0, 0.0, 2.0), 2.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert_eq!(lerp(1.0, 3.0, 0.5), 2.0);
        assert_eq!(lerp(1.0, 3.0, 2.0), 5.0);
    }

    #[test]
    fn test_epsilon_predicates() {
        assert!(is_nearly_zero(0.0));
        assert!(!is_nearly_zero(1e-3));
        assert!(is_positive(1e-3));
        assert!(!is_positive(0.0));
    }

    #[test]
    fn test_gamma_bounds() {
        assert_eq!(gamma(0), 0.0);
        assert!(gamma(3) > 1.5 * EPSILON);
        assert!(gamma(3) < 2.0 * EPSILON);
        assert!(gamma(3) < gamma(5));
    }

    #[test]
    fn test_angle_conversion() {
        assert!((deg_to_rad(180.0) - PI).abs() < 1e-6);
        assert!((rad_to_deg(PI / 2.0) - 90.0).abs() < 1e-4);
    }
}
