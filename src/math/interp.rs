//! Scalar interpolation and spline evaluation.
//!
//! Every function is pure. Apart from the smoothstep pair, which always lands in `[0, 1]`, a
//! parameter outside `[0, 1]` extrapolates under the same formula.

use crate::math::{Scalar, PI};

/**
 * Hermite remap of `x` from `[edge0, edge1]` to `[0, 1]` using `3x^2 - 2x^3`.
 * Returns 0 at or below `edge0` and 1 at or above `edge1`.
 */
pub fn smoothstep(edge0: Scalar, edge1: Scalar, x: Scalar) -> Scalar {
    if x <= edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    let x = (x - edge0) / (edge1 - edge0);
    x * x * (3.0 - 2.0 * x)
}

/**
 * Perlin's variant of smoothstep, `6x^5 - 15x^4 + 10x^3`, with zero first and second
 * derivatives at both edges.
 */
pub fn smoothstep_perlin(edge0: Scalar, edge1: Scalar, x: Scalar) -> Scalar {
    if x <= edge0 {
        return 0.0;
    }
    if x >= edge1 {
        return 1.0;
    }
    let x = (x - edge0) / (edge1 - edge0);
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/* Simple: blend two endpoints. */

pub fn step(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    if t < 0.5 { a } else { b }
}

pub fn linear(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    a * (1.0 - t) + b * t
}

pub fn cosine(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    linear(a, b, (1.0 - (t * PI).cos()) * 0.5)
}

/// Starts slow, ends fast.
pub fn acceleration(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    linear(a, b, t * t)
}

/// Starts fast, ends slow.
pub fn deceleration(a: Scalar, b: Scalar, t: Scalar) -> Scalar {
    let s = 1.0 - t;
    linear(a, b, 1.0 - s * s)
}

/* Splines: interpolate between the two middle values. */

pub fn cubic(a: Scalar, b: Scalar, c: Scalar, d: Scalar, t: Scalar) -> Scalar {
    let p = (d - c) - (a - b);
    let q = (a - b) - p;
    let r = c - a;
    let t2 = t * t;
    p * t2 * t + q * t2 + r * t + b
}

/**
 * Cubic Hermite segment from `a` to `b` with outgoing tangent `tang1` at `a` and incoming
 * tangent `tang2` at `b`.
 */
pub fn hermite(tang1: Scalar, a: Scalar, b: Scalar, tang2: Scalar, t: Scalar) -> Scalar {
    let t2 = t * t;
    let t3 = t2 * t;
    let h1 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h2 = -2.0 * t3 + 3.0 * t2;
    let h3 = t3 - 2.0 * t2 + t;
    let h4 = t3 - t2;
    h1 * a + h2 * b + h3 * tang1 + h4 * tang2
}

/**
 * Cardinal spline through `b` and `c`. `p` is the tension: 0 gives Catmull-Rom, 1 gives zero
 * tangents.
 */
pub fn cardinal(a: Scalar, b: Scalar, c: Scalar, d: Scalar, p: Scalar, t: Scalar) -> Scalar {
    let k = (1.0 - p) * 0.5;
    hermite(k * (c - a), b, c, k * (d - b), t)
}

pub fn catmullrom(a: Scalar, b: Scalar, c: Scalar, d: Scalar, t: Scalar) -> Scalar {
    cardinal(a, b, c, d, 0.0, t)
}

/* Bezier: interpolate between the first and last values. */

pub fn bezier_quadratic(a: Scalar, b: Scalar, c: Scalar, t: Scalar) -> Scalar {
    let s = 1.0 - t;
    s * s * a + 2.0 * s * t * b + t * t * c
}

pub fn bezier_cubic(a: Scalar, b: Scalar, c: Scalar, d: Scalar, t: Scalar) -> Scalar {
    let s = 1.0 - t;
    s * s * s * a + 3.0 * s * s * t * b + 3.0 * s * t * t * c + t * t * t * d
}
