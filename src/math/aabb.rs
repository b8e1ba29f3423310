use crate::math::{self, Scalar, Vector3};
use crate::math::ray::Ray;

use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box given by its componentwise `min` and `max` corners.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub fn new(min: Vector3, max: Vector3) -> Aabb {
        Aabb {min, max}
    }

    /**
     * The empty box: `min` at +infinity and `max` at -infinity. Folding any point into it
     * produces the degenerate box around that point.
     */
    pub fn empty() -> Aabb {
        Aabb {
            min: Vector3::splat(Scalar::INFINITY),
            max: Vector3::splat(Scalar::NEG_INFINITY),
        }
    }

    pub fn from_points<'a, I>(points: I) -> Aabb where I: IntoIterator<Item = &'a Vector3> {
        points.into_iter().fold(Self::empty(), |b, p| b.union_with(p))
    }

    /// True when no point has been folded in. A flat or single-point box is not empty.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn union_with(&self, k: &Vector3) -> Aabb {
        Aabb {
            min: self.min.comp_min(k),
            max: self.max.comp_max(k),
        }
    }

    pub fn expand(&mut self, k: &Vector3) -> &mut Self {
        *self = self.union_with(k);
        self
    }

    pub fn combine_with(&self, b: &Aabb) -> Aabb {
        Aabb {
            min: self.min.comp_min(&b.min),
            max: self.max.comp_max(&b.max),
        }
    }

    pub fn contains(&self, k: &Vector3) -> bool {
        k.x >= self.min.x && k.x <= self.max.x &&
        k.y >= self.min.y && k.y <= self.max.y &&
        k.z >= self.min.z && k.z <= self.max.z
    }

    pub fn diagonal(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /**
     * Slab test. Returns the parametric entry and exit distances `(t_min, t_max)` with `t_min`
     * clamped to zero, or `None` when the ray misses the box or the box lies behind the origin.
     * Zero direction components are handled through the infinities of the reciprocal.
     *
     * The exit distances are widened by `1 + 2 * gamma(3)`, so a ray passing exactly through
     * a point of the box (corners and edges included) is never rejected by rounding.
     */
    pub fn intersect(&self, ray: &Ray) -> Option<(Scalar, Scalar)> {
        if self.is_empty() {
            return None;
        }

        let widen = 1.0 + 2.0 * math::gamma(3);
        let mut t_min: Scalar = 0.0;
        let mut t_max = Scalar::INFINITY;
        for axis in 0..3 {
            let inv_dir = 1.0 / ray.direction[axis];
            let dir_is_neg = inv_dir < 0.0;
            let t0 = (self[dir_is_neg][axis] - ray.origin[axis]) * inv_dir;
            let t1 = (self[!dir_is_neg][axis] - ray.origin[axis]) * inv_dir * widen;

            // NaN (origin on a slab with zero direction) leaves the interval unchanged.
            if t0 > t_min {
                t_min = t0;
            }
            if t1 < t_max {
                t_max = t1;
            }
            if t_min > t_max {
                return None;
            }
        }
        Some((t_min, t_max))
    }

    pub fn intersects(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}

impl Default for Aabb {
    fn default() -> Aabb {
        Self::empty()
    }
}

/// `false` selects `min`, `true` selects `max`.
impl Index<bool> for Aabb {
    type Output = Vector3;

    fn index(&self, index: bool) -> &Vector3 {
        if index {
            &self.max
        }
        else {
            &self.min
        }
    }
}

impl IndexMut<bool> for Aabb {
    fn index_mut(&mut self, index: bool) -> &mut Vector3 {
        if index {
            &mut self.max
        }
        else {
            &mut self.min
        }
    }
}
