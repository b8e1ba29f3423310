use crate::math::{Aabb, Ray, Scalar, Vector2f, Vector3};

use std::fmt;
use std::fmt::Display;

/// Concrete kind of a `Geometry`, fixed when the value is constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Mesh,
    Triangle,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GeometryKind::Mesh => write!(f, "mesh"),
            GeometryKind::Triangle => write!(f, "triangle"),
        }
    }
}

/// Local properties at a ray hit.
#[derive(Copy, Clone, Debug)]
pub struct IntInfo<'a> {
    /// Distance along the ray, in multiples of the ray direction.
    pub t: Scalar,
    pub point: Vector3,
    /// Shading normal, interpolated from the vertex normals.
    pub normal: Vector3,
    /// Texture coordinates, already multiplied by the geometry's UV scale.
    pub uv: Vector2f,
    /// Index of the hit face when the geometry is a mesh.
    pub face: Option<usize>,
    /// The geometry that was hit. Borrowed, never owned.
    pub geometry: Option<&'a dyn Geometry>,
}

impl<'a> IntInfo<'a> {
    pub fn new() -> IntInfo<'a> {
        IntInfo {
            t: Scalar::INFINITY,
            point: Vector3::zero(),
            normal: Vector3::zero(),
            uv: Vector2f::zero(),
            face: None,
            geometry: None,
        }
    }

    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        self.geometry.map(|g| g.kind())
    }
}

impl<'a> Default for IntInfo<'a> {
    fn default() -> IntInfo<'a> {
        Self::new()
    }
}

/// A renderable surface that rays can be tested against.
pub trait Geometry : fmt::Debug + Send + Sync {
    fn kind(&self) -> GeometryKind;

    /// Scale applied to texture coordinates reported in hits. Defaults to (1, 1).
    fn uv_scale(&self) -> Vector2f;

    fn set_uv_scale(&mut self, uv_scale: Vector2f);

    /**
     * The cached bounding box. It is only as fresh as the last `calc_aabb` call; nothing
     * recomputes it implicitly.
     */
    fn aabb(&self) -> &Aabb;

    fn calc_aabb(&mut self);

    /**
     * Returns the nearest hit in front of the ray origin, or `None`. Implementations handle
     * rays whose direction is not unit length.
     */
    fn intersect(&self, ray: &Ray) -> Option<IntInfo<'_>>;

    /**
     * Out-parameter form of `intersect`. On a hit the result is written to `info` (when one is
     * given) and true is returned; on a miss `info` is left untouched.
     */
    fn intersection<'a>(&'a self, ray: &Ray, info: Option<&mut IntInfo<'a>>) -> bool {
        match self.intersect(ray) {
            Some(hit) => {
                if let Some(out) = info {
                    *out = hit;
                }
                true
            },
            None => false,
        }
    }
}
