//! Triangle meshes and nearest-hit ray queries on top of a small vector, matrix and
//! interpolation core.
//!
//! Scalars are `f64` unless the `single-precision` feature is enabled. Mesh bounding boxes are
//! recomputed only on request; call `Geometry::calc_aabb` after editing a mesh.

pub mod error;
pub mod geom;
pub mod math;

pub use crate::error::{Error, Result};
