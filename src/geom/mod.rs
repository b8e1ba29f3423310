mod geometry;
pub use crate::geom::geometry::{Geometry, GeometryKind, IntInfo};

mod mesh;
pub use crate::geom::mesh::{Face, Mesh, Vertex};

mod triangle;
pub use crate::geom::triangle::{Triangle, TriangleHit};
