use crate::error::{Error, Result};
use crate::geom::geometry::{Geometry, GeometryKind, IntInfo};
use crate::geom::triangle::Triangle;
use crate::math::{Aabb, Ray, Vector2f, Vector3};

use std::fmt;
use std::fmt::Display;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub position: Vector3,
    pub normal: Vector3,
    pub uv: Vector2f,
}

impl Vertex {
    pub fn new(position: Vector3, normal: Vector3, uv: Vector2f) -> Vertex {
        Vertex {position, normal, uv}
    }

    /// A vertex with zero normal and UV.
    pub fn from_position(position: Vector3) -> Vertex {
        Vertex {position, ..Default::default()}
    }
}

/// A triangle of three vertices plus a cached face normal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    pub v: [Vertex; 3],
    pub normal: Vector3,
}

impl Face {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Face {
        let mut face = Face {v: [v0, v1, v2], normal: Vector3::zero()};
        face.calc_normal();
        face
    }

    /**
     * Recomputes the face normal as `normalize((v1 - v0) x (v2 - v0))`. Must be called after
     * editing any vertex position. Collinear or coincident vertices leave a NaN normal.
     */
    pub fn calc_normal(&mut self) -> &mut Self {
        let a = self.v[2].position - self.v[0].position;
        let b = self.v[1].position - self.v[0].position;
        self.normal = b.cross(&a).normalized();
        self
    }

    pub fn positions(&self) -> [Vector3; 3] {
        [self.v[0].position, self.v[1].position, self.v[2].position]
    }
}

/**
 * An ordered triangle soup. The mesh owns its faces; its bounding box is recomputed only when
 * `calc_aabb` is called, so callers must do that after adding or editing faces and before
 * querying.
 */
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    faces: Vec<Face>,
    aabb: Aabb,
    uv_scale: Vector2f,
    aabb_stale: bool,
}

impl Mesh {
    pub fn new() -> Mesh {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Mesh {
        Mesh {
            faces: Vec::with_capacity(capacity),
            aabb: Aabb::empty(),
            uv_scale: Vector2f::one(),
            aabb_stale: false,
        }
    }

    /**
     * Builds a mesh from shared vertex positions and index triples. Every vertex normal is set
     * to its face normal and UVs are zero. The bounding box is computed before returning.
     */
    pub fn from_triangles(positions: &[Vector3], indices: &[[usize; 3]]) -> Result<Mesh> {
        let mut mesh = Self::with_capacity(indices.len());
        for (triangle, tri) in indices.iter().enumerate() {
            let mut vertices = [Vertex::default(); 3];
            for (slot, &index) in tri.iter().enumerate() {
                let position = positions.get(index).ok_or(Error::VertexOutOfRange {
                    triangle,
                    index,
                    count: positions.len(),
                })?;
                vertices[slot] = Vertex::from_position(*position);
            }

            let mut face = Face::new(vertices[0], vertices[1], vertices[2]);
            let normal = face.normal;
            for vertex in face.v.iter_mut() {
                vertex.normal = normal;
            }
            mesh.add_face(face);
        }
        mesh.calc_aabb();
        debug!(positions = positions.len(), faces = mesh.face_count(), "built mesh from triangles");
        Ok(mesh)
    }

    /// Appends a face. No validation, no deduplication. Leaves the bounding box stale.
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
        self.aabb_stale = true;
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /**
     * Returns the face at `idx`. An index past the end yields the last face instead of
     * failing; `None` comes back only for an empty mesh. See `try_face` for a checked lookup.
     */
    pub fn face(&self, idx: usize) -> Option<&Face> {
        self.faces.get(idx).or_else(|| self.faces.last())
    }

    /// Mutable form of `face`, with the same clamping. Marks the bounding box stale.
    pub fn face_mut(&mut self, idx: usize) -> Option<&mut Face> {
        let last = self.faces.len().checked_sub(1)?;
        self.aabb_stale = true;
        self.faces.get_mut(idx.min(last))
    }

    pub fn try_face(&self, idx: usize) -> Result<&Face> {
        self.faces.get(idx).ok_or(Error::FaceOutOfRange {index: idx, count: self.faces.len()})
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// True when faces were added or handed out mutably since the last `calc_aabb`.
    pub fn is_aabb_stale(&self) -> bool {
        self.aabb_stale
    }

    /// Runs independent queries for a batch of rays across the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn intersect_batch(&self, rays: &[Ray]) -> Vec<Option<IntInfo<'_>>> {
        debug!(rays = rays.len(), faces = self.faces.len(), "intersecting ray batch");
        rays.par_iter().map(|ray| self.intersect(ray)).collect()
    }
}

impl Default for Mesh {
    fn default() -> Mesh {
        Self::new()
    }
}

impl Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mesh(faces: {})", self.faces.len())
    }
}

impl Geometry for Mesh {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Mesh
    }

    fn uv_scale(&self) -> Vector2f {
        self.uv_scale
    }

    fn set_uv_scale(&mut self, uv_scale: Vector2f) {
        self.uv_scale = uv_scale;
    }

    fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    fn calc_aabb(&mut self) {
        self.aabb = Aabb::empty();
        for face in &self.faces {
            for vertex in &face.v {
                self.aabb.expand(&vertex.position);
            }
        }
        self.aabb_stale = false;
        debug!(faces = self.faces.len(), min = %self.aabb.min, max = %self.aabb.max,
                "computed mesh bounds");
    }

    /**
     * Brute-force nearest hit. The mesh bounding box rejects rays first; every face is then
     * tested and the smallest `t` wins, with ties going to the earlier face.
     */
    fn intersect(&self, ray: &Ray) -> Option<IntInfo<'_>> {
        if !self.aabb.intersects(ray) {
            trace!(%ray, "ray misses mesh bounds");
            return None;
        }

        let mut nearest: Option<IntInfo<'_>> = None;
        for (index, face) in self.faces.iter().enumerate() {
            let mut tri = Triangle::from_face(face);
            tri.set_uv_scale(self.uv_scale);

            let hit = match tri.intersect(ray) {
                Some(hit) => hit,
                None => continue,
            };
            if nearest.map_or(true, |n| hit.t < n.t) {
                nearest = Some(IntInfo {
                    t: hit.t,
                    point: hit.point,
                    normal: hit.normal,
                    uv: hit.uv,
                    face: Some(index),
                    geometry: Some(self),
                });
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Scalar;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::ptr;

    fn vertex(x: Scalar, y: Scalar, z: Scalar) -> Vertex {
        Vertex::from_position(Vector3::new(x, y, z))
    }

    fn unit_face(z: Scalar) -> Face {
        Face::new(vertex(-1.0, -1.0, z), vertex(1.0, -1.0, z), vertex(0.0, 1.0, z))
    }

    fn forward() -> Ray {
        Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn test_face_normal_edge_convention() {
        let face = Face::new(vertex(0.0, 0.0, 0.0), vertex(1.0, 0.0, 0.0), vertex(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(face.normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);

        let flipped = Face::new(face.v[0], face.v[2], face.v[1]);
        assert_abs_diff_eq!(flipped.normal, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_calc_normal_after_edit() {
        let mut face = unit_face(0.0);
        face.v[2].position = Vector3::new(0.0, -1.0, 1.0);
        face.calc_normal();
        assert!((face.normal.length() - 1.0).abs() < 1e-6);
        assert!(face.normal.dot(&(face.v[2].position - face.v[0].position)).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_face_normal_is_not_finite() {
        let face = Face::new(vertex(0.0, 0.0, 0.0), vertex(1.0, 1.0, 1.0), vertex(2.0, 2.0, 2.0));
        assert!(!face.normal.is_finite());
    }

    #[test]
    fn test_new_mesh_defaults() {
        let mesh = Mesh::new();
        assert_eq!(mesh.kind(), GeometryKind::Mesh);
        assert_eq!(mesh.uv_scale(), Vector2f::new(1.0, 1.0));
        assert!(mesh.aabb().is_empty());
        assert!(mesh.face(0).is_none());
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_face_index_clamps_to_last() {
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(1.0));
        mesh.add_face(unit_face(2.0));
        mesh.add_face(unit_face(3.0));

        let last = mesh.face(mesh.face_count() - 1).unwrap();
        assert!(ptr::eq(mesh.face(usize::MAX).unwrap(), last));
        assert!(ptr::eq(mesh.face(3).unwrap(), last));
        assert!(ptr::eq(mesh.face(1).unwrap(), &mesh.faces()[1]));

        mesh.face_mut(99).unwrap().v[0].uv = Vector2f::new(0.5, 0.5);
        assert_eq!(mesh.faces()[2].v[0].uv, Vector2f::new(0.5, 0.5));
    }

    #[test]
    fn test_try_face_reports_out_of_range() {
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(1.0));
        assert!(mesh.try_face(0).is_ok());
        assert_eq!(mesh.try_face(5), Err(Error::FaceOutOfRange {index: 5, count: 1}));
    }

    #[test]
    fn test_calc_aabb_is_tight() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut mesh = Mesh::new();
        for _ in 0..50 {
            let mut p = || Vector3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0));
            let (a, b, c) = (p(), p(), p());
            mesh.add_face(Face::new(Vertex::from_position(a), Vertex::from_position(b),
                    Vertex::from_position(c)));
        }
        assert!(mesh.is_aabb_stale());
        mesh.calc_aabb();
        assert!(!mesh.is_aabb_stale());

        let b = *mesh.aabb();
        let mut touches_min = [false; 3];
        let mut touches_max = [false; 3];
        for face in mesh.faces() {
            for p in face.positions().iter() {
                assert!(b.contains(p));
                for axis in 0..3 {
                    touches_min[axis] |= p[axis] == b.min[axis];
                    touches_max[axis] |= p[axis] == b.max[axis];
                }
            }
        }
        assert_eq!(touches_min, [true; 3]);
        assert_eq!(touches_max, [true; 3]);
    }

    #[test]
    fn test_aabb_not_refreshed_implicitly() {
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(2.0));
        mesh.calc_aabb();
        mesh.add_face(unit_face(10.0));
        assert_eq!(mesh.aabb().max.z, 2.0);
        assert!(mesh.is_aabb_stale());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(5.0));
        mesh.add_face(unit_face(2.0));
        mesh.calc_aabb();

        let hit = mesh.intersect(&forward()).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-6);
        assert_eq!(hit.face, Some(1));
        assert_eq!(hit.geometry_kind(), Some(GeometryKind::Mesh));
    }

    #[test]
    fn test_ties_keep_earliest_face() {
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(3.0));
        mesh.add_face(unit_face(3.0));
        mesh.calc_aabb();
        assert_eq!(mesh.intersect(&forward()).unwrap().face, Some(0));
    }

    #[test]
    fn test_stale_empty_box_rejects_everything() {
        // Faces added but calc_aabb never called: the empty box rejects the ray up front.
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(2.0));
        assert!(mesh.intersect(&forward()).is_none());
        mesh.calc_aabb();
        assert!(mesh.intersect(&forward()).is_some());
    }

    #[test]
    fn test_bounds_keep_rays_through_vertices() {
        // Coordinates on a 1/64 grid keep `target - origin` exact, so every ray passes
        // exactly through the vertex it aims at.
        let mut rng = StdRng::seed_from_u64(1234);
        let mut grid = || rng.gen_range(-256i32..256) as Scalar / 64.0;
        let mut tri_hits = 0;
        for _ in 0..2000 {
            let mut p = || Vector3::new(grid(), grid(), grid());
            let face = Face::new(Vertex::from_position(p()), Vertex::from_position(p()),
                    Vertex::from_position(p()));
            let origin = p();

            let mut mesh = Mesh::new();
            mesh.add_face(face);
            mesh.calc_aabb();
            let tri = Triangle::from_face(&face);

            for target in face.positions().iter() {
                let ray = Ray::new(origin, *target - origin);
                let expected = tri.hit(&ray);
                if expected.is_some() {
                    tri_hits += 1;
                }
                assert_eq!(mesh.intersect(&ray).map(|h| h.t), expected.map(|h| h.t),
                        "{} aimed at {}", ray, target);
            }
        }
        assert!(tri_hits > 0);
    }

    #[test]
    fn test_intersection_out_param() {
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(2.0));
        mesh.calc_aabb();

        let mut info = IntInfo::new();
        assert!(mesh.intersection(&forward(), Some(&mut info)));
        assert!((info.t - 2.0).abs() < 1e-6);
        let hit_mesh = info.geometry.unwrap();
        assert_eq!(hit_mesh.kind(), GeometryKind::Mesh);
        assert!(ptr::eq(hit_mesh.aabb(), mesh.aabb()));

        let away = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, -1.0));
        let mut untouched = IntInfo::new();
        assert!(!mesh.intersection(&away, Some(&mut untouched)));
        assert!(untouched.geometry.is_none());
        assert!(untouched.t.is_infinite());
        assert!(mesh.intersection(&forward(), None));
    }

    #[test]
    fn test_uv_scale_applies_to_hits() {
        let mut mesh = Mesh::new();
        let mut face = unit_face(2.0);
        for vertex in face.v.iter_mut() {
            vertex.uv = Vector2f::new(1.0, 1.0);
        }
        mesh.add_face(face);
        mesh.set_uv_scale(Vector2f::new(3.0, 0.5));
        mesh.calc_aabb();
        let hit = mesh.intersect(&forward()).unwrap();
        assert_abs_diff_eq!(hit.uv, Vector2f::new(3.0, 0.5), epsilon = 1e-6);
    }

    #[test]
    fn test_from_triangles() {
        let positions = [
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 1.0, 1.0),
        ];
        let mesh = Mesh::from_triangles(&positions, &[[0, 1, 2], [0, 2, 3]]).unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert!(!mesh.is_aabb_stale());
        assert_eq!(mesh.aabb().max, Vector3::new(1.0, 1.0, 1.0));
        for face in mesh.faces() {
            assert_abs_diff_eq!(face.normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
            assert_eq!(face.v[1].normal, face.normal);
        }

        let err = Mesh::from_triangles(&positions, &[[0, 1, 2], [0, 2, 4]]).unwrap_err();
        assert_eq!(err, Error::VertexOutOfRange {triangle: 1, index: 4, count: 4});
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_batch_matches_serial() {
        let mut mesh = Mesh::new();
        mesh.add_face(unit_face(2.0));
        mesh.add_face(unit_face(5.0));
        mesh.calc_aabb();

        let rays: Vec<Ray> = (0..32)
            .map(|i| {
                let x = -2.0 + (i as Scalar) * 0.125;
                Ray::new(Vector3::new(x, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0))
            })
            .collect();
        let batch = mesh.intersect_batch(&rays);
        assert_eq!(batch.len(), rays.len());
        for (ray, hit) in rays.iter().zip(batch.iter()) {
            let serial = mesh.intersect(ray);
            assert_eq!(hit.map(|h| h.face), serial.map(|h| h.face));
        }
    }
}
