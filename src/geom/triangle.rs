use crate::geom::geometry::{Geometry, GeometryKind, IntInfo};
use crate::geom::mesh::{Face, Vertex};
use crate::math::{self, Aabb, Ray, Scalar, Vector2f, Vector3};

/// A free-standing triangle. Meshes build one of these per face while answering a ray query.
#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    pub v: [Vertex; 3],
    pub normal: Vector3,
    uv_scale: Vector2f,
    aabb: Aabb,
}

/// Barycentric hit on a triangle: distance along the ray and the weights of `v[1]` and `v[2]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleHit {
    pub t: Scalar,
    pub u: Scalar,
    pub v: Scalar,
}

impl Triangle {
    /// Builds a triangle, computing its face normal and bounding box.
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Triangle {
        let face = Face::new(v0, v1, v2);
        Self::from_face(&face)
    }

    /// Copies the vertices and cached normal of a face and bounds them.
    pub fn from_face(face: &Face) -> Triangle {
        let mut tri = Triangle {
            v: face.v,
            normal: face.normal,
            uv_scale: Vector2f::one(),
            aabb: Aabb::empty(),
        };
        tri.calc_aabb();
        tri
    }

    /**
     * Ray/triangle test using the Moller-Trumbore algorithm.
     * See <http://en.wikipedia.org/wiki/Moller-Trumbore_intersection_algorithm> for more info.
     * Degenerate triangles and rays parallel to the plane never hit; neither do hits at or
     * behind the origin. The parallel cutoff is relative to the edge and direction lengths,
     * so it holds at any triangle scale.
     */
    pub fn hit(&self, ray: &Ray) -> Option<TriangleHit> {
        let a = self.v[0].position;
        let edge1 = self.v[1].position - a;
        let edge2 = self.v[2].position - a;

        let p = ray.direction.cross(&edge2);
        let det = edge1.dot(&p);
        let scale = edge1.length() * edge2.length() * ray.direction.length();
        if det.abs() <= math::EPSILON * scale {
            return None; // No hit on plane.
        }

        let inv_det = 1.0 / det;
        let t = ray.origin - a;
        let u = t.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None; // In plane but not triangle.
        }

        let q = t.cross(&edge1);
        let v = ray.direction.dot(&q) * inv_det;
        if v < 0.0 || (u + v) > 1.0 {
            return None; // In plane but not triangle.
        }

        let dist = edge2.dot(&q) * inv_det;
        if !math::is_positive(dist) {
            return None; // In triangle but behind us.
        }

        Some(TriangleHit {t: dist, u, v})
    }

    /// Fills in the hit attributes for a barycentric hit.
    fn surface_at<'a>(&'a self, ray: &Ray, hit: &TriangleHit) -> IntInfo<'a> {
        let w = 1.0 - hit.u - hit.v;

        let blended = self.v[0].normal * w + self.v[1].normal * hit.u + self.v[2].normal * hit.v;
        let normal = if blended.is_exactly_zero() || !blended.is_finite() {
            self.normal
        }
        else {
            blended.normalized()
        };

        let uv = self.v[0].uv * w + self.v[1].uv * hit.u + self.v[2].uv * hit.v;

        IntInfo {
            t: hit.t,
            point: ray.at(hit.t),
            normal,
            uv: uv.comp_mult(&self.uv_scale),
            face: None,
            geometry: Some(self),
        }
    }
}

impl Geometry for Triangle {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Triangle
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
        self.aabb = Aabb::from_points(self.v.iter().map(|vertex| &vertex.position));
    }

    fn intersect(&self, ray: &Ray) -> Option<IntInfo<'_>> {
        self.hit(ray).map(|hit| self.surface_at(ray, &hit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn vertex(x: Scalar, y: Scalar, z: Scalar) -> Vertex {
        Vertex::from_position(Vector3::new(x, y, z))
    }

    fn unit_triangle(z: Scalar) -> Triangle {
        Triangle::new(vertex(-1.0, -1.0, z), vertex(1.0, -1.0, z), vertex(0.0, 1.0, z))
    }

    fn forward() -> Ray {
        Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn test_hit_in_front() {
        let tri = unit_triangle(2.0);
        let hit = tri.intersect(&forward()).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-6);
        assert_abs_diff_eq!(hit.point, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-6);
        assert_eq!(hit.geometry_kind(), Some(GeometryKind::Triangle));
        assert_eq!(hit.face, None);
    }

    #[test]
    fn test_miss_behind_origin() {
        assert!(unit_triangle(-2.0).intersect(&forward()).is_none());
    }

    #[test]
    fn test_miss_outside_edges() {
        let ray = Ray::new(Vector3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(unit_triangle(2.0).hit(&ray).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 2.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(unit_triangle(2.0).hit(&ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let tri = Triangle::new(vertex(0.0, 0.0, 1.0), vertex(1.0, 0.0, 1.0),
                vertex(2.0, 0.0, 1.0));
        let ray = Ray::new(Vector3::new(0.5, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(tri.hit(&ray).is_none());
    }

    #[test]
    fn test_tiny_triangles_still_hit() {
        for &side in [1e-3, 1e-6, 1e-9, 1e-12].iter() {
            let tri = Triangle::new(vertex(0.0, 0.0, 1.0), vertex(side, 0.0, 1.0),
                    vertex(0.0, side, 1.0));
            let ray = Ray::new(Vector3::new(side * 0.25, side * 0.25, 0.0),
                    Vector3::new(0.0, 0.0, 1.0));
            let hit = tri.hit(&ray).unwrap();
            assert!((hit.t - 1.0).abs() < 1e-6);
            assert!((hit.u - 0.25).abs() < 1e-3);
        }
    }

    #[test]
    fn test_non_unit_direction_scales_t() {
        let ray = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 4.0));
        let hit = unit_triangle(2.0).hit(&ray).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_barycentric_attributes() {
        let mut a = vertex(0.0, 0.0, 1.0);
        let mut b = vertex(1.0, 0.0, 1.0);
        let mut c = vertex(0.0, 1.0, 1.0);
        a.uv = Vector2f::new(0.0, 0.0);
        b.uv = Vector2f::new(1.0, 0.0);
        c.uv = Vector2f::new(0.0, 1.0);
        a.normal = Vector3::new(0.0, 0.0, 1.0);
        b.normal = Vector3::new(0.0, 0.0, 1.0);
        c.normal = Vector3::new(0.0, 0.0, 1.0);
        let mut tri = Triangle::new(a, b, c);
        tri.set_uv_scale(Vector2f::new(2.0, 4.0));

        let ray = Ray::new(Vector3::new(0.25, 0.5, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let hit = tri.intersect(&ray).unwrap();
        assert_abs_diff_eq!(hit.uv, Vector2f::new(0.5, 2.0), epsilon = 1e-6);
        assert_abs_diff_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_missing_vertex_normals_fall_back_to_face_normal() {
        let tri = unit_triangle(3.0);
        let hit = tri.intersect(&forward()).unwrap();
        assert_abs_diff_eq!(hit.normal, tri.normal, epsilon = 1e-6);
    }

    #[test]
    fn test_own_bounding_box() {
        let tri = unit_triangle(2.0);
        assert_eq!(tri.aabb().min, Vector3::new(-1.0, -1.0, 2.0));
        assert_eq!(tri.aabb().max, Vector3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_out_param_untouched_on_miss() {
        let tri = unit_triangle(-1.0);
        let mut info = IntInfo::new();
        info.t = 42.0;
        assert!(!tri.intersection(&forward(), Some(&mut info)));
        assert_eq!(info.t, 42.0);
        assert!(info.geometry.is_none());
        assert!(!tri.intersection(&forward(), None));
    }
}
