//! Convex polygon primitive.
//!
//! Hits are found on the supporting plane and then classified against the
//! edges. Points on an edge or at a vertex are boundary cases and do not
//! count as hits.

use vista_math::{align_zero, is_zero, Interval, Point3, Vec3, VectorExt};

use crate::{GeometryError, GeometryResult, Plane, Ray};

/// A planar convex polygon with a consistent vertex winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
}

impl Polygon {
    /// Create a polygon from its vertices in boundary order.
    ///
    /// Rejects fewer than three vertices, duplicate or collinear
    /// neighbours, vertices off the plane of the first three, and
    /// non-convex outlines.
    pub fn new(vertices: Vec<Point3>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])
            .map_err(|_| GeometryError::CollinearVertices(1))?;
        let normal = plane.normal();

        for (i, vertex) in vertices.iter().enumerate().skip(3) {
            if !is_zero((*vertex - vertices[0]).dot(normal)) {
                return Err(GeometryError::NotCoplanar(i));
            }
        }

        // Every corner must turn the same way around the normal
        let n = vertices.len();
        let mut positive = None;
        for i in 0..n {
            let incoming = vertices[i] - vertices[(i + n - 1) % n];
            let outgoing = vertices[(i + 1) % n] - vertices[i];
            let turn = incoming.cross(outgoing);
            if turn.is_degenerate() {
                return Err(GeometryError::CollinearVertices(i));
            }

            let left = turn.dot(normal) > 0.0;
            match positive {
                None => positive = Some(left),
                Some(expected) if expected != left => return Err(GeometryError::NotConvex(i)),
                Some(_) => {}
            }
        }

        // A self-intersecting outline can turn the same way at every corner,
        // so each edge line must also keep all other vertices strictly on
        // the inner side
        let inner = if positive == Some(true) { 1.0 } else { -1.0 };
        for i in 0..n {
            let start = vertices[i];
            let edge = vertices[(i + 1) % n] - start;
            for (j, vertex) in vertices.iter().enumerate() {
                if j == i || j == (i + 1) % n {
                    continue;
                }
                let side = align_zero(edge.cross(*vertex - start).dot(normal));
                if side * inner <= 0.0 {
                    return Err(GeometryError::NotConvex(j));
                }
            }
        }

        Ok(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn normal(&self) -> Vec3 {
        self.plane.normal()
    }

    pub fn hit_distances(&self, ray: &Ray, window: Interval) -> Option<Vec<f64>> {
        let distances = self.plane.hit_distances(ray, window)?;
        let point = ray.at(distances[0]);
        self.is_interior(point).then_some(distances)
    }

    /// Strict interior test for a point already on the supporting plane.
    ///
    /// The sign of `(Vi→Vi+1 × Vi→P)·N` must agree for every edge. A point
    /// on a vertex, on an edge line, or with a vanishing cross product is
    /// rejected outright.
    fn is_interior(&self, point: Point3) -> bool {
        let normal = self.plane.normal();
        let n = self.vertices.len();
        let mut positive = None;

        for i in 0..n {
            let start = self.vertices[i];
            let edge = self.vertices[(i + 1) % n] - start;
            let to_point = point - start;

            if to_point.is_degenerate() {
                return false;
            }

            let alignment = edge.normalize().dot(to_point.normalize());
            if is_zero(alignment.abs() - 1.0) {
                return false;
            }

            let cross = edge.cross(to_point);
            if cross.is_degenerate() {
                return false;
            }

            let side = align_zero(cross.dot(normal));
            if side == 0.0 {
                return false;
            }

            match positive {
                None => positive = Some(side > 0.0),
                Some(expected) if expected != (side > 0.0) => return false,
                Some(_) => {}
            }
        }

        true
    }
}
