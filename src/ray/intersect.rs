//! Ray intersections with planes, triangles and spheres.
//!
//! Planes are given by three points of a triangle. Intersections are computed
//! in a frame translated so that the ray origin sits at zero, and translated
//! back before they are returned.

use nalgebra::{Point3, Vector3};

use super::Ray;
use crate::precision;

/// Where a ray's line crosses a triangle's plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneIntersection {
    /// Intersection point in world space.
    pub point: Point3<f64>,
    /// Barycentric weights `(u, v, w)` of `point` for the triangle's
    /// vertices `(a, b, c)`.
    pub barycentric: [f64; 3],
}

impl PlaneIntersection {
    /// True when the point lies inside the triangle or on its boundary.
    pub fn is_within_triangle(&self) -> bool {
        self.barycentric.iter().all(|w| !w.is_nan() && *w >= 0.0)
    }
}

/// Result of a ray/sphere test. Only the points carried by the variant are
/// meaningful.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SphereIntersection {
    /// The line misses the sphere, or the sphere is entirely behind `p1`.
    Miss,
    /// One hit: a tangent point, or the exit point when `p1` is inside.
    Single(Point3<f64>),
    /// Entry and exit points, nearest first.
    Double(Point3<f64>, Point3<f64>),
}

impl SphereIntersection {
    /// Number of intersection points (0, 1 or 2).
    pub fn count(&self) -> usize {
        match self {
            SphereIntersection::Miss => 0,
            SphereIntersection::Single(_) => 1,
            SphereIntersection::Double(_, _) => 2,
        }
    }

    /// The intersection points, nearest first.
    pub fn points(&self) -> Vec<Point3<f64>> {
        match *self {
            SphereIntersection::Miss => vec![],
            SphereIntersection::Single(p) => vec![p],
            SphereIntersection::Double(near, far) => vec![near, far],
        }
    }
}

impl Ray {
    /// Intersects this ray's line with the plane of triangle `(ta, tb, tc)`.
    ///
    /// Returns `None` when the heading is zero, the triangle is degenerate,
    /// or the ray runs parallel to (or inside) the plane.
    pub fn plane_intersection(
        &self,
        ta: &Point3<f64>,
        tb: &Point3<f64>,
        tc: &Point3<f64>,
    ) -> Option<PlaneIntersection> {
        let a = ta - self.p1;
        let b = tb - self.p1;
        let c = tc - self.p1;

        let u = b - a;
        let v = c - a;
        let n = u.cross(&v);
        let dir = self.heading();

        let scale = n.norm() * dir.norm();
        let denom = n.dot(&dir);
        if scale < precision::RESOLUTION || denom.abs() <= precision::PARALLEL * scale {
            log::trace!("ray {} is parallel to the plane or degenerate", self);
            return None;
        }

        let w0 = -a;
        let r = -n.dot(&w0) / denom;
        let hit = dir * r;
        let barycentric = Self::barycentric(&a, &b, &c, &hit);

        Some(PlaneIntersection {
            point: self.p1 + hit,
            barycentric,
        })
    }

    /// Point where this ray's line meets the plane of `(ta, tb, tc)`.
    #[inline]
    pub fn intersects_plane(
        &self,
        ta: &Point3<f64>,
        tb: &Point3<f64>,
        tc: &Point3<f64>,
    ) -> Option<Point3<f64>> {
        self.plane_intersection(ta, tb, tc).map(|hit| hit.point)
    }

    /// As [`Ray::plane_intersection`], but only when the point falls
    /// inside the triangle `(ta, tb, tc)`.
    pub fn intersects_triangle(
        &self,
        ta: &Point3<f64>,
        tb: &Point3<f64>,
        tc: &Point3<f64>,
    ) -> Option<PlaneIntersection> {
        self.plane_intersection(ta, tb, tc)
            .filter(PlaneIntersection::is_within_triangle)
    }

    /// Barycentric coordinates of `p` in triangle `(a, b, c)`.
    ///
    /// `p` is assumed to lie in the triangle's plane. Areas are measured in
    /// the axis plane the triangle is least perpendicular to, which keeps
    /// the denominator away from zero.
    pub fn barycentric(
        a: &Vector3<f64>,
        b: &Vector3<f64>,
        c: &Vector3<f64>,
        p: &Vector3<f64>,
    ) -> [f64; 3] {
        let m = (b - a).cross(&(c - a));

        let x = m.x.abs();
        let y = m.y.abs();
        let z = m.z.abs();

        let (nu, nv, ood) = if x >= y && x >= z {
            (
                Self::tri_area_2d(p.y, p.z, b.y, b.z, c.y, c.z),
                Self::tri_area_2d(p.y, p.z, c.y, c.z, a.y, a.z),
                1.0 / m.x,
            )
        } else if y >= x && y >= z {
            (
                Self::tri_area_2d(p.x, p.z, b.x, b.z, c.x, c.z),
                Self::tri_area_2d(p.x, p.z, c.x, c.z, a.x, a.z),
                1.0 / -m.y,
            )
        } else {
            (
                Self::tri_area_2d(p.x, p.y, b.x, b.y, c.x, c.y),
                Self::tri_area_2d(p.x, p.y, c.x, c.y, a.x, a.y),
                1.0 / m.z,
            )
        };

        let u = nu * ood;
        let v = nv * ood;
        [u, v, 1.0 - u - v]
    }

    /// Twice the signed area of the 2D triangle `(x1,y1) (x2,y2) (x3,y3)`.
    #[inline]
    pub fn tri_area_2d(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> f64 {
        (x1 - x2) * (y2 - y3) - (x2 - x3) * (y1 - y2)
    }

    /// Intersects this ray's line with a sphere.
    ///
    /// Hits behind `p1` are discarded. When `p1` is inside the sphere the
    /// single hit is the exit point.
    pub fn intersects_sphere(&self, center: &Point3<f64>, radius: f64) -> SphereIntersection {
        let heading = self.heading();
        let mag = heading.norm();
        if mag < precision::RESOLUTION {
            log::trace!("sphere test with a zero-length ray at {:?}", self.p1);
            return SphereIntersection::Miss;
        }
        let e = heading / mag;
        let h = center - self.p1;
        let lf = e.dot(&h);
        let radius_sq = radius * radius;
        let s = radius_sq - h.dot(&h) + lf * lf;
        let tangency = precision::TANGENCY * radius_sq;

        if s < -tangency {
            return SphereIntersection::Miss;
        }
        if s <= tangency {
            return if lf >= 0.0 {
                SphereIntersection::Single(self.p1 + e * lf)
            } else {
                SphereIntersection::Miss
            };
        }

        let s = s.sqrt();
        let near = lf - s;
        let far = lf + s;
        if near >= 0.0 {
            SphereIntersection::Double(self.p1 + e * near, self.p1 + e * far)
        } else if far >= 0.0 {
            SphereIntersection::Single(self.p1 + e * far)
        } else {
            SphereIntersection::Miss
        }
    }

    /// Line along which the planes of triangles `a` and `b` meet.
    ///
    /// Each edge of triangle `a` is intersected (as a line) with plane `b`;
    /// the first two distinct hits define the result. When every hit lands
    /// on one vertex of `a`, the line runs from that vertex along the cross
    /// product of both plane normals. Returns `None` for parallel or
    /// coplanar planes.
    pub fn plane_plane_intersect(
        a1: &Point3<f64>,
        a2: &Point3<f64>,
        a3: &Point3<f64>,
        b1: &Point3<f64>,
        b2: &Point3<f64>,
        b3: &Point3<f64>,
    ) -> Option<Ray> {
        let edges = [Ray::new(*a1, *a2), Ray::new(*a1, *a3), Ray::new(*a2, *a3)];

        let mut first: Option<Point3<f64>> = None;
        for edge in &edges {
            let Some(hit) = edge.intersects_plane(b1, b2, b3) else {
                continue;
            };
            match first {
                None => first = Some(hit),
                Some(p) if (hit - p).norm_squared() > precision::SQUARE_CONFUSION => {
                    return Some(Ray::new(p, hit));
                }
                Some(_) => {}
            }
        }

        let Some(vertex) = first else {
            log::trace!("planes do not meet along a line");
            return None;
        };
        let na = (a2 - a1).cross(&(a3 - a1));
        let nb = (b2 - b1).cross(&(b3 - b1));
        let direction = na.cross(&nb);
        if direction.norm() <= precision::PARALLEL * na.norm() * nb.norm() {
            log::trace!("planes do not meet along a line");
            return None;
        }
        Some(Ray::from_heading(vertex, direction.normalize()))
    }
}
