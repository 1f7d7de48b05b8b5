//! Closest-point and distance queries.
//!
//! Plain variants treat rays as infinite lines, `_strict` variants as
//! segments clamped to `[p1, p2]`. Ray-to-ray queries use the usual
//! closest-approach system between two parametric lines.

use nalgebra::{distance, Point3};

use super::Ray;
use crate::precision;

impl Ray {
    /// Scalar projection of `point` onto this ray, in units of the heading.
    ///
    /// For a ray from (5, 0, 0) to (10, 0, 0) and the point (7.5, 7, 0) this
    /// is 0.5. Returns 0 when the heading or `point - p1` has zero length.
    /// `multiplied_by(scaled_projection(v))` is `closest_point_to(v)`.
    pub fn scaled_projection(&self, point: &Point3<f64>) -> f64 {
        let to_point = point - self.p1;
        let heading = self.heading();
        let heading_mag_sq = heading.norm_squared();
        if heading_mag_sq == 0.0 || to_point.norm_squared() == 0.0 {
            return 0.0;
        }
        to_point.dot(&heading) / heading_mag_sq
    }

    /// Point on the infinite line closest to `point`.
    #[inline]
    pub fn closest_point_to(&self, point: &Point3<f64>) -> Point3<f64> {
        self.multiplied_by(self.scaled_projection(point))
    }

    /// Point on the segment closest to `point`.
    pub fn closest_point_to_strict(&self, point: &Point3<f64>) -> Point3<f64> {
        let t = self.scaled_projection(point);
        if t <= 0.0 {
            self.p1
        } else if t >= 1.0 {
            self.p2()
        } else {
            self.multiplied_by(t)
        }
    }

    /// Distance from `point` to the infinite line.
    #[inline]
    pub fn dist_to(&self, point: &Point3<f64>) -> f64 {
        distance(point, &self.closest_point_to(point))
    }

    /// Distance from `point` to the segment.
    #[inline]
    pub fn dist_to_strict(&self, point: &Point3<f64>) -> f64 {
        distance(point, &self.closest_point_to_strict(point))
    }

    /// Line parameter `sc` of the point on this line closest to `other`'s line.
    ///
    /// Near-parallel lines (`D < RESOLUTION`) fall back to `sc = 0`.
    fn closest_approach_param(&self, other: &Ray) -> f64 {
        let u = self.heading();
        let v = other.heading();
        let w = self.p1 - other.p1;
        let a = u.dot(&u);
        let b = u.dot(&v);
        let c = v.dot(&v);
        let d = u.dot(&w);
        let e = v.dot(&w);
        let denom = a * c - b * b;

        if denom < precision::RESOLUTION {
            log::trace!("closest approach between parallel lines, using p1");
            0.0
        } else {
            (b * e - c * d) / denom
        }
    }

    /// Point on this line closest to `other` treated as a line.
    pub fn closest_point_to_ray_3d(&self, other: &Ray) -> Point3<f64> {
        self.multiplied_by(self.closest_approach_param(other))
    }

    /// As [`Ray::closest_point_to_ray_3d`], clamped to this segment.
    pub fn closest_point_to_ray_3d_strict(&self, other: &Ray) -> Point3<f64> {
        let sc = self.closest_approach_param(other);
        if sc < 0.0 {
            self.p1
        } else if sc > 1.0 {
            self.p2()
        } else {
            self.multiplied_by(sc)
        }
    }

    /// As [`Ray::closest_point_to_ray_3d`], or `None` if that point lies
    /// outside this segment.
    pub fn closest_point_to_ray_3d_bounded(&self, other: &Ray) -> Option<Point3<f64>> {
        let sc = self.closest_approach_param(other);
        (0.0..=1.0).contains(&sc).then(|| self.multiplied_by(sc))
    }

    /// Point on this line closest to the point of `other` (as a segment)
    /// nearest this line.
    pub fn closest_point_to_segment_3d(&self, other: &Ray) -> Point3<f64> {
        let on_other = other.closest_point_to_ray_3d_strict(self);
        self.closest_point_to(&on_other)
    }

    /// Distance between this line and `other`'s line.
    pub fn dist_to_ray(&self, other: &Ray) -> f64 {
        let on_this = self.closest_point_to_ray_3d(other);
        other.dist_to(&on_this)
    }

    /// Distance between this segment and `other` as a segment.
    ///
    /// Both line parameters are clamped to `[0, 1]`, so the result is never
    /// less than [`Ray::dist_to_ray`].
    pub fn dist_to_segment(&self, other: &Ray) -> f64 {
        let u = self.heading();
        let v = other.heading();
        let w = self.p1 - other.p1;
        let a = u.dot(&u);
        let b = u.dot(&v);
        let c = v.dot(&v);
        let d = u.dot(&w);
        let e = v.dot(&w);
        let denom = a * c - b * b;

        // Degenerate segments collapse to point queries.
        if a < precision::RESOLUTION {
            return other.dist_to_strict(&self.p1);
        }
        if c < precision::RESOLUTION {
            return self.dist_to_strict(&other.p1);
        }

        // sc = sn / sd, tc = tn / td
        let mut sn: f64;
        let mut sd: f64;
        let mut tn: f64;
        let mut td: f64;
        if denom < precision::RESOLUTION {
            sn = 0.0;
            sd = 1.0;
            tn = e;
            td = c;
        } else {
            sn = b * e - c * d;
            sd = denom;
            tn = a * e - b * d;
            td = denom;
            if sn < 0.0 {
                sn = 0.0;
                tn = e;
                td = c;
            } else if sn > sd {
                sn = sd;
                tn = e + b;
                td = c;
            }
        }

        if tn < 0.0 {
            tn = 0.0;
            if -d < 0.0 {
                sn = 0.0;
            } else if -d > a {
                sn = sd;
            } else {
                sn = -d;
                sd = a;
            }
        } else if tn > td {
            tn = td;
            if (-d + b) < 0.0 {
                sn = 0.0;
            } else if (-d + b) > a {
                sn = sd;
            } else {
                sn = -d + b;
                sd = a;
            }
        }

        let sc = if sn.abs() < precision::RESOLUTION { 0.0 } else { sn / sd };
        let tc = if tn.abs() < precision::RESOLUTION { 0.0 } else { tn / td };
        distance(&self.multiplied_by(sc), &other.multiplied_by(tc))
    }
}
