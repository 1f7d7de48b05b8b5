//! Planar helpers: axis collapse and XY-plane line intersection.

use nalgebra::{Point3, Vector3};

use super::Ray;
use crate::precision;

/// A cartesian axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of the axis in a coordinate triple.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl Ray {
    /// Copy of this ray with its z components set to 0.
    #[inline]
    pub fn projected_2d(&self) -> Ray {
        self.projected_2d_on(Axis::Z)
    }

    /// Copy of this ray with the `axis` component of both endpoints set to 0.
    pub fn projected_2d_on(&self, axis: Axis) -> Ray {
        let mut p1 = self.p1;
        let mut p2 = self.p2();
        p1[axis.index()] = 0.0;
        p2[axis.index()] = 0.0;
        Ray::new(p1, p2)
    }

    /// Parameter along this ray where its XY projection meets `other`'s,
    /// or `None` for parallel projections.
    fn intercept_param_2d(&self, other: &Ray) -> Option<f64> {
        let s1 = self.heading();
        let s2 = other.heading();
        let denom = -s2.x * s1.y + s1.x * s2.y;
        if denom.abs() < precision::RESOLUTION {
            return None;
        }
        let t = (s2.x * (self.p1.y - other.p1.y) - s2.y * (self.p1.x - other.p1.x)) / denom;
        Some(t)
    }

    /// Intersection of the XY projections of both lines, with z = 0.
    pub fn intercepts_2d(&self, other: &Ray) -> Option<Point3<f64>> {
        let t = self.intercept_param_2d(other)?;
        let hit = self.multiplied_by(t);
        Some(Point3::new(hit.x, hit.y, 0.0))
    }

    /// As [`Ray::intercepts_2d`], but `None` unless the intersection lies
    /// within this segment.
    pub fn intercepts_2d_strict(&self, other: &Ray) -> Option<Point3<f64>> {
        let t = self.intercept_param_2d(other)?;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        let hit = self.multiplied_by(t);
        Some(Point3::new(hit.x, hit.y, 0.0))
    }

    /// Ray from `p1` whose heading is this heading turned +90° in the XY plane.
    pub fn perpendicular_2d(&self) -> Ray {
        let h = self.heading();
        Ray::from_heading(self.p1, Vector3::new(-h.y, h.x, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_projected_2d() {
        let r = Ray::new(p(1.0, 2.0, 3.0), p(4.0, 5.0, 6.0));
        let flat = r.projected_2d();
        assert_eq!(flat.p1(), p(1.0, 2.0, 0.0));
        assert_eq!(flat.p2(), p(4.0, 5.0, 0.0));
        let flat_x = r.projected_2d_on(Axis::X);
        assert_eq!(flat_x.p1(), p(0.0, 2.0, 3.0));
        // the source is untouched
        assert_eq!(r.p1(), p(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_intercepts_2d() {
        let a = Ray::new(p(0.0, 0.0, 4.0), p(1.0, 1.0, 4.0));
        let b = Ray::new(p(0.0, 2.0, -1.0), p(1.0, 1.0, -1.0));
        let hit = a.intercepts_2d(&b).unwrap();
        assert!((hit.x - 1.0).abs() < 1e-12);
        assert!((hit.y - 1.0).abs() < 1e-12);
        assert_eq!(hit.z, 0.0);
    }

    #[test]
    fn test_intercepts_2d_parallel() {
        let a = Ray::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let b = Ray::new(p(0.0, 1.0, 0.0), p(2.0, 1.0, 0.0));
        assert!(a.intercepts_2d(&b).is_none());
    }

    #[test]
    fn test_intercepts_2d_strict() {
        let a = Ray::new(p(0.0, 0.0, 0.0), p(0.5, 0.5, 0.0));
        let b = Ray::new(p(0.0, 2.0, 0.0), p(1.0, 1.0, 0.0));
        assert!(a.intercepts_2d(&b).is_some());
        assert!(a.intercepts_2d_strict(&b).is_none());
        let long = Ray::new(p(0.0, 0.0, 0.0), p(2.0, 2.0, 0.0));
        assert!(long.intercepts_2d_strict(&b).is_some());
    }

    #[test]
    fn test_perpendicular_2d() {
        let r = Ray::new(p(1.0, 1.0, 0.0), p(3.0, 1.0, 0.0));
        let perp = r.perpendicular_2d();
        assert_eq!(perp.p1(), p(1.0, 1.0, 0.0));
        assert_eq!(perp.heading(), Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(perp.heading().dot(&r.heading()), 0.0);
    }
}
