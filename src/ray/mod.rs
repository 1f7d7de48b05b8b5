//! Directed line segment.
//!
//! A [`Ray`] runs from an origin `p1` to a tip `p2`. The same value serves as
//! a bounded segment (the `*_strict` queries), as an infinite line (the plain
//! queries), and, after [`Ray::elongate`], as a long finite stand-in for a line.
//!
//! Queries take `&self` and return fresh values; no working storage is kept
//! between calls.

mod closest;
mod intersect;
mod planar;
mod record;

use std::fmt;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::precision;

pub use intersect::{PlaneIntersection, SphereIntersection};
pub use planar::Axis;
pub use record::RayRecord;

/// A directed segment from `p1` (origin) to `p2` (tip).
///
/// The tip may be absent. An absent tip reads as `p1`, so the heading is
/// zero; the first mutator that needs a tip stores `p1` as the tip.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "RayRecord", from = "RayRecord")]
pub struct Ray {
    p1: Point3<f64>,
    p2: Option<Point3<f64>>,
}

impl Ray {
    /// Creates a ray from `p1` to `p2`.
    #[inline]
    pub fn new(p1: Point3<f64>, p2: Point3<f64>) -> Self {
        Self { p1, p2: Some(p2) }
    }

    /// Creates a ray with an origin and no tip yet.
    #[inline]
    pub fn from_origin(p1: Point3<f64>) -> Self {
        Self { p1, p2: None }
    }

    /// Creates a ray from an origin and a heading.
    #[inline]
    pub fn from_heading(p1: Point3<f64>, heading: Vector3<f64>) -> Self {
        Self::new(p1, p1 + heading)
    }

    /// Returns the origin.
    #[inline]
    pub fn p1(&self) -> Point3<f64> {
        self.p1
    }

    /// Returns the tip, or the origin if no tip was ever set.
    #[inline]
    pub fn p2(&self) -> Point3<f64> {
        self.p2.unwrap_or(self.p1)
    }

    /// Returns true once a tip has been set or synthesized.
    #[inline]
    pub fn has_tip(&self) -> bool {
        self.p2.is_some()
    }

    /// Returns a copy of the origin.
    #[inline]
    pub fn origin(&self) -> Point3<f64> {
        self.p1
    }

    /// Sets the origin. The tip stays where it is.
    #[inline]
    pub fn set_p1(&mut self, p: Point3<f64>) {
        self.p1 = p;
    }

    /// Sets the tip.
    #[inline]
    pub fn set_p2(&mut self, p: Point3<f64>) {
        self.p2 = Some(p);
    }

    /// Stores `p1` as the tip if none is set, and returns the tip.
    fn tip_mut(&mut self) -> &mut Point3<f64> {
        let p1 = self.p1;
        self.p2.get_or_insert(p1)
    }

    /// Adopts the endpoints of `target` without allocating a new ray.
    pub fn align_to(&mut self, target: &Ray) {
        self.p1 = target.p1;
        self.p2 = target.p2;
    }

    /// Vector from `p1` to `p2`. Zero when no tip is set.
    ///
    /// Reading the heading does not store a tip; [`Ray::has_tip`] stays
    /// false until a mutator needs one.
    #[inline]
    pub fn heading(&self) -> Vector3<f64> {
        match self.p2 {
            Some(tip) => tip - self.p1,
            None => Vector3::zeros(),
        }
    }

    /// Moves the tip so that the heading becomes `heading`.
    pub fn set_heading(&mut self, heading: Vector3<f64>) {
        let p1 = self.p1;
        *self.tip_mut() = p1 + heading;
    }

    /// Length of the segment.
    #[inline]
    pub fn mag(&self) -> f64 {
        self.heading().norm()
    }

    /// Sets the length, keeping `p1` and the heading direction.
    ///
    /// A zero-length ray has no direction and stays at length zero.
    pub fn set_mag(&mut self, new_mag: f64) {
        let heading = self.heading();
        let mag = heading.norm();
        if mag < precision::RESOLUTION {
            log::trace!("set_mag on a zero-length ray at {:?}", self.p1);
            self.tip_mut();
            return;
        }
        self.set_heading(heading * (new_mag / mag));
    }

    /// Sets the length to 1.
    #[inline]
    pub fn normalize(&mut self) {
        self.set_mag(1.0);
    }

    /// Scales the ray about `p1` by `scalar`.
    pub fn mult(&mut self, scalar: f64) {
        let heading = self.heading();
        self.set_heading(heading * scalar);
    }

    /// Divides the ray about `p1` by `divisor`.
    pub fn div(&mut self, divisor: f64) {
        let heading = self.heading();
        self.set_heading(heading / divisor);
    }

    /// Where the tip would be after `mult(scalar)`.
    #[inline]
    pub fn multiplied_by(&self, scalar: f64) -> Point3<f64> {
        self.p1 + self.heading() * scalar
    }

    /// Where the tip would be after `div(divisor)`.
    #[inline]
    pub fn divided_by(&self, divisor: f64) -> Point3<f64> {
        self.p1 + self.heading() / divisor
    }

    /// Where the tip would be after `set_mag(length)`.
    /// Returns `p1` for a zero-length ray.
    pub fn scaled_to(&self, length: f64) -> Point3<f64> {
        let heading = self.heading();
        let mag = heading.norm();
        if mag < precision::RESOLUTION {
            return self.p1;
        }
        self.p1 + heading * (length / mag)
    }

    /// New ray with the same origin and a heading scaled by `scalar`.
    #[inline]
    pub fn ray_scaled_by(&self, scalar: f64) -> Ray {
        Ray::new(self.p1, self.multiplied_by(scalar))
    }

    /// New ray with the same origin and length `length`.
    #[inline]
    pub fn ray_scaled_to(&self, length: f64) -> Ray {
        Ray::new(self.p1, self.scaled_to(length))
    }

    /// Pushes both ends outward by [`precision::ELONGATION`] along the heading.
    pub fn elongate(&mut self) {
        let forward = self.ray_scaled_to(precision::ELONGATION);
        let backward = self.reversed().ray_scaled_to(precision::ELONGATION);
        self.p1 = backward.p2();
        self.p2 = Some(forward.p2());
    }

    /// Swaps origin and tip.
    pub fn reverse(&mut self) {
        let tip = *self.tip_mut();
        self.p2 = Some(self.p1);
        self.p1 = tip;
    }

    /// Returns a reversed copy.
    pub fn reversed(&self) -> Ray {
        Ray::new(self.p2(), self.p1)
    }

    /// Reverses this ray if its heading points away from `other`'s.
    pub fn point_with(&mut self, other: &Ray) {
        self.point_with_heading(&other.heading());
    }

    /// Reverses this ray if its heading has a negative dot product with `heading`.
    pub fn point_with_heading(&mut self, heading: &Vector3<f64>) {
        if self.heading().dot(heading) < 0.0 {
            self.reverse();
        }
    }

    /// Pulls both ends toward the midpoint so the length becomes
    /// `percent` of the current length (`0.5` halves it).
    pub fn contract_to(&mut self, percent: f64) {
        let t = (1.0 - percent) / 2.0;
        let (p1, p2) = (self.p1, self.p2());
        self.p1 = p1 + (p2 - p1) * t;
        self.p2 = Some(p2 + (p1 - p2) * t);
    }

    /// Moves the ray so its origin is at `location`, keeping the heading.
    pub fn translate_to(&mut self, location: Point3<f64>) {
        let heading = self.heading();
        self.p1 = location;
        self.p2 = Some(location + heading);
    }

    /// Moves the ray so its tip is at `location`, keeping the heading.
    pub fn translate_tip_to(&mut self, location: Point3<f64>) {
        let by = location - self.p2();
        self.translate_by(&by);
    }

    /// Translates both endpoints by `offset`.
    pub fn translate_by(&mut self, offset: &Vector3<f64>) {
        *self.tip_mut() += offset;
        self.p1 += offset;
    }
}

/// Rays are equal when their endpoints are, with an absent tip read as `p1`.
impl PartialEq for Ray {
    fn eq(&self, other: &Self) -> bool {
        self.p1 == other.p1 && self.p2() == other.p2()
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p2 = self.p2();
        write!(
            f,
            "Ray ({}, {}, {}) -> ({}, {}, {})",
            self.p1.x, self.p1.y, self.p1.z, p2.x, p2.y, p2.z
        )
    }
}
