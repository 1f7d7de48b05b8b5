//! Orthonormal basis: an origin plus a rotation.
//!
//! A basis is a rigid placement. Composing a parent's global basis with a
//! child's local basis yields the child's global basis; [`Basis::local_of`]
//! is the inverse of that composition.

use nalgebra::{distance, Isometry3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::precision;
use crate::ray::Ray;
use crate::{GeomError, Result, TOLERANCE};

/// Right-handed orthonormal coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Basis {
    placement: Isometry3<f64>,
}

impl Default for Basis {
    fn default() -> Self {
        Self::identity()
    }
}

impl Basis {
    /// World axes at the world origin.
    #[inline]
    pub fn identity() -> Self {
        Self {
            placement: Isometry3::identity(),
        }
    }

    /// Creates a basis from an origin and a rotation.
    #[inline]
    pub fn new(origin: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self {
            placement: Isometry3::from_parts(Translation3::from(origin.coords), rotation),
        }
    }

    /// Creates a basis from a rigid placement.
    #[inline]
    pub const fn from_isometry(placement: Isometry3<f64>) -> Self {
        Self { placement }
    }

    /// Creates a basis from an origin and three axis vectors.
    ///
    /// `x` fixes the first axis, `y` is orthogonalized against it and the
    /// third axis is `x × y`. `z` only has to agree with that handedness.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` if `x` is zero, `y` is parallel to `x`, or `z`
    /// points into the left-handed half space.
    pub fn from_axes(
        origin: Point3<f64>,
        x: Vector3<f64>,
        y: Vector3<f64>,
        z: Vector3<f64>,
    ) -> Result<Self> {
        let x_mag = x.norm();
        if precision::is_confused(x_mag) {
            return Err(GeomError::InvalidGeometry("x axis has zero length".into()));
        }
        let xn = x / x_mag;

        let y_perp = y - xn * xn.dot(&y);
        let y_mag = y_perp.norm();
        if precision::is_confused(y_mag) {
            return Err(GeomError::InvalidGeometry(
                "y axis is zero or parallel to x".into(),
            ));
        }
        let yn = y_perp / y_mag;
        let zn = xn.cross(&yn);

        if zn.dot(&z) <= 0.0 {
            return Err(GeomError::InvalidGeometry(
                "axes are left-handed or z is degenerate".into(),
            ));
        }

        let rotation = Rotation3::from_basis_unchecked(&[xn, yn, zn]);
        Ok(Self::new(origin, UnitQuaternion::from_rotation_matrix(&rotation)))
    }

    /// The rigid placement.
    #[inline]
    pub const fn isometry(&self) -> &Isometry3<f64> {
        &self.placement
    }

    /// Returns the origin.
    #[inline]
    pub fn origin(&self) -> Point3<f64> {
        Point3::from(self.placement.translation.vector)
    }

    /// Returns the rotation.
    #[inline]
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        self.placement.rotation
    }

    /// Unit X direction.
    #[inline]
    pub fn x_heading(&self) -> Vector3<f64> {
        self.placement.rotation * Vector3::x()
    }

    /// Unit Y direction.
    #[inline]
    pub fn y_heading(&self) -> Vector3<f64> {
        self.placement.rotation * Vector3::y()
    }

    /// Unit Z direction.
    #[inline]
    pub fn z_heading(&self) -> Vector3<f64> {
        self.placement.rotation * Vector3::z()
    }

    /// Unit ray from the origin along X.
    pub fn x_ray(&self) -> Ray {
        Ray::from_heading(self.origin(), self.x_heading())
    }

    /// Unit ray from the origin along Y.
    pub fn y_ray(&self) -> Ray {
        Ray::from_heading(self.origin(), self.y_heading())
    }

    /// Unit ray from the origin along Z.
    pub fn z_ray(&self) -> Ray {
        Ray::from_heading(self.origin(), self.z_heading())
    }

    /// Global basis of a child whose local basis is `local`, when `self`
    /// is the parent's global basis.
    #[inline]
    pub fn compose(&self, local: &Basis) -> Basis {
        Basis::from_isometry(self.placement * local.placement)
    }

    /// Local basis that, composed with `self`, reproduces `global`.
    #[inline]
    pub fn local_of(&self, global: &Basis) -> Basis {
        Basis::from_isometry(self.placement.inverse() * global.placement)
    }

    /// The inverse placement.
    #[inline]
    pub fn inverse(&self) -> Basis {
        Basis::from_isometry(self.placement.inverse())
    }

    /// Maps a point expressed in this basis to the enclosing space.
    #[inline]
    pub fn global_of_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.placement.transform_point(point)
    }

    /// Expresses a point of the enclosing space in this basis.
    #[inline]
    pub fn local_of_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.placement.inverse_transform_point(point)
    }

    /// Maps a direction expressed in this basis to the enclosing space.
    #[inline]
    pub fn global_of_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.placement.transform_vector(vector)
    }

    /// Expresses a direction of the enclosing space in this basis.
    #[inline]
    pub fn local_of_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.placement.inverse_transform_vector(vector)
    }

    /// Moves the origin by `offset`.
    #[inline]
    pub fn translate_by(&mut self, offset: &Vector3<f64>) {
        self.placement.translation.vector += offset;
    }

    /// Moves the origin to `origin`.
    #[inline]
    pub fn set_origin(&mut self, origin: Point3<f64>) {
        self.placement.translation.vector = origin.coords;
    }

    /// Rotates the axes by `rotation` about the origin.
    #[inline]
    pub fn rotate_by(&mut self, rotation: &UnitQuaternion<f64>) {
        self.placement.rotation = rotation * self.placement.rotation;
    }

    /// Replaces the rotation.
    #[inline]
    pub fn set_rotation(&mut self, rotation: UnitQuaternion<f64>) {
        self.placement.rotation = rotation;
    }

    /// True if both bases describe the same placement: rotations equal up to
    /// quaternion sign, origins within [`TOLERANCE`].
    pub fn is_equivalent(&self, other: &Basis) -> bool {
        self.rotation().angle_to(&other.rotation()) <= precision::ROTATION_TOLERANCE
            && distance(&self.origin(), &other.origin()) <= TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_axes() {
        let b = Basis::identity();
        assert_eq!(b.origin(), Point3::origin());
        assert!((b.x_heading() - Vector3::x()).norm() < 1e-15);
        assert!((b.z_heading() - Vector3::z()).norm() < 1e-15);
    }

    #[test]
    fn test_from_axes_orthonormalizes() {
        let b = Basis::from_axes(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 3.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert!((b.x_heading() - Vector3::x()).norm() < 1e-12);
        assert!((b.y_heading() - Vector3::y()).norm() < 1e-12);
        assert!((b.z_heading() - Vector3::z()).norm() < 1e-12);
        assert_eq!(b.origin(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_axes_rejects_degenerate() {
        let o = Point3::origin();
        let parallel = Basis::from_axes(o, Vector3::x(), Vector3::x() * 2.0, Vector3::z());
        assert!(matches!(parallel, Err(GeomError::InvalidGeometry(_))));
        let left = Basis::from_axes(o, Vector3::x(), Vector3::y(), -Vector3::z());
        assert!(matches!(left, Err(GeomError::InvalidGeometry(_))));
        let zero = Basis::from_axes(o, Vector3::zeros(), Vector3::y(), Vector3::z());
        assert!(zero.is_err());
    }

    #[test]
    fn test_compose_and_local_of_invert() {
        let parent = Basis::new(
            Point3::new(1.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );
        let local = Basis::new(Point3::new(1.0, 0.0, 0.0), UnitQuaternion::identity());
        let global = parent.compose(&local);
        // one unit along the parent's x, which points along world y
        assert!((global.origin() - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        assert!(parent.local_of(&global).is_equivalent(&local));
        assert!(parent.compose(&parent.inverse()).is_equivalent(&Basis::identity()));
    }

    #[test]
    fn test_point_and_vector_mapping() {
        let b = Basis::new(
            Point3::new(0.0, 0.0, 5.0),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2),
        );
        let p = Point3::new(0.0, 1.0, 0.0);
        let g = b.global_of_point(&p);
        assert!((g - Point3::new(0.0, 0.0, 6.0)).norm() < 1e-12);
        assert!((b.local_of_point(&g) - p).norm() < 1e-12);
        let v = b.global_of_vector(&Vector3::y());
        assert!((v - Vector3::z()).norm() < 1e-12);
        assert!((b.local_of_vector(&v) - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_equivalence_ignores_quaternion_sign() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.7);
        let flipped = UnitQuaternion::new_unchecked(-q.into_inner());
        let a = Basis::new(Point3::new(1.0, 1.0, 1.0), q);
        let b = Basis::new(Point3::new(1.0, 1.0, 1.0), flipped);
        assert!(a.is_equivalent(&b));
        let moved = Basis::new(Point3::new(1.0, 1.0, 1.1), q);
        assert!(!a.is_equivalent(&moved));
    }

    #[test]
    fn test_axis_rays_are_unit() {
        let b = Basis::new(
            Point3::new(3.0, 0.0, 0.0),
            UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1),
        );
        for ray in [b.x_ray(), b.y_ray(), b.z_ray()] {
            assert!((ray.mag() - 1.0).abs() < 1e-12);
            assert_eq!(ray.p1(), Point3::new(3.0, 0.0, 0.0));
        }
        assert!(b.x_heading().dot(&b.y_heading()).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_and_translate() {
        let mut b = Basis::new(Point3::new(1.0, 0.0, 0.0), UnitQuaternion::identity());
        b.rotate_by(&UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2));
        assert_eq!(b.origin(), Point3::new(1.0, 0.0, 0.0));
        assert!((b.x_heading() - Vector3::y()).norm() < 1e-12);
        b.translate_by(&Vector3::new(0.0, 0.0, 2.0));
        assert_eq!(b.origin(), Point3::new(1.0, 0.0, 2.0));
        b.set_origin(Point3::origin());
        assert_eq!(b.origin(), Point3::origin());
    }
}
