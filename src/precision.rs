//! Precision constants for geometric comparisons.
//!
//! Every numeric policy of the kernel (degenerate fallbacks, tangency,
//! parallelism, frame equivalence) is expressed against one of these values.

/// Fundamental resolution: the smallest positive normal `f64`.
/// Used for zero-length and near-parallel checks that must never divide by ~0.
/// Value: DBL_MIN (~2.2e-308)
pub const RESOLUTION: f64 = f64::MIN_POSITIVE;

/// Confusion tolerance for checking coincidence of two points.
/// Two points are coincident if their distance < CONFUSION.
/// Value: 1.0e-7
pub const CONFUSION: f64 = 1.0e-7;

/// Square of CONFUSION for performance.
pub const SQUARE_CONFUSION: f64 = CONFUSION * CONFUSION;

/// Relative tolerance below which a ray counts as parallel to a plane.
/// Compared against `|n·dir| / (|n|·|dir|)`, i.e. the sine of the angle
/// between the ray and the plane.
/// Value: 1.0e-12
pub const PARALLEL: f64 = 1.0e-12;

/// Relative tolerance under which a ray counts as tangent to a sphere.
/// Compared against `disc / radius²`, so it holds for spheres of any size.
/// Value: CONFUSION
pub const TANGENCY: f64 = CONFUSION;

/// Angular tolerance (radians) for rotation equivalence of two bases.
/// Value: 1.0e-6
pub const ROTATION_TOLERANCE: f64 = 1.0e-6;

/// Distance each end of a ray is pushed outward by `Ray::elongate`.
/// Large enough to stand in for an infinite line in intersection tests.
pub const ELONGATION: f64 = 900_000.0;

/// Returns true if `value` is within `CONFUSION` of zero.
#[inline]
pub fn is_confused(value: f64) -> bool {
    value.abs() < CONFUSION
}
