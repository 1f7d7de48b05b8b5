//! posegeom: ray/segment geometry and hierarchical coordinate frames.
//!
//! Two layers, the second built on the first:
//!
//! * [`ray`]: a directed segment with closest-point, distance and
//!   intersection queries against points, rays, planes, triangles and spheres.
//! * [`frame`]: orthonormal bases composed through a parent chain, with a
//!   lazily recomputed global basis and pose-preserving reparenting.
//!
//! Vector and rotation algebra comes from `nalgebra`. Nothing here is
//! synchronized; share a tree or a ray across threads only behind your own lock.

pub mod precision;
pub mod ray;
pub mod frame;

// Re-exports for convenience
pub use ray::{Axis, PlaneIntersection, Ray, RayRecord, SphereIntersection};
pub use frame::{Axes, AxesHierarchy, AxesId, AxesTree, Basis, SlipType};

/// Tolerance for geometric comparisons
pub const TOLERANCE: f64 = 1e-6;

/// Result type for posegeom operations
pub type Result<T> = std::result::Result<T, GeomError>;

#[derive(Debug, thiserror::Error)]
pub enum GeomError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown axes: {0}")]
    UnknownAxes(AxesId),

    #[error("Hierarchy cycle: {child} cannot be parented under {parent}")]
    HierarchyCycle { child: AxesId, parent: AxesId },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
