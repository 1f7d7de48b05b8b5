//! The contract a scene-graph or IK layer composes against.

use super::{AxesId, Basis};
use crate::Result;

/// Storage of frames linked by parent relations, with lazily derived
/// global bases.
///
/// Implementations keep two invariants: a clean frame's global basis is its
/// parent's global basis composed with its local basis, and every
/// descendant of a dirty frame is dirty.
pub trait AxesHierarchy {
    /// Recomputes the global basis of `id` if it is dirty, ancestors first.
    /// A clean frame is left untouched.
    fn update_global(&mut self, id: AxesId) -> Result<()>;

    /// Marks `id` and all of its descendants dirty.
    fn mark_dirty(&mut self, id: AxesId) -> Result<()>;

    /// Returns the parent of `id`.
    fn parent(&self, id: AxesId) -> Result<Option<AxesId>>;

    /// Moves `id` under `parent` (or to the root with `None`) without
    /// changing its world pose.
    fn set_parent(&mut self, id: AxesId, parent: Option<AxesId>) -> Result<()>;

    /// Basis of `id` relative to its parent.
    fn local_basis(&self, id: AxesId) -> Result<Basis>;

    /// Up-to-date world-space basis of `id`.
    fn global_basis(&mut self, id: AxesId) -> Result<Basis>;
}
