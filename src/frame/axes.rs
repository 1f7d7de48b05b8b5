//! A single coordinate frame and its handle.

use std::fmt;

use super::Basis;

/// Handle of a frame inside an [`AxesTree`](super::AxesTree).
///
/// Handles are never reused, so a handle to a removed frame stays invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxesId(pub(crate) usize);

impl AxesId {
    /// Position of the frame in its tree's storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AxesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "axes#{}", self.0)
    }
}

/// How a frame reacts when its parent slips to a new world pose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlipType {
    /// Keep the local basis; the frame moves with its parent.
    #[default]
    Normal,
    /// Keep the world pose; the local basis is re-expressed.
    Ignore,
}

/// A coordinate frame: a local basis, the cached global basis derived from
/// it, and its links into the hierarchy.
///
/// The cached global basis is only readable through
/// [`AxesHierarchy::global_basis`](super::AxesHierarchy::global_basis),
/// which brings it up to date first.
#[derive(Clone, Debug)]
pub struct Axes {
    pub(crate) local: Basis,
    pub(crate) global: Basis,
    pub(crate) parent: Option<AxesId>,
    pub(crate) children: Vec<AxesId>,
    pub(crate) dirty: bool,
    pub(crate) slip_type: SlipType,
    pub(crate) recomputations: u64,
}

impl Axes {
    /// A new frame starts dirty so its first read computes the global basis.
    pub(crate) fn new(local: Basis, parent: Option<AxesId>) -> Self {
        Self {
            local,
            global: local,
            parent,
            children: Vec::new(),
            dirty: true,
            slip_type: SlipType::default(),
            recomputations: 0,
        }
    }

    /// Basis relative to the parent, or to world space for a root.
    #[inline]
    pub fn local_basis(&self) -> &Basis {
        &self.local
    }

    /// Returns the parent frame, if any.
    #[inline]
    pub fn parent(&self) -> Option<AxesId> {
        self.parent
    }

    /// Frames parented to this one.
    #[inline]
    pub fn children(&self) -> &[AxesId] {
        &self.children
    }

    /// True when the cached global basis is stale.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// How this frame reacts when its parent slips.
    #[inline]
    pub fn slip_type(&self) -> SlipType {
        self.slip_type
    }

    /// How many times the global basis has been recomputed.
    #[inline]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
