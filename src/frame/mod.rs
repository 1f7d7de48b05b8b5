//! Hierarchical coordinate frames.
//!
//! A frame ("axes") holds a [`Basis`] relative to its parent and a cached
//! world-space basis derived from it. Changing a local basis or a parent
//! marks the frame and its subtree dirty; reading the global basis brings
//! it up to date, ancestors first.

mod axes;
mod basis;
mod hierarchy;
mod tree;

pub use axes::{Axes, AxesId, SlipType};
pub use basis::Basis;
pub use hierarchy::AxesHierarchy;
pub use tree::AxesTree;
