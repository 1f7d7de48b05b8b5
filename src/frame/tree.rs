//! Arena of coordinate frames.
//!
//! Frames refer to each other by [`AxesId`]. Every frame knows its parent
//! and its children; the child list exists only so that marking a frame
//! dirty reaches its whole subtree.

use nalgebra::{Point3, UnitQuaternion, Vector3};

use super::{Axes, AxesHierarchy, AxesId, Basis, SlipType};
use crate::ray::Ray;
use crate::{GeomError, Result};

/// Owns a set of frames and the parent links between them.
#[derive(Clone, Debug, Default)]
pub struct AxesTree {
    slots: Vec<Option<Axes>>,
    live: usize,
}

impl AxesTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// True if `id` names a live frame of this tree.
    #[inline]
    pub fn contains(&self, id: AxesId) -> bool {
        self.node(id).is_ok()
    }

    /// Handles of all live frames, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = AxesId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| AxesId(i))
    }

    /// Read access to a frame.
    #[inline]
    pub fn get(&self, id: AxesId) -> Result<&Axes> {
        self.node(id)
    }

    /// Frames parented to `id`.
    pub fn children(&self, id: AxesId) -> Result<&[AxesId]> {
        Ok(self.node(id)?.children())
    }

    fn node(&self, id: AxesId) -> Result<&Axes> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(GeomError::UnknownAxes(id))
    }

    fn node_mut(&mut self, id: AxesId) -> Result<&mut Axes> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(GeomError::UnknownAxes(id))
    }

    fn insert(&mut self, axes: Axes) -> AxesId {
        let id = AxesId(self.slots.len());
        if let Some(parent) = axes.parent {
            if let Ok(node) = self.node_mut(parent) {
                node.children.push(id);
            }
        }
        self.slots.push(Some(axes));
        self.live += 1;
        id
    }

    fn unlink(&mut self, child: AxesId, parent: AxesId) -> Result<()> {
        self.node_mut(parent)?.children.retain(|c| *c != child);
        Ok(())
    }

    /// True if `ancestor` is `id` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: AxesId, id: AxesId) -> Result<bool> {
        let mut current = Some(id);
        while let Some(next) = current {
            if next == ancestor {
                return Ok(true);
            }
            current = self.node(next)?.parent;
        }
        Ok(false)
    }

    /// Creates a frame from a world-space origin and axis vectors.
    ///
    /// With a parent, the local basis is derived so that the frame sits at
    /// exactly the given world pose.
    pub fn create(
        &mut self,
        origin: Point3<f64>,
        x: Vector3<f64>,
        y: Vector3<f64>,
        z: Vector3<f64>,
        parent: Option<AxesId>,
    ) -> Result<AxesId> {
        let basis = Basis::from_axes(origin, x, y, z)?;
        self.create_from_basis(basis, parent)
    }

    /// Creates a frame whose world pose is `global`.
    pub fn create_from_basis(&mut self, global: Basis, parent: Option<AxesId>) -> Result<AxesId> {
        let local = match parent {
            Some(p) => self.global_basis(p)?.local_of(&global),
            None => global,
        };
        Ok(self.insert(Axes::new(local, parent)))
    }

    /// Creates a frame whose basis relative to `parent` is `local`.
    pub fn create_local(&mut self, local: Basis, parent: Option<AxesId>) -> Result<AxesId> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        Ok(self.insert(Axes::new(local, parent)))
    }

    /// Removes a frame. Its children move to its parent and keep their
    /// world pose.
    pub fn remove(&mut self, id: AxesId) -> Result<Axes> {
        let (parent, children) = {
            let node = self.node(id)?;
            (node.parent, node.children.clone())
        };
        for child in children {
            self.set_parent(child, parent)?;
        }
        if let Some(p) = parent {
            self.unlink(id, p)?;
        }
        let removed = self.slots[id.0].take().ok_or(GeomError::UnknownAxes(id))?;
        self.live -= 1;
        log::debug!("removed {}", id);
        Ok(removed)
    }

    /// Replaces the local basis of `id` and marks its subtree dirty.
    pub fn set_local_basis(&mut self, id: AxesId, local: Basis) -> Result<()> {
        self.node_mut(id)?.local = local;
        self.mark_dirty(id)
    }

    /// Moves `id` to the world pose `global`; children follow.
    pub fn set_global_basis(&mut self, id: AxesId, global: Basis) -> Result<()> {
        let local = match self.parent(id)? {
            Some(p) => self.global_basis(p)?.local_of(&global),
            None => global,
        };
        self.set_local_basis(id, local)
    }

    #[inline]
    pub fn slip_type(&self, id: AxesId) -> Result<SlipType> {
        Ok(self.node(id)?.slip_type)
    }

    pub fn set_slip_type(&mut self, id: AxesId, slip_type: SlipType) -> Result<()> {
        self.node_mut(id)?.slip_type = slip_type;
        Ok(())
    }

    /// Moves `id` to the world pose `global`, applying each child's
    /// [`SlipType`]: `Normal` children move along, `Ignore` children stay
    /// where they are in world space.
    pub fn slip_to(&mut self, id: AxesId, global: Basis) -> Result<()> {
        let children = self.node(id)?.children.clone();
        let mut pinned = Vec::new();
        for child in children {
            if self.node(child)?.slip_type == SlipType::Ignore {
                pinned.push((child, self.global_basis(child)?));
            }
        }

        self.set_global_basis(id, global)?;
        let new_global = self.global_basis(id)?;
        log::debug!("{} slipped, {} children keep their world pose", id, pinned.len());
        for (child, child_global) in pinned {
            self.set_local_basis(child, new_global.local_of(&child_global))?;
        }
        Ok(())
    }

    /// Translates `id` by `offset` in world space.
    pub fn translate_by_global(&mut self, id: AxesId, offset: &Vector3<f64>) -> Result<()> {
        let mut global = self.global_basis(id)?;
        global.translate_by(offset);
        self.set_global_basis(id, global)
    }

    /// Moves the world origin of `id` to `location`, keeping its orientation.
    pub fn translate_to(&mut self, id: AxesId, location: Point3<f64>) -> Result<()> {
        let mut global = self.global_basis(id)?;
        global.set_origin(location);
        self.set_global_basis(id, global)
    }

    /// Rotates `id` by a world-space rotation about its own origin.
    pub fn rotate_by(&mut self, id: AxesId, rotation: &UnitQuaternion<f64>) -> Result<()> {
        let mut global = self.global_basis(id)?;
        global.rotate_by(rotation);
        self.set_global_basis(id, global)
    }

    /// Gives `id` the same world pose as `target`.
    pub fn align_globals_to(&mut self, id: AxesId, target: AxesId) -> Result<()> {
        let global = self.global_basis(target)?;
        self.set_global_basis(id, global)
    }

    /// New frame with the world pose of `id`, attached to the same parent.
    pub fn global_copy(&mut self, id: AxesId) -> Result<AxesId> {
        let global = self.global_basis(id)?;
        let parent = self.parent(id)?;
        self.create_from_basis(global, parent)
    }

    /// New parentless frame whose basis is a snapshot of the local basis of `id`.
    pub fn free_copy(&mut self, id: AxesId) -> Result<AxesId> {
        let local = self.local_basis(id)?;
        self.create_local(local, None)
    }

    /// New frame attached to the parent of `id` with the same local basis.
    ///
    /// When `slip_aware` is false the copy ignores slips of its parent.
    pub fn attached_copy(&mut self, id: AxesId, slip_aware: bool) -> Result<AxesId> {
        self.update_global(id)?;
        let local = self.local_basis(id)?;
        let parent = self.parent(id)?;
        let copy = self.create_local(local, parent)?;
        if !slip_aware {
            self.set_slip_type(copy, SlipType::Ignore)?;
        }
        Ok(copy)
    }

    /// True if both frames have equivalent world rotations and origins.
    pub fn axes_eq(&mut self, a: AxesId, b: AxesId) -> Result<bool> {
        let ga = self.global_basis(a)?;
        let gb = self.global_basis(b)?;
        Ok(ga.is_equivalent(&gb))
    }

    /// World origin of `id`.
    pub fn origin(&mut self, id: AxesId) -> Result<Point3<f64>> {
        Ok(self.global_basis(id)?.origin())
    }

    /// Unit ray along the world X axis of `id`.
    pub fn x_ray(&mut self, id: AxesId) -> Result<Ray> {
        Ok(self.global_basis(id)?.x_ray())
    }

    /// Unit ray along the world Y axis of `id`.
    pub fn y_ray(&mut self, id: AxesId) -> Result<Ray> {
        Ok(self.global_basis(id)?.y_ray())
    }

    /// Unit ray along the world Z axis of `id`.
    pub fn z_ray(&mut self, id: AxesId) -> Result<Ray> {
        Ok(self.global_basis(id)?.z_ray())
    }

    /// Maps a point given in the frame of `id` to world space.
    pub fn global_of_point(&mut self, id: AxesId, point: &Point3<f64>) -> Result<Point3<f64>> {
        Ok(self.global_basis(id)?.global_of_point(point))
    }

    /// Expresses a world-space point in the frame of `id`.
    pub fn local_of_point(&mut self, id: AxesId, point: &Point3<f64>) -> Result<Point3<f64>> {
        Ok(self.global_basis(id)?.local_of_point(point))
    }

    /// Maps a direction given in the frame of `id` to world space.
    pub fn global_of_vector(&mut self, id: AxesId, vector: &Vector3<f64>) -> Result<Vector3<f64>> {
        Ok(self.global_basis(id)?.global_of_vector(vector))
    }

    /// Expresses a world-space direction in the frame of `id`.
    pub fn local_of_vector(&mut self, id: AxesId, vector: &Vector3<f64>) -> Result<Vector3<f64>> {
        Ok(self.global_basis(id)?.local_of_vector(vector))
    }
}

impl AxesHierarchy for AxesTree {
    fn update_global(&mut self, id: AxesId) -> Result<()> {
        // Dirty frames from `id` up to the nearest clean ancestor. Ancestors
        // of a clean frame are clean, so nothing above it needs recomputing.
        let mut stale = Vec::new();
        let mut current = Some(id);
        while let Some(next) = current {
            let node = self.node(next)?;
            if !node.dirty {
                break;
            }
            stale.push(next);
            current = node.parent;
        }

        let mut parent_global = match current {
            Some(clean) => Some(self.node(clean)?.global),
            None => None,
        };
        for next in stale.into_iter().rev() {
            let node = self.node_mut(next)?;
            node.global = match parent_global {
                Some(pg) => pg.compose(&node.local),
                None => node.local,
            };
            node.dirty = false;
            node.recomputations += 1;
            parent_global = Some(node.global);
        }
        Ok(())
    }

    fn mark_dirty(&mut self, id: AxesId) -> Result<()> {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = self.node_mut(next)?;
            // descendants of a dirty frame are already dirty
            if node.dirty {
                continue;
            }
            node.dirty = true;
            stack.extend_from_slice(&node.children);
        }
        Ok(())
    }

    fn parent(&self, id: AxesId) -> Result<Option<AxesId>> {
        Ok(self.node(id)?.parent)
    }

    fn set_parent(&mut self, id: AxesId, parent: Option<AxesId>) -> Result<()> {
        if let Some(p) = parent {
            if self.is_ancestor_or_self(id, p)? {
                return Err(GeomError::HierarchyCycle { child: id, parent: p });
            }
        }

        let global = self.global_basis(id)?;
        let local = match parent {
            Some(p) => self.global_basis(p)?.local_of(&global),
            None => global,
        };

        if let Some(old) = self.node(id)?.parent {
            self.unlink(id, old)?;
        }
        if let Some(p) = parent {
            self.node_mut(p)?.children.push(id);
        }
        {
            let node = self.node_mut(id)?;
            node.local = local;
            node.parent = parent;
        }
        log::debug!("reparented {} under {:?}", id, parent);

        self.mark_dirty(id)?;
        self.update_global(id)
    }

    fn local_basis(&self, id: AxesId) -> Result<Basis> {
        Ok(self.node(id)?.local)
    }

    fn global_basis(&mut self, id: AxesId) -> Result<Basis> {
        self.update_global(id)?;
        Ok(self.node(id)?.global)
    }
}
