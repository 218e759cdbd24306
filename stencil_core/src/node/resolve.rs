// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape resolution: turning one node's attributes into its base region.
//!
//! A node takes its bounds from a live tracked item when it is bound to one,
//! otherwise from its explicit x/y/width/height. Item geometry is mapped into
//! scene space through the item's ancestor transforms: the origin truncates
//! toward zero and the size is rounded up, so the bounds cover every pixel
//! the item touches along its far edges.

use kurbo::Point;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::id::{INVALID, NodeId};
use super::shape::Shape;
use super::store::RegionStore;
use crate::geometry::{IntRect, Region};

impl RegionStore {
    /// Returns the scene-space bounds a node resolves to, before corners and
    /// children are applied.
    ///
    /// Returns `None` when the node has neither a live item nor any explicit
    /// geometry.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn resolved_bounds(&self, id: NodeId) -> Option<IntRect> {
        self.validate(id);
        self.bounds_at(id.idx)
    }

    /// Whether the node has nothing to contribute: no live item, all-zero
    /// explicit geometry, and no children.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_empty(&self, id: NodeId) -> bool {
        self.validate(id);
        let idx = id.idx as usize;
        self.bound_item_at(id.idx).is_none()
            && self.geometry[idx] == IntRect::ZERO
            && self.first_child[idx] == INVALID
    }

    // -- Raw-index helpers for the compositor --

    /// Slot of the live item bound to node slot `idx`.
    pub(crate) fn bound_item_at(&self, idx: u32) -> Option<u32> {
        self.item[idx as usize]
            .filter(|item| self.is_item_alive(*item))
            .map(|item| item.idx)
    }

    pub(crate) fn bounds_at(&self, idx: u32) -> Option<IntRect> {
        if let Some(item) = self.bound_item_at(idx) {
            return Some(self.item_bounds_at(item));
        }
        let explicit = self.geometry[idx as usize];
        (explicit != IntRect::ZERO).then_some(explicit)
    }

    /// Base region of node slot `idx`: its primitive over the resolved bounds.
    pub(crate) fn resolve_base(&self, idx: u32) -> Region {
        let Some(bounds) = self.bounds_at(idx) else {
            return Region::new();
        };
        match self.shape[idx as usize] {
            Shape::Rect => Region::from_rect(bounds),
            Shape::Ellipse => Region::from_ellipse(bounds),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "scene coordinates are pixel positions; float-to-int casts saturate"
    )]
    fn item_bounds_at(&self, item: u32) -> IntRect {
        let xf = self.scene_transform_at(item);
        let size = self.item_size[item as usize];
        let origin = xf * Point::ZERO;
        let far = xf * Point::new(size.width, size.height);
        let extent = far - origin;
        IntRect::new(
            origin.x as i32,
            origin.y as i32,
            extent.x.ceil() as i32,
            extent.y.ceil() as i32,
        )
    }
}
