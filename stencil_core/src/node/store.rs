// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node and item storage with allocation, topology, and
//! attribute management.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Size};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, ItemId, NodeId};
use super::shape::{CombineMode, Corner, CornerMode, CornerModes, Shape};
use super::traverse::Children;
use crate::dirty;
use crate::geometry::IntRect;

/// Struct-of-arrays storage for region nodes and tracked items.
///
/// Nodes are addressed by [`NodeId`] handles and items by [`ItemId`] handles.
/// Internally each occupies a slot in parallel arrays. Destroyed slots are
/// recycled via free lists, and generation counters prevent stale handle
/// access.
#[derive(Debug)]
pub struct RegionStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Attributes (set by callers) --
    pub(crate) shape: Vec<Shape>,
    pub(crate) combine_mode: Vec<CombineMode>,
    pub(crate) geometry: Vec<IntRect>,
    pub(crate) radius: Vec<i32>,
    pub(crate) corners: Vec<CornerModes>,
    pub(crate) item: Vec<Option<ItemId>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Tracked items --
    pub(crate) item_parent: Vec<u32>,
    pub(crate) item_transform: Vec<Affine>,
    pub(crate) item_size: Vec<Size>,
    pub(crate) item_generation: Vec<u32>,
    pub(crate) item_free_list: Vec<u32>,
    pub(crate) item_len: u32,
    /// Node slots bound to each item slot.
    pub(crate) item_watchers: Vec<Vec<u32>>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) topology_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            shape: Vec::new(),
            combine_mode: Vec::new(),
            geometry: Vec::new(),
            radius: Vec::new(),
            corners: Vec::new(),
            item: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            item_parent: Vec::new(),
            item_transform: Vec::new(),
            item_size: Vec::new(),
            item_generation: Vec::new(),
            item_free_list: Vec::new(),
            item_len: 0,
            item_watchers: Vec::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            topology_dirty: false,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Node allocation API --

    /// Creates a new root node and returns its handle.
    ///
    /// The node starts as a `Rect` with zero geometry, radius 0, `Normal`
    /// corners, `Combine` mode, no item, and no children, so it builds to an
    /// empty region.
    pub fn create_node(&mut self) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.shape[i] = Shape::default();
            self.combine_mode[i] = CombineMode::default();
            self.geometry[i] = IntRect::ZERO;
            self.radius[i] = 0;
            self.corners[i] = CornerModes::default();
            self.item[i] = None;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.shape.push(Shape::default());
            self.combine_mode.push(CombineMode::default());
            self.geometry.push(IntRect::ZERO);
            self.radius.push(0);
            self.corners.push(CornerModes::default());
            self.item.push(None);
            self.generation.push(0);
            idx
        };

        self.topology_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::REGION);

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node together with its whole subtree.
    ///
    /// If the node had a parent, the parent (and its ancestors) are marked
    /// changed. Item bindings of destroyed nodes are released.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let root_parent = self.parent[id.idx as usize];

        // Pre-order collection; destroyed in reverse so children go first.
        let mut subtree = vec![id.idx];
        let mut k = 0;
        while k < subtree.len() {
            let mut child = self.first_child[subtree[k] as usize];
            while child != INVALID {
                subtree.push(child);
                child = self.next_sibling[child as usize];
            }
            k += 1;
        }

        for &idx in subtree.iter().rev() {
            let p = self.parent[idx as usize];
            if p != INVALID {
                self.unlink_from_parent(idx);
                self.dirty.remove_dependency(p, idx, dirty::REGION);
            }
            if let Some(item) = self.item[idx as usize].take() {
                self.unwatch(item, idx);
            }

            self.dirty.remove_key(idx);

            // Bump generation so old handles immediately fail validation.
            self.generation[idx as usize] += 1;
            self.free_list.push(idx);
            self.pending_removed.push(idx);
        }

        if root_parent != INVALID {
            self.dirty
                .mark_with(root_parent, dirty::REGION, &EagerPolicy);
            self.dirty.mark(root_parent, dirty::TOPOLOGY);
        }
        self.topology_dirty = true;
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, or
    /// if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        self.attach(parent.idx, child.idx, INVALID);
    }

    /// Inserts `child` at position `index` among `parent`'s children.
    ///
    /// `index == child_count(parent)` appends.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `index` is out of range, `child`
    /// already has a parent, or the insertion would create a cycle.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let count = self.child_count(parent);
        assert!(
            index <= count,
            "child index {index} out of range (count {count})"
        );
        let before = self.nth_child(parent.idx, index);
        self.attach(parent.idx, child.idx, before);
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or the insertion would create a cycle.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let p = self.parent[sibling.idx as usize];
        assert!(p != INVALID, "sibling has no parent");
        self.attach(p, child.idx, sibling.idx);
    }

    /// Removes `child` from its current parent. The child stays alive as a
    /// new root.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "node has no parent"
        );
        self.detach(child.idx);
    }

    /// Replaces the child at `index` with `new_child` and returns the detached
    /// old child.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `index` is out of range, `new_child`
    /// already has a parent, or the replacement would create a cycle.
    pub fn replace_child(&mut self, parent: NodeId, index: usize, new_child: NodeId) -> NodeId {
        self.validate(parent);
        self.validate(new_child);
        let count = self.child_count(parent);
        assert!(
            index < count,
            "child index {index} out of range (count {count})"
        );
        let old = self.nth_child(parent.idx, index);
        self.attach(parent.idx, new_child.idx, old);
        self.detach(old);
        self.handle(old)
    }

    /// Detaches and returns the last child of `parent`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_last_child(&mut self, parent: NodeId) -> Option<NodeId> {
        self.validate(parent);
        let mut last = self.first_child[parent.idx as usize];
        if last == INVALID {
            return None;
        }
        while self.next_sibling[last as usize] != INVALID {
            last = self.next_sibling[last as usize];
        }
        self.detach(last);
        Some(self.handle(last))
    }

    /// Detaches every child of `parent`. The children stay alive as roots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clear_children(&mut self, parent: NodeId) {
        self.validate(parent);
        while self.first_child[parent.idx as usize] != INVALID {
            self.detach(self.first_child[parent.idx as usize]);
        }
    }

    /// Returns the child at `index`, if any.
    #[must_use]
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).nth(index)
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).count()
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(self.handle(p))
        }
    }

    /// Returns an iterator over the direct children of a node, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns all live nodes without a parent.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.handle(idx));
            }
        }
        roots
    }

    // -- Attribute getters (read-only, no dirty marking) --

    /// Returns the shape of a node.
    #[must_use]
    pub fn shape(&self, id: NodeId) -> Shape {
        self.validate(id);
        self.shape[id.idx as usize]
    }

    /// Returns the combine mode of a node.
    #[must_use]
    pub fn combine_mode(&self, id: NodeId) -> CombineMode {
        self.validate(id);
        self.combine_mode[id.idx as usize]
    }

    /// Returns the explicit geometry of a node.
    ///
    /// This is the stored value even when a tracked item overrides it.
    #[must_use]
    pub fn geometry(&self, id: NodeId) -> IntRect {
        self.validate(id);
        self.geometry[id.idx as usize]
    }

    /// Returns the explicit x coordinate.
    #[must_use]
    pub fn x(&self, id: NodeId) -> i32 {
        self.geometry(id).x
    }

    /// Returns the explicit y coordinate.
    #[must_use]
    pub fn y(&self, id: NodeId) -> i32 {
        self.geometry(id).y
    }

    /// Returns the explicit width.
    #[must_use]
    pub fn width(&self, id: NodeId) -> i32 {
        self.geometry(id).width
    }

    /// Returns the explicit height.
    #[must_use]
    pub fn height(&self, id: NodeId) -> i32 {
        self.geometry(id).height
    }

    /// Returns the unclamped corner radius.
    #[must_use]
    pub fn radius(&self, id: NodeId) -> i32 {
        self.validate(id);
        self.radius[id.idx as usize]
    }

    /// Returns the mode of one corner.
    #[must_use]
    pub fn corner(&self, id: NodeId, corner: Corner) -> CornerMode {
        self.corners(id).get(corner)
    }

    /// Returns the modes of all four corners.
    #[must_use]
    pub fn corners(&self, id: NodeId) -> CornerModes {
        self.validate(id);
        self.corners[id.idx as usize]
    }

    /// Returns the tracked item bound to a node, if any.
    #[must_use]
    pub fn item(&self, id: NodeId) -> Option<ItemId> {
        self.validate(id);
        self.item[id.idx as usize]
    }

    // -- Attribute setters (auto-mark dirty) --
    //
    // Every setter is a no-op when the value is unchanged. Otherwise it marks
    // the REGION channel with eager propagation to all ancestors.

    /// Sets the shape of a node.
    pub fn set_shape(&mut self, id: NodeId, shape: Shape) {
        self.validate(id);
        let i = id.idx as usize;
        if self.shape[i] != shape {
            self.shape[i] = shape;
            self.touch(id.idx);
        }
    }

    /// Sets the operator used to fold this node into its parent.
    pub fn set_combine_mode(&mut self, id: NodeId, mode: CombineMode) {
        self.validate(id);
        let i = id.idx as usize;
        if self.combine_mode[i] != mode {
            self.combine_mode[i] = mode;
            self.touch(id.idx);
        }
    }

    /// Sets all four explicit geometry values at once.
    pub fn set_geometry(&mut self, id: NodeId, rect: IntRect) {
        self.validate(id);
        let i = id.idx as usize;
        if self.geometry[i] != rect {
            self.geometry[i] = rect;
            self.touch(id.idx);
        }
    }

    /// Sets the explicit x coordinate.
    pub fn set_x(&mut self, id: NodeId, x: i32) {
        let rect = IntRect { x, ..self.geometry(id) };
        self.set_geometry(id, rect);
    }

    /// Sets the explicit y coordinate.
    pub fn set_y(&mut self, id: NodeId, y: i32) {
        let rect = IntRect { y, ..self.geometry(id) };
        self.set_geometry(id, rect);
    }

    /// Sets the explicit width.
    pub fn set_width(&mut self, id: NodeId, width: i32) {
        let rect = IntRect {
            width,
            ..self.geometry(id)
        };
        self.set_geometry(id, rect);
    }

    /// Sets the explicit height.
    pub fn set_height(&mut self, id: NodeId, height: i32) {
        let rect = IntRect {
            height,
            ..self.geometry(id)
        };
        self.set_geometry(id, rect);
    }

    /// Sets the corner radius. Oversized values are clamped when building.
    pub fn set_radius(&mut self, id: NodeId, radius: i32) {
        self.validate(id);
        let i = id.idx as usize;
        if self.radius[i] != radius {
            self.radius[i] = radius;
            self.touch(id.idx);
        }
    }

    /// Sets the mode of one corner.
    pub fn set_corner(&mut self, id: NodeId, corner: Corner, mode: CornerMode) {
        let mut modes = self.corners(id);
        modes.set(corner, mode);
        self.set_corners(id, modes);
    }

    /// Sets the modes of all four corners.
    pub fn set_corners(&mut self, id: NodeId, modes: CornerModes) {
        self.validate(id);
        let i = id.idx as usize;
        if self.corners[i] != modes {
            self.corners[i] = modes;
            self.touch(id.idx);
        }
    }

    /// Binds the node to a tracked item, or unbinds it with `None`.
    ///
    /// While bound to a live item, the item's scene geometry replaces the
    /// node's explicit x/y/width/height.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn set_item(&mut self, id: NodeId, item: Option<ItemId>) {
        self.validate(id);
        if let Some(item) = item {
            self.validate_item(item);
        }
        let i = id.idx as usize;
        if self.item[i] == item {
            return;
        }
        if let Some(old) = self.item[i] {
            self.unwatch(old, id.idx);
        }
        if let Some(new) = item {
            self.item_watchers[new.idx as usize].push(id.idx);
        }
        self.item[i] = item;
        self.touch(id.idx);
    }

    /// Marks a node (and its ancestors) changed without modifying it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn mark_changed(&mut self, id: NodeId) {
        self.validate(id);
        self.touch(id.idx);
    }

    // -- Tracked item API --

    /// Creates a tracked item with an identity transform, zero size, and no
    /// parent.
    pub fn create_item(&mut self) -> ItemId {
        let idx = if let Some(idx) = self.item_free_list.pop() {
            let i = idx as usize;
            self.item_generation[i] += 1;
            self.item_parent[i] = INVALID;
            self.item_transform[i] = Affine::IDENTITY;
            self.item_size[i] = Size::ZERO;
            self.item_watchers[i].clear();
            idx
        } else {
            let idx = self.item_len;
            self.item_len += 1;
            self.item_parent.push(INVALID);
            self.item_transform.push(Affine::IDENTITY);
            self.item_size.push(Size::ZERO);
            self.item_generation.push(0);
            self.item_watchers.push(Vec::new());
            idx
        };
        ItemId {
            idx,
            generation: self.item_generation[idx as usize],
        }
    }

    /// Destroys an item and all of its descendant items.
    ///
    /// Every node bound to a destroyed item is unbound (it reverts to its
    /// explicit geometry) and marked changed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_item(&mut self, item: ItemId) {
        self.validate_item(item);
        for idx in self.item_subtree(item.idx) {
            let i = idx as usize;
            for node in core::mem::take(&mut self.item_watchers[i]) {
                self.item[node as usize] = None;
                self.touch(node);
            }
            self.item_parent[i] = INVALID;
            self.item_generation[i] += 1;
            self.item_free_list.push(idx);
        }
    }

    /// Returns whether the given handle refers to a live item.
    #[must_use]
    pub fn is_item_alive(&self, item: ItemId) -> bool {
        (item.idx < self.item_len)
            && self.item_generation[item.idx as usize] == item.generation
            && !self.item_free_list.contains(&item.idx)
    }

    /// Returns the item's transform into its parent's space.
    #[must_use]
    pub fn item_transform(&self, item: ItemId) -> Affine {
        self.validate_item(item);
        self.item_transform[item.idx as usize]
    }

    /// Returns the item's local size.
    #[must_use]
    pub fn item_size(&self, item: ItemId) -> Size {
        self.validate_item(item);
        self.item_size[item.idx as usize]
    }

    /// Returns the item's parent item, if any.
    #[must_use]
    pub fn item_parent(&self, item: ItemId) -> Option<ItemId> {
        self.validate_item(item);
        let p = self.item_parent[item.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(self.item_handle(p))
        }
    }

    /// Sets the item's transform into its parent's space.
    ///
    /// Nodes bound to this item or any descendant item are marked changed.
    pub fn set_item_transform(&mut self, item: ItemId, transform: Affine) {
        self.validate_item(item);
        let i = item.idx as usize;
        if self.item_transform[i] != transform {
            self.item_transform[i] = transform;
            self.notify_item(item.idx);
        }
    }

    /// Sets the item's local size.
    ///
    /// Nodes bound to this item or any descendant item are marked changed.
    pub fn set_item_size(&mut self, item: ItemId, size: Size) {
        self.validate_item(item);
        let i = item.idx as usize;
        if self.item_size[i] != size {
            self.item_size[i] = size;
            self.notify_item(item.idx);
        }
    }

    /// Moves the item under `parent`, or makes it a root with `None`.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or if `parent` is the item itself or one of
    /// its descendants.
    pub fn set_item_parent(&mut self, item: ItemId, parent: Option<ItemId>) {
        self.validate_item(item);
        let p = match parent {
            Some(parent) => {
                self.validate_item(parent);
                let mut cur = parent.idx;
                while cur != INVALID {
                    assert!(cur != item.idx, "item parent would create a cycle");
                    cur = self.item_parent[cur as usize];
                }
                parent.idx
            }
            None => INVALID,
        };
        let i = item.idx as usize;
        if self.item_parent[i] != p {
            self.item_parent[i] = p;
            self.notify_item(item.idx);
        }
    }

    /// Returns the transform from item-local space to scene space, the
    /// product of all ancestor transforms with the root first.
    #[must_use]
    pub fn item_scene_transform(&self, item: ItemId) -> Affine {
        self.validate_item(item);
        self.scene_transform_at(item.idx)
    }

    /// Maps a point from item-local space to scene space.
    #[must_use]
    pub fn map_to_scene(&self, item: ItemId, point: Point) -> Point {
        self.item_scene_transform(item) * point
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if the item handle is stale.
    fn validate_item(&self, item: ItemId) {
        assert!(
            self.is_item_alive(item),
            "stale ItemId: {item:?} (current gen: {})",
            if item.idx < self.item_len {
                self.item_generation[item.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds the current handle for a live node slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn item_handle(&self, idx: u32) -> ItemId {
        ItemId {
            idx,
            generation: self.item_generation[idx as usize],
        }
    }

    /// Slot of the `index`-th child, or [`INVALID`] one past the end.
    fn nth_child(&self, parent: u32, index: usize) -> u32 {
        let mut child = self.first_child[parent as usize];
        for _ in 0..index {
            if child == INVALID {
                break;
            }
            child = self.next_sibling[child as usize];
        }
        child
    }

    /// Links `c` under `p` before `before`, or last when `before` is
    /// [`INVALID`], and records the dependency and change.
    fn attach(&mut self, p: u32, c: u32, before: u32) {
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let mut cur = p;
        while cur != INVALID {
            assert!(cur != c, "cannot attach a node to itself or its descendant");
            cur = self.parent[cur as usize];
        }

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = before;
        if before == INVALID {
            self.prev_sibling[c as usize] = INVALID;
            if self.first_child[p as usize] == INVALID {
                self.first_child[p as usize] = c;
            } else {
                // Walk to last child.
                let mut last = self.first_child[p as usize];
                while self.next_sibling[last as usize] != INVALID {
                    last = self.next_sibling[last as usize];
                }
                self.next_sibling[last as usize] = c;
                self.prev_sibling[c as usize] = last;
            }
        } else {
            let prev = self.prev_sibling[before as usize];
            self.prev_sibling[c as usize] = prev;
            if prev != INVALID {
                self.next_sibling[prev as usize] = c;
            } else {
                // `before` was the first child.
                self.first_child[p as usize] = c;
            }
            self.prev_sibling[before as usize] = c;
        }

        // The parent's region depends on the child's.
        let _ = self.dirty.add_dependency(p, c, dirty::REGION);

        self.touch(p);
        self.topology_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Unlinks `c` from its parent and records the change.
    fn detach(&mut self, c: u32) {
        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(p, c, dirty::REGION);

        self.touch(p);
        self.topology_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }

    /// Marks the node's region changed, eagerly propagating to ancestors.
    fn touch(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::REGION, &EagerPolicy);
    }

    /// Drops `node` from the watcher list of `item`, if the item is alive.
    fn unwatch(&mut self, item: ItemId, node: u32) {
        if self.is_item_alive(item) {
            self.item_watchers[item.idx as usize].retain(|&n| n != node);
        }
    }

    /// The item slot followed by all of its descendant item slots.
    fn item_subtree(&self, root: u32) -> Vec<u32> {
        let mut out = vec![root];
        let mut k = 0;
        while k < out.len() {
            let cur = out[k];
            for j in 0..self.item_len {
                if self.item_parent[j as usize] == cur {
                    out.push(j);
                }
            }
            k += 1;
        }
        out
    }

    /// Marks every node bound to the item or one of its descendants.
    fn notify_item(&mut self, root: u32) {
        let nodes: Vec<u32> = self
            .item_subtree(root)
            .into_iter()
            .flat_map(|i| self.item_watchers[i as usize].iter().copied())
            .collect();
        for node in nodes {
            self.touch(node);
        }
    }

    pub(crate) fn scene_transform_at(&self, idx: u32) -> Affine {
        let mut xf = self.item_transform[idx as usize];
        let mut p = self.item_parent[idx as usize];
        while p != INVALID {
            xf = self.item_transform[p as usize] * xf;
            p = self.item_parent[p as usize];
        }
        xf
    }
}
