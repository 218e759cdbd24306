// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree composition: folding a node and its descendants into one region.
//!
//! Building a node resolves its base region, sculpts its corners, and then
//! folds each child's built region into it in child order, using the child's
//! [`CombineMode`](super::CombineMode) with the accumulated region as the left
//! operand. Later children therefore act on the result of earlier ones.
//!
//! The fold runs on an explicit frame stack, so nesting depth is limited by
//! heap memory rather than by the call stack. Building only reads the store;
//! it is safe on empty trees and returns identical results for identical
//! trees.

use alloc::vec;

use super::corners::{CornerStrips, clamp_radius};
use super::id::{INVALID, NodeId};
use super::shape::{CombineMode, Shape};
use super::store::RegionStore;
use crate::geometry::{IntRect, Region};
use crate::trace::{BuildEvent, Tracer};

/// One node being folded: its accumulated region and the next child to visit.
#[derive(Debug)]
struct Frame {
    idx: u32,
    acc: Region,
    next_child: u32,
}

impl RegionStore {
    /// Builds the region of a node and its whole subtree.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn build(&self, id: NodeId) -> Region {
        self.build_traced(id, &mut Tracer::none())
    }

    /// Like [`build`](Self::build), but reports a [`BuildEvent`] (and, with
    /// `trace-rich`, one corner event per sculpted node) to `tracer`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn build_traced(&self, id: NodeId, tracer: &mut Tracer<'_>) -> Region {
        self.validate(id);
        let mut visited: u32 = 1;
        let mut stack = vec![self.enter(id.idx, tracer)];

        let region = loop {
            let Some(top) = stack.last_mut() else {
                break Region::new();
            };
            let child = top.next_child;
            if child != INVALID {
                top.next_child = self.next_sibling[child as usize];
                stack.push(self.enter(child, tracer));
                visited += 1;
                continue;
            }

            let Some(done) = stack.pop() else {
                break Region::new();
            };
            match stack.last_mut() {
                Some(parent) => {
                    let mode = self.combine_mode[done.idx as usize];
                    parent.acc = mode.apply(&parent.acc, &done.acc);
                }
                None => break done.acc,
            }
        };

        tracer.build(&BuildEvent {
            node: id.idx,
            nodes_visited: visited,
            rect_count: region.rect_count(),
            area: region.area(),
        });
        region
    }

    /// Folds the node's built region into `accumulated` with the node's own
    /// combine mode.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn apply_to(&self, id: NodeId, accumulated: &Region) -> Region {
        let built = self.build(id);
        self.combine_mode(id).apply(accumulated, &built)
    }

    /// Applies the node to an ambient rectangle, such as a whole window.
    ///
    /// In `Combine` mode the node's region *replaces* the ambient rectangle
    /// rather than being unioned with it. The other modes combine against
    /// the rectangle as usual.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn apply_to_rect(&self, id: NodeId, ambient: IntRect) -> Region {
        let built = self.build(id);
        match self.combine_mode(id) {
            CombineMode::Combine => built,
            mode => mode.apply(&Region::from_rect(ambient), &built),
        }
    }

    /// Resolves and sculpts the base of node slot `idx` and opens its frame.
    fn enter(&self, idx: u32, tracer: &mut Tracer<'_>) -> Frame {
        let i = idx as usize;
        let mut acc = self.resolve_base(idx);

        if self.shape[i] == Shape::Rect
            && self.radius[i] > 0
            && let Some(bounds) = acc.bounds()
        {
            let r = clamp_radius(self.radius[i], bounds);
            if r > 0 {
                let strips = CornerStrips::collect(bounds, r, self.corners[i]);
                #[cfg(feature = "trace-rich")]
                tracer.corners(&crate::trace::CornerEvent {
                    node: idx,
                    radius: r,
                    cut_strips: strips.cuts.len(),
                    bulge_strips: strips.bulges.len(),
                });
                acc = strips.apply(&acc);
            }
        }
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = tracer;
        }

        Frame {
            idx,
            acc,
            next_child: self.first_child[i],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CornerMode, CornerModes};

    fn rect_node(store: &mut RegionStore, rect: IntRect, mode: CombineMode) -> NodeId {
        let id = store.create_node();
        store.set_geometry(id, rect);
        store.set_combine_mode(id, mode);
        id
    }

    #[test]
    fn blank_node_builds_empty() {
        let mut store = RegionStore::new();
        let node = store.create_node();
        let region = store.build(node);
        assert!(region.is_empty());
        assert_eq!(region.rects().count(), 0);
        assert!(store.is_empty(node));
    }

    #[test]
    fn build_is_idempotent() {
        let mut store = RegionStore::new();
        let root = rect_node(&mut store, IntRect::new(0, 0, 100, 100), CombineMode::Combine);
        store.set_radius(root, 12);
        let hole = rect_node(&mut store, IntRect::new(30, 30, 20, 20), CombineMode::Subtract);
        store.set_shape(hole, Shape::Ellipse);
        store.append_child(root, hole);

        let first = store.build(root);
        let second = store.build(root);
        assert_eq!(first, second);
        assert!(first.rects().eq(second.rects()));
    }

    #[test]
    fn combine_replaces_ambient_rect() {
        let mut store = RegionStore::new();
        let node = rect_node(&mut store, IntRect::new(10, 10, 50, 50), CombineMode::Combine);
        let region = store.apply_to_rect(node, IntRect::new(0, 0, 100, 100));
        assert_eq!(region.rects().collect::<alloc::vec::Vec<_>>(), [IntRect::new(10, 10, 50, 50)]);
    }

    #[test]
    fn subtract_carves_hole_in_ambient_rect() {
        let mut store = RegionStore::new();
        let node = rect_node(&mut store, IntRect::new(25, 25, 50, 50), CombineMode::Subtract);
        let region = store.apply_to_rect(node, IntRect::new(0, 0, 100, 100));
        assert_eq!(region.area(), 7500);
        assert!(!region.contains(50, 50));
    }

    #[test]
    fn intersect_with_ambient_rect_clips() {
        let mut store = RegionStore::new();
        let node = rect_node(&mut store, IntRect::new(80, 80, 50, 50), CombineMode::Intersect);
        let region = store.apply_to_rect(node, IntRect::new(0, 0, 100, 100));
        assert_eq!(region, Region::from_rect(IntRect::new(80, 80, 20, 20)));
    }

    #[test]
    fn xor_of_identical_rects_is_empty() {
        let mut store = RegionStore::new();
        let root = rect_node(&mut store, IntRect::new(5, 5, 40, 30), CombineMode::Combine);
        let twin = rect_node(&mut store, IntRect::new(5, 5, 40, 30), CombineMode::Xor);
        store.append_child(root, twin);
        assert!(store.build(root).is_empty());
    }

    #[test]
    fn apply_to_uses_node_mode() {
        let mut store = RegionStore::new();
        let node = rect_node(&mut store, IntRect::new(0, 0, 10, 10), CombineMode::Subtract);
        let acc = Region::from_rect(IntRect::new(0, 0, 20, 10));
        assert_eq!(
            store.apply_to(node, &acc),
            Region::from_rect(IntRect::new(10, 0, 10, 10))
        );
    }

    #[test]
    fn children_fold_in_order() {
        let mut store = RegionStore::new();
        let root = store.create_node();
        let a = rect_node(&mut store, IntRect::new(0, 0, 10, 10), CombineMode::Combine);
        let b = rect_node(&mut store, IntRect::new(5, 0, 10, 10), CombineMode::Subtract);
        store.append_child(root, a);
        store.append_child(root, b);
        assert_eq!(store.build(root), Region::from_rect(IntRect::new(0, 0, 5, 10)));

        // Reversed order: subtracting from nothing, then adding `a`.
        store.remove_from_parent(a);
        store.append_child(root, a);
        assert_eq!(store.build(root), Region::from_rect(IntRect::new(0, 0, 10, 10)));
    }

    #[test]
    fn corners_apply_before_children() {
        let mut store = RegionStore::new();
        let root = rect_node(&mut store, IntRect::new(0, 0, 20, 20), CombineMode::Combine);
        store.set_radius(root, 5);
        let patch = rect_node(&mut store, IntRect::new(0, 0, 2, 2), CombineMode::Combine);
        store.append_child(root, patch);

        let region = store.build(root);
        // The child refills part of the top-left cut.
        assert!(region.contains(0, 0));
        assert!(!region.contains(19, 0));
    }

    #[test]
    fn ellipse_ignores_corners() {
        let mut store = RegionStore::new();
        let node = rect_node(&mut store, IntRect::new(0, 0, 40, 20), CombineMode::Combine);
        store.set_shape(node, Shape::Ellipse);
        let plain = store.build(node);
        store.set_radius(node, 8);
        store.set_corners(node, CornerModes::uniform(CornerMode::InvertX));
        assert_eq!(store.build(node), plain);
    }

    #[test]
    fn deep_nesting_matches_cached_sub_results() {
        let mut store = RegionStore::new();
        let specs = [
            (IntRect::new(0, 0, 100, 100), CombineMode::Combine),
            (IntRect::new(10, 10, 80, 80), CombineMode::Subtract),
            (IntRect::new(20, 20, 60, 60), CombineMode::Combine),
            (IntRect::new(30, 30, 40, 40), CombineMode::Subtract),
            (IntRect::new(40, 40, 20, 20), CombineMode::Combine),
        ];
        let nodes: alloc::vec::Vec<NodeId> = specs
            .iter()
            .map(|&(rect, mode)| rect_node(&mut store, rect, mode))
            .collect();
        for pair in nodes.windows(2) {
            store.append_child(pair[0], pair[1]);
        }

        // Assemble bottom-up from each level's base and its cached child.
        let mut cached = store.build(nodes[4]);
        for level in (0..4).rev() {
            let base = Region::from_rect(specs[level].0);
            cached = specs[level + 1].1.apply(&base, &cached);
            assert_eq!(cached, store.build(nodes[level]), "level {level}");
        }
        assert_eq!(store.build(nodes[0]).area(), 10_000 - 6_400);
    }

    #[test]
    fn very_deep_chain_does_not_overflow() {
        let mut store = RegionStore::new();
        let root = store.create_node();
        let mut tip = root;
        for _ in 0..2_000 {
            let next = store.create_node();
            store.append_child(tip, next);
            tip = next;
        }
        store.set_geometry(tip, IntRect::new(1, 2, 3, 4));
        assert_eq!(store.build(root), Region::from_rect(IntRect::new(1, 2, 3, 4)));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn corners_follow_the_clipped_base() {
        let mut store = RegionStore::new();
        let node = rect_node(
            &mut store,
            IntRect::new(i32::MAX - 4, 0, 20, 20),
            CombineMode::Combine,
        );
        store.set_radius(node, 5);
        store.set_corners(node, CornerModes::uniform(CornerMode::InvertX));

        // Four columns survive, so the radius clamps to 2 and each corner adds
        // a single pixel.
        let region = store.build(node);
        assert_eq!(region.area(), 80 + 2);
        assert!(region.contains(i32::MAX - 5, 0));
        assert!(!region.contains(i32::MAX - 5, 1));
    }

    #[test]
    fn build_traced_reports_visit_count() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Last(Option<BuildEvent>);
        impl TraceSink for Last {
            fn on_build(&mut self, e: &BuildEvent) {
                self.0 = Some(*e);
            }
        }

        let mut store = RegionStore::new();
        let root = rect_node(&mut store, IntRect::new(0, 0, 100, 100), CombineMode::Combine);
        let hole = rect_node(&mut store, IntRect::new(25, 25, 50, 50), CombineMode::Subtract);
        store.append_child(root, hole);

        let mut sink = Last::default();
        let region = store.build_traced(root, &mut Tracer::new(&mut sink));
        assert_eq!(
            sink.0,
            Some(BuildEvent {
                node: root.index(),
                nodes_visited: 2,
                rect_count: 4,
                area: 7500,
            })
        );
        assert_eq!(region.area(), 7500);
    }
}
