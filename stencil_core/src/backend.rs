// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumer contract for windowing integrations.
//!
//! Stencil splits platform-specific work into *backend* crates. A backend
//! implements [`RegionSink`] for whatever native object takes a rectangle
//! list: a surface input region, an opaque region, a blur-behind hint. The
//! engine itself never talks to a compositor.
//!
//! [`MaskBinding`] connects one node to one sink. After each
//! [`evaluate`](crate::node::RegionStore::evaluate) the application hands the
//! changes to every binding; a binding rebuilds only when its node was
//! touched, and pushes only when the result differs from what the sink
//! already holds.
//!
//! # Crate boundaries
//!
//! `stencil_core` owns the data model, evaluation, and this contract module.
//! Backend crates depend on `stencil_core` and provide platform glue.
//! Application code depends on both and wires them together.

use crate::geometry::{IntRect, Region};
use crate::node::{NodeId, RegionChanges, RegionStore};
use crate::trace::{MaskUpdateEvent, Tracer};

/// Receives finished regions.
///
/// # Update loop pseudocode
///
/// ```rust,ignore
/// fn on_configure(size: IntRect) {
///     store.set_geometry(frame, size);
///
///     // Drain change notifications.
///     let changes = store.evaluate();
///
///     // Rebuild and push only what changed.
///     input_mask.update(&store, &changes, &mut surface_input);
///     blur_mask.update(&store, &changes, &mut blur_hint);
/// }
/// ```
pub trait RegionSink {
    /// Replaces the target region.
    ///
    /// `None` resets the target to "no region", which for most compositor
    /// targets means the default (whole surface). `Some` of an empty region
    /// is a real region that covers nothing.
    fn set_region(&mut self, region: Option<&Region>);
}

/// Binds an optional node to a [`RegionSink`].
///
/// With an ambient rectangle set, the node is applied with
/// [`apply_to_rect`](RegionStore::apply_to_rect) semantics; otherwise its
/// built region is used as is. A missing or destroyed node pushes `None`.
/// An empty result is pushed as an empty region, unless the binding was
/// created with [`clear_when_empty`](Self::clear_when_empty).
#[derive(Clone, Debug, Default)]
pub struct MaskBinding {
    node: Option<NodeId>,
    ambient: Option<IntRect>,
    clear_when_empty: bool,
    /// `None` until the first push.
    pushed: Option<Option<Region>>,
    stale: bool,
}

impl MaskBinding {
    /// Creates a binding for `node`. Nothing is pushed until the first
    /// [`update`](Self::update).
    #[must_use]
    pub fn new(node: Option<NodeId>) -> Self {
        Self {
            node,
            ..Self::default()
        }
    }

    /// Sets the ambient rectangle the node is applied to.
    #[must_use]
    pub fn with_ambient(mut self, ambient: IntRect) -> Self {
        self.ambient = Some(ambient);
        self
    }

    /// Pushes `None` instead of an empty region.
    ///
    /// Suits targets where no region means "off", such as a blur-behind hint.
    /// Input and opaque regions need the empty region itself.
    #[must_use]
    pub fn clear_when_empty(mut self) -> Self {
        self.clear_when_empty = true;
        self
    }

    /// Returns the bound node.
    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Returns the ambient rectangle.
    #[must_use]
    pub fn ambient(&self) -> Option<IntRect> {
        self.ambient
    }

    /// Returns what was last pushed, or `None` if nothing was pushed yet.
    #[must_use]
    pub fn pushed(&self) -> Option<Option<&Region>> {
        self.pushed.as_ref().map(Option::as_ref)
    }

    /// Rebinds to another node. The next update recomputes.
    pub fn set_node(&mut self, node: Option<NodeId>) {
        if self.node != node {
            self.node = node;
            self.stale = true;
        }
    }

    /// Changes the ambient rectangle. The next update recomputes.
    pub fn set_ambient(&mut self, ambient: Option<IntRect>) {
        if self.ambient != ambient {
            self.ambient = ambient;
            self.stale = true;
        }
    }

    /// Computes the region this binding would push, without pushing it.
    #[must_use]
    pub fn resolve(&self, store: &RegionStore) -> Option<Region> {
        let node = self.node.filter(|&n| store.is_alive(n))?;
        let region = match self.ambient {
            Some(ambient) => store.apply_to_rect(node, ambient),
            None => store.build(node),
        };
        (!(self.clear_when_empty && region.is_empty())).then_some(region)
    }

    /// Pushes to `sink` if the bound node is affected by `changes` (or the
    /// binding is new or was reconfigured) and the result differs from the
    /// last push. Returns whether the sink was called.
    pub fn update(
        &mut self,
        store: &RegionStore,
        changes: &RegionChanges,
        sink: &mut dyn RegionSink,
    ) -> bool {
        self.update_traced(store, changes, sink, &mut Tracer::none())
    }

    /// Like [`update`](Self::update), but reports a [`MaskUpdateEvent`] when
    /// the sink is called.
    pub fn update_traced(
        &mut self,
        store: &RegionStore,
        changes: &RegionChanges,
        sink: &mut dyn RegionSink,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let touched = self.node.is_some_and(|n| changes.touches(n.index()));
        if !(touched || self.stale || self.pushed.is_none()) {
            return false;
        }
        self.push(store, sink, tracer)
    }

    /// Recomputes unconditionally, pushing if the result differs from the last
    /// push. Returns whether the sink was called.
    pub fn refresh(&mut self, store: &RegionStore, sink: &mut dyn RegionSink) -> bool {
        self.push(store, sink, &mut Tracer::none())
    }

    fn push(
        &mut self,
        store: &RegionStore,
        sink: &mut dyn RegionSink,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        self.stale = false;
        let next = self.resolve(store);
        if self.pushed.as_ref() == Some(&next) {
            return false;
        }
        sink.set_region(next.as_ref());
        tracer.mask_update(&MaskUpdateEvent {
            node: self.node.map(NodeId::index),
            rect_count: next.as_ref().map_or(0, Region::rect_count),
            cleared: next.is_none(),
        });
        self.pushed = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::node::CombineMode;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Option<Vec<IntRect>>>,
    }

    impl RegionSink for RecordingSink {
        fn set_region(&mut self, region: Option<&Region>) {
            self.calls.push(region.map(|r| r.rects().collect()));
        }
    }

    fn square(store: &mut RegionStore, size: i32) -> NodeId {
        let id = store.create_node();
        store.set_geometry(id, IntRect::new(0, 0, size, size));
        id
    }

    #[test]
    fn first_update_always_pushes() {
        let mut store = RegionStore::new();
        let node = square(&mut store, 10);
        let changes = store.evaluate();

        let mut sink = RecordingSink::default();
        let mut binding = MaskBinding::new(Some(node));
        assert!(binding.update(&store, &changes, &mut sink));
        assert_eq!(sink.calls, [Some(vec_of(IntRect::new(0, 0, 10, 10)))]);
    }

    #[test]
    fn unchanged_region_is_not_pushed_again() {
        let mut store = RegionStore::new();
        let node = square(&mut store, 10);
        let mut sink = RecordingSink::default();
        let mut binding = MaskBinding::new(Some(node));
        let changes = store.evaluate();
        binding.update(&store, &changes, &mut sink);

        // Touched but equal: rebuilt, not pushed.
        store.mark_changed(node);
        let changes = store.evaluate();
        assert!(!binding.update(&store, &changes, &mut sink));

        // Untouched: not even rebuilt.
        let changes = store.evaluate();
        assert!(!binding.update(&store, &changes, &mut sink));
        assert_eq!(sink.calls.len(), 1);
    }

    #[test]
    fn changed_region_is_pushed() {
        let mut store = RegionStore::new();
        let node = square(&mut store, 10);
        let mut sink = RecordingSink::default();
        let mut binding = MaskBinding::new(Some(node));
        let changes = store.evaluate();
        binding.update(&store, &changes, &mut sink);

        store.set_width(node, 20);
        let changes = store.evaluate();
        assert!(binding.update(&store, &changes, &mut sink));
        assert_eq!(
            sink.calls.last(),
            Some(&Some(vec_of(IntRect::new(0, 0, 20, 10))))
        );
    }

    #[test]
    fn missing_node_clears() {
        let store = RegionStore::new();
        let changes = RegionChanges::default();
        let mut sink = RecordingSink::default();

        let mut unbound = MaskBinding::new(None);
        assert!(unbound.update(&store, &changes, &mut sink));
        assert_eq!(sink.calls, [None]);
    }

    #[test]
    fn empty_region_is_pushed_as_empty() {
        let mut store = RegionStore::new();
        let node = store.create_node();
        store.set_geometry(node, IntRect::new(5, 5, 40, 30));
        let twin = store.create_node();
        store.set_geometry(twin, IntRect::new(5, 5, 40, 30));
        store.set_combine_mode(twin, CombineMode::Xor);
        store.append_child(node, twin);

        let mut sink = RecordingSink::default();
        let mut binding = MaskBinding::new(Some(node));
        let changes = store.evaluate();
        assert!(binding.update(&store, &changes, &mut sink));
        assert_eq!(sink.calls, [Some(Vec::new())]);
        assert_eq!(binding.pushed(), Some(Some(&Region::new())));
    }

    #[test]
    fn clear_when_empty_maps_empty_to_none() {
        let mut store = RegionStore::new();
        let hole = store.create_node();
        store.set_geometry(hole, IntRect::new(0, 0, 100, 100));
        store.set_combine_mode(hole, CombineMode::Subtract);

        let mut sink = RecordingSink::default();
        let mut binding = MaskBinding::new(Some(hole))
            .with_ambient(IntRect::new(0, 0, 100, 100))
            .clear_when_empty();
        let changes = store.evaluate();
        assert!(binding.update(&store, &changes, &mut sink));
        assert_eq!(sink.calls, [None]);

        store.set_width(hole, 50);
        let changes = store.evaluate();
        assert!(binding.update(&store, &changes, &mut sink));
        assert_eq!(
            sink.calls.last(),
            Some(&Some(vec_of(IntRect::new(50, 0, 50, 100))))
        );
    }

    #[test]
    fn destroyed_node_clears_once() {
        let mut store = RegionStore::new();
        let node = square(&mut store, 10);
        let mut sink = RecordingSink::default();
        let mut binding = MaskBinding::new(Some(node));
        let changes = store.evaluate();
        binding.update(&store, &changes, &mut sink);

        store.destroy_node(node);
        let changes = store.evaluate();
        assert!(binding.update(&store, &changes, &mut sink));
        assert_eq!(sink.calls.last(), Some(&None));
        assert_eq!(binding.pushed(), Some(None));
    }

    #[test]
    fn ambient_rect_uses_apply_to_rect() {
        let mut store = RegionStore::new();
        let hole = store.create_node();
        store.set_geometry(hole, IntRect::new(25, 25, 50, 50));
        store.set_combine_mode(hole, CombineMode::Subtract);

        let binding = MaskBinding::new(Some(hole)).with_ambient(IntRect::new(0, 0, 100, 100));
        let region = binding.resolve(&store);
        assert_eq!(region.map(|r| r.area()), Some(7500));
    }

    #[test]
    fn rebinding_forces_recompute() {
        let mut store = RegionStore::new();
        let a = square(&mut store, 10);
        let b = square(&mut store, 20);
        let mut sink = RecordingSink::default();
        let mut binding = MaskBinding::new(Some(a));
        let changes = store.evaluate();
        binding.update(&store, &changes, &mut sink);

        binding.set_node(Some(b));
        let changes = store.evaluate();
        assert!(binding.update(&store, &changes, &mut sink));
        assert_eq!(
            sink.calls.last(),
            Some(&Some(vec_of(IntRect::new(0, 0, 20, 20))))
        );
        assert!(!binding.refresh(&store, &mut sink));
    }

    fn vec_of(rect: IntRect) -> Vec<IntRect> {
        alloc::vec![rect]
    }
}
