// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change draining.
//!
//! Setters only record dirtiness. [`RegionStore::evaluate`] drains it:
//!
//! 1. **REGION**: drain affected indices in dependency order (children before
//!    parents), dropping slots that were destroyed in the meantime.
//! 2. **TOPOLOGY**: drain the nodes whose child lists changed.
//! 3. Lifecycle lists are moved out as-is.
//!
//! [`RegionChanges`] uses raw slot indices (`u32`) rather than
//! [`NodeId`](super::NodeId) handles, matching
//! [`NodeId::index`](super::NodeId::index).

use alloc::vec::Vec;

use super::store::RegionStore;
use crate::dirty;
use crate::trace::{EvaluateEvent, Tracer};

/// The set of changes produced by a single [`RegionStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct RegionChanges {
    /// Live nodes whose built region may have changed, children before
    /// parents.
    pub regions: Vec<u32>,
    /// Live nodes whose child list changed.
    pub restructured: Vec<u32>,
    /// Nodes created since the last evaluate.
    pub added: Vec<u32>,
    /// Nodes destroyed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether any node was created, destroyed, attached, or detached.
    pub topology_changed: bool,
}

impl RegionChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.regions.clear();
        self.restructured.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Whether the region of slot `idx` may have changed, including by the
    /// node being destroyed.
    #[must_use]
    pub fn touches(&self, idx: u32) -> bool {
        self.regions.contains(&idx) || self.removed.contains(&idx)
    }

    /// Whether nothing changed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
            && self.restructured.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl RegionStore {
    /// Drains all pending change notifications.
    pub fn evaluate(&mut self) -> RegionChanges {
        let mut changes = RegionChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut RegionChanges) {
        changes.clear();

        let drained: Vec<u32> = self
            .dirty
            .drain(dirty::REGION)
            .affected()
            .deterministic()
            .run()
            .collect();
        changes
            .regions
            .extend(drained.into_iter().filter(|&idx| self.is_live_slot(idx)));

        let drained: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes
            .restructured
            .extend(drained.into_iter().filter(|&idx| self.is_live_slot(idx)));

        changes.topology_changed = self.topology_dirty;
        self.topology_dirty = false;

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Like [`evaluate`](Self::evaluate), but reports an [`EvaluateEvent`].
    pub fn evaluate_traced(&mut self, tracer: &mut Tracer<'_>) -> RegionChanges {
        let changes = self.evaluate();
        tracer.evaluate(&EvaluateEvent {
            regions: changes.regions.len(),
            added: changes.added.len(),
            removed: changes.removed.len(),
            topology_changed: changes.topology_changed,
        });
        changes
    }

    fn is_live_slot(&self, idx: u32) -> bool {
        idx < self.len && !self.free_list.contains(&idx)
    }
}
