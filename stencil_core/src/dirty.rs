// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Stencil uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! turn attribute mutations into change notifications.
//!
//! # Propagation semantics
//!
//! - **Propagating upward**: [`REGION`] has a dependency edge from every
//!   parent node to each of its children and is marked with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy). A node's built region
//!   depends on all of its descendants, so marking a child automatically marks
//!   every ancestor up to the root.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on a parent whenever its child
//!   list changes, including when a child is destroyed. It does not
//!   propagate, and it drains into
//!   [`RegionChanges::restructured`](crate::node::RegionChanges::restructured).
//!   The separate `topology_changed` flag is set by every structural
//!   mutation, creation and destruction included.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`RegionStore::evaluate`](crate::node::RegionStore::evaluate) call drains
//! both channels and reports the result as
//! [`RegionChanges`](crate::node::RegionChanges), which mask bindings
//! [consume](crate::backend::MaskBinding::update) to decide what to rebuild.

use understory_dirty::Channel;

/// A node's built region may have changed; propagates to all ancestors.
pub const REGION: Channel = Channel::new(0);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(1);
