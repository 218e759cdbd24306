// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region node tree data model.
//!
//! A *node* is one composable shape definition. Each node has:
//!
//! - An identity ([`NodeId`]): a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   A parent owns its children; destroying a node destroys its subtree.
//! - **Attributes** set by the caller: [`shape`](RegionStore::set_shape),
//!   [`combine mode`](RegionStore::set_combine_mode),
//!   [`geometry`](RegionStore::set_geometry),
//!   [`radius`](RegionStore::set_radius),
//!   [`corners`](RegionStore::set_corners), and an optional
//!   [`tracked item`](RegionStore::set_item) that overrides the explicit
//!   geometry.
//!
//! The store also holds *tracked items* ([`ItemId`]): small stand-ins for
//! externally positioned content, each with a transform, a size, and an
//! optional parent item. Nodes bound to an item follow its scene-space
//! bounds.
//!
//! Regions are produced on demand by [`build`](RegionStore::build). Building
//! is a pure read of the store.
//!
//! # Dirty tracking
//!
//! Attribute mutations mark the [`REGION`](crate::dirty::REGION) channel with
//! eager propagation, so a change anywhere in a subtree marks every ancestor.
//! Structural changes additionally mark [`TOPOLOGY`](crate::dirty::TOPOLOGY).
//! [`evaluate`](RegionStore::evaluate) drains both into [`RegionChanges`].

mod compose;
mod corners;
mod evaluate;
mod id;
mod resolve;
mod shape;
mod store;
mod traverse;

pub use corners::{apply_corners, chord_width, clamp_radius};
pub use evaluate::RegionChanges;
pub use id::{INVALID, ItemId, NodeId};
pub use shape::{CombineMode, Corner, CornerMode, CornerModes, Shape};
pub use store::RegionStore;
pub use traverse::Children;
