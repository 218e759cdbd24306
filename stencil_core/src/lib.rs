// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composable 2D regions for window shaping and blur hints.
//!
//! `stencil_core` builds masking shapes (rectangles, ellipses, rounded
//! rectangles with per-corner inversion, and boolean combinations of nested
//! shapes) and reduces them to a canonical set of non-overlapping integer
//! rectangles. It is `no_std` compatible (with `alloc`) and stores its tree in
//! struct-of-arrays form with generational index handles.
//!
//! # Architecture
//!
//! Three stages run top-down for every node of a tree:
//!
//! ```text
//!   node attributes / tracked item
//!       │
//!       ▼
//!   resolve ──► base Rect or Ellipse region
//!       │
//!       ▼
//!   sculpt corners (Rect only, radius > 0)
//!       │
//!       ▼
//!   fold children in order (Combine / Subtract / Intersect / Xor)
//!       │
//!       ▼
//!   Region ──► MaskBinding ──► RegionSink (compositor)
//! ```
//!
//! **[`geometry`]**: [`IntRect`](geometry::IntRect) and the canonical banded
//! [`Region`](geometry::Region) with its boolean algebra.
//!
//! **[`node`]**: Struct-of-arrays node tree and tracked items with
//! generational handles, plus the shape resolver, corner sculptor, and tree
//! compositor.
//!
//! **[`dirty`]**: Multi-channel dirty tracking via `understory_dirty`.
//! Mutations mark REGION, which propagates to every ancestor; structural
//! changes also mark TOPOLOGY.
//!
//! **[`backend`]**: The [`RegionSink`](backend::RegionSink) trait that
//! platform backends implement, and [`MaskBinding`](backend::MaskBinding),
//! which pushes rebuilt regions only when they change.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! build and update instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Example
//!
//! ```
//! use stencil_core::geometry::IntRect;
//! use stencil_core::node::{CombineMode, RegionStore};
//!
//! let mut store = RegionStore::new();
//! let frame = store.create_node();
//! store.set_geometry(frame, IntRect::new(0, 0, 100, 100));
//! store.set_radius(frame, 8);
//!
//! let hole = store.create_node();
//! store.set_geometry(hole, IntRect::new(25, 25, 50, 50));
//! store.set_combine_mode(hole, CombineMode::Subtract);
//! store.append_child(frame, hole);
//!
//! let region = store.build(frame);
//! assert!(!region.contains(50, 50));
//! assert!(!region.contains(0, 0));
//! assert!(region.contains(10, 10));
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node
//!   corner events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod dirty;
pub mod geometry;
pub mod node;
pub mod trace;
