// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for region building and change delivery.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! engine calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates per-node [`CornerEvent`]s and the
//!   corresponding `TraceSink` method.

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per completed [`build`](crate::node::RegionStore::build_traced).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildEvent {
    /// Slot index of the node that was built.
    pub node: u32,
    /// Number of nodes folded, including the root.
    pub nodes_visited: u32,
    /// Rectangles in the resulting region.
    pub rect_count: usize,
    /// Pixels covered by the resulting region.
    pub area: i64,
}

/// Emitted after [`evaluate`](crate::node::RegionStore::evaluate_traced)
/// drains the dirty tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvaluateEvent {
    /// Number of nodes whose region may have changed.
    pub regions: usize,
    /// Number of nodes created since the previous evaluate.
    pub added: usize,
    /// Number of nodes destroyed since the previous evaluate.
    pub removed: usize,
    /// Whether the tree structure changed.
    pub topology_changed: bool,
}

/// Emitted when a [`MaskBinding`](crate::backend::MaskBinding) pushes a new
/// region to its sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskUpdateEvent {
    /// Slot index of the bound node, if one is set.
    pub node: Option<u32>,
    /// Rectangles pushed, zero when the target was cleared.
    pub rect_count: usize,
    /// Whether the sink was told to clear its region.
    pub cleared: bool,
}

/// Per-node corner sculpting record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerEvent {
    /// Slot index of the sculpted node.
    pub node: u32,
    /// Radius after clamping.
    pub radius: i32,
    /// Scanline strips cut out of the rectangle.
    pub cut_strips: usize,
    /// Scanline strips added outside the rectangle.
    pub bulge_strips: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a region build completes.
    fn on_build(&mut self, e: &BuildEvent) {
        _ = e;
    }

    /// Called after the dirty tracker is drained.
    fn on_evaluate(&mut self, e: &EvaluateEvent) {
        _ = e;
    }

    /// Called when a mask binding pushes to its sink.
    fn on_mask_update(&mut self, e: &MaskUpdateEvent) {
        _ = e;
    }

    /// Called for each node whose corners were sculpted (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_corners(&mut self, e: &CornerEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`BuildEvent`].
    #[inline]
    pub fn build(&mut self, e: &BuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_build(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EvaluateEvent`].
    #[inline]
    pub fn evaluate(&mut self, e: &EvaluateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_evaluate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MaskUpdateEvent`].
    #[inline]
    pub fn mask_update(&mut self, e: &MaskUpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_mask_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CornerEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn corners(&mut self, e: &CornerEvent) {
        if let Some(s) = &mut self.sink {
            s.on_corners(e);
        }
    }
}
