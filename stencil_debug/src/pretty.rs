// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use stencil_core::trace::{BuildEvent, CornerEvent, EvaluateEvent, MaskUpdateEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_build(&mut self, e: &BuildEvent) {
        let _ = writeln!(
            self.writer,
            "[build] node={} visited={} rects={} area={}",
            e.node, e.nodes_visited, e.rect_count, e.area,
        );
    }

    fn on_evaluate(&mut self, e: &EvaluateEvent) {
        let topology = if e.topology_changed { "changed" } else { "same" };
        let _ = writeln!(
            self.writer,
            "[evaluate] regions={} added={} removed={} topology={topology}",
            e.regions, e.added, e.removed,
        );
    }

    fn on_mask_update(&mut self, e: &MaskUpdateEvent) {
        let node = e
            .node
            .map_or_else(|| String::from("none"), |n| n.to_string());
        if e.cleared {
            let _ = writeln!(self.writer, "[mask] node={node} cleared");
        } else {
            let _ = writeln!(self.writer, "[mask] node={node} rects={}", e.rect_count);
        }
    }

    fn on_corners(&mut self, e: &CornerEvent) {
        let _ = writeln!(
            self.writer,
            "[corners] node={} radius={} cut={} bulge={}",
            e.node, e.radius, e.cut_strips, e.bulge_strips,
        );
    }
}
