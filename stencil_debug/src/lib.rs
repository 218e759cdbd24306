// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and snapshots for stencil diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: a [`TraceSink`](stencil_core::trace::TraceSink)
//!   with human-readable one-line-per-event output.
//! - [`snapshot`]: ASCII rasters and JSON dumps of regions, for logs and for
//!   shape-level assertions in tests.

pub mod pretty;
pub mod snapshot;
