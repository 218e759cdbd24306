// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayland backend for stencil.
//!
//! [`SurfaceRegion`] implements [`RegionSink`] for one `wl_surface`, turning
//! each pushed region into a fresh `wl_region` and installing it as the
//! surface's input or opaque region. Like every `wl_surface` state change,
//! the new region takes effect on the host's next `wl_surface.commit`.
//!
//! The host owns the connection and event queue. `wl_region` objects must be
//! created on a queue whose state implements `Dispatch<WlRegion, ()>`; use
//! [`WaylandState`] directly, or delegate to it from host state.

mod state;
mod surface;

pub use state::WaylandState;
pub use stencil_core::backend::RegionSink;
pub use surface::{RegionTarget, SurfaceRegion, region_requests};
