// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch state for backend-created protocol objects.
//!
//! The only object this backend creates is `wl_region`, which has no events.
//! A queue still needs a `Dispatch` implementation for it before regions can
//! be created on that queue.
//!
//! ```text
//! Owned state
//! -----------
//!   EventQueue<WaylandState>
//!     -> QueueHandle<WaylandState> -> SurfaceRegion<WaylandState>
//!
//! Embedded state
//! --------------
//!   EventQueue<HostState>, HostState { wayland: WaylandState, ... }
//!     delegate_dispatch!(HostState: [WlRegion: ()] => WaylandState)
//!     -> QueueHandle<HostState> -> SurfaceRegion<HostState>
//! ```
//!
//! Using a queue handle whose state cannot dispatch `wl_region` is a compile
//! error rather than a silent failure.

use wayland_client::protocol::wl_region::{self, WlRegion};
use wayland_client::{Connection, Dispatch, QueueHandle};

/// Backend-owned state for Wayland protocol handling.
///
/// In embedded mode, host application state should contain one of these and
/// delegate `wl_region` dispatch to it.
#[derive(Debug, Default)]
pub struct WaylandState {
    _private: (),
}

impl WaylandState {
    /// Creates a new empty backend state.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl Dispatch<WlRegion, ()> for WaylandState {
    fn event(
        _state: &mut Self,
        _proxy: &WlRegion,
        _event: wl_region::Event,
        _data: &(),
        _conn: &Connection,
        _qhandle: &QueueHandle<Self>,
    ) {
        // wl_region has no events.
    }
}
