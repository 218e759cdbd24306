// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying regions to a `wl_surface`.

use std::fmt;

use stencil_core::backend::RegionSink;
use stencil_core::geometry::Region;
use wayland_client::protocol::wl_compositor::WlCompositor;
use wayland_client::protocol::wl_region::WlRegion;
use wayland_client::protocol::wl_surface::WlSurface;
use wayland_client::{Dispatch, QueueHandle};

/// Which surface region a [`SurfaceRegion`] controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegionTarget {
    /// `wl_surface.set_input_region`. Clearing restores the default, where
    /// the whole surface accepts input.
    #[default]
    Input,
    /// `wl_surface.set_opaque_region`. Clearing marks nothing as opaque.
    Opaque,
}

/// `wl_region.add` arguments `(x, y, width, height)` for every rectangle of
/// `region`, in band order.
#[must_use]
pub fn region_requests(region: &Region) -> Vec<(i32, i32, i32, i32)> {
    region
        .rects()
        .map(|r| (r.x, r.y, r.width, r.height))
        .collect()
}

/// A [`RegionSink`] that installs regions on one `wl_surface`.
///
/// Every non-empty push creates a `wl_region`, adds the region's rectangles,
/// hands it to the surface, and destroys it again (the surface keeps its own
/// copy). An empty region installs an empty `wl_region`, so an empty input
/// mask accepts no input. `None` resets the target. Changes apply on the next
/// surface commit, which stays under the host's control.
pub struct SurfaceRegion<D> {
    compositor: WlCompositor,
    surface: WlSurface,
    queue_handle: QueueHandle<D>,
    target: RegionTarget,
}

impl<D> fmt::Debug for SurfaceRegion<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRegion")
            .field("surface", &self.surface)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<D> SurfaceRegion<D>
where
    D: Dispatch<WlRegion, ()> + 'static,
{
    /// Creates a sink for `surface`. `queue_handle` is used to create the
    /// `wl_region` objects.
    #[must_use]
    pub fn new(
        compositor: WlCompositor,
        surface: WlSurface,
        queue_handle: QueueHandle<D>,
        target: RegionTarget,
    ) -> Self {
        Self {
            compositor,
            surface,
            queue_handle,
            target,
        }
    }

    /// Returns the controlled surface.
    #[must_use]
    pub fn surface(&self) -> &WlSurface {
        &self.surface
    }

    /// Returns which surface region is controlled.
    #[must_use]
    pub fn target(&self) -> RegionTarget {
        self.target
    }

    fn install(&self, region: Option<&WlRegion>) {
        match self.target {
            RegionTarget::Input => self.surface.set_input_region(region),
            RegionTarget::Opaque => self.surface.set_opaque_region(region),
        }
    }
}

impl<D> RegionSink for SurfaceRegion<D>
where
    D: Dispatch<WlRegion, ()> + 'static,
{
    fn set_region(&mut self, region: Option<&Region>) {
        let Some(region) = region else {
            self.install(None);
            return;
        };
        let wl_region = self.compositor.create_region(&self.queue_handle, ());
        for (x, y, width, height) in region_requests(region) {
            wl_region.add(x, y, width, height);
        }
        self.install(Some(&wl_region));
        wl_region.destroy();
    }
}

#[cfg(test)]
mod tests {
    use stencil_core::geometry::IntRect;

    use super::*;

    #[test]
    fn requests_follow_band_order() {
        let ring = Region::from_rect(IntRect::new(0, 0, 100, 100))
            .subtract(&Region::from_rect(IntRect::new(25, 25, 50, 50)));
        assert_eq!(
            region_requests(&ring),
            [
                (0, 0, 100, 25),
                (0, 25, 25, 50),
                (75, 25, 25, 50),
                (0, 75, 100, 25),
            ]
        );
    }

    #[test]
    fn empty_region_has_no_requests() {
        assert!(region_requests(&Region::new()).is_empty());
    }

    #[test]
    fn input_is_default_target() {
        assert_eq!(RegionTarget::default(), RegionTarget::Input);
    }
}
