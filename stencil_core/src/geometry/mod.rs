// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer geometry: rectangles and canonical rectangle-set regions.
//!
//! Everything in the engine reduces to a [`Region`], a set of pixels stored as
//! non-overlapping [`IntRect`]s in a canonical banded form. Regions are plain
//! values: boolean operators return new regions and never mutate their
//! operands.

mod ellipse;
mod rect;
mod region;

pub use rect::IntRect;
pub use region::Region;
