// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scanline approximation of rounded and inverted rectangle corners.
//!
//! A corner of radius `r` is drawn as `r` one-pixel-high strips. The strip on
//! scanline `d` (counted from the rectangle edge) has the chord width
//!
//! ```text
//! cw(r, d) = r - round(sqrt(r^2 - (r - d - 0.5)^2))
//! ```
//!
//! which is widest on the edge row and falls to zero towards the tip of the
//! arc. `Normal` corners subtract the strips from inside the rectangle;
//! `InvertX` and `InvertY` corners add them outside the left/right or
//! top/bottom edge respectively.
//!
//! The radius is clamped to half the shorter side, so cuts from different
//! corners never overlap and cuts never touch bulges. All strips are therefore
//! gathered first and applied as one subtraction and one union.
//!
//! Strip edges are computed in `i64` and clipped to the `i32` plane, so a
//! bulge past the edge of the plane is dropped rather than wrapped.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::shape::{Corner, CornerMode, CornerModes};
use crate::geometry::{IntRect, Region};

/// Chord width on scanline `d` of a corner with radius `r`.
///
/// Returns 0 (or less) where the arc contributes nothing.
#[must_use]
pub fn chord_width(r: i32, d: i32) -> i32 {
    let rf = f64::from(r);
    let t = f64::from(r - d) - 0.5;
    let inner = (rf * rf - t * t).max(0.0).sqrt().round();
    #[expect(
        clippy::cast_possible_truncation,
        reason = "inner is at most r, which is an i32"
    )]
    let inner = inner as i32;
    r - inner
}

/// Radius actually used for `bounds`: `min(radius, min(width, height) / 2)`.
#[must_use]
pub fn clamp_radius(radius: i32, bounds: IntRect) -> i32 {
    radius.min(bounds.width.min(bounds.height) / 2)
}

/// Strips removed from and added to a rectangle by its corners.
#[derive(Clone, Debug, Default)]
pub(crate) struct CornerStrips {
    pub(crate) cuts: Vec<IntRect>,
    pub(crate) bulges: Vec<IntRect>,
}

impl CornerStrips {
    /// Collects the strips of every corner for an already clamped radius.
    pub(crate) fn collect(bounds: IntRect, r: i32, corners: CornerModes) -> Self {
        let mut strips = Self::default();
        for corner in Corner::ALL {
            let mode = corners.get(corner);
            if mode == CornerMode::Flat {
                continue;
            }
            for i in 0..r {
                if let Some((strip, bulge)) = corner_strip(bounds, r, corner, mode, i) {
                    if bulge {
                        strips.bulges.push(strip);
                    } else {
                        strips.cuts.push(strip);
                    }
                }
            }
        }
        strips
    }

    /// Applies the strips to `region`.
    pub(crate) fn apply(&self, region: &Region) -> Region {
        let mut out = region.clone();
        if !self.cuts.is_empty() {
            out = out.subtract(&Region::from_rects(self.cuts.iter().copied()));
        }
        if !self.bulges.is_empty() {
            out = out.union(&Region::from_rects(self.bulges.iter().copied()));
        }
        out
    }
}

/// Sculpts the four corners of `bounds` into `region`.
///
/// `bounds` is first clipped to the `i32` plane. Does nothing when `radius`
/// (after clamping) is not positive or when the region is empty.
#[must_use]
pub fn apply_corners(
    region: &Region,
    bounds: IntRect,
    radius: i32,
    corners: CornerModes,
) -> Region {
    let bounds = IntRect::from_edges(bounds.x, bounds.y, bounds.right(), bounds.bottom());
    let r = clamp_radius(radius, bounds);
    if r <= 0 || region.is_empty() {
        return region.clone();
    }
    CornerStrips::collect(bounds, r, corners).apply(region)
}

/// The strip for scanline `i` of one corner, and whether it is added.
fn corner_strip(
    b: IntRect,
    r: i32,
    corner: Corner,
    mode: CornerMode,
    i: i32,
) -> Option<(IntRect, bool)> {
    let top = matches!(corner, Corner::TopLeft | Corner::TopRight);
    let left = matches!(corner, Corner::TopLeft | Corner::BottomLeft);
    let (x0, y0) = (i64::from(b.x), i64::from(b.y));
    let (x1, y1) = (i64::from(b.right()), i64::from(b.bottom()));
    let step = i64::from(i);
    let row = if top { y0 + step } else { y1 - 1 - step };

    let (x, y, cw, bulge) = match mode {
        CornerMode::Flat => return None,
        CornerMode::Normal => {
            let cw = i64::from(chord_width(r, i));
            let x = if left { x0 } else { x1 - cw };
            (x, row, cw, false)
        }
        CornerMode::InvertX => {
            let cw = i64::from(chord_width(r, i));
            let x = if left { x0 - cw } else { x1 };
            (x, row, cw, true)
        }
        CornerMode::InvertY => {
            let (y, cw) = if top {
                (y0 - i64::from(r) + step, chord_width(r, r - i))
            } else {
                (y1 + step, chord_width(r, i))
            };
            let cw = i64::from(cw);
            let x = if left { x0 } else { x1 - cw };
            (x, y, cw, true)
        }
    };

    if cw <= 0 {
        return None;
    }
    let strip = IntRect::from_edges(
        saturate(x),
        saturate(y),
        saturate(x + cw),
        saturate(y + 1),
    );
    (!strip.is_empty()).then_some((strip, bulge))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the i32 range first"
)]
fn saturate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
