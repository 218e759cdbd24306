// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filled-ellipse rasterization.
//!
//! The ellipse is inscribed in its bounding rectangle and emitted as one span
//! per pixel row. For row `j` the span is measured at the row edge closest to
//! the vertical centre, so a row straddling the centre is always full width:
//!
//! ```text
//! cy = h / 2, cx = w / 2
//! dy = max(0, cy - (j + 1), j - cy)
//! hw = cx * sqrt(1 - (dy / cy)^2)
//! inset = min(round(cx - hw), (w - 1) / 2)
//! row  = [x + inset, x + w - inset)
//! ```
//!
//! Rounding is half away from zero. The inset clamp keeps every row at least
//! one pixel wide (two when `w` is even), so the ellipse touches all four edge
//! midpoints. Rows depend only on their distance from the centre, which makes
//! the result mirror symmetric about both centre lines.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::rect::IntRect;
use super::region::Region;

impl Region {
    /// Creates a filled ellipse inscribed in `bounds`.
    ///
    /// Empty bounds produce an empty region.
    #[must_use]
    pub fn from_ellipse(bounds: IntRect) -> Self {
        if bounds.is_empty() {
            return Self::new();
        }
        Self::from_rects(ellipse_rows(bounds))
    }
}

/// One single-row rectangle per pixel row of the ellipse.
fn ellipse_rows(bounds: IntRect) -> Vec<IntRect> {
    let cx = f64::from(bounds.width) / 2.0;
    let cy = f64::from(bounds.height) / 2.0;
    let max_inset = (bounds.width - 1) / 2;

    (0..bounds.height)
        .map(|j| {
            let row = f64::from(j);
            let dy = (cy - (row + 1.0)).max(row - cy).max(0.0);
            let t = dy / cy;
            let half_width = cx * (1.0 - t * t).max(0.0).sqrt();
            #[expect(
                clippy::cast_possible_truncation,
                reason = "inset is bounded by the i32 width it was derived from"
            )]
            let inset = ((cx - half_width).round() as i32).clamp(0, max_inset);
            IntRect::from_edges(
                bounds.x.saturating_add(inset),
                bounds.y.saturating_add(j),
                bounds.right().saturating_sub(inset),
                bounds.y.saturating_add(j).saturating_add(1),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirrored_x(region: &Region, bounds: IntRect) -> Region {
        Region::from_rects(region.rects().map(|r| {
            IntRect::new(bounds.x + bounds.right() - r.right(), r.y, r.width, r.height)
        }))
    }

    fn mirrored_y(region: &Region, bounds: IntRect) -> Region {
        Region::from_rects(region.rects().map(|r| {
            IntRect::new(r.x, bounds.y + bounds.bottom() - r.bottom(), r.width, r.height)
        }))
    }

    #[test]
    fn empty_bounds_are_empty() {
        assert!(Region::from_ellipse(IntRect::new(0, 0, 0, 10)).is_empty());
        assert!(Region::from_ellipse(IntRect::new(0, 0, 10, -1)).is_empty());
    }

    #[test]
    fn ellipse_fits_its_bounds() {
        for bounds in [
            IntRect::new(0, 0, 100, 100),
            IntRect::new(7, -3, 31, 12),
            IntRect::new(0, 0, 1, 1),
            IntRect::new(0, 0, 2, 9),
        ] {
            let e = Region::from_ellipse(bounds);
            assert_eq!(e.bounds(), Some(bounds), "bounds of ellipse in {bounds:?}");
        }
    }

    #[test]
    fn ellipse_touches_edge_midpoints() {
        let b = IntRect::new(10, 20, 41, 17);
        let e = Region::from_ellipse(b);
        let mid_x = b.x + b.width / 2;
        let mid_y = b.y + b.height / 2;
        assert!(e.contains(mid_x, b.y), "top midpoint");
        assert!(e.contains(mid_x, b.bottom() - 1), "bottom midpoint");
        assert!(e.contains(b.x, mid_y), "left midpoint");
        assert!(e.contains(b.right() - 1, mid_y), "right midpoint");
        assert!(!e.contains(b.x, b.y), "corners are cut");
    }

    #[test]
    fn ellipse_is_mirror_symmetric() {
        for b in [
            IntRect::new(0, 0, 100, 60),
            IntRect::new(-5, 3, 33, 47),
            IntRect::new(0, 0, 8, 8),
        ] {
            let e = Region::from_ellipse(b);
            assert_eq!(mirrored_x(&e, b), e, "horizontal mirror of {b:?}");
            assert_eq!(mirrored_y(&e, b), e, "vertical mirror of {b:?}");
        }
    }

    #[test]
    fn circle_area_is_close_to_pi_r_squared() {
        let e = Region::from_ellipse(IntRect::new(0, 0, 200, 200));
        let exact = core::f64::consts::PI * 100.0 * 100.0;
        let area = e.area() as f64;
        assert!((area - exact).abs() / exact < 0.02, "area {area} vs {exact}");
    }
}
