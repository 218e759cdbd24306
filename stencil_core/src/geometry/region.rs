// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical rectangle-set regions and their boolean algebra.
//!
//! A [`Region`] is stored in *y-x banded* form:
//!
//! - The region is split into horizontal bands `[top, bottom)`, sorted top to
//!   bottom and pairwise disjoint.
//! - Each band holds spans `[left, right)` sorted left to right. Spans never
//!   overlap or touch; touching spans are merged.
//! - Vertically adjacent bands with identical spans are coalesced.
//!
//! This representation is unique for a given set of pixels, so two regions
//! compare equal exactly when they cover the same pixels, and the rectangle
//! decomposition returned by [`Region::rects`] is deterministic.
//!
//! Every boolean operation is a sweep over the union of both operands' band
//! edges: each elementary band is computed with a 1-D span merge and then
//! pushed through the same coalescing step, which keeps the output canonical.

use alloc::vec::Vec;

use super::rect::IntRect;

/// A half-open horizontal run `[left, right)` inside a band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Span {
    left: i32,
    right: i32,
}

/// A horizontal slab of the region with identical coverage on every row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Band {
    top: i32,
    bottom: i32,
    spans: Vec<Span>,
}

/// A set of pixels represented as non-overlapping integer rectangles.
///
/// See the [module documentation](self) for the canonical form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    bands: Vec<Band>,
}

impl Region {
    /// Creates an empty region.
    #[must_use]
    pub const fn new() -> Self {
        Self { bands: Vec::new() }
    }

    /// Creates a region covering a single rectangle.
    ///
    /// Empty rectangles produce an empty region.
    #[must_use]
    pub fn from_rect(rect: IntRect) -> Self {
        let mut region = Self::new();
        if !rect.is_empty() {
            region.bands.push(Band {
                top: rect.y,
                bottom: rect.bottom(),
                spans: alloc::vec![Span {
                    left: rect.x,
                    right: rect.right(),
                }],
            });
        }
        region
    }

    /// Creates the union of many rectangles in a single sweep.
    ///
    /// Rectangles may overlap; empty rectangles are ignored.
    #[must_use]
    pub fn from_rects<I>(rects: I) -> Self
    where
        I: IntoIterator<Item = IntRect>,
    {
        let mut rects: Vec<IntRect> = rects.into_iter().filter(|r| !r.is_empty()).collect();
        rects.sort_unstable_by_key(|r| r.y);

        let mut edges: Vec<i32> = rects.iter().flat_map(|r| [r.y, r.bottom()]).collect();
        edges.sort_unstable();
        edges.dedup();

        let mut region = Self::new();
        let mut active: Vec<IntRect> = Vec::new();
        let mut next = 0;
        let mut spans: Vec<Span> = Vec::new();

        for pair in edges.windows(2) {
            let (top, bottom) = (pair[0], pair[1]);
            active.retain(|r| r.bottom() > top);
            while next < rects.len() && rects[next].y <= top {
                active.push(rects[next]);
                next += 1;
            }

            spans.clear();
            spans.extend(active.iter().map(|r| Span {
                left: r.x,
                right: r.right(),
            }));
            spans.sort_unstable_by_key(|s| s.left);

            let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
            for &span in &spans {
                match merged.last_mut() {
                    Some(last) if span.left <= last.right => {
                        last.right = last.right.max(span.right);
                    }
                    _ => merged.push(span),
                }
            }
            region.push_band(top, bottom, merged);
        }

        region
    }

    /// Returns `true` if the region covers no pixels.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Iterates over the region's rectangles, top to bottom and left to right.
    ///
    /// The rectangles never overlap and their union is exactly the region.
    pub fn rects(&self) -> impl Iterator<Item = IntRect> + '_ {
        self.bands.iter().flat_map(|band| {
            band.spans
                .iter()
                .map(move |s| IntRect::from_edges(s.left, band.top, s.right, band.bottom))
        })
    }

    /// Number of rectangles returned by [`rects`](Self::rects).
    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.bands.iter().map(|b| b.spans.len()).sum()
    }

    /// Smallest rectangle containing the whole region, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<IntRect> {
        let first = self.bands.first()?;
        let last = self.bands.last()?;
        let left = self
            .bands
            .iter()
            .filter_map(|b| b.spans.first())
            .map(|s| s.left)
            .min()?;
        let right = self
            .bands
            .iter()
            .filter_map(|b| b.spans.last())
            .map(|s| s.right)
            .max()?;
        Some(IntRect::from_edges(left, first.top, right, last.bottom))
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn area(&self) -> i64 {
        self.bands
            .iter()
            .map(|b| {
                let rows = i64::from(b.bottom) - i64::from(b.top);
                let cols: i64 = b
                    .spans
                    .iter()
                    .map(|s| i64::from(s.right) - i64::from(s.left))
                    .sum();
                rows * cols
            })
            .sum()
    }

    /// Returns `true` if the pixel at `(px, py)` belongs to the region.
    #[must_use]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        self.bands
            .iter()
            .find(|b| py >= b.top && py < b.bottom)
            .is_some_and(|b| b.spans.iter().any(|s| px >= s.left && px < s.right))
    }

    /// Returns a copy of the region moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::from_rects(
            self.rects().map(|r| {
                IntRect::new(
                    r.x.saturating_add(dx),
                    r.y.saturating_add(dy),
                    r.width,
                    r.height,
                )
            }),
        )
    }

    /// Pixels covered by either region.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::sweep(self, other, |a, b| a || b)
    }

    /// Pixels covered by `self` but not by `other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        Self::sweep(self, other, |a, b| a && !b)
    }

    /// Pixels covered by both regions.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::new();
        }
        Self::sweep(self, other, |a, b| a && b)
    }

    /// Pixels covered by exactly one of the regions.
    #[must_use]
    pub fn xor(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::sweep(self, other, |a, b| a != b)
    }

    // -- Internal helpers --

    /// Appends a band below all existing bands, coalescing with the last one
    /// when they touch and carry identical spans.
    fn push_band(&mut self, top: i32, bottom: i32, spans: Vec<Span>) {
        if spans.is_empty() || top >= bottom {
            return;
        }
        if let Some(last) = self.bands.last_mut()
            && last.bottom == top
            && last.spans == spans
        {
            last.bottom = bottom;
            return;
        }
        self.bands.push(Band {
            top,
            bottom,
            spans,
        });
    }

    /// Generic band sweep. `keep(in_a, in_b)` decides pixel membership.
    fn sweep(a: &Self, b: &Self, keep: impl Fn(bool, bool) -> bool) -> Self {
        let mut edges: Vec<i32> = a
            .bands
            .iter()
            .chain(&b.bands)
            .flat_map(|band| [band.top, band.bottom])
            .collect();
        edges.sort_unstable();
        edges.dedup();

        let mut out = Self::new();
        let (mut ia, mut ib) = (0, 0);
        for pair in edges.windows(2) {
            let (top, bottom) = (pair[0], pair[1]);
            while ia < a.bands.len() && a.bands[ia].bottom <= top {
                ia += 1;
            }
            while ib < b.bands.len() && b.bands[ib].bottom <= top {
                ib += 1;
            }
            let spans_a = band_spans_at(&a.bands, ia, top);
            let spans_b = band_spans_at(&b.bands, ib, top);
            if spans_a.is_empty() && spans_b.is_empty() {
                continue;
            }
            out.push_band(top, bottom, merge_spans(spans_a, spans_b, &keep));
        }
        out
    }
}

/// Spans of the band at `idx` if it covers row `top`, otherwise nothing.
fn band_spans_at(bands: &[Band], idx: usize, top: i32) -> &[Span] {
    match bands.get(idx) {
        Some(band) if band.top <= top => &band.spans,
        _ => &[],
    }
}

/// 1-D boolean merge of two canonical span lists.
fn merge_spans(a: &[Span], b: &[Span], keep: &impl Fn(bool, bool) -> bool) -> Vec<Span> {
    let mut xs: Vec<i32> = a
        .iter()
        .chain(b)
        .flat_map(|s| [s.left, s.right])
        .collect();
    xs.sort_unstable();
    xs.dedup();

    let mut out: Vec<Span> = Vec::new();
    let (mut ja, mut jb) = (0, 0);
    for pair in xs.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        while ja < a.len() && a[ja].right <= left {
            ja += 1;
        }
        while jb < b.len() && b[jb].right <= left {
            jb += 1;
        }
        let in_a = a.get(ja).is_some_and(|s| s.left <= left);
        let in_b = b.get(jb).is_some_and(|s| s.left <= left);
        if !keep(in_a, in_b) {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.right == left => last.right = right,
            _ => out.push(Span { left, right }),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn rects(region: &Region) -> Vec<IntRect> {
        region.rects().collect()
    }

    #[test]
    fn empty_rect_gives_empty_region() {
        assert!(Region::from_rect(IntRect::new(5, 5, 0, 10)).is_empty());
        assert!(Region::from_rect(IntRect::new(5, 5, -2, 10)).is_empty());
        assert_eq!(Region::new().bounds(), None);
        assert_eq!(Region::new().area(), 0);
    }

    #[test]
    fn single_rect_round_trips() {
        let r = IntRect::new(10, 20, 30, 40);
        let region = Region::from_rect(r);
        assert_eq!(rects(&region), vec![r]);
        assert_eq!(region.bounds(), Some(r));
        assert_eq!(region.area(), 1200);
    }

    #[test]
    fn subtract_hole_splits_into_bands() {
        let outer = Region::from_rect(IntRect::new(0, 0, 100, 100));
        let hole = Region::from_rect(IntRect::new(25, 25, 50, 50));
        let ring = outer.subtract(&hole);
        assert_eq!(ring.area(), 7500);
        assert_eq!(
            rects(&ring),
            vec![
                IntRect::new(0, 0, 100, 25),
                IntRect::new(0, 25, 25, 50),
                IntRect::new(75, 25, 25, 50),
                IntRect::new(0, 75, 100, 25),
            ]
        );
        assert!(!ring.contains(50, 50));
        assert!(ring.contains(10, 50));
    }

    #[test]
    fn union_is_canonical_regardless_of_order() {
        let a = Region::from_rect(IntRect::new(0, 0, 10, 10));
        let b = Region::from_rect(IntRect::new(0, 10, 10, 10));
        let ab = a.union(&b);
        let ba = b.union(&a);
        assert_eq!(ab, ba);
        // Touching bands with identical spans are coalesced.
        assert_eq!(rects(&ab), vec![IntRect::new(0, 0, 10, 20)]);

        let c = Region::from_rect(IntRect::new(10, 0, 5, 20));
        assert_eq!(rects(&ab.union(&c)), vec![IntRect::new(0, 0, 15, 20)]);
    }

    #[test]
    fn split_then_rejoined_equals_original() {
        let whole = Region::from_rect(IntRect::new(0, 0, 40, 40));
        let left = whole.intersect(&Region::from_rect(IntRect::new(0, 0, 13, 40)));
        let right = whole.subtract(&left);
        assert_eq!(left.union(&right), whole);
    }

    #[test]
    fn intersect_and_xor() {
        let a = Region::from_rect(IntRect::new(0, 0, 20, 20));
        let b = Region::from_rect(IntRect::new(10, 10, 20, 20));
        assert_eq!(rects(&a.intersect(&b)), vec![IntRect::new(10, 10, 10, 10)]);

        let x = a.xor(&b);
        assert_eq!(x.area(), 400 + 400 - 2 * 100);
        assert!(!x.contains(15, 15));
        assert!(x.contains(5, 5));
        assert!(x.contains(25, 25));

        assert!(a.xor(&a).is_empty());
        assert!(a.intersect(&Region::new()).is_empty());
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = Region::from_rect(IntRect::new(0, 0, 10, 10));
        let b = Region::from_rect(IntRect::new(10, 0, 10, 10));
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.subtract(&b), a);
    }

    #[test]
    fn from_rects_merges_overlaps() {
        let region = Region::from_rects([
            IntRect::new(0, 0, 10, 10),
            IntRect::new(5, 5, 10, 10),
            IntRect::new(100, 100, 0, 5),
        ]);
        let folded = Region::from_rect(IntRect::new(0, 0, 10, 10))
            .union(&Region::from_rect(IntRect::new(5, 5, 10, 10)));
        assert_eq!(region, folded);
        assert_eq!(region.area(), 175);
        assert_eq!(region.bounds(), Some(IntRect::new(0, 0, 15, 15)));
    }

    #[test]
    fn rects_never_overlap() {
        let region = Region::from_rects([
            IntRect::new(0, 0, 30, 5),
            IntRect::new(3, 2, 4, 20),
            IntRect::new(20, 4, 15, 3),
            IntRect::new(-7, 10, 9, 9),
        ]);
        let list = rects(&region);
        let sum: i64 = list.iter().map(IntRect::area).sum();
        assert_eq!(sum, region.area());
        for (i, a) in list.iter().enumerate() {
            for b in &list[i + 1..] {
                let overlap =
                    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom();
                assert!(!overlap, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn translated_moves_every_rect() {
        let region = Region::from_rect(IntRect::new(0, 0, 4, 4))
            .subtract(&Region::from_rect(IntRect::new(1, 1, 2, 2)));
        let moved = region.translated(10, -3);
        assert_eq!(moved.area(), region.area());
        assert_eq!(moved.bounds(), Some(IntRect::new(10, -3, 4, 4)));
        assert!(!moved.contains(11, -2));
    }
}
