// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node shape attributes.

use crate::geometry::Region;

/// Primitive a node resolves to before corners and children are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Axis-aligned rectangle, optionally with sculpted corners.
    #[default]
    Rect,
    /// Filled ellipse inscribed in the node's bounds. Corners are ignored.
    Ellipse,
}

/// Boolean operator used to fold a node's region into the accumulated region.
///
/// The accumulated region is always the left operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CombineMode {
    /// Union.
    #[default]
    Combine,
    /// Accumulated minus this node.
    Subtract,
    /// Pixels in both.
    Intersect,
    /// Pixels in exactly one.
    Xor,
}

impl CombineMode {
    /// Folds `incoming` into `accumulated` with this operator.
    #[must_use]
    pub fn apply(self, accumulated: &Region, incoming: &Region) -> Region {
        match self {
            Self::Combine => accumulated.union(incoming),
            Self::Subtract => accumulated.subtract(incoming),
            Self::Intersect => accumulated.intersect(incoming),
            Self::Xor => accumulated.xor(incoming),
        }
    }
}

/// How a single corner of a rounded rectangle is shaped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CornerMode {
    /// Sharp square corner; the radius is ignored for this corner.
    Flat,
    /// Convex quarter-circle cut into the rectangle.
    #[default]
    Normal,
    /// Concave flare that bulges outward horizontally, past the left or right
    /// edge.
    InvertX,
    /// Concave flare that bulges outward vertically, past the top or bottom
    /// edge.
    InvertY,
}

/// One of the four corners of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top-left.
    TopLeft,
    /// Top-right.
    TopRight,
    /// Bottom-left.
    BottomLeft,
    /// Bottom-right.
    BottomRight,
}

impl Corner {
    /// All corners, in the order they are sculpted.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

/// Corner modes for all four corners of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CornerModes {
    /// Top-left corner.
    pub top_left: CornerMode,
    /// Top-right corner.
    pub top_right: CornerMode,
    /// Bottom-left corner.
    pub bottom_left: CornerMode,
    /// Bottom-right corner.
    pub bottom_right: CornerMode,
}

impl CornerModes {
    /// Uses `mode` for every corner.
    #[must_use]
    pub const fn uniform(mode: CornerMode) -> Self {
        Self {
            top_left: mode,
            top_right: mode,
            bottom_left: mode,
            bottom_right: mode,
        }
    }

    /// Returns the mode of one corner.
    #[must_use]
    pub const fn get(&self, corner: Corner) -> CornerMode {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Sets the mode of one corner.
    pub fn set(&mut self, corner: Corner, mode: CornerMode) {
        match corner {
            Corner::TopLeft => self.top_left = mode,
            Corner::TopRight => self.top_right = mode,
            Corner::BottomLeft => self.bottom_left = mode,
            Corner::BottomRight => self.bottom_right = mode,
        }
    }
}
