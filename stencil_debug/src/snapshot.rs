// Copyright 2026 the Stencil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region snapshots.
//!
//! [`ascii`] renders a region as a character raster (`#` covered, `.` not),
//! which makes corner and ellipse shapes readable in logs and test failures.
//! [`to_json`] and [`write_json`] dump the exact rectangle list.

use std::io::{self, Write};

use serde_json::{Value, json};

use stencil_core::geometry::{IntRect, Region};

/// Renders the part of `region` inside `frame`, one line per pixel row.
#[must_use]
pub fn ascii(region: &Region, frame: IntRect) -> String {
    let mut out = String::new();
    for y in frame.y..frame.bottom() {
        for x in frame.x..frame.right() {
            out.push(if region.contains(x, y) { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Renders the region inside its own bounds, or an empty string when empty.
#[must_use]
pub fn ascii_bounds(region: &Region) -> String {
    region
        .bounds()
        .map(|b| ascii(region, b))
        .unwrap_or_default()
}

fn rect_json(r: IntRect) -> Value {
    json!([r.x, r.y, r.width, r.height])
}

/// Describes a region as `{"bounds", "area", "rects"}` with rectangles as
/// `[x, y, width, height]` arrays in band order.
#[must_use]
pub fn to_json(region: &Region) -> Value {
    json!({
        "bounds": region.bounds().map(rect_json),
        "area": region.area(),
        "rects": region.rects().map(rect_json).collect::<Vec<_>>(),
    })
}

/// Writes [`to_json`] output, pretty-printed, to `writer`.
pub fn write_json(region: &Region, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &to_json(region))?;
    writeln!(writer)
}
