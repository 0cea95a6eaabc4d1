// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions to and from kurbo geometry.
//!
//! Integer geometry converts to kurbo losslessly. The reverse direction rounds outward
//! for rectangles (so a clip never shrinks) and to nearest for points.

use crate::{Point, Rect, Size};

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

impl From<Size> for kurbo::Size {
    fn from(s: Size) -> Self {
        Self::new(f64::from(s.width), f64::from(s.height))
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::from_origin_size(kurbo::Point::from(r.top_left), kurbo::Size::from(r.size))
    }
}

impl From<kurbo::Rect> for Rect {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Screen coordinates fit in i32; out-of-range values saturate."
    )]
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs().expand();
        Self::new(
            r.x0 as i32,
            r.y0 as i32,
            (r.x1 - r.x0) as i32,
            (r.y1 - r.y0) as i32,
        )
    }
}

impl From<kurbo::Point> for Point {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Screen coordinates fit in i32; out-of-range values saturate."
    )]
    fn from(p: kurbo::Point) -> Self {
        let p = p.round();
        Self::new(p.x as i32, p.y as i32)
    }
}
