// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned integer rectangles and their union/intersection algebra.

use crate::types::{Point, Size};

/// An axis-aligned rectangle: a top-left corner and a size.
///
/// The rectangle covers the half-open ranges `x in [top_left.x, top_left.x + width)` and
/// `y in [top_left.y, top_left.y + height)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner.
    pub top_left: Point,
    /// Extent from the top-left corner.
    pub size: Size,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::from_origin_size(Point::ORIGIN, Size::ZERO);

    /// Create a rectangle from its top-left coordinates and extents.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::from_origin_size(Point::new(x, y), Size::new(width, height))
    }

    /// Create a rectangle from a top-left corner and a size.
    #[inline]
    pub const fn from_origin_size(top_left: Point, size: Size) -> Self {
        Self { top_left, size }
    }

    /// The corner opposite to `top_left`, i.e. `top_left + size`, saturating at the
    /// bounds of `i32`.
    #[inline]
    pub const fn far_corner(&self) -> Point {
        self.top_left.offset(self.size.width, self.size.height)
    }

    /// True if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Return this rectangle shifted by `(dx, dy)`.
    #[inline]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::from_origin_size(self.top_left.offset(dx, dy), self.size)
    }

    /// Whether `point` lies inside the rectangle. The far edges are outside.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        let far = self.far_corner();
        self.top_left.x <= point.x && point.x < far.x && self.top_left.y <= point.y && point.y < far.y
    }

    /// Whether `other` lies entirely within this rectangle.
    ///
    /// An empty `other` is contained when its top-left corner lies within the closed
    /// bounds of this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Self) -> bool {
        let far = self.far_corner();
        let other_far = other.far_corner();
        self.top_left.x <= other.top_left.x
            && self.top_left.y <= other.top_left.y
            && other_far.x <= far.x
            && other_far.y <= far.y
    }

    /// The smallest rectangle covering both `self` and `other`.
    ///
    /// The top-left is the component-wise minimum of both top-lefts and the far corner is
    /// the component-wise maximum of both far corners. Empty inputs still take part; use
    /// [`Rect::union_nonempty`] to ignore them.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        let (far, other_far) = (self.far_corner(), other.far_corner());
        let top_left = Point::new(
            self.top_left.x.min(other.top_left.x),
            self.top_left.y.min(other.top_left.y),
        );
        let far = Point::new(far.x.max(other_far.x), far.y.max(other_far.y));
        Self::from_origin_size(
            top_left,
            Size::new(
                far.x.saturating_sub(top_left.x),
                far.y.saturating_sub(top_left.y),
            ),
        )
    }

    /// Like [`Rect::union`], but an empty input does not stretch the result.
    ///
    /// If exactly one input is empty the other is returned unchanged.
    #[inline]
    pub fn union_nonempty(self, other: Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (false, true) => self,
            (true, false) => other,
            _ => self.union(other),
        }
    }

    /// The overlap of `self` and `other`.
    ///
    /// The top-left is the component-wise maximum of both top-lefts and the far corner is
    /// the component-wise minimum of both far corners. If that leaves a negative extent on
    /// either axis, the size collapses to `(0, 0)`.
    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        let (far, other_far) = (self.far_corner(), other.far_corner());
        let top_left = Point::new(
            self.top_left.x.max(other.top_left.x),
            self.top_left.y.max(other.top_left.y),
        );
        let far = Point::new(far.x.min(other_far.x), far.y.min(other_far.y));
        let mut size = Size::new(
            far.x.saturating_sub(top_left.x),
            far.y.saturating_sub(top_left.y),
        );
        if size.width < 0 || size.height < 0 {
            size = Size::ZERO;
        }
        Self::from_origin_size(top_left, size)
    }
}
