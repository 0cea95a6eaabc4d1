// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public handle types: widget identifiers, pick identifiers, and geometry change flags.

use core::fmt;

use trellis_rect::Rect;

/// Identifier for a widget in the tree (generational).
///
/// An id stays valid until the widget is destroyed. After that it is stale forever, even
/// if its slot is reused by a later widget.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.0, self.1)
    }
}

/// Per-widget identifier for the off-screen pick surface.
///
/// Drawing collaborators paint each widget's pick area with [`PickId::to_rgba`]; reading a
/// pixel back and passing it to [`PickId::from_rgba`] and
/// [`Toolkit::widget_by_pick_id`](crate::Toolkit::widget_by_pick_id) yields the widget
/// under that pixel.
///
/// A pick id is the widget's arena slot, so it is unique among live widgets and is
/// reused once its widget is destroyed. A colour carries 24 bits, which caps the number
/// of live widgets at [`PickId::LIMIT`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PickId(pub(crate) u32);

impl PickId {
    /// Number of distinct pick ids a colour can encode.
    pub const LIMIT: u32 = 1 << 24;

    /// The raw identifier.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Encode as an opaque RGBA colour.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r, g, b, 0xff]
    }

    /// Decode a colour produced by [`PickId::to_rgba`]. Alpha is ignored.
    #[inline]
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self(u32::from_be_bytes([0, rgba[0], rgba[1], rgba[2]]))
    }
}

bitflags::bitflags! {
    /// What a geometry notification is about.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GeometryChange: u8 {
        /// The top-left corner moved.
        const MOVED    = 0b0000_0001;
        /// The width or height changed.
        const RESIZED  = 0b0000_0010;
        /// The widget was removed from its geometry manager.
        const UNMAPPED = 0b0000_0100;
    }
}

impl GeometryChange {
    /// Classify the difference between two screen locations.
    pub fn between(old: Rect, new: Rect) -> Self {
        let mut change = Self::empty();
        if old.top_left != new.top_left {
            change |= Self::MOVED;
        }
        if old.size != new.size {
            change |= Self::RESIZED;
        }
        change
    }
}
