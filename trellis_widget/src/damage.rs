// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage: screen regions waiting to be repainted.

use alloc::vec::Vec;
use trellis_rect::Rect;

/// Regions invalidated since the last [`crate::Toolkit::take_damage`].
///
/// Rectangles are in root-window coordinates. They may overlap and are not a minimal
/// cover, but bound everything that needs repainting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Damage {
    /// Rectangles that should be repainted, in the order they were reported.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Record a region. Empty rectangles are dropped.
    pub fn push(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.dirty_rects.push(rect);
        }
    }

    /// True if nothing needs repainting.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, Rect::union))
    }
}
