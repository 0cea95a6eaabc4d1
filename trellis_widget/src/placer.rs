// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placer: positions a widget from absolute and parent-relative parameters.
//!
//! All parameters are optional. Placing an already placed widget only overrides the
//! parameters that are supplied; the others keep their stored values.

use trellis_rect::{Point, Rect, Size};

use crate::error::WidgetError;
use crate::geometry::{GeomParams, GeometryManager};
use crate::toolkit::Toolkit;
use crate::types::WidgetId;

/// Which point of the widget is pinned to the position computed by the placer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    NorthWest,
    /// Middle of the top edge.
    North,
    /// Top-right corner.
    NorthEast,
    /// Middle of the left edge.
    West,
    /// Centre.
    Center,
    /// Middle of the right edge.
    East,
    /// Bottom-left corner.
    SouthWest,
    /// Middle of the bottom edge.
    South,
    /// Bottom-right corner.
    SouthEast,
    /// Same as [`Anchor::NorthWest`].
    None,
}

impl Anchor {
    /// Shift from the anchor point to the top-left corner of a widget of `size`.
    pub const fn offset(self, size: Size) -> (i32, i32) {
        let (w, h) = (size.width.saturating_neg(), size.height.saturating_neg());
        match self {
            Self::None | Self::NorthWest => (0, 0),
            Self::North => (w / 2, 0),
            Self::NorthEast => (w, 0),
            Self::West => (0, h / 2),
            Self::Center => (w / 2, h / 2),
            Self::East => (w, h / 2),
            Self::SouthWest => (0, h),
            Self::South => (w / 2, h),
            Self::SouthEast => (w, h),
        }
    }
}

/// Placer parameters, stored per placed widget and used as the argument of
/// [`Toolkit::place`].
///
/// `None` means "not supplied". Relative values are fractions of the parent's requested
/// size; absolute values are pixels. Positions are measured from the parent's top-left
/// corner on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlacerParams {
    /// Anchor point. Defaults to [`Anchor::NorthWest`].
    pub anchor: Option<Anchor>,
    /// Absolute horizontal offset, added after `rel_x`.
    pub x: Option<i32>,
    /// Absolute vertical offset, added after `rel_y`.
    pub y: Option<i32>,
    /// Absolute width. Overrides `rel_width`.
    pub width: Option<i32>,
    /// Absolute height. Overrides `rel_height`.
    pub height: Option<i32>,
    /// Horizontal position as a fraction of the parent's width.
    pub rel_x: Option<f32>,
    /// Vertical position as a fraction of the parent's height.
    pub rel_y: Option<f32>,
    /// Width as a fraction of the parent's width.
    pub rel_width: Option<f32>,
    /// Height as a fraction of the parent's height.
    pub rel_height: Option<f32>,
}

impl PlacerParams {
    /// No parameters supplied.
    pub const fn new() -> Self {
        Self {
            anchor: None,
            x: None,
            y: None,
            width: None,
            height: None,
            rel_x: None,
            rel_y: None,
            rel_width: None,
            rel_height: None,
        }
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Set the absolute horizontal offset.
    pub fn x(mut self, x: i32) -> Self {
        self.x = Some(x);
        self
    }

    /// Set the absolute vertical offset.
    pub fn y(mut self, y: i32) -> Self {
        self.y = Some(y);
        self
    }

    /// Set the absolute width.
    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the absolute height.
    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the relative horizontal position.
    pub fn rel_x(mut self, rel_x: f32) -> Self {
        self.rel_x = Some(rel_x);
        self
    }

    /// Set the relative vertical position.
    pub fn rel_y(mut self, rel_y: f32) -> Self {
        self.rel_y = Some(rel_y);
        self
    }

    /// Set the relative width.
    pub fn rel_width(mut self, rel_width: f32) -> Self {
        self.rel_width = Some(rel_width);
        self
    }

    /// Set the relative height.
    pub fn rel_height(mut self, rel_height: f32) -> Self {
        self.rel_height = Some(rel_height);
        self
    }

    /// Override every parameter that `update` supplies.
    pub fn merge(&mut self, update: &Self) {
        fn keep<T: Copy>(slot: &mut Option<T>, update: Option<T>) {
            if update.is_some() {
                *slot = update;
            }
        }
        keep(&mut self.anchor, update.anchor);
        keep(&mut self.x, update.x);
        keep(&mut self.y, update.y);
        keep(&mut self.width, update.width);
        keep(&mut self.height, update.height);
        keep(&mut self.rel_x, update.rel_x);
        keep(&mut self.rel_y, update.rel_y);
        keep(&mut self.rel_width, update.rel_width);
        keep(&mut self.rel_height, update.rel_height);
    }

    /// Compute the widget's new requested size and screen rectangle.
    ///
    /// Size comes first, per axis: absolute size, else relative size, else the widget's
    /// current `requested` size. The position starts at `parent_origin`, adds the
    /// relative and absolute offsets, then shifts by the anchor. Coordinates saturate at
    /// the bounds of `i32`.
    pub fn resolve(&self, requested: Size, parent_requested: Size, parent_origin: Point) -> (Size, Rect) {
        let width = self
            .width
            .or_else(|| self.rel_width.map(|r| scale(parent_requested.width, r)))
            .unwrap_or(requested.width);
        let height = self
            .height
            .or_else(|| self.rel_height.map(|r| scale(parent_requested.height, r)))
            .unwrap_or(requested.height);
        let size = Size::new(width, height);

        let (dx, dy) = self.anchor.unwrap_or_default().offset(size);
        let top_left = parent_origin
            .offset(
                self.rel_x.map_or(0, |r| scale(parent_requested.width, r)),
                self.rel_y.map_or(0, |r| scale(parent_requested.height, r)),
            )
            .offset(self.x.unwrap_or(0), self.y.unwrap_or(0))
            .offset(dx, dy);

        (size, Rect::from_origin_size(top_left, size))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Truncation toward zero is the placer's rounding rule."
)]
fn scale(extent: i32, fraction: f32) -> i32 {
    (extent as f32 * fraction) as i32
}

/// The built-in geometry manager, registered as `"placer"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Placer;

impl Placer {
    /// Registry key of the placer.
    pub const NAME: &'static str = "placer";
}

impl GeometryManager for Placer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, toolkit: &mut Toolkit, widget: WidgetId) {
        let Some(params) = toolkit
            .widget(widget)
            .and_then(|w| w.geom_params())
            .and_then(|p| p.data::<PlacerParams>())
            .copied()
        else {
            return;
        };
        if let Some(rect) = toolkit.resolve_placement(widget, &params) {
            toolkit.finalize_geometry(widget, rect);
        }
    }

    fn release(&self, toolkit: &mut Toolkit, widget: WidgetId) {
        log::trace!("placer releasing widget {widget}");
        toolkit.set_geom_params(widget, None);
    }
}

impl Toolkit {
    /// Place `widget` with the placer, relative to its parent.
    ///
    /// The first call binds the widget to the placer (unmapping it from any other
    /// manager); later calls update only the supplied parameters. The resulting
    /// rectangle goes through [`Toolkit::finalize_geometry`], the visible part of the
    /// parent is invalidated, and managed children are refreshed even if the widget
    /// itself did not move.
    pub fn place(&mut self, widget: WidgetId, params: PlacerParams) -> Result<(), WidgetError> {
        if widget == self.root() {
            return Err(WidgetError::RootWidget);
        }
        if !self.tree.is_alive(widget) {
            return Err(WidgetError::StaleWidget { id: widget });
        }
        let placer = self
            .manager_from_name(Placer::NAME)
            .ok_or_else(|| WidgetError::ManagerNotFound {
                name: Placer::NAME.into(),
            })?;

        let placed = self
            .widget(widget)
            .and_then(|w| w.geom_params())
            .is_some_and(|p| p.data::<PlacerParams>().is_some());
        if !placed {
            self.unmap(widget);
        }

        let stored = if let Some(p) = self.geom_params_mut(widget)
            && let Some(stored) = p.data_mut::<PlacerParams>()
        {
            stored.merge(&params);
            let merged = *stored;
            p.set_manager(Some(placer));
            merged
        } else {
            self.set_geom_params(widget, Some(GeomParams::new(placer, params)));
            params
        };

        let Some(rect) = self.resolve_placement(widget, &stored) else {
            return Ok(());
        };
        let changed = self.finalize_geometry(widget, rect);
        if let Some(parent) = self.tree.parent_of(widget) {
            let parent_rect = self.tree.widget(parent).screen_location();
            self.invalidate_visible(parent_rect);
        }
        if !changed {
            self.run_managed_children(widget);
        }
        Ok(())
    }

    /// Resolve stored placer parameters against the parent, updating the widget's
    /// requested size. `None` if the widget or its parent is gone.
    fn resolve_placement(&mut self, widget: WidgetId, params: &PlacerParams) -> Option<Rect> {
        let parent = self.tree.get(self.tree.parent_of(widget)?)?;
        let parent_requested = parent.requested_size();
        let parent_origin = parent.screen_location().top_left;

        let w = self.tree.get_mut(widget)?;
        let (requested, rect) = params.resolve(w.requested_size(), parent_requested, parent_origin);
        w.set_requested_size(requested);
        log::trace!("placer resolved widget {widget} to {rect:?}");
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{OffsetManager, toolkit};
    use crate::types::GeometryChange;

    fn location(tk: &Toolkit, id: WidgetId) -> Rect {
        tk.widget(id).unwrap().screen_location()
    }

    fn centered() -> PlacerParams {
        PlacerParams::new()
            .anchor(Anchor::Center)
            .rel_x(0.5)
            .rel_y(0.5)
            .width(20)
            .height(10)
    }

    #[test]
    fn centered_in_parent() {
        let (mut tk, _, _) = toolkit();
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        tk.place(w, centered()).unwrap();
        assert_eq!(location(&tk, w), Rect::new(90, 45, 20, 10));
        assert!(tk.is_displayed(w));
        assert_eq!(tk.geometry_manager_of(w).unwrap().name(), "placer");
    }

    #[test]
    fn replace_keeps_stored_params() {
        let (mut tk, counters, _) = toolkit();
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        tk.place(w, centered()).unwrap();
        tk.place(w, PlacerParams::new().width(30)).unwrap();
        assert_eq!(location(&tk, w), Rect::new(85, 45, 30, 10));
        assert_eq!(counters.last_change.get(), GeometryChange::MOVED | GeometryChange::RESIZED);

        let stored = tk
            .widget(w)
            .unwrap()
            .geom_params()
            .unwrap()
            .data::<PlacerParams>()
            .copied()
            .unwrap();
        assert_eq!(stored, centered().width(30));
    }

    #[test]
    fn anchors_shift_by_size() {
        let cases = [
            (Anchor::NorthWest, (100, 50)),
            (Anchor::None, (100, 50)),
            (Anchor::North, (90, 50)),
            (Anchor::NorthEast, (80, 50)),
            (Anchor::West, (100, 45)),
            (Anchor::Center, (90, 45)),
            (Anchor::East, (80, 45)),
            (Anchor::SouthWest, (100, 40)),
            (Anchor::South, (90, 40)),
            (Anchor::SouthEast, (80, 40)),
        ];
        for (anchor, (x, y)) in cases {
            let params = PlacerParams::new().anchor(anchor).x(100).y(50).width(20).height(10);
            let (_, rect) = params.resolve(Size::ZERO, Size::new(200, 100), Point::ORIGIN);
            assert_eq!(rect, Rect::new(x, y, 20, 10), "{anchor:?}");
        }
    }

    #[test]
    fn extreme_offsets_saturate() {
        let params = PlacerParams::new().rel_x(1.0).x(i32::MAX).y(i32::MIN);
        let (_, rect) = params.resolve(Size::new(10, 10), Size::new(200, 100), Point::new(10, -10));
        assert_eq!(rect.top_left, Point::new(i32::MAX, i32::MIN));

        let params = PlacerParams::new()
            .anchor(Anchor::SouthEast)
            .x(i32::MIN)
            .width(i32::MAX)
            .height(1);
        let (_, rect) = params.resolve(Size::ZERO, Size::ZERO, Point::ORIGIN);
        assert_eq!(rect.top_left, Point::new(i32::MIN, -1));
        assert_eq!(Anchor::NorthEast.offset(Size::new(i32::MIN, 0)), (i32::MAX, 0));
    }

    #[test]
    fn absolute_size_overrides_relative() {
        let params = PlacerParams::new().rel_width(0.5).rel_height(0.5).width(30);
        let (requested, rect) = params.resolve(Size::new(1, 1), Size::new(200, 100), Point::new(7, 3));
        assert_eq!(requested, Size::new(30, 50));
        assert_eq!(rect, Rect::new(7, 3, 30, 50));
    }

    #[test]
    fn requested_size_is_the_fallback() {
        let (mut tk, _, _) = toolkit();
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        tk.place(w, PlacerParams::new().x(5).y(6)).unwrap();
        assert_eq!(location(&tk, w), Rect::new(5, 6, 10, 10));
    }

    #[test]
    fn zero_sized_parent_gives_zero_relative_size() {
        let (mut tk, _, _) = toolkit();
        let parent = tk.create("frame", tk.root(), None, None).unwrap();
        let child = tk.create("frame", parent, None, None).unwrap();
        tk.place(parent, PlacerParams::new().x(40).y(20).width(0).height(0))
            .unwrap();
        tk.place(child, PlacerParams::new().rel_width(1.0).rel_height(0.5).rel_x(1.0))
            .unwrap();
        assert_eq!(location(&tk, parent), Rect::new(40, 20, 0, 0));
        assert_eq!(location(&tk, child), Rect::new(40, 20, 0, 0));
        assert_eq!(tk.widget(child).unwrap().requested_size(), Size::ZERO);
        assert!(tk.is_displayed(child));
    }

    #[test]
    fn supplied_zero_is_honoured() {
        let (mut tk, _, _) = toolkit();
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        tk.place(w, PlacerParams::new().x(10).y(10)).unwrap();
        tk.place(w, PlacerParams::new().x(0)).unwrap();
        assert_eq!(location(&tk, w), Rect::new(0, 10, 10, 10));
        tk.place(w, PlacerParams::new().y(0)).unwrap();
        assert_eq!(location(&tk, w), Rect::new(0, 0, 10, 10));
    }

    #[test]
    fn container_moves_relative_children() {
        let (mut tk, _, _) = toolkit();
        let parent = tk.create("frame", tk.root(), None, None).unwrap();
        let child = tk.create("frame", parent, None, None).unwrap();
        tk.place(parent, PlacerParams::new().x(10).y(10).width(100).height(50))
            .unwrap();
        tk.place(
            child,
            PlacerParams::new().rel_x(0.5).rel_width(0.5).rel_height(1.0),
        )
        .unwrap();
        assert_eq!(location(&tk, child), Rect::new(60, 10, 50, 50));

        tk.place(parent, PlacerParams::new().x(30)).unwrap();
        assert_eq!(location(&tk, child), Rect::new(80, 10, 50, 50));

        tk.place(parent, PlacerParams::new().width(60)).unwrap();
        assert_eq!(location(&tk, parent), Rect::new(30, 10, 60, 50));
        assert_eq!(location(&tk, child), Rect::new(60, 10, 30, 50));
    }

    #[test]
    fn empty_replace_only_refreshes_children() {
        let (mut tk, counters, manager) = toolkit();
        let parent = tk.create("frame", tk.root(), None, None).unwrap();
        let child = tk.create("frame", parent, None, None).unwrap();
        tk.place(parent, centered()).unwrap();
        OffsetManager::manage(&mut tk, child, Rect::new(1, 1, 2, 2));
        let notifies = counters.notifies.get();
        let runs = manager.runs.get();

        tk.place(parent, PlacerParams::new()).unwrap();
        assert_eq!(location(&tk, parent), Rect::new(90, 45, 20, 10));
        assert_eq!(counters.notifies.get(), notifies, "no geometry change");
        assert_eq!(manager.runs.get(), runs + 1, "managed child refreshed");
    }

    #[test]
    fn place_invalidates_visible_parent() {
        let (mut tk, _, _) = toolkit();
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        tk.place(w, centered()).unwrap();
        let damage = tk.take_damage();
        assert!(damage.dirty_rects.contains(&Rect::new(0, 0, 200, 100)));
        assert!(damage.dirty_rects.contains(&Rect::new(90, 45, 20, 10)));

        // Off-screen placement still only reports the visible part.
        tk.place(w, PlacerParams::new().anchor(Anchor::NorthWest).rel_x(2.0))
            .unwrap();
        let damage = tk.take_damage();
        assert_eq!(damage.union_rect(), Some(Rect::new(0, 0, 200, 100)));
    }

    #[test]
    fn takes_over_from_other_manager() {
        let (mut tk, _, manager) = toolkit();
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        OffsetManager::manage(&mut tk, w, Rect::new(1, 1, 2, 2));
        tk.place(w, PlacerParams::new().x(5)).unwrap();
        assert_eq!(manager.releases.get(), 1);
        assert_eq!(tk.geometry_manager_of(w).unwrap().name(), Placer::NAME);
        assert_eq!(location(&tk, w), Rect::new(5, 0, 10, 10));
    }

    #[test]
    fn unmap_releases_params() {
        let (mut tk, _, _) = toolkit();
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        tk.place(w, centered()).unwrap();
        tk.unmap(w);
        assert!(!tk.is_displayed(w));
        assert_eq!(location(&tk, w), Rect::ZERO);

        // Nothing stored survives: only the requested size written by the placer.
        tk.place(w, PlacerParams::new().x(5)).unwrap();
        assert_eq!(location(&tk, w), Rect::new(5, 0, 20, 10));
    }

    #[test]
    fn place_reports_errors() {
        let (mut tk, _, _) = toolkit();
        assert_eq!(
            tk.place(tk.root(), PlacerParams::new()),
            Err(WidgetError::RootWidget)
        );
        let w = tk.create("frame", tk.root(), None, None).unwrap();
        tk.destroy(w).unwrap();
        assert_eq!(
            tk.place(w, PlacerParams::new()),
            Err(WidgetError::StaleWidget { id: w })
        );

        let mut bare = Toolkit::new(
            alloc::rc::Rc::new(crate::testing::TestClass::new("frame")),
            crate::ToolkitConfig {
                register_placer: false,
                ..crate::ToolkitConfig::default()
            },
        );
        let w = bare.create("frame", bare.root(), None, None).unwrap();
        assert_eq!(
            bare.place(w, PlacerParams::new()),
            Err(WidgetError::ManagerNotFound {
                name: "placer".into()
            })
        );
        assert!(!bare.is_displayed(w));
    }
}
