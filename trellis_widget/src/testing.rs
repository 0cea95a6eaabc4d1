// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles that count callbacks.

use alloc::{boxed::Box, rc::Rc, vec::Vec};
use core::any::Any;
use core::cell::Cell;

use trellis_rect::{Rect, Size};

use crate::class::WidgetClass;
use crate::geometry::{GeomParams, GeometryManager};
use crate::toolkit::{Toolkit, ToolkitConfig};
use crate::tree::Widget;
use crate::types::{GeometryChange, PickId, WidgetId};

/// What the test surface records for each draw call.
pub(crate) type DrawLog = Vec<(WidgetId, Option<Rect>)>;

#[derive(Clone, Default)]
pub(crate) struct Counters {
    pub(crate) notifies: Rc<Cell<usize>>,
    pub(crate) last_change: Rc<Cell<GeometryChange>>,
    pub(crate) releases: Rc<Cell<usize>>,
}

pub(crate) struct TestClass {
    name: &'static str,
    default_size: Size,
    /// Shrink the content rect by this much on each side after every geometry change.
    content_inset: i32,
    /// Re-run the widget's own manager from `geometry_notify`.
    rerun_on_notify: bool,
    pub(crate) counters: Counters,
}

impl TestClass {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            default_size: Size::new(10, 10),
            content_inset: 0,
            rerun_on_notify: false,
            counters: Counters::default(),
        }
    }

    pub(crate) fn with_content_inset(mut self, inset: i32) -> Self {
        self.content_inset = inset;
        self
    }

    pub(crate) fn rerunning(mut self) -> Self {
        self.rerun_on_notify = true;
        self
    }
}

impl WidgetClass for TestClass {
    fn name(&self) -> &str {
        self.name
    }

    fn allocate(&self) -> Box<dyn Any> {
        Box::new(0_u32)
    }

    fn release(&self, _widget: &mut Widget) {
        self.counters.releases.set(self.counters.releases.get() + 1);
    }

    fn draw(
        &self,
        toolkit: &Toolkit,
        widget: WidgetId,
        surface: &mut dyn Any,
        pick_surface: &mut dyn Any,
        clipper: Option<Rect>,
    ) {
        if let Some(log) = surface.downcast_mut::<DrawLog>() {
            log.push((widget, clipper));
        }
        if let (Some(picks), Some(w)) = (
            pick_surface.downcast_mut::<Vec<PickId>>(),
            toolkit.widget(widget),
        ) {
            picks.push(w.pick_id());
        }
        toolkit.draw_children(widget, surface, pick_surface, clipper);
    }

    fn set_defaults(&self, widget: &mut Widget) {
        widget.set_requested_size(self.default_size);
    }

    fn geometry_notify(&self, toolkit: &mut Toolkit, widget: WidgetId, change: GeometryChange) {
        self.counters.notifies.set(self.counters.notifies.get() + 1);
        self.counters.last_change.set(change);
        if self.content_inset > 0
            && let Some(w) = toolkit.widget_mut(widget)
        {
            let r = w.screen_location();
            let i = self.content_inset;
            w.set_content_rect(Some(Rect::new(
                r.top_left.x + i,
                r.top_left.y + i,
                r.size.width - 2 * i,
                r.size.height - 2 * i,
            )));
        }
        if self.rerun_on_notify
            && let Some(manager) = toolkit.geometry_manager_of(widget)
        {
            manager.run(toolkit, widget);
        }
    }
}

/// Positions a widget at a fixed offset rect from its parent's top-left corner.
#[derive(Default)]
pub(crate) struct OffsetManager {
    pub(crate) runs: Rc<Cell<usize>>,
    pub(crate) releases: Rc<Cell<usize>>,
}

impl OffsetManager {
    pub(crate) const NAME: &'static str = "offset";

    pub(crate) fn manage(toolkit: &mut Toolkit, widget: WidgetId, offset: Rect) {
        let manager = toolkit
            .manager_from_name(Self::NAME)
            .expect("offset manager registered");
        toolkit.set_geom_params(widget, Some(GeomParams::new(manager.clone(), offset)));
        manager.run(toolkit, widget);
    }
}

impl GeometryManager for OffsetManager {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, toolkit: &mut Toolkit, widget: WidgetId) {
        self.runs.set(self.runs.get() + 1);
        let Some(offset) = toolkit
            .widget(widget)
            .and_then(|w| w.geom_params())
            .and_then(|p| p.data::<Rect>())
            .copied()
        else {
            return;
        };
        let origin = toolkit
            .tree()
            .parent_of(widget)
            .and_then(|p| toolkit.widget(p))
            .map_or(Rect::ZERO, |p| p.screen_location());
        let rect = offset.translate(origin.top_left.x, origin.top_left.y);
        toolkit.finalize_geometry(widget, rect);
    }

    fn release(&self, _toolkit: &mut Toolkit, _widget: WidgetId) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// A 200x100 toolkit whose root and "frame" class share counters, plus a registered
/// [`OffsetManager`].
pub(crate) fn toolkit() -> (Toolkit, Counters, Rc<OffsetManager>) {
    let class = TestClass::new("frame");
    let counters = class.counters.clone();
    let mut toolkit = Toolkit::new(
        Rc::new(class),
        ToolkitConfig {
            root_size: Size::new(200, 100),
            ..ToolkitConfig::default()
        },
    );
    let manager = Rc::new(OffsetManager::default());
    toolkit.register_manager(manager.clone());
    (toolkit, counters, manager)
}
