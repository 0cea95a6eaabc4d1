// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget records and the arena that owns them.

use alloc::{boxed::Box, rc::Rc, vec::Vec};
use core::any::Any;
use core::fmt;

use trellis_rect::{Rect, Size};

use crate::class::WidgetClass;
use crate::geometry::GeomParams;
use crate::toolkit::Toolkit;
use crate::types::{PickId, WidgetId};

/// Callback run just before a widget is destroyed. The widget is still fully readable.
pub type Destructor = Box<dyn FnOnce(&mut Toolkit, WidgetId)>;

/// A node of the widget tree.
///
/// Widgets are owned by the [`WidgetTree`]; callers hold [`WidgetId`]s and borrow records
/// through [`Toolkit::widget`] and [`Toolkit::widget_mut`]. Geometry fields are written by
/// geometry managers only.
pub struct Widget {
    generation: u32,
    class: Rc<dyn WidgetClass>,
    pick_id: PickId,
    parent: Option<WidgetId>,
    /// Head first. Later children are drawn on top of earlier ones.
    children: Vec<WidgetId>,
    instance: Box<dyn Any>,
    user_data: Option<Box<dyn Any>>,
    pub(crate) destructor: Option<Destructor>,
    requested_size: Size,
    pub(crate) screen_location: Rect,
    content_rect: Option<Rect>,
    pub(crate) geom_params: Option<GeomParams>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("class", &self.class.name())
            .field("pick_id", &self.pick_id)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("requested_size", &self.requested_size)
            .field("screen_location", &self.screen_location)
            .field("content_rect", &self.content_rect)
            .field("geom_params", &self.geom_params)
            .finish_non_exhaustive()
    }
}

impl Widget {
    pub(crate) fn new(class: Rc<dyn WidgetClass>, instance: Box<dyn Any>) -> Self {
        Self {
            generation: 0,
            class,
            pick_id: PickId(0),
            parent: None,
            children: Vec::new(),
            instance,
            user_data: None,
            destructor: None,
            requested_size: Size::ZERO,
            screen_location: Rect::ZERO,
            content_rect: None,
            geom_params: None,
        }
    }

    /// The class governing this widget.
    pub fn class(&self) -> &Rc<dyn WidgetClass> {
        &self.class
    }

    /// Identifier painted on the pick surface for this widget.
    pub fn pick_id(&self) -> PickId {
        self.pick_id
    }

    /// The parent, or `None` for the root.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children from head to tail.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The size this widget would like, independent of any geometry manager.
    pub fn requested_size(&self) -> Size {
        self.requested_size
    }

    /// Update the requested size. Takes effect on the next geometry computation.
    pub fn set_requested_size(&mut self, size: Size) {
        self.requested_size = size;
    }

    /// The on-screen rectangle. Meaningful only while [`Widget::is_displayed`].
    pub fn screen_location(&self) -> Rect {
        self.screen_location
    }

    /// Interior rectangle available to children. Defaults to the screen location.
    pub fn content_rect(&self) -> Rect {
        self.content_rect.unwrap_or(self.screen_location)
    }

    /// Override the interior rectangle, typically from
    /// [`WidgetClass::geometry_notify`]. `None` restores the default.
    pub fn set_content_rect(&mut self, rect: Option<Rect>) {
        self.content_rect = rect;
    }

    /// True while a geometry manager manages this widget.
    pub fn is_displayed(&self) -> bool {
        self.geom_params.is_some()
    }

    /// Geometry manager parameters, present exactly while the widget is displayed.
    pub fn geom_params(&self) -> Option<&GeomParams> {
        self.geom_params.as_ref()
    }

    /// Class-specific state created by [`WidgetClass::allocate`].
    pub fn instance<T: Any>(&self) -> Option<&T> {
        self.instance.downcast_ref()
    }

    /// Mutable class-specific state.
    pub fn instance_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.instance.downcast_mut()
    }

    /// Opaque data supplied at creation.
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_deref()?.downcast_ref()
    }

    /// Mutable opaque data.
    pub fn user_data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.user_data.as_deref_mut()?.downcast_mut()
    }

    /// Replace the opaque data, returning the previous value.
    pub fn set_user_data(&mut self, data: Option<Box<dyn Any>>) -> Option<Box<dyn Any>> {
        core::mem::replace(&mut self.user_data, data)
    }
}

/// Arena of widgets addressed by generational [`WidgetId`]s.
///
/// The tree only maintains structure: parent links, ordered child lists, slot liveness.
/// Class callbacks and geometry run through [`Toolkit`].
pub struct WidgetTree {
    /// slots
    widgets: Vec<Option<Widget>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    /// Maximum number of slots, bounded by what a pick colour can encode.
    pub(crate) slot_limit: usize,
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.widgets.len();
        let alive = self.widgets.iter().filter(|w| w.is_some()).count();
        f.debug_struct("WidgetTree")
            .field("widgets_total", &total)
            .field("widgets_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl WidgetTree {
    pub(crate) fn new() -> Self {
        Self {
            widgets: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            slot_limit: PickId::LIMIT as usize,
        }
    }

    /// Whether another widget can be inserted without exceeding the slot limit.
    pub(crate) fn has_room(&self) -> bool {
        !self.free_list.is_empty() || self.widgets.len() < self.slot_limit
    }

    /// Link `widget` as the new head of `parent`'s children (or as a parentless root).
    ///
    /// Callers check [`WidgetTree::has_room`] first.
    pub(crate) fn insert(&mut self, parent: Option<WidgetId>, mut widget: Widget) -> WidgetId {
        debug_assert!(self.has_room(), "widget slots exhausted");
        let idx = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            widget.generation = generation;
            self.widgets[idx] = Some(widget);
            idx
        } else {
            widget.generation = 1;
            self.widgets.push(Some(widget));
            self.generations.push(1);
            self.widgets.len() - 1
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "WidgetId uses 32-bit indices by design."
        )]
        let id = WidgetId::new(idx as u32, self.generations[idx]);
        self.widget_mut(id).pick_id = PickId(id.0);
        if let Some(p) = parent {
            self.widget_mut(p).children.insert(0, id);
            self.widget_mut(id).parent = Some(p);
        }
        id
    }

    /// Unlink `id` from its parent and free its slot. Children must already be gone.
    pub(crate) fn remove(&mut self, id: WidgetId) -> Option<Widget> {
        if !self.is_alive(id) {
            return None;
        }
        if let Some(parent) = self.widget(id).parent
            && let Some(p) = self.get_mut(parent)
        {
            p.children.retain(|c| *c != id);
        }
        debug_assert!(
            self.widget(id).children.is_empty(),
            "widget removed while it still has children"
        );
        self.free_list.push(id.idx());
        self.widgets[id.idx()].take()
    }

    /// Returns true if `id` refers to a live widget.
    ///
    /// A `WidgetId` is live if its slot is occupied and the generation matches.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Borrow a live widget.
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        let w = self.widgets.get(id.idx())?.as_ref()?;
        (w.generation == id.1).then_some(w)
    }

    /// Borrow a live widget mutably.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        let w = self.widgets.get_mut(id.idx())?.as_mut()?;
        if w.generation != id.1 {
            return None;
        }
        Some(w)
    }

    /// Access a widget; panics if `id` is stale.
    pub(crate) fn widget(&self, id: WidgetId) -> &Widget {
        self.get(id).expect("dangling WidgetId")
    }

    /// Access a widget mutably; panics if `id` is stale.
    pub(crate) fn widget_mut(&mut self, id: WidgetId) -> &mut Widget {
        self.get_mut(id).expect("dangling WidgetId")
    }

    /// Number of live widgets, the root included.
    pub fn len(&self) -> usize {
        self.widgets.len() - self.free_list.len()
    }

    /// Always false once a toolkit exists: the root is never freed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the parent of a widget if live, or `None` for the root or stale ids.
    pub fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id)?.parent
    }

    /// Get the children of a widget (head first), or an empty slice if it is stale.
    pub fn children_of(&self, id: WidgetId) -> &[WidgetId] {
        self.get(id).map_or(&[], |w| &w.children)
    }

    /// Head of the child list.
    pub fn first_child(&self, id: WidgetId) -> Option<WidgetId> {
        self.children_of(id).first().copied()
    }

    /// Tail of the child list.
    pub fn last_child(&self, id: WidgetId) -> Option<WidgetId> {
        self.children_of(id).last().copied()
    }

    /// The sibling that follows `id` in its parent's child list.
    pub fn next_sibling(&self, id: WidgetId) -> Option<WidgetId> {
        let siblings = self.children_of(self.parent_of(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    /// Get the next widget in depth-first (draw) order.
    ///
    /// Returns `None` past the last widget or if `current` is stale.
    pub fn next_depth_first(&self, current: WidgetId) -> Option<WidgetId> {
        if let Some(first_child) = self.first_child(current) {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Find the live widget carrying `pick_id`.
    pub fn by_pick_id(&self, pick_id: PickId) -> Option<WidgetId> {
        let w = self.widgets.get(pick_id.0 as usize)?.as_ref()?;
        Some(WidgetId::new(pick_id.0, w.generation))
    }
}
