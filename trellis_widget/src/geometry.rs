// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry managers and the finalize protocol every manager must go through.

use alloc::{boxed::Box, rc::Rc};
use core::any::Any;
use core::fmt;

use trellis_rect::Rect;

use crate::toolkit::Toolkit;
use crate::types::{GeometryChange, WidgetId};

/// An algorithm that computes a widget's screen rectangle.
///
/// A manager binds itself to a widget by storing [`GeomParams`] with
/// [`Toolkit::set_geom_params`]. Its [`GeometryManager::run`] must commit the computed
/// rectangle through [`Toolkit::finalize_geometry`], which is what keeps redraw and
/// child re-layout consistent across managers.
pub trait GeometryManager {
    /// Registry key. Compared exactly and case-sensitively.
    fn name(&self) -> &str;

    /// Recompute the widget's rectangle from its stored parameters and finalize it.
    fn run(&self, toolkit: &mut Toolkit, widget: WidgetId);

    /// Undo manager-specific side effects before the widget is unmapped.
    fn release(&self, toolkit: &mut Toolkit, widget: WidgetId);
}

/// Binding between a widget and the geometry manager in charge of it.
pub struct GeomParams {
    manager: Option<Rc<dyn GeometryManager>>,
    data: Box<dyn Any>,
}

impl fmt::Debug for GeomParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeomParams")
            .field("manager", &self.manager.as_ref().map(|m| m.name()))
            .finish_non_exhaustive()
    }
}

impl GeomParams {
    /// Bind `manager` with its per-widget parameters.
    pub fn new<T: Any>(manager: Rc<dyn GeometryManager>, data: T) -> Self {
        Self {
            manager: Some(manager),
            data: Box::new(data),
        }
    }

    /// The manager in charge, if any.
    pub fn manager(&self) -> Option<&Rc<dyn GeometryManager>> {
        self.manager.as_ref()
    }

    /// Replace the manager in charge.
    pub fn set_manager(&mut self, manager: Option<Rc<dyn GeometryManager>>) {
        self.manager = manager;
    }

    /// Manager-specific parameters.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }

    /// Mutable manager-specific parameters.
    pub fn data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.data.downcast_mut()
    }
}

impl Toolkit {
    /// Register a geometry manager under its [`GeometryManager::name`].
    ///
    /// A second registration under the same name shadows the first.
    pub fn register_manager(&mut self, manager: Rc<dyn GeometryManager>) {
        log::debug!("registering geometry manager {:?}", manager.name());
        self.managers.register(manager.name(), manager.clone());
    }

    /// The most recently registered geometry manager called `name`.
    pub fn manager_from_name(&self, name: &str) -> Option<Rc<dyn GeometryManager>> {
        self.managers.lookup(name)
    }

    /// The manager currently in charge of `widget`, or `None` if it is not displayed.
    pub fn geometry_manager_of(&self, widget: WidgetId) -> Option<Rc<dyn GeometryManager>> {
        self.widget(widget)?.geom_params()?.manager().cloned()
    }

    /// Mutable geometry parameters of a displayed widget.
    pub fn geom_params_mut(&mut self, widget: WidgetId) -> Option<&mut GeomParams> {
        self.tree.get_mut(widget)?.geom_params.as_mut()
    }

    /// Bind (or, with `None`, drop) a widget's geometry parameters.
    ///
    /// This only records the binding. Managers call it before running; removing a widget
    /// from the screen goes through [`Toolkit::unmap`].
    pub fn set_geom_params(&mut self, widget: WidgetId, params: Option<GeomParams>) {
        if let Some(w) = self.tree.get_mut(widget) {
            w.geom_params = params;
        }
    }

    /// Remove a widget from the screen without destroying it.
    ///
    /// Calls the manager's [`GeometryManager::release`], notifies the widget class with
    /// [`GeometryChange::UNMAPPED`], invalidates the vacated area, resets the screen
    /// location to [`Rect::ZERO`], and drops the geometry parameters. Silently does
    /// nothing if the widget is not managed.
    pub fn unmap(&mut self, widget: WidgetId) {
        let Some(manager) = self.geometry_manager_of(widget) else {
            return;
        };
        log::debug!("unmapping widget {widget} from {:?}", manager.name());
        manager.release(self, widget);

        let Some(class) = self.widget(widget).map(|w| w.class().clone()) else {
            return;
        };
        class.geometry_notify(self, widget, GeometryChange::UNMAPPED);

        let Some(w) = self.tree.get_mut(widget) else {
            return;
        };
        let vacated = core::mem::replace(&mut w.screen_location, Rect::ZERO);
        w.geom_params = None;
        self.invalidate_visible(vacated);
    }

    /// Alias for [`Toolkit::unmap`].
    pub fn forget(&mut self, widget: WidgetId) {
        self.unmap(widget);
    }

    /// Commit a rectangle computed by a geometry manager.
    ///
    /// Does nothing and returns `false` when `new_location` equals the current screen
    /// location. Otherwise commits it, invalidates old ∪ new, calls
    /// [`WidgetClass::geometry_notify`](crate::WidgetClass::geometry_notify), re-runs the
    /// manager of every managed child, and returns `true`.
    pub fn finalize_geometry(&mut self, widget: WidgetId, new_location: Rect) -> bool {
        let Some(w) = self.tree.get_mut(widget) else {
            return false;
        };
        let old = w.screen_location;
        if old == new_location {
            return false;
        }
        w.screen_location = new_location;
        let class = w.class().clone();
        log::trace!("widget {widget} geometry {old:?} -> {new_location:?}");

        self.invalidate_visible(old.union_nonempty(new_location));
        class.geometry_notify(self, widget, GeometryChange::between(old, new_location));
        self.run_managed_children(widget);
        true
    }

    /// Re-run the manager of every child of `widget` that is currently managed.
    pub(crate) fn run_managed_children(&mut self, widget: WidgetId) {
        let children = self.tree.children_of(widget).to_vec();
        for child in children {
            if let Some(manager) = self.geometry_manager_of(child) {
                manager.run(self, child);
            }
        }
    }
}
