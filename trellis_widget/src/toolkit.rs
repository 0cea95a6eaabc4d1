// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The toolkit context: registries, the widget tree, and pending damage.

use alloc::{boxed::Box, rc::Rc, vec};
use core::any::Any;
use core::fmt;

use trellis_rect::{Point, Rect, Size};

use crate::class::WidgetClass;
use crate::damage::Damage;
use crate::error::WidgetError;
use crate::geometry::GeometryManager;
use crate::placer::Placer;
use crate::registry::Registry;
use crate::tree::{Destructor, Widget, WidgetTree};
use crate::types::{PickId, WidgetId};

/// Settings read once by [`Toolkit::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolkitConfig {
    /// Size of the root window, and so of the root widget.
    pub root_size: Size,
    /// Register the built-in [`Placer`] on construction.
    pub register_placer: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            root_size: Size::new(800, 600),
            register_placer: true,
        }
    }
}

/// Owner of everything a widget tree needs: the class and geometry manager registries,
/// the tree itself with its root widget, and the damage waiting to be repainted.
///
/// All operations are synchronous and assume exclusive access for the duration of a
/// layout pass; the toolkit is neither `Send` nor `Sync`.
///
/// ## Example
///
/// ```rust
/// use std::any::Any;
/// use std::rc::Rc;
/// use trellis_widget::{
///     Anchor, PlacerParams, Rect, Size, Toolkit, ToolkitConfig, Widget, WidgetClass, WidgetId,
/// };
///
/// struct Frame;
///
/// impl WidgetClass for Frame {
///     fn name(&self) -> &str {
///         "frame"
///     }
///     fn allocate(&self) -> Box<dyn Any> {
///         Box::new(())
///     }
///     fn set_defaults(&self, _widget: &mut Widget) {}
///     fn draw(
///         &self,
///         toolkit: &Toolkit,
///         widget: WidgetId,
///         surface: &mut dyn Any,
///         pick_surface: &mut dyn Any,
///         clipper: Option<Rect>,
///     ) {
///         toolkit.draw_children(widget, surface, pick_surface, clipper);
///     }
/// }
///
/// let mut toolkit = Toolkit::new(
///     Rc::new(Frame),
///     ToolkitConfig {
///         root_size: Size::new(200, 100),
///         ..ToolkitConfig::default()
///     },
/// );
/// let child = toolkit.create("frame", toolkit.root(), None, None).unwrap();
/// toolkit
///     .place(
///         child,
///         PlacerParams::new()
///             .anchor(Anchor::Center)
///             .rel_x(0.5)
///             .rel_y(0.5)
///             .width(20)
///             .height(10),
///     )
///     .unwrap();
///
/// assert_eq!(
///     toolkit.widget(child).unwrap().screen_location(),
///     Rect::new(90, 45, 20, 10)
/// );
/// assert!(!toolkit.take_damage().is_empty());
/// ```
pub struct Toolkit {
    pub(crate) classes: Registry<dyn WidgetClass>,
    pub(crate) managers: Registry<dyn GeometryManager>,
    pub(crate) tree: WidgetTree,
    root: WidgetId,
    damage: Damage,
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("classes", &self.classes)
            .field("managers", &self.managers)
            .field("tree", &self.tree)
            .field("root", &self.root)
            .field("damage", &self.damage)
            .finish()
    }
}

impl Toolkit {
    /// Create a toolkit whose root widget is of class `root_class`.
    ///
    /// The root class is registered, so further widgets of that class can be created by
    /// name. The root widget spans `config.root_size` at the origin and is not managed by
    /// any geometry manager.
    pub fn new(root_class: Rc<dyn WidgetClass>, config: ToolkitConfig) -> Self {
        let mut tree = WidgetTree::new();
        let mut root = Widget::new(root_class.clone(), root_class.allocate());
        root_class.set_defaults(&mut root);
        root.set_requested_size(config.root_size);
        root.screen_location = Rect::from_origin_size(Point::ORIGIN, config.root_size);
        let root = tree.insert(None, root);

        let mut toolkit = Self {
            classes: Registry::default(),
            managers: Registry::default(),
            tree,
            root,
            damage: Damage::default(),
        };
        toolkit.register_class(root_class);
        if config.register_placer {
            toolkit.register_manager(Rc::new(Placer));
        }
        toolkit
    }

    /// The root widget. It has no parent and is never destroyed.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Read-only access to the tree structure.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Borrow a live widget.
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.tree.get(id)
    }

    /// Borrow a live widget mutably.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.tree.get_mut(id)
    }

    /// Register a widget class under its [`WidgetClass::name`].
    ///
    /// Must happen before any widget of the class is created. A second registration
    /// under the same name shadows the first.
    pub fn register_class(&mut self, class: Rc<dyn WidgetClass>) {
        log::debug!("registering widget class {:?}", class.name());
        self.classes.register(class.name(), class.clone());
    }

    /// The most recently registered widget class called `name`.
    pub fn class_from_name(&self, name: &str) -> Option<Rc<dyn WidgetClass>> {
        self.classes.lookup(name)
    }

    /// Create a widget of class `class_name` as the new head of `parent`'s children.
    ///
    /// The widget is not displayed until a geometry manager takes it.
    pub fn create(
        &mut self,
        class_name: &str,
        parent: WidgetId,
        user_data: Option<Box<dyn Any>>,
        destructor: Option<Destructor>,
    ) -> Result<WidgetId, WidgetError> {
        let class = self
            .class_from_name(class_name)
            .ok_or_else(|| WidgetError::ClassNotFound {
                name: class_name.into(),
            })?;
        if !self.tree.is_alive(parent) {
            return Err(WidgetError::InvalidParent { parent });
        }

        if !self.tree.has_room() {
            return Err(WidgetError::TooManyWidgets {
                limit: self.tree.slot_limit,
            });
        }

        let mut widget = Widget::new(class.clone(), class.allocate());
        class.set_defaults(&mut widget);
        debug_assert!(
            !widget.is_displayed(),
            "set_defaults of {class_name:?} left the widget managed"
        );
        widget.set_user_data(user_data);
        widget.destructor = destructor;

        let id = self.tree.insert(Some(parent), widget);
        log::debug!("created {class_name:?} widget {id} under {parent}");
        Ok(id)
    }

    /// Destroy a widget and all its descendants.
    ///
    /// For each widget, children first: unmap it (invalidating its area), run its
    /// destructor, let its class release its resources, then unlink and free it. The id
    /// is stale afterwards.
    pub fn destroy(&mut self, widget: WidgetId) -> Result<(), WidgetError> {
        if widget == self.root {
            return Err(WidgetError::RootWidget);
        }
        if !self.tree.is_alive(widget) {
            return Err(WidgetError::StaleWidget { id: widget });
        }
        self.destroy_subtree(widget);
        Ok(())
    }

    fn destroy_subtree(&mut self, widget: WidgetId) {
        self.unmap(widget);
        for child in self.tree.children_of(widget).to_vec() {
            self.destroy_subtree(child);
        }

        let destructor = self.tree.get_mut(widget).and_then(|w| w.destructor.take());
        if let Some(destructor) = destructor {
            destructor(self, widget);
        }
        // The destructor may have destroyed the widget, or given it new children.
        if !self.tree.is_alive(widget) {
            return;
        }
        for child in self.tree.children_of(widget).to_vec() {
            self.destroy_subtree(child);
        }

        let w = self.tree.widget_mut(widget);
        let class = w.class().clone();
        class.release(w);
        self.tree.remove(widget);
        log::debug!("destroyed {:?} widget {widget}", class.name());
    }

    /// True iff the widget is live and managed by a geometry manager.
    pub fn is_displayed(&self, widget: WidgetId) -> bool {
        self.widget(widget).is_some_and(Widget::is_displayed)
    }

    /// The front-most displayed widget at `point` (root-window coordinates).
    ///
    /// Follows draw order: children above their parent, later siblings above earlier
    /// ones, each child clipped to its parent's content rectangle. Returns `None` when
    /// only the root is there.
    pub fn pick(&self, point: Point) -> Option<WidgetId> {
        let root = self.tree.widget(self.root);
        let mut hit = None;
        let mut stack = vec![(self.root, root.screen_location())];

        while let Some((id, clip)) = stack.pop() {
            let w = self.tree.widget(id);
            if id != self.root && w.screen_location().intersection(clip).contains_point(point) {
                hit = Some(id);
            }
            let child_clip = w.content_rect().intersection(clip);
            if !child_clip.contains_point(point) {
                continue;
            }
            // Reversed so that children are visited in draw order.
            for &child in w.children().iter().rev() {
                if self.tree.widget(child).is_displayed() {
                    stack.push((child, child_clip));
                }
            }
        }
        hit
    }

    /// Resolve a colour read back from the pick surface.
    pub fn widget_by_pick_id(&self, pick_id: PickId) -> Option<WidgetId> {
        self.tree.by_pick_id(pick_id)
    }

    /// Report a region, in root-window coordinates, as needing repaint.
    pub fn invalidate_rect(&mut self, rect: Rect) {
        self.damage.push(rect);
    }

    /// Invalidate the part of `rect` that lies inside the root window.
    pub(crate) fn invalidate_visible(&mut self, rect: Rect) {
        let root = self.tree.widget(self.root).screen_location();
        self.invalidate_rect(rect.intersection(root));
    }

    /// Damage accumulated since the last [`Toolkit::take_damage`].
    pub fn damage(&self) -> &Damage {
        &self.damage
    }

    /// Drain the accumulated damage, typically once per frame.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    /// Draw the whole tree, starting with the root widget's class.
    pub fn draw(&self, surface: &mut dyn Any, pick_surface: &mut dyn Any, clipper: Option<Rect>) {
        let root = self.tree.widget(self.root);
        root.class().draw(self, self.root, surface, pick_surface, clipper);
    }

    /// Draw every displayed child of `widget`, in order, clipped to `clipper` and to the
    /// widget's content rectangle. Children entirely outside the clip are skipped.
    pub fn draw_children(
        &self,
        widget: WidgetId,
        surface: &mut dyn Any,
        pick_surface: &mut dyn Any,
        clipper: Option<Rect>,
    ) {
        let Some(w) = self.widget(widget) else {
            return;
        };
        let content = w.content_rect();
        let clip = clipper.map_or(content, |c| c.intersection(content));
        for &child in w.children() {
            let Some(c) = self.widget(child) else {
                continue;
            };
            if !c.is_displayed() || c.screen_location().intersection(clip).is_empty() {
                continue;
            }
            c.class().draw(self, child, surface, pick_surface, Some(clip));
        }
    }
}
