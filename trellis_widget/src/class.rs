// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget classes: the behaviour shared by every widget of one kind.

use alloc::boxed::Box;
use core::any::Any;

use trellis_rect::Rect;

use crate::toolkit::Toolkit;
use crate::tree::Widget;
use crate::types::{GeometryChange, WidgetId};

/// Behaviour of one kind of widget (frame, button, top-level, ...).
///
/// Classes are registered with [`Toolkit::register_class`] and looked up by
/// [`WidgetClass::name`] when a widget is created. The same class value serves every
/// widget of its kind; per-widget state lives in the instance returned by
/// [`WidgetClass::allocate`].
///
/// ```rust
/// use core::any::Any;
/// use trellis_widget::{Rect, Size, Toolkit, Widget, WidgetClass, WidgetId};
///
/// #[derive(Default)]
/// struct FrameState {
///     border_width: i32,
/// }
///
/// struct Frame;
///
/// impl WidgetClass for Frame {
///     fn name(&self) -> &str {
///         "frame"
///     }
///
///     fn allocate(&self) -> Box<dyn Any> {
///         Box::new(FrameState::default())
///     }
///
///     fn set_defaults(&self, widget: &mut Widget) {
///         widget.set_requested_size(Size::new(100, 100));
///         if let Some(state) = widget.instance_mut::<FrameState>() {
///             state.border_width = 1;
///         }
///     }
///
///     fn draw(
///         &self,
///         toolkit: &Toolkit,
///         widget: WidgetId,
///         surface: &mut dyn Any,
///         pick_surface: &mut dyn Any,
///         clipper: Option<Rect>,
///     ) {
///         // Paint the frame here, then let the children paint on top.
///         toolkit.draw_children(widget, surface, pick_surface, clipper);
///     }
/// }
/// ```
pub trait WidgetClass {
    /// Registry key. Compared exactly and case-sensitively.
    fn name(&self) -> &str;

    /// Create the class-specific instance state for a new widget, in its zero state.
    fn allocate(&self) -> Box<dyn Any>;

    /// Release resources owned by the widget's fields before it is freed.
    ///
    /// The widget record itself is dropped by the tree afterwards.
    fn release(&self, _widget: &mut Widget) {}

    /// Draw the widget onto `surface` and its pick area onto `pick_surface`, then draw its
    /// children (usually through [`Toolkit::draw_children`]).
    ///
    /// Surfaces are opaque handles owned by the drawing backend. When `clipper` is set,
    /// drawing is restricted to it.
    fn draw(
        &self,
        toolkit: &Toolkit,
        widget: WidgetId,
        surface: &mut dyn Any,
        pick_surface: &mut dyn Any,
        clipper: Option<Rect>,
    );

    /// Populate class defaults on a freshly allocated widget.
    ///
    /// Must leave the widget unmapped; it is not yet linked into the tree.
    fn set_defaults(&self, widget: &mut Widget);

    /// Called after the geometry manager committed a new screen location, or after the
    /// widget was unmapped. The new location is already readable through the toolkit.
    fn geometry_notify(&self, _toolkit: &mut Toolkit, _widget: WidgetId, _change: GeometryChange) {
    }
}
