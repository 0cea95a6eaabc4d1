// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Widget: a retained widget tree with pluggable widget classes and geometry managers.
//!
//! A [`Toolkit`] owns every widget, keyed by generational [`WidgetId`] handles. Widgets are
//! instances of a [`WidgetClass`] looked up by name, and are put on screen by a
//! [`GeometryManager`], also looked up by name. The built-in manager is the [`Placer`].
//!
//! - Classes and managers live in name-keyed registries; registering a name again shadows
//!   the earlier entry.
//! - Every widget has a parent except the root, and children are kept in draw order.
//! - A widget is displayed exactly while some manager holds geometry parameters for it.
//!
//! ## Geometry protocol
//!
//! Managers compute a rectangle and commit it with [`Toolkit::finalize_geometry`]. If the
//! rectangle changed, the old and new areas are invalidated, the class hears about it
//! through [`WidgetClass::geometry_notify`], and the managers of all managed children run
//! again so that relative layouts follow their container. An unchanged rectangle is a
//! no-op, which is what stops that cascade.
//!
//! [`Toolkit::unmap`] takes a widget off screen without destroying it;
//! [`Toolkit::destroy`] removes a whole subtree, children first.
//!
//! ## Drawing and picking
//!
//! [`Toolkit::draw`] hands the drawing and picking surfaces to the root class, and
//! containers forward them with [`Toolkit::draw_children`], clipped to their content
//! rectangle. Each widget has a [`PickId`] whose RGBA encoding is what it paints on the
//! picking surface; [`Toolkit::widget_by_pick_id`] maps a colour back to the widget, and
//! [`Toolkit::pick`] answers the same question from the geometry alone.
//!
//! Invalidated regions accumulate in a [`Damage`] drained with [`Toolkit::take_damage`].
//!
//! ```rust
//! use trellis_widget::{Anchor, PlacerParams, Rect, Toolkit, ToolkitConfig};
//! # use core::any::Any;
//! # use trellis_widget::{Widget, WidgetClass, WidgetId};
//! # struct Frame;
//! # impl WidgetClass for Frame {
//! #     fn name(&self) -> &str { "frame" }
//! #     fn allocate(&self) -> Box<dyn Any> { Box::new(()) }
//! #     fn set_defaults(&self, _widget: &mut Widget) {}
//! #     fn draw(&self, _: &Toolkit, _: WidgetId, _: &mut dyn Any, _: &mut dyn Any, _: Option<Rect>) {}
//! # }
//!
//! let mut toolkit = Toolkit::new(std::rc::Rc::new(Frame), ToolkitConfig::default());
//! let button = toolkit.create("frame", toolkit.root(), None, None)?;
//! toolkit.place(button, PlacerParams::new().anchor(Anchor::SouthEast).rel_x(1.0).rel_y(1.0).width(80).height(30))?;
//!
//! assert_eq!(toolkit.widget(button).unwrap().screen_location(), Rect::new(720, 570, 80, 30));
//! assert!(!toolkit.take_damage().is_empty());
//! # Ok::<(), trellis_widget::WidgetError>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod class;
mod damage;
mod error;
mod geometry;
mod placer;
mod registry;
mod toolkit;
mod tree;
mod types;

#[cfg(test)]
mod testing;

pub use class::WidgetClass;
pub use damage::Damage;
pub use error::WidgetError;
pub use geometry::{GeomParams, GeometryManager};
pub use placer::{Anchor, Placer, PlacerParams};
pub use toolkit::{Toolkit, ToolkitConfig};
pub use tree::{Destructor, Widget, WidgetTree};
pub use types::{GeometryChange, PickId, WidgetId};

pub use trellis_rect::{Point, Rect, Size};
