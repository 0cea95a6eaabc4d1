// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placer layout, damage, and picking on a small widget tree.
//!
//! This example shows how to:
//! - register widget classes and build a tree under the root,
//! - lay widgets out with the placer, absolutely and relative to their parent,
//! - collect the damage produced by a re-layout,
//! - draw into a recording canvas and pick through the picking surface.
//!
//! Run:
//! - `cargo run -p trellis_demos --example placer_layout`

use std::any::Any;
use std::rc::Rc;

use trellis_rect::{Point, Rect, Size};
use trellis_widget::{
    Anchor, PickId, PlacerParams, Toolkit, ToolkitConfig, Widget, WidgetClass, WidgetId,
};

/// Records every paint operation instead of rasterizing.
#[derive(Debug, Default)]
struct Canvas {
    ops: Vec<(kurbo::Rect, String)>,
}

/// Flat-colour pick areas, front-most last.
#[derive(Debug, Default)]
struct PickBuffer {
    fills: Vec<(kurbo::Rect, [u8; 4])>,
}

impl PickBuffer {
    fn read(&self, pt: kurbo::Point) -> Option<[u8; 4]> {
        self.fills
            .iter()
            .rev()
            .find(|(r, _)| r.contains(pt))
            .map(|&(_, rgba)| rgba)
    }
}

/// A plain rectangle that contains other widgets.
struct Frame;

/// A labelled box.
struct Button;

#[derive(Default)]
struct ButtonState {
    label: String,
}

/// Paint `widget`'s visible area on both surfaces.
fn fill(
    toolkit: &Toolkit,
    widget: WidgetId,
    surface: &mut dyn Any,
    pick_surface: &mut dyn Any,
    clipper: Option<Rect>,
    what: String,
) {
    let Some(w) = toolkit.widget(widget) else {
        return;
    };
    let area = match clipper {
        Some(clip) => w.screen_location().intersection(clip),
        None => w.screen_location(),
    };
    if area.is_empty() {
        return;
    }
    let area = kurbo::Rect::from(area);
    if let Some(canvas) = surface.downcast_mut::<Canvas>() {
        canvas.ops.push((area, what));
    }
    if let Some(picks) = pick_surface.downcast_mut::<PickBuffer>() {
        picks.fills.push((area, w.pick_id().to_rgba()));
    }
}

impl WidgetClass for Frame {
    fn name(&self) -> &str {
        "frame"
    }

    fn allocate(&self) -> Box<dyn Any> {
        Box::new(())
    }

    fn set_defaults(&self, widget: &mut Widget) {
        widget.set_requested_size(Size::new(100, 100));
    }

    fn draw(
        &self,
        toolkit: &Toolkit,
        widget: WidgetId,
        surface: &mut dyn Any,
        pick_surface: &mut dyn Any,
        clipper: Option<Rect>,
    ) {
        fill(toolkit, widget, surface, pick_surface, clipper, format!("frame {widget}"));
        toolkit.draw_children(widget, surface, pick_surface, clipper);
    }
}

impl WidgetClass for Button {
    fn name(&self) -> &str {
        "button"
    }

    fn allocate(&self) -> Box<dyn Any> {
        Box::new(ButtonState::default())
    }

    fn set_defaults(&self, widget: &mut Widget) {
        widget.set_requested_size(Size::new(80, 24));
        if let Some(state) = widget.instance_mut::<ButtonState>() {
            state.label = "button".into();
        }
    }

    fn draw(
        &self,
        toolkit: &Toolkit,
        widget: WidgetId,
        surface: &mut dyn Any,
        pick_surface: &mut dyn Any,
        clipper: Option<Rect>,
    ) {
        let label = toolkit
            .widget(widget)
            .and_then(|w| w.instance::<ButtonState>())
            .map_or_else(String::new, |s| s.label.clone());
        fill(toolkit, widget, surface, pick_surface, clipper, format!("button {label:?}"));
    }
}

fn label(toolkit: &mut Toolkit, widget: WidgetId, text: &str) {
    if let Some(state) = toolkit
        .widget_mut(widget)
        .and_then(|w| w.instance_mut::<ButtonState>())
    {
        state.label = text.into();
    }
}

fn main() -> Result<(), trellis_widget::WidgetError> {
    let mut toolkit = Toolkit::new(
        Rc::new(Frame),
        ToolkitConfig {
            root_size: Size::new(400, 300),
            ..ToolkitConfig::default()
        },
    );
    toolkit.register_class(Rc::new(Button));
    let root = toolkit.root();

    // A panel filling the right half, with two buttons stacked in its middle.
    let panel = toolkit.create("frame", root, None, None)?;
    toolkit.place(
        panel,
        PlacerParams::new()
            .rel_x(0.5)
            .rel_width(0.5)
            .rel_height(1.0),
    )?;

    let ok = toolkit.create(
        "button",
        panel,
        None,
        Some(Box::new(|_: &mut Toolkit, id: WidgetId| {
            println!("destroying button {id}");
        })),
    )?;
    label(&mut toolkit, ok, "OK");
    toolkit.place(
        ok,
        PlacerParams::new()
            .anchor(Anchor::South)
            .rel_x(0.5)
            .rel_y(0.5)
            .y(-4),
    )?;

    let cancel = toolkit.create("button", panel, None, None)?;
    label(&mut toolkit, cancel, "Cancel");
    toolkit.place(
        cancel,
        PlacerParams::new()
            .anchor(Anchor::North)
            .rel_x(0.5)
            .rel_y(0.5)
            .y(4),
    )?;

    for id in [panel, ok, cancel] {
        if let Some(w) = toolkit.widget(id) {
            println!("{id}: {:?}", w.screen_location());
        }
    }
    let initial = toolkit.take_damage();
    println!("initial damage covers {:?}", initial.union_rect());

    // Narrow the panel; the relatively placed buttons follow.
    toolkit.place(panel, PlacerParams::new().rel_x(0.6).rel_width(0.4))?;
    let damage = toolkit.take_damage();
    println!(
        "re-layout produced {} dirty rects covering {:?}",
        damage.dirty_rects.len(),
        damage.union_rect()
    );

    let mut canvas = Canvas::default();
    let mut picks = PickBuffer::default();
    toolkit.draw(&mut canvas, &mut picks, damage.union_rect());
    for (rect, what) in &canvas.ops {
        println!("paint {what} at {rect:?}");
    }

    let probe = Point::new(320, 160);
    let by_colour = picks
        .read(kurbo::Point::from(probe))
        .map(PickId::from_rgba)
        .and_then(|id| toolkit.widget_by_pick_id(id));
    let by_geometry = toolkit.pick(probe);
    println!("widget under {probe:?}: {by_colour:?} (pick surface), {by_geometry:?} (geometry)");
    assert_eq!(by_colour, by_geometry);

    toolkit.destroy(panel)?;
    println!("{} widgets left", toolkit.tree().len());
    Ok(())
}
