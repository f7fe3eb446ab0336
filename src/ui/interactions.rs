// src/ui/interactions.rs
//
// Wires pan/zoom/click/hover gestures onto a map canvas. Every handler goes
// through the shared AppState; the tab argument decides which ViewState a
// canvas reads and writes, so the three maps never interfere.

use crate::state::{AppState, Tab};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{
    DrawingArea, EventControllerMotion, EventControllerScroll, EventControllerScrollFlags,
    GestureClick, GestureDrag,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Pixels of drag movement beyond which a release is no longer a click.
const CLICK_SLOP: f64 = 4.0;

/// Wheel steps are half a zoom level per notch.
const ZOOM_STEP: f64 = 0.5;

pub struct MapHandlers {
    /// Runs after a click lands on a country and the tab's selection has been
    /// replaced. Receives the clicked country's name.
    pub on_select: Box<dyn Fn(&str)>,
    /// Builds the hover tooltip for a canvas position, or None to clear it.
    pub hover: Box<dyn Fn(&AppState, f64, f64, f64, f64) -> Option<String>>,
}

pub fn setup_map(state: Rc<RefCell<AppState>>, tab: Tab, map: &DrawingArea, handlers: MapHandlers) {
    let handlers = Rc::new(handlers);
    let pointer = Rc::new(Cell::new((0.0_f64, 0.0_f64)));
    let drag_dist = Rc::new(Cell::new(0.0_f64));

    // 1. CLICK -> country selection
    let click = GestureClick::new();
    {
        let state = state.clone();
        let map = map.clone();
        let handlers = handlers.clone();
        let drag_dist = drag_dist.clone();
        click.connect_released(move |_, _, x, y| {
            if drag_dist.get() > CLICK_SLOP {
                // A pan that ended on top of a country is not a selection
                return;
            }
            let (w, h) = (map.width() as f64, map.height() as f64);
            if w <= 0.0 || h <= 0.0 {
                return;
            }

            let hit = {
                let st = state.borrow();
                let Some(world) = st.world.as_ref() else {
                    return;
                };
                let point = st.view(tab).viewport.unproject(x, y, w, h);
                world.hit_test(point).map(|c| c.name.clone())
            };
            let Some(name) = hit else {
                return;
            };

            log::debug!("{}: selected {}", tab.title(), name);
            state.borrow_mut().view_mut(tab).select(Some(name.clone()));
            map.queue_draw();
            (handlers.on_select)(&name);
        });
    }
    map.add_controller(click);

    // 2. DRAG -> pan
    let drag = GestureDrag::new();
    {
        let start = Rc::new(Cell::new((0.0_f64, 0.0_f64)));

        let s = state.clone();
        let start_begin = start.clone();
        let dist_begin = drag_dist.clone();
        drag.connect_drag_begin(move |_, _, _| {
            let st = s.borrow();
            let vp = st.view(tab).viewport;
            start_begin.set((vp.center_lon, vp.center_lat));
            dist_begin.set(0.0);
        });

        let s = state.clone();
        let map = map.clone();
        let dist = drag_dist.clone();
        drag.connect_drag_update(move |_, dx, dy| {
            dist.set(dist.get().max((dx * dx + dy * dy).sqrt()));
            let (lon0, lat0) = start.get();
            {
                let mut st = s.borrow_mut();
                let viewport = &mut st.view_mut(tab).viewport;
                viewport.center_lon = lon0;
                viewport.center_lat = lat0;
                viewport.pan_pixels(dx, dy);
            }
            map.queue_draw();
        });
    }
    map.add_controller(drag);

    // 3. SCROLL -> zoom about the pointer
    let scroll = EventControllerScroll::new(EventControllerScrollFlags::VERTICAL);
    {
        let state = state.clone();
        let map = map.clone();
        let pointer = pointer.clone();
        scroll.connect_scroll(move |_, _dx, dy| {
            let (w, h) = (map.width() as f64, map.height() as f64);
            if w <= 0.0 || h <= 0.0 {
                return glib::Propagation::Proceed;
            }
            let (x, y) = pointer.get();
            {
                let mut st = state.borrow_mut();
                st.view_mut(tab)
                    .viewport
                    .zoom_about(-dy * ZOOM_STEP, x, y, w, h);
            }
            map.queue_draw();
            glib::Propagation::Stop
        });
    }
    map.add_controller(scroll);

    // 4. MOTION -> pointer tracking + tooltip
    let motion = EventControllerMotion::new();
    {
        let map = map.clone();
        let last_tip: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        motion.connect_motion(move |_, x, y| {
            pointer.set((x, y));
            let (w, h) = (map.width() as f64, map.height() as f64);
            if w <= 0.0 || h <= 0.0 {
                return;
            }
            let tip = {
                let st = state.borrow();
                (handlers.hover)(&st, x, y, w, h)
            };
            if *last_tip.borrow() != tip {
                map.set_tooltip_text(tip.as_deref());
                *last_tip.borrow_mut() = tip;
            }
        });
    }
    map.add_controller(motion);
}
