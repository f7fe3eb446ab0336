// src/ui/tabs/growth_tab.rs
//
// Diverging growth map (white at zero, red for added capacity, blue for
// retired) for a selectable fuel, the global capacity-by-year chart, and a
// per-country trend drill-down.

use crate::model::TOTAL_FUEL_KEY;
use crate::rendering::colors::{self, Rgb};
use crate::rendering::map_painter::{self, PolygonStyle};
use crate::state::{AppState, Tab};
use crate::ui::charts;
use crate::ui::{self, MapHandlers};
use crate::utils::format::format_delta_mw;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{DrawingArea, DropDown, Frame, Label, Orientation, PolicyType, ScrolledWindow, StringList};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use plotters::drawing::IntoDrawingArea;
use plotters_cairo::CairoBackend;

pub struct GrowthTab {
    pub root: GtkBox,
    pub map: DrawingArea,
    fuel_select: DropDown,
    global_chart: DrawingArea,
    country_frame: Frame,
    country_title: Label,
    trend_chart: DrawingArea,
    fuels_populated: Cell<bool>,
}

/// DropDown index -> growth fuel key. Index 0 is the synthetic Total entry.
fn fuel_key_for_index(state: &AppState, index: u32) -> String {
    if index == 0 || index == gtk4::INVALID_LIST_POSITION {
        return TOTAL_FUEL_KEY.to_string();
    }
    state
        .dataset
        .as_ref()
        .and_then(|d| d.fuel_types.get(index as usize - 1))
        .cloned()
        .unwrap_or_else(|| TOTAL_FUEL_KEY.to_string())
}

fn fuel_display(fuel_key: &str) -> &str {
    if fuel_key == TOTAL_FUEL_KEY {
        "Total"
    } else {
        fuel_key
    }
}

impl GrowthTab {
    pub fn build(state: Rc<RefCell<AppState>>) -> Self {
        let root = GtkBox::new(Orientation::Vertical, 8);
        root.set_margin_top(6);
        root.set_margin_bottom(6);
        root.set_margin_start(6);
        root.set_margin_end(6);

        // --- Fuel selector row ---
        let controls = GtkBox::new(Orientation::Horizontal, 8);
        controls.append(&Label::new(Some("Growth by fuel:")));
        let fuel_select = DropDown::from_strings(&["Total"]);
        controls.append(&fuel_select);
        root.append(&controls);

        // --- Map + drill-down row ---
        let middle = GtkBox::new(Orientation::Horizontal, 10);

        let map = ui::map_canvas();
        let s = state.clone();
        map.set_draw_func(move |_, cr, w, h| {
            let st = s.borrow();
            map_painter::draw_ocean(cr, &st.config.style);
            let (Some(dataset), Some(world)) = (st.dataset.as_ref(), st.world.as_ref()) else {
                return;
            };
            let viewport = st.view(Tab::Growth).viewport;
            let scale = st.config.growth_scale;
            let (w, h) = (w as f64, h as f64);

            map_painter::draw_world(cr, &viewport, w, h, world, |shape| {
                let delta = dataset.growth_delta(&shape.name, &st.growth_fuel);
                PolygonStyle {
                    fill: Some(colors::growth_fill(delta, scale.max_positive, scale.max_negative)),
                    fill_opacity: 0.8,
                    stroke: Rgb(255, 255, 255),
                    stroke_width: 1.0,
                    dash: None,
                }
            });

            if let Some(selected) = st.view(Tab::Growth).selected.as_ref() {
                if let Some(shape) = world.find(selected) {
                    let delta = dataset.growth_delta(selected, &st.growth_fuel);
                    map_painter::draw_country(
                        cr,
                        &viewport,
                        w,
                        h,
                        shape,
                        &PolygonStyle {
                            fill: Some(colors::growth_fill(
                                delta,
                                scale.max_positive,
                                scale.max_negative,
                            )),
                            fill_opacity: 0.9,
                            stroke: Rgb(40, 40, 40),
                            stroke_width: 2.5,
                            dash: None,
                        },
                    );
                }
            }
        });

        // Country drill-down: name + total-capacity trend
        let country_frame = Frame::new(Some("Country Growth"));
        let country_box = GtkBox::new(Orientation::Vertical, 6);
        country_box.set_margin_top(8);
        country_box.set_margin_bottom(8);
        country_box.set_margin_start(8);
        country_box.set_margin_end(8);

        let country_title = Label::new(None);
        country_title.set_halign(gtk4::Align::Start);
        country_title.set_wrap(true);

        let trend_chart = DrawingArea::new();
        trend_chart.set_hexpand(true);
        trend_chart.set_content_height(260);
        let s = state.clone();
        trend_chart.set_draw_func(move |_, cr, w, h| {
            let backend = CairoBackend::new(cr, (w as u32, h as u32)).unwrap();
            let plot = backend.into_drawing_area();
            let st = s.borrow();
            let (Some(dataset), Some(country)) = (
                st.dataset.as_ref(),
                st.view(Tab::Growth).selected.as_ref(),
            ) else {
                let _ = charts::draw_message(&plot, "Select a country");
                return;
            };
            let _ = charts::draw_country_trend(&plot, dataset, country);
        });

        country_box.append(&country_title);
        country_box.append(&trend_chart);
        country_frame.set_child(Some(&country_box));
        country_frame.set_visible(false);

        let side_scroll = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .child(&country_frame)
            .build();
        side_scroll.set_width_request(380);

        middle.append(&map);
        middle.append(&side_scroll);
        root.append(&middle);

        // --- Global growth chart across the bottom ---
        let chart_frame = Frame::new(Some("Global Capacity Growth"));
        let global_chart = DrawingArea::new();
        global_chart.set_hexpand(true);
        global_chart.set_content_height(280);
        let s = state.clone();
        global_chart.set_draw_func(move |_, cr, w, h| {
            let backend = CairoBackend::new(cr, (w as u32, h as u32)).unwrap();
            let plot = backend.into_drawing_area();
            let st = s.borrow();
            match st.dataset.as_ref() {
                Some(dataset) => {
                    let _ = charts::draw_growth_chart(&plot, dataset);
                }
                None => {
                    let _ = charts::draw_message(&plot, "Loading...");
                }
            }
        });
        chart_frame.set_child(Some(&global_chart));
        root.append(&chart_frame);

        // --- Fuel selection drives the map recolor ---
        {
            let state = state.clone();
            let map = map.clone();
            fuel_select.connect_selected_notify(move |dd| {
                let index = dd.selected();
                {
                    let mut st = state.borrow_mut();
                    let key = fuel_key_for_index(&st, index);
                    if st.growth_fuel == key {
                        return;
                    }
                    log::debug!("Growth map recolored for {}", fuel_display(&key));
                    st.growth_fuel = key;
                }
                map.queue_draw();
            });
        }

        // --- Map interactions ---
        let on_select = {
            let state = state.clone();
            let country_frame = country_frame.clone();
            let country_title = country_title.clone();
            let trend_chart = trend_chart.clone();
            Box::new(move |name: &str| {
                let st = state.borrow();
                let delta = st
                    .dataset
                    .as_ref()
                    .map(|d| d.growth_delta(name, &st.growth_fuel))
                    .unwrap_or(0.0);
                country_title.set_markup(&format!(
                    "<b>Power Growth Trend for {}</b>\n{} Growth: {}",
                    glib::markup_escape_text(name),
                    fuel_display(&st.growth_fuel),
                    format_delta_mw(delta)
                ));
                country_frame.set_visible(true);
                trend_chart.queue_draw();
            })
        };
        let hover = Box::new(
            |st: &AppState, x: f64, y: f64, w: f64, h: f64| -> Option<String> {
                let dataset = st.dataset.as_ref()?;
                let world = st.world.as_ref()?;
                let point = st.view(Tab::Growth).viewport.unproject(x, y, w, h);
                let shape = world.hit_test(point)?;
                let delta = dataset.growth_delta(&shape.name, &st.growth_fuel);
                Some(format!(
                    "{}\n{} Growth: {}",
                    shape.name,
                    fuel_display(&st.growth_fuel),
                    format_delta_mw(delta)
                ))
            },
        );
        ui::setup_map(state.clone(), Tab::Growth, &map, MapHandlers { on_select, hover });

        Self {
            root,
            map,
            fuel_select,
            global_chart,
            country_frame,
            country_title,
            trend_chart,
            fuels_populated: Cell::new(false),
        }
    }

    pub fn activate(&self, state: &Rc<RefCell<AppState>>) {
        let needs_fuels = {
            let mut st = state.borrow_mut();
            st.active_tab = Tab::Growth;
            let ready = st.ready();
            if ready && !st.growth.initialized {
                st.growth.initialized = true;
                log::debug!("Growth view initialized");
            }
            ready && !self.fuels_populated.get()
        };

        // The fuel list is copied out before touching the DropDown: set_model
        // fires selected-notify, whose handler borrows the state itself.
        let fuel_types: Option<Vec<String>> = if needs_fuels {
            state.borrow().dataset.as_ref().map(|d| d.fuel_types.clone())
        } else {
            None
        };
        if let Some(fuel_types) = fuel_types {
            let mut entries: Vec<&str> = vec!["Total"];
            entries.extend(fuel_types.iter().map(String::as_str));
            let model = StringList::new(&entries);
            self.fuel_select.set_model(Some(&model));
            self.fuel_select.set_selected(0);
            self.fuels_populated.set(true);
        }

        let st = state.borrow();
        if st.view(Tab::Growth).selected.is_none() {
            self.country_frame.set_visible(false);
        }
        self.map.queue_draw();
        self.global_chart.queue_draw();
        self.trend_chart.queue_draw();
    }

    /// A reloaded dataset invalidates the fuel list; the next activation
    /// rebuilds it.
    pub fn reset_fuels(&self) {
        self.fuels_populated.set(false);
    }
}
