// src/ui/tabs/summary_tab.rs
//
// Default tab: countries colored by the capacity threshold ladder, a global
// stats panel with the fuel-mix donut, and the per-country drill-down with
// three pies. Re-entering the tab clears the drill-down, as it always has.

use crate::panels::CountryInfoPanel;
use crate::rendering::colors::{self, Rgb};
use crate::rendering::map_painter::{self, PolygonStyle};
use crate::state::{AppState, LoadPhase, Tab};
use crate::ui::charts::{self, PieSpec};
use crate::ui::{self, MapHandlers};
use crate::utils::format::format_mw;

use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{DrawingArea, Frame, Label, Orientation, PolicyType, ScrolledWindow};
use std::cell::RefCell;
use std::rc::Rc;

use plotters::drawing::IntoDrawingArea;
use plotters_cairo::CairoBackend;

pub struct SummaryTab {
    pub root: GtkBox,
    pub map: DrawingArea,
    global_stats: Label,
    global_chart: DrawingArea,
    info: CountryInfoPanel,
}

impl SummaryTab {
    pub fn build(state: Rc<RefCell<AppState>>) -> Self {
        let root = GtkBox::new(Orientation::Horizontal, 10);
        root.set_margin_top(6);
        root.set_margin_bottom(6);
        root.set_margin_start(6);
        root.set_margin_end(6);

        // --- Map canvas ---
        let map = ui::map_canvas();
        let s = state.clone();
        map.set_draw_func(move |_, cr, w, h| {
            let st = s.borrow();
            map_painter::draw_ocean(cr, &st.config.style);
            let (Some(dataset), Some(world)) = (st.dataset.as_ref(), st.world.as_ref()) else {
                return;
            };
            let viewport = st.view(Tab::Summary).viewport;
            let (w, h) = (w as f64, h as f64);

            map_painter::draw_world(cr, &viewport, w, h, world, |shape| PolygonStyle {
                fill: Some(colors::capacity_fill(dataset.country_capacity(&shape.name))),
                fill_opacity: st.config.style.fill_opacity,
                stroke: Rgb(255, 255, 255),
                stroke_width: 1.0,
                dash: None,
            });

            // Selected country repainted on top: thick dashed black outline
            if let Some(selected) = st.view(Tab::Summary).selected.as_ref() {
                if let Some(shape) = world.find(selected) {
                    map_painter::draw_country(
                        cr,
                        &viewport,
                        w,
                        h,
                        shape,
                        &PolygonStyle {
                            fill: Some(colors::capacity_fill(dataset.country_capacity(selected))),
                            fill_opacity: st.config.style.selected_fill_opacity,
                            stroke: Rgb(0, 0, 0),
                            stroke_width: 4.0,
                            dash: Some((5.0, 5.0)),
                        },
                    );
                }
            }
        });

        // --- Side panel: global stats + country details ---
        let side = GtkBox::new(Orientation::Vertical, 10);
        side.set_width_request(360);

        let stats_frame = Frame::new(Some("Global Stats"));
        let stats_box = GtkBox::new(Orientation::Vertical, 6);
        stats_box.set_margin_top(8);
        stats_box.set_margin_bottom(8);
        stats_box.set_margin_start(8);
        stats_box.set_margin_end(8);

        let global_stats = Label::new(Some("Loading data..."));
        global_stats.set_halign(gtk4::Align::Start);
        global_stats.set_wrap(true);

        let global_chart = DrawingArea::new();
        global_chart.set_hexpand(true);
        global_chart.set_content_height(280);
        let s = state.clone();
        global_chart.set_draw_func(move |_, cr, w, h| {
            let backend = CairoBackend::new(cr, (w as u32, h as u32)).unwrap();
            let plot = backend.into_drawing_area();
            let st = s.borrow();
            let Some(dataset) = st.dataset.as_ref() else {
                let _ = charts::draw_message(&plot, "Loading...");
                return;
            };
            let Some(year) = dataset.latest_year() else {
                let _ = charts::draw_message(&plot, "No years in dataset");
                return;
            };
            let mix = dataset.global_fuel_mix(year);
            let slices: Vec<charts::Slice> = mix
                .iter()
                .map(|(fuel, cap)| (fuel.clone(), *cap, crate::model::fuels::fuel_color(fuel)))
                .collect();
            let title = format!("Global Fuel Mix by Capacity ({})", year);
            let _ = charts::draw_pie(
                &plot,
                &PieSpec {
                    title: &title,
                    slices: &slices,
                    donut: true,
                },
            );
        });

        stats_box.append(&global_stats);
        stats_box.append(&global_chart);
        stats_frame.set_child(Some(&stats_box));

        let info = CountryInfoPanel::build(state.clone(), Tab::Summary, false);

        side.append(&stats_frame);
        side.append(&info.root);

        let side_scroll = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .child(&side)
            .build();
        side_scroll.set_width_request(380);

        // --- Interactions ---
        let on_select = {
            let state = state.clone();
            let info = info.clone();
            Box::new(move |_name: &str| {
                let st = state.borrow();
                info.refresh(&st, Tab::Summary);
            })
        };
        let hover = Box::new(
            |st: &AppState, x: f64, y: f64, w: f64, h: f64| -> Option<String> {
                let dataset = st.dataset.as_ref()?;
                let world = st.world.as_ref()?;
                let point = st.view(Tab::Summary).viewport.unproject(x, y, w, h);
                let shape = world.hit_test(point)?;
                Some(format!(
                    "{}\nTotal Capacity: {}\nClick for details",
                    shape.name,
                    format_mw(dataset.country_capacity(&shape.name))
                ))
            },
        );
        ui::setup_map(state.clone(), Tab::Summary, &map, MapHandlers { on_select, hover });

        root.append(&map);
        root.append(&side_scroll);

        Self {
            root,
            map,
            global_stats,
            global_chart,
            info,
        }
    }

    /// Tab controller entry point: refresh the global panel, drop any stale
    /// drill-down, redraw.
    pub fn activate(&self, state: &Rc<RefCell<AppState>>) {
        {
            let mut st = state.borrow_mut();
            st.active_tab = Tab::Summary;
            st.summary.select(None);
            if st.ready() && !st.summary.initialized {
                st.summary.initialized = true;
                log::debug!("Summary view initialized");
            }
        }
        let st = state.borrow();
        self.update_global_stats(&st);
        self.info.clear();
        self.map.queue_draw();
        self.global_chart.queue_draw();
    }

    fn update_global_stats(&self, st: &AppState) {
        match (&st.phase, st.dataset.as_ref()) {
            (LoadPhase::Failed(reason), _) => {
                self.global_stats
                    .set_text(&format!("Data load failed: {}", reason));
            }
            (_, None) => self.global_stats.set_text("Loading data..."),
            (_, Some(dataset)) => {
                let year = dataset.latest_year().unwrap_or("-");
                self.global_stats.set_markup(&format!(
                    "<b>Global Stats ({})</b>\nTotal Capacity: {}",
                    year,
                    format_mw(dataset.global_total(year))
                ));
            }
        }
    }
}
