// src/ui/tabs/distribution_tab.rs
//
// One marker per plant, sized by sqrt(capacity) and rescaled with zoom.
// Country polygons stay unfilled; they only exist to catch clicks and to
// carry the turquoise highlight of the selected country.

use crate::panels::CountryInfoPanel;
use crate::rendering::colors::Rgb;
use crate::rendering::map_painter::{self, PolygonStyle};
use crate::state::{AppState, Tab};
use crate::ui::{self, MapHandlers};
use crate::utils::format::format_mw;

use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{DrawingArea, Orientation, PolicyType, ScrolledWindow};
use std::cell::RefCell;
use std::rc::Rc;

pub struct DistributionTab {
    pub root: GtkBox,
    pub map: DrawingArea,
    info: CountryInfoPanel,
}

impl DistributionTab {
    pub fn build(state: Rc<RefCell<AppState>>) -> Self {
        let root = GtkBox::new(Orientation::Horizontal, 10);
        root.set_margin_top(6);
        root.set_margin_bottom(6);
        root.set_margin_start(6);
        root.set_margin_end(6);

        let map = ui::map_canvas();
        let s = state.clone();
        map.set_draw_func(move |_, cr, w, h| {
            let st = s.borrow();
            map_painter::draw_ocean(cr, &st.config.style);
            let (Some(dataset), Some(world)) = (st.dataset.as_ref(), st.world.as_ref()) else {
                return;
            };
            let viewport = st.view(Tab::Distribution).viewport;
            let (w, h) = (w as f64, h as f64);

            // Transparent overlay, outlines only
            map_painter::draw_world(cr, &viewport, w, h, world, |_| PolygonStyle {
                fill: None,
                fill_opacity: 0.0,
                stroke: Rgb(85, 85, 85),
                stroke_width: 0.5,
                dash: None,
            });

            map_painter::draw_plants(cr, &viewport, w, h, &dataset.plants_latest);

            if let Some(selected) = st.view(Tab::Distribution).selected.as_ref() {
                if let Some(shape) = world.find(selected) {
                    map_painter::draw_country(
                        cr,
                        &viewport,
                        w,
                        h,
                        shape,
                        &PolygonStyle {
                            fill: None,
                            fill_opacity: 0.0,
                            stroke: Rgb::hex(0x40e0d0),
                            stroke_width: 5.0,
                            dash: None,
                        },
                    );
                }
            }
        });

        let info = CountryInfoPanel::build(state.clone(), Tab::Distribution, true);
        let side_scroll = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .child(&info.root)
            .build();
        side_scroll.set_width_request(380);

        let on_select = {
            let state = state.clone();
            let info = info.clone();
            Box::new(move |_name: &str| {
                let st = state.borrow();
                info.refresh(&st, Tab::Distribution);
            })
        };
        // Plants first (they paint on top of the overlay), country second
        let hover = Box::new(
            |st: &AppState, x: f64, y: f64, w: f64, h: f64| -> Option<String> {
                let dataset = st.dataset.as_ref()?;
                let viewport = st.view(Tab::Distribution).viewport;
                if let Some(plant) =
                    map_painter::plant_at(&viewport, w, h, &dataset.plants_latest, x, y)
                {
                    return Some(format!(
                        "{}\nFuel: {}\nCapacity: {}",
                        plant.country.as_deref().unwrap_or("N/A"),
                        plant.fuel.as_deref().unwrap_or("N/A"),
                        plant
                            .cap
                            .map(format_mw)
                            .unwrap_or_else(|| "N/A".to_string())
                    ));
                }
                let world = st.world.as_ref()?;
                let shape = world.hit_test(viewport.unproject(x, y, w, h))?;
                Some(format!("{}\nClick for details", shape.name))
            },
        );
        ui::setup_map(
            state.clone(),
            Tab::Distribution,
            &map,
            MapHandlers { on_select, hover },
        );

        root.append(&map);
        root.append(&side_scroll);

        Self { root, map, info }
    }

    pub fn activate(&self, state: &Rc<RefCell<AppState>>) {
        {
            let mut st = state.borrow_mut();
            st.active_tab = Tab::Distribution;
            if st.ready() && !st.distribution.initialized {
                st.distribution.initialized = true;
                let plants = st
                    .dataset
                    .as_ref()
                    .map(|d| d.plants_latest.len())
                    .unwrap_or(0);
                log::debug!("Distribution view initialized with {} plants", plants);
            }
        }
        let st = state.borrow();
        self.info.refresh(&st, Tab::Distribution);
        self.map.queue_draw();
    }
}
