// src/panels/country_info.rs
//
// The per-country drill-down panel used by the Summary and Distribution
// tabs: headline figures plus three pie charts (fuel mix, green share,
// renewable share). Hidden until a country is clicked; cleared when the tab
// resets its selection.

use crate::state::{AppState, Tab};
use crate::ui::charts::{self, PieSpec};
use crate::utils::format::format_mw;

use gtk4::glib;
use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{DrawingArea, Frame, Label, Orientation};
use std::cell::RefCell;
use std::rc::Rc;

use plotters::drawing::IntoDrawingArea;
use plotters_cairo::CairoBackend;

#[derive(Clone)]
pub struct CountryInfoPanel {
  pub root: Frame,
  title: Label,
  stats: Label,
  fuel_chart: DrawingArea,
  green_chart: DrawingArea,
  renewable_chart: DrawingArea,
}

fn chart_area(height: i32) -> DrawingArea {
  let area = DrawingArea::new();
  area.set_hexpand(true);
  area.set_content_height(height);
  area
}

impl CountryInfoPanel {
  /// `donut` picks the ring style the distribution panel uses; the summary
  /// panel draws solid pies.
  pub fn build(state: Rc<RefCell<AppState>>, tab: Tab, donut: bool) -> Self {
    let root = Frame::new(Some("Country Details"));
    let vbox = GtkBox::new(Orientation::Vertical, 8);
    vbox.set_margin_top(8);
    vbox.set_margin_bottom(8);
    vbox.set_margin_start(8);
    vbox.set_margin_end(8);

    let title = Label::new(None);
    title.set_halign(gtk4::Align::Start);
    let stats = Label::new(None);
    stats.set_halign(gtk4::Align::Start);
    stats.set_wrap(true);

    let fuel_chart = chart_area(230);
    let green_chart = chart_area(200);
    let renewable_chart = chart_area(200);

    vbox.append(&title);
    vbox.append(&stats);
    vbox.append(&fuel_chart);
    vbox.append(&green_chart);
    vbox.append(&renewable_chart);
    root.set_child(Some(&vbox));
    root.set_visible(false);

    // --- Chart draw funcs ---
    // Each chart reads the tab's current selection on every draw, so a
    // queue_draw after selection change is all the refresh they need.

    let s = state.clone();
    fuel_chart.set_draw_func(move |_, cr, w, h| {
      let backend = CairoBackend::new(cr, (w as u32, h as u32)).unwrap();
      let plot = backend.into_drawing_area();
      let st = s.borrow();
      let (Some(dataset), Some(country)) = (st.dataset.as_ref(), st.view(tab).selected.as_ref())
      else {
        let _ = charts::draw_message(&plot, "Select a country");
        return;
      };
      match dataset.country_latest(country) {
        Some(data) if !data.fuels.is_empty() => {
          let slices = charts::fuel_mix_slices(&data.fuels);
          let title = format!(
            "Fuel Mix by Capacity ({})",
            dataset.latest_year().unwrap_or("-")
          );
          let _ = charts::draw_pie(
            &plot,
            &PieSpec {
              title: &title,
              slices: &slices,
              donut,
            },
          );
        }
        _ => {
          let _ = charts::draw_message(&plot, "No fuel data available");
        }
      }
    });

    let s = state.clone();
    green_chart.set_draw_func(move |_, cr, w, h| {
      let backend = CairoBackend::new(cr, (w as u32, h as u32)).unwrap();
      let plot = backend.into_drawing_area();
      let st = s.borrow();
      let (Some(dataset), Some(country)) = (st.dataset.as_ref(), st.view(tab).selected.as_ref())
      else {
        let _ = charts::draw_message(&plot, "Select a country");
        return;
      };
      match dataset.country_latest(country) {
        Some(data) if data.total_capacity > 0.0 => {
          let slices = charts::share_slices(
            "Green Energy",
            data.green_capacity,
            "Non-Green Energy",
            data.total_capacity,
            charts::GREEN_COLOR,
            charts::NON_GREEN_COLOR,
          );
          let title = format!("Green Energy ({}%)", data.green_perc);
          let _ = charts::draw_pie(
            &plot,
            &PieSpec {
              title: &title,
              slices: &slices,
              donut,
            },
          );
        }
        _ => {
          let _ = charts::draw_message(&plot, "No capacity data available");
        }
      }
    });

    let s = state.clone();
    renewable_chart.set_draw_func(move |_, cr, w, h| {
      let backend = CairoBackend::new(cr, (w as u32, h as u32)).unwrap();
      let plot = backend.into_drawing_area();
      let st = s.borrow();
      let (Some(dataset), Some(country)) = (st.dataset.as_ref(), st.view(tab).selected.as_ref())
      else {
        let _ = charts::draw_message(&plot, "Select a country");
        return;
      };
      match dataset.country_latest(country) {
        Some(data) if data.total_capacity > 0.0 => {
          let slices = charts::share_slices(
            "Renewable Energy",
            data.renewable_capacity,
            "Non-Renewable Energy",
            data.total_capacity,
            charts::RENEWABLE_COLOR,
            charts::NON_RENEWABLE_COLOR,
          );
          let title = format!("Renewable Energy ({}%)", data.renewable_perc);
          let _ = charts::draw_pie(
            &plot,
            &PieSpec {
              title: &title,
              slices: &slices,
              donut,
            },
          );
        }
        _ => {
          let _ = charts::draw_message(&plot, "No capacity data available");
        }
      }
    });

    Self {
      root,
      title,
      stats,
      fuel_chart,
      green_chart,
      renewable_chart,
    }
  }

  /// Fill the labels for the tab's current selection and reveal the panel.
  pub fn refresh(&self, state: &AppState, tab: Tab) {
    let Some(dataset) = state.dataset.as_ref() else {
      return;
    };
    let Some(country) = state.view(tab).selected.as_ref() else {
      self.clear();
      return;
    };

    self
      .title
      .set_markup(&format!("<b>{}</b>", glib::markup_escape_text(country)));

    match dataset.country_latest(country) {
      Some(data) => {
        self.stats.set_markup(&format!(
          "<b>Total Capacity:</b> {}\n<b>Green Energy:</b> {}% ({})\n<b>Renewable Energy:</b> {}% ({})",
          format_mw(data.total_capacity),
          data.green_perc,
          format_mw(data.green_capacity),
          data.renewable_perc,
          format_mw(data.renewable_capacity)
        ));
      }
      None => {
        self.stats.set_text(&format!(
          "No data available for {} in {}.",
          country,
          dataset.latest_year().unwrap_or("-")
        ));
      }
    }

    self.root.set_visible(true);
    self.fuel_chart.queue_draw();
    self.green_chart.queue_draw();
    self.renewable_chart.queue_draw();
  }

  pub fn clear(&self) {
    self.root.set_visible(false);
  }
}
