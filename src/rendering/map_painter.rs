// src/rendering/map_painter.rs
//
// Cairo drawing for the map canvases. Polygon paths use the even-odd fill
// rule so hole rings punch out of their exterior without any ring
// classification. Shapes fully outside the canvas are culled by bbox.

use crate::config::MapStyle;
use crate::model::fuels;
use crate::model::{CountryShape, Plant, WorldMap};
use crate::rendering::colors::Rgb;
use crate::rendering::projection::Viewport;
use gtk4::cairo;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy)]
pub struct PolygonStyle {
    pub fill: Option<Rgb>,
    pub fill_opacity: f64,
    pub stroke: Rgb,
    pub stroke_width: f64,
    /// (on, off) dash lengths; None draws solid.
    pub dash: Option<(f64, f64)>,
}

pub fn draw_ocean(cr: &cairo::Context, style: &MapStyle) {
    let (r, g, b) = style.ocean_color;
    cr.set_source_rgb(r, g, b);
    let _ = cr.paint();
}

fn shape_visible(viewport: &Viewport, w: f64, h: f64, shape: &CountryShape) -> bool {
    let (left, top) = viewport.project(shape.bbox.min_lon, shape.bbox.max_lat, w, h);
    let (right, bottom) = viewport.project(shape.bbox.max_lon, shape.bbox.min_lat, w, h);
    right >= 0.0 && bottom >= 0.0 && left <= w && top <= h
}

fn trace_rings(cr: &cairo::Context, viewport: &Viewport, w: f64, h: f64, shape: &CountryShape) {
    for ring in &shape.rings {
        let mut points = ring.iter();
        let Some(&(lon, lat)) = points.next() else {
            continue;
        };
        let (x, y) = viewport.project(lon, lat, w, h);
        cr.move_to(x, y);
        for &(lon, lat) in points {
            let (x, y) = viewport.project(lon, lat, w, h);
            cr.line_to(x, y);
        }
        cr.close_path();
    }
}

pub fn draw_country(
    cr: &cairo::Context,
    viewport: &Viewport,
    w: f64,
    h: f64,
    shape: &CountryShape,
    style: &PolygonStyle,
) {
    if !shape_visible(viewport, w, h, shape) {
        return;
    }

    cr.new_path();
    trace_rings(cr, viewport, w, h, shape);
    cr.set_fill_rule(cairo::FillRule::EvenOdd);

    if let Some(fill) = style.fill {
        let (r, g, b) = fill.to_cairo();
        cr.set_source_rgba(r, g, b, style.fill_opacity);
        let _ = cr.fill_preserve();
    }

    let (r, g, b) = style.stroke.to_cairo();
    cr.set_source_rgb(r, g, b);
    cr.set_line_width(style.stroke_width);
    match style.dash {
        Some((on, off)) => cr.set_dash(&[on, off], 0.0),
        None => cr.set_dash(&[], 0.0),
    }
    let _ = cr.stroke();
    cr.set_dash(&[], 0.0);
}

/// Paint every country with a per-shape style. The selected country, if any,
/// should be painted again on top by the caller so its stroke is not covered
/// by neighbors drawn later.
pub fn draw_world<F>(
    cr: &cairo::Context,
    viewport: &Viewport,
    w: f64,
    h: f64,
    world: &WorldMap,
    mut style_for: F,
) where
    F: FnMut(&CountryShape) -> PolygonStyle,
{
    for shape in &world.countries {
        draw_country(cr, viewport, w, h, shape, &style_for(shape));
    }
}

/// Marker radius for a plant: square root of capacity, scaled by zoom level,
/// floored at 3 px so small plants stay clickable.
pub fn marker_radius(capacity_mw: f64, zoom: f64) -> f64 {
    let base = (capacity_mw.max(0.0) / 10.0).sqrt();
    (base * (zoom / 3.0) * 0.5).max(3.0)
}

pub fn draw_plants(cr: &cairo::Context, viewport: &Viewport, w: f64, h: f64, plants: &[Plant]) {
    for plant in plants {
        let (Some(lat), Some(lon)) = (plant.lat, plant.lon) else {
            continue;
        };
        let (x, y) = viewport.project(lon, lat, w, h);
        let radius = marker_radius(plant.cap.unwrap_or(0.0), viewport.zoom);
        if x + radius < 0.0 || y + radius < 0.0 || x - radius > w || y - radius > h {
            continue;
        }

        let color = fuels::fuel_color(plant.fuel.as_deref().unwrap_or("Unknown"));
        let (r, g, b) = color.to_cairo();
        cr.new_path();
        cr.arc(x, y, radius, 0.0, 2.0 * PI);
        cr.set_source_rgba(r, g, b, 0.8);
        let _ = cr.fill_preserve();
        cr.set_source_rgb(0.0, 0.0, 0.0);
        cr.set_line_width(0.5);
        let _ = cr.stroke();
    }
}

/// Topmost plant marker under a canvas point, for hover lookups. Later
/// markers paint over earlier ones, so search back to front.
pub fn plant_at<'a>(
    viewport: &Viewport,
    w: f64,
    h: f64,
    plants: &'a [Plant],
    x: f64,
    y: f64,
) -> Option<&'a Plant> {
    plants.iter().rev().find(|plant| {
        let (Some(lat), Some(lon)) = (plant.lat, plant.lon) else {
            return false;
        };
        let (px, py) = viewport.project(lon, lat, w, h);
        let radius = marker_radius(plant.cap.unwrap_or(0.0), viewport.zoom);
        (x - px).powi(2) + (y - py).powi(2) <= radius * radius
    })
}
