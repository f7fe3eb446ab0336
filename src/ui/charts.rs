// src/ui/charts.rs
//
// Shared chart drawing on top of plotters. Every function takes a generic
// backend so the same code renders to the screen (CairoBackend inside a
// DrawingArea draw func) and to an export surface.

use crate::model::fuels::fuel_color;
use crate::model::Dataset;
use crate::rendering::colors::Rgb;
use std::collections::BTreeMap;

use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::TextStyle;

pub const GREEN_COLOR: Rgb = Rgb::hex(0x28a745);
pub const NON_GREEN_COLOR: Rgb = Rgb::hex(0xdc3545);
pub const RENEWABLE_COLOR: Rgb = Rgb::hex(0x17a2b8);
pub const NON_RENEWABLE_COLOR: Rgb = Rgb::hex(0x6c757d);

const TREND_COLOR: RGBColor = RGBColor(70, 130, 180);

type ChartResult = Result<(), Box<dyn std::error::Error>>;

/// One pie slice: label, value, fill.
pub type Slice = (String, f64, Rgb);

pub fn fuel_mix_slices(fuels: &BTreeMap<String, f64>) -> Vec<Slice> {
    fuels
        .iter()
        .map(|(fuel, cap)| (fuel.clone(), *cap, fuel_color(fuel)))
        .collect()
}

/// Two-slice share breakdown (e.g. green vs non-green capacity).
pub fn share_slices(part_label: &str, part: f64, rest_label: &str, total: f64, part_color: Rgb, rest_color: Rgb) -> Vec<Slice> {
    vec![
        (part_label.to_string(), part, part_color),
        (rest_label.to_string(), (total - part).max(0.0), rest_color),
    ]
}

pub struct PieSpec<'a> {
    pub title: &'a str,
    pub slices: &'a [Slice],
    /// Punch a hole in the middle (the donut look used by the global mix and
    /// the distribution panel).
    pub donut: bool,
}

pub fn draw_message<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, message: &str) -> ChartResult
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (w, h) = root.dim_in_pixel();
    let style = TextStyle::from(("sans-serif", 15).into_font()).color(&BLACK);
    let x = (w as i32 / 2 - message.len() as i32 * 4).max(4);
    root.draw_text(message, &style, (x, h as i32 / 2))?;
    Ok(())
}

pub fn draw_pie<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &PieSpec) -> ChartResult
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (w, h) = root.dim_in_pixel();

    let kept: Vec<&Slice> = spec.slices.iter().filter(|(_, v, _)| *v > 0.0).collect();
    let total: f64 = kept.iter().map(|(_, v, _)| *v).sum();
    if total <= 0.0 {
        return draw_message(root, "No capacity data");
    }

    let labels: Vec<String> = kept
        .iter()
        .map(|(label, value, _)| format!("{} ({:.1}%)", label, value / total * 100.0))
        .collect();
    let sizes: Vec<f64> = kept.iter().map(|(_, v, _)| *v).collect();
    let colors: Vec<RGBColor> = kept.iter().map(|(_, _, c)| c.to_plotters()).collect();

    let center = (w as i32 / 2, h as i32 / 2 + 6);
    let radius = f64::from(w.min(h)) * 0.28;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 12).into_font());
    root.draw(&pie)?;

    if spec.donut {
        let hole = (radius * 0.45) as i32;
        root.draw(&Circle::new(center, hole, WHITE.filled()))?;
    }

    let title_style = TextStyle::from(("sans-serif", 14).into_font()).color(&BLACK);
    root.draw_text(spec.title, &title_style, (8, 6))?;
    Ok(())
}

/// Global capacity-by-year lines, one per fuel with any capacity, plus a
/// dashed global total.
pub fn draw_growth_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
) -> ChartResult
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let years = &dataset.years;
    if years.is_empty() {
        return draw_message(root, "No data loaded");
    }

    let mut series: Vec<(String, RGBColor, Vec<f64>)> = Vec::new();
    for fuel in &dataset.fuel_types {
        let values = dataset.fuel_series(fuel);
        if values.iter().any(|v| *v > 0.0) {
            series.push((fuel.clone(), fuel_color(fuel).to_plotters(), values));
        }
    }
    let totals = dataset.total_series();

    let top = series
        .iter()
        .flat_map(|(_, _, v)| v.iter())
        .chain(totals.iter())
        .fold(0.0f64, |acc, &v| acc.max(v));
    let max_y = if top > 0.0 { top * 1.1 } else { 1.0 };
    let x_max = years.len().saturating_sub(1).max(1) as i32;

    let mut chart = ChartBuilder::on(root)
        .margin(12)
        .x_label_area_size(32)
        .y_label_area_size(72)
        .build_cartesian_2d(0..x_max, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(years.len().min(12))
        .x_label_formatter(&|idx: &i32| years.get(*idx as usize).cloned().unwrap_or_default())
        .x_desc("Year")
        .y_desc("Capacity (MW)")
        .axis_desc_style(("sans-serif", 14))
        .draw()?;

    for (name, color, values) in &series {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as i32, *v)),
                color.stroke_width(2),
            ))?
            .label(name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));
    }

    chart
        .draw_series(DashedLineSeries::new(
            totals.iter().enumerate().map(|(i, v)| (i as i32, *v)),
            6,
            4,
            BLACK.stroke_width(2),
        ))?
        .label("Global Total")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// One country's total capacity over the years, for the growth drill-down.
pub fn draw_country_trend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    country: &str,
) -> ChartResult
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let years = &dataset.years;
    if years.is_empty() {
        return draw_message(root, "No data loaded");
    }

    let values = dataset.country_total_series(country);
    if values.iter().all(|v| *v <= 0.0) {
        return draw_message(root, "No capacity recorded");
    }

    let top = values.iter().fold(0.0f64, |acc, &v| acc.max(v));
    let max_y = if top > 0.0 { top * 1.1 } else { 1.0 };
    let x_max = years.len().saturating_sub(1).max(1) as i32;

    let mut chart = ChartBuilder::on(root)
        .margin(12)
        .x_label_area_size(32)
        .y_label_area_size(64)
        .build_cartesian_2d(0..x_max, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(years.len().min(12))
        .x_label_formatter(&|idx: &i32| years.get(*idx as usize).cloned().unwrap_or_default())
        .x_desc("Year")
        .y_desc("Capacity (MW)")
        .axis_desc_style(("sans-serif", 13))
        .draw()?;

    chart.draw_series(
        LineSeries::new(
            values.iter().enumerate().map(|(i, v)| (i as i32, *v)),
            TREND_COLOR.stroke_width(2),
        )
        .point_size(3),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_mix_slices_use_palette() {
        let mut fuels = BTreeMap::new();
        fuels.insert("Solar".to_string(), 10.0);
        fuels.insert("Mystery".to_string(), 5.0);
        let slices = fuel_mix_slices(&fuels);
        assert_eq!(slices.len(), 2);
        let solar = slices.iter().find(|(l, _, _)| l == "Solar").unwrap();
        assert_eq!(solar.2, fuel_color("Solar"));
        let mystery = slices.iter().find(|(l, _, _)| l == "Mystery").unwrap();
        assert_eq!(mystery.2, fuel_color("Unknown"));
    }

    #[test]
    fn test_share_slices_never_negative() {
        // Rounded upstream data can put the part above the total
        let slices = share_slices("Green", 110.0, "Non-Green", 100.0, GREEN_COLOR, NON_GREEN_COLOR);
        assert_eq!(slices[1].1, 0.0);
    }
}
