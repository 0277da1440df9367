//! SVG figure drawing with plotters
//!
//! Panels are laid out side by side in a single row. Axis ranges are taken
//! from the points that are actually visible, so a clipped outlier does not
//! stretch the axes it was removed from.

use crate::config::FigureSize;
use crate::error::{AnalysisError, Result};
use crate::render::spec::{validate_panels, LineKind, PlotSpec, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;

/// Dash and gap lengths in axis-normalised units
const DASH_LENGTH: f64 = 0.02;
const GAP_LENGTH: f64 = 0.012;

/// Headroom added around the data on each axis
const AXIS_PADDING: f64 = 0.05;

fn font(size: u32) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, f64::from(size), FontStyle::Normal)
}

fn render_error(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Render(e.to_string())
}

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Render all panels into one SVG document
pub fn render_svg(panels: &[PlotSpec], size: &FigureSize) -> Result<String> {
    validate_panels(panels)?;

    let width = size.panel_width * panels.len() as u32;
    let height = size.panel_height;
    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let areas = root.split_evenly((1, panels.len()));
        for (area, panel) in areas.iter().zip(panels) {
            draw_panel(area, panel, size.font_size)?;
        }

        root.present().map_err(render_error)?;
    }

    Ok(svg)
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &PlotSpec,
    font_size: u32,
) -> Result<()> {
    let visible: Vec<Vec<(f64, f64)>> =
        panel.series.iter().map(|s| s.visible_points()).collect();
    let (x_range, y_range) = axis_ranges(visible.iter().flatten().copied());

    let mut builder = ChartBuilder::on(area);
    builder.margin(20).x_label_area_size(50).y_label_area_size(80);
    if let Some(title) = &panel.title {
        builder.caption(title, font(font_size + 4));
    }

    let mut chart = builder
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .label_style(font(font_size))
        .axis_desc_style(font(font_size))
        .draw()
        .map_err(render_error)?;

    let spans = (x_range.end - x_range.start, y_range.end - y_range.start);

    for (series, points) in panel.series.iter().zip(visible) {
        let color: RGBColor = series.style.color.into();
        let stroke = ShapeStyle::from(&color).stroke_width(2);

        let anno = match series.style.line {
            LineKind::Solid => chart
                .draw_series(LineSeries::new(points, stroke))
                .map_err(render_error)?,
            LineKind::Dashed => chart
                .draw_series(
                    dash_segments(&points, spans, DASH_LENGTH, GAP_LENGTH)
                        .into_iter()
                        .map(|segment| PathElement::new(segment, stroke)),
                )
                .map_err(render_error)?,
        };

        anno.label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], stroke));
    }

    if panel.show_legend && !panel.series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(font(font_size))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_error)?;
    }

    Ok(())
}

/// Padded axis ranges covering `points`; unit ranges when there is nothing to show
pub fn axis_ranges(points: impl Iterator<Item = (f64, f64)>) -> (Range<f64>, Range<f64>) {
    let mut x_bounds: Option<(f64, f64)> = None;
    let mut y_bounds: Option<(f64, f64)> = None;

    for (x, y) in points.filter(|(x, y)| x.is_finite() && y.is_finite()) {
        x_bounds = Some(x_bounds.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
        y_bounds = Some(y_bounds.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))));
    }

    (padded(x_bounds), padded(y_bounds))
}

fn padded(bounds: Option<(f64, f64)>) -> Range<f64> {
    match bounds {
        None => 0.0..1.0,
        Some((lo, hi)) if lo == hi => {
            let half = (lo.abs() * AXIS_PADDING).max(0.5);
            (lo - half)..(hi + half)
        }
        Some((lo, hi)) => {
            let pad = (hi - lo) * AXIS_PADDING;
            (lo - pad)..(hi + pad)
        }
    }
}

/// Split a polyline into dash pieces
///
/// Lengths are measured after normalising each axis by its span, so dashes
/// look uniform regardless of the data's units.
pub fn dash_segments(
    points: &[(f64, f64)],
    spans: (f64, f64),
    dash: f64,
    gap: f64,
) -> Vec<Vec<(f64, f64)>> {
    let sx = if spans.0 > 0.0 { spans.0 } else { 1.0 };
    let sy = if spans.1 > 0.0 { spans.1 } else { 1.0 };

    let mut dashes = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut drawing = true;
    let mut remaining = dash;

    if let Some(&first) = points.first() {
        current.push(first);
    }

    for pair in points.windows(2) {
        let (mut from, to) = (pair[0], pair[1]);
        let mut length = ((to.0 - from.0) / sx).hypot((to.1 - from.1) / sy);

        while length > remaining {
            let t = remaining / length;
            let cut = (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
            if drawing {
                current.push(cut);
                dashes.push(std::mem::take(&mut current));
            } else {
                current.push(cut);
            }
            drawing = !drawing;
            length -= remaining;
            remaining = if drawing { dash } else { gap };
            from = cut;
        }

        remaining -= length;
        if drawing {
            current.push(to);
        }
    }

    if drawing && current.len() > 1 {
        dashes.push(current);
    }
    dashes
}
