//! Panel descriptions handed to the renderer

use crate::error::{AnalysisError, Result};

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(31, 119, 180);
    pub const RED: Rgb = Rgb(214, 39, 40);
    pub const GREEN: Rgb = Rgb(44, 160, 44);
    pub const ORANGE: Rgb = Rgb(255, 127, 14);
    pub const PURPLE: Rgb = Rgb(148, 103, 189);
    pub const BROWN: Rgb = Rgb(140, 86, 75);
    pub const PINK: Rgb = Rgb(227, 119, 194);
    pub const GRAY: Rgb = Rgb(127, 127, 127);
}

/// Colors assigned to compared implementations, in order
pub const PALETTE: [Rgb; 8] = [
    Rgb::BLUE,
    Rgb::RED,
    Rgb::GREEN,
    Rgb::ORANGE,
    Rgb::PURPLE,
    Rgb::BROWN,
    Rgb::PINK,
    Rgb::GRAY,
];

/// Color for the `index`-th series; wraps around after the palette is exhausted
pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// How a series is stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    /// Measured data
    #[default]
    Solid,
    /// Fitted curves
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub color: Rgb,
    pub line: LineKind,
}

impl SeriesStyle {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            line: LineKind::Solid,
        }
    }

    pub fn dashed(color: Rgb) -> Self {
        Self {
            color,
            line: LineKind::Dashed,
        }
    }
}

/// One labeled line in a panel
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub style: SeriesStyle,
    pub label: String,
    /// Samples with `y >= ceiling` are left out of the panel
    pub display_ceiling: Option<f64>,
}

impl PlotSeries {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, style: SeriesStyle, label: impl Into<String>) -> Self {
        Self {
            xs,
            ys,
            style,
            label: label.into(),
            display_ceiling: None,
        }
    }

    pub fn clipped_at(mut self, ceiling: Option<f64>) -> Self {
        self.display_ceiling = ceiling;
        self
    }

    /// Points that are actually drawn
    ///
    /// This is a view of the data: the series itself is left untouched.
    pub fn visible_points(&self) -> Vec<(f64, f64)> {
        visible_points(&self.xs, &self.ys, self.display_ceiling)
    }
}

/// One plot area of a figure
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub show_legend: bool,
    pub title: Option<String>,
}

impl PlotSpec {
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            series: Vec::new(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            show_legend: true,
            title: None,
        }
    }

    pub fn with_series(mut self, series: PlotSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    /// Reject panels that would produce a misleading chart
    pub fn validate(&self) -> Result<()> {
        for series in &self.series {
            if series.xs.len() != series.ys.len() {
                return Err(AnalysisError::InvalidPlotSpec(format!(
                    "series '{}' has {} x values but {} y values",
                    series.label,
                    series.xs.len(),
                    series.ys.len()
                )));
            }
        }
        Ok(())
    }
}

/// Pair up `xs` and `ys`, dropping samples at or above `ceiling`
pub fn visible_points(xs: &[f64], ys: &[f64], ceiling: Option<f64>) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys)
        .filter(|&(_, &y)| ceiling.map_or(true, |c| y < c))
        .map(|(&x, &y)| (x, y))
        .collect()
}

/// Validate every panel of a figure
pub fn validate_panels(panels: &[PlotSpec]) -> Result<()> {
    if panels.is_empty() {
        return Err(AnalysisError::InvalidPlotSpec(
            "a figure needs at least one panel".to_string(),
        ));
    }
    panels.iter().try_for_each(PlotSpec::validate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_points_clips_at_ceiling() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 7.5, 5.0, 1.0];
        let shown = visible_points(&xs, &ys, Some(5.0));
        assert_eq!(shown, vec![(0.0, 0.0), (3.0, 1.0)]);
    }

    #[test]
    fn test_visible_points_without_ceiling() {
        let shown = visible_points(&[1.0, 2.0], &[100.0, 200.0], None);
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn test_clipping_leaves_series_intact() {
        let series = PlotSeries::new(
            vec![0.0, 1.0],
            vec![9.0, 1.0],
            SeriesStyle::solid(Rgb::BLUE),
            "derivative",
        )
        .clipped_at(Some(5.0));
        assert_eq!(series.visible_points(), vec![(1.0, 1.0)]);
        assert_eq!(series.ys, vec![9.0, 1.0]);
    }

    #[test]
    fn test_mismatched_series_rejected() {
        let panel = PlotSpec::new("n", "t").with_series(PlotSeries::new(
            vec![1.0, 2.0],
            vec![1.0],
            SeriesStyle::solid(Rgb::RED),
            "broken",
        ));
        match panel.validate() {
            Err(AnalysisError::InvalidPlotSpec(msg)) => assert!(msg.contains("broken")),
            other => panic!("expected InvalidPlotSpec, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_figure_rejected() {
        assert!(validate_panels(&[]).is_err());
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), Rgb::BLUE);
        assert_eq!(palette_color(1), Rgb::RED);
        assert_eq!(palette_color(2), Rgb::GREEN);
        assert_eq!(palette_color(PALETTE.len()), Rgb::BLUE);
    }
}
