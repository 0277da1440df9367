//! Comparative renderer
//!
//! A figure is a row of panels, each described by a [`PlotSpec`]. The three
//! layouts used by the pipeline are all plain `PlotSpec` lists:
//!
//! - one raw series,
//! - runtime and derivative side by side, each with a fitted overlay,
//! - several implementations overlaid on one panel.
//!
//! Clipping of derivative outliers happens here, as a view over each series.
//! What gets fitted is decided before rendering and never sees the clip.

mod figure;
mod spec;
mod viewer;

pub use figure::{axis_ranges, dash_segments, render_svg};
pub use spec::{
    palette_color, validate_panels, visible_points, LineKind, PlotSeries, PlotSpec, Rgb,
    SeriesStyle, PALETTE,
};
pub use viewer::{Figure, HeadlessViewer, InteractiveViewer, MemoryViewer, Viewer};

use crate::config::FigureSize;
use crate::error::Result;
use tracing::debug;

/// Render `panels` side by side and hand the figure to `viewer`
///
/// Blocks for as long as the viewer does.
pub fn render(panels: &[PlotSpec], size: &FigureSize, viewer: &dyn Viewer) -> Result<()> {
    let svg = render_svg(panels, size)?;
    debug!(panels = panels.len(), bytes = svg.len(), "rendered figure");

    viewer.show(&Figure {
        svg,
        panels: panels.len(),
    })
}
