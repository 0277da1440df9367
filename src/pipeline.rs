//! Invocation modes: single-file analysis and multi-file comparison
//!
//! Both modes run load → fit → render strictly in that order. The fitter
//! always receives the complete series as loaded; display clipping is
//! attached to the plotted copy only.

use crate::config::{AnalysisConfig, AxisLabels, CompareConfig};
use crate::error::{AnalysisError, Result};
use crate::loader::{self, SampleSeries};
use crate::regression::{fit, ComplexityModel, FitResult};
use crate::render::{self, palette_color, PlotSeries, PlotSpec, Rgb, SeriesStyle, Viewer};
use crate::report::{self, AnalysisReport};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Fits computed for one series
#[derive(Debug)]
pub struct SeriesFits {
    pub time: Result<FitResult>,
    /// `None` when the file has no derivative column
    pub derivative: Option<Result<FitResult>>,
}

impl SeriesFits {
    fn any_succeeded(&self) -> bool {
        self.time.is_ok() || matches!(self.derivative, Some(Ok(_)))
    }
}

/// Fit runtime and (when present) derivative of `series` as configured
pub fn fit_series(series: &SampleSeries, config: &AnalysisConfig) -> SeriesFits {
    let xs = series.xs();
    let time = fit(&xs, &series.times, config.time_degree as i64);

    let derivative = series.derivatives.as_ref().map(|derivatives| {
        fit(&xs, derivatives, config.effective_derivative_degree() as i64)
    });

    SeriesFits { time, derivative }
}

/// Legend entry for a fitted overlay
pub fn fit_label(fit: &FitResult) -> String {
    format!(
        "{} (degree = {}, R² = {:.3})",
        ComplexityModel::caption(fit.degree),
        fit.degree,
        fit.r_squared_rounded()
    )
}

/// Panels for single-file analysis
///
/// Runtime panel first; a derivative panel follows for 3-column files. A
/// failed fit leaves its panel with the raw series only.
pub fn analysis_panels(
    series: &SampleSeries,
    fits: &SeriesFits,
    config: &AnalysisConfig,
) -> Vec<PlotSpec> {
    let xs = series.xs();
    let labels = &config.labels;

    let mut time_panel = PlotSpec::new(&labels.input, &labels.time).with_series(PlotSeries::new(
        xs.clone(),
        series.times.clone(),
        SeriesStyle::solid(Rgb::BLUE),
        "Benchmark results",
    ));
    if let Ok(time_fit) = &fits.time {
        time_panel = time_panel.with_series(overlay(&xs, time_fit));
    }

    let mut panels = vec![time_panel];

    if let (Some(derivatives), Some(derivative_fit)) = (&series.derivatives, &fits.derivative) {
        let mut panel = PlotSpec::new(&labels.input, &labels.derivative).with_series(
            PlotSeries::new(
                xs.clone(),
                derivatives.clone(),
                SeriesStyle::solid(Rgb::BLUE),
                "Benchmark derivative",
            )
            .clipped_at(config.display_ceiling),
        );
        if let Ok(derivative_fit) = derivative_fit {
            panel = panel.with_series(overlay(&xs, derivative_fit));
        }
        panels.push(panel);
    }

    panels
}

fn overlay(xs: &[f64], fit: &FitResult) -> PlotSeries {
    PlotSeries::new(
        xs.to_vec(),
        fit.predicted.clone(),
        SeriesStyle::dashed(Rgb::RED),
        fit_label(fit),
    )
}

/// Fits of one analysed file, after the figure was shown
#[derive(Debug)]
pub struct Analysis {
    pub source: PathBuf,
    pub samples: usize,
    pub fits: SeriesFits,
}

impl Analysis {
    /// Report lines for the fits that succeeded
    pub fn succeeded_fits_string(&self) -> String {
        let derivative = self.fits.derivative.as_ref().and_then(|fit| fit.as_ref().ok());
        report::succeeded_fits_string(self.fits.time.as_ref().ok(), derivative)
    }

    /// Full report, or the first fit error (time fit before derivative fit)
    pub fn into_report(self) -> Result<AnalysisReport> {
        let time_fit = self.fits.time?;
        let derivative_fit = self.fits.derivative.transpose()?;

        Ok(AnalysisReport::new(
            &self.source,
            self.samples,
            &time_fit,
            derivative_fit.as_ref(),
        ))
    }
}

/// Load, fit and render one result file, keeping per-fit outcomes
///
/// When one fit fails the other panel is still rendered. When every fit
/// fails nothing is rendered. Fit errors stay inside the returned
/// [`Analysis`]; only load, config and render failures are returned here.
pub fn run_analysis(
    path: impl AsRef<Path>,
    config: &AnalysisConfig,
    viewer: &dyn Viewer,
) -> Result<Analysis> {
    config.validate()?;

    let path = path.as_ref();
    let series = loader::load(path)?;
    let fits = fit_series(&series, config);

    if let Ok(time_fit) = &fits.time {
        info!(r_squared = time_fit.r_squared, degree = time_fit.degree, "time fit");
    }
    if let Some(Ok(derivative_fit)) = &fits.derivative {
        info!(
            r_squared = derivative_fit.r_squared,
            degree = derivative_fit.degree,
            "derivative fit"
        );
    }

    if fits.any_succeeded() {
        let panels = analysis_panels(&series, &fits, config);
        render::render(&panels, &config.figure, viewer)?;
    } else {
        warn!(path = %path.display(), "no fit succeeded, skipping figure");
    }

    Ok(Analysis {
        source: path.to_path_buf(),
        samples: series.len(),
        fits,
    })
}

/// Analyse one result file: fit, render, report
///
/// A failed fit is returned once the viewer is done with the sibling panel.
pub fn analyze(
    path: impl AsRef<Path>,
    config: &AnalysisConfig,
    viewer: &dyn Viewer,
) -> Result<AnalysisReport> {
    run_analysis(path, config, viewer)?.into_report()
}

/// Single panel overlaying one raw runtime series per implementation
///
/// Series keep their own lengths; only each file's own arrays must agree.
pub fn comparison_panel(
    series: &[SampleSeries],
    labels: &[String],
    axes: &AxisLabels,
) -> PlotSpec {
    series
        .iter()
        .enumerate()
        .fold(PlotSpec::new(&axes.input, &axes.time), |panel, (i, s)| {
            let label = labels.get(i).cloned().unwrap_or_else(|| s.label());
            panel.with_series(PlotSeries::new(
                s.xs(),
                s.times.clone(),
                SeriesStyle::solid(palette_color(i)),
                label,
            ))
        })
}

/// Compare several implementations' runtime curves on one panel
pub fn compare<P: AsRef<Path>>(
    paths: &[P],
    config: &CompareConfig,
    viewer: &dyn Viewer,
) -> Result<Vec<SampleSeries>> {
    config.validate()?;

    if paths.len() < 2 {
        return Err(AnalysisError::Config(format!(
            "comparison needs at least two result files, got {}",
            paths.len()
        )));
    }
    if !config.labels.is_empty() && config.labels.len() != paths.len() {
        return Err(AnalysisError::Config(format!(
            "{} labels given for {} result files",
            config.labels.len(),
            paths.len()
        )));
    }

    let series = loader::load_many(paths)?;
    for s in &series {
        debug!(series = %s.label(), samples = s.len(), "comparing");
    }

    let panel = comparison_panel(&series, &config.labels, &config.axes);
    render::render(&[panel], &config.figure, viewer)?;

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_series;
    use crate::render::{LineKind, MemoryViewer};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_fit_label_rounds_to_three_decimals() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let result = fit(&x, &[0.0, 1.1, 1.9, 3.2], 1).unwrap();
        let label = fit_label(&result);
        assert!(label.starts_with("Linear regression (degree = 1, R² = 0.9"), "{}", label);
        let digits = label.rsplit("= ").next().unwrap().trim_end_matches(')');
        assert_eq!(digits.split('.').nth(1).unwrap().len(), 3);
    }

    #[test]
    fn test_clipping_does_not_reach_the_fitter() {
        // Spike of 50 at index 1 would be hidden from the plot but must be fitted
        let series =
            parse_series("spike.txt", "0,0.0,0.0\n1,1.0,50.0\n2,2.0,1.0\n3,3.0,1.0\n").unwrap();
        let config = AnalysisConfig::linear();

        let fits = fit_series(&series, &config);
        let derivative_fit = fits.derivative.as_ref().unwrap().as_ref().unwrap();
        // Degree 0 fit is the mean of the full series, spike included
        assert!((derivative_fit.predicted[0] - 13.0).abs() < 1e-9);

        let panels = analysis_panels(&series, &fits, &config);
        let raw = &panels[1].series[0];
        assert_eq!(raw.ys, vec![0.0, 50.0, 1.0, 1.0]);
        assert_eq!(raw.visible_points(), vec![(0.0, 0.0), (2.0, 1.0), (3.0, 1.0)]);
        // The overlay is not clipped
        assert_eq!(panels[1].series[1].visible_points().len(), 4);
        assert_eq!(panels[1].series[1].style.line, LineKind::Dashed);
    }

    #[test]
    fn test_two_column_file_gets_single_panel() {
        let series = parse_series("a.csv", "1,1.0\n2,4.0\n3,9.0\n4,16.0").unwrap();
        let config = AnalysisConfig {
            time_degree: 2,
            ..AnalysisConfig::default()
        };
        let fits = fit_series(&series, &config);
        assert!(fits.derivative.is_none());

        let panels = analysis_panels(&series, &fits, &config);
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].series.len(), 2);
    }

    #[test]
    fn test_analyze_three_column_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "b.csv", "0,0.0,999.0\n1,1.0,1.0\n2,2.0,1.0\n");
        let viewer = MemoryViewer::new();

        let report = analyze(&path, &AnalysisConfig::linear(), &viewer).unwrap();

        assert_eq!(report.samples, 3);
        assert!((report.time_fit.r_squared - 1.0).abs() < 1e-9);
        let derivative = report.derivative_fit.unwrap();
        assert_eq!(derivative.degree, 0);

        let figure = viewer.last().unwrap();
        assert_eq!(figure.panels, 2);
        assert!(figure.svg.contains("Benchmark derivative"));
    }

    #[test]
    fn test_analyze_sibling_panel_survives_failed_fit() {
        let dir = TempDir::new().unwrap();
        // Cubic runtime fit needs 4 points; the quadratic derivative fit needs 3
        let path = write(&dir, "short.txt", "0,0.0,0.0\n1,1.0,1.0\n2,8.0,7.0\n");
        let viewer = MemoryViewer::new();

        let err = analyze(&path, &AnalysisConfig::cubic(), &viewer).unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                required: 4,
                actual: 3
            }
        ));
        let figure = viewer.last().expect("derivative panel still rendered");
        assert_eq!(figure.panels, 2);
    }

    #[test]
    fn test_run_analysis_keeps_surviving_fit() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "short.txt", "0,0.0,0.0\n1,1.0,1.0\n2,8.0,7.0\n");
        let viewer = MemoryViewer::new();

        let analysis = run_analysis(&path, &AnalysisConfig::cubic(), &viewer).unwrap();

        assert_eq!(analysis.samples, 3);
        let text = analysis.succeeded_fits_string();
        assert!(text.contains("derivative fit (degree 2): r^2 = 1.000000"), "{}", text);
        assert!(!text.contains("time fit"));
        assert!(matches!(
            analysis.into_report(),
            Err(AnalysisError::InsufficientData { required: 4, .. })
        ));
    }

    #[test]
    fn test_analyze_empty_file_fails_without_figure() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.txt", "");
        let viewer = MemoryViewer::new();

        let err = analyze(&path, &AnalysisConfig::default(), &viewer).unwrap_err();

        assert!(matches!(err, AnalysisError::InsufficientData { actual: 0, .. }));
        assert!(viewer.figures().is_empty());
    }

    #[test]
    fn test_compare_three_files_of_different_lengths() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write(&dir, "hashmap.txt", "1,0.1\n2,0.2\n3,0.3\n"),
            write(&dir, "array.txt", "1,0.05\n2,0.1\n"),
            write(&dir, "glueck.txt", "1,0.2\n2,0.4\n3,0.6\n4,0.8\n5,1.0\n"),
        ];
        let viewer = MemoryViewer::new();

        let series = compare(&paths, &CompareConfig::default(), &viewer).unwrap();

        assert_eq!(
            series.iter().map(SampleSeries::len).collect::<Vec<_>>(),
            vec![3, 2, 5]
        );
        let figure = viewer.last().unwrap();
        assert_eq!(figure.panels, 1);
        for name in ["hashmap", "array", "glueck"] {
            assert!(figure.svg.contains(name), "missing legend entry {}", name);
        }
    }

    #[test]
    fn test_comparison_panel_assigns_distinct_colors_and_labels() {
        let a = parse_series("a.txt", "1,1.0\n2,2.0").unwrap();
        let b = parse_series("b.txt", "1,2.0").unwrap();
        let labels = vec!["Hashmap Implementation".to_string()];

        let panel = comparison_panel(&[a, b], &labels, &AxisLabels::default());

        assert_eq!(panel.series.len(), 2);
        assert_eq!(panel.series[0].label, "Hashmap Implementation");
        assert_eq!(panel.series[1].label, "b");
        assert_ne!(panel.series[0].style.color, panel.series[1].style.color);
        assert!(panel.show_legend);
    }

    #[test]
    fn test_compare_requires_two_files() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "only.txt", "1,1.0\n");
        let viewer = MemoryViewer::new();
        assert!(matches!(
            compare(&[path], &CompareConfig::default(), &viewer),
            Err(AnalysisError::Config(_))
        ));
    }

    #[test]
    fn test_compare_label_count_must_match() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write(&dir, "a.txt", "1,1.0\n"),
            write(&dir, "b.txt", "1,1.0\n"),
        ];
        let config = CompareConfig {
            labels: vec!["only one".to_string()],
            ..CompareConfig::default()
        };
        let viewer = MemoryViewer::new();
        assert!(compare(&paths, &config, &viewer).is_err());
    }

    #[test]
    fn test_compare_reports_malformed_file() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write(&dir, "good.txt", "1,1.0\n"),
            write(&dir, "bad.txt", "1,1.0\noops\n"),
        ];
        let viewer = MemoryViewer::new();
        match compare(&paths, &CompareConfig::default(), &viewer) {
            Err(AnalysisError::MalformedRecord { path, line, .. }) => {
                assert!(path.ends_with("bad.txt"));
                assert_eq!(line, 2);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }
}
