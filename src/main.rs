use anyhow::{Context, Result};
use benchfit::cli::{AnalyzeArgs, Cli, Command, CompareArgs, FigureArgs, OutputFormat};
use benchfit::config::{AnalysisConfig, CompareConfig, ConfigFile};
use benchfit::pipeline;
use benchfit::render::{HeadlessViewer, InteractiveViewer, Viewer};
use benchfit::AnalysisError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Headless when --no-wait is given, otherwise block until the user dismisses the figure
fn make_viewer(figure: &FigureArgs) -> Box<dyn Viewer> {
    if figure.no_wait {
        Box::new(HeadlessViewer::new(&figure.output))
    } else {
        Box::new(InteractiveViewer::new(&figure.output))
    }
}

fn non_negative(flag: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| AnalysisError::InvalidDegree(value))
        .with_context(|| format!("Invalid value for {}", flag))
}

/// Apply explicit flags on top of the configuration file
fn analysis_config(base: AnalysisConfig, args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match args.model {
        Some(model) => AnalysisConfig {
            time_degree: model.degree(),
            derivative_degree: None,
            ..base
        },
        None => base,
    };

    if let Some(degree) = args.degree {
        config.time_degree = non_negative("--degree", degree)?;
    }
    if let Some(degree) = args.derivative_degree {
        config.derivative_degree = Some(non_negative("--derivative-degree", degree)?);
    }
    if args.no_clip {
        config.display_ceiling = None;
    } else if let Some(ceiling) = args.ceiling {
        config.display_ceiling = Some(ceiling);
    }

    Ok(config)
}

fn run_analyze(base: AnalysisConfig, args: &AnalyzeArgs) -> Result<()> {
    let config = analysis_config(base, args)?;
    let viewer = make_viewer(&args.figure);
    let context = || format!("Failed to analyze {}", args.input.display());

    let analysis =
        pipeline::run_analysis(&args.input, &config, viewer.as_ref()).with_context(context)?;
    let partial = analysis.succeeded_fits_string();

    let report = match analysis.into_report() {
        Ok(report) => report,
        Err(e) => {
            // Surviving fits still reach the console; stdout stays JSON-only
            match args.format {
                OutputFormat::Text => print!("{}", partial),
                OutputFormat::Json => eprint!("{}", partial),
            }
            return Err(e).with_context(context);
        }
    };

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

fn run_compare(base: CompareConfig, args: &CompareArgs) -> Result<()> {
    let mut config = base;
    if !args.labels.is_empty() {
        config.labels = args.labels.clone();
    }
    let viewer = make_viewer(&args.figure);

    let series = pipeline::compare(&args.inputs, &config, viewer.as_ref())
        .context("Failed to compare benchmark results")?;

    for s in &series {
        println!("{}: {} samples", s.source.display(), s.len());
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let file = match &args.config {
        Some(path) => ConfigFile::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConfigFile::default(),
    };

    match &args.command {
        Command::Analyze(analyze) => run_analyze(file.analyze, analyze),
        Command::Compare(compare) => run_compare(file.compare, compare),
    }
}
