//! Figure viewers
//!
//! Rendering produces an SVG document; a [`Viewer`] decides what happens to
//! it. The interactive viewer is the only blocking point of a run.

use crate::error::{AnalysisError, Result};
use std::cell::RefCell;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// A rendered figure
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub svg: String,
    pub panels: usize,
}

/// Destination of rendered figures
pub trait Viewer {
    /// Present `figure`; returns once the viewer is done with it
    fn show(&self, figure: &Figure) -> Result<()>;
}

fn write_figure(path: &Path, figure: &Figure) -> Result<()> {
    fs::write(path, &figure.svg).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), panels = figure.panels, "figure written");
    Ok(())
}

/// Writes the figure to disk and returns immediately (batch use)
#[derive(Debug, Clone)]
pub struct HeadlessViewer {
    path: PathBuf,
}

impl HeadlessViewer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Viewer for HeadlessViewer {
    fn show(&self, figure: &Figure) -> Result<()> {
        write_figure(&self.path, figure)
    }
}

/// Writes the figure to disk, prompts on stderr, then blocks until the user presses Enter
#[derive(Debug, Clone)]
pub struct InteractiveViewer {
    path: PathBuf,
}

impl InteractiveViewer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Viewer for InteractiveViewer {
    fn show(&self, figure: &Figure) -> Result<()> {
        write_figure(&self.path, figure)?;

        let stdin_error = |source| AnalysisError::Io {
            path: PathBuf::from("<stdin>"),
            source,
        };

        // Prompt on stderr; stdout carries the report
        let mut stderr = io::stderr();
        writeln!(
            stderr,
            "Figure written to {}; open it in a browser and press Enter to close.",
            self.path.display()
        )
        .and_then(|_| stderr.flush())
        .map_err(stdin_error)?;

        // EOF (closed stdin) counts as dismissal
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).map_err(stdin_error)?;
        Ok(())
    }
}

/// Keeps figures in memory (library embedding and tests)
#[derive(Debug, Default)]
pub struct MemoryViewer {
    figures: RefCell<Vec<Figure>>,
}

impl MemoryViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Figures shown so far, oldest first
    pub fn figures(&self) -> Vec<Figure> {
        self.figures.borrow().clone()
    }

    pub fn last(&self) -> Option<Figure> {
        self.figures.borrow().last().cloned()
    }
}

impl Viewer for MemoryViewer {
    fn show(&self, figure: &Figure) -> Result<()> {
        self.figures.borrow_mut().push(figure.clone());
        Ok(())
    }
}
