//! Benchfit - polynomial complexity analysis for benchmark timing results
//!
//! This library loads the per-input-size timing records a benchmark harness
//! writes, fits polynomial models to the runtime and its derivative, scores
//! each fit with R², and renders side-by-side comparison figures.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod regression;
pub mod render;
pub mod report;

pub use error::{AnalysisError, Result};
