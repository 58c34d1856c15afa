//! Structural and maturity analysis of project file trees.
//!
//! The analyzer is read-only: it never mutates project files, and a
//! repeated run over an unchanged tree returns an identical report.

pub mod analyzer;
pub mod error;
pub mod metrics;

pub use analyzer::Analyzer;
pub use error::{AnalyzerError, Result};
