//! Analysis report types.
//!
//! An [`AnalysisReport`] is derived from the live file tree on every
//! request and never cached. All collections use ordered containers so
//! re-analysis of an unchanged tree produces an identical report.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Upper bound of the maturity score.
pub const MAX_MATURITY_SCORE: u8 = 10;

/// Source language classification by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Markdown,
    Json,
    Yaml,
    Toml,
    Html,
    Css,
    Text,
    Other,
}

impl Language {
    /// Classifies a path by its extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("rs") => Language::Rust,
            Some("py") => Language::Python,
            Some("js") => Language::JavaScript,
            Some("ts") => Language::TypeScript,
            Some("md") => Language::Markdown,
            Some("json") => Language::Json,
            Some("yaml") | Some("yml") => Language::Yaml,
            Some("toml") => Language::Toml,
            Some("html") => Language::Html,
            Some("css") => Language::Css,
            Some("txt") | Some("rst") => Language::Text,
            _ => Language::Other,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Markdown => "markdown",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Html => "html",
            Language::Css => "css",
            Language::Text => "text",
            Language::Other => "other",
        }
    }

    /// Returns true for languages the analyzer extracts code metrics
    /// from (functions, docs).
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            Language::Rust | Language::Python | Language::JavaScript | Language::TypeScript
        )
    }
}

/// Kind of issue discovered during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A source file with no documentation at all.
    MissingDocs,
    /// A file exceeding the line-count threshold.
    OversizedFile,
    /// A file that could not be decoded as text and was skipped.
    BinarySkipped,
    /// A file that could not be read at all.
    UnreadableFile,
}

/// One discovered issue: what and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Path relative to the project root.
    pub location: String,
    pub detail: String,
}

impl Issue {
    pub fn new(kind: IssueKind, location: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            detail: detail.into(),
        }
    }
}

/// Per-file metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the project root.
    pub path: String,
    pub language: Language,
    pub lines: usize,
    /// Number of function definitions found (source files only).
    pub functions: usize,
    /// True if the file contains doc comments or docstrings.
    pub has_docs: bool,
}

/// Presence of the structural signals the maturity score rewards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthFlags {
    pub has_readme: bool,
    pub has_tests: bool,
    pub has_manifest: bool,
    pub has_license: bool,
    pub has_gitignore: bool,
    pub has_ci: bool,
}

/// Coarse maturity level derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Low,
    Medium,
    High,
}

/// Bounded maturity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maturity {
    /// Score in `0..=MAX_MATURITY_SCORE`.
    pub score: u8,
    pub max_score: u8,
    pub level: MaturityLevel,
    pub description: String,
}

impl Maturity {
    /// Builds the summary for a raw score, clamping it to the bounded
    /// range.
    pub fn from_score(score: u8) -> Self {
        let score = score.min(MAX_MATURITY_SCORE);
        let (level, description) = match score {
            8..=10 => (
                MaturityLevel::High,
                "Well-structured project with documentation and tests",
            ),
            5..=7 => (
                MaturityLevel::Medium,
                "Basic project structure with some documentation",
            ),
            _ => (MaturityLevel::Low, "Early stage or minimal project setup"),
        };
        Self {
            score,
            max_score: MAX_MATURITY_SCORE,
            level,
            description: description.to_string(),
        }
    }
}

/// The full structural report for one project or one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Root the analysis was scoped to.
    pub root: String,
    pub file_count: usize,
    pub dir_count: usize,
    pub total_lines: usize,
    /// File counts keyed by language name, deterministically ordered.
    pub language_counts: BTreeMap<String, usize>,
    pub files: Vec<FileReport>,
    pub issues: Vec<Issue>,
    pub health: HealthFlags,
    pub maturity: Maturity,
    pub recommendations: Vec<String>,
}
