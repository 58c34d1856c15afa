//! Project tree analysis.
//!
//! The analyzer walks a project's file tree in deterministic order
//! (lexicographic per directory), classifies files by extension,
//! extracts per-file metrics, and aggregates structural health signals
//! into a bounded maturity score. Analysis is read-only and recomputed
//! from the live tree on every request.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use assistant_models::project::PROJECT_CONFIG_FILE;
use assistant_models::{
    AnalysisReport, FileReport, HealthFlags, Issue, IssueKind, Language, Maturity,
};

use crate::error::{AnalyzerError, Result};
use crate::metrics::measure;

/// Directories never descended into.
const IGNORE_DIRS: &[&str] = &[
    ".git",
    ".idea",
    "__pycache__",
    "node_modules",
    "target",
    "venv",
];

/// Files above this line count are flagged as oversized.
const OVERSIZED_FILE_LINES: usize = 1000;

/// Dependency manifests recognized for the health check.
const MANIFEST_FILES: &[&str] = &[
    "Cargo.toml",
    "package.json",
    "pyproject.toml",
    "requirements.txt",
    "setup.py",
];

/// Analyzes one project directory.
pub struct Analyzer {
    root: PathBuf,
}

impl Analyzer {
    /// Creates an analyzer scoped to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Analyzes the whole project tree.
    pub fn analyze_project(&self) -> Result<AnalysisReport> {
        let mut files = Vec::new();
        let mut dir_count = 0usize;
        walk(&self.root, &mut files, &mut dir_count)?;

        let mut report = empty_report(&self.root);
        report.dir_count = dir_count;

        let mut health = HealthFlags::default();
        for path in &files {
            let rel = path.strip_prefix(&self.root).unwrap_or(path);
            if rel == Path::new(PROJECT_CONFIG_FILE) {
                continue;
            }
            note_health(rel, &mut health);
            self.analyze_one(path, rel, &mut report);
        }
        report.health = health;

        let score = compute_score(
            &report.health,
            report.total_lines,
            report.file_count,
            report.dir_count,
            &report.issues,
        );
        report.maturity = Maturity::from_score(score);
        report.recommendations = recommend(&report.health, &report.issues, report.total_lines);

        debug!(
            root = %self.root.display(),
            files = report.file_count,
            score = report.maturity.score,
            "Project analysis complete"
        );
        Ok(report)
    }

    /// Analyzes a single file given by a path relative to the project
    /// root.
    ///
    /// Fails with [`AnalyzerError::FileNotFound`] if the file does not
    /// exist, [`AnalyzerError::OutsideProject`] if the path escapes the
    /// project, and [`AnalyzerError::UnsupportedFile`] if the file is
    /// not text.
    pub fn analyze_file(&self, relative: &Path) -> Result<AnalysisReport> {
        let candidate = self.root.join(relative);
        if !candidate.is_file() {
            return Err(AnalyzerError::FileNotFound(relative.to_path_buf()));
        }

        let root = canonical(&self.root)?;
        let resolved = canonical(&candidate)?;
        if !resolved.starts_with(&root) {
            return Err(AnalyzerError::OutsideProject(relative.to_path_buf()));
        }

        let bytes = fs::read(&resolved).map_err(|source| AnalyzerError::ReadError {
            path: resolved.clone(),
            source,
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|_| AnalyzerError::UnsupportedFile(relative.to_path_buf()))?;

        let mut report = empty_report(&self.root);
        push_file(relative, &content, &mut report);

        let score = compute_score(
            &report.health,
            report.total_lines,
            report.file_count,
            report.dir_count,
            &report.issues,
        );
        report.maturity = Maturity::from_score(score);
        report.recommendations = recommend(&report.health, &report.issues, report.total_lines);
        Ok(report)
    }

    fn analyze_one(&self, path: &Path, rel: &Path, report: &mut AnalysisReport) {
        let location = rel.display().to_string();
        match fs::read(path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => push_file(rel, &content, report),
                Err(_) => {
                    report.file_count += 1;
                    *report
                        .language_counts
                        .entry(Language::Other.as_str().to_string())
                        .or_insert(0) += 1;
                    report.issues.push(Issue::new(
                        IssueKind::BinarySkipped,
                        location,
                        "not a text file, skipped",
                    ));
                }
            },
            Err(e) => {
                report.file_count += 1;
                report.issues.push(Issue::new(
                    IssueKind::UnreadableFile,
                    location,
                    e.to_string(),
                ));
            }
        }
    }
}

fn canonical(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|source| AnalyzerError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// Recursive walk collecting files in lexicographic order per
/// directory, so repeated analysis of an unchanged tree visits files
/// identically.
fn walk(dir: &Path, files: &mut Vec<PathBuf>, dir_count: &mut usize) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| AnalyzerError::ReadError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if IGNORE_DIRS.contains(&name) {
                continue;
            }
            *dir_count += 1;
            walk(&path, files, dir_count)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

fn empty_report(root: &Path) -> AnalysisReport {
    AnalysisReport {
        root: root.display().to_string(),
        file_count: 0,
        dir_count: 0,
        total_lines: 0,
        language_counts: BTreeMap::new(),
        files: Vec::new(),
        issues: Vec::new(),
        health: HealthFlags::default(),
        maturity: Maturity::from_score(0),
        recommendations: Vec::new(),
    }
}

fn push_file(rel: &Path, content: &str, report: &mut AnalysisReport) {
    let language = Language::from_path(rel);
    let metrics = measure(content, language);
    let location = rel.display().to_string();

    report.file_count += 1;
    report.total_lines += metrics.lines;
    *report
        .language_counts
        .entry(language.as_str().to_string())
        .or_insert(0) += 1;

    if metrics.lines > OVERSIZED_FILE_LINES {
        report.issues.push(Issue::new(
            IssueKind::OversizedFile,
            location.clone(),
            format!("{} lines (threshold {})", metrics.lines, OVERSIZED_FILE_LINES),
        ));
    }
    if language.is_source() && metrics.functions > 0 && !metrics.has_docs {
        report.issues.push(Issue::new(
            IssueKind::MissingDocs,
            location.clone(),
            "source file has functions but no documentation",
        ));
    }

    report.files.push(FileReport {
        path: location,
        language,
        lines: metrics.lines,
        functions: metrics.functions,
        has_docs: metrics.has_docs,
    });
}

fn note_health(rel: &Path, health: &mut HealthFlags) {
    let name = rel
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let lower = name.to_ascii_lowercase();

    if lower == "readme.md" || lower == "readme.rst" || lower == "readme.txt" {
        health.has_readme = true;
    }
    if MANIFEST_FILES.contains(&name) {
        health.has_manifest = true;
    }
    if lower == "license" || lower.starts_with("license.") {
        health.has_license = true;
    }
    if name == ".gitignore" {
        health.has_gitignore = true;
    }
    if rel.components().any(|c| c.as_os_str() == "tests")
        || lower.starts_with("test_")
        || lower.ends_with("_test.rs")
        || lower.ends_with("_test.py")
    {
        health.has_tests = true;
    }
    if rel.starts_with(".github/workflows") || name == ".gitlab-ci.yml" {
        health.has_ci = true;
    }
}

/// Additive maturity score, penalized for discovered issues and
/// clamped to `0..=10` by [`Maturity::from_score`].
fn compute_score(
    health: &HealthFlags,
    total_lines: usize,
    file_count: usize,
    dir_count: usize,
    issues: &[Issue],
) -> u8 {
    let mut score = 0u8;
    if health.has_readme {
        score += 1;
    }
    if health.has_manifest {
        score += 1;
    }
    if health.has_license {
        score += 1;
    }
    if health.has_tests {
        score += 2;
    }
    if health.has_gitignore {
        score += 1;
    }
    if health.has_ci {
        score += 1;
    }
    if total_lines > 1000 {
        score += 1;
    }
    if file_count > 10 {
        score += 1;
    }
    if dir_count > 2 {
        score += 1;
    }

    let oversized = issues.iter().any(|i| i.kind == IssueKind::OversizedFile);
    let undocumented = issues.iter().any(|i| i.kind == IssueKind::MissingDocs);
    score = score.saturating_sub(oversized as u8 + undocumented as u8);
    score
}

fn recommend(health: &HealthFlags, issues: &[Issue], total_lines: usize) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !health.has_readme {
        recommendations.push("Add a README.md describing the project, setup and usage".to_string());
    }
    if !health.has_manifest {
        recommendations
            .push("Add a dependency manifest (Cargo.toml, pyproject.toml, ...)".to_string());
    }
    if !health.has_license {
        recommendations.push("Add a LICENSE file".to_string());
    }
    if !health.has_tests {
        recommendations.push("Add tests to improve code quality".to_string());
    }
    if !health.has_gitignore {
        recommendations.push("Add a .gitignore file".to_string());
    }
    if !health.has_ci {
        recommendations.push("Set up continuous integration".to_string());
    }
    if issues.iter().any(|i| i.kind == IssueKind::OversizedFile) {
        recommendations.push("Split oversized files into smaller modules".to_string());
    }
    if issues.iter().any(|i| i.kind == IssueKind::MissingDocs) {
        recommendations.push("Document source files that define functions".to_string());
    }
    if total_lines > 5000 {
        recommendations
            .push("Consider splitting the codebase into packages for maintainability".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_models::MaturityLevel;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_project() {
        let dir = tempdir().unwrap();
        let report = Analyzer::new(dir.path()).analyze_project().unwrap();

        assert_eq!(report.file_count, 0);
        assert!(report.issues.is_empty());
        assert_eq!(report.maturity.score, 0);
        assert_eq!(report.maturity.level, MaturityLevel::Low);
    }

    #[test]
    fn test_counts_and_languages() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/main.rs", "/// Entry.\nfn main() {}\n");
        write(dir.path(), "src/lib.rs", "//! Lib.\npub fn run() {}\n");
        write(dir.path(), "notes.md", "# Notes\n");

        let report = Analyzer::new(dir.path()).analyze_project().unwrap();

        assert_eq!(report.file_count, 3);
        assert_eq!(report.language_counts["rust"], 2);
        assert_eq!(report.language_counts["markdown"], 1);
        assert_eq!(report.dir_count, 1);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let dir = tempdir().unwrap();
        write(dir.path(), "README.md", "# Demo\n");
        write(dir.path(), "src/main.rs", "fn main() {}\n");
        write(dir.path(), "tests/basic.rs", "#[test]\nfn ok() {}\n");

        let analyzer = Analyzer::new(dir.path());
        let first = analyzer.analyze_project().unwrap();
        let second = analyzer.analyze_project().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_docs_issue() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/main.rs", "fn main() {}\n");

        let report = Analyzer::new(dir.path()).analyze_project().unwrap();
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::MissingDocs && i.location == "src/main.rs"));
    }

    #[test]
    fn test_oversized_file_issue_and_penalty() {
        let dir = tempdir().unwrap();
        let big = "//! Docs.\n".repeat(1200);
        write(dir.path(), "src/big.rs", &big);
        write(dir.path(), "README.md", "# Demo\n");

        let report = Analyzer::new(dir.path()).analyze_project().unwrap();
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::OversizedFile));

        // readme 1 + >1000 lines 1, minus oversized penalty 1
        assert_eq!(report.maturity.score, 1);
    }

    #[test]
    fn test_binary_file_is_skipped_with_note() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), [0u8, 159, 146, 150]).unwrap();
        write(dir.path(), "src/main.rs", "/// Doc.\nfn main() {}\n");

        let report = Analyzer::new(dir.path()).analyze_project().unwrap();

        assert_eq!(report.file_count, 2);
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::BinarySkipped && i.location == "blob.bin"));
    }

    #[test]
    fn test_health_flags_raise_score() {
        let dir = tempdir().unwrap();
        write(dir.path(), "README.md", "# Demo\n");
        write(dir.path(), "Cargo.toml", "[package]\nname = \"demo\"\n");
        write(dir.path(), "LICENSE", "MIT\n");
        write(dir.path(), ".gitignore", "target/\n");
        write(dir.path(), "tests/basic.rs", "#[test]\nfn ok() {}\n");
        write(dir.path(), ".github/workflows/ci.yml", "on: push\n");

        let report = Analyzer::new(dir.path()).analyze_project().unwrap();

        assert!(report.health.has_readme);
        assert!(report.health.has_manifest);
        assert!(report.health.has_license);
        assert!(report.health.has_tests);
        assert!(report.health.has_gitignore);
        assert!(report.health.has_ci);
        // 1+1+1+2+1+1 flags, +1 for >2 dirs, -1 undocumented test file
        assert_eq!(report.maturity.score, 7);
        assert_eq!(report.maturity.level, MaturityLevel::Medium);
    }

    #[test]
    fn test_ignored_directories_are_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/main.rs", "/// Doc.\nfn main() {}\n");
        write(dir.path(), "target/debug/out.rs", "fn generated() {}\n");
        write(dir.path(), ".git/config", "[core]\n");

        let report = Analyzer::new(dir.path()).analyze_project().unwrap();
        assert_eq!(report.file_count, 1);
    }

    #[test]
    fn test_recommendations_for_missing_signals() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/main.rs", "/// Doc.\nfn main() {}\n");

        let report = Analyzer::new(dir.path()).analyze_project().unwrap();
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.contains("README")));
        assert!(report.recommendations.iter().any(|r| r.contains("tests")));
    }

    #[test]
    fn test_analyze_file() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/main.rs", "/// Doc.\nfn main() {}\n");

        let report = Analyzer::new(dir.path())
            .analyze_file(Path::new("src/main.rs"))
            .unwrap();

        assert_eq!(report.file_count, 1);
        assert_eq!(report.files[0].path, "src/main.rs");
        assert_eq!(report.files[0].functions, 1);
        assert!(report.files[0].has_docs);
    }

    #[test]
    fn test_analyze_file_not_found() {
        let dir = tempdir().unwrap();
        let result = Analyzer::new(dir.path()).analyze_file(Path::new("missing.rs"));
        assert!(matches!(result, Err(AnalyzerError::FileNotFound(_))));
    }

    #[test]
    fn test_analyze_file_outside_project() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(dir.path().join("secret.txt"), "shh").unwrap();

        let result = Analyzer::new(&project).analyze_file(Path::new("../secret.txt"));
        assert!(matches!(result, Err(AnalyzerError::OutsideProject(_))));
    }

    #[test]
    fn test_analyze_file_binary_is_unsupported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), [0u8, 159, 146, 150]).unwrap();

        let result = Analyzer::new(dir.path()).analyze_file(Path::new("blob.bin"));
        assert!(matches!(result, Err(AnalyzerError::UnsupportedFile(_))));
    }
}
