//! Per-file code metrics.

use std::sync::OnceLock;

use regex::Regex;

use assistant_models::Language;

/// Metrics extracted from one text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetrics {
    pub lines: usize,
    pub functions: usize,
    pub has_docs: bool,
}

fn rust_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?(?:async\s+)?fn\s+\w+").unwrap())
}

fn python_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:async\s+)?def\s+\w+").unwrap())
}

fn js_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:export\s+)?(?:async\s+)?function\s+\w+").unwrap()
    })
}

/// Computes metrics for one file's content.
///
/// Function counting and doc detection only apply to source
/// languages; other files report zero functions and no docs.
pub fn measure(content: &str, language: Language) -> FileMetrics {
    let lines = content.lines().count();

    let (functions, has_docs) = match language {
        Language::Rust => (
            rust_fn_re().find_iter(content).count(),
            content.contains("///") || content.contains("//!"),
        ),
        Language::Python => (
            python_fn_re().find_iter(content).count(),
            content.contains("\"\"\"") || content.contains("'''"),
        ),
        Language::JavaScript | Language::TypeScript => (
            js_fn_re().find_iter(content).count(),
            content.contains("/**"),
        ),
        _ => (0, false),
    };

    FileMetrics {
        lines,
        functions,
        has_docs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_metrics() {
        let content = "//! Module docs.\n\npub fn one() {}\n\nasync fn two() {}\n";
        let metrics = measure(content, Language::Rust);

        assert_eq!(metrics.functions, 2);
        assert!(metrics.has_docs);
        assert_eq!(metrics.lines, 5);
    }

    #[test]
    fn test_rust_without_docs() {
        let metrics = measure("fn main() {}\n", Language::Rust);
        assert_eq!(metrics.functions, 1);
        assert!(!metrics.has_docs);
    }

    #[test]
    fn test_python_metrics() {
        let content = "\"\"\"Module docstring.\"\"\"\n\ndef a():\n    pass\n\nasync def b():\n    pass\n";
        let metrics = measure(content, Language::Python);

        assert_eq!(metrics.functions, 2);
        assert!(metrics.has_docs);
    }

    #[test]
    fn test_javascript_metrics() {
        let content = "/** Adds. */\nexport function add(a, b) { return a + b; }\n";
        let metrics = measure(content, Language::JavaScript);

        assert_eq!(metrics.functions, 1);
        assert!(metrics.has_docs);
    }

    #[test]
    fn test_non_source_files_have_no_code_metrics() {
        let metrics = measure("# Title\n\nSome /** text */ here.\n", Language::Markdown);

        assert_eq!(metrics.functions, 0);
        assert!(!metrics.has_docs);
        assert_eq!(metrics.lines, 3);
    }

    #[test]
    fn test_measure_is_deterministic() {
        let content = "pub fn a() {}\npub fn b() {}\n";
        assert_eq!(
            measure(content, Language::Rust),
            measure(content, Language::Rust)
        );
    }
}
