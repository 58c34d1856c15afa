//! Plain-text rendering of command outcomes.
//!
//! Both front-ends display the same strings; anything surface-specific
//! (Markdown escaping, ANSI color) stays out of here.

use assistant_models::{AnalysisReport, MaturityLevel, ProjectMeta};

/// Usage text for the `help` verb.
pub fn help_text() -> String {
    "\
Available commands:
  help                      Show this message
  project list              List all projects
  project create <name>     Create a new project
  project switch <name>     Make a project active
  project info [name]       Show project details (active by default)
  analyze <file>            Analyze one file in the active project
  analyze-project           Analyze the whole active project
  chat <text>               Ask the AI assistant
  generate <prompt>         Generate code for a prompt"
        .to_string()
}

/// Renders the project list, marking the active project.
pub fn format_project_list(projects: &[ProjectMeta], active: Option<&str>) -> String {
    if projects.is_empty() {
        return "No projects yet. Create one with 'project create <name>'.".to_string();
    }

    let mut out = String::from("Projects:\n");
    for meta in projects {
        let marker = if active == Some(meta.name.as_str()) {
            "*"
        } else {
            " "
        };
        out.push_str(&format!(
            "{} {}  (created {})\n",
            marker,
            meta.name,
            meta.created_at.format("%Y-%m-%d")
        ));
    }
    out.pop();
    out
}

/// Renders one project's metadata.
pub fn format_project_info(meta: &ProjectMeta, file_count: usize, is_active: bool) -> String {
    let mut out = format!(
        "Project: {}\nPath: {}\nCreated: {}\nFiles: {}",
        meta.name,
        meta.path.display(),
        meta.created_at.format("%Y-%m-%d %H:%M UTC"),
        file_count
    );
    if is_active {
        out.push_str("\nStatus: active");
    }
    out
}

/// Renders an analysis report as a readable summary.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut out = format!(
        "Analysis of {}\nFiles: {}  Directories: {}  Lines: {}\n",
        report.root, report.file_count, report.dir_count, report.total_lines
    );

    if !report.language_counts.is_empty() {
        out.push_str("Languages: ");
        let langs: Vec<String> = report
            .language_counts
            .iter()
            .map(|(lang, count)| format!("{} ({})", lang, count))
            .collect();
        out.push_str(&langs.join(", "));
        out.push('\n');
    }

    out.push_str(&format!(
        "Maturity: {}/{} ({}) - {}\n",
        report.maturity.score,
        report.maturity.max_score,
        level_name(report.maturity.level),
        report.maturity.description
    ));

    if !report.issues.is_empty() {
        out.push_str(&format!("Issues ({}):\n", report.issues.len()));
        for issue in &report.issues {
            out.push_str(&format!("  {}: {}\n", issue.location, issue.detail));
        }
    }

    if !report.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for rec in &report.recommendations {
            out.push_str(&format!("  - {}\n", rec));
        }
    }

    out.pop();
    out
}

fn level_name(level: MaturityLevel) -> &'static str {
    match level {
        MaturityLevel::Low => "Low",
        MaturityLevel::Medium => "Medium",
        MaturityLevel::High => "High",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_models::project::ProjectConfig;

    fn meta(name: &str) -> ProjectMeta {
        ProjectMeta::from_config(&ProjectConfig::new(name), format!("/tmp/projects/{name}"))
    }

    #[test]
    fn test_empty_list_suggests_create() {
        let text = format_project_list(&[], None);
        assert!(text.contains("project create"));
    }

    #[test]
    fn test_list_marks_active_project() {
        let projects = [meta("alpha"), meta("beta")];
        let text = format_project_list(&projects, Some("beta"));

        assert!(text.contains("* beta"));
        assert!(text.contains("  alpha"));
    }

    #[test]
    fn test_info_shows_active_status() {
        let text = format_project_info(&meta("demo"), 3, true);
        assert!(text.contains("Project: demo"));
        assert!(text.contains("Files: 3"));
        assert!(text.contains("Status: active"));

        let inactive = format_project_info(&meta("demo"), 3, false);
        assert!(!inactive.contains("Status: active"));
    }

    #[test]
    fn test_help_lists_every_verb() {
        let text = help_text();
        for verb in [
            "help",
            "project list",
            "project create",
            "project switch",
            "project info",
            "analyze",
            "analyze-project",
            "chat",
            "generate",
        ] {
            assert!(text.contains(verb), "help is missing '{verb}'");
        }
    }
}
