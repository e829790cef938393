//! Read-only display projection of a [`ReportSummary`].
//!
//! The summary always carries complete ranked lists; this module decides
//! what a rendered report shows without touching any count.

use chrono::{DateTime, Utc};

use crate::config::{DisplayOptions, SectionOptions};
use crate::models::alert::AlertFamily;
use crate::models::report::{FamilySummary, RepositoryBreakdown, ReportSummary, SeverityHistogram};

pub const REPORT_TITLE: &str = "GitHub Advanced Security Summary Report";

/// What a rendered report shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView<'a> {
    pub organization: &'a str,
    pub generated_at: DateTime<Utc>,
    pub executive_summary: &'a [FamilySummary],
    pub sections: Vec<SectionView<'a>>,
}

/// One family section of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView<'a> {
    pub family: AlertFamily,
    pub title: String,
    pub severity: Option<SeverityPanel>,
    pub secret_types: Option<Vec<(&'a str, usize)>>,
    pub repositories: Option<RepositoryPanel<'a>>,
}

/// Severity histogram, or the bare total for secret scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityPanel {
    Histogram(SeverityHistogram),
    Total(usize),
}

impl SeverityPanel {
    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Histogram(_) => "All Alerts by Severity",
            Self::Total(_) => "All Alerts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPanel<'a> {
    pub subtitle: String,
    pub rows: &'a [RepositoryBreakdown],
    /// Secret scanning breakdowns carry only totals.
    pub show_severities: bool,
    /// Number of repositories in the complete list.
    pub total_repositories: usize,
}

impl RepositoryPanel<'_> {
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_repositories
    }
}

/// Apply display options to a finished summary.
pub fn project<'a>(summary: &'a ReportSummary, options: &DisplayOptions) -> ReportView<'a> {
    let sections = [AlertFamily::StaticAnalysis, AlertFamily::Dependency, AlertFamily::Secret]
        .into_iter()
        .map(|family| project_section(summary, family, options.section(family), options.top_n))
        .collect();

    ReportView {
        organization: &summary.organization,
        generated_at: summary.generated_at,
        executive_summary: &summary.alert_summary,
        sections,
    }
}

fn project_section<'a>(
    summary: &'a ReportSummary,
    family: AlertFamily,
    section: &SectionOptions,
    top_n: usize,
) -> SectionView<'a> {
    let severity = section.show_severity.then(|| match summary.severity_histogram(family) {
        Some(hist) => SeverityPanel::Histogram(*hist),
        None => SeverityPanel::Total(summary.family_total(family)),
    });

    // Secret types are always limited to top_n, even when top_only is off
    let secret_types = (family == AlertFamily::Secret && section.show_by_repository)
        .then(|| top_secret_types(summary, top_n));

    let repositories = section.show_by_repository.then(|| {
        let all = summary.repositories(family);
        let rows = if section.top_only { &all[..all.len().min(top_n)] } else { all };
        let subtitle = if section.top_only {
            format!("Top {} Repositories Only", top_n)
        } else {
            "All Alerts by Repository".to_string()
        };
        RepositoryPanel {
            subtitle,
            rows,
            show_severities: family != AlertFamily::Secret,
            total_repositories: all.len(),
        }
    });

    SectionView {
        family,
        title: format!("{} Alerts", family.label()),
        severity,
        secret_types,
        repositories,
    }
}

/// Secret types ranked by count, ties by label, limited to `limit` entries.
pub fn top_secret_types(summary: &ReportSummary, limit: usize) -> Vec<(&str, usize)> {
    let mut types: Vec<(&str, usize)> = summary
        .secret_scanning_by_type
        .iter()
        .map(|(label, &count)| (label.as_str(), count))
        .collect();
    // BTreeMap iteration is label-ordered, so a stable sort keeps ties by label
    types.sort_by(|a, b| b.1.cmp(&a.1));
    types.truncate(limit);
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::RawAlertRecord;
    use crate::pipeline::aggregate;

    fn rows(tool: &str, repos: usize) -> Vec<RawAlertRecord> {
        (0..repos)
            .flat_map(|i| {
                // repo-i gets i + 1 alerts so the ranking is deterministic
                (0..=i).map(move |_| RawAlertRecord {
                    repository: Some(format!("acme/repo-{}", i)),
                    tool: Some(tool.to_string()),
                    severity: Some("high".to_string()),
                    secret_type: Some(format!("type-{}", i)),
                    ..Default::default()
                })
            })
            .collect()
    }

    fn summary() -> ReportSummary {
        let mut all = rows("codeql", 12);
        all.extend(rows("dependabot", 3));
        all.extend(rows("secret-scanning", 12));
        aggregate(&all).unwrap()
    }

    #[test]
    fn test_default_options_show_top_ten() {
        let summary = summary();
        let view = project(&summary, &DisplayOptions::default());

        assert_eq!(view.organization, "acme");
        assert_eq!(view.executive_summary.len(), 3);
        assert_eq!(view.sections.len(), 3);

        let code = &view.sections[0];
        assert_eq!(code.title, "Code Scanning Alerts");
        let repos = code.repositories.as_ref().unwrap();
        assert_eq!(repos.rows.len(), 10);
        assert_eq!(repos.total_repositories, 12);
        assert!(repos.is_truncated());
        assert_eq!(repos.subtitle, "Top 10 Repositories Only");
        assert_eq!(repos.rows[0].name, "acme/repo-11");
        assert!(repos.show_severities);
    }

    #[test]
    fn test_full_list_when_not_top_only() {
        let summary = summary();
        let mut options = DisplayOptions::default();
        options.code_scanning.top_only = false;
        let view = project(&summary, &options);

        let repos = view.sections[0].repositories.as_ref().unwrap();
        assert_eq!(repos.rows.len(), 12);
        assert!(!repos.is_truncated());
        assert_eq!(repos.subtitle, "All Alerts by Repository");
    }

    #[test]
    fn test_short_list_not_padded() {
        let summary = summary();
        let view = project(&summary, &DisplayOptions::default());
        let deps = view.sections[1].repositories.as_ref().unwrap();
        assert_eq!(deps.rows.len(), 3);
        assert!(!deps.is_truncated());
    }

    #[test]
    fn test_hidden_sections() {
        let summary = summary();
        let mut options = DisplayOptions::default();
        options.dependabot.show_severity = false;
        options.dependabot.show_by_repository = false;
        let view = project(&summary, &options);

        let deps = &view.sections[1];
        assert!(deps.severity.is_none());
        assert!(deps.repositories.is_none());
        // Projection never alters the underlying counts
        assert_eq!(summary.dependabot_by_repo.len(), 3);
    }

    #[test]
    fn test_secret_section_panels() {
        let summary = summary();
        let view = project(&summary, &DisplayOptions::default());
        let secrets = &view.sections[2];

        assert_eq!(secrets.severity, Some(SeverityPanel::Total(78)));
        assert_eq!(secrets.severity.unwrap().subtitle(), "All Alerts");

        let types = secrets.secret_types.as_ref().unwrap();
        assert_eq!(types.len(), 10);
        assert_eq!(types[0], ("type-11", 12));

        let repos = secrets.repositories.as_ref().unwrap();
        assert!(!repos.show_severities);
    }

    #[test]
    fn test_secret_types_limited_even_without_top_only() {
        let summary = summary();
        let mut options = DisplayOptions::default();
        options.secret_scanning.top_only = false;
        let view = project(&summary, &options);
        let secrets = &view.sections[2];

        let types = secrets.secret_types.as_ref().unwrap();
        assert_eq!(summary.secret_scanning_by_type.len(), 12);
        assert_eq!(types.len(), 10);
        assert_eq!(types[0], ("type-11", 12));
        // Repository rows still follow top_only
        assert_eq!(secrets.repositories.as_ref().unwrap().rows.len(), 12);
    }

    #[test]
    fn test_secret_types_hidden_with_breakdown() {
        let summary = summary();
        let mut options = DisplayOptions::default();
        options.secret_scanning.show_by_repository = false;
        let view = project(&summary, &options);
        assert!(view.sections[2].secret_types.is_none());
        assert!(view.sections[2].repositories.is_none());
    }

    #[test]
    fn test_custom_top_n() {
        let summary = summary();
        let options = DisplayOptions {
            top_n: 2,
            ..Default::default()
        };
        let view = project(&summary, &options);
        let repos = view.sections[0].repositories.as_ref().unwrap();
        assert_eq!(repos.rows.len(), 2);
        assert_eq!(repos.subtitle, "Top 2 Repositories Only");
    }

    #[test]
    fn test_top_secret_types_ties_by_label() {
        let mut summary = summary();
        summary.secret_scanning_by_type.clear();
        summary.secret_scanning_by_type.insert("b".to_string(), 2);
        summary.secret_scanning_by_type.insert("a".to_string(), 2);
        summary.secret_scanning_by_type.insert("c".to_string(), 5);
        let types = top_secret_types(&summary, 10);
        assert_eq!(types, vec![("c", 5), ("a", 2), ("b", 2)]);
    }
}
