use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::{AlertFamily, Severity};

/// Organization name used when the first row carries no usable prefix.
pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";

/// Secret type label -> number of secret alerts with that label.
pub type SecretTypeHistogram = BTreeMap<String, usize>;

/// Alert counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityHistogram {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityHistogram {
    pub fn increment(&mut self, severity: Severity) {
        *self.slot_mut(severity) += 1;
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn slot_mut(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
        }
    }
}

/// Alert counts for one repository within one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryBreakdown {
    /// Repository full name, `<org>/<name>`.
    pub name: String,
    pub alerts: usize,
    #[serde(flatten)]
    pub severity: SeverityHistogram,
}

impl RepositoryBreakdown {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alerts: 0,
            severity: SeverityHistogram::default(),
        }
    }
}

/// Family-level totals with their severity split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySummary {
    pub family: AlertFamily,
    pub alert_type: String,
    pub total: usize,
    /// The export only carries open alerts, so this always equals `total`.
    pub open: usize,
    #[serde(flatten)]
    pub severity: SeverityHistogram,
}

/// The finished, ranked summary of one alert export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub organization: String,
    pub generated_at: DateTime<Utc>,
    /// Code scanning, secret scanning, dependabot, in that order.
    pub alert_summary: Vec<FamilySummary>,
    pub code_scanning_alerts: SeverityHistogram,
    pub dependabot_alerts: SeverityHistogram,
    pub secret_scanning_by_type: SecretTypeHistogram,
    pub code_scanning_by_repo: Vec<RepositoryBreakdown>,
    pub dependabot_by_repo: Vec<RepositoryBreakdown>,
    pub secret_scanning_by_repo: Vec<RepositoryBreakdown>,
    /// Rows dropped because they had no `Tool` value.
    pub skipped_rows: usize,
}

impl ReportSummary {
    pub fn family(&self, family: AlertFamily) -> Option<&FamilySummary> {
        self.alert_summary.iter().find(|s| s.family == family)
    }

    pub fn family_total(&self, family: AlertFamily) -> usize {
        self.family(family).map(|s| s.total).unwrap_or(0)
    }

    pub fn repositories(&self, family: AlertFamily) -> &[RepositoryBreakdown] {
        match family {
            AlertFamily::StaticAnalysis => &self.code_scanning_by_repo,
            AlertFamily::Dependency => &self.dependabot_by_repo,
            AlertFamily::Secret => &self.secret_scanning_by_repo,
        }
    }

    /// Severity histogram for a family. Secret scanning has none of its own.
    pub fn severity_histogram(&self, family: AlertFamily) -> Option<&SeverityHistogram> {
        match family {
            AlertFamily::StaticAnalysis => Some(&self.code_scanning_alerts),
            AlertFamily::Dependency => Some(&self.dependabot_alerts),
            AlertFamily::Secret => None,
        }
    }

    /// Total number of counted alerts across all families.
    pub fn total_alerts(&self) -> usize {
        self.alert_summary.iter().map(|s| s.total).sum()
    }
}
