use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::alert::{AlertFamily, Classification};
use crate::models::report::{
    FamilySummary, RepositoryBreakdown, ReportSummary, SecretTypeHistogram, SeverityHistogram,
};

/// Running per-repository counts for one family, kept in first-seen order.
#[derive(Debug, Default)]
pub struct RepositoryTally {
    index: HashMap<String, usize>,
    entries: Vec<RepositoryBreakdown>,
}

impl RepositoryTally {
    /// Entry for `name`, created with zero counts on first sight.
    pub fn entry(&mut self, name: &str) -> &mut RepositoryBreakdown {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.entries.push(RepositoryBreakdown::new(name));
                let idx = self.entries.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the tally into a list ranked by descending alert count.
    /// The sort is stable, so equal counts keep first-seen order.
    pub fn into_ranked(self) -> Vec<RepositoryBreakdown> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.alerts.cmp(&a.alerts));
        entries
    }
}

/// Accumulators for one family.
#[derive(Debug, Default)]
pub struct FamilyTally {
    pub total: usize,
    pub severity: SeverityHistogram,
    pub repositories: RepositoryTally,
}

/// Mutable state for a single aggregation pass.
///
/// Created fresh per call and consumed by [`AggregationContext::finish`].
#[derive(Debug)]
pub struct AggregationContext {
    organization: String,
    static_analysis: FamilyTally,
    dependency: FamilyTally,
    secret: FamilyTally,
    secret_types: SecretTypeHistogram,
    skipped_rows: usize,
}

impl AggregationContext {
    pub fn new(organization: String) -> Self {
        Self {
            organization,
            static_analysis: FamilyTally::default(),
            dependency: FamilyTally::default(),
            secret: FamilyTally::default(),
            secret_types: SecretTypeHistogram::new(),
            skipped_rows: 0,
        }
    }

    pub fn tally(&self, family: AlertFamily) -> &FamilyTally {
        match family {
            AlertFamily::StaticAnalysis => &self.static_analysis,
            AlertFamily::Dependency => &self.dependency,
            AlertFamily::Secret => &self.secret,
        }
    }

    fn tally_mut(&mut self, family: AlertFamily) -> &mut FamilyTally {
        match family {
            AlertFamily::StaticAnalysis => &mut self.static_analysis,
            AlertFamily::Dependency => &mut self.dependency,
            AlertFamily::Secret => &mut self.secret,
        }
    }

    /// Count one classified row against `repository`.
    pub fn record(&mut self, repository: &str, classification: &Classification) {
        let family = classification.family;
        let tally = self.tally_mut(family);
        tally.total += 1;
        tally.severity.increment(classification.severity);

        let repo = tally.repositories.entry(repository);
        repo.alerts += 1;
        // Secret breakdowns only carry a total
        if family != AlertFamily::Secret {
            repo.severity.increment(classification.severity);
        }

        if let Some(secret_type) = &classification.secret_type {
            *self.secret_types.entry(secret_type.clone()).or_insert(0) += 1;
        }
    }

    pub fn record_skipped(&mut self) {
        self.skipped_rows += 1;
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Rank the repository lists and freeze everything into a summary.
    pub fn finish(self, generated_at: DateTime<Utc>) -> ReportSummary {
        let alert_summary = AlertFamily::ALL
            .iter()
            .map(|&family| {
                let tally = self.tally(family);
                FamilySummary {
                    family,
                    alert_type: family.label().to_string(),
                    total: tally.total,
                    open: tally.total,
                    severity: tally.severity,
                }
            })
            .collect();

        ReportSummary {
            organization: self.organization,
            generated_at,
            alert_summary,
            code_scanning_alerts: self.static_analysis.severity,
            dependabot_alerts: self.dependency.severity,
            secret_scanning_by_type: self.secret_types,
            code_scanning_by_repo: self.static_analysis.repositories.into_ranked(),
            dependabot_by_repo: self.dependency.repositories.into_ranked(),
            secret_scanning_by_repo: self.secret.repositories.into_ranked(),
            skipped_rows: self.skipped_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::Severity;

    fn classification(family: AlertFamily, severity: Severity) -> Classification {
        Classification {
            family,
            severity,
            secret_type: None,
        }
    }

    #[test]
    fn test_repository_tally_creates_entries_once() {
        let mut tally = RepositoryTally::default();
        assert!(tally.is_empty());
        tally.entry("acme/api").alerts += 1;
        tally.entry("acme/api").alerts += 1;
        tally.entry("acme/web").alerts += 1;
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_into_ranked_is_stable_on_ties() {
        let mut tally = RepositoryTally::default();
        tally.entry("acme/c").alerts = 1;
        tally.entry("acme/a").alerts = 3;
        tally.entry("acme/b").alerts = 1;
        tally.entry("acme/d").alerts = 3;

        let names: Vec<String> = tally.into_ranked().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["acme/a", "acme/d", "acme/c", "acme/b"]);
    }

    #[test]
    fn test_record_secret_skips_repository_severity() {
        let mut ctx = AggregationContext::new("acme".to_string());
        ctx.record("acme/web", &classification(AlertFamily::Secret, Severity::Critical));

        let tally = ctx.tally(AlertFamily::Secret);
        assert_eq!(tally.total, 1);
        assert_eq!(tally.severity.critical, 1);

        let summary = ctx.finish(Utc::now());
        let repo = &summary.secret_scanning_by_repo[0];
        assert_eq!(repo.alerts, 1);
        assert!(repo.severity.is_empty());
    }

    #[test]
    fn test_record_counts_secret_types() {
        let mut ctx = AggregationContext::new("acme".to_string());
        let mut c = classification(AlertFamily::Secret, Severity::Critical);
        c.secret_type = Some("AWS Key".to_string());
        ctx.record("acme/web", &c);
        ctx.record("acme/api", &c);

        let summary = ctx.finish(Utc::now());
        assert_eq!(summary.secret_scanning_by_type.get("AWS Key"), Some(&2));
        assert_eq!(summary.secret_scanning_by_type.len(), 1);
    }

    #[test]
    fn test_finish_orders_family_summaries() {
        let ctx = AggregationContext::new("acme".to_string());
        let summary = ctx.finish(Utc::now());
        let labels: Vec<&str> = summary.alert_summary.iter().map(|s| s.alert_type.as_str()).collect();
        assert_eq!(labels, vec!["Code Scanning", "Secret Scanning", "Dependabot"]);
    }

    #[test]
    fn test_skipped_rows_tracked() {
        let mut ctx = AggregationContext::new("acme".to_string());
        ctx.record_skipped();
        ctx.record_skipped();
        assert_eq!(ctx.skipped_rows(), 2);
        assert_eq!(ctx.finish(Utc::now()).skipped_rows, 2);
    }
}
