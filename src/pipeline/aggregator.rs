use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::errors::ReportError;
use crate::models::alert::RawAlertRecord;
use crate::models::report::{ReportSummary, UNKNOWN_ORGANIZATION};

use super::classifier::classify;
use super::state::AggregationContext;

/// Aggregate alert rows into a ranked summary stamped with the current time.
pub fn aggregate(rows: &[RawAlertRecord]) -> Result<ReportSummary, ReportError> {
    aggregate_at(rows, Utc::now())
}

/// Aggregate alert rows into a ranked summary stamped with `generated_at`.
///
/// Rows are consumed once, in order. Only an empty row sequence is an error;
/// per-row defects degrade to their defaults.
pub fn aggregate_at(
    rows: &[RawAlertRecord],
    generated_at: DateTime<Utc>,
) -> Result<ReportSummary, ReportError> {
    let first = rows.first().ok_or(ReportError::EmptyInput)?;
    let organization = organization_from_repository(first.repository.as_deref());

    let mut ctx = AggregationContext::new(organization);
    for (idx, row) in rows.iter().enumerate() {
        match classify(row) {
            Some(classification) => ctx.record(row.repository_name(), &classification),
            None => {
                debug!(row = idx + 1, repository = row.repository_name(), "Alert missing Tool field, skipping");
                ctx.record_skipped();
            }
        }
    }

    if ctx.skipped_rows() > 0 {
        warn!(skipped = ctx.skipped_rows(), "Skipped alerts without a Tool value");
    }

    let summary = ctx.finish(generated_at);
    info!(
        organization = %summary.organization,
        rows = rows.len(),
        alerts = summary.total_alerts(),
        "Aggregated alert export"
    );
    Ok(summary)
}

/// Organization prefix of a `<org>/<name>` repository name.
///
/// Falls back to [`UNKNOWN_ORGANIZATION`] when the value is missing, has no
/// `/`, or has an empty prefix.
pub fn organization_from_repository(repository: Option<&str>) -> String {
    repository
        .and_then(|r| r.split_once('/'))
        .map(|(org, _)| org)
        .filter(|org| !org.is_empty())
        .unwrap_or(UNKNOWN_ORGANIZATION)
        .to_string()
}
