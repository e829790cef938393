use crate::cli::commands::SummarizeArgs;
use crate::errors::ReportError;
use crate::ingest;
use crate::models::report::{FamilySummary, ReportSummary};
use crate::pipeline;
use console::style;
use std::path::PathBuf;
use tracing::info;

pub async fn handle_summarize(args: SummarizeArgs) -> Result<(), ReportError> {
    info!(input = %args.input, "Summarizing alert export");

    let alerts = ingest::load_alerts(&PathBuf::from(&args.input)).await?;
    let summary = pipeline::aggregate(&alerts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_terminal_summary(&summary));
    }

    Ok(())
}

/// Executive summary for the terminal.
pub fn format_terminal_summary(summary: &ReportSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style(&summary.organization).bold()));
    out.push_str(&format!(
        "{}\n\n",
        style(summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")).dim()
    ));
    out.push_str(&format!(
        "{:<18} {:>7} {:>9} {:>7} {:>7} {:>7}\n",
        "Alert Type", "Total", "Critical", "High", "Medium", "Low"
    ));
    for family in &summary.alert_summary {
        out.push_str(&format_family_line(family));
    }
    if summary.skipped_rows > 0 {
        out.push_str(&format!(
            "\n{} {} row(s) without a Tool value were skipped\n",
            style("note:").yellow(),
            summary.skipped_rows
        ));
    }
    out
}

fn format_family_line(s: &FamilySummary) -> String {
    // Pad before styling so escape codes don't break alignment
    format!(
        "{:<18} {:>7} {} {} {:>7} {:>7}\n",
        s.alert_type,
        s.total,
        style(format!("{:>9}", s.severity.critical)).red(),
        style(format!("{:>7}", s.severity.high)).yellow(),
        s.severity.medium,
        s.severity.low
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::RawAlertRecord;

    #[test]
    fn test_terminal_summary_lists_families() {
        console::set_colors_enabled(false);
        let rows = vec![
            RawAlertRecord {
                repository: Some("acme/api".to_string()),
                tool: Some("codeql".to_string()),
                severity: Some("critical".to_string()),
                ..Default::default()
            },
            RawAlertRecord::default(),
        ];
        let summary = pipeline::aggregate(&rows).unwrap();
        let text = format_terminal_summary(&summary);

        assert!(text.starts_with("acme\n"));
        assert!(text.contains("Code Scanning"));
        assert!(text.contains("Secret Scanning"));
        assert!(text.contains("Dependabot"));
        assert!(text.contains("1 row(s) without a Tool value were skipped"));
    }
}
