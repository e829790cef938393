use std::fmt::Write;

use tracing::warn;

use crate::config::ReportFormat;
use crate::errors::ReportError;
use crate::models::alert::Severity;
use crate::models::report::{FamilySummary, RepositoryBreakdown, SeverityHistogram};
use crate::reporting::projection::{RepositoryPanel, ReportView, SectionView, SeverityPanel, REPORT_TITLE};

const ERROR_TITLE: &str = "Error Generating Report";
const ERROR_BODY: &str =
    "There was an error generating the report. Please try again with different options.";

/// Render a projected report, substituting a minimal error document if rendering fails.
pub fn render_document(view: &ReportView<'_>, format: ReportFormat) -> String {
    let rendered = match format {
        ReportFormat::Html => format_html_report(view),
        ReportFormat::Markdown | ReportFormat::Json => format_markdown_report(view),
    };

    rendered.unwrap_or_else(|e| {
        warn!(error = %e, format = %format, "Report rendering failed, emitting error document");
        error_document(format)
    })
}

/// Minimal stand-in document used when rendering fails.
pub fn error_document(format: ReportFormat) -> String {
    match format {
        ReportFormat::Html => format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{ERROR_TITLE}</title>\n</head>\n<body>\n<h1>{ERROR_TITLE}</h1>\n<p>{ERROR_BODY}</p>\n</body>\n</html>\n"
        ),
        ReportFormat::Markdown | ReportFormat::Json => format!("# {ERROR_TITLE}\n\n{ERROR_BODY}\n"),
    }
}

pub fn format_markdown_report(view: &ReportView<'_>) -> Result<String, ReportError> {
    let mut out = String::new();
    writeln!(out, "# {}\n", REPORT_TITLE).map_err(render_error)?;
    writeln!(out, "- **GitHub Organization:** {}", view.organization).map_err(render_error)?;
    writeln!(out, "- **Generated:** {}\n", format_timestamp(view)).map_err(render_error)?;

    out.push_str(&format_executive_summary(view.executive_summary));

    for section in &view.sections {
        out.push('\n');
        out.push_str(&format_section_markdown(section)?);
    }

    writeln!(out, "\n---\n\n_{}_", generator_footer()).map_err(render_error)?;
    Ok(out)
}

pub fn format_executive_summary(summaries: &[FamilySummary]) -> String {
    let mut out = String::from(
        "## Executive Summary\n\n| Alert Type | Total | Critical | High | Medium | Low |\n|---|---|---|---|---|---|\n",
    );
    for s in summaries {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            s.alert_type, s.total, s.severity.critical, s.severity.high, s.severity.medium, s.severity.low
        ));
    }
    out
}

fn format_section_markdown(section: &SectionView<'_>) -> Result<String, ReportError> {
    let mut out = String::new();
    writeln!(out, "## {}\n", section.title).map_err(render_error)?;

    if let Some(panel) = &section.severity {
        writeln!(out, "### {}\n", panel.subtitle()).map_err(render_error)?;
        match panel {
            SeverityPanel::Histogram(hist) => out.push_str(&format_severity_table(hist)),
            SeverityPanel::Total(total) => {
                writeln!(out, "| Total Alerts |\n|---|\n| {} |", total).map_err(render_error)?;
            }
        }
        out.push('\n');
    }

    if let Some(types) = &section.secret_types {
        out.push_str("### Secret Types\n\n| Secret Type | Count |\n|---|---|\n");
        for (label, count) in types {
            writeln!(out, "| {} | {} |", escape_markdown(label), count).map_err(render_error)?;
        }
        out.push('\n');
    }

    if let Some(panel) = &section.repositories {
        writeln!(out, "### {}\n", panel.subtitle).map_err(render_error)?;
        out.push_str(&format_repository_table(panel));
        out.push('\n');
    }

    Ok(out)
}

fn format_severity_table(hist: &SeverityHistogram) -> String {
    let mut out = String::from("| Severity | Count |\n|---|---|\n");
    if hist.is_empty() {
        out.push_str("| No data available | 0 |\n");
        return out;
    }
    for severity in Severity::ALL {
        out.push_str(&format!("| {} | {} |\n", severity, hist.get(severity)));
    }
    out
}

fn format_repository_table(panel: &RepositoryPanel<'_>) -> String {
    let mut out = String::new();
    if panel.show_severities {
        out.push_str("| Repository | Total | Critical | High | Medium | Low |\n|---|---|---|---|---|---|\n");
    } else {
        out.push_str("| Repository | Total |\n|---|---|\n");
    }
    for repo in panel.rows {
        out.push_str(&format_repository_row(repo, panel.show_severities));
    }
    out
}

fn format_repository_row(repo: &RepositoryBreakdown, show_severities: bool) -> String {
    if show_severities {
        format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            escape_markdown(&repo.name),
            repo.alerts,
            repo.severity.critical,
            repo.severity.high,
            repo.severity.medium,
            repo.severity.low
        )
    } else {
        format!("| {} | {} |\n", escape_markdown(&repo.name), repo.alerts)
    }
}

pub fn format_html_report(view: &ReportView<'_>) -> Result<String, ReportError> {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    writeln!(out, "<title>{} - {}</title>", escape_html(view.organization), REPORT_TITLE).map_err(render_error)?;
    out.push_str("</head>\n<body>\n");

    writeln!(out, "<h1>{}</h1>", REPORT_TITLE).map_err(render_error)?;
    out.push_str("<ul>\n");
    writeln!(out, "<li>GitHub Organization: {}</li>", escape_html(view.organization)).map_err(render_error)?;
    writeln!(out, "<li>Generated: {}</li>", format_timestamp(view)).map_err(render_error)?;
    out.push_str("</ul>\n");

    out.push_str("<h2>Executive Summary</h2>\n");
    out.push_str("<table border=\"1\" cellspacing=\"0\" cellpadding=\"6\">\n");
    out.push_str("<thead><tr><th>Alert Type</th><th>Total</th><th>Critical</th><th>High</th><th>Medium</th><th>Low</th></tr></thead>\n<tbody>\n");
    for s in view.executive_summary {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&s.alert_type),
            s.total,
            s.severity.critical,
            s.severity.high,
            s.severity.medium,
            s.severity.low
        )
        .map_err(render_error)?;
    }
    out.push_str("</tbody></table>\n");

    for section in &view.sections {
        format_section_html(&mut out, section).map_err(render_error)?;
    }

    writeln!(out, "<footer><small>{}</small></footer>", escape_html(&generator_footer())).map_err(render_error)?;
    out.push_str("</body>\n</html>\n");
    Ok(out)
}

fn format_section_html(out: &mut String, section: &SectionView<'_>) -> std::fmt::Result {
    writeln!(out, "<h2>{}</h2>", escape_html(&section.title))?;

    if let Some(panel) = &section.severity {
        writeln!(out, "<h3>{}</h3>", panel.subtitle())?;
        out.push_str("<table border=\"1\" cellspacing=\"0\" cellpadding=\"6\">\n");
        match panel {
            SeverityPanel::Histogram(hist) => {
                out.push_str("<thead><tr><th>Severity</th><th>Count</th></tr></thead>\n<tbody>\n");
                if hist.is_empty() {
                    out.push_str("<tr><td>No data available</td><td>0</td></tr>\n");
                } else {
                    for severity in Severity::ALL {
                        writeln!(out, "<tr><td>{}</td><td>{}</td></tr>", severity, hist.get(severity))?;
                    }
                }
            }
            SeverityPanel::Total(total) => {
                out.push_str("<thead><tr><th>Total Alerts</th></tr></thead>\n<tbody>\n");
                writeln!(out, "<tr><td>{}</td></tr>", total)?;
            }
        }
        out.push_str("</tbody></table>\n");
    }

    if let Some(types) = &section.secret_types {
        out.push_str("<h3>Secret Types</h3>\n<table border=\"1\" cellspacing=\"0\" cellpadding=\"6\">\n");
        out.push_str("<thead><tr><th>Secret Type</th><th>Count</th></tr></thead>\n<tbody>\n");
        for (label, count) in types {
            writeln!(out, "<tr><td>{}</td><td>{}</td></tr>", escape_html(label), count)?;
        }
        out.push_str("</tbody></table>\n");
    }

    if let Some(panel) = &section.repositories {
        writeln!(out, "<h3>{}</h3>", escape_html(&panel.subtitle))?;
        out.push_str("<table border=\"1\" cellspacing=\"0\" cellpadding=\"6\">\n<thead><tr><th>Repository</th><th>Total</th>");
        if panel.show_severities {
            out.push_str("<th>Critical</th><th>High</th><th>Medium</th><th>Low</th>");
        }
        out.push_str("</tr></thead>\n<tbody>\n");
        for repo in panel.rows {
            write!(out, "<tr><td>{}</td><td>{}</td>", escape_html(&repo.name), repo.alerts)?;
            if panel.show_severities {
                write!(
                    out,
                    "<td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
                    repo.severity.critical, repo.severity.high, repo.severity.medium, repo.severity.low
                )?;
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody></table>\n");
    }

    Ok(())
}

fn format_timestamp(view: &ReportView<'_>) -> String {
    view.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// "Generated by ..." line, with the git hash when the build captured one.
fn generator_footer() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) => format!("Generated by ghas-report {} ({})", version, hash),
        None => format!("Generated by ghas-report {}", version),
    }
}

fn render_error(e: std::fmt::Error) -> ReportError {
    ReportError::Render(e.to_string())
}

/// Escape a value for a single Markdown table cell.
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
