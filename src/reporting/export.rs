use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{DisplayOptions, ReportFormat};
use crate::errors::ReportError;
use crate::models::report::ReportSummary;
use crate::reporting::formatter::render_document;
use crate::reporting::projection::project;

/// `<organization>-security-report.<ext>`, with filename-unsafe characters replaced.
pub fn report_filename(organization: &str, format: ReportFormat) -> String {
    let org: String = organization
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let org = match org.trim_matches('.') {
        "" => "report",
        trimmed => trimmed,
    };
    format!("{}-security-report.{}", org, format.extension())
}

/// Render the document body for `format`. JSON carries the full summary, not the projection.
pub fn render_report(
    summary: &ReportSummary,
    options: &DisplayOptions,
    format: ReportFormat,
) -> Result<String, ReportError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        ReportFormat::Markdown | ReportFormat::Html => {
            let view = project(summary, options);
            Ok(render_document(&view, format))
        }
    }
}

/// Render and write the report into `dir`, returning the written path.
pub async fn write_report(
    dir: &Path,
    summary: &ReportSummary,
    options: &DisplayOptions,
    format: ReportFormat,
) -> Result<PathBuf, ReportError> {
    let content = render_report(summary, options, format)?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(report_filename(&summary.organization, format));
    atomic_write(&path, &content).await?;

    info!(path = %path.display(), format = %format, "Report written");
    Ok(path)
}

/// Atomic file write: write to temp, then rename
pub async fn atomic_write(path: &Path, content: &str) -> Result<(), ReportError> {
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, content).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Sibling temp file that keeps the full file name, e.g. `acme-security-report.md.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename("acme", ReportFormat::Markdown), "acme-security-report.md");
        assert_eq!(report_filename("acme", ReportFormat::Html), "acme-security-report.html");
        assert_eq!(report_filename("acme", ReportFormat::Json), "acme-security-report.json");
    }

    #[test]
    fn test_report_filename_keeps_placeholder_spaces() {
        assert_eq!(
            report_filename("Unknown Organization", ReportFormat::Markdown),
            "Unknown Organization-security-report.md"
        );
    }

    #[test]
    fn test_report_filename_sanitizes_separators() {
        assert_eq!(report_filename("a/b\\c", ReportFormat::Html), "a_b_c-security-report.html");
        assert_eq!(report_filename("..", ReportFormat::Html), "report-security-report.html");
    }

    #[test]
    fn test_temp_path_distinct_per_format() {
        let md = temp_path(Path::new("out/acme-security-report.md"));
        let html = temp_path(Path::new("out/acme-security-report.html"));
        assert_eq!(md, PathBuf::from("out/acme-security-report.md.tmp"));
        assert_eq!(html, PathBuf::from("out/acme-security-report.html.tmp"));
        assert_ne!(md, html);
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme-security-report.md");
        atomic_write(&path, "# report\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report\n");
        assert!(!temp_path(&path).exists());
    }
}
