use crate::models::alert::{AlertFamily, Classification, RawAlertRecord, Severity};

/// Classify one raw row.
///
/// Returns `None` when the row has no `Tool` value; such rows must not be
/// counted anywhere. Secret rows are pinned to `Critical` and never read the
/// `Severity` column.
pub fn classify(row: &RawAlertRecord) -> Option<Classification> {
    let tool = row.tool.as_deref().filter(|t| !t.is_empty())?;
    let family = AlertFamily::from_tool(tool);

    let classification = match family {
        AlertFamily::Secret => Classification {
            family,
            severity: Severity::Critical,
            secret_type: row
                .secret_type
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        },
        AlertFamily::StaticAnalysis | AlertFamily::Dependency => Classification {
            family,
            severity: Severity::from_label(row.severity.as_deref().unwrap_or("")),
            secret_type: None,
        },
    };

    Some(classification)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tool: Option<&str>, severity: Option<&str>, secret_type: Option<&str>) -> RawAlertRecord {
        RawAlertRecord {
            repository: Some("acme/api".to_string()),
            tool: tool.map(|s| s.to_string()),
            severity: severity.map(|s| s.to_string()),
            secret_type: secret_type.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_tool_is_skipped() {
        assert!(classify(&row(None, Some("High"), None)).is_none());
    }

    #[test]
    fn test_empty_tool_is_skipped() {
        assert!(classify(&row(Some(""), Some("High"), None)).is_none());
    }

    #[test]
    fn test_codeql_row() {
        let c = classify(&row(Some("CodeQL"), Some("High"), None)).unwrap();
        assert_eq!(c.family, AlertFamily::StaticAnalysis);
        assert_eq!(c.severity, Severity::High);
        assert!(c.secret_type.is_none());
    }

    #[test]
    fn test_dependabot_row() {
        let c = classify(&row(Some("Dependabot"), Some("Critical"), None)).unwrap();
        assert_eq!(c.family, AlertFamily::Dependency);
        assert_eq!(c.severity, Severity::Critical);
    }

    #[test]
    fn test_unknown_tool_without_severity() {
        let c = classify(&row(Some("weird-custom-tool"), None, None)).unwrap();
        assert_eq!(c.family, AlertFamily::StaticAnalysis);
        assert_eq!(c.severity, Severity::Low);
    }

    #[test]
    fn test_secret_row_is_pinned_to_critical() {
        for severity in [None, Some("low"), Some("medium"), Some("garbage")] {
            let c = classify(&row(Some("secret-scanning"), severity, Some("AWS Key"))).unwrap();
            assert_eq!(c.family, AlertFamily::Secret);
            assert_eq!(c.severity, Severity::Critical);
            assert_eq!(c.secret_type.as_deref(), Some("AWS Key"));
        }
    }

    #[test]
    fn test_secret_row_without_type() {
        let c = classify(&row(Some("secret-scanning"), None, None)).unwrap();
        assert!(c.secret_type.is_none());

        let c = classify(&row(Some("secret-scanning"), None, Some(""))).unwrap();
        assert!(c.secret_type.is_none());
    }

    #[test]
    fn test_secret_type_ignored_for_other_families() {
        let c = classify(&row(Some("codeql"), Some("medium"), Some("AWS Key"))).unwrap();
        assert!(c.secret_type.is_none());
    }
}
