use serde::{Deserialize, Serialize};

/// Tool identifier used by secret scanning rows.
pub const SECRET_SCANNING_TOOL: &str = "secret-scanning";
/// Tool identifier used by dependency alert rows.
pub const DEPENDABOT_TOOL: &str = "dependabot";

/// One row of the alert export, keyed by the CSV header names.
///
/// Every column is optional at the type level; missing values are handled
/// by the classifier rather than rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAlertRecord {
    #[serde(rename = "Repository", default)]
    pub repository: Option<String>,
    #[serde(rename = "Tool", default)]
    pub tool: Option<String>,
    #[serde(rename = "Alert Number", default)]
    pub alert_number: Option<String>,
    #[serde(rename = "Severity", default)]
    pub severity: Option<String>,
    #[serde(rename = "Created At", default)]
    pub created_at: Option<String>,
    #[serde(rename = "Secret Type", default)]
    pub secret_type: Option<String>,
    #[serde(rename = "GHSA ID", default)]
    pub ghsa_id: Option<String>,
    #[serde(rename = "Ecosystem", default)]
    pub ecosystem: Option<String>,
    #[serde(rename = "Package", default)]
    pub package: Option<String>,
}

impl RawAlertRecord {
    /// Repository full name, or an empty string when the column is missing.
    pub fn repository_name(&self) -> &str {
        self.repository.as_deref().unwrap_or("")
    }
}

/// The scanner family an alert row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertFamily {
    StaticAnalysis,
    Dependency,
    Secret,
}

impl AlertFamily {
    /// All families in report order.
    pub const ALL: [AlertFamily; 3] = [
        AlertFamily::StaticAnalysis,
        AlertFamily::Secret,
        AlertFamily::Dependency,
    ];

    /// Map a tool name to its family. Unknown tools fall through to static analysis.
    pub fn from_tool(tool: &str) -> Self {
        match tool.to_lowercase().as_str() {
            SECRET_SCANNING_TOOL => AlertFamily::Secret,
            DEPENDABOT_TOOL => AlertFamily::Dependency,
            _ => AlertFamily::StaticAnalysis,
        }
    }

    /// Heading used for this family in rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StaticAnalysis => "Code Scanning",
            Self::Dependency => "Dependabot",
            Self::Secret => "Secret Scanning",
        }
    }
}

impl std::fmt::Display for AlertFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity level of an alert, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// All severities from most to least severe.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Normalize a free-text label. Anything unrecognized resolves to `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one counted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub family: AlertFamily,
    pub severity: Severity,
    /// Secret type label, only set for secret rows with a non-empty value.
    pub secret_type: Option<String>,
}
