use serde::{Deserialize, Serialize};

use crate::models::alert::AlertFamily;

/// Default number of repositories shown when a breakdown is limited.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    pub display: Option<DisplayOptions>,
    pub output: Option<OutputConfig>,
}

/// Which report sections are shown, per family.
///
/// These flags only filter the rendered report; they never change counts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub top_n: usize,
    pub code_scanning: SectionOptions,
    pub dependabot: SectionOptions,
    pub secret_scanning: SectionOptions,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            code_scanning: SectionOptions::default(),
            dependabot: SectionOptions::default(),
            secret_scanning: SectionOptions::default(),
        }
    }
}

impl DisplayOptions {
    pub fn section(&self, family: AlertFamily) -> &SectionOptions {
        match family {
            AlertFamily::StaticAnalysis => &self.code_scanning,
            AlertFamily::Dependency => &self.dependabot,
            AlertFamily::Secret => &self.secret_scanning,
        }
    }

    pub fn section_mut(&mut self, family: AlertFamily) -> &mut SectionOptions {
        match family {
            AlertFamily::StaticAnalysis => &mut self.code_scanning,
            AlertFamily::Dependency => &mut self.dependabot,
            AlertFamily::Secret => &mut self.secret_scanning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SectionOptions {
    /// Show the severity histogram (the total-alerts table for secret scanning).
    pub show_severity: bool,
    /// Show the per-repository breakdown.
    pub show_by_repository: bool,
    /// Limit the breakdown to the top `top_n` repositories.
    pub top_only: bool,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            show_severity: true,
            show_by_repository: true,
            top_only: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub format: Option<ReportFormat>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{}' (expected markdown, html or json)", other)),
        }
    }
}
