use std::path::Path;
use crate::errors::ReportError;
use crate::models::alert::AlertFamily;
use super::types::ReportConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<ReportConfig, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(ReportError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse and validate configuration from YAML text.
pub fn parse_config_str(content: &str) -> Result<ReportConfig, ReportError> {
    // An empty document is a valid, all-defaults config
    if content.trim().is_empty() {
        return Ok(ReportConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: ReportConfig = serde_yaml::from_value(yaml)?;

    // Semantic checks
    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ReportError> {
    // Convert YAML value to JSON for schema validation
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| ReportError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ReportError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only: unknown keys and type slips are reported, serde has the final say
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Reject settings that cannot produce a sensible report.
fn validate_conflicts(config: &ReportConfig) -> Result<(), ReportError> {
    if let Some(display) = &config.display {
        if display.top_n == 0 {
            return Err(ReportError::Config("display.top_n must be at least 1".into()));
        }

        for family in AlertFamily::ALL {
            let section = display.section(family);
            if section.top_only && !section.show_by_repository {
                warn!(section = %family, "top_only has no effect while show_by_repository is disabled");
            }
        }
    }

    Ok(())
}
