use crate::cli::commands::ReportArgs;
use crate::config::{self, DisplayOptions, ReportConfig, ReportFormat};
use crate::errors::ReportError;
use crate::ingest;
use crate::models::alert::AlertFamily;
use crate::pipeline;
use crate::reporting;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_OUTPUT_DIR: &str = "./reports";

pub async fn handle_report(args: ReportArgs) -> Result<(), ReportError> {
    info!(input = %args.input, "Generating security report");

    // Parse config file if provided
    let file_config = if let Some(config_path) = &args.config {
        Some(config::parse_config(&PathBuf::from(config_path)).await?)
    } else {
        None
    };

    let settings = build_report_settings(&args, file_config.as_ref())?;

    let alerts = ingest::load_alerts(&PathBuf::from(&args.input)).await?;
    let summary = pipeline::aggregate(&alerts)?;

    let path = reporting::write_report(&settings.output_dir, &summary, &settings.display, settings.format).await?;
    println!("{}", path.display());

    Ok(())
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub display: DisplayOptions,
    pub format: ReportFormat,
    pub output_dir: PathBuf,
}

pub fn build_report_settings(
    args: &ReportArgs,
    file_config: Option<&ReportConfig>,
) -> Result<ReportSettings, ReportError> {
    let mut display = file_config
        .and_then(|c| c.display.clone())
        .unwrap_or_default();

    if let Some(top_n) = args.top_n {
        if top_n == 0 {
            return Err(ReportError::Config("--top-n must be at least 1".into()));
        }
        display.top_n = top_n;
    }

    if args.full {
        for family in AlertFamily::ALL {
            display.section_mut(family).top_only = false;
        }
    }

    let output = file_config.and_then(|c| c.output.as_ref());
    let format = args.format
        .or_else(|| output.and_then(|o| o.format))
        .unwrap_or_default();
    let output_dir = args.output.clone()
        .or_else(|| output.and_then(|o| o.directory.clone()))
        .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

    Ok(ReportSettings {
        display,
        format,
        output_dir: PathBuf::from(output_dir),
    })
}
