use clap::{Parser, Subcommand, Args};

use crate::config::ReportFormat;

#[derive(Parser)]
#[command(name = "ghas-report", version, about = "Summarize GitHub Advanced Security alert exports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the executive summary of an alert export
    Summarize(SummarizeArgs),
    /// Generate a report document from an alert export
    Report(ReportArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct SummarizeArgs {
    /// CSV alert export
    pub input: String,

    /// Print the full summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// CSV alert export
    pub input: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format: markdown, html, json
    #[arg(short, long)]
    pub format: Option<ReportFormat>,

    /// Output directory for the report
    #[arg(short, long)]
    pub output: Option<String>,

    /// Number of repositories shown in limited breakdowns
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Show complete repository lists in every section
    #[arg(long)]
    pub full: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
