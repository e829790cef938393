//! Aggregation engine and report generator for GitHub Advanced Security
//! alert exports.
//!
//! The flow is `ingest -> pipeline -> reporting`: a CSV export is parsed into
//! [`models::RawAlertRecord`]s, folded into a ranked [`models::ReportSummary`],
//! then projected through display options and rendered.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod reporting;
