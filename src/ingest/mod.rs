use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::ReportError;
use crate::models::alert::RawAlertRecord;

/// Exports larger than this are rejected before reading.
const MAX_EXPORT_BYTES: u64 = 64 * 1024 * 1024;

/// Parse a CSV alert export with a header row.
///
/// Unknown columns are ignored and blank lines are skipped. Ragged rows and
/// invalid UTF-8 are structural failures reported as [`ReportError::Parse`].
pub fn parse_alerts<R: Read>(reader: R) -> Result<Vec<RawAlertRecord>, ReportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let columns = rdr.headers().map_err(parse_error)?.len();
    debug!(columns, "Read CSV header");

    let mut alerts = Vec::new();
    for result in rdr.deserialize::<RawAlertRecord>() {
        alerts.push(result.map_err(parse_error)?);
    }
    Ok(alerts)
}

/// Read and parse an alert export from disk.
pub async fn load_alerts(path: &Path) -> Result<Vec<RawAlertRecord>, ReportError> {
    if !path.exists() {
        return Err(ReportError::Input(format!("file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_EXPORT_BYTES {
        return Err(ReportError::Input(format!(
            "file exceeds {}MB limit: {}",
            MAX_EXPORT_BYTES / (1024 * 1024),
            path.display()
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let alerts = parse_alerts(bytes.as_slice())?;
    info!(path = %path.display(), rows = alerts.len(), "Loaded alert export");
    Ok(alerts)
}

fn parse_error(err: csv::Error) -> ReportError {
    match err.position() {
        Some(pos) => ReportError::Parse(format!("line {}: {}", pos.line(), err)),
        None => ReportError::Parse(err.to_string()),
    }
}
