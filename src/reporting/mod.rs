pub mod export;
pub mod formatter;
pub mod projection;

pub use export::{render_report, report_filename, write_report};
pub use formatter::render_document;
pub use projection::{project, ReportView};
