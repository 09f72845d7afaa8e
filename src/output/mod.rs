//! Report records and their console, JSON and Markdown renderers

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, ReportGenerator};
pub use report::Report;
