//! Report generation for decomposed documents.

mod format;
mod report;

pub use format::{format_coord, format_point};
pub use report::{build_report, OperationReport, PartReport, Report};
