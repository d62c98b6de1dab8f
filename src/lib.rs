//! btlx-contour - Contour decomposition for BTLx timber processing files.
//!
//! This library reads BTLx documents (the XML exchange format of CNC timber
//! machinery), checks them against the schema rules relevant to machining,
//! and turns every contour of every part into an ordered chain of line
//! segments for toolpath generation.
//!
//! # Example
//!
//! ```no_run
//! use btlx_contour::{decompose, parse_btlx_file};
//! use std::path::Path;
//!
//! let document = parse_btlx_file(Path::new("input.btlx")).unwrap();
//! for part in document.parts() {
//!     for operation in part.milling_operations() {
//!         for segment in decompose(operation.contour()) {
//!             println!("{}", segment);
//!         }
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use config::{ProcessConfig, SchemaVersion, ValidationConfig};
pub use error::{ConvertError, ErrorKind, Result};
pub use generator::{build_report, Report};
pub use model::{
    Contour, Coordinate, Document, LineSegment, MillingOperation, Part, Primitive, Transformation,
};
pub use parser::{parse_btlx_bytes, parse_btlx_file, parse_btlx_str};
pub use transform::{decompose, decompose_with_report, Decomposition};
pub use validation::{quick_validate, validate_document, ValidationResult};

use tracing::{info, warn};

/// Everything produced for one input file.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub document: Document,
    pub validation: ValidationResult,
    pub report: Report,
}

/// Run the full pipeline on a BTLx file.
///
/// 1. Read and parse the file
/// 2. Check schema conformance
/// 3. Decompose every contour
///
/// Conformance failures are logged and processing continues, unless
/// `config.strict` is set, in which case they abort with
/// [`ConvertError::SchemaViolation`].
pub fn process_btlx_file(input_path: &std::path::Path, config: &ProcessConfig) -> Result<ProcessOutcome> {
    let document = parse_btlx_file(input_path)?;
    process_document(document, config)
}

/// Run validation and decomposition on an already parsed document.
///
/// In strict mode a failed check returns [`ConvertError::SchemaViolation`],
/// whose `log` field holds the diagnostics that would otherwise be in
/// [`ProcessOutcome::validation`].
pub fn process_document(document: Document, config: &ProcessConfig) -> Result<ProcessOutcome> {
    let validation = if config.strict {
        quick_validate(&document, &config.validation)?
    } else {
        validate_document(&document, &config.validation)
    };

    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    for err in &validation.errors {
        warn!("Schema: {}", err);
    }

    let report = build_report(&document);
    info!(
        "Decomposed {} contour(s) into {} segment(s)",
        document.contour_count(),
        report.segment_count()
    );

    Ok(ProcessOutcome {
        document,
        validation,
        report,
    })
}
