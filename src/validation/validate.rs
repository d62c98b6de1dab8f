//! Conformance checks for parsed BTLx documents.
//!
//! These are the schema rules that matter for contour decomposition. Errors
//! mark a document that does not conform; warnings mark content that is legal
//! but probably not what the author meant.

use crate::config::{float_cmp, ValidationConfig};
use crate::error::{ConvertError, Result};
use crate::model::{Contour, Coordinate, Document, Part, Primitive};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }

    /// All messages as log lines, errors first.
    pub fn to_log(&self) -> String {
        let mut log = String::new();
        for err in &self.errors {
            log.push_str("ERROR: ");
            log.push_str(err);
            log.push('\n');
        }
        for warning in &self.warnings {
            log.push_str("WARNING: ");
            log.push_str(warning);
            log.push('\n');
        }
        log
    }
}

/// Validate a whole document.
pub fn validate_document(document: &Document, config: &ValidationConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    match document.schema_version() {
        Some(_) => {}
        None if document.version.is_empty() => {
            result.add_error("BTLx: Missing Version attribute");
        }
        None if config.allow_unknown_version => {
            result.add_warning(format!(
                "BTLx: Unknown schema version '{}'",
                document.version
            ));
        }
        None => {
            result.add_error(format!(
                "BTLx: Unsupported schema version '{}'",
                document.version
            ));
        }
    }

    if document.parts().is_empty() {
        result.add_warning("Project: No parts defined");
    }

    for (idx, part) in document.parts().iter().enumerate() {
        result.merge(validate_part(part, idx + 1, config));
    }

    result
}

/// Validate a single part.
pub fn validate_part(part: &Part, part_num: usize, config: &ValidationConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let label = format!("Part {}", part_num);

    if part.designation.trim().is_empty() {
        result.add_warning(format!("{}: Missing designation", label));
    }

    if part.transformations.is_empty() {
        result.add_warning(format!("{}: No transformations defined", label));
    }

    for (idx, transformation) in part.transformations.iter().enumerate() {
        let t_label = format!("{}, Transformation {}", label, idx + 1);
        check_finite(&mut result, &t_label, "ReferencePoint", &transformation.reference_point);
        check_finite(&mut result, &t_label, "XVector", &transformation.x_vector);
        if float_cmp::approx_zero(transformation.x_vector.norm()) {
            result.add_error(format!("{}: XVector has zero length", t_label));
        }
        if let Some(y_vector) = &transformation.y_vector {
            check_finite(&mut result, &t_label, "YVector", y_vector);
        }
    }

    for (idx, operation) in part.milling_operations.iter().enumerate() {
        let op_label = format!("{}, {} {} '{}'", label, operation.kind, idx + 1, operation.name);
        result.merge(validate_contour(&operation.contour, &op_label, config));
    }

    result
}

/// Validate the primitives of a contour.
pub fn validate_contour(
    contour: &Contour,
    label: &str,
    config: &ValidationConfig,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    check_finite(&mut result, label, "StartPoint", &contour.start_point);

    if contour.is_empty() {
        result.add_warning(format!("{}: Contour has no lines or arcs", label));
    }

    let mut previous = contour.start_point;
    for (idx, primitive) in contour.primitives.iter().enumerate() {
        let p_label = format!("{}, Primitive {}", label, idx + 1);

        if let Some(inclination) = primitive.inclination() {
            if !float_cmp::in_range(inclination, config.inclination_min, config.inclination_max) {
                result.add_error(format!(
                    "{}: Inclination {} outside [{}, {}]",
                    p_label, inclination, config.inclination_min, config.inclination_max
                ));
            }
        }

        match primitive {
            Primitive::Arc(arc) => {
                check_finite(&mut result, &p_label, "EndPoint", &arc.end_point);
                check_finite(&mut result, &p_label, "PointOnArc", &arc.point_on_arc);
                if arc.point_on_arc.approx_eq(&previous) || arc.point_on_arc.approx_eq(&arc.end_point)
                {
                    result.add_error(format!(
                        "{}: PointOnArc coincides with an arc end point",
                        p_label
                    ));
                }
                previous = arc.end_point;
            }
            Primitive::Line(line) => {
                check_finite(&mut result, &p_label, "EndPoint", &line.end_point);
                previous = line.end_point;
            }
            Primitive::Unrecognized { element } => {
                result.add_warning(format!("{}: Unrecognized primitive <{}>", p_label, element));
            }
        }
    }

    result
}

fn check_finite(result: &mut ValidationResult, label: &str, field: &str, point: &Coordinate) {
    if !point.is_finite() {
        result.add_error(format!("{}: {} is not finite {}", label, field, point));
    }
}

/// Validate a document and turn a failure into an error.
///
/// The error carries the full diagnostic log so callers can still persist it.
pub fn quick_validate(document: &Document, config: &ValidationConfig) -> Result<ValidationResult> {
    let result = validate_document(document, config);

    if !result.passed {
        return Err(ConvertError::SchemaViolation {
            count: result.errors.len(),
            first: result.errors.first().cloned().unwrap_or_default(),
            log: result.to_log(),
        });
    }

    Ok(result)
}
