//! Error types for BTLx reading and contour processing.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for BTLx processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// File could not be read (-3)
    ReadFailed = -3,
    /// XML is not well-formed (-10)
    MalformedXml = -10,
    /// Document does not match the BTLx structure (-11)
    InvalidStructure = -11,
    /// Schema conformance check failed (E100)
    SchemaViolation = 100,
}

/// Failure class, used by callers to decide whether to abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input could not be accessed at all.
    InputAccess,
    /// The bytes are not a readable BTLx document.
    MalformedDocument,
    /// The document was read but does not conform to the schema rules.
    SchemaNonconformance,
}

/// Main error type for BTLx processing.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("XML syntax error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("Unexpected root element <{found}>, expected <BTLx>")]
    UnexpectedRoot { found: String },

    #[error("Missing required element <{element}> in <{parent}>")]
    MissingElement { parent: String, element: String },

    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("Invalid value for '{field}': expected {expected}, got '{value}'")]
    InvalidValue {
        field: String,
        expected: String,
        value: String,
    },

    /// `log` holds the full diagnostic listing, one line per message.
    #[error("Schema validation failed with {count} error(s): {first}")]
    SchemaViolation {
        count: usize,
        first: String,
        log: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConvertError::FileNotFound { .. } => ErrorCode::FileNotFound,
            ConvertError::EmptyFile { .. } => ErrorCode::EmptyFile,
            ConvertError::Io(_) => ErrorCode::ReadFailed,
            ConvertError::Xml { .. } => ErrorCode::MalformedXml,
            ConvertError::UnexpectedRoot { .. }
            | ConvertError::MissingElement { .. }
            | ConvertError::MissingAttribute { .. }
            | ConvertError::InvalidValue { .. } => ErrorCode::InvalidStructure,
            ConvertError::SchemaViolation { .. } => ErrorCode::SchemaViolation,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Classify the failure.
    pub fn kind(&self) -> ErrorKind {
        match self.code() {
            ErrorCode::FileNotFound | ErrorCode::EmptyFile | ErrorCode::ReadFailed => {
                ErrorKind::InputAccess
            }
            ErrorCode::MalformedXml | ErrorCode::InvalidStructure => ErrorKind::MalformedDocument,
            ErrorCode::SchemaViolation => ErrorKind::SchemaNonconformance,
        }
    }

    pub(crate) fn invalid_value(
        field: impl Into<String>,
        expected: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        ConvertError::InvalidValue {
            field: field.into(),
            expected: expected.into(),
            value: value.into(),
        }
    }

    pub(crate) fn missing_element(parent: &str, element: &str) -> Self {
        ConvertError::MissingElement {
            parent: parent.to_string(),
            element: element.to_string(),
        }
    }
}

/// Result type alias for BTLx operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        let missing = ConvertError::FileNotFound {
            path: PathBuf::from("input.btlx"),
        };
        assert_eq!(missing.kind(), ErrorKind::InputAccess);
        assert_eq!(missing.code_value(), -1);

        let xml = ConvertError::Xml {
            position: 12,
            message: "unexpected end".to_string(),
        };
        assert_eq!(xml.kind(), ErrorKind::MalformedDocument);

        let structure = ConvertError::missing_element("Contour", "StartPoint");
        assert_eq!(structure.code(), ErrorCode::InvalidStructure);
        assert_eq!(structure.kind(), ErrorKind::MalformedDocument);

        let schema = ConvertError::SchemaViolation {
            count: 2,
            first: "Inclination out of range".to_string(),
            log: String::new(),
        };
        assert_eq!(schema.kind(), ErrorKind::SchemaNonconformance);
        assert_eq!(schema.code_value(), 100);
    }

    #[test]
    fn test_error_messages() {
        let err = ConvertError::invalid_value("Line@Inclination", "a number", "steep");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'Line@Inclination': expected a number, got 'steep'"
        );

        let err = ConvertError::missing_element("Arc", "PointOnArc");
        assert_eq!(
            err.to_string(),
            "Missing required element <PointOnArc> in <Arc>"
        );
    }
}
