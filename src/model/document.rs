//! Document root: the project and its parts.

use super::Part;
use crate::config::SchemaVersion;
use serde::{Deserialize, Serialize};

/// The project described by a BTLx file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub parts: Vec<Part>,
}

/// A parsed BTLx document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Raw `Version` attribute of the root element.
    pub version: String,
    /// `Language` attribute of the root element.
    pub language: Option<String>,
    pub project: Project,
}

impl Document {
    /// Schema revision, if the version string is a known one.
    pub fn schema_version(&self) -> Option<SchemaVersion> {
        SchemaVersion::from_version_str(&self.version)
    }

    pub fn parts(&self) -> &[Part] {
        &self.project.parts
    }

    /// Total number of milling operations across all parts.
    pub fn contour_count(&self) -> usize {
        self.parts()
            .iter()
            .map(|part| part.milling_operations.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contour, Coordinate, MillingOperation};

    #[test]
    fn test_contour_count() {
        let mut part_a = Part::new("Rafter");
        part_a.milling_operations.push(MillingOperation {
            kind: "FreeContour".to_string(),
            name: "Outline".to_string(),
            reference_plane_id: Some(1),
            contour: Contour::new(Coordinate::origin()),
        });
        part_a.milling_operations.push(MillingOperation::default());

        let document = Document {
            version: "2.0".to_string(),
            language: None,
            project: Project {
                name: "Demo".to_string(),
                parts: vec![part_a, Part::new("Post")],
            },
        };

        assert_eq!(document.contour_count(), 2);
        assert_eq!(document.parts().len(), 2);
        assert_eq!(document.schema_version(), Some(SchemaVersion::V2_0));
    }

    #[test]
    fn test_unknown_schema_version() {
        let document = Document {
            version: "9.9".to_string(),
            ..Default::default()
        };
        assert_eq!(document.schema_version(), None);
    }
}
