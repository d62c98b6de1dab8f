//! Binding of the BTLx element tree to the document model.

use crate::config::DEFAULT_INCLINATION;
use crate::error::{ConvertError, Result};
use crate::model::{
    Contour, Document, MillingOperation, Part, Primitive, Project, Transformation,
};
use std::path::Path;
use tracing::debug;

use super::elements::{read_tree, Element};

/// Parse a BTLx document from a string.
pub fn parse_btlx_str(xml: &str) -> Result<Document> {
    let root = read_tree(xml)?;
    bind_document(&root)
}

/// Parse a BTLx document from raw bytes.
pub fn parse_btlx_bytes(bytes: &[u8]) -> Result<Document> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let xml = std::str::from_utf8(bytes).map_err(|e| ConvertError::Xml {
        position: e.valid_up_to() as u64,
        message: format!("invalid UTF-8: {}", e),
    })?;
    parse_btlx_str(xml)
}

/// Parse a BTLx file from a path.
pub fn parse_btlx_file(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ConvertError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    parse_btlx_bytes(&bytes)
}

fn bind_document(root: &Element) -> Result<Document> {
    if root.name != "BTLx" {
        return Err(ConvertError::UnexpectedRoot {
            found: root.name.clone(),
        });
    }

    let project = bind_project(root.required_child("Project")?)?;

    Ok(Document {
        version: root.attr("Version").unwrap_or_default().trim().to_string(),
        language: root.attr("Language").map(str::to_string),
        project,
    })
}

fn bind_project(element: &Element) -> Result<Project> {
    let mut project = Project {
        name: element.attr("Name").unwrap_or_default().to_string(),
        parts: Vec::new(),
    };

    if let Some(parts) = element.child("Parts") {
        for part in parts.children_named("Part") {
            project.parts.push(bind_part(part)?);
        }
    }

    Ok(project)
}

fn bind_part(element: &Element) -> Result<Part> {
    let mut part = Part::new(element.attr("Designation").unwrap_or_default());
    part.single_member_number = element.opt_u32_attr("SingleMemberNumber")?;

    if let Some(transformations) = element.child("Transformations") {
        for transformation in transformations.children_named("Transformation") {
            part.transformations
                .push(bind_transformation(transformation)?);
        }
    }

    if let Some(processings) = element.child("Processings") {
        for processing in &processings.children {
            match processing.child("Contour") {
                Some(contour) => part
                    .milling_operations
                    .push(bind_milling_operation(processing, contour)?),
                None => debug!(
                    "Part '{}': skipping <{}> without contour",
                    part.designation, processing.name
                ),
            }
        }
    }

    debug!(
        "Parsed part '{}': {} transformation(s), {} contour(s)",
        part.designation,
        part.transformations.len(),
        part.milling_operations.len()
    );

    Ok(part)
}

fn bind_transformation(element: &Element) -> Result<Transformation> {
    let position = element.required_child("Position")?;

    Ok(Transformation {
        guid: element.attr("GUID").map(str::to_string),
        reference_point: position.required_child("ReferencePoint")?.coordinate()?,
        x_vector: position.required_child("XVector")?.coordinate()?,
        y_vector: position
            .child("YVector")
            .map(Element::coordinate)
            .transpose()?,
    })
}

fn bind_milling_operation(processing: &Element, contour: &Element) -> Result<MillingOperation> {
    Ok(MillingOperation {
        kind: processing.name.clone(),
        name: processing.attr("Name").unwrap_or_default().to_string(),
        reference_plane_id: processing.opt_u32_attr("ReferencePlaneID")?,
        contour: bind_contour(contour)?,
    })
}

fn bind_contour(element: &Element) -> Result<Contour> {
    let mut contour = Contour::new(element.required_child("StartPoint")?.coordinate()?);

    for child in &element.children {
        let primitive = match child.name.as_str() {
            "StartPoint" => continue,
            "Arc" => Primitive::arc(
                child.required_child("EndPoint")?.coordinate()?,
                child.required_child("PointOnArc")?.coordinate()?,
                inclination(child)?,
            ),
            "Line" => Primitive::line(
                child.required_child("EndPoint")?.coordinate()?,
                inclination(child)?,
            ),
            other => Primitive::Unrecognized {
                element: other.to_string(),
            },
        };
        contour.primitives.push(primitive);
    }

    Ok(contour)
}

fn inclination(element: &Element) -> Result<f64> {
    Ok(element
        .opt_f64_attr("Inclination")?
        .unwrap_or(DEFAULT_INCLINATION))
}
