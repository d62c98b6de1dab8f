//! Segment report for a decomposed document.

use crate::model::{Coordinate, Document, LineSegment, MillingOperation, Part, Transformation};
use crate::transform::{decompose_operation, Anomaly};
use serde::Serialize;
use std::fmt;

use super::format::{format_coord, format_point};

/// Decomposition of one milling operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationReport {
    pub kind: String,
    pub name: String,
    pub reference_plane_id: Option<u32>,
    pub start_point: Coordinate,
    pub segments: Vec<LineSegment>,
    pub arcs_skipped: usize,
    pub anomalies: Vec<Anomaly>,
}

/// Placements and decomposed operations of one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartReport {
    pub designation: String,
    pub transformations: Vec<Transformation>,
    pub operations: Vec<OperationReport>,
}

/// Report over a whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub version: String,
    pub project: String,
    pub parts: Vec<PartReport>,
}

impl Report {
    /// Total number of segments across all operations.
    pub fn segment_count(&self) -> usize {
        self.parts
            .iter()
            .flat_map(|p| &p.operations)
            .map(|op| op.segments.len())
            .sum()
    }

    /// Total number of anomalies across all operations.
    pub fn anomaly_count(&self) -> usize {
        self.parts
            .iter()
            .flat_map(|p| &p.operations)
            .map(|op| op.anomalies.len())
            .sum()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Decompose every contour in a document and collect the results.
pub fn build_report(document: &Document) -> Report {
    Report {
        version: document.version.clone(),
        project: document.project.name.clone(),
        parts: document.parts().iter().map(build_part_report).collect(),
    }
}

fn build_part_report(part: &Part) -> PartReport {
    PartReport {
        designation: part.designation.clone(),
        transformations: part.transformations.clone(),
        operations: part
            .milling_operations()
            .iter()
            .map(build_operation_report)
            .collect(),
    }
}

fn build_operation_report(operation: &MillingOperation) -> OperationReport {
    let decomposition = decompose_operation(operation);
    OperationReport {
        kind: operation.kind.clone(),
        name: operation.name.clone(),
        reference_plane_id: operation.reference_plane_id,
        start_point: operation.contour.start_point,
        segments: decomposition.segments,
        arcs_skipped: decomposition.arcs_skipped,
        anomalies: decomposition.anomalies,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BTLx {} project '{}'", self.version, self.project)?;

        for part in &self.parts {
            writeln!(f, "Part '{}'", part.designation)?;

            for (idx, t) in part.transformations.iter().enumerate() {
                writeln!(
                    f,
                    "  Transformation {}: reference point {}, x-vector {}",
                    idx + 1,
                    format_point(&t.reference_point),
                    format_point(&t.x_vector)
                )?;
            }

            for op in &part.operations {
                write!(f, "  {} '{}'", op.kind, op.name)?;
                if let Some(plane) = op.reference_plane_id {
                    write!(f, " (reference plane {})", plane)?;
                }
                writeln!(f, ", start {}", format_point(&op.start_point))?;

                for (idx, segment) in op.segments.iter().enumerate() {
                    writeln!(
                        f,
                        "    {}: {} -> {} incl={}",
                        idx + 1,
                        format_point(&segment.start_point),
                        format_point(&segment.end_point),
                        format_coord(segment.inclination)
                    )?;
                }
                if op.arcs_skipped > 0 {
                    writeln!(f, "    {} arc(s) skipped", op.arcs_skipped)?;
                }
                for anomaly in &op.anomalies {
                    writeln!(f, "    ! {}", anomaly)?;
                }
            }
        }

        Ok(())
    }
}
