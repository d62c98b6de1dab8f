//! Contour decomposition into line segments.
//!
//! A contour is walked in document order while a running position is carried
//! from one primitive to the next:
//! 1. Lines emit a segment from the running position to their end point
//! 2. Arcs emit nothing but move the running position to their end point
//! 3. Unrecognized primitives are recorded and leave the position unchanged

use crate::model::{Contour, LineSegment, MillingOperation, Part, Primitive};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

/// Contour child that could not be decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Position of the primitive in the contour.
    pub index: usize,
    /// Element name of the primitive.
    pub element: String,
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized primitive <{}> at index {}",
            self.element, self.index
        )
    }
}

/// Result of decomposing one contour.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decomposition {
    /// Segments in input order.
    pub segments: Vec<LineSegment>,
    /// Primitives that were neither lines nor arcs.
    pub anomalies: Vec<Anomaly>,
    /// Number of arcs passed over.
    pub arcs_skipped: usize,
}

impl Decomposition {
    /// Check the segments against the contour they came from.
    ///
    /// Each segment must start at the end of the nearest preceding line or
    /// arc (or at the contour start) and end at its own line's end point.
    /// Arcs between two lines therefore leave a gap between adjacent
    /// segments without breaking continuity of position.
    pub fn is_continuous(&self, contour: &Contour) -> bool {
        let mut position = contour.start_point;
        let mut segments = self.segments.iter();

        for primitive in &contour.primitives {
            if let Primitive::Line(line) = primitive {
                match segments.next() {
                    Some(s) if s.start_point == position && s.end_point == line.end_point => {}
                    _ => return false,
                }
            }
            if let Some(end) = primitive.end_point() {
                position = end;
            }
        }

        segments.next().is_none()
    }
}

/// Decompose a contour into its line segments.
///
/// Anomalies are reported through `tracing` and otherwise dropped; use
/// [`decompose_with_report`] to inspect them.
pub fn decompose(contour: &Contour) -> Vec<LineSegment> {
    let decomposition = decompose_with_report(contour);
    for anomaly in &decomposition.anomalies {
        warn!("Skipping {}", anomaly);
    }
    decomposition.segments
}

/// Decompose a contour and keep track of skipped and unrecognized primitives.
pub fn decompose_with_report(contour: &Contour) -> Decomposition {
    let mut current = contour.start_point;
    let mut result = Decomposition {
        segments: Vec::with_capacity(contour.primitives.len()),
        ..Default::default()
    };

    for (index, primitive) in contour.primitives.iter().enumerate() {
        match primitive {
            // Arcs are matched before lines and never produce a segment.
            Primitive::Arc(arc) => {
                current = arc.end_point;
                result.arcs_skipped += 1;
            }
            Primitive::Line(line) => {
                result
                    .segments
                    .push(LineSegment::new(current, line.end_point, line.inclination));
                current = line.end_point;
            }
            Primitive::Unrecognized { element } => {
                result.anomalies.push(Anomaly {
                    index,
                    element: element.clone(),
                });
            }
        }
    }

    result
}

/// Decompose the contour of a milling operation.
pub fn decompose_operation(operation: &MillingOperation) -> Decomposition {
    let span = debug_span!("decompose", kind = %operation.kind, name = %operation.name);
    let _enter = span.enter();

    let decomposition = decompose_with_report(operation.contour());
    debug_assert!(decomposition.is_continuous(operation.contour()));
    for anomaly in &decomposition.anomalies {
        warn!("Skipping {}", anomaly);
    }
    debug!(
        "{} segment(s), {} arc(s) skipped",
        decomposition.segments.len(),
        decomposition.arcs_skipped
    );
    decomposition
}

/// Decompose every milling operation of a part.
///
/// Each entry pairs the operation index with its decomposition.
pub fn decompose_part(part: &Part) -> Vec<(usize, Decomposition)> {
    part.milling_operations()
        .iter()
        .enumerate()
        .map(|(idx, operation)| (idx, decompose_operation(operation)))
        .collect()
}
