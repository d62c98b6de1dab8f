//! Contour primitives and the line segments produced from them.

use super::Coordinate;
use serde::{Deserialize, Serialize};

/// Straight edge of a contour, from the running position to `end_point`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    /// End of the edge.
    pub end_point: Coordinate,
    /// Tool inclination in degrees.
    pub inclination: f64,
}

/// Circular arc of a contour, through `point_on_arc` to `end_point`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcElement {
    /// End of the arc.
    pub end_point: Coordinate,
    /// Tool inclination in degrees.
    pub inclination: f64,
    /// Any point on the arc between its start and end.
    pub point_on_arc: Coordinate,
}

/// Discriminant of a [`Primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Line,
    Arc,
    Unrecognized,
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveKind::Line => write!(f, "line"),
            PrimitiveKind::Arc => write!(f, "arc"),
            PrimitiveKind::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// One element of a contour.
///
/// In the XML schema an arc is a line with extra fields. Here every value has
/// exactly one variant, so an arc can never be taken for a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    Line(LineElement),
    Arc(ArcElement),
    /// Contour child that is neither a line nor an arc. Carries no geometry.
    Unrecognized { element: String },
}

impl Primitive {
    /// Create a line primitive.
    pub fn line(end_point: Coordinate, inclination: f64) -> Self {
        Primitive::Line(LineElement {
            end_point,
            inclination,
        })
    }

    /// Create an arc primitive.
    pub fn arc(end_point: Coordinate, point_on_arc: Coordinate, inclination: f64) -> Self {
        Primitive::Arc(ArcElement {
            end_point,
            inclination,
            point_on_arc,
        })
    }

    /// Get the discriminant.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Line(_) => PrimitiveKind::Line,
            Primitive::Arc(_) => PrimitiveKind::Arc,
            Primitive::Unrecognized { .. } => PrimitiveKind::Unrecognized,
        }
    }

    /// End point, if the primitive has geometry.
    pub fn end_point(&self) -> Option<Coordinate> {
        match self {
            Primitive::Line(line) => Some(line.end_point),
            Primitive::Arc(arc) => Some(arc.end_point),
            Primitive::Unrecognized { .. } => None,
        }
    }

    /// Inclination, if the primitive has geometry.
    pub fn inclination(&self) -> Option<f64> {
        match self {
            Primitive::Line(line) => Some(line.inclination),
            Primitive::Arc(arc) => Some(arc.inclination),
            Primitive::Unrecognized { .. } => None,
        }
    }
}

/// Straight segment of a decomposed contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start_point: Coordinate,
    pub end_point: Coordinate,
    /// Tool inclination in degrees.
    pub inclination: f64,
}

impl LineSegment {
    /// Create a new segment.
    pub fn new(start_point: Coordinate, end_point: Coordinate, inclination: f64) -> Self {
        Self {
            start_point,
            end_point,
            inclination,
        }
    }
}

impl std::fmt::Display for LineSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} incl={}",
            self.start_point, self.end_point, self.inclination
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_kind_is_exclusive() {
        let line = Primitive::line(Coordinate::new(10.0, 0.0, 0.0), 0.0);
        let arc = Primitive::arc(
            Coordinate::new(15.0, 5.0, 0.0),
            Coordinate::new(13.5, 1.5, 0.0),
            0.0,
        );

        assert_eq!(line.kind(), PrimitiveKind::Line);
        assert_eq!(arc.kind(), PrimitiveKind::Arc);
        assert_ne!(line.kind(), arc.kind());
    }

    #[test]
    fn test_unrecognized_has_no_geometry() {
        let other = Primitive::Unrecognized {
            element: "Spline".to_string(),
        };
        assert_eq!(other.kind(), PrimitiveKind::Unrecognized);
        assert_eq!(other.end_point(), None);
        assert_eq!(other.inclination(), None);
    }

    #[test]
    fn test_accessors() {
        let arc = Primitive::arc(Coordinate::new(1.0, 2.0, 3.0), Coordinate::origin(), 12.5);
        assert_eq!(arc.end_point(), Some(Coordinate::new(1.0, 2.0, 3.0)));
        assert_eq!(arc.inclination(), Some(12.5));
    }

    #[test]
    fn test_segment_display() {
        let segment = LineSegment::new(
            Coordinate::new(1620.74, 1073.13, 0.0),
            Coordinate::new(1964.64, 1073.13, 0.0),
            0.0,
        );
        assert_eq!(
            segment.to_string(),
            "(1620.74, 1073.13, 0) -> (1964.64, 1073.13, 0) incl=0"
        );
    }

    #[test]
    fn test_primitive_serializes_with_type_tag() {
        let line = Primitive::line(Coordinate::new(1.0, 0.0, 0.0), 0.0);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "Line");
        assert_eq!(json["end_point"]["x"], 1.0);
    }
}
