//! Contours and the milling operations that own them.

use super::{Coordinate, Primitive, PrimitiveKind};
use serde::{Deserialize, Serialize};

/// Boundary of a machining operation: a start point and its primitives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contour {
    /// Seed of the segment chain.
    pub start_point: Coordinate,
    /// Primitives in document order.
    pub primitives: Vec<Primitive>,
}

impl Contour {
    /// Create a contour with no primitives.
    pub fn new(start_point: Coordinate) -> Self {
        Self {
            start_point,
            primitives: Vec::new(),
        }
    }

    /// Builder-style append.
    pub fn with(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Count primitives of one kind.
    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.primitives.iter().filter(|p| p.kind() == kind).count()
    }

    /// Position reached after the last primitive with geometry.
    pub fn end_point(&self) -> Coordinate {
        self.primitives
            .iter()
            .rev()
            .find_map(Primitive::end_point)
            .unwrap_or(self.start_point)
    }

    /// Check whether the contour returns to its start point.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.end_point().approx_eq(&self.start_point)
    }
}

/// A processing that mills along a contour.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MillingOperation {
    /// Processing element name, e.g. `FreeContour`.
    pub kind: String,
    /// Value of the `Name` attribute.
    pub name: String,
    /// Value of the `ReferencePlaneID` attribute.
    pub reference_plane_id: Option<u32>,
    pub contour: Contour,
}

impl MillingOperation {
    pub fn contour(&self) -> &Contour {
        &self.contour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Contour {
        Contour::new(Coordinate::origin())
            .with(Primitive::line(Coordinate::new(10.0, 0.0, 0.0), 0.0))
            .with(Primitive::line(Coordinate::new(10.0, 10.0, 0.0), 0.0))
            .with(Primitive::arc(
                Coordinate::new(0.0, 10.0, 0.0),
                Coordinate::new(5.0, 12.0, 0.0),
                0.0,
            ))
            .with(Primitive::line(Coordinate::origin(), 0.0))
    }

    #[test]
    fn test_counts() {
        let contour = square();
        assert_eq!(contour.len(), 4);
        assert_eq!(contour.count(PrimitiveKind::Line), 3);
        assert_eq!(contour.count(PrimitiveKind::Arc), 1);
        assert_eq!(contour.count(PrimitiveKind::Unrecognized), 0);
    }

    #[test]
    fn test_closed_contour() {
        assert!(square().is_closed());
        assert!(!Contour::new(Coordinate::origin()).is_closed());
    }

    #[test]
    fn test_end_point_skips_unrecognized() {
        let contour = Contour::new(Coordinate::origin())
            .with(Primitive::line(Coordinate::new(4.0, 0.0, 0.0), 0.0))
            .with(Primitive::Unrecognized {
                element: "Spline".to_string(),
            });
        assert_eq!(contour.end_point(), Coordinate::new(4.0, 0.0, 0.0));
        assert!(!contour.is_closed());
    }
}
