//! Coordinate triple used for every point and direction in a BTLx document.

use crate::config::float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

/// A point (or direction) in document length units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin `(0, 0, 0)`.
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Check that all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Length when the coordinate is read as a vector.
    pub fn norm(&self) -> f64 {
        self.distance_to(&Coordinate::origin())
    }

    /// Component-wise comparison within `EPS`.
    pub fn approx_eq(&self, other: &Coordinate) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_norm() {
        let a = Coordinate::new(1.0, 2.0, 2.0);
        assert_eq!(a.norm(), 3.0);
        assert_eq!(a.distance_to(&Coordinate::new(1.0, 2.0, 7.0)), 5.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Coordinate::origin().is_finite());
        assert!(!Coordinate::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Coordinate::new(0.0, 0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_approx_eq() {
        let a = Coordinate::new(1620.74, 1073.13, 0.0);
        assert!(a.approx_eq(&Coordinate::new(1620.74001, 1073.13, 0.0)));
        assert!(!a.approx_eq(&Coordinate::new(1964.64, 1073.13, 0.0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(10.0, 0.5, -2.0).to_string(), "(10, 0.5, -2)");
    }
}
