//! Number formatting for text output.

use crate::model::Coordinate;

/// Format a coordinate value, trimming trailing zeros but keeping one decimal.
pub fn format_coord(value: f64) -> String {
    // -0.0 + 0.0 == +0.0
    let s = format!("{:.6}", value + 0.0);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s.is_empty() || s == "-" || s == "-0" {
        "0.0".to_string()
    } else if !s.contains('.') {
        format!("{}.0", s)
    } else {
        s.to_string()
    }
}

/// Format a point as `(x, y, z)`.
pub fn format_point(point: &Coordinate) -> String {
    format!(
        "({}, {}, {})",
        format_coord(point.x),
        format_coord(point.y),
        format_coord(point.z)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(10.0), "10.0");
        assert_eq!(format_coord(0.0), "0.0");
        assert_eq!(format_coord(-0.0), "0.0");
        assert_eq!(format_coord(1620.74), "1620.74");
        assert_eq!(format_coord(-12.5), "-12.5");
        assert_eq!(format_coord(1.0000004), "1.0");
        assert_eq!(format_coord(0.1234567), "0.123457");
    }

    #[test]
    fn test_format_point() {
        assert_eq!(
            format_point(&Coordinate::new(15.0, 5.0, -0.25)),
            "(15.0, 5.0, -0.25)"
        );
    }
}
