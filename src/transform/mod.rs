//! Contour processing.

mod contour;

pub use contour::*;
