//! Data model types for BTLx documents.

mod contour;
mod coordinate;
mod document;
mod part;
mod primitive;

pub use contour::{Contour, MillingOperation};
pub use coordinate::Coordinate;
pub use document::{Document, Project};
pub use part::{Part, Transformation};
pub use primitive::{ArcElement, LineElement, LineSegment, Primitive, PrimitiveKind};
