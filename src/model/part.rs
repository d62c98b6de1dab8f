//! Timber parts and their placements.

use super::{Coordinate, MillingOperation};
use serde::{Deserialize, Serialize};

/// Placement of a part: reference point and axis directions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transformation {
    /// Value of the `GUID` attribute.
    pub guid: Option<String>,
    pub reference_point: Coordinate,
    /// Direction of the part's local x axis.
    pub x_vector: Coordinate,
    /// Direction of the part's local y axis (optional in the schema).
    pub y_vector: Option<Coordinate>,
}

impl Transformation {
    /// Create a transformation without GUID or y axis.
    pub fn new(reference_point: Coordinate, x_vector: Coordinate) -> Self {
        Self {
            reference_point,
            x_vector,
            ..Default::default()
        }
    }
}

/// A single timber member.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    /// Free-text designation. Not guaranteed to be unique.
    pub designation: String,
    /// Value of the `SingleMemberNumber` attribute.
    pub single_member_number: Option<u32>,
    pub transformations: Vec<Transformation>,
    pub milling_operations: Vec<MillingOperation>,
}

impl Part {
    /// Create an empty part.
    pub fn new(designation: impl Into<String>) -> Self {
        Self {
            designation: designation.into(),
            ..Default::default()
        }
    }

    pub fn transformations(&self) -> &[Transformation] {
        &self.transformations
    }

    pub fn milling_operations(&self) -> &[MillingOperation] {
        &self.milling_operations
    }
}
