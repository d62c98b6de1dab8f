//! Conformance checks for BTLx documents.

mod validate;

pub use validate::*;
