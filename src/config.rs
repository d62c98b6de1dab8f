//! Configuration constants and settings for BTLx processing.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Lowest inclination accepted by the BTLx schema, in degrees.
pub const INCLINATION_MIN: f64 = -89.9;

/// Highest inclination accepted by the BTLx schema, in degrees.
pub const INCLINATION_MAX: f64 = 89.9;

/// Inclination bound to a line or arc that omits the attribute.
pub const DEFAULT_INCLINATION: f64 = 0.0;

/// Published BTLx schema revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVersion {
    V1_0,
    V1_1,
    V2_0,
}

impl SchemaVersion {
    /// Parse the `Version` attribute of the root element.
    ///
    /// Patch levels are accepted, so `2.0.0` maps to [`SchemaVersion::V2_0`].
    pub fn from_version_str(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('.');
        let major = parts.next()?.parse::<u32>().ok()?;
        let minor = parts.next().unwrap_or("0").parse::<u32>().ok()?;
        match (major, minor) {
            (1, 0) => Some(SchemaVersion::V1_0),
            (1, 1) => Some(SchemaVersion::V1_1),
            (2, 0) => Some(SchemaVersion::V2_0),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVersion::V1_0 => write!(f, "1.0"),
            SchemaVersion::V1_1 => write!(f, "1.1"),
            SchemaVersion::V2_0 => write!(f, "2.0"),
        }
    }
}

/// Settings for the conformance check.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Treat an unknown `Version` attribute as a warning instead of an error.
    pub allow_unknown_version: bool,
    /// Lowest accepted inclination.
    pub inclination_min: f64,
    /// Highest accepted inclination.
    pub inclination_max: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allow_unknown_version: true,
            inclination_min: INCLINATION_MIN,
            inclination_max: INCLINATION_MAX,
        }
    }
}

/// Settings for the whole read/validate/decompose pipeline.
#[derive(Debug, Clone, Default)]
pub struct ProcessConfig {
    /// Abort when the conformance check fails.
    pub strict: bool,
    /// Conformance check settings.
    pub validation: ValidationConfig,
}

impl ProcessConfig {
    /// Create a configuration with the given strictness.
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            ..Default::default()
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version_parsing() {
        assert_eq!(SchemaVersion::from_version_str("1.1"), Some(SchemaVersion::V1_1));
        assert_eq!(SchemaVersion::from_version_str("2.0.0"), Some(SchemaVersion::V2_0));
        assert_eq!(SchemaVersion::from_version_str(" 1 "), Some(SchemaVersion::V1_0));
        assert_eq!(SchemaVersion::from_version_str("3.2"), None);
        assert_eq!(SchemaVersion::from_version_str("one"), None);
        assert_eq!(SchemaVersion::from_version_str(""), None);
    }

    #[test]
    fn test_schema_version_display() {
        assert_eq!(SchemaVersion::V2_0.to_string(), "2.0");
    }

    #[test]
    fn test_float_cmp() {
        assert!(float_cmp::approx_eq(1.0, 1.00001));
        assert!(!float_cmp::approx_eq(1.0, 1.001));
        assert!(float_cmp::approx_zero(-0.00001));
        assert!(float_cmp::in_range(89.9, INCLINATION_MIN, INCLINATION_MAX));
        assert!(!float_cmp::in_range(90.0, INCLINATION_MIN, INCLINATION_MAX));
    }

    #[test]
    fn test_process_config_defaults() {
        let config = ProcessConfig::default();
        assert!(!config.strict);
        assert!(config.validation.allow_unknown_version);
        assert!(ProcessConfig::new(true).strict);
    }
}
