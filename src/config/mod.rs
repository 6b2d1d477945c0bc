//! Detection configuration for the Attendance Reconciliation Engine.
//!
//! This module provides the [`DetectionConfig`] type holding the named
//! detection constants (tolerance, rounding precision) and an optional
//! YAML loader for per-deployment overrides.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Default grace window, in minutes, below which a timing deviation is not
/// considered an incident.
pub const DEFAULT_TOLERANCE_MINUTES: i64 = 5;

/// Default number of decimal places used when rounding late minutes to hours.
pub const DEFAULT_HOURS_PRECISION: u32 = 2;

/// Tunable constants for incident detection.
///
/// Every value has a default matching the franchise-wide policy; a YAML file
/// can override them per deployment without a code change.
///
/// # Example
///
/// ```
/// use attendance_engine::config::DetectionConfig;
///
/// let config = DetectionConfig::default();
/// assert_eq!(config.tolerance_minutes, 5);
/// assert_eq!(config.hours_precision, 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Grace window in minutes for late arrivals and early departures.
    pub tolerance_minutes: i64,
    /// Decimal places used when converting late minutes to hours.
    pub hours_precision: u32,
    /// Label stamped into `created_by` on auto-detected incidents.
    pub created_by: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            tolerance_minutes: DEFAULT_TOLERANCE_MINUTES,
            hours_precision: DEFAULT_HOURS_PRECISION,
            created_by: "attendance-engine".to_string(),
        }
    }
}

impl DetectionConfig {
    /// Loads configuration overrides from a YAML file.
    ///
    /// Missing keys fall back to their defaults, so a file may override a
    /// single value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file does not exist and
    /// [`EngineError::ConfigParseError`] if it contains invalid YAML.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::DetectionConfig;
    ///
    /// let config = DetectionConfig::load("./config/detection.yaml")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
