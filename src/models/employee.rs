//! Employee directory record.
//!
//! The employee directory is owned by an external subsystem; the engine reads
//! it to resolve site membership and display names.

use serde::{Deserialize, Serialize};

/// A row from the external employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name shown in attendance views.
    pub display_name: String,
    /// The site the employee belongs to.
    pub site_id: String,
    /// Whether the employee is currently active.
    pub active: bool,
}
