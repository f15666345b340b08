//! Staff record types for personnel tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default employment status for new staff records.
///
/// Status is stored as free-form lowercase strings ("active", "on leave",
/// "terminated") to match the records the admin screens write.
pub const STAFF_STATUS_ACTIVE: &str = "active";

/// One employee of the dyeing workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
	/// Opaque unique identifier assigned by the persistence layer.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Job title, e.g. "Dye technician".
	pub position: String,
	/// Department, e.g. "Production", "QA", "Logistics".
	pub department: String,
	/// Contact email.
	pub email: String,
	/// Contact phone number, free text.
	pub phone: String,
	/// Date the employee joined.
	pub join_date: DateTime<Utc>,
	/// Employment status, defaults to "active" on creation.
	pub status: String,
}
