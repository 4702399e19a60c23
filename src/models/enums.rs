//! Canonical priority and status buckets.
//!
//! Raw priority/status strings are preserved verbatim on [`crate::models::Record`]
//! for display; filtering, styling and aggregation always go through the
//! canonicalization functions here so bucket definitions cannot drift between
//! components.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Canonical request/report priority.
///
/// Absent or unrecognized raw values bucket as `Low`, the same default the
/// store applies when a record is created without a priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Map a raw stored value to its canonical bucket.
    pub fn canonicalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }

    /// Uppercase display form (badges, stats labels).
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    /// Lowercase storage form.
    pub fn storage(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Canonical status bucket for business logic and styling.
///
/// `approved`, `active` and `resolved` are completed-equivalent; `rejected`
/// and `failed` are cancelled-equivalent. Absent or unrecognized values
/// bucket as `Pending` while the raw string survives for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum StatusBucket {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl StatusBucket {
    /// Map a raw stored value to its canonical bucket.
    pub fn canonicalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "in progress" | "in_progress" | "processing" => StatusBucket::InProgress,
            "approved" | "active" | "resolved" | "completed" => StatusBucket::Completed,
            "cancelled" | "rejected" | "failed" => StatusBucket::Cancelled,
            _ => StatusBucket::Pending,
        }
    }

    /// Whether this bucket counts as resolved for inactive-count purposes.
    pub fn is_completed_equivalent(&self) -> bool {
        matches!(self, StatusBucket::Completed)
    }

    /// Lowercase storage form of the bucket itself.
    pub fn storage(&self) -> &'static str {
        match self {
            StatusBucket::Pending => "pending",
            StatusBucket::InProgress => "in_progress",
            StatusBucket::Completed => "completed",
            StatusBucket::Cancelled => "cancelled",
        }
    }
}
