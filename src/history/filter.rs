//! Multi-criteria record filtering

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::models::{format_date, Record};

/// Which record kinds the history view shows.
///
/// Applied by the view assembler, not by [`FilterCriteria::matches`]: it
/// selects which of the two input lists survive at all.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[strum(ascii_case_insensitive)]
pub enum TypeSelection {
    #[default]
    All,
    Requests,
    Reports,
}

/// The current multi-field filter selection.
///
/// The default value is the identity filter: no status, priority or date
/// constraint, both record kinds visible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Record-kind selection, applied at the view level
    #[serde(default)]
    pub type_selection: TypeSelection,

    /// Case-insensitive exact match against the raw status; `None` = All
    pub status: Option<String>,

    /// Case-insensitive exact match against the raw priority; `None` = All
    pub priority: Option<String>,

    /// Inclusive lower bound on the local calendar date
    pub start_date: Option<NaiveDate>,

    /// Inclusive upper bound on the local calendar date
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, selection: TypeSelection) -> Self {
        self.type_selection = selection;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Restore the identity filter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether this criteria matches everything.
    pub fn is_identity(&self) -> bool {
        self.type_selection == TypeSelection::All
            && self.status.is_none()
            && self.priority.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Whether a single record satisfies the status/priority/date criteria.
    ///
    /// Status and priority compare case-insensitively against the raw stored
    /// value, so filtering by a value outside the canonical sets still works.
    /// Records without a timestamp cannot satisfy a range constraint and are
    /// excluded whenever at least one bound is set. An inverted range
    /// (start after end) matches nothing.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(ref status) = self.status {
            if !record.status.eq_ignore_ascii_case(status) {
                return false;
            }
        }

        if let Some(ref priority) = self.priority {
            if !record.priority.eq_ignore_ascii_case(priority) {
                return false;
            }
        }

        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(date) = record.local_date() else {
                return false;
            };
            if let Some(start) = self.start_date {
                if date < start {
                    return false;
                }
            }
            if let Some(end) = self.end_date {
                if date > end {
                    return false;
                }
            }
        }

        true
    }

    /// Human-readable description of the active filters, used in export
    /// metadata and the filter-status message.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();

        if self.type_selection != TypeSelection::All {
            parts.push(format!("Type: {}", self.type_selection));
        }
        if let Some(ref status) = self.status {
            parts.push(format!("Status: {status}"));
        }
        if let Some(ref priority) = self.priority {
            parts.push(format!("Priority: {priority}"));
        }
        if let Some(start) = self.start_date {
            parts.push(format!("From: {}", format_date(start)));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("To: {}", format_date(end)));
        }

        if parts.is_empty() {
            "No filters applied - showing all data".to_string()
        } else {
            format!("Active filters: {}", parts.join(", "))
        }
    }
}

/// Apply a filter criteria to a record list. Pure: inputs are untouched.
pub fn filter_records(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
