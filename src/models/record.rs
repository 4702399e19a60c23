use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::models::{Priority, StatusBucket};

/// Which collection a record came from.
///
/// Equipment requests and maintenance reports are structurally identical for
/// pipeline purposes; the kind only selects field naming in exports and the
/// type criterion in filters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum RecordKind {
    EquipmentRequest,
    MaintenanceReport,
}

impl RecordKind {
    /// Field name of the subject column for this kind.
    pub fn subject_field(&self) -> &'static str {
        match self {
            RecordKind::EquipmentRequest => "item_name",
            RecordKind::MaintenanceReport => "issue",
        }
    }

    /// Field name of the detail column for this kind.
    pub fn detail_field(&self) -> &'static str {
        match self {
            RecordKind::EquipmentRequest => "description",
            RecordKind::MaintenanceReport => "location",
        }
    }
}

/// Binary attachment metadata, opaque to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    /// Base64-encoded payload, passed through unchanged.
    pub data: String,
}

/// A single equipment request or maintenance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Opaque unique identifier (string form of a store object id)
    pub id: String,

    /// Submitting staff member; never mutated by the pipeline
    pub owner_id: String,

    /// Source collection
    pub kind: RecordKind,

    /// `item_name` for requests, `issue` for reports
    pub subject: String,

    /// `description` for requests, `location` for reports
    pub detail: String,

    /// Raw priority value, preserved verbatim for display
    pub priority: String,

    /// Raw status value, preserved verbatim for display
    pub status: String,

    /// Creation timestamp; absent values sort last and fail date-range filters
    pub created_at: Option<DateTime<Utc>>,

    /// Optional attachment, opaque pass-through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Record {
    /// Create a new record with the store's creation defaults
    /// (status `pending`, priority `low`, created now).
    pub fn new(
        kind: RecordKind,
        owner_id: impl Into<String>,
        subject: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            kind,
            subject: subject.into(),
            detail: detail.into(),
            priority: Priority::Low.storage().to_string(),
            status: StatusBucket::Pending.storage().to_string(),
            created_at: Some(Utc::now()),
            attachment: None,
        }
    }

    /// Convert a raw schemaless document into a `Record`.
    ///
    /// This is the single seam where malformed-record recovery happens:
    /// missing ids get a fresh uuid, missing text fields become empty
    /// strings, missing priority/status take the creation defaults and
    /// unparseable timestamps become `None`. A partial record is always
    /// preferable to dropping it silently.
    pub fn from_document(kind: RecordKind, doc: &Value) -> Self {
        let id = read_id(doc.get("_id"))
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let owner_id = read_id(doc.get("staff_name")).unwrap_or_default();

        let subject = read_string(doc, kind.subject_field()).unwrap_or_default();
        let detail = read_string(doc, kind.detail_field()).unwrap_or_default();
        let priority = read_string(doc, "priority")
            .unwrap_or_else(|| Priority::Low.storage().to_string());
        let status = read_string(doc, "status")
            .unwrap_or_else(|| StatusBucket::Pending.storage().to_string());
        let created_at = doc.get("created_at").and_then(read_timestamp);

        let attachment = doc.get("image").and_then(|image| {
            Some(Attachment {
                filename: read_string(image, "filename")?,
                content_type: read_string(image, "content_type")?,
                data: read_string(image, "data")?,
            })
        });

        Self {
            id,
            owner_id,
            kind,
            subject,
            detail,
            priority,
            status,
            created_at,
            attachment,
        }
    }

    /// Canonical priority bucket of the raw priority value.
    pub fn priority_bucket(&self) -> Priority {
        Priority::canonicalize(&self.priority)
    }

    /// Canonical status bucket of the raw status value.
    pub fn status_bucket(&self) -> StatusBucket {
        StatusBucket::canonicalize(&self.status)
    }

    /// Whether this record counts as resolved (completed-equivalent status).
    pub fn is_completed(&self) -> bool {
        self.status_bucket().is_completed_equivalent()
    }

    /// Local calendar date of the creation timestamp.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.created_at
            .map(|ts| ts.with_timezone(&Local).date_naive())
    }

    /// Display form of the creation date, `"Unknown"` when absent.
    pub fn created_label(&self) -> String {
        match self.local_date() {
            Some(date) => format_date(date),
            None => "Unknown".to_string(),
        }
    }
}

/// Canonical `Mon DD, YYYY` textual date form used across exports.
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

fn read_string(doc: &Value, key: &str) -> Option<String> {
    doc.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

/// Object ids appear either as plain strings or as `{"$oid": "..."}`.
fn read_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("$oid").and_then(Value::as_str).map(String::from),
        _ => None,
    }
}

/// Timestamps appear as RFC 3339 strings, epoch milliseconds, or the
/// extended-JSON `{"$date": ...}` wrapper around either.
fn read_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Object(map) => map.get("$date").and_then(read_timestamp),
        _ => None,
    }
}
