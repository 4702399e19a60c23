//! History export formats and file writing
//!
//! Serializes a (requests, reports, metadata) triple into CSV, JSON or TXT
//! text. Rendering is pure and read-only over its inputs; file writing goes
//! through a temp-file-plus-rename so a failed export never leaves a
//! truncated file that looks successful.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::history::error::{HistoryError, HistoryResult};
use crate::models::{format_date, Record};

/// Export format for history data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ExportFormat {
    Csv,
    Json,
    Txt,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Txt => "text/plain",
        }
    }
}

/// Metadata carried in every export header.
#[derive(Debug, Clone)]
pub struct ExportMeta {
    /// Display form of the exporting user, e.g. `Jane Doe (jdoe)`
    pub user: String,
    pub export_date: NaiveDate,
    /// Human-readable description of the active filters
    pub filter_description: String,
}

/// JSON export body. Public so consumers (and round-trip tests) can parse
/// an export back into typed form.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub export_info: ExportInfo,
    pub equipment_requests: Vec<ExportedRequest>,
    pub maintenance_reports: Vec<ExportedReport>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportInfo {
    pub user: String,
    pub export_date: String,
    pub filters: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportedRequest {
    pub item_name: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportedReport {
    pub issue: String,
    pub location: String,
    pub priority: String,
    pub status: String,
    pub created_date: String,
}

/// History exporter
pub struct HistoryExporter;

impl HistoryExporter {
    /// Render the filtered result set in the requested format.
    pub fn render(
        requests: &[Record],
        reports: &[Record],
        meta: &ExportMeta,
        format: ExportFormat,
    ) -> HistoryResult<String> {
        match format {
            ExportFormat::Csv => Ok(Self::render_csv(requests, reports, meta)),
            ExportFormat::Json => Self::render_json(requests, reports, meta),
            ExportFormat::Txt => Ok(Self::render_txt(requests, reports, meta)),
        }
    }

    /// Write rendered export text to `path`.
    ///
    /// The payload goes to a sibling temp file first and is renamed into
    /// place, so the destination either holds the complete export or is left
    /// untouched. The temp file is removed on failure.
    pub async fn write_to_file(path: &Path, content: &str) -> HistoryResult<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        if let Err(e) = fs::write(&tmp, content.as_bytes()).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(HistoryError::ExportFailed(format!(
                "failed to write {}: {e}",
                tmp.display()
            )));
        }

        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(HistoryError::ExportFailed(format!(
                "failed to move export into place at {}: {e}",
                path.display()
            )));
        }

        Ok(())
    }

    fn render_csv(requests: &[Record], reports: &[Record], meta: &ExportMeta) -> String {
        let mut out = String::new();
        out.push_str("# Maintenix History Export\n");
        out.push_str(&format!("# User: {}\n", meta.user));
        out.push_str(&format!("# Export Date: {}\n", format_date(meta.export_date)));
        out.push_str(&format!("# Filters: {}\n\n", meta.filter_description));

        if !requests.is_empty() {
            out.push_str("Equipment Requests\n");
            out.push_str("Item Name,Description,Priority,Status,Created Date\n");
            for record in requests {
                out.push_str(&Self::csv_row(record));
            }
            out.push('\n');
        }

        if !reports.is_empty() {
            out.push_str("Maintenance Reports\n");
            out.push_str("Issue,Location,Priority,Status,Created Date\n");
            for record in reports {
                out.push_str(&Self::csv_row(record));
            }
        }

        out
    }

    fn csv_row(record: &Record) -> String {
        format!(
            "{},{},{},{},{}\n",
            csv_field(&record.subject),
            csv_field(&record.detail),
            csv_field(&record.priority),
            csv_field(&record.status),
            csv_field(&record.created_label()),
        )
    }

    fn render_json(
        requests: &[Record],
        reports: &[Record],
        meta: &ExportMeta,
    ) -> HistoryResult<String> {
        let document = ExportDocument {
            export_info: ExportInfo {
                user: meta.user.clone(),
                export_date: format_date(meta.export_date),
                filters: meta.filter_description.clone(),
            },
            equipment_requests: requests
                .iter()
                .map(|record| ExportedRequest {
                    item_name: record.subject.clone(),
                    description: record.detail.clone(),
                    priority: record.priority.clone(),
                    status: record.status.clone(),
                    created_date: record.created_label(),
                })
                .collect(),
            maintenance_reports: reports
                .iter()
                .map(|record| ExportedReport {
                    issue: record.subject.clone(),
                    location: record.detail.clone(),
                    priority: record.priority.clone(),
                    status: record.status.clone(),
                    created_date: record.created_label(),
                })
                .collect(),
        };

        serde_json::to_string_pretty(&document)
            .map_err(|e| HistoryError::SerializationFailed(e.to_string()))
    }

    fn render_txt(requests: &[Record], reports: &[Record], meta: &ExportMeta) -> String {
        let mut out = String::new();
        out.push_str("MAINTENIX HISTORY EXPORT\n");
        out.push_str("========================\n\n");
        out.push_str(&format!("User: {}\n", meta.user));
        out.push_str(&format!("Export Date: {}\n", format_date(meta.export_date)));
        out.push_str(&format!("Filters: {}\n\n", meta.filter_description));

        if !requests.is_empty() {
            out.push_str(&format!("EQUIPMENT REQUESTS ({})\n", requests.len()));
            out.push_str("==================\n\n");
            for (i, record) in requests.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, record.subject));
                out.push_str(&format!("   Description: {}\n", record.detail));
                out.push_str(&format!("   Priority: {}\n", record.priority));
                out.push_str(&format!("   Status: {}\n", record.status));
                out.push_str(&format!("   Created: {}\n\n", record.created_label()));
            }
        }

        if !reports.is_empty() {
            out.push_str(&format!("MAINTENANCE REPORTS ({})\n", reports.len()));
            out.push_str("===================\n\n");
            for (i, record) in reports.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, record.subject));
                out.push_str(&format!("   Location: {}\n", record.detail));
                out.push_str(&format!("   Priority: {}\n", record.priority));
                out.push_str(&format!("   Status: {}\n", record.status));
                out.push_str(&format!("   Created: {}\n\n", record.created_label()));
            }
        }

        out
    }
}

/// Quote a CSV field unconditionally, doubling internal quotes.
///
/// Every field is quoted, not just ones containing the delimiter, so the
/// layout stays fixed and the header round-trips through standard parsers.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
