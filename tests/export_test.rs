//! Tests for export rendering and file writing.

use std::sync::Arc;

use chrono::NaiveDate;

use maintenix::history::{
    ExportDocument, ExportFormat, ExportMeta, HistoryExporter, HistoryView,
};
use maintenix::models::{Record, RecordKind};
use maintenix::store::InMemoryStore;

fn meta() -> ExportMeta {
    ExportMeta {
        user: "Jane Doe (jdoe)".to_string(),
        export_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        filter_description: "No filters applied - showing all data".to_string(),
    }
}

fn request(subject: &str, detail: &str) -> Record {
    Record::new(RecordKind::EquipmentRequest, "jdoe", subject, detail)
}

fn report(subject: &str, detail: &str) -> Record {
    Record::new(RecordKind::MaintenanceReport, "jdoe", subject, detail)
}

/// Minimal CSV scanner over the whole document, enough to verify escaping.
/// Record-aware: a newline inside a quoted field stays in the field instead
/// of starting a new record.
fn parse_csv_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                records.push(std::mem::take(&mut fields));
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        records.push(fields);
    }
    records
}

#[test]
fn test_csv_escapes_commas_quotes_and_newlines_exactly() {
    let awkward = request("Desk, standing\n(adjustable)", "says \"wobbly\"");
    let csv = HistoryExporter::render(&[awkward], &[], &meta(), ExportFormat::Csv).unwrap();

    let records = parse_csv_records(&csv);
    let fields = records
        .iter()
        .find(|r| r.len() == 5 && r[0].starts_with("Desk"))
        .expect("data record present");
    assert_eq!(fields[0], "Desk, standing\n(adjustable)");
    assert_eq!(fields[1], "says \"wobbly\"");
    assert_eq!(fields[2], "low");
    assert_eq!(fields[3], "pending");
}

#[test]
fn test_csv_omits_empty_sections() {
    let csv =
        HistoryExporter::render(&[], &[report("Leak", "Lab 2")], &meta(), ExportFormat::Csv)
            .unwrap();
    assert!(!csv.contains("Equipment Requests"));
    assert!(csv.contains("Maintenance Reports\nIssue,Location,Priority,Status,Created Date\n"));
    assert!(csv.starts_with("# Maintenix History Export\n"));
}

#[test]
fn test_json_round_trips_through_export_document() {
    let json = HistoryExporter::render(
        &[request("Laptop", "Dev machine")],
        &[report("Leak", "Lab 2")],
        &meta(),
        ExportFormat::Json,
    )
    .unwrap();

    let document: ExportDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(document.export_info.user, "Jane Doe (jdoe)");
    assert_eq!(document.export_info.export_date, "Feb 01, 2025");
    assert_eq!(document.equipment_requests.len(), 1);
    assert_eq!(document.equipment_requests[0].item_name, "Laptop");
    assert_eq!(document.maintenance_reports[0].issue, "Leak");
    assert_eq!(document.maintenance_reports[0].location, "Lab 2");
}

#[test]
fn test_json_with_special_characters_stays_valid() {
    let json = HistoryExporter::render(
        &[request("Line\nbreak", "quote \" and \\ backslash")],
        &[],
        &meta(),
        ExportFormat::Json,
    )
    .unwrap();

    let document: ExportDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(document.equipment_requests[0].item_name, "Line\nbreak");
    assert_eq!(
        document.equipment_requests[0].description,
        "quote \" and \\ backslash"
    );
}

#[test]
fn test_txt_numbered_sections_and_omission() {
    let txt = HistoryExporter::render(
        &[request("Laptop", "Dev machine"), request("Monitor", "Spare")],
        &[],
        &meta(),
        ExportFormat::Txt,
    )
    .unwrap();

    assert!(txt.starts_with("MAINTENIX HISTORY EXPORT\n========================\n\n"));
    assert!(txt.contains("EQUIPMENT REQUESTS (2)\n"));
    assert!(txt.contains("1. Laptop\n   Description: Dev machine\n"));
    assert!(txt.contains("2. Monitor\n"));
    assert!(!txt.contains("MAINTENANCE REPORTS"));
}

#[tokio::test]
async fn test_write_to_file_creates_complete_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");

    HistoryExporter::write_to_file(&path, "# Maintenix History Export\n")
        .await
        .unwrap();

    let written = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(written, "# Maintenix History Export\n");
    assert!(!dir.path().join("export.csv.tmp").exists());
}

#[tokio::test]
async fn test_write_to_file_failure_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("export.csv");

    let result = HistoryExporter::write_to_file(&path, "content").await;
    assert!(result.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_failed_export_removes_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    // Destination is an existing directory: the temp file gets written,
    // then the rename into place fails.
    let path = dir.path().join("export.csv");
    tokio::fs::create_dir(&path).await.unwrap();

    let result = HistoryExporter::write_to_file(&path, "content").await;
    assert!(result.is_err());
    assert!(!dir.path().join("export.csv.tmp").exists());
}

#[tokio::test]
async fn test_view_export_to_file_end_to_end() {
    let store = InMemoryStore::new();
    store.insert_request(request("Laptop", "Dev machine"));
    let mut view = HistoryView::new(Arc::new(store));
    view.set_user_label("Jane Doe (jdoe)");
    view.load("jdoe").await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    view.export_to_file(&path, ExportFormat::Json).await.unwrap();

    let written = tokio::fs::read_to_string(&path).await.unwrap();
    let document: ExportDocument = serde_json::from_str(&written).unwrap();
    assert_eq!(document.equipment_requests.len(), 1);
    assert_eq!(document.export_info.user, "Jane Doe (jdoe)");
}
