//! End-to-end tests for the history pipeline: load, filter, sort, stats.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use maintenix::error::{AppError, Result};
use maintenix::history::{FilterCriteria, HistoryView, TypeSelection, ViewState};
use maintenix::models::{Record, RecordKind};
use maintenix::store::{HistoryStore, InMemoryStore};

/// Helper to create a request with a fixed creation time.
fn request_at(owner: &str, subject: &str, created_at: Option<DateTime<Utc>>) -> Record {
    let mut record = Record::new(RecordKind::EquipmentRequest, owner, subject, "detail");
    record.created_at = created_at;
    record
}

fn report_at(owner: &str, subject: &str, created_at: Option<DateTime<Utc>>) -> Record {
    let mut record = Record::new(RecordKind::MaintenanceReport, owner, subject, "detail");
    record.created_at = created_at;
    record
}

fn at(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Some(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap())
}

fn seeded_store() -> Arc<InMemoryStore> {
    let store = InMemoryStore::new();

    let mut old = request_at("alice", "Old laptop", at(2024, 3, 10));
    old.status = "approved".to_string();
    old.priority = "high".to_string();
    store.insert_request(old);

    store.insert_request(request_at("alice", "New monitor", at(2025, 1, 15)));
    store.insert_request(request_at("alice", "Undated chair", None));
    store.insert_report(report_at("alice", "Roof leak", at(2025, 1, 20)));

    // Another owner's record must never show up.
    store.insert_request(request_at("bob", "Keyboard", at(2025, 1, 1)));

    Arc::new(store)
}

/// Store whose fetches always fail, for degradation tests.
struct FailingStore;

#[async_trait]
impl HistoryStore for FailingStore {
    async fn fetch_requests_by_owner(&self, _owner_id: &str) -> Result<Vec<Record>> {
        Err(AppError::Store("connection refused".to_string()))
    }

    async fn fetch_reports_by_owner(&self, _owner_id: &str) -> Result<Vec<Record>> {
        Err(AppError::Store("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_load_scopes_to_owner() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    let snapshot = view.snapshot();
    assert_eq!(snapshot.requests.len(), 3);
    assert_eq!(snapshot.reports.len(), 1);
    assert!(snapshot.requests.iter().all(|r| r.subject != "Keyboard"));
}

#[tokio::test]
async fn test_fetch_failure_degrades_to_empty_view() {
    let mut view = HistoryView::new(Arc::new(FailingStore));
    view.load("alice").await;

    assert_eq!(view.state(), ViewState::Loaded);
    let snapshot = view.snapshot();
    assert!(snapshot.requests.is_empty());
    assert!(snapshot.reports.is_empty());
    assert_eq!(view.stats().total, 0);
}

#[tokio::test]
async fn test_snapshot_sorted_newest_first_nulls_last() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    let snapshot = view.snapshot();
    let subjects: Vec<&str> = snapshot
        .requests
        .iter()
        .map(|r| r.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["New monitor", "Old laptop", "Undated chair"]);
}

#[tokio::test]
async fn test_type_selection_zeroes_out_other_list() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    view.set_filter(FilterCriteria::new().with_type(TypeSelection::Reports));
    let snapshot = view.snapshot();
    assert!(snapshot.requests.is_empty());
    assert_eq!(snapshot.reports.len(), 1);
}

#[tokio::test]
async fn test_status_filter_matches_raw_value_case_insensitively() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    view.set_filter(FilterCriteria::new().with_status("APPROVED"));
    let snapshot = view.snapshot();
    assert_eq!(snapshot.requests.len(), 1);
    assert_eq!(snapshot.requests[0].subject, "Old laptop");
    assert!(snapshot.reports.is_empty());
}

#[tokio::test]
async fn test_date_range_excludes_undated_records() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    view.set_filter(FilterCriteria::new().with_date_range(
        NaiveDate::from_ymd_opt(2025, 1, 1),
        NaiveDate::from_ymd_opt(2025, 12, 31),
    ));
    let snapshot = view.snapshot();
    let subjects: Vec<&str> = snapshot
        .requests
        .iter()
        .map(|r| r.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["New monitor"]);
    assert_eq!(snapshot.reports.len(), 1);
}

#[tokio::test]
async fn test_inverted_date_range_yields_empty_not_error() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    view.set_filter(FilterCriteria::new().with_date_range(
        NaiveDate::from_ymd_opt(2025, 12, 31),
        NaiveDate::from_ymd_opt(2025, 1, 1),
    ));
    let snapshot = view.snapshot();
    assert!(snapshot.requests.is_empty());
    assert!(snapshot.reports.is_empty());
}

#[tokio::test]
async fn test_stats_over_filtered_records() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    // Limit to the two dated 2025 records: one pending, one report.
    view.set_filter(FilterCriteria::new().with_date_range(
        NaiveDate::from_ymd_opt(2025, 1, 1),
        NaiveDate::from_ymd_opt(2025, 12, 31),
    ));

    let stats = view.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.inactive_count, 2);
    assert_eq!(stats.inactive_percentage, 100.0);
    assert_eq!(stats.monthly_activity.len(), 12);
    assert_eq!(stats.monthly_activity[0].month, "Jan");
    assert_eq!(stats.monthly_activity[0].count, 2);
}

#[tokio::test]
async fn test_reset_filter_returns_to_identity() {
    let mut view = HistoryView::new(seeded_store());
    view.load("alice").await;

    view.set_filter(
        FilterCriteria::new()
            .with_type(TypeSelection::Requests)
            .with_status("approved"),
    );
    assert_eq!(view.snapshot().requests.len(), 1);

    view.reset_filter();
    assert!(view.criteria().is_identity());
    assert_eq!(
        view.criteria().describe(),
        "No filters applied - showing all data"
    );
    assert_eq!(view.snapshot().requests.len(), 3);
}
