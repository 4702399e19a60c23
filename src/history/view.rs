//! History view orchestration
//!
//! Owns the loaded record lists, the active filter criteria and the view
//! state machine. The pure pipeline stages (filter, sort, stats, export)
//! are applied on demand through [`HistoryView::snapshot`] and friends, so
//! loaded data is never mutated by filtering.

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::history::error::{HistoryError, HistoryResult};
use crate::history::export::{ExportFormat, ExportMeta, HistoryExporter};
use crate::history::filter::{filter_records, FilterCriteria, TypeSelection};
use crate::history::sort::sort_by_recency;
use crate::history::stats::HistoryStats;
use crate::models::Record;
use crate::store::HistoryStore;

/// View lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded,
    Filtering,
    Exporting,
    ExportFailed,
}

/// Records currently visible under the active filters, sorted newest first.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub requests: Vec<Record>,
    pub reports: Vec<Record>,
}

/// History view over a record store
pub struct HistoryView {
    store: Arc<dyn HistoryStore>,
    owner_id: Option<String>,
    user_label: String,
    criteria: FilterCriteria,
    requests: Vec<Record>,
    reports: Vec<Record>,
    state: ViewState,
}

impl HistoryView {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            owner_id: None,
            user_label: String::new(),
            criteria: FilterCriteria::new(),
            requests: Vec::new(),
            reports: Vec::new(),
            state: ViewState::Idle,
        }
    }

    /// Set the display label stamped into export headers.
    pub fn set_user_label(&mut self, label: impl Into<String>) {
        self.user_label = label.into();
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Load both record lists for `owner_id`.
    ///
    /// A fetch failure degrades to an empty list rather than failing the
    /// whole view. Loads run under `&mut self`, so they cannot overlap and
    /// the most recent call always determines the visible data.
    pub async fn load(&mut self, owner_id: impl Into<String>) {
        let owner_id = owner_id.into();
        self.state = ViewState::Loading;

        let requests = Self::fetch(
            self.store.fetch_requests_by_owner(&owner_id).await,
            "equipment requests",
        );
        let reports = Self::fetch(
            self.store.fetch_reports_by_owner(&owner_id).await,
            "maintenance reports",
        );

        info!(
            owner_id = %owner_id,
            requests = requests.len(),
            reports = reports.len(),
            "loaded history"
        );
        self.owner_id = Some(owner_id);
        self.requests = requests;
        self.reports = reports;
        self.state = ViewState::Loaded;
    }

    fn fetch(result: crate::error::Result<Vec<Record>>, what: &str) -> Vec<Record> {
        match result.map_err(|e| HistoryError::FetchFailed(e.to_string())) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "failed to fetch {what}, showing empty list");
                Vec::new()
            }
        }
    }

    /// Replace the active filter criteria.
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.state = ViewState::Filtering;
        self.criteria = criteria;
        self.state = ViewState::Loaded;
    }

    /// Clear all filters back to show-everything.
    pub fn reset_filter(&mut self) {
        self.state = ViewState::Filtering;
        self.criteria.reset();
        self.state = ViewState::Loaded;
    }

    /// Apply the active filters and recency sort to the loaded data.
    pub fn snapshot(&self) -> HistorySnapshot {
        let mut requests = match self.criteria.type_selection {
            TypeSelection::Reports => Vec::new(),
            _ => filter_records(&self.requests, &self.criteria),
        };
        let mut reports = match self.criteria.type_selection {
            TypeSelection::Requests => Vec::new(),
            _ => filter_records(&self.reports, &self.criteria),
        };
        sort_by_recency(&mut requests);
        sort_by_recency(&mut reports);
        HistorySnapshot { requests, reports }
    }

    /// Aggregate statistics over the records currently visible.
    pub fn stats(&self) -> HistoryStats {
        let snapshot = self.snapshot();
        let mut combined = snapshot.requests;
        combined.extend(snapshot.reports);
        HistoryStats::aggregate(&combined)
    }

    /// Render the visible records in the requested format.
    pub fn export(&mut self, format: ExportFormat) -> HistoryResult<String> {
        self.state = ViewState::Exporting;
        let snapshot = self.snapshot();
        let meta = ExportMeta {
            user: self.user_label.clone(),
            export_date: Local::now().date_naive(),
            filter_description: self.criteria.describe(),
        };
        match HistoryExporter::render(&snapshot.requests, &snapshot.reports, &meta, format) {
            Ok(content) => {
                self.state = ViewState::Loaded;
                Ok(content)
            }
            Err(e) => {
                self.state = ViewState::ExportFailed;
                Err(e)
            }
        }
    }

    /// Render and write the export to `path`.
    pub async fn export_to_file(&mut self, path: &Path, format: ExportFormat) -> HistoryResult<()> {
        let content = self.export(format)?;
        self.state = ViewState::Exporting;
        match HistoryExporter::write_to_file(path, &content).await {
            Ok(()) => {
                info!(path = %path.display(), format = %format, "wrote history export");
                self.state = ViewState::Loaded;
                Ok(())
            }
            Err(e) => {
                self.state = ViewState::ExportFailed;
                Err(e)
            }
        }
    }
}
