//! History filtering, statistics and export pipeline
//!
//! This module turns a user's raw equipment requests and maintenance reports
//! into what the history and statistics screens show:
//!
//! - **Filtering**: multi-criteria [`FilterCriteria`] (type, status,
//!   priority, date range) applied to record lists
//! - **Sorting**: stable most-recent-first ordering, undated records last
//! - **Statistics**: totals, inactive percentage, priority breakdown and
//!   per-month activity for summary cards and charts
//! - **Export**: CSV, JSON and TXT serializations of the filtered result set
//! - **View assembly**: [`HistoryView`] owns the current criteria and
//!   orchestrates fetch → filter → sort → stats/export

mod error;
mod export;
mod filter;
mod sort;
mod stats;
mod view;

pub use error::{HistoryError, HistoryResult};
pub use export::{
    ExportDocument, ExportFormat, ExportInfo, ExportMeta, ExportedReport, ExportedRequest,
    HistoryExporter,
};
pub use filter::{filter_records, FilterCriteria, TypeSelection};
pub use sort::sort_by_recency;
pub use stats::{HistoryStats, MonthlyCount, PrioritySlice};
pub use view::{HistorySnapshot, HistoryView, ViewState};
