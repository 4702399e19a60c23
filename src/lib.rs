//! Maintenix core — maintenance-request history, reporting and export.
//!
//! Staff submit equipment requests and maintenance reports; admins triage and
//! resolve them. This crate is the engine behind the history and statistics
//! screens: it filters a user's records by type, status, priority and date
//! range, sorts them by recency, computes summary statistics and serializes
//! filtered result sets to CSV, JSON or TXT.
//!
//! # Pipeline
//!
//! Data flows one way:
//!
//! ```text
//! store -> filter -> type selection -> sort -> (stats | export)
//! ```
//!
//! [`history::HistoryView`] owns the current [`history::FilterCriteria`] and
//! re-runs the pipeline whenever criteria or underlying data change.
//!
//! # Example
//!
//! ```no_run
//! use maintenix::history::{ExportFormat, HistoryView};
//! use maintenix::store::InMemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let mut view = HistoryView::new(store);
//!     view.load("staff-42").await;
//!
//!     let snapshot = view.snapshot();
//!     println!("{} requests, {} reports", snapshot.requests.len(), snapshot.reports.len());
//!
//!     let csv = view.export(ExportFormat::Csv)?;
//!     println!("{csv}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod store;
