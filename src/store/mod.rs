//! Record storage abstraction

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Record;

/// Backend seam for loading history data. The view layer only needs the
/// two per-owner fetches; mutation lives on concrete stores.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Fetch all equipment requests owned by `owner_id`.
    async fn fetch_requests_by_owner(&self, owner_id: &str) -> Result<Vec<Record>>;

    /// Fetch all maintenance reports owned by `owner_id`.
    async fn fetch_reports_by_owner(&self, owner_id: &str) -> Result<Vec<Record>>;
}
