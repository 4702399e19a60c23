//! In-memory record store
//!
//! Concurrent map keyed by record id. Backs the CLI (loaded from a JSON
//! snapshot) and the integration tests.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{Record, RecordKind};
use crate::store::HistoryStore;

/// In-memory store backed by DashMap
pub struct InMemoryStore {
    records: DashMap<String, Record>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Build a store from a JSON snapshot of the form
    /// `{"equipment_requests": [...], "maintenance_reports": [...]}`.
    ///
    /// Documents that cannot be read as records are skipped, not fatal.
    pub fn from_snapshot(snapshot: &serde_json::Value) -> Self {
        let store = Self::new();
        store.load_section(snapshot, "equipment_requests", RecordKind::EquipmentRequest);
        store.load_section(snapshot, "maintenance_reports", RecordKind::MaintenanceReport);
        store
    }

    fn load_section(&self, snapshot: &serde_json::Value, key: &str, kind: RecordKind) {
        let Some(documents) = snapshot.get(key).and_then(|v| v.as_array()) else {
            return;
        };
        for document in documents {
            if !document.is_object() {
                debug!(section = key, "skipping malformed entry in snapshot");
                continue;
            }
            self.insert(Record::from_document(kind, document));
        }
    }

    /// Insert an equipment request, returning its id.
    pub fn insert_request(&self, record: Record) -> String {
        debug_assert_eq!(record.kind, RecordKind::EquipmentRequest);
        let id = record.id.clone();
        self.records.insert(id.clone(), record);
        id
    }

    /// Insert a maintenance report, returning its id.
    pub fn insert_report(&self, record: Record) -> String {
        debug_assert_eq!(record.kind, RecordKind::MaintenanceReport);
        let id = record.id.clone();
        self.records.insert(id.clone(), record);
        id
    }

    pub fn insert(&self, record: Record) {
        self.records.insert(record.id.clone(), record);
    }

    /// Update the status of a record. Stores the raw string as given.
    pub fn update_status(&self, id: &str, status: &str) -> Result<()> {
        match self.records.get_mut(id) {
            Some(mut record) => {
                record.status = status.to_string();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("record not found: {id}"))),
        }
    }

    /// Update the priority of a record. Stores the raw string as given.
    pub fn update_priority(&self, id: &str, priority: &str) -> Result<()> {
        match self.records.get_mut(id) {
            Some(mut record) => {
                record.priority = priority.to_string();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("record not found: {id}"))),
        }
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        match self.records.remove(id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("record not found: {id}"))),
        }
    }

    pub fn get(&self, id: &str) -> Option<Record> {
        self.records.get(id).map(|r| r.clone())
    }

    pub fn fetch_all(&self) -> Vec<Record> {
        self.records.iter().map(|r| r.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn fetch_by_owner_and_kind(&self, owner_id: &str, kind: RecordKind) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.kind == kind && r.owner_id == owner_id)
            .map(|r| r.clone())
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn fetch_requests_by_owner(&self, owner_id: &str) -> Result<Vec<Record>> {
        Ok(self.fetch_by_owner_and_kind(owner_id, RecordKind::EquipmentRequest))
    }

    async fn fetch_reports_by_owner(&self, owner_id: &str) -> Result<Vec<Record>> {
        Ok(self.fetch_by_owner_and_kind(owner_id, RecordKind::MaintenanceReport))
    }
}
