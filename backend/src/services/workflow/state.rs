//! Persistence of workflow snapshots and the append-only audit log.

use common::model::workflow::{AuditRecord, CohortKey, WorkflowSnapshot};
use log::error;

use crate::storage::BlobStore;

/// Blob key holding the append-only audit log.
pub const AUDIT_LOG_KEY: &str = "workflow_audit_log";

/// Loads the snapshot for one (program, cohort). Absence and parse failure
/// both yield the empty snapshot; parse failure is logged.
pub fn load_snapshot(store: &dyn BlobStore, key: &CohortKey) -> WorkflowSnapshot {
    let raw = match store.load(&key.storage_key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return WorkflowSnapshot::default(),
        Err(e) => {
            error!("failed to read workflow snapshot {}: {}", key.storage_key(), e);
            return WorkflowSnapshot::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        error!(
            "failed to parse workflow snapshot {}, resetting: {}",
            key.storage_key(),
            e
        );
        WorkflowSnapshot::default()
    })
}

pub fn save_snapshot(
    store: &dyn BlobStore,
    key: &CohortKey,
    snapshot: &WorkflowSnapshot,
) -> Result<(), String> {
    let raw = serde_json::to_string(snapshot).map_err(|e| e.to_string())?;
    store.save(&key.storage_key(), &raw)
}

/// Loads the full audit log, oldest first.
pub fn load_audit_log(store: &dyn BlobStore) -> Vec<AuditRecord> {
    let raw = match store.load(AUDIT_LOG_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            error!("failed to read audit log: {}", e);
            return Vec::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        error!("failed to parse audit log, resetting: {}", e);
        Vec::new()
    })
}

/// Appends one record; records are never modified or removed.
pub fn append_audit(store: &dyn BlobStore, record: AuditRecord) -> Result<(), String> {
    let mut log = load_audit_log(store);
    log.push(record);
    let raw = serde_json::to_string(&log).map_err(|e| e.to_string())?;
    store.save(AUDIT_LOG_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn corrupt_snapshot_blob_resets_to_default() {
        let store = MemoryStore::default();
        let key = CohortKey::new("UG Programme", "Class of 2025");
        store.save(&key.storage_key(), "not json at all").unwrap();
        assert_eq!(load_snapshot(&store, &key), WorkflowSnapshot::default());
    }

    #[test]
    fn corrupt_audit_blob_resets_to_empty_log() {
        let store = MemoryStore::default();
        store.save(AUDIT_LOG_KEY, "[{broken").unwrap();
        assert!(load_audit_log(&store).is_empty());
    }
}
