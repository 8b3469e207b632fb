//! Local persistence for the single analysis-result slot.
//!
//! The client remembers exactly one finished run. The slot is overwritten
//! by every completed analysis and cleared when the user starts a new one,
//! so the contract is deliberately small: save, load, clear.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::net::schema::AnalysisReport;

/// Fixed key the last result is stored under.
const RESULT_KEY: &str = "podcheck.last_result";

/// The persisted record: the final report plus how long the run took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub report: AnalysisReport,
    pub elapsed_seconds: u64,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("stored result could not be encoded or decoded: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage I/O failed: {0}")]
    Io(String),
}

pub fn save_result(record: &StoredAnalysis) -> Result<(), StorageError> {
    let payload = serde_json::to_string(record)?;
    write_slot(&payload)
}

/// Loads the persisted slot. An empty slot is `Ok(None)`.
pub fn load_result() -> Result<Option<StoredAnalysis>, StorageError> {
    match read_slot()? {
        Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
        None => Ok(None),
    }
}

pub fn clear_result() -> Result<(), StorageError> {
    remove_slot()
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(|_| StorageError::Unavailable("localStorage access blocked".into()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))
}

#[cfg(target_arch = "wasm32")]
fn write_slot(payload: &str) -> Result<(), StorageError> {
    local_storage()?
        .set_item(RESULT_KEY, payload)
        .map_err(|_| StorageError::Io("localStorage rejected the value".into()))
}

#[cfg(target_arch = "wasm32")]
fn read_slot() -> Result<Option<String>, StorageError> {
    local_storage()?
        .get_item(RESULT_KEY)
        .map_err(|_| StorageError::Io("localStorage read failed".into()))
}

#[cfg(target_arch = "wasm32")]
fn remove_slot() -> Result<(), StorageError> {
    local_storage()?
        .remove_item(RESULT_KEY)
        .map_err(|_| StorageError::Io("localStorage remove failed".into()))
}

#[cfg(not(target_arch = "wasm32"))]
fn slot_path() -> Result<std::path::PathBuf, StorageError> {
    let dirs = directories::ProjectDirs::from("com", "Podcheck", "Podcheck")
        .ok_or_else(|| StorageError::Unavailable("no usable data directory".into()))?;
    Ok(dirs.data_dir().join(format!("{RESULT_KEY}.json")))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_slot(payload: &str) -> Result<(), StorageError> {
    let path = slot_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| StorageError::Io(err.to_string()))?;
    }
    std::fs::write(&path, payload).map_err(|err| StorageError::Io(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn read_slot() -> Result<Option<String>, StorageError> {
    let path = slot_path()?;
    match std::fs::read_to_string(&path) {
        Ok(payload) => Ok(Some(payload)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StorageError::Io(err.to_string())),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn remove_slot() -> Result<(), StorageError> {
    let path = slot_path()?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(StorageError::Io(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::schema::TaskStatus;

    fn record() -> StoredAnalysis {
        StoredAnalysis {
            report: AnalysisReport {
                task_id: Some("abc".into()),
                metadata: None,
                claims: Vec::new(),
                status: TaskStatus::Done,
                error: None,
            },
            elapsed_seconds: 97,
        }
    }

    // One test covers the whole contract so the shared slot file is never
    // touched by two tests at once.
    #[test]
    fn slot_round_trips_and_clears() {
        let stored = record();
        save_result(&stored).expect("save");

        let loaded = load_result().expect("load").expect("slot populated");
        assert_eq!(loaded, stored);

        clear_result().expect("clear");
        assert!(load_result().expect("load after clear").is_none());

        // Clearing an already-empty slot is not an error.
        clear_result().expect("second clear");
    }
}
