//! File-backed workout store
//!
//! Owns the persisted collection: an insertion-ordered sequence of records,
//! unique by identifier, serialized as a JSON array. Every write replaces the
//! whole file; there is no partial-update protocol. Core computations only
//! ever see a read snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::WorkoutRecord;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Duplicate workout id: {id}")]
    Duplicate { id: String },

    #[error("Workout not found: {id}")]
    NotFound { id: String },
}

/// The persisted workout collection and its backing file.
#[derive(Debug)]
pub struct WorkoutStore {
    path: PathBuf,
    workouts: Vec<WorkoutRecord>,
}

impl WorkoutStore {
    /// Load the collection from `path`. A missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let workouts = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), count = workouts.len(), "workout store loaded");
        Ok(WorkoutStore { path, workouts })
    }

    /// Read snapshot in insertion order.
    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&WorkoutRecord> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Append a record, enforcing identifier uniqueness. Persists immediately.
    pub fn append(&mut self, record: WorkoutRecord) -> Result<(), StoreError> {
        if self.workouts.iter().any(|w| w.id == record.id) {
            return Err(StoreError::Duplicate { id: record.id });
        }

        info!(id = %record.id, athlete = %record.athlete, "appending workout");
        self.workouts.push(record);
        self.save()
    }

    /// Remove the record with the given identifier. Persists immediately.
    pub fn remove(&mut self, id: &str) -> Result<WorkoutRecord, StoreError> {
        let position = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let removed = self.workouts.remove(position);
        info!(id = %id, "removed workout");
        self.save()?;
        Ok(removed)
    }

    /// Drop every record. Persists immediately.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let count = self.workouts.len();
        self.workouts.clear();
        info!(count, "cleared workout store");
        self.save()?;
        Ok(count)
    }

    /// Write the whole collection back to the backing file.
    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.workouts)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
