//! # Storage Traits
//!
//! Interfaces for the per-collection record stores. The domain layer works
//! against these traits so the flat-file backend stays swappable.
//!
//! Shared contract across all five collections:
//! - `list_*` never fails: a storage read problem degrades to an empty
//!   collection after logging, so absence and I/O failure look the same to
//!   callers (deliberate, documented limitation).
//! - `add_*` assigns the id as `max(existing ids) + 1`, starting at 1, and
//!   returns the stored entity.
//! - `update_*` replaces the whole entity matched by id and returns `false`
//!   without touching the file when the id is unknown.
//! - `delete_*` returns whether anything was removed; the file is only
//!   rewritten when the collection actually shrank.

use crate::domain::models::{
    FeedingRecord, FeedingSession, MeasurementRecord, Pup, TrainingRecord,
};
use anyhow::Result;

/// Storage operations for the pup collection.
pub trait PupStorage: Send + Sync {
    fn list_pups(&self) -> Vec<Pup>;
    fn add_pup(&self, pup: Pup) -> Result<Pup>;
    fn update_pup(&self, pup: &Pup) -> Result<bool>;
    fn delete_pup(&self, pup_id: i64) -> Result<bool>;
    fn get_pup(&self, pup_id: i64) -> Option<Pup>;
}

/// Storage operations for the measurement collection.
pub trait MeasurementStorage: Send + Sync {
    fn list_measurements(&self) -> Vec<MeasurementRecord>;
    fn measurements_for_pup(&self, pup_id: i64) -> Vec<MeasurementRecord>;
    fn add_measurement(&self, measurement: MeasurementRecord) -> Result<MeasurementRecord>;
    fn update_measurement(&self, measurement: &MeasurementRecord) -> Result<bool>;
    fn delete_measurement(&self, measurement_id: i64) -> Result<bool>;
    fn get_measurement(&self, measurement_id: i64) -> Option<MeasurementRecord>;
}

/// Storage operations for the feeding session collection.
pub trait FeedingSessionStorage: Send + Sync {
    fn list_sessions(&self) -> Vec<FeedingSession>;
    fn sessions_for_pup(&self, pup_id: i64) -> Vec<FeedingSession>;
    fn add_session(&self, session: FeedingSession) -> Result<FeedingSession>;
    fn update_session(&self, session: &FeedingSession) -> Result<bool>;
    fn delete_session(&self, session_id: i64) -> Result<bool>;
    fn get_session(&self, session_id: i64) -> Option<FeedingSession>;
}

/// Storage operations for the legacy single-item feeding records. Read and
/// append only; current flows never update or delete these.
pub trait FeedingRecordStorage: Send + Sync {
    fn list_records(&self) -> Vec<FeedingRecord>;
    fn records_for_pup(&self, pup_id: i64) -> Vec<FeedingRecord>;
    fn add_record(&self, record: FeedingRecord) -> Result<FeedingRecord>;
}

/// Storage operations for the training record collection.
pub trait TrainingStorage: Send + Sync {
    fn list_training_records(&self) -> Vec<TrainingRecord>;
    fn training_records_for_pup(&self, pup_id: i64) -> Vec<TrainingRecord>;
    fn add_training_record(&self, record: TrainingRecord) -> Result<TrainingRecord>;
    fn update_training_record(&self, record: &TrainingRecord) -> Result<bool>;
    fn delete_training_record(&self, record_id: i64) -> Result<bool>;
    fn get_training_record(&self, record_id: i64) -> Option<TrainingRecord>;
}
