//! JSON-backed training record repository.

use anyhow::Result;
use log::info;

use super::connection::JsonConnection;
use crate::domain::models::TrainingRecord;
use crate::storage::traits::TrainingStorage;

/// Repository for the `training_records.json` collection.
#[derive(Debug, Clone)]
pub struct TrainingRepository {
    connection: JsonConnection,
}

impl TrainingRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Vec<TrainingRecord> {
        self.connection
            .load_collection(&self.connection.training_records_path())
    }

    fn write_records(&self, records: &[TrainingRecord]) -> Result<()> {
        self.connection
            .persist_collection(&self.connection.training_records_path(), records)
    }
}

impl TrainingStorage for TrainingRepository {
    fn list_training_records(&self) -> Vec<TrainingRecord> {
        self.read_records()
    }

    fn training_records_for_pup(&self, pup_id: i64) -> Vec<TrainingRecord> {
        self.read_records()
            .into_iter()
            .filter(|r| r.pup_id == pup_id)
            .collect()
    }

    fn add_training_record(&self, mut record: TrainingRecord) -> Result<TrainingRecord> {
        let mut records = self.read_records();
        record.id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(record.clone());
        self.write_records(&records)?;
        info!(
            "Stored training record {} for pup {}",
            record.id, record.pup_id
        );
        Ok(record)
    }

    fn update_training_record(&self, record: &TrainingRecord) -> Result<bool> {
        let mut records = self.read_records();
        match records.iter().position(|r| r.id == record.id) {
            Some(index) => {
                records[index] = record.clone();
                self.write_records(&records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_training_record(&self, record_id: i64) -> Result<bool> {
        let mut records = self.read_records();
        let original_len = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() < original_len {
            self.write_records(&records)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn get_training_record(&self, record_id: i64) -> Option<TrainingRecord> {
        self.read_records()
            .into_iter()
            .find(|r| r.id == record_id)
    }
}
