//! Training record management.

use anyhow::Result;
use log::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::TrainingRecord;
use crate::storage::json::{JsonConnection, TrainingRepository};
use crate::storage::traits::TrainingStorage;

#[derive(Debug, Clone)]
pub struct CreateTrainingCommand {
    pub pup_id: i64,
    pub date: String,
    pub training_type: String,
    /// Raw form value, parsed to whole minutes.
    pub duration: String,
    pub progress: String,
    pub notes: Option<String>,
    pub researcher: Option<String>,
}

/// Sparse patch for a training record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTrainingCommand {
    pub date: Option<String>,
    pub training_type: Option<String>,
    pub duration: Option<String>,
    pub progress: Option<String>,
    pub notes: Option<String>,
}

/// Service for managing training records.
#[derive(Debug, Clone)]
pub struct TrainingService {
    training_repository: TrainingRepository,
}

impl TrainingService {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            training_repository: TrainingRepository::new(connection),
        }
    }

    pub fn create_record(&self, command: CreateTrainingCommand) -> Result<TrainingRecord> {
        let duration = parse_duration(&command.duration)?;
        info!(
            "Creating training record for pup {}: {}",
            command.pup_id, command.training_type
        );
        self.training_repository.add_training_record(TrainingRecord::new(
            command.pup_id,
            command.date,
            command.training_type,
            duration,
            command.progress,
            command.notes,
            command.researcher,
        ))
    }

    pub fn get_record(&self, record_id: i64) -> Option<TrainingRecord> {
        self.training_repository.get_training_record(record_id)
    }

    /// Training records for one pup, newest first.
    pub fn records_for_pup(&self, pup_id: i64) -> Vec<TrainingRecord> {
        let mut records = self.training_repository.training_records_for_pup(pup_id);
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    pub fn update_record(
        &self,
        record_id: i64,
        command: UpdateTrainingCommand,
    ) -> Result<Option<TrainingRecord>> {
        let Some(mut record) = self.training_repository.get_training_record(record_id) else {
            warn!("Training record {} not found for updating", record_id);
            return Ok(None);
        };

        if let Some(date) = command.date {
            record.date = date;
        }
        if let Some(training_type) = command.training_type {
            record.training_type = training_type;
        }
        if let Some(raw) = command.duration {
            record.duration = parse_duration(&raw)?;
        }
        if let Some(progress) = command.progress {
            record.progress = progress;
        }
        if let Some(notes) = command.notes {
            record.notes = if notes.is_empty() { None } else { Some(notes) };
        }

        self.training_repository.update_training_record(&record)?;
        Ok(Some(record))
    }

    pub fn delete_record(&self, record_id: i64) -> Result<bool> {
        self.training_repository.delete_training_record(record_id)
    }
}

fn parse_duration(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| DomainError::invalid("duration", raw).into())
}
