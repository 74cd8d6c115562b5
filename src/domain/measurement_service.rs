//! Measurement record management.

use anyhow::Result;
use log::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::MeasurementRecord;
use crate::storage::json::{JsonConnection, MeasurementRepository};
use crate::storage::traits::MeasurementStorage;

/// Input for a new measurement. At least one of `weight`/`length` must be
/// present; blanks are normalized to `None` by the caller.
#[derive(Debug, Clone)]
pub struct AddMeasurementCommand {
    pub pup_id: i64,
    pub date: String,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub notes: Option<String>,
}

/// Replacement values for an existing measurement. The edit form always
/// submits all four fields, so this is a full replace of the editable
/// fields rather than a sparse patch.
#[derive(Debug, Clone)]
pub struct UpdateMeasurementCommand {
    pub date: String,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub notes: Option<String>,
}

/// Service for managing weight/length observations.
#[derive(Debug, Clone)]
pub struct MeasurementService {
    measurement_repository: MeasurementRepository,
}

impl MeasurementService {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            measurement_repository: MeasurementRepository::new(connection),
        }
    }

    pub fn add_measurement(&self, command: AddMeasurementCommand) -> Result<MeasurementRecord> {
        if command.weight.is_none() && command.length.is_none() {
            return Err(DomainError::Incomplete(
                "a measurement needs at least one of weight or length",
            )
            .into());
        }
        info!("Adding measurement for pup {}", command.pup_id);
        self.measurement_repository.add_measurement(MeasurementRecord::new(
            command.pup_id,
            command.date,
            command.weight,
            command.length,
            command.notes,
        ))
    }

    pub fn get_measurement(&self, measurement_id: i64) -> Option<MeasurementRecord> {
        self.measurement_repository.get_measurement(measurement_id)
    }

    /// Measurements for one pup, newest first.
    pub fn measurements_for_pup(&self, pup_id: i64) -> Vec<MeasurementRecord> {
        let mut measurements = self.measurement_repository.measurements_for_pup(pup_id);
        measurements.sort_by(|a, b| b.date.cmp(&a.date));
        measurements
    }

    /// Measurements for one pup grouped by observation date, newest date
    /// first, preserving record order within a date.
    pub fn measurements_by_date(&self, pup_id: i64) -> Vec<(String, Vec<MeasurementRecord>)> {
        let mut grouped: Vec<(String, Vec<MeasurementRecord>)> = Vec::new();
        for measurement in self.measurement_repository.measurements_for_pup(pup_id) {
            match grouped.iter_mut().find(|(date, _)| *date == measurement.date) {
                Some((_, bucket)) => bucket.push(measurement),
                None => grouped.push((measurement.date.clone(), vec![measurement])),
            }
        }
        grouped.sort_by(|(a, _), (b, _)| b.cmp(a));
        grouped
    }

    pub fn update_measurement(
        &self,
        measurement_id: i64,
        command: UpdateMeasurementCommand,
    ) -> Result<Option<MeasurementRecord>> {
        if command.weight.is_none() && command.length.is_none() {
            return Err(DomainError::Incomplete(
                "a measurement needs at least one of weight or length",
            )
            .into());
        }

        let Some(mut measurement) = self.measurement_repository.get_measurement(measurement_id)
        else {
            warn!("Measurement {} not found for updating", measurement_id);
            return Ok(None);
        };

        measurement.date = command.date;
        measurement.weight = command.weight;
        measurement.length = command.length;
        measurement.notes = command.notes;

        self.measurement_repository.update_measurement(&measurement)?;
        Ok(Some(measurement))
    }

    pub fn delete_measurement(&self, measurement_id: i64) -> Result<bool> {
        self.measurement_repository.delete_measurement(measurement_id)
    }
}
