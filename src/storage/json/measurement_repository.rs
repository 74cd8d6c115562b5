//! JSON-backed measurement repository.

use anyhow::Result;
use log::info;

use super::connection::JsonConnection;
use crate::domain::models::MeasurementRecord;
use crate::storage::traits::MeasurementStorage;

/// Repository for the `measurements.json` collection.
///
/// Earlier tooling wrote measurement ids as string-encoded integers; the
/// model's deserializer absorbs that, so by the time records reach this
/// repository every id is a plain integer and the usual max+1 scheme applies.
#[derive(Debug, Clone)]
pub struct MeasurementRepository {
    connection: JsonConnection,
}

impl MeasurementRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_measurements(&self) -> Vec<MeasurementRecord> {
        self.connection
            .load_collection(&self.connection.measurements_path())
    }

    fn write_measurements(&self, measurements: &[MeasurementRecord]) -> Result<()> {
        self.connection
            .persist_collection(&self.connection.measurements_path(), measurements)
    }
}

impl MeasurementStorage for MeasurementRepository {
    fn list_measurements(&self) -> Vec<MeasurementRecord> {
        self.read_measurements()
    }

    fn measurements_for_pup(&self, pup_id: i64) -> Vec<MeasurementRecord> {
        self.read_measurements()
            .into_iter()
            .filter(|m| m.pup_id == pup_id)
            .collect()
    }

    fn add_measurement(&self, mut measurement: MeasurementRecord) -> Result<MeasurementRecord> {
        let mut measurements = self.read_measurements();
        measurement.id = measurements.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        measurements.push(measurement.clone());
        self.write_measurements(&measurements)?;
        info!(
            "Stored measurement {} for pup {}",
            measurement.id, measurement.pup_id
        );
        Ok(measurement)
    }

    fn update_measurement(&self, measurement: &MeasurementRecord) -> Result<bool> {
        let mut measurements = self.read_measurements();
        match measurements.iter().position(|m| m.id == measurement.id) {
            Some(index) => {
                measurements[index] = measurement.clone();
                self.write_measurements(&measurements)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_measurement(&self, measurement_id: i64) -> Result<bool> {
        let mut measurements = self.read_measurements();
        let original_len = measurements.len();
        measurements.retain(|m| m.id != measurement_id);
        if measurements.len() < original_len {
            self.write_measurements(&measurements)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn get_measurement(&self, measurement_id: i64) -> Option<MeasurementRecord> {
        self.read_measurements()
            .into_iter()
            .find(|m| m.id == measurement_id)
    }
}
