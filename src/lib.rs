//! # Shark Pup Tracker
//!
//! Husbandry record keeping for captive-bred shark pups: the birth log,
//! follow-up growth measurements, feeding sessions, and training sessions,
//! all persisted as flat JSON files so a deployment needs nothing beyond a
//! writable data directory.
//!
//! The crate splits into two layers:
//! - [`storage`]: per-collection repositories over whole-file JSON arrays,
//!   behind the traits in [`storage::traits`].
//! - [`domain`]: services that validate raw form input, assign ids, compute
//!   aggregate statistics, and render CSV exports.
//!
//! [`Backend`] wires every service over one data directory and is the
//! intended entry point for a frontend.

pub mod domain;
pub mod storage;

pub use storage::json::JsonConnection;

use anyhow::Result;
use std::path::Path;

/// All services wired over a single data directory.
pub struct Backend {
    pub pup_service: domain::PupService,
    pub measurement_service: domain::MeasurementService,
    pub feeding_service: domain::FeedingService,
    pub training_service: domain::TrainingService,
    pub statistics_service: domain::StatisticsService,
    pub export_service: domain::ExportService,
}

impl Backend {
    /// Open (creating if needed) the given data directory and wire every
    /// service over it.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let connection = JsonConnection::new(data_dir)?;
        Ok(Backend {
            pup_service: domain::PupService::new(connection.clone()),
            measurement_service: domain::MeasurementService::new(connection.clone()),
            feeding_service: domain::FeedingService::new(connection.clone()),
            training_service: domain::TrainingService::new(connection.clone()),
            statistics_service: domain::StatisticsService::new(connection.clone()),
            export_service: domain::ExportService::new(connection),
        })
    }

    /// Wire the backend over the platform default data directory.
    pub fn with_default_data_dir() -> Result<Self> {
        Self::new(JsonConnection::default_data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn backend_services_share_one_data_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let backend = Backend::new(temp_dir.path())?;

        let pup = backend.pup_service.create_pup(domain::CreatePupCommand {
            date: "2024-05-01".to_string(),
            name: "Luna".to_string(),
            notes: None,
            length: None,
            weight: None,
            date_of_birth: None,
            mother_id: None,
            sex: None,
            researcher: None,
            status: crate::domain::models::PupStatus::Live,
        })?;

        // A separate service over the same directory sees the new pup.
        let stats = backend.statistics_service.calculate_statistics();
        assert_eq!(stats.count, 1);

        let export = backend.export_service.export_pups()?;
        assert!(export.content.contains(&pup.name));
        Ok(())
    }
}
