//! Test utilities for the JSON storage layer.
//!
//! `TestEnvironment` wraps a `tempfile::TempDir` so test data directories are
//! cleaned up by RAII even when a test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::feeding_repository::{FeedingRecordRepository, FeedingSessionRepository};
use super::measurement_repository::MeasurementRepository;
use super::pup_repository::PupRepository;
use super::training_repository::TrainingRepository;
use crate::domain::models::{Pup, PupStatus};
use crate::storage::traits::PupStorage;

/// A temporary data directory with a live connection.
pub struct TestEnvironment {
    pub connection: JsonConnection,
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // keep alive until drop
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// An environment plus one repository per collection.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub pup_repo: PupRepository,
    pub measurement_repo: MeasurementRepository,
    pub session_repo: FeedingSessionRepository,
    pub feeding_record_repo: FeedingRecordRepository,
    pub training_repo: TrainingRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let pup_repo = PupRepository::new(env.connection.clone());
        let measurement_repo = MeasurementRepository::new(env.connection.clone());
        let session_repo = FeedingSessionRepository::new(env.connection.clone());
        let feeding_record_repo = FeedingRecordRepository::new(env.connection.clone());
        let training_repo = TrainingRepository::new(env.connection.clone());
        Ok(Self {
            env,
            pup_repo,
            measurement_repo,
            session_repo,
            feeding_record_repo,
            training_repo,
        })
    }

    /// Store a pup with sensible defaults and return it with its id assigned.
    pub fn create_test_pup(&self, name: &str, date: &str) -> Result<Pup> {
        self.pup_repo.add_pup(Pup::new(
            date.to_string(),
            name.to_string(),
            None,
            None,
            None,
            None,
            None,
            None,
            Some("tester".to_string()),
            PupStatus::Live,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_cleans_up_on_drop() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn helper_creates_pups() -> Result<()> {
        let helper = TestHelper::new()?;
        let pup = helper.create_test_pup("Test Pup", "2024-01-01")?;
        assert_eq!(pup.id, 1);
        assert_eq!(helper.pup_repo.list_pups().len(), 1);
        Ok(())
    }
}
