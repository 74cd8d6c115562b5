//! JSON flat-file storage connection.
//!
//! One `JsonConnection` owns the data directory holding the five collection
//! files. Every collection is a single JSON array rewritten in full on each
//! mutation; the rewrite goes through a temp file and an atomic rename so a
//! crash mid-write leaves the previous file intact.

use anyhow::{Context, Result};
use log::error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File names match what the original deployment wrote, so pre-existing data
/// directories keep working without migration.
const PUPS_FILE: &str = "shark_pups.json";
const MEASUREMENTS_FILE: &str = "measurements.json";
const FEEDING_SESSIONS_FILE: &str = "feeding_sessions.json";
const FEEDING_RECORDS_FILE: &str = "feeding_records.json";
const TRAINING_RECORDS_FILE: &str = "training_records.json";

/// Connection to a directory of JSON collection files.
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_path: PathBuf,
}

impl JsonConnection {
    /// Open (and if needed create) a data directory, seeding any missing
    /// collection file with an empty array.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)
            .with_context(|| format!("failed to create data directory {:?}", base_path))?;

        let connection = Self { base_path };
        for file in [
            PUPS_FILE,
            MEASUREMENTS_FILE,
            FEEDING_SESSIONS_FILE,
            FEEDING_RECORDS_FILE,
            TRAINING_RECORDS_FILE,
        ] {
            connection.ensure_collection_exists(file)?;
        }
        Ok(connection)
    }

    /// Default data directory under the platform data dir, falling back to a
    /// directory beneath the system temp dir when none is available.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("shark-pup-tracker")
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn pups_path(&self) -> PathBuf {
        self.base_path.join(PUPS_FILE)
    }

    pub fn measurements_path(&self) -> PathBuf {
        self.base_path.join(MEASUREMENTS_FILE)
    }

    pub fn feeding_sessions_path(&self) -> PathBuf {
        self.base_path.join(FEEDING_SESSIONS_FILE)
    }

    pub fn feeding_records_path(&self) -> PathBuf {
        self.base_path.join(FEEDING_RECORDS_FILE)
    }

    pub fn training_records_path(&self) -> PathBuf {
        self.base_path.join(TRAINING_RECORDS_FILE)
    }

    fn ensure_collection_exists(&self, file: &str) -> Result<()> {
        let path = self.base_path.join(file);
        if !path.exists() {
            fs::write(&path, "[]")
                .with_context(|| format!("failed to seed collection file {:?}", path))?;
        }
        Ok(())
    }

    /// Read a whole collection. A missing file, unreadable content, or a
    /// parse failure degrades to an empty collection with a logged error;
    /// callers cannot tell that apart from a legitimately empty file. That
    /// ambiguity is a documented limitation of the store.
    pub fn load_collection<T: DeserializeOwned>(&self, path: &Path) -> Vec<T> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error reading collection {:?}: {}", path, e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                error!("Error parsing collection {:?}: {}", path, e);
                Vec::new()
            }
        }
    }

    /// Rewrite a whole collection. Pretty-printed to stay interchangeable
    /// with files produced by the original tooling.
    pub fn persist_collection<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .with_context(|| format!("failed to serialize collection {:?}", path))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("failed to write collection {:?}", tmp_path))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to replace collection {:?}", path))?;
        Ok(())
    }
}
