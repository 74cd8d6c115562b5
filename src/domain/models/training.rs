//! Domain model for a training activity record.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// A dated training activity and its progress status for one pup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Assigned by the repository on insert. 0 until then.
    #[serde(default)]
    pub id: i64,
    pub pup_id: i64,
    /// Session date, "YYYY-MM-DD".
    pub date: String,
    pub training_type: String,
    /// Duration in minutes.
    pub duration: i64,
    /// Free-text status, e.g. "Started", "In Progress", "Completed".
    pub progress: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub researcher: Option<String>,
    pub created_at: String,
}

impl TrainingRecord {
    pub fn new(
        pup_id: i64,
        date: String,
        training_type: String,
        duration: i64,
        progress: String,
        notes: Option<String>,
        researcher: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            pup_id,
            date,
            training_type,
            duration,
            progress,
            notes,
            researcher,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
