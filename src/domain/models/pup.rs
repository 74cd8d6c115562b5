//! Domain model for a shark pup.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Recorded sex of a pup. Absent means not yet determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

/// Outcome of the birth. Older records omit this field entirely, which
/// deserializes to `Live`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PupStatus {
    #[default]
    Live,
    Stillborn,
}

/// A tracked shark pup, the root entity of the collection.
///
/// `length` and `weight` are legacy birth measurements kept for older files;
/// ongoing observations live in [`MeasurementRecord`](super::measurement::MeasurementRecord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pup {
    /// Assigned by the repository on insert. 0 until then.
    #[serde(default)]
    pub id: i64,
    /// Entry date, "YYYY-MM-DD".
    pub date: String,
    pub name: String,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Free-text reference to the mother shark, not validated against any collection.
    #[serde(default)]
    pub mother_id: Option<String>,
    #[serde(default)]
    pub sex: Option<Sex>,
    /// Username of the researcher who created the entry.
    #[serde(default)]
    pub researcher: Option<String>,
    #[serde(default)]
    pub status: PupStatus,
    pub created_at: String,
}

impl Pup {
    /// Build a new pup entry. The id stays unassigned until the repository
    /// stores it; `created_at` is stamped now and never changes afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: String,
        name: String,
        notes: Option<String>,
        length: Option<f64>,
        weight: Option<f64>,
        date_of_birth: Option<String>,
        mother_id: Option<String>,
        sex: Option<Sex>,
        researcher: Option<String>,
        status: PupStatus,
    ) -> Self {
        Self {
            id: 0,
            date,
            name,
            length,
            weight,
            notes,
            date_of_birth,
            mother_id,
            sex,
            researcher,
            status,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
