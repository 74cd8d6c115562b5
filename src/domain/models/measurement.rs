//! Domain model for a dated weight/length observation.

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

/// A dated weight and/or length observation for one pup.
///
/// At least one of `weight`/`length` must be present; the services enforce
/// this before the record reaches storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Assigned by the repository on insert. Older files stored this as a
    /// string-encoded integer; both forms deserialize, integers are written.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    pub pup_id: i64,
    /// Observation date, "YYYY-MM-DD".
    pub date: String,
    /// Weight in grams.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Length in centimetres.
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

impl MeasurementRecord {
    pub fn new(
        pup_id: i64,
        date: String,
        weight: Option<f64>,
        length: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            pup_id,
            date,
            weight,
            length,
            notes,
            created_at: Local::now().to_rfc3339(),
        }
    }
}

/// Accept both `"id": 7` and the legacy `"id": "7"` shape.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(id) => Ok(id),
        Raw::Str(s) => s.parse::<i64>().map_err(serde::de::Error::custom),
    }
}
