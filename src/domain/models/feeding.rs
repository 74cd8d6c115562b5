//! Domain models for feeding sessions and the legacy single-item records.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Time of day a feeding took place. Sessions recorded before this field
/// existed deserialize to `AM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FeedingTime {
    #[default]
    AM,
    PM,
}

/// One food entry inside a feeding session. Owned entirely by its parent
/// session and serialized inline; it has no id of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub food_type: String,
    /// Amount in grams.
    pub amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A dated feeding event holding one or more food items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingSession {
    /// Assigned by the repository on insert. 0 until then.
    #[serde(default)]
    pub id: i64,
    pub pup_id: i64,
    /// Session date, "YYYY-MM-DD".
    pub date: String,
    #[serde(default)]
    pub session_notes: Option<String>,
    #[serde(default)]
    pub feeding_time: FeedingTime,
    #[serde(default)]
    pub food_items: Vec<FoodItem>,
    #[serde(default)]
    pub researcher: Option<String>,
    pub created_at: String,
}

impl FeedingSession {
    pub fn new(
        pup_id: i64,
        date: String,
        session_notes: Option<String>,
        feeding_time: FeedingTime,
        researcher: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            pup_id,
            date,
            session_notes,
            feeding_time,
            food_items: Vec::new(),
            researcher,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn add_food_item(&mut self, food_type: String, amount: f64, notes: Option<String>) {
        self.food_items.push(FoodItem {
            food_type,
            amount,
            notes,
        });
    }

    /// Summed amount across every food item in the session.
    pub fn total_amount(&self) -> f64 {
        self.food_items.iter().map(|item| item.amount).sum()
    }
}

/// Legacy predecessor of [`FeedingSession`] with a single inline food entry.
/// Kept so pre-existing files stay readable and exportable; current flows
/// only append to this collection through the explicit legacy API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingRecord {
    #[serde(default)]
    pub id: i64,
    pub pup_id: i64,
    pub date: String,
    pub food_type: String,
    pub amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

impl FeedingRecord {
    pub fn new(
        pup_id: i64,
        date: String,
        food_type: String,
        amount: f64,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            pup_id,
            date,
            food_type,
            amount,
            notes,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
