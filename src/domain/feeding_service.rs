//! Feeding session management, plus the legacy single-item record API.

use anyhow::Result;
use log::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::{FeedingRecord, FeedingSession, FeedingTime, FoodItem};
use crate::storage::json::{FeedingRecordRepository, FeedingSessionRepository, JsonConnection};
use crate::storage::traits::{FeedingRecordStorage, FeedingSessionStorage};

/// One raw food row from the feeding form. Rows with a blank food type or
/// amount are silently skipped, mirroring how the entry form adds spare rows.
#[derive(Debug, Clone)]
pub struct FoodItemInput {
    pub food_type: String,
    pub amount: String,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct CreateFeedingSessionCommand {
    pub pup_id: i64,
    pub date: String,
    pub session_notes: Option<String>,
    pub feeding_time: FeedingTime,
    pub researcher: Option<String>,
    pub food_items: Vec<FoodItemInput>,
}

/// Sparse patch for a feeding session. When `food_items` is provided the
/// whole item list is replaced.
#[derive(Debug, Clone, Default)]
pub struct UpdateFeedingSessionCommand {
    pub date: Option<String>,
    pub session_notes: Option<String>,
    pub feeding_time: Option<FeedingTime>,
    pub food_items: Option<Vec<FoodItemInput>>,
}

/// Service for managing feeding sessions and legacy feeding records.
#[derive(Debug, Clone)]
pub struct FeedingService {
    session_repository: FeedingSessionRepository,
    record_repository: FeedingRecordRepository,
}

impl FeedingService {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            session_repository: FeedingSessionRepository::new(connection.clone()),
            record_repository: FeedingRecordRepository::new(connection),
        }
    }

    pub fn create_session(&self, command: CreateFeedingSessionCommand) -> Result<FeedingSession> {
        let items = parse_food_items(command.food_items)?;
        if items.is_empty() {
            return Err(DomainError::Incomplete(
                "a feeding session needs at least one food item",
            )
            .into());
        }

        let mut session = FeedingSession::new(
            command.pup_id,
            command.date,
            command.session_notes,
            command.feeding_time,
            command.researcher,
        );
        session.food_items = items;
        info!(
            "Creating feeding session for pup {} with {} items",
            session.pup_id,
            session.food_items.len()
        );
        self.session_repository.add_session(session)
    }

    pub fn get_session(&self, session_id: i64) -> Option<FeedingSession> {
        self.session_repository.get_session(session_id)
    }

    /// Feeding sessions for one pup, newest first.
    pub fn sessions_for_pup(&self, pup_id: i64) -> Vec<FeedingSession> {
        let mut sessions = self.session_repository.sessions_for_pup(pup_id);
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        sessions
    }

    pub fn update_session(
        &self,
        session_id: i64,
        command: UpdateFeedingSessionCommand,
    ) -> Result<Option<FeedingSession>> {
        let Some(mut session) = self.session_repository.get_session(session_id) else {
            warn!("Feeding session {} not found for updating", session_id);
            return Ok(None);
        };

        if let Some(date) = command.date {
            session.date = date;
        }
        if let Some(notes) = command.session_notes {
            session.session_notes = if notes.is_empty() { None } else { Some(notes) };
        }
        if let Some(feeding_time) = command.feeding_time {
            session.feeding_time = feeding_time;
        }
        if let Some(inputs) = command.food_items {
            let items = parse_food_items(inputs)?;
            if items.is_empty() {
                return Err(DomainError::Incomplete(
                    "a feeding session needs at least one food item",
                )
                .into());
            }
            session.food_items = items;
        }

        self.session_repository.update_session(&session)?;
        Ok(Some(session))
    }

    pub fn delete_session(&self, session_id: i64) -> Result<bool> {
        self.session_repository.delete_session(session_id)
    }

    /// Legacy feeding records for one pup, newest first. Present only so
    /// files produced by the predecessor tooling stay visible.
    pub fn legacy_records_for_pup(&self, pup_id: i64) -> Vec<FeedingRecord> {
        let mut records = self.record_repository.records_for_pup(pup_id);
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    pub fn list_legacy_records(&self) -> Vec<FeedingRecord> {
        self.record_repository.list_records()
    }

    /// Append to the legacy collection. No current flow calls this; it exists
    /// for direct API use against pre-session data sets.
    pub fn add_legacy_record(
        &self,
        pup_id: i64,
        date: String,
        food_type: String,
        amount: &str,
        notes: Option<String>,
    ) -> Result<FeedingRecord> {
        let amount = amount
            .parse::<f64>()
            .map_err(|_| DomainError::invalid("amount", amount))?;
        self.record_repository
            .add_record(FeedingRecord::new(pup_id, date, food_type, amount, notes))
    }
}

fn parse_food_items(inputs: Vec<FoodItemInput>) -> Result<Vec<FoodItem>> {
    let mut items = Vec::new();
    for input in inputs {
        if input.food_type.is_empty() || input.amount.is_empty() {
            continue;
        }
        let amount = input
            .amount
            .parse::<f64>()
            .map_err(|_| DomainError::invalid("amount", input.amount.clone()))?;
        items.push(FoodItem {
            food_type: input.food_type,
            amount,
            notes: if input.notes.is_empty() {
                None
            } else {
                Some(input.notes)
            },
        });
    }
    Ok(items)
}
