//! JSON-backed feeding repositories: current sessions and the legacy
//! single-item records.

use anyhow::Result;
use log::info;

use super::connection::JsonConnection;
use crate::domain::models::{FeedingRecord, FeedingSession};
use crate::storage::traits::{FeedingRecordStorage, FeedingSessionStorage};

/// Repository for the `feeding_sessions.json` collection.
#[derive(Debug, Clone)]
pub struct FeedingSessionRepository {
    connection: JsonConnection,
}

impl FeedingSessionRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_sessions(&self) -> Vec<FeedingSession> {
        self.connection
            .load_collection(&self.connection.feeding_sessions_path())
    }

    fn write_sessions(&self, sessions: &[FeedingSession]) -> Result<()> {
        self.connection
            .persist_collection(&self.connection.feeding_sessions_path(), sessions)
    }
}

impl FeedingSessionStorage for FeedingSessionRepository {
    fn list_sessions(&self) -> Vec<FeedingSession> {
        self.read_sessions()
    }

    fn sessions_for_pup(&self, pup_id: i64) -> Vec<FeedingSession> {
        self.read_sessions()
            .into_iter()
            .filter(|s| s.pup_id == pup_id)
            .collect()
    }

    fn add_session(&self, mut session: FeedingSession) -> Result<FeedingSession> {
        let mut sessions = self.read_sessions();
        session.id = sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        sessions.push(session.clone());
        self.write_sessions(&sessions)?;
        info!(
            "Stored feeding session {} for pup {} ({} items)",
            session.id,
            session.pup_id,
            session.food_items.len()
        );
        Ok(session)
    }

    fn update_session(&self, session: &FeedingSession) -> Result<bool> {
        let mut sessions = self.read_sessions();
        match sessions.iter().position(|s| s.id == session.id) {
            Some(index) => {
                sessions[index] = session.clone();
                self.write_sessions(&sessions)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_session(&self, session_id: i64) -> Result<bool> {
        let mut sessions = self.read_sessions();
        let original_len = sessions.len();
        sessions.retain(|s| s.id != session_id);
        if sessions.len() < original_len {
            self.write_sessions(&sessions)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn get_session(&self, session_id: i64) -> Option<FeedingSession> {
        self.read_sessions()
            .into_iter()
            .find(|s| s.id == session_id)
    }
}

/// Repository for the legacy `feeding_records.json` collection.
#[derive(Debug, Clone)]
pub struct FeedingRecordRepository {
    connection: JsonConnection,
}

impl FeedingRecordRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Vec<FeedingRecord> {
        self.connection
            .load_collection(&self.connection.feeding_records_path())
    }
}

impl FeedingRecordStorage for FeedingRecordRepository {
    fn list_records(&self) -> Vec<FeedingRecord> {
        self.read_records()
    }

    fn records_for_pup(&self, pup_id: i64) -> Vec<FeedingRecord> {
        self.read_records()
            .into_iter()
            .filter(|r| r.pup_id == pup_id)
            .collect()
    }

    fn add_record(&self, mut record: FeedingRecord) -> Result<FeedingRecord> {
        let mut records = self.read_records();
        record.id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(record.clone());
        self.connection
            .persist_collection(&self.connection.feeding_records_path(), &records)?;
        info!(
            "Stored legacy feeding record {} for pup {}",
            record.id, record.pup_id
        );
        Ok(record)
    }
}
