//! JSON-backed pup repository.

use anyhow::Result;
use log::{debug, info};

use super::connection::JsonConnection;
use crate::domain::models::Pup;
use crate::storage::traits::PupStorage;

/// Repository for the `shark_pups.json` collection.
#[derive(Debug, Clone)]
pub struct PupRepository {
    connection: JsonConnection,
}

impl PupRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_pups(&self) -> Vec<Pup> {
        self.connection.load_collection(&self.connection.pups_path())
    }

    fn write_pups(&self, pups: &[Pup]) -> Result<()> {
        self.connection
            .persist_collection(&self.connection.pups_path(), pups)
    }
}

impl PupStorage for PupRepository {
    fn list_pups(&self) -> Vec<Pup> {
        self.read_pups()
    }

    fn add_pup(&self, mut pup: Pup) -> Result<Pup> {
        let mut pups = self.read_pups();
        pup.id = pups.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        pups.push(pup.clone());
        self.write_pups(&pups)?;
        info!("Stored pup '{}' with id {}", pup.name, pup.id);
        Ok(pup)
    }

    fn update_pup(&self, pup: &Pup) -> Result<bool> {
        let mut pups = self.read_pups();
        match pups.iter().position(|p| p.id == pup.id) {
            Some(index) => {
                pups[index] = pup.clone();
                self.write_pups(&pups)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_pup(&self, pup_id: i64) -> Result<bool> {
        let mut pups = self.read_pups();
        let original_len = pups.len();
        pups.retain(|p| p.id != pup_id);
        if pups.len() < original_len {
            self.write_pups(&pups)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn get_pup(&self, pup_id: i64) -> Option<Pup> {
        let pup = self.read_pups().into_iter().find(|p| p.id == pup_id);
        if pup.is_none() {
            debug!("Pup {} not found", pup_id);
        }
        pup
    }
}
