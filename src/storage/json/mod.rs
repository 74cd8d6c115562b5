//! # JSON Storage Module
//!
//! Flat-file persistence: one JSON array file per entity collection, read in
//! full on every access and rewritten in full on every mutation. This trades
//! throughput and concurrency safety for simplicity; writes go through a
//! temp-file rename so an interrupted rewrite never corrupts the previous
//! contents, but there is no locking and concurrent writers can lose updates.

pub mod connection;
pub mod feeding_repository;
pub mod measurement_repository;
pub mod pup_repository;
pub mod training_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use feeding_repository::{FeedingRecordRepository, FeedingSessionRepository};
pub use measurement_repository::MeasurementRepository;
pub use pup_repository::PupRepository;
pub use training_repository::TrainingRepository;
