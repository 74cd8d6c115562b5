//! Storage layer: per-collection traits and the JSON flat-file backend.

pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{
    FeedingRecordStorage, FeedingSessionStorage, MeasurementStorage, PupStorage, TrainingStorage,
};
