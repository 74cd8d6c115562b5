//! Plain data records persisted by the flat-file collections.

pub mod feeding;
pub mod measurement;
pub mod pup;
pub mod training;

pub use feeding::{FeedingRecord, FeedingSession, FeedingTime, FoodItem};
pub use measurement::MeasurementRecord;
pub use pup::{Pup, PupStatus, Sex};
pub use training::TrainingRecord;
