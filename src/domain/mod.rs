//! Domain layer: one service per record collection plus cross-collection
//! aggregation and export. Services own their repositories, accept command
//! structs carrying raw form values, and normalize those values (blank
//! strings become absent, numbers are parsed with typed errors) before
//! touching storage.

pub mod error;
pub mod export_service;
pub mod feeding_service;
pub mod measurement_service;
pub mod models;
pub mod pup_service;
pub mod statistics;
pub mod training_service;

pub use error::DomainError;
pub use export_service::{CsvExport, ExportService};
pub use feeding_service::{
    CreateFeedingSessionCommand, FeedingService, FoodItemInput, UpdateFeedingSessionCommand,
};
pub use measurement_service::{AddMeasurementCommand, MeasurementService, UpdateMeasurementCommand};
pub use pup_service::{CreatePupCommand, PupService, PupSortKey, SortOrder, UpdatePupCommand};
pub use statistics::StatisticsService;
pub use training_service::{CreateTrainingCommand, TrainingService, UpdateTrainingCommand};
