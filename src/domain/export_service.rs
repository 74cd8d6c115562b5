//! CSV export of the record collections.
//!
//! Two export shapes exist: one-collection spreadsheets (all pups, all
//! feeding sessions, all training records, all measurements) and a combined
//! per-pup report with one titled section per collection. Absent optional
//! values export as empty cells, and feeding sessions flatten to one row per
//! food item with the item and session notes folded into a single column.

use anyhow::Result;
use log::info;

use crate::domain::error::DomainError;
use crate::domain::models::{FeedingTime, Pup, Sex};
use crate::storage::json::{
    FeedingRecordRepository, FeedingSessionRepository, JsonConnection, MeasurementRepository,
    PupRepository, TrainingRepository,
};
use crate::storage::traits::{
    FeedingRecordStorage, FeedingSessionStorage, MeasurementStorage, PupStorage, TrainingStorage,
};

/// A rendered CSV document plus the filename it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ExportService {
    pup_repository: PupRepository,
    measurement_repository: MeasurementRepository,
    session_repository: FeedingSessionRepository,
    feeding_record_repository: FeedingRecordRepository,
    training_repository: TrainingRepository,
}

impl ExportService {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            pup_repository: PupRepository::new(connection.clone()),
            measurement_repository: MeasurementRepository::new(connection.clone()),
            session_repository: FeedingSessionRepository::new(connection.clone()),
            feeding_record_repository: FeedingRecordRepository::new(connection.clone()),
            training_repository: TrainingRepository::new(connection),
        }
    }

    /// Spreadsheet of every pup, one row each.
    pub fn export_pups(&self) -> Result<CsvExport> {
        let pups = self.pup_repository.list_pups();
        info!("Exporting {} pups as CSV", pups.len());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "ID",
            "Name",
            "Date Added",
            "Date of Birth",
            "Sex",
            "Mother ID",
            "Notes",
        ])?;
        for pup in &pups {
            writer.write_record([
                pup.id.to_string().as_str(),
                &pup.name,
                &pup.date,
                opt_str(&pup.date_of_birth),
                sex_label(pup.sex),
                opt_str(&pup.mother_id),
                opt_str(&pup.notes),
            ])?;
        }

        Ok(CsvExport {
            filename: "shark_pups.csv".to_string(),
            content: finish(writer)?,
        })
    }

    /// Spreadsheet of every feeding session, one row per food item.
    pub fn export_feeding_sessions(&self) -> Result<CsvExport> {
        let pups = self.pup_repository.list_pups();
        let sessions = self.session_repository.list_sessions();
        info!("Exporting {} feeding sessions as CSV", sessions.len());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "Session ID",
            "Pup ID",
            "Pup Name",
            "Date",
            "Time of Day",
            "Food Type",
            "Amount (g)",
            "Notes",
        ])?;
        for session in &sessions {
            let pup_name = pup_name(&pups, session.pup_id);
            for item in &session.food_items {
                writer.write_record([
                    session.id.to_string().as_str(),
                    session.pup_id.to_string().as_str(),
                    pup_name,
                    &session.date,
                    feeding_time_label(session.feeding_time),
                    &item.food_type,
                    item.amount.to_string().as_str(),
                    combined_notes(&item.notes, &session.session_notes).as_str(),
                ])?;
            }
        }

        Ok(CsvExport {
            filename: "feeding_sessions.csv".to_string(),
            content: finish(writer)?,
        })
    }

    /// Spreadsheet of every training record.
    pub fn export_training_records(&self) -> Result<CsvExport> {
        let pups = self.pup_repository.list_pups();
        let records = self.training_repository.list_training_records();
        info!("Exporting {} training records as CSV", records.len());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "Record ID",
            "Pup ID",
            "Pup Name",
            "Date",
            "Training Type",
            "Duration (min)",
            "Progress",
            "Notes",
        ])?;
        for record in &records {
            writer.write_record([
                record.id.to_string().as_str(),
                record.pup_id.to_string().as_str(),
                pup_name(&pups, record.pup_id),
                &record.date,
                &record.training_type,
                record.duration.to_string().as_str(),
                &record.progress,
                opt_str(&record.notes),
            ])?;
        }

        Ok(CsvExport {
            filename: "training_records.csv".to_string(),
            content: finish(writer)?,
        })
    }

    /// Spreadsheet of every measurement record.
    pub fn export_measurements(&self) -> Result<CsvExport> {
        let pups = self.pup_repository.list_pups();
        let measurements = self.measurement_repository.list_measurements();
        info!("Exporting {} measurements as CSV", measurements.len());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "Measurement ID",
            "Pup ID",
            "Pup Name",
            "Date",
            "Weight (g)",
            "Length (cm)",
            "Notes",
        ])?;
        for measurement in &measurements {
            writer.write_record([
                measurement.id.to_string().as_str(),
                measurement.pup_id.to_string().as_str(),
                pup_name(&pups, measurement.pup_id),
                &measurement.date,
                opt_f64(measurement.weight).as_str(),
                opt_f64(measurement.length).as_str(),
                opt_str(&measurement.notes),
            ])?;
        }

        Ok(CsvExport {
            filename: "measurements.csv".to_string(),
            content: finish(writer)?,
        })
    }

    /// Combined report for one pup: a titled section per collection, blank
    /// rows between them, and the legacy feeding section only when legacy
    /// records exist. The filename carries the pup's name with spaces
    /// replaced by underscores.
    pub fn export_pup_report(&self, pup_id: i64) -> Result<CsvExport> {
        let pup = self
            .pup_repository
            .get_pup(pup_id)
            .ok_or(DomainError::NotFound {
                entity: "pup",
                id: pup_id,
            })?;
        let measurements = self.measurement_repository.measurements_for_pup(pup_id);
        let sessions = self.session_repository.sessions_for_pup(pup_id);
        let legacy_records = self.feeding_record_repository.records_for_pup(pup_id);
        let training_records = self.training_repository.training_records_for_pup(pup_id);
        info!("Exporting combined report for pup {} ({})", pup.id, pup.name);

        // Section rows have differing widths, so the writer must not enforce
        // a uniform record length.
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record(["SHARK PUP INFORMATION"])?;
        writer.write_record([
            "ID",
            "Name",
            "Date Added",
            "Date of Birth",
            "Sex",
            "Mother ID",
            "Notes",
        ])?;
        writer.write_record([
            pup.id.to_string().as_str(),
            &pup.name,
            &pup.date,
            opt_str(&pup.date_of_birth),
            sex_label(pup.sex),
            opt_str(&pup.mother_id),
            opt_str(&pup.notes),
        ])?;
        // An empty record writes a bare row terminator; a lone empty field
        // would come out quoted.
        writer.write_record(None::<&[u8]>)?;

        writer.write_record(["MEASUREMENTS"])?;
        writer.write_record(["Date", "Weight (g)", "Length (cm)", "Notes"])?;
        for measurement in &measurements {
            writer.write_record([
                measurement.date.as_str(),
                opt_f64(measurement.weight).as_str(),
                opt_f64(measurement.length).as_str(),
                opt_str(&measurement.notes),
            ])?;
        }
        writer.write_record(None::<&[u8]>)?;

        writer.write_record(["FEEDING SESSIONS"])?;
        writer.write_record([
            "Date",
            "Time of Day",
            "Food Type",
            "Amount (g)",
            "Notes",
            "Researcher",
        ])?;
        for session in &sessions {
            for item in &session.food_items {
                writer.write_record([
                    session.date.as_str(),
                    feeding_time_label(session.feeding_time),
                    &item.food_type,
                    item.amount.to_string().as_str(),
                    combined_notes(&item.notes, &session.session_notes).as_str(),
                    opt_str(&session.researcher),
                ])?;
            }
        }

        if !legacy_records.is_empty() {
            writer.write_record(None::<&[u8]>)?;
            writer.write_record(["LEGACY FEEDING RECORDS"])?;
            writer.write_record(["Date", "Food Type", "Amount (g)", "Notes", "Researcher"])?;
            for record in &legacy_records {
                writer.write_record([
                    record.date.as_str(),
                    &record.food_type,
                    record.amount.to_string().as_str(),
                    opt_str(&record.notes),
                    "",
                ])?;
            }
        }
        writer.write_record(None::<&[u8]>)?;

        writer.write_record(["TRAINING RECORDS"])?;
        writer.write_record(["Date", "Training Type", "Duration (min)", "Progress", "Notes"])?;
        for record in &training_records {
            writer.write_record([
                record.date.as_str(),
                &record.training_type,
                record.duration.to_string().as_str(),
                &record.progress,
                opt_str(&record.notes),
            ])?;
        }

        Ok(CsvExport {
            filename: format!("shark_pup_{}.csv", pup.name.replace(' ', "_")),
            content: finish(writer)?,
        })
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("finalizing CSV output: {err}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn pup_name(pups: &[Pup], pup_id: i64) -> &str {
    pups.iter()
        .find(|p| p.id == pup_id)
        .map(|p| p.name.as_str())
        .unwrap_or("")
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn opt_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn sex_label(sex: Option<Sex>) -> &'static str {
    match sex {
        Some(Sex::Male) => "Male",
        Some(Sex::Female) => "Female",
        None => "",
    }
}

fn feeding_time_label(feeding_time: FeedingTime) -> &'static str {
    match feeding_time {
        FeedingTime::AM => "AM",
        FeedingTime::PM => "PM",
    }
}

/// Item notes and session notes folded into one cell, trimmed so a missing
/// half leaves no stray whitespace.
fn combined_notes(item_notes: &Option<String>, session_notes: &Option<String>) -> String {
    format!(
        "{} {}",
        item_notes.as_deref().unwrap_or(""),
        session_notes.as_deref().unwrap_or("")
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{FeedingRecord, FeedingSession, MeasurementRecord, PupStatus, TrainingRecord};
    use crate::storage::json::test_utils::TestHelper;

    fn service(helper: &TestHelper) -> ExportService {
        ExportService::new(helper.env.connection.clone())
    }

    #[test]
    fn pup_export_renders_blank_cells_for_missing_fields() -> Result<()> {
        let helper = TestHelper::new()?;
        helper.pup_repo.add_pup(Pup::new(
            "2024-05-01".to_string(),
            "Luna".to_string(),
            None,
            None,
            None,
            Some("2024-04-28".to_string()),
            None,
            Some(Sex::Female),
            Some("avery".to_string()),
            PupStatus::Live,
        ))?;

        let export = service(&helper).export_pups()?;
        assert_eq!(export.filename, "shark_pups.csv");
        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(
            lines[0],
            "ID,Name,Date Added,Date of Birth,Sex,Mother ID,Notes"
        );
        assert_eq!(lines[1], "1,Luna,2024-05-01,2024-04-28,Female,,");
        Ok(())
    }

    #[test]
    fn feeding_export_writes_one_row_per_food_item() -> Result<()> {
        let helper = TestHelper::new()?;
        let pup = helper.create_test_pup("Luna", "2024-05-01")?;
        let mut session = FeedingSession::new(
            pup.id,
            "2024-05-02".to_string(),
            Some("calm".to_string()),
            FeedingTime::PM,
            None,
        );
        session.add_food_item("Squid".to_string(), 5.0, Some("fresh".to_string()));
        session.add_food_item("Krill".to_string(), 2.5, None);
        helper.session_repo.add_session(session)?;

        let export = service(&helper).export_feeding_sessions()?;
        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,1,Luna,2024-05-02,PM,Squid,5,fresh calm");
        // Item without its own notes keeps only the session notes, trimmed.
        assert_eq!(lines[2], "1,1,Luna,2024-05-02,PM,Krill,2.5,calm");
        Ok(())
    }

    #[test]
    fn measurement_export_leaves_unrecorded_values_empty() -> Result<()> {
        let helper = TestHelper::new()?;
        let pup = helper.create_test_pup("Finn", "2024-05-01")?;
        helper.measurement_repo.add_measurement(MeasurementRecord::new(
            pup.id,
            "2024-05-03".to_string(),
            Some(950.0),
            None,
            None,
        ))?;

        let export = service(&helper).export_measurements()?;
        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(export.filename, "measurements.csv");
        assert_eq!(lines[1], "1,1,Finn,2024-05-03,950,,");
        Ok(())
    }

    #[test]
    fn training_export_lists_every_record() -> Result<()> {
        let helper = TestHelper::new()?;
        let pup = helper.create_test_pup("Finn", "2024-05-01")?;
        helper.training_repo.add_training_record(TrainingRecord::new(
            pup.id,
            "2024-05-04".to_string(),
            "Target feeding".to_string(),
            15,
            "Started".to_string(),
            None,
            None,
        ))?;

        let export = service(&helper).export_training_records()?;
        assert_eq!(export.filename, "training_records.csv");
        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(lines[1], "1,1,Finn,2024-05-04,Target feeding,15,Started,");
        Ok(())
    }

    #[test]
    fn pup_report_skips_legacy_section_without_legacy_records() -> Result<()> {
        let helper = TestHelper::new()?;
        let pup = helper.create_test_pup("Luna Nova", "2024-05-01")?;

        let export = service(&helper).export_pup_report(pup.id)?;
        assert_eq!(export.filename, "shark_pup_Luna_Nova.csv");
        assert!(export.content.contains("SHARK PUP INFORMATION"));
        assert!(export.content.contains("MEASUREMENTS"));
        assert!(export.content.contains("FEEDING SESSIONS"));
        assert!(export.content.contains("TRAINING RECORDS"));
        assert!(!export.content.contains("LEGACY FEEDING RECORDS"));
        Ok(())
    }

    #[test]
    fn pup_report_separator_rows_are_truly_empty() -> Result<()> {
        let helper = TestHelper::new()?;
        let pup = helper.create_test_pup("Luna", "2024-05-01")?;

        let export = service(&helper).export_pup_report(pup.id)?;
        // Separators are bare terminators, not a quoted empty field.
        assert!(!export.content.contains("\"\""));
        let lines: Vec<&str> = export.content.lines().collect();
        let measurements = lines
            .iter()
            .position(|line| *line == "MEASUREMENTS")
            .expect("measurements section");
        assert_eq!(lines[measurements - 1], "");
        Ok(())
    }

    #[test]
    fn pup_report_includes_legacy_section_when_records_exist() -> Result<()> {
        let helper = TestHelper::new()?;
        let pup = helper.create_test_pup("Luna", "2024-05-01")?;
        helper.feeding_record_repo.add_record(FeedingRecord::new(
            pup.id,
            "2024-05-02".to_string(),
            "Herring".to_string(),
            4.0,
            None,
        ))?;

        let export = service(&helper).export_pup_report(pup.id)?;
        assert!(export.content.contains("LEGACY FEEDING RECORDS"));
        assert!(export.content.contains("2024-05-02,Herring,4,,"));
        Ok(())
    }

    #[test]
    fn pup_report_for_unknown_pup_is_an_error() -> Result<()> {
        let helper = TestHelper::new()?;
        let err = service(&helper)
            .export_pup_report(99)
            .expect_err("missing pup must fail");
        let domain_err = err.downcast::<DomainError>()?;
        assert!(matches!(
            domain_err,
            DomainError::NotFound { entity: "pup", id: 99 }
        ));
        Ok(())
    }
}
