//! Pup entry management.

use anyhow::Result;
use log::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::{Pup, PupStatus, Sex};
use crate::storage::json::{JsonConnection, PupRepository};
use crate::storage::traits::PupStorage;

/// Typed input for creating a pup entry. The boundary layer is expected to
/// have normalized blank form fields to `None` before building this.
#[derive(Debug, Clone)]
pub struct CreatePupCommand {
    pub date: String,
    pub name: String,
    pub notes: Option<String>,
    pub length: Option<f64>,
    pub weight: Option<f64>,
    pub date_of_birth: Option<String>,
    pub mother_id: Option<String>,
    pub sex: Option<Sex>,
    pub researcher: Option<String>,
    pub status: PupStatus,
}

/// Sparse patch built from raw form fields. `None` leaves a field untouched;
/// for optional fields an empty string clears the stored value. `researcher`
/// is intentionally absent: attribution is set at creation and never edited.
#[derive(Debug, Clone, Default)]
pub struct UpdatePupCommand {
    pub date: Option<String>,
    pub name: Option<String>,
    pub length: Option<String>,
    pub weight: Option<String>,
    pub notes: Option<String>,
    pub date_of_birth: Option<String>,
    pub mother_id: Option<String>,
    pub sex: Option<String>,
    pub status: Option<String>,
}

/// Sort key for pup listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PupSortKey {
    Date,
    Name,
    Length,
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Service for managing pup entries.
#[derive(Debug, Clone)]
pub struct PupService {
    pup_repository: PupRepository,
}

impl PupService {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            pup_repository: PupRepository::new(connection),
        }
    }

    pub fn create_pup(&self, command: CreatePupCommand) -> Result<Pup> {
        info!("Creating pup entry: name={}", command.name);
        let pup = Pup::new(
            command.date,
            command.name,
            command.notes,
            command.length,
            command.weight,
            command.date_of_birth,
            command.mother_id,
            command.sex,
            command.researcher,
            command.status,
        );
        self.pup_repository.add_pup(pup)
    }

    pub fn get_pup(&self, pup_id: i64) -> Option<Pup> {
        self.pup_repository.get_pup(pup_id)
    }

    /// List every pup, sorted for display. Pups missing the requested
    /// numeric field always sort to the end, whichever direction is asked.
    pub fn list_pups(&self, sort_by: PupSortKey, order: SortOrder) -> Vec<Pup> {
        let mut pups = self.pup_repository.list_pups();
        let ascending = order == SortOrder::Ascending;

        match sort_by {
            PupSortKey::Date => pups.sort_by(|a, b| {
                if ascending {
                    a.date.cmp(&b.date)
                } else {
                    b.date.cmp(&a.date)
                }
            }),
            PupSortKey::Name => pups.sort_by(|a, b| {
                if ascending {
                    a.name.cmp(&b.name)
                } else {
                    b.name.cmp(&a.name)
                }
            }),
            PupSortKey::Length => Self::sort_by_optional(&mut pups, ascending, |p| p.length),
            PupSortKey::Weight => Self::sort_by_optional(&mut pups, ascending, |p| p.weight),
        }
        pups
    }

    fn sort_by_optional(pups: &mut [Pup], ascending: bool, field: impl Fn(&Pup) -> Option<f64>) {
        let key = |pup: &Pup| {
            // Missing values land at the end in either direction.
            field(pup).unwrap_or(if ascending {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            })
        };
        pups.sort_by(|a, b| {
            if ascending {
                key(a).total_cmp(&key(b))
            } else {
                key(b).total_cmp(&key(a))
            }
        });
    }

    /// Apply a sparse patch to one pup. Returns `Ok(None)` when the id is
    /// unknown, in which case nothing is written.
    pub fn update_pup(&self, pup_id: i64, command: UpdatePupCommand) -> Result<Option<Pup>> {
        let Some(mut pup) = self.pup_repository.get_pup(pup_id) else {
            warn!("Pup {} not found for updating", pup_id);
            return Ok(None);
        };

        if let Some(date) = command.date {
            pup.date = date;
        }
        if let Some(name) = command.name {
            pup.name = name;
        }
        if let Some(raw) = command.length {
            pup.length = parse_optional_f64("length", &raw)?;
        }
        if let Some(raw) = command.weight {
            pup.weight = parse_optional_f64("weight", &raw)?;
        }
        if let Some(notes) = command.notes {
            pup.notes = blank_to_none(notes);
        }
        if let Some(date_of_birth) = command.date_of_birth {
            pup.date_of_birth = blank_to_none(date_of_birth);
        }
        if let Some(mother_id) = command.mother_id {
            pup.mother_id = blank_to_none(mother_id);
        }
        if let Some(raw) = command.sex {
            pup.sex = parse_sex(&raw)?;
        }
        if let Some(raw) = command.status {
            pup.status = parse_status(&raw)?;
        }

        self.pup_repository.update_pup(&pup)?;
        info!("Updated pup {}", pup_id);
        Ok(Some(pup))
    }

    pub fn delete_pup(&self, pup_id: i64) -> Result<bool> {
        self.pup_repository.delete_pup(pup_id)
    }
}

fn blank_to_none(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_optional_f64(field: &'static str, raw: &str) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let value = raw
        .parse::<f64>()
        .map_err(|_| DomainError::invalid(field, raw))?;
    Ok(Some(value))
}

fn parse_sex(raw: &str) -> Result<Option<Sex>> {
    match raw {
        "" => Ok(None),
        "Male" => Ok(Some(Sex::Male)),
        "Female" => Ok(Some(Sex::Female)),
        other => Err(DomainError::invalid("sex", other).into()),
    }
}

fn parse_status(raw: &str) -> Result<PupStatus> {
    match raw {
        "live" => Ok(PupStatus::Live),
        "stillborn" => Ok(PupStatus::Stillborn),
        other => Err(DomainError::invalid("status", other).into()),
    }
}
