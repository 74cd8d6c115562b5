//! Aggregate statistics over the record collections.
//!
//! Every function here is a pure read: it pulls whole collections from the
//! repositories, folds them in memory, and returns a fixed-shape payload
//! struct meant for direct serialization to a chart or summary view. Null
//! handling is part of the contract: averages and extremes ignore absent
//! values entirely (they are never treated as zero), and ratios over empty
//! sets come back as zero rather than dividing by nothing.

use chrono::NaiveDate;
use log::error;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::models::{FeedingSession, MeasurementRecord, PupStatus};
use crate::storage::json::{
    FeedingSessionRepository, JsonConnection, MeasurementRepository, PupRepository,
    TrainingRepository,
};
use crate::storage::traits::{
    FeedingSessionStorage, MeasurementStorage, PupStorage, TrainingStorage,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Birth outcome breakdown for one mother shark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotherStats {
    pub mother_id: String,
    pub total: usize,
    pub live: usize,
    pub stillborn: usize,
}

/// Population-level summary over all pups. Averages and extremes cover only
/// pups where the field is recorded; with no values at all they are 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PupStatistics {
    pub count: usize,
    pub live_count: usize,
    pub stillborn_count: usize,
    pub avg_length: f64,
    pub avg_weight: f64,
    pub min_length: f64,
    pub max_length: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    /// Ordered by first appearance; pups without a mother reference are
    /// bucketed under "Unknown".
    pub mother_stats: Vec<MotherStats>,
}

/// Parallel arrays for the monthly chart, labels sorted in calendar order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyData {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
    pub avg_lengths: Vec<f64>,
    pub avg_weights: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodTypeAmount {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Food-item level feeding summary, flattened across sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedingStatistics {
    pub total_records: usize,
    pub food_types: Vec<FoodTypeAmount>,
    pub food_type_data: ChartData,
    pub avg_amount: f64,
    pub max_amount: f64,
    pub min_amount: f64,
    /// Food type with the largest summed amount, "None" when there is no
    /// data. Ties keep the first type encountered.
    pub most_common_food: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodTypeSessionStats {
    pub name: String,
    pub count: usize,
    pub amount: f64,
    pub avg_amount: f64,
}

/// Session-level feeding summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedingSessionStatistics {
    pub count: usize,
    pub food_types: Vec<FoodTypeSessionStats>,
    pub avg_items_per_session: f64,
    pub total_amount: f64,
    pub avg_amount_per_session: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingTypeCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingStatistics {
    pub count: usize,
    pub training_types: Vec<TrainingTypeCount>,
    pub progress_breakdown: Vec<ProgressCount>,
    pub avg_duration: f64,
}

/// Min/max/avg and growth rate for one measured quantity. All fields are
/// `None` when no values exist; `growth_rate` additionally requires two
/// dated values spanning more than zero days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct SeriesStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    /// Average per-day change between the earliest and latest observation.
    pub growth_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthStatistics {
    pub total_records: usize,
    pub weight_stats: SeriesStats,
    pub length_stats: SeriesStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyFeedingStats {
    pub total_sessions: usize,
    pub avg_daily_amount: f64,
    pub max_daily_amount: f64,
    pub min_daily_amount: f64,
}

/// Per-day feeding totals and per-type totals for one pup's chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedingChart {
    pub dates: Vec<String>,
    pub amounts: Vec<f64>,
    pub food_type_labels: Vec<String>,
    pub food_type_values: Vec<f64>,
    pub stats: Option<DailyFeedingStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PupFeedingSummary {
    pub pup_id: i64,
    pub name: String,
    pub total_amount: f64,
    pub session_count: usize,
    /// Summed amounts aligned with `FeedingComparison::food_types`.
    pub amounts: Vec<f64>,
    /// Food type with the largest summed amount for this pup.
    pub preferred_food: Option<String>,
}

/// Cross-pup feeding comparison over the live population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedingComparison {
    pub food_types: Vec<String>,
    pub pups: Vec<PupFeedingSummary>,
}

/// Read-only aggregation over the record collections.
#[derive(Debug, Clone)]
pub struct StatisticsService {
    pup_repository: PupRepository,
    measurement_repository: MeasurementRepository,
    session_repository: FeedingSessionRepository,
    training_repository: TrainingRepository,
}

impl StatisticsService {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            pup_repository: PupRepository::new(connection.clone()),
            measurement_repository: MeasurementRepository::new(connection.clone()),
            session_repository: FeedingSessionRepository::new(connection.clone()),
            training_repository: TrainingRepository::new(connection),
        }
    }

    /// Population counts, null-excluding extremes/averages of the legacy
    /// birth measurements, and the per-mother breakdown.
    pub fn calculate_statistics(&self) -> PupStatistics {
        let pups = self.pup_repository.list_pups();

        let lengths: Vec<f64> = pups.iter().filter_map(|p| p.length).collect();
        let weights: Vec<f64> = pups.iter().filter_map(|p| p.weight).collect();

        let mut mother_stats: Vec<MotherStats> = Vec::new();
        for pup in &pups {
            let mother_id = match pup.mother_id.as_deref() {
                Some(id) if !id.is_empty() => id.to_string(),
                _ => "Unknown".to_string(),
            };
            let index = match mother_stats.iter().position(|m| m.mother_id == mother_id) {
                Some(index) => index,
                None => {
                    mother_stats.push(MotherStats {
                        mother_id,
                        total: 0,
                        live: 0,
                        stillborn: 0,
                    });
                    mother_stats.len() - 1
                }
            };
            let entry = &mut mother_stats[index];
            entry.total += 1;
            match pup.status {
                PupStatus::Live => entry.live += 1,
                PupStatus::Stillborn => entry.stillborn += 1,
            }
        }

        PupStatistics {
            count: pups.len(),
            live_count: pups.iter().filter(|p| p.status == PupStatus::Live).count(),
            stillborn_count: pups
                .iter()
                .filter(|p| p.status == PupStatus::Stillborn)
                .count(),
            avg_length: mean(&lengths),
            avg_weight: mean(&weights),
            min_length: fold_min(&lengths),
            max_length: fold_max(&lengths),
            min_weight: fold_min(&weights),
            max_weight: fold_max(&weights),
            mother_stats,
        }
    }

    /// Pups grouped by entry month. Every pup with a parseable date counts
    /// toward its bucket; averages cover the pups in the bucket that carry
    /// the field. Unparseable dates are logged and skipped.
    pub fn get_monthly_data(&self) -> MonthlyData {
        #[derive(Default)]
        struct MonthAgg {
            count: usize,
            lengths: Vec<f64>,
            weights: Vec<f64>,
        }

        let mut monthly: BTreeMap<String, MonthAgg> = BTreeMap::new();
        for pup in self.pup_repository.list_pups() {
            let Ok(date) = NaiveDate::parse_from_str(&pup.date, DATE_FORMAT) else {
                error!("Error processing pup date {}", pup.date);
                continue;
            };
            let month_key = date.format("%Y-%m").to_string();
            let agg = monthly.entry(month_key).or_default();
            agg.count += 1;
            if let Some(length) = pup.length {
                agg.lengths.push(length);
            }
            if let Some(weight) = pup.weight {
                agg.weights.push(weight);
            }
        }

        let mut data = MonthlyData {
            labels: Vec::new(),
            counts: Vec::new(),
            avg_lengths: Vec::new(),
            avg_weights: Vec::new(),
        };
        for (month, agg) in monthly {
            data.labels.push(month);
            data.counts.push(agg.count);
            data.avg_lengths.push(mean(&agg.lengths));
            data.avg_weights.push(mean(&agg.weights));
        }
        data
    }

    /// Food-item level statistics over all sessions, or one pup's.
    pub fn get_feeding_statistics(&self, pup_id: Option<i64>) -> FeedingStatistics {
        let sessions = self.sessions(pup_id);

        let mut amounts: Vec<f64> = Vec::new();
        // First-occurrence order so a ranking tie stays deterministic.
        let mut food_type_amounts: Vec<(String, f64)> = Vec::new();
        for session in &sessions {
            for item in &session.food_items {
                amounts.push(item.amount);
                match food_type_amounts
                    .iter_mut()
                    .find(|(name, _)| *name == item.food_type)
                {
                    Some((_, total)) => *total += item.amount,
                    None => food_type_amounts.push((item.food_type.clone(), item.amount)),
                }
            }
        }

        let mut most_common_food = "None".to_string();
        let mut max_food_amount = 0.0;
        for (name, amount) in &food_type_amounts {
            if *amount > max_food_amount {
                max_food_amount = *amount;
                most_common_food = name.clone();
            }
        }

        FeedingStatistics {
            total_records: amounts.len(),
            food_types: food_type_amounts
                .iter()
                .map(|(name, amount)| FoodTypeAmount {
                    name: name.clone(),
                    amount: *amount,
                })
                .collect(),
            food_type_data: ChartData {
                labels: food_type_amounts.iter().map(|(n, _)| n.clone()).collect(),
                values: food_type_amounts.iter().map(|(_, a)| *a).collect(),
            },
            avg_amount: mean(&amounts),
            max_amount: fold_max(&amounts),
            min_amount: fold_min(&amounts),
            most_common_food,
        }
    }

    /// Session-level statistics over all sessions, or one pup's.
    pub fn get_feeding_sessions_statistics(&self, pup_id: Option<i64>) -> FeedingSessionStatistics {
        let sessions = self.sessions(pup_id);

        let mut food_types: Vec<(String, usize, f64)> = Vec::new();
        let mut total_amount = 0.0;
        let mut all_items_count = 0usize;
        for session in &sessions {
            for item in &session.food_items {
                all_items_count += 1;
                total_amount += item.amount;
                match food_types
                    .iter_mut()
                    .find(|(name, _, _)| *name == item.food_type)
                {
                    Some((_, count, amount)) => {
                        *count += 1;
                        *amount += item.amount;
                    }
                    None => food_types.push((item.food_type.clone(), 1, item.amount)),
                }
            }
        }

        let session_count = sessions.len();
        FeedingSessionStatistics {
            count: session_count,
            food_types: food_types
                .into_iter()
                .map(|(name, count, amount)| FoodTypeSessionStats {
                    name,
                    count,
                    amount,
                    avg_amount: amount / count as f64,
                })
                .collect(),
            avg_items_per_session: ratio(all_items_count as f64, session_count),
            total_amount,
            avg_amount_per_session: ratio(total_amount, session_count),
        }
    }

    /// Training counts by type and progress status, plus average duration.
    pub fn get_training_statistics(&self, pup_id: Option<i64>) -> TrainingStatistics {
        let records = match pup_id {
            Some(pup_id) => self.training_repository.training_records_for_pup(pup_id),
            None => self.training_repository.list_training_records(),
        };

        let mut training_types: Vec<TrainingTypeCount> = Vec::new();
        let mut progress_breakdown: Vec<ProgressCount> = Vec::new();
        let mut total_duration = 0i64;
        for record in &records {
            total_duration += record.duration;
            match training_types
                .iter_mut()
                .find(|t| t.name == record.training_type)
            {
                Some(entry) => entry.count += 1,
                None => training_types.push(TrainingTypeCount {
                    name: record.training_type.clone(),
                    count: 1,
                }),
            }
            match progress_breakdown
                .iter_mut()
                .find(|p| p.status == record.progress)
            {
                Some(entry) => entry.count += 1,
                None => progress_breakdown.push(ProgressCount {
                    status: record.progress.clone(),
                    count: 1,
                }),
            }
        }

        TrainingStatistics {
            count: records.len(),
            training_types,
            progress_breakdown,
            avg_duration: ratio(total_duration as f64, records.len()),
        }
    }

    /// Growth statistics from the measurement collection, for the whole
    /// population or one pup.
    pub fn get_growth_statistics(&self, pup_id: Option<i64>) -> GrowthStatistics {
        let measurements = match pup_id {
            Some(pup_id) => self.measurement_repository.measurements_for_pup(pup_id),
            None => self.measurement_repository.list_measurements(),
        };

        GrowthStatistics {
            total_records: measurements.len(),
            weight_stats: series_stats(&measurements, |m| m.weight),
            length_stats: series_stats(&measurements, |m| m.length),
        }
    }

    /// Per-day summed feeding amounts for one pup's chart, with per-food-type
    /// totals for the accompanying pie chart.
    pub fn get_feeding_chart(&self, pup_id: i64) -> FeedingChart {
        let sessions = self.session_repository.sessions_for_pup(pup_id);

        let mut daily: BTreeMap<String, f64> = BTreeMap::new();
        let mut food_type_totals: Vec<(String, f64)> = Vec::new();
        for session in &sessions {
            let day = daily.entry(session.date.clone()).or_insert(0.0);
            for item in &session.food_items {
                *day += item.amount;
                match food_type_totals
                    .iter_mut()
                    .find(|(name, _)| *name == item.food_type)
                {
                    Some((_, total)) => *total += item.amount,
                    None => food_type_totals.push((item.food_type.clone(), item.amount)),
                }
            }
        }

        let dates: Vec<String> = daily.keys().cloned().collect();
        let amounts: Vec<f64> = daily.values().copied().collect();
        let stats = if amounts.is_empty() {
            None
        } else {
            Some(DailyFeedingStats {
                total_sessions: sessions.len(),
                avg_daily_amount: mean(&amounts),
                max_daily_amount: fold_max(&amounts),
                min_daily_amount: fold_min(&amounts),
            })
        };

        FeedingChart {
            dates,
            amounts,
            food_type_labels: food_type_totals.iter().map(|(n, _)| n.clone()).collect(),
            food_type_values: food_type_totals.iter().map(|(_, a)| *a).collect(),
            stats,
        }
    }

    /// Feeding comparison across the live population: per-pup totals, summed
    /// amounts per food type (aligned to a sorted food type axis), and each
    /// pup's preferred food by summed amount.
    pub fn get_feeding_comparison(&self) -> FeedingComparison {
        let live_pups: Vec<_> = self
            .pup_repository
            .list_pups()
            .into_iter()
            .filter(|p| p.status == PupStatus::Live)
            .collect();

        let mut all_food_types: Vec<String> = Vec::new();
        let mut per_pup: Vec<(i64, String, usize, Vec<(String, f64)>)> = Vec::new();
        for pup in &live_pups {
            let sessions = self.session_repository.sessions_for_pup(pup.id);
            let mut totals: Vec<(String, f64)> = Vec::new();
            for session in &sessions {
                for item in &session.food_items {
                    if !all_food_types.contains(&item.food_type) {
                        all_food_types.push(item.food_type.clone());
                    }
                    match totals.iter_mut().find(|(name, _)| *name == item.food_type) {
                        Some((_, total)) => *total += item.amount,
                        None => totals.push((item.food_type.clone(), item.amount)),
                    }
                }
            }
            per_pup.push((pup.id, pup.name.clone(), sessions.len(), totals));
        }
        all_food_types.sort();

        let pups = per_pup
            .into_iter()
            .map(|(pup_id, name, session_count, totals)| {
                let amounts: Vec<f64> = all_food_types
                    .iter()
                    .map(|food_type| {
                        totals
                            .iter()
                            .find(|(name, _)| name == food_type)
                            .map(|(_, amount)| *amount)
                            .unwrap_or(0.0)
                    })
                    .collect();
                let mut preferred_food: Option<&(String, f64)> = None;
                for entry in &totals {
                    match preferred_food {
                        Some(best) if entry.1 <= best.1 => {}
                        _ => preferred_food = Some(entry),
                    }
                }
                PupFeedingSummary {
                    pup_id,
                    name,
                    total_amount: totals.iter().map(|(_, a)| *a).sum(),
                    session_count,
                    amounts,
                    preferred_food: preferred_food.map(|(name, _)| name.clone()),
                }
            })
            .collect();

        FeedingComparison {
            food_types: all_food_types,
            pups,
        }
    }

    fn sessions(&self, pup_id: Option<i64>) -> Vec<FeedingSession> {
        match pup_id {
            Some(pup_id) => self.session_repository.sessions_for_pup(pup_id),
            None => self.session_repository.list_sessions(),
        }
    }
}

/// Min/max/avg over the non-null values of one measured field, plus the
/// growth rate between the earliest and latest dated observation.
fn series_stats(
    measurements: &[MeasurementRecord],
    field: impl Fn(&MeasurementRecord) -> Option<f64>,
) -> SeriesStats {
    let mut dated: Vec<(&str, f64)> = measurements
        .iter()
        .filter_map(|m| field(m).map(|value| (m.date.as_str(), value)))
        .collect();
    if dated.is_empty() {
        return SeriesStats::default();
    }

    let values: Vec<f64> = dated.iter().map(|(_, v)| *v).collect();
    let mut stats = SeriesStats {
        min: Some(fold_min(&values)),
        max: Some(fold_max(&values)),
        avg: Some(mean(&values)),
        growth_rate: None,
    };

    if dated.len() >= 2 {
        // Stable sort: same-day observations keep their stored order, so the
        // earliest/latest picks are deterministic. ISO dates sort correctly
        // as strings.
        dated.sort_by_key(|(date, _)| *date);
        let (first_date, first_value) = dated[0];
        let (last_date, last_value) = dated[dated.len() - 1];
        if let (Ok(first), Ok(last)) = (
            NaiveDate::parse_from_str(first_date, DATE_FORMAT),
            NaiveDate::parse_from_str(last_date, DATE_FORMAT),
        ) {
            let days = (last - first).num_days();
            if days > 0 {
                stats.growth_rate = Some((last_value - first_value) / days as f64);
            }
        }
    }
    stats
}

fn ratio(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn fold_min(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

fn fold_max(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{FeedingTime, Pup, Sex};
    use crate::storage::json::test_utils::TestHelper;
    use anyhow::Result;

    fn pup_with(
        name: &str,
        date: &str,
        length: Option<f64>,
        weight: Option<f64>,
        mother_id: Option<&str>,
        status: PupStatus,
    ) -> Pup {
        Pup::new(
            date.to_string(),
            name.to_string(),
            None,
            length,
            weight,
            None,
            mother_id.map(|m| m.to_string()),
            Some(Sex::Female),
            Some("avery".to_string()),
            status,
        )
    }

    fn session(pup_id: i64, date: &str, items: &[(&str, f64)]) -> crate::domain::models::FeedingSession {
        let mut session = crate::domain::models::FeedingSession::new(
            pup_id,
            date.to_string(),
            None,
            FeedingTime::AM,
            None,
        );
        for (food_type, amount) in items {
            session.add_food_item(food_type.to_string(), *amount, None);
        }
        session
    }

    fn service(helper: &TestHelper) -> StatisticsService {
        StatisticsService::new(helper.env.connection.clone())
    }

    #[test]
    fn averages_exclude_missing_values() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .pup_repo
            .add_pup(pup_with("A", "2024-01-01", Some(10.0), None, None, PupStatus::Live))?;
        helper
            .pup_repo
            .add_pup(pup_with("B", "2024-01-02", None, None, None, PupStatus::Live))?;
        helper
            .pup_repo
            .add_pup(pup_with("C", "2024-01-03", Some(20.0), None, None, PupStatus::Live))?;

        let stats = service(&helper).calculate_statistics();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.avg_length, 15.0);
        assert_eq!(stats.min_length, 10.0);
        assert_eq!(stats.max_length, 20.0);
        // No weights recorded at all.
        assert_eq!(stats.avg_weight, 0.0);
        Ok(())
    }

    #[test]
    fn mother_breakdown_buckets_missing_ids_under_unknown() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .pup_repo
            .add_pup(pup_with("A", "2024-01-01", None, None, Some("M-01"), PupStatus::Live))?;
        helper
            .pup_repo
            .add_pup(pup_with("B", "2024-01-02", None, None, Some("M-01"), PupStatus::Stillborn))?;
        helper
            .pup_repo
            .add_pup(pup_with("C", "2024-01-03", None, None, None, PupStatus::Live))?;

        let stats = service(&helper).calculate_statistics();
        assert_eq!(stats.live_count, 2);
        assert_eq!(stats.stillborn_count, 1);
        assert_eq!(stats.mother_stats.len(), 2);
        assert_eq!(stats.mother_stats[0].mother_id, "M-01");
        assert_eq!(stats.mother_stats[0].total, 2);
        assert_eq!(stats.mother_stats[0].stillborn, 1);
        assert_eq!(stats.mother_stats[1].mother_id, "Unknown");
        Ok(())
    }

    #[test]
    fn empty_population_yields_zeroed_statistics() -> Result<()> {
        let helper = TestHelper::new()?;
        let stats = service(&helper).calculate_statistics();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.avg_length, 0.0);
        assert!(stats.mother_stats.is_empty());
        Ok(())
    }

    #[test]
    fn monthly_buckets_come_out_in_calendar_order() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .pup_repo
            .add_pup(pup_with("A", "2024-01-05", Some(10.0), Some(900.0), None, PupStatus::Live))?;
        helper
            .pup_repo
            .add_pup(pup_with("B", "2024-02-01", Some(12.0), Some(950.0), None, PupStatus::Live))?;
        helper
            .pup_repo
            .add_pup(pup_with("C", "2024-01-20", Some(14.0), None, None, PupStatus::Live))?;

        let monthly = service(&helper).get_monthly_data();
        assert_eq!(monthly.labels, vec!["2024-01", "2024-02"]);
        assert_eq!(monthly.counts, vec![2, 1]);
        assert_eq!(monthly.avg_lengths, vec![12.0, 12.0]);
        // January's average weight covers only the pup that has one.
        assert_eq!(monthly.avg_weights, vec![900.0, 950.0]);
        Ok(())
    }

    #[test]
    fn unparseable_dates_are_skipped_from_monthly_data() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .pup_repo
            .add_pup(pup_with("A", "not-a-date", None, None, None, PupStatus::Live))?;
        helper
            .pup_repo
            .add_pup(pup_with("B", "2024-03-01", None, None, None, PupStatus::Live))?;

        let monthly = service(&helper).get_monthly_data();
        assert_eq!(monthly.labels, vec!["2024-03"]);
        assert_eq!(monthly.counts, vec![1]);
        Ok(())
    }

    #[test]
    fn most_common_food_ranks_by_summed_amount() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-01", &[("A", 5.0), ("B", 12.0)]))?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-02", &[("A", 3.0)]))?;

        let stats = service(&helper).get_feeding_statistics(None);
        assert_eq!(stats.total_records, 3);
        // A occurs twice (8g total) but B wins on amount.
        assert_eq!(stats.most_common_food, "B");
        assert_eq!(stats.food_types[0], FoodTypeAmount { name: "A".to_string(), amount: 8.0 });
        assert_eq!(stats.min_amount, 3.0);
        assert_eq!(stats.max_amount, 12.0);
        Ok(())
    }

    #[test]
    fn feeding_statistics_scope_to_one_pup() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-01", &[("Squid", 5.0)]))?;
        helper
            .session_repo
            .add_session(session(2, "2024-04-01", &[("Krill", 9.0)]))?;

        let stats = service(&helper).get_feeding_statistics(Some(1));
        assert_eq!(stats.total_records, 1);
        assert_eq!(stats.most_common_food, "Squid");
        Ok(())
    }

    #[test]
    fn empty_feeding_statistics_have_the_none_sentinel() -> Result<()> {
        let helper = TestHelper::new()?;
        let stats = service(&helper).get_feeding_statistics(None);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.most_common_food, "None");
        assert_eq!(stats.avg_amount, 0.0);
        Ok(())
    }

    #[test]
    fn session_statistics_average_per_session() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-01", &[("Squid", 6.0), ("Krill", 2.0)]))?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-02", &[("Squid", 4.0)]))?;

        let stats = service(&helper).get_feeding_sessions_statistics(None);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.avg_items_per_session, 1.5);
        assert_eq!(stats.total_amount, 12.0);
        assert_eq!(stats.avg_amount_per_session, 6.0);
        let squid = stats
            .food_types
            .iter()
            .find(|f| f.name == "Squid")
            .expect("squid stats");
        assert_eq!(squid.count, 2);
        assert_eq!(squid.amount, 10.0);
        assert_eq!(squid.avg_amount, 5.0);
        Ok(())
    }

    #[test]
    fn per_session_averages_are_zero_for_an_empty_collection() -> Result<()> {
        let helper = TestHelper::new()?;
        let service = service(&helper);

        let session_stats = service.get_feeding_sessions_statistics(None);
        assert_eq!(session_stats.count, 0);
        assert_eq!(session_stats.avg_items_per_session, 0.0);
        assert_eq!(session_stats.avg_amount_per_session, 0.0);

        let training_stats = service.get_training_statistics(None);
        assert_eq!(training_stats.count, 0);
        assert_eq!(training_stats.avg_duration, 0.0);
        Ok(())
    }

    #[test]
    fn training_statistics_count_types_and_progress() -> Result<()> {
        let helper = TestHelper::new()?;
        for (training_type, progress, duration) in [
            ("Target", "Started", 10),
            ("Target", "Completed", 20),
            ("Gate", "Started", 30),
        ] {
            helper
                .training_repo
                .add_training_record(crate::domain::models::TrainingRecord::new(
                    1,
                    "2024-06-01".to_string(),
                    training_type.to_string(),
                    duration,
                    progress.to_string(),
                    None,
                    None,
                ))?;
        }

        let stats = service(&helper).get_training_statistics(None);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.avg_duration, 20.0);
        assert_eq!(stats.training_types[0], TrainingTypeCount { name: "Target".to_string(), count: 2 });
        assert_eq!(
            stats
                .progress_breakdown
                .iter()
                .find(|p| p.status == "Started")
                .map(|p| p.count),
            Some(2)
        );
        Ok(())
    }

    #[test]
    fn growth_rate_is_grams_per_day_between_first_and_last() -> Result<()> {
        let helper = TestHelper::new()?;
        helper.measurement_repo.add_measurement(MeasurementRecord::new(
            1,
            "2024-01-01".to_string(),
            Some(1000.0),
            None,
            None,
        ))?;
        helper.measurement_repo.add_measurement(MeasurementRecord::new(
            1,
            "2024-01-11".to_string(),
            Some(1200.0),
            None,
            None,
        ))?;

        let stats = service(&helper).get_growth_statistics(Some(1));
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.weight_stats.growth_rate, Some(20.0));
        assert_eq!(stats.weight_stats.min, Some(1000.0));
        assert_eq!(stats.weight_stats.max, Some(1200.0));
        assert_eq!(stats.weight_stats.avg, Some(1100.0));
        // No lengths recorded.
        assert_eq!(stats.length_stats, SeriesStats::default());
        Ok(())
    }

    #[test]
    fn single_measurement_has_no_growth_rate() -> Result<()> {
        let helper = TestHelper::new()?;
        helper.measurement_repo.add_measurement(MeasurementRecord::new(
            1,
            "2024-01-01".to_string(),
            Some(1000.0),
            None,
            None,
        ))?;

        let stats = service(&helper).get_growth_statistics(Some(1));
        assert_eq!(stats.weight_stats.growth_rate, None);
        assert_eq!(stats.weight_stats.avg, Some(1000.0));
        Ok(())
    }

    #[test]
    fn same_day_measurements_leave_growth_rate_unavailable() -> Result<()> {
        let helper = TestHelper::new()?;
        for weight in [1000.0, 1010.0] {
            helper.measurement_repo.add_measurement(MeasurementRecord::new(
                1,
                "2024-01-01".to_string(),
                Some(weight),
                None,
                None,
            ))?;
        }

        let stats = service(&helper).get_growth_statistics(Some(1));
        // Zero-day span: unavailable, not infinite and not zero.
        assert_eq!(stats.weight_stats.growth_rate, None);
        Ok(())
    }

    #[test]
    fn growth_fields_are_independent() -> Result<()> {
        let helper = TestHelper::new()?;
        // Weight on both dates, length only once.
        helper.measurement_repo.add_measurement(MeasurementRecord::new(
            1,
            "2024-02-01".to_string(),
            Some(900.0),
            Some(30.0),
            None,
        ))?;
        helper.measurement_repo.add_measurement(MeasurementRecord::new(
            1,
            "2024-02-06".to_string(),
            Some(950.0),
            None,
            None,
        ))?;

        let stats = service(&helper).get_growth_statistics(Some(1));
        assert_eq!(stats.weight_stats.growth_rate, Some(10.0));
        assert_eq!(stats.length_stats.growth_rate, None);
        assert_eq!(stats.length_stats.avg, Some(30.0));
        Ok(())
    }

    #[test]
    fn feeding_chart_sums_amounts_per_day() -> Result<()> {
        let helper = TestHelper::new()?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-02", &[("Squid", 4.0)]))?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-01", &[("Squid", 3.0), ("Krill", 1.0)]))?;
        helper
            .session_repo
            .add_session(session(1, "2024-04-01", &[("Squid", 2.0)]))?;

        let chart = service(&helper).get_feeding_chart(1);
        assert_eq!(chart.dates, vec!["2024-04-01", "2024-04-02"]);
        assert_eq!(chart.amounts, vec![6.0, 4.0]);
        let stats = chart.stats.expect("chart stats");
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.max_daily_amount, 6.0);
        assert_eq!(stats.min_daily_amount, 4.0);
        Ok(())
    }

    #[test]
    fn comparison_covers_live_pups_only() -> Result<()> {
        let helper = TestHelper::new()?;
        let live = helper
            .pup_repo
            .add_pup(pup_with("Luna", "2024-01-01", None, None, None, PupStatus::Live))?;
        let stillborn = helper
            .pup_repo
            .add_pup(pup_with("Ghost", "2024-01-02", None, None, None, PupStatus::Stillborn))?;
        helper
            .session_repo
            .add_session(session(live.id, "2024-04-01", &[("Squid", 5.0), ("Krill", 7.0)]))?;
        helper
            .session_repo
            .add_session(session(stillborn.id, "2024-04-01", &[("Herring", 2.0)]))?;

        let comparison = service(&helper).get_feeding_comparison();
        assert_eq!(comparison.pups.len(), 1);
        assert_eq!(comparison.food_types, vec!["Krill", "Squid"]);
        let summary = &comparison.pups[0];
        assert_eq!(summary.name, "Luna");
        assert_eq!(summary.total_amount, 12.0);
        assert_eq!(summary.amounts, vec![7.0, 5.0]);
        assert_eq!(summary.preferred_food, Some("Krill".to_string()));
        Ok(())
    }
}
