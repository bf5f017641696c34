//! Running per-course state and the snapshot computed from it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::trace;

use crate::aggregator::types::{
    BucketStats, CourseStatistics, HoleObservation, HolePerformance, RoundSummary,
};
use crate::aggregator::utility::{mean, mean_i32, versus};
use crate::model::{HoleDetailRecord, RoundRecord, RoundStatisticsRow};
use crate::normalize::StatField;
use crate::round::RoundLength;

pub const MIN_HOLE: u8 = 1;
pub const MAX_HOLE: u8 = 18;

/// Append-only state for one course.
#[derive(Debug, Clone, Default)]
pub struct CourseAccumulator {
    pub(crate) course_rating: Option<f64>,
    pub(crate) slope_rating: Option<i32>,
    pub(crate) tee_names: BTreeSet<String>,
    pub(crate) rounds18: Vec<RoundSummary>,
    pub(crate) rounds9: Vec<RoundSummary>,
    pub(crate) series: HashMap<StatField, Vec<f64>>,
    pub(crate) holes: BTreeMap<u8, Vec<HoleObservation>>,
}

impl CourseAccumulator {
    /// Starts a course from its first round. Rating and slope are taken from
    /// this round and never updated afterwards.
    pub fn from_first_round(round: &RoundRecord) -> Self {
        CourseAccumulator {
            course_rating: round.course_rating,
            slope_rating: round.slope_rating,
            ..Default::default()
        }
    }

    pub fn add_round(&mut self, round: &RoundRecord) {
        if let Some(tee) = &round.tee_name {
            self.tee_names.insert(tee.clone());
        }

        match round.holes_played() {
            Some(RoundLength::Eighteen) => {
                self.rounds18.push(RoundSummary::from(round));
                if let Some(row) = round.first_statistics() {
                    self.add_statistics(row);
                }
            }
            Some(RoundLength::Nine) => {
                self.rounds9.push(RoundSummary::from(round));
            }
            None => {
                trace!(
                    round_id = ?round.id,
                    number_of_holes = ?round.number_of_holes,
                    "Round length not recognized, not counted"
                );
            }
        }
    }

    fn add_statistics(&mut self, row: &RoundStatisticsRow) {
        for field in StatField::ALL {
            match field.extract(row) {
                Some(value) => self.series.entry(field).or_default().push(value),
                None => trace!(
                    column = field.column(),
                    raw = %field.raw(row),
                    "Statistic dropped"
                ),
            }
        }
    }

    pub fn add_hole_details(&mut self, details: &[HoleDetailRecord]) {
        for detail in details {
            let Some(hole) = detail
                .hole_number
                .and_then(|h| u8::try_from(h).ok())
                .filter(|h| (MIN_HOLE..=MAX_HOLE).contains(h))
            else {
                trace!(hole_number = ?detail.hole_number, "Hole number out of range");
                continue;
            };

            self.holes
                .entry(hole)
                .or_default()
                .push(HoleObservation::from(detail));
        }
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds18.len() + self.rounds9.len()
    }

    fn series_mean(&self, field: StatField) -> Option<f64> {
        self.series.get(&field).and_then(|s| mean(s))
    }

    /// Computes the statistics snapshot. Pure over the current state.
    pub fn statistics(&self, course_name: &str) -> CourseStatistics {
        let b18 = bucket_stats(&self.rounds18);
        let b9 = bucket_stats(&self.rounds9);

        let avg_par3 = self.series_mean(StatField::Par3Average);
        let avg_par4 = self.series_mean(StatField::Par4Average);
        let avg_par5 = self.series_mean(StatField::Par5Average);

        let double_bogey_percent = self.series_mean(StatField::DoubleBogeyPercent);
        let triple_bogey_or_worse_percent =
            self.series_mean(StatField::TripleBogeyOrWorsePercent);

        CourseStatistics {
            course_name: course_name.to_string(),
            course_rating: self.course_rating,
            slope_rating: self.slope_rating,
            tee_names: self.tee_names.iter().cloned().collect(),

            total_rounds: self.total_rounds(),
            rounds18: b18.rounds,
            rounds9: b9.rounds,

            avg_score18: b18.avg_score,
            best_score18: b18.best_score,
            worst_score18: b18.worst_score,
            avg_differential18: b18.avg_differential,

            avg_score9: b9.avg_score,
            best_score9: b9.best_score,
            worst_score9: b9.worst_score,
            avg_differential9: b9.avg_differential,

            avg_par3,
            avg_par4,
            avg_par5,
            par3_vs_par: versus(avg_par3, 3.0),
            par4_vs_par: versus(avg_par4, 4.0),
            par5_vs_par: versus(avg_par5, 5.0),

            birdie_or_better_percent: self.series_mean(StatField::BirdieOrBetterPercent),
            par_percent: self.series_mean(StatField::ParPercent),
            bogey_percent: self.series_mean(StatField::BogeyPercent),
            double_bogey_percent,
            triple_bogey_or_worse_percent,
            double_plus_percent: double_bogey_percent.unwrap_or(0.0)
                + triple_bogey_or_worse_percent.unwrap_or(0.0),

            avg_putts: self.series_mean(StatField::TotalPutts),
            fairway_hit_percent: self.series_mean(StatField::FairwayHitPercent),
            gir_percent: self.series_mean(StatField::GirPercent),

            hole_performance: self.hole_performance(),

            round_history18: self.rounds18.clone(),
            round_history9: self.rounds9.clone(),
        }
    }

    /// Holes 1 through 18 in order, skipping holes without a usable observation.
    pub fn hole_performance(&self) -> Vec<HolePerformance> {
        (MIN_HOLE..=MAX_HOLE)
            .filter_map(|hole| {
                let observations = self.holes.get(&hole)?;
                hole_performance(hole, observations)
            })
            .collect()
    }
}

fn bucket_stats(rounds: &[RoundSummary]) -> BucketStats {
    let scores: Vec<i32> = rounds.iter().filter_map(|r| r.score).collect();
    let differentials: Vec<f64> = rounds.iter().filter_map(|r| r.differential).collect();

    BucketStats {
        rounds: rounds.len(),
        avg_score: mean_i32(&scores),
        best_score: scores.iter().copied().min(),
        worst_score: scores.iter().copied().max(),
        avg_differential: mean(&differentials),
    }
}

fn hole_performance(hole: u8, observations: &[HoleObservation]) -> Option<HolePerformance> {
    let valid: Vec<(i32, i32)> = observations
        .iter()
        .filter_map(|o| Some((o.adjusted_gross_score?, o.par?)))
        .collect();

    let (_, par) = *valid.first()?;
    let scores: Vec<i32> = valid.iter().map(|&(score, _)| score).collect();
    let avg_score = mean_i32(&scores)?;

    Some(HolePerformance {
        hole,
        par,
        avg_score,
        over_under_par: avg_score - f64::from(par),
        rounds_played: scores.len(),
        best_score: scores.iter().copied().min()?,
        worst_score: scores.iter().copied().max()?,
    })
}

impl From<&RoundRecord> for RoundSummary {
    fn from(round: &RoundRecord) -> Self {
        RoundSummary {
            id: round.id.clone(),
            score: round.adjusted_gross_score,
            differential: round.differential,
            played_at: round.played_at,
            net_score: round.net_score,
            course_handicap: round.course_handicap,
        }
    }
}

impl From<&HoleDetailRecord> for HoleObservation {
    fn from(detail: &HoleDetailRecord) -> Self {
        HoleObservation {
            round_id: detail.round_id.clone(),
            par: detail.par,
            adjusted_gross_score: detail.adjusted_gross_score,
            putts: detail.putts,
            fairway_hit: detail.fairway_hit,
            green_in_regulation: detail.green_in_regulation,
        }
    }
}
