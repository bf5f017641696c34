use serde::Serialize;
use serde_json::Value;

use crate::model::{HoleDetailRecord, RoundStatisticsRow};
use crate::round::ScoreCategory;

/// Statistics for one round, derived from its hole details.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RoundStatistics {
    pub holes: usize,
    pub scored_holes: usize,

    pub par3s_average: Option<f64>,
    pub par4s_average: Option<f64>,
    pub par5s_average: Option<f64>,

    pub birdies_or_better: usize,
    pub pars: usize,
    pub bogeys: usize,
    pub double_bogeys: usize,
    pub triple_bogeys_or_worse: usize,

    pub total_putts: Option<i32>,

    // fairway only applies off the tee of a par 4 or 5
    pub fairway_attempts: usize,
    pub fairways_hit: usize,
    pub gir_attempts: usize,
    pub greens_hit: usize,
}

impl RoundStatistics {
    pub fn from_holes(holes: &[HoleDetailRecord]) -> Self {
        let mut s = RoundStatistics {
            holes: holes.len(),
            ..Default::default()
        };

        let mut par_scores: [Vec<i32>; 3] = Default::default();
        let mut putts: Vec<i32> = Vec::new();

        for h in holes {
            if let (Some(score), Some(par)) = (h.adjusted_gross_score, h.par) {
                s.scored_holes += 1;

                if (3..=5).contains(&par) {
                    par_scores[(par - 3) as usize].push(score);
                }

                match ScoreCategory::from_to_par(score - par) {
                    ScoreCategory::BirdieOrBetter => s.birdies_or_better += 1,
                    ScoreCategory::Par => s.pars += 1,
                    ScoreCategory::Bogey => s.bogeys += 1,
                    ScoreCategory::DoubleBogey => s.double_bogeys += 1,
                    ScoreCategory::TripleBogeyOrWorse => s.triple_bogeys_or_worse += 1,
                }
            }

            if let Some(p) = h.putts {
                putts.push(p);
            }

            if let Some(hit) = h.fairway_hit {
                if h.par.is_some_and(|par| par >= 4) {
                    s.fairway_attempts += 1;
                    if hit {
                        s.fairways_hit += 1;
                    }
                }
            }

            if let Some(gir) = h.green_in_regulation {
                s.gir_attempts += 1;
                if gir {
                    s.greens_hit += 1;
                }
            }
        }

        let [par3, par4, par5] = &par_scores;
        s.par3s_average = average(par3);
        s.par4s_average = average(par4);
        s.par5s_average = average(par5);
        s.total_putts = (!putts.is_empty()).then(|| putts.iter().sum());

        s
    }

    /// Share of `part` in `total` as a whole percentage; `None` when nothing
    /// was attempted.
    pub fn pct(part: usize, total: usize) -> Option<f64> {
        if total == 0 {
            None
        } else {
            Some((part as f64 / total as f64) * 100.0)
        }
    }

    pub fn score_pct(&self, category: ScoreCategory) -> Option<f64> {
        let count = match category {
            ScoreCategory::BirdieOrBetter => self.birdies_or_better,
            ScoreCategory::Par => self.pars,
            ScoreCategory::Bogey => self.bogeys,
            ScoreCategory::DoubleBogey => self.double_bogeys,
            ScoreCategory::TripleBogeyOrWorse => self.triple_bogeys_or_worse,
        };
        Self::pct(count, self.scored_holes)
    }

    pub fn fairway_pct(&self) -> Option<f64> {
        Self::pct(self.fairways_hit, self.fairway_attempts)
    }

    pub fn gir_pct(&self) -> Option<f64> {
        Self::pct(self.greens_hit, self.gir_attempts)
    }

    /// The row shape the store keeps, so computed statistics go through the
    /// same normalization as stored ones.
    pub fn to_row(&self) -> RoundStatisticsRow {
        RoundStatisticsRow {
            par3s_average: number(self.par3s_average),
            par4s_average: number(self.par4s_average),
            par5s_average: number(self.par5s_average),
            birdies_or_better_percent: number(self.score_pct(ScoreCategory::BirdieOrBetter)),
            pars_percent: number(self.score_pct(ScoreCategory::Par)),
            bogeys_percent: number(self.score_pct(ScoreCategory::Bogey)),
            double_bogeys_percent: number(self.score_pct(ScoreCategory::DoubleBogey)),
            triple_bogeys_or_worse_percent: number(
                self.score_pct(ScoreCategory::TripleBogeyOrWorse),
            ),
            total_putts: number(self.total_putts.map(f64::from)),
            fairway_hit_percent: number(self.fairway_pct()),
            gir_percent: number(self.gir_pct()),
        }
    }
}

fn average(scores: &[i32]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<i32>() as f64 / scores.len() as f64)
}

fn number(v: Option<f64>) -> Value {
    v.and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
