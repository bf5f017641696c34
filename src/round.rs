//! Derived values on single rounds and holes.

use crate::model::{HoleDetailRecord, RoundRecord, RoundStatisticsRow};

/// Slope rating of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

/// The two round lengths the store records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundLength {
    Nine,
    Eighteen,
}

impl RoundLength {
    pub fn from_holes(holes: u32) -> Option<Self> {
        match holes {
            9 => Some(RoundLength::Nine),
            18 => Some(RoundLength::Eighteen),
            _ => None,
        }
    }
}

impl RoundRecord {
    pub fn holes_played(&self) -> Option<RoundLength> {
        self.number_of_holes.and_then(RoundLength::from_holes)
    }

    /// The statistics row for this round. Only the first embedded row counts.
    pub fn first_statistics(&self) -> Option<&RoundStatisticsRow> {
        self.round_statistics.first()
    }

    /// Differential recomputed from score, rating and slope.
    pub fn computed_differential(&self) -> Option<f64> {
        score_differential(
            self.adjusted_gross_score?,
            self.course_rating?,
            self.slope_rating?,
        )
    }
}

/// Reference score differential: `(113 / slope) * (AGS - rating)`, rounded to
/// one decimal. `None` when the slope is not positive.
pub fn score_differential(
    adjusted_gross_score: i32,
    course_rating: f64,
    slope_rating: i32,
) -> Option<f64> {
    if slope_rating <= 0 {
        return None;
    }
    let raw = STANDARD_SLOPE / f64::from(slope_rating)
        * (f64::from(adjusted_gross_score) - course_rating);
    Some((raw * 10.0).round() / 10.0)
}

/// Simplified handicap index: averages the best 8 of the 20 most recent
/// differentials and truncates to one decimal. With fewer than 8 rounds all of
/// them are averaged; fewer than 3 gives `None`.
///
/// `differentials` must be ordered most recent first. This is a reference
/// formula only, not a certified calculation.
pub fn handicap_index(differentials: &[f64]) -> Option<f64> {
    const WINDOW: usize = 20;
    const COUNTED: usize = 8;
    const MINIMUM: usize = 3;

    let mut recent: Vec<f64> = differentials
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .take(WINDOW)
        .collect();
    if recent.len() < MINIMUM {
        return None;
    }

    recent.sort_by(f64::total_cmp);
    let best = &recent[..recent.len().min(COUNTED)];
    let avg = best.iter().sum::<f64>() / best.len() as f64;
    Some((avg * 10.0).trunc() / 10.0)
}

/// Scoring outcome of a hole relative to par.
///
/// | Strokes vs par | Category             |
/// |----------------|----------------------|
/// | <= -1          | `BirdieOrBetter`     |
/// | 0              | `Par`                |
/// | +1             | `Bogey`              |
/// | +2             | `DoubleBogey`        |
/// | >= +3          | `TripleBogeyOrWorse` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreCategory {
    BirdieOrBetter,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogeyOrWorse,
}

impl ScoreCategory {
    pub fn from_to_par(to_par: i32) -> Self {
        match to_par {
            i32::MIN..=-1 => ScoreCategory::BirdieOrBetter,
            0 => ScoreCategory::Par,
            1 => ScoreCategory::Bogey,
            2 => ScoreCategory::DoubleBogey,
            _ => ScoreCategory::TripleBogeyOrWorse,
        }
    }
}

impl HoleDetailRecord {
    /// Strokes over (positive) or under (negative) par.
    pub fn to_par(&self) -> Option<i32> {
        Some(self.adjusted_gross_score? - self.par?)
    }

    pub fn score_category(&self) -> Option<ScoreCategory> {
        self.to_par().map(ScoreCategory::from_to_par)
    }
}
