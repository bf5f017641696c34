//! Data types produced by the course aggregator.

use chrono::NaiveDate;
use serde::Serialize;

/// Compact per-round entry kept for each round-length bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub id: Option<String>,
    pub score: Option<i32>,
    pub differential: Option<f64>,
    pub played_at: Option<NaiveDate>,
    pub net_score: Option<i32>,
    pub course_handicap: Option<i32>,
}

/// One hole-detail observation recorded against a course's hole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleObservation {
    pub round_id: Option<String>,
    pub par: Option<i32>,
    pub adjusted_gross_score: Option<i32>,
    pub putts: Option<i32>,
    pub fairway_hit: Option<bool>,
    pub green_in_regulation: Option<bool>,
}

/// How one hole has played across every recorded round at the course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolePerformance {
    pub hole: u8,
    pub par: i32,
    pub avg_score: f64,
    pub over_under_par: f64,
    pub rounds_played: usize,
    pub best_score: i32,
    pub worst_score: i32,
}

/// Scoring aggregates for one round-length bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStats {
    pub rounds: usize,
    pub avg_score: Option<f64>,
    pub best_score: Option<i32>,
    pub worst_score: Option<i32>,
    pub avg_differential: Option<f64>,
}

/// Read-only statistics for a single course, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStatistics {
    pub course_name: String,
    pub course_rating: Option<f64>,
    pub slope_rating: Option<i32>,
    pub tee_names: Vec<String>,

    pub total_rounds: usize,
    pub rounds18: usize,
    pub rounds9: usize,

    pub avg_score18: Option<f64>,
    pub best_score18: Option<i32>,
    pub worst_score18: Option<i32>,
    pub avg_differential18: Option<f64>,

    pub avg_score9: Option<f64>,
    pub best_score9: Option<i32>,
    pub worst_score9: Option<i32>,
    pub avg_differential9: Option<f64>,

    pub avg_par3: Option<f64>,
    pub avg_par4: Option<f64>,
    pub avg_par5: Option<f64>,
    pub par3_vs_par: Option<f64>,
    pub par4_vs_par: Option<f64>,
    pub par5_vs_par: Option<f64>,

    pub birdie_or_better_percent: Option<f64>,
    pub par_percent: Option<f64>,
    pub bogey_percent: Option<f64>,
    pub double_bogey_percent: Option<f64>,
    pub triple_bogey_or_worse_percent: Option<f64>,
    /// Double bogey plus triple-or-worse, with a missing series counted as 0.
    pub double_plus_percent: f64,

    pub avg_putts: Option<f64>,
    pub fairway_hit_percent: Option<f64>,
    pub gir_percent: Option<f64>,

    pub hole_performance: Vec<HolePerformance>,

    pub round_history18: Vec<RoundSummary>,
    pub round_history9: Vec<RoundSummary>,
}

/// Totals across every known course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesSummary {
    pub total_courses: usize,
    pub total_rounds: usize,
    pub total_rounds18: usize,
    pub total_rounds9: usize,
    pub most_played_course: Option<CourseStatistics>,
    pub least_played_course: Option<CourseStatistics>,
}
