//! Output formatting and persistence for course statistics.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::CourseStatistics;
use csv::WriterBuilder;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Scalar columns of a [`CourseStatistics`], one CSV row per course.
#[derive(Debug, Serialize)]
pub struct CourseRow<'a> {
    pub course_name: &'a str,
    pub course_rating: Option<f64>,
    pub slope_rating: Option<i32>,
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
    pub birdie_or_better_percent: Option<f64>,
    pub par_percent: Option<f64>,
    pub bogey_percent: Option<f64>,
    pub double_plus_percent: f64,
    pub avg_putts: Option<f64>,
    pub fairway_hit_percent: Option<f64>,
    pub gir_percent: Option<f64>,
}

impl<'a> From<&'a CourseStatistics> for CourseRow<'a> {
    fn from(s: &'a CourseStatistics) -> Self {
        CourseRow {
            course_name: &s.course_name,
            course_rating: s.course_rating,
            slope_rating: s.slope_rating,
            total_rounds: s.total_rounds,
            rounds18: s.rounds18,
            rounds9: s.rounds9,
            avg_score18: s.avg_score18,
            best_score18: s.best_score18,
            worst_score18: s.worst_score18,
            avg_differential18: s.avg_differential18,
            avg_score9: s.avg_score9,
            best_score9: s.best_score9,
            worst_score9: s.worst_score9,
            avg_differential9: s.avg_differential9,
            avg_par3: s.avg_par3,
            avg_par4: s.avg_par4,
            avg_par5: s.avg_par5,
            birdie_or_better_percent: s.birdie_or_better_percent,
            par_percent: s.par_percent,
            bogey_percent: s.bogey_percent,
            double_plus_percent: s.double_plus_percent,
            avg_putts: s.avg_putts,
            fairway_hit_percent: s.fairway_hit_percent,
            gir_percent: s.gir_percent,
        }
    }
}

/// Logs course statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &CourseStatistics) {
    debug!("{:#?}", stats);
}

/// Logs any report value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a report value as pretty-printed JSON, replacing the file.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path, "JSON report written");
    Ok(())
}

/// Appends a [`CourseRow`] for `stats` to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, stats: &CourseStatistics) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(CourseRow::from(stats))?;
    writer.flush()?;

    Ok(())
}
