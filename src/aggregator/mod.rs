//! Course statistics aggregation.
//!
//! Rounds are bucketed by course name as they are ingested. Every derived
//! value (averages, best/worst, hole-by-hole performance, the cross-course
//! summary) is computed when it is read, never stored.

pub mod accumulator;
pub mod aggregate;
pub mod types;
pub mod utility;

pub use aggregate::CourseAggregator;
pub use types::{CourseStatistics, CoursesSummary, HolePerformance, RoundSummary};
