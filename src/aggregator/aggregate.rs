use std::collections::HashMap;

use tracing::debug;

use crate::aggregator::accumulator::CourseAccumulator;
use crate::aggregator::types::{CourseStatistics, CoursesSummary};
use crate::model::{HoleDetailRecord, RoundRecord};

/// Groups round history by course name and computes statistics on read.
///
/// Course identity is the exact course-name string. Courses are remembered in
/// the order they were first seen, which breaks ties when listing.
#[derive(Debug, Default)]
pub struct CourseAggregator {
    courses: HashMap<String, CourseAccumulator>,
    course_order: Vec<String>,
}

impl CourseAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an aggregator from full round and hole-detail exports.
    ///
    /// Hole details are matched to rounds by round id to find their course.
    /// Details whose round is unknown (or has no course) are dropped.
    pub fn from_records(rounds: &[RoundRecord], hole_details: &[HoleDetailRecord]) -> Self {
        let mut aggregator = Self::new();
        aggregator.add_rounds(rounds);

        let course_by_round: HashMap<&str, &str> = rounds
            .iter()
            .filter_map(|r| Some((r.id.as_deref()?, course_name(r)?)))
            .collect();

        let mut grouped: HashMap<&str, Vec<HoleDetailRecord>> = HashMap::new();
        let mut dropped = 0usize;
        for detail in hole_details {
            match detail
                .round_id
                .as_deref()
                .and_then(|id| course_by_round.get(id).copied())
            {
                Some(course) => grouped.entry(course).or_default().push(detail.clone()),
                None => dropped += 1,
            }
        }

        let order = aggregator.course_order.clone();
        for course in &order {
            if let Some(details) = grouped.get(course.as_str()) {
                aggregator.add_hole_details(course, details);
            }
        }

        debug!(
            courses = aggregator.course_count(),
            hole_details = hole_details.len(),
            dropped,
            "Aggregator built from records"
        );
        aggregator
    }

    /// Folds one round into its course. Rounds without a course name, or with
    /// an empty one, are ignored.
    pub fn add_round(&mut self, round: &RoundRecord) {
        let Some(name) = course_name(round) else {
            return;
        };

        if !self.courses.contains_key(name) {
            debug!(course = name, "New course");
            self.courses
                .insert(name.to_string(), CourseAccumulator::from_first_round(round));
            self.course_order.push(name.to_string());
        }

        if let Some(course) = self.courses.get_mut(name) {
            course.add_round(round);
        }
    }

    pub fn add_rounds(&mut self, rounds: &[RoundRecord]) {
        for round in rounds {
            self.add_round(round);
        }
        debug!(rounds = rounds.len(), courses = self.course_count(), "Rounds ingested");
    }

    /// Attaches hole-level observations to a course already seen through
    /// [`add_round`](Self::add_round). Unknown courses are ignored.
    pub fn add_hole_details(&mut self, course_name: &str, details: &[HoleDetailRecord]) {
        if let Some(course) = self.courses.get_mut(course_name) {
            course.add_hole_details(details);
        }
    }

    pub fn course_statistics(&self, course_name: &str) -> Option<CourseStatistics> {
        self.courses
            .get(course_name)
            .map(|course| course.statistics(course_name))
    }

    /// Every course, most rounds first. Equal counts keep first-seen order.
    pub fn all_course_statistics(&self) -> Vec<CourseStatistics> {
        let mut all: Vec<CourseStatistics> = self
            .course_order
            .iter()
            .filter_map(|name| self.course_statistics(name))
            .collect();
        all.sort_by(|a, b| b.total_rounds.cmp(&a.total_rounds));
        all
    }

    pub fn summary(&self) -> CoursesSummary {
        let all = self.all_course_statistics();

        CoursesSummary {
            total_courses: all.len(),
            total_rounds: all.iter().map(|c| c.total_rounds).sum(),
            total_rounds18: all.iter().map(|c| c.rounds18).sum(),
            total_rounds9: all.iter().map(|c| c.rounds9).sum(),
            most_played_course: all.first().cloned(),
            least_played_course: all.last().cloned(),
        }
    }

    /// Drops every course.
    pub fn clear(&mut self) {
        self.courses.clear();
        self.course_order.clear();
    }

    pub fn course_count(&self) -> usize {
        self.course_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.course_order.is_empty()
    }

    /// Course names in the order they were first seen.
    pub fn course_names(&self) -> impl Iterator<Item = &str> {
        self.course_order.iter().map(String::as_str)
    }
}

fn course_name(round: &RoundRecord) -> Option<&str> {
    round.course_name.as_deref().filter(|name| !name.is_empty())
}
