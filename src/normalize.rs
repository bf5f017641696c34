//! Defensive parsing of loosely-typed statistic values.

use serde_json::Value;

use crate::model::RoundStatisticsRow;

/// Converts a raw scalar from the store into a finite number.
///
/// Accepts numbers, numeric strings and percentage strings (`"45%"`). `null`,
/// empty strings and the literal `"null"` are treated as no value. When
/// `percent` is set, fractions strictly between 0 and 1 are scaled to whole
/// percentages.
pub fn normalize(value: &Value, percent: bool) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_str(s),
        _ => None,
    }
    .filter(|v| v.is_finite())?;

    if percent && parsed > 0.0 && parsed < 1.0 {
        Some(parsed * 100.0)
    } else {
        Some(parsed)
    }
}

fn parse_str(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return None;
    }
    let cleaned = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    cleaned.parse::<f64>().ok()
}

/// Declared valid range for a statistic series. The upper bound is always
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min: f64,
    pub min_inclusive: bool,
    pub max: f64,
}

impl ValidRange {
    /// `0 < v <= 10`
    pub const PAR_AVERAGE: ValidRange = ValidRange::above(0.0, 10.0);
    /// `0 <= v <= 100`
    pub const PERCENT: ValidRange = ValidRange::at_least(0.0, 100.0);
    /// `0 < v <= 72`
    pub const PUTTS: ValidRange = ValidRange::above(0.0, 72.0);

    const fn above(min: f64, max: f64) -> Self {
        ValidRange {
            min,
            min_inclusive: false,
            max,
        }
    }

    const fn at_least(min: f64, max: f64) -> Self {
        ValidRange {
            min,
            min_inclusive: true,
            max,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        let above_min = if self.min_inclusive {
            v >= self.min
        } else {
            v > self.min
        };
        above_min && v <= self.max
    }
}

/// The statistic columns collected from 18-hole rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Par3Average,
    Par4Average,
    Par5Average,
    BirdieOrBetterPercent,
    ParPercent,
    BogeyPercent,
    DoubleBogeyPercent,
    TripleBogeyOrWorsePercent,
    TotalPutts,
    FairwayHitPercent,
    GirPercent,
}

impl StatField {
    pub const ALL: [StatField; 11] = [
        StatField::Par3Average,
        StatField::Par4Average,
        StatField::Par5Average,
        StatField::BirdieOrBetterPercent,
        StatField::ParPercent,
        StatField::BogeyPercent,
        StatField::DoubleBogeyPercent,
        StatField::TripleBogeyOrWorsePercent,
        StatField::TotalPutts,
        StatField::FairwayHitPercent,
        StatField::GirPercent,
    ];

    pub fn range(self) -> ValidRange {
        match self {
            StatField::Par3Average | StatField::Par4Average | StatField::Par5Average => {
                ValidRange::PAR_AVERAGE
            }
            StatField::TotalPutts => ValidRange::PUTTS,
            _ => ValidRange::PERCENT,
        }
    }

    pub fn is_percent(self) -> bool {
        !matches!(
            self,
            StatField::Par3Average
                | StatField::Par4Average
                | StatField::Par5Average
                | StatField::TotalPutts
        )
    }

    /// Column name in the statistics table.
    pub fn column(self) -> &'static str {
        match self {
            StatField::Par3Average => "par3s_average",
            StatField::Par4Average => "par4s_average",
            StatField::Par5Average => "par5s_average",
            StatField::BirdieOrBetterPercent => "birdies_or_better_percent",
            StatField::ParPercent => "pars_percent",
            StatField::BogeyPercent => "bogeys_percent",
            StatField::DoubleBogeyPercent => "double_bogeys_percent",
            StatField::TripleBogeyOrWorsePercent => "triple_bogeys_or_worse_percent",
            StatField::TotalPutts => "total_putts",
            StatField::FairwayHitPercent => "fairway_hit_percent",
            StatField::GirPercent => "gir_percent",
        }
    }

    pub fn raw(self, row: &RoundStatisticsRow) -> &Value {
        match self {
            StatField::Par3Average => &row.par3s_average,
            StatField::Par4Average => &row.par4s_average,
            StatField::Par5Average => &row.par5s_average,
            StatField::BirdieOrBetterPercent => &row.birdies_or_better_percent,
            StatField::ParPercent => &row.pars_percent,
            StatField::BogeyPercent => &row.bogeys_percent,
            StatField::DoubleBogeyPercent => &row.double_bogeys_percent,
            StatField::TripleBogeyOrWorsePercent => &row.triple_bogeys_or_worse_percent,
            StatField::TotalPutts => &row.total_putts,
            StatField::FairwayHitPercent => &row.fairway_hit_percent,
            StatField::GirPercent => &row.gir_percent,
        }
    }

    /// Normalizes this field's value from `row` and keeps it only when it
    /// falls inside the declared range.
    pub fn extract(self, row: &RoundStatisticsRow) -> Option<f64> {
        normalize(self.raw(row), self.is_percent()).filter(|v| self.range().contains(*v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_null_like_values() {
        assert_eq!(normalize(&Value::Null, false), None);
        assert_eq!(normalize(&json!(""), false), None);
        assert_eq!(normalize(&json!("   "), false), None);
        assert_eq!(normalize(&json!("null"), false), None);
        assert_eq!(normalize(&json!(true), false), None);
        assert_eq!(normalize(&json!([1]), false), None);
    }

    #[test]
    fn test_normalize_numbers_and_strings() {
        assert_eq!(normalize(&json!(4), false), Some(4.0));
        assert_eq!(normalize(&json!("3.75"), false), Some(3.75));
        assert_eq!(normalize(&json!(" 42 % "), true), Some(42.0));
        assert_eq!(normalize(&json!("abc"), false), None);
        assert_eq!(normalize(&json!("NaN"), false), None);
        assert_eq!(normalize(&json!("inf"), false), None);
    }

    #[test]
    fn test_percentage_fraction_repair() {
        assert!(close(normalize(&json!("0.45"), true).unwrap(), 45.0));
        assert_eq!(normalize(&json!("45"), true), Some(45.0));
        // exactly 1 is not a fraction
        assert_eq!(normalize(&json!("1"), true), Some(1.0));
        assert_eq!(normalize(&json!("0"), true), Some(0.0));
        // without the percent flag nothing is scaled
        assert_eq!(normalize(&json!("0.45"), false), Some(0.45));
    }

    #[test]
    fn test_range_boundaries() {
        assert!(!ValidRange::PAR_AVERAGE.contains(0.0));
        assert!(ValidRange::PAR_AVERAGE.contains(10.0));
        assert!(!ValidRange::PAR_AVERAGE.contains(11.0));
        assert!(ValidRange::PERCENT.contains(0.0));
        assert!(ValidRange::PERCENT.contains(100.0));
        assert!(!ValidRange::PERCENT.contains(999.0));
        assert!(!ValidRange::PUTTS.contains(0.0));
        assert!(ValidRange::PUTTS.contains(72.0));
        assert!(!ValidRange::PUTTS.contains(73.0));
    }

    #[test]
    fn test_extract_drops_out_of_range() {
        let row = RoundStatisticsRow {
            par3s_average: json!("11"),
            par4s_average: json!("4.0"),
            pars_percent: json!("999%"),
            total_putts: json!(31),
            ..Default::default()
        };

        assert_eq!(StatField::Par3Average.extract(&row), None);
        assert_eq!(StatField::Par4Average.extract(&row), Some(4.0));
        assert_eq!(StatField::ParPercent.extract(&row), None);
        assert_eq!(StatField::TotalPutts.extract(&row), Some(31.0));
        assert_eq!(StatField::GirPercent.extract(&row), None);
    }

    #[test]
    fn test_putts_are_not_percent_scaled() {
        let row = RoundStatisticsRow {
            total_putts: json!("0.5"),
            ..Default::default()
        };
        assert_eq!(StatField::TotalPutts.extract(&row), Some(0.5));
    }
}
