//! Record shapes exported by the round store.
//!
//! Field names follow the upstream schema: round and hole-detail records are
//! camelCase, the per-round statistics row keeps its snake_case column names.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One completed round as exported by the store.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de_id")]
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    #[serde(deserialize_with = "de_f64")]
    pub course_rating: Option<f64>,
    #[serde(deserialize_with = "de_i32")]
    pub slope_rating: Option<i32>,
    pub tee_name: Option<String>,
    #[serde(deserialize_with = "de_u32")]
    pub number_of_holes: Option<u32>,
    #[serde(deserialize_with = "de_i32")]
    pub adjusted_gross_score: Option<i32>,
    #[serde(deserialize_with = "de_f64")]
    pub differential: Option<f64>,
    #[serde(deserialize_with = "de_played_at")]
    pub played_at: Option<NaiveDate>,
    #[serde(deserialize_with = "de_i32")]
    pub net_score: Option<i32>,
    #[serde(deserialize_with = "de_i32")]
    pub course_handicap: Option<i32>,
    #[serde(alias = "round_statistics")]
    pub round_statistics: Vec<RoundStatisticsRow>,
}

/// Per-round statistics row. Every value is whatever the store handed back:
/// numbers, numeric strings, `"45%"`, `"null"` or nothing at all.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoundStatisticsRow {
    pub par3s_average: Value,
    pub par4s_average: Value,
    pub par5s_average: Value,
    pub birdies_or_better_percent: Value,
    pub pars_percent: Value,
    pub bogeys_percent: Value,
    pub double_bogeys_percent: Value,
    pub triple_bogeys_or_worse_percent: Value,
    pub total_putts: Value,
    pub fairway_hit_percent: Value,
    pub gir_percent: Value,
}

/// One hole played in a round.
///
/// `hole_number` is kept as read; the aggregator decides which holes count.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoleDetailRecord {
    #[serde(deserialize_with = "de_id")]
    pub round_id: Option<String>,
    #[serde(deserialize_with = "de_i32")]
    pub hole_number: Option<i32>,
    #[serde(deserialize_with = "de_i32")]
    pub par: Option<i32>,
    #[serde(deserialize_with = "de_i32")]
    pub adjusted_gross_score: Option<i32>,
    #[serde(deserialize_with = "de_i32")]
    pub putts: Option<i32>,
    #[serde(deserialize_with = "de_bool")]
    pub fairway_hit: Option<bool>,
    #[serde(deserialize_with = "de_bool")]
    pub green_in_regulation: Option<bool>,
}

// Scalar fields below never fail a record. A value of the wrong shape is read
// as missing, so one bad cell cannot sink the rest of an export.

/// Ids come back as integers or uuid strings depending on the table.
fn de_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub(crate) fn de_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(float))
}

pub(crate) fn de_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(integer)
        .and_then(|n| i32::try_from(n).ok()))
}

pub(crate) fn de_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(integer)
        .and_then(|n| u32::try_from(n).ok()))
}

pub(crate) fn de_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a plain date or a full RFC 3339 timestamp. Anything else is treated
/// as missing rather than failing the whole record.
fn de_played_at<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => parse_played_at(&s),
        _ => None,
    })
}

/// Whole numbers, integral floats (`18.0`) and numeric strings.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    f.filter(|f| f.is_finite())
}

pub(crate) fn parse_played_at(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_record_from_camel_case_json() {
        let round: RoundRecord = serde_json::from_value(json!({
            "id": 17,
            "courseId": "c-1",
            "courseName": "Pine Valley CC",
            "courseRating": 72.4,
            "slopeRating": 131,
            "teeName": "Blue",
            "numberOfHoles": 18,
            "adjustedGrossScore": 90,
            "differential": 15.1,
            "playedAt": "2024-05-04",
            "roundStatistics": [{ "par3s_average": "3.5", "pars_percent": "40%" }]
        }))
        .unwrap();

        assert_eq!(round.id.as_deref(), Some("17"));
        assert_eq!(round.course_id.as_deref(), Some("c-1"));
        assert_eq!(round.number_of_holes, Some(18));
        assert_eq!(round.played_at, NaiveDate::from_ymd_opt(2024, 5, 4));
        assert_eq!(round.net_score, None);
        assert_eq!(round.round_statistics.len(), 1);
        assert_eq!(round.round_statistics[0].par3s_average, json!("3.5"));
        assert_eq!(round.round_statistics[0].gir_percent, Value::Null);
    }

    #[test]
    fn test_played_at_accepts_timestamps() {
        assert_eq!(
            parse_played_at("2023-09-12T14:03:00+00:00"),
            NaiveDate::from_ymd_opt(2023, 9, 12)
        );
        assert_eq!(parse_played_at("yesterday"), None);
    }

    #[test]
    fn test_unparseable_played_at_is_missing() {
        let round: RoundRecord =
            serde_json::from_value(json!({ "courseName": "X", "playedAt": "n/a" })).unwrap();
        assert_eq!(round.played_at, None);
    }

    #[test]
    fn test_hole_detail_with_null_fields() {
        let hole: HoleDetailRecord = serde_json::from_value(json!({
            "roundId": "abc",
            "holeNumber": 7,
            "par": 4,
            "adjustedGrossScore": null,
            "fairwayHit": true
        }))
        .unwrap();

        assert_eq!(hole.round_id.as_deref(), Some("abc"));
        assert_eq!(hole.hole_number, Some(7));
        assert_eq!(hole.adjusted_gross_score, None);
        assert_eq!(hole.green_in_regulation, None);
    }

    #[test]
    fn test_loose_round_scalars() {
        let round: RoundRecord = serde_json::from_value(json!({
            "courseName": "X",
            "courseRating": "72.4",
            "slopeRating": "131",
            "numberOfHoles": "18",
            "adjustedGrossScore": 90.0,
            "differential": "n/a",
            "playedAt": 1714780800,
            "netScore": { "value": 74 }
        }))
        .unwrap();

        assert_eq!(round.course_rating, Some(72.4));
        assert_eq!(round.slope_rating, Some(131));
        assert_eq!(round.number_of_holes, Some(18));
        assert_eq!(round.adjusted_gross_score, Some(90));
        assert_eq!(round.differential, None);
        assert_eq!(round.played_at, None);
        assert_eq!(round.net_score, None);
    }

    #[test]
    fn test_negative_hole_count_is_missing() {
        let round: RoundRecord =
            serde_json::from_value(json!({ "numberOfHoles": -9 })).unwrap();
        assert_eq!(round.number_of_holes, None);
    }

    #[test]
    fn test_hole_number_kept_wide() {
        let hole: HoleDetailRecord = serde_json::from_value(json!({
            "holeNumber": 300,
            "par": "4",
            "putts": 2.5,
            "fairwayHit": "true",
            "greenInRegulation": 1
        }))
        .unwrap();

        assert_eq!(hole.hole_number, Some(300));
        assert_eq!(hole.par, Some(4));
        assert_eq!(hole.putts, None);
        assert_eq!(hole.fairway_hit, Some(true));
        assert_eq!(hole.green_in_regulation, None);
    }
}
