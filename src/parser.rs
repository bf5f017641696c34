//! Parsers for round and hole-detail exports.

use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{HoleDetailRecord, RoundRecord, de_bool, de_i32};

/// Decodes a JSON array of [`RoundRecord`]s.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON array of round objects.
pub fn parse_rounds(bytes: &[u8]) -> Result<Vec<RoundRecord>> {
    serde_json::from_slice(bytes).context("rounds export is not a JSON array of rounds")
}

/// Decodes a JSON array of [`HoleDetailRecord`]s.
pub fn parse_hole_details(bytes: &[u8]) -> Result<Vec<HoleDetailRecord>> {
    serde_json::from_slice(bytes).context("hole details export is not a JSON array of holes")
}

/// A hole-detail CSV row. The round id is read as text so `007` stays `007`
/// and still joins to the round export.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct HoleDetailCsvRow {
    round_id: Option<String>,
    #[serde(deserialize_with = "de_i32")]
    hole_number: Option<i32>,
    #[serde(deserialize_with = "de_i32")]
    par: Option<i32>,
    #[serde(deserialize_with = "de_i32")]
    adjusted_gross_score: Option<i32>,
    #[serde(deserialize_with = "de_i32")]
    putts: Option<i32>,
    #[serde(deserialize_with = "de_bool")]
    fairway_hit: Option<bool>,
    #[serde(deserialize_with = "de_bool")]
    green_in_regulation: Option<bool>,
}

impl From<HoleDetailCsvRow> for HoleDetailRecord {
    fn from(row: HoleDetailCsvRow) -> Self {
        HoleDetailRecord {
            round_id: row
                .round_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            hole_number: row.hole_number,
            par: row.par,
            adjusted_gross_score: row.adjusted_gross_score,
            putts: row.putts,
            fairway_hit: row.fairway_hit,
            green_in_regulation: row.green_in_regulation,
        }
    }
}

/// Reads hole details from CSV with camelCase headers matching the JSON export.
///
/// # Errors
///
/// Returns an error if the CSV itself is malformed, e.g. a row with the wrong
/// number of fields. Cells of the wrong type are read as missing.
pub fn parse_hole_details_csv<R: Read>(reader: R) -> Result<Vec<HoleDetailRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        let row: HoleDetailCsvRow =
            result.with_context(|| format!("invalid hole detail on data row {}", line + 1))?;
        rows.push(HoleDetailRecord::from(row));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_array() {
        let rounds = parse_rounds(b"[]").unwrap();
        assert!(rounds.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_rounds(b"{\"courseName\": \"X\"}").is_err());
        assert!(parse_hole_details(b"not json").is_err());
    }

    #[test]
    fn test_parse_rounds_with_statistics() {
        let bytes = br#"[
            {
                "id": 1,
                "courseName": "Pine Valley CC",
                "numberOfHoles": 18,
                "adjustedGrossScore": 90,
                "roundStatistics": [{ "par3s_average": "3.5", "gir_percent": null }]
            },
            { "id": 2, "numberOfHoles": 9 }
        ]"#;

        let rounds = parse_rounds(bytes).unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].course_name.as_deref(), Some("Pine Valley CC"));
        assert!(rounds[0].first_statistics().is_some());
        assert_eq!(rounds[1].course_name, None);
    }

    #[test]
    fn test_parse_hole_details_csv() {
        let csv = "roundId,holeNumber,par,adjustedGrossScore,putts,fairwayHit,greenInRegulation\n\
                   r1,1,4,5,2,true,false\n\
                   r1,2,3,,,,\n";

        let holes = parse_hole_details_csv(csv.as_bytes()).unwrap();
        assert_eq!(holes.len(), 2);
        assert_eq!(holes[0].round_id.as_deref(), Some("r1"));
        assert_eq!(holes[0].adjusted_gross_score, Some(5));
        assert_eq!(holes[0].fairway_hit, Some(true));
        assert_eq!(holes[1].par, Some(3));
        assert_eq!(holes[1].adjusted_gross_score, None);
        assert_eq!(holes[1].green_in_regulation, None);
    }

    #[test]
    fn test_parse_hole_details_csv_ragged_row() {
        let csv = "roundId,holeNumber,par\nr1,1,4,5\n";
        assert!(parse_hole_details_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_hole_details_csv_bad_cell_is_missing() {
        let csv = "roundId,holeNumber,par\nr1,first,4\nr1,2,4\n";
        let holes = parse_hole_details_csv(csv.as_bytes()).unwrap();
        assert_eq!(holes.len(), 2);
        assert_eq!(holes[0].hole_number, None);
        assert_eq!(holes[0].par, Some(4));
        assert_eq!(holes[1].hole_number, Some(2));
    }

    #[test]
    fn test_parse_hole_details_csv_keeps_leading_zero_ids() {
        let csv = "roundId,holeNumber,par,adjustedGrossScore\n007,1,4,5\n,2,4,4\n";
        let holes = parse_hole_details_csv(csv.as_bytes()).unwrap();
        assert_eq!(holes[0].round_id.as_deref(), Some("007"));
        assert_eq!(holes[0].adjusted_gross_score, Some(5));
        assert_eq!(holes[1].round_id, None);
    }

    #[test]
    fn test_parse_rounds_tolerates_loose_scalars() {
        let bytes = br#"[
            { "id": 1, "courseName": "A", "numberOfHoles": "18", "courseRating": "72.4" },
            { "id": 2, "courseName": "A", "numberOfHoles": 18, "playedAt": 1714780800 },
            { "id": 3, "courseName": "A", "numberOfHoles": [18] }
        ]"#;

        let rounds = parse_rounds(bytes).unwrap();
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0].number_of_holes, Some(18));
        assert_eq!(rounds[0].course_rating, Some(72.4));
        assert_eq!(rounds[1].played_at, None);
        assert_eq!(rounds[2].number_of_holes, None);
    }

    #[test]
    fn test_parse_hole_details_tolerates_out_of_range_numbers() {
        let bytes = br#"[
            { "roundId": "r1", "holeNumber": 300, "par": 4, "adjustedGrossScore": 5 },
            { "roundId": "r1", "holeNumber": -1, "par": 4, "adjustedGrossScore": 5 },
            { "roundId": "r1", "holeNumber": 3, "par": 4, "adjustedGrossScore": 5 }
        ]"#;

        let holes = parse_hole_details(bytes).unwrap();
        assert_eq!(holes.len(), 3);
        assert_eq!(holes[0].hole_number, Some(300));
        assert_eq!(holes[1].hole_number, Some(-1));
        assert_eq!(holes[2].hole_number, Some(3));
    }
}
