//! Field decoders used at the ingestion boundary.
//!
//! Profiles are written by the platform's user-facing app and the stored
//! shape drifts over time: numbers where strings are expected, enum values
//! outside the known set, dates stored as strings or as timestamps. Each
//! decoder here accepts whatever is stored and yields `None` (or an empty /
//! false value) instead of failing, so one odd field never rejects the whole
//! record.

use std::str::FromStr;

use bson::Bson;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::model::report::ReportReason;

pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Bson::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Bson::Int32(n)) => Some(n.to_string()),
        Some(Bson::Int64(n)) => Some(n.to_string()),
        Some(Bson::Double(n)) if n.fract() == 0.0 => Some(format!("{}", n as i64)),
        _ => None,
    })
}

/// Values outside the enum's allow-list are dropped here, once.
pub fn allow_listed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Bson::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(matches!(raw, Some(Bson::Boolean(true))))
}

pub fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Bson::Int32(n)) => Some(i64::from(n)),
        Some(Bson::Int64(n)) => Some(n),
        Some(Bson::Double(n)) if n.is_finite() => Some(n as i64),
        Some(Bson::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Bson::String(s)) => parse_date(&s),
        // Calendar dates saved as datetimes hold the writer's local midnight,
        // which lies within half a day of the UTC boundary of that date.
        Some(other) => bson_to_datetime(&other).map(|dt| (dt + Duration::hours(12)).date_naive()),
        None => None,
    })
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(bson_to_datetime))
}

/// A missing, null or non-array value is the empty set. Non-string items are
/// dropped and repeated tags collapse to their first occurrence.
pub fn reasons<'de, D>(deserializer: D) -> Result<Vec<ReportReason>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Bson>::deserialize(deserializer)?;
    let mut out: Vec<ReportReason> = Vec::new();
    if let Some(Bson::Array(items)) = raw {
        for item in items {
            if let Bson::String(tag) = item {
                if tag.trim().is_empty() {
                    continue;
                }
                let reason = ReportReason::from(tag);
                if !out.contains(&reason) {
                    out.push(reason);
                }
            }
        }
    }
    Ok(out)
}

fn bson_to_datetime(value: &Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(dt) => Some(dt.to_chrono()),
        Bson::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        // Timestamps exported from the previous store keep their seconds
        // under `seconds` or `_seconds`.
        Bson::Document(doc) => {
            let seconds = doc
                .get("seconds")
                .or_else(|| doc.get("_seconds"))
                .and_then(|s| match s {
                    Bson::Int32(n) => Some(i64::from(*n)),
                    Bson::Int64(n) => Some(*n),
                    Bson::Double(n) => Some(*n as i64),
                    _ => None,
                })?;
            DateTime::from_timestamp(seconds, 0)
        }
        _ => None,
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Fields {
        #[serde(deserialize_with = "string")]
        text: Option<String>,
        #[serde(deserialize_with = "date")]
        born: Option<NaiveDate>,
        #[serde(deserialize_with = "timestamp")]
        at: Option<DateTime<Utc>>,
        #[serde(deserialize_with = "flag")]
        on: bool,
        #[serde(deserialize_with = "count")]
        n: Option<i64>,
        #[serde(deserialize_with = "reasons")]
        tags: Vec<ReportReason>,
    }

    #[test]
    fn test_numbers_become_text() {
        let fields: Fields = serde_json::from_value(json!({ "text": 9876543210_i64 })).unwrap();
        assert_eq!(fields.text.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_blank_text_is_none() {
        let fields: Fields = serde_json::from_value(json!({ "text": "   " })).unwrap();
        assert_eq!(fields.text, None);
    }

    #[test]
    fn test_date_from_plain_and_rfc3339_strings() {
        let fields: Fields = serde_json::from_value(json!({ "born": "1995-07-14" })).unwrap();
        assert_eq!(fields.born, NaiveDate::from_ymd_opt(1995, 7, 14));

        let fields: Fields = serde_json::from_value(json!({ "born": "1995-07-14T10:00:00Z" })).unwrap();
        assert_eq!(fields.born, NaiveDate::from_ymd_opt(1995, 7, 14));
    }

    #[test]
    fn test_date_from_exported_timestamp() {
        // 2000-01-01T00:00:00Z
        let fields: Fields = serde_json::from_value(json!({ "born": { "_seconds": 946684800, "_nanoseconds": 0 } })).unwrap();
        assert_eq!(fields.born, NaiveDate::from_ymd_opt(2000, 1, 1));
    }

    #[test]
    fn test_date_saved_at_local_midnight_keeps_calendar_day() {
        // 2000-01-01T00:00:00+05:30
        let fields: Fields = serde_json::from_value(json!({ "born": { "seconds": 946665000 } })).unwrap();
        assert_eq!(fields.born, NaiveDate::from_ymd_opt(2000, 1, 1));

        // 2000-01-01T00:00:00-05:00
        let fields: Fields = serde_json::from_value(json!({ "born": { "seconds": 946702800 } })).unwrap();
        assert_eq!(fields.born, NaiveDate::from_ymd_opt(2000, 1, 1));
    }

    #[test]
    fn test_garbage_date_is_none() {
        let fields: Fields = serde_json::from_value(json!({ "born": "sometime in spring", "at": 12 })).unwrap();
        assert_eq!(fields.born, None);
        assert_eq!(fields.at, None);
    }

    #[test]
    fn test_flag_only_true_for_boolean_true() {
        let fields: Fields = serde_json::from_value(json!({ "on": "true" })).unwrap();
        assert!(!fields.on);
        let fields: Fields = serde_json::from_value(json!({ "on": true })).unwrap();
        assert!(fields.on);
    }

    #[test]
    fn test_count_from_string() {
        let fields: Fields = serde_json::from_value(json!({ "n": "42" })).unwrap();
        assert_eq!(fields.n, Some(42));
    }

    #[test]
    fn test_reasons_non_array_is_empty() {
        let fields: Fields = serde_json::from_value(json!({ "tags": "spam" })).unwrap();
        assert!(fields.tags.is_empty());
        let fields: Fields = serde_json::from_value(json!({ "tags": null })).unwrap();
        assert!(fields.tags.is_empty());
    }

    #[test]
    fn test_reasons_dedup_and_drop_non_strings() {
        let fields: Fields = serde_json::from_value(json!({ "tags": ["spam", 3, "harassment", "spam", "catfishing"] })).unwrap();
        assert_eq!(
            fields.tags,
            vec![
                ReportReason::Spam,
                ReportReason::Harassment,
                ReportReason::Other("catfishing".to_string()),
            ]
        );
    }
}
