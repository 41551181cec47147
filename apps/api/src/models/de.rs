//! Lenient field decoders for profile and job snapshots.
//!
//! Scalar fields degrade to a neutral value when they are missing or malformed.
//! Collections are never routed through here: a missing array is a client bug
//! and must reject the request.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Absent, `null` or non-string scalars decode as an empty string.
/// Numbers and booleans keep their textual form.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Accepts a finite JSON number or a numeric string. Anything else is `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?))
}

/// Like [`lenient_f64`] but falls back to `0.0`.
pub fn lenient_f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

/// Importance weights live in `[0, 1]`; missing values count as fully important.
pub fn unit_interval<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from_value(&Value::deserialize(deserializer)?)
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(1.0))
}

/// Accepts the formats of [`parse_date`]. Unparseable input is treated as an
/// absent date.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

/// Full dates in these formats, tried in order.
const DAY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
/// Month-only formats, read as the 1st of that month.
const MONTH_FORMATS: [&str; 3] = ["%Y-%m", "%b %Y", "%B %Y"];

/// Parses `YYYY-MM-DD`, `MM/DD/YYYY`, an RFC 3339 timestamp, or a month given
/// as `YYYY-MM`, `Mar 2021` or `March 2021`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(date) = DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&format!("{raw} 01"), &format!("{fmt} %d")).ok())
}

fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Decoded {
        #[serde(default, deserialize_with = "lenient_string")]
        name: String,
        #[serde(default, deserialize_with = "lenient_f64")]
        gpa: Option<f64>,
        #[serde(default, deserialize_with = "lenient_date")]
        date: Option<NaiveDate>,
        #[serde(default = "one", deserialize_with = "unit_interval")]
        importance: f64,
    }

    fn one() -> f64 {
        1.0
    }

    fn decode(value: Value) -> Decoded {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_take_neutral_values() {
        let p = decode(json!({}));
        assert_eq!(p.name, "");
        assert_eq!(p.gpa, None);
        assert_eq!(p.date, None);
        assert_eq!(p.importance, 1.0);
    }

    #[test]
    fn test_null_string_is_empty() {
        assert_eq!(decode(json!({"name": null})).name, "");
    }

    #[test]
    fn test_gpa_accepts_numeric_string() {
        assert_eq!(decode(json!({"gpa": "3.7"})).gpa, Some(3.7));
    }

    #[test]
    fn test_gpa_garbage_is_absent() {
        assert_eq!(decode(json!({"gpa": "N/A"})).gpa, None);
        assert_eq!(decode(json!({"gpa": true})).gpa, None);
        assert_eq!(decode(json!({"gpa": [3.5]})).gpa, None);
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 15);
        assert_eq!(decode(json!({"date": "2021-03-15"})).date, expected);
        assert_eq!(
            decode(json!({"date": "2021-03-15T00:00:00.000Z"})).date,
            expected
        );
        assert_eq!(
            decode(json!({"date": "2021-03"})).date,
            NaiveDate::from_ymd_opt(2021, 3, 1)
        );
        assert_eq!(
            decode(json!({"date": "03/15/2021"})).date,
            expected
        );
        assert_eq!(decode(json!({"date": "present"})).date, None);
        assert_eq!(decode(json!({"date": ""})).date, None);
    }

    #[test]
    fn test_month_name_formats_read_as_first_of_month() {
        let march = NaiveDate::from_ymd_opt(2021, 3, 1);
        assert_eq!(parse_date("Mar 2021"), march);
        assert_eq!(parse_date("March 2021"), march);
        assert_eq!(parse_date(" Dec 2011 "), NaiveDate::from_ymd_opt(2011, 12, 1));
        assert_eq!(parse_date("13/01/2021"), None);
        assert_eq!(parse_date("Marchember 2021"), None);
    }

    #[test]
    fn test_importance_is_clamped() {
        assert_eq!(decode(json!({"importance": 4})).importance, 1.0);
        assert_eq!(decode(json!({"importance": -1})).importance, 0.0);
        assert_eq!(decode(json!({"importance": 0.25})).importance, 0.25);
    }
}
