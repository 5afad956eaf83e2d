//! Reading types

use crate::{PondError, Result};
use chrono::{NaiveDateTime, SubsecRound, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Numeric fields a client must supply, in reporting order.
pub const REQUIRED_FIELDS: [&str; 4] = ["ph", "ec", "do", "temp"];

/// One recorded observation of pond water quality.
///
/// `id` and `timestamp` are assigned by storage on insert and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    /// UTC wall-clock time of insertion, without offset.
    #[serde(with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
    pub ph: f64,
    /// Electrical conductivity
    pub ec: f64,
    /// Dissolved oxygen
    #[serde(rename = "do")]
    pub do_: f64,
    pub temp: f64,
}

impl Reading {
    /// Server time used to stamp a new reading, truncated to microseconds.
    pub fn now() -> NaiveDateTime {
        Utc::now().naive_utc().trunc_subsecs(6)
    }
}

/// Create payload for a reading. Carries no id or timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    pub ph: f64,
    pub ec: f64,
    #[serde(rename = "do")]
    pub do_: f64,
    pub temp: f64,
}

impl NewReading {
    /// Converts a request body into a reading.
    ///
    /// All absent fields are reported together; type errors are only
    /// reported once nothing is missing. Any other keys, including `id` and
    /// `timestamp`, are ignored.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            PondError::InvalidBody(format!("expected a JSON object, got {}", json_kind(value)))
        })?;

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| !object.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PondError::MissingField(missing));
        }

        let mut values = [0.0_f64; 4];
        let mut mismatched = Vec::new();
        for (slot, field) in values.iter_mut().zip(REQUIRED_FIELDS) {
            match object.get(field).and_then(Value::as_f64) {
                Some(v) => *slot = v,
                None => mismatched.push(field.to_string()),
            }
        }
        if !mismatched.is_empty() {
            return Err(PondError::TypeMismatch(mismatched));
        }

        let [ph, ec, do_, temp] = values;
        Ok(Self { ph, ec, do_, temp })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// ISO-8601 without offset. Fractional seconds are written as six digits,
/// and only when non-zero.
mod iso_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    const SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
    const MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let format = if ts.nanosecond() / 1_000 == 0 { SECONDS } else { MICROS };
        serializer.collect_str(&ts.format(format))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_from_json_accepts_all_fields() {
        let body = json!({"ph": 7.2, "ec": 1.5, "do": 6.8, "temp": 24.3});
        let reading = NewReading::from_json(&body).unwrap();
        assert_eq!(
            reading,
            NewReading { ph: 7.2, ec: 1.5, do_: 6.8, temp: 24.3 }
        );
    }

    #[test]
    fn test_from_json_coerces_integers() {
        let reading = NewReading::from_json(&json!({"ph": 7, "ec": 2, "do": 0, "temp": -1})).unwrap();
        assert_eq!(reading.ph, 7.0);
        assert_eq!(reading.temp, -1.0);
    }

    #[test]
    fn test_from_json_reports_every_missing_field() {
        let err = NewReading::from_json(&json!({"ec": 1.5, "do": 6.8})).unwrap_err();
        match err {
            PondError::MissingField(fields) => assert_eq!(fields, vec!["ph", "temp"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_json_missing_takes_precedence_over_type() {
        let err = NewReading::from_json(&json!({"ph": "high", "ec": 1.5, "do": 6.8})).unwrap_err();
        assert!(matches!(err, PondError::MissingField(ref f) if f == &["temp"]));
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        let body = json!({"ph": "7.2", "ec": null, "do": true, "temp": 24.3});
        let err = NewReading::from_json(&body).unwrap_err();
        match err {
            PondError::TypeMismatch(fields) => assert_eq!(fields, vec!["ph", "ec", "do"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_json_ignores_client_id_and_timestamp() {
        let body = json!({
            "id": 99,
            "timestamp": "1999-01-01T00:00:00",
            "ph": 7.2, "ec": 1.5, "do": 6.8, "temp": 24.3
        });
        assert!(NewReading::from_json(&body).is_ok());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = NewReading::from_json(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, PondError::InvalidBody(ref m) if m.contains("an array")));
    }

    #[test]
    fn test_reading_wire_format() {
        let reading = Reading {
            id: 1,
            timestamp: at(10, 30, 0, 0),
            ph: 7.2,
            ec: 1.5,
            do_: 6.8,
            temp: 24.3,
        };
        assert_eq!(
            serde_json::to_value(&reading).unwrap(),
            json!({
                "id": 1,
                "timestamp": "2024-01-15T10:30:00",
                "ph": 7.2,
                "ec": 1.5,
                "do": 6.8,
                "temp": 24.3
            })
        );
    }

    #[test]
    fn test_timestamp_keeps_microseconds() {
        let reading = Reading {
            id: 2,
            timestamp: at(10, 30, 0, 120),
            ph: 0.0,
            ec: 0.0,
            do_: 0.0,
            temp: 0.0,
        };
        let encoded = serde_json::to_value(&reading).unwrap();
        assert_eq!(encoded["timestamp"], "2024-01-15T10:30:00.000120");

        let decoded: Reading = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded.timestamp, reading.timestamp);
    }

    #[test]
    fn test_now_is_microsecond_precision() {
        assert_eq!(Reading::now().nanosecond() % 1_000, 0);
    }
}
