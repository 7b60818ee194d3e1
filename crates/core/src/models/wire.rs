//! Serde helpers for values the API stores as form text.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Format produced by a `datetime-local` form input, and the one this client writes.
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a local date-time as written by the dashboards.
///
/// Accepts minute or second precision without offset, or a full RFC 3339 timestamp which is
/// converted to local time. Returns `None` for anything else.
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in ACCEPTED_NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

pub fn format_local_datetime(value: &NaiveDateTime) -> String {
    value.format(LOCAL_DATETIME_FORMAT).to_string()
}

/// `NaiveDateTime` <-> `"YYYY-MM-DDTHH:MM"`.
pub mod local_datetime {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_local_datetime(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_local_datetime(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid local date-time: {raw:?}")))
    }
}

/// `Option<NaiveDateTime>`; `None` is skipped by the caller's `skip_serializing_if`, and an empty
/// string reads as `None`.
pub mod optional_local_datetime {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format_local_datetime(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_local_datetime(text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid local date-time: {text:?}"))),
        }
    }
}

/// `Option<NaiveDate>` where the form may have submitted an empty string.
pub mod optional_date {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// `Option<String>` where the form may have submitted an empty or blank string.
pub mod optional_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|text| !text.trim().is_empty()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

/// Scores arrive as JSON numbers or as the raw text of a number input.
///
/// Text that does not parse reads as `0.0` so one bad record cannot poison a whole listing.
pub fn flexible_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let score = match RawScore::deserialize(deserializer)? {
        RawScore::Number(n) => n,
        RawScore::Text(text) => match text.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!("Non-numeric score {:?} read as 0", text);
                0.0
            }
        },
    };
    Ok(if score.is_finite() { score } else { 0.0 })
}
