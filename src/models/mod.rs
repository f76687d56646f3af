//! Record types for the four collections, plus the request shapes used
//! to create them.
//!
//! Request shapes deserialize every field as optional so that a missing
//! field is reported by name instead of as a generic parse failure.

pub mod clinical_reading;
pub mod enums;
pub mod patient;
pub mod treatment;
pub mod user;

pub use clinical_reading::*;
pub use enums::*;
pub use patient::*;
pub use treatment::*;
pub use user::*;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer};

/// Storage format for timestamps. Fixed-width so lexical order is
/// chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A request field that was absent, blank or unparseable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{0} must be supplied")]
    MissingField(&'static str),
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Take a required text field, rejecting `None` and whitespace-only values.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, InputError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(InputError::MissingField(field)),
    }
}

/// Normalize an optional text field: blank becomes `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Deserialize a free-text field that clients may send as a string,
/// number or boolean. Numbers and booleans keep their JSON spelling.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            Ok(Some(v.to_string()))
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

/// Parse a client-supplied timestamp, truncated to whole seconds.
///
/// Accepts RFC 3339 (normalized to UTC) and the common naive forms
/// `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<NaiveDateTime, InputError> {
    parse_naive(raw.trim())
        .map(|dt| dt.with_nanosecond(0).unwrap_or(dt))
        .ok_or_else(|| InputError::Invalid {
            field,
            reason: format!("unrecognized timestamp '{}'", raw.trim()),
        })
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    None
}

/// Current UTC time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_missing_and_blank() {
        assert_eq!(
            required("first_name", None),
            Err(InputError::MissingField("first_name"))
        );
        assert_eq!(
            required("first_name", Some("   ".into())),
            Err(InputError::MissingField("first_name"))
        );
        assert_eq!(required("first_name", Some(" Ada ".into())).unwrap(), "Ada");
    }

    #[test]
    fn missing_field_message_names_field() {
        let msg = InputError::MissingField("bed_number").to_string();
        assert!(msg.contains("bed_number"));
    }

    #[test]
    fn optional_drops_blank() {
        assert_eq!(optional(Some("".into())), None);
        assert_eq!(optional(Some(" x ".into())), Some("x".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn parses_naive_and_rfc3339_timestamps() {
        let a = parse_timestamp("date_time", "2024-03-01 08:30:00").unwrap();
        let b = parse_timestamp("date_time", "2024-03-01T08:30:00").unwrap();
        let c = parse_timestamp("date_time", "2024-03-01T09:30:00+01:00").unwrap();
        let d = parse_timestamp("date_time", "2024-03-01T08:30:00Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
    }

    #[test]
    fn drops_fractional_seconds() {
        let a = parse_timestamp("date_time", "2024-03-01 08:30:00.999").unwrap();
        let b = parse_timestamp("date_time", "2024-03-01T08:30:00.250+00:00").unwrap();
        let whole = parse_timestamp("date_time", "2024-03-01 08:30:00").unwrap();
        assert_eq!(a, whole);
        assert_eq!(b, whole);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "lenient_text")]
        value: Option<String>,
    }

    #[test]
    fn lenient_text_accepts_scalars() {
        let parse = |v: serde_json::Value| serde_json::from_value::<Form>(v).map(|f| f.value);
        assert_eq!(parse(serde_json::json!({"value": "C-12"})).unwrap().as_deref(), Some("C-12"));
        assert_eq!(parse(serde_json::json!({"value": 12})).unwrap().as_deref(), Some("12"));
        assert_eq!(parse(serde_json::json!({"value": true})).unwrap().as_deref(), Some("true"));
        assert_eq!(parse(serde_json::json!({"value": null})).unwrap(), None);
        assert_eq!(parse(serde_json::json!({})).unwrap(), None);
        assert!(parse(serde_json::json!({"value": [1]})).is_err());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let err = parse_timestamp("date_time", "yesterday").unwrap_err();
        assert!(matches!(err, InputError::Invalid { field: "date_time", .. }));
    }
}
