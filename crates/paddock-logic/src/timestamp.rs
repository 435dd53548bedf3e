//! Cooldown timestamps as they arrive from save data.
//!
//! The game API sends a cooldown either as a date value or as an ISO-8601
//! string. [`CooldownValue`] keeps that distinction at the boundary and
//! [`CooldownValue::resolve`] normalizes both to a single `DateTime<Utc>`
//! before any rule looks at it.
//!
//! Accepted string forms, tried in order:
//! - RFC 3339 with offset (`2026-10-19T12:00:00Z`, `...+02:00`)
//! - naive date-time, read as UTC (`2026-10-19T12:00:00`, `2026-10-19 12:00:00.250`)
//! - date only, midnight UTC (`2026-10-19`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainingError};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CooldownValue {
    Instant(DateTime<Utc>),
    Iso(String),
}

impl CooldownValue {
    /// Normalize to an instant, or report the unparseable input.
    pub fn resolve(&self) -> Result<DateTime<Utc>> {
        match self {
            Self::Instant(at) => Ok(*at),
            Self::Iso(raw) => {
                parse_iso(raw).ok_or_else(|| TrainingError::InvalidCooldown(raw.clone()))
            }
        }
    }
}

impl From<DateTime<Utc>> for CooldownValue {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Instant(at)
    }
}

impl From<&str> for CooldownValue {
    fn from(raw: &str) -> Self {
        Self::Iso(raw.to_string())
    }
}

impl From<String> for CooldownValue {
    fn from(raw: String) -> Self {
        Self::Iso(raw)
    }
}

/// Parse an ISO-8601 timestamp into UTC.
pub fn parse_iso(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn instant_and_string_resolve_to_same_instant() {
        let a = CooldownValue::from(noon()).resolve().unwrap();
        let b = CooldownValue::from("2026-10-19T12:00:00.000Z").resolve().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn offsets_are_normalized() {
        let at = parse_iso("2026-10-19T14:00:00+02:00").unwrap();
        assert_eq!(at, noon());
    }

    #[test]
    fn naive_forms_read_as_utc() {
        assert_eq!(parse_iso("2026-10-19T12:00:00"), Some(noon()));
        assert_eq!(parse_iso("2026-10-19 12:00:00"), Some(noon()));
        assert_eq!(
            parse_iso("2026-10-19"),
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_reported() {
        let err = CooldownValue::from("next tuesday").resolve().unwrap_err();
        assert_eq!(err, TrainingError::InvalidCooldown("next tuesday".into()));
        assert_eq!(parse_iso(""), None);
    }

    #[test]
    fn deserializes_from_json_string() {
        let v: CooldownValue = serde_json::from_str(r#""2026-10-19T12:00:00Z""#).unwrap();
        assert_eq!(v.resolve().unwrap(), noon());

        let v: CooldownValue = serde_json::from_str(r#""not a date""#).unwrap();
        assert!(matches!(v, CooldownValue::Iso(_)));
    }
}
