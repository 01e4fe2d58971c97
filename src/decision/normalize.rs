//! Record normalizer.
//!
//! Turns a loosely-populated [`DecisionRecord`] into a [`DecisionView`] where
//! every field is a display string. Missing values never fail; they are
//! replaced by `"N/A"` (or the documented default for the field).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::model::{DecisionRecord, DecisionView, EventKind};

pub const NOT_AVAILABLE: &str = "N/A";

const DEFAULT_EVENT_LABEL: &str = "Race";
const TIMESTAMP_FORMAT: &str = "%B %-d, %Y, %I:%M %p";

/// Normalize using the current time as the fallback timestamp.
pub fn normalize(record: &DecisionRecord) -> DecisionView {
    normalize_at(record, Utc::now())
}

/// Normalize with an explicit fallback instant for absent or unparsable timestamps.
pub fn normalize_at(record: &DecisionRecord, now: DateTime<Utc>) -> DecisionView {
    let created = record
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(now);

    DecisionView {
        driver_name: or_not_available(record.driver_name.as_deref()),
        car_number: format_car_number(record.car_number),
        team_name: or_not_available(record.team_name.as_deref()),
        event_type: format_event_type(record.event.as_deref()),
        track_name: or_not_available(record.track_name.as_deref()),
        competition_name: or_not_available(record.competition_name.as_deref()),
        cause: or_not_available(record.cause.as_deref()),
        penalty: or_not_available(record.penalty.as_deref()),
        discretionary: format_discretionary(record.discretionary).to_string(),
        created_at: format_timestamp(created),
    }
}

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_car_number(car_number: Option<i64>) -> String {
    match car_number {
        Some(n) => format!("#{n}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Known kinds map to their label, unknown non-empty input passes through
/// untouched, empty input becomes "Race".
pub fn format_event_type(event: Option<&str>) -> String {
    let raw = match event {
        Some(v) if !v.trim().is_empty() => v,
        _ => return DEFAULT_EVENT_LABEL.to_string(),
    };

    match EventKind::parse(raw) {
        Some(kind) => kind.label().to_string(),
        None => raw.to_string(),
    }
}

pub fn format_discretionary(discretionary: bool) -> &'static str {
    if discretionary {
        "Yes"
    } else {
        "No"
    }
}

/// Render an instant as e.g. "September 7, 2025, 02:30 PM".
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse RFC 3339, a naive date-time (taken as UTC) or a bare date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
