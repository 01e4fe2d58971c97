//! Input record and display view for a stewards decision.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Raw decision data as supplied by the records layer or the HTTP boundary.
///
/// Field names accept both the lower-camel form and the capitalised form the
/// decision form posts (`Driver`, `Team`, `Cause`, ...).
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    #[serde(default, alias = "Driver", alias = "DriverName")]
    #[schema(example = "Lewis Hamilton")]
    pub driver_name: Option<String>,
    #[serde(
        default,
        alias = "CarNumber",
        deserialize_with = "deserialize_car_number"
    )]
    #[schema(value_type = Option<i64>, example = 44)]
    pub car_number: Option<i64>,
    #[serde(default, alias = "Team", alias = "TeamName")]
    #[schema(example = "Mercedes")]
    pub team_name: Option<String>,
    #[serde(default, alias = "Event")]
    #[schema(example = "race")]
    pub event: Option<String>,
    #[serde(default, alias = "TrackName", alias = "Track")]
    #[schema(example = "Monza")]
    pub track_name: Option<String>,
    #[serde(default, alias = "CompetitionName", alias = "Competition")]
    #[schema(example = "F1 World Championship")]
    pub competition_name: Option<String>,
    #[serde(default, alias = "Cause")]
    #[schema(example = "Causing a collision")]
    pub cause: Option<String>,
    #[serde(default, alias = "Penalty")]
    #[schema(example = "5-second time penalty")]
    pub penalty: Option<String>,
    #[serde(default, alias = "Discretionary")]
    pub discretionary: bool,
    /// ISO-8601 instant; absent or unparsable values fall back to the current time.
    #[serde(default, alias = "CreatedAt")]
    #[schema(example = "2025-09-07T14:30:00Z")]
    pub created_at: Option<String>,
}

/// Accepts `44`, `"44"`, `"#44"` or null. Anything else is treated as absent.
fn deserialize_car_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCarNumber {
        Int(i64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let raw = Option::<RawCarNumber>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCarNumber::Int(n)) => Some(n),
        Some(RawCarNumber::Float(f)) if f.fract() == 0.0 => Some(f as i64),
        Some(RawCarNumber::Text(s)) => s.trim().trim_start_matches('#').parse().ok(),
        _ => None,
    })
}

/// Session kinds with a fixed display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Race,
    Qualifying,
    Practice,
    Sprint,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Race,
        EventKind::Qualifying,
        EventKind::Practice,
        EventKind::Sprint,
    ];

    /// Case-insensitive match against the lookup keys.
    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            EventKind::Race => "race",
            EventKind::Qualifying => "qualifying",
            EventKind::Practice => "practice",
            EventKind::Sprint => "sprint",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Race => "Race",
            EventKind::Qualifying => "Qualifying",
            EventKind::Practice => "Practice",
            EventKind::Sprint => "Sprint",
        }
    }
}

/// Display-ready projection of a [`DecisionRecord`]. Every field is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionView {
    pub driver_name: String,
    pub car_number: String,
    pub team_name: String,
    pub event_type: String,
    pub track_name: String,
    pub competition_name: String,
    pub cause: String,
    pub penalty: String,
    pub discretionary: String,
    pub created_at: String,
}

impl DecisionView {
    /// Look a field up by its template placeholder name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "driverName" => &self.driver_name,
            "carNumber" => &self.car_number,
            "teamName" => &self.team_name,
            "eventType" => &self.event_type,
            "trackName" => &self.track_name,
            "competitionName" => &self.competition_name,
            "cause" => &self.cause,
            "penalty" => &self.penalty,
            "discretionary" => &self.discretionary,
            "createdAt" => &self.created_at,
            _ => return None,
        };
        Some(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_capitalised_aliases() {
        let json = r#"{
            "Driver": "Max Verstappen",
            "CarNumber": 1,
            "Team": "Red Bull",
            "Event": "Sprint",
            "Cause": "Jump start",
            "Penalty": "10 sec time penalty"
        }"#;

        let record: DecisionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.driver_name.as_deref(), Some("Max Verstappen"));
        assert_eq!(record.car_number, Some(1));
        assert_eq!(record.team_name.as_deref(), Some("Red Bull"));
        assert_eq!(record.event.as_deref(), Some("Sprint"));
        assert!(!record.discretionary);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_car_number_lenient_forms() {
        let from = |json: &str| -> Option<i64> {
            serde_json::from_str::<DecisionRecord>(json).unwrap().car_number
        };
        assert_eq!(from(r#"{"carNumber": "44"}"#), Some(44));
        assert_eq!(from(r##"{"carNumber": "#16"}"##), Some(16));
        assert_eq!(from(r#"{"carNumber": null}"#), None);
        assert_eq!(from(r#"{"carNumber": "abc"}"#), None);
        assert_eq!(from(r#"{"carNumber": true}"#), None);
        assert_eq!(from(r#"{}"#), None);
    }

    #[test]
    fn test_event_kind_parse_is_case_insensitive() {
        assert_eq!(EventKind::parse("QUALIFYING"), Some(EventKind::Qualifying));
        assert_eq!(EventKind::parse("Practice"), Some(EventKind::Practice));
        assert_eq!(EventKind::parse("training"), None);
    }

    #[test]
    fn test_view_field_lookup() {
        let view = DecisionView {
            driver_name: "A".into(),
            car_number: "#1".into(),
            team_name: "T".into(),
            event_type: "Race".into(),
            track_name: "N/A".into(),
            competition_name: "N/A".into(),
            cause: "C".into(),
            penalty: "P".into(),
            discretionary: "No".into(),
            created_at: "now".into(),
        };
        assert_eq!(view.field("carNumber"), Some("#1"));
        assert_eq!(view.field("eventType"), Some("Race"));
        assert_eq!(view.field("unknown"), None);
    }
}
