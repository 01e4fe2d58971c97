//! Standard penalty catalog.
//!
//! Maps well-known infringement causes to the penalty applied in each
//! session type. A decision whose cause is in the catalog uses the catalog
//! penalty; anything else is a discretionary penalty chosen by the stewards.

pub mod routes;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::decision::EventKind;

/// Session column of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Training,
    Qualifying,
    Race,
}

impl Session {
    /// Practice runs under training rules and sprints under race rules.
    /// Unknown or missing events are treated as races.
    pub fn for_event(event: Option<&str>) -> Self {
        let Some(event) = event else {
            return Session::Race;
        };
        if event.trim().eq_ignore_ascii_case("training") {
            return Session::Training;
        }
        match EventKind::parse(event) {
            Some(EventKind::Practice) => Session::Training,
            Some(EventKind::Qualifying) => Session::Qualifying,
            Some(EventKind::Race) | Some(EventKind::Sprint) | None => Session::Race,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SessionPenalties {
    #[schema(value_type = String)]
    pub training: &'static str,
    #[schema(value_type = String)]
    pub qualifying: &'static str,
    #[schema(value_type = String)]
    pub race: &'static str,
}

impl SessionPenalties {
    pub fn for_session(&self, session: Session) -> &'static str {
        match session {
            Session::Training => self.training,
            Session::Qualifying => self.qualifying,
            Session::Race => self.race,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogEntry {
    #[schema(value_type = String)]
    pub cause: &'static str,
    pub penalty: SessionPenalties,
}

/// Penalty chosen for a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResolvedPenalty {
    pub penalty: String,
    pub discretionary: bool,
    pub session: Session,
}

const fn entry(
    cause: &'static str,
    training: &'static str,
    qualifying: &'static str,
    race: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        cause,
        penalty: SessionPenalties {
            training,
            qualifying,
            race,
        },
    }
}

const NO_PENALTY: &str = "No penalty";
const WARNING: &str = "Warning - Black/white";
const DRIVE_THROUGH: &str = "Drive through";
const LAP_CANCELLED: &str = "Cancellation of relevant lap time";

lazy_static! {
    static ref CATALOG: Vec<CatalogEntry> = vec![
        entry(
            "Causing a collision (avoidable - both continue & no advantage)",
            NO_PENALTY,
            NO_PENALTY,
            WARNING,
        ),
        entry(
            "Causing a collision (avoidable - both continue & gaining advantage)",
            NO_PENALTY,
            NO_PENALTY,
            "Change of position or min. 10 sec time penalty",
        ),
        entry(
            "Causing a collision (avoidable - other driver has to stop)",
            NO_PENALTY,
            NO_PENALTY,
            DRIVE_THROUGH,
        ),
        entry(
            "Forcing another driver off track (no advantage)",
            WARNING,
            WARNING,
            WARNING,
        ),
        entry(
            "Forcing another driver off track (gaining advantage)",
            NO_PENALTY,
            NO_PENALTY,
            "Change of position or time penalty",
        ),
        entry(
            "Forcing another driver off track dangerously",
            "Grid penalty +3",
            "Grid penalty +3",
            "Min. 10 sec time penalty",
        ),
        entry(
            "Leaving the pit under red light",
            "Grid penalty +5",
            "Grid penalty +5",
            DRIVE_THROUGH,
        ),
        entry("Crossing white line pit exit", WARNING, WARNING, WARNING),
        entry(
            "Crossing white line pit exit in case of recurrence",
            "Grid penalty +3",
            "Grid penalty +3",
            DRIVE_THROUGH,
        ),
        entry(
            "Leaving the track and gaining an advantage (1st time)",
            NO_PENALTY,
            LAP_CANCELLED,
            "Change of position",
        ),
        entry(
            "Leaving the track and gaining an advantage (2nd time)",
            NO_PENALTY,
            LAP_CANCELLED,
            "Change of position or time penalty +5 sec",
        ),
        entry(
            "Leaving the track and gaining an advantage (3rd time)",
            WARNING,
            "Cancellation of relevant lap time & Warning - Black/white",
            "Change of position or time penalty +5 sec",
        ),
        entry("Jump start (but stops)", NO_PENALTY, NO_PENALTY, "5 sec time penalty"),
        entry("Jump start (don't stop)", NO_PENALTY, NO_PENALTY, "10 sec time penalty"),
        entry("Inaccurate grid position", NO_PENALTY, NO_PENALTY, "5 sec time penalty"),
        entry(
            "Unsporting behaviour",
            "Reported to the stewards",
            "Reported to the stewards",
            "Reported to the stewards",
        ),
    ];
}

pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Exact match on the cause text.
pub fn find(cause: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.cause == cause)
}

/// Pick the penalty for `cause` in the given event.
///
/// A catalogued cause yields its standard penalty and is not discretionary.
/// Otherwise the caller's `fallback` text stands and the decision is marked
/// discretionary.
pub fn resolve(cause: &str, event: Option<&str>, fallback: Option<&str>) -> ResolvedPenalty {
    let session = Session::for_event(event);
    match find(cause) {
        Some(entry) => ResolvedPenalty {
            penalty: entry.penalty.for_session(session).to_string(),
            discretionary: false,
            session,
        },
        None => ResolvedPenalty {
            penalty: fallback.unwrap_or_default().to_string(),
            discretionary: true,
            session,
        },
    }
}
