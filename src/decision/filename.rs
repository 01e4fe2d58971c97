//! Output filename policy.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;

const FALLBACK_NAME: &str = "unknown";

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref DISALLOWED: Regex = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
}

static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Replace whitespace runs with `_` and drop everything outside `[A-Za-z0-9_-]`.
pub fn sanitize_name(name: &str) -> String {
    let underscored = WHITESPACE_RUN.replace_all(name, "_");
    let cleaned = DISALLOWED.replace_all(&underscored, "");
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.into_owned()
    }
}

/// Millisecond timestamps that never repeat within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GenerationStamp(i64);

impl GenerationStamp {
    /// Current epoch milliseconds, bumped past the last issued stamp if needed.
    pub fn next() -> Self {
        let now = Utc::now().timestamp_millis();
        let mut last = LAST_STAMP.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match LAST_STAMP.compare_exchange_weak(
                last,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Self(candidate),
                Err(actual) => last = actual,
            }
        }
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn millis(self) -> i64 {
        self.0
    }
}

/// `decision_<sanitized-name>_<timestamp>`, without extension.
pub fn decision_filename(name: Option<&str>, stamp: GenerationStamp) -> String {
    let safe = sanitize_name(name.unwrap_or_default());
    format!("decision_{}_{}", safe, stamp.millis())
}
