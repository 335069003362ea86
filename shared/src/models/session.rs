//! Cupping session model

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CupScore;
use crate::validation::clamp_session_cups;

/// A cupping event: an ordered flight of cup records plus metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Generation-time millisecond timestamp, rendered as a string
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// ISO-8601 creation timestamp
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub num_cups: usize,
    #[serde(default)]
    pub session_notes: String,
    #[serde(default)]
    pub cup_scores: Vec<CupScore>,
}

impl Session {
    /// Create a session with `num_cups` (clamped to 1..=30) default cups
    pub fn new(title: impl Into<String>, num_cups: usize, notes: impl Into<String>) -> Self {
        let num_cups = clamp_session_cups(num_cups);
        Self {
            id: generate_id(),
            title: title.into(),
            date: now_iso8601(),
            is_complete: false,
            num_cups,
            session_notes: notes.into(),
            cup_scores: (0..num_cups).map(|_| CupScore::default()).collect(),
        }
    }

    /// Replace one cup record wholesale. Returns false when the index is
    /// outside the flight.
    pub fn set_cup(&mut self, index: usize, cup: CupScore) -> bool {
        match self.cup_scores.get_mut(index) {
            Some(slot) => {
                *slot = cup;
                true
            }
            None => false,
        }
    }

    /// Grow or shrink the flight to `num_cups` (clamped to 1..=30),
    /// appending default cups or truncating irreversibly. Only the legacy
    /// edit flow resizes; sessions created in the current flow keep their
    /// cup count.
    pub fn resize_cups(&mut self, num_cups: usize) {
        let num_cups = clamp_session_cups(num_cups);
        if num_cups > self.cup_scores.len() {
            self.cup_scores
                .resize_with(num_cups, CupScore::default);
        } else {
            self.cup_scores.truncate(num_cups);
        }
        self.num_cups = num_cups;
    }
}

/// Millisecond-timestamp id, matching what the app has always generated
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Current time in the ISO-8601 form the app persists (`...T...Z`,
/// millisecond precision)
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
