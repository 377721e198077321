use std::collections::BTreeSet;

use chrono::DateTime;
use serde::Serialize;

use crate::rating::{PlayerSummary, RatingEntry};

/// One normalized row per (tournament, event) pair.
///
/// Created by the normalizer, enriched in place by the resolver with the
/// numeric event id, set ids and resolved sets, terminal once the bundle is
/// serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventRow {
    pub tournament_slug: String,
    pub tournament_name: String,
    pub city: String,
    pub start_at: Option<i64>,
    pub start_at_iso: String,
    pub event_date: String,
    pub event_slug: String,
    pub event_suffix: String,
    pub startgg_url: String,
    pub composite_slug: String,
    pub num_entrants: i64,
    pub game_title: String,
    pub event_id: Option<i64>,
    pub set_ids: Vec<i64>,
    pub sets: Vec<MatchResult>,
    pub players: BTreeSet<String>,
}

impl EventRow {
    /// Row for direct mode, where only the composite slug is known up front
    pub fn from_composite_slug(slug: &str) -> Self {
        Self {
            composite_slug: slug.to_string(),
            ..Self::default()
        }
    }
}

/// Result of one set: two display names, each with an optional score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub player_one: String,
    pub player_two: String,
    pub score_one: Option<i32>,
    pub score_two: Option<i32>,
}

impl MatchResult {
    /// Winner and loser, when both scores are known and unequal. Equal scores
    /// cannot come from a game without draws and stay undecided.
    pub fn decided(&self) -> Option<(&str, &str)> {
        let (one, two) = (self.score_one?, self.score_two?);
        if one > two {
            Some((&self.player_one, &self.player_two))
        } else if two > one {
            Some((&self.player_two, &self.player_one))
        } else {
            None
        }
    }
}

/// Cached classification of a fetched set
#[derive(Debug, Clone, PartialEq)]
pub enum SetOutcome {
    /// Both slots resolved to entrants; scores may still be unknown
    Resolved(MatchResult),
    /// Fewer than two slots, or a slot without a resolved entrant. Normal for
    /// unplayed or DQ'd sets; excluded from all aggregation.
    Invalid,
}

/// The structured object one run produces
#[derive(Debug, Serialize)]
pub struct ResultBundle {
    pub tournaments: Vec<EventRow>,
    pub players: Vec<PlayerSummary>,
    pub ratings: Vec<RatingEntry>,
    pub metadata: RunMetadata,
}

#[derive(Debug, Serialize)]
pub struct RunMetadata {
    pub mode: String,
    pub event_count: usize,
    pub set_count: usize,
    pub ts_after: Option<i64>,
    pub ts_before: Option<i64>,
    pub ts_after_iso: String,
    pub ts_before_iso: String,
}

/// Render a unix timestamp for logs and metadata
pub fn ts_to_iso(ts: Option<i64>) -> String {
    match ts {
        None => "None".to_string(),
        Some(ts) => DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| format!("Invalid({ts})")),
    }
}
