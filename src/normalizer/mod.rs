use std::collections::HashSet;

use chrono::DateTime;
use log::{debug, warn};
use serde_json::Value;

use crate::api::models::coerce_i64;
use crate::config::settings::FilterSettings;
use crate::domain::EventRow;

/// Upstream record shape. Tournaments arrive with either a native nested
/// `events` list or pre-flattened `events.*` keys; anything else goes through
/// the fallback reconstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RecordShape {
    Nested,
    Flat,
    Opaque,
}

/// Flatten raw tournament records into one row per event
pub fn normalize_events(records: &[Value]) -> Vec<EventRow> {
    let mut rows = Vec::new();
    for record in records {
        match detect_shape(record) {
            RecordShape::Nested => rows.extend(expand_nested(record)),
            RecordShape::Flat => rows.extend(expand_flat(record)),
            RecordShape::Opaque => rows.extend(expand_fallback(record)),
        }
    }
    rows
}

/// Keep events for the configured game with enough entrants
pub fn filter_rows(rows: Vec<EventRow>, filter: &FilterSettings) -> Vec<EventRow> {
    let before = rows.len();
    let kept: Vec<EventRow> = rows
        .into_iter()
        .filter(|row| matches_filter(row, filter))
        .collect();
    debug!("filter kept {}/{} event rows", kept.len(), before);
    kept
}

/// Stamp derived fields: readable dates, the stable URL key, and the
/// composite slug used for event-id resolution. A failed derivation leaves
/// the field empty and continues.
pub fn derive_fields(rows: &mut [EventRow]) {
    for row in rows.iter_mut() {
        derive_dates(row);
        derive_urls(row);
    }
}

/// Drop duplicate rows by stable URL key, keeping the first occurrence
pub fn dedupe_rows(rows: Vec<EventRow>) -> Vec<EventRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.startgg_url.clone()))
        .collect()
}

// --- Shape detection ---

fn detect_shape(record: &Value) -> RecordShape {
    if record.get("events").is_some_and(Value::is_array) {
        return RecordShape::Nested;
    }
    if has_flat_event_keys(record) {
        return RecordShape::Flat;
    }
    RecordShape::Opaque
}

fn has_flat_event_keys(record: &Value) -> bool {
    record
        .as_object()
        .is_some_and(|map| map.keys().any(|key| key.starts_with("events.")))
}

// --- Expansion, one function per shape ---

fn expand_nested(record: &Value) -> Vec<EventRow> {
    let Some(events) = record.get("events").and_then(Value::as_array) else {
        return Vec::new();
    };
    events.iter().map(|event| build_row(record, event)).collect()
}

fn expand_flat(record: &Value) -> Vec<EventRow> {
    let mut row = base_row(record);
    row.event_slug = string_field(record, "events.slug");
    row.num_entrants = coerce_entrants(record.get("events.numEntrants"));
    row.game_title = string_field(record, "events.videogame.name");
    vec![row]
}

/// Worst-case reconstruction: accept a single `events` object; anything else
/// is unusable and dropped with a warning.
fn expand_fallback(record: &Value) -> Vec<EventRow> {
    if let Some(event) = record.get("events").filter(|events| events.is_object()) {
        debug!("normalizer: rebuilding row from single nested event object");
        return vec![build_row(record, event)];
    }

    warn!(
        "normalizer: record without usable event data, dropping: {}",
        record.get("slug").and_then(Value::as_str).unwrap_or("<no slug>")
    );
    Vec::new()
}

// --- Row building ---

fn build_row(record: &Value, event: &Value) -> EventRow {
    let mut row = base_row(record);
    row.event_slug = string_field(event, "slug");
    row.num_entrants = coerce_entrants(event.get("numEntrants"));
    row.game_title = event
        .get("videogame")
        .and_then(|videogame| videogame.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    row
}

fn base_row(record: &Value) -> EventRow {
    EventRow {
        tournament_slug: string_field(record, "slug"),
        tournament_name: string_field(record, "name"),
        city: string_field(record, "city"),
        start_at: record.get("startAt").and_then(coerce_i64),
        ..EventRow::default()
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn coerce_entrants(value: Option<&Value>) -> i64 {
    value.and_then(coerce_i64).unwrap_or(0)
}

// --- Filtering ---

fn matches_filter(row: &EventRow, filter: &FilterSettings) -> bool {
    row.game_title == filter.game_title && row.num_entrants >= filter.min_entrants
}

// --- Derived fields ---

fn derive_dates(row: &mut EventRow) {
    let Some(ts) = row.start_at else { return };
    let Some(dt) = DateTime::from_timestamp(ts, 0) else {
        warn!(
            "unrenderable startAt {} for {}",
            ts, row.tournament_slug
        );
        return;
    };
    row.start_at_iso = dt.to_rfc3339();
    row.event_date = dt.format("%Y-%m-%d").to_string();
}

fn derive_urls(row: &mut EventRow) {
    if row.event_slug.is_empty() {
        return;
    }
    row.startgg_url = format!("start.gg/{}", row.event_slug);
    row.event_suffix = row
        .event_slug
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    row.composite_slug = format!("{}/event/{}", row.tournament_slug, row.event_suffix);
}
