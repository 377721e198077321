use log::{info, warn};
use serde_json::{Value, json};

use crate::api::models::{
    EventIdData, EventSetsData, SetDetail, SetDetailData, SetSlot, coerce_i64,
};
use crate::api::{StartGgClient, queries};
use crate::cache::MatchCache;
use crate::domain::{EventRow, FetchProgress, MatchResult, SetOutcome};
use crate::errors::ApiError;

/// Resolve one event in place: numeric id, set ids, set outcomes and the
/// event's player set. Returns false when the event id could not be resolved
/// and the row should be dropped; nothing here aborts the run.
pub async fn resolve_event(
    client: &mut StartGgClient,
    cache: &mut MatchCache,
    row: &mut EventRow,
    per_page: usize,
) -> bool {
    let event_id = match resolve_event_id(client, &row.composite_slug).await {
        Ok(id) => id,
        Err(e) => {
            warn!("dropping event {}: {}", row.composite_slug, e);
            return false;
        }
    };
    row.event_id = Some(event_id);

    row.set_ids = match collect_set_ids(client, event_id, per_page).await {
        Ok(ids) => ids,
        Err(e) => {
            warn!("event {}: set id listing failed: {}", event_id, e);
            Vec::new()
        }
    };
    info!(
        "  event {}: {} set ids",
        row.composite_slug,
        row.set_ids.len()
    );

    fetch_event_sets(client, cache, row).await;
    collect_players(row);
    true
}

/// Resolve the numeric event id behind a composite slug
pub async fn resolve_event_id(client: &mut StartGgClient, slug: &str) -> Result<i64, ApiError> {
    let data = client
        .execute(queries::GET_EVENT_ID, json!({ "slug": slug }))
        .await?;
    let parsed: EventIdData = serde_json::from_value(data)
        .map_err(|e| ApiError::Query(vec![format!("malformed event response: {e}")]))?;

    parsed
        .event
        .and_then(|event| event.id)
        .ok_or_else(|| ApiError::NotFound(slug.to_string()))
}

/// Collect all set ids for an event, in page order, using the reported total
/// page count
pub async fn collect_set_ids(
    client: &mut StartGgClient,
    event_id: i64,
    per_page: usize,
) -> Result<Vec<i64>, ApiError> {
    let (mut ids, total_pages) = fetch_set_ids_page(client, event_id, 1, per_page).await?;
    for page in 2..=total_pages {
        let (page_ids, _) = fetch_set_ids_page(client, event_id, page, per_page).await?;
        ids.extend(page_ids);
    }
    Ok(ids)
}

/// Fetch one set's outcome through the cache. The first fetch for an id is
/// stored before being returned; later lookups never reach the network.
pub async fn fetch_set(
    client: &mut StartGgClient,
    cache: &mut MatchCache,
    set_id: i64,
) -> Result<SetOutcome, ApiError> {
    if let Some(outcome) = cache.get(set_id) {
        return Ok(outcome.clone());
    }

    let data = client
        .execute(queries::GET_SET_DETAIL, json!({ "setId": set_id }))
        .await?;
    let parsed: SetDetailData = serde_json::from_value(data)
        .map_err(|e| ApiError::Query(vec![format!("malformed set response: {e}")]))?;

    let outcome = classify_set(parsed.set);
    Ok(cache.insert(set_id, outcome).clone())
}

/// Classify a fetched set: fewer than two slots, or any slot without a
/// resolved entrant or player record, is Invalid; unknown scores stay None.
pub fn classify_set(detail: Option<SetDetail>) -> SetOutcome {
    let slots = detail.and_then(|detail| detail.slots).unwrap_or_default();
    if slots.len() < 2 || slots.iter().any(|slot| slot.entrant.is_none()) {
        return SetOutcome::Invalid;
    }

    let (Some(player_one), Some(player_two)) = (slot_name(&slots[0]), slot_name(&slots[1])) else {
        return SetOutcome::Invalid;
    };

    SetOutcome::Resolved(MatchResult {
        player_one,
        player_two,
        score_one: slot_score(&slots[0]),
        score_two: slot_score(&slots[1]),
    })
}

// --- Set pagination ---

async fn fetch_set_ids_page(
    client: &mut StartGgClient,
    event_id: i64,
    page: usize,
    per_page: usize,
) -> Result<(Vec<i64>, usize), ApiError> {
    let variables = json!({ "eventId": event_id, "page": page, "perPage": per_page });
    let data = client.execute(queries::GET_SETS_PAGE, variables).await?;
    let parsed: EventSetsData = serde_json::from_value(data)
        .map_err(|e| ApiError::Query(vec![format!("malformed sets page: {e}")]))?;
    Ok(extract_page(parsed))
}

fn extract_page(data: EventSetsData) -> (Vec<i64>, usize) {
    let Some(sets) = data.event.and_then(|event| event.sets) else {
        return (Vec::new(), 1);
    };

    let total_pages = sets
        .page_info
        .and_then(|info| info.total_pages)
        .unwrap_or(1);
    let ids = sets
        .nodes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|node| node.id.as_ref().and_then(coerce_i64))
        .collect();
    (ids, total_pages)
}

// --- Set fetching ---

async fn fetch_event_sets(client: &mut StartGgClient, cache: &mut MatchCache, row: &mut EventRow) {
    let set_ids = row.set_ids.clone();
    if set_ids.is_empty() {
        return;
    }

    let mut progress = FetchProgress::new(set_ids.len());
    let mut invalid = 0usize;
    let mut failed = 0usize;

    for set_id in set_ids {
        let was_cached = cache.contains(set_id);
        match fetch_set(client, cache, set_id).await {
            Ok(SetOutcome::Resolved(result)) => row.sets.push(result),
            Ok(SetOutcome::Invalid) => invalid += 1,
            Err(e) => {
                warn!("set {}: fetch failed, skipping: {}", set_id, e);
                failed += 1;
            }
        }
        if was_cached {
            progress.increment_cached();
        } else {
            progress.increment_fetched();
        }
    }

    info!(
        "  event {}: {}/{} sets resolved ({} invalid, {} fetch failures)",
        row.composite_slug,
        row.sets.len(),
        row.set_ids.len(),
        invalid,
        failed
    );
}

/// Players of an event: the union of both names across all resolved sets,
/// scored or not
fn collect_players(row: &mut EventRow) {
    row.players = row
        .sets
        .iter()
        .flat_map(|set| [set.player_one.clone(), set.player_two.clone()])
        .collect();
}

// --- Classification helpers ---

fn slot_name(slot: &SetSlot) -> Option<String> {
    let player = slot
        .entrant
        .as_ref()?
        .participants
        .as_ref()?
        .first()?
        .player
        .as_ref()?;
    let tag = player.gamer_tag.as_deref()?;
    Some(display_name(tag, player.prefix.as_deref()))
}

fn display_name(tag: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{} | {}", prefix, tag),
        _ => tag.to_string(),
    }
}

fn slot_score(slot: &SetSlot) -> Option<i32> {
    let value = slot
        .standing
        .as_ref()?
        .stats
        .as_ref()?
        .score
        .as_ref()?
        .value
        .as_ref()?;
    value.as_i64().and_then(|score| i32::try_from(score).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail_from(value: Value) -> Option<SetDetail> {
        let parsed: SetDetailData = serde_json::from_value(json!({ "set": value })).unwrap();
        parsed.set
    }

    fn slot(tag: &str, prefix: Option<&str>, score: Value) -> Value {
        json!({
            "entrant": {
                "participants": [{ "player": { "gamerTag": tag, "prefix": prefix } }]
            },
            "standing": { "stats": { "score": { "value": score } } }
        })
    }

    #[test]
    fn test_classify_valid_set() {
        let detail = detail_from(json!({
            "slots": [
                slot("Glutonny", Some("W"), json!(3)),
                slot("MkLeo", None, json!(1)),
            ]
        }));

        let outcome = classify_set(detail);
        assert_eq!(
            outcome,
            SetOutcome::Resolved(MatchResult {
                player_one: "W | Glutonny".to_string(),
                player_two: "MkLeo".to_string(),
                score_one: Some(3),
                score_two: Some(1),
            })
        );
    }

    #[test]
    fn test_classify_single_slot_is_invalid() {
        let detail = detail_from(json!({ "slots": [slot("MkLeo", None, json!(2))] }));
        assert_eq!(classify_set(detail), SetOutcome::Invalid);
    }

    #[test]
    fn test_classify_missing_entrant_is_invalid() {
        let detail = detail_from(json!({
            "slots": [
                slot("MkLeo", None, json!(2)),
                { "entrant": null, "standing": null },
            ]
        }));
        assert_eq!(classify_set(detail), SetOutcome::Invalid);
    }

    #[test]
    fn test_classify_missing_set_is_invalid() {
        assert_eq!(classify_set(None), SetOutcome::Invalid);
    }

    #[test]
    fn test_non_integer_score_becomes_unknown() {
        let detail = detail_from(json!({
            "slots": [
                slot("A", None, json!(null)),
                slot("B", None, json!(2)),
            ]
        }));

        let SetOutcome::Resolved(result) = classify_set(detail) else {
            panic!("expected resolved set");
        };
        assert_eq!(result.score_one, None);
        assert_eq!(result.score_two, Some(2));
    }

    #[test]
    fn test_empty_prefix_is_omitted() {
        let detail = detail_from(json!({
            "slots": [
                slot("A", Some(""), json!(2)),
                slot("B", None, json!(0)),
            ]
        }));

        let SetOutcome::Resolved(result) = classify_set(detail) else {
            panic!("expected resolved set");
        };
        assert_eq!(result.player_one, "A");
    }

    #[test]
    fn test_players_include_unscored_participants() {
        let mut row = EventRow::default();
        row.sets.push(MatchResult {
            player_one: "A".to_string(),
            player_two: "B".to_string(),
            score_one: Some(2),
            score_two: Some(0),
        });
        row.sets.push(MatchResult {
            player_one: "B".to_string(),
            player_two: "C".to_string(),
            score_one: None,
            score_two: None,
        });

        collect_players(&mut row);
        let players: Vec<&str> = row.players.iter().map(String::as_str).collect();
        assert_eq!(players, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_extract_page_totals_and_ids() {
        let parsed: EventSetsData = serde_json::from_value(json!({
            "event": {
                "sets": {
                    "pageInfo": { "totalPages": 2 },
                    "nodes": [{ "id": 5 }, { "id": "6" }, { "id": null }]
                }
            }
        }))
        .unwrap();

        let (ids, total_pages) = extract_page(parsed);
        assert_eq!(ids, vec![5, 6]);
        assert_eq!(total_pages, 2);
    }

    #[test]
    fn test_extract_page_handles_missing_event() {
        let parsed: EventSetsData = serde_json::from_value(json!({ "event": null })).unwrap();
        let (ids, total_pages) = extract_page(parsed);
        assert!(ids.is_empty());
        assert_eq!(total_pages, 1);
    }
}
