use serde::Deserialize;
use serde_json::Value;

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GqlEnvelope {
    pub data: Option<Value>,
    pub errors: Option<Vec<GqlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GqlError {
    pub message: String,
}

/// Coerce a loosely typed API value to an integer. start.gg is not consistent
/// about numeric fields arriving as numbers or strings.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// --- Event id lookup ---

#[derive(Debug, Deserialize)]
pub struct EventIdData {
    pub event: Option<EventIdNode>,
}

#[derive(Debug, Deserialize)]
pub struct EventIdNode {
    pub id: Option<i64>,
    pub name: Option<String>,
}

// --- Set id listing ---

#[derive(Debug, Deserialize)]
pub struct EventSetsData {
    pub event: Option<EventSetsNode>,
}

#[derive(Debug, Deserialize)]
pub struct EventSetsNode {
    pub sets: Option<SetsConnection>,
}

#[derive(Debug, Deserialize)]
pub struct SetsConnection {
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    pub nodes: Option<Vec<SetIdNode>>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "totalPages")]
    pub total_pages: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SetIdNode {
    pub id: Option<Value>,
}

// --- Set detail ---

#[derive(Debug, Deserialize)]
pub struct SetDetailData {
    pub set: Option<SetDetail>,
}

#[derive(Debug, Deserialize)]
pub struct SetDetail {
    pub slots: Option<Vec<SetSlot>>,
}

#[derive(Debug, Deserialize)]
pub struct SetSlot {
    pub entrant: Option<Entrant>,
    pub standing: Option<Standing>,
}

#[derive(Debug, Deserialize)]
pub struct Entrant {
    pub participants: Option<Vec<Participant>>,
}

#[derive(Debug, Deserialize)]
pub struct Participant {
    pub player: Option<PlayerRecord>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "gamerTag")]
    pub gamer_tag: Option<String>,
    pub prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Standing {
    pub stats: Option<StandingStats>,
}

#[derive(Debug, Deserialize)]
pub struct StandingStats {
    pub score: Option<ScoreValue>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreValue {
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_i64_from_number_and_string() {
        assert_eq!(coerce_i64(&json!(42)), Some(42));
        assert_eq!(coerce_i64(&json!("42")), Some(42));
        assert_eq!(coerce_i64(&json!(" 16 ")), Some(16));
    }

    #[test]
    fn test_coerce_i64_rejects_non_integers() {
        assert_eq!(coerce_i64(&json!(2.5)), None);
        assert_eq!(coerce_i64(&json!("sixteen")), None);
        assert_eq!(coerce_i64(&json!(null)), None);
        assert_eq!(coerce_i64(&json!([1])), None);
    }

    #[test]
    fn test_sets_page_deserializes() {
        let data = json!({
            "event": {
                "sets": {
                    "pageInfo": { "totalPages": 3 },
                    "nodes": [{ "id": 111 }, { "id": 222 }]
                }
            }
        });

        let parsed: EventSetsData = serde_json::from_value(data).unwrap();
        let sets = parsed.event.unwrap().sets.unwrap();
        assert_eq!(sets.page_info.unwrap().total_pages, Some(3));
        assert_eq!(sets.nodes.unwrap().len(), 2);
    }

    #[test]
    fn test_set_detail_tolerates_missing_fields() {
        let data = json!({ "set": { "slots": [{ "entrant": null, "standing": null }] } });

        let parsed: SetDetailData = serde_json::from_value(data).unwrap();
        let slots = parsed.set.unwrap().slots.unwrap();
        assert_eq!(slots.len(), 1);
        assert!(slots[0].entrant.is_none());
    }
}
