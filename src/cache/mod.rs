use std::collections::HashMap;

use crate::domain::SetOutcome;

/// Process-lifetime cache of resolved set outcomes, keyed by set id and
/// shared across all events in a run.
///
/// Write-once, read-through: once a key is populated it is never refetched or
/// invalidated within the run.
pub struct MatchCache {
    entries: HashMap<i64, SetOutcome>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, set_id: i64) -> Option<&SetOutcome> {
        self.entries.get(&set_id)
    }

    /// Store the outcome for a set id. The first write wins; later writes for
    /// the same id are ignored.
    pub fn insert(&mut self, set_id: i64, outcome: SetOutcome) -> &SetOutcome {
        self.entries.entry(set_id).or_insert(outcome)
    }

    pub fn contains(&self, set_id: i64) -> bool {
        self.entries.contains_key(&set_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}
